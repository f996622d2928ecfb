//! Cross-validation of templates against the variable catalog and declared dependencies.
//!
//! For every registered contract the scanner reads its template and checks each
//! directive's key name twice, independently:
//!
//! - [`IssueType::UnknownKeyName`]: the key is not in the known-variable catalog, built
//!   once for the configured reference network.
//! - [`IssueType::UndeclaredDependency`]: the key is not among the contract's declared
//!   dependencies.
//!
//! A single directive can produce zero, one or two issues. Missing templates are
//! reported as [`IssueType::MissingTemplateFile`] when enabled; any other read failure
//! is recorded in [`ScanReport::failures`] and the scan moves on.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ForgeConfig;
use crate::contract::ContractDefinition;
use crate::directive::{self, Directive};
use crate::error::{ForgeError, Result};
use crate::processor::ReplacementMap;
use crate::registry::ContractRegistry;
use crate::source::TemplateSource;
use crate::variables::known_variable_names;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueType {
    UnknownKeyName,
    UndeclaredDependency,
    MissingTemplateFile,
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IssueType::UnknownKeyName => "UnknownKeyName",
            IssueType::UndeclaredDependency => "UndeclaredDependency",
            IssueType::MissingTemplateFile => "MissingTemplateFile",
        };
        f.write_str(name)
    }
}

/// One problem found in a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub file_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
    pub to_replace: String,
    pub key_name: String,
    pub issue_type: IssueType,
    pub message: String,
}

/// A template that could not be read for a reason other than not existing.
#[derive(Debug, Clone)]
pub struct ScanFailure {
    pub contract: String,
    pub file_path: String,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub issues: Vec<ValidationIssue>,
    pub failures: Vec<ScanFailure>,
    /// Contracts whose template was read and checked.
    pub scanned: usize,
    /// Contracts whose template does not exist.
    pub missing: usize,
}

impl ScanReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.failures.is_empty()
    }

    pub fn count(&self, issue_type: IssueType) -> usize {
        self.issues.iter().filter(|i| i.issue_type == issue_type).count()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    pub report_missing_templates: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            report_missing_templates: true,
        }
    }
}

/// Result of checking one contract's directives against a concrete map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplacementValidation {
    pub valid: bool,
    pub missing_variables: Vec<String>,
}

impl ReplacementValidation {
    fn failed(message: String) -> Self {
        Self {
            valid: false,
            missing_variables: vec![message],
        }
    }
}

/// Unique directive keys per contract and across all templates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableReport {
    pub all_unique_variables: Vec<String>,
    /// Keyed by `<type>/<name>`.
    pub contract_variables: BTreeMap<String, Vec<String>>,
}

/// A directive whose `toReplace` text contains regex metacharacters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternFinding {
    pub contract: String,
    pub file_path: String,
    #[serde(flatten)]
    pub directive: Directive,
}

pub struct TemplateScanner<'a> {
    registry: &'a ContractRegistry,
    source: &'a dyn TemplateSource,
    known: BTreeSet<String>,
    options: ScanOptions,
}

impl<'a> TemplateScanner<'a> {
    /// Build a scanner. The known-variable catalog is built here, once; a catalog
    /// failure is returned as an error.
    pub fn new(
        registry: &'a ContractRegistry,
        source: &'a dyn TemplateSource,
        config: &ForgeConfig,
    ) -> Result<Self> {
        let known = known_variable_names(config)?;
        let options = ScanOptions {
            report_missing_templates: config.report_missing_templates,
        };
        Ok(Self::with_known_names(registry, source, known, options))
    }

    pub fn with_known_names(
        registry: &'a ContractRegistry,
        source: &'a dyn TemplateSource,
        known: BTreeSet<String>,
        options: ScanOptions,
    ) -> Self {
        Self {
            registry,
            source,
            known,
            options,
        }
    }

    pub fn known_names(&self) -> &BTreeSet<String> {
        &self.known
    }

    /// Scan every registered contract, in registration order.
    pub async fn scan_all_templates(&self) -> ScanReport {
        let mut report = ScanReport::default();

        for contract in self.registry.iter() {
            let file_path = self.display_path(contract);
            match self.source.read_template(&contract.template_path).await {
                Ok(Some(text)) => {
                    report.scanned += 1;
                    report.issues.extend(self.check_template(contract, &file_path, &text));
                }
                Ok(None) => {
                    report.missing += 1;
                    tracing::warn!(contract = %contract.name, path = %file_path, "template not found");
                    if self.options.report_missing_templates {
                        report.issues.push(missing_template_issue(contract, file_path));
                    }
                }
                Err(e) => {
                    tracing::warn!(contract = %contract.name, path = %file_path, error = %e, "failed to read template");
                    report.failures.push(ScanFailure {
                        contract: contract.name.clone(),
                        file_path,
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            scanned = report.scanned,
            missing = report.missing,
            issues = report.issues.len(),
            failures = report.failures.len(),
            "template scan complete"
        );
        report
    }

    /// Scan one contract by name.
    pub async fn scan_contract(&self, name: &str) -> Result<Vec<ValidationIssue>> {
        let contract = self.registry.require(name)?;
        let file_path = self.display_path(contract);
        match self.source.read_template(&contract.template_path).await? {
            Some(text) => Ok(self.check_template(contract, &file_path, &text)),
            None if self.options.report_missing_templates => {
                Ok(vec![missing_template_issue(contract, file_path)])
            }
            None => Ok(Vec::new()),
        }
    }

    /// Check that `replacements` holds a non-empty value for every directive key name
    /// in the contract's template. Lookup and read failures come back as
    /// `valid: false` with a single explanatory entry.
    pub async fn validate_contract_replacements(
        &self,
        name: &str,
        replacements: &ReplacementMap,
    ) -> ReplacementValidation {
        match self.missing_replacements(name, replacements).await {
            Ok(missing) => ReplacementValidation {
                valid: missing.is_empty(),
                missing_variables: missing,
            },
            Err(e) => ReplacementValidation::failed(format!("error validating {name}: {e}")),
        }
    }

    async fn missing_replacements(&self, name: &str, replacements: &ReplacementMap) -> Result<Vec<String>> {
        let contract = self.registry.require(name)?;
        let text = self
            .source
            .read_template(&contract.template_path)
            .await?
            .ok_or_else(|| ForgeError::MissingTemplateFile {
                contract: contract.name.clone(),
                path: self.source.resolve(&contract.template_path),
            })?;

        let has_value = |key: &str| replacements.get(key).is_some_and(|v| !v.is_empty());
        let mut seen = HashSet::new();
        let mut missing = Vec::new();
        for found in directive::scan_directives(&text) {
            if !seen.insert(found.key_name.clone()) {
                continue;
            }
            if !has_value(&found.key_name) && !has_value(&found.composite_key()) {
                missing.push(found.key_name);
            }
        }
        Ok(missing)
    }

    /// Unique `toReplace/keyName` keys per template. Missing or unreadable templates
    /// are left out.
    pub async fn variable_report(&self) -> VariableReport {
        let mut report = VariableReport::default();
        let mut all = HashSet::new();

        for contract in self.registry.iter() {
            let text = match self.source.read_template(&contract.template_path).await {
                Ok(Some(text)) => text,
                Ok(None) => {
                    tracing::warn!(contract = %contract.name, "template not found");
                    continue;
                }
                Err(e) => {
                    tracing::warn!(contract = %contract.name, error = %e, "failed to read template");
                    continue;
                }
            };

            let mut seen = HashSet::new();
            let mut variables = Vec::new();
            for found in directive::scan_directives(&text) {
                let key = found.composite_key();
                if seen.insert(key.clone()) {
                    if all.insert(key.clone()) {
                        report.all_unique_variables.push(key.clone());
                    }
                    variables.push(key);
                }
            }
            report
                .contract_variables
                .insert(format!("{}/{}", contract.contract_type, contract.name), variables);
        }

        report
    }

    /// Directives whose `toReplace` text would act as a live regex pattern.
    pub async fn audit_patterns(&self) -> Vec<PatternFinding> {
        let mut findings = Vec::new();
        for contract in self.registry.iter() {
            let Ok(Some(text)) = self.source.read_template(&contract.template_path).await else {
                continue;
            };
            let file_path = self.display_path(contract);
            findings.extend(
                directive::scan_directives(&text)
                    .into_iter()
                    .filter(|d| directive::has_pattern_metacharacters(&d.to_replace))
                    .map(|d| PatternFinding {
                        contract: contract.name.clone(),
                        file_path: file_path.clone(),
                        directive: d,
                    }),
            );
        }
        findings
    }

    fn check_template(&self, contract: &ContractDefinition, file_path: &str, text: &str) -> Vec<ValidationIssue> {
        let declared = contract.declared_keys();
        let mut issues = Vec::new();

        for found in directive::scan_directives(text) {
            if !self.known.contains(&found.key_name) {
                issues.push(ValidationIssue {
                    file_path: file_path.to_string(),
                    line_number: Some(found.line_number),
                    to_replace: found.to_replace.clone(),
                    key_name: found.key_name.clone(),
                    issue_type: IssueType::UnknownKeyName,
                    message: format!(
                        "key '{}' (replacing '{}') is not in the known variable catalog",
                        found.key_name, found.to_replace
                    ),
                });
            }
            if !declared.contains(&found.key_name) {
                issues.push(ValidationIssue {
                    file_path: file_path.to_string(),
                    line_number: Some(found.line_number),
                    to_replace: found.to_replace.clone(),
                    key_name: found.key_name.clone(),
                    issue_type: IssueType::UndeclaredDependency,
                    message: format!(
                        "key '{}' is not a declared dependency of {}",
                        found.key_name, contract.name
                    ),
                });
            }
        }

        issues
    }

    fn display_path(&self, contract: &ContractDefinition) -> String {
        self.source
            .resolve(&contract.template_path)
            .display()
            .to_string()
    }
}

fn missing_template_issue(contract: &ContractDefinition, file_path: String) -> ValidationIssue {
    ValidationIssue {
        message: format!("template file for {} not found at {file_path}", contract.name),
        file_path,
        line_number: None,
        to_replace: String::new(),
        key_name: String::new(),
        issue_type: IssueType::MissingTemplateFile,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use async_trait::async_trait;

    use super::*;
    use crate::contract_types::{ContractSubtype, ContractType};
    use crate::dependencies::setup_dao_contract_registry;
    use crate::source::MemoryTemplateSource;

    const BASE_DAO: &str = "dao/aibtc-base-dao.clar";

    fn base_dao_registry() -> ContractRegistry {
        let mut registry = ContractRegistry::new();
        registry
            .register(ContractDefinition::new("aibtc-base-dao", ContractType::Base, ContractSubtype::Dao))
            .unwrap()
            .add_runtime_value("dao_token_symbol")
            .add_runtime_value("custom_value");
        registry
    }

    fn scanner<'a>(registry: &'a ContractRegistry, source: &'a dyn TemplateSource) -> TemplateScanner<'a> {
        TemplateScanner::new(registry, source, &ForgeConfig::default()).unwrap()
    }

    fn issue_types(issues: &[ValidationIssue]) -> Vec<IssueType> {
        issues.iter().map(|i| i.issue_type).collect()
    }

    #[tokio::test]
    async fn test_unknown_and_undeclared_key_yields_two_issues() {
        let registry = base_dao_registry();
        let mut source = MemoryTemplateSource::new();
        source.insert(BASE_DAO, ";; /g/something/unknown_thing_xyz\n(define-constant X something)\n");

        let report = scanner(&registry, &source).scan_all_templates().await;
        assert_eq!(
            issue_types(&report.issues),
            vec![IssueType::UnknownKeyName, IssueType::UndeclaredDependency]
        );
        assert_eq!(report.issues[0].line_number, Some(1));
        assert_eq!(report.issues[0].key_name, "unknown_thing_xyz");
        assert_eq!(report.issues[0].file_path, BASE_DAO);
    }

    #[tokio::test]
    async fn test_known_and_declared_key_is_clean() {
        let registry = base_dao_registry();
        let mut source = MemoryTemplateSource::new();
        source.insert(BASE_DAO, ";; /g/aibtc/dao_token_symbol\n(define-constant S \"aibtc\")");

        let report = scanner(&registry, &source).scan_all_templates().await;
        assert!(report.is_clean());
        assert_eq!(report.scanned, 1);
    }

    #[tokio::test]
    async fn test_declared_but_unknown_key() {
        let registry = base_dao_registry();
        let mut source = MemoryTemplateSource::new();
        source.insert(BASE_DAO, ";; /g/x/custom_value\nx");

        let issues = scanner(&registry, &source).scan_contract("aibtc-base-dao").await.unwrap();
        assert_eq!(issue_types(&issues), vec![IssueType::UnknownKeyName]);
    }

    #[tokio::test]
    async fn test_known_but_undeclared_key() {
        let registry = base_dao_registry();
        let mut source = MemoryTemplateSource::new();
        source.insert(BASE_DAO, ";; /g/.aibtc-treasury/dao_contract_treasury\n.aibtc-treasury");

        let issues = scanner(&registry, &source).scan_contract("aibtc-base-dao").await.unwrap();
        assert_eq!(issue_types(&issues), vec![IssueType::UndeclaredDependency]);
    }

    #[tokio::test]
    async fn test_all_directives_on_a_line_are_checked() {
        let registry = base_dao_registry();
        let mut source = MemoryTemplateSource::new();
        source.insert(BASE_DAO, ";; /g/aibtc/dao_token_symbol ;; /g/y/unknown_thing_xyz\naibtc y");

        let issues = scanner(&registry, &source).scan_contract("aibtc-base-dao").await.unwrap();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.key_name == "unknown_thing_xyz"));
    }

    #[tokio::test]
    async fn test_missing_template_reported_when_enabled() {
        let registry = base_dao_registry();
        let source = MemoryTemplateSource::new();

        let report = scanner(&registry, &source).scan_all_templates().await;
        assert_eq!(issue_types(&report.issues), vec![IssueType::MissingTemplateFile]);
        assert_eq!(report.issues[0].line_number, None);
        assert_eq!(report.missing, 1);
    }

    #[tokio::test]
    async fn test_missing_template_silent_when_disabled() {
        let registry = base_dao_registry();
        let source = MemoryTemplateSource::new();
        let config = ForgeConfig {
            report_missing_templates: false,
            ..ForgeConfig::default()
        };

        let report = TemplateScanner::new(&registry, &source, &config)
            .unwrap()
            .scan_all_templates()
            .await;
        assert!(report.issues.is_empty());
        assert!(report.failures.is_empty());
    }

    struct BrokenSource;

    #[async_trait]
    impl TemplateSource for BrokenSource {
        async fn read_template(&self, _relative: &str) -> Result<Option<String>> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into())
        }

        fn resolve(&self, relative: &str) -> PathBuf {
            PathBuf::from(relative)
        }
    }

    #[tokio::test]
    async fn test_read_failures_recorded_per_contract() {
        let registry = setup_dao_contract_registry().unwrap();
        let report = scanner(&registry, &BrokenSource).scan_all_templates().await;
        assert_eq!(report.failures.len(), registry.len());
        assert!(report.issues.is_empty());
    }

    #[tokio::test]
    async fn test_validate_replacements_counts_distinct_keys() {
        let registry = base_dao_registry();
        let mut source = MemoryTemplateSource::new();
        source.insert(
            BASE_DAO,
            ";; /g/aibtc/dao_token_symbol\naibtc\n;; /g/AIBTC/dao_token_symbol\nAIBTC\n;; /g/x/custom_value\nx",
        );
        let scanner = scanner(&registry, &source);

        let empty = scanner
            .validate_contract_replacements("aibtc-base-dao", &ReplacementMap::new())
            .await;
        assert!(!empty.valid);
        assert_eq!(empty.missing_variables, vec!["dao_token_symbol", "custom_value"]);

        let mut map = ReplacementMap::new();
        map.insert("dao_token_symbol".into(), "DOG".into());
        map.insert("x/custom_value".into(), "1".into());
        let full = scanner.validate_contract_replacements("aibtc-base-dao", &map).await;
        assert!(full.valid);
        assert!(full.missing_variables.is_empty());
    }

    #[tokio::test]
    async fn test_validate_replacements_empty_value_is_missing() {
        let registry = base_dao_registry();
        let mut source = MemoryTemplateSource::new();
        source.insert(BASE_DAO, ";; /g/aibtc/dao_token_symbol\naibtc");
        let mut map = ReplacementMap::new();
        map.insert("dao_token_symbol".into(), String::new());

        let result = scanner(&registry, &source)
            .validate_contract_replacements("aibtc-base-dao", &map)
            .await;
        assert_eq!(result.missing_variables, vec!["dao_token_symbol"]);
    }

    #[tokio::test]
    async fn test_validate_replacements_folds_errors() {
        let registry = base_dao_registry();
        let source = MemoryTemplateSource::new();
        let scanner = scanner(&registry, &source);

        let unknown = scanner
            .validate_contract_replacements("aibtc-nope", &ReplacementMap::new())
            .await;
        assert!(!unknown.valid);
        assert_eq!(unknown.missing_variables.len(), 1);
        assert!(unknown.missing_variables[0].contains("not found"));

        let missing = scanner
            .validate_contract_replacements("aibtc-base-dao", &ReplacementMap::new())
            .await;
        assert!(!missing.valid);
    }

    #[tokio::test]
    async fn test_variable_report() {
        let registry = base_dao_registry();
        let mut source = MemoryTemplateSource::new();
        source.insert(BASE_DAO, ";; /g/aibtc/dao_token_symbol\naibtc\n;; /g/aibtc/dao_token_symbol\naibtc");

        let report = scanner(&registry, &source).variable_report().await;
        assert_eq!(report.all_unique_variables, vec!["aibtc/dao_token_symbol"]);
        assert_eq!(
            report.contract_variables["BASE/aibtc-base-dao"],
            vec!["aibtc/dao_token_symbol"]
        );
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("allUniqueVariables").is_some());
        assert!(json.get("contractVariables").is_some());
    }

    #[tokio::test]
    async fn test_audit_patterns_flags_metacharacters() {
        let registry = base_dao_registry();
        let mut source = MemoryTemplateSource::new();
        source.insert(
            BASE_DAO,
            ";; /g/.aibtc-dao-traits.extension/dao_trait_extension\n(impl-trait .aibtc-dao-traits.extension)\n;; /g/aibtc/dao_token_symbol\naibtc",
        );

        let findings = scanner(&registry, &source).audit_patterns().await;
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].directive.line_number, 1);
        assert_eq!(findings[0].directive.key_name, "dao_trait_extension");
    }

    #[test]
    fn test_issue_json_shape() {
        let issue = ValidationIssue {
            file_path: "dao/x.clar".into(),
            line_number: None,
            to_replace: String::new(),
            key_name: String::new(),
            issue_type: IssueType::MissingTemplateFile,
            message: "missing".into(),
        };
        let json = serde_json::to_value(&issue).unwrap();
        assert!(json.get("lineNumber").is_none());
        assert_eq!(json["issueType"], "MissingTemplateFile");
        assert_eq!(json["filePath"], "dao/x.clar");
    }
}
