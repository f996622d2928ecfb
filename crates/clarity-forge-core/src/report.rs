//! Persistence and text rendering for scan results.
//!
//! `scan` writes the issue list as a JSON array; `variables` writes the variable
//! report. Both are pretty-printed so they diff cleanly.

use std::path::Path;

use serde::Serialize;

use crate::error::{ForgeError, Result};
use crate::registry::ContractRegistry;
use crate::scanner::{IssueType, ScanReport, ValidationIssue, VariableReport};

/// Default file name for the validation report.
pub const VALIDATION_REPORT_FILE: &str = "template-validation-report.json";

/// Default file name for the variable report.
pub const VARIABLE_REPORT_FILE: &str = "template-variables.json";

/// File name of the registry written next to generated contracts.
pub const REGISTRY_FILE: &str = "contract-registry.json";

fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|e| ForgeError::ReportWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Write issues as a JSON array of `{filePath, lineNumber?, toReplace, keyName, issueType, message}`.
pub fn save_report(issues: &[ValidationIssue], path: &Path) -> Result<()> {
    write_json(issues, path)?;
    tracing::info!(path = %path.display(), issues = issues.len(), "validation report saved");
    Ok(())
}

pub fn load_report(path: &Path) -> Result<Vec<ValidationIssue>> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| ForgeError::ReportParse {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn save_variable_report(report: &VariableReport, path: &Path) -> Result<()> {
    write_json(report, path)?;
    tracing::info!(path = %path.display(), "variable report saved");
    Ok(())
}

/// Write the registry as a JSON array of entries in deployment order.
pub fn save_registry(registry: &ContractRegistry, path: &Path) -> Result<()> {
    let entries = registry.by_deployment_order();
    write_json(&entries, path)?;
    tracing::info!(path = %path.display(), contracts = entries.len(), "registry saved");
    Ok(())
}

/// Human-readable summary of a scan.
pub fn format_report(report: &ScanReport) -> String {
    let mut out = format!(
        r#"
Template Validation
============================================

Templates scanned       {}
Templates missing       {}
Read failures           {}

Issue                   Count
------------------------------------------------------------
UnknownKeyName          {}
UndeclaredDependency    {}
MissingTemplateFile     {}
"#,
        report.scanned,
        report.missing,
        report.failures.len(),
        report.count(IssueType::UnknownKeyName),
        report.count(IssueType::UndeclaredDependency),
        report.count(IssueType::MissingTemplateFile),
    );

    if !report.issues.is_empty() {
        out.push_str("\nIssues:\n");
        for issue in &report.issues {
            match issue.line_number {
                Some(line) => out.push_str(&format!(
                    "  {}:{line} [{}] {}\n",
                    issue.file_path, issue.issue_type, issue.message
                )),
                None => out.push_str(&format!(
                    "  {} [{}] {}\n",
                    issue.file_path, issue.issue_type, issue.message
                )),
            }
        }
    }

    if !report.failures.is_empty() {
        out.push_str("\nFailures:\n");
        for failure in &report.failures {
            out.push_str(&format!(
                "  {} ({}): {}\n",
                failure.contract, failure.file_path, failure.error
            ));
        }
    }

    out
}
