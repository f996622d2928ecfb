use std::path::Path;

use anyhow::Result;

use clarity_forge_core::report;
use clarity_forge_core::scanner::TemplateScanner;

use super::{build_registry, Workspace};
use crate::output;

/// Scan all templates and write the issue report.
///
/// Every directive is checked against the known-variable catalog of the reference
/// network and against its contract's declared dependencies. Fails when any issue
/// or read failure is found.
pub async fn run(config_path: &Path, report_path: &Path, dao_only: bool, audit_patterns: bool) -> Result<()> {
    output::print_header("clarity-forge scan");

    let workspace = Workspace::load(config_path)?;
    let source = workspace.template_source();
    let registry = build_registry(dao_only)?;

    output::print_key_value("Contracts root", &source.root().display().to_string());
    output::print_key_value("Reference network", workspace.config.reference_network.as_str());
    output::print_key_value("Contracts", &registry.len().to_string());

    output::print_step(1, 2, "Scanning templates...");
    let scanner = TemplateScanner::new(&registry, &source, &workspace.config)?;
    let scan = scanner.scan_all_templates().await;
    println!("{}", report::format_report(&scan));

    output::print_step(2, 2, &format!("Writing report to {}", report_path.display()));
    report::save_report(&scan.issues, report_path)?;

    if audit_patterns {
        let findings = scanner.audit_patterns().await;
        if findings.is_empty() {
            output::print_success("No replaced text contains regex metacharacters");
        } else {
            output::print_warning(&format!(
                "{} directive(s) replace text containing regex metacharacters:",
                findings.len()
            ));
            for finding in &findings {
                output::print_directive(
                    &finding.file_path,
                    finding.directive.line_number,
                    &finding.directive.to_replace,
                    &finding.directive.key_name,
                );
            }
        }
    }

    if scan.is_clean() {
        output::print_success("All template directives are known and declared");
        Ok(())
    } else {
        output::print_error(&format!(
            "{} issue(s), {} read failure(s)",
            scan.issues.len(),
            scan.failures.len()
        ));
        anyhow::bail!("template validation failed")
    }
}
