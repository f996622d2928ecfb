//! Terminal output formatting for the clarity-forge CLI.
//!
//! Every command prints through these helpers so status prefixes and
//! indentation stay consistent. Styling comes from [`console`].

use console::style;

/// Print a bold cyan header with an underline separator.
pub fn print_header(text: &str) {
    println!("\n{}", style(text).bold().cyan());
    println!("{}", style("=".repeat(text.len())).dim());
}

/// Print a success message prefixed with green `[OK]`.
pub fn print_success(text: &str) {
    println!("{} {}", style("[OK]").green().bold(), text);
}

/// Print a warning message prefixed with yellow `[WARN]`.
pub fn print_warning(text: &str) {
    println!("{} {}", style("[WARN]").yellow().bold(), text);
}

/// Print an error message prefixed with red `[ERROR]`.
pub fn print_error(text: &str) {
    println!("{} {}", style("[ERROR]").red().bold(), text);
}

/// Print a progress step indicator like `[1/3] Scanning templates...`.
pub fn print_step(step: u32, total: u32, text: &str) {
    println!("{} {}", style(format!("[{step}/{total}]")).dim(), text);
}

/// Print a key-value pair with dimmed key formatting.
pub fn print_key_value(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Print one bulleted item, e.g. a variable missing from the catalog.
pub fn print_list_item(text: &str) {
    println!("  {} {}", style("-").dim(), text);
}

/// Print a multi-line error body indented under its `[ERROR]` line.
pub fn print_details(text: &str) {
    for line in text.lines() {
        println!("    {line}");
    }
}

/// Print a directive location as `file:line /g/<toReplace>/<keyName>`.
pub fn print_directive(file_path: &str, line_number: usize, to_replace: &str, key_name: &str) {
    println!(
        "  {}:{} {}",
        file_path,
        line_number,
        style(format!("/g/{to_replace}/{key_name}")).yellow()
    );
}

/// Print catalog entries as two aligned columns.
pub fn print_catalog<'a>(entries: impl IntoIterator<Item = (&'a String, &'a String)>) {
    for (key, value) in align_keys(entries) {
        println!("  {}  {value}", style(key).dim());
    }
}

/// Pad every key to the width of the longest one.
fn align_keys<'a>(entries: impl IntoIterator<Item = (&'a String, &'a String)>) -> Vec<(String, &'a str)> {
    let entries: Vec<_> = entries.into_iter().collect();
    let width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    entries
        .into_iter()
        .map(|(key, value)| (format!("{key:<width$}"), value.as_str()))
        .collect()
}
