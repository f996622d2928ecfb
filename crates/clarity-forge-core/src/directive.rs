//! Template directive extraction.
//!
//! A directive is a Clarity comment of the form
//!
//! ```text
//! ;; /g/<toReplace>/<keyName>
//! ```
//!
//! marking the following source line as a substitution target: `toReplace` is the
//! literal text expected on that line and `keyName` is the logical variable that
//! supplies its value. Both the substitution engine and the scanner go through this
//! module so they always agree on what counts as a directive.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static DIRECTIVE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r";;\s*/g/([^/\r\n]+)/([^/\r\n]+)").expect("Invalid directive regex")
});

/// Characters that carry meaning in a regular expression.
const PATTERN_METACHARACTERS: &[char] = &[
    '.', '*', '+', '?', '^', '$', '{', '}', '(', ')', '|', '[', ']', '\\',
];

/// One `/g/` match on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveMatch<'a> {
    pub to_replace: &'a str,
    pub key_name: &'a str,
}

impl DirectiveMatch<'_> {
    /// `toReplace/keyName`, the key used to look up a replacement value.
    pub fn composite_key(&self) -> String {
        format!("{}/{}", self.to_replace, self.key_name)
    }
}

/// A directive found in a template, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Directive {
    pub line_number: usize,
    pub to_replace: String,
    pub key_name: String,
}

impl Directive {
    pub fn composite_key(&self) -> String {
        format!("{}/{}", self.to_replace, self.key_name)
    }
}

/// Every directive on `line`, in order of appearance.
pub fn parse_line(line: &str) -> Vec<DirectiveMatch<'_>> {
    DIRECTIVE_REGEX
        .captures_iter(line)
        .filter_map(|caps| {
            Some(DirectiveMatch {
                to_replace: caps.get(1)?.as_str(),
                key_name: caps.get(2)?.as_str(),
            })
        })
        .collect()
}

/// Returns `true` if `line` holds at least one directive.
pub fn is_directive_line(line: &str) -> bool {
    DIRECTIVE_REGEX.is_match(line)
}

/// Every directive in `text`, line by line.
pub fn scan_directives(text: &str) -> Vec<Directive> {
    text.split('\n')
        .enumerate()
        .flat_map(|(idx, line)| {
            parse_line(line).into_iter().map(move |m| Directive {
                line_number: idx + 1,
                to_replace: m.to_replace.to_string(),
                key_name: m.key_name.to_string(),
            })
        })
        .collect()
}

/// Returns `true` if `to_replace` would behave differently as a regex than as a
/// literal string.
pub fn has_pattern_metacharacters(to_replace: &str) -> bool {
    to_replace.contains(PATTERN_METACHARACTERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_directive() {
        let found = parse_line(";; /g/aibtc/dao_token_symbol");
        assert_eq!(
            found,
            vec![DirectiveMatch {
                to_replace: "aibtc",
                key_name: "dao_token_symbol"
            }]
        );
        assert_eq!(found[0].composite_key(), "aibtc/dao_token_symbol");
    }

    #[test]
    fn test_whitespace_after_comment_marker_is_optional() {
        assert_eq!(parse_line(";;/g/a/b").len(), 1);
        assert_eq!(parse_line(";;    /g/a/b").len(), 1);
        assert!(parse_line("; /g/a/b").is_empty());
        assert!(parse_line("/g/a/b").is_empty());
    }

    #[test]
    fn test_plain_lines_are_not_directives() {
        assert!(!is_directive_line("(define-constant TOKEN_SYMBOL \"aibtc\")"));
        assert!(!is_directive_line(";; a normal comment"));
        assert!(is_directive_line("  ;; /g/.aibtc-faktory/dao_contract_token"));
    }

    #[test]
    fn test_key_name_stops_at_carriage_return() {
        let found = parse_line(";; /g/aibtc/dao_token_symbol\r");
        assert_eq!(found[0].key_name, "dao_token_symbol");
    }

    #[test]
    fn test_multiple_directives_on_one_line() {
        let found = parse_line(";; /g/one/first/ ;; /g/two/second");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].key_name, "first");
        assert_eq!(found[1].to_replace, "two");
    }

    #[test]
    fn test_scan_directives_line_numbers() {
        let text = "(begin)\n;; /g/aibtc/dao_token_symbol\n(define-constant S \"aibtc\")\n\n;; /g/.aibtc-base-dao/dao_contract_base\n.aibtc-base-dao";
        let found = scan_directives(text);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].line_number, 2);
        assert_eq!(found[1].line_number, 5);
        assert_eq!(found[1].composite_key(), ".aibtc-base-dao/dao_contract_base");
    }

    #[test]
    fn test_metacharacter_detection() {
        assert!(has_pattern_metacharacters(".aibtc-faktory"));
        assert!(has_pattern_metacharacters("a+b"));
        assert!(!has_pattern_metacharacters("aibtc"));
        assert!(!has_pattern_metacharacters("dao-token"));
    }
}
