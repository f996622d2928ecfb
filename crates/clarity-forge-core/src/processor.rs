//! Directive substitution engine.
//!
//! Rewrites a template line by line. A directive comment (`;; /g/<toReplace>/<keyName>`)
//! applies to the line below it: every occurrence of `toReplace` on that line is
//! replaced with the value stored under `toReplace/keyName`, and the comment is dropped
//! from the output. Replacement is literal and single-pass; a replacement value that
//! itself contains `toReplace` is not substituted again.
//!
//! ## Modes
//!
//! [`SubstitutionMode::Faithful`] pairs each directive line strictly with the line that
//! follows it. When several directive comments are stacked above one target, only the
//! last of them sees the target; the others see the next comment line, usually fail to
//! match, and are emitted unchanged. When one does match, that comment line is rewritten
//! and takes the place of the directive.
//!
//! [`SubstitutionMode::Independent`] treats a run of stacked directive comments as all
//! targeting the first non-directive line below them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::directive;

/// Flat key -> value substitution map.
pub type ReplacementMap = BTreeMap<String, String>;

/// How directive lines are paired with their target lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubstitutionMode {
    /// Strict line pairing, including the stacked-directive behavior.
    #[default]
    Faithful,
    /// Stacked directives all apply to the first following non-directive line.
    Independent,
}

impl SubstitutionMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "faithful" => Some(Self::Faithful),
            "independent" => Some(Self::Independent),
            _ => None,
        }
    }
}

/// Process a whole template. Lines are split and re-joined on `\n`.
pub fn process_template(template: &str, replacements: &ReplacementMap, mode: SubstitutionMode) -> String {
    let lines: Vec<&str> = template.split('\n').collect();
    process_lines(&lines, replacements, mode).join("\n")
}

/// Process an ordered sequence of template lines.
pub fn process_lines<S: AsRef<str>>(
    lines: &[S],
    replacements: &ReplacementMap,
    mode: SubstitutionMode,
) -> Vec<String> {
    match mode {
        SubstitutionMode::Faithful => process_faithful(lines, replacements),
        SubstitutionMode::Independent => process_independent(lines, replacements),
    }
}

/// Apply every directive on `directive_line` to `target`. Returns `true` if at least
/// one replacement happened.
fn apply_directives(
    directive_line: &str,
    target: &mut String,
    replacements: &ReplacementMap,
    line_number: usize,
) -> bool {
    let mut mutated = false;
    for found in directive::parse_line(directive_line) {
        let key = found.composite_key();
        let Some(value) = replacements.get(&key) else {
            continue;
        };
        if !target.contains(found.to_replace) {
            continue;
        }
        let replaced = target.replace(found.to_replace, value);
        tracing::debug!(
            key = %key,
            line = line_number,
            original = %target,
            replaced = %replaced,
            "template replacement"
        );
        *target = replaced;
        mutated = true;
    }
    mutated
}

fn process_faithful<S: AsRef<str>>(lines: &[S], replacements: &ReplacementMap) -> Vec<String> {
    let mut output = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].as_ref();
        if i + 1 == lines.len() || !directive::is_directive_line(line) {
            output.push(line.to_string());
            i += 1;
            continue;
        }

        let mut next = lines[i + 1].as_ref().to_string();
        if apply_directives(line, &mut next, replacements, i + 2) {
            output.push(next);
            i += 2;
        } else {
            output.push(line.to_string());
            i += 1;
        }
    }

    output
}

fn process_independent<S: AsRef<str>>(lines: &[S], replacements: &ReplacementMap) -> Vec<String> {
    let mut output = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].as_ref();
        if !directive::is_directive_line(line) {
            output.push(line.to_string());
            i += 1;
            continue;
        }

        let stack_start = i;
        let mut target_idx = i;
        while target_idx < lines.len() && directive::is_directive_line(lines[target_idx].as_ref()) {
            target_idx += 1;
        }

        // directives at the end of the template have nothing to apply to
        if target_idx == lines.len() {
            output.extend(lines[stack_start..].iter().map(|l| l.as_ref().to_string()));
            break;
        }

        let mut target = lines[target_idx].as_ref().to_string();
        for idx in stack_start..target_idx {
            let directive_line = lines[idx].as_ref();
            if !apply_directives(directive_line, &mut target, replacements, target_idx + 1) {
                output.push(directive_line.to_string());
            }
        }
        output.push(target);
        i = target_idx + 1;
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> ReplacementMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_basic_substitution_strips_comment() {
        let template = ";; /g/aibtc/dao_token_symbol\n(define-constant TOKEN_SYMBOL \"aibtc\")";
        let output = process_template(
            template,
            &map(&[("aibtc/dao_token_symbol", "TESTDAO")]),
            SubstitutionMode::Faithful,
        );
        assert_eq!(output, "(define-constant TOKEN_SYMBOL \"TESTDAO\")");
    }

    #[test]
    fn test_replaces_every_occurrence_on_target_line() {
        let template = ";; /g/aibtc/dao_token_symbol\n(print \"aibtc aibtc\")";
        let output = process_template(
            template,
            &map(&[("aibtc/dao_token_symbol", "DOG")]),
            SubstitutionMode::Faithful,
        );
        assert_eq!(output, "(print \"DOG DOG\")");
    }

    #[test]
    fn test_missing_key_keeps_both_lines() {
        let template = ";; /g/aibtc/dao_token_symbol\n(define-constant TOKEN_SYMBOL \"aibtc\")";
        let output = process_template(template, &ReplacementMap::new(), SubstitutionMode::Faithful);
        assert_eq!(output, template);
    }

    #[test]
    fn test_bare_key_is_not_used_for_lookup() {
        let template = ";; /g/aibtc/dao_token_symbol\n(define-constant TOKEN_SYMBOL \"aibtc\")";
        let output = process_template(
            template,
            &map(&[("dao_token_symbol", "DOG")]),
            SubstitutionMode::Faithful,
        );
        assert_eq!(output, template);
    }

    #[test]
    fn test_to_replace_absent_from_target_keeps_lines() {
        let template = ";; /g/aibtc/dao_token_symbol\n(define-constant TOKEN_SYMBOL \"other\")";
        let output = process_template(
            template,
            &map(&[("aibtc/dao_token_symbol", "DOG")]),
            SubstitutionMode::Faithful,
        );
        assert_eq!(output, template);
    }

    #[test]
    fn test_directive_on_last_line_is_never_applied() {
        let template = "(begin)\n;; /g/aibtc/dao_token_symbol";
        let output = process_template(
            template,
            &map(&[("aibtc/dao_token_symbol", "DOG")]),
            SubstitutionMode::Faithful,
        );
        assert_eq!(output, template);
    }

    #[test]
    fn test_replacement_is_literal_not_pattern() {
        let template = ";; /g/.aibtc-faktory/dao_contract_token\n(contract-call? .aibtc-faktory transfer) ;; xaibtc-faktory";
        let output = process_template(
            template,
            &map(&[(".aibtc-faktory/dao_contract_token", ".dog-faktory")]),
            SubstitutionMode::Faithful,
        );
        assert_eq!(output, "(contract-call? .dog-faktory transfer) ;; xaibtc-faktory");
    }

    #[test]
    fn test_replacement_is_single_pass() {
        let template = ";; /g/aibtc/dao_token_symbol\n\"aibtc\"";
        let output = process_template(
            template,
            &map(&[("aibtc/dao_token_symbol", "aibtc-aibtc")]),
            SubstitutionMode::Faithful,
        );
        assert_eq!(output, "\"aibtc-aibtc\"");
    }

    #[test]
    fn test_stacked_directives_faithful_only_last_applies() {
        let template = [
            ";; /g/ONE/first_key",
            ";; /g/TWO/second_key",
            ";; /g/THREE/third_key",
            "(list ONE TWO THREE)",
        ];
        let replacements = map(&[
            ("ONE/first_key", "1"),
            ("TWO/second_key", "2"),
            ("THREE/third_key", "3"),
        ]);
        let output = process_lines(&template, &replacements, SubstitutionMode::Faithful);
        assert_eq!(
            output,
            vec![
                ";; /g/ONE/first_key",
                ";; /g/TWO/second_key",
                "(list ONE TWO 3)",
            ]
        );
    }

    #[test]
    fn test_stacked_directive_rewrites_next_comment_faithful() {
        // TOKEN also occurs in the second directive, so the first one consumes it
        let template = [
            ";; /g/TOKEN/token_key",
            ";; /g/TOKEN-POOL/pool_key",
            "(list TOKEN TOKEN-POOL)",
        ];
        let replacements = map(&[("TOKEN/token_key", "DOG"), ("TOKEN-POOL/pool_key", "POOL")]);

        let output = process_lines(&template, &replacements, SubstitutionMode::Faithful);
        assert_eq!(output, vec![";; /g/DOG-POOL/pool_key", "(list TOKEN TOKEN-POOL)"]);

        let output = process_lines(&template, &replacements, SubstitutionMode::Independent);
        assert_eq!(output, vec![";; /g/TOKEN-POOL/pool_key", "(list DOG DOG-POOL)"]);
    }

    #[test]
    fn test_stacked_directives_independent_all_apply() {
        let template = [
            ";; /g/ONE/first_key",
            ";; /g/TWO/second_key",
            ";; /g/THREE/third_key",
            "(list ONE TWO THREE)",
        ];
        let replacements = map(&[
            ("ONE/first_key", "1"),
            ("TWO/second_key", "2"),
            ("THREE/third_key", "3"),
        ]);
        let output = process_lines(&template, &replacements, SubstitutionMode::Independent);
        assert_eq!(output, vec!["(list 1 2 3)"]);
    }

    #[test]
    fn test_independent_keeps_unapplied_directives() {
        let template = [
            ";; /g/ONE/first_key",
            ";; /g/MISSING/missing_key",
            "(list ONE)",
            "(trailing)",
        ];
        let replacements = map(&[("ONE/first_key", "1")]);
        let output = process_lines(&template, &replacements, SubstitutionMode::Independent);
        assert_eq!(output, vec![";; /g/MISSING/missing_key", "(list 1)", "(trailing)"]);
    }

    #[test]
    fn test_independent_trailing_directives_untouched() {
        let template = ["(begin)", ";; /g/ONE/first_key"];
        let replacements = map(&[("ONE/first_key", "1")]);
        let output = process_lines(&template, &replacements, SubstitutionMode::Independent);
        assert_eq!(output, vec!["(begin)", ";; /g/ONE/first_key"]);
    }

    #[test]
    fn test_untouched_lines_are_byte_identical() {
        let template = "(define-data-var a uint u0)\r\n;; plain comment\n;; /g/aibtc/dao_token_symbol\n\"aibtc\"\n  (ok true)  ";
        let output = process_template(
            template,
            &map(&[("aibtc/dao_token_symbol", "DOG")]),
            SubstitutionMode::Faithful,
        );
        assert_eq!(output, "(define-data-var a uint u0)\r\n;; plain comment\n\"DOG\"\n  (ok true)  ");
    }

    #[test]
    fn test_processing_is_idempotent_once_directives_are_consumed() {
        let template = ";; /g/aibtc/dao_token_symbol\n(define-constant S \"aibtc\")\n;; /g/.aibtc-base-dao/dao_contract_base\n(contract-call? .aibtc-base-dao x)";
        let replacements = map(&[
            ("aibtc/dao_token_symbol", "DOG"),
            (".aibtc-base-dao/dao_contract_base", ".dog-base-dao"),
        ]);
        for mode in [SubstitutionMode::Faithful, SubstitutionMode::Independent] {
            let once = process_template(template, &replacements, mode);
            let twice = process_template(&once, &replacements, mode);
            assert_eq!(once, twice);
            assert!(!once.contains(";; /g/"));
        }
    }

    #[test]
    fn test_mode_from_name() {
        assert_eq!(SubstitutionMode::from_name("faithful"), Some(SubstitutionMode::Faithful));
        assert_eq!(SubstitutionMode::from_name("independent"), Some(SubstitutionMode::Independent));
        assert_eq!(SubstitutionMode::from_name("strict"), None);
    }
}
