//! Validation of the prompts file's `[conditions]` section.
//!
//! Conditions are the boolean gates transitions wait on; every declared
//! condition must be referenced by some transition in the process file.

use crate::lexer::{StateTransition, Token, TokenKind};
use crate::parser::Document;
use crate::validator::support;
use crate::validator::violation::{FileKind, Severity, Violation};

const SECTION: &str = "conditions";
const ALLOWED: [TokenKind; 2] = [TokenKind::Assignment, TokenKind::Comment];

pub(crate) fn validate(process: &Document, prompts: &Document) -> Vec<Violation> {
    let mut out = Vec::new();
    let Some(section) = support::find_section(prompts, FileKind::Prompts, SECTION, &mut out) else {
        out.push(
            Violation::new(
                "PromptsNoConditionSectionViolation",
                Severity::Critical,
                format!(
                    "The prompts file does not contain a \"{SECTION}\" section, therefore, the plugin cannot transition between states.",
                ),
            )
            .with_file(FileKind::Prompts),
        );
        return out;
    };

    let tokens = support::filter_tokens(
        &section.tokens,
        &ALLOWED,
        "PromptsConditionTokenViolation",
        Severity::Warning,
        FileKind::Prompts,
        SECTION,
        &mut out,
    );

    let transitions: Vec<&StateTransition> = process
        .section_tokens("transitions")
        .iter()
        .filter_map(|t| match t {
            Token::StateTransition(transition) => Some(transition),
            _ => None,
        })
        .collect();

    for token in &tokens {
        let Token::Assignment(condition) = token else {
            continue;
        };
        check_condition_usage(condition.name.as_str(), condition.line, &transitions, &mut out);
    }

    for duplicate in support::duplicate_assignments(&section.tokens) {
        out.push(
            Violation::new(
                "PromptsDuplicateConditionViolation",
                Severity::Warning,
                format!(
                    "The condition \"{}\" has been declared {} times in the prompts file.",
                    duplicate.name, duplicate.count
                ),
            )
            .with_file(FileKind::Prompts)
            .with_section(SECTION)
            .with_line(duplicate.line),
        );
    }

    out
}

/// A declared condition must be referenced by some transition. An exact
/// match is silent; a case-insensitive-only match still counts as used
/// but gets its own warning; no match at all is an unused condition.
fn check_condition_usage(
    name: &str,
    line: usize,
    transitions: &[&StateTransition],
    out: &mut Vec<Violation>,
) {
    if transitions.iter().any(|t| t.condition == name) {
        return;
    }
    if let Some(near_miss) = transitions
        .iter()
        .find(|t| t.condition.eq_ignore_ascii_case(name))
    {
        out.push(
            Violation::new(
                "PromptsConditionCaseMismatchViolation",
                Severity::Warning,
                format!(
                    "The condition \"{name}\" is declared in the prompts file but is used as \"{}\" in the process file, found on line {}.",
                    near_miss.condition, near_miss.line
                ),
            )
            .with_file(FileKind::Prompts)
            .with_section(SECTION)
            .with_line(line),
        );
        return;
    }
    out.push(
        Violation::new(
            "PromptsUnusedConditionViolation",
            Severity::Warning,
            format!(
                "The condition \"{name}\" is declared in the prompts file on line {line} but is not used in the process file.",
            ),
        )
        .with_file(FileKind::Prompts)
        .with_section(SECTION)
        .with_line(line),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(process: &str, prompts: &str) -> Vec<Violation> {
        validate(
            &Document::parse(process).expect("process fixture should parse"),
            &Document::parse(prompts).expect("prompts fixture should parse"),
        )
    }

    #[test]
    fn missing_section_is_critical() {
        let violations = run("", "# nothing here\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "PromptsNoConditionSectionViolation");
        assert_eq!(violations[0].severity, Severity::Critical);
    }

    #[test]
    fn used_conditions_are_clean() {
        let violations = run(
            "[transitions]\ninit,sendname,END\n",
            "[conditions]\n# gates\nsendname = ogin:\n",
        );
        assert!(violations.is_empty(), "unexpected: {violations:?}");
    }

    #[test]
    fn unused_condition_is_warned() {
        let violations = run(
            "[transitions]\ninit,sendname,END\n",
            "[conditions]\nsendname = ogin:\nhello = world\n",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "PromptsUnusedConditionViolation");
        assert_eq!(
            violations[0].message,
            "The condition \"hello\" is declared in the prompts file on line 3 but is not used in the process file."
        );
    }

    #[test]
    fn case_only_match_counts_as_used_but_warns() {
        let violations = run(
            "[transitions]\ninit,Test,END\n",
            "[conditions]\ntest = value\n",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "PromptsConditionCaseMismatchViolation");
        assert_eq!(
            violations[0].message,
            "The condition \"test\" is declared in the prompts file but is used as \"Test\" in the process file, found on line 2."
        );
    }

    #[test]
    fn duplicate_conditions_are_warned_with_count() {
        let violations = run(
            "[transitions]\ninit,test,END\n",
            "[conditions]\ntest = a\ntest = b\n",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "PromptsDuplicateConditionViolation");
        assert_eq!(
            violations[0].message,
            "The condition \"test\" has been declared 2 times in the prompts file."
        );
    }

    #[test]
    fn foreign_token_kind_is_warned() {
        let violations = run(
            "[transitions]\ninit,go,END\n",
            "[conditions]\na,b,c\ngo = now\n",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "PromptsConditionTokenViolation");
        assert!(violations[0].message.contains("\"State Transition\""));
    }
}
