//! Validation of the process file's `[parameters]` section.

use crate::lexer::{Assignment, Token, TokenKind};
use crate::parser::Document;
use crate::validator::support;
use crate::validator::violation::{FileKind, Severity, Violation};

const SECTION: &str = "parameters";
const ALLOWED: [TokenKind; 2] = [TokenKind::Assignment, TokenKind::Comment];

const SEND_HUMAN_MIN: &str = "SendHumanMin";
const SEND_HUMAN_MAX: &str = "SendHumanMax";

pub(crate) fn validate(process: &Document) -> Vec<Violation> {
    let mut out = Vec::new();
    let Some(section) = support::find_section(process, FileKind::Process, SECTION, &mut out) else {
        out.push(
            Violation::new(
                "ParametersNoParametersSectionViolation",
                Severity::Critical,
                format!("The process file does not contain a \"{SECTION}\" section."),
            )
            .with_file(FileKind::Process),
        );
        return out;
    };

    let tokens = support::filter_tokens(
        &section.tokens,
        &ALLOWED,
        "ParametersTokenViolation",
        Severity::Warning,
        FileKind::Process,
        SECTION,
        &mut out,
    );

    let mut human_min: Option<&Assignment> = None;
    let mut human_max: Option<&Assignment> = None;
    for token in &tokens {
        let Token::Assignment(assignment) = token else {
            continue;
        };
        if assignment.name == SEND_HUMAN_MIN {
            human_min = Some(assignment);
        } else if assignment.name == SEND_HUMAN_MAX {
            human_max = Some(assignment);
        }
    }

    for duplicate in support::duplicate_assignments(&section.tokens) {
        out.push(
            Violation::new(
                "ParametersDuplicateParametersViolation",
                Severity::Warning,
                format!(
                    "The assignment \"{}\" has been declared {} times.",
                    duplicate.name, duplicate.count
                ),
            )
            .with_file(FileKind::Process)
            .with_section(SECTION)
            .with_line(duplicate.line),
        );
    }

    check_human_min_max(human_min, human_max, &mut out);

    out
}

/// Numeric checks on `SendHumanMin`/`SendHumanMax`. The three checks
/// are independent: a non-numeric minimum does not suppress the range
/// check on the maximum, and vice versa.
fn check_human_min_max(
    human_min: Option<&Assignment>,
    human_max: Option<&Assignment>,
    out: &mut Vec<Violation>,
) {
    let min_value = check_bound(human_min, SEND_HUMAN_MIN, "ParametersMinInvalidValueViolation",
        "ParametersMinLessThanZeroViolation", out);
    let max_value = check_bound(human_max, SEND_HUMAN_MAX, "ParametersMaxInvalidValueViolation",
        "ParametersMaxLessThanZeroViolation", out);

    if let (Some((min_raw, min)), Some((max_raw, max))) = (min_value, max_value) {
        if min > max {
            out.push(
                Violation::new(
                    "ParametersMinGreaterThanMaxViolation",
                    Severity::Critical,
                    format!(
                        "{SEND_HUMAN_MIN} is set to \"{min_raw}\" and {SEND_HUMAN_MAX} is set to \"{max_raw}\", {SEND_HUMAN_MIN} cannot be greater than {SEND_HUMAN_MAX}.",
                    ),
                )
                .with_file(FileKind::Process)
                .with_section(SECTION),
            );
        }
    }
}

/// Validate one bound. Returns the raw string and parsed value when the
/// assignment exists, has a value, and that value is numeric.
fn check_bound<'a>(
    assignment: Option<&'a Assignment>,
    name: &str,
    invalid_rule: &'static str,
    negative_rule: &'static str,
    out: &mut Vec<Violation>,
) -> Option<(&'a str, f64)> {
    let assignment = assignment?;
    let raw = assignment.value.as_deref()?;
    match raw.parse::<f64>() {
        Ok(value) => {
            if value < 0.0 {
                out.push(
                    Violation::new(
                        negative_rule,
                        Severity::Critical,
                        format!("{name} is set to \"{raw}\", this cannot be less than 0."),
                    )
                    .with_file(FileKind::Process)
                    .with_section(SECTION)
                    .with_line(assignment.line),
                );
            }
            Some((raw, value))
        }
        Err(_) => {
            out.push(
                Violation::new(
                    invalid_rule,
                    Severity::Critical,
                    format!(
                        "{name} is set to \"{raw}\", the value must be numerical, found on line {}.",
                        assignment.line
                    ),
                )
                .with_file(FileKind::Process)
                .with_section(SECTION)
                .with_line(assignment.line),
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> Vec<Violation> {
        validate(&Document::parse(source).expect("fixture should parse"))
    }

    #[test]
    fn missing_section_is_critical() {
        let violations = run("[states]\nEND\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "ParametersNoParametersSectionViolation");
        assert_eq!(violations[0].severity, Severity::Critical);
    }

    #[test]
    fn clean_section_produces_nothing() {
        let violations = run(
            "[parameters]\n# timing\nSendHumanMin = 0.1\nSendHumanMax = 0.5\nPromptTimeout = 30\n",
        );
        assert!(violations.is_empty(), "unexpected: {violations:?}");
    }

    #[test]
    fn min_greater_than_max_cites_raw_values() {
        let violations = run("[parameters]\nSendHumanMin = 1.0\nSendHumanMax = 0.0\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "ParametersMinGreaterThanMaxViolation");
        assert_eq!(violations[0].severity, Severity::Critical);
        assert_eq!(
            violations[0].message,
            "SendHumanMin is set to \"1.0\" and SendHumanMax is set to \"0.0\", SendHumanMin cannot be greater than SendHumanMax."
        );
    }

    #[test]
    fn non_numeric_min_is_critical_and_names_the_field() {
        let violations = run("[parameters]\nSendHumanMin = fast\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "ParametersMinInvalidValueViolation");
        assert_eq!(
            violations[0].message,
            "SendHumanMin is set to \"fast\", the value must be numerical, found on line 2."
        );
    }

    #[test]
    fn non_numeric_min_does_not_suppress_max_checks() {
        let violations = run("[parameters]\nSendHumanMin = fast\nSendHumanMax = -1\n");
        let rules: Vec<&str> = violations.iter().map(|v| v.rule.as_str()).collect();
        assert_eq!(
            rules,
            vec![
                "ParametersMinInvalidValueViolation",
                "ParametersMaxLessThanZeroViolation"
            ]
        );
    }

    #[test]
    fn negative_bounds_are_critical() {
        let violations = run("[parameters]\nSendHumanMin = -0.5\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "ParametersMinLessThanZeroViolation");
        assert_eq!(
            violations[0].message,
            "SendHumanMin is set to \"-0.5\", this cannot be less than 0."
        );
    }

    #[test]
    fn blank_bounds_are_ignored() {
        let violations = run("[parameters]\nSendHumanMin =\nSendHumanMax\n");
        assert!(violations.is_empty(), "unexpected: {violations:?}");
    }

    #[test]
    fn equal_bounds_are_fine() {
        let violations = run("[parameters]\nSendHumanMin = 0.2\nSendHumanMax = 0.2\n");
        assert!(violations.is_empty(), "unexpected: {violations:?}");
    }

    #[test]
    fn duplicates_are_warned() {
        let violations = run("[parameters]\nPromptTimeout = 30\nPromptTimeout = 60\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "ParametersDuplicateParametersViolation");
        assert_eq!(
            violations[0].message,
            "The assignment \"PromptTimeout\" has been declared 2 times."
        );
    }

    #[test]
    fn last_declaration_wins_for_bounds() {
        // Duplicate declarations are separately warned; the numeric
        // checks run against the last value, like the consuming plugin.
        let violations = run("[parameters]\nSendHumanMin = 9\nSendHumanMin = 0.1\nSendHumanMax = 0.5\n");
        let rules: Vec<&str> = violations.iter().map(|v| v.rule.as_str()).collect();
        assert_eq!(rules, vec!["ParametersDuplicateParametersViolation"]);
    }
}
