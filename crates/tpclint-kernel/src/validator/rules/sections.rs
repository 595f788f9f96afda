//! File-level checks: section inventory and the implicit `default`
//! section, for each document independently.

use crate::lexer::TokenKind;
use crate::parser::{DEFAULT_SECTION, Document};
use crate::validator::violation::{FileKind, Severity, Violation};

/// Canonical section names of a process file.
const PROCESS_SECTIONS: [&str; 6] = [
    "CPM Parameters Validation",
    "Debug Information",
    DEFAULT_SECTION,
    "parameters",
    "states",
    "transitions",
];

/// Canonical section names of a prompts file.
const PROMPTS_SECTIONS: [&str; 2] = ["conditions", DEFAULT_SECTION];

pub(crate) fn validate_process(process: &Document) -> Vec<Violation> {
    check_file(
        process,
        FileKind::Process,
        &PROCESS_SECTIONS,
        "ProcessInvalidSectionViolation",
        "ProcessSectionNameCaseViolation",
        "ProcessDefaultContentViolation",
    )
}

pub(crate) fn validate_prompts(prompts: &Document) -> Vec<Violation> {
    check_file(
        prompts,
        FileKind::Prompts,
        &PROMPTS_SECTIONS,
        "PromptsInvalidSectionViolation",
        "PromptsSectionNameCaseViolation",
        "PromptsDefaultContentViolation",
    )
}

fn check_file(
    doc: &Document,
    file: FileKind,
    valid: &[&str],
    invalid_rule: &'static str,
    case_rule: &'static str,
    default_rule: &'static str,
) -> Vec<Violation> {
    let mut out = Vec::new();

    for section in doc.sections.iter() {
        if valid.contains(&section.name.as_str()) {
            continue;
        }
        match valid
            .iter()
            .find(|name| name.eq_ignore_ascii_case(&section.name))
        {
            Some(canonical) => {
                let mut violation = Violation::new(
                    case_rule,
                    Severity::Warning,
                    format!(
                        "The section \"{}\" should be declared as \"{canonical}\".",
                        section.name
                    ),
                )
                .with_file(file)
                .with_section(section.name.clone());
                if let Some(line) = section.line {
                    violation = violation.with_line(line);
                }
                out.push(violation);
            }
            None => {
                let mut violation = Violation::new(
                    invalid_rule,
                    Severity::Warning,
                    format!(
                        "An invalid section \"{}\" has been found in the {file} file.",
                        section.name
                    ),
                )
                .with_file(file)
                .with_section(section.name.clone());
                if let Some(line) = section.line {
                    violation = violation.with_line(line);
                }
                out.push(violation);
            }
        }
    }

    // Anything but comments before the first header is misplaced.
    for token in doc.section_tokens(DEFAULT_SECTION) {
        if token.kind() != TokenKind::Comment {
            out.push(
                Violation::new(
                    default_rule,
                    Severity::Warning,
                    format!(
                        "A token of type \"{}\" has been found in the {file} file outside of any section, found on line {}.",
                        token.kind(),
                        token.line()
                    ),
                )
                .with_file(file)
                .with_section(DEFAULT_SECTION)
                .with_line(token.line()),
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process(source: &str) -> Vec<Violation> {
        validate_process(&Document::parse(source).expect("fixture should parse"))
    }

    fn prompts(source: &str) -> Vec<Violation> {
        validate_prompts(&Document::parse(source).expect("fixture should parse"))
    }

    #[test]
    fn known_sections_are_clean() {
        let violations = process(
            "# header comment\n[states]\nEND\n[transitions]\n[parameters]\n[CPM Parameters Validation]\n[Debug Information]\n",
        );
        assert!(violations.is_empty(), "unexpected: {violations:?}");
    }

    #[test]
    fn unknown_section_is_warned() {
        let violations = process("[DummySection]\nfoo = 1\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "ProcessInvalidSectionViolation");
        assert_eq!(
            violations[0].message,
            "An invalid section \"DummySection\" has been found in the process file."
        );
    }

    #[test]
    fn case_mismatched_section_names_the_canonical_form() {
        let violations = process("[States]\nEND\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "ProcessSectionNameCaseViolation");
        assert_eq!(
            violations[0].message,
            "The section \"States\" should be declared as \"states\"."
        );
        assert_eq!(violations[0].line, Some(1));
    }

    #[test]
    fn non_comment_default_content_is_warned_per_token() {
        let violations = process("stray = 1\na,b,c\n# fine\n[states]\nEND\n");
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().all(|v| v.rule == "ProcessDefaultContentViolation"));
        assert_eq!(
            violations[0].message,
            "A token of type \"Assignment\" has been found in the process file outside of any section, found on line 1."
        );
        assert_eq!(
            violations[1].message,
            "A token of type \"State Transition\" has been found in the process file outside of any section, found on line 2."
        );
    }

    #[test]
    fn prompts_file_only_allows_conditions() {
        let violations = prompts("[conditions]\ntest = 1\n[states]\nEND\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "PromptsInvalidSectionViolation");
        assert_eq!(
            violations[0].message,
            "An invalid section \"states\" has been found in the prompts file."
        );
    }

    #[test]
    fn prompts_case_mismatch_is_warned() {
        let violations = prompts("[Conditions]\ntest = 1\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "PromptsSectionNameCaseViolation");
    }

    #[test]
    fn comment_only_default_is_clean() {
        let violations = prompts("# intro\n; more\n[conditions]\n");
        assert!(violations.is_empty(), "unexpected: {violations:?}");
    }
}
