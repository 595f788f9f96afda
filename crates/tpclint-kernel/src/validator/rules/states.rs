//! Validation of the process file's `[states]` section.

use crate::lexer::{Assignment, FailState, Token, TokenKind};
use crate::parser::Document;
use crate::validator::support;
use crate::validator::violation::{FileKind, Severity, Violation};

const SECTION: &str = "states";
const ALLOWED: [TokenKind; 3] = [TokenKind::Assignment, TokenKind::Comment, TokenKind::FailState];

pub(crate) fn validate(process: &Document) -> Vec<Violation> {
    let mut out = Vec::new();
    let Some(section) = support::find_section(process, FileKind::Process, SECTION, &mut out) else {
        out.push(
            Violation::new(
                "StatesNoStatesSectionViolation",
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
        "StatesTokenViolation",
        Severity::Warning,
        FileKind::Process,
        SECTION,
        &mut out,
    );

    check_end_state(&tokens, &mut out);
    check_fail_states(&tokens, &mut out);

    for duplicate in support::duplicate_assignments(&section.tokens) {
        out.push(
            Violation::new(
                "StatesDuplicateParametersViolation",
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

    out
}

/// The first assignment matching `END` (exactly or by case) is the end
/// state. It must be spelled in upper case and carry no value.
fn check_end_state(tokens: &[&Token], out: &mut Vec<Violation>) {
    let mut end_state: Option<&Assignment> = None;
    for token in tokens {
        let Token::Assignment(assignment) = token else {
            continue;
        };
        if assignment.name == "END" {
            end_state = Some(assignment);
            break;
        }
        if assignment.name.eq_ignore_ascii_case("end") {
            out.push(
                Violation::new(
                    "StatesEndStateCaseViolation",
                    Severity::Critical,
                    format!(
                        "The END state has been declared as \"{}\", the END state should be in upper case, found on line {}.",
                        assignment.name, assignment.line
                    ),
                )
                .with_file(FileKind::Process)
                .with_section(SECTION)
                .with_line(assignment.line),
            );
            end_state = Some(assignment);
            break;
        }
    }

    if let Some(end) = end_state {
        if let Some(value) = &end.value {
            out.push(
                Violation::new(
                    "StatesEndStateValueViolation",
                    Severity::Critical,
                    format!(
                        "The END state has been assigned the value \"{value}\", the END state should not have a value, found on line {}.",
                        end.line
                    ),
                )
                .with_file(FileKind::Process)
                .with_section(SECTION)
                .with_line(end.line),
            );
        }
    }
}

/// Fail codes must be 4-digit (1000–9999) and unique within the section.
fn check_fail_states(tokens: &[&Token], out: &mut Vec<Violation>) {
    let fail_states: Vec<&FailState> = tokens
        .iter()
        .filter_map(|t| match t {
            Token::FailState(f) => Some(f),
            _ => None,
        })
        .collect();

    for fail_state in &fail_states {
        if !(1000..=9999).contains(&fail_state.code) {
            out.push(
                Violation::new(
                    "StatesFailStateViolation",
                    Severity::Critical,
                    format!(
                        "A fail state has a failure code of \"{}\", the failure code should be a 4 digit code, found on line {}.",
                        fail_state.code, fail_state.line
                    ),
                )
                .with_file(FileKind::Process)
                .with_section(SECTION)
                .with_line(fail_state.line),
            );
        }
    }

    let mut seen: Vec<(u64, usize, usize)> = Vec::new();
    for fail_state in &fail_states {
        match seen.iter_mut().find(|(code, _, _)| *code == fail_state.code) {
            Some((_, count, _)) => *count += 1,
            None => seen.push((fail_state.code, 1, fail_state.line)),
        }
    }
    for (code, count, line) in seen.into_iter().filter(|(_, count, _)| *count > 1) {
        out.push(
            Violation::new(
                "StatesFailStateCodeReuseViolation",
                Severity::Warning,
                format!(
                    "The code \"{code}\" has been assigned {count} times in the \"{SECTION}\" section, codes should not be reused.",
                ),
            )
            .with_file(FileKind::Process)
            .with_section(SECTION)
            .with_line(line),
        );
    }
}
