//! Validation of the process file's `[CPM Parameters Validation]` section.
//!
//! Parameter validation is optional, so a missing section is only a
//! warning. Every validated parameter must actually be referenced via
//! its `<Name>` placeholder somewhere a value can use it: a condition
//! in the prompts file or a state assignment in the process file.

use crate::lexer::{Token, TokenKind};
use crate::parser::Document;
use crate::validator::support;
use crate::validator::violation::{FileKind, Severity, Violation};

const SECTION: &str = "CPM Parameters Validation";
const ALLOWED: [TokenKind; 2] = [TokenKind::Comment, TokenKind::ParameterValidation];

/// Parameters the plugin runtime consumes without a placeholder.
const IMPLICITLY_USED: [&str; 2] = ["ProcessFileName", "PromptsFileName"];

pub(crate) fn validate(process: &Document, prompts: &Document) -> Vec<Violation> {
    let mut out = Vec::new();
    let Some(section) = support::find_section(process, FileKind::Process, SECTION, &mut out) else {
        out.push(
            Violation::new(
                "CPMParameterNoSectionViolation",
                Severity::Warning,
                format!("The process file does not contain a \"{SECTION}\" section."),
            )
            .with_file(FileKind::Process),
        );
        return out;
    };

    let tokens = support::filter_tokens(
        &section.tokens,
        &ALLOWED,
        "CPMParameterTokenViolation",
        Severity::Warning,
        FileKind::Process,
        SECTION,
        &mut out,
    );

    for token in tokens {
        let Token::ParameterValidation(validation) = token else {
            continue;
        };
        if IMPLICITLY_USED.contains(&validation.name.as_str()) {
            continue;
        }
        if !placeholder_is_used(process, prompts, &validation.name) {
            out.push(
                Violation::new(
                    "CPMParameterUnusedParameterViolation",
                    Severity::Warning,
                    format!(
                        "The parameter \"{}\" is validated but is not used, found on line {}.",
                        validation.name, validation.line
                    ),
                )
                .with_file(FileKind::Process)
                .with_section(SECTION)
                .with_line(validation.line),
            );
        }
    }

    out
}

/// Whether `<name>` occurs in any condition value (prompts) or state
/// assignment value (process).
fn placeholder_is_used(process: &Document, prompts: &Document, name: &str) -> bool {
    let placeholder = format!("<{name}>");
    prompts
        .section_assignments("conditions")
        .chain(process.section_assignments("states"))
        .any(|assignment| {
            assignment
                .value
                .as_deref()
                .is_some_and(|value| value.contains(&placeholder))
        })
}
