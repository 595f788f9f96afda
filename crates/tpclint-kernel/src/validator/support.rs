//! Helpers shared by the rule modules.
//!
//! Three behaviors recur across rules — case-tolerant section lookup,
//! token allow-list filtering, and duplicate-assignment counting — and
//! live here so every rule reports them the same way.

use crate::lexer::{Token, TokenKind};
use crate::parser::{Document, Section};
use crate::validator::violation::{FileKind, Severity, Violation};

/// Find `expected` in `doc`, tolerating a case-only mismatch.
///
/// An exact hit is silent. A case-insensitive hit emits a WARNING
/// `SectionCaseMismatchViolation` but still returns the section under
/// its literal name. No hit returns `None`; the caller decides how bad
/// that is for its rule.
pub(crate) fn find_section<'a>(
    doc: &'a Document,
    file: FileKind,
    expected: &str,
    out: &mut Vec<Violation>,
) -> Option<&'a Section> {
    if let Some(section) = doc.sections.get(expected) {
        return Some(section);
    }
    let section = doc.sections.get_ignore_case(expected)?;
    let mut violation = Violation::new(
        "SectionCaseMismatchViolation",
        Severity::Warning,
        format!(
            "The \"{expected}\" section has been declared as \"{}\".",
            section.name
        ),
    )
    .with_file(file)
    .with_section(section.name.clone());
    if let Some(line) = section.line {
        violation = violation.with_line(line);
    }
    out.push(violation);
    Some(section)
}

/// Report every token whose kind is not in `allowed`, then return the
/// conforming tokens for the rule's semantic checks.
pub(crate) fn filter_tokens<'a>(
    tokens: &'a [Token],
    allowed: &[TokenKind],
    rule: &'static str,
    severity: Severity,
    file: FileKind,
    section: &str,
    out: &mut Vec<Violation>,
) -> Vec<&'a Token> {
    let mut conforming = Vec::with_capacity(tokens.len());
    for token in tokens {
        if allowed.contains(&token.kind()) {
            conforming.push(token);
        } else {
            out.push(
                Violation::new(
                    rule,
                    severity,
                    format!(
                        "The token type \"{}\" is not valid in the \"{section}\" section, found on line {}.",
                        token.kind(),
                        token.line()
                    ),
                )
                .with_file(file)
                .with_section(section)
                .with_line(token.line()),
            );
        }
    }
    conforming
}

/// An assignment name declared more than once in one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DuplicateName {
    pub name: String,
    pub count: usize,
    /// Line of the first occurrence.
    pub line: usize,
}

/// Count `Assignment` names in first-seen order and return those that
/// occur more than once. The caller formats the rule-specific message.
pub(crate) fn duplicate_assignments(tokens: &[Token]) -> Vec<DuplicateName> {
    let mut counts: Vec<DuplicateName> = Vec::new();
    for token in tokens {
        let Token::Assignment(assignment) = token else {
            continue;
        };
        match counts.iter_mut().find(|d| d.name == assignment.name) {
            Some(existing) => existing.count += 1,
            None => counts.push(DuplicateName {
                name: assignment.name.clone(),
                count: 1,
                line: assignment.line,
            }),
        }
    }
    counts.retain(|d| d.count > 1);
    counts
}
