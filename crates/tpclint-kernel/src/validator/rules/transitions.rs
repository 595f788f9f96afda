//! Validation of the process file's `[transitions]` section.
//!
//! The path check is local in/out-degree validation against the full
//! transition set, not reachability from a start state: isolated but
//! mutually-referencing islands of transitions pass undetected.

use crate::lexer::{StateTransition, Token, TokenKind};
use crate::parser::Document;
use crate::validator::support;
use crate::validator::violation::{FileKind, Severity, Violation};

const SECTION: &str = "transitions";
const ALLOWED: [TokenKind; 2] = [TokenKind::Comment, TokenKind::StateTransition];

/// States that terminate (`end`) or start (`init`) a path, matched
/// case-insensitively.
const END_STATE: &str = "end";
const INITIAL_STATE: &str = "init";

pub(crate) fn validate(process: &Document) -> Vec<Violation> {
    let mut out = Vec::new();
    let Some(section) = support::find_section(process, FileKind::Process, SECTION, &mut out) else {
        out.push(
            Violation::new(
                "TransitionNoSectionViolation",
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
        "TransitionsTokenViolation",
        Severity::Warning,
        FileKind::Process,
        SECTION,
        &mut out,
    );

    let transitions: Vec<&StateTransition> = tokens
        .iter()
        .filter_map(|t| match t {
            Token::StateTransition(transition) => Some(transition),
            _ => None,
        })
        .collect();

    check_duplicates(&transitions, &mut out);
    check_state_paths(process, &transitions, &mut out);

    out
}

/// A triple repeated verbatim is reported once, with its count.
fn check_duplicates(transitions: &[&StateTransition], out: &mut Vec<Violation>) {
    let mut seen: Vec<(String, usize, usize)> = Vec::new();
    for transition in transitions {
        let triple = format!(
            "{},{},{}",
            transition.from, transition.condition, transition.to
        );
        match seen.iter_mut().find(|(known, _, _)| *known == triple) {
            Some((_, count, _)) => *count += 1,
            None => seen.push((triple, 1, transition.line)),
        }
    }
    for (triple, count, line) in seen.into_iter().filter(|(_, count, _)| *count > 1) {
        out.push(
            Violation::new(
                "TransitionsStateTransitionReuseViolation",
                Severity::Warning,
                format!(
                    "The state transition \"{triple}\" has been declared {count} times, a state transition should be unique.",
                ),
            )
            .with_file(FileKind::Process)
            .with_section(SECTION)
            .with_line(line),
        );
    }
}

/// Every transition needs a local exit (its `to` is some `from`, or a
/// terminal) and a local entry (its `from` is some `to`, or the start).
fn check_state_paths(
    process: &Document,
    transitions: &[&StateTransition],
    out: &mut Vec<Violation>,
) {
    for transition in transitions.iter().copied() {
        check_next(process, transition, transitions, out);
        check_previous(transition, transitions, out);
    }
}

fn check_next(
    process: &Document,
    transition: &StateTransition,
    transitions: &[&StateTransition],
    out: &mut Vec<Violation>,
) {
    if transition.to.eq_ignore_ascii_case(END_STATE) {
        return;
    }
    if transitions.iter().any(|other| other.from == transition.to) {
        return;
    }
    if is_fail_state(process, &transition.to) {
        // Failure condition, nothing follows this.
        return;
    }
    out.push(
        Violation::new(
            "TransitionsStateTransitionViolation",
            Severity::Warning,
            format!(
                "The state \"{}\" does not have a valid state to transition to.",
                transition.to
            ),
        )
        .with_file(FileKind::Process)
        .with_section(SECTION)
        .with_line(transition.line),
    );
}

fn check_previous(
    transition: &StateTransition,
    transitions: &[&StateTransition],
    out: &mut Vec<Violation>,
) {
    if transition.from.eq_ignore_ascii_case(INITIAL_STATE) {
        return;
    }
    if transitions.iter().any(|other| other.to == transition.from) {
        return;
    }
    out.push(
        Violation::new(
            "TransitionsStateTransitionViolation",
            Severity::Warning,
            format!(
                "The state \"{}\" does not have a valid state to transition from.",
                transition.from
            ),
        )
        .with_file(FileKind::Process)
        .with_section(SECTION)
        .with_line(transition.line),
    );
}

/// Whether `name` names a fail-state declared in the `states` section.
fn is_fail_state(process: &Document, name: &str) -> bool {
    process.section_tokens("states").iter().any(|token| {
        matches!(token, Token::FailState(fail_state) if fail_state.name.eq_ignore_ascii_case(name))
    })
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
        assert_eq!(violations[0].rule, "TransitionNoSectionViolation");
        assert_eq!(violations[0].severity, Severity::Critical);
    }

    #[test]
    fn connected_chain_is_clean() {
        let violations = run(
            "[transitions]\ninit,go,middle\nmiddle,done,END\n",
        );
        assert!(violations.is_empty(), "unexpected: {violations:?}");
    }

    #[test]
    fn foreign_token_kind_is_warned() {
        let violations = run("[transitions]\nstray = 1\ninit,go,END\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "TransitionsTokenViolation");
        assert!(violations[0].message.contains("\"Assignment\""));
    }

    #[test]
    fn duplicate_triple_reported_once_with_count() {
        let violations = run("[transitions]\ninit,go,END\ninit,go,END\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].rule,
            "TransitionsStateTransitionReuseViolation"
        );
        assert_eq!(
            violations[0].message,
            "The state transition \"init,go,END\" has been declared 2 times, a state transition should be unique."
        );
    }

    #[test]
    fn dangling_target_is_warned() {
        let violations = run("[transitions]\ninit,go,nowhere\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "TransitionsStateTransitionViolation");
        assert_eq!(
            violations[0].message,
            "The state \"nowhere\" does not have a valid state to transition to."
        );
    }

    #[test]
    fn fail_state_is_a_valid_terminal_target() {
        let violations = run(
            "[states]\nlocked = fail(\"account locked\", 3001)\n[transitions]\ninit,toomany,locked\n",
        );
        assert!(violations.is_empty(), "unexpected: {violations:?}");
    }

    #[test]
    fn unreachable_source_is_warned() {
        let violations = run("[transitions]\ninit,go,END\norphan,jump,END\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].message,
            "The state \"orphan\" does not have a valid state to transition from."
        );
    }

    #[test]
    fn end_and_init_are_exempt_case_insensitively() {
        let violations = run("[transitions]\nInit,go,other\nother,done,End\n");
        assert!(violations.is_empty(), "unexpected: {violations:?}");
    }

    #[test]
    fn islands_pass_the_local_check() {
        // Two mutually-referencing transitions that are unreachable from
        // init still satisfy local in/out-degree validation.
        let violations = run("[transitions]\ninit,go,END\nlost,ping,adrift\nadrift,pong,lost\n");
        assert!(violations.is_empty(), "unexpected: {violations:?}");
    }
}
