//! Property tests for the line lexer.

use proptest::prelude::*;

use tpclint_kernel::lexer::{TokenKind, tokenize};

proptest! {
    // A document of N comment lines is exactly N comment tokens, each
    // numbered by its position.
    #[test]
    fn comment_only_documents_tokenize_line_for_line(
        lines in proptest::collection::vec("[#;][ -~]{0,40}", 1..32),
    ) {
        let source = lines.join("\n");
        let tokens = tokenize(&source).expect("comment lines always lex");
        prop_assert_eq!(tokens.len(), lines.len());
        for (index, token) in tokens.iter().enumerate() {
            prop_assert_eq!(token.kind(), TokenKind::Comment);
            prop_assert_eq!(token.line(), index + 1);
        }
    }

    // Bare word triples are transitions, never swallowed by the
    // assignment catch-all.
    #[test]
    fn transition_triples_never_lex_as_assignments(
        from in "[A-Za-z][A-Za-z0-9_]{0,8}",
        condition in "[A-Za-z][A-Za-z0-9_]{0,8}",
        to in "[A-Za-z][A-Za-z0-9_]{0,8}",
    ) {
        let source = format!("{from} , {condition},{to}");
        let tokens = tokenize(&source).expect("triples always lex");
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].kind(), TokenKind::StateTransition);
    }

    // Tokenizing has no hidden state: the same source yields the same
    // sequence every time.
    #[test]
    fn tokenizing_twice_is_identical(
        source in r"([#;][ -~]{0,20}\n|[A-Za-z]{1,8} = [a-z0-9 ]{0,12}\n|\[[A-Za-z]{1,8}\]\n){0,16}",
    ) {
        prop_assert_eq!(tokenize(&source), tokenize(&source));
    }
}
