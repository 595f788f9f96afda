//! Line-oriented lexer for TPC plugin configuration files.
//!
//! Both the process and prompts files share one grammar: every non-blank
//! line is exactly one token. Patterns are anchored start-to-end,
//! case-insensitive, and tried in a fixed priority order — `Assignment`
//! is the most permissive pattern and must come last. A line that matches
//! nothing fails the whole document; there is no partial token list.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

/// A line the grammar cannot account for. Fatal for the document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unable to parse \"{text}\" on line {line}")]
pub struct LexError {
    /// 1-based line number of the offending line.
    pub line: usize,
    /// The offending line, verbatim.
    pub text: String,
}

/// A comment line: `# ...` or `; ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Comment text including the leading marker, trimmed.
    pub text: String,
    pub line: usize,
}

/// A section header: `[Name]`. The name keeps the case it was written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeader {
    pub name: String,
    pub line: usize,
}

/// A `name` or `name = value` line. The catch-all token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub name: String,
    /// Whether an `=` was present at all. `name` alone is a valid line.
    pub has_equals: bool,
    /// `None` when the `=` is absent or the right-hand side is blank.
    pub value: Option<String>,
    pub line: usize,
}

/// A bare `from,condition,to` transition triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransition {
    pub from: String,
    pub condition: String,
    pub to: String,
    pub line: usize,
}

/// A fail-state declaration: `name = fail("message", 1234)`.
///
/// The grammar accepts any digit run as the code; whether it lies in the
/// valid 1000–9999 range is a rule concern, so out-of-range codes get a
/// diagnostic instead of a parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailState {
    pub name: String,
    pub message: String,
    pub code: u64,
    pub line: usize,
}

/// A parameter validation: `name, source=SRC[, mandatory=M][, allowcharacters=C]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterValidation {
    pub name: String,
    pub source: String,
    pub mandatory: Option<String>,
    pub allow_characters: Option<String>,
    pub line: usize,
}

/// One lexed line. The set of variants is closed; every rule matches
/// exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Comment(Comment),
    SectionHeader(SectionHeader),
    Assignment(Assignment),
    StateTransition(StateTransition),
    FailState(FailState),
    ParameterValidation(ParameterValidation),
}

impl Token {
    /// The variant's kind tag, for allow-list checks and diagnostics.
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Comment(_) => TokenKind::Comment,
            Token::SectionHeader(_) => TokenKind::SectionHeader,
            Token::Assignment(_) => TokenKind::Assignment,
            Token::StateTransition(_) => TokenKind::StateTransition,
            Token::FailState(_) => TokenKind::FailState,
            Token::ParameterValidation(_) => TokenKind::ParameterValidation,
        }
    }

    /// 1-based source line the token came from.
    pub fn line(&self) -> usize {
        match self {
            Token::Comment(t) => t.line,
            Token::SectionHeader(t) => t.line,
            Token::Assignment(t) => t.line,
            Token::StateTransition(t) => t.line,
            Token::FailState(t) => t.line,
            Token::ParameterValidation(t) => t.line,
        }
    }
}

/// Kind tag for a [`Token`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Comment,
    SectionHeader,
    Assignment,
    StateTransition,
    FailState,
    ParameterValidation,
}

impl TokenKind {
    /// Human-readable name used in violation messages.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Comment => "Comment",
            TokenKind::SectionHeader => "Section Header",
            TokenKind::Assignment => "Assignment",
            TokenKind::StateTransition => "State Transition",
            TokenKind::FailState => "Fail State",
            TokenKind::ParameterValidation => "Parameter Validation",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Grammar patterns, in priority order. All are anchored and
// case-insensitive; `ASSIGNMENT` must stay last.
static COMMENT: LazyLock<Regex> = LazyLock::new(|| pattern(r"^\s*([#;].*?)\s*$"));
static SECTION_HEADER: LazyLock<Regex> = LazyLock::new(|| pattern(r"^\s*\[(\w+(?: \w+)*)\]\s*$"));
static FAIL_STATE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r#"^\s*(\w+)\s*=\s*fail\s*\(\s*"([^"]*)"\s*,\s*([0-9]+)\s*\)\s*$"#));
static PARAMETER_VALIDATION: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"^\s*(?P<name>[\w\\]+)\s*,\s*source\s*=\s*(?P<source>[^, ]*)(?:\s*,\s*mandatory\s*=\s*(?P<mandatory>[^,]*?))?(?:\s*,\s*allowcharacters\s*=\s*(?P<allowcharacters>.*?))?\s*$",
    )
});
static STATE_TRANSITION: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^\s*(\w+)\s*,\s*(\w+)\s*,\s*(\w+)\s*$"));
static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| pattern(r"^\s*(\w+)(?:\s*(=)\s*(.*?))?\s*$"));

#[allow(clippy::expect_used)]
fn pattern(re: &str) -> Regex {
    Regex::new(&format!("(?i){re}")).expect("grammar pattern must compile")
}

/// Tokenize one document. Whitespace-only lines produce no token;
/// every other line must match exactly one grammar pattern.
///
/// Tokenizing is pure: the same source always yields the same sequence.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        if raw.trim().is_empty() {
            continue;
        }
        match match_line(raw, line) {
            Some(token) => {
                trace!(line, kind = %token.kind(), "lexed");
                tokens.push(token);
            }
            None => {
                return Err(LexError {
                    line,
                    text: raw.to_string(),
                });
            }
        }
    }
    Ok(tokens)
}

/// Try the grammar patterns in priority order against one line.
fn match_line(raw: &str, line: usize) -> Option<Token> {
    if let Some(caps) = COMMENT.captures(raw) {
        return Some(Token::Comment(Comment {
            text: caps[1].to_string(),
            line,
        }));
    }
    if let Some(caps) = SECTION_HEADER.captures(raw) {
        return Some(Token::SectionHeader(SectionHeader {
            name: caps[1].to_string(),
            line,
        }));
    }
    if let Some(caps) = FAIL_STATE.captures(raw) {
        // A digit run too long for u64 is not a fail state; the line
        // falls through to the assignment catch-all.
        if let Ok(code) = caps[3].parse::<u64>() {
            return Some(Token::FailState(FailState {
                name: caps[1].to_string(),
                message: caps[2].to_string(),
                code,
                line,
            }));
        }
    }
    if let Some(caps) = PARAMETER_VALIDATION.captures(raw) {
        return Some(Token::ParameterValidation(ParameterValidation {
            name: caps["name"].to_string(),
            source: caps["source"].to_string(),
            mandatory: caps
                .name("mandatory")
                .map(|m| m.as_str().trim().to_string()),
            allow_characters: caps
                .name("allowcharacters")
                .map(|m| m.as_str().trim().to_string()),
            line,
        }));
    }
    if let Some(caps) = STATE_TRANSITION.captures(raw) {
        return Some(Token::StateTransition(StateTransition {
            from: caps[1].to_string(),
            condition: caps[2].to_string(),
            to: caps[3].to_string(),
            line,
        }));
    }
    if let Some(caps) = ASSIGNMENT.captures(raw) {
        let value = caps.get(3).map(|m| m.as_str().trim()).filter(|v| !v.is_empty());
        return Some(Token::Assignment(Assignment {
            name: caps[1].to_string(),
            has_equals: caps.get(2).is_some(),
            value: value.map(str::to_string),
            line,
        }));
    }
    None
}
