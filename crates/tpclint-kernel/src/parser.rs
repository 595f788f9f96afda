//! Section parser for TPC plugin configuration files.
//!
//! Transforms the lexer's token stream into named sections. A document
//! implicitly starts in the `default` section; each `[header]` token
//! starts the next one. Header tokens are not stored in any section's
//! token list.

use tracing::debug;

use crate::lexer::{self, LexError, Token};

/// Name of the implicit section a document starts in.
pub const DEFAULT_SECTION: &str = "default";

/// One named section: the tokens between its header and the next.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Literal header text, case preserved. `default` for the implicit
    /// leading section.
    pub name: String,
    /// Line of the header, `None` for the implicit `default` section.
    pub line: Option<usize>,
    pub tokens: Vec<Token>,
}

/// Insertion-ordered map from literal section name to its tokens.
///
/// Known quirk, kept for compatibility: when the same literal header
/// appears twice, the later section's tokens overwrite the earlier
/// entry in place (last-section-wins). Headers differing only in case
/// stay separate entries; the file-level rules flag those.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sections {
    entries: Vec<Section>,
}

impl Sections {
    /// Group a token stream into sections.
    ///
    /// The implicit `default` entry is always present, even when empty,
    /// so file-level checks can inspect it uniformly.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let mut sections = Sections::default();
        let mut current_name = DEFAULT_SECTION.to_string();
        let mut current_line: Option<usize> = None;
        let mut accumulator: Vec<Token> = Vec::new();

        for token in tokens {
            match token {
                Token::SectionHeader(header) => {
                    sections.insert(current_name, current_line, accumulator);
                    current_name = header.name;
                    current_line = Some(header.line);
                    accumulator = Vec::new();
                }
                other => accumulator.push(other),
            }
        }
        sections.insert(current_name, current_line, accumulator);
        sections
    }

    /// Insert a section, overwriting the tokens of an existing entry
    /// with the same literal name while keeping its original position.
    fn insert(&mut self, name: String, line: Option<usize>, tokens: Vec<Token>) {
        if let Some(existing) = self.entries.iter_mut().find(|s| s.name == name) {
            existing.line = line.or(existing.line);
            existing.tokens = tokens;
        } else {
            self.entries.push(Section { name, line, tokens });
        }
    }

    /// Look up a section by its exact literal name.
    pub fn get(&self, name: &str) -> Option<&Section> {
        self.entries.iter().find(|s| s.name == name)
    }

    /// First section whose name matches case-insensitively.
    pub fn get_ignore_case(&self, name: &str) -> Option<&Section> {
        self.entries
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Sections in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One parsed configuration file, ready for the rule engine.
///
/// Built once per validation run and never mutated by rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub sections: Sections,
}

impl Document {
    /// Lex and section one document.
    pub fn parse(source: &str) -> Result<Self, LexError> {
        let tokens = lexer::tokenize(source)?;
        debug!(tokens = tokens.len(), "document lexed");
        Ok(Self::from_tokens(tokens))
    }

    /// Build a document from an already-lexed token stream.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            sections: Sections::from_tokens(tokens),
        }
    }

    /// Tokens of the named section (exact match), or an empty slice.
    pub fn section_tokens(&self, name: &str) -> &[Token] {
        self.sections
            .get(name)
            .map(|s| s.tokens.as_slice())
            .unwrap_or(&[])
    }

    /// Assignments of the named section (exact match), skipping other
    /// token kinds.
    pub fn section_assignments(&self, name: &str) -> impl Iterator<Item = &lexer::Assignment> {
        self.section_tokens(name).iter().filter_map(|t| match t {
            Token::Assignment(a) => Some(a),
            _ => None,
        })
    }
}
