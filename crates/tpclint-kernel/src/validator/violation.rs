//! The uniform output record of the rule engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lexer::LexError;

/// How bad a finding is. Ordered so callers can take a maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("INFO"),
            Severity::Warning => f.write_str("WARNING"),
            Severity::Critical => f.write_str("CRITICAL"),
        }
    }
}

/// Which of the two input documents a finding refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Process,
    Prompts,
}

impl FileKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Process => "process",
            FileKind::Prompts => "prompts",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported finding. Immutable once created; the engine only ever
/// appends these to its output list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Stable rule identifier, e.g. `StatesNoStatesSectionViolation`.
    pub rule: String,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Violation {
    pub fn new(rule: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            severity,
            message: message.into(),
            file: None,
            section: None,
            line: None,
        }
    }

    pub fn with_file(mut self, file: FileKind) -> Self {
        self.file = Some(file);
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Caller-side translation of a fatal lexer error, for front ends
    /// that report it alongside ordinary findings instead of aborting.
    pub fn from_lex_error(file: FileKind, error: &LexError) -> Self {
        Violation::new("ParseErrorViolation", Severity::Critical, error.to_string())
            .with_file(file)
            .with_line(error.line)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ({}) {}", self.severity, self.rule, self.message)?;
        if let Some(file) = self.file {
            write!(f, ", file: {file}")?;
        }
        if let Some(section) = &self.section {
            write!(f, ", section: {section}")?;
        }
        if let Some(line) = self.line {
            write!(f, ", line: {line}")?;
        }
        Ok(())
    }
}
