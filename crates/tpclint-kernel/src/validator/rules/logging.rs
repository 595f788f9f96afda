//! Validation of the process file's `[Debug Information]` section.
//!
//! Logging is opt-in: a missing section means logging is off and gets
//! an INFO note. A setting left enabled is CRITICAL under the production
//! policy and INFO when the caller validates under a development policy.

use crate::lexer::{Assignment, Token, TokenKind};
use crate::parser::Document;
use crate::validator::config::LoggingConfig;
use crate::validator::support;
use crate::validator::violation::{FileKind, Severity, Violation};

const SECTION: &str = "Debug Information";
const ALLOWED: [TokenKind; 2] = [TokenKind::Assignment, TokenKind::Comment];

/// The canonical spellings of every valid logging setting.
const VALID_SETTINGS: [&str; 5] = [
    "DebugLogFullParsingInfo",
    "DebugLogFullExecutionInfo",
    "DebugLogDetailBuiltInActions",
    "ExpectLog",
    "ConsoleOutput",
];

pub(crate) fn validate(process: &Document, config: &LoggingConfig) -> Vec<Violation> {
    let mut out = Vec::new();
    let Some(section) = support::find_section(process, FileKind::Process, SECTION, &mut out) else {
        out.push(
            Violation::new(
                "LoggingNoSectionViolation",
                Severity::Info,
                format!(
                    "The process file does not contain a \"{SECTION}\" section, therefore, logging is disabled.",
                ),
            )
            .with_file(FileKind::Process),
        );
        return out;
    };

    let tokens = support::filter_tokens(
        &section.tokens,
        &ALLOWED,
        "LoggingTokenViolation",
        Severity::Warning,
        FileKind::Process,
        SECTION,
        &mut out,
    );

    for token in tokens {
        let Token::Assignment(setting) = token else {
            continue;
        };
        if check_setting_name(setting, &mut out) {
            check_setting_value(setting, config, &mut out);
        }
    }

    out
}

/// Whether the setting name is acceptable. A case-insensitive match is
/// accepted (the value checks still run) but flagged with the canonical
/// spelling; an unknown name is rejected.
fn check_setting_name(setting: &Assignment, out: &mut Vec<Violation>) -> bool {
    if VALID_SETTINGS.contains(&setting.name.as_str()) {
        return true;
    }
    if let Some(canonical) = VALID_SETTINGS
        .iter()
        .find(|valid| valid.eq_ignore_ascii_case(&setting.name))
    {
        out.push(
            Violation::new(
                "LoggingSettingNameCaseViolation",
                Severity::Warning,
                format!(
                    "The logging setting \"{}\" should be set as \"{canonical}\".",
                    setting.name
                ),
            )
            .with_file(FileKind::Process)
            .with_section(SECTION)
            .with_line(setting.line),
        );
        return true;
    }
    out.push(
        Violation::new(
            "LoggingSettingNameViolation",
            Severity::Warning,
            format!(
                "The logging setting \"{}\" is not a valid logging setting. Valid settings are: {}.",
                setting.name,
                VALID_SETTINGS.join(", ")
            ),
        )
        .with_file(FileKind::Process)
        .with_section(SECTION)
        .with_line(setting.line),
    );
    false
}

/// Value checks: explicit, yes/no only, lower case, and `no` unless the
/// operator really wants logging on.
fn check_setting_value(setting: &Assignment, config: &LoggingConfig, out: &mut Vec<Violation>) {
    let Some(value) = setting.value.as_deref() else {
        out.push(
            Violation::new(
                "LoggingValueViolation",
                Severity::Warning,
                format!(
                    "The logging value for \"{}\" is blank. Setting should explicitly be set to \"no\".",
                    setting.name
                ),
            )
            .with_file(FileKind::Process)
            .with_section(SECTION)
            .with_line(setting.line),
        );
        return;
    };

    let lowered = value.to_ascii_lowercase();
    if lowered != "yes" && lowered != "no" {
        out.push(
            Violation::new(
                "LoggingValueViolation",
                Severity::Critical,
                format!(
                    "The logging value for \"{}\" is set to \"{value}\" and is invalid. Valid values are \"no\" and \"yes\".",
                    setting.name
                ),
            )
            .with_file(FileKind::Process)
            .with_section(SECTION)
            .with_line(setting.line),
        );
        return;
    }

    if lowered != value {
        out.push(
            Violation::new(
                "LoggingValueCaseViolation",
                Severity::Warning,
                format!(
                    "The logging value for \"{}\" is set to \"{value}\" and is not in lower case. Ensure all logging settings are in lower case.",
                    setting.name
                ),
            )
            .with_file(FileKind::Process)
            .with_section(SECTION)
            .with_line(setting.line),
        );
    }

    if lowered != "no" {
        let severity = if config.enabled {
            Severity::Critical
        } else {
            Severity::Info
        };
        out.push(
            Violation::new(
                "LoggingEnabledViolation",
                severity,
                format!(
                    "The logging value for \"{}\" is set to \"{value}\". It is recommended to set all logging settings to \"no\" for production environments.",
                    setting.name
                ),
            )
            .with_file(FileKind::Process)
            .with_section(SECTION)
            .with_line(setting.line),
        );
    }
}
