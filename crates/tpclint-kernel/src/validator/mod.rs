//! The rule validation engine.
//!
//! Walks the parsed document pair through every rule set and
//! concatenates their findings. Rules run unconditionally and
//! independently: one rule's violations never suppress another's, so a
//! single pass reports the full picture of a misconfigured file.
//!
//! # Example
//!
//! ```
//! use tpclint_kernel::parser::Document;
//! use tpclint_kernel::validator::{self, ValidatorConfig};
//!
//! let process = Document::parse("[states]\nEND\n")?;
//! let prompts = Document::parse("[conditions]\n")?;
//! let violations = validator::validate(&process, &prompts, &ValidatorConfig::default());
//! for violation in &violations {
//!     println!("{violation}");
//! }
//! # Ok::<(), tpclint_kernel::lexer::LexError>(())
//! ```

mod config;
mod rules;
mod support;
mod violation;

pub use config::{LoggingConfig, ValidatorConfig};
pub use violation::{FileKind, Severity, Violation};

use tracing::debug;

use crate::parser::Document;

/// Run every rule set over the document pair, in the engine's fixed
/// order, and return the concatenated findings.
///
/// The output order is rule execution order, then emission order within
/// a rule — callers must not assume any global sorting.
pub fn validate(
    process: &Document,
    prompts: &Document,
    config: &ValidatorConfig,
) -> Vec<Violation> {
    let rule_sets: [(&str, Vec<Violation>); 8] = [
        ("process_sections", rules::sections::validate_process(process)),
        ("prompts_sections", rules::sections::validate_prompts(prompts)),
        ("states", rules::states::validate(process)),
        ("transitions", rules::transitions::validate(process)),
        ("parameters", rules::parameters::validate(process)),
        (
            "cpm_parameters",
            rules::cpm_parameters::validate(process, prompts),
        ),
        ("conditions", rules::conditions::validate(process, prompts)),
        ("logging", rules::logging::validate(process, &config.logging)),
    ];

    let mut violations = Vec::new();
    for (rule_set, found) in rule_sets {
        debug!(rule_set, violations = found.len(), "rule set complete");
        violations.extend(found);
    }
    violations
}
