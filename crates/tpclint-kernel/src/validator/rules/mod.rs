//! The rule modules, one per rule set.
//!
//! Every rule is a pure function over the read-only document model; it
//! returns its own violation list and never sees another rule's output.

pub(crate) mod conditions;
pub(crate) mod cpm_parameters;
pub(crate) mod logging;
pub(crate) mod parameters;
pub(crate) mod sections;
pub(crate) mod states;
pub(crate) mod transitions;
