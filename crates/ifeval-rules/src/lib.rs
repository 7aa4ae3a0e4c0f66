//! Rule catalog.
//!
//! Each family module (`words`, `punctuation`, ...) holds rules that share a
//! `group` label; the label is derived from the module path. The compiled
//! competitive table lives in [`registry`], and [`spec`] builds boxed
//! constraints from declarative YAML/JSON.

pub mod case_change;
pub mod content;
pub mod length;
pub mod punctuation;
pub mod registry;
pub mod repeat;
pub mod semantic;
pub mod spec;
pub mod words;

mod relation;

pub use registry::{competitive_registry, competitives_of, ALL_KINDS, COMPETITIVE_TABLE};
pub use relation::Relation;
pub use spec::{conflicts, instruction_block, load_suite, BuildContext, ConstraintSpec, Suite};

use ifeval_core::{ConfigError, ConstraintEvaluation};

/// Failing evaluation for a blank response, or `None` when there is content.
pub(crate) fn require_content(tag: &str, value: &str) -> Option<ConstraintEvaluation> {
    value
        .trim()
        .is_empty()
        .then(|| ConstraintEvaluation::fail(format!("[{tag}] Response is empty.")))
}

pub(crate) fn require_positive(name: &str, n: usize) -> Result<usize, ConfigError> {
    if n == 0 {
        return Err(ConfigError::invalid_argument(name, "must be positive, got 0"));
    }
    Ok(n)
}

/// Substitute `{key}` placeholders.
pub(crate) fn fill(template: &str, pairs: &[(&str, &str)]) -> String {
    pairs.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{key}}}"), value)
    })
}
