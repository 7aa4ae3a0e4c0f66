//! Rule-family derivation.
//!
//! Concrete rules live in family modules (`ifeval_rules::case_change::all_lowercase`).
//! The family is the second-to-last segment of the rule's module path, turned
//! into a display label (`case_change` -> `CaseChange`, `words` -> `Words`).

use crate::model::InstructionMode;
use crate::templating::TemplatePicker;
use std::sync::OnceLock;

/// Family label for a `::`-separated module path.
///
/// Paths with a single segment use that segment.
pub fn group_from_module_path(module_path: &str) -> String {
    let segments: Vec<&str> = module_path.split("::").filter(|s| !s.is_empty()).collect();
    let slug = match segments.len() {
        0 => "",
        1 => segments[0],
        n => segments[n - 2],
    };
    pascal_case(slug)
}

fn pascal_case(slug: &str) -> String {
    slug.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Per-instance helper bundling the lazily derived group label with the
/// seeded template picker.
///
/// Rules construct it with `RuleMeta::new(module_path!(), seed)`.
#[derive(Debug)]
pub struct RuleMeta {
    module_path: &'static str,
    group: OnceLock<String>,
    picker: TemplatePicker,
}

impl RuleMeta {
    pub fn new(module_path: &'static str, seed: Option<u64>) -> Self {
        Self {
            module_path,
            group: OnceLock::new(),
            picker: TemplatePicker::new(seed),
        }
    }

    pub fn group(&self) -> &str {
        self.group
            .get_or_init(|| group_from_module_path(self.module_path))
    }

    pub fn module_path(&self) -> &'static str {
        self.module_path
    }

    pub fn picker(&self) -> &TemplatePicker {
        &self.picker
    }

    /// Train mode picks among `train`; test mode always returns `test`.
    pub fn choose<'a>(&self, mode: InstructionMode, train: &[&'a str], test: &'a str) -> &'a str {
        match mode {
            InstructionMode::Train => self.picker.pick(train),
            InstructionMode::Test => test,
        }
    }
}
