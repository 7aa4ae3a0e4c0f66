//! Registry of mutually exclusive ("competitive") constraint kinds.
//!
//! The table is compiled in and built once at startup; it is consulted by
//! whoever assembles constraint sets for a prompt, never during `evaluate`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Immutable kind -> conflicting kinds table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompetitiveRegistry {
    table: BTreeMap<String, BTreeSet<String>>,
}

/// A structural defect found by [`CompetitiveRegistry::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryViolation {
    /// `kind` lists `other`, but `other` does not list `kind`.
    Asymmetric { kind: String, other: String },
    /// `kind` lists `other`, which is not a key.
    Dangling { kind: String, other: String },
    /// A kind lists itself.
    SelfConflict { kind: String },
    /// An expected kind has no entry.
    MissingKind { kind: String },
}

impl fmt::Display for RegistryViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asymmetric { kind, other } => {
                write!(f, "{kind} conflicts with {other}, but {other} does not list {kind}")
            }
            Self::Dangling { kind, other } => {
                write!(f, "{kind} lists unknown kind {other}")
            }
            Self::SelfConflict { kind } => write!(f, "{kind} lists itself"),
            Self::MissingKind { kind } => write!(f, "{kind} has no registry entry"),
        }
    }
}

impl CompetitiveRegistry {
    /// Build from a compiled `(kind, conflicts)` table. Later rows for the
    /// same kind extend earlier ones.
    pub fn from_table(rows: &[(&str, &[&str])]) -> Self {
        let mut table: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (kind, conflicts) in rows {
            table
                .entry((*kind).to_string())
                .or_default()
                .extend(conflicts.iter().map(|c| (*c).to_string()));
        }
        Self { table }
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.table.contains_key(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> + '_ {
        self.table.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Conflicts of `kind`; empty for unknown kinds.
    pub fn competitives_of(&self, kind: &str) -> BTreeSet<String> {
        self.table.get(kind).cloned().unwrap_or_default()
    }

    /// True when `a` and `b` may be required of the same response.
    pub fn can_combine(&self, a: &str, b: &str) -> bool {
        let listed = |x: &str, y: &str| self.table.get(x).is_some_and(|set| set.contains(y));
        !(listed(a, b) || listed(b, a))
    }

    /// True when no pair in `kinds` conflicts.
    pub fn compatible_set<'a>(&self, kinds: impl IntoIterator<Item = &'a str>) -> bool {
        let kinds: Vec<&str> = kinds.into_iter().collect();
        kinds.iter().enumerate().all(|(i, a)| {
            kinds[i + 1..]
                .iter()
                .all(|b| self.can_combine(a, b))
        })
    }

    /// Every symmetry, dangling-edge and self-conflict defect.
    pub fn validate(&self) -> Vec<RegistryViolation> {
        let mut violations = Vec::new();
        for (kind, conflicts) in &self.table {
            for other in conflicts {
                if other == kind {
                    violations.push(RegistryViolation::SelfConflict { kind: kind.clone() });
                    continue;
                }
                match self.table.get(other) {
                    None => violations.push(RegistryViolation::Dangling {
                        kind: kind.clone(),
                        other: other.clone(),
                    }),
                    Some(back) if !back.contains(kind) => {
                        violations.push(RegistryViolation::Asymmetric {
                            kind: kind.clone(),
                            other: other.clone(),
                        })
                    }
                    Some(_) => {}
                }
            }
        }
        violations
    }

    /// Missing entries among `expected` kinds.
    pub fn validate_total<'a>(
        &self,
        expected: impl IntoIterator<Item = &'a str>,
    ) -> Vec<RegistryViolation> {
        expected
            .into_iter()
            .filter(|kind| !self.contains(kind))
            .map(|kind| RegistryViolation::MissingKind {
                kind: kind.to_string(),
            })
            .collect()
    }
}
