//! Compiled competitive table for the rule catalog.
//!
//! Rules look up their own `competitives` here, and prompt assemblers use
//! [`competitive_registry`] to decide which kinds may share a prompt.

use crate::case_change::{AllLowercase, AllUppercase};
use crate::content::IncludeKeywords;
use crate::length::{ParagraphCount, SentenceCount, ShorterThanDocument};
use crate::punctuation::{EndWithPhrase, NoCommas};
use crate::repeat::RepeatDocument;
use crate::semantic::{Paraphrase, Tone};
use crate::words::{MaxWordLength, WordCount};
use ifeval_core::{CompetitiveRegistry, DoubleNegation, Negation};
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Every constraint kind this crate can build.
pub const ALL_KINDS: &[&str] = &[
    AllLowercase::KIND,
    AllUppercase::KIND,
    DoubleNegation::KIND,
    EndWithPhrase::KIND,
    IncludeKeywords::KIND,
    MaxWordLength::KIND,
    Negation::KIND,
    NoCommas::KIND,
    ParagraphCount::KIND,
    Paraphrase::KIND,
    RepeatDocument::KIND,
    SentenceCount::KIND,
    ShorterThanDocument::KIND,
    Tone::KIND,
    WordCount::KIND,
];

/// Kind -> kinds it must never share a prompt with. Must stay symmetric.
pub static COMPETITIVE_TABLE: &[(&str, &[&str])] = &[
    ("AllLowercase", &["AllUppercase", "RepeatDocument"]),
    ("AllUppercase", &["AllLowercase", "RepeatDocument"]),
    ("DoubleNegation", &[]),
    ("EndWithPhrase", &[]),
    ("IncludeKeywords", &[]),
    ("MaxWordLength", &[]),
    ("Negation", &[]),
    ("NoCommas", &["RepeatDocument"]),
    ("ParagraphCount", &[]),
    ("Paraphrase", &["RepeatDocument"]),
    (
        "RepeatDocument",
        &[
            "AllLowercase",
            "AllUppercase",
            "NoCommas",
            "Paraphrase",
            "ShorterThanDocument",
        ],
    ),
    ("SentenceCount", &[]),
    ("ShorterThanDocument", &["RepeatDocument", "WordCount"]),
    ("Tone", &[]),
    ("WordCount", &["ShorterThanDocument"]),
];

/// Process-wide registry, built on first use.
pub fn competitive_registry() -> &'static CompetitiveRegistry {
    static REGISTRY: OnceLock<CompetitiveRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| CompetitiveRegistry::from_table(COMPETITIVE_TABLE))
}

pub fn competitives_of(kind: &str) -> BTreeSet<String> {
    competitive_registry().competitives_of(kind)
}
