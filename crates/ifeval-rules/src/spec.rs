//! Declarative constraint suites.
//!
//! A suite is a YAML (or JSON) document listing constraint specs:
//!
//! ```yaml
//! seed: 42
//! mode: test
//! judge:
//!   model: gpt-4o-mini
//!   max_concurrency: 4
//! constraints:
//!   - kind: word_count
//!     relation: at_most
//!     n: 120
//!   - kind: negation
//!     inner:
//!       kind: no_commas
//!   - kind: tone
//!     tone: formal
//! ```

use crate::case_change::{AllLowercase, AllUppercase};
use crate::content::IncludeKeywords;
use crate::length::{ParagraphCount, SentenceCount, ShorterThanDocument};
use crate::punctuation::{EndWithPhrase, NoCommas};
use crate::repeat::RepeatDocument;
use crate::semantic::{Paraphrase, Tone};
use crate::words::{MaxWordLength, WordCount};
use crate::Relation;
use ifeval_core::{
    ConfigError, Constraint, Document, DoubleNegation, InstructionMode, JudgeBackend, JudgeConfig,
    Negation,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// One constraint, possibly wrapped in combinators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConstraintSpec {
    MaxWordLength { max_chars: usize },
    WordCount { relation: Relation, n: usize },
    NoCommas,
    EndWithPhrase { phrase: String },
    AllLowercase,
    AllUppercase,
    SentenceCount { relation: Relation, n: usize },
    ParagraphCount { n: usize },
    ShorterThanDocument { document: Document },
    RepeatDocument { document: Document },
    IncludeKeywords { keywords: Vec<String> },
    Tone { tone: String },
    Paraphrase { document: Document },
    Negation { inner: Box<ConstraintSpec> },
    DoubleNegation { inner: Box<ConstraintSpec> },
}

/// Inputs shared by every constraint built from a spec.
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    pub seed: Option<u64>,
    pub judge: Option<Arc<JudgeBackend>>,
}

impl BuildContext {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed, judge: None }
    }

    pub fn with_judge(mut self, judge: Arc<JudgeBackend>) -> Self {
        self.judge = Some(judge);
        self
    }

    fn reseeded(&self, seed: Option<u64>) -> Self {
        Self {
            seed,
            judge: self.judge.clone(),
        }
    }

    fn judge_for(&self, kind: &str) -> Result<Arc<JudgeBackend>, ConfigError> {
        self.judge.clone().ok_or_else(|| {
            ConfigError::invalid_argument(kind, "semantic constraints need a judge backend")
        })
    }
}

impl ConstraintSpec {
    /// Kind of the outermost constraint this spec builds.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::MaxWordLength { .. } => MaxWordLength::KIND,
            Self::WordCount { .. } => WordCount::KIND,
            Self::NoCommas => NoCommas::KIND,
            Self::EndWithPhrase { .. } => EndWithPhrase::KIND,
            Self::AllLowercase => AllLowercase::KIND,
            Self::AllUppercase => AllUppercase::KIND,
            Self::SentenceCount { .. } => SentenceCount::KIND,
            Self::ParagraphCount { .. } => ParagraphCount::KIND,
            Self::ShorterThanDocument { .. } => ShorterThanDocument::KIND,
            Self::RepeatDocument { .. } => RepeatDocument::KIND,
            Self::IncludeKeywords { .. } => IncludeKeywords::KIND,
            Self::Tone { .. } => Tone::KIND,
            Self::Paraphrase { .. } => Paraphrase::KIND,
            Self::Negation { .. } => Negation::KIND,
            Self::DoubleNegation { .. } => DoubleNegation::KIND,
        }
    }

    /// True when this spec, or anything it wraps, consults the judge.
    pub fn requires_judge(&self) -> bool {
        match self {
            Self::Tone { .. } | Self::Paraphrase { .. } => true,
            Self::Negation { inner } | Self::DoubleNegation { inner } => inner.requires_judge(),
            _ => false,
        }
    }

    /// Build the constraint. Wrapped specs get the next seed so the
    /// combinator and its inner rule draw independent template streams.
    pub fn build(&self, ctx: &BuildContext) -> Result<Box<dyn Constraint>, ConfigError> {
        let seed = ctx.seed;
        let built: Box<dyn Constraint> = match self {
            Self::MaxWordLength { max_chars } => Box::new(MaxWordLength::new(*max_chars, seed)?),
            Self::WordCount { relation, n } => Box::new(WordCount::new(*relation, *n, seed)?),
            Self::NoCommas => Box::new(NoCommas::new(seed)),
            Self::EndWithPhrase { phrase } => Box::new(EndWithPhrase::new(phrase.as_str(), seed)?),
            Self::AllLowercase => Box::new(AllLowercase::new(seed)),
            Self::AllUppercase => Box::new(AllUppercase::new(seed)),
            Self::SentenceCount { relation, n } => {
                Box::new(SentenceCount::new(*relation, *n, seed)?)
            }
            Self::ParagraphCount { n } => Box::new(ParagraphCount::new(*n, seed)?),
            Self::ShorterThanDocument { document } => {
                Box::new(ShorterThanDocument::new(document.clone(), seed)?)
            }
            Self::RepeatDocument { document } => {
                Box::new(RepeatDocument::new(document.clone(), seed)?)
            }
            Self::IncludeKeywords { keywords } => {
                Box::new(IncludeKeywords::new(keywords.iter().cloned(), seed)?)
            }
            Self::Tone { tone } => Box::new(Tone::new(
                tone.as_str(),
                ctx.judge_for(Tone::KIND)?,
                seed,
            )?),
            Self::Paraphrase { document } => Box::new(Paraphrase::new(
                document.clone(),
                ctx.judge_for(Paraphrase::KIND)?,
                seed,
            )?),
            Self::Negation { inner } => {
                let inner = inner.build(&ctx.reseeded(seed.map(|s| s.wrapping_add(1))))?;
                Box::new(Negation::new(inner, seed))
            }
            Self::DoubleNegation { inner } => {
                let inner = inner.build(&ctx.reseeded(seed.map(|s| s.wrapping_add(1))))?;
                Box::new(DoubleNegation::new(inner, seed))
            }
        };
        Ok(built)
    }
}

/// A set of constraints required of one response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Suite {
    /// Base seed; each constraint derives its own from its position.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub mode: InstructionMode,

    /// Judge used by semantic constraints. Falls back to the environment.
    #[serde(default)]
    pub judge: Option<JudgeConfig>,

    pub constraints: Vec<ConstraintSpec>,
}

impl Suite {
    pub fn requires_judge(&self) -> bool {
        self.constraints.iter().any(ConstraintSpec::requires_judge)
    }

    /// Judge backend for this suite, or `None` when no constraint needs one.
    pub fn judge_backend(&self) -> Result<Option<Arc<JudgeBackend>>, ConfigError> {
        if !self.requires_judge() {
            return Ok(None);
        }
        let config = match &self.judge {
            Some(config) => config.clone(),
            None => JudgeConfig::from_env()?,
        };
        config.validate()?;
        Ok(Some(Arc::new(JudgeBackend::from_config(config)?)))
    }

    /// Build every constraint and reject sets containing competitive pairs.
    pub fn build(
        &self,
        judge: Option<Arc<JudgeBackend>>,
    ) -> Result<Vec<Box<dyn Constraint>>, ConfigError> {
        let base = BuildContext {
            seed: self.seed,
            judge,
        };
        let constraints = self
            .constraints
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let seed = self.seed.map(|s| s.wrapping_add((index as u64) << 16));
                spec.build(&base.reseeded(seed))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some((a, b)) = conflicts(&constraints).into_iter().next() {
            return Err(ConfigError::invalid_argument(
                "constraints",
                format!("{a} cannot be combined with {b}"),
            ));
        }
        debug!(count = constraints.len(), "built constraint suite");
        Ok(constraints)
    }
}

/// Every pair of constraints where one lists the other's kind as competitive.
pub fn conflicts(constraints: &[Box<dyn Constraint>]) -> Vec<(&'static str, &'static str)> {
    let mut found = Vec::new();
    for (i, a) in constraints.iter().enumerate() {
        let a_conflicts = a.competitives();
        for b in &constraints[i + 1..] {
            if a_conflicts.contains(b.kind()) || b.competitives().contains(a.kind()) {
                found.push((a.kind(), b.kind()));
            }
        }
    }
    found
}

/// Numbered instruction block, one line per constraint.
pub fn instruction_block(constraints: &[Box<dyn Constraint>], mode: InstructionMode) -> String {
    constraints
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {}", i + 1, c.instructions(mode)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn load_suite(path: &Path) -> Result<Suite, ConfigError> {
    ifeval_core::config::load_yaml(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn parse(yaml: &str) -> ConstraintSpec {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn parses_nested_combinators() {
        let spec = parse("kind: negation\ninner:\n  kind: double_negation\n  inner:\n    kind: no_commas\n");
        assert_eq!(spec.kind_name(), "Negation");
        let built = spec.build(&BuildContext::new(Some(5))).unwrap();
        assert_eq!(built.kind(), "Negation");
        assert_eq!(built.group(), "Logic");
        assert_eq!(
            built.competitives(),
            BTreeSet::from(["DoubleNegation".to_string()])
        );
    }

    #[tokio::test]
    async fn negated_rule_combines_with_its_opposite() {
        let suite: Suite = serde_yaml::from_str(
            "constraints:\n  - kind: negation\n    inner:\n      kind: all_lowercase\n  - kind: all_uppercase\n",
        )
        .unwrap();
        let constraints = suite.build(None).unwrap();
        assert_eq!(constraints.len(), 2);
        for c in &constraints {
            assert!(c.evaluate("HELLO").await.unwrap().passed, "{}", c.kind());
        }
    }

    #[test]
    fn unknown_kinds_are_rejected() {
        let err = serde_yaml::from_str::<ConstraintSpec>("kind: word_salad\n");
        assert!(err.is_err());
    }

    #[test]
    fn semantic_specs_need_a_judge() {
        let spec = parse("kind: double_negation\ninner:\n  kind: tone\n  tone: formal\n");
        assert!(spec.requires_judge());
        let err = spec.build(&BuildContext::default()).err().unwrap();
        assert!(matches!(err, ConfigError::InvalidArgument { ref name, .. } if name == "Tone"));
    }

    #[test]
    fn zero_counts_surface_as_config_errors() {
        let spec = parse("kind: paragraph_count\nn: 0\n");
        assert!(spec.build(&BuildContext::default()).is_err());
    }

    #[test]
    fn competitive_pairs_are_rejected() {
        let suite: Suite = serde_yaml::from_str(
            "constraints:\n  - kind: all_lowercase\n  - kind: word_count\n    relation: at_least\n    n: 5\n  - kind: all_uppercase\n",
        )
        .unwrap();
        let err = suite.build(None).err().unwrap();
        assert!(err.to_string().contains("AllLowercase cannot be combined with AllUppercase"));
    }

    #[test]
    fn same_seed_same_instruction_block() {
        let suite: Suite = serde_yaml::from_str(
            "seed: 9\nmode: train\nconstraints:\n  - kind: no_commas\n  - kind: negation\n    inner:\n      kind: all_uppercase\n",
        )
        .unwrap();
        let first = instruction_block(&suite.build(None).unwrap(), suite.mode);
        let second = instruction_block(&suite.build(None).unwrap(), suite.mode);
        assert_eq!(first, second);
        assert!(first.starts_with("1. "));
        assert!(first.contains("\n2. "));
    }
}
