#![allow(dead_code)]

use ifeval_core::providers::llm::fake::ScriptedClient;
use ifeval_core::providers::llm::ChatReply;
use ifeval_core::{Document, JudgeBackend, JudgeConfig};
use ifeval_rules::{ConstraintSpec, Relation};
use std::sync::Arc;

/// Judge answering `True` for every question.
pub fn agreeable_judge() -> Arc<JudgeBackend> {
    let client = ScriptedClient::new(|_| {
        Ok(ChatReply {
            text: "True".to_string(),
            raw: serde_json::json!({}),
        })
    });
    Arc::new(JudgeBackend::with_client(JudgeConfig::default(), Arc::new(client)).unwrap())
}

/// One spec per catalog variant, plus both combinators.
pub fn one_of_each() -> Vec<ConstraintSpec> {
    let doc = || Document::from("A short source document.");
    vec![
        ConstraintSpec::MaxWordLength { max_chars: 8 },
        ConstraintSpec::WordCount {
            relation: Relation::AtLeast,
            n: 3,
        },
        ConstraintSpec::NoCommas,
        ConstraintSpec::EndWithPhrase {
            phrase: "Thanks.".to_string(),
        },
        ConstraintSpec::AllLowercase,
        ConstraintSpec::AllUppercase,
        ConstraintSpec::SentenceCount {
            relation: Relation::AtMost,
            n: 4,
        },
        ConstraintSpec::ParagraphCount { n: 2 },
        ConstraintSpec::ShorterThanDocument { document: doc() },
        ConstraintSpec::RepeatDocument { document: doc() },
        ConstraintSpec::IncludeKeywords {
            keywords: vec!["rust".to_string()],
        },
        ConstraintSpec::Tone {
            tone: "formal".to_string(),
        },
        ConstraintSpec::Paraphrase { document: doc() },
        ConstraintSpec::Negation {
            inner: Box::new(ConstraintSpec::NoCommas),
        },
        ConstraintSpec::DoubleNegation {
            inner: Box::new(ConstraintSpec::AllLowercase),
        },
    ]
}
