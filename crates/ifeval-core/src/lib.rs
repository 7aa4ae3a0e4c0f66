//! Core engine for instruction-following evaluation.
//!
//! A constraint is a self-contained rule that can describe itself as a
//! natural-language instruction, judge a candidate response, and name the
//! constraint kinds it must not be combined with. This crate provides:
//!
//! - the [`Constraint`] trait and the ready/deferred [`Evaluation`] result
//! - seeded instruction templating and rule-family (`group`) derivation
//! - the [`CompetitiveRegistry`] of mutually exclusive constraint kinds
//! - the [`Negation`] and [`DoubleNegation`] combinators
//! - the [`JudgeBackend`] used by semantic constraints to consult an LLM
//!
//! # Quick Start
//!
//! ```no_run
//! use ifeval_core::{Constraint, InstructionMode, Negation};
//!
//! # async fn example(inner: Box<dyn Constraint>) -> anyhow::Result<()> {
//! let negated = Negation::new(inner, Some(7));
//! println!("{}", negated.instructions(InstructionMode::Test));
//! let verdict = negated.evaluate("candidate response").await?;
//! println!("passed: {}", verdict.passed);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `IFEVAL_JUDGE_PROVIDER` | Judge provider (`openai` or `local`, default `openai`) |
//! | `IFEVAL_JUDGE_MODEL` | Judge model identifier |
//! | `IFEVAL_JUDGE_BASE_URL` | Base URL of an OpenAI-compatible server |
//! | `IFEVAL_JUDGE_MAX_CONCURRENCY` | Maximum in-flight judge requests (default: 8) |
//! | `IFEVAL_JUDGE_TIMEOUT_MS` | Per-request timeout in milliseconds |
//! | `IFEVAL_NETWORK_POLICY` | Set to `deny` to block outbound judge calls |

pub mod competitive;
pub mod config;
pub mod constraint_api;
pub mod errors;
pub mod group;
pub mod judge;
pub mod logic;
pub mod model;
pub mod providers;
pub mod templating;
pub mod text;

pub use competitive::{CompetitiveRegistry, RegistryViolation};
pub use constraint_api::{Constraint, Evaluation};
pub use errors::{ConfigError, JudgeError};
pub use group::{group_from_module_path, RuleMeta};
pub use judge::{JudgeBackend, JudgeConfig, JudgeReply, JudgeVerdict, Provider};
pub use logic::{DoubleNegation, Negation};
pub use model::{ConstraintEvaluation, Document, InstructionMode};
pub use templating::TemplatePicker;
