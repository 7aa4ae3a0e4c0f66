use crate::model::{ConstraintEvaluation, InstructionMode};
use futures::future::{self, BoxFuture, Either, FutureExt, Ready};
use std::collections::BTreeSet;
use std::future::{Future, IntoFuture};

/// Result of [`Constraint::evaluate`]: either available immediately or
/// produced by an asynchronous step (e.g. a judge backend round trip).
///
/// Both variants are awaited the same way, so callers and combinators never
/// need to know which one a rule produced:
///
/// ```
/// # use ifeval_core::{ConstraintEvaluation, Evaluation};
/// # async fn demo() -> anyhow::Result<()> {
/// let ready = Evaluation::ready(ConstraintEvaluation::pass());
/// let deferred = Evaluation::deferred(async { Ok(ConstraintEvaluation::pass()) });
/// assert_eq!(ready.await?, deferred.await?);
/// # Ok(())
/// # }
/// ```
#[must_use = "an evaluation does nothing until awaited"]
pub enum Evaluation<'a> {
    Ready(anyhow::Result<ConstraintEvaluation>),
    Deferred(BoxFuture<'a, anyhow::Result<ConstraintEvaluation>>),
}

impl<'a> Evaluation<'a> {
    pub fn ready(result: ConstraintEvaluation) -> Self {
        Self::Ready(Ok(result))
    }

    /// Immediate hard error (configuration or backend failure).
    pub fn error(err: impl Into<anyhow::Error>) -> Self {
        Self::Ready(Err(err.into()))
    }

    pub fn deferred<F>(fut: F) -> Self
    where
        F: Future<Output = anyhow::Result<ConstraintEvaluation>> + Send + 'a,
    {
        Self::Deferred(fut.boxed())
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The immediate result, or the evaluation itself if it is deferred.
    pub fn now(self) -> Result<anyhow::Result<ConstraintEvaluation>, Self> {
        match self {
            Self::Ready(result) => Ok(result),
            deferred => Err(deferred),
        }
    }
}

impl<'a> IntoFuture for Evaluation<'a> {
    type Output = anyhow::Result<ConstraintEvaluation>;
    type IntoFuture = Either<
        Ready<anyhow::Result<ConstraintEvaluation>>,
        BoxFuture<'a, anyhow::Result<ConstraintEvaluation>>,
    >;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Self::Ready(result) => Either::Left(future::ready(result)),
            Self::Deferred(fut) => Either::Right(fut),
        }
    }
}

impl std::fmt::Debug for Evaluation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// A single checkable instruction rule.
///
/// Implementations must keep `evaluate` free of shared-state mutation so the
/// same instance can be evaluated repeatedly, and distinct instances
/// concurrently. Failure reasons start with a bracketed family tag such as
/// `[Word Length]` and state the expected condition and the observed value.
pub trait Constraint: Send + Sync {
    /// Type-level identity used as the key in the competitive registry.
    fn kind(&self) -> &'static str;

    /// Human-readable rule family, derived once per instance.
    fn group(&self) -> &str;

    /// Instruction sentence for a prompt.
    fn instructions(&self, mode: InstructionMode) -> String;

    /// Instruction used when asking a model to repair a failing response.
    fn rewrite_instructions(&self) -> String;

    /// Constraint kinds that must not be combined with this one in a prompt.
    fn competitives(&self) -> BTreeSet<String>;

    fn evaluate<'a>(&'a self, value: &'a str) -> Evaluation<'a>;
}

impl<C: Constraint + ?Sized> Constraint for Box<C> {
    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn group(&self) -> &str {
        (**self).group()
    }

    fn instructions(&self, mode: InstructionMode) -> String {
        (**self).instructions(mode)
    }

    fn rewrite_instructions(&self) -> String {
        (**self).rewrite_instructions()
    }

    fn competitives(&self) -> BTreeSet<String> {
        (**self).competitives()
    }

    fn evaluate<'a>(&'a self, value: &'a str) -> Evaluation<'a> {
        (**self).evaluate(value)
    }
}
