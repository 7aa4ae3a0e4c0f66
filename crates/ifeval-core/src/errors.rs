//! Error taxonomy.
//!
//! Rule violations are not errors: they are returned as a failing
//! [`ConstraintEvaluation`](crate::model::ConstraintEvaluation). The types here
//! cover configuration mistakes and judge backend contract violations, which
//! propagate to the caller as hard errors.

use std::time::Duration;

/// Configuration errors, raised at construction or call time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Judge provider string not recognized.
    #[error("unknown judge provider: {provider} (expected one of: openai, local)")]
    UnknownProvider { provider: String },

    /// Instruction mode string not recognized.
    #[error("invalid instruction mode: {mode} (expected 'train' or 'test')")]
    InvalidMode { mode: String },

    /// A constructor argument is out of range or malformed.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: String, reason: String },

    /// Outbound network access is blocked by policy.
    #[error("outbound network blocked by policy (target={target}): {reason}")]
    NetworkDenied { target: String, reason: String },

    /// A required credential is not set.
    #[error("missing credential: environment variable {var} is not set")]
    MissingCredential { var: String },

    /// Config file could not be read.
    #[error("failed to read config {path}: {message}")]
    Read { path: String, message: String },

    /// Config file could not be parsed.
    #[error("failed to parse config {path}: {message}")]
    Parse { path: String, message: String },
}

impl ConfigError {
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Judge backend errors.
#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    /// The oracle's answer did not start with `true` or `false`.
    #[error("judge verdict is neither 'true' nor 'false': {reply:?}")]
    VerdictParse { reply: String },

    /// The provider call failed (transport, HTTP status, malformed body).
    #[error("judge provider '{provider}' failed: {message}")]
    Provider { provider: String, message: String },

    /// The request did not resolve within the configured timeout.
    #[error("judge provider '{provider}' timed out after {after:?}")]
    Timeout { provider: String, after: Duration },

    /// The worker running a blocking provider call panicked or was cancelled.
    #[error("judge worker failed: {message}")]
    Worker { message: String },

    /// The blocking surface was invoked from a runtime that cannot block.
    #[error("blocking judge call inside a current-thread runtime; use async_ask instead")]
    BlockingInsideRuntime,

    /// The concurrency gate was closed.
    #[error("judge concurrency gate closed")]
    GateClosed,

    /// Invalid configuration discovered while issuing a request.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl JudgeError {
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// True when the error is a backend failure rather than a misconfiguration.
    pub fn is_backend_failure(&self) -> bool {
        !matches!(self, Self::Config(_) | Self::BlockingInsideRuntime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_render_actionable_messages() {
        let err = ConfigError::UnknownProvider {
            provider: "bard".into(),
        };
        assert!(err.to_string().contains("bard"));
        assert!(err.to_string().contains("openai"));

        let err = ConfigError::invalid_argument("paragraphs", "must be positive, got 0");
        assert_eq!(
            err.to_string(),
            "invalid argument `paragraphs`: must be positive, got 0"
        );
    }

    #[test]
    fn timeout_is_backend_failure_not_config() {
        let timeout = JudgeError::Timeout {
            provider: "openai".into(),
            after: Duration::from_millis(50),
        };
        assert!(timeout.is_backend_failure());

        let config: JudgeError = ConfigError::InvalidMode { mode: "eval".into() }.into();
        assert!(!config.is_backend_failure());
    }
}
