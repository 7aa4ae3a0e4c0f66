use crate::errors::ConfigError;
use std::sync::{Mutex, OnceLock};

const POLICY_ENV: &str = "IFEVAL_NETWORK_POLICY";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NetworkPolicy {
    Allow,
    Deny(String),
}

fn state() -> &'static Mutex<NetworkPolicy> {
    static STATE: OnceLock<Mutex<NetworkPolicy>> = OnceLock::new();
    STATE.get_or_init(|| Mutex::new(NetworkPolicy::Allow))
}

/// Scoped override of the outbound policy; the previous policy is restored on drop.
pub struct NetworkPolicyGuard {
    previous: NetworkPolicy,
}

impl NetworkPolicyGuard {
    pub fn set(policy: NetworkPolicy) -> Self {
        let mut current = state().lock().unwrap_or_else(|e| e.into_inner());
        let previous = std::mem::replace(&mut *current, policy);
        Self { previous }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self::set(NetworkPolicy::Deny(reason.into()))
    }
}

impl Drop for NetworkPolicyGuard {
    fn drop(&mut self) {
        if let Ok(mut current) = state().lock() {
            *current = self.previous.clone();
        }
    }
}

/// Fails with [`ConfigError::NetworkDenied`] when outbound calls are blocked.
pub fn check_outbound(target: &str) -> Result<(), ConfigError> {
    match effective_policy() {
        NetworkPolicy::Allow => Ok(()),
        NetworkPolicy::Deny(reason) => Err(ConfigError::NetworkDenied {
            target: target.to_string(),
            reason,
        }),
    }
}

fn effective_policy() -> NetworkPolicy {
    if let Ok(raw) = std::env::var(POLICY_ENV) {
        if raw.trim().eq_ignore_ascii_case("deny") {
            return NetworkPolicy::Deny(format!("{POLICY_ENV}=deny"));
        }
    }
    state().lock().unwrap_or_else(|e| e.into_inner()).clone()
}
