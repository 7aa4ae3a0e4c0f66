//! Judge internals, split by responsibility:
//! - client.rs: gate, timeout and transport dispatch
//! - bridge.rs: driving async work from blocking callers
//! - prompt.rs: prompt builders and constants only
//! - verdict.rs: verdict parsing and interpretation
//! - reasoning.rs: provider-aware reasoning extraction

pub(crate) mod bridge;
pub(crate) mod client;
pub(crate) mod prompt;
pub(crate) mod reasoning;
pub(crate) mod verdict;
