use crate::errors::JudgeError;
use std::future::Future;
use tokio::runtime::{Handle, RuntimeFlavor};

/// Drive `fut` to completion from synchronous code.
///
/// Inside a multi-thread runtime the current worker is handed over with
/// `block_in_place`; outside any runtime a private current-thread runtime is
/// started. A current-thread runtime cannot block on itself.
pub(crate) fn block_on<F: Future>(fut: F) -> Result<F::Output, JudgeError> {
    match Handle::try_current() {
        Ok(handle) => match handle.runtime_flavor() {
            RuntimeFlavor::CurrentThread => Err(JudgeError::BlockingInsideRuntime),
            _ => Ok(tokio::task::block_in_place(|| handle.block_on(fut))),
        },
        Err(_) => {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| JudgeError::Worker {
                    message: format!("failed to start runtime: {e}"),
                })?;
            Ok(rt.block_on(fut))
        }
    }
}
