use crate::errors::JudgeError;
use crate::judge::{JudgeBackend, JudgeReply, Transport};
use crate::providers::llm::{ChatReply, LocalModel};
use std::sync::Arc;
use tracing::debug;

pub(crate) async fn ask_all(
    backend: &JudgeBackend,
    prompts: &[String],
) -> Result<Vec<JudgeReply>, JudgeError> {
    debug!(
        provider = %backend.config.provider,
        batch = prompts.len(),
        "dispatching judge batch"
    );
    // try_join_all keeps input order; the gate bounds how many run at once.
    futures::future::try_join_all(prompts.iter().map(|prompt| ask_one(backend, prompt))).await
}

/// One request. The gate permit is held until the provider call resolves,
/// fails or times out.
pub(crate) async fn ask_one(backend: &JudgeBackend, prompt: &str) -> Result<JudgeReply, JudgeError> {
    let request = backend.request_for(prompt);
    let permit = Arc::clone(&backend.gate)
        .acquire_owned()
        .await
        .map_err(|_| JudgeError::GateClosed)?;

    let call = async {
        match &backend.transport {
            Transport::Remote(client) => {
                let reply = client.complete(&request).await;
                drop(permit);
                reply
            }
            Transport::Local(model) => {
                // The permit travels with the worker so the bound also covers
                // blocking calls that outlive a timed-out caller.
                let model = Arc::clone(model);
                let request = request.clone();
                let joined = tokio::task::spawn_blocking(move || {
                    let _permit = permit;
                    model.generate(&request)
                })
                .await;
                match joined {
                    Ok(reply) => reply,
                    Err(e) => Err(JudgeError::Worker {
                        message: e.to_string(),
                    }),
                }
            }
        }
    };

    let reply: ChatReply = match backend.config.timeout() {
        Some(after) => tokio::time::timeout(after, call)
            .await
            .map_err(|_| JudgeError::Timeout {
                provider: backend.config.provider.to_string(),
                after,
            })??,
        None => call.await?,
    };

    Ok(JudgeReply {
        verdict_text: reply.text,
        raw_detail: reply.raw,
    })
}

/// Blocking-native path: call the local model on the caller's thread.
pub(crate) fn ask_local_blocking(
    backend: &JudgeBackend,
    model: &Arc<dyn LocalModel>,
    prompt: &str,
) -> Result<JudgeReply, JudgeError> {
    let request = backend.request_for(prompt);
    let _permit = futures::executor::block_on(Arc::clone(&backend.gate).acquire_owned())
        .map_err(|_| JudgeError::GateClosed)?;
    debug!(model = model.name(), "blocking local judge call");
    let reply = model.generate(&request)?;
    Ok(JudgeReply {
        verdict_text: reply.text,
        raw_detail: reply.raw,
    })
}
