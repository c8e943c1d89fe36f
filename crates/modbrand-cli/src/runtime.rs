//! Executes [`Effect`]s against the branding service.
//!
//! The TUI hands effects to [`Runtime::spawn`]; each runs as its own tokio
//! task and reports back through the completion channel, so the event loop
//! never waits on the network.

use std::path::Path;
use std::sync::Arc;

use modbrand_client::{BrandApi, Upload};
use modbrand_core::Logger;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::app::{Completion, Effect, Request, Response};

/// Run one effect to completion.
pub async fn execute(api: &dyn BrandApi, effect: Effect) -> Completion {
    let response = match effect.request {
        Request::ProbeSession(kind) => Response::Session(kind, api.session().await),
        Request::FetchImages => Response::Images(api.list_images().await),
        Request::FetchPending => Response::Pending(api.list_pending().await),
        Request::LoadFile(path) => Response::FileLoaded(load_upload(&path).await),
        Request::Submit(upload) => Response::Submitted(api.submit(&upload).await),
        Request::Accept(id) => {
            let result = api.accept(&id).await;
            Response::Accepted(id, result)
        }
        Request::Reject(id) => {
            let result = api.delete(&id).await;
            Response::Rejected(id, result)
        }
        Request::Delete(id) => {
            let result = api.delete(&id).await;
            Response::Deleted(id, result)
        }
        Request::Verify(user_id) => {
            let result = api.verify_user(&user_id).await;
            Response::Verified(user_id, result)
        }
        Request::Logout => Response::LoggedOut(api.logout().await),
    };
    Completion {
        mount: effect.mount,
        response,
    }
}

/// Read a local file into an [`Upload`] named after its final component.
pub async fn load_upload(path: &Path) -> Result<Upload, String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| format!("{}: {e}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| format!("{}: not a file", path.display()))?;
    Ok(Upload::new(file_name, bytes))
}

/// Spawns effects and forwards their completions to the event loop.
#[derive(Clone)]
pub struct Runtime {
    api: Arc<dyn BrandApi>,
    tx: mpsc::Sender<Completion>,
    log: Logger,
}

impl Runtime {
    pub const fn new(api: Arc<dyn BrandApi>, tx: mpsc::Sender<Completion>, log: Logger) -> Self {
        Self { api, tx, log }
    }

    pub fn spawn(&self, effects: Vec<Effect>) {
        for effect in effects {
            debug!(parent: self.log.span(), request = ?effect.request, mount = ?effect.mount, "Spawning request");
            let api = Arc::clone(&self.api);
            let tx = self.tx.clone();
            let span = self.log.span().clone();
            tokio::spawn(async move {
                let completion = execute(api.as_ref(), effect).await;
                if tx.send(completion).await.is_err() {
                    warn!(parent: &span, "Event loop gone, dropping completion");
                }
            });
        }
    }
}

/// Execute effects one after another, feeding each completion back into
/// `app`, until nothing is left to do.
#[cfg(test)]
pub async fn settle(app: &mut crate::app::App, api: &dyn BrandApi, effects: Vec<Effect>) -> usize {
    let mut queue: std::collections::VecDeque<Effect> = effects.into();
    let mut executed = 0;
    while let Some(effect) = queue.pop_front() {
        executed += 1;
        let completion = execute(api, effect).await;
        queue.extend(app.handle_completion(completion));
    }
    executed
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
