//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every task reports back through the message channel. Results travel as
//! the user-facing error string; an authentication failure additionally
//! sends [`Message::SessionExpired`].

use std::path::Path;
use std::sync::Arc;

use estate_api::{AdminBackend, AuthContext};
use estate_core::prelude::*;
use estate_core::{content_type_for, format_size, FileField, PendingUpload, PreviewRegistry};
use tokio::sync::mpsc;

use crate::handler::{ListFetch, UpdateAction};
use crate::message::Message;

/// Everything background tasks need besides the channel
pub struct Services<B> {
    pub backend: Arc<B>,
    pub auth: AuthContext,
    pub previews: PreviewRegistry,
}

impl<B> Clone for Services<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            auth: self.auth.clone(),
            previews: self.previews.clone(),
        }
    }
}

impl<B> Services<B> {
    pub fn new(backend: B, auth: AuthContext, previews: PreviewRegistry) -> Self {
        Self {
            backend: Arc::new(backend),
            auth,
            previews,
        }
    }
}

/// Execute an action by spawning a background task
pub fn handle_action<B>(action: UpdateAction, msg_tx: mpsc::Sender<Message>, services: Services<B>)
where
    B: AdminBackend + Sync + 'static,
{
    match action {
        UpdateAction::FetchLists(fetches) => {
            for fetch in fetches {
                tokio::spawn(fetch_list(fetch, msg_tx.clone(), services.clone()));
            }
        }

        UpdateAction::FetchRecord { kind, id } => {
            tokio::spawn(async move {
                let result = services.backend.fetch(kind, &id).await;
                let result = check_auth(&msg_tx, result);
                let _ = msg_tx
                    .send(Message::RecordLoaded { kind, id, result })
                    .await;
            });
        }

        UpdateAction::Submit {
            kind,
            id,
            generation,
            payload,
        } => {
            tokio::spawn(async move {
                info!(
                    "Submitting {} {} ({} file parts)",
                    kind,
                    id.as_deref().unwrap_or("(new)"),
                    payload.files.len()
                );
                let result = match &id {
                    Some(id) => services.backend.update(kind, id, payload).await,
                    None => services.backend.create(kind, payload).await,
                };
                let result = check_auth(&msg_tx, result.map(|_| ()));
                let _ = msg_tx
                    .send(Message::SubmitCompleted {
                        kind,
                        generation,
                        result,
                    })
                    .await;
            });
        }

        UpdateAction::Delete { kind, id } => {
            tokio::spawn(async move {
                let result = services.backend.delete(kind, &id).await;
                let result = check_auth(&msg_tx, result);
                let _ = msg_tx
                    .send(Message::DeleteCompleted { kind, id, result })
                    .await;
            });
        }

        UpdateAction::LoadFile {
            kind,
            field,
            path,
            max_bytes,
        } => {
            tokio::spawn(async move {
                let result = load_file(&path, max_bytes, &services.previews)
                    .await
                    .map_err(|e| e.user_message());
                let _ = msg_tx
                    .send(Message::FileLoaded {
                        kind,
                        field,
                        path,
                        result,
                    })
                    .await;
            });
        }

        UpdateAction::Login { email, password } => {
            tokio::spawn(async move {
                let result = match services.backend.login(&email, &password).await {
                    Ok(token) => {
                        if let Err(e) = services.auth.set_token(token) {
                            warn!("Logged in, but the token could not be saved: {}", e);
                        }
                        Ok(())
                    }
                    Err(e) => Err(e.user_message()),
                };
                let _ = msg_tx.send(Message::LoginCompleted(result)).await;
            });
        }

        UpdateAction::Logout => {
            if let Err(e) = services.auth.invalidate() {
                warn!("Failed to remove stored token: {}", e);
            }
        }

        UpdateAction::SendChat { message } => {
            tokio::spawn(async move {
                let result = services.backend.chat(&message).await;
                let result = check_auth(&msg_tx, result);
                let _ = msg_tx.send(Message::ChatReply(result)).await;
            });
        }
    }
}

/// One request per collection, fanned out to every waiting view
async fn fetch_list<B>(fetch: ListFetch, msg_tx: mpsc::Sender<Message>, services: Services<B>)
where
    B: AdminBackend + Sync + 'static,
{
    let ListFetch { kind, subscribers } = fetch;
    let result = services.backend.list(kind).await;
    if let Ok(records) = &result {
        debug!("Fetched {} {}", records.len(), kind);
    }
    let result = check_auth(&msg_tx, result);
    for (owner, generation) in subscribers {
        let _ = msg_tx
            .send(Message::ListLoaded {
                kind,
                owner,
                generation,
                result: result.clone(),
            })
            .await;
    }
}

/// Render the error for display, reporting auth failures on the side
fn check_auth<T>(
    msg_tx: &mpsc::Sender<Message>,
    result: Result<T>,
) -> std::result::Result<T, String> {
    result.map_err(|e| {
        if e.is_auth() {
            let _ = msg_tx.try_send(Message::SessionExpired);
        } else if e.is_recoverable() {
            debug!("Request failed: {}", e);
        } else {
            warn!("Request failed: {:?}", e);
        }
        e.user_message()
    })
}

/// Read a local file into a pending upload, holding a preview handle
pub async fn load_file(
    path: &Path,
    max_bytes: u64,
    previews: &PreviewRegistry,
) -> Result<FileField> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| Error::attachment(path, e.to_string()))?;
    if !metadata.is_file() {
        return Err(Error::attachment(path, "not a regular file"));
    }
    if metadata.len() > max_bytes {
        return Err(Error::attachment(
            path,
            format!(
                "{} exceeds the {} upload limit",
                format_size(metadata.len() as usize),
                format_size(max_bytes as usize)
            ),
        ));
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| Error::attachment(path, e.to_string()))?;
    let file_name = file_name(path);
    debug!("Loaded {} ({})", file_name, format_size(bytes.len()));
    Ok(FileField::pending(PendingUpload::with_preview(
        file_name,
        content_type_for(path),
        bytes,
        previews,
    )))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
