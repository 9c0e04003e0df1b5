//! File-valued form fields
//!
//! A file field is always in exactly one of three states: nothing chosen, a
//! freshly chosen local file waiting to be uploaded, or a reference to a file
//! the backend already stores. Renderers and the multipart writer match on
//! [`FileField`] exhaustively.
//!
//! Pending uploads hold a [`PreviewHandle`] acquired from a
//! [`PreviewRegistry`]. The handle is released when the last copy of the
//! upload is dropped, which happens when its row is removed or the form is
//! reset.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Value of a file field in a form
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FileField {
    /// No file chosen and nothing stored
    #[default]
    Empty,
    /// Locally chosen file, sent as its own multipart part on submit
    Pending(Arc<PendingUpload>),
    /// URL or path of a file the backend already stores
    Persisted(String),
}

impl FileField {
    /// Build a field from a reference found in a persisted entity
    ///
    /// Missing and blank references both hydrate to [`FileField::Empty`].
    pub fn from_reference(reference: Option<&str>) -> Self {
        match reference.map(str::trim) {
            Some(r) if !r.is_empty() => FileField::Persisted(r.to_string()),
            _ => FileField::Empty,
        }
    }

    pub fn pending(upload: PendingUpload) -> Self {
        FileField::Pending(Arc::new(upload))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FileField::Empty)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, FileField::Pending(_))
    }

    /// Stored reference, if the field points at an existing file
    pub fn persisted_ref(&self) -> Option<&str> {
        match self {
            FileField::Persisted(r) => Some(r.as_str()),
            _ => None,
        }
    }

    /// Short description for list and form rendering
    pub fn label(&self) -> String {
        match self {
            FileField::Empty => "(no file)".to_string(),
            FileField::Pending(upload) => {
                format!("new: {} ({})", upload.file_name, format_size(upload.len()))
            }
            FileField::Persisted(reference) => format!("existing: {}", reference),
        }
    }
}

/// A file chosen locally and not yet uploaded
pub struct PendingUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    preview: Option<PreviewHandle>,
}

impl PendingUpload {
    /// Create an upload without a preview handle
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
            preview: None,
        }
    }

    /// Create an upload that holds a preview handle from `registry`
    pub fn with_preview(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
        registry: &PreviewRegistry,
    ) -> Self {
        let file_name = file_name.into();
        let preview = registry.acquire(&file_name);
        Self {
            file_name,
            content_type: content_type.into(),
            bytes,
            preview: Some(preview),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn preview_id(&self) -> Option<u64> {
        self.preview.as_ref().map(|p| p.id)
    }
}

impl fmt::Debug for PendingUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .field("preview", &self.preview_id())
            .finish()
    }
}

impl PartialEq for PendingUpload {
    fn eq(&self, other: &Self) -> bool {
        self.file_name == other.file_name
            && self.content_type == other.content_type
            && self.bytes == other.bytes
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Preview handles
// ─────────────────────────────────────────────────────────────────────────────

static PREVIEW_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Tracks preview handles that are still alive
///
/// Cloning shares the same registry.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    live: Arc<Mutex<BTreeMap<u64, String>>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a handle; it is released when dropped
    pub fn acquire(&self, label: &str) -> PreviewHandle {
        let id = PREVIEW_ID_COUNTER.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut live) = self.live.lock() {
            live.insert(id, label.to_string());
        }
        PreviewHandle {
            id,
            registry: self.clone(),
        }
    }

    /// Number of handles not yet released
    pub fn live_count(&self) -> usize {
        self.live.lock().map(|live| live.len()).unwrap_or(0)
    }

    /// Labels of live handles, oldest first
    pub fn live_labels(&self) -> Vec<String> {
        self.live
            .lock()
            .map(|live| live.values().cloned().collect())
            .unwrap_or_default()
    }

    fn release(&self, id: u64) {
        if let Ok(mut live) = self.live.lock() {
            live.remove(&id);
        }
    }
}

/// Scoped preview of a pending upload
pub struct PreviewHandle {
    id: u64,
    registry: PreviewRegistry,
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.registry.release(self.id);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Guess a MIME type from a file extension
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("avif") => "image/avif",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Human-readable byte count
pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}
