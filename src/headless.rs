//! Headless commands - JSON output for scripts
//!
//! Output is NDJSON (newline-delimited JSON), one event per line, each with an
//! `"event"` field naming its type.
//!
//! ```json
//! {"event":"record","collection":"plots","record":{"id":"p1","title":"Hill view"}}
//! {"event":"listed","collection":"plots","count":1}
//! ```

use std::io::Write;

use estate_api::AdminBackend;
use estate_core::prelude::*;
use estate_core::EntityKind;
use serde::Serialize;
use serde_json::Value;

/// Events emitted by headless commands
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// One record of a listed collection
    Record {
        collection: &'static str,
        record: Value,
    },

    /// End of a listing
    Listed {
        collection: &'static str,
        count: usize,
    },

    Deleted {
        collection: &'static str,
        id: String,
    },
}

impl HeadlessEvent {
    /// Write as one JSON line
    pub fn emit(&self, out: &mut impl Write) -> Result<()> {
        let json = serde_json::to_string(self)?;
        writeln!(out, "{}", json)?;
        out.flush()?;
        Ok(())
    }
}

/// Print every record of `kind`
pub async fn list<B: AdminBackend>(
    backend: &B,
    kind: EntityKind,
    out: &mut impl Write,
) -> Result<()> {
    let records = backend.list(kind).await?;
    info!("Listing {} {}", records.len(), kind);

    for entity in &records {
        HeadlessEvent::Record {
            collection: kind.collection(),
            record: entity.to_json()?,
        }
        .emit(out)?;
    }
    HeadlessEvent::Listed {
        collection: kind.collection(),
        count: records.len(),
    }
    .emit(out)
}

/// Delete one record; fails without a stored login
pub async fn delete<B: AdminBackend>(
    backend: &B,
    kind: EntityKind,
    id: &str,
    out: &mut impl Write,
) -> Result<()> {
    backend.delete(kind, id).await?;
    info!("Deleted {} {}", kind, id);
    HeadlessEvent::Deleted {
        collection: kind.collection(),
        id: id.to_string(),
    }
    .emit(out)
}
