//! # estate-core - Core Domain Types
//!
//! Foundation crate for Estate Admin. Provides error handling, logging, the
//! persisted entity shapes, and the building blocks every form is made of.
//!
//! This crate has **zero internal dependencies**.
//!
//! ## Public API
//!
//! ### Entities (`entity`)
//! - [`EntityKind`] - One of the managed collections (banners, blogs, plots, ...)
//! - [`Entity`] - A decoded record of any collection
//!
//! ### Form building blocks
//! - [`RecordArray`] - Never-empty sub-collection of child records keyed by [`RowId`]
//! - [`ChildRecord`] - Field access and serialization for one row type
//! - [`FileField`] - Empty / pending upload / persisted reference
//! - [`MultipartPayload`] - JSON data part plus binary file parts
//! - [`clean_tags`] - Normalization of free-text tag lists
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use estate_core::prelude::*;
//! ```

pub mod entity;
pub mod error;
pub mod file_field;
pub mod logging;
pub mod multipart;
pub mod prelude;
pub mod record_array;
pub mod tags;

// Re-export commonly used types at crate root for convenience
pub use entity::{Entity, EntityKind, EntitySummary};
pub use error::{Error, Result, ResultExt};
pub use file_field::{
    content_type_for, format_size, FileField, PendingUpload, PreviewHandle, PreviewRegistry,
};
pub use multipart::{FilePart, MultipartPayload, ObjectWriter, PayloadOptions, DATA_PART};
pub use record_array::{
    next_row_id, ChildRecord, FieldKind, FieldSpec, FieldValue, RecordArray, Row, RowId,
};
pub use tags::{clean_tag, clean_tags, format_tags, parse_tag_input};
