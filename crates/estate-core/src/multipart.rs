//! Multipart payload construction
//!
//! A form is submitted as one JSON text part named [`DATA_PART`] holding every
//! non-file value, plus one binary part per freshly chosen file. The binary
//! part is named after where the file sits in the form tree, for example
//! `coverImage` or `floorPlans[1].image`. Row indexes in those names count
//! only the rows that are actually sent, since blank placeholder rows are
//! dropped first.
//!
//! Files the backend already stores are never re-uploaded. With
//! [`PayloadOptions::preserve_existing`] set their reference is written into
//! the JSON as a string; otherwise the key is left out and the server keeps
//! what it has.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::file_field::{FileField, PendingUpload};
use crate::record_array::{ChildRecord, RecordArray};
use crate::tags::clean_tags;

/// Name of the JSON text part
pub const DATA_PART: &str = "data";

/// Caller-controlled serialization switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadOptions {
    /// Echo references to already stored files inside the JSON part
    pub preserve_existing: bool,
}

impl Default for PayloadOptions {
    fn default() -> Self {
        Self {
            preserve_existing: true,
        }
    }
}

/// One binary part of the request
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Multipart field name, derived from the file's position in the form
    pub name: String,
    pub upload: Arc<PendingUpload>,
}

/// Transport-ready description of a form submission
#[derive(Debug, Clone)]
pub struct MultipartPayload {
    pub data: Value,
    pub files: Vec<FilePart>,
}

impl MultipartPayload {
    /// Build a payload by writing the root object with `f`
    pub fn build(options: PayloadOptions, f: impl FnOnce(&mut ObjectWriter<'_>)) -> Self {
        let mut files = Vec::new();
        let map = {
            let mut root = ObjectWriter::new(String::new(), &mut files, options);
            f(&mut root);
            root.into_map()
        };
        Self {
            data: Value::Object(map),
            files,
        }
    }

    /// JSON text of the data part
    pub fn data_text(&self) -> String {
        self.data.to_string()
    }

    pub fn part_names(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.name.as_str()).collect()
    }

    /// Total size of all binary parts
    pub fn upload_bytes(&self) -> usize {
        self.files.iter().map(|f| f.upload.len()).sum()
    }
}

/// Writes one JSON object and collects the file parts found inside it
pub struct ObjectWriter<'a> {
    prefix: String,
    map: Map<String, Value>,
    files: &'a mut Vec<FilePart>,
    options: PayloadOptions,
}

impl<'a> ObjectWriter<'a> {
    fn new(prefix: String, files: &'a mut Vec<FilePart>, options: PayloadOptions) -> Self {
        Self {
            prefix,
            map: Map::new(),
            files,
            options,
        }
    }

    fn into_map(self) -> Map<String, Value> {
        self.map
    }

    fn part_name(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Write a string value as-is
    pub fn text(&mut self, key: &str, value: &str) -> &mut Self {
        self.map
            .insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    /// Write a string value, or `null` when it is blank
    pub fn optional_text(&mut self, key: &str, value: &str) -> &mut Self {
        let value = value.trim();
        let json = if value.is_empty() {
            Value::Null
        } else {
            Value::String(value.to_string())
        };
        self.map.insert(key.to_string(), json);
        self
    }

    /// Write any JSON value (numbers, flags, `null`)
    pub fn value(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.map.insert(key.to_string(), value.into());
        self
    }

    /// Write a tag list after cleaning it
    pub fn tags(&mut self, key: &str, tags: &[String]) -> &mut Self {
        let cleaned = clean_tags(tags).into_iter().map(Value::String).collect();
        self.map.insert(key.to_string(), Value::Array(cleaned));
        self
    }

    /// Write a file field
    pub fn file(&mut self, key: &str, field: &FileField) -> &mut Self {
        match field {
            FileField::Empty => {
                self.map.insert(key.to_string(), Value::Null);
            }
            FileField::Pending(upload) => {
                let name = self.part_name(key);
                self.files.push(FilePart {
                    name,
                    upload: Arc::clone(upload),
                });
            }
            FileField::Persisted(reference) => {
                if self.options.preserve_existing {
                    self.map
                        .insert(key.to_string(), Value::String(reference.clone()));
                }
            }
        }
        self
    }

    /// Write a nested object
    pub fn object(&mut self, key: &str, f: impl FnOnce(&mut ObjectWriter<'_>)) -> &mut Self {
        let prefix = format!("{}{}.", self.prefix, key);
        let map = {
            let mut child = ObjectWriter::new(prefix, self.files, self.options);
            f(&mut child);
            child.into_map()
        };
        self.map.insert(key.to_string(), Value::Object(map));
        self
    }

    /// Write a sub-collection, skipping blank placeholder rows
    pub fn rows<T: ChildRecord>(&mut self, key: &str, rows: &RecordArray<T>) -> &mut Self {
        let mut items = Vec::new();
        for (index, record) in rows.persisted().enumerate() {
            let prefix = format!("{}{}[{}].", self.prefix, key, index);
            let mut child = ObjectWriter::new(prefix, self.files, self.options);
            record.write(&mut child);
            items.push(Value::Object(child.into_map()));
        }
        self.map.insert(key.to_string(), Value::Array(items));
        self
    }
}
