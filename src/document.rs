use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Media collections walked on every record, in this order.
pub const MEDIA_COLLECTIONS: [&str; 2] = ["media", "related_figures"];

pub const DEFAULT_INDENT: usize = 4;
pub const MAX_INDENT: usize = 16;

/// One top-level object of the document. Keys and their order are kept as read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    /// Media entries of the named collection. Non-array collections and
    /// non-object items are passed over.
    pub fn entries_mut<'a>(&'a mut self, collection: &str) -> impl Iterator<Item = MediaEntry<'a>> + 'a {
        self.0
            .get_mut(collection)
            .and_then(Value::as_array_mut)
            .into_iter()
            .flatten()
            .filter_map(|item| item.as_object_mut().map(MediaEntry))
    }
}

/// Typed view over a single media object.
pub struct MediaEntry<'a>(&'a mut Map<String, Value>);

impl MediaEntry<'_> {
    pub fn kind(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    pub fn is_wsi(&self) -> bool {
        self.kind() == Some("wsi")
    }

    /// `url` when set, otherwise `wsi_link`. A set but non-string link yields `None`.
    pub fn source_url(&self) -> Option<&str> {
        self.truthy("url")
            .or_else(|| self.truthy("wsi_link"))
            .and_then(Value::as_str)
    }

    pub fn has_thumbnail(&self) -> bool {
        self.0.get("path").is_some_and(is_truthy)
    }

    pub fn set_thumbnail(&mut self, thumbnail: String) {
        self.0.insert("path".to_string(), Value::String(thumbnail));
    }

    fn truthy(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| is_truthy(v))
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Read `path` as a JSON array of objects.
pub fn load(path: &Path) -> Result<Vec<Record>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let records: Vec<Record> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {} as a JSON array of objects", path.display()))?;
    tracing::info!(file = %path.display(), records = records.len(), "loaded document");
    Ok(records)
}

/// Serialise the document with `indent` spaces per level, at most [`MAX_INDENT`].
pub fn to_pretty_string(records: &[Record], indent: usize) -> Result<String> {
    if indent > MAX_INDENT {
        bail!("indent {indent} is out of range (0..={MAX_INDENT})");
    }
    let pad = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(pad.as_bytes()));
    records.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Overwrite `path` with the pretty-printed document.
pub fn save(path: &Path, records: &[Record], indent: usize) -> Result<()> {
    let body = to_pretty_string(records, indent)?;
    fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(file = %path.display(), records = records.len(), "saved document");
    Ok(())
}
