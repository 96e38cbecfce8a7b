//! Raw submitted values, as read from the request.
//!
//! All of this is untrusted input. Its shape depends on the addon type: a
//! scalar for text and uploads, a scalar or sequence for list selections.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A submitted value: a scalar or an (arbitrarily nested) sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SubmittedValue {
    Scalar(String),
    Sequence(Vec<SubmittedValue>),
}

impl SubmittedValue {
    /// Empty string or empty sequence.
    pub fn is_empty(&self) -> bool {
        match self {
            SubmittedValue::Scalar(s) => s.is_empty(),
            SubmittedValue::Sequence(items) => items.is_empty(),
        }
    }

    /// The scalar, or the first scalar of a sequence.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            SubmittedValue::Scalar(s) => Some(s),
            SubmittedValue::Sequence(items) => items.first().and_then(Self::as_scalar),
        }
    }
}

impl From<&str> for SubmittedValue {
    fn from(s: &str) -> Self {
        SubmittedValue::Scalar(s.to_string())
    }
}

impl From<String> for SubmittedValue {
    fn from(s: String) -> Self {
        SubmittedValue::Scalar(s)
    }
}

impl<T: Into<SubmittedValue>> From<Vec<T>> for SubmittedValue {
    fn from(items: Vec<T>) -> Self {
        SubmittedValue::Sequence(items.into_iter().map(Into::into).collect())
    }
}

/// Request data is stringly typed: numbers and booleans become their text,
/// keyed collections keep only their values, null is empty.
impl From<Value> for SubmittedValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => SubmittedValue::Scalar(String::new()),
            Value::Bool(b) => SubmittedValue::Scalar(if b { "1".into() } else { String::new() }),
            Value::Number(n) => SubmittedValue::Scalar(n.to_string()),
            Value::String(s) => SubmittedValue::Scalar(s),
            Value::Array(items) => {
                SubmittedValue::Sequence(items.into_iter().map(Self::from).collect())
            }
            Value::Object(map) => {
                SubmittedValue::Sequence(map.into_iter().map(|(_, v)| Self::from(v)).collect())
            }
        }
    }
}

impl<'de> Deserialize<'de> for SubmittedValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from)
    }
}

/// An uploaded file waiting in temporary storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Client-supplied file name. Empty when the input was left blank.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Where the bytes currently are.
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, size: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            size,
            path: path.into(),
            content_type: None,
        }
    }

    /// Describe an existing file on disk, named after its last path component.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, metadata.len(), path))
    }

    /// A blank file input still submits an entry, just with no name.
    pub fn is_present(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Everything submitted for one addon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<SubmittedValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileEntry>,
}

impl Submission {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn value(value: impl Into<SubmittedValue>) -> Self {
        Self {
            value: Some(value.into()),
            file: None,
        }
    }

    pub fn file(file: FileEntry) -> Self {
        Self {
            value: None,
            file: Some(file),
        }
    }

    pub fn with_value(mut self, value: impl Into<SubmittedValue>) -> Self {
        self.value = Some(value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_shapes() {
        assert_eq!(
            SubmittedValue::from(json!("gift-wrap")),
            SubmittedValue::from("gift-wrap")
        );
        assert_eq!(SubmittedValue::from(json!(3)), SubmittedValue::from("3"));
        assert_eq!(
            SubmittedValue::from(json!(["a", ["b"]])),
            SubmittedValue::Sequence(vec!["a".into(), SubmittedValue::from(vec!["b"])])
        );
        assert!(SubmittedValue::from(json!(null)).is_empty());
        assert!(SubmittedValue::from(json!([])).is_empty());
    }

    #[test]
    fn test_keyed_collection_keeps_values() {
        let value = SubmittedValue::from(json!({"0": "red", "1": "blue"}));
        assert_eq!(value, SubmittedValue::from(vec!["red", "blue"]));
    }

    #[test]
    fn test_keyed_collection_keeps_submission_order() {
        let value = SubmittedValue::from(json!({"b": "x", "a": ["y"]}));
        assert_eq!(
            value,
            SubmittedValue::Sequence(vec!["x".into(), SubmittedValue::from(vec!["y"])])
        );
        assert_eq!(value.as_scalar(), Some("x"));

        let numbered = SubmittedValue::from(json!({"2": "second", "10": "tenth"}));
        assert_eq!(numbered, SubmittedValue::from(vec!["second", "tenth"]));
    }

    #[test]
    fn test_as_scalar() {
        assert_eq!(SubmittedValue::from("x").as_scalar(), Some("x"));
        assert_eq!(SubmittedValue::from(vec!["y", "z"]).as_scalar(), Some("y"));
        assert_eq!(SubmittedValue::Sequence(vec![]).as_scalar(), None);
    }

    #[test]
    fn test_file_entry_presence() {
        assert!(FileEntry::new("photo.png", 10, "/tmp/php123").is_present());
        assert!(!FileEntry::new("  ", 0, "").is_present());
    }

    #[test]
    fn test_file_entry_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logo.svg");
        std::fs::write(&path, b"<svg/>").unwrap();

        let entry = FileEntry::from_path(&path).unwrap();
        assert_eq!(entry.name, "logo.svg");
        assert_eq!(entry.size, 6);
        assert_eq!(entry.path, path);
    }

    #[test]
    fn test_submission_deserializes() {
        let submission: Submission =
            serde_json::from_value(json!({"value": ["gift-wrap", "card"]})).unwrap();
        assert_eq!(
            submission.value,
            Some(SubmittedValue::from(vec!["gift-wrap", "card"]))
        );
        assert!(submission.file.is_none());
    }
}
