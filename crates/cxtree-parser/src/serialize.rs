//! JSON documents from record trees.
//!
//! Field order is fixed by `NodeRecord` and attribute maps are sorted, so
//! equal trees always produce byte-identical documents.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use cxtree_core::NodeRecord;

use crate::error::ParserError;

/// The record as a JSON value.
///
/// # Errors
///
/// Returns `ParserError::Serialize` if serialization fails.
pub fn to_document(record: &NodeRecord) -> Result<serde_json::Value, ParserError> {
    Ok(serde_json::to_value(record)?)
}

/// The record as JSON text, indented when `pretty`.
///
/// # Errors
///
/// Returns `ParserError::Serialize` if serialization fails.
pub fn to_json(record: &NodeRecord, pretty: bool) -> Result<String, ParserError> {
    let text = if pretty {
        serde_json::to_string_pretty(record)?
    } else {
        serde_json::to_string(record)?
    };
    Ok(text)
}

/// Stream the record to `writer`, followed by a newline.
///
/// # Errors
///
/// Returns `ParserError::Serialize` or `ParserError::Io` on failure.
pub fn write_json<W: Write>(record: &NodeRecord, mut writer: W, pretty: bool) -> Result<(), ParserError> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, record)?;
    } else {
        serde_json::to_writer(&mut writer, record)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write the document to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns `ParserError::Io` if the file cannot be created or written.
pub fn write_document(record: &NodeRecord, path: &Path, pretty: bool) -> Result<(), ParserError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    write_json(record, BufWriter::new(File::create(path)?), pretty)
}

/// `<out_dir>/<file name>.json`, e.g. `out/widget.cpp.json`.
#[must_use]
pub fn output_path(source: &Path, out_dir: &Path) -> PathBuf {
    let mut name = source
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".json");
    out_dir.join(name)
}

/// Writes one document per source into a directory, refusing to overwrite a
/// document written earlier for a different source.
#[derive(Debug, Clone)]
pub struct DocumentWriter {
    out_dir: PathBuf,
    pretty: bool,
    written: HashMap<PathBuf, PathBuf>,
}

impl DocumentWriter {
    #[must_use]
    pub fn new(out_dir: impl Into<PathBuf>, pretty: bool) -> Self {
        Self {
            out_dir: out_dir.into(),
            pretty,
            written: HashMap::new(),
        }
    }

    /// Write `record` to [`output_path`] for `source` and return the path.
    ///
    /// # Errors
    ///
    /// `OutputCollision` when another source already claimed the path;
    /// otherwise `Serialize` or `Io`.
    pub fn write(&mut self, source: &Path, record: &NodeRecord) -> Result<PathBuf, ParserError> {
        let path = output_path(source, &self.out_dir);
        if let Some(previous) = self.written.get(&path).filter(|p| p.as_path() != source) {
            return Err(ParserError::OutputCollision {
                path,
                previous: previous.clone(),
            });
        }
        write_document(record, &path, self.pretty)?;
        self.written.insert(path.clone(), source.to_path_buf());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use cxtree_core::{EnumMember, Value};
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> NodeRecord {
        let mut child = NodeRecord {
            depth: 1,
            line: 1,
            column: 5,
            tokens: vec!["int".into(), "anInt".into()],
            ..NodeRecord::default()
        };
        child.kind_attributes.insert("name".into(), Value::from("VAR_DECL"));
        child.node_attributes.insert("spelling".into(), Value::from("anInt"));
        child
            .node_attributes
            .insert("availability".into(), Value::from(EnumMember::new("AVAILABLE", 0)));
        child.type_attributes.insert("kind".into(), Value::from("INT"));
        NodeRecord {
            children: vec![child],
            ..NodeRecord::default()
        }
    }

    #[test]
    fn document_mirrors_record_shape() {
        let document = to_document(&sample()).unwrap();
        let child = &document["children"][0];
        assert_eq!(document["depth"], 0);
        assert_eq!(child["depth"], 1);
        assert_eq!(child["tokens"], serde_json::json!(["int", "anInt"]));
        assert_eq!(child["kind_attributes"]["name"], "VAR_DECL");
        assert_eq!(
            child["node_attributes"]["availability"],
            serde_json::json!({ "name": "AVAILABLE", "value": 0 })
        );
    }

    #[test]
    fn serialization_is_deterministic() {
        let first = to_json(&sample(), true).unwrap();
        let second = to_json(&sample().clone(), true).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn attribute_keys_are_sorted() {
        let json = to_json(&sample(), false).unwrap();
        let availability = json.find("\"availability\"").unwrap();
        let spelling = json.find("\"spelling\"").unwrap();
        assert!(availability < spelling);
    }

    #[test]
    fn documents_round_trip() {
        let json = to_json(&sample(), false).unwrap();
        let back: NodeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn output_path_appends_json_extension() {
        assert_eq!(
            output_path(Path::new("/src/widget.cpp"), Path::new("out")),
            PathBuf::from("out/widget.cpp.json")
        );
    }

    #[test]
    fn same_file_names_do_not_overwrite_each_other() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let mut writer = DocumentWriter::new(&out, false);
        let first = Path::new("/src/a/util.cpp");
        let second = Path::new("/src/b/util.cpp");

        let path = writer.write(first, &sample()).unwrap();
        assert_eq!(path, out.join("util.cpp.json"));

        let mut other = sample();
        other.children.clear();
        let err = writer.write(second, &other).unwrap_err();
        assert!(matches!(
            &err,
            ParserError::OutputCollision { path: p, previous } if *p == path && previous == first
        ));

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_end(), to_json(&sample(), false).unwrap());
        assert_eq!(writer.write(first, &sample()).unwrap(), path);
    }

    #[test]
    fn write_document_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/doc.json");
        write_document(&sample(), &path, false).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.trim_end(), to_json(&sample(), false).unwrap());
    }
}
