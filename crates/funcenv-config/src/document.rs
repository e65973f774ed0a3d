// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stage configuration documents parsed from INI text.
//!
//! Document structure (sections, key/value splitting, comments) is the
//! `rust-ini` library's business; this module only classifies raw values
//! and preserves document order. Documents are produced fresh on every
//! load and never cached, so external edits between a load and a push are
//! observed.

use std::fs;
use std::path::Path;

use ini::Ini;
use tracing::error;

use funcenv_core::{FuncenvError, ScalarValue};

/// An ordered INI document split into global scalars and named sections.
#[derive(Debug, Clone, Default)]
pub struct ConfigDocument {
    globals: Vec<(String, ScalarValue)>,
    sections: Vec<(String, Vec<(String, ScalarValue)>)>,
}

impl ConfigDocument {
    /// Parse INI text into a classified document.
    pub fn parse(text: &str) -> Result<Self, FuncenvError> {
        let ini = Ini::load_from_str(text)
            .map_err(|e| FuncenvError::Config(format!("malformed ini document: {e}")))?;

        let mut doc = ConfigDocument::default();
        for (section, properties) in ini.iter() {
            let entries: Vec<(String, ScalarValue)> = properties
                .iter()
                .map(|(key, raw)| (key.to_string(), ScalarValue::classify(raw)))
                .collect();
            match section {
                None => doc.globals.extend(entries),
                Some(name) => doc.sections.push((name.to_string(), entries)),
            }
        }
        Ok(doc)
    }

    /// Top-level scalar entries, in document order.
    pub fn globals(&self) -> impl Iterator<Item = (&str, &ScalarValue)> {
        self.globals.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Bracketed sections with their entries, in document order. The
    /// section key may name several comma-separated functions.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &[(String, ScalarValue)])> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// True when the document declares neither globals nor sections.
    pub fn is_empty(&self) -> bool {
        self.globals.is_empty() && self.sections.is_empty()
    }
}

/// Read and parse a stage configuration file.
///
/// An unreadable file is fatal to the whole load attempt, unlike every
/// per-function condition downstream.
pub fn load_document(path: &Path) -> Result<ConfigDocument, FuncenvError> {
    let text = fs::read_to_string(path).map_err(|source| {
        error!(path = %path.display(), "can not find config file");
        FuncenvError::ConfigNotFound {
            path: path.to_path_buf(),
            source,
        }
    })?;
    ConfigDocument::parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_globals_and_sections_in_order() {
        let doc = ConfigDocument::parse("A=1\nB=two\n\n[foo]\nC=3\n\n[bar,baz]\nD=4\n").unwrap();

        let globals: Vec<_> = doc.globals().map(|(k, _)| k).collect();
        assert_eq!(globals, vec!["A", "B"]);

        let sections: Vec<_> = doc.sections().map(|(k, _)| k).collect();
        assert_eq!(sections, vec!["foo", "bar,baz"]);
    }

    #[test]
    fn parse_classifies_values() {
        let doc = ConfigDocument::parse("PORT=8080\nDEBUG=true\nNAME=svc\n").unwrap();
        let values: Vec<_> = doc.globals().map(|(_, v)| v.clone()).collect();
        assert!(matches!(values[0], ScalarValue::Num { .. }));
        assert_eq!(values[1], ScalarValue::Bool(true));
        assert_eq!(values[2], ScalarValue::Str("svc".to_string()));
    }

    #[test]
    fn empty_document_is_valid() {
        let doc = ConfigDocument::parse("").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn sectionless_document_is_valid() {
        let doc = ConfigDocument::parse("A=1\nB=2\n").unwrap();
        assert_eq!(doc.globals().count(), 2);
        assert_eq!(doc.sections().count(), 0);
    }

    #[test]
    fn load_document_missing_file_is_config_not_found() {
        let err = load_document(Path::new("/nonexistent/dir/dev.ini")).unwrap_err();
        assert!(matches!(err, FuncenvError::ConfigNotFound { .. }));
    }

    #[test]
    fn load_document_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "KEY=value\n[fn1]\nLOCAL=1\n").unwrap();

        let doc = load_document(file.path()).unwrap();
        assert_eq!(doc.globals().count(), 1);
        assert_eq!(doc.sections().count(), 1);
    }
}
