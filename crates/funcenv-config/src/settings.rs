// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The stage settings table: which INI file is active for which stage.
//!
//! Built once per invocation from defaults plus the host-supplied settings
//! block, immutable afterwards.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use funcenv_core::FuncenvError;

/// The host-supplied settings block, keyed by this plugin's identifier in
/// the service descriptor.
///
/// Two accepted forms: an explicit stage-to-path mapping, or a
/// single-element list carrying an `autoload` directory from which every
/// `*.ini` file registers a stage named after its file stem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingsSource {
    Autoload(Vec<AutoloadEntry>),
    Files(BTreeMap<String, PathBuf>),
}

/// The `{ autoload = "<dir>" }` element of the list form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutoloadEntry {
    pub autoload: PathBuf,
}

/// Immutable mapping from stage name to INI file path.
#[derive(Debug, Clone)]
pub struct SettingsTable {
    entries: BTreeMap<String, PathBuf>,
}

impl SettingsTable {
    /// Build the table for one invocation.
    ///
    /// The active stage always gets a default entry `<base>/<stage>.ini`;
    /// host-supplied entries overlay it. Relative paths resolve against
    /// `base_dir` (the working directory in production).
    pub fn build(
        stage: &str,
        base_dir: &Path,
        source: Option<&SettingsSource>,
    ) -> Result<Self, FuncenvError> {
        let mut entries = BTreeMap::new();
        entries.insert(stage.to_string(), base_dir.join(format!("{stage}.ini")));

        match source {
            None => {}
            Some(SettingsSource::Files(files)) => {
                for (name, path) in files {
                    entries.insert(name.clone(), absolutize(base_dir, path));
                }
            }
            Some(SettingsSource::Autoload(list)) => {
                for entry in list {
                    let dir = absolutize(base_dir, &entry.autoload);
                    for (name, path) in enumerate_ini_files(&dir)? {
                        entries.insert(name, path);
                    }
                }
            }
        }

        debug!(stages = entries.len(), "settings table built");
        Ok(Self { entries })
    }

    /// The INI path registered for a stage, if any.
    pub fn path_for(&self, stage: &str) -> Option<&Path> {
        self.entries.get(stage).map(PathBuf::as_path)
    }

    /// All registered stage names.
    pub fn stages(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn absolutize(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Enumerate `<stage>.ini` files in an autoload directory.
///
/// An unreadable directory is a file-level error and therefore fatal, like
/// any other unreadable configuration input.
fn enumerate_ini_files(dir: &Path) -> Result<Vec<(String, PathBuf)>, FuncenvError> {
    let read = std::fs::read_dir(dir).map_err(|source| FuncenvError::ConfigNotFound {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut found = Vec::new();
    for entry in read {
        let entry = entry.map_err(|source| FuncenvError::ConfigNotFound {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("ini") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            found.push((stem.to_string(), path));
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn default_entry_points_at_stage_ini_under_base() {
        let table = SettingsTable::build("dev", Path::new("/srv/app"), None).unwrap();
        assert_eq!(
            table.path_for("dev"),
            Some(Path::new("/srv/app/dev.ini"))
        );
        assert_eq!(table.path_for("prod"), None);
    }

    #[test]
    fn explicit_files_overlay_the_default() {
        let mut files = BTreeMap::new();
        files.insert("dev".to_string(), PathBuf::from("conf/custom.ini"));
        files.insert("prod".to_string(), PathBuf::from("/etc/svc/prod.ini"));
        let source = SettingsSource::Files(files);

        let table = SettingsTable::build("dev", Path::new("/srv/app"), Some(&source)).unwrap();

        assert_eq!(
            table.path_for("dev"),
            Some(Path::new("/srv/app/conf/custom.ini"))
        );
        assert_eq!(table.path_for("prod"), Some(Path::new("/etc/svc/prod.ini")));
    }

    #[test]
    fn autoload_registers_one_stage_per_ini_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("dev.ini"), "A=1\n").unwrap();
        fs::write(dir.path().join("prod.ini"), "A=2\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let source = SettingsSource::Autoload(vec![AutoloadEntry {
            autoload: dir.path().to_path_buf(),
        }]);
        let table = SettingsTable::build("dev", Path::new("/srv/app"), Some(&source)).unwrap();

        let mut stages: Vec<_> = table.stages().collect();
        stages.sort_unstable();
        assert_eq!(stages, vec!["dev", "prod"]);
        assert_eq!(table.path_for("prod"), Some(dir.path().join("prod.ini").as_path()));
    }

    #[test]
    fn autoload_missing_directory_is_fatal() {
        let source = SettingsSource::Autoload(vec![AutoloadEntry {
            autoload: PathBuf::from("/nonexistent/conf"),
        }]);
        let err = SettingsTable::build("dev", Path::new("/srv/app"), Some(&source)).unwrap_err();
        assert!(matches!(err, FuncenvError::ConfigNotFound { .. }));
    }

    #[test]
    fn settings_source_deserializes_both_forms() {
        let files: SettingsSource =
            toml::from_str::<BTreeMap<String, SettingsSource>>("settings = { dev = \"dev.ini\" }")
                .unwrap()
                .remove("settings")
                .unwrap();
        assert!(matches!(files, SettingsSource::Files(_)));

        let autoload: SettingsSource = toml::from_str::<BTreeMap<String, SettingsSource>>(
            "settings = [{ autoload = \"conf/\" }]",
        )
        .unwrap()
        .remove("settings")
        .unwrap();
        assert!(matches!(autoload, SettingsSource::Autoload(_)));
    }
}
