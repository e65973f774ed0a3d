// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manifest and the host-CLI command surface.
//!
//! The manifest describes this plugin to the host framework: identity,
//! the lifecycle events it subscribes to, and the descriptor keys it
//! reads. The command manifest is the tree of commands the host registers
//! on the plugin's behalf.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use funcenv_core::FuncenvError;

use crate::hooks::HookEvent;

/// Parsed plugin manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Unique plugin name.
    pub name: String,
    /// Semantic version string.
    pub version: String,
    /// Human-readable description.
    pub description: String,
    /// Optional author identifier.
    pub author: Option<String>,
    /// Lifecycle events the plugin subscribes to.
    pub lifecycle_events: Vec<String>,
    /// Descriptor keys the plugin reads (e.g., `settings`).
    pub config_keys: Vec<String>,
}

/// Intermediate TOML deserialization struct for `plugin.toml`.
#[derive(Debug, Deserialize)]
struct PluginManifestFile {
    plugin: PluginSection,
}

/// The `[plugin]` section of a `plugin.toml` file.
#[derive(Debug, Deserialize)]
struct PluginSection {
    name: String,
    version: String,
    description: String,
    author: Option<String>,
    #[serde(default)]
    lifecycle_events: Vec<String>,
    #[serde(default)]
    config_keys: Vec<String>,
}

/// Parse a plugin manifest from TOML content.
///
/// Validates that name is non-empty, the version parses as semver, and
/// every subscribed lifecycle event is one the dispatcher knows.
pub fn parse_plugin_manifest(toml_content: &str) -> Result<PluginManifest, FuncenvError> {
    let file: PluginManifestFile = toml::from_str(toml_content)
        .map_err(|e| FuncenvError::Config(format!("invalid plugin manifest: {e}")))?;

    let section = file.plugin;

    if section.name.is_empty() {
        return Err(FuncenvError::Config(
            "plugin manifest: name must not be empty".to_string(),
        ));
    }

    semver::Version::parse(&section.version).map_err(|e| {
        FuncenvError::Config(format!(
            "plugin manifest: version `{}` is not valid semver: {e}",
            section.version
        ))
    })?;

    for event in &section.lifecycle_events {
        HookEvent::from_str(event).map_err(|_| {
            FuncenvError::Config(format!(
                "plugin manifest: unknown lifecycle event `{event}`"
            ))
        })?;
    }

    Ok(PluginManifest {
        name: section.name,
        version: section.version,
        description: section.description,
        author: section.author,
        lifecycle_events: section.lifecycle_events,
        config_keys: section.config_keys,
    })
}

/// The compiled-in manifest for this plugin.
pub fn builtin_manifest() -> PluginManifest {
    PluginManifest {
        name: "funcenv".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "INI-driven environment injection for serverless functions".to_string(),
        author: Some("Funcenv Contributors".to_string()),
        lifecycle_events: vec![
            HookEvent::UpdateAll.to_string(),
            HookEvent::UpdateFunction.to_string(),
            HookEvent::OfflineStart.to_string(),
        ],
        config_keys: vec!["settings".to_string(), "gateway".to_string()],
    }
}

/// One option of a host-CLI command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOption {
    pub name: String,
    pub usage: String,
    pub shortcut: Option<char>,
}

/// One node of the host-CLI command tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub name: String,
    pub usage: String,
    pub lifecycle_events: Vec<String>,
    pub options: Vec<CommandOption>,
    pub subcommands: Vec<CommandSpec>,
}

/// The command tree the host registers for this plugin: a top-level
/// `update-environments` command with a nested `function` subcommand.
pub fn command_manifest() -> CommandSpec {
    CommandSpec {
        name: "update-environments".to_string(),
        usage: "Update all function environments".to_string(),
        lifecycle_events: vec!["update-environments".to_string(), "init".to_string()],
        options: vec![
            CommandOption {
                name: "stage".to_string(),
                usage: "Stage of the service".to_string(),
                shortcut: Some('s'),
            },
            CommandOption {
                name: "function".to_string(),
                usage: "Update a single function's environment vars".to_string(),
                shortcut: Some('f'),
            },
        ],
        subcommands: vec![CommandSpec {
            name: "function".to_string(),
            usage: "Update a single function's environment vars".to_string(),
            lifecycle_events: vec!["init".to_string(), "end".to_string()],
            options: vec![CommandOption {
                name: "function".to_string(),
                usage: "Name of the function".to_string(),
                shortcut: Some('f'),
            }],
            subcommands: vec![],
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_manifest() {
        let toml = r#"
[plugin]
name = "funcenv"
version = "0.1.0"
description = "INI-driven environment injection"
author = "Funcenv Contributors"
lifecycle_events = ["update-environments:init", "before:offline:start"]
config_keys = ["settings"]
"#;
        let manifest = parse_plugin_manifest(toml).unwrap();
        assert_eq!(manifest.name, "funcenv");
        assert_eq!(manifest.version, "0.1.0");
        assert_eq!(manifest.lifecycle_events.len(), 2);
        assert_eq!(manifest.config_keys, vec!["settings"]);
    }

    #[test]
    fn parse_rejects_empty_name() {
        let toml = r#"
[plugin]
name = ""
version = "0.1.0"
description = "empty name"
"#;
        let err = parse_plugin_manifest(toml).unwrap_err().to_string();
        assert!(err.contains("name must not be empty"));
    }

    #[test]
    fn parse_rejects_bad_semver() {
        let toml = r#"
[plugin]
name = "funcenv"
version = "one point oh"
description = "bad version"
"#;
        let err = parse_plugin_manifest(toml).unwrap_err().to_string();
        assert!(err.contains("not valid semver"));
    }

    #[test]
    fn parse_rejects_unknown_lifecycle_event() {
        let toml = r#"
[plugin]
name = "funcenv"
version = "0.1.0"
description = "bad event"
lifecycle_events = ["deploy:finalize"]
"#;
        let err = parse_plugin_manifest(toml).unwrap_err().to_string();
        assert!(err.contains("unknown lifecycle event"));
    }

    #[test]
    fn builtin_manifest_subscribes_known_events_only() {
        let manifest = builtin_manifest();
        for event in &manifest.lifecycle_events {
            assert!(HookEvent::from_str(event).is_ok(), "unknown event {event}");
        }
    }

    #[test]
    fn command_manifest_matches_registered_surface() {
        let command = command_manifest();
        assert_eq!(command.name, "update-environments");
        assert_eq!(command.options.len(), 2);
        assert_eq!(command.options[0].shortcut, Some('s'));

        assert_eq!(command.subcommands.len(), 1);
        let nested = &command.subcommands[0];
        assert_eq!(nested.name, "function");
        assert_eq!(nested.lifecycle_events, vec!["init", "end"]);
        assert_eq!(nested.options[0].shortcut, Some('f'));
    }
}
