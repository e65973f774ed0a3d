// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Merging of declared function environments with resolved configuration.

use funcenv_core::EnvMap;

/// Overlay resolved configuration onto a function's declared environment.
///
/// The declared environment is the base and the config-derived mapping is
/// applied second, so on a shared key the configuration value wins. The
/// push paths call this with the already-mutated descriptor as the base,
/// which keeps remote updates aligned with the freshest merged state.
pub fn merge_config(declared: Option<&EnvMap>, resolved: Option<&EnvMap>) -> EnvMap {
    let mut merged = declared.cloned().unwrap_or_default();
    if let Some(resolved) = resolved {
        for (key, value) in resolved {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> EnvMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn config_wins_on_shared_keys() {
        let declared = env(&[("KEY", "declared"), ("KEEP", "yes")]);
        let resolved = env(&[("KEY", "config")]);

        let merged = merge_config(Some(&declared), Some(&resolved));

        assert_eq!(merged.get("KEY").map(String::as_str), Some("config"));
        assert_eq!(merged.get("KEEP").map(String::as_str), Some("yes"));
    }

    #[test]
    fn missing_declared_environment_defaults_to_empty() {
        let resolved = env(&[("A", "1")]);
        let merged = merge_config(None, Some(&resolved));
        assert_eq!(merged, resolved);
    }

    #[test]
    fn missing_resolved_entry_keeps_declared_as_is() {
        let declared = env(&[("A", "1")]);
        let merged = merge_config(Some(&declared), None);
        assert_eq!(merged, declared);
    }

    #[test]
    fn both_missing_yields_empty() {
        assert!(merge_config(None, None).is_empty());
    }
}
