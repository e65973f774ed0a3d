// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-tier environment resolution: global defaults plus per-function
//! section overlays.

use tracing::warn;

use funcenv_core::{EnvMap, EnvSink, FunctionEnvironmentMap};

use crate::coerce::{to_config_scalar, to_system_scalar};
use crate::document::ConfigDocument;

/// Minimum Jaro-Winkler similarity to suggest a function name for an
/// unknown section entry. Same threshold the descriptor diagnostics use.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Resolve a document into per-function environments.
///
/// Every known function receives at least the global defaults; section
/// overlays win ties against globals. Section entries naming functions the
/// host does not know are skipped with a warning and create no entry, so
/// only functions that exist get updated. Every coerced value is mirrored
/// into the env sink as it is classified.
pub fn resolve_environments(
    doc: &ConfigDocument,
    functions: &[String],
    env: &dyn EnvSink,
) -> FunctionEnvironmentMap {
    let mut globals = EnvMap::new();
    for (key, value) in doc.globals() {
        env.export(key, &to_system_scalar(value));
        globals.insert(key.to_string(), to_config_scalar(key, value));
    }

    let mut resolved: FunctionEnvironmentMap = functions
        .iter()
        .map(|name| (name.clone(), globals.clone()))
        .collect();

    for (section_key, entries) in doc.sections() {
        let names = split_function_names(section_key);

        // Coerce once per section entry so a boolean in a shared section
        // warns once, not once per named function.
        let mut coerced: Option<Vec<(String, String, String)>> = None;

        for name in &names {
            let Some(target) = resolved.get_mut(name) else {
                match suggest_function_name(name, functions) {
                    Some(suggestion) => warn!(
                        function = %name,
                        section = %section_key,
                        "section names an unknown function, skipping (did you mean `{suggestion}`?)"
                    ),
                    None => warn!(
                        function = %name,
                        section = %section_key,
                        "section names an unknown function, skipping"
                    ),
                }
                continue;
            };

            let coerced = coerced.get_or_insert_with(|| {
                entries
                    .iter()
                    .map(|(key, value)| {
                        (
                            key.clone(),
                            to_system_scalar(value),
                            to_config_scalar(key, value),
                        )
                    })
                    .collect()
            });

            for (key, system, config) in coerced.iter() {
                env.export(key, system);
                target.insert(key.clone(), config.clone());
            }
        }
    }

    resolved
}

/// Split a section key into function names: comma-separated, trimmed,
/// empties dropped.
pub fn split_function_names(section_key: &str) -> Vec<String> {
    section_key
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Suggest a known function name for an unknown one, if any is close.
pub fn suggest_function_name(unknown: &str, known: &[String]) -> Option<String> {
    let mut best_score = SUGGESTION_THRESHOLD;
    let mut best_match = None;

    for name in known {
        let score = strsim::jaro_winkler(unknown, name);
        if score > best_score {
            best_score = score;
            best_match = Some(name.clone());
        }
    }

    best_match
}
