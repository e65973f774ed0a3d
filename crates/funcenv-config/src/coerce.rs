// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion of classified scalars into environment-safe strings.
//!
//! Two targets with different rules: the process-environment mirror
//! receives values unchanged, while the platform configuration rejects
//! booleans and coerces them to `0`/`1` with a warning pair.

use tracing::warn;

use funcenv_core::ScalarValue;

/// Render a scalar for the process-environment mirror, unchanged.
pub fn to_system_scalar(value: &ScalarValue) -> String {
    match value {
        ScalarValue::Str(s) => s.clone(),
        ScalarValue::Num { text, .. } => text.clone(),
        ScalarValue::Bool(b) => b.to_string(),
    }
}

/// Render a scalar for a function's platform configuration.
///
/// Strings and numbers pass through unchanged. Booleans emit exactly two
/// warning lines and coerce to `"1"` / `"0"`. Callers coerce each document
/// entry once so the warning pair fires once per offending key per load.
pub fn to_config_scalar(key: &str, value: &ScalarValue) -> String {
    match value {
        ScalarValue::Str(s) => s.clone(),
        ScalarValue::Num { text, .. } => text.clone(),
        ScalarValue::Bool(b) => {
            warn!(key, "boolean values are not supported in function environments");
            warn!(key, "use 0 or 1 instead; the value has been coerced");
            if *b { "1" } else { "0" }.to_string()
        }
    }
}
