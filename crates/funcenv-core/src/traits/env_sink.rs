// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Injectable process-environment mirror.
//!
//! Every coerced configuration value is exported through an [`EnvSink`] so
//! that code downstream in the same process observes resolved values. The
//! sink is injected rather than ambient, which keeps test runs from
//! interfering with one another.

/// Write-only sink for resolved environment values.
pub trait EnvSink: Send + Sync {
    /// Export one key/value pair. Later exports overwrite earlier ones.
    fn export(&self, key: &str, value: &str);
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSink for ProcessEnv {
    fn export(&self, key: &str, value: &str) {
        // SAFETY: set_var is unsafe in edition 2024 because it races with
        // concurrent getenv callers. Exports only happen during the
        // single-threaded resolution pass, before any worker is spawned.
        unsafe { std::env::set_var(key, value) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_env_exports_are_visible() {
        let sink = ProcessEnv;
        sink.export("FUNCENV_CORE_TEST_KEY", "abc");
        assert_eq!(
            std::env::var("FUNCENV_CORE_TEST_KEY").as_deref(),
            Ok("abc")
        );
        // SAFETY: same single-threaded constraint as the export above.
        unsafe { std::env::remove_var("FUNCENV_CORE_TEST_KEY") };
    }
}
