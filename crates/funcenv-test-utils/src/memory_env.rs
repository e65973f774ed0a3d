// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory env sink capturing exports for assertion.

use std::collections::BTreeMap;
use std::sync::Mutex;

use funcenv_core::EnvSink;

/// An env sink backed by a plain map instead of the process environment.
#[derive(Debug, Default)]
pub struct MemoryEnv {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value exported for a key, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    /// A snapshot of everything exported so far.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.values.lock().unwrap().clone()
    }

    /// True when nothing has been exported.
    pub fn is_empty(&self) -> bool {
        self.values.lock().unwrap().is_empty()
    }
}

impl EnvSink for MemoryEnv {
    fn export(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}
