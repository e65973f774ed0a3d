// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lifecycle events and hook dispatch.

use strum::{Display, EnumString};
use tracing::debug;

use funcenv_core::FuncenvError;

use crate::EnvPlugin;

/// Lifecycle events the plugin subscribes to with the host.
///
/// The string forms are the event names the host fires; unknown names fail
/// to parse and are rejected before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum HookEvent {
    /// Update every function's deployed environment.
    #[strum(serialize = "update-environments:init")]
    UpdateAll,

    /// Update a single named function's deployed environment.
    #[strum(serialize = "update-environments:function:init")]
    UpdateFunction,

    /// Resolve provider-level symbolic references for local emulation.
    #[strum(serialize = "before:offline:start")]
    OfflineStart,
}

impl EnvPlugin {
    /// Dispatch one lifecycle event.
    pub async fn handle_hook(&self, event: HookEvent) -> Result<(), FuncenvError> {
        debug!(event = %event, "dispatching lifecycle event");
        match event {
            HookEvent::UpdateAll => self.update_all().await,
            HookEvent::UpdateFunction => self.update_single().await,
            HookEvent::OfflineStart => self.resolve_references().await,
        }
    }
}
