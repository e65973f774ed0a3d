// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Funcenv integration tests.
//!
//! Provides mock capabilities and harness infrastructure for fast,
//! deterministic, CI-runnable tests without a host framework or a live
//! platform.
//!
//! # Components
//!
//! - [`MockServiceModel`] - in-memory service model
//! - [`MockGateway`] - recording gateway with scripted pagination and
//!   failure injection
//! - [`MemoryEnv`] - env sink capturing exports
//! - [`PluginHarness`] - builder wiring everything into a constructed
//!   plugin

pub mod harness;
pub mod memory_env;
pub mod mock_gateway;
pub mod mock_service;

pub use harness::{PluginHarness, PluginHarnessBuilder};
pub use memory_env::MemoryEnv;
pub use mock_gateway::{MockGateway, RecordedUpdate};
pub use mock_service::MockServiceModel;
