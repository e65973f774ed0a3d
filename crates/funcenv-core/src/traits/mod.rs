// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits the pipeline is written against.
//!
//! The host framework supplies a service model and a cloud gateway; tests
//! substitute mocks. The env sink replaces ambient process-global state
//! with an explicit dependency.

pub mod env_sink;
pub mod gateway;
pub mod service;

pub use env_sink::{EnvSink, ProcessEnv};
pub use gateway::CloudGateway;
pub use service::ServiceModel;
