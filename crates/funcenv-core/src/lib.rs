// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Funcenv environment pipeline.
//!
//! This crate provides the foundational trait definitions, error type, and
//! common types used throughout the Funcenv workspace. The host framework
//! and the test mocks both implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::FuncenvError;
pub use types::{EnvMap, FunctionEnvironmentMap, ResourcePage, ScalarValue, StackResource, SymbolicReference};

pub use traits::{CloudGateway, EnvSink, ProcessEnv, ServiceModel};
