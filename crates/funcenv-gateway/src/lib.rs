// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP provider bridge gateway for Funcenv.
//!
//! The host framework exposes its platform operations over a local JSON
//! bridge; [`HttpGateway`] implements the [`funcenv_core::CloudGateway`]
//! capability against it.

pub mod client;
pub mod types;

pub use client::HttpGateway;
