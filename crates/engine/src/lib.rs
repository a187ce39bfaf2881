// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod config;
pub mod error;
mod executor;
mod frame;
mod partition;

pub use config::ExecutorConfig;
pub use error::EngineError;
pub use executor::{WindowDefinition, WindowExecutor};
pub use frame::{FrameBound, FrameMode, FrameSpec};
pub use partition::split_partitions;
pub use tessera_type::Result;
