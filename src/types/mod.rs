// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster object shapes this tool reads.

pub mod project;
pub mod template;
pub mod workload;

pub use project::Project;
pub use template::Template;
pub use workload::DecodedWorkload;
