// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation, OpenShift detection and project lookup.

pub mod client;
pub mod discovery;
pub mod projects;

pub use client::{connect, ClusterConnection};
pub use discovery::{detect_flavor, ClusterFlavor};
pub use projects::{detect_namespace, list_project_names};
