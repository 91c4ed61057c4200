// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Detection of the kind of control plane we are talking to

use crate::constants::openshift::PROJECT_GROUP;
use crate::error::Result;
use kube::Client;
use std::fmt;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterFlavor {
    Kubernetes,
    OpenShift,
}

impl ClusterFlavor {
    pub fn is_openshift(&self) -> bool {
        matches!(self, ClusterFlavor::OpenShift)
    }
}

impl fmt::Display for ClusterFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterFlavor::Kubernetes => f.write_str("Kubernetes"),
            ClusterFlavor::OpenShift => f.write_str("OpenShift"),
        }
    }
}

/// OpenShift is recognized by the project API group it serves.
#[instrument(skip(client))]
pub async fn detect_flavor(client: &Client) -> Result<ClusterFlavor> {
    let groups = client.list_api_groups().await?;

    let flavor = if groups.groups.iter().any(|g| g.name == PROJECT_GROUP) {
        ClusterFlavor::OpenShift
    } else {
        ClusterFlavor::Kubernetes
    };

    debug!("Detected {} control plane", flavor);
    Ok(flavor)
}
