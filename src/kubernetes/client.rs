// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster client creation from the local kubeconfig

use crate::error::{Fabric8Error, Result};
use kube::{Client, Config as KConfig};
use tracing::{debug, instrument};

/// A connected client plus what the kubeconfig said about it
#[derive(Clone)]
pub struct ClusterConnection {
    pub client: Client,
    /// API server URL, for display
    pub host: String,
    /// Namespace of the current context, or the `--namespace` override
    pub default_namespace: String,
}

/// Create a client from the inferred kubeconfig or in-cluster environment
#[instrument]
pub async fn connect(namespace_override: Option<&str>) -> Result<ClusterConnection> {
    let mut config = KConfig::infer()
        .await
        .map_err(|e| Fabric8Error::KubeconfigError(format!("Failed to infer config: {}", e)))?;

    if let Some(namespace) = namespace_override {
        debug!(
            "Overriding namespace {} with {}",
            config.default_namespace, namespace
        );
        config.default_namespace = namespace.to_string();
    }

    let host = config.cluster_url.to_string();
    let default_namespace = config.default_namespace.clone();
    let client = Client::try_from(config)
        .map_err(|e| Fabric8Error::KubeconfigError(format!("Failed to create client: {}", e)))?;

    debug!("Connected to {} (namespace {})", host, default_namespace);

    Ok(ClusterConnection {
        client,
        host,
        default_namespace,
    })
}
