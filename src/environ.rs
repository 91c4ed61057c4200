// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Environments stored in the `kind=environments` configmap, one YAML
//! encoded entry per key.

use crate::constants::labels::ENVIRONMENTS_SELECTOR;
use crate::error::{Fabric8Error, Result};
use k8s_openapi::api::core::v1::ConfigMap;
use kube::{
    api::{ListParams, PostParams},
    Api, Client, ResourceExt,
};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentEntry {
    pub name: String,
    pub namespace: String,
    pub order: i64,
}

impl EnvironmentEntry {
    /// Parse `name=.. namespace=.. order=..` command arguments
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let mut name = None;
        let mut namespace = None;
        let mut order = None;

        for arg in args {
            let arg = arg.as_ref();
            let (key, value) = arg.split_once('=').ok_or_else(|| {
                Fabric8Error::InvalidArgument(format!(
                    "{} is missing an assignment like foo=bar",
                    arg
                ))
            })?;

            match key.to_lowercase().as_str() {
                "name" => name = Some(value.to_lowercase()),
                "namespace" => namespace = Some(value.to_string()),
                "order" => {
                    order = Some(value.parse::<i64>().map_err(|e| {
                        Fabric8Error::InvalidArgument(format!(
                            "cannot use {} from {} as number: {}",
                            value, key, e
                        ))
                    })?)
                }
                _ => {
                    return Err(Fabric8Error::InvalidArgument(format!("unknown key {}", key)))
                }
            }
        }

        match (name, namespace, order) {
            (Some(name), Some(namespace), Some(order)) if !name.is_empty() && !namespace.is_empty() => {
                Ok(EnvironmentEntry {
                    name,
                    namespace,
                    order,
                })
            }
            _ => Err(Fabric8Error::InvalidArgument(
                "missing some of name=, namespace= and order=".to_string(),
            )),
        }
    }
}

async fn environment_configmaps(client: &Client, namespace: &str) -> Result<Vec<ConfigMap>> {
    let configmaps: Api<ConfigMap> = Api::namespaced(client.clone(), namespace);
    let lp = ListParams::default().labels(ENVIRONMENTS_SELECTOR);
    Ok(configmaps.list(&lp).await?.items)
}

/// All environments as `(key, entry)` pairs
#[instrument(skip(client))]
pub async fn list_environments(
    client: &Client,
    namespace: &str,
) -> Result<Vec<(String, EnvironmentEntry)>> {
    let mut environments = Vec::new();
    for configmap in environment_configmaps(client, namespace).await? {
        for (key, value) in configmap.data.iter().flatten() {
            let entry: EnvironmentEntry = serde_yaml::from_str(value)?;
            environments.push((key.clone(), entry));
        }
    }
    Ok(environments)
}

/// Add or replace an entry. Last writer wins.
#[instrument(skip(client))]
pub async fn create_environment(
    client: &Client,
    namespace: &str,
    entry: &EnvironmentEntry,
) -> Result<()> {
    let mut configmap = environment_configmaps(client, namespace)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| Fabric8Error::NoEnvironmentsConfigMap {
            namespace: namespace.to_string(),
        })?;

    let value = serde_yaml::to_string(entry)?;
    configmap
        .data
        .get_or_insert_with(Default::default)
        .insert(entry.name.clone(), value);

    update(client, namespace, &configmap).await?;
    info!("Environment {} saved in {}", entry.name, configmap.name_any());
    Ok(())
}

/// Remove the entry named `name`. Returns false when there is none.
#[instrument(skip(client))]
pub async fn delete_environment(client: &Client, namespace: &str, name: &str) -> Result<bool> {
    let configmaps = environment_configmaps(client, namespace).await?;

    let Some(configmap) = remove_entry(configmaps, name)? else {
        return Ok(false);
    };

    update(client, namespace, &configmap).await?;
    info!("Environment {} deleted from {}", name, configmap.name_any());
    Ok(true)
}

/// Find the first configmap holding an entry named `name` (case-insensitive)
/// and return it with that entry removed.
pub fn remove_entry(configmaps: Vec<ConfigMap>, name: &str) -> Result<Option<ConfigMap>> {
    for mut configmap in configmaps {
        if let Some(key) = find_entry_key(&configmap, name)? {
            if let Some(data) = configmap.data.as_mut() {
                data.remove(&key);
            }
            return Ok(Some(configmap));
        }
    }
    Ok(None)
}

fn find_entry_key(configmap: &ConfigMap, name: &str) -> Result<Option<String>> {
    for (key, value) in configmap.data.iter().flatten() {
        let entry: EnvironmentEntry = serde_yaml::from_str(value)?;
        if entry.name.eq_ignore_ascii_case(name) {
            return Ok(Some(key.clone()));
        }
    }
    Ok(None)
}

async fn update(client: &Client, namespace: &str, configmap: &ConfigMap) -> Result<()> {
    let configmaps: Api<ConfigMap> = Api::namespaced(client.clone(), namespace);
    configmaps
        .replace(&configmap.name_any(), &PostParams::default(), configmap)
        .await?;
    debug!("Updated configmap {}/{}", namespace, configmap.name_any());
    Ok(())
}

/// Render environments as the `ENV  DATA` table
pub fn format_environments(environments: &[(String, EnvironmentEntry)]) -> String {
    let mut out = format!("{:<10} DATA\n", "ENV");
    for (key, entry) in environments {
        let _ = writeln!(
            out,
            "{:<10} namespace={} order={}",
            key, entry.namespace, entry.order
        );
    }
    out
}
