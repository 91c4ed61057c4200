// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

use crate::constants::labels::{PACKAGE_SELECTOR, VERSION};
use crate::error::Result;
use k8s_openapi::api::core::v1::ConfigMap;
use kube::{api::ListParams, Api, Client, ResourceExt};
use tracing::instrument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub version: Option<String>,
}

impl std::fmt::Display for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} version: {}",
            self.name,
            self.version.as_deref().unwrap_or("")
        )
    }
}

/// Installed packages in `namespace`
#[instrument(skip(client))]
pub async fn list_packages(client: &Client, namespace: &str) -> Result<Vec<Package>> {
    let configmaps: Api<ConfigMap> = Api::namespaced(client.clone(), namespace);
    let lp = ListParams::default().labels(PACKAGE_SELECTOR);
    let list = configmaps.list(&lp).await?;

    Ok(list
        .items
        .iter()
        .map(|cm| Package {
            name: cm.name_any(),
            version: cm.labels().get(VERSION).cloned(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{configmap_json, list_json, status_json, MockService};
    use serde_json::json;

    const CONFIGMAPS: &str = "/api/v1/namespaces/test-ns/configmaps";

    #[tokio::test]
    async fn test_list_packages() {
        let body = list_json(
            "ConfigMapList",
            "v1",
            vec![
                configmap_json(
                    "cd-pipeline",
                    "test-ns",
                    json!({ "fabric8.io/kind": "package", "version": "2.2.311" }),
                    json!({}),
                ),
                configmap_json(
                    "unversioned",
                    "test-ns",
                    json!({ "fabric8.io/kind": "package" }),
                    json!({}),
                ),
            ],
        );
        let client = MockService::new().on_get(CONFIGMAPS, 200, &body).into_client();

        let packages = list_packages(&client, "test-ns").await.unwrap();

        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].to_string(), "cd-pipeline version: 2.2.311");
        assert_eq!(packages[1].version, None);
        assert_eq!(packages[1].to_string(), "unversioned version: ");
    }

    #[tokio::test]
    async fn test_list_packages_error() {
        let client = MockService::new()
            .on_get(CONFIGMAPS, 403, &status_json(403, "Forbidden", "configmaps is forbidden"))
            .into_client();

        assert!(list_packages(&client, "test-ns").await.is_err());
    }
}
