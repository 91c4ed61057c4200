// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Project listing and detection of the namespace commands should target

use crate::constants::AUTODETECT;
use crate::error::Result;
use crate::kubernetes::discovery::detect_flavor;
use crate::project;
use crate::types::Project;
use kube::{api::ListParams, Api, Client, ResourceExt};
use tracing::{debug, info, instrument, warn};

/// Names of all projects visible to the user, in API order
#[instrument(skip(client))]
pub async fn list_project_names(client: &Client) -> Result<Vec<String>> {
    let projects: Api<Project> = Api::all(client.clone());
    let list = projects.list(&ListParams::default()).await?;
    Ok(list.items.iter().map(|p| p.name_any()).collect())
}

/// Work out which namespace a command should operate on.
///
/// An explicit work project always wins. Otherwise, on OpenShift, the current
/// namespace is mapped onto the user's base project. Whenever that fails the
/// default namespace is used.
#[instrument(skip(client))]
pub async fn detect_namespace(
    client: &Client,
    work_project: &str,
    default_namespace: &str,
) -> Result<String> {
    if work_project != AUTODETECT {
        debug!("Using work project {}", work_project);
        return Ok(work_project.to_string());
    }

    let mut detected = String::new();
    if detect_flavor(client).await?.is_openshift() {
        match list_project_names(client).await {
            Ok(names) => detected = project::resolve(default_namespace, &names),
            Err(e) => warn!("Could not list projects: {}", e),
        }
    }

    if detected.is_empty() {
        debug!("No project detected, using {}", default_namespace);
        return Ok(default_namespace.to_string());
    }

    info!("Detected project {}", detected);
    Ok(detected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kubernetes::discovery::tests::api_groups_json;
    use crate::test_utils::{list_json, status_json, MockService};

    const PROJECTS: &str = "/apis/project.openshift.io/v1/projects";

    fn projects_json(names: &[&str]) -> String {
        let items = names
            .iter()
            .map(|name| {
                serde_json::json!({
                    "apiVersion": "project.openshift.io/v1",
                    "kind": "Project",
                    "metadata": { "name": name },
                    "spec": { "finalizers": ["kubernetes"] },
                    "status": { "phase": "Active" }
                })
            })
            .collect();
        list_json("ProjectList", "project.openshift.io/v1", items)
    }

    fn openshift() -> MockService {
        MockService::new().on_get("/apis", 200, &api_groups_json(&["project.openshift.io"]))
    }

    #[tokio::test]
    async fn test_explicit_work_project_skips_detection() {
        // No responses registered: any API call would fail
        let mock = MockService::new();
        let client = mock.clone().into_client();

        let ns = detect_namespace(&client, "my-project", "default").await.unwrap();

        assert_eq!(ns, "my-project");
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_list_project_names_keeps_order() {
        let client = openshift()
            .on_get(PROJECTS, 200, &projects_json(&["foo-che", "foo", "bar"]))
            .into_client();

        let names = list_project_names(&client).await.unwrap();

        assert_eq!(names, vec!["foo-che", "foo", "bar"]);
    }

    #[tokio::test]
    async fn test_autodetect_resolves_base_project() {
        let client = openshift()
            .on_get(PROJECTS, 200, &projects_json(&["foo-che", "bar-che", "foo", "bar"]))
            .into_client();

        let ns = detect_namespace(&client, AUTODETECT, "bar-jenkins").await.unwrap();

        assert_eq!(ns, "bar");
    }

    #[tokio::test]
    async fn test_autodetect_falls_back_to_default_when_undetermined() {
        let client = openshift()
            .on_get(PROJECTS, 200, &projects_json(&["foo-che", "moto"]))
            .into_client();

        let ns = detect_namespace(&client, AUTODETECT, "moto").await.unwrap();

        assert_eq!(ns, "moto");
    }

    #[tokio::test]
    async fn test_autodetect_falls_back_when_projects_cannot_be_listed() {
        let client = openshift()
            .on_get(PROJECTS, 403, &status_json(403, "Forbidden", "projects is forbidden"))
            .into_client();

        let ns = detect_namespace(&client, AUTODETECT, "default").await.unwrap();

        assert_eq!(ns, "default");
    }

    #[tokio::test]
    async fn test_autodetect_on_kubernetes_uses_default() {
        let mock = MockService::new().on_get("/apis", 200, &api_groups_json(&["apps"]));
        let client = mock.clone().into_client();

        let ns = detect_namespace(&client, AUTODETECT, "default").await.unwrap();

        assert_eq!(ns, "default");
        assert_eq!(mock.count("GET"), 1);
    }
}
