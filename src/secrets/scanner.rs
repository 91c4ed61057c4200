// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::{Fabric8Error, Result};
use crate::secrets::kind::SecretRequirement;
use crate::types::DecodedWorkload;
use tracing::debug;

/// Collect the secret requirements declared by a set of workloads.
///
/// Template objects are decoded and scanned like top level workloads. A
/// template object that does not decode aborts the scan.
pub fn scan(workloads: &[DecodedWorkload]) -> Result<Vec<SecretRequirement>> {
    let mut requirements = Vec::new();

    for workload in workloads {
        match workload {
            DecodedWorkload::Template(template) => {
                for object in &template.objects {
                    let nested = DecodedWorkload::decode(object.clone()).map_err(|e| {
                        Fabric8Error::decode(format!("template {}", template.name), e)
                    })?;
                    collect(&nested, &mut requirements);
                }
            }
            other => collect(other, &mut requirements),
        }
    }

    debug!("Found {} secret annotations", requirements.len());
    Ok(requirements)
}

fn collect(workload: &DecodedWorkload, requirements: &mut Vec<SecretRequirement>) {
    if let Some(annotations) = workload.pod_annotations() {
        requirements.extend(
            annotations
                .iter()
                .map(|(key, value)| SecretRequirement::new(key.clone(), value.clone())),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Template;
    use serde_json::json;

    fn rc(name: &str, annotations: serde_json::Value) -> serde_json::Value {
        json!({
            "apiVersion": "v1",
            "kind": "ReplicationController",
            "metadata": { "name": name },
            "spec": {
                "template": {
                    "metadata": { "annotations": annotations },
                    "spec": { "containers": [{ "name": name, "image": "busybox" }] }
                }
            }
        })
    }

    fn sorted(mut requirements: Vec<SecretRequirement>) -> Vec<SecretRequirement> {
        requirements.sort();
        requirements
    }

    #[test]
    fn test_scan_replication_controller_annotations() {
        let workload = DecodedWorkload::decode(rc(
            "gogs",
            json!({
                "fabric8.io/secret-ssh-key": "gogs-ssh",
                "fabric8.io/secret-hub-api-token": "gogs-hub"
            }),
        ))
        .unwrap();

        let requirements = sorted(scan(&[workload]).unwrap());

        assert_eq!(
            requirements,
            vec![
                SecretRequirement::new("fabric8.io/secret-hub-api-token", "gogs-hub"),
                SecretRequirement::new("fabric8.io/secret-ssh-key", "gogs-ssh"),
            ]
        );
    }

    #[test]
    fn test_scan_flattens_template_objects() {
        let template = Template {
            name: "cd-pipeline".to_string(),
            objects: vec![
                json!({ "apiVersion": "v1", "kind": "Service", "metadata": { "name": "jenkins" } }),
                rc("jenkins", json!({ "fabric8.io/secret-maven-settings": "jenkins-mvn" })),
            ],
        };
        let workloads = vec![
            DecodedWorkload::Template(template),
            DecodedWorkload::decode(rc("nexus", json!({ "fabric8.io/secret-docker-cfg": "nexus-docker" })))
                .unwrap(),
        ];

        let requirements = sorted(scan(&workloads).unwrap());

        assert_eq!(
            requirements,
            vec![
                SecretRequirement::new("fabric8.io/secret-docker-cfg", "nexus-docker"),
                SecretRequirement::new("fabric8.io/secret-maven-settings", "jenkins-mvn"),
            ]
        );
    }

    #[test]
    fn test_scan_undecodable_template_object_is_fatal() {
        let template = Template {
            name: "broken".to_string(),
            objects: vec![json!({ "metadata": { "name": "kindless" } })],
        };

        let err = scan(&[DecodedWorkload::Template(template)]).unwrap_err();

        assert!(err.is_fatal());
        assert!(err.to_string().contains("template broken"));
    }

    #[test]
    fn test_scan_ignores_workloads_without_annotations() {
        let workloads = vec![
            DecodedWorkload::Other {
                kind: "Service".to_string(),
            },
            DecodedWorkload::decode(json!({
                "apiVersion": "v1",
                "kind": "ReplicationController",
                "metadata": { "name": "bare" }
            }))
            .unwrap(),
        ];

        assert!(scan(&workloads).unwrap().is_empty());
    }
}
