// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::{Fabric8Error, Result};
use crate::types::template::Template;
use k8s_openapi::api::core::v1::ReplicationController;
use serde_json::Value;
use std::collections::BTreeMap;

/// A deployable resource definition in a shape this tool understands
#[derive(Debug, Clone)]
pub enum DecodedWorkload {
    /// Workload whose pod template carries the secret annotations
    ReplicationController(Box<ReplicationController>),
    /// Template wrapping further, still-encoded, objects
    Template(Template),
    /// Any other kind; carries no secret requirements
    Other { kind: String },
}

impl DecodedWorkload {
    /// Decode a YAML or JSON document
    pub fn from_yaml(document: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(document)
            .map_err(|e| Fabric8Error::decode("document", e))?;
        Self::decode(value)
    }

    /// Decode an already parsed object based on its `kind`
    pub fn decode(value: Value) -> Result<Self> {
        let kind = value
            .get("kind")
            .and_then(Value::as_str)
            .ok_or_else(|| Fabric8Error::decode("object", "missing kind"))?
            .to_string();

        match kind.as_str() {
            "ReplicationController" => serde_json::from_value(value)
                .map(|rc| DecodedWorkload::ReplicationController(Box::new(rc)))
                .map_err(|e| Fabric8Error::decode("ReplicationController", e)),
            "Template" => Template::from_value(value).map(DecodedWorkload::Template),
            _ => Ok(DecodedWorkload::Other { kind }),
        }
    }

    /// Annotations on the pod template of a replication-style workload
    pub fn pod_annotations(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            DecodedWorkload::ReplicationController(rc) => rc
                .spec
                .as_ref()
                .and_then(|s| s.template.as_ref())
                .and_then(|t| t.metadata.as_ref())
                .and_then(|m| m.annotations.as_ref()),
            DecodedWorkload::Template(_) | DecodedWorkload::Other { .. } => None,
        }
    }
}
