// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::openshift::TEMPLATE_GROUP;
use crate::error::{Fabric8Error, Result};
use kube::api::{ApiResource, DynamicObject, GroupVersionKind};
use kube::ResourceExt;
use serde_json::Value;

/// OpenShift template: a named list of still-encoded objects.
///
/// Templates carry their payload at the top level instead of under `spec`, so
/// they are read as dynamic objects and narrowed down here.
#[derive(Debug, Clone)]
pub struct Template {
    pub name: String,
    pub objects: Vec<Value>,
}

impl Template {
    pub fn api_resource() -> ApiResource {
        ApiResource::from_gvk(&GroupVersionKind::gvk(TEMPLATE_GROUP, "v1", "Template"))
    }

    /// Decode a template from an already parsed document
    pub fn from_value(value: Value) -> Result<Self> {
        let object: DynamicObject = serde_json::from_value(value)
            .map_err(|e| Fabric8Error::decode("template", e))?;
        Self::try_from(object)
    }
}

impl TryFrom<DynamicObject> for Template {
    type Error = Fabric8Error;

    fn try_from(object: DynamicObject) -> Result<Self> {
        let name = object.name_any();
        let objects = match object.data.get("objects") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.clone(),
            Some(other) => {
                return Err(Fabric8Error::decode(
                    format!("template {}", name),
                    format!("objects must be a list, got {}", other),
                ))
            }
        };

        Ok(Template { name, objects })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_from_value_collects_objects() {
        let template = Template::from_value(json!({
            "apiVersion": "template.openshift.io/v1",
            "kind": "Template",
            "metadata": { "name": "jenkins" },
            "objects": [
                { "apiVersion": "v1", "kind": "Service", "metadata": { "name": "jenkins" } },
                { "apiVersion": "v1", "kind": "ReplicationController", "metadata": { "name": "jenkins" } }
            ]
        }))
        .unwrap();

        assert_eq!(template.name, "jenkins");
        assert_eq!(template.objects.len(), 2);
    }

    #[test]
    fn test_template_without_objects_is_empty() {
        let template = Template::from_value(json!({
            "apiVersion": "template.openshift.io/v1",
            "kind": "Template",
            "metadata": { "name": "empty" }
        }))
        .unwrap();

        assert!(template.objects.is_empty());
    }

    #[test]
    fn test_template_with_malformed_objects_fails() {
        let err = Template::from_value(json!({
            "apiVersion": "template.openshift.io/v1",
            "kind": "Template",
            "metadata": { "name": "broken" },
            "objects": "not-a-list"
        }))
        .unwrap_err();

        assert!(err.is_fatal());
    }

    #[test]
    fn test_api_resource_points_at_openshift_templates() {
        let ar = Template::api_resource();
        assert_eq!(ar.group, "template.openshift.io");
        assert_eq!(ar.plural, "templates");
    }
}
