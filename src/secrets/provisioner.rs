// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Creates the secrets declared by catalog workloads and templates.

use crate::config::SecretsOptions;
use crate::constants::{labels, FIELD_MANAGER};
use crate::error::Result;
use crate::output;
use crate::secrets::kind::SecretTarget;
use crate::secrets::resolver::{Resolution, SecretDataResolver};
use crate::secrets::scanner::scan;
use crate::types::{DecodedWorkload, Template};
use k8s_openapi::api::core::v1::{ConfigMap, Secret};
use k8s_openapi::ByteString;
use kube::{
    api::{DynamicObject, ListParams, ObjectMeta, Patch, PatchParams},
    Api, Client, ResourceExt,
};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// Result of creating one secret
#[derive(Debug, Clone)]
pub struct SecretOutcome {
    pub name: String,
    pub error: Option<String>,
    pub warnings: Vec<String>,
    pub generated: bool,
}

impl SecretOutcome {
    fn created(name: &str, resolution: Resolution) -> Self {
        Self {
            name: name.to_string(),
            error: None,
            warnings: resolution.warnings,
            generated: resolution.generated,
        }
    }

    fn failed(name: &str, error: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            error: Some(error.to_string()),
            warnings: Vec::new(),
            generated: false,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-secret outcomes of a provisioning run
#[derive(Debug, Default, Clone)]
pub struct ProvisionReport {
    pub outcomes: Vec<SecretOutcome>,
}

impl ProvisionReport {
    pub fn created(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.created()
    }
}

pub struct SecretProvisioner {
    client: Client,
    namespace: String,
    resolver: SecretDataResolver,
}

impl SecretProvisioner {
    pub fn new(client: Client, namespace: impl Into<String>, options: SecretsOptions) -> Result<Self> {
        Ok(Self {
            client,
            namespace: namespace.into(),
            resolver: SecretDataResolver::new(options)?,
        })
    }

    /// Provision every secret declared in the catalog, plus templates on OpenShift
    pub async fn run(&self, include_templates: bool) -> Result<ProvisionReport> {
        let mut workloads = self.load_catalog().await;
        if include_templates {
            workloads.extend(self.load_templates().await?);
        }
        self.provision(&workloads).await
    }

    /// Decode every entry of the catalog configmaps.
    /// Entries that do not decode are skipped.
    #[instrument(skip(self), fields(namespace = %self.namespace))]
    pub async fn load_catalog(&self) -> Vec<DecodedWorkload> {
        let configmaps: Api<ConfigMap> = Api::namespaced(self.client.clone(), &self.namespace);
        let lp = ListParams::default().labels(labels::CATALOG_SELECTOR);

        let list = match configmaps.list(&lp).await {
            Ok(list) => list,
            Err(e) => {
                warn!("Failed to load catalog configmaps: {}", e);
                return Vec::new();
            }
        };

        let mut workloads = Vec::new();
        for configmap in &list.items {
            let name = configmap.name_any();
            for (key, document) in configmap.data.iter().flatten() {
                match DecodedWorkload::from_yaml(document) {
                    Ok(workload) => workloads.push(workload),
                    Err(e) => warn!(
                        "Failed to decode config map {} with key {}: {}",
                        name, key, e
                    ),
                }
            }
        }

        debug!("Loaded {} catalog entries", workloads.len());
        workloads
    }

    /// All OpenShift templates in the namespace
    #[instrument(skip(self), fields(namespace = %self.namespace))]
    pub async fn load_templates(&self) -> Result<Vec<DecodedWorkload>> {
        let templates: Api<DynamicObject> = Api::namespaced_with(
            self.client.clone(),
            &self.namespace,
            &Template::api_resource(),
        );
        let list = templates.list(&ListParams::default()).await?;

        list.items
            .into_iter()
            .map(|object| Template::try_from(object).map(DecodedWorkload::Template))
            .collect()
    }

    /// Create one secret per requirement target.
    ///
    /// Every requirement is expanded before anything is written, so a decode
    /// failure or an unknown secret kind aborts the run without side effects.
    /// Any other failure is reported for its secret and the run continues.
    pub async fn provision(&self, workloads: &[DecodedWorkload]) -> Result<ProvisionReport> {
        let requirements = scan(workloads)?;

        let mut expanded = Vec::with_capacity(requirements.len());
        for requirement in &requirements {
            match requirement.targets() {
                Ok(targets) => expanded.push(Ok(targets)),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => expanded.push(Err((requirement.identifiers.clone(), e))),
            }
        }

        let mut report = ProvisionReport::default();
        for targets in expanded {
            let targets = match targets {
                Ok(targets) => targets,
                Err((identifiers, e)) => {
                    let outcome = SecretOutcome::failed(&identifiers, e);
                    output::secret_result(&outcome);
                    report.outcomes.push(outcome);
                    continue;
                }
            };

            for target in &targets {
                let outcome = match self.provision_target(target).await {
                    Ok(resolution) => SecretOutcome::created(&target.name, resolution),
                    Err(e) if e.is_fatal() => return Err(e),
                    Err(e) => SecretOutcome::failed(&target.name, e),
                };
                output::secret_result(&outcome);
                report.outcomes.push(outcome);
            }
        }

        info!(
            "Created {} secrets, {} failed",
            report.created(),
            report.failed()
        );
        Ok(report)
    }

    #[instrument(skip(self, target), fields(secret = %target.name, namespace = %self.namespace))]
    async fn provision_target(&self, target: &SecretTarget) -> Result<Resolution> {
        let resolution = self.resolver.resolve(target).await?;
        let secret = build_secret(target, &self.namespace, &resolution.data);

        // Server-side apply creates the secret or replaces the data we own
        let secrets: Api<Secret> = Api::namespaced(self.client.clone(), &self.namespace);
        let pp = PatchParams::apply(FIELD_MANAGER).force();
        secrets
            .patch(&target.name, &pp, &Patch::Apply(&secret))
            .await?;

        info!("Applied secret {}/{}", self.namespace, target.name);
        Ok(resolution)
    }
}

/// The cluster object for a resolved secret
pub fn build_secret(
    target: &SecretTarget,
    namespace: &str,
    data: &BTreeMap<String, Vec<u8>>,
) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some(target.name.clone()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        type_: Some(target.secret_type.clone()),
        data: Some(
            data.iter()
                .map(|(k, v)| (k.clone(), ByteString(v.clone())))
                .collect(),
        ),
        ..Default::default()
    }
}
