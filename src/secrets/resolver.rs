// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Turns a secret target into the bytes stored in the cluster secret.
//!
//! Data is imported from the local key store first. What cannot be imported is
//! generated (SSH keys) or fetched (maven settings) when generation is enabled,
//! otherwise it is reported as a warning and stored empty.

use crate::config::SecretsOptions;
use crate::error::{Fabric8Error, Result};
use crate::secrets::keygen::{generate_key_pair, KeyPair};
use crate::secrets::keystore::LocalKeyStore;
use crate::secrets::kind::{SecretKind, SecretTarget};
use std::collections::BTreeMap;
use std::io;
use tracing::{info, instrument, warn};

/// Secret payload plus what happened while building it
#[derive(Debug, Default, Clone)]
pub struct Resolution {
    pub data: BTreeMap<String, Vec<u8>>,
    /// Files that could not be imported
    pub warnings: Vec<String>,
    /// Whether any of the data was generated or fetched instead of imported
    pub generated: bool,
}

impl Resolution {
    fn missing(&mut self, secret: &str, file: &str, err: &io::Error) {
        warn!("Warning: could not import {}/{}: {}", secret, file, err);
        self.warnings.push(format!("{}/{}: {}", secret, file, err));
    }
}

pub struct SecretDataResolver {
    store: LocalKeyStore,
    options: SecretsOptions,
    http: reqwest::Client,
}

impl SecretDataResolver {
    pub fn new(options: SecretsOptions) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(options.fetch_timeout)
            .build()
            .map_err(|e| Fabric8Error::FetchError(e.to_string()))?;

        Ok(Self {
            store: LocalKeyStore::new(options.secrets_dir.clone()),
            options,
            http,
        })
    }

    /// Build the data for one secret
    #[instrument(skip(self, target), fields(secret = %target.name, kind = %target.kind))]
    pub async fn resolve(&self, target: &SecretTarget) -> Result<Resolution> {
        match target.kind {
            SecretKind::SshKey => self.resolve_ssh_key(target).await,
            SecretKind::SshPublicKey => self.resolve_ssh_public_keys(target).await,
            SecretKind::MavenSettings => self.resolve_maven_settings(target).await,
            SecretKind::GpgKey
            | SecretKind::HubApiToken
            | SecretKind::SshConfig
            | SecretKind::DockerCfg => Ok(self.import_all(target)),
        }
    }

    fn import(&self, secret: &str, file: &str) -> io::Result<Vec<u8>> {
        if self.options.print_import_paths {
            info!("Importing secret: {}/{}", secret, file);
        }
        self.store.read(secret, file)
    }

    fn import_all(&self, target: &SecretTarget) -> Resolution {
        let mut resolution = Resolution::default();
        for key in &target.key_names {
            let bytes = self.import(&target.name, key).unwrap_or_else(|e| {
                resolution.missing(&target.name, key, &e);
                Vec::new()
            });
            resolution.data.insert(key.clone(), bytes);
        }
        resolution
    }

    async fn resolve_ssh_key(&self, target: &SecretTarget) -> Result<Resolution> {
        let name = &target.name;
        let (private_file, public_file) = match target.key_names.as_slice() {
            [private, public] => (private.as_str(), public.as_str()),
            _ => {
                return Err(Fabric8Error::InvalidRequirement(format!(
                    "ssh key secret {} needs a private and a public key file",
                    name
                )))
            }
        };

        let private = self.import(name, private_file);
        let public = self.import(name, public_file);

        if private.is_err() && public.is_err() && self.options.generate_if_missing {
            info!("No secrets found on local filesystem, generating SSH public and private key pair for {}", name);
            let pair = self
                .generate(name, &[(private_file, true), (public_file, false)])
                .await?;
            let mut resolution = Resolution {
                generated: true,
                ..Default::default()
            };
            resolution.data.insert(private_file.to_string(), pair.private);
            resolution.data.insert(public_file.to_string(), pair.public);
            return Ok(resolution);
        }

        let mut resolution = Resolution::default();
        for (file, read) in [(private_file, private), (public_file, public)] {
            let bytes = read.unwrap_or_else(|e| {
                resolution.missing(name, file, &e);
                Vec::new()
            });
            resolution.data.insert(file.to_string(), bytes);
        }
        Ok(resolution)
    }

    async fn resolve_ssh_public_keys(&self, target: &SecretTarget) -> Result<Resolution> {
        let name = &target.name;
        let mut resolution = Resolution::default();

        for key in &target.key_names {
            let bytes = match self.import(name, key) {
                Ok(bytes) => bytes,
                Err(_) if self.options.generate_if_missing => {
                    info!("No secrets found on local filesystem, generating SSH public key {}/{}", name, key);
                    resolution.generated = true;
                    self.generate(name, &[(key.as_str(), false)]).await?.public
                }
                Err(e) => {
                    resolution.missing(name, key, &e);
                    Vec::new()
                }
            };
            resolution.data.insert(key.clone(), bytes);
        }
        Ok(resolution)
    }

    async fn resolve_maven_settings(&self, target: &SecretTarget) -> Result<Resolution> {
        let mut resolution = Resolution::default();
        for key in &target.key_names {
            let bytes = match self.import(&target.name, key) {
                Ok(bytes) => bytes,
                Err(e) if self.options.generate_if_missing => {
                    resolution.missing(&target.name, key, &e);
                    resolution.generated = true;
                    self.fetch_default_maven_settings().await?
                }
                Err(e) => {
                    resolution.missing(&target.name, key, &e);
                    Vec::new()
                }
            };
            resolution.data.insert(key.clone(), bytes);
        }
        Ok(resolution)
    }

    /// Generate a key pair, writing the listed halves back when asked to.
    /// `true` marks the private half.
    async fn generate(&self, secret: &str, write_back: &[(&str, bool)]) -> Result<KeyPair> {
        // RSA generation is CPU bound, keep it off the runtime threads
        let pair = tokio::task::spawn_blocking(generate_key_pair)
            .await
            .map_err(|e| Fabric8Error::KeyGenerationError(e.to_string()))??;
        if self.options.write_generated_keys {
            for (file, private) in write_back {
                let contents = if *private { &pair.private } else { &pair.public };
                self.store.write(secret, file, contents)?;
                info!("Wrote generated key to {}", self.store.path(secret, file).display());
            }
        }
        Ok(pair)
    }

    async fn fetch_default_maven_settings(&self) -> Result<Vec<u8>> {
        let url = self.options.maven_settings_url.clone();
        info!("Using default maven settings from {}", url);

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Fabric8Error::FetchError(format!("{}: {}", url, e)))?;
        let body = response
            .bytes()
            .await
            .map_err(|e| Fabric8Error::FetchError(format!("{}: {}", url, e)))?;

        Ok(body.to_vec())
    }
}
