// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Secret annotation parsing.
//!
//! A workload declares the secrets it needs through pod template annotations
//! of the form `fabric8.io/<kind-tag>: <identifiers>`.

use crate::constants::files;
use crate::error::{Fabric8Error, Result};
use std::fmt;

/// Kinds of secret data this tool knows how to import or generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKind {
    SshKey,
    SshPublicKey,
    GpgKey,
    HubApiToken,
    SshConfig,
    DockerCfg,
    MavenSettings,
}

impl SecretKind {
    pub const ALL: [SecretKind; 7] = [
        SecretKind::SshKey,
        SecretKind::SshPublicKey,
        SecretKind::GpgKey,
        SecretKind::HubApiToken,
        SecretKind::SshConfig,
        SecretKind::DockerCfg,
        SecretKind::MavenSettings,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            SecretKind::SshKey => "secret-ssh-key",
            SecretKind::SshPublicKey => "secret-ssh-public-key",
            SecretKind::GpgKey => "secret-gpg-key",
            SecretKind::HubApiToken => "secret-hub-api-token",
            SecretKind::SshConfig => "secret-ssh-config",
            SecretKind::DockerCfg => "secret-docker-cfg",
            SecretKind::MavenSettings => "secret-maven-settings",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Files imported into a secret of this kind when the annotation names none
    fn default_files(&self) -> Vec<String> {
        let names: &[&str] = match self {
            SecretKind::SshKey => &[files::SSH_PRIVATE_KEY, files::SSH_PUBLIC_KEY],
            SecretKind::SshPublicKey => &[files::SSH_PUBLIC_KEY],
            SecretKind::GpgKey => &files::GPG_KEYS,
            SecretKind::HubApiToken => &[files::HUB_TOKEN],
            SecretKind::SshConfig => &[files::SSH_CONFIG],
            SecretKind::DockerCfg => &[files::DOCKER_CONFIG],
            SecretKind::MavenSettings => &[files::MAVEN_SETTINGS],
        };
        names.iter().map(|n| n.to_string()).collect()
    }
}

impl fmt::Display for SecretKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One annotation found on a workload's pod template
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SecretRequirement {
    /// Annotation key, `<prefix>/<kind-tag>`; becomes the secret type
    pub secret_type: String,
    /// Annotation value naming the secret(s)
    pub identifiers: String,
}

/// A single secret to create, expanded from a requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretTarget {
    pub name: String,
    pub kind: SecretKind,
    pub secret_type: String,
    /// Data keys, each imported from `<name>/<key>`
    pub key_names: Vec<String>,
}

impl SecretRequirement {
    pub fn new(secret_type: impl Into<String>, identifiers: impl Into<String>) -> Self {
        Self {
            secret_type: secret_type.into(),
            identifiers: identifiers.into(),
        }
    }

    /// The kind selected by the tag after the annotation prefix
    pub fn kind(&self) -> Result<SecretKind> {
        self.secret_type
            .split('/')
            .nth(1)
            .and_then(SecretKind::from_tag)
            .ok_or_else(|| Fabric8Error::UnrecognizedSecretKind(self.secret_type.clone()))
    }

    /// Expand the identifiers into the secrets that have to exist.
    ///
    /// SSH key requirements list one secret per comma separated name. SSH
    /// public key requirements are `name[key1,key2]`. Every other kind names a
    /// single secret.
    pub fn targets(&self) -> Result<Vec<SecretTarget>> {
        let kind = self.kind()?;

        let targets: Vec<SecretTarget> = match kind {
            SecretKind::SshKey => self
                .identifiers
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(|name| self.target(kind, name, kind.default_files()))
                .collect(),
            SecretKind::SshPublicKey => {
                let mut tokens = self
                    .identifiers
                    .split(|c: char| c == ',' || c == '[' || c == ']')
                    .map(str::trim)
                    .filter(|t| !t.is_empty());
                match tokens.next() {
                    Some(name) => {
                        let keys: Vec<String> = tokens.map(str::to_string).collect();
                        let keys = if keys.is_empty() { kind.default_files() } else { keys };
                        vec![self.target(kind, name, keys)]
                    }
                    None => Vec::new(),
                }
            }
            _ => {
                let name = self.identifiers.trim();
                if name.is_empty() {
                    Vec::new()
                } else {
                    vec![self.target(kind, name, kind.default_files())]
                }
            }
        };

        if targets.is_empty() {
            return Err(Fabric8Error::InvalidRequirement(format!(
                "{} does not name any secret",
                self.secret_type
            )));
        }

        for target in &targets {
            if !is_secret_name(&target.name) {
                return Err(Fabric8Error::InvalidRequirement(format!(
                    "{} is not a valid secret name",
                    target.name
                )));
            }
            if let Some(key) = target.key_names.iter().find(|k| !is_data_key(k)) {
                return Err(Fabric8Error::InvalidRequirement(format!(
                    "{} is not a valid key for secret {}",
                    key, target.name
                )));
            }
        }

        Ok(targets)
    }

    fn target(&self, kind: SecretKind, name: &str, key_names: Vec<String>) -> SecretTarget {
        SecretTarget {
            name: name.to_string(),
            kind,
            secret_type: self.secret_type.clone(),
            key_names,
        }
    }
}

// Names and keys double as local paths, so they must stay a single path segment.
const MAX_NAME_LEN: usize = 253;

/// DNS-1123 subdomain, as required for secret names
fn is_secret_name(name: &str) -> bool {
    name.len() <= MAX_NAME_LEN
        && !name.contains("..")
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
        && name.starts_with(|c: char| c.is_ascii_alphanumeric())
        && name.ends_with(|c: char| c.is_ascii_alphanumeric())
}

/// Secret data key: `[-._a-zA-Z0-9]+`, never a relative path component
fn is_data_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= MAX_NAME_LEN
        && !key.contains("..")
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_')
}
