// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Fabric8Error {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to decode {what}: {reason}")]
    DecodeError { what: String, reason: String },

    #[error("No matching secret data type for annotation {0}")]
    UnrecognizedSecretKind(String),

    #[error("Invalid secret annotation: {0}")]
    InvalidRequirement(String),

    #[error("Failed to fetch default document: {0}")]
    FetchError(String),

    #[error("Failed to generate key pair: {0}")]
    KeyGenerationError(String),

    #[error("No configmap labelled kind=environments in namespace {namespace}")]
    NoEnvironmentsConfigMap { namespace: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Prompt failed: {0}")]
    PromptError(String),
}

impl Fabric8Error {
    /// Errors after which the annotation contract can no longer be trusted.
    /// These abort the whole provisioning run instead of a single requirement.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Fabric8Error::DecodeError { .. } | Fabric8Error::UnrecognizedSecretKind(_)
        )
    }

    pub fn decode(what: impl Into<String>, reason: impl ToString) -> Self {
        Fabric8Error::DecodeError {
            what: what.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Fabric8Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_and_kind_errors_are_fatal() {
        assert!(Fabric8Error::decode("template foo", "bad kind").is_fatal());
        assert!(Fabric8Error::UnrecognizedSecretKind("a/b".to_string()).is_fatal());
    }

    #[test]
    fn test_per_requirement_errors_are_not_fatal() {
        assert!(!Fabric8Error::FetchError("timeout".to_string()).is_fatal());
        assert!(!Fabric8Error::InvalidRequirement("".to_string()).is_fatal());
    }
}
