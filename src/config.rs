// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAVEN_SETTINGS_URL};
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Tool configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory that secret identifiers are resolved against
    pub secrets_dir: PathBuf,
    /// Document used when no local maven settings exist
    pub maven_settings_url: Url,
    pub fetch_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let secrets_dir = env::var("FABRIC8_SECRETS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        let maven_settings_url = env::var("FABRIC8_MAVEN_SETTINGS_URL")
            .unwrap_or_else(|_| DEFAULT_MAVEN_SETTINGS_URL.to_string())
            .parse()
            .context("FABRIC8_MAVEN_SETTINGS_URL is not a valid URL")?;
        let fetch_timeout_secs: u64 = env::var("FABRIC8_FETCH_TIMEOUT_SECS")
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS.to_string())
            .parse()
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);

        Ok(Config {
            secrets_dir,
            maven_settings_url,
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
        })
    }

    /// Combine the environment configuration with the `secrets` command flags
    pub fn secrets_options(
        &self,
        print_import_paths: bool,
        write_generated_keys: bool,
        generate_if_missing: bool,
    ) -> SecretsOptions {
        SecretsOptions {
            print_import_paths,
            write_generated_keys,
            generate_if_missing,
            secrets_dir: self.secrets_dir.clone(),
            maven_settings_url: self.maven_settings_url.clone(),
            fetch_timeout: self.fetch_timeout,
        }
    }
}

/// Everything secret resolution needs to know, passed by value into the pipeline
#[derive(Debug, Clone)]
pub struct SecretsOptions {
    /// Log every local path before it is imported
    pub print_import_paths: bool,
    /// Persist generated key material to the local key store
    pub write_generated_keys: bool,
    /// Synthesize key material (or fetch defaults) when nothing can be imported
    pub generate_if_missing: bool,
    pub secrets_dir: PathBuf,
    pub maven_settings_url: Url,
    pub fetch_timeout: Duration,
}
