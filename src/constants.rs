// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Label selectors for the configmaps this tool reads
pub mod labels {
    /// Catalog configmaps holding deployable templates
    pub const CATALOG_SELECTOR: &str = "provider=fabric8.io,kind=catalog";
    /// The single configmap holding environment entries
    pub const ENVIRONMENTS_SELECTOR: &str = "kind=environments";
    /// Installed package configmaps
    pub const PACKAGE_SELECTOR: &str = "fabric8.io/kind=package";
    /// Label on a package configmap carrying its version
    pub const VERSION: &str = "version";
}

/// File names expected under a secret's import directory
pub mod files {
    pub const SSH_PRIVATE_KEY: &str = "ssh-key";
    pub const SSH_PUBLIC_KEY: &str = "ssh-key.pub";
    pub const GPG_KEYS: [&str; 4] = ["gpg.conf", "secring.gpg", "pubring.gpg", "trustdb.gpg"];
    pub const HUB_TOKEN: &str = "hub";
    pub const SSH_CONFIG: &str = "config";
    pub const DOCKER_CONFIG: &str = "config.json";
    pub const MAVEN_SETTINGS: &str = "settings.xml";
}

/// Suffixes that derive a project from its base project (`foo` -> `foo-che`)
pub const PROJECT_SUFFIXES: [&str; 2] = ["-che", "-jenkins"];

/// Value of `--work-project` that turns on project detection
pub const AUTODETECT: &str = "autodetect";

/// API groups only served by OpenShift
pub mod openshift {
    pub const PROJECT_GROUP: &str = "project.openshift.io";
    pub const TEMPLATE_GROUP: &str = "template.openshift.io";
}

/// Key size of generated SSH key pairs
pub const RSA_KEY_BITS: usize = 2048;

pub const DEFAULT_MAVEN_SETTINGS_URL: &str =
    "https://raw.githubusercontent.com/fabric8io/gofabric8/master/default-secrets/mvnsettings.xml";

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

pub const SECRET_ANNOTATIONS_DOCS_URL: &str =
    "https://github.com/fabric8io/fabric8/blob/master/docs/secretAnnotations.md";

/// Field manager name used for server-side apply
pub const FIELD_MANAGER: &str = "fabric8ctl";
