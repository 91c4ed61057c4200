// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Annotation driven secret provisioning.

pub mod keygen;
pub mod keystore;
pub mod kind;
pub mod provisioner;
pub mod resolver;
pub mod scanner;

pub use keygen::{generate_key_pair, KeyPair};
pub use keystore::LocalKeyStore;
pub use kind::{SecretKind, SecretRequirement, SecretTarget};
pub use provisioner::{ProvisionReport, SecretOutcome, SecretProvisioner};
pub use resolver::{Resolution, SecretDataResolver};
pub use scanner::scan;
