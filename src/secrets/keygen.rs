// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! SSH key pair generation.

use crate::constants::RSA_KEY_BITS;
use crate::error::{Fabric8Error, Result};
use rsa::pkcs1::{EncodeRsaPrivateKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};
use ssh_key::public::KeyData;
use ssh_key::PublicKey;
use tracing::{debug, instrument};

/// Freshly generated key material, both halves already encoded
#[derive(Clone)]
pub struct KeyPair {
    /// PEM encoded PKCS#1 private key
    pub private: Vec<u8>,
    /// Single line `authorized_keys` entry
    pub public: Vec<u8>,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("private", &"<redacted>")
            .field("public", &String::from_utf8_lossy(&self.public))
            .finish()
    }
}

/// Generate an RSA key pair usable by any standard SSH client
#[instrument]
pub fn generate_key_pair() -> Result<KeyPair> {
    let mut rng = rand::thread_rng();
    let private_key = RsaPrivateKey::new(&mut rng, RSA_KEY_BITS)
        .map_err(|e| Fabric8Error::KeyGenerationError(e.to_string()))?;

    let private_pem = private_key
        .to_pkcs1_pem(LineEnding::LF)
        .map_err(|e| Fabric8Error::KeyGenerationError(e.to_string()))?;
    let public = authorized_key(&private_key.to_public_key())?;

    debug!("Generated {} bit RSA key pair", RSA_KEY_BITS);

    Ok(KeyPair {
        private: private_pem.as_bytes().to_vec(),
        public: public.into_bytes(),
    })
}

/// Encode a public key in the `authorized_keys` format, newline terminated
pub fn authorized_key(key: &RsaPublicKey) -> Result<String> {
    let key_data = ssh_key::public::RsaPublicKey::try_from(key)
        .map_err(|e| Fabric8Error::KeyGenerationError(e.to_string()))?;
    let line = PublicKey::new(KeyData::Rsa(key_data), "")
        .to_openssh()
        .map_err(|e| Fabric8Error::KeyGenerationError(e.to_string()))?;
    Ok(format!("{}\n", line.trim_end()))
}
