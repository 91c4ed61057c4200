// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for operators. Diagnostics go through `tracing`; this is
//! what a command reports as its result. Respects `NO_COLOR`.

use crate::error::{Fabric8Error, Result};
use crate::secrets::SecretOutcome;
use console::style;

fn colors_enabled() -> bool {
    std::env::var("NO_COLOR").is_err()
}

pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✓").green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

pub fn failure(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

pub fn warn(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("⚠").yellow(), msg);
    } else {
        println!("⚠ {}", msg);
    }
}

pub fn hint(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        println!("→ {}", msg);
    }
}

/// Pass/fail line for one attempted secret
pub fn secret_result(outcome: &SecretOutcome) {
    match &outcome.error {
        None => success(&format!("{} secret", outcome.name)),
        Some(e) => failure(&format!("{} secret: {}", outcome.name, e)),
    }
}

/// `Setting up secrets on your OpenShift installation at https://... in namespace foo`
pub fn banner(action: &str, flavor: impl std::fmt::Display, host: &str, namespace: &str) {
    if colors_enabled() {
        println!(
            "{} {} installation at {} in namespace {}\n",
            action,
            style(flavor).green().bold(),
            style(host).green(),
            style(namespace).green()
        );
    } else {
        println!(
            "{} {} installation at {} in namespace {}\n",
            action, flavor, host, namespace
        );
    }
}

/// Ask before acting unless the caller already agreed
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| Fabric8Error::PromptError(e.to_string()))
}
