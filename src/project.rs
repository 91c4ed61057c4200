// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Detection of the project a user is working in.
//!
//! Tooling projects are created next to the user's own project with a fixed
//! suffix (`foo` gets `foo-che` and `foo-jenkins`). Being in any member of such
//! a family means working on the base project.

use crate::constants::PROJECT_SUFFIXES;

/// Strip the longest recognized project suffix, if any.
pub fn strip_project_suffix(name: &str) -> Option<&str> {
    PROJECT_SUFFIXES
        .iter()
        .filter_map(|suffix| name.strip_suffix(suffix))
        .filter(|base| !base.is_empty())
        .min_by_key(|base| base.len())
}

/// Resolve the namespace operations should target.
///
/// A derived `current` maps onto its base project when that project exists.
/// Otherwise the family `current` belongs to is used, and when `current` is
/// not part of any family the first base project that has a derived sibling. An empty string means no project could be determined and
/// the caller has to fall back to its default namespace.
pub fn resolve<I, S>(current: &str, projects: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let projects: Vec<S> = projects.into_iter().collect();
    let names: Vec<&str> = projects.iter().map(|p| p.as_ref()).collect();

    if let Some(base) = strip_project_suffix(current) {
        if names.contains(&base) {
            return base.to_string();
        }
    }

    let families: Vec<&str> = names
        .iter()
        .copied()
        .filter(|name| strip_project_suffix(name).is_none())
        .filter(|base| {
            PROJECT_SUFFIXES.iter().any(|suffix| {
                let derived = format!("{}{}", base, suffix);
                names.iter().any(|n| *n == derived)
            })
        })
        .collect();

    let current_base = strip_project_suffix(current).unwrap_or(current);

    families
        .iter()
        .find(|base| **base == current_base)
        .or_else(|| families.first())
        .map(|base| base.to_string())
        .unwrap_or_default()
}
