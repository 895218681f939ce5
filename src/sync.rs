//! Clone-or-fetch synchronization of the repository cache.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::Settings;
use crate::domain::RepoSpec;
use crate::git::{self, GitError};

/// Bring the cached clone for `image_name` up to date and check out
/// `origin/<branch>`. Returns the working-tree path.
///
/// The clone is a disposable cache, not a workspace: the checkout is forced
/// and discards local modifications.
pub fn sync_repository(settings: &Settings, spec: &RepoSpec, image_name: &str) -> Result<PathBuf> {
    let path = settings.clone_path(image_name);

    if path.is_dir() {
        println!("Updating {} in {}", spec.repo, path.display());
        git::fetch(&path).with_context(|| format!("Failed fetching updates for {}", spec.repo))?;
    } else {
        let url = spec.clone_url(&settings.clone_base_url);
        println!("Cloning {url} into {}", path.display());
        git::clone(&url, &path).with_context(|| format!("Failed cloning {url}"))?;
    }

    let refname = format!("origin/{}", spec.branch);
    match git::checkout_force(&path, &refname) {
        Ok(()) => Ok(path),
        Err(e @ GitError::Failed { .. }) => Err(anyhow::Error::new(e).context(format!(
            "Could not check out {refname} — does branch '{}' exist in {}?",
            spec.branch, spec.repo
        ))),
        Err(other) => Err(other).with_context(|| format!("Failed checking out {refname}")),
    }
}
