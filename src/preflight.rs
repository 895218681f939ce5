//! Git availability and version gate.

use anyhow::Result;

use crate::git::{self, GitError};

/// Minimum supported git, folded per component: 1.7.9.0.
const MIN_VERSION: u64 = 1790;

/// Verify the git binary is present and recent enough. Hard dependency
/// check: no retries, the pipeline stops here on failure.
pub fn ensure_git() -> Result<()> {
    let banner = match git::version() {
        Ok(banner) => banner,
        Err(GitError::NotInstalled(_)) => {
            anyhow::bail!("git does not appear to be installed; install git 1.7.9 or newer")
        }
        Err(other) => return Err(other.into()),
    };

    let token = version_token(&banner);
    let folded = fold_version(token);
    tracing::debug!("git reported version {token} (folded {folded})");

    if folded < MIN_VERSION {
        anyhow::bail!("git {token} is too old; version 1.7.9 or newer is required");
    }
    Ok(())
}

/// Pull the dotted version out of the banner: `git version 2.39.2` → `2.39.2`.
fn version_token(banner: &str) -> &str {
    banner.split_whitespace().nth(2).unwrap_or("")
}

/// Fold a dotted version into a single comparable number, padded to four
/// components: `1.7.9.0` → 1790, `2.39.2` → 5920. Non-numeric suffixes
/// inside a component (as in `2.39.2-rc1`) are ignored.
fn fold_version(version: &str) -> u64 {
    let mut components: Vec<u64> = version
        .split('.')
        .map(|part| {
            part.chars()
                .take_while(|c| c.is_ascii_digit())
                .collect::<String>()
                .parse()
                .unwrap_or(0)
        })
        .collect();
    components.truncate(4);
    components.resize(4, 0);
    components.into_iter().fold(0, |acc, component| acc * 10 + component)
}
