//! Settings resolution: environment override, optional config file, defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Environment override for the base cache directory.
pub const CACHE_DIR_ENV: &str = "GITBAKE_CACHE_DIR";

const DEFAULT_CACHE_DIR: &str = "/var/cache/gitbake";
const DEFAULT_BRANCH: &str = "master";
const DEFAULT_CLONE_BASE: &str = "https://github.com";

/// Resolved runtime settings for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Base directory holding one clone per image name.
    pub cache_dir: PathBuf,
    /// Branch used when the CLI token names none.
    pub default_branch: String,
    /// Base URL clones are formed under; tests substitute a local path.
    pub clone_base_url: String,
    /// Home directory, for the credential store and suppression marker.
    pub home_dir: Option<PathBuf>,
}

/// Keys accepted in `~/.config/gitbake/config.toml`.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    cache_dir: Option<PathBuf>,
    default_branch: Option<String>,
    clone_base_url: Option<String>,
}

impl Settings {
    /// Resolve settings from (highest wins) the environment, the config
    /// file, and built-in defaults.
    pub fn load() -> Self {
        let home = home_dir();
        let file = home.as_deref().map(load_file_config).unwrap_or_default();

        let cache_dir = std::env::var_os(CACHE_DIR_ENV)
            .map(PathBuf::from)
            .or(file.cache_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR));

        Settings {
            cache_dir,
            default_branch: file.default_branch.unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            clone_base_url: file.clone_base_url.unwrap_or_else(|| DEFAULT_CLONE_BASE.to_string()),
            home_dir: home,
        }
    }

    /// Deterministic cache location for a given image name. Repeated runs
    /// with the same image name reuse the same on-disk clone.
    pub fn clone_path(&self, image_name: &str) -> PathBuf {
        self.cache_dir.join(image_name)
    }
}

pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Read `~/.config/gitbake/config.toml` if present. The file is always
/// auto-discovered, never user-supplied, so parse errors warn and fall back
/// to defaults instead of aborting the run.
fn load_file_config(home: &Path) -> FileConfig {
    let path = home.join(".config").join("gitbake").join("config.toml");
    let Ok(content) = std::fs::read_to_string(&path) else {
        return FileConfig::default();
    };
    match toml::from_str(&content) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Failed to parse config {}: {}", path.display(), e);
            FileConfig::default()
        }
    }
}

/// Create the base cache directory if it does not exist yet.
///
/// The default location sits under /var and is usually not writable by the
/// invoking user, so PermissionDenied on the direct attempt falls back to
/// `sudo mkdir -p` plus a chown back to the invoking user. Creation failure
/// halts the pipeline.
pub fn ensure_cache_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    println!("Creating cache directory {}", dir.display());
    match std::fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => create_with_sudo(dir),
        Err(e) => Err(e)
            .with_context(|| format!("Failed creating cache directory {}", dir.display())),
    }
}

fn create_with_sudo(dir: &Path) -> Result<()> {
    println!("Insufficient permissions for {}, retrying with sudo", dir.display());
    run_sudo(&["mkdir", "-p"], dir)?;
    if let Ok(user) = std::env::var("USER") {
        run_sudo(&["chown", &user], dir)?;
    }
    Ok(())
}

fn run_sudo(args: &[&str], dir: &Path) -> Result<()> {
    let status = Command::new("sudo")
        .args(args)
        .arg(dir)
        .status()
        .with_context(|| format!("Failed to spawn sudo {}", args.join(" ")))?;
    if !status.success() {
        anyhow::bail!("sudo {} {} exited with {}", args.join(" "), dir.display(), status);
    }
    Ok(())
}
