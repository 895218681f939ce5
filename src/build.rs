//! Docker build dispatch.

use anyhow::{Context, Result};
use console::style;
use std::path::Path;
use std::process::Command;
use thiserror::Error;

/// File the checked-out repository must carry to be buildable.
pub const BUILD_DESCRIPTOR: &str = "Dockerfile";

/// A docker build that ran and exited non-zero. Carries docker's exit code
/// so main can propagate it verbatim as the process exit status.
#[derive(Debug, Error)]
#[error("docker build exited with status {code}")]
pub struct BuildFailed {
    pub code: i32,
}

/// Run `docker build` against the checked-out tree, tagging the result
/// `<image>:<branch>`. Cache reuse and intermediate-container retention are
/// disabled; the clone is rebuilt from scratch every time.
pub fn build_image(workdir: &Path, image_name: &str, branch: &str) -> Result<()> {
    ensure_descriptor(workdir)?;

    let tag = format!("{image_name}:{branch}");
    println!("Building {} from {}", style(&tag).bold(), workdir.display());

    let status = Command::new("docker")
        .args(["build", "--no-cache", "--force-rm", "-t", &tag, "."])
        .current_dir(workdir)
        .status()
        .context("Failed to spawn docker — is docker installed?")?;

    if !status.success() {
        return Err(BuildFailed { code: status.code().unwrap_or(1) }.into());
    }
    Ok(())
}

/// The build only makes sense when the repository declares how to assemble
/// an image; bail before touching docker otherwise.
pub fn ensure_descriptor(workdir: &Path) -> Result<()> {
    let descriptor = workdir.join(BUILD_DESCRIPTOR);
    if !descriptor.is_file() {
        anyhow::bail!("No {BUILD_DESCRIPTOR} found in {} — nothing to build", workdir.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ensure_descriptor, BuildFailed};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn descriptor_missing_is_an_error() {
        let tmp = TempDir::new().expect("tmp");
        let err = ensure_descriptor(tmp.path()).expect_err("no Dockerfile");
        assert!(err.to_string().contains("No Dockerfile"));
    }

    #[test]
    fn descriptor_present_passes() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("Dockerfile"), "FROM scratch\n").expect("write");
        ensure_descriptor(tmp.path()).expect("descriptor present");
    }

    #[test]
    fn descriptor_must_be_a_file() {
        let tmp = TempDir::new().expect("tmp");
        fs::create_dir(tmp.path().join("Dockerfile")).expect("mkdir");
        assert!(ensure_descriptor(tmp.path()).is_err());
    }

    #[test]
    fn build_failure_keeps_docker_exit_code() {
        let failed = BuildFailed { code: 3 };
        assert_eq!(failed.code, 3);
        assert!(failed.to_string().contains("status 3"));
    }
}
