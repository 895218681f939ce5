//! The `github` subcommand: clone or update, check out, build.

use anyhow::Result;
use clap::Args;

use crate::build;
use crate::config::{self, Settings};
use crate::credentials::{self, CredentialPaths};
use crate::domain::RepoSpec;
use crate::preflight;
use crate::sync;

#[derive(Args)]
pub struct GithubArgs {
    /// Repository to build, as <owner>/<repo> or <owner>/<repo>:<branch>
    #[arg(value_name = "OWNER/REPO[:BRANCH]")]
    pub repo: Option<String>,

    /// Image name (defaults to the repository name)
    #[arg(value_name = "IMAGE")]
    pub image: Option<String>,
}

pub fn run(args: GithubArgs) -> Result<()> {
    preflight::ensure_git()?;

    // The argument check precedes every filesystem side effect, so a bare
    // `gitbake github` exits without prompting or touching the cache.
    // Optional at the clap layer to keep the exit code at 1.
    let Some(token) = args.repo.as_deref() else {
        anyhow::bail!(
            "missing required argument <owner>/<repo>[:branch]\n\
             Usage: gitbake github <owner>/<repo>[:branch] [image]"
        );
    };

    let settings = Settings::load();
    let spec = RepoSpec::parse(token, &settings.default_branch);
    let image_name = args.image.unwrap_or_else(|| spec.image_name().to_string());
    tracing::debug!("repo {} branch {} image {image_name}", spec.repo, spec.branch);

    match settings.home_dir.as_deref() {
        Some(home) => credentials::setup(&CredentialPaths::under_home(home))?,
        None => tracing::debug!("HOME is not set; skipping credential setup"),
    }

    config::ensure_cache_dir(&settings.cache_dir)?;

    let workdir = sync::sync_repository(&settings, &spec, &image_name)?;
    build::build_image(&workdir, &image_name, &spec.branch)
}
