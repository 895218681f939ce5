//! gitbake: build container images straight from GitHub repositories
//!
//! Clones (or updates) a cached copy of a GitHub repository, checks out the
//! requested branch, and runs `docker build` against the working tree.

mod build;
mod cli;
mod config;
mod credentials;
mod domain;
mod git;
mod preflight;
mod sync;

fn main() {
    match cli::run() {
        Ok(()) => {}
        Err(err) => {
            eprintln!("Error: {err:#}");
            // A failed docker build passes its own exit code through
            // untouched; everything else is this tool's error and exits 1.
            let code = err.downcast_ref::<build::BuildFailed>().map_or(1, |failed| failed.code);
            std::process::exit(code);
        }
    }
}
