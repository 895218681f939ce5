//! Core types for the build pipeline

/// A repository reference parsed from the `owner/repo[:branch]` CLI token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSpec {
    /// The `owner/name` identifier as given on the command line.
    pub repo: String,
    /// Branch to check out; falls back to the configured default.
    pub branch: String,
}

impl RepoSpec {
    /// Split the positional token on `:`; everything after the colon is the
    /// branch. The identifier shape is not validated — a malformed
    /// identifier surfaces later as a clone failure.
    pub fn parse(token: &str, default_branch: &str) -> Self {
        match token.split_once(':') {
            Some((repo, branch)) if !branch.is_empty() => {
                RepoSpec { repo: repo.to_string(), branch: branch.to_string() }
            }
            Some((repo, _)) => {
                RepoSpec { repo: repo.to_string(), branch: default_branch.to_string() }
            }
            None => RepoSpec { repo: token.to_string(), branch: default_branch.to_string() },
        }
    }

    /// Image name derived from the identifier: the text after the last `/`.
    pub fn image_name(&self) -> &str {
        match self.repo.rfind('/') {
            Some(idx) => &self.repo[idx + 1..],
            None => &self.repo,
        }
    }

    /// HTTPS clone URL under `base` (github.com in production; tests point
    /// this at a local directory of bare repositories).
    pub fn clone_url(&self, base: &str) -> String {
        format!("{}/{}.git", base.trim_end_matches('/'), self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::RepoSpec;

    #[test]
    fn parse_without_branch_uses_default() {
        let spec = RepoSpec::parse("acme/widgets", "master");
        assert_eq!(spec.repo, "acme/widgets");
        assert_eq!(spec.branch, "master");
        assert_eq!(spec.image_name(), "widgets");
    }

    #[test]
    fn parse_with_branch() {
        let spec = RepoSpec::parse("acme/widgets:dev", "master");
        assert_eq!(spec.repo, "acme/widgets");
        assert_eq!(spec.branch, "dev");
        assert_eq!(spec.image_name(), "widgets");
    }

    #[test]
    fn parse_with_empty_branch_uses_default() {
        let spec = RepoSpec::parse("acme/widgets:", "master");
        assert_eq!(spec.branch, "master");
    }

    #[test]
    fn image_name_without_slash_is_whole_identifier() {
        let spec = RepoSpec::parse("widgets", "master");
        assert_eq!(spec.image_name(), "widgets");
    }

    #[test]
    fn clone_url_appends_git_suffix() {
        let spec = RepoSpec::parse("acme/widgets", "master");
        assert_eq!(spec.clone_url("https://github.com"), "https://github.com/acme/widgets.git");
        assert_eq!(spec.clone_url("https://github.com/"), "https://github.com/acme/widgets.git");
    }
}
