use semver::Version;
use tracing::debug;

use crate::domain::tag::parse_release_tag;
use crate::git::GitRunner;

/// Resolves the list of previously released versions from repository tags
///
/// Wraps a single `git tag` invocation: each output line is checked against
/// the release-tag grammar, survivors are sorted ascending by semver
/// precedence, and an injected hook observes every version once, in order.
pub struct PreviousVersionsResolver<'g, G: GitRunner> {
    git: &'g G,
}

impl<'g, G: GitRunner> PreviousVersionsResolver<'g, G> {
    /// Create a resolver over the given git boundary
    pub fn new(git: &'g G) -> Self {
        PreviousVersionsResolver { git }
    }

    /// List previously released versions, ascending
    ///
    /// This operation never fails: a failed or empty tag listing yields an
    /// empty list, and candidates outside the release grammar are dropped
    /// one by one.
    ///
    /// # Arguments
    /// * `decorate` - Hook invoked once per returned version, in ascending
    ///   order, after sorting; called for its side effects only
    ///
    /// # Returns
    /// * Previously released versions, sorted ascending by precedence
    pub fn resolve(&self, decorate: &mut dyn FnMut(&Version)) -> Vec<Version> {
        let listing = self.git.run("tag", &[]);
        if !listing.success() {
            debug!(
                "tag listing failed with status {}, treating history as empty",
                listing.status
            );
            return Vec::new();
        }

        let mut versions: Vec<Version> = listing
            .stdout
            .lines()
            .filter_map(parse_release_tag)
            .collect();
        versions.sort();
        debug!("found {} released versions", versions.len());

        for version in &versions {
            decorate(version);
        }
        versions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{GitOutput, MockGit};

    fn resolve_with(git: &MockGit) -> (Vec<Version>, Vec<Version>) {
        let mut decorated = Vec::new();
        let versions =
            PreviousVersionsResolver::new(git).resolve(&mut |v: &Version| decorated.push(v.clone()));
        (versions, decorated)
    }

    #[test]
    fn test_failed_listing_is_empty_history() {
        let git = MockGit::new();
        let (versions, decorated) = resolve_with(&git);

        assert!(versions.is_empty());
        assert!(decorated.is_empty());
        assert_eq!(git.call_count("tag"), 1);
    }

    #[test]
    fn test_empty_listing_is_empty_history() {
        let mut git = MockGit::new();
        git.set_response("tag", GitOutput::ok(""));

        let (versions, decorated) = resolve_with(&git);
        assert!(versions.is_empty());
        assert!(decorated.is_empty());
    }

    #[test]
    fn test_single_release_tag() {
        let mut git = MockGit::new();
        git.set_response("tag", GitOutput::ok("v0.1.1\n"));

        let (versions, _) = resolve_with(&git);
        assert_eq!(versions, vec![Version::parse("0.1.1").unwrap()]);
    }

    #[test]
    fn test_numbered_prerelease_is_accepted() {
        let mut git = MockGit::new();
        git.set_response("tag", GitOutput::ok("v0.1.1-rc1"));

        let (versions, _) = resolve_with(&git);
        assert_eq!(versions, vec![Version::parse("0.1.1-rc1").unwrap()]);
    }

    #[test]
    fn test_invalid_candidates_are_dropped() {
        let mut git = MockGit::new();
        git.set_response("tag", GitOutput::ok("v1.1.1.1\nv1.1.1-rc\n"));

        let (versions, decorated) = resolve_with(&git);
        assert!(versions.is_empty());
        assert!(decorated.is_empty());
    }

    #[test]
    fn test_mixed_listing_keeps_only_releases() {
        let mut git = MockGit::new();
        git.set_response(
            "tag",
            GitOutput::ok("v0.1.1\nnightly\nv1.1.1.1\nv0.1.2\nrelease-0.9.9\n"),
        );

        let (versions, _) = resolve_with(&git);
        assert_eq!(
            versions,
            vec![
                Version::parse("0.1.1").unwrap(),
                Version::parse("0.1.2").unwrap(),
            ]
        );
    }

    #[test]
    fn test_duplicate_versions_are_kept_adjacent() {
        let mut git = MockGit::new();
        git.set_response("tag", GitOutput::ok("v0.2.0\n0.2.0\nv0.1.0\n"));

        let (versions, decorated) = resolve_with(&git);
        assert_eq!(
            versions,
            vec![
                Version::parse("0.1.0").unwrap(),
                Version::parse("0.2.0").unwrap(),
                Version::parse("0.2.0").unwrap(),
            ]
        );
        assert_eq!(decorated, versions);
    }

    #[test]
    fn test_prerelease_sorts_before_its_release() {
        let mut git = MockGit::new();
        git.set_response("tag", GitOutput::ok("v0.1.1\nv0.1.1-rc1\n"));

        let (versions, _) = resolve_with(&git);
        assert_eq!(
            versions,
            vec![
                Version::parse("0.1.1-rc1").unwrap(),
                Version::parse("0.1.1").unwrap(),
            ]
        );
    }

    #[test]
    fn test_decoration_follows_sorted_order() {
        let mut git = MockGit::new();
        git.set_response("tag", GitOutput::ok("v0.1.2\nv0.1.1\n"));

        let (versions, decorated) = resolve_with(&git);
        assert_eq!(decorated, versions);
        assert_eq!(
            decorated,
            vec![
                Version::parse("0.1.1").unwrap(),
                Version::parse("0.1.2").unwrap(),
            ]
        );
    }

    #[test]
    fn test_exactly_one_git_call() {
        let mut git = MockGit::new();
        git.set_response("tag", GitOutput::ok("v0.1.1\nv0.1.2\nv0.2.0\n"));

        let _ = resolve_with(&git);
        assert_eq!(git.calls().len(), 1);
        assert_eq!(git.calls()[0].0, "tag");
        assert!(git.calls()[0].1.is_empty());
    }
}
