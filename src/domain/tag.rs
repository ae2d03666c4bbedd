use std::sync::OnceLock;

use regex::Regex;
use semver::Version;

/// Shape of a tag that denotes a released version: an optional `v` prefix,
/// three numeric components, and an optional hyphenated prerelease that must
/// end in a digit. `v1.1.1-rc1` is a release tag, `v1.1.1-rc` is not.
const RELEASE_TAG_PATTERN: &str = r"^v?\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]*\d)?$";

fn release_tag_regex() -> &'static Regex {
    static RELEASE_TAG: OnceLock<Regex> = OnceLock::new();
    RELEASE_TAG.get_or_init(|| {
        Regex::new(RELEASE_TAG_PATTERN).expect("release tag pattern is valid")
    })
}

/// Parse one tag line into a released version
///
/// Returns `None` for anything outside the release-tag grammar: extra
/// numeric components (`v1.1.1.1`), prereleases without a trailing digit
/// (`v1.1.1-rc`), or arbitrary tag names. Candidates that pass the grammar
/// still go through the semver parser, which rejects leading-zero
/// components and empty prerelease identifiers.
///
/// # Arguments
/// * `line` - One line of `git tag` output
///
/// # Returns
/// * `Some(Version)` - The parsed version, `v` prefix stripped
/// * `None` - The line does not name a released version
pub fn parse_release_tag(line: &str) -> Option<Version> {
    let candidate = line.trim();
    if !release_tag_regex().is_match(candidate) {
        return None;
    }
    let bare = candidate.strip_prefix('v').unwrap_or(candidate);
    Version::parse(bare).ok()
}
