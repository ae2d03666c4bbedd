use regex::Regex;
use serde::{Serialize, Serializer};

/// Marker word scanned for in tag bodies when the descriptor does not
/// configure one
pub const DEFAULT_CODE_NAME_TAG: &str = "codename";

/// Outcome of reading a release code name from an annotated tag body
///
/// Releases carry their code name in the tag annotation, on a line such as
/// `v1.2.3 codename(Awesome Ant)`. Consumers distinguish a tag with no code
/// name line at all from one whose line could not be read, so the two
/// degraded outcomes stay separate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeName {
    /// A well-formed `codename(<name>)` entry was found
    Named(String),
    /// The tag body has no code name line
    Absent,
    /// A code name line exists but carries no usable name
    Malformed,
}

impl CodeName {
    /// Extract the code name from a pretty-printed tag body
    ///
    /// Scans for the first line containing `marker` and reads the name out
    /// of its `marker(<name>)` form.
    ///
    /// # Arguments
    /// * `body` - Output of `git cat-file -p <tag>`
    /// * `marker` - The marker word, usually [DEFAULT_CODE_NAME_TAG]
    pub fn from_tag_body(body: &str, marker: &str) -> Self {
        let line = match body.lines().find(|line| line.contains(marker)) {
            Some(line) => line,
            None => return CodeName::Absent,
        };

        let pattern = format!(r"{}\((.*)\)", regex::escape(marker));
        let re = match Regex::new(&pattern) {
            Ok(re) => re,
            Err(_) => return CodeName::Malformed,
        };

        match re.captures(line).and_then(|caps| caps.get(1)) {
            Some(name) if !name.as_str().trim().is_empty() => {
                CodeName::Named(name.as_str().trim().to_string())
            }
            _ => CodeName::Malformed,
        }
    }

    /// The name itself, when one was found
    pub fn name(&self) -> Option<&str> {
        match self {
            CodeName::Named(name) => Some(name),
            _ => None,
        }
    }
}

/// Wire form kept compatible with the tooling this feeds: a name serializes
/// as itself, an absent code name as null, a malformed one as the empty
/// string.
impl Serialize for CodeName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CodeName::Named(name) => serializer.serialize_str(name),
            CodeName::Absent => serializer.serialize_none(),
            CodeName::Malformed => serializer.serialize_str(""),
        }
    }
}
