use serde::{Deserialize, Serialize};

/// Longest accepted tag, in characters.
pub const DEFAULT_MAX_TAG_LEN: usize = 30;
/// Most tags a list may hold.
pub const DEFAULT_MAX_TAGS: usize = 50;

/// Bounds applied when accepting a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagLimits {
    pub max_tag_len: usize,
    pub max_tags: usize,
}

impl Default for TagLimits {
    fn default() -> Self {
        Self {
            max_tag_len: DEFAULT_MAX_TAG_LEN,
            max_tags: DEFAULT_MAX_TAGS,
        }
    }
}
