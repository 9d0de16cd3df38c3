use thiserror::Error;

use crate::limits::TagLimits;

/// Why a candidate token was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagRejection {
    #[error("tag is empty")]
    Empty,
    #[error("tag {0:?} is already in the list")]
    Duplicate(String),
    #[error("tag is {len} characters long, the limit is {max}")]
    TooLong { len: usize, max: usize },
    #[error("list already holds the maximum of {max} tags")]
    ListFull { max: usize },
}

/// Ordered, duplicate-free list of accepted tags.
///
/// Every tag was non-empty and within `max_tag_len` characters when it was
/// pushed, and the list never grows past `max_tags`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList {
    tags: Vec<String>,
    limits: TagLimits,
}

impl TagList {
    pub fn new(limits: TagLimits) -> Self {
        Self {
            tags: Vec::new(),
            limits,
        }
    }

    pub fn limits(&self) -> TagLimits {
        self.limits
    }

    /// Check a candidate against the list as it is now.
    pub fn check(&self, tag: &str) -> Result<(), TagRejection> {
        if tag.is_empty() {
            return Err(TagRejection::Empty);
        }
        if self.contains(tag) {
            return Err(TagRejection::Duplicate(tag.to_string()));
        }
        let len = tag.chars().count();
        if len > self.limits.max_tag_len {
            return Err(TagRejection::TooLong {
                len,
                max: self.limits.max_tag_len,
            });
        }
        if self.tags.len() >= self.limits.max_tags {
            return Err(TagRejection::ListFull {
                max: self.limits.max_tags,
            });
        }
        Ok(())
    }

    /// Append `tag` if it passes [`TagList::check`].
    pub fn try_push(&mut self, tag: &str) -> Result<(), TagRejection> {
        self.check(tag)?;
        self.tags.push(tag.to_string());
        Ok(())
    }

    /// Remove `tag`, returning whether it was present.
    pub fn remove(&mut self, tag: &str) -> bool {
        match self.tags.iter().position(|t| t == tag) {
            Some(index) => {
                self.tags.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    /// Tags joined by single spaces, in insertion order.
    pub fn joined(&self) -> String {
        self.tags.join(" ")
    }
}
