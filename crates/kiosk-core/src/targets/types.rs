use std::fmt;

use crate::targets::errors::TargetError;

/// Content locator shown on the display surface.
///
/// Any non-empty text is accepted: URLs, `file://` references, or whatever a
/// remote client sent. Nothing beyond emptiness is validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target(String);

impl Target {
    pub fn new(value: impl Into<String>) -> Result<Self, TargetError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TargetError::Empty);
        }
        if trimmed.len() == value.len() {
            Ok(Self(value))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Target {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered, never-empty list of targets with a cursor on the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetList {
    targets: Vec<Target>,
    index: usize,
}

// Never empty, so there is no `is_empty`.
#[allow(clippy::len_without_is_empty)]
impl TargetList {
    pub fn single(target: Target) -> Self {
        Self {
            targets: vec![target],
            index: 0,
        }
    }

    /// Build a list from the given targets, or `None` when there are none.
    pub fn from_targets(targets: Vec<Target>) -> Option<Self> {
        if targets.is_empty() {
            None
        } else {
            Some(Self { targets, index: 0 })
        }
    }

    pub fn current(&self) -> &Target {
        &self.targets[self.index]
    }

    /// Move the cursor to the next target, wrapping at the end.
    pub fn advance(&mut self) -> &Target {
        self.index = (self.index + 1) % self.targets.len();
        self.current()
    }

    /// Replace the whole list with a single target received remotely.
    pub fn replace_with(&mut self, target: Target) {
        self.targets = vec![target];
        self.index = 0;
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }
}
