use serde::{Deserialize, Serialize};

/// One page of a server-paginated list.
///
/// Replaced wholesale on every page fetch. `first`/`last` come straight
/// from the server and are the only bounds the client trusts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    /// Zero-based page index.
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default = "default_true")]
    pub first: bool,
    #[serde(default = "default_true")]
    pub last: bool,
}

fn default_true() -> bool {
    true
}

impl<T> Page<T> {
    /// A single empty page: both directions disabled.
    pub fn empty() -> Self {
        Self {
            content: Vec::new(),
            number: 0,
            size: 0,
            total_pages: 0,
            total_elements: 0,
            first: true,
            last: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        !self.first
    }

    pub fn has_next(&self) -> bool {
        !self.last
    }

    /// Drop every entry matching `pred`, keeping `total_elements` in step.
    ///
    /// Returns how many entries were removed.
    pub fn remove_where<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.content.len();
        self.content.retain(|item| !pred(item));
        let removed = before - self.content.len();
        self.total_elements = self.total_elements.saturating_sub(removed as u64);
        removed
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}
