//! Page navigation for the server-paginated lists.
//!
//! The controller never computes bounds. It remembers the `first`/`last`
//! flags of the last page the server returned for each list and refuses to
//! move in a direction those flags disable.

use std::collections::HashMap;

use crate::error::ValidationError;
use crate::models::Page;

/// The paginated lists the client shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PagedList {
    RestaurantSearch,
    Favorites,
    Feed,
}

impl PagedList {
    /// The `size` query parameter sent when loading this list.
    pub fn page_size(&self) -> u32 {
        match self {
            PagedList::RestaurantSearch => 10,
            PagedList::Favorites => 5,
            PagedList::Feed => 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Previous,
    Next,
}

impl PageDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageDirection::Previous => "previous",
            PageDirection::Next => "next",
        }
    }
}

/// Position reported by the server for one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub number: u32,
    pub total_pages: u32,
    pub first: bool,
    pub last: bool,
}

impl<T> From<&Page<T>> for PageCursor {
    fn from(page: &Page<T>) -> Self {
        Self {
            number: page.number,
            total_pages: page.total_pages,
            first: page.first,
            last: page.last,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PaginationController {
    cursors: HashMap<PagedList, PageCursor>,
}

impl PaginationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the flags of a freshly loaded page.
    pub fn record<T>(&mut self, list: PagedList, page: &Page<T>) {
        self.cursors.insert(list, PageCursor::from(page));
    }

    pub fn cursor(&self, list: PagedList) -> Option<PageCursor> {
        self.cursors.get(&list).copied()
    }

    pub fn can_go(&self, list: PagedList, direction: PageDirection) -> bool {
        match (self.cursors.get(&list), direction) {
            (None, _) => false,
            (Some(c), PageDirection::Previous) => !c.first,
            (Some(c), PageDirection::Next) => !c.last,
        }
    }

    /// Page index to request when moving one step.
    pub fn step(&self, list: PagedList, direction: PageDirection) -> Result<u32, ValidationError> {
        let unavailable = ValidationError::PageUnavailable {
            direction: direction.as_str(),
        };
        if !self.can_go(list, direction) {
            return Err(unavailable);
        }
        let current = self.cursors.get(&list).map(|c| c.number).unwrap_or(0);
        let index = match direction {
            PageDirection::Previous => current.checked_sub(1).ok_or(unavailable)?,
            PageDirection::Next => current + 1,
        };
        self.go_to(list, index)
    }

    /// Validate a jump to `index`. Reloading the current page is always
    /// allowed; moving requires the matching flag to permit that direction.
    pub fn go_to(&self, list: PagedList, index: u32) -> Result<u32, ValidationError> {
        let Some(cursor) = self.cursors.get(&list) else {
            return if index == 0 {
                Ok(0)
            } else {
                Err(ValidationError::PageUnavailable { direction: "next" })
            };
        };
        if index > cursor.number && cursor.last {
            return Err(ValidationError::PageUnavailable { direction: "next" });
        }
        if index < cursor.number && cursor.first {
            return Err(ValidationError::PageUnavailable {
                direction: "previous",
            });
        }
        Ok(index)
    }

    pub fn forget(&mut self, list: PagedList) {
        self.cursors.remove(&list);
    }

    pub fn clear(&mut self) {
        self.cursors.clear();
    }
}
