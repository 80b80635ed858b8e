use vitrine_model::prelude::{Page, STARTING_PAGE_INDEX};

use crate::network::{NetworkFailure, NetworkResult};

/// Which end of the loaded window a request extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadDirection {
    Refresh,
    Append,
    Prepend,
}

/// A request for one page.
///
/// Two requests are identical when direction, key and size all match;
/// identical requests issued while one is in flight share its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadRequest {
    /// Drop everything and load around `key`, or from the start when `None`.
    Refresh { key: Option<u32>, load_size: u32 },
    Append { key: u32, load_size: u32 },
    Prepend { key: u32, load_size: u32 },
}

impl LoadRequest {
    pub fn initial(load_size: u32) -> Self {
        LoadRequest::Refresh {
            key: None,
            load_size,
        }
    }

    pub fn key(&self) -> Option<u32> {
        match *self {
            LoadRequest::Refresh { key, .. } => key,
            LoadRequest::Append { key, .. }
            | LoadRequest::Prepend { key, .. } => Some(key),
        }
    }

    pub fn load_size(&self) -> u32 {
        match *self {
            LoadRequest::Refresh { load_size, .. }
            | LoadRequest::Append { load_size, .. }
            | LoadRequest::Prepend { load_size, .. } => load_size,
        }
    }

    pub fn direction(&self) -> LoadDirection {
        match self {
            LoadRequest::Refresh { .. } => LoadDirection::Refresh,
            LoadRequest::Append { .. } => LoadDirection::Append,
            LoadRequest::Prepend { .. } => LoadDirection::Prepend,
        }
    }

    /// Page index the request resolves to. A keyless refresh starts at the
    /// first page, and keys below it are clamped.
    pub fn page_index(&self) -> u32 {
        self.key()
            .unwrap_or(STARTING_PAGE_INDEX)
            .max(STARTING_PAGE_INDEX)
    }
}

/// Outcome of a single page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadResult<T> {
    Page {
        items: Vec<T>,
        prev_key: Option<u32>,
        next_key: Option<u32>,
    },
    Error { cause: NetworkFailure },
}

/// Key of the page before `page_index`, absent on the first page.
pub fn prev_key_for(page_index: u32) -> Option<u32> {
    (page_index > STARTING_PAGE_INDEX).then(|| page_index - 1)
}

/// Key of the page after `page_index`, absent once a page comes back empty.
pub fn next_key_for(page_index: u32, is_empty: bool) -> Option<u32> {
    (!is_empty).then(|| page_index.saturating_add(1))
}

impl<T> LoadResult<T> {
    /// Derive the page keys for a loaded page.
    ///
    /// Keys follow from the requested index alone. The server's
    /// `has_next`/`has_previous` flags are advisory and not consulted: the
    /// stream only ends on an empty page.
    pub fn from_network(
        page_index: u32,
        result: NetworkResult<Page<T>>,
    ) -> Self {
        match result.into_result() {
            Ok(page) => {
                let next_key = next_key_for(page_index, page.is_empty());
                LoadResult::Page {
                    items: page.items,
                    prev_key: prev_key_for(page_index),
                    next_key,
                }
            }
            Err(cause) => LoadResult::Error { cause },
        }
    }

    /// A page with no items and no successor.
    pub fn end_of_stream(page_index: u32) -> Self {
        LoadResult::Page {
            items: Vec::new(),
            prev_key: prev_key_for(page_index),
            next_key: None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadResult::Error { .. })
    }

    pub fn items(&self) -> Option<&[T]> {
        match self {
            LoadResult::Page { items, .. } => Some(items),
            LoadResult::Error { .. } => None,
        }
    }

    pub fn prev_key(&self) -> Option<u32> {
        match self {
            LoadResult::Page { prev_key, .. } => *prev_key,
            LoadResult::Error { .. } => None,
        }
    }

    pub fn next_key(&self) -> Option<u32> {
        match self {
            LoadResult::Page { next_key, .. } => *next_key,
            LoadResult::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&NetworkFailure> {
        match self {
            LoadResult::Error { cause } => Some(cause),
            LoadResult::Page { .. } => None,
        }
    }
}
