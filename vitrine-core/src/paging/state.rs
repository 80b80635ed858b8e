use crate::network::NetworkFailure;

/// Load state of a paging session.
///
/// `retry` marks a load issued while the session was [`Terminal`], so a
/// consumer can render "retrying" instead of a first attempt.
///
/// [`Terminal`]: SessionState::Terminal
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    LoadingInitial {
        retry: bool,
    },
    LoadingForward {
        key: u32,
        retry: bool,
    },
    LoadingBackward {
        key: u32,
        retry: bool,
    },
    Terminal(NetworkFailure),
    EndOfStream,
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            SessionState::LoadingInitial { .. }
                | SessionState::LoadingForward { .. }
                | SessionState::LoadingBackward { .. }
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Terminal(_))
    }

    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, SessionState::EndOfStream)
    }

    pub fn error(&self) -> Option<&NetworkFailure> {
        match self {
            SessionState::Terminal(cause) => Some(cause),
            _ => None,
        }
    }
}

/// Position of the item the consumer was looking at, counted across all
/// loaded pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RefreshAnchor {
    pub position: usize,
}

impl RefreshAnchor {
    pub fn new(position: usize) -> Self {
        Self { position }
    }
}

/// One page held by a paging session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPage<T> {
    pub page_index: u32,
    pub items: Vec<T>,
    pub prev_key: Option<u32>,
    pub next_key: Option<u32>,
}

/// Read-only view of the pages a session has loaded, in page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingSnapshot<T> {
    pub pages: Vec<LoadedPage<T>>,
    pub state: SessionState,
}

impl<T> Default for PagingSnapshot<T> {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            state: SessionState::Idle,
        }
    }
}

impl<T> PagingSnapshot<T> {
    pub fn item_count(&self) -> usize {
        self.pages.iter().map(|page| page.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.pages.iter().flat_map(|page| page.items.iter())
    }

    /// The page containing `position`, or the last page when the position
    /// lies past everything loaded.
    pub fn closest_page_to_position(
        &self,
        position: usize,
    ) -> Option<&LoadedPage<T>> {
        let mut offset = 0;
        for page in &self.pages {
            offset += page.items.len();
            if position < offset {
                return Some(page);
            }
        }
        self.pages.last()
    }

    /// Key to reload from so the anchored item stays in view.
    ///
    /// Uses the anchored page's own index, recovered from its neighbours:
    /// `prev_key + 1`, else `next_key - 1`. Without an anchor, or when the
    /// page has neither key, the refresh starts from the beginning.
    pub fn refresh_key(&self, anchor: Option<RefreshAnchor>) -> Option<u32> {
        let page = self.closest_page_to_position(anchor?.position)?;
        page.prev_key
            .map(|prev| prev + 1)
            .or_else(|| page.next_key.map(|next| next.saturating_sub(1)))
    }
}

impl<T: Clone> PagingSnapshot<T> {
    pub fn items(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}
