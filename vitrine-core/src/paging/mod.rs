//! Incremental, cursor-based paging over remote catalogues.
//!
//! A [`Pager`] owns one paging session: the pages loaded so far, the
//! [`SessionState`] and at most one in-flight load. Page keys are one-based
//! page indexes; an empty page ends the stream regardless of what the
//! server reports about further pages.

mod pager;
mod request;
mod source;
mod state;
mod stream;

pub use pager::{PAGING_TARGET, Pager, PagerConfig};
pub use request::{
    LoadDirection, LoadRequest, LoadResult, next_key_for, prev_key_for,
};
pub use source::{ArtworkPageSource, PagingSource, SearchPageSource};
pub use state::{
    LoadedPage, PagingSnapshot, RefreshAnchor, SessionState,
};

pub type ArtworkPager = Pager<ArtworkPageSource>;
pub type SearchPager = Pager<SearchPageSource>;
