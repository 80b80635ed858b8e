//! Translation of caller search input into structured queries.

pub mod builder;
pub mod error;

pub use builder::{
    DEFAULT_PAGE_SIZE, DEFAULT_PROJECTION, DEFAULT_SORT, FREE_TEXT_FIELDS,
    SearchQueryBuilder, build_search_query,
};
pub use error::QueryError;
