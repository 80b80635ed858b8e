use std::collections::BTreeSet;

use vitrine_model::prelude::{
    ArtworkQuery, STARTING_PAGE_INDEX, SearchClause, SearchField, SearchKind,
    SearchQuery, SortDirection, SortSpec,
};

use super::error::QueryError;

/// Result window used when the caller gives no limit.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Newest works first.
pub const DEFAULT_SORT: SortSpec = SortSpec {
    field: SearchField::Date,
    direction: SortDirection::Descending,
};

/// Fields returned for every hit: enough to render a summary card.
pub const DEFAULT_PROJECTION: [SearchField; 5] = [
    SearchField::Id,
    SearchField::Title,
    SearchField::Date,
    SearchField::Artist,
    SearchField::ImageId,
];

/// Fields a free-text term is matched against.
pub const FREE_TEXT_FIELDS: [SearchField; 4] = [
    SearchField::Title,
    SearchField::Artist,
    SearchField::Medium,
    SearchField::Category,
];

/// Fluent API for building artwork search queries
#[derive(Debug, Clone, Default)]
pub struct SearchQueryBuilder {
    query: ArtworkQuery,
}

impl SearchQueryBuilder {
    /// Create a new basic query builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing caller query
    pub fn from_query(query: ArtworkQuery) -> Self {
        Self { query }
    }

    /// Free-text search across title, artist, medium and category
    pub fn basic(text: impl Into<String>) -> Self {
        Self::from_query(ArtworkQuery::basic(text))
    }

    /// Per-field search
    pub fn advanced() -> Self {
        Self::from_query(ArtworkQuery::advanced())
    }

    pub fn kind(mut self, kind: SearchKind) -> Self {
        self.query.kind = kind;
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.query.text = Some(text.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.query.title = Some(title.into());
        self
    }

    pub fn artist(mut self, artist: impl Into<String>) -> Self {
        self.query.artist = Some(artist.into());
        self
    }

    pub fn medium(mut self, medium: impl Into<String>) -> Self {
        self.query.medium = Some(medium.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.query.category = Some(category.into());
        self
    }

    // === Sorting and windowing ===

    /// Sort by a field in an explicit direction
    pub fn sort_by(
        mut self,
        field: SearchField,
        direction: SortDirection,
    ) -> Self {
        self.query.sort_field = Some(field);
        self.query.sort_direction = Some(direction);
        self
    }

    /// Number of results per page
    pub fn limit(mut self, limit: u32) -> Self {
        self.query.limit = Some(limit);
        self
    }

    /// One-based page index
    pub fn page(mut self, page: u32) -> Self {
        self.query.page = Some(page);
        self
    }

    /// Borrow the caller query accumulated so far
    pub fn query(&self) -> &ArtworkQuery {
        &self.query
    }

    /// Build the structured query
    pub fn build(self) -> Result<SearchQuery, QueryError> {
        build_search_query(&self.query)
    }
}

/// Build the structured query for a caller search.
///
/// Free text becomes a single multi-field match and every provided field
/// becomes its own match, whatever the kind; the kind only selects the
/// endpoint. Blank fields never produce a clause, so a query with no usable
/// input matches everything.
///
/// Sorting falls back to [`DEFAULT_SORT`] when no field is given; a field
/// with no direction sorts ascending. The window defaults to page 1 of
/// [`DEFAULT_PAGE_SIZE`] results.
pub fn build_search_query(
    query: &ArtworkQuery,
) -> Result<SearchQuery, QueryError> {
    let size = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    if size == 0 {
        return Err(QueryError::InvalidLimit(size));
    }

    let page = query.page.unwrap_or(STARTING_PAGE_INDEX);
    if page < STARTING_PAGE_INDEX {
        return Err(QueryError::InvalidPage(page));
    }

    let mut must = Vec::new();

    if let Some(text) = non_blank(&query.text) {
        must.push(SearchClause::MultiMatch {
            fields: FREE_TEXT_FIELDS.to_vec(),
            value: text.to_owned(),
        });
    }

    let fields = [
        (SearchField::Title, &query.title),
        (SearchField::Artist, &query.artist),
        (SearchField::Medium, &query.medium),
        (SearchField::Category, &query.category),
    ];
    for (field, value) in fields {
        if let Some(value) = non_blank(value) {
            must.push(SearchClause::Match {
                field,
                value: value.to_owned(),
            });
        }
    }

    let sort = match (query.sort_field, query.sort_direction) {
        (Some(field), direction) => SortSpec::new(
            field,
            direction.unwrap_or(SortDirection::Ascending),
        ),
        (None, Some(direction)) => SortSpec::new(DEFAULT_SORT.field, direction),
        (None, None) => DEFAULT_SORT,
    };

    Ok(SearchQuery {
        kind: query.kind,
        must,
        sort: vec![sort],
        size,
        page,
        fields: DEFAULT_PROJECTION.into_iter().collect::<BTreeSet<_>>(),
    })
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
