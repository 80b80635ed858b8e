//! Search query types.
//!
//! [`ArtworkQuery`] is what callers describe; [`SearchQuery`] is the
//! structured, elastic-style request the catalogue API accepts. The
//! translation between the two lives in `vitrine-core`.

use std::collections::BTreeSet;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Searchable and projectable artwork fields.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    Id,
    Title,
    Date,
    Artist,
    ImageId,
    Medium,
    Category,
}

impl SearchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Id => "id",
            SearchField::Title => "title",
            SearchField::Date => "date",
            SearchField::Artist => "artist",
            SearchField::ImageId => "image_id",
            SearchField::Medium => "medium",
            SearchField::Category => "category",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Which search endpoint a query is routed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SearchKind {
    /// Free-text search, `POST artworks/search`
    #[default]
    Basic,
    /// Field-structured search, `POST artworks/search/advanced`
    Advanced,
}

/// Caller-facing description of a search.
///
/// Blank strings are treated the same as `None`: the field is not filtered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtworkQuery {
    pub kind: SearchKind,
    pub text: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub medium: Option<String>,
    pub category: Option<String>,
    pub sort_field: Option<SearchField>,
    pub sort_direction: Option<SortDirection>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

impl ArtworkQuery {
    pub fn basic(text: impl Into<String>) -> Self {
        Self {
            kind: SearchKind::Basic,
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn advanced() -> Self {
        Self {
            kind: SearchKind::Advanced,
            ..Self::default()
        }
    }
}

/// A single must-clause of the structured query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchClause {
    /// `{"match": {"<field>": "<value>"}}`
    Match { field: SearchField, value: String },
    /// `{"multi_match": {"query": "<value>", "fields": [...]}}`
    MultiMatch {
        fields: Vec<SearchField>,
        value: String,
    },
}

impl SearchClause {
    /// Fields the clause filters on.
    pub fn fields(&self) -> Vec<SearchField> {
        match self {
            SearchClause::Match { field, .. } => vec![*field],
            SearchClause::MultiMatch { fields, .. } => fields.clone(),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            SearchClause::Match { value, .. }
            | SearchClause::MultiMatch { value, .. } => value,
        }
    }
}

impl Serialize for SearchClause {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct MultiMatchBody<'a> {
            query: &'a str,
            fields: &'a [SearchField],
        }

        struct MatchBody<'a> {
            field: SearchField,
            value: &'a str,
        }

        impl Serialize for MatchBody<'_> {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(self.field.as_str(), self.value)?;
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            SearchClause::Match { field, value } => map.serialize_entry(
                "match",
                &MatchBody {
                    field: *field,
                    value,
                },
            )?,
            SearchClause::MultiMatch { fields, value } => map.serialize_entry(
                "multi_match",
                &MultiMatchBody {
                    query: value,
                    fields,
                },
            )?,
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub field: SearchField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SearchField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

impl Serialize for SortSpec {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Order {
            order: SortDirection,
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(
            self.field.as_str(),
            &Order {
                order: self.direction,
            },
        )?;
        map.end()
    }
}

/// Structured query sent to the search endpoints.
///
/// Serializes to `{"query":{"bool":{"must":[..]}},"sort":[..],
/// "_source":[..],"size":n,"page":p}`.
/// `kind` only selects the endpoint and is not part of the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub kind: SearchKind,
    pub must: Vec<SearchClause>,
    pub sort: Vec<SortSpec>,
    pub size: u32,
    pub page: u32,
    pub fields: BTreeSet<SearchField>,
}

impl SearchQuery {
    /// Copy of this query pointed at another page window.
    pub fn with_window(&self, page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            ..self.clone()
        }
    }

    /// True when some must-clause filters on `field`.
    pub fn filters_on(&self, field: SearchField) -> bool {
        self.must.iter().any(|clause| clause.fields().contains(&field))
    }
}

impl Serialize for SearchQuery {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct BoolBody<'a> {
            must: &'a [SearchClause],
        }

        #[derive(Serialize)]
        struct QueryBody<'a> {
            #[serde(rename = "bool")]
            boolean: BoolBody<'a>,
        }

        #[derive(Serialize)]
        struct Body<'a> {
            query: QueryBody<'a>,
            sort: &'a [SortSpec],
            #[serde(rename = "_source")]
            source: &'a BTreeSet<SearchField>,
            size: u32,
            page: u32,
        }

        Body {
            query: QueryBody {
                boolean: BoolBody { must: &self.must },
            },
            sort: &self.sort,
            source: &self.fields,
            size: self.size,
            page: self.page,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn structured_query_serializes_elastic_style() {
        let query = SearchQuery {
            kind: SearchKind::Advanced,
            must: vec![
                SearchClause::Match {
                    field: SearchField::Artist,
                    value: "Monet".into(),
                },
                SearchClause::MultiMatch {
                    fields: vec![SearchField::Title, SearchField::Medium],
                    value: "water lilies".into(),
                },
            ],
            sort: vec![SortSpec::new(
                SearchField::Date,
                SortDirection::Descending,
            )],
            size: 20,
            page: 2,
            fields: [SearchField::Id, SearchField::Title].into_iter().collect(),
        };

        let body = serde_json::to_value(&query).unwrap();
        assert_eq!(
            body,
            json!({
                "query": {"bool": {"must": [
                    {"match": {"artist": "Monet"}},
                    {"multi_match": {
                        "query": "water lilies",
                        "fields": ["title", "medium"]
                    }}
                ]}},
                "sort": [{"date": {"order": "desc"}}],
                "_source": ["id", "title"],
                "size": 20,
                "page": 2
            })
        );
    }

    #[test]
    fn with_window_keeps_clauses() {
        let query = SearchQuery {
            kind: SearchKind::Basic,
            must: vec![SearchClause::Match {
                field: SearchField::Title,
                value: "Nighthawks".into(),
            }],
            sort: Vec::new(),
            size: 10,
            page: 1,
            fields: BTreeSet::new(),
        };
        let moved = query.with_window(4, 25);
        assert_eq!(moved.page, 4);
        assert_eq!(moved.size, 25);
        assert_eq!(moved.must, query.must);
        assert!(moved.filters_on(SearchField::Title));
        assert!(!moved.filters_on(SearchField::Artist));
    }
}
