//! Route templates of the catalogue API, relative to the configured base URL.

pub mod artworks {
    pub const COLLECTION: &str = "artworks/{source}";
    pub const ITEM: &str = "artworks/{source}/{id}";
    pub const SEARCH: &str = "artworks/search";
    pub const SEARCH_ADVANCED: &str = "artworks/search/advanced";
}

pub mod exhibitions {
    pub const COLLECTION: &str = "exhibitions";
    pub const ITEM: &str = "exhibitions/{id}";
    pub const ARTWORKS: &str = "exhibitions/{id}/artworks";
    pub const ARTWORK: &str =
        "exhibitions/{id}/artworks/{source}/{artwork_id}";
}

/// Helper utilities for working with route templates
pub mod utils {
    /// Split a route template into path segments, substituting `{name}`
    /// placeholders with the matching parameter value.
    ///
    /// Values are returned raw; percent-encoding is left to the URL builder
    /// so an identifier can never introduce extra segments.
    pub fn segments(route: &str, params: &[(&str, &str)]) -> Vec<String> {
        route
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                segment
                    .strip_prefix('{')
                    .and_then(|rest| rest.strip_suffix('}'))
                    .and_then(|name| {
                        params
                            .iter()
                            .find(|(param, _)| *param == name)
                            .map(|(_, value)| (*value).to_owned())
                    })
                    .unwrap_or_else(|| segment.to_owned())
            })
            .collect()
    }

    /// Replace multiple path parameters, producing a display path.
    pub fn replace_params(route: &str, params: &[(&str, &str)]) -> String {
        segments(route, params).join("/")
    }
}
