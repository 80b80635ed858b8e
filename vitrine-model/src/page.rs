use serde::{Deserialize, Serialize};

/// Index of the first page served by the catalogue API.
pub const STARTING_PAGE_INDEX: u32 = 1;

/// One page of a paginated catalogue response.
///
/// `has_next`/`has_previous` and the totals are whatever the server
/// reported. Consumers that drive pagination must treat them as advisory;
/// the pager decides end-of-stream from `items` alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_index: u32,
    pub page_size: u32,
    #[serde(default)]
    pub total_items: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_previous: bool,
}

impl<T> Page<T> {
    /// Build a page whose flags and totals are derived from
    /// `total_items`, so the page is internally consistent.
    pub fn new(
        items: Vec<T>,
        page_index: u32,
        page_size: u32,
        total_items: u64,
    ) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            u32::try_from(total_items.div_ceil(u64::from(page_size)))
                .unwrap_or(u32::MAX)
        };
        Self {
            items,
            page_index,
            page_size,
            total_items,
            total_pages,
            has_next: page_index < total_pages,
            has_previous: page_index > STARTING_PAGE_INDEX,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks the envelope invariants: the flags agree with the index and
    /// totals, and the page holds no more than `page_size` items.
    pub fn is_consistent(&self) -> bool {
        self.has_next == (self.page_index < self.total_pages)
            && self.has_previous == (self.page_index > STARTING_PAGE_INDEX)
            && self.items.len() <= self.page_size as usize
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_index: self.page_index,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_flags_follow_index_and_totals() {
        let first = Page::new(vec![1; 20], 1, 20, 100);
        assert_eq!(first.total_pages, 5);
        assert!(first.has_next);
        assert!(!first.has_previous);
        assert!(first.is_consistent());

        let last = Page::new(vec![1; 20], 5, 20, 100);
        assert!(!last.has_next);
        assert!(last.has_previous);
        assert!(last.is_consistent());
    }

    #[test]
    fn partial_final_page_rounds_total_pages_up() {
        let page = Page::new(vec![0u8; 3], 3, 10, 23);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_next);
    }

    #[test]
    fn huge_totals_saturate_page_count() {
        let page = Page::<u8>::new(Vec::new(), 1, 1, u64::MAX);
        assert_eq!(page.total_pages, u32::MAX);
        assert!(page.has_next);
    }

    #[test]
    fn overfull_page_is_inconsistent() {
        let mut page = Page::new(vec![0u8; 2], 1, 2, 2);
        page.items.push(0);
        assert!(!page.is_consistent());
    }

    #[test]
    fn decodes_camel_case_envelope_with_missing_totals() {
        let json = r#"{"items":["a","b"],"pageIndex":2,"pageSize":2}"#;
        let page: Page<String> = serde_json::from_str(json).unwrap();
        assert_eq!(page.page_index, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next);
    }
}
