use serde_json::Value;

use crate::constants::MAX_SEARCH_RESULTS;

/// Sort order for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order
    Ascending,
    /// Descending order
    Descending,
}

/// A backend-neutral filter over top-level document fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Matches every document
    MatchAll,
    /// Equality filter: field == value
    Equals(String, Value),
    /// In filter: field value is in the provided list
    In(String, Vec<Value>),
    /// Logical AND of all the filters
    And(Vec<Self>),
}

/// A bounded search against one index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Which documents to return
    pub filter: Filter,
    /// Optional sorting (field, order)
    pub sort:   Option<(String, SortOrder)>,
    /// Maximum number of results, never above [`MAX_SEARCH_RESULTS`]
    pub limit:  usize,
}

impl Default for SearchRequest {
    fn default() -> Self { Self::new() }
}

impl SearchRequest {
    /// A request matching everything, capped at [`MAX_SEARCH_RESULTS`].
    pub const fn new() -> Self {
        Self {
            filter: Filter::MatchAll,
            sort:   None,
            limit:  MAX_SEARCH_RESULTS,
        }
    }

    /// Adds a filter. Successive filters are combined with AND.
    ///
    /// # Example
    ///
    /// ```rust
    /// use appconf_store::{Filter, SearchRequest};
    /// use serde_json::json;
    ///
    /// let request = SearchRequest::new()
    ///     .filter(Filter::In("Path".to_owned(), vec![json!("/a"), json!("/b")]))
    ///     .filter(Filter::Equals("Server".to_owned(), json!("srv1")));
    /// assert!(matches!(request.filter, Filter::And(ref parts) if parts.len() == 2));
    /// ```
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = match self.filter {
            Filter::MatchAll => filter,
            Filter::And(mut parts) => {
                parts.push(filter);
                Filter::And(parts)
            },
            existing => Filter::And(vec![existing, filter]),
        };
        self
    }

    /// Sets the sort field and order.
    pub fn sort(mut self, field: &str, order: SortOrder) -> Self {
        self.sort = Some((field.to_owned(), order));
        self
    }

    /// Lowers the result limit. Values above [`MAX_SEARCH_RESULTS`] are clamped.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit.min(MAX_SEARCH_RESULTS);
        self
    }
}
