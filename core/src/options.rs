//! Query options for list and query operations.
//!
//! Every field is optional. Absent strings, empty strings and zero counts
//! are left out of the query string, which the service reads as "no
//! restriction".

use tracing::debug;

/// A query parameter an endpoint understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKey {
    Filter,
    Include,
    Top,
    Skip,
    OrderBy,
}

impl QueryKey {
    /// Every key, in the order they are emitted.
    pub const ALL: &'static [QueryKey] = &[
        QueryKey::Filter,
        QueryKey::Include,
        QueryKey::Top,
        QueryKey::Skip,
        QueryKey::OrderBy,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            QueryKey::Filter => "$filter",
            QueryKey::Include => "$include",
            QueryKey::Top => "$top",
            QueryKey::Skip => "$skip",
            QueryKey::OrderBy => "$orderBy",
        }
    }
}

/// Filtering, expansion, sorting and pagination for a collection fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Server-side filter expression, e.g. `status eq 'Completed'`.
    pub filter: Option<String>,
    /// Comma separated child objects to return under each record.
    pub include: Option<String>,
    /// If nonzero, return no more than this many records.
    pub top: u32,
    /// If nonzero, skip this many records first.
    pub skip: u32,
    /// Comma separated `field [ASC|DESC]` clauses.
    pub order_by: Option<String>,
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn include(mut self, include: impl Into<String>) -> Self {
        self.include = Some(include.into());
        self
    }

    pub fn top(mut self, top: u32) -> Self {
        self.top = top;
        self
    }

    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = skip;
        self
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    /// The same options advanced by one page. Unchanged when `top` is zero,
    /// since an unbounded fetch has no next page.
    pub fn next_page(&self) -> Self {
        let mut next = self.clone();
        next.skip = self.skip.saturating_add(self.top);
        next
    }

    /// Query pairs for the keys in `allowed`, in `QueryKey::ALL` order.
    pub fn to_query(&self, allowed: &[QueryKey]) -> Vec<(String, String)> {
        let mut query = Vec::new();
        for key in QueryKey::ALL {
            let Some(value) = self.value_of(*key) else {
                continue;
            };
            if !allowed.contains(key) {
                debug!(key = key.wire_name(), "dropping unsupported query option");
                continue;
            }
            query.push((key.wire_name().to_string(), value));
        }
        query
    }

    fn value_of(&self, key: QueryKey) -> Option<String> {
        let text = |value: &Option<String>| value.as_ref().filter(|v| !v.is_empty()).cloned();
        let count = |value: u32| (value != 0).then(|| value.to_string());
        match key {
            QueryKey::Filter => text(&self.filter),
            QueryKey::Include => text(&self.include),
            QueryKey::Top => count(self.top),
            QueryKey::Skip => count(self.skip),
            QueryKey::OrderBy => text(&self.order_by),
        }
    }
}
