//! List options, filter expressions and decoded pages.
//!
//! Linode paginates every collection as `{ "page", "pages", "results", "data" }` and accepts
//! filters as a JSON document in the `X-Filter` header instead of the query string.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::dates::NormalizeDates;
use crate::error::Result;
use crate::query::QueryParams;

/// Header carrying the JSON filter expression.
pub const FILTER_HEADER: &str = "X-Filter";

/// Page size used when the caller does not choose one.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Smallest page size accepted by the API.
pub const MIN_PAGE_SIZE: u32 = 25;

/// Largest page size accepted by the API.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Options for a list call.
///
/// Constructed by the caller per call and passed through to the request; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ListOptions {
    /// First page to request (1-based)
    #[validate(range(min = 1))]
    pub page: u32,

    /// Number of items per page
    #[validate(range(min = 25, max = 500))]
    pub page_size: u32,

    /// JSON filter expression sent in the `X-Filter` header
    pub filter: Option<String>,
}

impl ListOptions {
    /// Options starting at page 1 with the default page size and no filter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            filter: None,
        }
    }

    /// Set the page to start from.
    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set the page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Attach a structured filter.
    #[must_use]
    pub fn with_filter(mut self, filter: &Filter) -> Self {
        self.filter = Some(filter.to_header_value());
        self
    }

    /// Attach an already encoded filter expression.
    #[must_use]
    pub fn with_raw_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Query parameters for the given page.
    #[must_use]
    pub fn to_pairs(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push("page", page);
        params.push("page_size", self.page_size);
        params.into_pairs()
    }

    /// Header carrying the filter, when one is set.
    #[must_use]
    pub fn filter_header(&self) -> Option<(&'static str, String)> {
        self.filter
            .as_ref()
            .filter(|filter| !filter.is_empty())
            .map(|filter| (FILTER_HEADER, filter.clone()))
    }
}

impl Default for ListOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Sort direction for [`Filter::order_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order
    Asc,
    /// Descending order
    Desc,
}

impl SortOrder {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Builder for the JSON filter expressions understood by the API.
///
/// ```
/// use linode_core::list::{Filter, SortOrder};
///
/// let filter = Filter::new()
///     .eq("seen", false)
///     .order_by("created", SortOrder::Desc);
/// assert_eq!(
///     filter.to_header_value(),
///     r#"{"+order":"desc","+order_by":"created","seen":false}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    fields: Map<String, Value>,
}

impl Filter {
    /// Create an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Require `field` to equal `value`.
    #[must_use]
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Order results by `field`.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.fields
            .insert("+order_by".to_string(), Value::String(field.into()));
        self.fields
            .insert("+order".to_string(), Value::String(order.as_str().to_string()));
        self
    }

    /// Returns true if no condition has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Encode the filter for the `X-Filter` header.
    #[must_use]
    pub fn to_header_value(&self) -> String {
        Value::Object(self.fields.clone()).to_string()
    }
}

/// One decoded page of a paginated collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// Number of this page (1-based)
    pub page: u32,
    /// Total number of pages
    pub pages: u32,
    /// Total number of items across all pages
    #[serde(default)]
    pub results: u32,
    /// Items of this page
    #[serde(default)]
    pub data: Vec<T>,
}

impl<T> Page<T> {
    /// Returns true if the provider reports pages after this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

impl<T: NormalizeDates> NormalizeDates for Page<T> {
    fn normalize_dates(&mut self) -> Result<()> {
        self.data.normalize_dates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_options_default() {
        let options = ListOptions::default();
        assert_eq!(options.page, 1);
        assert_eq!(options.page_size, DEFAULT_PAGE_SIZE);
        assert!(options.filter.is_none());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_list_options_validation() {
        assert!(ListOptions::new().with_page(0).validate().is_err());
        assert!(ListOptions::new().with_page_size(10).validate().is_err());
        assert!(ListOptions::new().with_page_size(501).validate().is_err());
        assert!(ListOptions::new()
            .with_page_size(MIN_PAGE_SIZE)
            .validate()
            .is_ok());
        assert!(ListOptions::new()
            .with_page_size(MAX_PAGE_SIZE)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_list_options_pairs() {
        let options = ListOptions::new().with_page_size(50);
        assert_eq!(
            options.to_pairs(3),
            vec![("page", "3".to_string()), ("page_size", "50".to_string())]
        );
    }

    #[test]
    fn test_filter_header() {
        assert!(ListOptions::new().filter_header().is_none());
        assert!(ListOptions::new()
            .with_raw_filter("")
            .filter_header()
            .is_none());

        let options = ListOptions::new().with_filter(&Filter::new().eq("label", "web-1"));
        assert_eq!(
            options.filter_header(),
            Some((FILTER_HEADER, r#"{"label":"web-1"}"#.to_string()))
        );
    }

    #[test]
    fn test_filter_builder() {
        let filter = Filter::new();
        assert!(filter.is_empty());
        assert_eq!(filter.to_header_value(), "{}");

        let filter = filter.eq("seen", false).order_by("created", SortOrder::Desc);
        let decoded: Value = serde_json::from_str(&filter.to_header_value()).unwrap();
        assert_eq!(
            decoded,
            json!({"seen": false, "+order_by": "created", "+order": "desc"})
        );
    }

    #[test]
    fn test_page_deserialize() {
        let page: Page<u32> =
            serde_json::from_value(json!({"page": 1, "pages": 3, "results": 7, "data": [1, 2, 3]}))
                .unwrap();
        assert_eq!(page.data, vec![1, 2, 3]);
        assert!(page.has_next());

        let empty: Page<u32> = serde_json::from_value(json!({"page": 1, "pages": 0})).unwrap();
        assert!(empty.data.is_empty());
        assert!(!empty.has_next());
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Label {
        label: String,
    }

    fn decode_page<T: serde::de::DeserializeOwned>(value: Value) -> Page<T> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_page_of_items_without_default() {
        let page: Page<Label> = decode_page(json!({
            "page": 2,
            "pages": 2,
            "data": [{"label": "web"}, {"label": "db"}]
        }));
        assert_eq!(page.results, 0);
        assert_eq!(
            page.data,
            vec![
                Label { label: "web".to_string() },
                Label { label: "db".to_string() }
            ]
        );

        let empty: Page<Label> = decode_page(json!({"page": 1, "pages": 1}));
        assert!(empty.data.is_empty());
    }
}
