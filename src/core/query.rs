//! Paging, sorting and list responses

use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderValue};
use std::collections::BTreeMap;

/// Header carrying the total number of items across all pages
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Base that relative `Link` targets are resolved against
const LINK_BASE: &str = "http://localhost/";

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }
}

/// One sort criterion, sent as `sort=<field>,<direction>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub field: String,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }

    fn to_param(&self) -> String {
        format!("{},{}", self.field, self.direction.as_str())
    }
}

/// Paging and sorting parameters of a list request
///
/// `page` is 1-based here and converted to the backend's 0-based index on
/// the wire. An unpaged request (the default) sends no paging parameters,
/// which is how relationship option lists are loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageRequest {
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub sort: Vec<SortOrder>,
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page: Some(page.max(1)),
            size: Some(size.max(1)),
            sort: Vec::new(),
        }
    }

    pub fn unpaged() -> Self {
        Self::default()
    }

    pub fn with_sort(mut self, order: SortOrder) -> Self {
        self.sort.push(order);
        self
    }

    /// Query string pairs, in a stable order
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), (page.max(1) - 1).to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size".to_string(), size.to_string()));
        }
        for order in &self.sort {
            pairs.push(("sort".to_string(), order.to_param()));
        }
        pairs
    }
}

/// A page of entities plus the response headers that describe it
#[derive(Debug, Clone)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub headers: HeaderMap,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>, headers: HeaderMap) -> Self {
        Self { items, headers }
    }

    /// Build a response advertising `total` items
    pub fn with_total(items: Vec<T>, total: u64) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from(total));
        Self { items, headers }
    }

    /// Total from `X-Total-Count`, if the backend sent a valid one
    pub fn total_count(&self) -> Option<u64> {
        self.headers
            .get(TOTAL_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse().ok())
    }

    /// `rel` -> 1-based page number, from the `Link` header
    pub fn links(&self) -> BTreeMap<String, usize> {
        self.headers
            .get(reqwest::header::LINK)
            .and_then(|v| v.to_str().ok())
            .map(parse_links)
            .unwrap_or_default()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListResponse<U> {
        ListResponse {
            items: self.items.into_iter().map(f).collect(),
            headers: self.headers,
        }
    }
}

/// Parse an RFC 5988 `Link` header into `rel` -> 1-based page number
///
/// Entries are delimited by their `<...>` targets, so commas inside a URL
/// (`sort=id,asc`) are kept. Entries without a `page` query parameter or
/// `rel` are skipped.
///
/// ```
/// use depot::core::query::parse_links;
///
/// let links = parse_links(r#"</api/orders?page=1&size=20&sort=id,asc>; rel="next",</api/orders?page=0&size=20&sort=id,asc>; rel="first""#);
/// assert_eq!(links.get("next"), Some(&2));
/// assert_eq!(links.get("first"), Some(&1));
/// ```
pub fn parse_links(header: &str) -> BTreeMap<String, usize> {
    let mut links = BTreeMap::new();
    let mut rest = header;
    while let Some(open) = rest.find('<') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('>') else {
            break;
        };
        let target = &after_open[..close];
        rest = &after_open[close + 1..];
        let params = &rest[..rest.find('<').unwrap_or(rest.len())];

        let rel = params
            .split([';', ','])
            .filter_map(|s| s.trim().strip_prefix("rel="))
            .map(|r| r.trim_matches('"').to_string())
            .next();
        let page = link_page(target).and_then(|page| page.checked_add(1));
        if let (Some(page), Some(rel)) = (page, rel) {
            links.insert(rel, page);
        }
    }
    links
}

/// 0-based `page` query parameter of a link target, absolute or relative
fn link_page(target: &str) -> Option<usize> {
    let url = Url::parse(LINK_BASE).ok()?.join(target.trim()).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}

/// Pagination metadata derived from page, size and total
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub size: usize,

    /// Total number of items
    pub total: u64,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: usize, size: usize, total: u64) -> Self {
        let page = page.max(1);
        let size = size.max(1);
        let total_items = usize::try_from(total).unwrap_or(usize::MAX);
        let total_pages = if total_items == 0 {
            0
        } else {
            total_items.div_ceil(size)
        };
        let start = (page - 1).saturating_mul(size);

        Self {
            page,
            size,
            total,
            total_pages,
            has_next: start.saturating_add(size) < total_items,
            has_prev: page > 1,
        }
    }
}
