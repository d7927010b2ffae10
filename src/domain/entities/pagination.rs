use serde::{Deserialize, Serialize};

/// Hard ceiling for any list endpoint's page size.
pub const MAX_PAGE_LIMIT: u32 = 50;

/// Per-entity pagination defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListDefaults {
    pub default_limit: u32,
    pub max_limit: u32,
}

pub const EXPERIENCE_LIST: ListDefaults = ListDefaults { default_limit: 10, max_limit: MAX_PAGE_LIMIT };
pub const PROJECT_LIST: ListDefaults = ListDefaults { default_limit: 6, max_limit: MAX_PAGE_LIMIT };
pub const BLOG_LIST: ListDefaults = ListDefaults { default_limit: 9, max_limit: MAX_PAGE_LIMIT };

/// Raw list query string. Values stay strings so garbage input falls back to
/// defaults instead of failing extraction.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub featured: Option<String>,
}

impl ListQuery {
    pub fn featured_only(&self) -> bool {
        self.featured.as_deref().map(str::trim) == Some("true")
    }
}

/// A validated, clamped page request: `page >= 1`, `1 <= limit <= max_limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

/// `skip`/`take` pair handed to the data store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn new(page: i64, limit: i64, defaults: ListDefaults) -> Self {
        PageRequest {
            page: page.clamp(1, u32::MAX as i64) as u32,
            limit: limit.clamp(1, defaults.max_limit.max(1) as i64) as u32,
        }
    }

    pub fn first(defaults: ListDefaults) -> Self {
        Self::new(1, defaults.default_limit as i64, defaults)
    }

    pub fn from_query(query: &ListQuery, defaults: ListDefaults) -> Self {
        let page = parse_number(query.page.as_deref()).unwrap_or(1);
        let limit = parse_number(query.limit.as_deref()).unwrap_or(defaults.default_limit as i64);
        Self::new(page, limit, defaults)
    }

    /// Page number from the query with a fixed page size.
    pub fn from_page_param(page: Option<&str>, defaults: ListDefaults) -> Self {
        let page = parse_number(page).unwrap_or(1);
        Self::new(page, defaults.default_limit as i64, defaults)
    }

    pub fn window(&self) -> PageWindow {
        PageWindow {
            offset: (self.page as i64 - 1) * self.limit as i64,
            limit: self.limit as i64,
        }
    }
}

fn parse_number(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    raw.parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v.trunc() as i64))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total_items: u64,
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(request: PageRequest, total_items: u64) -> Self {
        Pagination {
            page: request.page,
            limit: request.limit,
            total_items,
            total_pages: total_items.div_ceil(request.limit as u64),
        }
    }

    /// Zeroed metadata reported when a page could not be loaded.
    pub fn empty(defaults: ListDefaults) -> Self {
        Pagination {
            page: 1,
            limit: defaults.default_limit,
            total_items: 0,
            total_pages: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn empty(defaults: ListDefaults) -> Self {
        Page {
            items: Vec::new(),
            pagination: Pagination::empty(defaults),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, limit: Option<&str>) -> ListQuery {
        ListQuery {
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
            featured: None,
        }
    }

    #[test]
    fn defaults_apply_when_params_absent() {
        assert_eq!(
            PageRequest::from_query(&query(None, None), PROJECT_LIST),
            PageRequest { page: 1, limit: 6 }
        );
        assert_eq!(PageRequest::first(BLOG_LIST).limit, 9);
        assert_eq!(PageRequest::first(EXPERIENCE_LIST).limit, 10);
    }

    #[test]
    fn page_and_limit_are_clamped() {
        let request = PageRequest::from_query(&query(Some("-3"), Some("0")), BLOG_LIST);
        assert_eq!(request, PageRequest { page: 1, limit: 1 });

        let request = PageRequest::from_query(&query(Some("2"), Some("500")), BLOG_LIST);
        assert_eq!(request, PageRequest { page: 2, limit: MAX_PAGE_LIMIT });
    }

    #[test]
    fn garbage_params_fall_back_to_defaults() {
        let request = PageRequest::from_query(&query(Some("abc"), Some("")), EXPERIENCE_LIST);
        assert_eq!(request, PageRequest { page: 1, limit: 10 });

        let request = PageRequest::from_query(&query(Some("2.7"), None), EXPERIENCE_LIST);
        assert_eq!(request.page, 2);
    }

    #[test]
    fn window_skips_previous_pages() {
        let window = PageRequest { page: 3, limit: 9 }.window();
        assert_eq!(window, PageWindow { offset: 18, limit: 9 });
    }

    #[test]
    fn total_pages_rounds_up() {
        let request = PageRequest { page: 1, limit: 6 };
        assert_eq!(Pagination::new(request, 0).total_pages, 0);
        assert_eq!(Pagination::new(request, 6).total_pages, 1);
        assert_eq!(Pagination::new(request, 7).total_pages, 2);
    }

    #[test]
    fn featured_flag_only_matches_true() {
        let mut q = ListQuery::default();
        assert!(!q.featured_only());
        q.featured = Some("true".into());
        assert!(q.featured_only());
        q.featured = Some("1".into());
        assert!(!q.featured_only());
    }
}
