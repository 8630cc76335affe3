//! Pagination request and response envelope shared by every list endpoint.

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use super::{Address, Contact, UserProfile};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageRequestError {
    #[error("page must be at least 1")]
    InvalidPage,
    #[error("limit must be between 1 and 100")]
    InvalidLimit,
}

/// A validated `(page, limit)` pair. Page is 1-based; both are positive, so
/// the derived offset can never go negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Result<Self, PageRequestError> {
        if page < 1 {
            return Err(PageRequestError::InvalidPage);
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(PageRequestError::InvalidLimit);
        }
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// `ceil(total / limit)`; zero rows means zero pages.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    let pages = total / limit;
    if total % limit != 0 {
        pages + 1
    } else {
        pages
    }
}

/// One page of results plus the counters a client needs to walk the rest.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[aliases(UserPage = Page<UserProfile>, ContactPage = Page<Contact>, AddressPage = Page<Address>)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, request: PageRequest, total: i64) -> Self {
        Self {
            data,
            page: request.page(),
            limit: request.limit(),
            total,
            total_pages: total_pages(total, request.limit()),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_values() {
        assert_eq!(PageRequest::new(0, 10), Err(PageRequestError::InvalidPage));
        assert_eq!(PageRequest::new(-3, 10), Err(PageRequestError::InvalidPage));
        assert_eq!(PageRequest::new(1, 0), Err(PageRequestError::InvalidLimit));
        assert_eq!(
            PageRequest::new(1, MAX_LIMIT + 1),
            Err(PageRequestError::InvalidLimit)
        );
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PageRequest::new(1, 2).map(|p| p.offset()), Ok(0));
        assert_eq!(PageRequest::new(3, 2).map(|p| p.offset()), Ok(4));
        assert_eq!(PageRequest::default().offset(), 0);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(5, 2), 3);
        assert_eq!(total_pages(4, 2), 2);
        assert_eq!(total_pages(1, 100), 1);
    }

    #[test]
    fn page_carries_request_and_counts() {
        let request = PageRequest::new(2, 2).expect("valid page request");
        let page = Page::new(vec![3, 4], request, 5).map(|n| n * 10);

        assert_eq!(page.data, vec![30, 40]);
        assert_eq!(page.page, 2);
        assert_eq!(page.limit, 2);
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
    }
}
