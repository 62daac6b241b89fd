//! Response shapes for the skills API.
//!
//! Listings are returned as a bare JSON array; the paging state travels in
//! headers:
//!
//! | Header | Meaning |
//! |---|---|
//! | `X-Total-Count` | number of stored skills |
//! | `X-Offset` | offset of the first returned skill |
//! | `X-Limit` | page size in effect |
//! | `X-Total-Pages` | pages of `X-Limit` skills needed for the whole listing |

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use skillbook_types::page::Page;

pub const X_TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");
pub const X_OFFSET: HeaderName = HeaderName::from_static("x-offset");
pub const X_LIMIT: HeaderName = HeaderName::from_static("x-limit");
pub const X_TOTAL_PAGES: HeaderName = HeaderName::from_static("x-total-pages");

/// The pagination headers, for CORS exposure.
pub const PAGINATION_HEADERS: [HeaderName; 4] = [X_TOTAL_COUNT, X_OFFSET, X_LIMIT, X_TOTAL_PAGES];

/// One page of items rendered as a JSON array plus pagination headers.
#[derive(Debug)]
pub struct Paginated<T: Serialize>(pub Page<T>);

impl<T: Serialize> Paginated<T> {
    fn headers(&self) -> HeaderMap {
        let page = &self.0;
        let mut headers = HeaderMap::new();
        headers.insert(X_TOTAL_COUNT, HeaderValue::from(page.total));
        headers.insert(X_OFFSET, HeaderValue::from(page.offset));
        headers.insert(X_LIMIT, HeaderValue::from(page.limit));
        headers.insert(X_TOTAL_PAGES, HeaderValue::from(page.total_pages()));
        headers
    }
}

impl<T: Serialize> IntoResponse for Paginated<T> {
    fn into_response(self) -> Response {
        let headers = self.headers();
        (headers, Json(self.0.items)).into_response()
    }
}

/// Plain `{"message": "..."}` acknowledgement body.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
