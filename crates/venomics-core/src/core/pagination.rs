//! Collects every item of a paginated list endpoint.

use crate::api::models::Page;
use crate::error::{AppError, PaginationError};
use serde::Serialize;
use std::future::Future;

pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Page coordinates sent as `page` / `page_size` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    pub fn next(self) -> Self {
        Self {
            page: self.page + 1,
            ..self
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// Fetch pages starting at `start` until an envelope reports the last page.
///
/// The last page is decided from the envelope's own `page * page_size`, so a
/// server that caps the page size is still walked to the end. A page number
/// that does not advance is an error.
///
/// Items come back in page order. Any failing page aborts the whole call; no
/// partial results are returned. Extra filters belong in the `fetch` closure.
pub async fn paginate<T, F, Fut>(mut fetch: F, start: PageRequest) -> Result<Vec<T>, AppError>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<T>, AppError>>,
{
    if start.page_size == 0 {
        return Err(PaginationError::ZeroPageSize.into());
    }

    let mut items = Vec::new();
    let mut request = start;
    let mut previous: Option<u32> = None;

    loop {
        let page = fetch(request).await?;

        if let Some(previous) = previous
            && page.page <= previous
        {
            return Err(PaginationError::StalePage {
                requested: request.page,
                returned: page.page,
            }
            .into());
        }
        previous = Some(page.page);

        let is_last = page.is_last();
        let (returned, page_size, count) = (page.page, page.page_size, page.count);
        let received = page.results.len();
        items.extend(page.results);

        if is_last {
            log::debug!(
                "Pagination finished on page {} with {} items",
                returned,
                items.len()
            );
            return Ok(items);
        }

        if received == 0 {
            return Err(PaginationError::NoProgress {
                page: returned,
                page_size,
                count,
            }
            .into());
        }

        request = request.next();
    }
}
