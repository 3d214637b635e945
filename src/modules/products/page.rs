//! Pagination primitives shared by the store and the service.

use serde::Serialize;

/// A zero-based page index and a page size of at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Returns `None` when `size` is zero.
    pub fn new(page: u32, size: u32) -> Option<Self> {
        (size >= 1).then_some(Self { page, size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// Whether a query should return one page or every match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pageable {
    Unpaged,
    Paged(PageRequest),
}

impl From<PageRequest> for Pageable {
    fn from(request: PageRequest) -> Self {
        Pageable::Paged(request)
    }
}

/// A slice of a result sequence plus its pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Cut the page described by `pageable` out of the full, ordered match list.
    ///
    /// An unpaged result is a single page holding every match.
    pub fn from_matches(matches: Vec<T>, pageable: Pageable) -> Self {
        let total_elements = matches.len() as u64;

        match pageable {
            Pageable::Unpaged => Self {
                page: 0,
                size: u32::try_from(matches.len()).unwrap_or(u32::MAX),
                total_elements,
                total_pages: u64::from(total_elements > 0),
                items: matches,
            },
            Pageable::Paged(request) => {
                let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
                let size = usize::try_from(request.size()).unwrap_or(usize::MAX);
                Self {
                    items: matches.into_iter().skip(offset).take(size).collect(),
                    page: request.page(),
                    size: request.size(),
                    total_elements,
                    total_pages: total_elements.div_ceil(u64::from(request.size())),
                }
            }
        }
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}
