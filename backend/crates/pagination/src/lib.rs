//! Page requests and slice envelopes shared by list endpoints.
//!
//! A [`Slice`] carries one page of results plus a flag saying whether another
//! page exists. Adapters compute the flag by over-fetching a single row, so no
//! total count query is ever issued.
//!
//! # Examples
//! ```
//! use pagination::{PageRequest, Slice};
//!
//! let page = PageRequest::new(0, 2).expect("valid page");
//! let window = vec!["a", "b", "c"];
//! let slice = Slice::from_window(window, page);
//! assert_eq!(slice.content(), &["a", "b"]);
//! assert!(slice.has_next());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size an endpoint will serve.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Validation failures raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Requested page size was zero.
    #[error("page size must be at least 1")]
    ZeroSize,
    /// Requested page size exceeded [`MAX_PAGE_SIZE`].
    #[error("page size must be at most {max}")]
    SizeTooLarge {
        /// Configured upper bound.
        max: u32,
    },
}

/// Zero-based page index plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Validate and construct a page request.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when `size` is zero or above
    /// [`MAX_PAGE_SIZE`].
    pub const fn new(page: u32, size: u32) -> Result<Self, PageRequestError> {
        if size == 0 {
            return Err(PageRequestError::ZeroSize);
        }
        if size > MAX_PAGE_SIZE {
            return Err(PageRequestError::SizeTooLarge { max: MAX_PAGE_SIZE });
        }
        Ok(Self { page, size })
    }

    /// First page with the default size.
    #[must_use]
    pub const fn first() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of items preceding this page.
    #[must_use]
    pub const fn offset(&self) -> usize {
        (self.page as usize).saturating_mul(self.size as usize)
    }

    /// Number of items an adapter should fetch to decide `has_next`.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.size as usize + 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// One page of results and whether a following page exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slice<T> {
    content: Vec<T>,
    page: PageRequest,
    has_next: bool,
}

impl<T> Slice<T> {
    /// Build a slice directly from its parts.
    #[must_use]
    pub const fn new(content: Vec<T>, page: PageRequest, has_next: bool) -> Self {
        Self {
            content,
            page,
            has_next,
        }
    }

    /// Build a slice from an over-fetched window of at most
    /// [`PageRequest::window`] items. Extra items are dropped and flip
    /// `has_next`.
    #[must_use]
    pub fn from_window(mut window: Vec<T>, page: PageRequest) -> Self {
        let size = page.size() as usize;
        let has_next = window.len() > size;
        window.truncate(size);
        Self::new(window, page, has_next)
    }

    /// Cut one page out of a fully materialised, already ordered sequence.
    #[must_use]
    pub fn paginate(items: impl IntoIterator<Item = T>, page: PageRequest) -> Self {
        let window = items
            .into_iter()
            .skip(page.offset())
            .take(page.window())
            .collect();
        Self::from_window(window, page)
    }

    /// An empty final page.
    #[must_use]
    pub const fn empty(page: PageRequest) -> Self {
        Self::new(Vec::new(), page, false)
    }

    /// Items on this page.
    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// The page request this slice answers.
    #[must_use]
    pub const fn page(&self) -> PageRequest {
        self.page
    }

    /// Whether another page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.has_next
    }

    /// Consume the slice, returning its items.
    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Transform every item while keeping page metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Slice<U> {
        Slice {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            has_next: self.has_next,
        }
    }
}
