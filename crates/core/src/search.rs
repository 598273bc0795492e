//! Pagination and search parameter handling.
//!
//! Lives in `core` so both the repository layer (which turns these into SQL)
//! and the handlers (which validate raw query strings) share one definition.

use std::str::FromStr;

use serde::Serialize;

use crate::codes::Code;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Smallest page size accepted by the video search.
pub const MIN_VIDEO_PAGE_SIZE: i64 = 5;

/// Largest page size accepted anywhere.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub page_size: i64,
}

impl Page {
    /// Validate raw `p` / `ps` parameters.
    ///
    /// Missing values fall back to page 1 and [`DEFAULT_PAGE_SIZE`].
    pub fn new(page: Option<i64>, page_size: Option<i64>, min_size: i64) -> Result<Self, CoreError> {
        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page < 1 {
            return Err(CoreError::Validation(Code::InvalidParamPage));
        }
        if page_size < min_size || page_size > MAX_PAGE_SIZE {
            return Err(CoreError::Validation(Code::InvalidParamPageSize));
        }
        // The row offset must fit in an i64.
        if (page - 1).checked_mul(page_size).is_none() {
            return Err(CoreError::Validation(Code::InvalidParamPage));
        }
        Ok(Self { page, page_size })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

/// One page of results plus the total number of matching rows.
#[derive(Debug, Serialize)]
pub struct Paged<T> {
    pub total: i64,
    pub count: usize,
    pub page: i64,
    pub data: Vec<T>,
}

impl<T> Paged<T> {
    pub fn new(total: i64, page: Page, data: Vec<T>) -> Self {
        Self {
            total,
            count: data.len(),
            page: page.page,
            data,
        }
    }

    /// Convert every item, keeping the paging metadata.
    pub fn map<U: Serialize>(self, f: impl FnMut(T) -> U) -> Paged<U> {
        Paged {
            total: self.total,
            count: self.count,
            page: self.page,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Video search parameters
// ---------------------------------------------------------------------------

/// Validate a search keyword. Returns the trimmed keyword.
pub fn validate_keyword(keyword: &str) -> Result<String, CoreError> {
    let trimmed = keyword.trim();
    if trimmed.chars().count() < 2 {
        return Err(CoreError::Validation(Code::InvalidParamKeyword));
    }
    Ok(trimmed.to_string())
}

/// Validate a video type filter.
pub fn validate_video_type(video_type: &str) -> Result<(), CoreError> {
    if video_type.chars().count() < 2 {
        return Err(CoreError::Validation(Code::InvalidParamType));
    }
    Ok(())
}

/// Column a video listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSortKey {
    View,
    Like,
    New,
    Updated,
    Title,
    Rating,
}

/// Sort order for video listings, parsed from `<key>_<desc|asc>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoOrder {
    pub key: VideoSortKey,
    pub descending: bool,
}

impl Default for VideoOrder {
    fn default() -> Self {
        Self {
            key: VideoSortKey::New,
            descending: true,
        }
    }
}

impl VideoOrder {
    /// The `videos` column this order sorts on.
    pub fn column(&self) -> &'static str {
        match self.key {
            VideoSortKey::View => "view_count",
            VideoSortKey::Like => "like_count",
            VideoSortKey::New => "created_at",
            VideoSortKey::Updated => "updated_at",
            VideoSortKey::Title => "title",
            VideoSortKey::Rating => "rating",
        }
    }

    /// `ORDER BY` fragment, with `id` as a stable tiebreaker.
    pub fn to_sql(&self) -> String {
        let dir = if self.descending { "DESC" } else { "ASC" };
        format!("{} {dir}, id {dir}", self.column())
    }
}

impl FromStr for VideoOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::Validation(Code::InvalidParamOrderBy);
        let (key, dir) = s.rsplit_once('_').ok_or_else(invalid)?;

        let key = match key {
            "view" => VideoSortKey::View,
            "like" => VideoSortKey::Like,
            "new" => VideoSortKey::New,
            "updated" => VideoSortKey::Updated,
            "title" => VideoSortKey::Title,
            "rating" => VideoSortKey::Rating,
            _ => return Err(invalid()),
        };
        let descending = match dir {
            "desc" => true,
            "asc" => false,
            _ => return Err(invalid()),
        };
        Ok(Self { key, descending })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
