//! Listing filter for books

use std::fmt;

use super::validation::BookValidationError;

/// Column a listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Author,
    Price,
    Description,
    YearPublished,
    AddedDttm,
}

impl SortKey {
    /// Parse a client-supplied sort key. Only exact column names are accepted.
    pub fn parse(value: &str) -> Result<Self, BookValidationError> {
        match value {
            "id" => Ok(Self::Id),
            "author" => Ok(Self::Author),
            "price" => Ok(Self::Price),
            "description" => Ok(Self::Description),
            "year_published" => Ok(Self::YearPublished),
            "added_dttm" => Ok(Self::AddedDttm),
            other => Err(BookValidationError::InvalidSortKey(other.to_string())),
        }
    }

    /// Fixed SQL identifier for this key
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Author => "author",
            Self::Price => "price",
            Self::Description => "description",
            Self::YearPublished => "year_published",
            Self::AddedDttm => "added_dttm",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Listing filter: pagination window plus ordering.
///
/// Without a sort key, books come back in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BookFilter {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub sort_by: Option<SortKey>,
    pub direction: SortDirection,
}

impl BookFilter {
    /// Build a filter from raw query parameters
    pub fn from_params(
        limit: Option<&str>,
        offset: Option<&str>,
        sort_by: Option<&str>,
        desc: bool,
    ) -> Result<Self, BookValidationError> {
        Ok(Self {
            limit: limit.map(|v| parse_window("limit", v)).transpose()?,
            offset: offset.map(|v| parse_window("offset", v)).transpose()?,
            sort_by: sort_by.map(SortKey::parse).transpose()?,
            direction: if desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            },
        })
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn sorted_by(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort_by = Some(key);
        self.direction = direction;
        self
    }

    /// Effective ordering column
    pub fn sort_key(&self) -> SortKey {
        self.sort_by.unwrap_or(SortKey::AddedDttm)
    }
}

fn parse_window(name: &'static str, value: &str) -> Result<u32, BookValidationError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| BookValidationError::InvalidPagination(name))
}
