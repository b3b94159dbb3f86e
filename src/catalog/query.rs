//! Query parameter validation
//!
//! Parses the three request parameters (tags, sortBy, direction) into a
//! typed `PostQuery`. Defaults are applied by the transport layer before
//! this runs; everything here is pure validation with no side effects.

use std::fmt;
use std::str::FromStr;

use crate::types::{GatewayError, Result};

/// Field a post collection can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Id,
    Reads,
    Likes,
    Popularity,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Reads => "reads",
            SortField::Likes => "likes",
            SortField::Popularity => "popularity",
        }
    }
}

impl FromStr for SortField {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "id" => Ok(SortField::Id),
            "reads" => Ok(SortField::Reads),
            "likes" => Ok(SortField::Likes),
            "popularity" => Ok(SortField::Popularity),
            _ => Err(GatewayError::InvalidSortField),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(GatewayError::InvalidDirection),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated post request
#[derive(Debug, Clone)]
pub struct PostQuery {
    /// The tags parameter exactly as the caller sent it.
    /// Cache keys are built from this, so "a,b" and "b,a" stay distinct.
    pub raw_tags: String,
    /// Tag list: raw value split on comma, each item trimmed.
    /// Empty segments are kept and fetched verbatim.
    pub tags: Vec<String>,
    pub sort_by: SortField,
    pub direction: SortDirection,
}

impl PostQuery {
    /// Validate (tags, sortBy, direction) and build the typed query.
    ///
    /// Fails with `MissingTags` when tags is absent or blank,
    /// `InvalidSortField` / `InvalidDirection` for unrecognized values.
    pub fn parse(tags: Option<&str>, sort_by: &str, direction: &str) -> Result<PostQuery> {
        let raw_tags = tags.unwrap_or("");
        if raw_tags.trim().is_empty() {
            return Err(GatewayError::MissingTags);
        }

        let sort_by = sort_by.parse::<SortField>()?;
        let direction = direction.parse::<SortDirection>()?;

        let tag_list = raw_tags
            .trim()
            .split(',')
            .map(|t| t.trim().to_string())
            .collect();

        Ok(PostQuery {
            raw_tags: raw_tags.to_string(),
            tags: tag_list,
            sort_by,
            direction,
        })
    }

    /// Whether the requested order is the default (id ascending).
    ///
    /// Single-tag requests with the default order skip merge and sort
    /// entirely and return upstream order as-is.
    pub fn is_default_order(&self) -> bool {
        self.sort_by == SortField::Id && self.direction == SortDirection::Asc
    }
}
