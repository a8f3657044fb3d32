//! Types for catalog API requests and responses.

use serde::{Deserialize, Serialize};

/// A selectable category or publisher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FilterOption {
    pub id: u32,
    pub name: String,
}

impl FilterOption {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Ids start at 1 and names must carry something to display.
    pub fn is_well_formed(&self) -> bool {
        self.id >= 1 && !self.name.trim().is_empty()
    }
}

/// A game as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub publisher: Option<FilterOption>,
    #[serde(default)]
    pub category: Option<FilterOption>,
    #[serde(default)]
    pub star_rating: Option<f64>,
}

/// One page of `GET /api/games`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub games: Vec<Game>,
    pub total: u64,
    pub has_more: bool,
}

impl PageResult {
    pub fn empty() -> Self {
        Self {
            games: Vec::new(),
            total: 0,
            has_more: false,
        }
    }
}

/// Parameters of a games page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamesQuery {
    pub limit: u32,
    pub offset: u32,
    pub category_id: Option<u32>,
    pub publisher_id: Option<u32>,
}

impl GamesQuery {
    /// Query-string pairs in the order the API documents them.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ];
        if let Some(id) = self.category_id {
            pairs.push(("category", id.to_string()));
        }
        if let Some(id) = self.publisher_id {
            pairs.push(("publisher", id.to_string()));
        }
        pairs
    }
}
