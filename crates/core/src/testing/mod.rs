//! Testing utilities and mock implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use gamecatalog_core::testing::{fixtures, MockCatalogApi};
//!
//! let api = MockCatalogApi::new();
//! api.seed(fixtures::catalog(30, 4, 3)).await;
//!
//! // Fail the next request
//! api.set_next_error(ApiError::Unavailable("offline".into())).await;
//! ```

mod mock_catalog_api;

pub use mock_catalog_api::{MockCatalogApi, RecordedApiCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::api::{FilterOption, Game};

    /// A complete dataset for [`super::MockCatalogApi::seed`].
    #[derive(Debug, Clone, Default)]
    pub struct CatalogFixture {
        pub games: Vec<Game>,
        pub categories: Vec<FilterOption>,
        pub publishers: Vec<FilterOption>,
    }

    /// A game with no category or publisher.
    pub fn game(id: u32) -> Game {
        Game {
            id,
            title: format!("Game {}", id),
            description: format!("Description of game {}.", id),
            publisher: None,
            category: None,
            star_rating: None,
        }
    }

    /// Categories with ids `1..=count`.
    pub fn categories(count: u32) -> Vec<FilterOption> {
        (1..=count)
            .map(|id| FilterOption::new(id, format!("Category {}", id)))
            .collect()
    }

    /// Publishers with ids `1..=count`.
    pub fn publishers(count: u32) -> Vec<FilterOption> {
        (1..=count)
            .map(|id| FilterOption::new(id, format!("Publisher {}", id)))
            .collect()
    }

    /// `games` games with ids `1..=games`, categories and publishers
    /// assigned round-robin (game 1 gets category 1 and publisher 1).
    pub fn catalog(games: u32, categories: u32, publishers: u32) -> CatalogFixture {
        let category_options = self::categories(categories);
        let publisher_options = self::publishers(publishers);

        let games = (1..=games)
            .map(|id| Game {
                category: category_options
                    .get(((id - 1) % categories.max(1)) as usize)
                    .cloned(),
                publisher: publisher_options
                    .get(((id - 1) % publishers.max(1)) as usize)
                    .cloned(),
                star_rating: Some(f64::from(id % 5) + 0.5),
                ..game(id)
            })
            .collect();

        CatalogFixture {
            games,
            categories: category_options,
            publishers: publisher_options,
        }
    }
}
