//! Category and publisher options for the filter bar.
//!
//! Both collections are fetched at most once per [`FilterCatalog`]. A failed
//! fetch leaves the collection unloaded, so a later manual reload simply
//! calls the same operation again.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::api::{CatalogApi, FilterOption};
use crate::error::{CatalogError, FilterKind};
use crate::metrics::FILTER_CATALOG_LOADS;

/// Validation of filter ids against the known options.
pub trait FilterLookup {
    fn contains(&self, kind: FilterKind, id: u32) -> bool;
}

impl<F> FilterLookup for F
where
    F: Fn(FilterKind, u32) -> bool,
{
    fn contains(&self, kind: FilterKind, id: u32) -> bool {
        self(kind, id)
    }
}

/// Immutable, id-indexed list of options in server order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptionSet {
    options: Vec<FilterOption>,
    index: HashMap<u32, usize>,
}

impl FilterOptionSet {
    /// Build a set, dropping malformed entries and repeated ids.
    pub fn from_options(kind: FilterKind, raw: Vec<FilterOption>) -> Self {
        let mut options = Vec::with_capacity(raw.len());
        let mut index = HashMap::with_capacity(raw.len());

        for option in raw {
            if !option.is_well_formed() {
                warn!(%kind, id = option.id, "Dropping malformed filter option");
                continue;
            }
            if index.contains_key(&option.id) {
                warn!(%kind, id = option.id, "Dropping duplicate filter option");
                continue;
            }
            index.insert(option.id, options.len());
            options.push(option);
        }

        Self { options, index }
    }

    pub fn get(&self, id: u32) -> Option<&FilterOption> {
        self.index.get(&id).map(|&i| &self.options[i])
    }

    pub fn contains(&self, id: u32) -> bool {
        self.index.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterOption> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Outcome of loading both collections.
#[derive(Debug)]
pub struct CatalogLoadReport {
    pub categories: Result<Arc<FilterOptionSet>, CatalogError>,
    pub publishers: Result<Arc<FilterOptionSet>, CatalogError>,
}

impl CatalogLoadReport {
    pub fn is_complete(&self) -> bool {
        self.categories.is_ok() && self.publishers.is_ok()
    }

    pub fn errors(&self) -> impl Iterator<Item = &CatalogError> {
        [&self.categories, &self.publishers]
            .into_iter()
            .filter_map(|r| r.as_ref().err())
    }
}

/// Lazily loaded, shared-read-only filter options.
pub struct FilterCatalog {
    api: Arc<dyn CatalogApi>,
    categories: OnceCell<Arc<FilterOptionSet>>,
    publishers: OnceCell<Arc<FilterOptionSet>>,
}

impl FilterCatalog {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            categories: OnceCell::new(),
            publishers: OnceCell::new(),
        }
    }

    /// Fetch categories, or return the cached set when already loaded.
    pub async fn load_categories(&self) -> Result<Arc<FilterOptionSet>, CatalogError> {
        self.load(FilterKind::Category).await
    }

    /// Fetch publishers, or return the cached set when already loaded.
    pub async fn load_publishers(&self) -> Result<Arc<FilterOptionSet>, CatalogError> {
        self.load(FilterKind::Publisher).await
    }

    /// Load both collections concurrently.
    pub async fn load_all(&self) -> CatalogLoadReport {
        let (categories, publishers) =
            futures::join!(self.load_categories(), self.load_publishers());
        CatalogLoadReport {
            categories,
            publishers,
        }
    }

    /// Cached categories, if loaded.
    pub fn categories(&self) -> Option<Arc<FilterOptionSet>> {
        self.categories.get().cloned()
    }

    /// Cached publishers, if loaded.
    pub fn publishers(&self) -> Option<Arc<FilterOptionSet>> {
        self.publishers.get().cloned()
    }

    /// Whether the filter UI for `kind` can be enabled.
    pub fn is_loaded(&self, kind: FilterKind) -> bool {
        self.cell(kind).initialized()
    }

    /// Whether both collections are loaded.
    pub fn is_available(&self) -> bool {
        self.is_loaded(FilterKind::Category) && self.is_loaded(FilterKind::Publisher)
    }

    fn cell(&self, kind: FilterKind) -> &OnceCell<Arc<FilterOptionSet>> {
        match kind {
            FilterKind::Category => &self.categories,
            FilterKind::Publisher => &self.publishers,
        }
    }

    async fn load(&self, kind: FilterKind) -> Result<Arc<FilterOptionSet>, CatalogError> {
        self.cell(kind)
            .get_or_try_init(|| async {
                let fetched = match kind {
                    FilterKind::Category => self.api.list_categories().await,
                    FilterKind::Publisher => self.api.list_publishers().await,
                };

                match fetched {
                    Ok(raw) => {
                        let set = FilterOptionSet::from_options(kind, raw);
                        info!(%kind, count = set.len(), "Filter options loaded");
                        FILTER_CATALOG_LOADS.with_label_values(&["ok"]).inc();
                        Ok(Arc::new(set))
                    }
                    Err(source) => {
                        warn!(%kind, error = %source, "Filter options unavailable");
                        FILTER_CATALOG_LOADS.with_label_values(&["failed"]).inc();
                        Err(CatalogError::CatalogUnavailable { kind, source })
                    }
                }
            })
            .await
            .cloned()
    }
}

impl FilterLookup for FilterCatalog {
    fn contains(&self, kind: FilterKind, id: u32) -> bool {
        self.cell(kind).get().is_some_and(|set| set.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::testing::{fixtures, MockCatalogApi, RecordedApiCall};

    fn catalog_with(mock: &Arc<MockCatalogApi>) -> FilterCatalog {
        FilterCatalog::new(Arc::clone(mock) as Arc<dyn CatalogApi>)
    }

    #[test]
    fn test_option_set_drops_malformed_and_duplicates() {
        let set = FilterOptionSet::from_options(
            FilterKind::Category,
            vec![
                FilterOption::new(2, "Strategy"),
                FilterOption::new(0, "Zero"),
                FilterOption::new(5, ""),
                FilterOption::new(2, "Strategy Again"),
                FilterOption::new(1, "Action"),
            ],
        );

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(2).unwrap().name, "Strategy");
        assert!(set.contains(1));
        assert!(!set.contains(5));
        // Server order is preserved
        let names: Vec<_> = set.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Strategy", "Action"]);
    }

    #[tokio::test]
    async fn test_load_categories_fetches_once() {
        let mock = Arc::new(MockCatalogApi::new());
        mock.set_categories(fixtures::categories(4)).await;
        let catalog = catalog_with(&mock);

        let first = catalog.load_categories().await.unwrap();
        let second = catalog.load_categories().await.unwrap();

        assert_eq!(first, second);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(mock.count_calls(RecordedApiCall::is_categories).await, 1);
    }

    #[tokio::test]
    async fn test_failed_load_can_be_retried() {
        let mock = Arc::new(MockCatalogApi::new());
        mock.set_publishers(fixtures::publishers(3)).await;
        mock.set_next_error(ApiError::Unavailable("offline".to_string()))
            .await;
        let catalog = catalog_with(&mock);

        let err = catalog.load_publishers().await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::CatalogUnavailable {
                kind: FilterKind::Publisher,
                ..
            }
        ));
        assert!(!catalog.is_loaded(FilterKind::Publisher));
        assert!(!catalog.contains(FilterKind::Publisher, 1));

        let publishers = catalog.load_publishers().await.unwrap();
        assert_eq!(publishers.len(), 3);
        assert!(catalog.contains(FilterKind::Publisher, 1));
    }

    #[tokio::test]
    async fn test_load_all_reports_partial_failure() {
        let mock = Arc::new(MockCatalogApi::new());
        mock.set_categories(fixtures::categories(2)).await;
        mock.set_publishers(fixtures::publishers(2)).await;
        mock.fail_publishers(true).await;
        let catalog = catalog_with(&mock);

        let report = catalog.load_all().await;
        assert!(!report.is_complete());
        assert!(report.categories.is_ok());
        assert_eq!(report.errors().count(), 1);
        assert!(catalog.is_loaded(FilterKind::Category));
        assert!(!catalog.is_available());
    }

    #[test]
    fn test_closure_lookup() {
        let lookup = |kind: FilterKind, id: u32| kind == FilterKind::Category && id == 3;
        assert!(lookup.contains(FilterKind::Category, 3));
        assert!(!lookup.contains(FilterKind::Publisher, 3));
    }
}
