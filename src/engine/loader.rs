use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::thread;

use tracing::{debug, info, warn};

use crate::engine::api_client::CatalogSource;
use crate::engine::error::{CatalogError, CatalogResult};
use crate::model::creature::Creature;

pub const PAGE_SIZE: u32 = 24;
/// Highest id the public API serves reliably.
pub const MAX_ID: u32 = 1010;

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub creatures: Vec<Creature>,
    pub loaded_max: u32,
    pub exhausted: bool,
}

/// Page-by-page fetcher over sequential ids, backed by a session cache.
pub struct IncrementalLoader {
    cache: HashMap<u32, Creature>,
    loaded_max: u32,
    page_size: u32,
    max_id: u32,
}

impl Default for IncrementalLoader {
    fn default() -> Self {
        Self::new(PAGE_SIZE, MAX_ID)
    }
}

impl IncrementalLoader {
    pub fn new(page_size: u32, max_id: u32) -> Self {
        Self {
            cache: HashMap::new(),
            loaded_max: 0,
            page_size: page_size.max(1),
            max_id,
        }
    }

    pub fn loaded_max(&self) -> u32 {
        self.loaded_max
    }

    pub fn is_exhausted(&self) -> bool {
        self.loaded_max >= self.max_id
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Ids the next call to `load_next_page` will cover, if any.
    pub fn next_range(&self) -> Option<RangeInclusive<u32>> {
        if self.is_exhausted() {
            return None;
        }
        let from = self.loaded_max + 1;
        let to = self
            .loaded_max
            .saturating_add(self.page_size)
            .min(self.max_id);
        Some(from..=to)
    }

    /// Fetches the next batch concurrently and joins it.
    /// Any failed fetch fails the batch and leaves `loaded_max` where it was.
    pub fn load_next_page<S: CatalogSource + ?Sized>(&mut self, source: &S) -> CatalogResult<Page> {
        let Some(range) = self.next_range() else {
            debug!(loaded_max = self.loaded_max, "ceiling reached, nothing to load");
            return Ok(Page {
                creatures: Vec::new(),
                loaded_max: self.loaded_max,
                exhausted: true,
            });
        };

        let (from, to) = (*range.start(), *range.end());
        info!(from, to, "loading page");

        let missing: Vec<u32> = range.clone().filter(|id| !self.cache.contains_key(id)).collect();
        let fetched: Vec<(u32, CatalogResult<Creature>)> = thread::scope(|scope| {
            let handles: Vec<_> = missing
                .iter()
                .map(|&id| (id, scope.spawn(move || source.fetch_creature(id))))
                .collect();

            handles
                .into_iter()
                .map(|(id, handle)| {
                    let result = handle
                        .join()
                        .unwrap_or_else(|_| Err(CatalogError::WorkerPanicked(id)));
                    (id, result)
                })
                .collect()
        });

        let mut first_error = None;
        for (id, result) in fetched {
            match result {
                Ok(creature) => {
                    self.cache.insert(id, creature);
                }
                Err(e) => {
                    warn!(id, error = %e, "fetch failed");
                    first_error.get_or_insert(e);
                }
            }
        }
        if let Some(e) = first_error {
            return Err(e);
        }

        let creatures: Vec<Creature> = range
            .filter_map(|id| self.cache.get(&id).cloned())
            .collect();
        self.loaded_max = to;
        debug!(loaded_max = to, cached = self.cache_len(), "page complete");

        Ok(Page {
            creatures,
            loaded_max: self.loaded_max,
            exhausted: self.is_exhausted(),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::creature::sample;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::time::Duration;

    /// How `fetch_categories` answers.
    #[derive(Default, Clone, Copy)]
    pub(crate) enum CategoryListing {
        #[default]
        FireAndWater,
        Empty,
        Unavailable,
    }

    /// In-memory catalog that records every request.
    #[derive(Default)]
    pub(crate) struct FakeCatalog {
        pub failing: HashSet<u32>,
        pub panicking: HashSet<u32>,
        pub listing: CategoryListing,
        pub delay: Option<Duration>,
        pub requests: Mutex<Vec<u32>>,
    }

    impl FakeCatalog {
        pub fn failing(ids: &[u32]) -> Self {
            Self {
                failing: ids.iter().copied().collect(),
                ..Default::default()
            }
        }

        pub fn with_listing(listing: CategoryListing) -> Self {
            Self {
                listing,
                ..Default::default()
            }
        }

        /// Every creature fetch sleeps this long first.
        pub fn slow(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Default::default()
            }
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    impl CatalogSource for FakeCatalog {
        fn fetch_creature(&self, id: u32) -> CatalogResult<Creature> {
            self.requests.lock().unwrap().push(id);
            if let Some(delay) = self.delay {
                std::thread::sleep(delay);
            }
            if self.panicking.contains(&id) {
                panic!("fake catalog told to panic on {id}");
            }
            if self.failing.contains(&id) {
                return Err(CatalogError::Status {
                    what: format!("creature {id}"),
                    status: 404,
                });
            }
            Ok(sample(id, &format!("mon{id}"), &["normal"]))
        }

        fn fetch_categories(&self) -> CatalogResult<Vec<String>> {
            match self.listing {
                CategoryListing::FireAndWater => Ok(vec!["fire".into(), "water".into()]),
                CategoryListing::Empty => Ok(Vec::new()),
                CategoryListing::Unavailable => Err(CatalogError::Status {
                    what: "category list".into(),
                    status: 500,
                }),
            }
        }

        fn fetch_bytes(&self, url: &str) -> CatalogResult<Vec<u8>> {
            Err(CatalogError::Status {
                what: url.to_string(),
                status: 404,
            })
        }
    }

    fn ids(page: &Page) -> Vec<u32> {
        page.creatures.iter().map(|c| c.id).collect()
    }

    #[test]
    fn first_page_covers_one_through_page_size() {
        let source = FakeCatalog::default();
        let mut loader = IncrementalLoader::default();

        let page = loader.load_next_page(&source).unwrap();
        assert_eq!(ids(&page), (1..=24).collect::<Vec<_>>());
        assert_eq!(page.loaded_max, 24);
        assert!(!page.exhausted);
        assert_eq!(source.request_count(), 24);
    }

    #[test]
    fn pagination_never_exceeds_ceiling() {
        let source = FakeCatalog::default();
        let mut loader = IncrementalLoader::new(4, 10);

        let sizes: Vec<usize> = (0..5)
            .map(|_| loader.load_next_page(&source).unwrap().creatures.len())
            .collect();
        assert_eq!(sizes, vec![4, 4, 2, 0, 0]);
        assert_eq!(loader.loaded_max(), 10);
        assert!(loader.is_exhausted());
        assert_eq!(loader.next_range(), None);

        let requested = source.requests.lock().unwrap().clone();
        assert!(requested.iter().all(|&id| id <= 10));
        assert_eq!(requested.len(), 10);
    }

    #[test]
    fn failed_fetch_fails_batch_and_keeps_progress() {
        let source = FakeCatalog::failing(&[3]);
        let mut loader = IncrementalLoader::new(5, 100);

        let err = loader.load_next_page(&source).unwrap_err();
        assert!(err.to_string().contains("creature 3"));
        assert_eq!(loader.loaded_max(), 0);
        assert_eq!(loader.next_range(), Some(1..=5));

        // the four good records were cached anyway
        assert_eq!(loader.cache_len(), 4);
    }

    #[test]
    fn retry_only_requests_what_is_missing() {
        let source = FakeCatalog::failing(&[2]);
        let mut loader = IncrementalLoader::new(3, 100);
        assert!(loader.load_next_page(&source).is_err());
        assert_eq!(source.request_count(), 3);

        let healthy = FakeCatalog::default();
        let page = loader.load_next_page(&healthy).unwrap();
        assert_eq!(ids(&page), vec![1, 2, 3]);
        assert_eq!(*healthy.requests.lock().unwrap(), vec![2]);
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let source = FakeCatalog::default();
        let mut loader = IncrementalLoader::new(0, 5);
        let page = loader.load_next_page(&source).unwrap();
        assert_eq!(ids(&page), vec![1]);
    }

    #[test]
    fn panicking_worker_fails_the_batch() {
        let source = FakeCatalog {
            panicking: [2].into_iter().collect(),
            ..Default::default()
        };
        let mut loader = IncrementalLoader::new(3, 10);

        let err = loader.load_next_page(&source).unwrap_err();
        assert!(matches!(err, CatalogError::WorkerPanicked(2)));
        assert_eq!(loader.loaded_max(), 0);
        assert_eq!(loader.cache_len(), 2);
    }
}
