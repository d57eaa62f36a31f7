//!
//! src/cache.rs  Andrew Belles  Oct 19th, 2026
//!
//! Caller owned memo of fetched charts keyed by category. With the
//! session policy an entry lives until the cache itself is dropped
//!

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::category::ChartCategory;
use crate::config::CachePolicy;
use crate::errors::FetchError;
use crate::fetch::{ChartSource, RawChartItem};

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub items: Vec<RawChartItem>,
    pub fetched_at: DateTime<Utc>
}

#[derive(Debug)]
pub struct ChartCache {
    policy: CachePolicy,
    entries: HashMap<ChartCategory, CacheEntry>,
    hits: usize,
    misses: usize
}

impl ChartCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self { policy, entries: HashMap::new(), hits: 0, misses: 0 }
    }

    pub fn policy(&self) -> CachePolicy { self.policy }
    pub fn hits(&self) -> usize { self.hits }
    pub fn misses(&self) -> usize { self.misses }

    pub fn get(&self, category: ChartCategory) -> Option<&CacheEntry> {
        self.entries.get(&category)
    }

    /// Returns the memoized items for `category`, fetching on a miss. Only
    /// successful fetches are stored, so an error is retried on the next call.
    pub async fn get_or_fetch<S>(&mut self, source: &S, category: ChartCategory) ->
        Result<Vec<RawChartItem>, FetchError>
    where
        S: ChartSource + ?Sized
    {
        if let Some(entry) = self.entries.get(&category) {
            self.hits += 1;
            debug!(field = category.api_field(), fetched_at = %entry.fetched_at,
                "chart.cache.hit");
            return Ok(entry.items.clone());
        }

        self.misses += 1;
        debug!(field = category.api_field(), policy = ?self.policy, "chart.cache.miss");
        let items = source.fetch(category).await?;

        if self.policy == CachePolicy::Session {
            self.entries.insert(category, CacheEntry {
                items: items.clone(),
                fetched_at: Utc::now()
            });
        }
        Ok(items)
    }

    #[cfg(test)]
    pub fn invalidate(&mut self, category: ChartCategory) -> bool {
        self.entries.remove(&category).is_some()
    }

    #[cfg(test)]
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::category::ChartCategory;
    use crate::errors::FetchError;
    use crate::fetch::{ChartSource, RawChartItem};

    /// In-memory source that counts calls and can fail on demand
    #[derive(Default)]
    pub struct FakeSource {
        pub items: HashMap<ChartCategory, Vec<RawChartItem>>,
        pub failure: Mutex<Option<FetchError>>,
        pub calls: Mutex<Vec<ChartCategory>>
    }

    impl FakeSource {
        pub fn with(category: ChartCategory, items: Vec<RawChartItem>) -> Self {
            let mut source = Self::default();
            source.items.insert(category, items);
            source
        }

        pub fn fail_next(&self, error: FetchError) {
            *self.failure.lock().unwrap() = Some(error);
        }

        pub fn calls(&self) -> Vec<ChartCategory> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChartSource for FakeSource {
        async fn fetch(&self, category: ChartCategory) ->
            Result<Vec<RawChartItem>, FetchError> {
            self.calls.lock().unwrap().push(category);
            if let Some(error) = self.failure.lock().unwrap().take() {
                return Err(error);
            }
            Ok(self.items.get(&category).cloned().unwrap_or_default())
        }
    }
}
