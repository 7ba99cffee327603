//! Keyed query cache
//!
//! Each key holds the last known data, a stale flag and at most one
//! request in flight. Concurrent fetches of the same key share that
//! request. Every started request and every cancel bumps the key's
//! generation; a request only writes its result back if it is still the
//! key's current request when it completes.

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use tb_core::result::TbResult;
use tracing::{debug, warn};

type SharedFetch<V> = Shared<BoxFuture<'static, TbResult<V>>>;

struct InFlight<V> {
    generation: u64,
    request: SharedFetch<V>,
}

struct Entry<V> {
    data: Option<V>,
    stale: bool,
    generation: u64,
    in_flight: Option<InFlight<V>>,
}

impl<V> Default for Entry<V> {
    fn default() -> Self {
        Self {
            data: None,
            stale: true,
            generation: 0,
            in_flight: None,
        }
    }
}

impl<V> Entry<V> {
    fn is_fresh(&self) -> bool {
        self.data.is_some() && !self.stale
    }
}

pub struct QueryCache<K, V> {
    entries: Mutex<HashMap<K, Entry<V>>>,
}

impl<K, V> Default for QueryCache<K, V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Return fresh data for `key`, or fetch it.
    ///
    /// If a request for `key` is already running, this waits for it instead
    /// of calling `fetcher`. `fetcher` runs under the cache lock and must
    /// only build the future.
    pub async fn fetch<F, Fut>(&self, key: K, fetcher: F) -> TbResult<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = TbResult<V>> + Send + 'static,
    {
        let (generation, request) = {
            let mut entries = self.entries.lock();
            let entry = entries.entry(key.clone()).or_default();

            if entry.is_fresh() {
                if let Some(ref data) = entry.data {
                    debug!(key = ?key, "Cache hit");
                    return Ok(data.clone());
                }
            }

            match entry.in_flight {
                Some(ref in_flight) => {
                    debug!(key = ?key, "Joining in-flight request");
                    (in_flight.generation, in_flight.request.clone())
                }
                None => {
                    entry.generation += 1;
                    let request = fetcher().boxed().shared();
                    entry.in_flight = Some(InFlight {
                        generation: entry.generation,
                        request: request.clone(),
                    });
                    debug!(key = ?key, generation = entry.generation, "Fetching");
                    (entry.generation, request)
                }
            }
        };

        let result = request.await;

        let mut entries = self.entries.lock();
        let Some(entry) = entries.get_mut(&key) else {
            return result;
        };

        let current = entry
            .in_flight
            .as_ref()
            .map_or(false, |in_flight| in_flight.generation == generation);
        if current {
            entry.in_flight = None;
            if let Ok(ref data) = result {
                entry.data = Some(data.clone());
                entry.stale = false;
            }
            return result;
        }

        // Superseded while in flight. Keep whatever the cache holds now.
        if entry.generation != generation {
            if let Some(ref data) = entry.data {
                debug!(key = ?key, generation, "Discarding superseded response");
                return Ok(data.clone());
            }
        }
        result
    }

    /// Drop the in-flight request for `key` so its response is discarded.
    /// The underlying call keeps running.
    pub fn cancel(&self, key: &K) {
        if let Some(entry) = self.entries.lock().get_mut(key) {
            Self::cancel_entry(key, entry);
        }
    }

    /// [`cancel`](Self::cancel) every key matching `predicate`
    pub fn cancel_where<P>(&self, mut predicate: P)
    where
        P: FnMut(&K) -> bool,
    {
        for (key, entry) in self.entries.lock().iter_mut() {
            if predicate(key) {
                Self::cancel_entry(key, entry);
            }
        }
    }

    fn cancel_entry(key: &K, entry: &mut Entry<V>) {
        entry.generation += 1;
        if entry.in_flight.take().is_some() {
            debug!(key = ?key, "Cancelled in-flight request");
        }
    }

    pub fn data(&self, key: &K) -> Option<V> {
        self.entries.lock().get(key).and_then(|entry| entry.data.clone())
    }

    /// Replace the data for `key` and mark it fresh
    pub fn set_data(&self, key: K, data: V) {
        let mut entries = self.entries.lock();
        let entry = entries.entry(key).or_default();
        entry.data = Some(data);
        entry.stale = false;
    }

    pub fn is_stale(&self, key: &K) -> bool {
        self.entries.lock().get(key).map_or(true, |entry| entry.stale)
    }

    /// Mark `key` stale; the next fetch goes to the API
    pub fn invalidate(&self, key: &K) {
        if let Some(entry) = self.entries.lock().get_mut(key) {
            entry.stale = true;
        }
    }

    pub fn invalidate_where<P>(&self, mut predicate: P)
    where
        P: FnMut(&K) -> bool,
    {
        for (key, entry) in self.entries.lock().iter_mut() {
            if predicate(key) {
                entry.stale = true;
            }
        }
    }

    pub fn invalidate_all(&self) {
        self.invalidate_where(|_| true);
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.entries.lock().remove(key).and_then(|entry| entry.data)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Optimistically update `key`, then run `mutation`.
    ///
    /// In-flight requests for `key` are cancelled first so a late response
    /// cannot overwrite the optimistic data. On failure the data is
    /// restored to the snapshot taken just before the optimistic write and
    /// the error is returned. On success `key` is invalidated so the next
    /// fetch reconciles with the server.
    pub async fn mutate_optimistic<A, M, T>(&self, key: K, apply: A, mutation: M) -> TbResult<T>
    where
        A: FnOnce(&V) -> V,
        M: Future<Output = TbResult<T>>,
    {
        self.cancel(&key);
        let snapshot = self.data(&key);
        if let Some(ref current) = snapshot {
            self.set_data(key.clone(), apply(current));
        }

        match mutation.await {
            Ok(value) => {
                self.invalidate(&key);
                Ok(value)
            }
            Err(err) => {
                warn!(key = ?key, error = %err, "Mutation failed, rolling back");
                self.cancel(&key);
                match snapshot {
                    Some(previous) => self.set_data(key, previous),
                    None => {
                        self.remove(&key);
                    }
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tb_core::error::TbError;

    fn counted(
        calls: &Arc<AtomicUsize>,
        value: Vec<i64>,
        delay_ms: u64,
    ) -> impl FnOnce() -> BoxFuture<'static, TbResult<Vec<i64>>> {
        let calls = Arc::clone(calls);
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(value)
            }
            .boxed()
        }
    }

    #[tokio::test]
    async fn test_fetch_caches_fresh_data() {
        let cache: QueryCache<&str, Vec<i64>> = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        assert_eq!(cache.fetch("tasks", counted(&calls, vec![1], 0)).await.unwrap(), vec![1]);
        assert_eq!(cache.fetch("tasks", counted(&calls, vec![2], 0)).await.unwrap(), vec![1]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let cache: QueryCache<&str, Vec<i64>> = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        cache.fetch("tasks", counted(&calls, vec![1], 0)).await.unwrap();
        cache.invalidate(&"tasks");
        assert!(cache.is_stale(&"tasks"));
        assert_eq!(cache.data(&"tasks"), Some(vec![1]));

        assert_eq!(cache.fetch("tasks", counted(&calls, vec![2], 0)).await.unwrap(), vec![2]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_fetches_share_request() {
        let cache: QueryCache<&str, Vec<i64>> = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let (a, b) = tokio::join!(
            cache.fetch("tasks", counted(&calls, vec![1], 300)),
            cache.fetch("tasks", counted(&calls, vec![2], 300)),
        );
        assert_eq!(a.unwrap(), vec![1]);
        assert_eq!(b.unwrap(), vec![1]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_response_is_discarded() {
        let cache: Arc<QueryCache<&str, Vec<i64>>> = Arc::new(QueryCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let pending = {
            let cache = Arc::clone(&cache);
            let fetcher = counted(&calls, vec![1], 300);
            tokio::spawn(async move { cache.fetch("tasks", fetcher).await })
        };
        tokio::task::yield_now().await;

        cache.cancel(&"tasks");
        cache.set_data("tasks", vec![9]);

        assert_eq!(pending.await.unwrap().unwrap(), vec![9]);
        assert_eq!(cache.data(&"tasks"), Some(vec![9]));
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_data() {
        let cache: QueryCache<&str, Vec<i64>> = QueryCache::new();
        cache.set_data("tasks", vec![1]);
        cache.invalidate(&"tasks");

        let result = cache
            .fetch("tasks", || async { Err(TbError::Internal("offline".to_string())) })
            .await;
        assert!(result.is_err());
        assert_eq!(cache.data(&"tasks"), Some(vec![1]));
        assert!(cache.is_stale(&"tasks"));
    }

    #[tokio::test]
    async fn test_optimistic_success_invalidates() {
        let cache: QueryCache<&str, Vec<i64>> = QueryCache::new();
        cache.set_data("tasks", vec![1, 2]);

        let result = cache
            .mutate_optimistic(
                "tasks",
                |tasks| tasks.iter().map(|t| t * 10).collect(),
                async { Ok::<_, TbError>(()) },
            )
            .await;
        assert!(result.is_ok());
        assert_eq!(cache.data(&"tasks"), Some(vec![10, 20]));
        assert!(cache.is_stale(&"tasks"));
    }

    #[tokio::test]
    async fn test_optimistic_failure_restores_snapshot() {
        let cache: QueryCache<&str, Vec<i64>> = QueryCache::new();
        cache.set_data("tasks", vec![1, 2]);

        let result: TbResult<()> = cache
            .mutate_optimistic(
                "tasks",
                |tasks| tasks.iter().map(|t| t * 10).collect(),
                async { Err(TbError::not_found("Task", 2)) },
            )
            .await;
        assert!(result.unwrap_err().is_not_found());
        assert_eq!(cache.data(&"tasks"), Some(vec![1, 2]));
    }

    #[tokio::test]
    async fn test_optimistic_write_visible_before_mutation_resolves() {
        let cache: QueryCache<&str, Vec<i64>> = QueryCache::new();
        cache.set_data("tasks", vec![1]);

        let result = cache
            .mutate_optimistic("tasks", |_| vec![2], async {
                assert_eq!(cache.data(&"tasks"), Some(vec![2]));
                Ok::<_, TbError>(())
            })
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_where_discards_matching_requests() {
        let cache: Arc<QueryCache<&str, Vec<i64>>> = Arc::new(QueryCache::new());
        let calls = Arc::new(AtomicUsize::new(0));
        cache.set_data("all", vec![1]);
        cache.set_data("team", vec![1]);
        cache.invalidate_all();

        let spawn_fetch = |key: &'static str, value: Vec<i64>| {
            let cache = Arc::clone(&cache);
            let fetcher = counted(&calls, value, 300);
            tokio::spawn(async move { cache.fetch(key, fetcher).await })
        };
        let all = spawn_fetch("all", vec![2]);
        let team = spawn_fetch("team", vec![3]);
        tokio::task::yield_now().await;

        cache.cancel_where(|key| *key != "team");

        assert_eq!(all.await.unwrap().unwrap(), vec![1]);
        assert_eq!(team.await.unwrap().unwrap(), vec![3]);
        assert_eq!(cache.data(&"all"), Some(vec![1]));
        assert!(cache.is_stale(&"all"));
        assert_eq!(cache.data(&"team"), Some(vec![3]));
    }

    #[test]
    fn test_invalidate_where() {
        let cache: QueryCache<(&str, i64), Vec<i64>> = QueryCache::new();
        cache.set_data(("links", 1), vec![]);
        cache.set_data(("links", 2), vec![]);
        cache.set_data(("tasks", 1), vec![]);

        cache.invalidate_where(|(kind, _)| *kind == "links");
        assert!(cache.is_stale(&("links", 1)));
        assert!(cache.is_stale(&("links", 2)));
        assert!(!cache.is_stale(&("tasks", 1)));

        assert_eq!(cache.remove(&("tasks", 1)), Some(vec![]));
        assert_eq!(cache.len(), 2);
    }
}
