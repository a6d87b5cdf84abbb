//! Session state and the page-loading loop

use crate::cache::{Cache, CacheStats};
use crate::error::{FetchError, PkgDocsError, PkgDocsResult};
use crate::query::{evaluate, FetchInstruction, Query, Status};
use crate::registry::Fetcher;
use crate::session::message::{LoadProgress, SessionMsg};
use crate::version::VersionSpec;
use chrono::{DateTime, Utc};
use semver::Version;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Owner of the cache for one run of the program
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    cache: Cache,
    fetcher: Arc<dyn Fetcher>,
    tx: UnboundedSender<SessionMsg>,
    rx: UnboundedReceiver<SessionMsg>,
    in_flight: usize,
}

impl Session {
    /// Create a session with an empty cache
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self::with_cache(fetcher, Cache::new())
    }

    /// Create a session that starts from an existing cache
    pub fn with_cache(fetcher: Arc<dyn Fetcher>, cache: Cache) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        debug!("Session {} fetching from {}", id, fetcher.source_name());

        Self {
            id,
            started_at: Utc::now(),
            cache,
            fetcher,
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Fetches spawned whose results have not been applied yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn progress(&self) -> LoadProgress {
        LoadProgress {
            in_flight: self.in_flight,
            stats: self.cache.stats(),
        }
    }

    /// Evaluate `query` once and spawn whatever it dispatched.
    ///
    /// Does not wait for anything; results are applied by [`drain`](Self::drain)
    /// or the next [`run`](Self::run).
    pub fn step<T>(&mut self, query: &Query<T>) -> Status<T> {
        let evaluation = evaluate(query, std::mem::take(&mut self.cache));
        self.cache = evaluation.cache;

        for instruction in evaluation.dispatch {
            self.spawn(instruction);
        }
        evaluation.status
    }

    fn spawn(&mut self, instruction: FetchInstruction) {
        let key = instruction.into_key();
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();

        debug!("Spawning fetch for {}", key);
        tokio::spawn(async move {
            // The fetch runs in its own task so a panicking fetcher still
            // settles the key instead of leaving it pending forever.
            let owned = key.clone();
            let fetch = tokio::spawn(async move { fetcher.fetch(&owned).await });
            let result = match fetch.await {
                Ok(result) => result,
                Err(e) => {
                    warn!("Fetch task for {} failed: {}", key, e);
                    Err(FetchError::network(&key, format!("fetch task failed: {}", e)))
                }
            };
            // The receiver lives as long as the session; a send error only
            // means the session is gone and nobody needs the result.
            let _ = tx.send(SessionMsg::Arrived { key, result });
        });
        self.in_flight += 1;
    }

    fn apply(&mut self, msg: SessionMsg) {
        match msg {
            SessionMsg::Arrived { key, result } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                match &result {
                    Ok(_) => debug!("Arrived: {}", key),
                    Err(e) => debug!("Failed: {}", e),
                }
                self.cache.apply_result(&key, result);
            }
        }
    }

    /// Apply every result that has already arrived. Returns how many were applied.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(msg) = self.rx.try_recv() {
            self.apply(msg);
            applied += 1;
        }
        applied
    }

    /// Load `query` to completion
    pub async fn run<T>(&mut self, query: &Query<T>) -> PkgDocsResult<T> {
        self.run_with(query, |_| {}).await
    }

    /// Load `query` to completion, reporting progress while it is loading.
    ///
    /// Results for keys the query no longer needs are still applied, so a
    /// later page can reuse them.
    pub async fn run_with<T>(
        &mut self,
        query: &Query<T>,
        mut on_progress: impl FnMut(LoadProgress),
    ) -> PkgDocsResult<T> {
        loop {
            self.drain();

            match self.step(query) {
                Status::Ready(value) => {
                    info!("Loaded {:?} query ({})", query.kind(), self.cache.stats());
                    return Ok(value);
                }
                Status::Failed(e) => return Err(e.into()),
                Status::Loading => {}
            }

            // Pending entries with no task behind them will never settle
            if self.in_flight == 0 {
                return Err(PkgDocsError::Stalled);
            }

            on_progress(self.progress());

            match self.rx.recv().await {
                Some(msg) => self.apply(msg),
                None => return Err(PkgDocsError::Internal("session channel closed".into())),
            }
        }
    }

    /// Resolve `spec` to a concrete version, fetching the latest version if needed
    pub async fn resolve_version(&mut self, spec: &mut VersionSpec) -> PkgDocsResult<Version> {
        self.resolve_version_with(spec, |_| {}).await
    }

    /// Like [`resolve_version`](Self::resolve_version), reporting progress
    pub async fn resolve_version_with(
        &mut self,
        spec: &mut VersionSpec,
        on_progress: impl FnMut(LoadProgress),
    ) -> PkgDocsResult<Version> {
        if let Some(v) = spec.resolved() {
            return Ok(v.clone());
        }

        self.run_with(&spec.latest_query(), on_progress).await?;

        match spec.resolve_from(&self.cache)? {
            Some(v) => Ok(v.clone()),
            None => Err(PkgDocsError::Stalled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{PackageName, ResourceKey};
    use crate::cache::Resource;
    use crate::error::ErrorKind;
    use crate::query;
    use crate::registry::{MemoryFetcher, Release};
    use async_trait::async_trait;
    use crate::version::VersionRef;
    use std::time::Duration;

    const RELEASES: &str = r#"{"1.0.0": 1534000000, "1.0.5": 1580000000}"#;

    fn core() -> PackageName {
        PackageName::new("elm", "core")
    }

    fn fixtures() -> MemoryFetcher {
        MemoryFetcher::new()
            .with_body(ResourceKey::releases(&core()), RELEASES)
            .with_body(ResourceKey::latest(&core()), RELEASES)
            .with_body(
                ResourceKey::readme(&core(), &Version::new(1, 0, 5)),
                "# core\n\nThe core library.",
            )
    }

    #[tokio::test]
    async fn run_loads_combined_query_with_one_fetch_per_key() {
        let fetcher = Arc::new(fixtures());
        let mut session = Session::new(fetcher.clone());

        let page = Query::combine3(
            |a: Arc<Vec<Release>>, b: Arc<Vec<Release>>, v: Version| {
                (a.len(), b.len(), v)
            },
            query::releases(&core()),
            query::releases(&core()),
            query::latest(&core()),
        );

        let (a, b, latest) = session.run(&page).await.unwrap();
        assert_eq!((a, b), (2, 2));
        assert_eq!(latest, Version::new(1, 0, 5));

        assert_eq!(fetcher.calls(&ResourceKey::releases(&core())), 1);
        assert_eq!(fetcher.calls(&ResourceKey::latest(&core())), 1);
        assert_eq!(session.in_flight(), 0);
    }

    #[tokio::test]
    async fn rerunning_a_loaded_query_fetches_nothing() {
        let fetcher = Arc::new(fixtures());
        let mut session = Session::new(fetcher.clone());
        let page = query::releases(&core());

        session.run(&page).await.unwrap();
        session.run(&page).await.unwrap();

        assert_eq!(fetcher.total_calls(), 1);
    }

    #[tokio::test]
    async fn failed_requirement_fails_the_run() {
        let html = PackageName::new("elm", "html");
        let key = ResourceKey::latest(&html);
        let fetcher = Arc::new(
            MemoryFetcher::new().with_error(key.clone(), FetchError::network(&key, "reset")),
        );
        let mut session = Session::new(fetcher);

        let err = session.run(&query::latest(&html)).await.unwrap_err();
        match err {
            PkgDocsError::Fetch(e) => assert_eq!(e.kind(), ErrorKind::Network),
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(session.stats().failed, 1);
    }

    #[tokio::test]
    async fn optional_failure_still_loads_page() {
        let html = PackageName::new("elm", "html");
        let fetcher = Arc::new(
            MemoryFetcher::new().with_body(ResourceKey::releases(&html), RELEASES),
        );
        let mut session = Session::new(fetcher);

        let page = query::releases(&html).zip(query::latest(&html).optional());
        let (releases, latest) = session.run(&page).await.unwrap();

        assert_eq!(releases.len(), 2);
        assert_eq!(latest, None);
    }

    #[tokio::test]
    async fn late_arrival_is_integrated_later() {
        let html = PackageName::new("elm", "html");
        let slow = ResourceKey::latest(&html);
        let fetcher = Arc::new(
            fixtures()
                .with_body(slow.clone(), RELEASES)
                .with_delay(slow.clone(), Duration::from_millis(50)),
        );
        let mut session = Session::new(fetcher.clone());

        // Start a page and navigate away before it finishes
        assert!(session.step(&query::latest(&html)).is_loading());
        session.run(&query::releases(&core())).await.unwrap();

        tokio::time::sleep(Duration::from_millis(200)).await;
        session.drain();

        assert_eq!(session.in_flight(), 0);
        assert!(session.cache().ready(&slow).is_some());

        let latest = session.run(&query::latest(&html)).await.unwrap();
        assert_eq!(latest, Version::new(1, 0, 5));
        assert_eq!(fetcher.calls(&slow), 1);
    }

    struct PanickingFetcher;

    #[async_trait]
    impl Fetcher for PanickingFetcher {
        async fn fetch(&self, key: &ResourceKey) -> Result<Resource, FetchError> {
            panic!("fetcher bug while loading {}", key);
        }

        fn source_name(&self) -> &str {
            "panicking"
        }
    }

    #[tokio::test]
    async fn panicking_fetcher_fails_the_key() {
        let mut session = Session::new(Arc::new(PanickingFetcher));

        let q = query::latest(&core());
        let run = session.run(&q);
        let err = tokio::time::timeout(Duration::from_secs(5), run)
            .await
            .expect("run should settle")
            .unwrap_err();

        match err {
            PkgDocsError::Fetch(e) => {
                assert_eq!(e.kind(), ErrorKind::Network);
                assert!(e.to_string().contains("fetch task failed"));
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(session.in_flight(), 0);
        assert_eq!(session.stats().failed, 1);
    }

    #[tokio::test]
    async fn pending_without_task_is_stalled() {
        let key = ResourceKey::releases(&core());
        let mut cache = Cache::new();
        cache.mark_pending(&key);

        let mut session = Session::with_cache(Arc::new(fixtures()), cache);
        let err = session.run(&query::releases(&core())).await.unwrap_err();

        assert!(matches!(err, PkgDocsError::Stalled));
    }

    #[tokio::test]
    async fn progress_is_reported_while_loading() {
        let mut session = Session::new(Arc::new(fixtures()));
        let mut reports = Vec::new();

        session
            .run_with(&query::releases(&core()), |p| reports.push(p))
            .await
            .unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].in_flight, 1);
        assert_eq!(reports[0].stats.pending, 1);
    }

    #[tokio::test]
    async fn latest_version_resolves_once_and_reuses_cache() {
        let fetcher = Arc::new(fixtures());
        let mut session = Session::new(fetcher.clone());

        let mut first = VersionSpec::new(core(), VersionRef::Latest);
        let version = session.resolve_version(&mut first).await.unwrap();
        assert_eq!(version, Version::new(1, 0, 5));

        let readme = session.run(&query::readme(&core(), &version)).await.unwrap();
        assert!(readme.starts_with("# core"));

        // A second navigation to the same package's latest readme
        let mut second = VersionSpec::new(core(), VersionRef::Latest);
        let again = session.resolve_version(&mut second).await.unwrap();
        session.run(&query::readme(&core(), &again)).await.unwrap();

        assert_eq!(fetcher.calls(&ResourceKey::latest(&core())), 1);
        assert_eq!(
            fetcher.calls(&ResourceKey::readme(&core(), &Version::new(1, 0, 5))),
            1
        );
    }

    #[tokio::test]
    async fn unavailable_latest_version_is_an_error() {
        let mut session = Session::new(Arc::new(MemoryFetcher::new()));
        let mut spec = VersionSpec::new(PackageName::new("nobody", "nothing"), VersionRef::Latest);

        let err = session.resolve_version(&mut spec).await.unwrap_err();
        match err {
            PkgDocsError::Fetch(e) => assert_eq!(e.kind(), ErrorKind::NotFound),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn exact_version_needs_no_fetch() {
        let fetcher = Arc::new(MemoryFetcher::new());
        let mut session = Session::new(fetcher.clone());
        let mut spec = VersionSpec::new(core(), VersionRef::Exact(Version::new(1, 0, 0)));

        let version = session.resolve_version(&mut spec).await.unwrap();
        assert_eq!(version, Version::new(1, 0, 0));
        assert_eq!(fetcher.total_calls(), 0);
    }
}
