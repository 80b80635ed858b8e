use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tokio::sync::Mutex as TurnLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use vitrine_contracts::prelude::TransportError;

use super::request::{LoadDirection, LoadRequest, LoadResult};
use super::source::PagingSource;
use super::state::{LoadedPage, PagingSnapshot, RefreshAnchor, SessionState};
use crate::network::NetworkFailure;
use crate::query::DEFAULT_PAGE_SIZE;

pub const PAGING_TARGET: &str = "vitrine::paging";

type SharedLoad<T> = Shared<BoxFuture<'static, LoadResult<T>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerConfig {
    pub page_size: u32,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PagerConfig {
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }
}

struct InFlight<T> {
    request: LoadRequest,
    generation: u64,
    cancel: CancellationToken,
    result: SharedLoad<T>,
}

struct Session<T> {
    state: SessionState,
    pages: BTreeMap<u32, LoadedPage<T>>,
    forward_exhausted: bool,
    in_flight: Option<InFlight<T>>,
    generation: u64,
}

impl<T> Default for Session<T> {
    fn default() -> Self {
        Self {
            state: SessionState::Idle,
            pages: BTreeMap::new(),
            forward_exhausted: false,
            in_flight: None,
            generation: 0,
        }
    }
}

struct Inner<S: PagingSource> {
    source: S,
    config: PagerConfig,
    session: Mutex<Session<S::Item>>,
    /// Held for the whole of a load so network calls never overlap and
    /// waiting loads run in the order they were issued.
    turn: TurnLock<()>,
    root: CancellationToken,
}

enum Next<T> {
    Join(SharedLoad<T>),
    Wait(SharedLoad<T>),
}

/// One incremental paging session over a [`PagingSource`].
///
/// At most one load is in flight at a time. Issuing a request identical to
/// the in-flight one joins it; any other request waits its turn, so pages
/// are applied in the order requests were issued. Dropping the pager
/// cancels whatever is in flight.
pub struct Pager<S: PagingSource> {
    inner: Arc<Inner<S>>,
}

impl<S: PagingSource> Pager<S> {
    pub fn new(source: S, config: PagerConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                config,
                session: Mutex::new(Session::default()),
                turn: TurnLock::new(()),
                root: CancellationToken::new(),
            }),
        }
    }

    pub fn source(&self) -> &S {
        &self.inner.source
    }

    pub fn page_size(&self) -> u32 {
        self.inner.config.page_size
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock_session().state.clone()
    }

    pub fn snapshot(&self) -> PagingSnapshot<S::Item> {
        let session = self.inner.lock_session();
        PagingSnapshot {
            pages: session.pages.values().cloned().collect(),
            state: session.state.clone(),
        }
    }

    /// Every loaded item, in page order.
    pub fn items(&self) -> Vec<S::Item> {
        self.snapshot().items()
    }

    /// Load one page.
    pub async fn load(&self, request: LoadRequest) -> LoadResult<S::Item> {
        if let Some(joined) = self.inner.join_identical(&request) {
            return joined.await;
        }

        let _turn = self.inner.turn.lock().await;
        loop {
            let next = {
                let mut session = self.inner.lock_session();
                match &session.in_flight {
                    Some(flight) if flight.request == request => {
                        Next::Join(flight.result.clone())
                    }
                    // Left running by a caller that stopped waiting.
                    Some(flight) => Next::Wait(flight.result.clone()),
                    None => {
                        if let Some(result) =
                            answer_locally(&session, &request)
                        {
                            return result;
                        }
                        Next::Join(start(&self.inner, &mut session, request))
                    }
                }
            };

            match next {
                Next::Join(result) => return result.await,
                Next::Wait(result) => {
                    let _ = result.await;
                }
            }
        }
    }

    /// The request that extends the loaded window forward: the successor of
    /// the last page, or an initial load when nothing is loaded.
    pub fn next_request(&self) -> LoadRequest {
        let load_size = self.page_size();
        let session = self.inner.lock_session();
        match session.pages.last_key_value() {
            Some((page_index, page)) => LoadRequest::Append {
                key: page.next_key.unwrap_or(page_index.saturating_add(1)),
                load_size,
            },
            None => LoadRequest::initial(load_size),
        }
    }

    /// The request that extends the loaded window backward, if the first
    /// loaded page has a predecessor.
    pub fn previous_request(&self) -> Option<LoadRequest> {
        let load_size = self.page_size();
        let session = self.inner.lock_session();
        let (_, first) = session.pages.first_key_value()?;
        first
            .prev_key
            .map(|key| LoadRequest::Prepend { key, load_size })
    }

    pub async fn load_next(&self) -> LoadResult<S::Item> {
        self.load(self.next_request()).await
    }

    /// Reload around `anchor`. Everything loaded is replaced once the
    /// reload succeeds; a failed or cancelled reload leaves it in place.
    pub async fn refresh(
        &self,
        anchor: Option<RefreshAnchor>,
    ) -> LoadResult<S::Item> {
        let key = self.snapshot().refresh_key(anchor);
        info!(target: PAGING_TARGET, ?anchor, ?key, "refreshing pager");
        self.load(LoadRequest::Refresh {
            key,
            load_size: self.page_size(),
        })
        .await
    }

    /// Abandon the in-flight load, if any.
    ///
    /// The session becomes terminal with a cancelled transport failure and
    /// the loaded pages are left as they were. A fresh request retries.
    pub fn cancel(&self) {
        let mut session = self.inner.lock_session();
        if let Some(flight) = session.in_flight.take() {
            flight.cancel.cancel();
            session.state = SessionState::Terminal(NetworkFailure::cancelled());
            info!(
                target: PAGING_TARGET,
                request = ?flight.request,
                "cancelled in-flight load"
            );
        }
    }
}

impl<S: PagingSource> Inner<S> {
    fn lock_session(&self) -> MutexGuard<'_, Session<S::Item>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn join_identical(
        &self,
        request: &LoadRequest,
    ) -> Option<SharedLoad<S::Item>> {
        let session = self.lock_session();
        let flight = session.in_flight.as_ref()?;
        if flight.request != *request {
            return None;
        }
        debug!(target: PAGING_TARGET, ?request, "joining in-flight load");
        Some(flight.result.clone())
    }

    fn apply(
        &self,
        generation: u64,
        request: &LoadRequest,
        result: &LoadResult<S::Item>,
    ) {
        let mut session = self.lock_session();
        let current =
            session.in_flight.as_ref().map(|flight| flight.generation);
        if current != Some(generation) {
            debug!(
                target: PAGING_TARGET,
                ?request,
                "discarding result of abandoned load"
            );
            return;
        }
        session.in_flight = None;

        match result {
            LoadResult::Page {
                items,
                prev_key,
                next_key,
            } => {
                // The cache is only invalidated once a refresh succeeds.
                if request.direction() == LoadDirection::Refresh {
                    session.pages.clear();
                    session.forward_exhausted = false;
                }
                let page_index = request.page_index();
                if items.is_empty() {
                    session.forward_exhausted = true;
                    info!(
                        target: PAGING_TARGET,
                        page_index,
                        "reached end of stream"
                    );
                } else {
                    session.pages.insert(
                        page_index,
                        LoadedPage {
                            page_index,
                            items: items.clone(),
                            prev_key: *prev_key,
                            next_key: *next_key,
                        },
                    );
                    debug!(
                        target: PAGING_TARGET,
                        page_index,
                        items = items.len(),
                        "applied page"
                    );
                }
                session.state = if session.forward_exhausted {
                    SessionState::EndOfStream
                } else {
                    SessionState::Idle
                };
            }
            LoadResult::Error { cause } => {
                warn!(
                    target: PAGING_TARGET,
                    ?request,
                    error = %cause,
                    "page load failed"
                );
                session.state = SessionState::Terminal(cause.clone());
            }
        }
    }
}

/// Past the end of the stream a forward load is answered with another
/// empty page instead of a network call.
fn answer_locally<T>(
    session: &Session<T>,
    request: &LoadRequest,
) -> Option<LoadResult<T>> {
    if session.forward_exhausted
        && request.direction() == LoadDirection::Append
    {
        debug!(target: PAGING_TARGET, ?request, "append past end of stream");
        return Some(LoadResult::end_of_stream(request.page_index()));
    }
    None
}

fn start<S: PagingSource>(
    inner: &Arc<Inner<S>>,
    session: &mut Session<S::Item>,
    request: LoadRequest,
) -> SharedLoad<S::Item> {
    session.generation += 1;
    let generation = session.generation;

    let retry = session.state.is_terminal();
    session.state = match request {
        LoadRequest::Refresh { .. } => SessionState::LoadingInitial { retry },
        LoadRequest::Append { key, .. } => {
            SessionState::LoadingForward { key, retry }
        }
        LoadRequest::Prepend { key, .. } => {
            SessionState::LoadingBackward { key, retry }
        }
    };
    debug!(target: PAGING_TARGET, ?request, generation, retry, "starting load");

    let cancel = inner.root.child_token();
    let page_index = request.page_index();
    let load_size = request.load_size();

    let task = {
        let inner = Arc::clone(inner);
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => LoadResult::Error {
                    cause: NetworkFailure::cancelled(),
                },
                outcome = inner
                    .source
                    .load_page(page_index, load_size, &cancel) =>
                {
                    LoadResult::from_network(page_index, outcome)
                }
            }
        })
    };

    let owner: Weak<Inner<S>> = Arc::downgrade(inner);
    let result = async move {
        let result = match task.await {
            Ok(result) => result,
            Err(join_error) => LoadResult::Error {
                cause: NetworkFailure::Transport(if join_error.is_cancelled() {
                    TransportError::Cancelled
                } else {
                    TransportError::Request(format!(
                        "page load task failed: {join_error}"
                    ))
                }),
            },
        };
        if let Some(inner) = owner.upgrade() {
            inner.apply(generation, &request, &result);
        }
        result
    }
    .boxed()
    .shared();

    session.in_flight = Some(InFlight {
        request,
        generation,
        cancel,
        result: result.clone(),
    });
    result
}

impl<S: PagingSource> Drop for Pager<S> {
    fn drop(&mut self) {
        self.inner.root.cancel();
        self.inner.lock_session().in_flight = None;
    }
}

impl<S: PagingSource> fmt::Debug for Pager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.inner.lock_session();
        f.debug_struct("Pager")
            .field("config", &self.inner.config)
            .field("state", &session.state)
            .field("pages", &session.pages.len())
            .field(
                "in_flight",
                &session.in_flight.as_ref().map(|flight| flight.request),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use async_trait::async_trait;
    use futures::StreamExt;
    use tokio::sync::{Notify, Semaphore};
    use vitrine_model::prelude::Page;

    use super::*;
    use crate::network::NetworkResult;

    /// Serves `total` sequential integers in pages of the requested size.
    /// When gated, each call waits for a permit before answering.
    struct Script {
        total: u32,
        calls: Mutex<Vec<u32>>,
        entered: Notify,
        gate: Option<Semaphore>,
        failures: Mutex<HashMap<u32, NetworkResult<Page<u32>>>>,
    }

    #[derive(Clone)]
    struct ScriptedSource(Arc<Script>);

    impl ScriptedSource {
        fn build(total: u32, gate: Option<Semaphore>) -> Self {
            Self(Arc::new(Script {
                total,
                calls: Mutex::new(Vec::new()),
                entered: Notify::new(),
                gate,
                failures: Mutex::new(HashMap::new()),
            }))
        }

        fn new(total: u32) -> Self {
            Self::build(total, None)
        }

        fn gated(total: u32) -> Self {
            Self::build(total, Some(Semaphore::new(0)))
        }

        fn fail_once(&self, page: u32, result: NetworkResult<Page<u32>>) {
            self.0.failures.lock().unwrap().insert(page, result);
        }

        fn release(&self, permits: usize) {
            if let Some(gate) = &self.0.gate {
                gate.add_permits(permits);
            }
        }

        /// Wait until the source has been called at least `count` times.
        async fn wait_for_calls(&self, count: usize) {
            let reached = async {
                loop {
                    let notified = self.0.entered.notified();
                    if self.calls().len() >= count {
                        return;
                    }
                    notified.await;
                }
            };
            tokio::time::timeout(Duration::from_secs(5), reached)
                .await
                .expect("source was not called often enough");
        }

        fn calls(&self) -> Vec<u32> {
            self.0.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PagingSource for ScriptedSource {
        type Item = u32;

        async fn load_page(
            &self,
            page: u32,
            size: u32,
            cancel: &CancellationToken,
        ) -> NetworkResult<Page<u32>> {
            self.0.calls.lock().unwrap().push(page);
            self.0.entered.notify_one();

            if let Some(gate) = &self.0.gate {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        return NetworkResult::TransportFailure(
                            TransportError::Cancelled,
                        );
                    }
                    permit = gate.acquire() => {
                        permit.expect("gate open").forget();
                    }
                }
            }

            let failure = self.0.failures.lock().unwrap().remove(&page);
            if let Some(failure) = failure {
                return failure;
            }

            let start = (page - 1) * size;
            let end = (start + size).min(self.0.total);
            let items: Vec<u32> = (start..end).collect();
            let total = u64::from(self.0.total);
            NetworkResult::Success(Page::new(items, page, size, total))
        }
    }

    fn pager(source: &ScriptedSource, page_size: u32) -> Pager<ScriptedSource> {
        Pager::new(source.clone(), PagerConfig::with_page_size(page_size))
    }

    #[tokio::test]
    async fn first_page_then_empty_page_ends_the_stream() {
        let source = ScriptedSource::new(20);
        let pager = pager(&source, 20);

        let first = pager.load(LoadRequest::initial(20)).await;
        assert_eq!(first.items().map(<[u32]>::len), Some(20));
        assert_eq!(first.prev_key(), None);
        assert_eq!(first.next_key(), Some(2));
        assert_eq!(pager.state(), SessionState::Idle);

        let second = pager
            .load(LoadRequest::Append {
                key: 2,
                load_size: 20,
            })
            .await;
        assert_eq!(
            second,
            LoadResult::Page {
                items: Vec::new(),
                prev_key: Some(1),
                next_key: None,
            }
        );
        assert_eq!(pager.state(), SessionState::EndOfStream);
        assert_eq!(pager.items().len(), 20);
    }

    #[tokio::test]
    async fn empty_first_page_ends_the_stream() {
        let source = ScriptedSource::new(0);
        let pager = pager(&source, 20);

        let result = pager.load(LoadRequest::initial(20)).await;
        assert_eq!(result.next_key(), None);
        assert_eq!(pager.state(), SessionState::EndOfStream);
    }

    #[tokio::test]
    async fn identical_requests_in_flight_share_one_call() {
        let source = ScriptedSource::gated(60);
        let pager = Arc::new(pager(&source, 20));
        let request = LoadRequest::initial(20);

        let first = tokio::spawn({
            let pager = Arc::clone(&pager);
            async move { pager.load(request).await }
        });
        source.wait_for_calls(1).await;

        let second = tokio::spawn({
            let pager = Arc::clone(&pager);
            async move { pager.load(request).await }
        });
        tokio::task::yield_now().await;
        source.release(1);

        let (first, second) = (first.await.unwrap(), second.await.unwrap());
        assert_eq!(first, second);
        assert_eq!(source.calls(), vec![1]);
        assert_eq!(pager.snapshot().pages.len(), 1);
    }

    #[tokio::test]
    async fn different_requests_run_one_at_a_time_in_issue_order() {
        let source = ScriptedSource::gated(100);
        let pager = Arc::new(pager(&source, 10));

        source.release(1);
        pager.load(LoadRequest::initial(10)).await;

        let second = tokio::spawn({
            let pager = Arc::clone(&pager);
            async move {
                pager
                    .load(LoadRequest::Append { key: 2, load_size: 10 })
                    .await
            }
        });
        source.wait_for_calls(2).await;

        let third = tokio::spawn({
            let pager = Arc::clone(&pager);
            async move {
                pager
                    .load(LoadRequest::Append { key: 3, load_size: 10 })
                    .await
            }
        });
        tokio::task::yield_now().await;
        assert_eq!(source.calls(), vec![1, 2], "third load must wait");

        source.release(2);
        second.await.unwrap();
        third.await.unwrap();

        assert_eq!(source.calls(), vec![1, 2, 3]);
        assert_eq!(pager.items(), (0..30).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn failure_is_terminal_and_resubmitting_retries() {
        let source = ScriptedSource::new(40);
        source.fail_once(1, NetworkResult::rejected(Some(503), "maintenance"));
        let pager = pager(&source, 20);

        let failed = pager.load(LoadRequest::initial(20)).await;
        assert_eq!(failed.error().and_then(NetworkFailure::code), Some(503));
        assert!(pager.state().is_terminal());

        let retried = pager.load(LoadRequest::initial(20)).await;
        assert_eq!(retried.next_key(), Some(2));
        assert_eq!(pager.state(), SessionState::Idle);
        assert_eq!(source.calls(), vec![1, 1]);
    }

    #[tokio::test]
    async fn retry_is_reported_while_loading() {
        let source = ScriptedSource::gated(40);
        source.fail_once(
            2,
            NetworkResult::TransportFailure(TransportError::Timeout(
                "slow".into(),
            )),
        );
        let pager = Arc::new(pager(&source, 20));

        source.release(2);
        pager.load(LoadRequest::initial(20)).await;
        let failed = pager
            .load(LoadRequest::Append {
                key: 2,
                load_size: 20,
            })
            .await;
        assert!(failed.is_error());

        let retry = tokio::spawn({
            let pager = Arc::clone(&pager);
            async move {
                pager
                    .load(LoadRequest::Append { key: 2, load_size: 20 })
                    .await
            }
        });
        source.wait_for_calls(3).await;
        assert_eq!(
            pager.state(),
            SessionState::LoadingForward { key: 2, retry: true }
        );

        source.release(1);
        assert_eq!(retry.await.unwrap().items().map(<[u32]>::len), Some(20));
    }

    #[tokio::test]
    async fn append_past_end_of_stream_makes_no_call() {
        let source = ScriptedSource::new(5);
        let pager = pager(&source, 5);

        pager.load(LoadRequest::initial(5)).await;
        pager.load(LoadRequest::Append { key: 2, load_size: 5 }).await;
        assert_eq!(pager.state(), SessionState::EndOfStream);

        let again = pager
            .load(LoadRequest::Append {
                key: 2,
                load_size: 5,
            })
            .await;
        assert_eq!(again.next_key(), None);
        assert_eq!(source.calls(), vec![1, 2]);
    }

    #[tokio::test]
    async fn prepend_is_still_legal_at_end_of_stream() {
        let source = ScriptedSource::new(30);
        let pager = pager(&source, 10);

        pager
            .load(LoadRequest::Refresh { key: Some(3), load_size: 10 })
            .await;
        pager.load(LoadRequest::Append { key: 4, load_size: 10 }).await;
        assert_eq!(pager.state(), SessionState::EndOfStream);

        let request = pager.previous_request().unwrap();
        assert_eq!(request, LoadRequest::Prepend { key: 2, load_size: 10 });
        let earlier = pager.load(request).await;

        assert_eq!(earlier.items(), Some(&(10..20).collect::<Vec<_>>()[..]));
        assert_eq!(pager.items(), (10..30).collect::<Vec<_>>());
        assert_eq!(pager.state(), SessionState::EndOfStream);
    }

    #[tokio::test]
    async fn cancel_reports_transport_failure_and_keeps_pages() {
        let source = ScriptedSource::gated(60);
        let pager = Arc::new(pager(&source, 20));

        source.release(1);
        pager.load(LoadRequest::initial(20)).await;

        let pending = tokio::spawn({
            let pager = Arc::clone(&pager);
            async move {
                pager
                    .load(LoadRequest::Append { key: 2, load_size: 20 })
                    .await
            }
        });
        source.wait_for_calls(2).await;
        pager.cancel();

        let result = pending.await.unwrap();
        assert!(result.error().is_some_and(NetworkFailure::is_cancelled));
        assert_eq!(
            pager.state(),
            SessionState::Terminal(NetworkFailure::cancelled())
        );
        assert_eq!(pager.items(), (0..20).collect::<Vec<_>>());

        source.release(1);
        let resumed = pager
            .load(LoadRequest::Append { key: 2, load_size: 20 })
            .await;
        assert_eq!(resumed.next_key(), Some(3));
        assert_eq!(pager.items().len(), 40);
    }

    #[tokio::test]
    async fn dropping_the_pager_cancels_the_in_flight_call() {
        let source = ScriptedSource::gated(20);
        let pager = pager(&source, 20);
        let cancel = pager.inner.root.clone();

        let load = tokio::spawn(async move {
            let _ = tokio::time::timeout(
                Duration::from_millis(50),
                pager.load(LoadRequest::initial(20)),
            )
            .await;
            drop(pager);
        });
        load.await.unwrap();

        assert!(cancel.is_cancelled());
    }

    #[tokio::test]
    async fn refresh_reloads_the_anchored_page() {
        let source = ScriptedSource::new(100);
        let pager = pager(&source, 10);

        pager.load(LoadRequest::initial(10)).await;
        pager.load_next().await;
        pager.load_next().await;
        assert_eq!(pager.snapshot().item_count(), 30);

        let refreshed = pager.refresh(Some(RefreshAnchor::new(25))).await;

        assert_eq!(refreshed.prev_key(), Some(2));
        assert_eq!(pager.snapshot().pages.len(), 1);
        assert_eq!(pager.items(), (20..30).collect::<Vec<_>>());
        assert_eq!(source.calls(), vec![1, 2, 3, 3]);
    }

    #[tokio::test]
    async fn cancelled_refresh_keeps_the_loaded_pages() {
        let source = ScriptedSource::gated(100);
        let pager = Arc::new(pager(&source, 20));

        source.release(2);
        pager.load(LoadRequest::initial(20)).await;
        pager.load_next().await;
        assert_eq!(pager.items().len(), 40);

        let pending = tokio::spawn({
            let pager = Arc::clone(&pager);
            async move { pager.refresh(Some(RefreshAnchor::new(25))).await }
        });
        source.wait_for_calls(3).await;
        assert_eq!(pager.items().len(), 40);
        pager.cancel();

        let result = pending.await.unwrap();
        assert!(result.error().is_some_and(NetworkFailure::is_cancelled));
        assert_eq!(pager.items(), (0..40).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_the_loaded_pages() {
        let source = ScriptedSource::new(100);
        let pager = pager(&source, 20);

        pager.load(LoadRequest::initial(20)).await;
        pager.load_next().await;
        source.fail_once(1, NetworkResult::rejected(Some(503), "down"));

        let refreshed = pager.refresh(None).await;

        assert!(refreshed.is_error());
        assert!(pager.state().is_terminal());
        assert_eq!(pager.items(), (0..40).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn refresh_without_anchor_restarts() {
        let source = ScriptedSource::new(30);
        let pager = pager(&source, 10);

        pager.load(LoadRequest::initial(10)).await;
        pager.load_next().await;

        let refreshed = pager.refresh(None).await;
        assert_eq!(refreshed.prev_key(), None);
        assert_eq!(pager.items(), (0..10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn stream_yields_every_item_then_ends() {
        let source = ScriptedSource::new(25);
        let pager = pager(&source, 10);

        let items: Vec<u32> = pager
            .stream()
            .map(|item| item.expect("no failures scripted"))
            .collect()
            .await;

        assert_eq!(items, (0..25).collect::<Vec<_>>());
        assert_eq!(source.calls(), vec![1, 2, 3, 4]);
        assert_eq!(pager.state(), SessionState::EndOfStream);
    }

    #[tokio::test]
    async fn stream_stops_at_first_failure() {
        let source = ScriptedSource::new(40);
        source.fail_once(
            2,
            NetworkResult::TransportFailure(TransportError::Connect(
                "refused".into(),
            )),
        );
        let pager = pager(&source, 10);

        let results: Vec<_> = pager.stream().collect().await;

        assert_eq!(results.len(), 11);
        assert!(results[..10].iter().all(Result::is_ok));
        assert!(matches!(
            results[10],
            Err(NetworkFailure::Transport(TransportError::Connect(_)))
        ));
    }
}
