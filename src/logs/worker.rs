use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Marks a fetch as abandoned. The request still runs to completion; its
/// result is dropped instead of being applied.
pub use tokio_util::sync::CancellationToken;

use crate::api::{self, ApiClient, EmailListData, EmailListRequest};

/// Anything that can produce a page of send logs
pub trait EmailLogSource: Send + Sync {
    fn fetch_page(&self, request: &EmailListRequest) -> api::Result<EmailListData>;
}

impl EmailLogSource for ApiClient {
    fn fetch_page(&self, request: &EmailListRequest) -> api::Result<EmailListData> {
        self.get_emails(request).map(|response| response.data)
    }
}

/// Outcome of one background fetch
#[derive(Debug)]
pub struct FetchResult {
    pub generation: u64,
    pub request: EmailListRequest,
    pub token: CancellationToken,
    pub outcome: api::Result<EmailListData>,
}

/// Runs each fetch on its own thread and hands results back over a channel.
///
/// Starting a fetch cancels the previous one, so only the most recent
/// request can ever be applied.
pub struct FetchWorker {
    source: Arc<dyn EmailLogSource>,
    tx: Sender<FetchResult>,
    rx: Receiver<FetchResult>,
    current: Option<CancellationToken>,
    generation: u64,
}

impl FetchWorker {
    pub fn new(source: Arc<dyn EmailLogSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            tx,
            rx,
            current: None,
            generation: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a non-cancelled fetch is outstanding
    pub fn in_flight(&self) -> bool {
        self.current.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    pub fn spawn(&mut self, request: EmailListRequest) -> CancellationToken {
        self.cancel();

        let token = CancellationToken::new();
        self.current = Some(token.clone());
        self.generation += 1;

        let generation = self.generation;
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let thread_token = token.clone();

        tracing::debug!("fetch #{} started: {:?}", generation, request);
        thread::spawn(move || {
            let outcome = source.fetch_page(&request);
            // Receiver may already be gone if the view was torn down
            let _ = tx.send(FetchResult {
                generation,
                request,
                token: thread_token,
                outcome,
            });
        });

        token
    }

    /// Cancel the outstanding fetch, if any
    pub fn cancel(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }
    }

    /// Next live result without blocking. Cancelled results are discarded.
    pub fn try_next(&mut self) -> Option<FetchResult> {
        while let Ok(result) = self.rx.try_recv() {
            if let Some(live) = self.accept(result) {
                return Some(live);
            }
        }
        None
    }

    /// Like `try_next` but waits up to `timeout`
    pub fn next_timeout(&mut self, timeout: Duration) -> Option<FetchResult> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(result) => {
                    if let Some(live) = self.accept(result) {
                        return Some(live);
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None;
                }
            }
        }
    }

    fn accept(&mut self, result: FetchResult) -> Option<FetchResult> {
        if result.token.is_cancelled() {
            tracing::debug!("fetch #{} discarded (cancelled)", result.generation);
            return None;
        }
        self.current = None;
        Some(result)
    }
}

impl Drop for FetchWorker {
    fn drop(&mut self) {
        self.cancel();
    }
}
