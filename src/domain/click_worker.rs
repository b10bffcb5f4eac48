//! Bounded click queue and the background worker that drains it.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc, mpsc::error::TrySendError};
use tracing::{debug, info, warn};

use crate::application::services::ClickRecorder;
use crate::domain::raw_visit::RawVisit;
use crate::domain::repositories::ClickRepository;

/// Sending half of the click queue.
///
/// [`ClickSender::dispatch`] never waits: a full or closed queue drops the visit.
#[derive(Debug, Clone)]
pub struct ClickSender {
    tx: mpsc::Sender<RawVisit>,
}

impl ClickSender {
    pub fn new(tx: mpsc::Sender<RawVisit>) -> Self {
        Self { tx }
    }

    /// Enqueues a visit for recording. Returns false if the visit was dropped.
    pub fn dispatch(&self, visit: RawVisit) -> bool {
        match self.tx.try_send(visit) {
            Ok(()) => true,
            Err(TrySendError::Full(visit)) => {
                warn!(link_id = visit.link_id, "Click queue is full, dropping visit");
                metrics::counter!("click_events_dropped_total", "reason" => "full").increment(1);
                false
            }
            Err(TrySendError::Closed(visit)) => {
                warn!(link_id = visit.link_id, "Click queue is closed, dropping visit");
                metrics::counter!("click_events_dropped_total", "reason" => "closed").increment(1);
                false
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Remaining free slots in the queue.
    pub fn capacity(&self) -> usize {
        self.tx.capacity()
    }
}

/// Creates the click queue with the given capacity.
pub fn click_channel(capacity: usize) -> (ClickSender, mpsc::Receiver<RawVisit>) {
    let (tx, rx) = mpsc::channel(capacity);
    (ClickSender::new(tx), rx)
}

/// Drains the click queue until every sender is dropped.
///
/// At most `concurrency` visits are enriched and persisted at the same time.
/// Failures are handled inside [`ClickRecorder::record_click`] and never stop
/// the worker. On shutdown the worker waits for in-flight recordings.
pub async fn run_click_worker<C>(
    mut rx: mpsc::Receiver<RawVisit>,
    recorder: Arc<ClickRecorder<C>>,
    concurrency: usize,
) where
    C: ClickRepository + ?Sized + 'static,
{
    let concurrency = concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(concurrency));

    while let Some(visit) = rx.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };

        let recorder = recorder.clone();
        tokio::spawn(async move {
            recorder.record_click(visit).await;
            drop(permit);
        });
    }

    debug!("Click queue closed, waiting for in-flight recordings");
    let _ = semaphore.acquire_many(concurrency as u32).await;
    info!("Click worker stopped");
}
