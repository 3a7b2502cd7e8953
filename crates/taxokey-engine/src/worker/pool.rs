//! Fixed-size worker pool over bounded crossbeam channels.
//!
//! Each worker owns a dedicated thread fed by its own request channel and
//! answering on a paired response channel. A slot's mutex is held from send
//! to receive, so a worker has at most one job in flight and the next message
//! on its response channel always belongs to the current caller.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};
use taxokey_core::config::WorkerConfig;
use taxokey_core::errors::{KeygenErrorCode, WorkerError};
use taxokey_core::traits::{CatalogLookup, TaxonSource};
use tracing::{debug, error, info_span};

use super::protocol::{KeyResultPayload, WorkerRequest, WorkerResponse};
use crate::generator::KeyGenerator;

type Reply = Result<WorkerResponse, WorkerError>;

struct WorkerSlot {
    requests: Option<Sender<WorkerRequest>>,
    responses: Receiver<Reply>,
}

pub struct WorkerPool {
    slots: Vec<Mutex<WorkerSlot>>,
    handles: Vec<JoinHandle<()>>,
    next: AtomicUsize,
}

impl WorkerPool {
    /// Spawn `size` workers (at least one) sharing `generator`.
    pub fn new<S>(size: usize, generator: Arc<KeyGenerator<S>>) -> Result<Self, WorkerError>
    where
        S: TaxonSource + CatalogLookup + 'static,
    {
        Self::spawn(size.max(1), 1, generator)
    }

    /// Size and channel capacity from `[workers]` config.
    pub fn from_config<S>(
        config: &WorkerConfig,
        generator: Arc<KeyGenerator<S>>,
    ) -> Result<Self, WorkerError>
    where
        S: TaxonSource + CatalogLookup + 'static,
    {
        Self::spawn(
            config.effective_pool_size().max(1),
            config.effective_channel_capacity().max(1),
            generator,
        )
    }

    fn spawn<S>(
        size: usize,
        capacity: usize,
        generator: Arc<KeyGenerator<S>>,
    ) -> Result<Self, WorkerError>
    where
        S: TaxonSource + CatalogLookup + 'static,
    {
        let mut slots = Vec::with_capacity(size);
        let mut handles = Vec::with_capacity(size);

        for worker in 0..size {
            let (request_tx, request_rx) = bounded::<WorkerRequest>(capacity);
            let (reply_tx, reply_rx) = bounded::<Reply>(capacity);
            let generator = Arc::clone(&generator);

            let handle = thread::Builder::new()
                .name(format!("taxokey-worker-{worker}"))
                .spawn(move || worker_loop(worker, &generator, request_rx, reply_tx))
                .map_err(|e| WorkerError::SpawnFailed {
                    worker,
                    message: e.to_string(),
                })?;

            slots.push(Mutex::new(WorkerSlot {
                requests: Some(request_tx),
                responses: reply_rx,
            }));
            handles.push(handle);
        }

        Ok(Self {
            slots,
            handles,
            next: AtomicUsize::new(0),
        })
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Send `request` to the next worker in round-robin order and wait for its reply.
    ///
    /// Generation failures come back as [`WorkerResponse::Error`]; only
    /// transport failures and panics are `Err`.
    pub fn dispatch(&self, request: WorkerRequest) -> Result<WorkerResponse, WorkerError> {
        let worker = self.next.fetch_add(1, Ordering::Relaxed) % self.slots.len();
        let slot = self.slots[worker]
            .lock()
            .map_err(|_| WorkerError::PoolShutdown)?;
        let requests = slot.requests.as_ref().ok_or(WorkerError::PoolShutdown)?;

        requests
            .send(request)
            .map_err(|_| WorkerError::PoolShutdown)?;
        slot.responses
            .recv()
            .map_err(|_| WorkerError::PoolShutdown)?
    }

    /// [`dispatch`](Self::dispatch) over the raw JSON protocol.
    ///
    /// A worker panic is reported as a `generateKey:error` message. A message
    /// that cannot be parsed is a [`WorkerError::Protocol`].
    pub fn dispatch_json(&self, message: &str) -> Result<String, WorkerError> {
        let request: WorkerRequest =
            serde_json::from_str(message).map_err(|e| WorkerError::Protocol {
                message: e.to_string(),
            })?;

        let response = match self.dispatch(request) {
            Ok(response) => response,
            Err(e @ WorkerError::WorkerPanicked { .. }) => WorkerResponse::Error {
                error: e.wire_string(),
            },
            Err(e) => return Err(e),
        };

        serde_json::to_string(&response).map_err(|e| WorkerError::Protocol {
            message: e.to_string(),
        })
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        for slot in &self.slots {
            if let Ok(mut slot) = slot.lock() {
                slot.requests.take();
            }
        }
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                error!("worker thread exited abnormally");
            }
        }
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("size", &self.slots.len())
            .finish_non_exhaustive()
    }
}

fn worker_loop<S>(
    worker: usize,
    generator: &KeyGenerator<S>,
    requests: Receiver<WorkerRequest>,
    replies: Sender<Reply>,
) where
    S: TaxonSource + CatalogLookup,
{
    for request in requests {
        let span = info_span!("worker_job", worker);
        let _guard = span.enter();

        let reply = match panic::catch_unwind(AssertUnwindSafe(|| handle(generator, request))) {
            Ok(response) => Ok(response),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(worker, %message, "worker job panicked");
                Err(WorkerError::WorkerPanicked { worker, message })
            }
        };

        if replies.send(reply).is_err() {
            break;
        }
    }
    debug!(worker, "worker stopped");
}

fn handle<S>(generator: &KeyGenerator<S>, request: WorkerRequest) -> WorkerResponse
where
    S: TaxonSource + CatalogLookup,
{
    match request {
        WorkerRequest::GenerateKey { payload } => {
            match generator.generate_key(payload.taxon_id, &payload.options) {
                Ok(key) => WorkerResponse::Result {
                    payload: KeyResultPayload {
                        root_node: key.root_node,
                    },
                },
                Err(e) => {
                    error!(code = e.error_code(), error = %e, "generateKey failed");
                    WorkerResponse::Error {
                        error: e.wire_string(),
                    }
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
