//! Worker-thread execution of rearrangement jobs.
//!
//! [`Rearranger`] owns at most one background thread, spawned lazily on the
//! first request and shut down by [`Rearranger::terminate`] (or by dropping
//! the handle). The thread runs whole jobs synchronously and reports back
//! over a channel; the handle never shares mutable state with it beyond the
//! single-slot busy gate.

use crate::error::{Error, Result};
use crate::messages::{RearrangeJob, WorkerRequest, WorkerResponse};
use nautilus::{RearrangeOptions, Rearrangement, rearrange_with};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

/// Runs one job on the calling thread. This is the small-graph path, and the
/// fallback when a worker cannot be spawned or has failed.
pub fn rearrange_blocking(
    job: RearrangeJob,
    opts: &RearrangeOptions,
    progress: Option<&mut dyn FnMut(f64)>,
) -> nautilus::Result<Rearrangement> {
    let (map, root_id) = job.into_parts();
    rearrange_with(&map, &root_id, opts, progress)
}

/// Handle to a lazily spawned layout worker.
///
/// At most one rearrangement is in flight per handle; [`Rearranger::request`]
/// rejects further jobs with [`Error::Busy`] until a terminal event has been
/// produced. Dropping the handle (or calling [`Rearranger::terminate`])
/// closes the channels; the worker exits after at most its current job, and
/// anything it was still sending is discarded with the receiver.
pub struct Rearranger {
    worker: Option<Worker>,
    opts: RearrangeOptions,
}

impl Rearranger {
    pub fn new() -> Self {
        Self::with_options(RearrangeOptions::default())
    }

    pub fn with_options(opts: RearrangeOptions) -> Self {
        Self { worker: None, opts }
    }

    /// Whether a computation is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|w| w.busy.load(Ordering::SeqCst))
    }

    /// Submits a job to the worker, spawning the thread on first use.
    ///
    /// Returns [`Error::Busy`] while a previous job is unresolved,
    /// [`Error::Spawn`] if the thread could not be created, and
    /// [`Error::Disconnected`] if the worker has gone away (the handle resets
    /// so the next request respawns it).
    pub fn request(&mut self, job: RearrangeJob) -> Result<()> {
        if self.worker.is_none() {
            self.worker = Some(Worker::spawn(self.opts.clone())?);
        }

        let sent = match &self.worker {
            Some(worker) => {
                if worker.busy.swap(true, Ordering::SeqCst) {
                    return Err(Error::Busy);
                }
                worker
                    .requests
                    .send(WorkerRequest::Rearrange { data: job })
                    .is_ok()
            }
            None => false,
        };

        if !sent {
            self.terminate();
            return Err(Error::Disconnected);
        }
        Ok(())
    }

    /// Blocks until the worker produces the next event. Returns `Ok(None)`
    /// when no worker is running, and [`Error::Disconnected`] if the worker
    /// died mid-computation without a terminal message.
    pub fn next_event(&mut self) -> Result<Option<WorkerResponse>> {
        let Some(worker) = self.worker.as_ref() else {
            return Ok(None);
        };
        match worker.events.recv() {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::RecvError) => self.on_disconnect(),
        }
    }

    /// Non-blocking variant of [`Rearranger::next_event`]; `Ok(None)` also
    /// means "nothing yet".
    pub fn try_next_event(&mut self) -> Result<Option<WorkerResponse>> {
        let Some(worker) = self.worker.as_ref() else {
            return Ok(None);
        };
        match worker.events.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => self.on_disconnect(),
        }
    }

    /// Shuts the worker down and releases the handle's resources. The
    /// request channel closes, so the thread exits after at most its current
    /// job; events still in flight are dropped with the receiver. Safe to
    /// call when nothing is running; the next request spawns a fresh worker.
    pub fn terminate(&mut self) {
        if self.worker.take().is_some() {
            tracing::debug!("layout worker terminated");
        }
    }

    fn on_disconnect(&mut self) -> Result<Option<WorkerResponse>> {
        let was_busy = self.is_busy();
        self.worker = None;
        if was_busy {
            Err(Error::Disconnected)
        } else {
            Ok(None)
        }
    }
}

impl Default for Rearranger {
    fn default() -> Self {
        Self::new()
    }
}

struct Worker {
    requests: Sender<WorkerRequest>,
    events: Receiver<WorkerResponse>,
    busy: Arc<AtomicBool>,
}

impl Worker {
    fn spawn(opts: RearrangeOptions) -> Result<Self> {
        let (requests, request_rx) = mpsc::channel::<WorkerRequest>();
        let (event_tx, events) = mpsc::channel::<WorkerResponse>();
        let busy = Arc::new(AtomicBool::new(false));

        let worker_busy = busy.clone();
        thread::Builder::new()
            .name("nautilus-layout".into())
            .spawn(move || worker_main(request_rx, event_tx, worker_busy, opts))?;
        tracing::debug!("layout worker started");

        Ok(Self {
            requests,
            events,
            busy,
        })
    }
}

fn worker_main(
    requests: Receiver<WorkerRequest>,
    events: Sender<WorkerResponse>,
    busy: Arc<AtomicBool>,
    opts: RearrangeOptions,
) {
    while let Ok(WorkerRequest::Rearrange { data }) = requests.recv() {
        tracing::debug!(entries = data.entries.len(), "rearrangement started");
        let terminal = run_job(data, &opts, &events);
        // The gate opens before the terminal message goes out, so a caller
        // reacting to `Complete` can immediately request again.
        busy.store(false, Ordering::SeqCst);
        if events.send(terminal).is_err() {
            break;
        }
    }
    tracing::debug!("layout worker stopped");
}

/// Runs one job to its terminal message. Layout errors and panics both
/// become [`WorkerResponse::Error`]; the worker thread survives either.
fn run_job(
    job: RearrangeJob,
    opts: &RearrangeOptions,
    events: &Sender<WorkerResponse>,
) -> WorkerResponse {
    let progress_events = events.clone();
    let outcome = panic::catch_unwind(AssertUnwindSafe(move || {
        let mut forward = |fraction: f64| {
            let _ = progress_events.send(WorkerResponse::Progress { progress: fraction });
        };
        rearrange_blocking(job, opts, Some(&mut forward))
    }));

    match outcome {
        Ok(Ok(result)) => WorkerResponse::Complete { result },
        Ok(Err(err)) => WorkerResponse::Error {
            error: err.to_string(),
        },
        Err(payload) => WorkerResponse::Error {
            error: panic_message(payload.as_ref()),
        },
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "layout computation panicked".to_string()
    }
}
