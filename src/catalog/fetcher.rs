//! Background fetch worker.
//!
//! Catalog I/O happens on one dedicated thread so the event loop never
//! blocks: requests go in over a channel, resolved outcomes come back over
//! another, and the event loop polls them without waiting. Requests are
//! served strictly in order, so a superseded fetch always resolves before
//! the fetch that superseded it and the generation check in `state::fetch`
//! sees them in issue order.

use crate::catalog::MediaCatalog;
use crate::state::{FetchOutcome, FetchRequest};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;
use tracing::{debug, warn};

/// Event-loop side of the fetch worker.
///
/// Dropping the handle closes the request channel; the worker finishes the
/// request it is on, if any, and exits.
#[derive(Debug)]
pub struct FetchHandle {
    requests: Sender<FetchRequest>,
    outcomes: Receiver<FetchOutcome>,
}

impl FetchHandle {
    /// Spawn the worker thread owning `catalog`.
    pub fn spawn<C>(catalog: C) -> std::io::Result<Self>
    where
        C: MediaCatalog + Send + 'static,
    {
        let (request_tx, request_rx) = channel::<FetchRequest>();
        let (outcome_tx, outcome_rx) = channel::<FetchOutcome>();

        thread::Builder::new()
            .name("reel-fetch".to_string())
            .spawn(move || {
                for request in request_rx {
                    debug!(
                        page = request.page,
                        generation = request.generation,
                        query = %request.query.text,
                        "fetching page"
                    );
                    let result = catalog.search(&request.query, request.page);
                    let outcome = FetchOutcome {
                        generation: request.generation,
                        page: request.page,
                        result,
                    };
                    if outcome_tx.send(outcome).is_err() {
                        // Event loop is gone; nothing left to deliver to.
                        break;
                    }
                }
            })?;

        Ok(Self {
            requests: request_tx,
            outcomes: outcome_rx,
        })
    }

    /// Queue a fetch for the worker.
    pub fn request(&self, request: FetchRequest) {
        if self.requests.send(request).is_err() {
            warn!("fetch worker is gone; dropping request");
        }
    }

    /// Take one resolved outcome, if any is ready. Non-blocking.
    pub fn try_outcome(&self) -> Option<FetchOutcome> {
        match self.outcomes.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}
