use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::{
    error::SearchError,
    parse::parse,
    query::QueryBuilder,
    traits::{ConnectivityProbe, Fetcher, OutcomeSink},
    types::{Delivery, LoadOutcome, SearchRequest},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoaderState {
    #[default]
    Idle,
    Loading { generation: u64 },
    Delivered { generation: u64 },
    Cancelled { generation: u64 },
}

/// What a single [`SearchLoader::pump`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pump {
    Delivered,
    Discarded,
    /// Nothing was in flight.
    Idle,
}

struct Completion {
    request: SearchRequest,
    outcome: LoadOutcome,
}

/// Runs searches in the background and hands the current one's outcome to `S`.
///
/// Every search gets the next generation. A worker's outcome is delivered only
/// if its generation is still the loader's generation when the outcome is
/// processed, so a newer search, [`cancel`](Self::cancel) or
/// [`reset`](Self::reset) silently invalidates everything issued before it.
/// Workers are never aborted; they report back over a channel and the loader
/// applies their results from its own context in `pump`/`drain`/`settle`.
///
/// `start_search` spawns onto the current tokio runtime.
pub struct SearchLoader<S> {
    builder:        QueryBuilder,
    probe:          Arc<dyn ConnectivityProbe>,
    fetcher:        Arc<dyn Fetcher>,
    sink:           S,
    generation:     u64,
    state:          LoaderState,
    in_flight:      usize,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<S: OutcomeSink> SearchLoader<S> {
    pub fn new(
        builder: QueryBuilder,
        probe: Arc<dyn ConnectivityProbe>,
        fetcher: Arc<dyn Fetcher>,
        sink: S,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            builder,
            probe,
            fetcher,
            sink,
            generation: 0,
            state: LoaderState::Idle,
            in_flight: 0,
            completions_tx,
            completions_rx,
        }
    }

    pub fn start_search(&mut self, query: &str) -> SearchRequest {
        self.generation += 1;
        let request = SearchRequest {
            query:      query.to_string(),
            generation: self.generation,
        };

        if !self.probe.is_connected() {
            info!("Offline, not searching for {:?}", request.query);
            self.state = LoaderState::Delivered {
                generation: request.generation,
            };
            self.sink.deliver(Delivery {
                request: request.clone(),
                outcome: LoadOutcome::Failure(SearchError::NoConnectivity),
            });
            return request;
        }

        info!(
            "Searching for {:?} (generation {})",
            request.query, request.generation
        );
        self.state = LoaderState::Loading {
            generation: request.generation,
        };
        self.in_flight += 1;

        let builder = self.builder.clone();
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.completions_tx.clone();
        let worker_request = request.clone();
        tokio::spawn(async move {
            let url = builder.build(&worker_request.query);
            let result = match fetcher.fetch(url.as_str()).await {
                Ok(body) => parse(&body),
                Err(e) => Err(e),
            };
            // Fails only once the loader itself is gone.
            let _ = tx.send(Completion {
                request: worker_request,
                outcome: result.into(),
            });
        });

        request
    }

    /// Logically cancels the running search; its outcome will be dropped.
    pub fn cancel(&mut self) {
        if let LoaderState::Loading { generation } = self.state {
            info!("Cancelling search generation {generation}");
            self.generation += 1;
            self.state = LoaderState::Cancelled { generation };
        }
    }

    /// Returns to `Idle`; nothing issued before this call will be delivered.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = LoaderState::Idle;
    }

    /// Waits for the next worker to finish and applies its outcome.
    pub async fn pump(&mut self) -> Pump {
        if self.in_flight == 0 {
            return Pump::Idle;
        }
        match self.completions_rx.recv().await {
            Some(completion) => self.complete(completion),
            // Unreachable while `self` holds a sender.
            None => Pump::Idle,
        }
    }

    /// Applies every outcome that is already waiting, without blocking.
    /// Returns how many were delivered.
    pub fn drain(&mut self) -> usize {
        let mut delivered = 0;
        while let Ok(completion) = self.completions_rx.try_recv() {
            if self.complete(completion) == Pump::Delivered {
                delivered += 1;
            }
        }
        delivered
    }

    /// Pumps until the current search is no longer loading.
    pub async fn settle(&mut self) {
        while matches!(self.state, LoaderState::Loading { .. }) {
            if self.pump().await == Pump::Idle {
                break;
            }
        }
    }

    fn complete(&mut self, completion: Completion) -> Pump {
        self.in_flight = self.in_flight.saturating_sub(1);
        let generation = completion.request.generation;
        let current = self.state == LoaderState::Loading { generation }
            && generation == self.generation;
        if !current {
            debug!(
                "Discarding outcome of generation {generation}, current is {}",
                self.generation
            );
            return Pump::Discarded;
        }
        match &completion.outcome {
            LoadOutcome::Success(records) => {
                info!("Generation {generation} found {} books", records.len())
            }
            LoadOutcome::Failure(e) => info!("Generation {generation} failed: {e}"),
        }
        self.state = LoaderState::Delivered { generation };
        self.sink.deliver(Delivery {
            request: completion.request,
            outcome: completion.outcome,
        });
        Pump::Delivered
    }

    pub fn state(&self) -> LoaderState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
