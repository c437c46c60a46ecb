use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::model::{Query, RequestState, UnitSystem, WeatherSnapshot};
use crate::provider::WeatherProvider;

/// Owns the current query and the single request-state cell.
///
/// Every trigger (city submit, unit switch) issues exactly one provider call
/// with no retries or caching. Results are fenced by a monotonically
/// increasing sequence number so a late response for a superseded query can
/// never overwrite newer state.
#[derive(Debug)]
pub struct FetchController {
    provider: Arc<dyn WeatherProvider>,
    query: Query,
    state: RequestState,
    seq: u64,
}

/// One in-flight fetch, detached from the controller so the await point can
/// live in whatever event loop hosts the dashboard.
#[derive(Debug)]
pub struct FetchJob {
    provider: Arc<dyn WeatherProvider>,
    query: Query,
    seq: u64,
}

impl FetchJob {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Perform the provider call. Feed the result back through
    /// [`FetchController::apply`].
    pub async fn run(self) -> (u64, Result<WeatherSnapshot, FetchError>) {
        let result = self.provider.fetch_timeline(&self.query).await;
        (self.seq, result)
    }
}

impl FetchController {
    pub fn new(provider: Arc<dyn WeatherProvider>, query: Query) -> Self {
        Self { provider, query, state: RequestState::Idle, seq: 0 }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Start a fetch for the current query: bumps the sequence and enters
    /// `Loading`, which drops any prior error message.
    pub fn begin(&mut self) -> FetchJob {
        self.seq += 1;
        self.state = RequestState::Loading;
        debug!(seq = self.seq, city = self.query.city(), "fetch started");
        FetchJob {
            provider: Arc::clone(&self.provider),
            query: self.query.clone(),
            seq: self.seq,
        }
    }

    /// Apply a completed fetch. A result whose sequence number is not the
    /// latest issued one is discarded; returns whether state was updated.
    ///
    /// Success replaces the snapshot wholesale; failure stores the derived
    /// user-facing message and drops any prior snapshot.
    pub fn apply(&mut self, seq: u64, result: Result<WeatherSnapshot, FetchError>) -> bool {
        if seq != self.seq {
            debug!(seq, latest = self.seq, "discarding stale fetch result");
            return false;
        }

        self.state = match result {
            Ok(snapshot) => RequestState::Succeeded(snapshot),
            Err(err) => {
                warn!(error = %err, city = self.query.city(), "weather fetch failed");
                RequestState::Failed(err.user_message().to_string())
            }
        };
        true
    }

    /// begin + run + apply for callers with nothing to interleave.
    pub async fn refresh(&mut self) -> &RequestState {
        let job = self.begin();
        let (seq, result) = job.run().await;
        self.apply(seq, result);
        &self.state
    }

    /// Submit search input. Whitespace-only input issues no fetch and leaves
    /// the current state (and any visible results) untouched.
    pub fn submit_city(&mut self, raw: &str) -> Option<FetchJob> {
        let query = self.query.with_city(raw)?;
        self.query = query;
        Some(self.begin())
    }

    /// Switch the unit system. Re-fetches only when the unit actually
    /// changed; the city is left as-is.
    pub fn set_units(&mut self, units: UnitSystem) -> Option<FetchJob> {
        if self.query.units() == units {
            return None;
        }
        self.query = self.query.with_units(units);
        Some(self.begin())
    }
}
