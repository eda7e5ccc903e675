use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwapOption;

use crate::error::FetchError;
use crate::models::Snapshot;
use crate::registry::RegistryApi;

/// What the UI may currently show, derived from loading/error/snapshot state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum LoadPhase {
    NeverLoaded,
    Loading,
    Loaded,
    /// Last refresh failed; the prior snapshot stays visible
    Stale,
}

/// Holds the last-fetched catalog snapshot. The snapshot is only ever
/// replaced wholesale by a single pointer swap; readers never observe a
/// half-updated catalog. Failed refreshes leave the prior snapshot in
/// place and record the error in a separate, dismissible slot.
pub struct CatalogStore<A: RegistryApi> {
    api: A,
    snapshot: ArcSwapOption<Snapshot>,
    issued: AtomicU64,
    inflight: AtomicUsize,
    last_error: Mutex<Option<String>>,
}

impl<A: RegistryApi> CatalogStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            snapshot: ArcSwapOption::empty(),
            issued: AtomicU64::new(0),
            inflight: AtomicUsize::new(0),
            last_error: Mutex::new(None),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    #[allow(dead_code)]
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.load_full()
    }

    #[allow(dead_code)]
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn dismiss_error(&self) {
        *self.last_error.lock().unwrap() = None;
    }

    /// Drop the current snapshot and error, returning the store to its
    /// never-loaded state until the next refresh
    #[allow(dead_code)]
    pub fn invalidate(&self) {
        self.snapshot.store(None);
        *self.last_error.lock().unwrap() = None;
    }

    #[allow(dead_code)]
    pub fn load_phase(&self) -> LoadPhase {
        if self.inflight.load(Ordering::SeqCst) > 0 {
            return LoadPhase::Loading;
        }
        match (
            self.snapshot.load().is_some(),
            self.last_error.lock().unwrap().is_some(),
        ) {
            (false, _) => LoadPhase::NeverLoaded,
            (true, true) => LoadPhase::Stale,
            (true, false) => LoadPhase::Loaded,
        }
    }

    /// Fetch the full catalog and install it as the new snapshot.
    ///
    /// Overlapping refreshes are allowed to race; each carries a
    /// monotonically increasing token, and a response whose token is no
    /// longer the latest issued is discarded as `FetchError::Superseded`
    /// regardless of network completion order. No automatic retries.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>, FetchError> {
        let token = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.inflight.fetch_add(1, Ordering::SeqCst);
        let fetched = self.api.fetch_catalog().await;
        self.inflight.fetch_sub(1, Ordering::SeqCst);

        if token != self.issued.load(Ordering::SeqCst) {
            // a newer refresh owns the outcome now
            return Err(FetchError::Superseded);
        }

        match fetched {
            Ok(raw) => {
                let snap = Arc::new(Snapshot::from_catalog(raw, token));
                self.snapshot.store(Some(Arc::clone(&snap)));
                *self.last_error.lock().unwrap() = None;
                Ok(snap)
            }
            Err(err) => {
                let err = FetchError::from(err);
                *self.last_error.lock().unwrap() = Some(err.to_string());
                Err(err)
            }
        }
    }
}
