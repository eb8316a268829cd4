use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::EngineError;
use crate::models::energy::{DisplayFilter, PanelConfiguration, SeriesSet};
use crate::services::{energy_formula, series_generator};

/// A fully regenerated series triple and the configuration it came from.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Ticket of the regeneration that produced it; strictly increasing
    pub generation: u64,
    pub generated_at: DateTime<Utc>,
    pub configuration: PanelConfiguration,
    pub nominal_daily_energy: f64,
    pub series: SeriesSet,
}

#[derive(Clone, Debug)]
pub struct AppState {
    /// Last committed snapshot. Readers never see a partial triple.
    pub snapshot: Arc<RwLock<Snapshot>>,
    pub filter: Arc<RwLock<DisplayFilter>>,
    /// Noise source shared by every regeneration
    rng: Arc<Mutex<StdRng>>,
    /// Next regeneration ticket
    next_generation: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(
        configuration: PanelConfiguration,
        filter: DisplayFilter,
        seed: Option<u64>,
    ) -> Result<Self, EngineError> {
        energy_formula::validate(&configuration)?;

        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let series = series_generator::regenerate(&configuration, &mut rng);
        let snapshot = Snapshot {
            generation: 0,
            generated_at: Utc::now(),
            nominal_daily_energy: energy_formula::nominal_daily_energy(&configuration),
            configuration,
            series,
        };

        Ok(Self {
            snapshot: Arc::new(RwLock::new(snapshot)),
            filter: Arc::new(RwLock::new(filter)),
            rng: Arc::new(Mutex::new(rng)),
            next_generation: Arc::new(AtomicU64::new(1)),
        })
    }

    /// Validate, regenerate all three series and commit them.
    ///
    /// Invalid input leaves the committed snapshot untouched.
    pub fn apply_configuration(&self, configuration: PanelConfiguration) -> Result<Snapshot, EngineError> {
        if let Err(e) = energy_formula::validate(&configuration) {
            tracing::warn!(error = %e, "configuration rejected");
            return Err(e);
        }

        let ticket = self.next_ticket();
        let prepared = self.prepare(ticket, configuration);
        self.publish(prepared)
    }

    /// Commit `snapshot`, failing with [`EngineError::Superseded`] when a newer
    /// regeneration already won.
    pub fn publish(&self, snapshot: Snapshot) -> Result<Snapshot, EngineError> {
        let generation = snapshot.generation;
        if self.commit(snapshot.clone()) {
            return Ok(snapshot);
        }
        let committed = self.get_snapshot().map(|s| s.generation).unwrap_or(generation);
        Err(EngineError::Superseded { generation, committed })
    }

    /// Reserve the next regeneration ticket.
    pub fn next_ticket(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::SeqCst)
    }

    /// Generate a snapshot for `ticket` without publishing it.
    pub fn prepare(&self, ticket: u64, configuration: PanelConfiguration) -> Snapshot {
        let series = match self.rng.lock() {
            Ok(mut rng) => series_generator::regenerate(&configuration, &mut *rng),
            Err(poisoned) => series_generator::regenerate(&configuration, &mut *poisoned.into_inner()),
        };
        Snapshot {
            generation: ticket,
            generated_at: Utc::now(),
            nominal_daily_energy: energy_formula::nominal_daily_energy(&configuration),
            configuration,
            series,
        }
    }

    /// Publish `snapshot` unless a newer one is already committed.
    /// Returns whether it was published.
    pub fn commit(&self, snapshot: Snapshot) -> bool {
        let Ok(mut current) = self.snapshot.write() else {
            tracing::error!("snapshot lock poisoned, regeneration dropped");
            return false;
        };
        if snapshot.generation <= current.generation {
            tracing::debug!(
                stale = snapshot.generation,
                committed = current.generation,
                "discarding out-of-order regeneration"
            );
            return false;
        }
        tracing::info!(
            generation = snapshot.generation,
            month = %snapshot.configuration.month,
            nominal_kwh = snapshot.nominal_daily_energy,
            "series regenerated"
        );
        *current = snapshot;
        true
    }

    pub fn get_snapshot(&self) -> Option<Snapshot> {
        if let Ok(snap) = self.snapshot.read() {
            Some(snap.clone())
        } else {
            None
        }
    }

    pub fn get_filter(&self) -> DisplayFilter {
        if let Ok(f) = self.filter.read() {
            f.clone()
        } else {
            DisplayFilter::default()
        }
    }

    /// Replace the display filter. Series are not regenerated.
    pub fn set_filter(&self, filter: DisplayFilter) {
        if let Ok(mut f) = self.filter.write() {
            tracing::debug!(?filter, "display filter changed");
            *f = filter;
        }
    }
}
