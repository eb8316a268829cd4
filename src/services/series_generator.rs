/// ============================================================
///  Synthetic series generation
///
///  Every generator follows the same steps per point:
///   1. nominal daily energy from the configuration
///   2. an independent multiplicative noise draw, uniform in the
///      generator's envelope
///   3. optional calendar scaling (yearly: × days in month)
///   4. rounding to two decimals, label by calendar position
///
///  Hourly points resample the full daily rate; they are not a
///  decomposition of the daily total and are never normalised.
/// ============================================================

use std::ops::Range;

use rand::Rng;

use crate::models::energy::{EnergyPoint, Month, PanelConfiguration, Series, SeriesSet};
use crate::services::energy_formula::nominal_daily_energy;

pub const HOURS_PER_DAY: usize = 24;

// ─── Noise envelopes ─────────────────────────────────────────
pub const HOURLY_NOISE: Range<f64> = 0.9..1.1;
pub const DAILY_NOISE: Range<f64> = 0.85..1.15;
pub const YEARLY_NOISE: Range<f64> = 0.85..1.15;

/// Round half away from zero to two decimals.
///
/// Scales the binary value before rounding, so an exact half-cent tie can land
/// one cent away from a decimal `toFixed(2)` rendering of the same double.
#[inline]
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// 24 points labelled "0:00" .. "23:00".
pub fn generate_hourly<R: Rng>(config: &PanelConfiguration, rng: &mut R) -> Series {
    (0..HOURS_PER_DAY)
        .map(|h| EnergyPoint {
            name: format!("{}:00", h),
            energy: round2(nominal_daily_energy(config) * rng.gen_range(HOURLY_NOISE)),
        })
        .collect()
}

/// One point per day of `config.month`, labelled "Day 1" .. "Day N".
pub fn generate_daily<R: Rng>(config: &PanelConfiguration, rng: &mut R) -> Series {
    let nominal = nominal_daily_energy(config);
    (0..config.month.days())
        .map(|idx| EnergyPoint {
            name: format!("Day {}", idx + 1),
            energy: round2(nominal * rng.gen_range(DAILY_NOISE)),
        })
        .collect()
}

/// Monthly totals for the whole calendar year, independent of `config.month`.
///
/// Each month draws its own average-day variance and is scaled by its day count.
pub fn generate_yearly<R: Rng>(config: &PanelConfiguration, rng: &mut R) -> Series {
    let nominal = nominal_daily_energy(config);
    Month::ALL
        .iter()
        .map(|m| {
            let avg_daily = nominal * rng.gen_range(YEARLY_NOISE);
            EnergyPoint {
                name: m.name().to_string(),
                energy: round2(avg_daily * m.days() as f64),
            }
        })
        .collect()
}

/// Full regeneration of all three series. Noise is redrawn on every call.
pub fn regenerate<R: Rng>(config: &PanelConfiguration, rng: &mut R) -> SeriesSet {
    let set = SeriesSet {
        hourly: generate_hourly(config, rng),
        daily: generate_daily(config, rng),
        yearly: generate_yearly(config, rng),
    };

    if cfg!(feature = "verbose_log") {
        for (label, series) in [("hourly", &set.hourly), ("daily", &set.daily), ("yearly", &set.yearly)] {
            let total: f64 = series.iter().map(|p| p.energy).sum();
            tracing::info!(series = label, points = series.len(), total_kwh = total, "series generated");
        }
    }

    set
}
