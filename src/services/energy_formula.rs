use crate::error::EngineError;
use crate::models::energy::PanelConfiguration;

/// Assumed peak-sun-hours per day (h). Fixed, not user-configurable.
pub const BASE_IRRADIANCE: f64 = 4.0;

/// Noise-free daily energy for a configuration:
///
/// `E = BASE_IRRADIANCE × (efficiency / 100) × V × I × panel_factor`
///
/// Pure; garbage in, garbage out. Run [`validate`] first.
pub fn nominal_daily_energy(config: &PanelConfiguration) -> f64 {
    BASE_IRRADIANCE
        * (config.panel_efficiency_percent / 100.0)
        * config.voltage
        * config.current
        * config.panel_type.factor()
}

/// Rejects configurations that would yield zero, negative or non-finite energy.
pub fn validate(config: &PanelConfiguration) -> Result<(), EngineError> {
    let eff = config.panel_efficiency_percent;
    if !eff.is_finite() || !(1.0..=100.0).contains(&eff) {
        return Err(EngineError::Configuration(format!(
            "panelEfficiencyPercent must be within 1..=100, got {}",
            eff
        )));
    }
    if !config.voltage.is_finite() || config.voltage <= 0.0 {
        return Err(EngineError::Configuration(format!(
            "voltage must be positive, got {}",
            config.voltage
        )));
    }
    if !config.current.is_finite() || config.current <= 0.0 {
        return Err(EngineError::Configuration(format!(
            "current must be positive, got {}",
            config.current
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::energy::{Month, PanelType};

    fn february_mono() -> PanelConfiguration {
        PanelConfiguration {
            month: Month::February,
            ..PanelConfiguration::default()
        }
    }

    #[test]
    fn monocrystalline_reference_value() {
        let e = nominal_daily_energy(&february_mono());
        assert!((e - 43.2).abs() < 1e-9, "got {}", e);
    }

    #[test]
    fn thin_film_is_derated() {
        let cfg = PanelConfiguration {
            panel_type: PanelType::ThinFilm,
            ..february_mono()
        };
        assert!((nominal_daily_energy(&cfg) - 38.88).abs() < 1e-9);

        let poly = PanelConfiguration {
            panel_type: PanelType::Polycrystalline,
            ..february_mono()
        };
        assert!((nominal_daily_energy(&poly) - 41.04).abs() < 1e-9);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let cfg = february_mono();
        assert_eq!(nominal_daily_energy(&cfg), nominal_daily_energy(&cfg));
    }

    #[test]
    fn dead_fields_do_not_affect_energy() {
        let a = february_mono();
        let b = PanelConfiguration {
            country: "Norway".to_string(),
            years: 25,
            ..february_mono()
        };
        assert_eq!(nominal_daily_energy(&a), nominal_daily_energy(&b));
    }

    #[test]
    fn validation_rejects_degenerate_inputs() {
        assert!(validate(&february_mono()).is_ok());

        for bad in [
            PanelConfiguration { panel_efficiency_percent: 0.0, ..february_mono() },
            PanelConfiguration { panel_efficiency_percent: 120.0, ..february_mono() },
            PanelConfiguration { panel_efficiency_percent: f64::NAN, ..february_mono() },
            PanelConfiguration { voltage: -12.0, ..february_mono() },
            PanelConfiguration { current: 0.0, ..february_mono() },
            PanelConfiguration { current: f64::INFINITY, ..february_mono() },
        ] {
            assert!(
                matches!(validate(&bad), Err(EngineError::Configuration(_))),
                "expected rejection for {:?}",
                bad
            );
        }
    }
}
