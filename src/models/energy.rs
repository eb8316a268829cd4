use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::EngineError;

// ─── Calendar ────────────────────────────────────────────────────────────────

/// Calendar month. Day counts assume a non-leap year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Month::January   => "January",
            Month::February  => "February",
            Month::March     => "March",
            Month::April     => "April",
            Month::May       => "May",
            Month::June      => "June",
            Month::July      => "July",
            Month::August    => "August",
            Month::September => "September",
            Month::October   => "October",
            Month::November  => "November",
            Month::December  => "December",
        }
    }

    /// Fixed day count; February is always 28.
    pub fn days(self) -> usize {
        match self {
            Month::February => 28,
            Month::April | Month::June | Month::September | Month::November => 30,
            _ => 31,
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| EngineError::InvalidMonth(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Day count for a month given by name.
pub fn days_in_month(name: &str) -> Result<usize, EngineError> {
    Ok(name.parse::<Month>()?.days())
}

// ─── Panel configuration ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PanelType {
    Monocrystalline,
    Polycrystalline,
    #[serde(rename = "Thin-Film", alias = "ThinFilm")]
    ThinFilm,
}

impl PanelType {
    /// Derating multiplier applied to the nominal formula.
    pub fn factor(self) -> f64 {
        match self {
            PanelType::Monocrystalline => 1.0,
            PanelType::Polycrystalline => 0.95,
            PanelType::ThinFilm        => 0.9,
        }
    }
}

/// Input parameters driving every series.
///
/// `country` and `years` are carried through the API but take no part in
/// any calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PanelConfiguration {
    /// Not used by the estimation.
    pub country: String,
    pub month: Month,
    /// Panel efficiency in percent, 1..=100
    pub panel_efficiency_percent: f64,
    pub panel_type: PanelType,
    /// Not used by the estimation.
    pub years: u32,
    /// Volts
    pub voltage: f64,
    /// Amps
    pub current: f64,
}

impl Default for PanelConfiguration {
    fn default() -> Self {
        Self {
            country: "India".to_string(),
            month: Month::January,
            panel_efficiency_percent: 18.0,
            panel_type: PanelType::Monocrystalline,
            years: 1,
            voltage: 12.0,
            current: 5.0,
        }
    }
}

/// Wire form of [`PanelConfiguration`] accepted by `PUT /api/configuration`.
///
/// The month stays a plain string so an unknown name surfaces as
/// [`EngineError::InvalidMonth`] rather than a body rejection.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PanelConfigurationRequest {
    #[serde(default)]
    pub country: String,
    #[schema(example = "January")]
    pub month: String,
    pub panel_efficiency_percent: f64,
    pub panel_type: PanelType,
    #[serde(default)]
    pub years: u32,
    pub voltage: f64,
    pub current: f64,
}

impl TryFrom<PanelConfigurationRequest> for PanelConfiguration {
    type Error = EngineError;

    fn try_from(req: PanelConfigurationRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            country: req.country,
            month: req.month.parse()?,
            panel_efficiency_percent: req.panel_efficiency_percent,
            panel_type: req.panel_type,
            years: req.years,
            voltage: req.voltage,
            current: req.current,
        })
    }
}

// ─── Series ──────────────────────────────────────────────────────────────────

/// One labelled sample. `energy` is kWh rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EnergyPoint {
    pub name: String,
    pub energy: f64,
}

/// Points in calendar order.
pub type Series = Vec<EnergyPoint>;

/// The three series produced by one regeneration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SeriesSet {
    /// 24 points, "0:00" .. "23:00"
    pub hourly: Series,
    /// One point per day of the configured month
    pub daily: Series,
    /// 12 points, January .. December
    pub yearly: Series,
}

// ─── Display filter ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum DailyGranularity {
    #[serde(rename = "hourly")]
    Hourly,
    #[default]
    #[serde(rename = "daily")]
    DailyInMonth,
}

/// Yearly filter: the whole year, or the point whose label equals the month name.
///
/// Any label is accepted; one that matches no point narrows the view to nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum YearlyScope {
    #[default]
    Overall,
    Month(String),
}

const OVERALL: &str = "Overall";

impl YearlyScope {
    pub fn as_str(&self) -> &str {
        match self {
            YearlyScope::Overall => OVERALL,
            YearlyScope::Month(label) => label,
        }
    }
}

impl From<&str> for YearlyScope {
    fn from(s: &str) -> Self {
        if s == OVERALL {
            YearlyScope::Overall
        } else {
            YearlyScope::Month(s.to_string())
        }
    }
}

impl From<Month> for YearlyScope {
    fn from(m: Month) -> Self {
        YearlyScope::Month(m.name().to_string())
    }
}

impl Serialize for YearlyScope {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for YearlyScope {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(YearlyScope::from(s.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DisplayFilter {
    #[serde(default)]
    pub daily_granularity: DailyGranularity,
    #[serde(default)]
    #[schema(value_type = String, example = "Overall")]
    pub yearly_scope: YearlyScope,
}

// ─── Export ──────────────────────────────────────────────────────────────────

/// Which presented view an export is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportView {
    /// Short-range view at the given granularity
    Daily(DailyGranularity),
    Yearly,
}

impl ExportView {
    /// Resolve a path segment (`daily` / `yearly`) against the granularity on display.
    pub fn resolve(view: &str, granularity: DailyGranularity) -> Result<Self, EngineError> {
        match view {
            "daily" => Ok(ExportView::Daily(granularity)),
            "yearly" => Ok(ExportView::Yearly),
            other => Err(EngineError::UnknownExportView(other.to_string())),
        }
    }
}

// ─── REST API types ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SeriesResponse {
    /// Sequence number of the regeneration that produced these series
    pub generation: u64,
    pub generated_at: DateTime<Utc>,
    /// Noise-free daily estimate (kWh) for the current configuration
    pub nominal_daily_energy: f64,
    pub series: SeriesSet,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ViewResponse {
    pub generation: u64,
    pub points: Series,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DailyViewQuery {
    /// "hourly" or "daily"; defaults to the stored filter
    pub granularity: Option<DailyGranularity>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct YearlyViewQuery {
    /// "Overall" or a month name; defaults to the stored filter
    pub scope: Option<String>,
}
