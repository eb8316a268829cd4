use crate::error::EngineError;
use crate::models::energy::{DailyGranularity, EnergyPoint, ExportView};

pub const CSV_MIME: &str = "text/csv;charset=utf-8";
const HEADER: &str = "name,energy";

/// A rendered export ready to hand to a client.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime: &'static str,
    pub content: String,
}

/// Header line followed by one `name,energy` row per point, joined with `\n`.
///
/// Labels come from a fixed vocabulary without commas, so nothing is quoted.
pub fn to_delimited_text(series: &[EnergyPoint]) -> Result<String, EngineError> {
    if series.is_empty() {
        return Err(EngineError::EmptySeries);
    }
    let mut lines = Vec::with_capacity(series.len() + 1);
    lines.push(HEADER.to_string());
    lines.extend(series.iter().map(|p| format!("{},{}", p.name, p.energy)));
    Ok(lines.join("\n"))
}

/// Base file name for a view: `HourlyData`, `DailyData` or `YearlyData`.
pub fn export_file_stem(view: ExportView) -> &'static str {
    match view {
        ExportView::Daily(DailyGranularity::Hourly) => "HourlyData",
        ExportView::Daily(DailyGranularity::DailyInMonth) => "DailyData",
        ExportView::Yearly => "YearlyData",
    }
}

pub fn export_view(series: &[EnergyPoint], view: ExportView) -> Result<ExportFile, EngineError> {
    Ok(ExportFile {
        file_name: format!("{}.csv", export_file_stem(view)),
        mime: CSV_MIME,
        content: to_delimited_text(series)?,
    })
}
