pub mod energy_formula;
pub mod series_generator;
pub mod view_filter;
pub mod csv_export;
