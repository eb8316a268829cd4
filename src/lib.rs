//! Synthetic photovoltaic yield estimation.
//!
//! A panel configuration is expanded into three noisy series (hourly for a
//! day, daily for the selected month, monthly totals for a year), which are
//! then narrowed by a display filter and exported as CSV.

pub mod api_docs;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod shared_state;
