//! Preference Evolution - Viewer preference trend detection and forecasting
//!
//! This crate tracks how a viewer's content preferences change over time.
//! Stored snapshots are turned into per-dimension time series, fitted with
//! least squares, classified into trends, and extrapolated into forecasts.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
