//! # Meridian Analytics Engine
//!
//! This crate implements the filter-and-aggregate pipeline that turns raw
//! sales records plus a filter/ranking configuration into the derived KPI
//! tables and scalar metrics the dashboard displays.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `AnalyticsEngine` is a stateless
//!   calculator. It takes an immutable record sequence and a fresh
//!   configuration as input and produces new output structures; no state is
//!   retained between calls, and the whole pipeline re-executes in full on
//!   every selection change.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: The main struct that contains the pipeline stages.
//! - `DashboardReport`: The standardized struct holding every derived table
//!   and scalar for one selection.
//! - `AnalyticsError`: The specific error types that can be returned from
//!   this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use report::{DashboardReport, FilterDomain, PeriodPoint, ProductKpi, SalesSummary};
