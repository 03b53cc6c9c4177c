//! Shelterwatch - monitoring backend for bus-shelter surveillance devices.
//!
//! # Overview
//!
//! Shelterwatch keeps an in-memory list of monitored bus shelters, each with
//! its latest camera capture, condition scores, detection results and recent
//! history. A dashboard front-end narrows the list with filter criteria, shows
//! status counts for what is visible, and drills down into single shelters.
//! A simulated ingestion workflow adds synthetic shelters over time.
//!
//! Nothing is persisted; the store starts from seed data on every launch.
//!
//! # Modules
//!
//! - [`model`]: Shelter records, statuses and rating bands
//! - [`seed`]: Initial shelters and the bundled image pool
//! - [`filter`]: Filter criteria and the predicate engine
//! - [`aggregation`]: Status counts and filter selector options
//! - [`generator`]: Synthetic shelter records
//! - [`store`]: Append-only shared store
//! - [`workflow`]: Simulated ingestion runs
//! - [`dashboard`]: Views assembled for the front-end
//! - [`config`]: Environment configuration
//! - [`api`]: HTTP API handlers

pub mod aggregation;
pub mod api;
pub mod config;
pub mod dashboard;
pub mod filter;
pub mod generator;
pub mod model;
pub mod seed;
pub mod store;
pub mod workflow;
