//! Reagent Inventory Library
//!
//! In-memory inventory of laboratory reagents: records, expiry classification,
//! free-text search and the view models behind the reagents page.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod commands;
pub mod config;
pub mod errors;
pub mod models;
pub mod seed;
pub mod services;
pub mod ui;

pub use errors::ServiceError;
pub use models::{Grade, PackageControl, ReagentRecord, Unit};
pub use services::{
    expiry::{ExpiryClassifier, ExpiryStatus},
    ingest::{IngestOutcome, IngestWarning, ReagentInput, RecordIngestor},
    reagent_store::{IdPolicy, ReagentStore},
};
pub use ui::{InventorySession, UiEvent};
