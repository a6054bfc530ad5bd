pub mod expiry;
pub mod ingest;
pub mod reagent_store;
