// === PUBLIC CONTRACT ===
// The wire model and the record store client trait other crates consume
pub mod contract;

pub use contract::{client, error, model};

// === CONFIGURATION ===
pub mod config;
pub use config::StudentRecordsConfig;

// === RECORD TABLE CONTROLLER ===
pub mod domain;
pub use domain::table::RecordTable;

// === HTTP ADAPTER ===
pub mod infra;
pub use infra::{HttpStudentStore, TracedClient};

// === PRESENTATION GLUE ===
// Headless view models; rendering them is up to the front end
pub mod view;
