pub mod db;
pub mod models;
pub mod pg;
pub mod procedures;
pub mod queries;
pub mod schema;

mod error;
mod store;

pub use error::Error;
pub use store::{BoxFuture, ProcedurePage, RecordStore};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Table holding one row per institute, course, category and round.
pub const RECORDS_TABLE: &str = "cutoff_records";
