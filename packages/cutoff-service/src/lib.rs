pub mod facets;
pub mod records;
pub mod statistics;
pub mod strategy;

mod error;

pub use error::{Error, Result};
pub use records::RecordPage;
pub use strategy::Resolution;

use std::sync::Arc;

use cutoff_storage::RecordStore;

pub struct CutoffService {
	pub cfg: cutoff_config::Query,
	pub store: Arc<dyn RecordStore>,
}
impl CutoffService {
	pub fn new(cfg: cutoff_config::Query, store: Arc<dyn RecordStore>) -> Self {
		Self { cfg, store }
	}
}
