use std::sync::Arc;

use cutoff_service::CutoffService;
use cutoff_storage::{RecordStore, db::Db, pg::PgStore};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<CutoffService>,
	/// Attach the underlying error to 500 responses.
	pub expose_error_detail: bool,
	pub cors_permissive: bool,
}
impl AppState {
	pub async fn new(config: cutoff_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		if config.storage.postgres.ensure_schema {
			db.ensure_schema().await?;
		}

		Ok(Self::with_store(&config, Arc::new(PgStore::new(db))))
	}

	pub fn with_store(config: &cutoff_config::Config, store: Arc<dyn RecordStore>) -> Self {
		Self {
			service: Arc::new(CutoffService::new(config.query.clone(), store)),
			expose_error_detail: config.service.is_development(),
			cors_permissive: config.service.cors_permissive,
		}
	}
}
