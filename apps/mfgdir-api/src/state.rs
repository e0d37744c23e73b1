use std::sync::Arc;

use mfgdir_service::DirectoryService;
use mfgdir_storage::{PgCompanyStore, db::Db};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<DirectoryService>,
}
impl AppState {
	/// Connects the pool, bootstraps the schema and serves from PostgreSQL.
	pub async fn new(config: mfgdir_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let store = Arc::new(PgCompanyStore::new(db));

		Ok(Self::from_service(DirectoryService::new(config, store)))
	}

	pub fn from_service(service: DirectoryService) -> Self {
		Self { service: Arc::new(service) }
	}
}
