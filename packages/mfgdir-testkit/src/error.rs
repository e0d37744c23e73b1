pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid test database DSN: {0}")]
	Dsn(String),
	#[error("Test database {action} failed: {source}")]
	Admin { action: &'static str, source: sqlx::Error },
	#[error(transparent)]
	Storage(#[from] mfgdir_storage::Error),
}
