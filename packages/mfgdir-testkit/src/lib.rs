//! Test support for the directory crates: in-memory and fault-injecting stores, a fixed
//! manufacturer fixture, and throwaway PostgreSQL databases.

pub mod faulty;
pub mod fixtures;
pub mod memory;

mod error;

pub use error::{Error, Result};
pub use faulty::{FaultyStore, StoreOp};
pub use memory::MemoryStore;

use std::{env, str::FromStr, thread};

use sqlx::{
	ConnectOptions, Connection,
	postgres::{PgConnectOptions, PgConnection},
};
use tokio::runtime::Builder;
use uuid::Uuid;

use mfgdir_config::{Config, Postgres, Search, Service, Storage};
use mfgdir_storage::{db::Db, models::Company, queries};

const DSN_VAR: &str = "MFGDIR_PG_DSN";

/// A database created for one test. It is dropped by [`TestDatabase::cleanup`], or on `Drop`
/// as a fallback.
pub struct TestDatabase {
	name: String,
	dsn: String,
	maintenance: PgConnectOptions,
	dropped: bool,
}
impl TestDatabase {
	pub async fn new(base_dsn: &str) -> Result<Self> {
		let base =
			PgConnectOptions::from_str(base_dsn).map_err(|err| Error::Dsn(err.to_string()))?;
		let (maintenance, mut conn) = maintenance_connection(&base).await?;
		let name = format!("mfgdir_test_{}", Uuid::new_v4().simple());

		sqlx::query(&format!(r#"CREATE DATABASE "{name}""#))
			.execute(&mut conn)
			.await
			.map_err(|source| Error::Admin { action: "create", source })?;

		let dsn = base.database(&name).to_url_lossy().to_string();

		Ok(Self { name, dsn, maintenance, dropped: false })
	}

	pub fn dsn(&self) -> &str {
		&self.dsn
	}

	pub async fn cleanup(mut self) -> Result<()> {
		drop_database(&self.maintenance, &self.name).await?;

		self.dropped = true;

		Ok(())
	}
}
impl Drop for TestDatabase {
	fn drop(&mut self) {
		if self.dropped {
			return;
		}

		let name = self.name.clone();
		let maintenance = self.maintenance.clone();
		// The caller may be inside a runtime, so the drop runs on its own thread.
		let worker = thread::spawn(move || {
			let outcome = Builder::new_current_thread()
				.enable_all()
				.build()
				.map_err(|err| err.to_string())
				.and_then(|runtime| {
					runtime
						.block_on(drop_database(&maintenance, &name))
						.map_err(|err| err.to_string())
				});

			if let Err(err) = outcome {
				eprintln!("Failed to drop test database {name}: {err}");
			}
		});

		let _ = worker.join();
	}
}

pub fn env_dsn() -> Option<String> {
	env::var(DSN_VAR).ok().filter(|dsn| !dsn.trim().is_empty())
}

pub fn pg_config(dsn: &str) -> Postgres {
	Postgres { dsn: dsn.to_string(), pool_max_conns: 4, acquire_timeout_ms: 5_000 }
}

/// A valid configuration with default search settings. Nothing dials `dsn` unless a test
/// connects with it.
pub fn service_config(dsn: &str) -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		storage: Storage { postgres: pg_config(dsn) },
		search: Search::default(),
	}
}

/// Bootstraps the schema in `test_db` and inserts `companies`.
pub async fn seeded_db(test_db: &TestDatabase, companies: &[Company]) -> Result<Db> {
	let db = Db::connect(&pg_config(test_db.dsn())).await?;

	db.ensure_schema().await?;

	for company in companies {
		queries::insert_company(&db, company).await?;
	}

	Ok(db)
}

async fn maintenance_connection(
	base: &PgConnectOptions,
) -> Result<(PgConnectOptions, PgConnection)> {
	let mut last_err = None;

	for database in ["postgres", "template1"] {
		let options = base.clone().database(database);

		match PgConnection::connect_with(&options).await {
			Ok(conn) => return Ok((options, conn)),
			Err(err) => last_err = Some(err),
		}
	}

	Err(Error::Admin {
		action: "connect",
		source: last_err.unwrap_or(sqlx::Error::PoolClosed),
	})
}

async fn drop_database(maintenance: &PgConnectOptions, name: &str) -> Result<()> {
	let mut conn = PgConnection::connect_with(maintenance)
		.await
		.map_err(|source| Error::Admin { action: "connect", source })?;

	sqlx::query(&format!(r#"DROP DATABASE IF EXISTS "{name}" WITH (FORCE)"#))
		.execute(&mut conn)
		.await
		.map_err(|source| Error::Admin { action: "drop", source })?;

	Ok(())
}
