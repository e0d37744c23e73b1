use serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: u32 = 9;
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub search: Search,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
	/// Upper bound on waiting for a pooled connection.
	#[serde(default = "default_acquire_timeout_ms")]
	pub acquire_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Search {
	/// Page size applied once any facet filter or a cursor is present.
	#[serde(default = "default_page_size")]
	pub default_page_size: u32,
	/// Explicit page sizes above this are clamped.
	#[serde(default = "default_max_page_size")]
	pub max_page_size: u32,
}
impl Default for Search {
	fn default() -> Self {
		Self { default_page_size: DEFAULT_PAGE_SIZE, max_page_size: DEFAULT_MAX_PAGE_SIZE }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_acquire_timeout_ms() -> u64 {
	5_000
}

fn default_page_size() -> u32 {
	DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> u32 {
	DEFAULT_MAX_PAGE_SIZE
}
