pub mod companies;
pub mod search;

mod error;

pub use companies::CompanyRequest;
pub use error::{Error, Result};
pub use search::{
	CapabilityCount, FacetCounts, SearchRequest, SearchResponse, StateCount, VolumeCount,
};

use std::sync::Arc;

use mfgdir_config::Config;
use mfgdir_storage::CompanyStore;

pub struct DirectoryService {
	pub cfg: Config,
	pub store: Arc<dyn CompanyStore>,
}
impl DirectoryService {
	pub fn new(cfg: Config, store: Arc<dyn CompanyStore>) -> Self {
		Self { cfg, store }
	}
}
