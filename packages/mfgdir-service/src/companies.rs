use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mfgdir_storage::models::Company;

use crate::{DirectoryService, Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRequest {
	pub company_id: Uuid,
}

impl DirectoryService {
	/// Loads one company with its facilities, capabilities, certifications and industries.
	pub async fn company(&self, req: CompanyRequest) -> Result<Company> {
		self.store.fetch_company(req.company_id).await?.ok_or_else(|| Error::NotFound {
			message: format!("Company {} does not exist.", req.company_id),
		})
	}
}
