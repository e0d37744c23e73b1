pub mod db;
pub mod models;
pub mod pg;
pub mod queries;
pub mod schema;
pub mod scope;
pub mod store;

mod error;

pub use error::Error;
pub use pg::PgCompanyStore;
pub use scope::{CompanyScope, FacilityPredicate};
pub use store::{BoxFuture, CompanyPage, CompanyStore, PageQuery};

pub type Result<T, E = Error> = std::result::Result<T, E>;
