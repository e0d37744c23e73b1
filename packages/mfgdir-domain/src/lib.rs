pub mod capability;
pub mod certification;
pub mod cursor;
pub mod filters;
