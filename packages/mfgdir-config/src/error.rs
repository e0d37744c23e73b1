use std::{io, path::PathBuf};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Cannot read configuration {path:?}: {source}")]
	ReadConfig { path: PathBuf, source: io::Error },
	#[error("Cannot parse configuration {path:?}: {source}")]
	ParseConfig { path: PathBuf, source: toml::de::Error },
	#[error("Invalid configuration: {message}")]
	Validation { message: String },
}
