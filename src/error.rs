use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
	#[error("opencv: {0}")]
	OpenCv(#[from] opencv::Error),

	#[error("Failed to open the video device {index}")]
	DeviceOpen { index: i32 },

	#[error("could not open video writer for {path}")]
	VideoOpen { path: PathBuf },

	#[error("could not read settings from {path}: {source}")]
	Config {
		path: PathBuf,
		#[source]
		source: ConfigSource,
	},

	#[error("invalid settings: {0}")]
	InvalidConfig(String),
}

#[derive(Debug, Error)]
pub enum ConfigSource {
	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
