//! Vision settings.
//!
//! Settings come from an optional `vset.toml`. Every key is optional; anything
//! left out falls back to the defaults of the selected [`Mode`].

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::error::{ConfigSource, Result, TrackerError};
use crate::modules::threshold::ThresholdRange;

pub const DEFAULT_SETTINGS_PATH: &str = "vset.toml";
pub const DEFAULT_VIDEO_PATH: &str = "simon_output_normal.avi";

/// Which of the two tracker behaviours to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
	/// Constant threshold tuned for a green ball.
	Fixed,
	/// Threshold calibrated by dragging a rectangle over the live frame.
	Interactive,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisionSettings {
	pub mode: Mode,
	pub log_level: String,

	pub frame_width: i32,
	pub frame_height: i32,

	pub range: ThresholdRange,

	pub erode_size: i32,
	pub dilate_size: i32,
	pub morph_iterations: i32,

	pub min_radius: f32,
	pub max_objects: usize,

	pub show_mask: bool,
	pub show_fps: bool,
	pub window_title: String,
	pub mask_window_title: String,
	pub poll_delay_ms: i32,
	pub video_path: PathBuf,
	pub video_fps: f64,
	pub fourcc: [char; 4],
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
	mode: Option<Mode>,
	log_level: Option<String>,
	#[serde(default)]
	input: InputSection,
	#[serde(default)]
	threshold: ThresholdSection,
	#[serde(default)]
	morphology: MorphologySection,
	#[serde(default)]
	filter: FilterSection,
	#[serde(default)]
	output: OutputSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct InputSection {
	width: Option<i32>,
	height: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThresholdSection {
	lower: Option<[u8; 3]>,
	upper: Option<[u8; 3]>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MorphologySection {
	erode_size: Option<i32>,
	dilate_size: Option<i32>,
	iterations: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FilterSection {
	min_radius: Option<f32>,
	max_objects: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputSection {
	show_mask: Option<bool>,
	show_fps: Option<bool>,
	window_title: Option<String>,
	mask_window_title: Option<String>,
	poll_delay_ms: Option<i32>,
	video_path: Option<PathBuf>,
	video_fps: Option<f64>,
	fourcc: Option<String>,
}

impl VisionSettings {
	/// Built-in settings for `mode`.
	pub fn defaults(mode: Mode) -> Self {
		let (range, min_radius, show_mask) = match mode {
			Mode::Fixed => (ThresholdRange::new([70, 200, 50], [100, 255, 255]), 20., false),
			Mode::Interactive => (ThresholdRange::full(), 15., true),
		};

		Self {
			mode,
			log_level: "info".to_string(),

			frame_width: 640,
			frame_height: 480,

			range,

			erode_size: 3,
			dilate_size: 8,
			morph_iterations: 2,

			min_radius,
			max_objects: 0,

			show_mask,
			show_fps: false,
			window_title: "Tracker | Webcam".to_string(),
			mask_window_title: "Result".to_string(),
			poll_delay_ms: 2,
			video_path: PathBuf::from(DEFAULT_VIDEO_PATH),
			video_fps: 10.,
			fourcc: ['M', 'J', 'P', 'G'],
		}
	}

	/// Parses settings from TOML text. `mode` wins over the file's `mode` key.
	pub fn from_toml_str(contents: &str, mode: Option<Mode>) -> std::result::Result<Self, ConfigSource> {
		let file: SettingsFile = toml::from_str(contents)?;
		Ok(Self::resolve(file, mode))
	}

	pub fn from_file<P: AsRef<Path>>(path: P, mode: Option<Mode>) -> Result<Self> {
		let path = path.as_ref();
		let contents = fs::read_to_string(path).map_err(|e| TrackerError::Config {
			path: path.to_path_buf(),
			source: e.into(),
		})?;
		Self::from_toml_str(&contents, mode).map_err(|source| TrackerError::Config {
			path: path.to_path_buf(),
			source,
		})
	}

	/// Loads settings from `path`.
	///
	/// A missing file is only an error when it was asked for explicitly.
	pub fn load<P: AsRef<Path>>(path: P, explicit: bool, mode: Option<Mode>) -> Result<Self> {
		let path = path.as_ref();
		let settings = if !explicit && !path.exists() {
			debug!("no settings file at {}, using defaults", path.display());
			Self::defaults(mode.unwrap_or(Mode::Interactive))
		} else {
			Self::from_file(path, mode)?
		};
		settings.validate()?;
		Ok(settings)
	}

	fn resolve(file: SettingsFile, mode: Option<Mode>) -> Self {
		let mode = mode.or(file.mode).unwrap_or(Mode::Interactive);
		let mut s = Self::defaults(mode);

		if let Some(level) = file.log_level {
			s.log_level = level;
		}

		s.frame_width = file.input.width.unwrap_or(s.frame_width);
		s.frame_height = file.input.height.unwrap_or(s.frame_height);

		s.range = ThresholdRange::new(
			file.threshold.lower.unwrap_or(s.range.lower),
			file.threshold.upper.unwrap_or(s.range.upper),
		);

		s.erode_size = file.morphology.erode_size.unwrap_or(s.erode_size);
		s.dilate_size = file.morphology.dilate_size.unwrap_or(s.dilate_size);
		s.morph_iterations = file.morphology.iterations.unwrap_or(s.morph_iterations);

		s.min_radius = file.filter.min_radius.unwrap_or(s.min_radius);
		s.max_objects = file.filter.max_objects.unwrap_or(s.max_objects);

		let out = file.output;
		s.show_mask = out.show_mask.unwrap_or(s.show_mask);
		s.show_fps = out.show_fps.unwrap_or(s.show_fps);
		s.window_title = out.window_title.unwrap_or(s.window_title);
		s.mask_window_title = out.mask_window_title.unwrap_or(s.mask_window_title);
		s.poll_delay_ms = out.poll_delay_ms.unwrap_or(s.poll_delay_ms);
		s.video_path = out.video_path.unwrap_or(s.video_path);
		s.video_fps = out.video_fps.unwrap_or(s.video_fps);
		if let Some(code) = out.fourcc {
			let chars: Vec<char> = code.chars().collect();
			// anything but four chars is left for validate() to reject
			s.fourcc = match chars[..] {
				[a, b, c, d] => [a, b, c, d],
				_ => ['\0'; 4],
			};
		}

		s
	}

	pub fn validate(&self) -> Result<()> {
		let invalid = |msg: String| Err(TrackerError::InvalidConfig(msg));

		for ch in 0..3 {
			if self.range.lower[ch] > self.range.upper[ch] {
				return invalid(format!(
					"threshold channel {} has lower {} above upper {}",
					ch, self.range.lower[ch], self.range.upper[ch]
				));
			}
		}
		if self.frame_width < 1 || self.frame_height < 1 {
			return invalid(format!("frame size {}x{} must be positive", self.frame_width, self.frame_height));
		}
		if self.erode_size < 1 || self.dilate_size < 1 {
			return invalid("structuring element sizes must be at least 1".to_string());
		}
		if self.morph_iterations < 1 {
			return invalid("morphology iterations must be at least 1".to_string());
		}
		if !(self.min_radius >= 0.) {
			return invalid(format!("min_radius {} must be non-negative", self.min_radius));
		}
		if self.poll_delay_ms < 1 {
			return invalid("poll_delay_ms must be at least 1".to_string());
		}
		if !(self.video_fps > 0.) {
			return invalid(format!("video_fps {} must be positive", self.video_fps));
		}
		if self.fourcc.iter().any(|c| !c.is_ascii() || *c == '\0') {
			return invalid("fourcc must be exactly four ASCII characters".to_string());
		}
		Ok(())
	}
}
