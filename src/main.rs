use std::path::Path;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};

use hsvtrack::args::{usage, Args};
use hsvtrack::config::{VisionSettings, DEFAULT_SETTINGS_PATH};
use hsvtrack::modules::input::CameraInput;
use hsvtrack::modules::output::{Display, VideoRecorder};
use hsvtrack::modules::OutputModule;
use hsvtrack::{Pipeline, Result, RunSummary, Tracker, TrackerError};

fn main() -> ExitCode {
	let program = std::env::args().next().unwrap_or_else(|| "hsvtrack".to_string());

	let args = match Args::try_parse() {
		Ok(args) => args,
		Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
			let _ = e.print();
			return ExitCode::SUCCESS;
		}
		Err(e) => {
			eprintln!("{}", e);
			print!("{}", usage(&program));
			return ExitCode::from(1);
		}
	};

	//Load Vision Settings
	let (path, explicit) = match &args.config {
		Some(path) => (path.as_path(), true),
		None => (Path::new(DEFAULT_SETTINGS_PATH), false),
	};
	let settings = match VisionSettings::load(path, explicit, args.mode) {
		Ok(settings) => settings,
		Err(e) => {
			eprintln!("{}", e);
			return ExitCode::from(1);
		}
	};

	env_logger::Builder::from_env(Env::default().default_filter_or(settings.log_level.as_str())).init();

	match run(&args, &settings) {
		Ok(_) => ExitCode::SUCCESS,
		Err(e @ TrackerError::DeviceOpen { .. }) => {
			error!("{}", e);
			print!("{}", usage(&program));
			ExitCode::from(1)
		}
		Err(e) => {
			error!("{}", e);
			ExitCode::from(1)
		}
	}
}

fn run(args: &Args, settings: &VisionSettings) -> Result<RunSummary> {
	//Input Module
	let mut input = CameraInput::open(args.device, settings.frame_width, settings.frame_height)?;
	info!("Save Video: {}", if args.save { "Yes" } else { "No" });
	let frame_size = input.frame_size()?;

	//Output Modules
	let mask_window = settings.show_mask.then(|| settings.mask_window_title.as_str());
	let mut display = Display::open(&settings.window_title, mask_window)?;

	let mut sinks = Vec::<Box<dyn OutputModule>>::new();
	if args.save {
		match VideoRecorder::open(&settings.video_path, settings.fourcc, settings.video_fps, frame_size) {
			Ok(recorder) => sinks.push(Box::new(recorder)),
			Err(e) => warn!("not recording: {}", e),
		}
	}

	info!("{:?} mode, press q or esc to quit", settings.mode);

	let mut tracker = Tracker::new(Pipeline::new(settings)?, settings.poll_delay_ms);
	tracker.run(&mut input, &mut display, &mut sinks)
}
