use std::path::PathBuf;

use clap::Parser;

use crate::config::Mode;

/// Color tracking from a camera.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
	/// Capture device number
	#[arg(default_value_t = 0, allow_negative_numbers = true)]
	pub device: i32,

	/// Save the annotated video
	#[arg(short = 's', long = "save")]
	pub save: bool,

	/// Fixed green threshold, or calibrate by dragging a rectangle
	#[arg(short, long, value_enum)]
	pub mode: Option<Mode>,

	/// Settings file (defaults to ./vset.toml when present)
	#[arg(short, long)]
	pub config: Option<PathBuf>,
}

/// Help text printed on bad arguments or when the device can't be opened.
pub fn usage(program: &str) -> String {
	format!(
		"The program captures frames from a camera connected to your computer.\n\
		 Usage:\n{program} [ device number = 0 [ FLAGS ] ]\n\
		 \tPossible Flags:\n\
		 \t\t-s - Save video\n\
		 \t\t--mode fixed|interactive - Threshold mode\n\
		 \t\t--config PATH - Settings file\n\
		 \tTo find the device number, try ls /dev/video*\n\
		 \texample: {program} 0 -s\n",
		program = program
	)
}
