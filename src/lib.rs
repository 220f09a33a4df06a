//! Live HSV color tracking.
//!
//! Frames are thresholded in HSV, denoised, and the contours of what survives
//! are reported as enclosing circles. In interactive mode the threshold is
//! calibrated by dragging a rectangle over the live picture.

pub mod args;
pub mod config;
pub mod error;
pub mod modules;
pub mod pipeline;
pub mod tracker;

pub use config::{Mode, VisionSettings};
pub use error::{Result, TrackerError};
pub use pipeline::{FrameResult, Pipeline};
pub use tracker::{RunSummary, StopReason, Tracker};
