use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use log::warn;
use opencv::core::Mat;
use opencv::highgui;

use crate::error::Result;
use crate::modules::calibration::PointerEvent;
use crate::modules::{Control, ControlModule, OutputModule};

const ESCAPE: i32 = 27;

/// `q`, `Q` or Escape. `key` is what `wait_key` returned, `-1` when nothing was pressed.
pub fn is_quit_key(key: i32) -> bool {
	if key < 0 {
		return false;
	}
	matches!(key & 0xff, k if k == 'q' as i32 || k == 'Q' as i32 || k == ESCAPE)
}

/// On-screen windows for the annotated frame and, optionally, the mask.
///
/// Mouse events on the frame window are queued by the highgui callback while
/// `wait_key` runs, and handed out by [`ControlModule::poll`].
pub struct Display {
	window: String,
	mask_window: Option<String>,
	events: Arc<Mutex<VecDeque<PointerEvent>>>,
}

impl Display {
	pub fn open(window: &str, mask_window: Option<&str>) -> Result<Self> {
		highgui::named_window(window, highgui::WINDOW_AUTOSIZE)?;
		if let Some(name) = mask_window {
			highgui::named_window(name, highgui::WINDOW_AUTOSIZE)?;
		}

		let events = Arc::new(Mutex::new(VecDeque::new()));
		let queue = Arc::clone(&events);
		highgui::set_mouse_callback(
			window,
			Some(Box::new(move |event: i32, x: i32, y: i32, _flags: i32| {
				if let Some(ev) = PointerEvent::from_highgui(event, x, y) {
					if let Ok(mut q) = queue.lock() {
						q.push_back(ev);
					}
				}
			})),
		)?;

		Ok(Self {
			window: window.to_string(),
			mask_window: mask_window.map(str::to_string),
			events,
		})
	}
}

impl OutputModule for Display {
	fn run(&mut self, frame: &Mat, mask: &Mat) -> Result<()> {
		highgui::imshow(&self.window, frame)?;
		if let Some(name) = &self.mask_window {
			highgui::imshow(name, mask)?;
		}
		Ok(())
	}
}

impl ControlModule for Display {
	fn poll(&mut self, delay_ms: i32) -> Result<Control> {
		let key = highgui::wait_key(delay_ms)?;
		let events = self.events.lock().unwrap_or_else(|e| e.into_inner()).drain(..).collect();
		Ok(Control {
			events,
			quit: is_quit_key(key),
		})
	}
}

impl Drop for Display {
	fn drop(&mut self) {
		if let Err(e) = highgui::destroy_all_windows() {
			warn!("could not close windows: {}", e);
		}
	}
}
