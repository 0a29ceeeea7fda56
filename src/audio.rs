use std::io::{self, Write};

use log::{debug, warn};

use crate::collaborators::AudioSink;
use crate::input::Direction;

/// Audio through the terminal bell.
///
/// The bell has no volume control, so any non-zero volume rings it. Turns
/// are too frequent to ring for and are only logged.
#[derive(Debug, Default)]
pub struct BellAudio {
    rings: u32,
}

impl BellAudio {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bells rung so far.
    #[must_use]
    pub fn rings(&self) -> u32 {
        self.rings
    }

    fn ring(&mut self, volume: f32) {
        if volume <= 0.0 {
            return;
        }

        let mut stdout = io::stdout();
        if let Err(error) = stdout.write_all(b"\x07").and_then(|()| stdout.flush()) {
            warn!("terminal bell failed: {error}");
            return;
        }
        self.rings += 1;
    }
}

impl AudioSink for BellAudio {
    fn on_eat(&mut self, volume: f32) {
        self.ring(volume);
    }

    fn on_direction_changed(&mut self, direction: Direction, volume: f32) {
        debug!("turn {direction:?} (volume {volume:.2})");
    }

    fn on_death(&mut self, volume: f32) {
        self.ring(volume);
    }
}
