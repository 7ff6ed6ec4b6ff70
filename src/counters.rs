//! HUD counters.

use crate::constants::{HUD_MARGIN, SCREEN_WIDTH};
use crate::host::{Canvas, TextAlign};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    value: u32,
}

impl Score {
    pub fn add(&mut self, points: u32) {
        self.value += points;
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        canvas.draw_text(
            SCREEN_WIDTH / 2,
            HUD_MARGIN,
            &format!("Score: {}", self.value),
            TextAlign::Center,
        );
    }
}

/// Shown on the HUD; nothing advances it during play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Level {
    value: u32,
}

impl Default for Level {
    fn default() -> Self {
        Self { value: 1 }
    }
}

impl Level {
    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 1;
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        canvas.draw_text(
            SCREEN_WIDTH - HUD_MARGIN,
            HUD_MARGIN,
            &format!("Level: {}", self.value),
            TextAlign::Right,
        );
    }
}
