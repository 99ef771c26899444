//! Horizontal scrolling camera with screen shake

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::Tuning;
use crate::consts::VIEW_WIDTH;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Camera {
    /// World x at the viewport's left edge
    pub x: f32,
    /// Remaining ticks of screen shake; shake amplitude equals this value
    pub shake_ticks: u32,
}

impl Camera {
    /// Ease toward keeping `target_x` one lead distance from the left edge,
    /// never showing past either end of the level
    pub fn follow(&mut self, target_x: f32, level_width: f32, tuning: &Tuning) {
        let target = target_x - tuning.camera_lead;
        self.x += (target - self.x) * tuning.camera_smoothing;
        let max_x = (level_width - VIEW_WIDTH).max(0.0);
        self.x = self.x.clamp(0.0, max_x);
    }

    pub fn reset(&mut self) {
        self.x = 0.0;
        self.shake_ticks = 0;
    }

    /// Start shaking; a weaker shake never cuts a stronger one short
    pub fn shake(&mut self, ticks: u32) {
        self.shake_ticks = self.shake_ticks.max(ticks);
    }

    pub fn tick_shake(&mut self) {
        self.shake_ticks = self.shake_ticks.saturating_sub(1);
    }

    /// Render offset for this frame. Deterministic for a given seed and frame.
    pub fn shake_offset(&self, seed: u64, frame: u64) -> Vec2 {
        if self.shake_ticks == 0 {
            return Vec2::ZERO;
        }
        let mut rng = Pcg32::seed_from_u64(seed ^ frame.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        let amplitude = self.shake_ticks as f32;
        Vec2::new(
            rng.random_range(-1.0f32..1.0) * amplitude,
            rng.random_range(-1.0f32..1.0) * amplitude,
        )
    }
}
