//! Seeded random source for generation and jitter
//!
//! Wraps `Pcg32` so every consumer draws from an explicit, seedable stream
//! instead of a global generator.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::math::{Color, Rect};

/// Deterministic random source
#[derive(Debug, Clone)]
pub struct Random {
    seed: u64,
    rng: Pcg32,
}

impl Random {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed from the system clock (for interactive runs without a configured seed)
    pub fn from_clock() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `[min, max]` (both inclusive). `min` must not exceed `max`.
    pub fn int(&mut self, min: i32, max: i32) -> i32 {
        self.rng.random_range(min..=max)
    }

    /// Uniform float in `[min, max]`. `min` must not exceed `max`.
    pub fn float(&mut self, min: f32, max: f32) -> f32 {
        self.rng.random_range(min..=max)
    }

    /// Integer in `[1, 100]`
    pub fn percent(&mut self) -> i32 {
        self.int(1, 100)
    }

    /// Uniform point inside `area`
    pub fn position(&mut self, area: &Rect) -> Vec2 {
        let min = area.min();
        let max = area.max();
        Vec2::new(self.float(min.x, max.x), self.float(min.y, max.y))
    }

    /// Offset with each axis in `[-extent, extent]`
    pub fn jitter(&mut self, extent: f32) -> Vec2 {
        Vec2::new(self.float(-extent, extent), self.float(-extent, extent))
    }

    /// Opaque colour with random RGB
    pub fn color(&mut self) -> Color {
        Color::new(
            self.float(0.0, 1.0),
            self.float(0.0, 1.0),
            self.float(0.0, 1.0),
            1.0,
        )
    }

    /// `base` with each RGB channel nudged by up to `variance` either way
    pub fn color_varying(&mut self, base: Color, variance: f32) -> Color {
        Color::new(
            base.r + self.float(-variance, variance),
            base.g + self.float(-variance, variance),
            base.b + self.float(-variance, variance),
            base.a,
        )
        .clamped()
    }

    /// Uniform pick from `list`, `None` when it is empty
    pub fn pick<'a, T>(&mut self, list: &'a [T]) -> Option<&'a T> {
        if list.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..list.len());
        list.get(index)
    }
}
