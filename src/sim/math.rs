//! Colour and rectangle primitives
//!
//! Vectors come from `glam`; these fill in the few value types it lacks.

use std::ops::Mul;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA colour with normalized components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const GREY: Color = Color::new(0.5, 0.5, 0.5, 1.0);
    pub const RED: Color = Color::new(1.0, 0.2, 0.2, 1.0);
    pub const TAN: Color = Color::new(0.8, 0.6, 0.2, 1.0);
    pub const GREEN: Color = Color::new(0.2, 1.0, 0.2, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Clamp every channel into [0, 1]
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    /// Pack into 8-bit RGBA
    pub fn to_rgba8(self) -> [u8; 4] {
        let c = self.clamped();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
            (c.a * 255.0).round() as u8,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::GREY
    }
}

/// Scales RGB, leaves alpha alone
impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, s: f32) -> Color {
        Color::new(self.r * s, self.g * s, self.b * s, self.a)
    }
}

/// Axis-aligned rectangle (top-left position + size)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    pub fn min(&self) -> Vec2 {
        self.position
    }

    pub fn max(&self) -> Vec2 {
        self.position + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Expand (or shrink, for negative `border`) on every side
    pub fn grow(&self, border: f32) -> Self {
        Self {
            position: self.position - Vec2::splat(border),
            size: self.size + Vec2::splat(border * 2.0),
        }
    }

    /// Clamp a point into the rectangle
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min(), self.max())
    }
}
