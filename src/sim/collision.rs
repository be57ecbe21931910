//! Circle overlap tests and nearest-candidate tracking
//!
//! Every entity collides as a circle. Touching counts as colliding.

use glam::Vec2;

/// True when two circles overlap or touch
#[inline]
pub fn circles_collide(p1: Vec2, r1: f32, p2: Vec2, r2: f32) -> bool {
    p1.distance(p2) <= r1 + r2
}

/// Tracks the candidate closest to a reference point.
///
/// Candidates are offered in storage order; a later candidate only wins with a
/// strictly smaller distance, so ties go to whichever was offered first.
#[derive(Debug, Clone, Copy)]
pub struct Nearest {
    origin: Vec2,
    best: Option<(usize, f32)>,
}

impl Nearest {
    pub fn new(origin: Vec2) -> Self {
        Self { origin, best: None }
    }

    pub fn offer(&mut self, index: usize, position: Vec2) {
        let distance = self.origin.distance(position);
        match self.best {
            Some((_, best)) if distance >= best => {}
            _ => self.best = Some((index, distance)),
        }
    }

    pub fn index(&self) -> Option<usize> {
        self.best.map(|(index, _)| index)
    }
}
