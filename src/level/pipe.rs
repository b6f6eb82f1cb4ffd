//! A single top/bottom obstacle pair and its geometry.

use crate::core::config::WorldConfig;
use crate::physics::Aabb;

/// Stable identifier handed to render factories for create/destroy calls.
pub type PipeId = u64;

/// One piece (top or bottom) of an obstacle pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipePiece {
    /// Length of the body measured from the floor (bottom) or ceiling (top).
    pub body_height: f64,
    /// Y position of the head, which caps the body at the gap.
    pub head_y: f64,
    pub is_bottom: bool,
}

/// Top and bottom pieces sharing one x position, with a gap between them.
#[derive(Debug, Clone, PartialEq)]
pub struct ObstaclePair {
    pub id: PipeId,
    x: f64,
    pub top: PipePiece,
    pub bottom: PipePiece,
    pub width: f64,
    passed: bool,
}

impl ObstaclePair {
    /// Build a pair whose gap of `gap_size` is centred `gap_center` above the floor.
    ///
    /// Body heights are clamped at zero, so a gap wider than the span yields
    /// empty pieces rather than negative ones.
    pub fn new(id: PipeId, x: f64, gap_center: f64, gap_size: f64, world: &WorldConfig) -> Self {
        let half_gap = gap_size * 0.5;
        let bottom_height = (gap_center - half_gap).max(0.0);
        let top_height = (world.vertical_span - gap_center - half_gap).max(0.0);
        let head_half = world.pipe_head_height * 0.5;

        Self {
            id,
            x,
            bottom: PipePiece {
                body_height: bottom_height,
                head_y: world.floor_y() + bottom_height - head_half,
                is_bottom: true,
            },
            top: PipePiece {
                body_height: top_height,
                head_y: world.ceiling_y() - top_height + head_half,
                is_bottom: false,
            },
            width: world.pipe_body_width,
            passed: false,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    /// Both pieces move together; there is no per-piece x.
    pub fn advance(&mut self, distance: f64) {
        self.x -= distance;
    }

    pub fn is_right_of(&self, flyer_x: f64) -> bool {
        self.x > flyer_x
    }

    pub fn is_left_of_or_at(&self, flyer_x: f64) -> bool {
        self.x <= flyer_x
    }

    pub fn is_past(&self, destroy_x: f64) -> bool {
        self.x < destroy_x
    }

    pub fn has_been_passed(&self) -> bool {
        self.passed
    }

    /// The piece a pass is credited through. Only the bottom piece counts so
    /// each pair scores once even though both pieces cross together.
    pub fn scoring_piece(&self) -> &PipePiece {
        &self.bottom
    }

    /// Mark the pair passed. Returns false if it was already counted.
    pub fn mark_passed(&mut self) -> bool {
        if self.passed || !self.scoring_piece().is_bottom {
            return false;
        }
        self.passed = true;
        true
    }

    pub fn pieces(&self) -> [&PipePiece; 2] {
        [&self.top, &self.bottom]
    }

    /// Collider for a piece's body, anchored at the floor or ceiling.
    pub fn body_bounds(&self, piece: &PipePiece, world: &WorldConfig) -> Aabb {
        let half_width = self.width * 0.5;
        let (min_y, max_y) = if piece.is_bottom {
            (world.floor_y(), world.floor_y() + piece.body_height)
        } else {
            (world.ceiling_y() - piece.body_height, world.ceiling_y())
        };
        Aabb::new(self.x - half_width, min_y, self.x + half_width, max_y)
    }

    /// Y of the gap centre in world coordinates.
    pub fn gap_center_y(&self, world: &WorldConfig) -> f64 {
        let gap_bottom = world.floor_y() + self.bottom.body_height;
        let gap_top = world.ceiling_y() - self.top.body_height;
        (gap_bottom + gap_top) * 0.5
    }
}
