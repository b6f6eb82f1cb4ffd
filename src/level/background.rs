//! Scrolling background layers.
//!
//! Ground segments form a looping belt: a segment that leaves on the left is
//! moved to the right end instead of being destroyed. Clouds are a spawning
//! layer: they are destroyed past the threshold and new ones appear on a timer.

use crate::core::config::BackgroundConfig;
use rand::Rng;
use tracing::debug;

/// Cloud sprite variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloudVariant {
    Small,
    Medium,
    Large,
}

impl CloudVariant {
    pub const ALL: [CloudVariant; 3] = [
        CloudVariant::Small,
        CloudVariant::Medium,
        CloudVariant::Large,
    ];

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Width in world units, used by renderers.
    pub fn width(&self) -> f64 {
        match self {
            Self::Small => 24.0,
            Self::Medium => 36.0,
            Self::Large => 48.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Ground,
    Cloud(CloudVariant),
}

/// One positioned background piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x: f64,
    pub y: f64,
    pub kind: SegmentKind,
}

fn scroll(segments: &mut [Segment], distance: f64) {
    for segment in segments {
        segment.x -= distance;
    }
}

/// Ground belt: a fixed set of segments recycled end to end.
#[derive(Debug, Clone)]
pub struct LoopingLayer {
    segments: Vec<Segment>,
    segment_width: f64,
    destroy_x: f64,
    speed_multiplier: f64,
}

impl LoopingLayer {
    /// Lay `count` segments edge to edge starting at x = 0.
    pub fn new(
        count: usize,
        segment_width: f64,
        y: f64,
        destroy_x: f64,
        speed_multiplier: f64,
    ) -> Self {
        let segments = (0..count)
            .map(|i| Segment {
                x: i as f64 * segment_width,
                y,
                kind: SegmentKind::Ground,
            })
            .collect();
        Self {
            segments,
            segment_width,
            destroy_x,
            speed_multiplier,
        }
    }

    pub fn ground(config: &BackgroundConfig, floor_y: f64) -> Self {
        Self::new(
            config.ground_segment_count,
            config.ground_segment_width,
            floor_y,
            config.ground_destroy_x,
            config.ground_speed_multiplier,
        )
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_width(&self) -> f64 {
        self.segment_width
    }

    /// Total length of the belt.
    pub fn belt_length(&self) -> f64 {
        self.segments.len() as f64 * self.segment_width
    }

    /// Scroll left and relocate expired segments behind the rightmost one.
    /// Returns how many segments were relocated.
    pub fn advance(&mut self, base_speed: f64, dt: f64) -> usize {
        scroll(&mut self.segments, base_speed * self.speed_multiplier * dt);

        let mut relocated = 0;
        for i in 0..self.segments.len() {
            if self.segments[i].x < self.destroy_x {
                let rightmost = self
                    .segments
                    .iter()
                    .map(|s| s.x)
                    .fold(f64::NEG_INFINITY, f64::max);
                self.segments[i].x = rightmost + self.segment_width;
                relocated += 1;
            }
        }
        if relocated > 0 {
            debug!(relocated, "ground segments recycled");
        }
        relocated
    }
}

/// What a spawning layer did during one advance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerUpdate {
    pub spawned: Vec<CloudVariant>,
    pub destroyed: usize,
}

/// Cloud layer: destroyed past the threshold, respawned on its own timer.
#[derive(Debug, Clone)]
pub struct SpawningLayer {
    segments: Vec<Segment>,
    spawn_x: f64,
    y: f64,
    destroy_x: f64,
    speed_multiplier: f64,
    spawn_interval: f64,
    timer: f64,
}

impl SpawningLayer {
    pub fn clouds(config: &BackgroundConfig) -> Self {
        Self {
            segments: Vec::new(),
            spawn_x: config.cloud_spawn_x,
            y: config.cloud_y,
            destroy_x: config.cloud_destroy_x,
            speed_multiplier: config.cloud_speed_multiplier,
            spawn_interval: config.cloud_spawn_interval,
            timer: config.cloud_spawn_interval,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn timer(&self) -> f64 {
        self.timer
    }

    /// Place a cloud immediately, e.g. to populate the sky at level start.
    pub fn spawn_at(&mut self, x: f64, variant: CloudVariant) {
        self.segments.push(Segment {
            x,
            y: self.y,
            kind: SegmentKind::Cloud(variant),
        });
    }

    pub fn advance<R: Rng>(&mut self, base_speed: f64, dt: f64, rng: &mut R) -> LayerUpdate {
        let mut update = LayerUpdate::default();

        scroll(&mut self.segments, base_speed * self.speed_multiplier * dt);

        let before = self.segments.len();
        let destroy_x = self.destroy_x;
        self.segments.retain(|s| s.x >= destroy_x);
        update.destroyed = before - self.segments.len();

        self.timer -= dt;
        while self.timer <= 0.0 {
            self.timer += self.spawn_interval;
            let variant = CloudVariant::random(rng);
            self.spawn_at(self.spawn_x, variant);
            update.spawned.push(variant);
        }

        update
    }
}
