//! Sprite state and per-frame motion.
//!
//! Each frame runs two phases in fixed order: the input phase (`nudge`,
//! direct keyboard displacement, clamped to the window) and the physics phase
//! (`step`, one velocity step plus boundary reflection). Displacement is
//! exactly the current velocity each frame; presentation pacing is the time
//! step, so there is no delta-time scaling anywhere in here.

use glam::{Mat4, Vec2, Vec3};

use crate::rng::Rng;

/// Window extents in pixels, the space the sprite bounces inside.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Pixel extents of the sprite's image.
    pub width: u32,
    pub height: u32,
}

impl Sprite {
    pub fn new(width: u32, height: u32, position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            width,
            height,
        }
    }

    /// Model matrix, derived from position alone. Computed fresh on every
    /// call so it can never go stale against the position it translates to.
    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(self.position.x, self.position.y, 0.0))
    }

    /// Side of the square the sprite is rasterized into, in pixels.
    pub fn point_size(&self) -> f32 {
        self.width.max(self.height) as f32
    }

    /// Physics phase: advance by one velocity step, reflecting off window
    /// edges. At most one reflection per axis per step; the overshot position
    /// is committed as-is and the reflected velocity brings it back inside on
    /// the next step.
    pub fn step(&mut self, bounds: Bounds) {
        let next = self.position + self.velocity;

        // Bounce margins are tuned to the logo art's visible footprint, not
        // the image extents: 60px inset horizontally, and an extra 5px below
        // the half-height on the bottom edge only.
        let margin_x = self.width as f32 - 60.0;
        let half_h = self.height as f32 / 2.0;

        if next.x + margin_x >= bounds.width || next.x - margin_x <= 0.0 {
            self.velocity.x = -self.velocity.x;
        }
        if next.y + half_h + 5.0 >= bounds.height || next.y - half_h <= 0.0 {
            self.velocity.y = -self.velocity.y;
        }

        self.position = next;
    }

    /// Input phase: direct keyboard displacement, independent of velocity.
    /// The result is clamped so a manual move can never push the sprite out
    /// of the window.
    pub fn nudge(&mut self, delta: Vec2, bounds: Bounds) {
        let half_w = self.width as f32 / 2.0;
        let half_h = self.height as f32 / 2.0;
        let moved = self.position + delta;
        self.position = Vec2::new(
            moved.x.clamp(0.0, bounds.width - half_w),
            moved.y.clamp(0.0, bounds.height - half_h),
        );
    }
}

/// Randomized launch velocity: both axes drawn from the positive sub-range
/// `[0.2, 1.325)`, normalized, then scaled to `speed`. Components are never
/// zero, so the sprite always starts moving down-and-right and never stalls.
pub fn launch_velocity(rng: &mut Rng, speed: f32) -> Vec2 {
    let x = 0.2 + rng.next_f32() * 1.125;
    let y = 0.2 + rng.next_f32() * 1.125;
    Vec2::new(x, y).normalize() * speed
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Bounds = Bounds {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn test_step_away_from_edges_adds_velocity_only() {
        let mut sprite = Sprite::new(64, 64, Vec2::new(400.0, 300.0), Vec2::new(5.0, 5.0));
        sprite.step(WINDOW);
        assert_eq!(sprite.position, Vec2::new(405.0, 305.0));
        assert_eq!(sprite.velocity, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_step_left_edge_reflects_x_and_commits_overshoot() {
        // margin_x = 64 - 60 = 4, so 4 - 5 - 4 = -5 <= 0 trips the left
        // predicate; the overshot x = -1 is committed, not clamped.
        let mut sprite = Sprite::new(64, 64, Vec2::new(4.0, 300.0), Vec2::new(-5.0, 0.0));
        sprite.step(WINDOW);
        assert_eq!(sprite.position, Vec2::new(-1.0, 300.0));
        assert_eq!(sprite.velocity, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_step_right_edge_reflects_x() {
        // margin_x = 128 - 60 = 68; 731 + 2 + 68 = 801 >= 800.
        let mut sprite = Sprite::new(128, 64, Vec2::new(731.0, 300.0), Vec2::new(2.0, 0.0));
        sprite.step(WINDOW);
        assert_eq!(sprite.position, Vec2::new(733.0, 300.0));
        assert_eq!(sprite.velocity, Vec2::new(-2.0, 0.0));
    }

    #[test]
    fn test_step_top_edge_reflects_y_without_extra_margin() {
        // Top predicate is y - h/2 <= 0 with no 5px pad: 33 - 2 - 32 <= 0.
        let mut sprite = Sprite::new(64, 64, Vec2::new(400.0, 33.0), Vec2::new(0.0, -2.0));
        sprite.step(WINDOW);
        assert_eq!(sprite.position, Vec2::new(400.0, 31.0));
        assert_eq!(sprite.velocity, Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_step_bottom_edge_uses_extra_margin() {
        // Bottom predicate pads the half-height by 5: 561 + 2 + 32 + 5 = 600.
        let mut sprite = Sprite::new(64, 64, Vec2::new(400.0, 561.0), Vec2::new(0.0, 2.0));
        sprite.step(WINDOW);
        assert_eq!(sprite.position, Vec2::new(400.0, 563.0));
        assert_eq!(sprite.velocity, Vec2::new(0.0, -2.0));

        // One pixel higher and the same step does not reflect.
        let mut sprite = Sprite::new(64, 64, Vec2::new(400.0, 560.0), Vec2::new(0.0, 2.0));
        sprite.step(WINDOW);
        assert_eq!(sprite.velocity, Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_step_corner_reflects_both_axes_once() {
        // 128x64 sprite heading into the bottom-right corner: both axis
        // predicates trip in the same step, each negating its component
        // exactly once, and the position still commits to p + v.
        let mut sprite = Sprite::new(128, 64, Vec2::new(730.0, 560.0), Vec2::new(3.0, 3.0));
        sprite.step(WINDOW);
        assert_eq!(sprite.position, Vec2::new(733.0, 563.0));
        assert_eq!(sprite.velocity, Vec2::new(-3.0, -3.0));
    }

    #[test]
    fn test_reflection_returns_inside_margin_next_step() {
        // Once v.x is negated at the right margin, the following step moves
        // the sprite back inside and must not negate again.
        let mut sprite = Sprite::new(128, 64, Vec2::new(730.0, 300.0), Vec2::new(3.0, 0.0));
        sprite.step(WINDOW);
        assert_eq!(sprite.velocity, Vec2::new(-3.0, 0.0));

        sprite.step(WINDOW);
        assert_eq!(sprite.position, Vec2::new(730.0, 300.0));
        assert_eq!(sprite.velocity, Vec2::new(-3.0, 0.0));
    }

    #[test]
    fn test_speed_preserved_across_many_steps() {
        // Reflection only flips signs, so each component's magnitude is
        // bit-for-bit stable no matter how many bounces happen.
        let mut rng = Rng::seeded(99);
        let velocity = launch_velocity(&mut rng, 4.0);
        let mut sprite = Sprite::new(128, 64, Vec2::new(400.0, 300.0), velocity);

        for _ in 0..10_000 {
            sprite.step(WINDOW);
            assert_eq!(sprite.velocity.x.abs(), velocity.x.abs());
            assert_eq!(sprite.velocity.y.abs(), velocity.y.abs());
            assert_ne!(sprite.velocity.x, 0.0);
            assert_ne!(sprite.velocity.y, 0.0);
        }
    }

    #[test]
    fn test_nudge_moves_freely_inside_window() {
        let mut sprite = Sprite::new(64, 64, Vec2::new(400.0, 300.0), Vec2::ZERO);
        sprite.nudge(Vec2::new(4.0, -4.0), WINDOW);
        assert_eq!(sprite.position, Vec2::new(404.0, 296.0));
    }

    #[test]
    fn test_nudge_clamps_to_window() {
        let mut sprite = Sprite::new(64, 64, Vec2::new(790.0, 590.0), Vec2::ZERO);
        sprite.nudge(Vec2::new(20.0, 20.0), WINDOW);
        // Clamp range is [0, W - w/2] x [0, H - h/2].
        assert_eq!(sprite.position, Vec2::new(768.0, 568.0));

        let mut sprite = Sprite::new(64, 64, Vec2::new(2.0, 2.0), Vec2::ZERO);
        sprite.nudge(Vec2::new(-10.0, -10.0), WINDOW);
        assert_eq!(sprite.position, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_transform_translates_by_position() {
        let sprite = Sprite::new(64, 64, Vec2::new(123.0, 456.0), Vec2::ZERO);
        let cols = sprite.transform().to_cols_array();
        assert_eq!(cols[12], 123.0);
        assert_eq!(cols[13], 456.0);
        assert_eq!(cols[14], 0.0);
        assert_eq!(cols[15], 1.0);
    }

    #[test]
    fn test_transform_tracks_position_changes() {
        let mut sprite = Sprite::new(64, 64, Vec2::new(400.0, 300.0), Vec2::new(5.0, 5.0));
        sprite.step(WINDOW);
        let cols = sprite.transform().to_cols_array();
        assert_eq!(cols[12], 405.0);
        assert_eq!(cols[13], 305.0);
    }

    #[test]
    fn test_point_size_is_max_extent() {
        assert_eq!(Sprite::new(128, 64, Vec2::ZERO, Vec2::ZERO).point_size(), 128.0);
        assert_eq!(Sprite::new(64, 64, Vec2::ZERO, Vec2::ZERO).point_size(), 64.0);
    }

    #[test]
    fn test_launch_velocity_heads_down_right_at_speed() {
        let mut rng = Rng::seeded(5);
        for _ in 0..100 {
            let v = launch_velocity(&mut rng, 4.0);
            assert!(v.x > 0.0, "x component must be positive: {v:?}");
            assert!(v.y > 0.0, "y component must be positive: {v:?}");
            assert!((v.length() - 4.0).abs() < 1e-4, "speed drifted: {v:?}");
        }
    }

    #[test]
    fn test_launch_velocity_is_deterministic_per_seed() {
        let mut a = Rng::seeded(21);
        let mut b = Rng::seeded(21);
        assert_eq!(launch_velocity(&mut a, 4.0), launch_velocity(&mut b, 4.0));
    }
}
