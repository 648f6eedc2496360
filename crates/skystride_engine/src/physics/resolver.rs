//! Two-pass collision resolver for the camera body
//!
//! Run once per frame after the velocity integrator:
//!
//! 1. **Support and landing** finds the highest surface under the body's
//!    footprint that it may stand on, snaps it onto surfaces it fell through
//!    since last frame, and commits the support height.
//! 2. **Horizontal push-out** moves the body out of every overlapping
//!    collider it is not standing on, along the single horizontal axis of
//!    least penetration. The tested box reaches down to the step height, so
//!    anything too tall to step onto acts as a wall.
//!
//! Resolution is discrete. A body that closes on a collider faster than the
//! collider's thickness per frame can tunnel through its sides; only
//! vertical crossings of a top face are caught, by the landing test.
//!
//! Push-out is sequential in registration order. Deep overlaps with several
//! colliders may take more than one frame to settle.

use crate::core::CollisionConfig;
use crate::foundation::math::Vec3;
use super::body::CameraBody;
use super::bounds::Aabb;
use super::collider::Collidable;

/// Feet height carried from one resolved frame to the next
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameHistory {
    last_feet_y: f32,
    has_previous: bool,
}

impl FrameHistory {
    /// Forget the previous frame
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Previous feet height, or `current` on the first frame
    pub fn previous_feet_y(&self, current: f32) -> f32 {
        if self.has_previous { self.last_feet_y } else { current }
    }

    /// Store the feet height of a resolved frame
    pub fn record(&mut self, feet_y: f32) {
        self.last_feet_y = feet_y;
        self.has_previous = true;
    }

    /// Whether a frame has been recorded since the last reset
    pub fn has_previous(&self) -> bool {
        self.has_previous
    }
}

/// Horizontal push direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushAxis {
    /// Toward +X
    PosX,
    /// Toward -X
    NegX,
    /// Toward +Z
    PosZ,
    /// Toward -Z
    NegZ,
}

impl PushAxis {
    /// Offset of `magnitude` along this direction
    pub fn offset(self, magnitude: f32) -> Vec3 {
        match self {
            Self::PosX => Vec3::new(magnitude, 0.0, 0.0),
            Self::NegX => Vec3::new(-magnitude, 0.0, 0.0),
            Self::PosZ => Vec3::new(0.0, 0.0, magnitude),
            Self::NegZ => Vec3::new(0.0, 0.0, -magnitude),
        }
    }
}

/// Smallest horizontal push separating `body` from `obstacle`.
///
/// Candidates are tried in the order +X, -X, +Z, -Z; the first wins ties.
pub fn minimal_push(body: &Aabb, obstacle: &Aabb, epsilon: f32) -> (PushAxis, f32) {
    let candidates = [
        (PushAxis::PosX, obstacle.max.x - body.min.x + epsilon),
        (PushAxis::NegX, body.max.x - obstacle.min.x + epsilon),
        (PushAxis::PosZ, obstacle.max.z - body.min.z + epsilon),
        (PushAxis::NegZ, body.max.z - obstacle.min.z + epsilon),
    ];

    candidates
        .into_iter()
        .fold(candidates[0], |best, candidate| if candidate.1 < best.1 { candidate } else { best })
}

/// Outcome of one resolved frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolveReport {
    /// Top of the highest viable support, if any
    pub support_y: Option<f32>,
    /// Whether the body was snapped onto a surface it crossed
    pub landed: bool,
    /// Number of horizontal push-outs applied
    pub push_count: u32,
    /// Total horizontal correction
    pub push_displacement: Vec3,
}

/// Per-frame character collision resolver
#[derive(Debug, Clone)]
pub struct CollisionResolver {
    config: CollisionConfig,
    history: FrameHistory,
}

impl CollisionResolver {
    /// Create a resolver with no frame history
    pub fn new(config: CollisionConfig) -> Self {
        Self {
            config,
            history: FrameHistory::default(),
        }
    }

    /// Resolver settings
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Carried frame history
    pub fn history(&self) -> &FrameHistory {
        &self.history
    }

    /// Forget the previous frame, e.g. when entering a scene or teleporting
    pub fn reset(&mut self) {
        self.history.reset();
    }

    /// Resolve one frame: support pass, push-out pass, then record history
    pub fn resolve<'a, I, C>(&mut self, body: &mut CameraBody, colliders: I) -> ResolveReport
    where
        I: IntoIterator<Item = &'a C>,
        I::IntoIter: Clone,
        C: Collidable + ?Sized + 'a,
    {
        let colliders = colliders.into_iter();

        let (support_y, landed) = self.support_pass(body, colliders.clone());
        let (push_count, push_displacement) = self.push_out(body, colliders);

        self.history.record(body.feet_y());

        let report = ResolveReport {
            support_y,
            landed,
            push_count,
            push_displacement,
        };
        log::trace!("Resolved frame: {:?}", report);
        report
    }

    /// Pass 1: find support under the footprint and land on crossed tops.
    ///
    /// Returns the committed support height and whether a landing happened.
    pub fn support_pass<'a, I, C>(&self, body: &mut CameraBody, colliders: I) -> (Option<f32>, bool)
    where
        I: IntoIterator<Item = &'a C>,
        C: Collidable + ?Sized + 'a,
    {
        let mut feet_y = body.feet_y();
        let previous_feet_y = self.history.previous_feet_y(feet_y);
        let mut highest: Option<f32> = None;
        let mut landed = false;

        for collider in colliders {
            if !collider.is_active() {
                continue;
            }
            let bounds = collider.bounds();
            if !self.footprint_overlaps(body, &bounds) {
                continue;
            }

            let top = bounds.top();

            // Crossed the top face since last frame
            if previous_feet_y >= top && feet_y <= top {
                body.land_on(top);
                feet_y = top;
                landed = true;
                log::debug!("Landed on surface at {:.3}", top);
            }

            if feet_y >= top - self.config.max_step_height {
                highest = Some(highest.map_or(top, |h| h.max(top)));
            }
        }

        body.set_support_top(highest, self.config.epsilon);
        (highest, landed)
    }

    /// Pass 2: push the body horizontally out of overlapping colliders.
    ///
    /// Returns the total horizontal displacement applied.
    pub fn push_out_pass<'a, I, C>(&self, body: &mut CameraBody, colliders: I) -> Vec3
    where
        I: IntoIterator<Item = &'a C>,
        C: Collidable + ?Sized + 'a,
    {
        self.push_out(body, colliders).1
    }

    fn push_out<'a, I, C>(&self, body: &mut CameraBody, colliders: I) -> (u32, Vec3)
    where
        I: IntoIterator<Item = &'a C>,
        C: Collidable + ?Sized + 'a,
    {
        let epsilon = self.config.epsilon;
        let mut body_box = self.wall_box(body);
        let mut count = 0;
        let mut total = Vec3::zeros();

        for collider in colliders {
            if !collider.is_active() {
                continue;
            }
            let bounds = collider.bounds();
            if !bounds.intersects(&body_box) {
                continue;
            }

            // Standing on top never pushes sideways
            if body.feet_y() >= bounds.top() - epsilon {
                continue;
            }

            let (axis, magnitude) = minimal_push(&body_box, &bounds, epsilon);
            let offset = axis.offset(magnitude);
            body.translate(offset);
            body_box = self.wall_box(body);

            count += 1;
            total += offset;
            log::trace!("Pushed out along {:?} by {:.4}", axis, magnitude);
        }

        (count, total)
    }

    /// Body box extended down to `feet + max_step_height`
    fn wall_box(&self, body: &CameraBody) -> Aabb {
        let mut bounds = body.bounds();
        bounds.min.y = bounds.min.y.min(body.feet_y() + self.config.max_step_height);
        bounds
    }

    fn footprint_overlaps(&self, body: &CameraBody, bounds: &Aabb) -> bool {
        let reach_x = (body.half_extents.x - self.config.support_padding).max(0.0);
        let reach_z = (body.half_extents.z - self.config.support_padding).max(0.0);
        let p = body.position;

        p.x + reach_x >= bounds.min.x && p.x - reach_x <= bounds.max.x &&
        p.z + reach_z >= bounds.min.z && p.z - reach_z <= bounds.max.z
    }
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::new(CollisionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collider::StaticCollider;
    use approx::assert_relative_eq;

    const HALF: Vec3 = Vec3::new(0.4, 0.9, 0.4);
    const EYE: f32 = 1.7;

    fn body_with_feet(x: f32, feet: f32, z: f32) -> CameraBody {
        CameraBody::standing_at(Vec3::new(x, feet, z), EYE, HALF)
    }

    fn floor_box(top: f32) -> Aabb {
        Aabb::from_min_max(Vec3::new(-2.0, top - 1.0, -2.0), Vec3::new(2.0, top, 2.0))
    }

    #[test]
    fn test_standing_exactly_on_top_is_supported() {
        let mut resolver = CollisionResolver::default();
        let mut body = body_with_feet(0.0, 2.0, 0.0);

        let report = resolver.resolve(&mut body, &[floor_box(2.0)]);

        assert_eq!(report.support_y, Some(2.0));
        assert!(body.is_grounded());
        assert_eq!(body.support_y(), Some(2.0));
        assert_relative_eq!(body.feet_y(), 2.0, epsilon = 1e-6);
        assert_eq!(report.push_count, 0);
    }

    #[test]
    fn test_landing_snaps_and_stops_fall() {
        let mut resolver = CollisionResolver::default();
        let boxes = [floor_box(2.0)];

        let mut body = body_with_feet(0.0, 3.0, 0.0);
        resolver.resolve(&mut body, &boxes);
        assert!(!body.is_grounded());

        body.set_feet_y(1.5);
        body.vertical_velocity = -15.0;
        let report = resolver.resolve(&mut body, &boxes);

        assert!(report.landed);
        assert_relative_eq!(body.feet_y(), 2.0, epsilon = 1e-5);
        assert_eq!(body.vertical_velocity, 0.0);
        assert!(body.is_grounded());
    }

    #[test]
    fn test_step_height_separates_steps_from_walls() {
        let resolver = CollisionResolver::default();

        let mut on_step = body_with_feet(0.0, 1.0, 0.0);
        let (support, _) = resolver.support_pass(&mut on_step, &[floor_box(1.2)]);
        assert_eq!(support, Some(1.2));
        assert_relative_eq!(on_step.feet_y(), 1.2, epsilon = 1e-5);

        let mut at_wall = body_with_feet(0.0, 1.0, 0.0);
        let (support, _) = resolver.support_pass(&mut at_wall, &[floor_box(1.5)]);
        assert_eq!(support, None);
        assert_relative_eq!(at_wall.feet_y(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_highest_viable_support_wins() {
        let resolver = CollisionResolver::default();
        let mut body = body_with_feet(0.0, 1.0, 0.0);
        let boxes = [floor_box(0.5), floor_box(1.1), floor_box(0.9), floor_box(3.0)];

        let (support, _) = resolver.support_pass(&mut body, &boxes);
        assert_eq!(support, Some(1.1));
    }

    #[test]
    fn test_support_ignores_edge_contact_within_padding() {
        let resolver = CollisionResolver::default();
        // Footprint reaches x = 0.4; the box starts at 0.38, inside the 0.05 padding
        let ledge = Aabb::from_min_max(Vec3::new(0.38, 0.0, -2.0), Vec3::new(3.0, 1.0, 2.0));
        let mut body = body_with_feet(0.0, 1.0, 0.0);

        let (support, _) = resolver.support_pass(&mut body, &[ledge]);
        assert_eq!(support, None);

        let mut closer = body_with_feet(0.1, 1.0, 0.0);
        let (support, _) = resolver.support_pass(&mut closer, &[ledge]);
        assert_eq!(support, Some(1.0));
    }

    #[test]
    fn test_push_out_uses_smallest_penetration() {
        let resolver = CollisionResolver::default();
        // Body spans x in [-0.5, 0.3]; the wall starts at 0 (0.3 overlap on its -X face)
        // and ends at 0.7 (1.2 to clear through +X)
        let wall = Aabb::from_min_max(Vec3::new(0.0, 0.0, -2.0), Vec3::new(0.7, 3.0, 2.0));
        let mut body = body_with_feet(-0.1, 0.0, 0.0);

        let moved = resolver.push_out_pass(&mut body, &[wall]);

        assert_relative_eq!(moved, Vec3::new(-0.301, 0.0, 0.0), epsilon = 1e-5);
        assert!(!body.bounds().intersects(&wall));
    }

    #[test]
    fn test_push_out_is_idempotent() {
        let resolver = CollisionResolver::default();
        let wall = Aabb::from_min_max(Vec3::new(0.0, 0.0, -2.0), Vec3::new(0.7, 3.0, 2.0));
        let mut body = body_with_feet(-0.1, 0.0, 0.0);

        resolver.push_out_pass(&mut body, &[wall]);
        let settled = body.position;
        let second = resolver.push_out_pass(&mut body, &[wall]);

        assert_eq!(second, Vec3::zeros());
        assert_eq!(body.position, settled);
    }

    #[test]
    fn test_push_out_along_z() {
        let resolver = CollisionResolver::default();
        let wall = Aabb::from_min_max(Vec3::new(-5.0, 0.0, 0.2), Vec3::new(5.0, 3.0, 1.0));
        let mut body = body_with_feet(0.0, 0.0, 0.0);

        let moved = resolver.push_out_pass(&mut body, &[wall]);
        assert_relative_eq!(moved, Vec3::new(0.0, 0.0, -0.201), epsilon = 1e-5);
    }

    #[test]
    fn test_standing_on_top_is_not_pushed() {
        let resolver = CollisionResolver::default();
        let crate_box = Aabb::from_min_max(Vec3::new(-0.5, 0.0, -0.5), Vec3::new(0.5, 1.0, 0.5));
        // Box reaching below the feet so the crate top sits inside it
        let mut body = CameraBody::standing_at(Vec3::new(0.2, 1.0, 0.0), EYE, Vec3::new(0.4, 2.0, 0.4));
        assert!(crate_box.intersects(&body.bounds()));

        let moved = resolver.push_out_pass(&mut body, &[crate_box]);
        assert_eq!(moved, Vec3::zeros());

        body.set_feet_y(0.5);
        let moved = resolver.push_out_pass(&mut body, &[crate_box]);
        assert!(moved.x > 0.0);
    }

    #[test]
    fn test_low_box_above_step_height_is_a_wall() {
        let mut resolver = CollisionResolver::default();
        // Top at feet + 0.5 sits below the eye-centred box, which starts at feet + 0.8
        let low_box = Aabb::from_min_max(Vec3::new(0.2, 0.0, -1.0), Vec3::new(1.0, 0.5, 1.0));
        let mut body = body_with_feet(0.0, 0.0, 0.0);
        assert!(!low_box.intersects(&body.bounds()));

        let report = resolver.resolve(&mut body, &[low_box]);

        assert_eq!(report.support_y, None);
        assert_eq!(report.push_count, 1);
        assert_relative_eq!(report.push_displacement, Vec3::new(-0.201, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(body.feet_y(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_box_within_step_height_is_not_a_wall() {
        let mut resolver = CollisionResolver::default();
        let step = Aabb::from_min_max(Vec3::new(0.38, 0.0, -1.0), Vec3::new(1.0, 0.3, 1.0));
        let mut body = body_with_feet(0.0, 0.0, 0.0);

        let report = resolver.resolve(&mut body, &[step]);

        assert_eq!(report.push_count, 0);
        assert_eq!(body.position.x, 0.0);
    }

    #[test]
    fn test_sequential_push_against_two_walls() {
        let mut resolver = CollisionResolver::default();
        let east = Aabb::from_min_max(Vec3::new(0.2, 0.0, -5.0), Vec3::new(1.0, 3.0, 5.0));
        let north = Aabb::from_min_max(Vec3::new(-5.0, 0.0, 0.3), Vec3::new(5.0, 3.0, 1.0));
        let mut body = body_with_feet(0.0, 0.0, 0.0);

        let report = resolver.resolve(&mut body, &[east, north]);

        assert_eq!(report.push_count, 2);
        assert!(!body.bounds().intersects(&east));
        assert!(!body.bounds().intersects(&north));
    }

    #[test]
    fn test_inactive_colliders_are_ignored() {
        let mut resolver = CollisionResolver::default();
        let mut wall = StaticCollider::new(Aabb::from_min_max(
            Vec3::new(0.0, 0.0, -2.0),
            Vec3::new(0.7, 3.0, 2.0),
        ));
        wall.set_active(false);
        let mut body = body_with_feet(-0.1, 0.0, 0.0);
        let before = body.position;

        let report = resolver.resolve(&mut body, &[wall]);
        assert_eq!(report.push_count, 0);
        assert_eq!(body.position, before);
    }

    #[test]
    fn test_history_records_resolved_feet() {
        let mut resolver = CollisionResolver::default();
        assert!(!resolver.history().has_previous());

        let mut body = body_with_feet(0.0, 2.0, 0.0);
        resolver.resolve(&mut body, &[floor_box(2.0)]);
        assert!(resolver.history().has_previous());
        assert_relative_eq!(resolver.history().previous_feet_y(0.0), 2.0, epsilon = 1e-6);

        resolver.reset();
        assert_eq!(resolver.history().previous_feet_y(7.0), 7.0);
    }

    #[test]
    fn test_minimal_push_prefers_first_on_ties() {
        let body = Aabb::from_center_half_extents(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let same = body;
        let (axis, magnitude) = minimal_push(&body, &same, 0.0);
        assert_eq!(axis, PushAxis::PosX);
        assert_relative_eq!(magnitude, 2.0, epsilon = 1e-6);
    }
}
