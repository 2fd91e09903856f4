use glam::Vec2;

use crate::{
    math::heading_from_velocity,
    params::{FlockParameters, WorldBounds},
    registry::FlockRegistry,
};

/// An individually simulated flocking entity.
///
/// Heading is derived state: it always reflects the direction of the last
/// nonzero velocity (see [`heading_from_velocity`] for the convention).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Agent {
    pub position: Vec2,
    pub velocity: Vec2,
    pub heading: f32,
}

impl Agent {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        let mut agent = Agent {
            position,
            velocity,
            heading: 0.,
        };
        agent.face_heading();
        agent
    }

    /// Displacement toward the centroid of all flockmates within the
    /// cohesion radius. Un-normalised; zero vector when no neighbour
    /// qualifies.
    ///
    /// The `distance > 0` test excludes the agent's own registry entry as
    /// well as any exactly coincident neighbour.
    pub fn cohesion(&self, registry: &FlockRegistry, params: &FlockParameters) -> Vec2 {
        let mut sum = Vec2::ZERO;
        let mut count = 0;

        for other in registry.entries() {
            let distance = self.position.distance(other.position);
            if distance > 0. && distance < params.cohesion_radius {
                sum += other.position;
                count += 1;
            }
        }

        if count > 0 {
            sum / count as f32 - self.position
        } else {
            Vec2::ZERO
        }
    }

    /// Average velocity of flockmates within the cohesion radius, clamped
    /// to unit magnitude. Sharing the cohesion neighbourhood instead of
    /// using a radius of its own is deliberate.
    pub fn alignment(&self, registry: &FlockRegistry, params: &FlockParameters) -> Vec2 {
        let mut sum = Vec2::ZERO;
        let mut count = 0;

        for other in registry.entries() {
            let distance = self.position.distance(other.position);
            if distance > 0. && distance < params.cohesion_radius {
                sum += other.velocity;
                count += 1;
            }
        }

        if count > 0 {
            (sum / count as f32).clamp_length_max(1.)
        } else {
            Vec2::ZERO
        }
    }

    /// Repulsion from flockmates within the separation radius, weighted
    /// inversely by distance and averaged over the neighbour count. Close
    /// neighbours push much harder than distant ones.
    pub fn separation(&self, registry: &FlockRegistry, params: &FlockParameters) -> Vec2 {
        let mut sum = Vec2::ZERO;
        let mut count = 0;

        for other in registry.entries() {
            let distance = self.position.distance(other.position);
            if distance > 0. && distance < params.separation_radius {
                sum += (self.position - other.position).normalize() / distance;
                count += 1;
            }
        }

        if count > 0 {
            sum / count as f32
        } else {
            Vec2::ZERO
        }
    }

    /// Weighted combination of the three rules, vector-clamped to the
    /// configured maximum acceleration (direction preserved).
    pub fn steering(&self, registry: &FlockRegistry, params: &FlockParameters) -> Vec2 {
        let mut acceleration = self.cohesion(registry, params) * params.cohesion_weight;
        acceleration += self.alignment(registry, params) * params.alignment_weight;
        acceleration += self.separation(registry, params) * params.separation_weight;

        acceleration.clamp_length_max(params.max_acceleration)
    }

    /// Velocity half of the motion sub-step: mass is 1 for every agent, so
    /// the acceleration contributes directly as `velocity += accel * dt`.
    pub fn apply_acceleration(&mut self, acceleration: Vec2, dt: f32) {
        self.velocity += acceleration * dt;
        self.face_heading();
    }

    /// Position half of the motion sub-step.
    pub fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    // A zero velocity has no direction, so the previous heading is kept.
    fn face_heading(&mut self) {
        if self.velocity != Vec2::ZERO {
            self.heading = heading_from_velocity(self.velocity);
        }
    }

    /// Toroidal wrap: leaving one edge re-enters at the opposite edge.
    ///
    /// Each axis is corrected at most once per tick. A crossing that
    /// overshoots by more than one world size is left partially outside on
    /// purpose; the next tick picks it up.
    pub fn wrap(&mut self, bounds: &WorldBounds) {
        if self.position.x < bounds.left {
            self.position.x += bounds.width;
        } else if self.position.x > bounds.right {
            self.position.x -= bounds.width;
        }

        if self.position.y < bounds.bottom {
            self.position.y += bounds.height;
        } else if self.position.y > bounds.top {
            self.position.y -= bounds.height;
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::Vec2;
    use rstest::rstest;

    use super::Agent;
    use crate::{
        params::{FlockParameters, WorldBounds},
        registry::FlockRegistry,
    };

    macro_rules! assert_eqf32 {
        ($x:expr, $y:expr) => {
            assert_relative_eq!($x, $y, epsilon = 1e-4_f32)
        };
    }

    fn registry_of(agents: &[Agent]) -> FlockRegistry {
        let mut registry = FlockRegistry::with_capacity(agents.len());
        for agent in agents {
            registry.register(agent);
        }
        registry
    }

    fn still_agent(x: f32, y: f32) -> Agent {
        Agent::new(Vec2::new(x, y), Vec2::ZERO)
    }

    #[test]
    fn all_rules_are_zero_without_neighbours() {
        let params = FlockParameters::default();
        let subject = Agent::new(Vec2::ZERO, Vec2::new(0., 5.));
        // only the subject's own entry, excluded by the distance > 0 test
        let registry = registry_of(&[subject]);

        assert_eq!(subject.cohesion(&registry, &params), Vec2::ZERO);
        assert_eq!(subject.alignment(&registry, &params), Vec2::ZERO);
        assert_eq!(subject.separation(&registry, &params), Vec2::ZERO);
        assert_eq!(subject.steering(&registry, &params), Vec2::ZERO);
    }

    #[test]
    fn coincident_neighbour_is_excluded_everywhere() {
        let params = FlockParameters::default();
        let subject = Agent::new(Vec2::new(3., 3.), Vec2::new(1., 0.));
        let twin = Agent::new(Vec2::new(3., 3.), Vec2::new(0., 1.));
        let registry = registry_of(&[subject, twin]);

        assert_eq!(subject.cohesion(&registry, &params), Vec2::ZERO);
        assert_eq!(subject.alignment(&registry, &params), Vec2::ZERO);
        assert_eq!(subject.separation(&registry, &params), Vec2::ZERO);
    }

    #[test]
    fn cohesion_targets_cluster_centroid_and_ignores_outlier() {
        let params = FlockParameters {
            cohesion_radius: 30.,
            ..Default::default()
        };
        let subject = still_agent(0., 0.);
        let flock = [
            subject,
            still_agent(10., 0.),
            still_agent(0., 10.),
            // well outside the cohesion radius
            still_agent(1000., 0.),
        ];
        let registry = registry_of(&flock);

        let cohesion = subject.cohesion(&registry, &params);

        assert_eqf32!(cohesion.x, 5.);
        assert_eqf32!(cohesion.y, 5.);
    }

    #[test]
    fn alignment_magnitude_never_exceeds_one() {
        let params = FlockParameters::default();
        let subject = still_agent(0., 0.);
        let flock = [
            subject,
            Agent::new(Vec2::new(5., 0.), Vec2::new(4000., -300.)),
            Agent::new(Vec2::new(0., 5.), Vec2::new(-20., 9999.)),
        ];
        let registry = registry_of(&flock);

        let alignment = subject.alignment(&registry, &params);

        assert!(alignment.length() <= 1. + f32::EPSILON);
        assert!(alignment.length() > 0.);
    }

    #[rstest]
    #[case(5., true)]
    #[case(25., false)]
    fn separation_respects_radius(#[case] distance: f32, #[case] expect_repulsion: bool) {
        let params = FlockParameters {
            separation_radius: 20.,
            ..Default::default()
        };
        let a = still_agent(0., 0.);
        let b = still_agent(distance, 0.);
        let registry = registry_of(&[a, b]);

        let sep_a = a.separation(&registry, &params);
        let sep_b = b.separation(&registry, &params);

        if expect_repulsion {
            // a sits left of b, so a is pushed further left and b further right
            assert!(sep_a.x < 0.);
            assert!(sep_b.x > 0.);
            assert_eqf32!(sep_a.x, -sep_b.x);
        } else {
            assert_eq!(sep_a, Vec2::ZERO);
            assert_eq!(sep_b, Vec2::ZERO);
        }
    }

    #[test]
    fn separation_weights_closer_neighbours_harder() {
        let params = FlockParameters {
            separation_radius: 20.,
            ..Default::default()
        };
        let subject = still_agent(0., 0.);
        let near = registry_of(&[subject, still_agent(2., 0.)]);
        let far = registry_of(&[subject, still_agent(10., 0.)]);

        let push_near = subject.separation(&near, &params).length();
        let push_far = subject.separation(&far, &params).length();

        assert!(push_near > push_far);
        assert_eqf32!(push_near, 1. / 2.);
        assert_eqf32!(push_far, 1. / 10.);
    }

    #[test]
    fn steering_magnitude_is_clamped() {
        let params = FlockParameters {
            cohesion_weight: 1e6,
            alignment_weight: 1e6,
            separation_weight: 1e6,
            max_acceleration: 650.,
            ..Default::default()
        };
        let subject = still_agent(0., 0.);
        let flock = [
            subject,
            Agent::new(Vec2::new(1., 1.), Vec2::new(500., 500.)),
            Agent::new(Vec2::new(-2., 3.), Vec2::new(-100., 0.)),
        ];
        let registry = registry_of(&flock);

        let acceleration = subject.steering(&registry, &params);

        assert!(acceleration.length() <= params.max_acceleration * (1. + 1e-5));
        assert!(acceleration.length() > 0.);
    }

    #[test]
    fn acceleration_updates_velocity_and_heading() {
        let mut agent = Agent::new(Vec2::ZERO, Vec2::new(0., 10.));
        assert_eqf32!(agent.heading, 0.);

        agent.apply_acceleration(Vec2::new(500., -500.), 0.02);

        assert_eqf32!(agent.velocity.x, 10.);
        assert_eqf32!(agent.velocity.y, 0.);
        assert_eqf32!(agent.heading, -std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn zero_velocity_keeps_previous_heading() {
        let mut agent = Agent::new(Vec2::ZERO, Vec2::new(1., 0.));
        let heading_before = agent.heading;

        // cancel the velocity exactly
        agent.apply_acceleration(Vec2::new(-50., 0.), 0.02);

        assert_eq!(agent.velocity, Vec2::ZERO);
        assert_eqf32!(agent.heading, heading_before);
    }

    #[test]
    fn wrap_is_a_noop_inside_bounds() {
        let bounds = WorldBounds::from_viewport(100., 100.);
        let mut agent = still_agent(49.9, -50.);

        agent.wrap(&bounds);

        assert_eq!(agent.position, Vec2::new(49.9, -50.));
    }

    #[rstest]
    // right + eps wraps to left + eps
    #[case(Vec2::new(55., 0.), Vec2::new(-45., 0.))]
    // left - eps wraps to right - eps
    #[case(Vec2::new(-55., 0.), Vec2::new(45., 0.))]
    // top and bottom behave the same way
    #[case(Vec2::new(0., 62.5), Vec2::new(0., -37.5))]
    #[case(Vec2::new(0., -62.5), Vec2::new(0., 37.5))]
    // both axes can be corrected in the same tick
    #[case(Vec2::new(51., -51.), Vec2::new(-49., 49.))]
    fn wrap_round_trips_across_edges(#[case] start: Vec2, #[case] expected: Vec2) {
        let bounds = WorldBounds::from_viewport(100., 100.);
        let mut agent = Agent::new(start, Vec2::ZERO);

        agent.wrap(&bounds);

        assert_eqf32!(agent.position.x, expected.x);
        assert_eqf32!(agent.position.y, expected.y);
    }

    #[test]
    fn wrap_corrects_each_axis_at_most_once() {
        let bounds = WorldBounds::from_viewport(100., 100.);
        // more than one full world size out; a single correction cannot
        // bring it back inside and must not be retried this tick
        let mut agent = still_agent(175., 0.);

        agent.wrap(&bounds);

        assert_eqf32!(agent.position.x, 75.);
    }
}
