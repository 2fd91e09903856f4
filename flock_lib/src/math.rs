use glam::Vec2;

/// Heading angle in radians for a velocity vector.
///
/// Zero heading points along +y and the sign is flipped relative to the
/// usual `atan2(y, x)`, so a sprite drawn pointing "up" rotates straight
/// into its direction of travel. Callers must not pass a zero vector.
#[inline]
pub fn heading_from_velocity(velocity: Vec2) -> f32 {
    -velocity.x.atan2(velocity.y)
}
