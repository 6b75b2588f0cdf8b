//! Blast damage falloff.

/// Damage dealt at `distance` from an explosion of `radius`.
///
/// Falls off linearly from `max_damage` at the centre to zero at the edge and
/// is never negative. A non-positive radius deals nothing.
pub fn explosion_damage(distance: f32, radius: f32, max_damage: f32) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }
    let relative_distance = (radius - distance) / radius;
    (relative_distance * max_damage).max(0.0)
}
