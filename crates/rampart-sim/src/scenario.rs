//! Stock map: the path and build spots used when the host supplies none.

use glam::Vec3;

/// The default enemy route, from the spawn beacon to the base core.
pub fn stock_path() -> Vec<Vec3> {
    vec![
        Vec3::new(-20.0, 0.0, -10.0),
        Vec3::new(-10.0, 0.0, -10.0),
        Vec3::new(-10.0, 0.0, 4.0),
        Vec3::new(2.0, 0.0, 4.0),
        Vec3::new(2.0, 0.0, -6.0),
        Vec3::new(16.0, 0.0, -6.0),
    ]
}

/// The default build pads beside the route.
pub fn stock_build_spots() -> Vec<Vec3> {
    vec![
        Vec3::new(-16.0, 0.0, -4.0),
        Vec3::new(-16.0, 0.0, -14.0),
        Vec3::new(-8.0, 0.0, -2.0),
        Vec3::new(-2.0, 0.0, 8.0),
        Vec3::new(6.0, 0.0, 0.0),
        Vec3::new(10.0, 0.0, -12.0),
        Vec3::new(14.0, 0.0, -2.0),
    ]
}
