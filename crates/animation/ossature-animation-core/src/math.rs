//! Rotation helpers for Euler-degree channels.

use glam::{EulerRot, Quat, Vec3};

/// Euler angles in degrees to a quaternion, applying X then Y then Z.
#[inline]
pub fn euler_degrees_to_quat(degrees: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::ZYX,
        degrees.z.to_radians(),
        degrees.y.to_radians(),
        degrees.x.to_radians(),
    )
}

/// Whole-model rotation: yaw about +Y (positive turns clockwise seen from
/// above), then pitch about +X.
#[inline]
pub fn body_rotation(yaw_degrees: f32, pitch_degrees: f32) -> Quat {
    Quat::from_rotation_y(-yaw_degrees.to_radians()) * Quat::from_rotation_x(pitch_degrees.to_radians())
}
