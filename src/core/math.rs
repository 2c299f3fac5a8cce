// Math utilities and helper functions

/// Velocities closer to zero than this are treated as standing still
pub const VELOCITY_EPSILON: f32 = 1.0e-3;

/// Check if two f32 values are approximately equal
pub fn approx_equal(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Check if a velocity component is effectively zero
pub fn approx_zero(value: f32) -> bool {
    approx_equal(value, 0.0, VELOCITY_EPSILON)
}

/// Check if two values point the same way along an axis.
/// Zero shares no sign with anything, including zero.
pub fn shares_sign(a: f32, b: f32) -> bool {
    (a > 0.0 && b > 0.0) || (a < 0.0 && b < 0.0)
}
