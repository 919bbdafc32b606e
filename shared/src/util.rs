/// Unit vector for a heading given in degrees, in screen space (y grows downward).
///
/// The heading is negated before the standard trig functions are applied, so
/// increasing the angle turns counter-clockwise on screen: 0° points right,
/// 90° points up.
#[inline]
pub fn heading_vector(angle_deg: f64) -> (f64, f64) {
    let rad = (360.0 - angle_deg).to_radians();
    (rad.cos(), rad.sin())
}

/// Point at `length` along `angle_deg` from `(x, y)`.
#[inline]
pub fn heading_offset(x: f64, y: f64, angle_deg: f64, length: f64) -> (f64, f64) {
    let (dx, dy) = heading_vector(angle_deg);
    (x + dx * length, y + dy * length)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_heading_vector_zero_points_right() {
        let (dx, dy) = heading_vector(0.0);
        assert!((dx - 1.0).abs() < EPS, "dx inaccurate for 0°: {}", dx);
        assert!(dy.abs() < EPS, "dy inaccurate for 0°: {}", dy);
    }

    #[test]
    fn test_heading_vector_ninety_points_up() {
        let (dx, dy) = heading_vector(90.0);
        assert!(dx.abs() < EPS, "dx inaccurate for 90°: {}", dx);
        assert!((dy + 1.0).abs() < EPS, "90° should point up (negative y): {}", dy);
    }

    #[test]
    fn test_heading_vector_negative_angle_points_down() {
        let (dx, dy) = heading_vector(-90.0);
        assert!(dx.abs() < EPS, "dx inaccurate for -90°: {}", dx);
        assert!((dy - 1.0).abs() < EPS, "-90° should point down: {}", dy);
    }

    #[test]
    fn test_heading_vector_wraparound() {
        let (a_dx, a_dy) = heading_vector(45.0);
        let (b_dx, b_dy) = heading_vector(45.0 + 720.0);
        assert!((a_dx - b_dx).abs() < 1e-6, "cos differs after wraparound");
        assert!((a_dy - b_dy).abs() < 1e-6, "sin differs after wraparound");
    }

    #[test]
    fn test_heading_offset_scales_by_length() {
        let (x, y) = heading_offset(10.0, 20.0, 180.0, 5.0);
        assert!((x - 5.0).abs() < EPS, "x inaccurate: {}", x);
        assert!((y - 20.0).abs() < EPS, "y inaccurate: {}", y);
    }
}
