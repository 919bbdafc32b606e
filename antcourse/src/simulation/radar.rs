use macroquad::math::{DVec2, IVec2};
use shared::{SENSOR_COUNT, SenseVector, heading_offset};
use tracing::warn;

use super::map::CourseMap;
use super::{RADAR_MAX_LENGTH, RADAR_OFFSETS, RADAR_SCALE};

/// Where one radar ray stopped and how far that is from the ant's center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadarReading {
    pub endpoint: IVec2,
    pub distance: i32,
}

impl RadarReading {
    /// Distance as seen by the controller, in `0..=10`.
    pub fn normalized(&self) -> i32 {
        self.distance / RADAR_SCALE
    }
}

/// One full sweep, in `RADAR_OFFSETS` order. Computed fresh each tick.
pub type RadarSweep = [RadarReading; SENSOR_COUNT];

/// March a ray from `center` along `angle_deg` one pixel of length at a time
/// until it samples the boundary color or reaches `RADAR_MAX_LENGTH`.
pub fn cast(map: &CourseMap, center: DVec2, angle_deg: f64) -> RadarReading {
    let point_at = |length: i32| {
        let (x, y) = heading_offset(center.x, center.y, angle_deg, length as f64);
        IVec2::new(x as i32, y as i32)
    };

    let mut length = 0;
    let mut endpoint = point_at(length);
    while !map.is_boundary_at(endpoint.x as i64, endpoint.y as i64) && length < RADAR_MAX_LENGTH {
        length += 1;
        endpoint = point_at(length);
    }

    // Truncating the endpoint can push a diagonal ray a pixel past the cap.
    let distance = (endpoint.as_dvec2() - center).length() as i32;
    RadarReading {
        endpoint,
        distance: distance.min(RADAR_MAX_LENGTH),
    }
}

/// Cast every radar ray for an ant at `center` facing `angle_deg`.
pub fn sweep(map: &CourseMap, center: DVec2, angle_deg: f64) -> RadarSweep {
    RADAR_OFFSETS.map(|offset| cast(map, center, angle_deg + offset))
}

/// Normalize readings into the controller's input. Missing readings read as 0.
pub fn sense_vector(readings: &[RadarReading]) -> SenseVector {
    if readings.len() < SENSOR_COUNT {
        warn!(
            readings = readings.len(),
            expected = SENSOR_COUNT,
            "Radar produced too few readings, padding with 0"
        );
    }
    let mut sense = [0.0; SENSOR_COUNT];
    for (slot, reading) in sense.iter_mut().zip(readings) {
        *slot = reading.normalized() as f32;
    }
    sense
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Rgb;
    use shared::SENSOR_MAX;

    const GREEN: Rgb = Rgb(34, 177, 76);

    fn open_map() -> CourseMap {
        CourseMap::filled(800, 800, Rgb::WHITE, GREEN).unwrap()
    }

    #[test]
    fn test_cast_stops_at_cap_on_open_course() {
        let map = open_map();
        let reading = cast(&map, DVec2::new(400.0, 400.0), 0.0);
        assert_eq!(reading.distance, RADAR_MAX_LENGTH);
        assert_eq!(reading.endpoint.x, 700);
        assert_eq!(reading.normalized(), 10);
    }

    #[test]
    fn test_cast_stops_on_boundary() {
        let mut map = open_map();
        map.fill_rect(500, 0, 1, 800, GREEN);
        let reading = cast(&map, DVec2::new(400.0, 400.0), 0.0);
        assert_eq!(reading.endpoint.x, 500);
        assert_eq!(reading.distance, 100);
        assert_eq!(reading.normalized(), 3);
    }

    #[test]
    fn test_cast_from_boundary_has_zero_length() {
        let mut map = open_map();
        map.set_pixel(400, 400, GREEN);
        let reading = cast(&map, DVec2::new(400.0, 400.0), 0.0);
        assert_eq!(reading.distance, 0);
        assert_eq!(reading.endpoint, IVec2::new(400, 400));
    }

    #[test]
    fn test_sweep_order_right_to_left() {
        let mut map = open_map();
        // Wall above the ant only: the +90° ray (last) is the only short one.
        map.fill_rect(0, 350, 800, 1, GREEN);
        let readings = sweep(&map, DVec2::new(400.0, 400.0), 0.0);
        assert_eq!(readings[4].distance, 50, "+90° looks up on screen");
        assert_eq!(readings[0].distance, RADAR_MAX_LENGTH, "-90° looks down");
        assert_eq!(readings[2].distance, RADAR_MAX_LENGTH, "0° looks ahead");
    }

    #[test]
    fn test_sweep_leaving_raster_reads_edge_pixels() {
        let mut map = CourseMap::filled(100, 100, Rgb::WHITE, GREEN).unwrap();
        map.fill_rect(99, 0, 1, 100, GREEN);
        // The forward ray leaves the raster on the right and hits the clamped edge column.
        let readings = sweep(&map, DVec2::new(50.0, 50.0), 0.0);
        assert_eq!(readings[2].distance, 49);
        // Rays that never hit the boundary still stop at the cap.
        assert_eq!(readings[0].distance, RADAR_MAX_LENGTH);
    }

    #[test]
    fn test_distances_stay_within_cap() {
        let map = open_map();
        for step in 0..72 {
            let angle = step as f64 * 5.0;
            for reading in sweep(&map, DVec2::new(400.0, 400.0), angle) {
                assert!(
                    (0..=RADAR_MAX_LENGTH).contains(&reading.distance),
                    "distance {} out of range at angle {}",
                    reading.distance,
                    angle
                );
                assert!((0..=SENSOR_MAX as i32).contains(&reading.normalized()));
            }
        }
    }

    #[test]
    fn test_sense_vector_normalizes_with_integer_division() {
        let readings = [59, 60, 0, 299, 300].map(|distance| RadarReading {
            endpoint: IVec2::ZERO,
            distance,
        });
        assert_eq!(sense_vector(&readings), [1.0, 2.0, 0.0, 9.0, 10.0]);
    }

    #[test]
    fn test_sense_vector_pads_missing_readings() {
        let readings = [RadarReading {
            endpoint: IVec2::ZERO,
            distance: 90,
        }];
        assert_eq!(sense_vector(&readings), [3.0, 0.0, 0.0, 0.0, 0.0]);
    }
}
