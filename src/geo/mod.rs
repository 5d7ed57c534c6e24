use crate::models::LatLon;

/// Markers below this displacement keep their heading. Re-aiming the icon
/// on sub-meter jitter makes it wobble while the driver idles at a node.
pub const MOVE_EPSILON: f64 = 1e-5;

/// Icon heading for a displacement, in degrees. The car sprite points west
/// at 0°, so the raw bearing is offset by 180° and flipped to match the
/// icon's rotation sense.
pub fn icon_heading(from: LatLon, to: LatLon) -> f64 {
    let dlon = to.lon - from.lon;
    let dlat = to.lat - from.lat;
    -(dlat.atan2(dlon).to_degrees() + 180.0)
}

/// Straight-line displacement magnitude in degrees. Only ever compared
/// against [`MOVE_EPSILON`], so the flat-earth approximation is fine.
pub fn displacement(from: LatLon, to: LatLon) -> f64 {
    let dlon = to.lon - from.lon;
    let dlat = to.lat - from.lat;
    (dlon * dlon + dlat * dlat).sqrt()
}

/// Shortest signed turn from `current` to `target`, normalized into
/// [-180°, 180°] so the icon never spins the long way around.
pub fn shortest_turn(current: f64, target: f64) -> f64 {
    let mut delta = target - current;
    while delta > 180.0 {
        delta -= 360.0;
    }
    while delta < -180.0 {
        delta += 360.0;
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::{displacement, icon_heading, shortest_turn, MOVE_EPSILON};
    use crate::models::LatLon;

    fn point(lat: f64, lon: f64) -> LatLon {
        LatLon { lat, lon }
    }

    #[test]
    fn eastward_move_has_fixed_heading() {
        let heading = icon_heading(point(37.76, -122.43), point(37.76, -122.42));
        assert!((heading - (-180.0)).abs() < 1e-9);
    }

    #[test]
    fn northward_move_differs_from_southward() {
        let north = icon_heading(point(37.76, -122.43), point(37.77, -122.43));
        let south = icon_heading(point(37.77, -122.43), point(37.76, -122.43));
        assert!((north - south).abs() > 1.0);
    }

    #[test]
    fn turn_is_always_within_half_circle() {
        let samples = [
            (0.0, 350.0),
            (0.0, -350.0),
            (-370.0, -10.0),
            (170.0, -170.0),
            (-180.0, 180.0),
            (540.0, -540.0),
        ];
        for (current, target) in samples {
            let delta = shortest_turn(current, target);
            assert!(delta >= -180.0 && delta <= 180.0, "delta {delta} out of range");
            let landed = (current + delta - target).rem_euclid(360.0);
            assert!(landed < 1e-9 || (360.0 - landed) < 1e-9);
        }
    }

    #[test]
    fn stationary_displacement_is_below_epsilon() {
        let d = displacement(point(37.76, -122.43), point(37.76, -122.43));
        assert!(d < MOVE_EPSILON);
    }
}
