use chrono::{DateTime, Duration, Utc};

use crate::models::LatLon;

/// Floor for a movement leg. Stale or already-past arrival timestamps still
/// get a visible transition instead of a teleport.
pub const MIN_LEG_MS: i64 = 200;

fn min_leg() -> Duration {
    Duration::milliseconds(MIN_LEG_MS)
}

/// Leg duration derived from the backend's arrival timestamp, floored at
/// [`MIN_LEG_MS`].
pub fn leg_duration(arrival: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Duration {
    match arrival {
        Some(arrival) => (arrival - now).max(min_leg()),
        None => min_leg(),
    }
}

/// Retargetable linear tween between two positions.
///
/// Sampling is clamped, so a finished tween keeps reporting its target until
/// the next retarget. A retarget resamples the current position first, which
/// is what keeps mid-flight updates continuous: the latest target always
/// wins and the marker never snaps.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: LatLon,
    to: LatLon,
    started_at: DateTime<Utc>,
    duration: Duration,
}

impl Tween {
    /// A tween already at rest at `at`.
    pub fn fixed(at: LatLon, now: DateTime<Utc>) -> Self {
        Self {
            from: at,
            to: at,
            started_at: now,
            duration: Duration::zero(),
        }
    }

    pub fn target(&self) -> LatLon {
        self.to
    }

    pub fn sample(&self, at: DateTime<Utc>) -> LatLon {
        if self.duration <= Duration::zero() {
            return self.to;
        }
        let elapsed = (at - self.started_at).num_milliseconds() as f64;
        let total = self.duration.num_milliseconds() as f64;
        let t = (elapsed / total).clamp(0.0, 1.0);
        LatLon {
            lat: self.from.lat + (self.to.lat - self.from.lat) * t,
            lon: self.from.lon + (self.to.lon - self.from.lon) * t,
        }
    }

    pub fn retarget(&mut self, to: LatLon, duration: Duration, now: DateTime<Utc>) {
        self.from = self.sample(now);
        self.to = to;
        self.started_at = now;
        self.duration = duration;
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::{leg_duration, Tween, MIN_LEG_MS};
    use crate::models::LatLon;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn point(lat: f64, lon: f64) -> LatLon {
        LatLon { lat, lon }
    }

    #[test]
    fn samples_linearly_and_clamps() {
        let mut tween = Tween::fixed(point(0.0, 0.0), t0());
        tween.retarget(point(1.0, 2.0), Duration::seconds(10), t0());

        let mid = tween.sample(t0() + Duration::seconds(5));
        assert!((mid.lat - 0.5).abs() < 1e-9);
        assert!((mid.lon - 1.0).abs() < 1e-9);

        let after = tween.sample(t0() + Duration::seconds(30));
        assert!((after.lat - 1.0).abs() < 1e-9);

        let before = tween.sample(t0() - Duration::seconds(5));
        assert!((before.lat - 0.0).abs() < 1e-9);
    }

    #[test]
    fn retarget_keeps_position_continuous() {
        let mut tween = Tween::fixed(point(0.0, 0.0), t0());
        tween.retarget(point(1.0, 0.0), Duration::seconds(10), t0());

        let halfway = t0() + Duration::seconds(5);
        let before = tween.sample(halfway);
        tween.retarget(point(0.0, 5.0), Duration::seconds(10), halfway);
        let after = tween.sample(halfway);

        assert!((before.lat - after.lat).abs() < 1e-9);
        assert!((before.lon - after.lon).abs() < 1e-9);
    }

    #[test]
    fn past_arrival_still_gets_minimum_leg() {
        let stale = Some(t0() - Duration::seconds(3));
        assert_eq!(leg_duration(stale, t0()).num_milliseconds(), MIN_LEG_MS);
        assert_eq!(leg_duration(None, t0()).num_milliseconds(), MIN_LEG_MS);
    }

    #[test]
    fn future_arrival_sets_leg_length() {
        let arrival = Some(t0() + Duration::seconds(2));
        assert_eq!(leg_duration(arrival, t0()).num_seconds(), 2);
    }
}
