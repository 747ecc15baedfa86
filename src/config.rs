use serde::Serialize;
use std::str::FromStr;

/// Booking policy and opening hours, read from the environment at startup
/// and injected into handlers so tests can evaluate the rules with varied
/// values.
#[derive(Clone, Serialize)]
pub struct AppConfig {
    pub max_booking_hours_per_week: i64,
    pub gaming_area_open_hour: u32,
    pub gaming_area_close_hour: u32,
    pub gaming_area_capacity: usize,
    pub default_rental_duration_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_booking_hours_per_week: 4,
            gaming_area_open_hour: 8,
            gaming_area_close_hour: 23,
            gaming_area_capacity: 5,
            default_rental_duration_days: 7,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// NaiveTime cannot represent 24:00, so a midnight close becomes 23.
fn clamp_hour(hour: u32) -> u32 {
    hour.min(23)
}

impl AppConfig {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_booking_hours_per_week: env_or(
                "MAX_BOOKING_HOURS_PER_WEEK",
                default.max_booking_hours_per_week,
            ),
            gaming_area_open_hour: clamp_hour(env_or(
                "GAMING_AREA_OPEN_HOUR",
                default.gaming_area_open_hour,
            )),
            gaming_area_close_hour: clamp_hour(env_or(
                "GAMING_AREA_CLOSE_HOUR",
                default.gaming_area_close_hour,
            )),
            gaming_area_capacity: env_or("GAMING_AREA_CAPACITY", default.gaming_area_capacity),
            default_rental_duration_days: env_or(
                "DEFAULT_RENTAL_DURATION_DAYS",
                default.default_rental_duration_days,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn out_of_range_close_hour_is_clamped() {
        assert_eq!(clamp_hour(24), 23);
        assert_eq!(clamp_hour(99), 23);
        assert_eq!(clamp_hour(8), 8);
        // the clamped value must stay constructible as a wall-clock time
        let _ = NaiveTime::from_hms(clamp_hour(24), 0, 0);
    }
}
