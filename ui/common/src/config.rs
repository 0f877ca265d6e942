use std::{env, str::FromStr, time::Duration};

use crate::geofence::DEFAULT_MAX_RADIUS_M;

pub const DEFAULT_API_URL: &str = "https://fallertrack-be.my.id";
pub const DEFAULT_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

#[derive(Debug, Clone, PartialEq)]
pub struct PollIntervals {
    pub live_location: Duration,
    pub fall_alert: Duration,
    pub sos_locations: Duration,
    pub activity_summary: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            live_location: Duration::from_secs(3),
            fall_alert: Duration::from_secs(5),
            sos_locations: Duration::from_secs(5 * 60),
            activity_summary: Duration::from_secs(5 * 60),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub tile_url: String,
    pub tile_attribution: String,
    pub max_geofence_radius_m: f64,
    pub sos_search_radius_m: u32,
    pub emergency_number: String,
    pub summary_limit: u32,
    pub snackbar_hide_after: Duration,
    pub intervals: PollIntervals,
    pub log_level: log::Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.into(),
            tile_url: DEFAULT_TILE_URL.into(),
            tile_attribution: TILE_ATTRIBUTION.into(),
            max_geofence_radius_m: DEFAULT_MAX_RADIUS_M,
            sos_search_radius_m: 5000,
            emergency_number: "112".into(),
            summary_limit: 10,
            snackbar_hide_after: Duration::from_secs(6),
            intervals: PollIntervals::default(),
            log_level: if cfg!(debug_assertions) {
                log::Level::Debug
            } else {
                log::Level::Info
            },
        }
    }
}

/// Runtime environment first, then the value baked in at compile time. In the
/// browser only the compile time value exists.
fn lookup(key: &str, baked: Option<&'static str>) -> Option<String> {
    env::var(key)
        .ok()
        .or_else(|| baked.map(String::from))
        .filter(|v| !v.trim().is_empty())
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> T
where
    T: FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    match value {
        Some(v) => v.trim().parse().unwrap_or_else(|e| {
            log::error!("Invalid {key} `{v}`: {e}");
            log::info!("Using default value {default}");
            default
        }),
        None => default,
    }
}

fn millis_or(key: &str, value: Option<String>, default: Duration) -> Duration {
    let ms = parse_or(key, value, default.as_millis() as u64);
    if ms == 0 {
        log::error!("{key} must be greater than zero, using {}ms", default.as_millis());
        return default;
    }
    Duration::from_millis(ms)
}

impl Config {
    pub fn load() -> Self {
        let d = Config::default();

        macro_rules! var {
            ($key:literal) => {
                lookup($key, option_env!($key))
            };
        }

        Self {
            api_base_url: var!("FALLERTRACK_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(d.api_base_url),
            tile_url: var!("FALLERTRACK_TILE_URL").unwrap_or(d.tile_url),
            tile_attribution: d.tile_attribution,
            max_geofence_radius_m: parse_or(
                "FALLERTRACK_MAX_RADIUS_M",
                var!("FALLERTRACK_MAX_RADIUS_M"),
                d.max_geofence_radius_m,
            ),
            sos_search_radius_m: parse_or(
                "FALLERTRACK_SOS_RADIUS_M",
                var!("FALLERTRACK_SOS_RADIUS_M"),
                d.sos_search_radius_m,
            ),
            emergency_number: var!("FALLERTRACK_EMERGENCY_NUMBER").unwrap_or(d.emergency_number),
            summary_limit: d.summary_limit,
            snackbar_hide_after: d.snackbar_hide_after,
            intervals: PollIntervals {
                live_location: millis_or(
                    "FALLERTRACK_LOCATION_POLL_MS",
                    var!("FALLERTRACK_LOCATION_POLL_MS"),
                    d.intervals.live_location,
                ),
                fall_alert: millis_or(
                    "FALLERTRACK_FALL_POLL_MS",
                    var!("FALLERTRACK_FALL_POLL_MS"),
                    d.intervals.fall_alert,
                ),
                sos_locations: millis_or(
                    "FALLERTRACK_SOS_POLL_MS",
                    var!("FALLERTRACK_SOS_POLL_MS"),
                    d.intervals.sos_locations,
                ),
                activity_summary: millis_or(
                    "FALLERTRACK_SUMMARY_POLL_MS",
                    var!("FALLERTRACK_SUMMARY_POLL_MS"),
                    d.intervals.activity_summary,
                ),
            },
            log_level: parse_or(
                "FALLERTRACK_LOG_LEVEL",
                var!("FALLERTRACK_LOG_LEVEL"),
                d.log_level,
            ),
        }
    }
}
