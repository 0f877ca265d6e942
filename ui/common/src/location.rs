use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coordinates closer than this (in degrees, per axis) are treated as the same
/// position. Roughly one meter at the equator.
pub const SIGNIFICANT_MOVE_DEG: f64 = 0.00001;

#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new<T: Into<f64>>(lat: T, lng: T) -> Self {
        Self {
            lat: lat.into(),
            lng: lng.into(),
        }
    }

    /// True when `other` differs from `self` by more than the de-noising
    /// threshold on either axis.
    pub fn moved_significantly(&self, other: &Coordinate) -> bool {
        (self.lat - other.lat).abs() > SIGNIFICANT_MOVE_DEG
            || (self.lng - other.lng).abs() > SIGNIFICANT_MOVE_DEG
    }
}

/// Response of `GET /api/current-distance`
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<CurrentLocation> for Coordinate {
    fn from(loc: CurrentLocation) -> Self {
        Coordinate::new(loc.latitude, loc.longitude)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
    #[serde(rename = "nama", default)]
    pub name: String,
    #[serde(rename = "time", default)]
    pub last_update: String,
}

impl HomeLocation {
    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.last_update)
            .map(|t| t.with_timezone(&Utc))
            .ok()
    }

    /// Human readable last update time, falls back to the raw server string
    pub fn last_update_display(&self) -> String {
        match self.last_updated() {
            Some(t) => t.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            None => self.last_update.clone(),
        }
    }
}

/// Body of `POST /api/home`
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeUpdate {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
}

impl HomeUpdate {
    pub fn new(center: Coordinate, radius: f64) -> Self {
        Self {
            latitude: center.lat,
            longitude: center.lng,
            radius,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub location: Coordinate,
}

/// Emergency service near the tracked person, as returned by the places lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SosLocation {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub vicinity: String,
    pub geometry: Geometry,
}

impl SosLocation {
    pub fn position(&self) -> Coordinate {
        self.geometry.location
    }
}

/// Body of `POST /api/sos-location`
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SosSearch {
    pub radius: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SosResults {
    #[serde(default)]
    pub results: Vec<SosLocation>,
}

/// Body of `POST /api/alert`
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SosAlert {
    pub sos: bool,
}

pub fn directions_url(destination: Coordinate) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}",
        destination.lat, destination.lng
    )
}

pub fn tel_url(number: &str) -> String {
    let digits: String = number.chars().filter(|c| !c.is_whitespace()).collect();
    format!("tel:{digits}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_jitter_is_not_a_move() {
        let a = Coordinate::new(-6.2, 106.8);
        let b = Coordinate::new(-6.200005, 106.800009);
        assert!(!a.moved_significantly(&b));
    }

    #[test]
    fn either_axis_counts() {
        let a = Coordinate::new(-6.2, 106.8);
        assert!(a.moved_significantly(&Coordinate::new(-6.20002, 106.8)));
        assert!(a.moved_significantly(&Coordinate::new(-6.2, 106.80002)));
    }

    #[test]
    fn home_location_uses_backend_field_names() {
        let json = r#"{"latitude":-6.2,"longitude":106.8,"radius":600,"nama":"Panti Lansia","time":"2024-11-20T08:30:00Z"}"#;
        let home: HomeLocation = serde_json::from_str(json).unwrap();
        assert_eq!(home.name, "Panti Lansia");
        assert_eq!(home.radius, 600.0);
        assert_eq!(home.center(), Coordinate::new(-6.2, 106.8));
        assert_eq!(home.last_update_display(), "2024-11-20 08:30:00 UTC");
    }

    #[test]
    fn unparsable_time_is_shown_verbatim() {
        let home = HomeLocation {
            last_update: "kemarin".into(),
            ..HomeLocation::default()
        };
        assert!(home.last_updated().is_none());
        assert_eq!(home.last_update_display(), "kemarin");
    }

    #[test]
    fn sos_results_default_to_empty() {
        let results: SosResults = serde_json::from_str("{}").unwrap();
        assert!(results.results.is_empty());

        let json = r#"{"results":[{"place_id":"abc","name":"RS Bunda","vicinity":"Jl. Teuku Umar","geometry":{"location":{"lat":-5.36,"lng":105.3}}}]}"#;
        let results: SosResults = serde_json::from_str(json).unwrap();
        assert_eq!(results.results[0].position(), Coordinate::new(-5.36, 105.3));
    }

    #[test]
    fn deep_links() {
        assert_eq!(
            directions_url(Coordinate::new(-5.36, 105.3)),
            "https://www.google.com/maps/dir/?api=1&destination=-5.36,105.3"
        );
        assert_eq!(tel_url("1 1 2"), "tel:112");
    }
}
