//! Map composition: the overlay set derived from [`DashboardState`].

use crate::{
    geofence::GeofenceCircle,
    location::{directions_url, tel_url, Coordinate},
    store::DashboardState,
};

/// Walking path from the care home used for the route overlay. Live routing is
/// left to the map provider; this path is drawn between the home and the
/// tracked person.
pub const FIXED_ROUTE: [(f64, f64); 19] = [
    (-5.36317, 105.30664),
    (-5.36304, 105.30661),
    (-5.36307, 105.30633),
    (-5.36309, 105.30610),
    (-5.36314, 105.30610),
    (-5.36350, 105.30604),
    (-5.36359, 105.30603),
    (-5.36367, 105.30595),
    (-5.36437, 105.30575),
    (-5.36454, 105.30574),
    (-5.36535, 105.30572),
    (-5.36543, 105.30574),
    (-5.36546, 105.30575),
    (-5.36546, 105.30581),
    (-5.36553, 105.30581),
    (-5.36583, 105.30580),
    (-5.36590, 105.30580),
    (-5.36595, 105.30571),
    (-5.36598, 105.30566),
];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PersonMarkerStyle {
    Plain,
    SosActive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeMarker {
    pub position: Coordinate,
    pub name: String,
    pub radius: f64,
    pub last_update: String,
    pub editing: bool,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PersonMarker {
    pub position: Coordinate,
    pub style: PersonMarkerStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SosMarker {
    pub place_id: String,
    pub name: String,
    pub vicinity: String,
    pub position: Coordinate,
    pub open: bool,
    pub directions_url: String,
    pub call_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapScene {
    pub center: Coordinate,
    pub geofence: GeofenceCircle,
    pub route: Option<Vec<Coordinate>>,
    pub home: HomeMarker,
    pub person: Option<PersonMarker>,
    pub sos: Vec<SosMarker>,
}

/// `None` until the home location has been loaded
pub fn compose(state: &DashboardState) -> Option<MapScene> {
    let home = state.home.as_ref()?;
    let geofence = state.geofence.circle(home);
    let editing = state.geofence.is_editing();

    let route = match (editing, state.live) {
        (false, Some(live)) => Some(route_path(home.center(), live)),
        _ => None,
    };

    let person = state.live.map(|position| PersonMarker {
        position,
        style: if state.sos_active {
            PersonMarkerStyle::SosActive
        } else {
            PersonMarkerStyle::Plain
        },
    });

    let call_url = tel_url(&state.emergency_number);
    let sos = state
        .sos
        .locations
        .iter()
        .map(|loc| SosMarker {
            place_id: loc.place_id.clone(),
            name: loc.name.clone(),
            vicinity: loc.vicinity.clone(),
            position: loc.position(),
            open: state.sos.selected.as_deref() == Some(loc.place_id.as_str()),
            directions_url: directions_url(loc.position()),
            call_url: call_url.clone(),
        })
        .collect();

    Some(MapScene {
        center: state.live.unwrap_or_else(|| home.center()),
        geofence,
        route,
        home: HomeMarker {
            position: geofence.center,
            name: home.name.clone(),
            radius: home.radius,
            last_update: home.last_update_display(),
            editing,
        },
        person,
        sos,
    })
}

pub fn route_path(origin: Coordinate, destination: Coordinate) -> Vec<Coordinate> {
    let mut path = Vec::with_capacity(FIXED_ROUTE.len() + 2);
    path.push(origin);
    path.extend(FIXED_ROUTE.iter().map(|&(lat, lng)| Coordinate::new(lat, lng)));
    path.push(destination);
    path
}
