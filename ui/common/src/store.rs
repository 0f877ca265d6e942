//! Dashboard state container.
//!
//! Every mutation goes through [`DashboardState::apply`]. Network work is not
//! done here: actions that need the backend return an [`Effect`] for the
//! caller to execute, and the outcome comes back as another action.

use crate::{
    alert::{FallBanner, Snackbar},
    config::Config,
    fall::FallNotification,
    geofence::GeofenceEditor,
    location::{Coordinate, HomeLocation, HomeUpdate, SosAlert, SosLocation},
    scene::{self, MapScene},
    summary::{ActivitySummary, SummaryState},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SosPanel {
    pub open: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub locations: Vec<SosLocation>,
    /// Place id of the location whose popup is open
    pub selected: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    HomeLoaded(HomeLocation),
    LiveLocationPolled(Coordinate),
    LiveRefreshToggled,
    FallNotificationPolled(FallNotification),
    SosPanelToggled,
    SosLocationsRequested,
    SosLocationsLoaded(Vec<SosLocation>),
    SosLocationsFailed(String),
    SosSelectionToggled(String),
    EditGeofence,
    GeofenceCenterChanged(Coordinate),
    GeofenceRadiusChanged(f64),
    SaveGeofence,
    CancelGeofenceEdit,
    ToggleSos,
    SosAlertSent(bool),
    SosAlertFailed(String),
    HideSnackbar(u64),
    SummaryRequested,
    SummaryLoaded(String),
    SummaryFailed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    PersistHome(HomeUpdate),
    SendAlert(SosAlert),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub home: Option<HomeLocation>,
    pub geofence: GeofenceEditor,
    pub live: Option<Coordinate>,
    /// Live location auto refresh, on by default
    pub live_refresh: bool,
    pub sos: SosPanel,
    pub sos_active: bool,
    /// An alert request is in flight
    pub sos_pending: bool,
    pub fall_alert: Option<FallNotification>,
    pub snackbar: Option<Snackbar>,
    pub summary: SummaryState,
    pub emergency_number: String,
    next_snackbar_id: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl DashboardState {
    pub fn new(config: &Config) -> Self {
        Self {
            home: None,
            geofence: GeofenceEditor::new(config.max_geofence_radius_m),
            live: None,
            live_refresh: true,
            sos: SosPanel::default(),
            sos_active: false,
            sos_pending: false,
            fall_alert: None,
            snackbar: None,
            summary: SummaryState::default(),
            emergency_number: config.emergency_number.clone(),
            next_snackbar_id: 0,
        }
    }

    pub fn apply(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::HomeLoaded(mut home) => {
                let clamped = self.geofence.clamp_radius(home.radius);
                if clamped != home.radius {
                    log::warn!(
                        "Home radius {} exceeds the maximum, using {clamped}",
                        home.radius
                    );
                    home.radius = clamped;
                }
                self.home = Some(home);
            }
            Action::LiveLocationPolled(position) => match self.live {
                Some(prev) if !prev.moved_significantly(&position) => {
                    log::trace!("Ignoring insignificant move to {position:?}");
                }
                _ => self.live = Some(position),
            },
            Action::LiveRefreshToggled => {
                self.live_refresh = !self.live_refresh;
                log::info!(
                    "Live location auto refresh {}",
                    if self.live_refresh { "enabled" } else { "disabled" }
                );
            }
            Action::FallNotificationPolled(notification) => {
                let was_active = self.fall_alert.as_ref().is_some_and(|n| n.is_active());
                if notification.is_active() && !was_active {
                    log::warn!("Fall detected for `{}`", notification.elderly_info.name);
                }
                self.fall_alert = Some(notification);
            }
            Action::SosPanelToggled => {
                self.sos.open = !self.sos.open;
                if !self.sos.open {
                    self.sos.selected = None;
                }
            }
            Action::SosLocationsRequested => {
                self.sos.loading = true;
                self.sos.error = None;
            }
            Action::SosLocationsLoaded(locations) => {
                self.sos.loading = false;
                self.sos.error = None;
                self.sos.locations = locations;
                if let Some(id) = &self.sos.selected {
                    if !self.sos.locations.iter().any(|l| &l.place_id == id) {
                        self.sos.selected = None;
                    }
                }
            }
            Action::SosLocationsFailed(msg) => {
                self.sos.loading = false;
                self.sos.error = Some(msg);
            }
            Action::SosSelectionToggled(place_id) => {
                if self.sos.selected.as_ref() == Some(&place_id) {
                    self.sos.selected = None;
                } else if self.sos.locations.iter().any(|l| l.place_id == place_id) {
                    self.sos.selected = Some(place_id);
                } else {
                    log::warn!("Unknown SOS location `{place_id}`");
                }
            }
            Action::EditGeofence => match &self.home {
                Some(home) => {
                    self.geofence.edit(home);
                }
                None => log::warn!("Cannot edit geofence before the home location is loaded"),
            },
            Action::GeofenceCenterChanged(center) => self.geofence.set_center(center),
            Action::GeofenceRadiusChanged(radius) => self.geofence.set_radius(radius),
            Action::SaveGeofence => {
                let buffer = self.geofence.save()?;
                if let Some(home) = self.home.as_mut() {
                    home.latitude = buffer.center.lat;
                    home.longitude = buffer.center.lng;
                    home.radius = buffer.radius;
                }
                return Some(Effect::PersistHome(HomeUpdate::new(
                    buffer.center,
                    buffer.radius,
                )));
            }
            Action::CancelGeofenceEdit => self.geofence.cancel(),
            Action::ToggleSos => {
                if self.sos_pending {
                    log::debug!("SOS request already in flight, ignoring toggle");
                    return None;
                }
                self.sos_pending = true;
                return Some(Effect::SendAlert(SosAlert {
                    sos: !self.sos_active,
                }));
            }
            Action::SosAlertSent(active) => {
                self.sos_pending = false;
                self.sos_active = active;
                self.next_snackbar_id += 1;
                self.snackbar = Some(Snackbar::sos(self.next_snackbar_id, active));
            }
            Action::SosAlertFailed(msg) => {
                self.sos_pending = false;
                log::error!("SOS alert not delivered: {msg}");
            }
            Action::HideSnackbar(id) => {
                if self.snackbar.as_ref().is_some_and(|s| s.id == id) {
                    self.snackbar = None;
                }
            }
            Action::SummaryRequested => {
                if let SummaryState::Failed(_) = self.summary {
                    self.summary = SummaryState::Loading;
                }
            }
            Action::SummaryLoaded(text) => match ActivitySummary::parse(&text) {
                Ok(summary) => self.summary = SummaryState::Ready(summary),
                Err(e) => {
                    log::error!("Error parsing activity summary: {e:#}");
                    self.summary = SummaryState::Failed(e.to_string());
                }
            },
            Action::SummaryFailed(msg) => {
                if let SummaryState::Ready(_) = self.summary {
                    log::warn!("Keeping previous activity summary: {msg}");
                } else {
                    self.summary = SummaryState::Failed(msg);
                }
            }
        }

        None
    }

    pub fn fall_banner(&self) -> Option<FallBanner> {
        self.fall_alert
            .as_ref()
            .and_then(FallBanner::from_notification)
    }

    pub fn scene(&self) -> Option<MapScene> {
        scene::compose(self)
    }
}
