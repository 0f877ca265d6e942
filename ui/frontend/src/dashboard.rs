//! Runs the store in the browser.
//!
//! Components send [`Action`]s through [`DashboardContext::dispatch`]. Effects
//! returned by the store are executed here with the API client and their
//! outcome is fed back as actions. Every response is checked against the
//! [`PollGuard`] of the request, so nothing reaches the store once the map page
//! is gone or the poller that asked for it was cancelled.

use std::rc::Rc;

use chrono::Utc;
use fallertrack_api::{home, sos, summary, tracking, FallertrackClient};
use leptos::*;
use ui_common::{Action, Config, DashboardState, Effect, PollGuard, SummaryRequest};

use crate::AppContext;

#[derive(Clone)]
struct Services {
    config: Rc<Config>,
    client: FallertrackClient,
    session: PollGuard,
}

/// Handle to the map page state, `Copy` so it can go into any view closure
#[derive(Copy, Clone)]
pub struct DashboardContext {
    pub state: RwSignal<DashboardState>,
    services: StoredValue<Services>,
}

impl DashboardContext {
    pub fn new(app: &AppContext, session: PollGuard) -> Self {
        Self {
            state: create_rw_signal(DashboardState::new(&app.config)),
            services: store_value(Services {
                config: app.config.clone(),
                client: app.client.clone(),
                session,
            }),
        }
    }

    pub fn config(&self) -> Rc<Config> {
        self.services.with_value(|s| s.config.clone())
    }

    /// `None` once the page that owns the context is disposed
    fn services(&self) -> Option<Services> {
        self.services
            .try_get_value()
            .filter(|s| s.session.is_live())
    }

    fn client(&self) -> Option<FallertrackClient> {
        self.services().map(|s| s.client)
    }

    pub fn dispatch(self, action: Action) {
        if self.services().is_none() {
            log::debug!("Map closed, dropping {action:?}");
            return;
        }

        let mut effect = None;
        self.state.update(|state| effect = state.apply(action));
        if let Some(effect) = effect {
            self.run(effect);
        }
    }

    fn run(self, effect: Effect) {
        let Some(client) = self.client() else { return };
        spawn_local(async move {
            match effect {
                Effect::PersistHome(update) => {
                    if let Err(e) = home::save_home(&client, &update).await {
                        log::error!("Error saving home location: {e}");
                        return;
                    }
                    self.fetch_home(&client).await;
                }
                Effect::SendAlert(alert) => match sos::send_alert(&client, alert.sos).await {
                    Ok(()) => self.dispatch(Action::SosAlertSent(alert.sos)),
                    Err(e) => {
                        log::error!("Error sending SOS alert: {e}");
                        self.dispatch(Action::SosAlertFailed(e.to_string()));
                    }
                },
            }
        });
    }

    async fn fetch_home(self, client: &FallertrackClient) {
        match home::get_home(client).await {
            Ok(home) => self.dispatch(Action::HomeLoaded(home)),
            Err(e) => log::error!("Error fetching home location: {e}"),
        }
    }

    pub fn load_home(self) {
        let Some(client) = self.client() else { return };
        spawn_local(async move { self.fetch_home(&client).await });
    }

    pub fn poll_live_location(self, guard: PollGuard) {
        let Some(client) = self.client() else { return };
        spawn_local(async move {
            match tracking::get_current_location(&client).await {
                Ok(position) if guard.is_live() => {
                    self.dispatch(Action::LiveLocationPolled(position))
                }
                Ok(_) => (),
                Err(e) => log::error!("Error fetching live location: {e}"),
            }
        });
    }

    pub fn poll_fall_alert(self, guard: PollGuard) {
        let Some(client) = self.client() else { return };
        spawn_local(async move {
            match tracking::get_fall_notification(&client).await {
                Ok(notification) if guard.is_live() => {
                    self.dispatch(Action::FallNotificationPolled(notification))
                }
                Ok(_) => (),
                Err(e) => log::error!("Error fetching fall notification: {e}"),
            }
        });
    }

    pub fn poll_sos_locations(self, guard: PollGuard) {
        let Some(Services { config, client, .. }) = self.services() else {
            return;
        };
        let radius = config.sos_search_radius_m;
        spawn_local(async move {
            self.dispatch(Action::SosLocationsRequested);
            let res = sos::get_sos_locations(&client, radius).await;
            if !guard.is_live() {
                return;
            }
            match res {
                Ok(locations) => self.dispatch(Action::SosLocationsLoaded(locations)),
                Err(e) => {
                    log::error!("Error fetching SOS locations: {e}");
                    self.dispatch(Action::SosLocationsFailed(e.to_string()));
                }
            }
        });
    }

    pub fn poll_summary(self, guard: PollGuard) {
        let Some(Services { config, client, .. }) = self.services() else {
            return;
        };
        let request = SummaryRequest::last_day(Utc::now(), config.summary_limit);
        spawn_local(async move {
            let res = summary::summarize(&client, &request).await;
            if !guard.is_live() {
                return;
            }
            match res {
                Ok(text) => self.dispatch(Action::SummaryLoaded(text)),
                Err(e) => {
                    log::error!("Error fetching activity summary: {e}");
                    self.dispatch(Action::SummaryFailed(e.to_string()));
                }
            }
        });
    }

    /// One-shot refresh outside the poller schedule
    pub fn refresh_sos_locations(self) {
        if let Some(s) = self.services() {
            self.poll_sos_locations(s.session);
        }
    }

    pub fn retry_summary(self) {
        self.dispatch(Action::SummaryRequested);
        if let Some(s) = self.services() {
            self.poll_summary(s.session);
        }
    }
}
