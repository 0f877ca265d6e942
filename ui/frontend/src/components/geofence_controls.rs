use leptos::*;
use ui_common::{Action, Coordinate};

use crate::DashboardContext;

fn parse_input(ev: &ev::Event, what: &str) -> Option<f64> {
    let value = event_target_value(ev);
    match value.trim().parse() {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("Ignoring invalid {what} `{value}`: {e}");
            None
        }
    }
}

/// Edit form for the safe zone. The map circle follows the buffer while
/// editing and nothing is sent until save.
#[component]
pub fn GeofenceControls() -> impl IntoView {
    let ctx = expect_context::<DashboardContext>();
    let state = ctx.state;
    let max_radius = state.with_untracked(|s| s.geofence.max_radius());

    let buffer = create_memo(move |_| state.with(|s| s.geofence.buffer().copied()));
    let has_home = create_memo(move |_| state.with(|s| s.home.is_some()));
    let live = create_memo(move |_| state.with(|s| s.live));

    let set_lat = move |ev: ev::Event| {
        if let (Some(lat), Some(b)) = (parse_input(&ev, "latitude"), buffer.get_untracked()) {
            ctx.dispatch(Action::GeofenceCenterChanged(Coordinate::new(lat, b.center.lng)));
        }
    };
    let set_lng = move |ev: ev::Event| {
        if let (Some(lng), Some(b)) = (parse_input(&ev, "longitude"), buffer.get_untracked()) {
            ctx.dispatch(Action::GeofenceCenterChanged(Coordinate::new(b.center.lat, lng)));
        }
    };
    let set_radius = move |ev: ev::Event| {
        if let Some(radius) = parse_input(&ev, "radius") {
            ctx.dispatch(Action::GeofenceRadiusChanged(radius));
        }
    };
    let center_on_person = move |_| {
        if let Some(position) = live.get_untracked() {
            ctx.dispatch(Action::GeofenceCenterChanged(position));
        }
    };

    view! {
        <div class="rounded-lg border border-bkg-2 bg-bkg-1 p-4 text-content-1">
            <h2 class="mb-2 text-xl font-semibold">"Safe zone"</h2>
            <Show
                when=move || buffer.with(Option::is_some)
                fallback=move || view! {
                    <button
                        on:click=move |_| ctx.dispatch(Action::EditGeofence)
                        disabled=move || !has_home.get()
                        class="rounded-lg bg-blue-700 px-4 py-2 text-sm text-white hover:bg-blue-800 disabled:opacity-50"
                    >
                        "Edit safe zone"
                    </button>
                }
            >
                <div class="flex flex-col gap-2 text-sm">
                    <label class="flex flex-col">
                        {move || format!("Radius: {:.0} m", buffer.get().map(|b| b.radius).unwrap_or_default())}
                        <input
                            type="range"
                            min="10"
                            max=max_radius
                            step="10"
                            prop:value=move || buffer.get().map(|b| b.radius).unwrap_or_default()
                            on:input=set_radius
                        />
                    </label>
                    <label class="flex flex-col">
                        "Latitude"
                        <input
                            type="number"
                            step="0.00001"
                            class="rounded border px-2 py-1"
                            prop:value=move || buffer.get().map(|b| b.center.lat).unwrap_or_default()
                            on:change=set_lat
                        />
                    </label>
                    <label class="flex flex-col">
                        "Longitude"
                        <input
                            type="number"
                            step="0.00001"
                            class="rounded border px-2 py-1"
                            prop:value=move || buffer.get().map(|b| b.center.lng).unwrap_or_default()
                            on:change=set_lng
                        />
                    </label>
                    <div class="flex gap-2 pt-1">
                        <button
                            on:click=center_on_person
                            disabled=move || live.get().is_none()
                            class="rounded-lg border px-3 py-2 disabled:opacity-50"
                        >
                            "Center on lansia"
                        </button>
                        <button
                            on:click=move |_| ctx.dispatch(Action::SaveGeofence)
                            class="rounded-lg bg-blue-700 px-3 py-2 text-white hover:bg-blue-800"
                        >
                            "Save"
                        </button>
                        <button
                            on:click=move |_| ctx.dispatch(Action::CancelGeofenceEdit)
                            class="rounded-lg border px-3 py-2"
                        >
                            "Cancel"
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
}
