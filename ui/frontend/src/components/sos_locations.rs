use leptos::*;
use ui_common::{
    location::{directions_url, tel_url},
    Action,
};

use crate::DashboardContext;

/// Collapsible list of emergency services near the tracked person
#[component]
pub fn SosLocations() -> impl IntoView {
    let ctx = expect_context::<DashboardContext>();
    let state = ctx.state;
    let call_url = tel_url(&state.with_untracked(|s| s.emergency_number.clone()));

    let panel = create_memo(move |_| state.with(|s| s.sos.clone()));
    let open = create_memo(move |_| panel.with(|p| p.open));

    let list = move || {
        let panel = panel.get();
        if panel.loading && panel.locations.is_empty() {
            return view! { <p class="text-content-2">"Loading SOS services..."</p> }.into_view();
        }
        if let Some(e) = panel.error {
            return view! {
                <div class="text-red-700">
                    <p>{format!("Could not load SOS services: {e}")}</p>
                    <button on:click=move |_| ctx.refresh_sos_locations() class="underline">"Try again"</button>
                </div>
            }
            .into_view();
        }
        if panel.locations.is_empty() {
            return view! { <p class="text-content-2">"No SOS services found nearby"</p> }.into_view();
        }

        let selected = panel.selected;
        let call_url = call_url.clone();
        panel
            .locations
            .into_iter()
            .map(|loc| {
                let is_selected = selected.as_deref() == Some(loc.place_id.as_str());
                let place_id = loc.place_id.clone();
                view! {
                    <li class="border-b border-bkg-2 py-2" class:font-semibold=is_selected>
                        <button
                            class="text-left w-full"
                            on:click=move |_| ctx.dispatch(Action::SosSelectionToggled(place_id.clone()))
                        >
                            <span class="block">{loc.name.clone()}</span>
                            <span class="block text-xs text-content-2">{loc.vicinity.clone()}</span>
                        </button>
                        <div class="flex gap-3 text-xs pt-1">
                            <a href=directions_url(loc.position()) target="_blank" rel="noopener" class="text-blue-700 underline">"Get directions"</a>
                            <a href=call_url.clone() class="text-red-700 underline">"Emergency call"</a>
                        </div>
                    </li>
                }
            })
            .collect_view()
    };

    view! {
        <div class="rounded-lg border border-bkg-2 bg-bkg-1 p-4 text-content-1">
            <div class="flex items-center justify-between">
                <button on:click=move |_| ctx.dispatch(Action::SosPanelToggled) class="text-xl font-semibold">
                    {move || if open.get() { "▾ Nearby SOS services" } else { "▸ Nearby SOS services" }}
                </button>
                <Show when=move || open.get()>
                    <button on:click=move |_| ctx.refresh_sos_locations() class="text-sm underline">"Refresh"</button>
                </Show>
            </div>
            <Show when=move || open.get()>
                <ul class="mt-2 text-sm">{list.clone()}</ul>
            </Show>
        </div>
    }
}
