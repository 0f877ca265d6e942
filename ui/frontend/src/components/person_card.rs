use leptos::*;
use ui_common::{summary::SummarySection, Action, SummaryState};

use crate::DashboardContext;

fn section_view(section: &SummarySection) -> impl IntoView {
    let lines = section.lines.clone();
    view! {
        <div>
            <h4 class="font-semibold">{section.title}</h4>
            {if lines.is_empty() {
                view! { <p class="text-content-2">"-"</p> }.into_view()
            } else {
                view! {
                    <ul class="list-disc pl-5">
                        {lines.into_iter().map(|l| view! { <li>{l}</li> }).collect_view()}
                    </ul>
                }
                .into_view()
            }}
        </div>
    }
}

#[component]
fn ActivitySummaryPanel() -> impl IntoView {
    let ctx = expect_context::<DashboardContext>();
    let summary = create_memo(move |_| ctx.state.with(|s| s.summary.clone()));

    view! {
        <div class="mt-4 text-sm">
            <h3 class="mb-1 text-lg font-semibold">"Activity summary"</h3>
            {move || match summary.get() {
                SummaryState::Loading => view! { <p class="text-content-2">"Loading summary..."</p> }.into_view(),
                SummaryState::Ready(summary) => view! {
                    <div class="flex flex-col gap-2">
                        {summary.sections().into_iter().map(section_view).collect_view()}
                    </div>
                }
                .into_view(),
                SummaryState::Failed(msg) => view! {
                    <div class="text-red-700">
                        <p>{format!("Could not load the summary: {msg}")}</p>
                        <button on:click=move |_| ctx.retry_summary() class="mt-1 underline">"Retry"</button>
                    </div>
                }
                .into_view(),
            }}
        </div>
    }
}

/// Tracked person overview with the SOS switch
#[component]
pub fn PersonCard() -> impl IntoView {
    let ctx = expect_context::<DashboardContext>();
    let state = ctx.state;

    let name = create_memo(move |_| {
        state.with(|s| {
            s.fall_alert
                .as_ref()
                .map(|n| n.elderly_info.name.clone())
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| "Lansia".to_string())
        })
    });
    let live = create_memo(move |_| state.with(|s| s.live));
    let sos_active = create_memo(move |_| state.with(|s| s.sos_active));
    let sos_pending = create_memo(move |_| state.with(|s| s.sos_pending));
    let live_refresh = create_memo(move |_| state.with(|s| s.live_refresh));

    view! {
        <div class="rounded-lg border border-bkg-2 bg-bkg-1 p-4 text-content-1">
            <div class="flex items-center justify-between">
                <h2 class="text-xl font-semibold">{move || name.get()}</h2>
                <Show when=move || sos_active.get()>
                    <span class="rounded bg-red-600 px-2 py-1 text-xs font-bold text-white">"SOS Aktif!"</span>
                </Show>
            </div>
            <p class="text-sm">
                {move || match live.get() {
                    Some(p) => format!("Position: {:.6}, {:.6}", p.lat, p.lng),
                    None => "Waiting for position...".to_string(),
                }}
            </p>
            <button
                on:click=move |_| ctx.dispatch(Action::ToggleSos)
                disabled=move || sos_pending.get()
                class=move || if sos_active.get() {
                    "mt-3 rounded-lg bg-green-700 px-4 py-2 text-sm text-white hover:bg-green-800 disabled:opacity-50"
                } else {
                    "mt-3 rounded-lg bg-red-600 px-4 py-2 text-sm text-white hover:bg-red-700 disabled:opacity-50"
                }
            >
                {move || if sos_active.get() { "Deactivate SOS" } else { "Activate SOS" }}
            </button>
            <label class="mt-3 flex items-center gap-2 text-sm">
                <input
                    type="checkbox"
                    prop:checked=move || live_refresh.get()
                    on:change=move |_| ctx.dispatch(Action::LiveRefreshToggled)
                />
                "Auto refresh position"
            </label>
            <ActivitySummaryPanel/>
        </div>
    }
}
