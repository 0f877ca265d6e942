use leptos::*;

use crate::DashboardContext;

#[component]
pub fn HomeInfo() -> impl IntoView {
    let ctx = expect_context::<DashboardContext>();
    let home = create_memo(move |_| ctx.state.with(|s| s.home.clone()));

    view! {
        <div class="rounded-lg border border-bkg-2 bg-bkg-1 p-4 text-content-1">
            <h2 class="mb-2 text-xl font-semibold">"Home"</h2>
            {move || match home.get() {
                Some(h) => view! {
                    <dl class="grid grid-cols-2 gap-1 text-sm">
                        <dt>"Name"</dt><dd>{h.name.clone()}</dd>
                        <dt>"Coordinates"</dt><dd>{format!("{:.6}, {:.6}", h.latitude, h.longitude)}</dd>
                        <dt>"Radius"</dt><dd>{format!("{:.0} m", h.radius)}</dd>
                        <dt>"Last update"</dt><dd>{h.last_update_display()}</dd>
                    </dl>
                }
                .into_view(),
                None => view! { <p class="text-sm text-content-2">"Loading home location..."</p> }.into_view(),
            }}
        </div>
    }
}
