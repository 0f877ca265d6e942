use leptos::*;

use crate::DashboardContext;

/// Shown for as long as the latest poll reports an active fall
#[component]
pub fn FallAlert() -> impl IntoView {
    let ctx = expect_context::<DashboardContext>();
    let banner = create_memo(move |_| ctx.state.with(|s| s.fall_banner()));

    move || {
        banner.get().map(|b| {
            view! {
                <div role="alert" class="rounded-lg border border-red-300 bg-red-50 p-4 text-red-800">
                    <h2 class="text-lg font-bold">{format!("Fall detected: {}", b.name)}</h2>
                    <p>{format!("Location: {:.6}, {:.6}", b.position.lat, b.position.lng)}</p>
                    {b.detected_at.map(|t| view! { <p>{format!("Time: {t}")}</p> })}
                    {b.call_status.map(|s| view! { <p>{format!("Call: {s}")}</p> })}
                    {b.message_status.map(|s| view! { <p>{format!("Message: {s}")}</p> })}
                </div>
            }
        })
    }
}
