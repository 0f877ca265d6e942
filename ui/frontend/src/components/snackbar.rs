use leptos::*;
use ui_common::{Action, Severity};

use crate::DashboardContext;

#[component]
pub fn SosSnackbar() -> impl IntoView {
    let ctx = expect_context::<DashboardContext>();
    let hide_after = ctx.config().snackbar_hide_after;
    let snackbar = create_memo(move |_| ctx.state.with(|s| s.snackbar.clone()));

    create_effect(move |_| {
        if let Some(id) = snackbar.with(|s| s.as_ref().map(|s| s.id)) {
            set_timeout(move || ctx.dispatch(Action::HideSnackbar(id)), hide_after);
        }
    });

    move || {
        snackbar.get().map(|s| {
            let colors = match s.severity {
                Severity::Error => "bg-red-600",
                Severity::Success => "bg-green-600",
            };
            view! {
                <div
                    role="status"
                    data-severity=s.severity.as_str()
                    class=format!("fixed bottom-4 left-1/2 -translate-x-1/2 z-30 rounded-lg px-4 py-3 text-white shadow {colors}")
                >
                    {s.message}
                </div>
            }
        })
    }
}
