use std::{cell::RefCell, rc::Rc};

use leptos::*;
use ui_common::{DashboardState, Poller, Scheduler};

use crate::{
    components::{
        fall_alert::FallAlert, geofence_controls::GeofenceControls, home_info::HomeInfo,
        map::Map, person_card::PersonCard, snackbar::SosSnackbar, sos_locations::SosLocations,
    },
    scheduler::LeptosTimer,
    AppContext, DashboardContext,
};

#[component]
pub fn Home() -> impl IntoView {
    let app = expect_context::<AppContext>();
    let scheduler = Rc::new(RefCell::new(Scheduler::new(LeptosTimer)));
    let ctx = DashboardContext::new(&app, scheduler.borrow().session_guard());
    provide_context(ctx);

    ctx.load_home();

    let intervals = app.config.intervals.clone();
    {
        let mut scheduler = scheduler.borrow_mut();

        scheduler.register(
            Poller::FallAlert,
            Poller::FallAlert.interval(&intervals),
            move |guard| ctx.poll_fall_alert(guard),
        );

        scheduler.register(
            Poller::ActivitySummary,
            Poller::ActivitySummary.interval(&intervals),
            move |guard| ctx.poll_summary(guard),
        );
    }

    let state = ctx.state;

    let live_refresh = create_memo(move |_| state.with(|s| s.live_refresh));
    {
        let scheduler = scheduler.clone();
        let period = Poller::LiveLocation.interval(&intervals);
        create_effect(move |_| {
            if live_refresh.get() {
                scheduler
                    .borrow_mut()
                    .register(Poller::LiveLocation, period, move |guard| {
                        ctx.poll_live_location(guard)
                    });
            } else {
                scheduler.borrow_mut().cancel(Poller::LiveLocation);
            }
        });
    }

    // SOS services are only polled while their panel is open
    let sos_open = create_memo(move |_| state.with(|s| s.sos.open));
    {
        let scheduler = scheduler.clone();
        let period = Poller::SosLocations.interval(&intervals);
        create_effect(move |_| {
            if sos_open.get() {
                scheduler
                    .borrow_mut()
                    .register(Poller::SosLocations, period, move |guard| {
                        ctx.poll_sos_locations(guard)
                    });
            } else {
                scheduler.borrow_mut().cancel(Poller::SosLocations);
            }
        });
    }

    on_cleanup(move || {
        log::debug!("Leaving map, stopping pollers");
        scheduler.borrow_mut().shutdown();
    });

    let scene = create_memo(move |_| state.with(DashboardState::scene));

    view! {
        <div class="flex flex-col gap-4 p-4 max-w-screen-xl mx-auto">
            <FallAlert/>
            <Show
                when=move || scene.with(Option::is_some)
                fallback=|| view! { <div class="h-[60vh] flex items-center justify-center text-content-2">"Loading map..."</div> }
            >
                <Map scene=scene/>
            </Show>
            <div class="grid gap-4 md:grid-cols-2">
                <PersonCard/>
                <div class="flex flex-col gap-4">
                    <HomeInfo/>
                    <GeofenceControls/>
                </div>
            </div>
            <SosLocations/>
            <SosSnackbar/>
        </div>
    }
}
