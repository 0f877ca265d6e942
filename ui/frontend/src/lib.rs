use std::rc::Rc;

use fallertrack_api::FallertrackClient;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use ui_common::Config;

mod components;
mod dashboard;
mod pages;
mod scheduler;

use crate::pages::{about::About, home::Home};

pub use dashboard::DashboardContext;

/// Services shared by every page
#[derive(Clone)]
pub struct AppContext {
    pub config: Rc<Config>,
    pub client: FallertrackClient,
}

const NAV_LINK: &str = "block rounded px-3 py-2 text-content-1 hover:bg-bkg-2 sm:px-0 sm:py-0 sm:hover:bg-transparent sm:hover:text-blue-700";

#[component]
fn Navbar() -> impl IntoView {
    let (menu_open, set_menu_open) = create_signal(false);
    let links = move || {
        view! {
            <ul class="flex flex-col gap-1 rounded-lg border border-bkg-2 bg-bkg-1 p-2 font-medium sm:flex-row sm:gap-6 sm:border-0 sm:p-0">
                <li><a href="/" class=NAV_LINK>"Map"</a></li>
                <li><a href="/about" class=NAV_LINK>"About"</a></li>
            </ul>
        }
    };

    view! {
        <nav class="fixed top-0 z-20 w-full border-b border-bkg-2 bg-bkg-1">
            <div class="mx-auto flex max-w-screen-xl flex-wrap items-center justify-between px-4 py-3">
                <a href="/" class="text-2xl font-semibold text-content-1">"FallerTrack"</a>
                <button
                    on:click=move |_| set_menu_open.update(|open| *open = !*open)
                    type="button"
                    class="rounded-lg border border-bkg-2 px-3 py-1 text-sm text-content-1 sm:hidden"
                    aria-controls="nav-links"
                    aria-expanded=move || menu_open.get().to_string()
                >
                    "Menu"
                </button>
                <Show when=move || menu_open.get() fallback=move || view! { <div class="hidden sm:block">{links}</div> }>
                    <div class="w-full sm:w-auto" id="nav-links">
                        {links}
                    </div>
                </Show>
            </div>
        </nav>
    }
}

#[component]
pub fn App(config: Config, client: FallertrackClient) -> impl IntoView {
    provide_meta_context();
    provide_context(AppContext {
        config: Rc::new(config),
        client,
    });

    view! {
        <Html lang="en"/>
        <Title text="FallerTrack"/>

        <Meta charset="UTF-8"/>
        <Meta name="viewport" content="width=device-width, initial-scale=1.0"/>

        <div class="bg-bkg-2 min-h-screen">
            <Navbar/>
            <Router>
                <main class="pt-[4rem]">
                    <Routes>
                        <Route path="/" view=Home/>
                        <Route path="/about" view=About/>
                        <Route path="/*any" view=|| view! { <p class="p-4">"Not found."</p> }/>
                    </Routes>
                </main>
            </Router>
        </div>
    }
}
