use fallertrack_api::FallertrackClient;
use frontend::App;
use ui_common::Config;

fn main() {
    console_error_panic_hook::set_once();
    // Accept everything until the configured level is known
    if let Err(e) = console_log::init_with_level(log::Level::Trace) {
        leptos::logging::error!("Cannot initialize logger: {e}");
    }

    let config = Config::load();
    log::set_max_level(config.log_level.to_level_filter());
    log::info!("Using backend at {}", config.api_base_url);

    let client = match FallertrackClient::new(&config.api_base_url) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Invalid backend URL `{}`: {e}", config.api_base_url);
            return;
        }
    };

    leptos::mount_to_body(move || leptos::view! { <App config=config client=client/> })
}
