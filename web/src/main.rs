use dioxus::prelude::*;

use ui::components::ToastHost;
use ui::core::DashboardConfig;
use ui::views::{Dashboard, DashboardStats};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    if let Err(err) = dioxus::logger::init(tracing::Level::INFO) {
        eprintln!("[logging] subscriber already installed: {err}");
    }
    tracing::info!("HeyReach Exporter loaded!");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();
    // Server-provided settings are read once, then passed down explicitly.
    use_context_provider(DashboardConfig::from_window);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ToastHost {
            Router::<Route> {}
        }
    }
}

#[component]
fn Home() -> Element {
    let stats = use_hook(DashboardStats::from_window);

    rsx! {
        Dashboard { stats }
    }
}
