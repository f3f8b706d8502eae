#![allow(non_snake_case)]
use dioxus::prelude::*;
use dioxus_router::prelude::*;

use tracing::{Level, error};

mod style;

mod components;
use components::{
    breakpoint::BreakpointProvider,
    navigation::NavBar,
    theme::{ThemeProvider, install_theme},
    user_menu::UserMenu,
};

mod home;
use home::Home;

mod settings;
use settings::Settings;

fn main() {
    dioxus_logger::init(Level::DEBUG).expect("failed to init logger");

    // a broken theme is a startup failure, not something to paper over at render time
    if let Err(err) = install_theme() {
        error!("{err:#}");
        panic!("invalid theme configuration: {err:#}");
    }

    launch(App);
}

#[derive(Clone, PartialEq, Routable)]
#[rustfmt::skip]
enum Route {
    #[layout(AppShell)]
        #[route("/")]
        Home {},
        #[route("/settings")]
        Settings {},
    #[end_layout]
    #[route("/:..segments")]
    PageNotFound { segments: Vec<String> },
}

#[component]
pub fn App() -> Element {
    rsx! {
        style { "{style::APP_STYLES}" }
        ThemeProvider {
            BreakpointProvider {
                Router::<Route> {}
            }
        }
    }
}

#[component]
fn AppShell() -> Element {
    rsx! {
        NavBar { menu: rsx! { UserMenu {} } }
        main { class: "page-content", Outlet::<Route> {} }
    }
}

#[component]
fn PageNotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");

    rsx! {
        section { class: "not-found",
            h1 { class: "section-title", "Page not found" }
            p { "Nothing lives at /{path}." }
            Link { to: Route::Home {}, "Back to the start" }
        }
    }
}
