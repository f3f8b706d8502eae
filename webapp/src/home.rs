use dioxus::prelude::*;
use dioxus_router::prelude::*;

use crate::{Route, components::theme::use_theme};

#[component]
pub fn Home() -> Element {
    let button = use_theme()
        .and_then(|theme| theme.recipe_classes("button", &[]))
        .unwrap_or_default();

    rsx! {
        section { class: "hero",
            h1 { class: "hero-title", "Task Manager App" }
            p { class: "hero-subtitle", "Keep track of what needs doing, and when." }
            div { class: "hero-actions",
                Link { to: Route::Settings {}, class: "{button}", "Appearance" }
            }
        }
    }
}
