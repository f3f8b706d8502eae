use dioxus::prelude::*;
use dioxus_router::prelude::*;

use crate::{Route, components::theme::use_theme};

#[component]
pub fn UserMenu() -> Element {
    let mut open = use_signal(|| false);

    let trigger = use_theme()
        .and_then(|theme| theme.recipe_classes("button", &[("visual", "ghost"), ("size", "sm")]))
        .unwrap_or_default();

    rsx! {
        div { class: "user-menu",
            button {
                class: "{trigger}",
                "aria-haspopup": "menu",
                "aria-expanded": "{open}",
                onclick: move |_| open.set(!open()),
                "Account"
            }
            if open() {
                ul { class: "user-menu-items", role: "menu",
                    li { role: "menuitem",
                        Link {
                            to: Route::Home {},
                            onclick: move |_| open.set(false),
                            "Home"
                        }
                    }
                    li { role: "menuitem",
                        Link {
                            to: Route::Settings {},
                            onclick: move |_| open.set(false),
                            "Appearance"
                        }
                    }
                }
            }
        }
    }
}
