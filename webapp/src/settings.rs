use dioxus::prelude::*;

use crate::components::{breakpoint::use_breakpoint, theme::use_theme};

// read-only view of the resolved theme
#[component]
pub fn Settings() -> Element {
    let theme = use_theme();
    let bucket = use_breakpoint().unwrap_or_default();

    let Some(theme) = theme else {
        return rsx! {
            section { class: "settings",
                p { "The theme is not available." }
            }
        };
    };

    rsx! {
        section { class: "settings",
            h1 { class: "section-title", "Appearance" }

            h2 { "Colors" }
            table {
                thead {
                    tr {
                        th { "Token" }
                        th { "Value" }
                        th {}
                    }
                }
                tbody {
                    for (name, token) in theme.tokens("colors") {
                        tr { key: "{name}",
                            td { code { "{name}" } }
                            td { "{token.value}" }
                            td {
                                span {
                                    class: "swatch",
                                    style: "background-color: {token.value};",
                                }
                            }
                        }
                    }
                }
            }

            h2 { "Breakpoints" }
            table {
                thead {
                    tr {
                        th { "Bucket" }
                        th { "From" }
                    }
                }
                tbody {
                    for bp in theme.breakpoints().iter() {
                        tr {
                            key: "{bp.name}",
                            class: if bp.name == bucket { "current" } else { "" },
                            td { "{bp.name}" }
                            td { "{bp.min_width}px" }
                        }
                    }
                }
            }
        }
    }
}
