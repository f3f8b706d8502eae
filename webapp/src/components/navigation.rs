use dioxus::prelude::*;
use dioxus_router::prelude::*;
use tracing::debug;

use common::{
    BarLayout, VisibilityPolicy,
    layout::BarSlot,
};

use crate::components::{breakpoint::use_breakpoint, theme::use_theme};

// the sticky top bar: brand link on the left, the supplied menu on the right
//
// renders nothing until both the theme and the breakpoint state are available; a missing
// provider must never take the page down with it
#[component]
pub fn NavBar(menu: Element) -> Element {
    let theme = use_theme();
    let bucket = use_breakpoint();
    let policy = use_hook(VisibilityPolicy::default);

    let layout = match BarLayout::resolve(theme, bucket.as_deref(), &policy) {
        Ok(layout) => layout,
        Err(err) => {
            debug!("navigation bar not rendered: {err}");
            return rsx! {};
        }
    };

    let container = layout.container_style();
    let brand = layout.brand;
    let brand_style = brand.style();

    rsx! {
        header {
            class: "app-header",
            "data-bucket": "{layout.bucket}",
            style: "{container}",
            for slot in layout.slots {
                if slot == BarSlot::Brand {
                    Link {
                        key: "brand",
                        to: brand.to,
                        class: "{brand.class}",
                        style: "{brand_style}",
                        "{brand.label}"
                    }
                } else {
                    div { key: "actions", class: "nav-actions", {menu.clone()} }
                }
            }
        }
    }
}
