use std::rc::Rc;

use dioxus::prelude::*;
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, closure::Closure};

use crate::components::theme::use_theme;

#[derive(Clone, Copy)]
struct BreakpointContext {
    bucket: Memo<Option<String>>,
}

fn viewport_width() -> Option<f64> {
    web_sys::window()?.inner_width().ok()?.as_f64()
}

// the bucket the viewport currently falls into
//
// reading this subscribes the calling component, so it re-renders on every bucket change
pub fn use_breakpoint() -> Option<String> {
    try_use_context::<BreakpointContext>().and_then(|ctx| ctx.bucket.read().clone())
}

// tracks window.innerWidth and derives the bucket from the theme's breakpoints
//
// must sit inside a ThemeProvider; without a theme there is nothing to bucket against and
// the bucket stays None
#[component]
pub fn BreakpointProvider(children: Element) -> Element {
    let theme = use_theme();
    let mut width = use_signal(|| viewport_width().unwrap_or(0.0));

    let listener = use_hook(move || {
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(w) = viewport_width() {
                width.set(w);
            }
        });

        match web_sys::window() {
            Some(window) => {
                if window
                    .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
                    .is_err()
                {
                    warn!("failed to register resize listener");
                }
            }
            None => warn!("no global window, breakpoints will not follow the viewport"),
        }

        Rc::new(closure)
    });

    use_drop(move || {
        if let Some(window) = web_sys::window() {
            if window
                .remove_event_listener_with_callback("resize", (*listener).as_ref().unchecked_ref())
                .is_err()
            {
                warn!("failed to remove resize listener");
            }
        }
    });

    let bucket = use_memo(move || {
        let bucket = theme.map(|t| t.breakpoints().bucket_for(width()).to_owned());
        debug!(width = width(), bucket = ?bucket, "viewport bucket");
        bucket
    });

    use_context_provider(|| BreakpointContext { bucket });

    rsx! {
        {children}
    }
}
