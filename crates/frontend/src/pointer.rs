use campaign_map_shared::controller::MapController;
use dioxus::logger::tracing;
use dioxus::prelude::*;
use wasm_bindgen::{closure::Closure, JsCast};

const RELEASE_EVENT: &str = "mouseup";

/// Ends a pan wherever the button is released, not only over the map.
pub struct ReleaseListener {
    callback: Closure<dyn FnMut(web_sys::MouseEvent)>,
}

impl ReleaseListener {
    pub fn install(mut controller: Signal<MapController>) -> Option<Self> {
        let window = web_sys::window()?;
        let callback = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            if controller.peek().is_panning() {
                controller.write().pointer_up();
            }
        }) as Box<dyn FnMut(_)>);

        if let Err(err) =
            window.add_event_listener_with_callback(RELEASE_EVENT, callback.as_ref().unchecked_ref())
        {
            tracing::warn!("could not listen for mouse release: {err:?}");
            return None;
        }
        Some(ReleaseListener { callback })
    }
}

impl Drop for ReleaseListener {
    fn drop(&mut self) {
        let Some(window) = web_sys::window() else { return };
        if let Err(err) = window
            .remove_event_listener_with_callback(RELEASE_EVENT, self.callback.as_ref().unchecked_ref())
        {
            tracing::debug!("could not remove mouse release listener: {err:?}");
        }
    }
}
