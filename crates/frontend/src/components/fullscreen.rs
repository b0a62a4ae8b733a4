use campaign_map_shared::controller::{ContainerKind, MapController};
use dioxus::logger::tracing;
use dioxus::prelude::*;

use super::filter_bar::FilterBar;
use super::map_view::{MapView, INLINE_CONTAINER_ID};
use crate::coords;

/// Hand the content layer back to the inline container. View state starts over.
pub fn close_fullscreen(mut controller: Signal<MapController>, mut open: Signal<bool>) {
    open.set(false);
    let Some(size) = coords::element_size(INLINE_CONTAINER_ID) else {
        return;
    };
    if let Err(err) = controller
        .write()
        .switch_container(ContainerKind::Inline, size)
    {
        tracing::warn!("inline map container not usable: {err}");
    }
}

/// Modal viewer. Mounting its container moves the content layer into it.
#[component]
pub fn FullscreenMap(controller: Signal<MapController>, open: Signal<bool>) -> Element {
    let mut controller = controller;
    if !*open.read() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "map-modal-backdrop",
            tabindex: "0",
            onmounted: move |evt: Event<MountedData>| async move {
                let _ = evt.set_focus(true).await;
            },
            onkeydown: move |evt: Event<KeyboardData>| match evt.key() {
                Key::Escape => close_fullscreen(controller, open),
                Key::Character(c) if c == "r" || c == "R" => controller.write().double_click(),
                _ => {}
            },

            div { class: "map-modal",
                div { class: "map-modal-toolbar",
                    FilterBar { controller }
                    button {
                        class: "secondary close-fullscreen",
                        onclick: move |_| close_fullscreen(controller, open),
                        "Chiudi"
                    }
                }
                MapView { controller, kind: ContainerKind::Fullscreen }
            }
        }
    }
}
