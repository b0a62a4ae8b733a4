use std::rc::Rc;

use campaign_map_shared::config::MapConfig;
use campaign_map_shared::controller::{ContainerKind, MapController};
use campaign_map_shared::navigator::LoadTicket;
use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::api;
use crate::components::detail_panel::DetailPanelView;
use crate::components::dev_tools::DevTools;
use crate::components::filter_bar::FilterBar;
use crate::components::fullscreen::FullscreenMap;
use crate::components::help_overlay::HelpOverlay;
use crate::components::map_view::MapView;
use crate::pointer::ReleaseListener;

/// Placement tools ship only in debug builds.
fn map_config() -> MapConfig {
    MapConfig {
        dev_mode: cfg!(debug_assertions),
        ..MapConfig::default()
    }
}

fn new_controller() -> MapController {
    MapController::new(map_config()).unwrap_or_else(|err| {
        tracing::error!("invalid map configuration, using defaults: {err}");
        MapController::default()
    })
}

/// Fetch the descriptor for `ticket` and hand the result back to the controller.
/// Superseded loads are dropped by the controller.
fn run_load(mut controller: Signal<MapController>, ticket: LoadTicket) {
    spawn(async move {
        let result = api::fetch_descriptor(&ticket.target().data_path).await;
        if let Err(err) = controller.write().complete_load(ticket, result) {
            if !err.is_stale() {
                tracing::warn!("map load failed: {err}");
            }
        }
    });
}

#[component]
pub fn MapPage() -> Element {
    let mut controller = use_signal(new_controller);
    let mut fullscreen = use_signal(|| false);
    let mut show_help = use_signal(|| false);

    use_hook(move || {
        let ticket = controller.write().start();
        run_load(controller, ticket);
    });
    // Dropped with the page, which removes the listener.
    use_hook(move || Rc::new(ReleaseListener::install(controller)));

    let is_fullscreen = controller.read().container_kind() == ContainerKind::Fullscreen;

    rsx! {
        div { class: "map-page",
            div { class: "map-main",
                div { class: "map-toolbar",
                    FilterBar { controller }
                    button {
                        class: "secondary",
                        disabled: is_fullscreen,
                        onclick: move |_| fullscreen.set(true),
                        "Schermo intero"
                    }
                    button {
                        class: "secondary",
                        onclick: move |_| show_help.set(true),
                        "?"
                    }
                }
                MapView { controller, kind: ContainerKind::Inline }
            }

            div { class: "sidebar",
                DetailPanelView {
                    controller,
                    on_enter: move |_| {
                        let ticket = controller.write().enter_selected();
                        if let Some(ticket) = ticket {
                            run_load(controller, ticket);
                        }
                    },
                    on_back: move |_| {
                        let ticket = controller.write().go_back();
                        if let Some(ticket) = ticket {
                            run_load(controller, ticket);
                        }
                    },
                }
                DevTools { controller }
            }

            FullscreenMap { controller, open: fullscreen }
            HelpOverlay { show: show_help }
        }
    }
}
