use campaign_map_shared::controller::MapController;
use dioxus::prelude::*;

use super::map_view::kind_slug;

/// Category toggles plus the global marker switch.
#[component]
pub fn FilterBar(controller: Signal<MapController>) -> Element {
    let mut controller = controller;

    let ctrl = controller.read();
    let navigator = ctrl.navigator();
    let kinds: Vec<(String, String, bool)> = navigator
        .descriptor()
        .kinds()
        .into_iter()
        .map(|kind| {
            let shown = navigator.is_kind_shown(&kind);
            (kind_slug(&kind), kind, shown)
        })
        .collect();
    let markers_visible = navigator.markers_visible();
    drop(ctrl);

    if kinds.is_empty() {
        return rsx! {};
    }

    rsx! {
        div { class: "map-filter-bar",
            button {
                class: if markers_visible { "active" } else { "secondary" },
                onclick: move |_| {
                    controller.write().navigator_mut().toggle_markers();
                },
                if markers_visible { "Nascondi luoghi" } else { "Mostra luoghi" }
            }
            button {
                class: "secondary",
                onclick: move |_| controller.write().navigator_mut().show_all_types(),
                "Tutti"
            }
            for (slug, kind, shown) in kinds {
                label {
                    key: "{kind}",
                    class: "filter-chip kind-{slug}",
                    input {
                        r#type: "checkbox",
                        checked: shown,
                        disabled: !markers_visible,
                        onchange: {
                            let kind = kind.clone();
                            move |_| controller.write().navigator_mut().toggle_type(&kind)
                        },
                    }
                    "{kind}"
                }
            }
        }
    }
}
