use campaign_map_shared::controller::MapController;
use campaign_map_shared::models::PlacementRecord;
use dioxus::logger::tracing;
use dioxus::prelude::*;
use serde::Serialize;

use crate::api;

/// Clipboard payload for the placements made in this session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlacementExport<'a> {
    map: &'a str,
    placements: Vec<PlacementRecord>,
}

fn export_json(map: &str, placements: Vec<PlacementRecord>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&PlacementExport { map, placements })
}

/// Placement helpers, shown only in dev mode.
#[component]
pub fn DevTools(controller: Signal<MapController>) -> Element {
    let mut controller = controller;
    let mut exported = use_signal(|| None::<String>);

    let ctrl = controller.read();
    if !ctrl.config().dev_mode {
        return rsx! {};
    }
    let picked = ctrl.navigator().picked().map(str::to_string);
    let unplaced: Vec<(String, String)> = ctrl
        .navigator()
        .unplaced_pois()
        .into_iter()
        .map(|poi| (poi.id.clone(), poi.title.clone()))
        .collect();
    let pending = ctrl.navigator().pending_placements().len();
    drop(ctrl);

    rsx! {
        div { class: "panel dev-tools",
            h3 { "Strumenti di posizionamento" }
            if let Some(id) = &picked {
                p { class: "dev-hint", "Clicca sulla mappa per posizionare " strong { "{id}" } "." }
            } else {
                p { class: "dev-hint", "Clicca sulla mappa per copiare un nuovo punto negli appunti." }
            }
            if unplaced.is_empty() {
                p { class: "placeholder", "Tutti i luoghi sono posizionati." }
            }
            ul { class: "dev-unplaced",
                for (id, title) in unplaced {
                    li { key: "{id}",
                        button {
                            class: if picked.as_deref() == Some(id.as_str()) { "active" } else { "secondary" },
                            onclick: {
                                let id = id.clone();
                                move |_| {
                                    if let Err(err) = controller.write().navigator_mut().pick_for_placement(&id) {
                                        tracing::warn!("{err}");
                                    }
                                }
                            },
                            "{title}"
                        }
                    }
                }
            }
            div { style: "margin-top: 8px;",
                button {
                    disabled: pending == 0,
                    onclick: move |_| {
                        let ctrl = controller.read();
                        let map = ctrl
                            .navigator()
                            .active()
                            .map(|m| m.data_path.clone())
                            .unwrap_or_default();
                        match export_json(&map, ctrl.navigator().pending_placements()) {
                            Ok(json) => {
                                tracing::info!("{json}");
                                api::copy_to_clipboard(json.clone());
                                exported.set(Some(json));
                            }
                            Err(err) => tracing::warn!("could not export placements: {err}"),
                        }
                    },
                    "Esporta posizioni"
                }
            }
            if let Some(json) = &*exported.read() {
                textarea { class: "dev-export", readonly: true, rows: "8", value: "{json}" }
            }
        }
    }
}
