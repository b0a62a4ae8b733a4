use campaign_map_shared::controller::MapController;
use campaign_map_shared::navigator::DetailPanel;
use dioxus::prelude::*;

/// Short name for a map, taken from its descriptor file name.
fn map_label(data_path: &str) -> &str {
    let file = data_path.rsplit('/').next().unwrap_or(data_path);
    file.strip_suffix(".json").unwrap_or(file)
}

#[component]
pub fn DetailPanelView(
    controller: Signal<MapController>,
    on_enter: EventHandler<()>,
    on_back: EventHandler<()>,
) -> Element {
    let ctrl = controller.read();
    let panel = ctrl.detail_panel();
    let back_to = if ctrl.can_go_back() {
        ctrl.previous_map()
            .map(|m| format!("Torna a {}", map_label(&m.data_path)))
    } else {
        None
    };
    drop(ctrl);

    let body = match panel {
        DetailPanel::Placeholder => rsx! {
            p { class: "placeholder", "Seleziona un luogo sulla mappa per leggerne la descrizione." }
        },
        DetailPanel::LoadError(message) => rsx! {
            div { class: "map-load-error",
                h3 { "Mappa non disponibile" }
                p { "{message}" }
            }
        },
        DetailPanel::Poi {
            title,
            flavor,
            desc,
            enterable,
            ..
        } => rsx! {
            h3 { "{title}" }
            if !flavor.is_empty() {
                p { class: "flavor", em { "{flavor}" } }
            }
            // Descriptions are authored HTML from the campaign data.
            div { class: "desc", dangerous_inner_html: "{desc}" }
            if enterable {
                button {
                    class: "enter-button",
                    onclick: move |_| on_enter.call(()),
                    "ENTRA"
                }
            }
        },
    };

    rsx! {
        div { class: "panel map-detail",
            if let Some(back_to) = back_to {
                button {
                    class: "secondary back-button",
                    title: "{back_to}",
                    onclick: move |_| on_back.call(()),
                    "\u{2190} Indietro"
                }
            }
            {body}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_label_uses_file_stem() {
        assert_eq!(map_label("/static/data/maps/main_maps/map.json"), "map");
        assert_eq!(map_label("maps/porto.json"), "porto");
        assert_eq!(map_label("cripta"), "cripta");
    }
}
