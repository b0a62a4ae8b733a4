use dioxus::prelude::*;

#[component]
pub fn HelpOverlay(show: Signal<bool>) -> Element {
    if !*show.read() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "help-overlay-backdrop",
            onclick: move |_| show.set(false),

            div {
                class: "help-overlay",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),

                h2 { "Come usare la mappa" }

                div { class: "shortcut-section",
                    h3 { "Navigazione" }
                    div { class: "shortcut-row",
                        span { class: "shortcut-keys", "Rotella" }
                        span { "Zoom centrato sul cursore" }
                    }
                    div { class: "shortcut-row",
                        span { class: "shortcut-keys", "Trascina" }
                        span { "Sposta la mappa (solo con zoom attivo)" }
                    }
                    div { class: "shortcut-row",
                        span { class: "shortcut-keys", "Doppio clic" }
                        span { "Ripristina la vista" }
                    }
                }

                div { class: "shortcut-section",
                    h3 { "Schermo intero" }
                    div { class: "shortcut-row",
                        span { class: "shortcut-keys", kbd { "Esc" } }
                        span { "Chiudi la mappa a schermo intero" }
                    }
                    div { class: "shortcut-row",
                        span { class: "shortcut-keys", kbd { "R" } }
                        span { "Ripristina la vista" }
                    }
                }

                div { class: "help-divider" }

                div { class: "help-info-section",
                    h3 { "Luoghi" }
                    p { "Clicca un segnaposto per leggerne la descrizione. I luoghi con una mappa interna mostrano il pulsante ENTRA; il pulsante Indietro riporta alla mappa precedente." }
                }

                div { class: "help-info-section",
                    h3 { "Filtri" }
                    p { "Le categorie nella barra dei filtri nascondono o mostrano i segnaposto senza cambiare la selezione." }
                }

                button {
                    class: "close-help",
                    onclick: move |_| show.set(false),
                    "Chiudi"
                }
            }
        }
    }
}
