mod api;
mod components;
mod coords;
mod pages;
mod pointer;

use dioxus::prelude::*;

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[route("/")]
    Home {},
    #[route("/:..segments")]
    Fallback { segments: Vec<String> },
}

#[component]
fn Home() -> Element {
    rsx! {
        pages::map_page::MapPage {}
    }
}

/// Every other page path still lands on the map; the static server answers them with `index.html`.
#[component]
fn Fallback(segments: Vec<String>) -> Element {
    rsx! {
        pages::map_page::MapPage {}
    }
}

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: CSS }
        Router::<Route> {}
    }
}

fn main() {
    launch(App);
}
