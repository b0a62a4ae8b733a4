use campaign_map_shared::controller::{ClickOutcome, ContainerKind, DevAction, MapController};
use campaign_map_shared::geometry::{ImageBox, Point, Transform};
use campaign_map_shared::gesture::{ClickTarget, PointerButton};
use campaign_map_shared::models::MarkerDescriptor;
use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::logger::tracing;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use crate::{api, coords};

pub const INLINE_CONTAINER_ID: &str = "map-container";
pub const FULLSCREEN_CONTAINER_ID: &str = "map-fullscreen-container";

/// Resize events closer together than this collapse into one re-fit.
const RESIZE_SETTLE_MS: u32 = 150;

pub fn container_id(kind: ContainerKind) -> &'static str {
    match kind {
        ContainerKind::Inline => INLINE_CONTAINER_ID,
        ContainerKind::Fullscreen => FULLSCREEN_CONTAINER_ID,
    }
}

// ---------------------------------------------------------------------------
// Event translation
// ---------------------------------------------------------------------------

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

fn pointer_button(button: Option<MouseButton>) -> PointerButton {
    match button {
        Some(MouseButton::Primary) => PointerButton::Primary,
        Some(MouseButton::Secondary) => PointerButton::Secondary,
        Some(MouseButton::Auxiliary) => PointerButton::Middle,
        _ => PointerButton::Other,
    }
}

fn is_active(controller: Signal<MapController>, kind: ContainerKind) -> bool {
    controller.peek().container_kind() == kind
}

fn cursor_in(kind: ContainerKind, client_x: f64, client_y: f64) -> Option<Point> {
    coords::client_point_in(container_id(kind), client_x, client_y)
}

/// Dev-mode output goes to the log and the clipboard.
fn report_click(outcome: ClickOutcome) {
    match outcome {
        ClickOutcome::Background(DevAction::Template(line)) => api::copy_to_clipboard(line),
        ClickOutcome::Background(DevAction::Placed(record)) => match serde_json::to_string(&record) {
            Ok(json) => {
                tracing::info!("{json}");
                api::copy_to_clipboard(json);
            }
            Err(err) => tracing::warn!("could not serialize placement: {err}"),
        },
        ClickOutcome::Selected(id) => tracing::debug!(%id, "point of interest selected"),
        ClickOutcome::Suppressed | ClickOutcome::Background(DevAction::None) => {}
    }
}

// ---------------------------------------------------------------------------
// Styles
// ---------------------------------------------------------------------------

/// The content layer sits at the image box offset; the transform only carries pan and zoom.
fn content_style(image_box: Option<ImageBox>, transform: Transform) -> String {
    match image_box {
        Some(b) => format!(
            "left: {}px; top: {}px; width: {}px; height: {}px; transform: {}; transform-origin: 0 0;",
            b.left,
            b.top,
            b.width,
            b.height,
            transform.to_css()
        ),
        // Not fitted yet: keep the image in the DOM so it can report its size.
        None => "visibility: hidden; transform-origin: 0 0;".to_string(),
    }
}

/// Markers ride inside the scaled layer; counter-scale so they keep a constant on-screen size.
fn marker_style(marker: &MarkerDescriptor, scale: f64) -> String {
    let counter = if scale > 0.0 { 1.0 / scale } else { 1.0 };
    format!(
        "left: {}%; top: {}%; transform: translate(-50%, -50%) scale({counter});",
        marker.x, marker.y
    )
}

/// CSS-safe form of a POI category.
pub fn kind_slug(kind: &str) -> String {
    let mut slug = String::with_capacity(kind.len());
    for c in kind.trim().chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

fn marker_class(marker: &MarkerDescriptor) -> String {
    let mut class = format!("map-marker kind-{}", kind_slug(&marker.kind));
    if marker.active {
        class.push_str(" active");
    }
    if marker.enterable {
        class.push_str(" enterable");
    }
    class
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// One map container. Only the container matching the controller's active kind
/// hosts the content layer; the other shows a placeholder.
#[component]
pub fn MapView(controller: Signal<MapController>, kind: ContainerKind) -> Element {
    // Signal is Copy; the handlers below each capture their own mutable copy.
    let mut controller = controller;
    let id = container_id(kind);
    let image_id = format!("{id}-image");
    let mut resize_tick = use_signal(|| 0_u64);

    let ctrl = controller.read();
    let active = ctrl.container_kind() == kind;
    let panning = active && ctrl.is_panning();
    let zoomed = ctrl.viewport().is_zoomed();
    let image_path = ctrl.image_path().map(str::to_string);
    let image_failed = ctrl.image_failed();
    let transform = ctrl.transform();
    let layer_style = content_style(ctrl.viewport().image_box(), transform);
    let markers = ctrl.markers();
    drop(ctrl);

    let container_class = match (panning, zoomed) {
        (true, _) => "map-container dragging",
        (false, true) => "map-container zoomable",
        (false, false) => "map-container",
    };

    rsx! {
        div {
            id: id,
            class: container_class,

            onmounted: move |_| {
                let Some(size) = coords::element_size(id) else { return };
                if let Err(err) = controller.write().switch_container(kind, size) {
                    tracing::warn!("map container not usable: {err}");
                }
            },

            onresize: move |_| {
                if !is_active(controller, kind) {
                    return;
                }
                let tick = *resize_tick.peek() + 1;
                resize_tick.set(tick);
                spawn(async move {
                    TimeoutFuture::new(RESIZE_SETTLE_MS).await;
                    if *resize_tick.peek() != tick {
                        return;
                    }
                    let Some(size) = coords::element_size(id) else { return };
                    if let Err(err) = controller.write().resize(size) {
                        tracing::debug!("ignoring resize: {err}");
                    }
                });
            },

            onwheel: move |evt: Event<WheelData>| {
                if !is_active(controller, kind) {
                    return;
                }
                evt.prevent_default();
                let delta_y = wheel_delta_y(evt.data().delta());
                let client = evt.data().client_coordinates();
                let Some(cursor) = cursor_in(kind, client.x, client.y) else { return };
                controller.write().wheel(delta_y, cursor);
            },

            onmousedown: move |evt: Event<MouseData>| {
                if !is_active(controller, kind) {
                    return;
                }
                let client = evt.client_coordinates();
                let Some(cursor) = cursor_in(kind, client.x, client.y) else { return };
                let over_content = controller.peek().viewport().is_over_content(cursor);
                controller
                    .write()
                    .pointer_down(pointer_button(evt.trigger_button()), cursor, over_content);
            },

            onmousemove: move |evt: Event<MouseData>| {
                if !controller.peek().is_panning() || !is_active(controller, kind) {
                    return;
                }
                let client = evt.client_coordinates();
                let Some(cursor) = cursor_in(kind, client.x, client.y) else { return };
                controller.write().pointer_move(cursor);
            },

            // Release is handled window-wide by `ReleaseListener`.

            ondoubleclick: move |evt: Event<MouseData>| {
                evt.prevent_default();
                if is_active(controller, kind) {
                    controller.write().double_click();
                }
            },

            if active {
                div {
                    class: "map-content",
                    style: "{layer_style}",
                    onclick: move |evt: Event<MouseData>| {
                        let client = evt.client_coordinates();
                        let Some(cursor) = cursor_in(kind, client.x, client.y) else { return };
                        let outcome = controller.write().click(cursor, ClickTarget::Background);
                        report_click(outcome);
                    },

                    if let Some(path) = image_path {
                        img {
                            id: "{image_id}",
                            src: api::asset_url(&path),
                            alt: "Mappa",
                            draggable: "false",
                            onload: {
                                let path = path.clone();
                                let image_id = image_id.clone();
                                move |_| {
                                    let Some(size) = coords::image_natural_size(&image_id) else { return };
                                    if let Err(err) = controller.write().image_loaded(&path, size) {
                                        tracing::warn!("{err}");
                                    }
                                }
                            },
                            onerror: {
                                let path = path.clone();
                                move |_| {
                                    let err = controller.write().image_load_failed(&path);
                                    tracing::debug!("{err}");
                                }
                            },
                        }
                    }

                    for marker in markers {
                        div {
                            key: "{marker.id}",
                            class: marker_class(&marker),
                            style: marker_style(&marker, transform.scale),
                            hidden: !marker.visible,
                            title: "{marker.label}",
                            onclick: {
                                let marker_id = marker.id.clone();
                                move |evt: Event<MouseData>| {
                                    evt.stop_propagation();
                                    let client = evt.client_coordinates();
                                    let Some(cursor) = cursor_in(kind, client.x, client.y) else { return };
                                    let outcome = controller
                                        .write()
                                        .click(cursor, ClickTarget::Marker(marker_id.clone()));
                                    report_click(outcome);
                                }
                            },
                            span { class: "map-marker-pin" }
                            span { class: "map-marker-label", "{marker.label}" }
                        }
                    }
                }

                if image_failed {
                    div { class: "map-image-error", "Immagine della mappa non disponibile" }
                }
            } else {
                div { class: "map-placeholder", "Mappa aperta a schermo intero" }
            }
        }
    }
}
