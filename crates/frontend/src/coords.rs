use campaign_map_shared::geometry::{Point, Size};
use wasm_bindgen::JsCast;

/// Convert client (viewport) coordinates to container-relative pixel coordinates.
pub fn client_to_container(client_x: f64, client_y: f64, rect_left: f64, rect_top: f64) -> Point {
    Point::new(client_x - rect_left, client_y - rect_top)
}

fn element_rect(element_id: &str) -> Option<web_sys::DomRect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(element_id)?;
    Some(element.get_bounding_client_rect())
}

/// Rendered size of an element. `None` while it is not in the DOM.
pub fn element_size(element_id: &str) -> Option<Size> {
    let rect = element_rect(element_id)?;
    Some(Size::new(rect.width(), rect.height()))
}

/// Cursor position relative to the top-left corner of `element_id`.
pub fn client_point_in(element_id: &str, client_x: f64, client_y: f64) -> Option<Point> {
    let rect = element_rect(element_id)?;
    Some(client_to_container(client_x, client_y, rect.left(), rect.top()))
}

/// Intrinsic pixel size of a loaded `<img>`.
pub fn image_natural_size(element_id: &str) -> Option<Size> {
    let document = web_sys::window()?.document()?;
    let image = document
        .get_element_by_id(element_id)?
        .dyn_into::<web_sys::HtmlImageElement>()
        .ok()?;
    Some(Size::new(
        f64::from(image.natural_width()),
        f64::from(image.natural_height()),
    ))
}
