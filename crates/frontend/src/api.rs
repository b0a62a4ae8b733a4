use campaign_map_shared::models::MapDescriptor;
use campaign_map_shared::MapError;

/// Resolve a descriptor or image path from map data into a URL on the static server.
///
/// Absolute paths and full URLs pass through; relative paths live under `/static`.
pub fn asset_url(path: &str) -> String {
    let path = path.trim();
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with('/') {
        path.to_string()
    } else {
        format!("/static/{}", path.trim_start_matches("./"))
    }
}

fn origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

fn absolute_url(path: &str) -> Result<String, MapError> {
    let url = asset_url(path);
    if url.starts_with("http") {
        return Ok(url);
    }
    // reqwest needs an absolute URL even in the browser.
    let origin = origin().ok_or_else(|| MapError::Fetch {
        path: path.to_string(),
        reason: "no window origin".to_string(),
    })?;
    Ok(format!("{origin}{url}"))
}

pub async fn fetch_descriptor(path: &str) -> Result<MapDescriptor, MapError> {
    let fetch_err = |reason: String| MapError::Fetch {
        path: path.to_string(),
        reason,
    };

    let resp = reqwest::Client::new()
        .get(absolute_url(path)?)
        .send()
        .await
        .map_err(|e| fetch_err(e.to_string()))?
        .error_for_status()
        .map_err(|e| fetch_err(e.to_string()))?;
    let body = resp.text().await.map_err(|e| fetch_err(e.to_string()))?;

    MapDescriptor::from_json(path, &body)
}

/// Fire-and-forget clipboard write. Failures are ignored; the text is also logged by the caller.
pub fn copy_to_clipboard(text: String) {
    wasm_bindgen_futures::spawn_local(async move {
        if let Some(window) = web_sys::window() {
            let clipboard = window.navigator().clipboard();
            let _ = wasm_bindgen_futures::JsFuture::from(clipboard.write_text(&text)).await;
        }
    });
}
