//! Platform glue: future spawning, file delivery and the print dialog.

use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Native,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Native
        }
    }
}

/// Runs a detached future on the current executor.
#[cfg(target_arch = "wasm32")]
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// Runs a detached future on the current executor.
///
/// Must be called from within a Dioxus runtime (event handlers, effects).
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    dioxus::prelude::spawn(future);
}

/// Opens the platform print dialog for the current page.
#[cfg(target_arch = "wasm32")]
pub fn print_page() {
    match web_sys::window() {
        Some(window) => {
            if let Err(err) = window.print() {
                tracing::warn!(?err, "print dialog unavailable");
            }
        }
        None => tracing::warn!("print requested without a window"),
    }
}

/// Opens the platform print dialog for the current page.
#[cfg(not(target_arch = "wasm32"))]
pub fn print_page() {
    tracing::warn!("print requested on a target without a print dialog");
}

/// Hands `bytes` to the user as a file named `filename`.
///
/// In the browser this starts a download and returns `Ok(None)`; natively the
/// file is written to the download directory and its path is returned.
#[cfg(target_arch = "wasm32")]
pub fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Option<String>, String> {
    use wasm_bindgen::JsCast;

    let window = web_sys::window().ok_or("window unavailable")?;
    let document = window.document().ok_or("document unavailable")?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes.as_slice()));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|_| "Unable to create blob")?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Unable to create object URL")?;

    let anchor = document
        .create_element("a")
        .map_err(|_| "Unable to create anchor")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "Anchor cast failed")?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    web_sys::Url::revoke_object_url(&url).ok();
    Ok(None)
}

/// Hands `bytes` to the user as a file named `filename`.
///
/// In the browser this starts a download and returns `Ok(None)`; natively the
/// file is written to the download directory and its path is returned.
#[cfg(not(target_arch = "wasm32"))]
pub fn download_bytes(
    filename: &str,
    _mime: &str,
    bytes: Vec<u8>,
) -> Result<Option<String>, String> {
    let dir = directories::UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(|path| path.to_path_buf()))
        .or_else(|| std::env::current_dir().ok())
        .ok_or("No download directory available")?;
    let path = dir.join(filename);
    std::fs::write(&path, bytes).map_err(|err| err.to_string())?;
    Ok(Some(path.display().to_string()))
}
