//! Plain-text file download through a `Blob` object URL.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

/// Make a string safe as part of a download filename.
pub fn sanitize_filename_part(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();
    if cleaned.is_empty() { "untitled".to_owned() } else { cleaned }
}

/// Offer `content` as a `text/plain` download named `filename`.
///
/// # Errors
///
/// Returns an error string when the browser APIs are unavailable or fail.
pub fn download_text(filename: &str, content: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(content));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type("text/plain");
        let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
            .map_err(|_| "could not create file".to_owned())?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|_| "could not create file URL".to_owned())?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| "document unavailable".to_owned())?;
        let anchor = document
            .create_element("a")
            .map_err(|_| "could not create link".to_owned())?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| "could not create link".to_owned())?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.click();

        let _ = web_sys::Url::revoke_object_url(&url);
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (filename, content);
        Err("downloads are only available in the browser".to_owned())
    }
}
