use js_sys::Array;
use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::error::{MindMapError, Result};

/// `mindmap-<epoch-ms>.<ext>`
pub fn export_file_name(epoch_ms: f64, ext: &str) -> String {
	format!("mindmap-{}.{}", epoch_ms.max(0.0) as u64, ext)
}

/// Offers `contents` as a file download through a temporary object URL and
/// returns that URL. It stays valid until the next task so the browser can
/// start reading it.
pub fn download_text(file_name: &str, mime: &str, contents: &str) -> Result<String> {
	let options = BlobPropertyBag::new();
	options.set_type(mime);
	let parts = Array::of1(&JsValue::from_str(contents));
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = Url::create_object_url_with_blob(&blob)?;
	let result = download_url(file_name, &url);
	revoke_later(url.clone())?;
	result.map(|()| url)
}

fn revoke_later(url: String) -> Result<()> {
	let window = web_sys::window().ok_or_else(|| MindMapError::Dom("no window".into()))?;
	let revoke = Closure::once_into_js(move || {
		if let Err(e) = Url::revoke_object_url(&url) {
			warn!("could not revoke {}: {:?}", url, e);
		}
	});
	window.set_timeout_with_callback_and_timeout_and_arguments_0(revoke.unchecked_ref(), 0)?;
	Ok(())
}

/// Clicks a detached anchor pointing at `href` (object or data URL).
pub fn download_url(file_name: &str, href: &str) -> Result<()> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| MindMapError::Dom("no document".into()))?;
	let anchor: HtmlAnchorElement = document
		.create_element("a")?
		.dyn_into()
		.map_err(|_| MindMapError::Dom("not an anchor element".into()))?;
	anchor.set_href(href);
	anchor.set_download(file_name);
	anchor.click();
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn file_names_carry_the_timestamp() {
		assert_eq!(export_file_name(1_700_000_000_123.0, "json"), "mindmap-1700000000123.json");
		assert_eq!(export_file_name(42.9, "svg"), "mindmap-42.svg");
	}
}
