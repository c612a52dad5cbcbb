//! Error type shared by the mind-map model, persistence and export layers.
//!
//! Store guard rails (`RootNodeProtected`, `UnknownNode`) are surfaced to the
//! user as inline notices. Browser failures arrive as `JsValue`s and are kept
//! as strings so the error stays `Send + Sync`.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Convenience alias for results using the crate error type.
pub type Result<T> = std::result::Result<T, MindMapError>;

/// Everything that can go wrong while editing, saving or exporting a mind map.
#[derive(Error, Debug)]
pub enum MindMapError {
	/// The root node is permanent.
	#[error("The root node cannot be deleted")]
	RootNodeProtected,

	/// An operation referenced a node id that is not in the graph.
	#[error("Unknown node: {0}")]
	UnknownNode(String),

	/// Export needs at least one node to size its canvas.
	#[error("Cannot export an empty graph")]
	EmptyGraph,

	/// Snapshot or export (de)serialization failed.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// `window.localStorage` is missing or blocked.
	#[error("Local storage is not available")]
	StorageUnavailable,

	/// A browser API call failed.
	#[error("Browser error: {0}")]
	Dom(String),
}

impl From<JsValue> for MindMapError {
	fn from(value: JsValue) -> Self {
		MindMapError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
	}
}
