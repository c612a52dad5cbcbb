use crate::components::mind_map::types::Graph;
use crate::error::Result;

/// Pretty-printed `{nodes, connections}` document.
pub fn to_json(graph: &Graph) -> Result<String> {
	Ok(serde_json::to_string_pretty(graph)?)
}

/// Parses an exported document and repairs it so it can back a store.
pub fn from_json(text: &str) -> Result<Graph> {
	let graph: Graph = serde_json::from_str(text)?;
	Ok(graph.sanitized())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::mind_map::store::GraphStore;
	use crate::components::mind_map::types::ROOT_ID;
	use crate::error::MindMapError;

	#[test]
	fn export_then_import_is_identity() {
		let mut store = GraphStore::new();
		let a = store.add_node();
		let b = store.add_node();
		store.add_connection(&a, &b);
		store.add_connection(ROOT_ID, &a);
		store.update_node_label(&b, "Budget <review>");
		store.move_node(&a, 612.5, 48.25);

		let text = to_json(store.graph()).unwrap();
		assert_eq!(&from_json(&text).unwrap(), store.graph());
	}

	#[test]
	fn export_is_indented() {
		let text = to_json(&Graph::default()).unwrap();
		assert!(text.starts_with("{\n  \"nodes\": ["));
		assert!(text.contains("\"connections\": []"));
	}

	#[test]
	fn garbage_is_rejected() {
		assert!(matches!(from_json("{\"nodes\": 3}"), Err(MindMapError::Json(_))));
	}

	#[test]
	fn import_without_root_gets_one() {
		let graph = from_json(r#"{"nodes":[],"connections":[]}"#).unwrap();
		assert_eq!(graph, Graph::default());
	}
}
