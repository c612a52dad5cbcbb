//! Mind-map editor: graph model, interaction state, layout, persistence and
//! export, plus the Leptos components that wire them to the DOM.

mod component;
mod editor;
mod node_box;

pub mod config;
pub mod export;
pub mod interaction;
pub mod layout;
pub mod persistence;
pub mod store;
pub mod types;

pub use component::MindMapCanvas;
pub use config::MindMapConfig;
pub use interaction::Interaction;
pub use store::GraphStore;
pub use types::{Connection, Graph, Node, PALETTE, Point, ROOT_ID};
