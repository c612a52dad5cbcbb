//! Local-storage snapshot of the graph plus the restartable save timer.

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Storage;

use super::types::Graph;
use crate::error::{MindMapError, Result};

/// Compact JSON written under the storage key.
pub fn encode_snapshot(graph: &Graph) -> Result<String> {
	Ok(serde_json::to_string(graph)?)
}

/// Graph to start from given whatever the storage key held. Missing or
/// unreadable snapshots fall back to the default single-root graph.
pub fn decode_snapshot(raw: Option<&str>) -> Graph {
	let Some(raw) = raw else {
		return Graph::default();
	};
	match serde_json::from_str::<Graph>(raw) {
		Ok(graph) => graph.sanitized(),
		Err(e) => {
			warn!("ignoring saved mind map: {}", e);
			Graph::default()
		}
	}
}

/// Handle on one local-storage key.
#[derive(Clone, Debug)]
pub struct LocalStore {
	key: String,
}

impl LocalStore {
	pub fn new(key: impl Into<String>) -> Self {
		Self { key: key.into() }
	}

	fn storage() -> Result<Storage> {
		web_sys::window()
			.ok_or(MindMapError::StorageUnavailable)?
			.local_storage()?
			.ok_or(MindMapError::StorageUnavailable)
	}

	pub fn load(&self) -> Graph {
		let raw = match Self::storage().and_then(|s| Ok(s.get_item(&self.key)?)) {
			Ok(raw) => raw,
			Err(e) => {
				warn!("could not read saved mind map: {}", e);
				None
			}
		};
		let graph = decode_snapshot(raw.as_deref());
		info!("loaded mind map with {} nodes", graph.nodes.len());
		graph
	}

	pub fn save(&self, graph: &Graph) -> Result<()> {
		let encoded = encode_snapshot(graph)?;
		Self::storage()?.set_item(&self.key, &encoded)?;
		Ok(())
	}
}

/// Timeout source for [`SaveDebouncer`]. `start` returns a handle that
/// `clear` accepts, or `None` if nothing was armed.
pub trait Timer {
	fn start(&mut self, delay_ms: i32, fire: Box<dyn FnOnce()>) -> Option<i32>;
	fn clear(&mut self, handle: i32);
}

/// `window.setTimeout`. Holds the latest callback until it is replaced.
#[derive(Default)]
pub struct BrowserTimer {
	callback: Option<Closure<dyn FnMut()>>,
}

impl Timer for BrowserTimer {
	fn start(&mut self, delay_ms: i32, fire: Box<dyn FnOnce()>) -> Option<i32> {
		let window = web_sys::window()?;
		let mut fire = Some(fire);
		let callback = Closure::<dyn FnMut()>::new(move || {
			if let Some(fire) = fire.take() {
				fire();
			}
		});
		let handle = match window.set_timeout_with_callback_and_timeout_and_arguments_0(
			callback.as_ref().unchecked_ref(),
			delay_ms,
		) {
			Ok(handle) => Some(handle),
			Err(e) => {
				warn!("could not schedule save: {:?}", e);
				None
			}
		};
		self.callback = Some(callback);
		handle
	}

	fn clear(&mut self, handle: i32) {
		if let Some(window) = web_sys::window() {
			window.clear_timeout_with_handle(handle);
		}
	}
}

type Task = Box<dyn FnOnce()>;

/// Restartable delayed task: every `schedule` replaces the pending task and
/// re-arms the timer, so a burst of mutations (e.g. a drag) produces a single
/// write after the burst ends. A task still pending on drop runs then.
pub struct SaveDebouncer<T: Timer = BrowserTimer> {
	timer: T,
	delay_ms: i32,
	handle: Option<i32>,
	pending: Rc<RefCell<Option<Task>>>,
}

impl SaveDebouncer {
	pub fn new(delay_ms: i32) -> Self {
		Self::with_timer(BrowserTimer::default(), delay_ms)
	}
}

impl<T: Timer> SaveDebouncer<T> {
	pub fn with_timer(timer: T, delay_ms: i32) -> Self {
		Self {
			timer,
			delay_ms,
			handle: None,
			pending: Rc::new(RefCell::new(None)),
		}
	}

	pub fn schedule(&mut self, task: impl FnOnce() + 'static) {
		self.disarm();
		*self.pending.borrow_mut() = Some(Box::new(task));
		let pending = Rc::clone(&self.pending);
		self.handle = self.timer.start(
			self.delay_ms,
			Box::new(move || {
				let task = pending.borrow_mut().take();
				if let Some(task) = task {
					task();
				}
			}),
		);
	}

	pub fn is_pending(&self) -> bool {
		self.pending.borrow().is_some()
	}

	/// Runs the pending task now instead of waiting for the timer.
	pub fn flush(&mut self) {
		self.disarm();
		let task = self.pending.borrow_mut().take();
		if let Some(task) = task {
			task();
		}
	}

	fn disarm(&mut self) {
		if let Some(handle) = self.handle.take() {
			self.timer.clear(handle);
		}
	}
}

impl<T: Timer> Drop for SaveDebouncer<T> {
	fn drop(&mut self) {
		self.flush();
	}
}

/// Debounced writer bound to one storage key.
pub struct Autosave {
	store: LocalStore,
	timer: SaveDebouncer,
}

impl Autosave {
	pub fn new(store: LocalStore, delay_ms: i32) -> Self {
		Self {
			store,
			timer: SaveDebouncer::new(delay_ms),
		}
	}

	/// Replaces any pending write with one of `graph`.
	pub fn schedule(&mut self, graph: Graph) {
		let store = self.store.clone();
		self.timer.schedule(move || {
			if let Err(e) = store.save(&graph) {
				log::error!("saving mind map failed: {}", e);
			}
		});
	}
}
