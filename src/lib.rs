//! topic-graph: Interactive radial topic/item graph visualization.
//!
//! This crate provides a WASM-based canvas component that lays topics out on a
//! ring with their items orbiting them, with pan/zoom, dragging, topic
//! highlighting and item selection.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::topic_graph::{
	EngineConfig, GraphSnapshot, ItemEntity, Theme, TopicEntity, TopicGraphCanvas,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("topic-graph: logging initialized");
}

/// Load the snapshot from a script element with id="graph-data".
/// Expected format: JSON with { topics: [...], items: [...] }
fn load_graph_data() -> Option<GraphSnapshot> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("graph-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<GraphSnapshot>(&json_text) {
		Ok(data) => {
			info!(
				"topic-graph: loaded {} topics, {} items",
				data.topics.len(),
				data.items.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("topic-graph: failed to parse graph data: {}", e);
			None
		}
	}
}

/// Topic names for an item, in the item's own order, skipping unknown ids.
fn topic_names(snapshot: &GraphSnapshot, item: &ItemEntity) -> String {
	item.topic_ids
		.iter()
		.filter_map(|id| snapshot.topic(id))
		.map(|t| t.name.as_str())
		.collect::<Vec<_>>()
		.join(", ")
}

/// Main application component.
/// Loads the snapshot from the DOM and renders the graph with a detail panel
/// for the selected item.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let snapshot = load_graph_data().unwrap_or_default();
	let graph_signal = Signal::derive({
		let snapshot = snapshot.clone();
		move || snapshot.clone()
	});

	let selected = RwSignal::new(None::<String>);
	let opened = RwSignal::new(None::<String>);
	let on_selection_change = Callback::new(move |id: Option<String>| selected.set(id));
	let on_item_activated = Callback::new(move |id: String| {
		info!("topic-graph: opening item {id}");
		opened.set(Some(id));
	});

	let details = move || {
		let item = selected.get().and_then(|id| snapshot.item(&id).cloned())?;
		let topics = topic_names(&snapshot, &item);
		let was_opened = opened.get().as_deref() == Some(item.id.as_str());
		Some(view! {
			<aside class="graph-details">
				<h2>{item.title.clone()}</h2>
				<dl>
					<dt>"Source"</dt>
					<dd>{item.source_type.clone()}</dd>
					<dt>"Topics"</dt>
					<dd>{topics}</dd>
					<dt>"Weight"</dt>
					<dd>{format!("{:.2}", item.importance_weight)}</dd>
				</dl>
				{was_opened.then(|| view! { <p class="opened">"Opened"</p> })}
			</aside>
		})
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Topic Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<TopicGraphCanvas
				data=graph_signal
				on_selection_change=on_selection_change
				on_item_activated=on_item_activated
			/>
			<div class="graph-overlay">
				<h1>"Topics"</h1>
				<p class="subtitle">
					"Click a topic to highlight it. Double-click an item to open it. Scroll to zoom. Drag to pan."
				</p>
			</div>
			{details}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn topic_names_skip_unknown_ids() {
		let snapshot = GraphSnapshot {
			topics: vec![
				TopicEntity {
					id: "t1".into(),
					name: "Rust".into(),
					..Default::default()
				},
				TopicEntity {
					id: "t2".into(),
					name: "Canvas".into(),
					..Default::default()
				},
			],
			items: Vec::new(),
		};
		let item = ItemEntity {
			id: "i".into(),
			topic_ids: vec!["t2".into(), "gone".into(), "t1".into()],
			..Default::default()
		};
		assert_eq!(topic_names(&snapshot, &item), "Canvas, Rust");
	}
}
