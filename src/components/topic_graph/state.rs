//! Engine store shared by the frame loop and the event handlers.
//!
//! Everything the renderer reads each frame lives here as plain mutable
//! state: the model, the camera, interaction state, animation clocks and drag
//! pins. The Leptos component owns one of these behind an `Rc<RefCell<_>>`;
//! only the selected item id is ever mirrored into reactive state.

use std::collections::HashMap;

use log::debug;

use super::animation::{Entrance, Pulse};
use super::camera::{Camera, Point};
use super::config::EngineConfig;
use super::interaction::{Gesture, InteractionState, Outcome};
use super::model::{GraphModel, NodeKind};
use super::theme::Theme;
use super::types::GraphSnapshot;

pub struct GraphState {
	pub config: EngineConfig,
	pub theme: Theme,
	pub model: GraphModel,
	pub camera: Camera,
	pub interaction: InteractionState,
	pub entrance: Entrance,
	pub pulse: Pulse,
	/// Drawing surface size in CSS pixels.
	pub width: f64,
	pub height: f64,
	fingerprint: Option<u64>,
	/// Dragged positions by node id; they outlive rebuilds while the entity
	/// stays in the snapshot.
	pins: HashMap<String, Point>,
}

impl GraphState {
	pub fn new(config: EngineConfig, theme: Theme, width: f64, height: f64) -> Self {
		Self {
			config,
			theme,
			model: GraphModel::default(),
			camera: Camera::default(),
			interaction: InteractionState::default(),
			entrance: Entrance::finished(),
			pulse: Pulse::default(),
			width,
			height,
			fingerprint: None,
			pins: HashMap::new(),
		}
	}

	pub fn viewport_center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}

	/// Rebuilds the model if the snapshot's fingerprint changed.
	///
	/// Camera, drag pins and still-valid interaction state carry over. If the
	/// selected item disappeared, the cleared selection is returned so the
	/// host can update its side panel.
	pub fn set_snapshot(&mut self, snapshot: &GraphSnapshot) -> Option<Outcome> {
		let fingerprint = snapshot.fingerprint();
		if self.fingerprint == Some(fingerprint) {
			debug!("topic-graph: snapshot unchanged, keeping model");
			return None;
		}
		self.fingerprint = Some(fingerprint);

		let mut model = GraphModel::build(
			snapshot,
			self.width,
			self.height,
			&self.config.layout,
			&self.theme,
		);
		self.pins.retain(|id, _| model.index_of(id).is_some());
		for node in &mut model.nodes {
			if let Some(&pin) = self.pins.get(&node.id) {
				node.position = pin;
				node.target = pin;
				node.pinned = true;
			}
		}
		debug!(
			"topic-graph: rebuilt model with {} nodes, {} edges ({} pinned)",
			model.nodes.len(),
			model.edges.len(),
			self.pins.len()
		);

		self.model = model;
		self.entrance = Entrance::start();
		self.prune_interaction()
	}

	/// Clears interaction references that no longer resolve.
	fn prune_interaction(&mut self) -> Option<Outcome> {
		let model = &self.model;
		let ix = &mut self.interaction;

		if ix.hovered.as_deref().is_some_and(|id| model.index_of(id).is_none()) {
			ix.hovered = None;
		}
		if ix
			.highlighted_group
			.as_deref()
			.is_some_and(|key| model.node(key).is_none_or(|n| n.kind != NodeKind::Topic))
		{
			ix.highlighted_group = None;
		}
		if ix
			.dragging_id()
			.is_some_and(|id| model.index_of(id).is_none())
		{
			ix.gesture = Gesture::Idle;
		}
		if ix.selected.as_deref().is_some_and(|id| model.index_of(id).is_none()) {
			ix.selected = None;
			return Some(Outcome::SelectionChanged(None));
		}
		None
	}

	/// Records the surface size. Layout is only recomputed on the next
	/// snapshot change; the new center is used by a running entrance.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Remembers a dragged node position across rebuilds.
	pub(super) fn pin(&mut self, id: &str, at: Point) {
		self.pins.insert(id.to_string(), at);
	}

	/// Advances animation clocks by one frame.
	pub fn tick(&mut self) {
		let center = self.viewport_center();
		if let Some(eased) = self.entrance.advance(self.config.animation.entrance_step) {
			let dragging = self.interaction.dragging_id();
			for node in &mut self.model.nodes {
				if node.pinned || dragging == Some(node.id.as_str()) {
					continue;
				}
				node.position = center.lerp(node.target, eased);
			}
		}
		self.pulse.advance(self.config.animation.pulse_step);
	}
}
