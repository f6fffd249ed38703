//! Pointer and wheel input mapped onto camera, drag and selection state.
//!
//! The controller is a small state machine: `Idle`, `Dragging` a node, or
//! `Panning` the camera. All positions passed in are screen-space (CSS pixels
//! relative to the canvas); conversion to world-space goes through the
//! camera. Handlers return an [`Outcome`] when the host needs to hear about
//! something, so callbacks run after the state borrow is released.

use super::camera::Point;
use super::hit::hit_test;
use super::model::NodeKind;
use super::state::GraphState;

/// A node drag in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
	pub node_id: String,
	/// World-space offset from the node center to the grab point.
	pub grab_offset: Point,
	/// Screen-space press position, for click suppression.
	pub press: Point,
	/// Furthest screen distance from `press` seen so far.
	pub travel: f64,
}

/// A camera pan in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct PanState {
	pub anchor: Point,
	pub anchor_offset: Point,
	pub travel: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Gesture {
	#[default]
	Idle,
	Dragging(DragState),
	Panning(PanState),
}

/// Hover, selection and highlight state plus the active gesture.
#[derive(Clone, Debug, Default)]
pub struct InteractionState {
	pub hovered: Option<String>,
	/// Selected item node id.
	pub selected: Option<String>,
	/// Highlighted topic id.
	pub highlighted_group: Option<String>,
	pub gesture: Gesture,
	/// Set when a drag or pan travelled far enough that the browser's
	/// trailing click must not count as a selection.
	suppress_click: bool,
	/// Same condition, but held until the next press so a trailing
	/// double-click does not activate the item either.
	suppress_activation: bool,
}

impl InteractionState {
	pub fn dragging_id(&self) -> Option<&str> {
		match &self.gesture {
			Gesture::Dragging(drag) => Some(drag.node_id.as_str()),
			_ => None,
		}
	}

	pub fn is_idle(&self) -> bool {
		self.gesture == Gesture::Idle
	}

	/// CSS cursor for the canvas.
	pub fn cursor(&self) -> &'static str {
		match self.gesture {
			Gesture::Dragging(_) | Gesture::Panning(_) => "grabbing",
			Gesture::Idle if self.hovered.is_some() => "pointer",
			Gesture::Idle => "grab",
		}
	}

	fn finish_gesture(&mut self, suppress_px: f64) {
		let travel = match &self.gesture {
			Gesture::Dragging(drag) => drag.travel,
			Gesture::Panning(pan) => pan.travel,
			Gesture::Idle => return,
		};
		self.suppress_click = travel > suppress_px;
		self.suppress_activation = self.suppress_click;
		self.gesture = Gesture::Idle;
	}
}

/// Something the host should be told about.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
	/// The selected item changed; `None` means nothing is selected.
	SelectionChanged(Option<String>),
	/// An item node was double-activated.
	ItemActivated(String),
}

impl GraphState {
	fn node_at(&self, screen: Point) -> Option<(String, NodeKind)> {
		let id = hit_test(
			screen,
			&self.model.nodes,
			&self.camera,
			self.config.interaction.hit_tolerance_px,
		)?;
		let node = self.model.node(id)?;
		Some((node.id.clone(), node.kind))
	}

	/// Zooms around the cursor. Negative `delta_y` zooms in. Ignored
	/// mid-gesture.
	pub fn on_wheel(&mut self, at: Point, delta_y: f64) {
		if !self.interaction.is_idle() {
			return;
		}
		let limits = &self.config.camera;
		let factor = if delta_y < 0.0 {
			limits.zoom_in_factor
		} else if delta_y > 0.0 {
			limits.zoom_out_factor
		} else {
			return;
		};
		self.camera = self.camera.zoom_at(at, factor, limits);
	}

	/// Starts dragging the node under the pointer, or panning if there is
	/// none. Ignored while another gesture is active.
	pub fn on_pointer_down(&mut self, at: Point) {
		if !self.interaction.is_idle() {
			return;
		}
		self.interaction.suppress_click = false;
		self.interaction.suppress_activation = false;
		let world = self.camera.to_world(at);
		let grabbed = self
			.node_at(at)
			.and_then(|(id, _)| self.model.node(&id).map(|n| (id, world - n.position)));

		self.interaction.gesture = match grabbed {
			Some((node_id, grab_offset)) => Gesture::Dragging(DragState {
				node_id,
				grab_offset,
				press: at,
				travel: 0.0,
			}),
			None => Gesture::Panning(PanState {
				anchor: at,
				anchor_offset: self.camera.offset,
				travel: 0.0,
			}),
		};
	}

	/// Moves the dragged node, pans, or updates hover when idle.
	///
	/// A dragged node follows the pointer right away but only leaves the
	/// layout (and gets pinned) once the drag travels past the click
	/// threshold. `buttons_down` is whether any pointer button is pressed; an
	/// idle move with a button held (a press that started elsewhere) changes
	/// nothing.
	pub fn on_pointer_move(&mut self, at: Point, buttons_down: bool) {
		let world = self.camera.to_world(at);
		let threshold = self.config.interaction.click_suppress_px;
		match &mut self.interaction.gesture {
			Gesture::Dragging(drag) => {
				drag.travel = drag.travel.max((at - drag.press).length());
				let pos = world - drag.grab_offset;
				let detached = drag.travel > threshold;
				let id = drag.node_id.clone();
				let Some(node) = self.model.node_mut(&id) else {
					return;
				};
				node.position = pos;
				if detached {
					node.target = pos;
					node.pinned = true;
					self.pin(&id, pos);
				}
			}
			Gesture::Panning(pan) => {
				pan.travel = pan.travel.max((at - pan.anchor).length());
				self.camera.offset = pan.anchor_offset + (at - pan.anchor);
			}
			Gesture::Idle => {
				if !buttons_down {
					self.interaction.hovered = self.node_at(at).map(|(id, _)| id);
				}
			}
		}
	}

	/// Ends the gesture. A press that never travelled past the click
	/// threshold puts its node back on its layout target.
	pub fn on_pointer_up(&mut self) {
		let threshold = self.config.interaction.click_suppress_px;
		if let Gesture::Dragging(drag) = &self.interaction.gesture
			&& drag.travel <= threshold
			&& let Some(node) = self.model.node_mut(&drag.node_id)
		{
			node.position = node.target;
		}
		self.interaction.finish_gesture(threshold);
	}

	/// Ends any gesture and clears hover when the pointer leaves the surface.
	pub fn on_pointer_leave(&mut self) {
		self.on_pointer_up();
		self.interaction.hovered = None;
	}

	/// Applies click selection semantics.
	///
	/// Items become the selection, topics toggle the highlighted group, and
	/// empty space clears both. A click trailing a drag or pan is swallowed.
	pub fn on_click(&mut self, at: Point) -> Option<Outcome> {
		if std::mem::take(&mut self.interaction.suppress_click) {
			return None;
		}
		if !self.interaction.is_idle() {
			return None;
		}

		let hit = self.node_at(at);
		let ix = &mut self.interaction;
		let before = ix.selected.clone();
		match hit {
			Some((id, NodeKind::Item)) => {
				ix.selected = Some(id);
				ix.highlighted_group = None;
			}
			Some((id, NodeKind::Topic)) => {
				ix.highlighted_group = match ix.highlighted_group.take() {
					Some(current) if current == id => None,
					_ => Some(id),
				};
				ix.selected = None;
			}
			None => {
				ix.selected = None;
				ix.highlighted_group = None;
			}
		}

		let after = &self.interaction.selected;
		(before != *after).then(|| Outcome::SelectionChanged(after.clone()))
	}

	/// Double-activating an item asks the host to open it, unless the last
	/// press was a real drag or pan.
	pub fn on_double_click(&mut self, at: Point) -> Option<Outcome> {
		if self.interaction.suppress_activation {
			return None;
		}
		match self.node_at(at)? {
			(id, NodeKind::Item) => Some(Outcome::ItemActivated(id)),
			(_, NodeKind::Topic) => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topic_graph::camera::Camera;
	use crate::components::topic_graph::config::EngineConfig;
	use crate::components::topic_graph::theme::Theme;
	use crate::components::topic_graph::types::{GraphSnapshot, ItemEntity, TopicEntity};

	fn snapshot() -> GraphSnapshot {
		let topic = |id: &str| TopicEntity {
			id: id.into(),
			name: id.into(),
			color: "#445566".into(),
			member_count: 1,
		};
		let item = |id: &str, topic: &str| ItemEntity {
			id: id.into(),
			title: id.into(),
			source_type: "note".into(),
			importance_weight: 1.0,
			topic_ids: vec![topic.into()],
			related_item_ids: vec![],
		};
		GraphSnapshot {
			topics: vec![topic("T1"), topic("T2")],
			items: vec![item("a", "T1"), item("b", "T2")],
		}
	}

	/// A state with the entrance animation already finished.
	fn settled() -> GraphState {
		let mut s = GraphState::new(EngineConfig::default(), Theme::default(), 800.0, 600.0);
		s.set_snapshot(&snapshot());
		for _ in 0..30 {
			s.tick();
		}
		s
	}

	fn screen_of(s: &GraphState, id: &str) -> Point {
		s.camera.to_screen(s.model.node(id).unwrap().position)
	}

	fn click(s: &mut GraphState, at: Point) -> Option<Outcome> {
		s.on_pointer_down(at);
		s.on_pointer_up();
		s.on_click(at)
	}

	#[test]
	fn topic_click_toggles_highlight() {
		let mut s = settled();
		let t1 = screen_of(&s, "T1");
		click(&mut s, t1);
		assert_eq!(s.interaction.highlighted_group.as_deref(), Some("T1"));
		click(&mut s, t1);
		assert_eq!(s.interaction.highlighted_group, None);
	}

	#[test]
	fn topic_click_switches_between_topics() {
		let mut s = settled();
		let (t1, t2) = (screen_of(&s, "T1"), screen_of(&s, "T2"));
		click(&mut s, t1);
		click(&mut s, t2);
		assert_eq!(s.interaction.highlighted_group.as_deref(), Some("T2"));
	}

	#[test]
	fn item_click_selects_and_clears_highlight() {
		let mut s = settled();
		let (t1, a) = (screen_of(&s, "T1"), screen_of(&s, "a"));
		click(&mut s, t1);
		assert_eq!(
			click(&mut s, a),
			Some(Outcome::SelectionChanged(Some("a".into())))
		);
		assert_eq!(s.interaction.selected.as_deref(), Some("a"));
		assert_eq!(s.interaction.highlighted_group, None);
		// Same item again: nothing new to report.
		assert_eq!(click(&mut s, a), None);
	}

	#[test]
	fn topic_click_clears_selection() {
		let mut s = settled();
		let (a, t2) = (screen_of(&s, "a"), screen_of(&s, "T2"));
		click(&mut s, a);
		assert_eq!(
			click(&mut s, t2),
			Some(Outcome::SelectionChanged(None))
		);
	}

	#[test]
	fn background_click_clears_everything() {
		let mut s = settled();
		let a = screen_of(&s, "a");
		click(&mut s, a);
		s.interaction.highlighted_group = Some("T2".into());
		let out = click(&mut s, Point::new(-500.0, -500.0));
		assert_eq!(out, Some(Outcome::SelectionChanged(None)));
		assert_eq!(s.interaction.highlighted_group, None);
	}

	#[test]
	fn drag_moves_node_and_target() {
		let mut s = settled();
		s.model.node_mut("a").unwrap().position = Point::new(100.0, 100.0);
		s.camera = Camera::default();
		s.on_pointer_down(Point::new(100.0, 100.0));
		match &s.interaction.gesture {
			Gesture::Dragging(drag) => {
				assert_eq!(drag.node_id, "a");
				assert_eq!(drag.grab_offset, Point::ZERO);
			}
			other => panic!("expected drag, got {other:?}"),
		}
		s.on_pointer_move(Point::new(150.0, 120.0), true);
		let a = s.model.node("a").unwrap();
		assert_eq!(a.position, Point::new(150.0, 120.0));
		assert_eq!(a.target, Point::new(150.0, 120.0));
	}

	#[test]
	fn drag_respects_grab_offset_and_zoom() {
		let mut s = settled();
		s.camera = Camera {
			scale: 2.0,
			offset: Point::new(10.0, 20.0),
		};
		s.model.node_mut("a").unwrap().position = Point::new(50.0, 50.0);
		// World (52, 49) is inside node a.
		s.on_pointer_down(s.camera.to_screen(Point::new(52.0, 49.0)));
		s.on_pointer_move(s.camera.to_screen(Point::new(82.0, 59.0)), true);
		let a = s.model.node("a").unwrap();
		assert!(a.position.distance_sq(Point::new(80.0, 60.0)) < 1e-18);
	}

	#[test]
	fn dragged_node_survives_rebuild() {
		let mut s = settled();
		let start = screen_of(&s, "a");
		s.on_pointer_down(start);
		s.on_pointer_move(start + Point::new(40.0, 30.0), true);
		s.on_pointer_up();
		let pinned = s.model.node("a").unwrap().position;

		let mut changed = snapshot();
		changed.items[1].title = "renamed".into();
		s.set_snapshot(&changed);
		for _ in 0..30 {
			s.tick();
		}
		let a = s.model.node("a").unwrap();
		assert_eq!(a.position, pinned);
		assert_eq!(a.target, pinned);
	}

	#[test]
	fn dragged_node_ignores_entrance() {
		let mut s = GraphState::new(EngineConfig::default(), Theme::default(), 800.0, 600.0);
		s.set_snapshot(&snapshot());
		let center = s.viewport_center();
		s.on_pointer_down(center);
		let id = s.interaction.dragging_id().map(str::to_string);
		assert!(id.is_some());
		s.tick();
		let id = id.unwrap();
		assert_eq!(s.model.node(&id).unwrap().position, center);
	}

	#[test]
	fn click_after_drag_is_suppressed() {
		let mut s = settled();
		let a = screen_of(&s, "a");
		s.on_pointer_down(a);
		s.on_pointer_move(a + Point::new(30.0, 0.0), true);
		s.on_pointer_up();
		assert_eq!(s.on_click(a + Point::new(30.0, 0.0)), None);
		assert_eq!(s.interaction.selected, None);
		// The next genuine click works again.
		let a = screen_of(&s, "a");
		assert!(click(&mut s, a).is_some());
	}

	#[test]
	fn small_jitter_still_clicks() {
		let mut s = settled();
		let a = screen_of(&s, "a");
		s.on_pointer_down(a);
		s.on_pointer_move(a + Point::new(1.0, 1.0), true);
		s.on_pointer_up();
		assert!(s.on_click(a + Point::new(1.0, 1.0)).is_some());
	}

	#[test]
	fn jitter_click_during_entrance_does_not_pin() {
		let mut s = GraphState::new(EngineConfig::default(), Theme::default(), 800.0, 600.0);
		s.set_snapshot(&snapshot());
		for _ in 0..12 {
			s.tick();
		}
		assert!(s.entrance.is_running());
		let a = screen_of(&s, "a");
		s.on_pointer_down(a);
		s.on_pointer_move(a + Point::new(1.0, 0.0), true);
		s.on_pointer_up();
		assert_eq!(
			s.on_click(a + Point::new(1.0, 0.0)),
			Some(Outcome::SelectionChanged(Some("a".into())))
		);
		for _ in 0..40 {
			s.tick();
		}

		let mut changed = snapshot();
		changed.items[1].title = "renamed".into();
		s.set_snapshot(&changed);
		for _ in 0..30 {
			s.tick();
		}
		let node = s.model.node("a").unwrap();
		assert!(!node.pinned);
		assert!(node.position.distance_sq(node.target) < 1e-18);
	}

	#[test]
	fn jitter_on_settled_node_snaps_back() {
		let mut s = settled();
		let target = s.model.node("a").unwrap().target;
		let a = screen_of(&s, "a");
		s.on_pointer_down(a);
		s.on_pointer_move(a + Point::new(2.0, 2.0), true);
		assert_ne!(s.model.node("a").unwrap().position, target);
		s.on_pointer_up();
		let node = s.model.node("a").unwrap();
		assert_eq!(node.position, target);
		assert_eq!(node.target, target);
	}

	#[test]
	fn background_drag_pans() {
		let mut s = settled();
		s.camera.offset = Point::new(5.0, 5.0);
		s.on_pointer_down(Point::new(-400.0, -400.0));
		assert!(matches!(s.interaction.gesture, Gesture::Panning(_)));
		s.on_pointer_move(Point::new(-350.0, -420.0), true);
		assert_eq!(s.camera.offset, Point::new(55.0, -15.0));
		s.on_pointer_leave();
		assert!(s.interaction.is_idle());
		// Moving after the pan ended does not keep panning.
		s.on_pointer_move(Point::new(0.0, 0.0), false);
		assert_eq!(s.camera.offset, Point::new(55.0, -15.0));
	}

	#[test]
	fn pan_then_click_keeps_selection() {
		let mut s = settled();
		let a = screen_of(&s, "a");
		click(&mut s, a);
		let far = Point::new(-400.0, -400.0);
		s.on_pointer_down(far);
		s.on_pointer_move(far + Point::new(50.0, 0.0), true);
		s.on_pointer_up();
		assert_eq!(s.on_click(far + Point::new(50.0, 0.0)), None);
		assert_eq!(s.interaction.selected.as_deref(), Some("a"));
	}

	#[test]
	fn hover_follows_idle_pointer() {
		let mut s = settled();
		let a = screen_of(&s, "a");
		s.on_pointer_move(a, false);
		assert_eq!(s.interaction.hovered.as_deref(), Some("a"));
		assert_eq!(s.interaction.cursor(), "pointer");
		s.on_pointer_move(Point::new(-400.0, -400.0), false);
		assert_eq!(s.interaction.hovered, None);
		assert_eq!(s.interaction.cursor(), "grab");
	}

	#[test]
	fn wheel_zooms_at_cursor() {
		let mut s = settled();
		s.camera = Camera::default();
		s.on_wheel(Point::new(200.0, 200.0), -120.0);
		assert!((s.camera.scale - 1.1).abs() < 1e-12);
		assert!(s.camera.offset.distance_sq(Point::new(-20.0, -20.0)) < 1e-18);
		s.on_wheel(Point::new(200.0, 200.0), 0.0);
		assert!((s.camera.scale - 1.1).abs() < 1e-12);
		s.on_wheel(Point::new(200.0, 200.0), 120.0);
		assert!((s.camera.scale - 0.99).abs() < 1e-12);
	}

	#[test]
	fn wheel_is_ignored_mid_gesture() {
		let mut s = settled();
		s.on_pointer_down(Point::new(1.0, 1.0));
		s.on_wheel(Point::new(1.0, 1.0), -100.0);
		assert_eq!(s.camera.scale, 1.0);
	}

	#[test]
	fn double_click_activates_items_only() {
		let mut s = settled();
		let (a, t1) = (screen_of(&s, "a"), screen_of(&s, "T1"));
		assert_eq!(
			s.on_double_click(a),
			Some(Outcome::ItemActivated("a".into()))
		);
		assert_eq!(s.on_double_click(t1), None);
		assert_eq!(s.on_double_click(Point::new(-400.0, -400.0)), None);
	}

	#[test]
	fn double_click_after_drag_does_not_activate() {
		let mut s = settled();
		let a = screen_of(&s, "a");
		let dropped = a + Point::new(30.0, 0.0);
		s.on_pointer_down(a);
		s.on_pointer_move(dropped, true);
		s.on_pointer_up();
		assert_eq!(s.on_click(dropped), None);
		assert_eq!(s.on_double_click(dropped), None);

		// A fresh double press on the dropped node activates it.
		click(&mut s, dropped);
		click(&mut s, dropped);
		assert_eq!(
			s.on_double_click(dropped),
			Some(Outcome::ItemActivated("a".into()))
		);
	}

	#[test]
	fn stray_events_are_noops() {
		let mut s = settled();
		let camera = s.camera;
		s.on_pointer_up();
		s.on_pointer_leave();
		assert!(s.interaction.is_idle());
		assert_eq!(s.camera, camera);
	}
}
