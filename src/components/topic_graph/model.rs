//! Graph model derived from a [`GraphSnapshot`] with a fixed radial layout.
//!
//! Topics sit evenly on a ring around the viewport center; items orbit their
//! primary topic; items without a topic orbit the center. Everything is
//! sorted by id first, so the same entity set always lays out the same way no
//! matter what order the host delivered it in.

use std::collections::{HashMap, HashSet};
use std::f64::consts::{FRAC_PI_2, TAU};

use log::warn;

use super::camera::Point;
use super::config::LayoutConfig;
use super::theme::Theme;
use super::types::{GraphSnapshot, ItemEntity, TopicEntity};

/// Orbit group a node belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GroupKey {
	/// The topic id for items, the topic's own id for topics.
	Topic(String),
	/// Items without a resolvable topic, orbiting the viewport center.
	Unassigned,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
	Topic,
	Item,
}

/// A drawable node in world-space.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub kind: NodeKind,
	/// Full label. Truncation happens at draw time.
	pub label: String,
	/// CSS color of the node's category.
	pub color: String,
	/// Where the node is drawn this frame.
	pub position: Point,
	/// Where the layout (or a drag) wants the node to be.
	pub target: Point,
	/// World-space radius, always within the configured range.
	pub radius: f64,
	pub group_key: GroupKey,
	/// Set once the user drags the node; pinned nodes ignore the entrance
	/// animation.
	pub pinned: bool,
}

impl GraphNode {
	/// Whether this node belongs to the given highlight group.
	pub fn in_group(&self, topic_id: &str) -> bool {
		matches!(&self.group_key, GroupKey::Topic(id) if id == topic_id)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
	/// Item to one of its topics.
	Membership,
	/// Item to a related item.
	Relation,
}

/// A reference between two nodes by id. Endpoints are resolved at draw time.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
	pub source_id: String,
	pub target_id: String,
	pub kind: EdgeKind,
}

/// Nodes in draw order (topics first, then items) plus edges.
#[derive(Clone, Debug, Default)]
pub struct GraphModel {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
	index: HashMap<String, usize>,
}

impl GraphModel {
	/// Lays out `snapshot` for a viewport of `width` x `height`.
	///
	/// Every node starts at the viewport center with its layout position as
	/// `target`; the entrance animation moves it out from there.
	pub fn build(
		snapshot: &GraphSnapshot,
		width: f64,
		height: f64,
		layout: &LayoutConfig,
		theme: &Theme,
	) -> Self {
		let center = Point::new(width / 2.0, height / 2.0);
		let span = width.min(height).max(0.0);

		let mut seen: HashSet<&str> = HashSet::new();
		let mut topics: Vec<&TopicEntity> = sorted_by_id(&snapshot.topics, |t| &t.id);
		topics.retain(|t| claim_id(&mut seen, &t.id, "topic"));
		let mut items: Vec<&ItemEntity> = sorted_by_id(&snapshot.items, |i| &i.id);
		items.retain(|i| claim_id(&mut seen, &i.id, "item"));

		let mut nodes = Vec::with_capacity(topics.len() + items.len());
		let mut topic_positions: HashMap<&str, Point> = HashMap::new();

		let ring = layout.topic_ring_fraction * span;
		for (i, topic) in topics.iter().enumerate() {
			let angle = TAU * i as f64 / topics.len() as f64 - FRAC_PI_2;
			let target = center + polar(ring, angle);
			topic_positions.insert(topic.id.as_str(), target);

			let color = if topic.color.trim().is_empty() {
				theme.palette.get(i).to_css_rgb()
			} else {
				topic.color.clone()
			};
			nodes.push(GraphNode {
				id: topic.id.clone(),
				kind: NodeKind::Topic,
				label: topic.name.clone(),
				color,
				position: center,
				target,
				radius: topic_radius(topic.member_count, layout),
				group_key: GroupKey::Topic(topic.id.clone()),
				pinned: false,
			});
		}

		// Items arrive sorted by id, so each group is too.
		// `None` collects the unassigned items.
		let mut groups: Vec<(Option<&str>, Vec<&ItemEntity>)> = Vec::new();
		let mut item_group: HashMap<&str, Option<&str>> = HashMap::new();
		for &item in &items {
			let key = item
				.topic_ids
				.iter()
				.map(String::as_str)
				.find(|id| topic_positions.contains_key(id));
			match groups.iter_mut().find(|(k, _)| *k == key) {
				Some((_, members)) => members.push(item),
				None => groups.push((key, vec![item])),
			}
			item_group.insert(item.id.as_str(), key);
		}

		let mut item_targets: HashMap<&str, Point> = HashMap::new();
		for (key, members) in &groups {
			let (anchor, orbit) = match key.and_then(|k| topic_positions.get(k)) {
				Some(&pos) => (
					pos,
					layout.item_orbit_fraction * span
						+ layout.orbit_growth_per_item * members.len() as f64,
				),
				None => (center, layout.unassigned_orbit_radius),
			};
			for (j, item) in members.iter().enumerate() {
				let angle = TAU * j as f64 / members.len() as f64 - FRAC_PI_2;
				item_targets.insert(item.id.as_str(), anchor + polar(orbit, angle));
			}
		}

		for item in &items {
			nodes.push(GraphNode {
				id: item.id.clone(),
				kind: NodeKind::Item,
				label: item.title.clone(),
				color: theme.sources.color_for(&item.source_type),
				position: center,
				target: item_targets.get(item.id.as_str()).copied().unwrap_or(center),
				radius: item_radius(item.importance_weight, layout),
				group_key: match item_group.get(item.id.as_str()).copied().flatten() {
					Some(topic_id) => GroupKey::Topic(topic_id.to_string()),
					None => GroupKey::Unassigned,
				},
				pinned: false,
			});
		}

		let index: HashMap<String, usize> = nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.clone(), i))
			.collect();

		let mut edges = Vec::new();
		for item in &items {
			let mut linked: HashSet<&str> = HashSet::new();
			for topic_id in &item.topic_ids {
				let id = topic_id.as_str();
				if topic_positions.contains_key(id) && linked.insert(id) {
					edges.push(GraphEdge {
						source_id: item.id.clone(),
						target_id: topic_id.clone(),
						kind: EdgeKind::Membership,
					});
				}
			}
		}

		let item_ids: HashSet<&str> = items.iter().map(|i| i.id.as_str()).collect();
		let mut related: HashSet<(&str, &str)> = HashSet::new();
		for item in &items {
			for other in &item.related_item_ids {
				if other == &item.id || !item_ids.contains(other.as_str()) {
					continue;
				}
				let pair = if item.id.as_str() < other.as_str() {
					(item.id.as_str(), other.as_str())
				} else {
					(other.as_str(), item.id.as_str())
				};
				if related.insert(pair) {
					edges.push(GraphEdge {
						source_id: pair.0.to_string(),
						target_id: pair.1.to_string(),
						kind: EdgeKind::Relation,
					});
				}
			}
		}

		Self {
			nodes,
			edges,
			index,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.index_of(id).map(|i| &self.nodes[i])
	}

	pub fn node_mut(&mut self, id: &str) -> Option<&mut GraphNode> {
		self.index_of(id).map(move |i| &mut self.nodes[i])
	}

	pub fn edge_count(&self, kind: EdgeKind) -> usize {
		self.edges.iter().filter(|e| e.kind == kind).count()
	}

	/// Edges whose endpoints both resolve, with the endpoint nodes. Edges
	/// pointing at a missing node are skipped.
	pub fn resolved_edges(&self) -> impl Iterator<Item = (&GraphEdge, &GraphNode, &GraphNode)> {
		self.edges.iter().filter_map(|edge| {
			let source = self.node(&edge.source_id)?;
			let target = self.node(&edge.target_id)?;
			Some((edge, source, target))
		})
	}
}

fn sorted_by_id<'a, T>(list: &'a [T], id: impl Fn(&T) -> &String) -> Vec<&'a T> {
	let mut sorted: Vec<&T> = list.iter().collect();
	sorted.sort_by(|a, b| id(*a).cmp(id(*b)));
	sorted
}

fn claim_id<'a>(seen: &mut HashSet<&'a str>, id: &'a str, what: &str) -> bool {
	if seen.insert(id) {
		true
	} else {
		warn!("topic-graph: dropping {what} with duplicate id {id:?}");
		false
	}
}

fn polar(radius: f64, angle: f64) -> Point {
	Point::new(radius * angle.cos(), radius * angle.sin())
}

fn topic_radius(member_count: u32, layout: &LayoutConfig) -> f64 {
	let r = layout.topic_radius_min + (member_count as f64).sqrt() * 2.5;
	r.clamp(layout.topic_radius_min, layout.topic_radius_max)
}

fn item_radius(weight: f64, layout: &LayoutConfig) -> f64 {
	let weight = if weight.is_finite() { weight.max(0.0) } else { 0.0 };
	let r = layout.item_radius_min + weight.sqrt() * 3.0;
	r.clamp(layout.item_radius_min, layout.item_radius_max)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn topic(id: &str, members: u32) -> TopicEntity {
		TopicEntity {
			id: id.into(),
			name: format!("Topic {id}"),
			color: "#336699".into(),
			member_count: members,
		}
	}

	fn item(id: &str, topics: &[&str], related: &[&str]) -> ItemEntity {
		ItemEntity {
			id: id.into(),
			title: format!("Item {id}"),
			source_type: "note".into(),
			importance_weight: 1.0,
			topic_ids: topics.iter().map(|s| s.to_string()).collect(),
			related_item_ids: related.iter().map(|s| s.to_string()).collect(),
		}
	}

	fn scenario() -> GraphSnapshot {
		GraphSnapshot {
			topics: vec![topic("T1", 2), topic("T2", 1)],
			items: vec![
				item("a", &["T1"], &[]),
				item("b", &["T1"], &[]),
				item("c", &["T2"], &[]),
				item("d", &[], &[]),
			],
		}
	}

	fn build(snapshot: &GraphSnapshot) -> GraphModel {
		GraphModel::build(
			snapshot,
			800.0,
			600.0,
			&LayoutConfig::default(),
			&Theme::default(),
		)
	}

	#[test]
	fn builds_two_topic_scenario() {
		let model = build(&scenario());
		assert_eq!(model.nodes.len(), 6);
		assert_eq!(model.edge_count(EdgeKind::Membership), 3);
		assert_eq!(model.edge_count(EdgeKind::Relation), 0);
		assert_eq!(model.node("d").unwrap().group_key, GroupKey::Unassigned);
		assert_eq!(model.node("a").unwrap().group_key, GroupKey::Topic("T1".into()));
	}

	#[test]
	fn first_topic_sits_at_the_top() {
		let model = build(&scenario());
		let t1 = model.node("T1").unwrap();
		// 0.28 * min(800, 600) above the center.
		assert!((t1.target.x - 400.0).abs() < 1e-9);
		assert!((t1.target.y - (300.0 - 168.0)).abs() < 1e-9);
	}

	#[test]
	fn items_orbit_their_topic() {
		let model = build(&scenario());
		let t1 = model.node("T1").unwrap().target;
		let expected = 0.1 * 600.0 + 2.0 * 2.0;
		for id in ["a", "b"] {
			let d = (model.node(id).unwrap().target - t1).length();
			assert!((d - expected).abs() < 1e-9);
		}
		let center = Point::new(400.0, 300.0);
		let d = (model.node("d").unwrap().target - center).length();
		assert!((d - 40.0).abs() < 1e-9);
	}

	#[test]
	fn every_node_starts_at_center() {
		let model = build(&scenario());
		for node in &model.nodes {
			assert_eq!(node.position, Point::new(400.0, 300.0));
		}
	}

	#[test]
	fn layout_is_independent_of_input_order() {
		let a = build(&scenario());
		let mut shuffled = scenario();
		shuffled.topics.reverse();
		shuffled.items.rotate_left(2);
		let b = build(&shuffled);
		for node in &a.nodes {
			assert_eq!(Some(node.target), b.node(&node.id).map(|n| n.target));
		}
	}

	#[test]
	fn relation_edges_are_deduplicated_and_resolved() {
		let snapshot = GraphSnapshot {
			topics: vec![topic("T1", 2)],
			items: vec![
				item("a", &["T1", "missing"], &["b", "ghost", "a"]),
				item("b", &["T1"], &["a"]),
			],
		};
		let model = build(&snapshot);
		assert_eq!(model.edge_count(EdgeKind::Membership), 2);
		assert_eq!(model.edge_count(EdgeKind::Relation), 1);
	}

	#[test]
	fn primary_topic_skips_unknown_ids() {
		let snapshot = GraphSnapshot {
			topics: vec![topic("T2", 1)],
			items: vec![item("a", &["gone", "T2"], &[])],
		};
		let model = build(&snapshot);
		assert_eq!(model.node("a").unwrap().group_key, GroupKey::Topic("T2".into()));
	}

	#[test]
	fn radii_are_positive_and_bounded() {
		let layout = LayoutConfig::default();
		for count in [0, 1, 10, 10_000] {
			let r = topic_radius(count, &layout);
			assert!((layout.topic_radius_min..=layout.topic_radius_max).contains(&r));
		}
		for w in [-5.0, 0.0, 0.3, 100.0, f64::NAN, f64::INFINITY] {
			let r = item_radius(w, &layout);
			assert!(r > 0.0);
			assert!((layout.item_radius_min..=layout.item_radius_max).contains(&r));
		}
	}

	#[test]
	fn duplicate_ids_keep_one_node() {
		let snapshot = GraphSnapshot {
			topics: vec![topic("x", 1), topic("x", 3)],
			items: vec![item("x", &[], &[]), item("y", &["x"], &[])],
		};
		let model = build(&snapshot);
		assert_eq!(model.nodes.len(), 2);
		assert_eq!(model.node("x").map(|n| n.kind), Some(NodeKind::Topic));
	}

	#[test]
	fn topic_id_cannot_capture_unassigned_items() {
		let snapshot = GraphSnapshot {
			topics: vec![topic("__unassigned__", 1)],
			items: vec![item("loose", &[], &[])],
		};
		let model = build(&snapshot);
		let loose = model.node("loose").unwrap();
		assert_eq!(loose.group_key, GroupKey::Unassigned);
		assert!(!loose.in_group("__unassigned__"));
		let center = Point::new(400.0, 300.0);
		assert!(((loose.target - center).length() - 40.0).abs() < 1e-9);
	}

	#[test]
	fn dangling_edges_are_not_resolved() {
		let mut model = build(&scenario());
		model.edges.push(GraphEdge {
			source_id: "a".into(),
			target_id: "deleted".into(),
			kind: EdgeKind::Relation,
		});
		model.edges.push(GraphEdge {
			source_id: "ghost".into(),
			target_id: "T1".into(),
			kind: EdgeKind::Membership,
		});
		let resolved: Vec<_> = model.resolved_edges().collect();
		assert_eq!(resolved.len(), 3);
		for (edge, source, target) in resolved {
			assert_eq!(source.id, edge.source_id);
			assert_eq!(target.id, edge.target_id);
		}
	}

	#[test]
	fn midnight_theme_colors_topics_from_its_palette() {
		let theme = Theme::midnight();
		let mut snapshot = scenario();
		snapshot.topics[1].color = String::new();
		let model = GraphModel::build(&snapshot, 800.0, 600.0, &LayoutConfig::default(), &theme);
		assert_eq!(model.node("T1").unwrap().color, "#336699");
		assert_eq!(model.node("T2").unwrap().color, theme.palette.get(1).to_css_rgb());
		assert_eq!(
			model.node("a").unwrap().color,
			theme.sources.color_for("note")
		);
	}

	#[test]
	fn empty_snapshot_builds_empty_model() {
		let model = build(&GraphSnapshot::default());
		assert!(model.is_empty());
		assert!(model.edges.is_empty());
	}
}
