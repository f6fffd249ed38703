//! Snapshot data structures supplied by the host.
//!
//! The host hands the engine a read-only [`GraphSnapshot`] every time its data
//! changes. The engine never mutates it; it only derives a model from it when
//! the [`GraphSnapshot::fingerprint`] differs from the last one seen.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::Deserialize;

/// A grouping entity. Items orbit the topic they belong to.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TopicEntity {
	/// Unique identifier, referenced by [`ItemEntity::topic_ids`].
	pub id: String,
	/// Display name drawn on the label pill.
	pub name: String,
	/// CSS color for the halo and ring (e.g., "#1976d2").
	pub color: String,
	/// Number of members, used to size the topic node.
	pub member_count: u32,
}

/// A leaf content entity.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemEntity {
	/// Unique identifier, passed back to the host on activation.
	pub id: String,
	/// Display title. Long titles are truncated when drawn.
	pub title: String,
	/// Source category; picks the item color from the theme palette.
	pub source_type: String,
	/// Relative importance; larger weights draw larger nodes.
	pub importance_weight: f64,
	/// Topics this item belongs to. The first resolvable one is its orbit.
	pub topic_ids: Vec<String>,
	/// Other items this item is related to.
	pub related_item_ids: Vec<String>,
}

/// Complete snapshot of the entities to visualize.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GraphSnapshot {
	pub topics: Vec<TopicEntity>,
	pub items: Vec<ItemEntity>,
}

impl GraphSnapshot {
	/// Looks up an item by id.
	pub fn item(&self, id: &str) -> Option<&ItemEntity> {
		self.items.iter().find(|item| item.id == id)
	}

	/// Looks up a topic by id.
	pub fn topic(&self, id: &str) -> Option<&TopicEntity> {
		self.topics.iter().find(|topic| topic.id == id)
	}

	/// Order-independent digest of everything that affects layout or visuals.
	///
	/// Each entity is hashed on its own and the per-entity digests are sorted
	/// before being folded together, so reordering the input lists does not
	/// change the result. Topic membership order is kept because the first
	/// topic decides the orbit; relation order is not.
	pub fn fingerprint(&self) -> u64 {
		let mut digests: Vec<u64> = Vec::with_capacity(self.topics.len() + self.items.len());

		for topic in &self.topics {
			let mut h = DefaultHasher::new();
			0u8.hash(&mut h);
			topic.id.hash(&mut h);
			topic.name.hash(&mut h);
			topic.color.hash(&mut h);
			topic.member_count.hash(&mut h);
			digests.push(h.finish());
		}

		for item in &self.items {
			let mut h = DefaultHasher::new();
			1u8.hash(&mut h);
			item.id.hash(&mut h);
			item.title.hash(&mut h);
			item.source_type.hash(&mut h);
			item.importance_weight.to_bits().hash(&mut h);
			item.topic_ids.hash(&mut h);
			let mut related: Vec<&String> = item.related_item_ids.iter().collect();
			related.sort();
			related.hash(&mut h);
			digests.push(h.finish());
		}

		digests.sort_unstable();
		let mut h = DefaultHasher::new();
		digests.hash(&mut h);
		h.finish()
	}
}
