//! Screen-space hit testing against the node set.

use super::camera::{Camera, Point};
use super::model::GraphNode;

/// Returns the id of the topmost node under `screen`, if any.
///
/// Nodes are tested in reverse draw order. `tolerance_px` widens every node
/// by a fixed number of screen pixels, so targets keep the same apparent size
/// at every zoom level.
pub fn hit_test<'a>(
	screen: Point,
	nodes: &'a [GraphNode],
	camera: &Camera,
	tolerance_px: f64,
) -> Option<&'a str> {
	let world = camera.to_world(screen);
	let tolerance = tolerance_px / camera.scale;
	nodes
		.iter()
		.rev()
		.find(|node| {
			let reach = node.radius + tolerance;
			world.distance_sq(node.position) <= reach * reach
		})
		.map(|node| node.id.as_str())
}
