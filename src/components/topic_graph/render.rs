//! Canvas rendering for the topic graph.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Edges (world space)
//! 3. Topic halos and rings, then item circles
//! 4. Label pills on top of everything
//!
//! The renderer only reads [`GraphState`]; animation clocks are advanced by
//! [`GraphState::tick`] before each call.

use std::borrow::Cow;
use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::camera::Point;
use super::model::{EdgeKind, GraphNode, NodeKind};
use super::scale::{ScaleConfig, ScaledValues};
use super::state::GraphState;
use super::theme::{Color, Theme};

/// Renders the complete graph to the canvas.
///
/// `dpr` is the device pixel ratio the canvas backing store was sized with.
pub fn render(state: &GraphState, ctx: &CanvasRenderingContext2d, config: &ScaleConfig, dpr: f64) {
	let theme = &state.theme;
	let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	draw_background(state, ctx, theme);

	if state.model.is_empty() {
		return;
	}

	let scale = ScaledValues::new(config, state.camera.scale, theme.label.font_family);
	let highlight = state.interaction.highlighted_group.as_deref();

	ctx.save();
	let _ = ctx.translate(state.camera.offset.x, state.camera.offset.y);
	let _ = ctx.scale(state.camera.scale, state.camera.scale);

	draw_edges(state, ctx, &scale, theme, highlight);

	for node in &state.model.nodes {
		let alpha = node_alpha(node, highlight, theme.dim_alpha);
		match node.kind {
			NodeKind::Topic => draw_topic(ctx, node, &scale, theme, alpha),
			NodeKind::Item => draw_item(state, ctx, node, &scale, theme, alpha),
		}
	}

	ctx.set_font(&scale.label_font);
	let _ = ctx.set_text_align("center");
	let _ = ctx.set_text_baseline("middle");
	for node in &state.model.nodes {
		let alpha = node_alpha(node, highlight, theme.dim_alpha);
		match node.kind {
			NodeKind::Topic => {
				let label_alpha = alpha * scale.topic_label_alpha;
				draw_label_pill(ctx, &node.label, node, &scale, theme, label_alpha);
			}
			NodeKind::Item if is_focused(state, node) => {
				let label = truncate_label(&node.label, state.config.interaction.label_max_chars);
				draw_label_pill(ctx, &label, node, &scale, theme, scale.item_label_alpha);
			}
			NodeKind::Item => {}
		}
	}

	ctx.restore();
}

fn draw_background(state: &GraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (w, h) = (state.width, state.height);
	let gradient = theme
		.background
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(w / 2.0, h / 2.0, 0.0, w / 2.0, h / 2.0, w.max(h) * 0.8)
				.ok()
		})
		.flatten();

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&theme.background.color.to_css()),
	}

	ctx.fill_rect(0.0, 0.0, w, h);
}

fn draw_edges(
	state: &GraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	highlight: Option<&str>,
) {
	for (edge, a, b) in state.model.resolved_edges() {
		let emphasized = highlight.is_some_and(|key| a.in_group(key) || b.in_group(key));
		let (alpha, width) = if emphasized {
			(theme.edge.highlight_alpha, scale.edge_width * theme.edge.highlight_width)
		} else if highlight.is_some() {
			(theme.edge.base_alpha * theme.dim_alpha, scale.edge_width)
		} else {
			(theme.edge.base_alpha, scale.edge_width)
		};
		let color = match edge.kind {
			EdgeKind::Membership => {
				let _ = ctx.set_line_dash(&js_sys::Array::new());
				theme.edge.color
			}
			EdgeKind::Relation => {
				let _ = ctx.set_line_dash(&js_sys::Array::of2(
					&JsValue::from_f64(4.0 / scale.k),
					&JsValue::from_f64(3.0 / scale.k),
				));
				theme.edge.relation_color
			}
		};

		ctx.set_stroke_style_str(&color.with_alpha(alpha).to_css());
		ctx.set_line_width(width);
		let control = bow_control(a.position, b.position, theme.edge.curvature);
		ctx.begin_path();
		ctx.move_to(a.position.x, a.position.y);
		ctx.quadratic_curve_to(control.x, control.y, b.position.x, b.position.y);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_topic(
	ctx: &CanvasRenderingContext2d,
	node: &GraphNode,
	scale: &ScaledValues,
	theme: &Theme,
	alpha: f64,
) {
	let Point { x, y } = node.position;
	let r = node.radius;
	let color = Color::parse(&node.color);
	let halo = r * theme.topic.halo_scale;

	if let Ok(gradient) = ctx.create_radial_gradient(x, y, r * 0.5, x, y, halo) {
		let inner = color.lighten(0.25).with_alpha(theme.topic.halo_alpha * alpha);
		let _ = gradient.add_color_stop(0.0, &inner.to_css());
		let _ = gradient.add_color_stop(1.0, &color.with_alpha(0.0).to_css());
		ctx.begin_path();
		let _ = ctx.arc(x, y, halo, 0.0, TAU);
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
		ctx.fill();
	}

	ctx.begin_path();
	let _ = ctx.arc(x, y, r, 0.0, TAU);
	ctx.set_fill_style_str(&color.darken(0.3).with_alpha(theme.topic.fill_alpha * alpha).to_css());
	ctx.fill();
	ctx.set_stroke_style_str(&color.lighten(0.15).with_alpha(alpha).to_css());
	ctx.set_line_width(scale.topic_ring_width);
	ctx.stroke();
}

fn draw_item(
	state: &GraphState,
	ctx: &CanvasRenderingContext2d,
	node: &GraphNode,
	scale: &ScaledValues,
	theme: &Theme,
	alpha: f64,
) {
	let Point { x, y } = node.position;
	let r = node.radius;
	let color = Color::parse(&node.color);

	ctx.set_shadow_blur(theme.item.shadow_blur);
	ctx.set_shadow_color(&theme.item.shadow_color.to_css());
	ctx.begin_path();
	let _ = ctx.arc(x, y, r, 0.0, TAU);
	ctx.set_fill_style_str(&color.with_alpha(alpha).to_css());
	ctx.fill();
	ctx.set_shadow_blur(0.0);
	ctx.set_shadow_color("rgba(0, 0, 0, 0)");

	if !is_focused(state, node) {
		return;
	}

	let wave = state.pulse.wave();
	let selected = state.interaction.selected.as_deref() == Some(node.id.as_str());
	let ring_r = r + scale.item_ring_offset * (1.0 + theme.item.pulse_amplitude * wave);
	let ring_alpha = if selected {
		0.6 + 0.4 * wave
	} else {
		0.35 + 0.25 * wave
	};

	ctx.begin_path();
	let _ = ctx.arc(x, y, ring_r, 0.0, TAU);
	ctx.set_stroke_style_str(&theme.item.ring_color.with_alpha(ring_alpha).to_css());
	ctx.set_line_width(scale.item_ring_width);
	ctx.stroke();
}

fn draw_label_pill(
	ctx: &CanvasRenderingContext2d,
	label: &str,
	node: &GraphNode,
	scale: &ScaledValues,
	theme: &Theme,
	alpha: f64,
) {
	if alpha < 0.01 || label.is_empty() {
		return;
	}
	let text_width = ctx
		.measure_text(label)
		.map(|m| m.width())
		.unwrap_or(label.chars().count() as f64 * scale.label_font_size * 0.6);
	let (pad_x, pad_y) = scale.pill_padding;
	let w = text_width + pad_x * 2.0;
	let h = scale.label_font_size + pad_y * 2.0;
	let cx = node.position.x;
	let top = node.position.y + node.radius + scale.pill_gap;

	ctx.set_global_alpha(alpha);
	ctx.set_fill_style_str(&theme.label.pill_color.to_css());
	rounded_rect(ctx, cx - w / 2.0, top, w, h, h / 2.0);
	ctx.fill();
	ctx.set_fill_style_str(&theme.label.text_color.to_css());
	let _ = ctx.fill_text(label, cx, top + h / 2.0);
	ctx.set_global_alpha(1.0);
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn is_focused(state: &GraphState, node: &GraphNode) -> bool {
	let id = Some(node.id.as_str());
	state.interaction.hovered.as_deref() == id || state.interaction.selected.as_deref() == id
}

/// Alpha for a node given the highlighted group, if any.
fn node_alpha(node: &GraphNode, highlight: Option<&str>, dim_alpha: f64) -> f64 {
	match highlight {
		Some(key) if !node.in_group(key) => dim_alpha,
		_ => 1.0,
	}
}

/// Control point of a quadratic curve from `a` to `b`, bowed to the left of
/// the direction of travel by `curvature` times the edge length.
fn bow_control(a: Point, b: Point, curvature: f64) -> Point {
	let mid = a.lerp(b, 0.5);
	let d = b - a;
	let len = d.length();
	if len < 1e-6 {
		return mid;
	}
	let normal = Point::new(-d.y, d.x) / len;
	mid + normal * (len * curvature)
}

/// Cuts labels longer than `max_chars` characters and appends an ellipsis.
fn truncate_label(label: &str, max_chars: usize) -> Cow<'_, str> {
	match label.char_indices().nth(max_chars) {
		Some((cut, _)) => Cow::Owned(format!("{}…", &label[..cut])),
		None => Cow::Borrowed(label),
	}
}
