//! Leptos component wrapping the topic graph canvas.
//!
//! The component creates a container and a canvas, wires pointer/wheel
//! handlers to the interaction controller, and runs its own
//! `requestAnimationFrame` loop that ticks and renders the engine state every
//! frame. A `ResizeObserver` on the container keeps the device-pixel-ratio
//! aware backing store in sync with the host layout. The frame loop and the
//! observer are released exactly once when the component is disposed.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent, PointerEvent,
	ResizeObserver, WheelEvent,
};

use super::camera::Point;
use super::config::EngineConfig;
use super::error::{EngineError, describe};
use super::interaction::Outcome;
use super::render;
use super::scale::ScaleConfig;
use super::state::GraphState;
use super::theme::Theme;
use super::types::GraphSnapshot;

/// Fallback surface size when the container has not been laid out yet.
const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

/// Engine state plus the drawing context it renders into.
struct Engine {
	state: GraphState,
	scale: ScaleConfig,
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	dpr: f64,
}

type SharedEngine = Rc<RefCell<Option<Engine>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Browser resources owned by a mounted engine.
struct Teardown {
	running: Rc<Cell<bool>>,
	frame_id: Rc<Cell<Option<i32>>>,
	animate: FrameCallback,
	observer: Option<ResizeObserver>,
	resize_cb: Option<Closure<dyn FnMut()>>,
}

impl Teardown {
	fn run(mut self) {
		self.running.set(false);
		if let (Some(id), Some(window)) = (self.frame_id.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
		// Dropping the frame closure also breaks its self-reference.
		self.animate.borrow_mut().take();
		if let Some(observer) = self.observer.take() {
			observer.disconnect();
		}
		self.resize_cb.take();
		debug!("topic-graph: engine torn down");
	}
}

/// Renders an interactive topic/item graph on a canvas element.
///
/// Pass the entity snapshot via the reactive `data` signal. The model is only
/// rebuilt when the snapshot's fingerprint changes, so re-supplying equal data
/// keeps the user's pan, zoom and drag state. The canvas fills its container;
/// size the container with host layout.
///
/// `on_item_activated` fires with the item id when an item node is
/// double-clicked. `on_selection_change` fires with the selected item id (or
/// `None`) whenever the selection changes.
#[component]
pub fn TopicGraphCanvas(
	#[prop(into)] data: Signal<GraphSnapshot>,
	#[prop(optional)] on_item_activated: Option<Callback<String>>,
	#[prop(optional)] on_selection_change: Option<Callback<Option<String>>>,
	#[prop(optional)] config: Option<EngineConfig>,
	#[prop(optional)] theme: Option<Theme>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let engine: SharedEngine = Rc::new(RefCell::new(None));
	let teardown = StoredValue::new_local(None::<Teardown>);

	let notify = move |outcome: Option<Outcome>| match outcome {
		Some(Outcome::SelectionChanged(id)) => {
			if let Some(cb) = on_selection_change {
				cb.run(id);
			}
		}
		Some(Outcome::ItemActivated(id)) => {
			info!("topic-graph: item {id} activated");
			if let Some(cb) = on_item_activated {
				cb.run(id);
			}
		}
		None => {}
	};

	let engine_init = engine.clone();
	Effect::new(move |_| {
		let (Some(canvas), Some(container)) = (canvas_ref.get(), container_ref.get()) else {
			return;
		};
		if engine_init.borrow().is_some() {
			return;
		}
		let container: Element = container.into();
		let setup = EngineSetup {
			config: config.clone().unwrap_or_default(),
			theme: theme.clone().unwrap_or_default(),
		};
		match attach(&engine_init, canvas, container, &data.get_untracked(), setup) {
			Ok(handles) => teardown.set_value(Some(handles)),
			Err(e) => error!("topic-graph: engine not started: {e}"),
		}
	});

	let engine_data = engine.clone();
	Effect::new(move |_| {
		let snapshot = data.get();
		let outcome = engine_data
			.borrow_mut()
			.as_mut()
			.and_then(|e| e.state.set_snapshot(&snapshot));
		notify(outcome);
	});

	on_cleanup(move || {
		if let Some(handles) = teardown.try_update_value(Option::take).flatten() {
			handles.run();
		}
	});

	let engine_pd = engine.clone();
	let on_pointerdown = move |ev: PointerEvent| {
		let at = pointer_position(&ev);
		with_engine(&engine_pd, |e| e.state.on_pointer_down(at));
	};

	let engine_pm = engine.clone();
	let on_pointermove = move |ev: PointerEvent| {
		let at = pointer_position(&ev);
		let buttons_down = ev.buttons() != 0;
		with_engine(&engine_pm, |e| e.state.on_pointer_move(at, buttons_down));
	};

	let engine_pu = engine.clone();
	let on_pointerup = move |_: PointerEvent| {
		with_engine(&engine_pu, |e| e.state.on_pointer_up());
	};

	let engine_pl = engine.clone();
	let on_pointerleave = move |_: PointerEvent| {
		with_engine(&engine_pl, |e| e.state.on_pointer_leave());
	};

	let engine_wh = engine.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let at = pointer_position(&ev);
		with_engine(&engine_wh, |e| e.state.on_wheel(at, ev.delta_y()));
	};

	let engine_cl = engine.clone();
	let on_click = move |ev: MouseEvent| {
		let at = pointer_position(&ev);
		notify(with_engine(&engine_cl, |e| e.state.on_click(at)).flatten());
	};

	let engine_dc = engine;
	let on_dblclick = move |ev: MouseEvent| {
		let at = pointer_position(&ev);
		notify(with_engine(&engine_dc, |e| e.state.on_double_click(at)).flatten());
	};

	view! {
		<div
			node_ref=container_ref
			class="topic-graph"
			style="position: relative; width: 100%; height: 100%; overflow: hidden;"
		>
			<canvas
				node_ref=canvas_ref
				class="topic-graph-canvas"
				on:pointerdown=on_pointerdown
				on:pointermove=on_pointermove
				on:pointerup=on_pointerup
				on:pointerleave=on_pointerleave
				on:wheel=on_wheel
				on:click=on_click
				on:dblclick=on_dblclick
				style="display: block; cursor: grab; touch-action: none;"
			/>
		</div>
	}
}

struct EngineSetup {
	config: EngineConfig,
	theme: Theme,
}

/// Builds the engine for `canvas`, starts observing `container` and schedules
/// the first frame.
fn attach(
	engine: &SharedEngine,
	canvas: HtmlCanvasElement,
	container: Element,
	snapshot: &GraphSnapshot,
	setup: EngineSetup,
) -> Result<Teardown, EngineError> {
	let window = web_sys::window().ok_or(EngineError::NoWindow)?;
	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")
		.map_err(|e| EngineError::ContextUnavailable(describe(&e)))?
		.ok_or_else(|| EngineError::ContextUnavailable("context is null".into()))?
		.dyn_into()
		.map_err(|_| EngineError::ContextUnavailable("not a 2d context".into()))?;

	let (w, h) = container_size(&container).unwrap_or(FALLBACK_SIZE);
	let dpr = device_pixel_ratio(&window);
	fit_canvas(&canvas, w, h, dpr);

	let mut state = GraphState::new(setup.config, setup.theme, w, h);
	state.set_snapshot(snapshot);
	info!(
		"topic-graph: engine started at {w}x{h} (dpr {dpr}, theme {}) with {} nodes",
		state.theme.name,
		state.model.nodes.len()
	);
	*engine.borrow_mut() = Some(Engine {
		state,
		scale: ScaleConfig::default(),
		canvas: canvas.clone(),
		ctx,
		dpr,
	});

	let mut handles = Teardown {
		running: Rc::new(Cell::new(true)),
		frame_id: Rc::new(Cell::new(None)),
		animate: Rc::new(RefCell::new(None)),
		observer: None,
		resize_cb: None,
	};

	let (engine_resize, observed) = (engine.clone(), container.clone());
	let resize_cb: Closure<dyn FnMut()> = Closure::new(move || {
		let Some((nw, nh)) = container_size(&observed) else {
			return;
		};
		let dpr = web_sys::window().map_or(1.0, |win| device_pixel_ratio(&win));
		if let Some(ref mut e) = *engine_resize.borrow_mut() {
			fit_canvas(&e.canvas, nw, nh, dpr);
			e.dpr = dpr;
			e.state.resize(nw, nh);
		}
	});
	let observer = match ResizeObserver::new(resize_cb.as_ref().unchecked_ref()) {
		Ok(observer) => observer,
		Err(e) => {
			engine.borrow_mut().take();
			return Err(EngineError::ResizeObserver(describe(&e)));
		}
	};
	observer.observe(&container);
	handles.observer = Some(observer);
	handles.resize_cb = Some(resize_cb);

	let (engine_anim, animate_inner) = (engine.clone(), handles.animate.clone());
	let (running, frame_id) = (handles.running.clone(), handles.frame_id.clone());
	*handles.animate.borrow_mut() = Some(Closure::new(move || {
		frame_id.set(None);
		if !running.get() {
			return;
		}
		if let Some(ref mut e) = *engine_anim.borrow_mut() {
			e.state.tick();
			render::render(&e.state, &e.ctx, &e.scale, e.dpr);
		}
		if let Err(e) = schedule_frame(&animate_inner, &frame_id) {
			warn!("topic-graph: frame loop stopped: {e}");
		}
	}));

	if let Err(e) = schedule_frame(&handles.animate, &handles.frame_id) {
		engine.borrow_mut().take();
		handles.run();
		return Err(e);
	}
	Ok(handles)
}

fn schedule_frame(animate: &FrameCallback, frame_id: &Cell<Option<i32>>) -> Result<(), EngineError> {
	let window = web_sys::window().ok_or(EngineError::NoWindow)?;
	if let Some(ref cb) = *animate.borrow() {
		let id = window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.map_err(|e| EngineError::FrameScheduling(describe(&e)))?;
		frame_id.set(Some(id));
	}
	Ok(())
}

/// Runs `f` against the mounted engine and refreshes the canvas cursor.
/// Events that arrive before mount or after a failed start are ignored.
fn with_engine<R>(engine: &SharedEngine, f: impl FnOnce(&mut Engine) -> R) -> Option<R> {
	let mut guard = engine.borrow_mut();
	let e = guard.as_mut()?;
	let result = f(e);
	let _ = web_sys::HtmlElement::style(&e.canvas).set_property("cursor", e.state.interaction.cursor());
	Some(result)
}

/// Pointer position relative to the canvas, in CSS pixels.
fn pointer_position(ev: &MouseEvent) -> Point {
	let rect = ev
		.current_target()
		.and_then(|t| t.dyn_into::<Element>().ok())
		.map(|el| el.get_bounding_client_rect());
	match rect {
		Some(rect) => Point::new(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		),
		None => Point::new(ev.offset_x() as f64, ev.offset_y() as f64),
	}
}

fn container_size(container: &Element) -> Option<(f64, f64)> {
	let (w, h) = (container.client_width(), container.client_height());
	(w > 0 && h > 0).then(|| (w as f64, h as f64))
}

fn device_pixel_ratio(window: &web_sys::Window) -> f64 {
	let dpr = window.device_pixel_ratio();
	if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 }
}

/// Sizes the backing store in device pixels and the element in CSS pixels.
fn fit_canvas(canvas: &HtmlCanvasElement, width: f64, height: f64, dpr: f64) {
	canvas.set_width((width * dpr).round().max(1.0) as u32);
	canvas.set_height((height * dpr).round().max(1.0) as u32);
	let style = web_sys::HtmlElement::style(canvas);
	let _ = style.set_property("width", &format!("{width}px"));
	let _ = style.set_property("height", &format!("{height}px"));
}
