//! Engine initialization errors.

use wasm_bindgen::JsValue;

/// Why the engine could not attach to its drawing surface.
///
/// None of these escape into the host: the component logs them and stays
/// mounted without drawing.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
	#[error("no browser window available")]
	NoWindow,
	#[error("canvas has no 2d rendering context: {0}")]
	ContextUnavailable(String),
	#[error("could not observe container size: {0}")]
	ResizeObserver(String),
	#[error("could not schedule an animation frame: {0}")]
	FrameScheduling(String),
}

/// Renders a thrown JS value for an error message.
pub(crate) fn describe(value: &JsValue) -> String {
	value
		.as_string()
		.unwrap_or_else(|| format!("{value:?}"))
}
