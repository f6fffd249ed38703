//! Frame-driven animation clocks.
//!
//! Both clocks advance by a fixed step per frame rather than by wall time, so
//! a backgrounded tab simply pauses the animation instead of jumping ahead.

/// Ease-in-out cubic over `t` in [0, 1].
pub fn ease_in_out_cubic(t: f64) -> f64 {
	let t = t.clamp(0.0, 1.0);
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
	}
}

/// Progress of the one-shot entrance animation after a rebuild.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entrance {
	progress: f64,
}

impl Default for Entrance {
	fn default() -> Self {
		Self::finished()
	}
}

impl Entrance {
	pub fn start() -> Self {
		Self { progress: 0.0 }
	}

	pub fn finished() -> Self {
		Self { progress: 1.0 }
	}

	pub fn progress(&self) -> f64 {
		self.progress
	}

	pub fn is_running(&self) -> bool {
		self.progress < 1.0
	}

	/// Advances by `step` and returns the eased value, or `None` once the
	/// animation had already completed before this call.
	pub fn advance(&mut self, step: f64) -> Option<f64> {
		if !self.is_running() {
			return None;
		}
		self.progress = (self.progress + step.max(0.0)).min(1.0);
		if 1.0 - self.progress < 1e-9 {
			self.progress = 1.0;
		}
		Some(ease_in_out_cubic(self.progress))
	}
}

/// Monotonic phase accumulator for sinusoidal ring effects.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pulse {
	pub phase: f64,
}

impl Pulse {
	pub fn advance(&mut self, step: f64) {
		self.phase += step;
	}

	/// Oscillates in [0, 1].
	pub fn wave(&self) -> f64 {
		0.5 + 0.5 * self.phase.sin()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn easing_endpoints_and_midpoint() {
		assert_eq!(ease_in_out_cubic(0.0), 0.0);
		assert_eq!(ease_in_out_cubic(1.0), 1.0);
		assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-12);
		assert_eq!(ease_in_out_cubic(-3.0), 0.0);
		assert_eq!(ease_in_out_cubic(7.0), 1.0);
	}

	#[test]
	fn easing_is_monotonic() {
		let mut last = 0.0;
		for i in 0..=100 {
			let v = ease_in_out_cubic(i as f64 / 100.0);
			assert!(v >= last);
			last = v;
		}
	}

	#[test]
	fn entrance_completes_after_25_steps() {
		let mut entrance = Entrance::start();
		let mut frames = 0;
		while entrance.advance(0.04).is_some() {
			frames += 1;
			assert!(frames <= 30, "entrance never finished");
		}
		assert_eq!(frames, 25);
		assert_eq!(entrance.progress(), 1.0);
		assert!(!entrance.is_running());
	}

	#[test]
	fn pulse_wave_is_bounded() {
		let mut pulse = Pulse::default();
		for _ in 0..500 {
			pulse.advance(0.05);
			let w = pulse.wave();
			assert!((0.0..=1.0).contains(&w));
		}
	}
}
