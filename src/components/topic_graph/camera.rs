//! World/screen coordinate transform.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: the layout's native coordinates, independent of zoom
//!   and pan. Node positions and radii live here.
//! - **Screen-space**: CSS pixels on the canvas, after the camera transform.
//!   Pointer events arrive here.
//!
//! [`Camera::to_screen`] and [`Camera::to_world`] are the only places the two
//! spaces are converted; everything else goes through them.

use std::ops::{Add, Div, Mul, Sub};

use super::config::CameraConfig;

/// A 2D point or vector. Which space it lives in is up to the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn length_sq(self) -> f64 {
		self.x * self.x + self.y * self.y
	}

	pub fn length(self) -> f64 {
		self.length_sq().sqrt()
	}

	pub fn distance_sq(self, other: Point) -> f64 {
		(self - other).length_sq()
	}

	/// Linear interpolation from `self` (t = 0) to `other` (t = 1).
	pub fn lerp(self, other: Point, t: f64) -> Point {
		self + (other - self) * t
	}
}

impl Add for Point {
	type Output = Point;
	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Point {
	type Output = Point;
	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f64> for Point {
	type Output = Point;
	fn mul(self, rhs: f64) -> Point {
		Point::new(self.x * rhs, self.y * rhs)
	}
}

impl Div<f64> for Point {
	type Output = Point;
	fn div(self, rhs: f64) -> Point {
		Point::new(self.x / rhs, self.y / rhs)
	}
}

/// Affine view transform: `screen = world * scale + offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
	/// Zoom factor, kept inside the configured bounds by [`Camera::zoom_at`].
	pub scale: f64,
	/// Screen-space translation.
	pub offset: Point,
}

impl Default for Camera {
	fn default() -> Self {
		Self {
			scale: 1.0,
			offset: Point::ZERO,
		}
	}
}

impl Camera {
	pub fn to_screen(&self, world: Point) -> Point {
		world * self.scale + self.offset
	}

	pub fn to_world(&self, screen: Point) -> Point {
		(screen - self.offset) / self.scale
	}

	/// Rescales around `anchor` (screen-space) so the world point under the
	/// anchor stays under it.
	///
	/// Non-finite or non-positive factors leave the camera unchanged.
	pub fn zoom_at(&self, anchor: Point, factor: f64, limits: &CameraConfig) -> Camera {
		if !factor.is_finite() || factor <= 0.0 {
			return *self;
		}
		let scale = (self.scale * factor).clamp(limits.min_scale, limits.max_scale);
		let ratio = scale / self.scale;
		Camera {
			scale,
			offset: anchor - (anchor - self.offset) * ratio,
		}
	}

	/// Translates by a screen-space delta.
	pub fn pan(&self, delta: Point) -> Camera {
		Camera {
			scale: self.scale,
			offset: self.offset + delta,
		}
	}
}
