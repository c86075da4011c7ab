//! Orthogonal connection routing.

use std::ops::Sub;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn is_finite(self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}

	pub fn offset(self, dx: f64, dy: f64) -> Self {
		Self::new(self.x + dx, self.y + dy)
	}

	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, other: Point) -> Point {
		Point::new(self.x - other.x, self.y - other.y)
	}
}

/// Polyline of axis-aligned segments. Always holds at least one point.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
	points: Vec<Point>,
}

impl Path {
	pub fn points(&self) -> &[Point] {
		&self.points
	}

	pub fn start(&self) -> Point {
		self.points[0]
	}

	pub fn end(&self) -> Point {
		self.points[self.points.len() - 1]
	}

	#[cfg(test)]
	pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
		self.points.windows(2).map(|w| (w[0], w[1]))
	}

	#[cfg(test)]
	pub fn length(&self) -> f64 {
		self.segments().map(|(a, b)| a.distance(b)).sum()
	}

	#[cfg(test)]
	pub fn is_degenerate(&self) -> bool {
		self.points.len() == 1
	}
}

/// Replace non-finite endpoints so that the route stays drawable.
///
/// A broken endpoint collapses onto the other one; if both are broken the
/// route collapses onto the origin.
pub fn sanitize(start: Point, end: Point) -> (Point, Point) {
	match (start.is_finite(), end.is_finite()) {
		(true, true) => (start, end),
		(false, true) => (end, end),
		(true, false) => (start, start),
		(false, false) => (Point::default(), Point::default()),
	}
}

/// Three-leg Manhattan route: horizontal to the mid x, vertical, horizontal.
///
/// Zero-length legs are dropped, so aligned endpoints yield a single straight
/// run and coincident endpoints yield a single point.
pub fn route(start: Point, end: Point) -> Path {
	let (start, end) = sanitize(start, end);
	// halves first so huge coordinates cannot overflow to infinity
	let mid_x = start.x / 2.0 + end.x / 2.0;

	let mut points: Vec<Point> = Vec::with_capacity(4);
	for p in [
		start,
		Point::new(mid_x, start.y),
		Point::new(mid_x, end.y),
		end,
	] {
		if points.last() == Some(&p) {
			continue;
		}
		// merge straight continuations into one segment
		let straight = matches!(
			points.as_slice(),
			[.., a, b] if (a.x == b.x && b.x == p.x) || (a.y == b.y && b.y == p.y)
		);
		if straight {
			points.pop();
		}
		points.push(p);
	}
	Path { points }
}
