use serde::{Deserialize, Serialize};

/// Theme values handed straight to the painter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasStyle {
	pub background: String,
	pub root_fill: String,
	pub node_fill: String,
	pub node_stroke: String,
	pub text_color: String,
	pub font_family: String,
	pub font_size: f64,
	pub selected_stroke: String,
	pub hover_stroke: String,
	pub placeholder_fill: String,
	pub placeholder_stroke: String,
	pub placeholder_text: String,
	pub junction_fill: String,
	pub connection_stroke: String,
	pub connection_width: f64,
	pub marker_radius: f64,
	pub corner_radius: f64,
}

impl Default for CanvasStyle {
	fn default() -> Self {
		Self {
			background: "#1a1a2e".into(),
			root_fill: "#2a2a4a".into(),
			node_fill: "#23233d".into(),
			node_stroke: "rgba(100, 180, 255, 0.6)".into(),
			text_color: "rgba(255, 255, 255, 0.9)".into(),
			font_family: "sans-serif".into(),
			font_size: 14.0,
			selected_stroke: "#64b4ff".into(),
			hover_stroke: "rgba(255, 255, 255, 0.5)".into(),
			placeholder_fill: "rgba(255, 255, 255, 0.03)".into(),
			placeholder_stroke: "rgba(255, 255, 255, 0.35)".into(),
			placeholder_text: "rgba(255, 255, 255, 0.45)".into(),
			junction_fill: "rgba(100, 180, 255, 0.6)".into(),
			connection_stroke: "rgba(100, 180, 255, 0.8)".into(),
			connection_width: 1.5,
			marker_radius: 3.5,
			corner_radius: 8.0,
		}
	}
}

/// Interaction tunables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
	/// Screen-space distance a press may travel and still count as a click.
	pub drag_threshold: f64,
	/// Diagram-space radius for anchor and junction hits.
	pub hit_radius: f64,
	pub min_zoom: f64,
	pub max_zoom: f64,
	pub zoom_step: f64,
}

impl Default for CanvasConfig {
	fn default() -> Self {
		Self {
			drag_threshold: 3.0,
			hit_radius: 12.0,
			min_zoom: 0.1,
			max_zoom: 10.0,
			zoom_step: 1.1,
		}
	}
}

/// Smallest zoom factor ever applied, whatever the config says.
const ZOOM_FLOOR: f64 = 0.01;

impl CanvasConfig {
	/// Zoom bounds, kept positive and ordered so the view transform can
	/// always be inverted.
	pub fn zoom_range(&self) -> (f64, f64) {
		let min = if self.min_zoom.is_finite() {
			self.min_zoom.max(ZOOM_FLOOR)
		} else {
			ZOOM_FLOOR
		};
		let max = if self.max_zoom.is_finite() {
			self.max_zoom.max(min)
		} else {
			min.max(Self::default().max_zoom)
		};
		(min, max)
	}
}
