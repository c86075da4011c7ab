//! Pure projection of canvas state into drawable shapes.
//!
//! Nothing here touches the DOM; [`super::render`] paints the result.

use super::diagram::{Anchor, CHILD_HEIGHT, JUNCTION_SIZE, Node};
use super::geometry::{Point, route};
use super::state::{CanvasState, Hit};
use super::style::CanvasStyle;
use super::types::{NodeKind, PlaceholderRole};

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
	pub color: String,
	pub width: f64,
	pub dashed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
	Rect {
		origin: Point,
		width: f64,
		height: f64,
		radius: f64,
		fill: String,
		stroke: Stroke,
	},
	Polyline {
		points: Vec<Point>,
		stroke: Stroke,
	},
	Circle {
		center: Point,
		radius: f64,
		fill: String,
	},
	/// Centred on `at`.
	Text {
		at: Point,
		text: String,
		color: String,
		font: String,
	},
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	pub background: String,
	pub shapes: Vec<Shape>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeFlags {
	pub selected: bool,
	pub hovered: bool,
}

pub const PLACEHOLDER_PROMPT: &str = "Click to add";
pub const SINK_PROMPT: &str = "Output";

pub fn build(state: &CanvasState, style: &CanvasStyle) -> Scene {
	let diagram = &state.diagram;
	let mut shapes = Vec::new();

	for conn in diagram.connections() {
		if let Some((start, end)) = diagram.endpoints(conn) {
			shapes.extend(connection(start, end, style));
		}
	}
	if let Some((start, cursor)) = state.connection_preview() {
		shapes.extend(connection(start, cursor, style));
	}

	let hovered = match &state.hover {
		Some(Hit::Node(id)) => Some(id.as_str()),
		_ => None,
	};
	for n in diagram.nodes_in_order() {
		let flags = NodeFlags {
			selected: diagram.is_selected(&n.id),
			hovered: hovered == Some(n.id.as_str()),
		};
		shapes.extend(node(n, flags, style));
	}

	Scene {
		background: style.background.clone(),
		shapes,
	}
}

/// Routed path with a marker at each end.
pub fn connection(start: Point, end: Point, style: &CanvasStyle) -> Vec<Shape> {
	let path = route(start, end);
	let marker = |center| Shape::Circle {
		center,
		radius: style.marker_radius,
		fill: style.connection_stroke.clone(),
	};
	vec![
		Shape::Polyline {
			points: path.points().to_vec(),
			stroke: Stroke {
				color: style.connection_stroke.clone(),
				width: style.connection_width,
				dashed: false,
			},
		},
		marker(path.start()),
		marker(path.end()),
	]
}

pub fn node(node: &Node, flags: NodeFlags, style: &CanvasStyle) -> Vec<Shape> {
	match node.kind {
		NodeKind::Root | NodeKind::Child => content_node(node, flags, style),
		NodeKind::Placeholder(role) => placeholder_node(node, role, flags, style),
		NodeKind::Junction => junction_node(node, style),
	}
}

fn font(style: &CanvasStyle, scale: f64) -> String {
	format!("{}px {}", style.font_size * scale, style.font_family)
}

fn content_node(node: &Node, flags: NodeFlags, style: &CanvasStyle) -> Vec<Shape> {
	let (width, height) = node.size();
	let stroke = if flags.selected {
		Stroke {
			color: style.selected_stroke.clone(),
			width: 2.5,
			dashed: false,
		}
	} else if flags.hovered {
		Stroke {
			color: style.hover_stroke.clone(),
			width: 1.5,
			dashed: false,
		}
	} else {
		Stroke {
			color: style.node_stroke.clone(),
			width: 1.0,
			dashed: false,
		}
	};
	let fill = match node.kind {
		NodeKind::Root => style.root_fill.clone(),
		_ => style.node_fill.clone(),
	};

	let mut shapes = vec![Shape::Rect {
		origin: node.position,
		width,
		height,
		radius: style.corner_radius,
		fill,
		stroke,
	}];

	// root nodes get a header band above the body
	if node.kind == NodeKind::Root {
		let y = node.position.y + CHILD_HEIGHT;
		shapes.push(Shape::Polyline {
			points: vec![
				Point::new(node.position.x, y),
				Point::new(node.position.x + width, y),
			],
			stroke: Stroke {
				color: style.node_stroke.clone(),
				width: 1.0,
				dashed: false,
			},
		});
	}

	if let Some(label) = &node.label {
		let scale = if node.kind == NodeKind::Root { 1.2 } else { 1.0 };
		shapes.push(Shape::Text {
			at: Point::new(node.position.x + width / 2.0, node.anchor(Anchor::Left).y),
			text: label.clone(),
			color: style.text_color.clone(),
			font: font(style, scale),
		});
	}

	for side in [Anchor::Left, Anchor::Right] {
		shapes.push(Shape::Circle {
			center: node.anchor(side),
			radius: style.marker_radius,
			fill: style.connection_stroke.clone(),
		});
	}
	shapes
}

fn placeholder_node(
	node: &Node,
	role: PlaceholderRole,
	flags: NodeFlags,
	style: &CanvasStyle,
) -> Vec<Shape> {
	let (width, height) = node.size();
	let stroke_color = if flags.hovered {
		style.hover_stroke.clone()
	} else {
		style.placeholder_stroke.clone()
	};
	let prompt = node.label.clone().unwrap_or_else(|| {
		match role {
			PlaceholderRole::Slot => PLACEHOLDER_PROMPT,
			PlaceholderRole::Sink => SINK_PROMPT,
		}
		.to_string()
	});
	let center_x = node.position.x + width / 2.0;
	let anchor_y = node.anchor(Anchor::Left).y;

	let mut shapes = vec![
		Shape::Rect {
			origin: node.position,
			width,
			height,
			radius: style.corner_radius,
			fill: style.placeholder_fill.clone(),
			stroke: Stroke {
				color: stroke_color,
				width: 1.5,
				dashed: true,
			},
		},
		Shape::Text {
			at: Point::new(center_x, anchor_y - style.font_size * 0.6),
			text: "+".into(),
			color: style.placeholder_text.clone(),
			font: font(style, 1.4),
		},
		Shape::Text {
			at: Point::new(center_x, anchor_y + style.font_size * 0.7),
			text: prompt,
			color: style.placeholder_text.clone(),
			font: font(style, 0.85),
		},
	];

	// only a sink's input anchor is live before materialization
	let live_input = role == PlaceholderRole::Sink;
	for side in [Anchor::Left, Anchor::Right] {
		let fill = if live_input && side == Anchor::Left {
			style.connection_stroke.clone()
		} else {
			style.placeholder_stroke.clone()
		};
		shapes.push(Shape::Circle {
			center: node.anchor(side),
			radius: style.marker_radius,
			fill,
		});
	}
	shapes
}

fn junction_node(node: &Node, style: &CanvasStyle) -> Vec<Shape> {
	vec![Shape::Circle {
		center: node.center(),
		radius: JUNCTION_SIZE / 2.0,
		fill: style.junction_fill.clone(),
	}]
}
