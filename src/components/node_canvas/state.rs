use log::debug;

use super::diagram::{Anchor, Connection, Diagram};
use super::geometry::Point;
use super::style::CanvasConfig;
use super::types::{
	CanvasIntent, ConnectionDescriptor, DiagramDefinition, DiagramError, MaterializePayload, NodeId,
	NodeKind,
};

#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

/// What sits under the pointer.
#[derive(Clone, Debug, PartialEq)]
pub enum Hit {
	/// A node's right anchor, where new connections start.
	Output(NodeId),
	/// A node's body (or a junction's mark).
	Node(NodeId),
}

#[derive(Clone, Debug, PartialEq)]
pub enum PressTarget {
	Node(NodeId),
	Placeholder(NodeId),
	Background,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Interaction {
	#[default]
	Idle,
	/// Pointer is down and has not yet left the drag threshold.
	Pressing {
		target: PressTarget,
		origin: Point,
		grab_offset: Point,
	},
	Dragging {
		node: NodeId,
		grab_offset: Point,
	},
	Panning {
		origin: Point,
		transform_start: Point,
	},
	Connecting {
		from: NodeId,
		cursor: Point,
	},
}

impl Interaction {
	fn node(&self) -> Option<&str> {
		match self {
			Interaction::Pressing {
				target: PressTarget::Node(id) | PressTarget::Placeholder(id),
				..
			}
			| Interaction::Dragging { node: id, .. }
			| Interaction::Connecting { from: id, .. } => Some(id.as_str()),
			_ => None,
		}
	}
}

/// Owns one diagram and reduces pointer events into state transitions.
///
/// Every handler is synchronous and total: events naming nodes that are no
/// longer present are dropped.
pub struct CanvasState {
	pub diagram: Diagram,
	pub transform: ViewTransform,
	pub config: CanvasConfig,
	pub interaction: Interaction,
	pub hover: Option<Hit>,
	pub width: f64,
	pub height: f64,
}

impl CanvasState {
	pub fn new(diagram: Diagram, config: CanvasConfig, width: f64, height: f64) -> Self {
		Self {
			diagram,
			transform: ViewTransform::default(),
			config,
			interaction: Interaction::Idle,
			hover: None,
			width,
			height,
		}
	}

	pub fn screen_to_graph(&self, p: Point) -> Point {
		Point::new(
			(p.x - self.transform.x) / self.transform.k,
			(p.y - self.transform.y) / self.transform.k,
		)
	}

	/// Centre the diagram in the viewport at zoom 1.
	pub fn center_view(&mut self) {
		let Some((min, max)) = self.diagram.bounds() else {
			self.transform = ViewTransform::default();
			return;
		};
		self.transform = ViewTransform {
			x: self.width / 2.0 - (min.x + max.x) / 2.0,
			y: self.height / 2.0 - (min.y + max.y) / 2.0,
			k: 1.0,
		};
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn hit(&self, p: Point) -> Option<Hit> {
		let r = self.config.hit_radius;
		let nodes = self.diagram.nodes_in_order();
		let output = nodes.iter().rev().find(|node| {
			let anchor = node.anchor(Anchor::Right);
			let beside_junction = node.kind != NodeKind::Junction || p.x > node.center().x;
			node.kind.can_source() && beside_junction && anchor.distance(p) <= r
		});
		if let Some(node) = output {
			return Some(Hit::Output(node.id.clone()));
		}
		nodes
			.iter()
			.rev()
			.find(|node| match node.kind {
				NodeKind::Junction => node.center().distance(p) <= r,
				_ => node.contains(p),
			})
			.map(|node| Hit::Node(node.id.clone()))
	}

	/// Node that would receive a connection dropped at `p`.
	fn drop_target(&self, p: Point) -> Option<NodeId> {
		let r = self.config.hit_radius;
		self.diagram
			.nodes_in_order()
			.into_iter()
			.rev()
			.find(|node| node.contains(p) || node.anchor(Anchor::Left).distance(p) <= r)
			.map(|node| node.id.clone())
	}

	pub fn cursor(&self) -> &'static str {
		match (&self.interaction, &self.hover) {
			(Interaction::Dragging { .. } | Interaction::Panning { .. }, _) => "grabbing",
			(Interaction::Connecting { .. }, _) | (Interaction::Idle, Some(Hit::Output(_))) => {
				"crosshair"
			}
			(Interaction::Idle, Some(Hit::Node(id))) => match self.diagram.node(id) {
				Some(node) if node.kind.is_placeholder() => "pointer",
				Some(_) => "grab",
				None => "default",
			},
			_ => "default",
		}
	}

	/// Drop any in-flight interaction or hover whose node has disappeared.
	fn discard_stale(&mut self) {
		if let Some(id) = self.interaction.node() {
			if !self.diagram.contains_node(id) {
				debug!("discarding interaction on removed node {id}");
				self.interaction = Interaction::Idle;
			}
		}
		if let Some(Hit::Output(id) | Hit::Node(id)) = &self.hover {
			if !self.diagram.contains_node(id) {
				self.hover = None;
			}
		}
	}

	/// A press while a drag is still live commits that drag first.
	pub fn on_pointer_down(&mut self, screen: Point) -> Vec<CanvasIntent> {
		self.discard_stale();
		let mut intents = Vec::new();
		if let Interaction::Dragging { node, .. } = std::mem::take(&mut self.interaction) {
			self.commit_drag(node, &mut intents);
		}
		let g = self.screen_to_graph(screen);
		self.interaction = match self.hit(g) {
			Some(Hit::Output(from)) => Interaction::Connecting { from, cursor: g },
			Some(Hit::Node(id)) => {
				let Some(node) = self.diagram.node(&id) else {
					return intents;
				};
				let grab_offset = g - node.position;
				let target = if node.kind.is_placeholder() {
					PressTarget::Placeholder(id)
				} else {
					PressTarget::Node(id)
				};
				Interaction::Pressing {
					target,
					origin: screen,
					grab_offset,
				}
			}
			None => Interaction::Pressing {
				target: PressTarget::Background,
				origin: screen,
				grab_offset: Point::default(),
			},
		};
		intents
	}

	/// Returns whether anything visible changed.
	pub fn on_pointer_move(&mut self, screen: Point) -> bool {
		self.discard_stale();
		let g = self.screen_to_graph(screen);

		match self.interaction.clone() {
			Interaction::Idle => {
				let hovered = self.hit(g);
				if hovered == self.hover {
					return false;
				}
				self.hover = hovered;
				true
			}
			Interaction::Pressing {
				target,
				origin,
				grab_offset,
			} => {
				if screen.distance(origin) <= self.config.drag_threshold {
					return false;
				}
				self.interaction = match target {
					PressTarget::Node(node) => {
						self.diagram.set_position(&node, g - grab_offset);
						Interaction::Dragging { node, grab_offset }
					}
					PressTarget::Background => {
						let transform_start = Point::new(self.transform.x, self.transform.y);
						self.transform.x = transform_start.x + (screen.x - origin.x);
						self.transform.y = transform_start.y + (screen.y - origin.y);
						Interaction::Panning {
							origin,
							transform_start,
						}
					}
					// placeholders are clicked, not dragged
					PressTarget::Placeholder(_) => Interaction::Idle,
				};
				true
			}
			Interaction::Dragging { node, grab_offset } => {
				self.diagram.set_position(&node, g - grab_offset)
			}
			Interaction::Panning {
				origin,
				transform_start,
			} => {
				self.transform.x = transform_start.x + (screen.x - origin.x);
				self.transform.y = transform_start.y + (screen.y - origin.y);
				true
			}
			Interaction::Connecting { from, .. } => {
				self.interaction = Interaction::Connecting { from, cursor: g };
				true
			}
		}
	}

	pub fn on_pointer_up(&mut self, screen: Point) -> Vec<CanvasIntent> {
		self.discard_stale();
		let g = self.screen_to_graph(screen);
		let mut intents = Vec::new();

		match std::mem::take(&mut self.interaction) {
			Interaction::Idle | Interaction::Panning { .. } => {}
			Interaction::Pressing {
				target,
				origin,
				grab_offset,
			} => {
				// no move events may arrive between down and up
				let moved = screen.distance(origin) > self.config.drag_threshold;
				match target {
					PressTarget::Node(id) if moved => {
						self.diagram.set_position(&id, g - grab_offset);
						self.commit_drag(id, &mut intents);
					}
					PressTarget::Node(id) => {
						if self.diagram.select(&id) {
							intents.push(CanvasIntent::NodeSelected { id });
						}
					}
					PressTarget::Placeholder(_) if moved => {}
					PressTarget::Placeholder(id) => {
						self.clear_selection_into(&mut intents);
						intents.push(CanvasIntent::MaterializeRequested { id });
					}
					PressTarget::Background if moved => {
						self.transform.x += screen.x - origin.x;
						self.transform.y += screen.y - origin.y;
					}
					PressTarget::Background => self.clear_selection_into(&mut intents),
				}
			}
			Interaction::Dragging { node, grab_offset } => {
				self.diagram.set_position(&node, g - grab_offset);
				self.commit_drag(node, &mut intents);
			}
			Interaction::Connecting { from, .. } => {
				if let Some(target) = self.drop_target(g) {
					self.connect(from, target, &mut intents);
				}
			}
		}
		intents
	}

	/// Leaving the canvas commits a drag and cancels every other gesture.
	pub fn on_pointer_leave(&mut self) -> Vec<CanvasIntent> {
		self.discard_stale();
		self.hover = None;
		let mut intents = Vec::new();
		if let Interaction::Dragging { node, .. } = std::mem::take(&mut self.interaction) {
			self.commit_drag(node, &mut intents);
		}
		intents
	}

	/// Zooms around `screen`. Returns false for a wheel event with no
	/// vertical component.
	pub fn on_wheel(&mut self, screen: Point, delta_y: f64) -> bool {
		if delta_y == 0.0 || delta_y.is_nan() {
			return false;
		}
		let step = self.config.zoom_step;
		let factor = if delta_y > 0.0 { 1.0 / step } else { step };
		let (min_zoom, max_zoom) = self.config.zoom_range();
		let new_k = (self.transform.k * factor).clamp(min_zoom, max_zoom);
		let ratio = new_k / self.transform.k;
		self.transform.x = screen.x - (screen.x - self.transform.x) * ratio;
		self.transform.y = screen.y - (screen.y - self.transform.y) * ratio;
		self.transform.k = new_k;
		true
	}

	fn commit_drag(&mut self, id: NodeId, intents: &mut Vec<CanvasIntent>) {
		let Some(node) = self.diagram.node(&id) else {
			return;
		};
		intents.push(CanvasIntent::NodeMoved {
			id: id.clone(),
			position: node.position,
		});
		if self.diagram.select(&id) {
			intents.push(CanvasIntent::NodeSelected { id });
		}
	}

	fn connect(&mut self, source: NodeId, target: NodeId, intents: &mut Vec<CanvasIntent>) {
		if !self.diagram.accepts(&source, &target) {
			return;
		}
		let id = self.diagram.next_connection_id(&source, &target);
		let conn = Connection {
			id: id.clone(),
			source: source.clone(),
			target: target.clone(),
		};
		if self.diagram.add_connection(conn).is_ok() {
			intents.push(CanvasIntent::ConnectionCreated { id, source, target });
		}
	}

	fn clear_selection_into(&mut self, intents: &mut Vec<CanvasIntent>) {
		if self.diagram.clear_selection() {
			intents.push(CanvasIntent::SelectionCleared);
		}
	}

	// --- Host operations ---

	/// Replace the whole diagram. On error the current diagram is kept.
	pub fn load(&mut self, def: &DiagramDefinition) -> Result<(), DiagramError> {
		self.diagram = Diagram::from_definition(def)?;
		self.interaction = Interaction::Idle;
		self.hover = None;
		Ok(())
	}

	pub fn materialize(&mut self, id: &str, payload: MaterializePayload) -> Result<(), DiagramError> {
		self.diagram.materialize(id, payload)?;
		debug!("materialized placeholder {id}");
		self.discard_stale();
		Ok(())
	}

	pub fn add_connection(&mut self, desc: ConnectionDescriptor) -> Result<(), DiagramError> {
		self.diagram.add_connection(desc.into())
	}

	pub fn remove_node(&mut self, id: &str) -> bool {
		let removed = self.diagram.remove_node(id).is_some();
		self.discard_stale();
		removed
	}

	pub fn remove_connection(&mut self, id: &str) -> bool {
		self.diagram.remove_connection(id)
	}

	pub fn select(&mut self, id: &str) -> bool {
		self.diagram.select(id)
	}

	pub fn clear_selection(&mut self) -> bool {
		self.diagram.clear_selection()
	}

	/// Source anchor and cursor of an in-progress connection.
	pub fn connection_preview(&self) -> Option<(Point, Point)> {
		match &self.interaction {
			Interaction::Connecting { from, cursor } => self
				.diagram
				.node(from)
				.map(|node| (node.anchor(Anchor::Right), *cursor)),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::node_canvas::diagram::{ANCHOR_Y, NODE_WIDTH, Node};
	use crate::components::node_canvas::types::{KindTag, PlaceholderRole};

	fn state() -> CanvasState {
		let mut d = Diagram::new();
		let nodes = [
			("idea", NodeKind::Root, Point::new(0.0, 0.0)),
			("market", NodeKind::Child, Point::new(300.0, 0.0)),
			("personas", NodeKind::Child, Point::new(300.0, 200.0)),
			("tech", NodeKind::Placeholder(PlaceholderRole::Slot), Point::new(600.0, 0.0)),
			("output", NodeKind::Placeholder(PlaceholderRole::Sink), Point::new(900.0, 0.0)),
			("fan", NodeKind::Junction, Point::new(250.0, 28.0)),
		];
		for (id, kind, pos) in nodes {
			d.add_node(Node::new(id, kind, Some(id.to_uppercase()), pos)).unwrap();
		}
		d.add_connection(Connection {
			id: "idea-fan".into(),
			source: "idea".into(),
			target: "fan".into(),
		})
		.unwrap();
		d.add_connection(Connection {
			id: "market-output".into(),
			source: "market".into(),
			target: "output".into(),
		})
		.unwrap();
		CanvasState::new(d, CanvasConfig::default(), 800.0, 600.0)
	}

	fn click(s: &mut CanvasState, p: Point) -> Vec<CanvasIntent> {
		s.on_pointer_down(p);
		s.on_pointer_up(p)
	}

	fn position(s: &CanvasState, id: &str) -> Point {
		s.diagram.node(id).unwrap().position
	}

	#[test]
	fn small_press_is_a_selection_click() {
		let mut s = state();
		s.on_pointer_down(Point::new(350.0, 20.0));
		assert!(!s.on_pointer_move(Point::new(352.0, 21.0)));
		let intents = s.on_pointer_up(Point::new(352.0, 21.0));

		assert_eq!(
			intents,
			vec![CanvasIntent::NodeSelected {
				id: "market".into()
			}]
		);
		assert_eq!(position(&s, "market"), Point::new(300.0, 0.0));
		assert_eq!(s.interaction, Interaction::Idle);
	}

	#[test]
	fn press_past_threshold_moves_and_commits() {
		let mut s = state();
		s.on_pointer_down(Point::new(350.0, 20.0));
		assert!(s.on_pointer_move(Point::new(360.0, 30.0)));
		assert!(matches!(s.interaction, Interaction::Dragging { .. }));
		assert_eq!(position(&s, "market"), Point::new(310.0, 10.0));

		let intents = s.on_pointer_up(Point::new(370.0, 45.0));
		assert_eq!(
			intents,
			vec![
				CanvasIntent::NodeMoved {
					id: "market".into(),
					position: Point::new(320.0, 25.0),
				},
				CanvasIntent::NodeSelected {
					id: "market".into()
				},
			]
		);
		assert!(s.diagram.is_selected("market"));
	}

	#[test]
	fn selecting_another_node_replaces_selection() {
		let mut s = state();
		click(&mut s, Point::new(50.0, 50.0));
		assert!(s.diagram.is_selected("idea"));
		click(&mut s, Point::new(350.0, 220.0));
		assert!(s.diagram.is_selected("personas"));
		assert!(!s.diagram.is_selected("idea"));
		let selected: Vec<_> = s
			.diagram
			.nodes()
			.filter(|n| s.diagram.is_selected(&n.id))
			.collect();
		assert_eq!(selected.len(), 1);
	}

	#[test]
	fn clicking_empty_canvas_clears_selection() {
		let mut s = state();
		click(&mut s, Point::new(50.0, 50.0));
		let intents = click(&mut s, Point::new(500.0, 500.0));
		assert_eq!(intents, vec![CanvasIntent::SelectionCleared]);
		assert_eq!(s.diagram.selected(), None);
		assert!(click(&mut s, Point::new(500.0, 500.0)).is_empty());
	}

	#[test]
	fn clicking_placeholder_requests_materialization() {
		let mut s = state();
		click(&mut s, Point::new(50.0, 50.0));
		let intents = click(&mut s, Point::new(650.0, 20.0));
		assert_eq!(
			intents,
			vec![
				CanvasIntent::SelectionCleared,
				CanvasIntent::MaterializeRequested { id: "tech".into() },
			]
		);
		// the component never mutates the placeholder itself
		assert!(s.diagram.node("tech").unwrap().kind.is_placeholder());
	}

	#[test]
	fn materialized_sink_keeps_connection_endpoint() {
		let mut s = state();
		let conn = s.diagram.connections()[1].clone();
		let before = s.diagram.route_connection(&conn).unwrap();
		assert_eq!(before.end(), Point::new(900.0, ANCHOR_Y));

		s.materialize(
			"output",
			MaterializePayload {
				label: "Launch plan".into(),
				kind: KindTag::Root,
				connections: vec![],
			},
		)
		.unwrap();

		let after = s.diagram.route_connection(&conn).unwrap();
		assert_eq!(after, before);
	}

	#[test]
	fn dragging_placeholder_is_ignored() {
		let mut s = state();
		s.on_pointer_down(Point::new(650.0, 20.0));
		s.on_pointer_move(Point::new(700.0, 80.0));
		assert!(s.on_pointer_up(Point::new(700.0, 80.0)).is_empty());
		assert_eq!(position(&s, "tech"), Point::new(600.0, 0.0));
	}

	#[test]
	fn leaving_canvas_commits_drag() {
		let mut s = state();
		s.on_pointer_down(Point::new(350.0, 220.0));
		s.on_pointer_move(Point::new(380.0, 260.0));
		let intents = s.on_pointer_leave();
		assert_eq!(
			intents.first(),
			Some(&CanvasIntent::NodeMoved {
				id: "personas".into(),
				position: Point::new(330.0, 240.0),
			})
		);
		assert_eq!(s.interaction, Interaction::Idle);
		assert!(s.on_pointer_up(Point::new(0.0, 0.0)).is_empty());
	}

	#[test]
	fn leaving_canvas_mid_press_is_not_a_click() {
		let mut s = state();
		s.on_pointer_down(Point::new(350.0, 220.0));
		assert!(s.on_pointer_leave().is_empty());
		assert_eq!(s.diagram.selected(), None);
	}

	#[test]
	fn removing_dragged_node_discards_interaction() {
		let mut s = state();
		s.on_pointer_down(Point::new(50.0, 50.0));
		s.on_pointer_move(Point::new(80.0, 80.0));
		assert!(s.remove_node("idea"));
		assert_eq!(s.interaction, Interaction::Idle);
		assert!(!s.on_pointer_move(Point::new(90.0, 90.0)));
		assert!(s.on_pointer_up(Point::new(90.0, 90.0)).is_empty());
		assert!(s.diagram.connections().iter().all(|c| c.source != "idea"));
	}

	#[test]
	fn unknown_ids_are_no_ops() {
		let mut s = state();
		assert!(!s.remove_node("nope"));
		assert!(!s.select("nope"));
		assert!(!s.remove_connection("nope"));
		assert!(matches!(
			s.materialize(
				"nope",
				MaterializePayload {
					label: "x".into(),
					kind: KindTag::Child,
					connections: vec![],
				}
			),
			Err(DiagramError::UnknownNode(_))
		));
	}

	#[test]
	fn junction_is_draggable_but_never_selected() {
		let mut s = state();
		// left half of the junction mark
		assert!(click(&mut s, Point::new(252.0, 32.0)).is_empty());
		assert_eq!(s.diagram.selected(), None);

		s.on_pointer_down(Point::new(252.0, 32.0));
		s.on_pointer_move(Point::new(252.0, 82.0));
		let intents = s.on_pointer_up(Point::new(252.0, 82.0));
		assert_eq!(
			intents,
			vec![CanvasIntent::NodeMoved {
				id: "fan".into(),
				position: Point::new(250.0, 78.0),
			}]
		);
	}

	#[test]
	fn drawing_from_output_anchor_creates_connection() {
		let mut s = state();
		s.on_pointer_down(Point::new(NODE_WIDTH + 300.0, ANCHOR_Y + 200.0));
		assert!(matches!(s.interaction, Interaction::Connecting { .. }));
		s.on_pointer_move(Point::new(800.0, 100.0));
		let (start, cursor) = s.connection_preview().unwrap();
		assert_eq!(start, Point::new(500.0, 232.0));
		assert_eq!(cursor, Point::new(800.0, 100.0));

		let intents = s.on_pointer_up(Point::new(950.0, 40.0));
		assert_eq!(
			intents,
			vec![CanvasIntent::ConnectionCreated {
				id: "personas->output".into(),
				source: "personas".into(),
				target: "output".into(),
			}]
		);
		assert_eq!(s.diagram.incoming("output"), 2);
	}

	#[test]
	fn connection_to_slot_placeholder_is_refused() {
		let mut s = state();
		s.on_pointer_down(Point::new(500.0, 232.0));
		s.on_pointer_move(Point::new(640.0, 30.0));
		assert!(s.on_pointer_up(Point::new(640.0, 30.0)).is_empty());
		assert_eq!(s.diagram.connections().len(), 2);
	}

	#[test]
	fn dragging_background_pans() {
		let mut s = state();
		click(&mut s, Point::new(50.0, 50.0));
		s.on_pointer_down(Point::new(500.0, 500.0));
		s.on_pointer_move(Point::new(540.0, 470.0));
		assert_eq!(s.transform, ViewTransform { x: 40.0, y: -30.0, k: 1.0 });
		assert!(s.on_pointer_up(Point::new(540.0, 470.0)).is_empty());
		assert!(s.diagram.is_selected("idea"));

		// pointer coordinates are mapped through the pan
		assert_eq!(
			s.hit(s.screen_to_graph(Point::new(90.0, 20.0))),
			Some(Hit::Node("idea".into()))
		);
	}

	#[test]
	fn drag_under_zoom_follows_pointer_in_diagram_space() {
		let mut s = state();
		s.transform = ViewTransform { x: 100.0, y: 0.0, k: 2.0 };
		// screen (200, 40) -> graph (50, 20), inside "idea"
		s.on_pointer_down(Point::new(200.0, 40.0));
		s.on_pointer_move(Point::new(260.0, 100.0));
		s.on_pointer_up(Point::new(260.0, 100.0));
		assert_eq!(position(&s, "idea"), Point::new(30.0, 30.0));
	}

	#[test]
	fn wheel_zoom_is_clamped() {
		let mut s = state();
		for _ in 0..100 {
			s.on_wheel(Point::new(400.0, 300.0), -1.0);
		}
		assert_eq!(s.transform.k, s.config.max_zoom);
		for _ in 0..200 {
			s.on_wheel(Point::new(400.0, 300.0), 1.0);
		}
		assert_eq!(s.transform.k, s.config.min_zoom);
	}

	#[test]
	fn hover_drives_cursor() {
		let mut s = state();
		assert!(s.on_pointer_move(Point::new(650.0, 20.0)));
		assert_eq!(s.cursor(), "pointer");
		assert!(s.on_pointer_move(Point::new(50.0, 50.0)));
		assert_eq!(s.cursor(), "grab");
		assert!(!s.on_pointer_move(Point::new(51.0, 50.0)));
		assert!(s.on_pointer_move(Point::new(NODE_WIDTH, ANCHOR_Y)));
		assert_eq!(s.cursor(), "crosshair");
		s.on_pointer_leave();
		assert_eq!(s.cursor(), "default");
	}

	#[test]
	fn center_view_centres_bounds() {
		let mut s = state();
		s.center_view();
		// bounds span x 0..1100 and y 0..264
		assert_eq!(s.transform, ViewTransform { x: -150.0, y: 168.0, k: 1.0 });
	}

	#[test]
	fn release_far_from_press_moves_without_move_events() {
		let mut s = state();
		s.on_pointer_down(Point::new(350.0, 20.0));
		let intents = s.on_pointer_up(Point::new(400.0, 70.0));
		assert_eq!(
			intents,
			vec![
				CanvasIntent::NodeMoved {
					id: "market".into(),
					position: Point::new(350.0, 50.0),
				},
				CanvasIntent::NodeSelected {
					id: "market".into()
				},
			]
		);
		assert_eq!(position(&s, "market"), Point::new(350.0, 50.0));
	}

	#[test]
	fn release_far_from_background_press_pans() {
		let mut s = state();
		click(&mut s, Point::new(50.0, 50.0));
		s.on_pointer_down(Point::new(500.0, 500.0));
		assert!(s.on_pointer_up(Point::new(540.0, 470.0)).is_empty());
		assert_eq!(s.transform, ViewTransform { x: 40.0, y: -30.0, k: 1.0 });
		assert!(s.diagram.is_selected("idea"));
	}

	#[test]
	fn release_far_from_placeholder_press_does_nothing() {
		let mut s = state();
		s.on_pointer_down(Point::new(650.0, 20.0));
		assert!(s.on_pointer_up(Point::new(700.0, 80.0)).is_empty());
		assert_eq!(position(&s, "tech"), Point::new(600.0, 0.0));
	}

	#[test]
	fn second_press_commits_live_drag() {
		let mut s = state();
		assert!(s.on_pointer_down(Point::new(350.0, 20.0)).is_empty());
		s.on_pointer_move(Point::new(400.0, 70.0));

		let intents = s.on_pointer_down(Point::new(500.0, 500.0));
		assert_eq!(
			intents,
			vec![
				CanvasIntent::NodeMoved {
					id: "market".into(),
					position: Point::new(350.0, 50.0),
				},
				CanvasIntent::NodeSelected {
					id: "market".into()
				},
			]
		);
		assert_eq!(
			s.on_pointer_up(Point::new(500.0, 500.0)),
			vec![CanvasIntent::SelectionCleared]
		);
		assert_eq!(position(&s, "market"), Point::new(350.0, 50.0));
	}

	#[test]
	fn horizontal_scroll_does_not_zoom() {
		let mut s = state();
		assert!(!s.on_wheel(Point::new(400.0, 300.0), 0.0));
		assert_eq!(s.transform, ViewTransform::default());
	}

	#[test]
	fn zoom_never_reaches_zero() {
		let mut s = state();
		s.config.min_zoom = 0.0;
		for _ in 0..500 {
			s.on_wheel(Point::new(400.0, 300.0), 1.0);
		}
		assert!(s.transform.k > 0.0);
		assert!(s.screen_to_graph(Point::new(10.0, 10.0)).is_finite());
	}
}
