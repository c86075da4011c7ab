use std::collections::HashMap;

#[cfg(test)]
use super::geometry::{Path, route};
use super::geometry::Point;
use super::types::{
	ConnectionDescriptor, ConnectionId, DiagramDefinition, DiagramError, KindTag,
	MaterializePayload, NodeId, NodeKind,
};

pub const NODE_WIDTH: f64 = 200.0;
pub const CHILD_HEIGHT: f64 = 64.0;
pub const ROOT_HEIGHT: f64 = 96.0;
pub const JUNCTION_SIZE: f64 = 8.0;
/// Anchor height below the top edge, shared by every boxed kind so that a
/// placeholder keeps its anchors when it becomes a root or child.
pub const ANCHOR_Y: f64 = CHILD_HEIGHT / 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
	/// Input / target.
	Left,
	/// Output / source.
	Right,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: NodeId,
	pub kind: NodeKind,
	pub label: Option<String>,
	pub position: Point,
}

impl Node {
	pub fn new(id: impl Into<NodeId>, kind: NodeKind, label: Option<String>, position: Point) -> Self {
		let label = if kind == NodeKind::Junction { None } else { label };
		Self {
			id: id.into(),
			kind,
			label,
			position,
		}
	}

	pub fn size(&self) -> (f64, f64) {
		match self.kind {
			NodeKind::Root => (NODE_WIDTH, ROOT_HEIGHT),
			NodeKind::Child | NodeKind::Placeholder(_) => (NODE_WIDTH, CHILD_HEIGHT),
			NodeKind::Junction => (JUNCTION_SIZE, JUNCTION_SIZE),
		}
	}

	pub fn anchor(&self, side: Anchor) -> Point {
		let (w, _) = self.size();
		let dy = match self.kind {
			NodeKind::Junction => JUNCTION_SIZE / 2.0,
			_ => ANCHOR_Y,
		};
		match side {
			Anchor::Left => self.position.offset(0.0, dy),
			Anchor::Right => self.position.offset(w, dy),
		}
	}

	pub fn center(&self) -> Point {
		let (w, h) = self.size();
		self.position.offset(w / 2.0, h / 2.0)
	}

	pub fn contains(&self, p: Point) -> bool {
		let (w, h) = self.size();
		p.x >= self.position.x
			&& p.x <= self.position.x + w
			&& p.y >= self.position.y
			&& p.y <= self.position.y + h
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
	pub id: ConnectionId,
	pub source: NodeId,
	pub target: NodeId,
}

impl From<ConnectionDescriptor> for Connection {
	fn from(desc: ConnectionDescriptor) -> Self {
		Self {
			id: desc.id,
			source: desc.source_node_id,
			target: desc.target_node_id,
		}
	}
}

/// Nodes, connections and the single selected node of one canvas.
///
/// Connections store only node ids; their geometry is derived from the
/// endpoints' anchors whenever it is asked for.
#[derive(Clone, Debug, Default)]
pub struct Diagram {
	nodes: HashMap<NodeId, Node>,
	connections: Vec<Connection>,
	selected: Option<NodeId>,
}

impl Diagram {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_definition(def: &DiagramDefinition) -> Result<Self, DiagramError> {
		let mut diagram = Self::new();
		for desc in &def.nodes {
			diagram.add_node(Node::new(
				desc.id.clone(),
				desc.node_kind(),
				desc.label.clone(),
				desc.position,
			))?;
		}
		for conn in &def.connections {
			diagram.add_connection(conn.clone().into())?;
		}
		Ok(diagram)
	}

	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.get(id)
	}

	pub fn contains_node(&self, id: &str) -> bool {
		self.nodes.contains_key(id)
	}

	pub fn nodes(&self) -> impl Iterator<Item = &Node> {
		self.nodes.values()
	}

	/// Nodes sorted by id; later entries paint over earlier ones.
	pub fn nodes_in_order(&self) -> Vec<&Node> {
		let mut nodes: Vec<&Node> = self.nodes.values().collect();
		nodes.sort_by(|a, b| a.id.cmp(&b.id));
		nodes
	}

	/// Top-left and bottom-right corners enclosing every node.
	pub fn bounds(&self) -> Option<(Point, Point)> {
		self.nodes.values().fold(None, |acc, node| {
			let (w, h) = node.size();
			let (lo, hi) = (node.position, node.position.offset(w, h));
			Some(match acc {
				None => (lo, hi),
				Some((min, max)) => (
					Point::new(min.x.min(lo.x), min.y.min(lo.y)),
					Point::new(max.x.max(hi.x), max.y.max(hi.y)),
				),
			})
		})
	}

	pub fn connections(&self) -> &[Connection] {
		&self.connections
	}

	pub fn add_node(&mut self, node: Node) -> Result<(), DiagramError> {
		if self.nodes.contains_key(&node.id) {
			return Err(DiagramError::DuplicateNode(node.id));
		}
		self.nodes.insert(node.id.clone(), node);
		Ok(())
	}

	pub fn add_connection(&mut self, conn: Connection) -> Result<(), DiagramError> {
		self.check_connection(&conn)?;
		self.connections.push(conn);
		Ok(())
	}

	fn check_connection(&self, conn: &Connection) -> Result<(), DiagramError> {
		if self.connections.iter().any(|c| c.id == conn.id) {
			return Err(DiagramError::DuplicateConnection(conn.id.clone()));
		}
		if conn.source == conn.target {
			return Err(DiagramError::SelfConnection(conn.id.clone()));
		}
		let source = self
			.nodes
			.get(&conn.source)
			.ok_or_else(|| DiagramError::UnknownNode(conn.source.clone()))?;
		let target = self
			.nodes
			.get(&conn.target)
			.ok_or_else(|| DiagramError::UnknownNode(conn.target.clone()))?;
		if !source.kind.can_source() {
			return Err(DiagramError::PlaceholderSource(source.id.clone()));
		}
		if !target.kind.can_target() {
			return Err(DiagramError::PlaceholderTarget(target.id.clone()));
		}
		if target.kind == NodeKind::Junction && self.incoming(&target.id) > 0 {
			return Err(DiagramError::JunctionInputTaken(target.id.clone()));
		}
		Ok(())
	}

	/// Whether `target` would accept a new connection from `source`.
	pub fn accepts(&self, source: &str, target: &str) -> bool {
		let probe = Connection {
			id: self.next_connection_id(source, target),
			source: source.to_string(),
			target: target.to_string(),
		};
		self.check_connection(&probe).is_ok()
	}

	pub fn incoming(&self, id: &str) -> usize {
		self.connections.iter().filter(|c| c.target == id).count()
	}

	pub fn next_connection_id(&self, source: &str, target: &str) -> ConnectionId {
		let base = format!("{source}->{target}");
		let taken = |id: &str| self.connections.iter().any(|c| c.id == id);
		if !taken(&base) {
			return base;
		}
		(2..)
			.map(|n| format!("{base}#{n}"))
			.find(|id| !taken(id))
			.unwrap_or(base)
	}

	/// Drops the node and every connection touching it.
	pub fn remove_node(&mut self, id: &str) -> Option<Node> {
		let node = self.nodes.remove(id)?;
		self.connections.retain(|c| c.source != id && c.target != id);
		if self.selected.as_deref() == Some(id) {
			self.selected = None;
		}
		Some(node)
	}

	pub fn remove_connection(&mut self, id: &str) -> bool {
		let before = self.connections.len();
		self.connections.retain(|c| c.id != id);
		self.connections.len() != before
	}

	pub fn set_position(&mut self, id: &str, position: Point) -> bool {
		match self.nodes.get_mut(id) {
			Some(node) if position.is_finite() => {
				node.position = position;
				true
			}
			_ => false,
		}
	}

	#[cfg(test)]
	pub fn selected(&self) -> Option<&NodeId> {
		self.selected.as_ref()
	}

	pub fn is_selected(&self, id: &str) -> bool {
		self.selected.as_deref() == Some(id)
	}

	/// Selects a content node, replacing any previous selection.
	pub fn select(&mut self, id: &str) -> bool {
		match self.nodes.get(id) {
			Some(node) if node.kind.is_content() => {
				self.selected = Some(node.id.clone());
				true
			}
			_ => false,
		}
	}

	pub fn clear_selection(&mut self) -> bool {
		self.selected.take().is_some()
	}

	/// Turns a placeholder into a content node, keeping its id and position.
	///
	/// All-or-nothing: if any payload connection is rejected, the
	/// placeholder and the connection list are left untouched.
	pub fn materialize(&mut self, id: &str, payload: MaterializePayload) -> Result<(), DiagramError> {
		let kind = match payload.kind {
			KindTag::Root => NodeKind::Root,
			KindTag::Child => NodeKind::Child,
			KindTag::Placeholder | KindTag::Junction => {
				return Err(DiagramError::InvalidMaterializeKind(id.to_string()));
			}
		};
		let node = self
			.nodes
			.get_mut(id)
			.ok_or_else(|| DiagramError::UnknownNode(id.to_string()))?;
		if !node.kind.is_placeholder() {
			return Err(DiagramError::NotAPlaceholder(id.to_string()));
		}

		let previous = (node.kind, node.label.take());
		node.kind = kind;
		node.label = Some(payload.label);

		let kept = self.connections.len();
		for desc in payload.connections {
			if let Err(err) = self.add_connection(desc.into()) {
				self.connections.truncate(kept);
				if let Some(node) = self.nodes.get_mut(id) {
					(node.kind, node.label) = previous;
				}
				return Err(err);
			}
		}
		Ok(())
	}

	pub fn endpoints(&self, conn: &Connection) -> Option<(Point, Point)> {
		let source = self.nodes.get(&conn.source)?;
		let target = self.nodes.get(&conn.target)?;
		Some((source.anchor(Anchor::Right), target.anchor(Anchor::Left)))
	}

	#[cfg(test)]
	pub fn route_connection(&self, conn: &Connection) -> Option<Path> {
		self.endpoints(conn).map(|(start, end)| route(start, end))
	}
}
