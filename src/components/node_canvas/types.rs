use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::Point;

pub type NodeId = String;
pub type ConnectionId = String;

/// What a placeholder stands in for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaceholderRole {
	/// Empty slot; its anchors are decorative until materialized.
	#[default]
	Slot,
	/// Terminal output; its input anchor already accepts connections.
	Sink,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
	Root,
	Child,
	Placeholder(PlaceholderRole),
	Junction,
}

impl NodeKind {
	pub fn is_content(self) -> bool {
		matches!(self, NodeKind::Root | NodeKind::Child)
	}

	pub fn is_placeholder(self) -> bool {
		matches!(self, NodeKind::Placeholder(_))
	}

	/// Whether connections may start at this node's right anchor.
	pub fn can_source(self) -> bool {
		!self.is_placeholder()
	}

	/// Whether connections may end at this node's left anchor.
	pub fn can_target(self) -> bool {
		!matches!(self, NodeKind::Placeholder(PlaceholderRole::Slot))
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindTag {
	Root,
	Child,
	Placeholder,
	Junction,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor {
	pub id: NodeId,
	pub kind: KindTag,
	#[serde(default)]
	pub label: Option<String>,
	pub position: Point,
	/// Only meaningful for placeholders.
	#[serde(default)]
	pub sink: bool,
}

impl NodeDescriptor {
	pub fn node_kind(&self) -> NodeKind {
		match self.kind {
			KindTag::Root => NodeKind::Root,
			KindTag::Child => NodeKind::Child,
			KindTag::Junction => NodeKind::Junction,
			KindTag::Placeholder if self.sink => NodeKind::Placeholder(PlaceholderRole::Sink),
			KindTag::Placeholder => NodeKind::Placeholder(PlaceholderRole::Slot),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDescriptor {
	pub id: ConnectionId,
	pub source_node_id: NodeId,
	pub target_node_id: NodeId,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramDefinition {
	#[serde(default)]
	pub nodes: Vec<NodeDescriptor>,
	#[serde(default)]
	pub connections: Vec<ConnectionDescriptor>,
}

impl DiagramDefinition {
	pub fn from_json(json: &str) -> Result<Self, DiagramError> {
		Ok(serde_json::from_str(json)?)
	}
}

/// Host-supplied content that replaces a placeholder in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterializePayload {
	pub label: String,
	pub kind: KindTag,
	#[serde(default)]
	pub connections: Vec<ConnectionDescriptor>,
}

/// Outbound notifications for the host.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasIntent {
	NodeSelected { id: NodeId },
	SelectionCleared,
	NodeMoved { id: NodeId, position: Point },
	MaterializeRequested { id: NodeId },
	/// The host's payload was applied and the placeholder is now content.
	NodeMaterialized { id: NodeId },
	ConnectionCreated { id: ConnectionId, source: NodeId, target: NodeId },
}

#[derive(Debug, Error)]
pub enum DiagramError {
	#[error("node {0} already exists")]
	DuplicateNode(NodeId),
	#[error("connection {0} already exists")]
	DuplicateConnection(ConnectionId),
	#[error("node {0} not found")]
	UnknownNode(NodeId),
	#[error("connection {0} would connect node to itself")]
	SelfConnection(ConnectionId),
	#[error("placeholder {0} cannot be a connection source")]
	PlaceholderSource(NodeId),
	#[error("placeholder {0} does not accept connections until materialized")]
	PlaceholderTarget(NodeId),
	#[error("junction {0} already has an incoming connection")]
	JunctionInputTaken(NodeId),
	#[error("node {0} is not a placeholder")]
	NotAPlaceholder(NodeId),
	#[error("placeholder {0} can only materialize into a root or child node")]
	InvalidMaterializeKind(NodeId),
	#[error("invalid diagram definition: {0}")]
	Definition(#[from] serde_json::Error),
}
