mod component;
mod diagram;
mod geometry;
mod handle;
mod render;
mod scene;
mod state;
mod style;
mod types;

pub use component::NodeCanvas;
pub use handle::CanvasHandle;
pub use types::{
	CanvasIntent, ConnectionDescriptor, DiagramDefinition, KindTag, MaterializePayload, NodeId,
};
