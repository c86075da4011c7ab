use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;

use super::state::CanvasState;
use super::types::{ConnectionDescriptor, DiagramDefinition, DiagramError};

pub(super) type Shared<T> = Rc<RefCell<Option<T>>>;

#[derive(Default)]
struct Slots {
	state: Shared<CanvasState>,
	redraw: Option<Rc<dyn Fn()>>,
}

/// Host-side handle to a mounted `NodeCanvas`.
///
/// Create one in the host component and pass it through the `handle` prop.
/// Every call is a no-op until the canvas has mounted, and every mutation
/// repaints the canvas. Unknown ids are ignored.
#[derive(Clone, Copy)]
pub struct CanvasHandle {
	slots: StoredValue<Slots, LocalStorage>,
}

impl Default for CanvasHandle {
	fn default() -> Self {
		Self::new()
	}
}

impl CanvasHandle {
	pub fn new() -> Self {
		Self {
			slots: StoredValue::new_local(Slots::default()),
		}
	}

	pub(super) fn state(&self) -> Shared<CanvasState> {
		self.slots.try_with_value(|s| s.state.clone()).unwrap_or_default()
	}

	pub(super) fn bind_redraw(&self, redraw: Rc<dyn Fn()>) {
		self.slots.update_value(|s| s.redraw = Some(redraw));
	}

	fn apply<R>(&self, f: impl FnOnce(&mut CanvasState) -> R) -> Option<R> {
		let (state, redraw) = self
			.slots
			.try_with_value(|s| (s.state.clone(), s.redraw.clone()))?;
		let out = state.borrow_mut().as_mut().map(f);
		if let (Some(_), Some(redraw)) = (&out, redraw) {
			redraw();
		}
		out
	}

	/// Replace the diagram and recentre the view. On error the current
	/// diagram stays.
	pub fn load(&self, def: &DiagramDefinition) -> Result<(), DiagramError> {
		self.apply(|s| {
			s.load(def)?;
			s.center_view();
			Ok(())
		})
		.unwrap_or(Ok(()))
	}

	pub fn add_connection(&self, desc: ConnectionDescriptor) -> Result<(), DiagramError> {
		self.apply(|s| s.add_connection(desc)).unwrap_or(Ok(()))
	}

	/// Removes the node, its connections, and any gesture that targets it.
	pub fn remove_node(&self, id: &str) -> bool {
		self.apply(|s| s.remove_node(id)).unwrap_or(false)
	}

	pub fn remove_connection(&self, id: &str) -> bool {
		self.apply(|s| s.remove_connection(id)).unwrap_or(false)
	}

	pub fn select(&self, id: &str) -> bool {
		self.apply(|s| s.select(id)).unwrap_or(false)
	}

	pub fn clear_selection(&self) -> bool {
		self.apply(|s| s.clear_selection()).unwrap_or(false)
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;
	use crate::components::node_canvas::diagram::Diagram;
	use crate::components::node_canvas::geometry::Point;
	use crate::components::node_canvas::style::CanvasConfig;

	const DIAGRAM: &str = r#"{
		"nodes": [
			{ "id": "idea", "kind": "root", "label": "Idea", "position": { "x": 0, "y": 0 } },
			{ "id": "market", "kind": "child", "label": "Market", "position": { "x": 300, "y": 0 } }
		],
		"connections": [
			{ "id": "idea-market", "sourceNodeId": "idea", "targetNodeId": "market" }
		]
	}"#;

	fn mounted() -> (CanvasHandle, Rc<Cell<u32>>) {
		let handle = CanvasHandle::new();
		let def = DiagramDefinition::from_json(DIAGRAM).unwrap();
		let diagram = Diagram::from_definition(&def).unwrap();
		*handle.state().borrow_mut() =
			Some(CanvasState::new(diagram, CanvasConfig::default(), 800.0, 600.0));
		let redraws = Rc::new(Cell::new(0));
		let counter = redraws.clone();
		handle.bind_redraw(Rc::new(move || counter.set(counter.get() + 1)));
		(handle, redraws)
	}

	#[test]
	fn calls_before_mount_are_no_ops() {
		let handle = CanvasHandle::new();
		assert!(!handle.remove_node("idea"));
		assert!(!handle.select("idea"));
		assert!(handle.load(&DiagramDefinition::default()).is_ok());
	}

	#[test]
	fn mutations_reach_the_canvas_and_repaint() {
		let (handle, redraws) = mounted();
		assert!(handle.select("market"));
		assert!(handle.remove_connection("idea-market"));
		assert!(
			handle
				.add_connection(ConnectionDescriptor {
					id: "again".into(),
					source_node_id: "idea".into(),
					target_node_id: "market".into(),
				})
				.is_ok()
		);
		assert!(handle.clear_selection());
		assert_eq!(redraws.get(), 4);

		let state = handle.state();
		let state = state.borrow();
		let s = state.as_ref().unwrap();
		assert_eq!(s.diagram.connections().len(), 1);
		assert_eq!(s.diagram.connections()[0].id, "again");
	}

	#[test]
	fn removing_a_node_mid_drag_cancels_the_drag() {
		let (handle, _) = mounted();
		{
			let state = handle.state();
			let mut state = state.borrow_mut();
			let s = state.as_mut().unwrap();
			s.on_pointer_down(Point::new(350.0, 20.0));
			s.on_pointer_move(Point::new(380.0, 60.0));
		}
		assert!(handle.remove_node("market"));

		let state = handle.state();
		let mut state = state.borrow_mut();
		let s = state.as_mut().unwrap();
		assert!(s.diagram.connections().is_empty());
		assert!(s.on_pointer_up(Point::new(400.0, 80.0)).is_empty());
	}

	#[test]
	fn invalid_connection_is_reported() {
		let (handle, _) = mounted();
		let err = handle.add_connection(ConnectionDescriptor {
			id: "loop".into(),
			source_node_id: "idea".into(),
			target_node_id: "idea".into(),
		});
		assert!(matches!(err, Err(DiagramError::SelfConnection(_))));
	}
}
