use std::collections::HashSet;

use leptos::callback::Callback;
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use log::warn;

use crate::components::node_canvas::{
	CanvasHandle, CanvasIntent, ConnectionDescriptor, DiagramDefinition, KindTag, MaterializePayload,
	NodeCanvas, NodeId,
};

/// Idea fans out through a junction into the generated stages.
const PIPELINE: &str = r#"{
	"nodes": [
		{ "id": "idea", "kind": "root", "label": "AI meal planner", "position": { "x": 0, "y": 60 } },
		{ "id": "fan", "kind": "junction", "position": { "x": 260, "y": 88 } },
		{ "id": "market", "kind": "placeholder", "label": "Generate market analysis", "position": { "x": 340, "y": 0 } },
		{ "id": "personas", "kind": "placeholder", "label": "Generate personas", "position": { "x": 340, "y": 140 } },
		{ "id": "tech", "kind": "placeholder", "label": "Generate tech stack", "position": { "x": 640, "y": 70 } },
		{ "id": "output", "kind": "placeholder", "sink": true, "position": { "x": 940, "y": 70 } }
	],
	"connections": [
		{ "id": "idea-fan", "sourceNodeId": "idea", "targetNodeId": "fan" }
	]
}"#;

/// Stage edges, added once both ends can carry a connection.
const EDGES: &[(&str, &str)] = &[
	("fan", "market"),
	("fan", "personas"),
	("market", "tech"),
	("personas", "tech"),
	("tech", "output"),
];

/// Stand-in for the generation backend.
fn generated(id: &str) -> Option<(&'static str, KindTag)> {
	match id {
		"market" => Some(("Market: $4.2B meal-kit segment", KindTag::Child)),
		"personas" => Some(("Personas: busy parents, athletes", KindTag::Child)),
		"tech" => Some(("Stack: Rust, Leptos, Postgres", KindTag::Child)),
		"output" => Some(("Launch plan", KindTag::Root)),
		_ => None,
	}
}

/// What the host has learned about the canvas from its intents.
#[derive(Clone, Debug, Default)]
struct Progress {
	done: HashSet<NodeId>,
	removed: HashSet<NodeId>,
	selected: Option<NodeId>,
}

impl Progress {
	fn observe(&mut self, intent: &CanvasIntent) {
		match intent {
			CanvasIntent::NodeMaterialized { id } => {
				self.done.insert(id.clone());
			}
			CanvasIntent::NodeSelected { id } => self.selected = Some(id.clone()),
			CanvasIntent::SelectionCleared => self.selected = None,
			_ => {}
		}
	}

	fn forget(&mut self, id: &str) {
		self.done.remove(id);
		self.removed.insert(id.to_string());
		if self.selected.as_deref() == Some(id) {
			self.selected = None;
		}
	}

	fn ready(&self, id: &str) -> bool {
		!self.removed.contains(id) && (id == "fan" || id == "output" || self.done.contains(id))
	}

	/// Connections to add when `id` materializes.
	///
	/// An edge is added the first time both of its ends can carry it; the
	/// output sink can be targeted from the start.
	fn edges_for(&self, id: &str) -> Vec<ConnectionDescriptor> {
		if self.ready(id) {
			return Vec::new();
		}
		EDGES
			.iter()
			.filter(|(src, dst)| (*src == id && self.ready(dst)) || (*dst == id && self.ready(src)))
			.map(|(src, dst)| ConnectionDescriptor {
				id: format!("{src}-{dst}"),
				source_node_id: src.to_string(),
				target_node_id: dst.to_string(),
			})
			.collect()
	}
}

fn describe(intent: &CanvasIntent) -> String {
	match intent {
		CanvasIntent::NodeSelected { id } => format!("selected {id}"),
		CanvasIntent::SelectionCleared => "selection cleared".into(),
		CanvasIntent::NodeMoved { id, position } => {
			format!("moved {id} to ({:.0}, {:.0})", position.x, position.y)
		}
		CanvasIntent::MaterializeRequested { id } => format!("requested {id}"),
		CanvasIntent::NodeMaterialized { id } => format!("generated {id}"),
		CanvasIntent::ConnectionCreated { source, target, .. } => {
			format!("connected {source} -> {target}")
		}
	}
}

fn push_event(log: &mut Vec<String>, line: String) {
	log.push(line);
	if log.len() > 6 {
		log.remove(0);
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let definition = Signal::derive(move || {
		DiagramDefinition::from_json(PIPELINE).unwrap_or_else(|err| {
			warn!("built-in pipeline is invalid: {err}");
			DiagramDefinition::default()
		})
	});
	let canvas = CanvasHandle::new();
	let progress = RwSignal::new(Progress::default());
	let events = RwSignal::new(Vec::<String>::new());

	let on_intent = Callback::new(move |intent: CanvasIntent| {
		progress.update(|p| p.observe(&intent));
		events.update(|log| push_event(log, describe(&intent)));
	});

	let on_materialize = Callback::new(move |id: NodeId| {
		let (label, kind) = generated(&id)?;
		Some(MaterializePayload {
			label: label.to_string(),
			kind,
			connections: progress.with_untracked(|p| p.edges_for(&id)),
		})
	});

	let remove_selected = move |_: MouseEvent| {
		let Some(id) = progress.with_untracked(|p| p.selected.clone()) else {
			return;
		};
		if canvas.remove_node(&id) {
			progress.update(|p| p.forget(&id));
			events.update(|log| push_event(log, format!("removed {id}")));
		}
	};

	let reset = move |_: MouseEvent| match canvas.load(&definition.get_untracked()) {
		Ok(()) => {
			progress.set(Progress::default());
			events.update(|log| push_event(log, "reset".into()));
		}
		Err(err) => warn!("reset failed: {err}"),
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<NodeCanvas
					definition=definition
					fullscreen=true
					on_intent=on_intent
					on_materialize=on_materialize
					handle=canvas
				/>
				<div class="graph-overlay">
					<h1>"Idea Canvas"</h1>
					<p class="subtitle">
						"Click a dashed box to generate it. Drag boxes to arrange them, drag from a right-hand dot to connect."
					</p>
					<div class="canvas-actions">
						<button
							on:click=remove_selected
							disabled=move || progress.with(|p| p.selected.is_none())
						>
							"Remove selected"
						</button>
						<button on:click=reset>"Reset"</button>
					</div>
					<ul class="event-log">
						{move || {
							events
								.get()
								.into_iter()
								.map(|line| view! { <li>{line}</li> })
								.collect_view()
						}}
					</ul>
				</div>
			</div>
		</ErrorBoundary>
	}
}
