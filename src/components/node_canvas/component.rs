use std::cell::RefCell;
use std::rc::Rc;

use leptos::callback::{Callable, Callback};
use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::diagram::Diagram;
use super::geometry::Point;
use super::handle::{CanvasHandle, Shared};
use super::render;
use super::scene;
use super::state::CanvasState;
use super::style::{CanvasConfig, CanvasStyle};
use super::types::{CanvasIntent, DiagramDefinition, MaterializePayload, NodeId};

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Interactive node-graph canvas.
///
/// The component owns the diagram once loaded; the host hears about changes
/// through `on_intent` and answers placeholder clicks through
/// `on_materialize` (returning `None` leaves the placeholder as it is).
/// A `handle` lets the host edit the mounted diagram.
#[component]
pub fn NodeCanvas(
	#[prop(into)] definition: Signal<DiagramDefinition>,
	#[prop(optional)] style: CanvasStyle,
	#[prop(optional)] config: CanvasConfig,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional)] on_intent: Option<Callback<CanvasIntent>>,
	#[prop(optional)] on_materialize: Option<Callback<NodeId, Option<MaterializePayload>>>,
	#[prop(optional)] handle: Option<CanvasHandle>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let handle = handle.unwrap_or_default();
	let state: Shared<CanvasState> = handle.state();
	let ctx: Shared<CanvasRenderingContext2d> = Rc::new(RefCell::new(None));
	let resize_cb: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let style = Rc::new(style);

	let redraw: Rc<dyn Fn()> = {
		let (state, ctx, style) = (state.clone(), ctx.clone(), style.clone());
		Rc::new(move || {
			let (state, ctx) = (state.borrow(), ctx.borrow());
			let (Some(s), Some(ctx)) = (state.as_ref(), ctx.as_ref()) else {
				return;
			};
			render::render(&scene::build(s, &style), &s.transform, (s.width, s.height), ctx);
			if let Some(canvas) = canvas_ref.get() {
				let canvas: HtmlCanvasElement = canvas.into();
				let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", s.cursor());
			}
		})
	};
	handle.bind_redraw(redraw.clone());

	let dispatch = {
		let (state, redraw) = (state.clone(), redraw.clone());
		Rc::new(move |intents: Vec<CanvasIntent>| {
			for intent in intents {
				let materialized = match &intent {
					CanvasIntent::MaterializeRequested { id } => {
						let payload = on_materialize.and_then(|cb| cb.run(id.clone()));
						let mut slot = state.borrow_mut();
						match (payload, slot.as_mut()) {
							(Some(payload), Some(s)) => match s.materialize(id, payload) {
								Ok(()) => Some(CanvasIntent::NodeMaterialized { id: id.clone() }),
								Err(err) => {
									warn!("materialize {id} rejected: {err}");
									None
								}
							},
							_ => None,
						}
					}
					_ => None,
				};
				if let Some(cb) = on_intent {
					cb.run(intent);
					if let Some(materialized) = materialized {
						cb.run(materialized);
					}
				}
			}
			redraw();
		})
	};

	let (state_init, ctx_init, resize_init, redraw_init) =
		(state.clone(), ctx.clone(), resize_cb.clone(), redraw.clone());
	Effect::new(move |_| {
		let def = definition.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		if ctx_init.borrow().is_none() {
			let (w, h) = if fullscreen {
				window_size(&window).unwrap_or((800.0, 600.0))
			} else {
				(
					width.unwrap_or_else(|| {
						canvas
							.parent_element()
							.map(|p| p.client_width() as f64)
							.unwrap_or(800.0)
					}),
					height.unwrap_or_else(|| {
						canvas
							.parent_element()
							.map(|p| p.client_height() as f64)
							.unwrap_or(600.0)
					}),
				)
			};
			canvas.set_width(w as u32);
			canvas.set_height(h as u32);

			let context = canvas
				.get_context("2d")
				.ok()
				.flatten()
				.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok());
			let Some(context) = context else {
				warn!("2d canvas context unavailable");
				return;
			};
			*ctx_init.borrow_mut() = Some(context);

			let diagram = Diagram::from_definition(&def).unwrap_or_else(|err| {
				warn!("diagram definition rejected: {err}");
				Diagram::new()
			});
			let mut s = CanvasState::new(diagram, config.clone(), w, h);
			s.center_view();
			*state_init.borrow_mut() = Some(s);

			if fullscreen {
				let (state_resize, canvas_resize, redraw_resize) =
					(state_init.clone(), canvas.clone(), redraw_init.clone());
				*resize_init.borrow_mut() = Some(Closure::new(move || {
					let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
						return;
					};
					canvas_resize.set_width(nw as u32);
					canvas_resize.set_height(nh as u32);
					if let Some(s) = state_resize.borrow_mut().as_mut() {
						s.resize(nw, nh);
					}
					redraw_resize();
				}));
				if let Some(cb) = &*resize_init.borrow() {
					let _ =
						window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
			}
		} else if let Some(s) = state_init.borrow_mut().as_mut() {
			match s.load(&def) {
				Ok(()) => s.center_view(),
				Err(err) => warn!("diagram definition rejected, keeping previous: {err}"),
			}
		}

		if let Some(s) = &*state_init.borrow() {
			info!(
				"diagram loaded: {} nodes, {} connections",
				s.diagram.nodes().count(),
				s.diagram.connections().len()
			);
		}
		redraw_init();
	});

	let pointer = move |ev: &MouseEvent| -> Option<Point> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		let rect = canvas.get_bounding_client_rect();
		Some(Point::new(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	let (state_md, dispatch_md) = (state.clone(), dispatch.clone());
	let on_mousedown = move |ev: MouseEvent| {
		let Some(p) = pointer(&ev) else {
			return;
		};
		let intents = match state_md.borrow_mut().as_mut() {
			Some(s) => s.on_pointer_down(p),
			None => return,
		};
		dispatch_md(intents);
	};

	let (state_mm, redraw_mm) = (state.clone(), redraw.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let Some(p) = pointer(&ev) else {
			return;
		};
		let changed = match state_mm.borrow_mut().as_mut() {
			Some(s) => s.on_pointer_move(p),
			None => false,
		};
		if changed {
			redraw_mm();
		}
	};

	let (state_mu, dispatch_mu) = (state.clone(), dispatch.clone());
	let on_mouseup = move |ev: MouseEvent| {
		let Some(p) = pointer(&ev) else {
			return;
		};
		let intents = match state_mu.borrow_mut().as_mut() {
			Some(s) => s.on_pointer_up(p),
			None => return,
		};
		dispatch_mu(intents);
	};

	let (state_ml, dispatch_ml) = (state.clone(), dispatch.clone());
	let on_mouseleave = move |_: MouseEvent| {
		let intents = match state_ml.borrow_mut().as_mut() {
			Some(s) => s.on_pointer_leave(),
			None => return,
		};
		dispatch_ml(intents);
	};

	let (state_wh, redraw_wh) = (state.clone(), redraw.clone());
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(p) = pointer(&ev) else {
			return;
		};
		let changed = match state_wh.borrow_mut().as_mut() {
			Some(s) => s.on_wheel(p, ev.delta_y()),
			None => false,
		};
		if changed {
			redraw_wh();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="node-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block;"
		/>
	}
}
