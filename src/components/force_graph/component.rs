use leptos::prelude::*;
use log::info;
use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent};

use super::instance::{GraphInstance, InstanceSlot};
use super::state::{ForceGraphState, PressKind};
use super::types::GraphData;

type Slot = StoredValue<InstanceSlot<GraphInstance>, LocalStorage>;

/// Run `f` against the live instance's state, if there is one.
fn with_state<R>(
	slot: Slot,
	canvas_ref: NodeRef<leptos::html::Canvas>,
	f: impl FnOnce(&mut ForceGraphState, &HtmlCanvasElement) -> R,
) -> Option<R> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	slot.with_value(|slot| slot.get().map(|instance| instance.with_state(|s| f(s, &canvas))))
}

/// Canvas-relative pointer position.
fn local_pos(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(client_x as f64 - rect.left(), client_y as f64 - rect.top())
}

#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let slot = StoredValue::new_local(InstanceSlot::<GraphInstance>::default());

	// Every new payload gets a fresh instance; the old one is released first.
	Effect::new(move |_| {
		let graph = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let size = if fullscreen {
			None
		} else {
			let (pw, ph) = canvas
				.parent_element()
				.map(|p| (p.client_width() as f64, p.client_height() as f64))
				.unwrap_or((800.0, 600.0));
			Some((width.unwrap_or(pw), height.unwrap_or(ph)))
		};
		slot.update_value(|slot| slot.replace_with(|| GraphInstance::mount(canvas, &graph, size)));
	});

	on_cleanup(move || {
		let _ = slot.try_update_value(|slot| slot.clear());
	});

	let on_mousedown = move |ev: MouseEvent| {
		let kind = if ev.button() == 2 || ev.shift_key() {
			PressKind::Pan
		} else {
			PressKind::Primary
		};
		with_state(slot, canvas_ref, |s, canvas| {
			let (x, y) = local_pos(canvas, ev.client_x(), ev.client_y());
			s.press(x, y, kind);
		});
	};

	let on_mousemove = move |ev: MouseEvent| {
		with_state(slot, canvas_ref, |s, canvas| {
			let (x, y) = local_pos(canvas, ev.client_x(), ev.client_y());
			s.pointer_move(x, y);
		});
	};

	let on_mouseup = move |_: MouseEvent| {
		let clicked = with_state(slot, canvas_ref, |s, _| s.release()).flatten();
		// alert outside the state borrow, it blocks until dismissed
		if let (Some(id), Some(window)) = (clicked, web_sys::window()) {
			info!("node clicked: {id}");
			let _ = window.alert_with_message(&id);
		}
	};

	let on_mouseleave = move |_: MouseEvent| {
		with_state(slot, canvas_ref, |s, _| s.cancel());
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		with_state(slot, canvas_ref, |s, canvas| {
			let (x, y) = local_pos(canvas, ev.client_x(), ev.client_y());
			s.zoom(x, y, ev.delta_y());
		});
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			on:contextmenu=|ev: MouseEvent| ev.prevent_default()
			style="display: block; cursor: grab;"
		/>
	}
}
