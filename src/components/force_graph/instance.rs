//! Lifecycle of a mounted graph: the simulation, its animation loop and the
//! window listeners it registered. At most one instance is live per canvas.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::render;
use super::sprite::LabelSprite;
use super::state::ForceGraphState;
use super::types::GraphData;

const FRAME_DT: f32 = 0.016;

/// Something holding resources that must be given back explicitly.
pub trait Release {
	fn release(&mut self);
}

/// Owns the current instance and releases it before a replacement is built.
pub struct InstanceSlot<T: Release> {
	current: Option<T>,
}

impl<T: Release> Default for InstanceSlot<T> {
	fn default() -> Self {
		Self { current: None }
	}
}

impl<T: Release> InstanceSlot<T> {
	/// Release whatever is installed, then install what `build` produces.
	pub fn replace_with(&mut self, build: impl FnOnce() -> Option<T>) {
		self.clear();
		self.current = build();
	}

	pub fn clear(&mut self) {
		if let Some(mut old) = self.current.take() {
			old.release();
		}
	}

	pub fn get(&self) -> Option<&T> {
		self.current.as_ref()
	}
}

impl<T: Release> Drop for InstanceSlot<T> {
	fn drop(&mut self) {
		self.clear();
	}
}

fn viewport(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// A running rendering of one [`GraphData`] on one canvas.
pub struct GraphInstance {
	state: Rc<RefCell<ForceGraphState>>,
	window: Window,
	running: Rc<Cell<bool>>,
	frame: Rc<Cell<Option<i32>>>,
	animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	resize_cb: Option<Closure<dyn FnMut()>>,
}

impl GraphInstance {
	/// Build the simulation for `data` and start drawing it on `canvas`.
	///
	/// `size` fixes the canvas size; `None` follows the window and tracks resizes.
	pub fn mount(
		canvas: HtmlCanvasElement,
		data: &GraphData,
		size: Option<(f64, f64)>,
	) -> Option<Self> {
		let window = web_sys::window()?;
		let (w, h) = match size {
			Some(size) => size,
			None => viewport(&window)?,
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => ctx.dyn_into().ok()?,
			_ => {
				warn!("canvas has no 2d context, graph not rendered");
				return None;
			}
		};

		let mut state = ForceGraphState::new(data, w, h);
		if let Some(document) = window.document() {
			state.attach_sprites(|text| LabelSprite::new(&document, text));
		}
		debug!(
			"graph instance mounted: {} nodes, {} links",
			state.node_count(),
			state.edge_count()
		);
		let state = Rc::new(RefCell::new(state));

		let resize_cb = if size.is_none() {
			let (state_resize, canvas_resize) = (state.clone(), canvas.clone());
			let cb: Closure<dyn FnMut()> = Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(viewport) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				state_resize.borrow_mut().resize(nw, nh);
			});
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			Some(cb)
		} else {
			None
		};

		let running = Rc::new(Cell::new(true));
		let frame = Rc::new(Cell::new(None));
		let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
		let (state_anim, running_anim, frame_anim, animate_inner) =
			(state.clone(), running.clone(), frame.clone(), animate.clone());
		*animate.borrow_mut() = Some(Closure::new(move || {
			if !running_anim.get() {
				return;
			}
			{
				let mut s = state_anim.borrow_mut();
				s.tick(FRAME_DT);
				render::render(&s, &ctx);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				frame_anim.set(win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
		if let Some(cb) = animate.borrow().as_ref() {
			frame.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}

		Some(Self {
			state,
			window,
			running,
			frame,
			animate,
			resize_cb,
		})
	}

	/// Run `f` against the simulation state.
	pub fn with_state<R>(&self, f: impl FnOnce(&mut ForceGraphState) -> R) -> R {
		f(&mut self.state.borrow_mut())
	}
}

impl Release for GraphInstance {
	fn release(&mut self) {
		if !self.running.replace(false) {
			return;
		}
		if let Some(id) = self.frame.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		// drops the closure and with it the self-reference that kept the loop alive
		self.animate.borrow_mut().take();
		if let Some(cb) = self.resize_cb.take() {
			let _ = self
				.window
				.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		debug!("graph instance released");
	}
}

impl Drop for GraphInstance {
	fn drop(&mut self) {
		self.release();
	}
}
