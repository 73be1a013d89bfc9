//! Leptos component wrapping the cinematic scene canvas.
//!
//! The component creates an HTML canvas element, acquires a 2D context, and
//! runs a perpetual `requestAnimationFrame` loop that updates and draws the
//! scene each frame. Window resize and mousemove listeners are installed for
//! the component's lifetime and removed on cleanup. Configuration arrives as
//! a reactive signal and is re-read every frame; only a theme change forces
//! a particle rebuild.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use send_wrapper::SendWrapper;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::config::SceneConfig;
use super::render;
use super::scene::Scene;
use super::theme::Theme;

/// Run/stop guard for the self-rescheduling frame callback.
///
/// Teardown only stops future scheduling; a tick already queued on the host
/// observes the stopped flag and becomes a no-op, so a rebuild racing with a
/// pending callback cannot touch a torn-down scene. Stopping twice is safe.
#[derive(Clone, Default)]
pub(crate) struct RunGuard(Rc<Cell<bool>>);

impl RunGuard {
	pub(crate) fn start(&self) {
		self.0.set(true);
	}

	pub(crate) fn stop(&self) {
		self.0.set(false);
	}

	pub(crate) fn is_running(&self) -> bool {
		self.0.get()
	}
}

/// Renders the animated cinematic scene on a fullscreen canvas.
///
/// The `config` signal is owned by the narrative layer and re-supplied on
/// every beat change; the scene reads it fresh each frame. Set explicit
/// `width`/`height` to override viewport sizing (mainly for embedding).
#[component]
pub fn CinematicScene(
	#[prop(into)] config: Signal<SceneConfig>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let scene: Rc<RefCell<Option<Scene>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let pointer_cb: Rc<RefCell<Option<Closure<dyn FnMut(MouseEvent)>>>> =
		Rc::new(RefCell::new(None));
	let guard = RunGuard::default();

	let (scene_init, animate_init, resize_cb_init, pointer_cb_init, guard_init) = (
		scene.clone(),
		animate.clone(),
		resize_cb.clone(),
		pointer_cb.clone(),
		guard.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = (
			width.unwrap_or_else(|| window.inner_width().unwrap().as_f64().unwrap()),
			height.unwrap_or_else(|| window.inner_height().unwrap().as_f64().unwrap()),
		);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		// Fatal precondition: without a 2D context the scene never starts.
		// The host experience proceeds without background animation.
		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|obj| obj.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				error!("winter-scene: could not acquire a 2d canvas context, scene disabled");
				return;
			}
		};

		let theme = Theme::for_name(&config.get_untracked().theme);
		*scene_init.borrow_mut() = Some(Scene::new(&theme, w, h));

		if width.is_none() && height.is_none() {
			let (scene_resize, canvas_resize) = (scene_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *scene_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let scene_pointer = scene_init.clone();
		*pointer_cb_init.borrow_mut() = Some(Closure::new(move |ev: MouseEvent| {
			let win: Window = web_sys::window().unwrap();
			let (ww, wh) = (
				win.inner_width().unwrap().as_f64().unwrap().max(1.0),
				win.inner_height().unwrap().as_f64().unwrap().max(1.0),
			);
			if let Some(ref mut s) = *scene_pointer.borrow_mut() {
				s.set_pointer(
					ev.client_x() as f64 / ww - 0.5,
					ev.client_y() as f64 / wh - 0.5,
				);
			}
		}));
		if let Some(ref cb) = *pointer_cb_init.borrow() {
			let _ =
				window.add_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
		}

		guard_init.start();
		let (scene_anim, animate_inner, guard_anim) =
			(scene_init.clone(), animate_init.clone(), guard_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !guard_anim.is_running() {
				return;
			}
			if let Some(ref mut s) = *scene_anim.borrow_mut() {
				let cfg = config.get_untracked();
				let theme = Theme::for_name(&cfg.theme);
				if theme.name != s.theme().name {
					s.set_theme(&theme);
				}
				s.tick(&cfg);
				render::render(s, &ctx, &cfg);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// `on_cleanup` requires `Send + Sync`; wasm is single-threaded, so wrap
	// the `Rc`-based captures in `SendWrapper` to satisfy the bound.
	let (guard_cleanup, resize_cleanup, pointer_cleanup) = (
		SendWrapper::new(guard.clone()),
		SendWrapper::new(resize_cb.clone()),
		SendWrapper::new(pointer_cb.clone()),
	);
	on_cleanup(move || {
		guard_cleanup.stop();
		let Some(window) = web_sys::window() else {
			return;
		};
		if let Some(cb) = resize_cleanup.borrow_mut().take() {
			let _ =
				window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		if let Some(cb) = pointer_cleanup.borrow_mut().take() {
			let _ = window
				.remove_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="cinematic-scene-canvas"
			style="display: block; position: fixed; inset: 0; background: black; pointer-events: none;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn run_guard_is_idempotent() {
		let guard = RunGuard::default();
		assert!(!guard.is_running());
		guard.start();
		assert!(guard.is_running());
		guard.stop();
		guard.stop();
		assert!(!guard.is_running());
	}

	#[test]
	fn stale_tick_after_stop_is_a_no_op() {
		let guard = RunGuard::default();
		guard.start();
		guard.stop();
		// A callback queued before teardown checks this and returns early
		assert!(!guard.is_running());
	}
}
