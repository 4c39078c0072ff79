use crate::lifecycle::frame_requested;
use glassbg_core::{Clock, FrameStatus, RenderContext};
use glassbg_render::GpuBackend;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `None` once the page has torn the renderer down.
pub type SharedContext = Rc<RefCell<Option<RenderContext<GpuBackend<'static>>>>>;

fn request_frame(cb: &Closure<dyn FnMut()>) {
    let request = web::window().map(|w| w.request_animation_frame(cb.as_ref().unchecked_ref()));
    frame_requested(request);
}

/// Drive `tick` from `requestAnimationFrame` until the context is disposed.
pub fn start_loop(ctx: SharedContext, clock: Clock) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let mut skipped = 0u32;
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        {
            let mut guard = ctx.borrow_mut();
            let Some(ctx) = guard.as_mut() else {
                log::info!("[frame] context gone; stopping loop");
                return;
            };
            match ctx.tick(clock.elapsed_secs()) {
                Ok(FrameStatus::Ready) => skipped = 0,
                Ok(FrameStatus::Skipped) => {
                    skipped += 1;
                    if skipped == 60 {
                        log::warn!("[frame] 60 frames skipped in a row");
                    }
                }
                Err(e) => log::error!("[frame] render error: {e}"),
            }
        }
        if let Some(cb) = tick_clone.borrow().as_ref() {
            request_frame(cb);
        }
    }) as Box<dyn FnMut()>));
    if let Some(cb) = tick.borrow().as_ref() {
        request_frame(cb);
    }
}
