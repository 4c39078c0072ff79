use crate::lifecycle::PageHide;
use crate::{dom, frame};
use glassbg_core::{BackdropConfig, Clock, RenderContext};
use glassbg_render::GpuBackend;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("[init] glassbg-web starting");

    init().await.map_err(|e| {
        log::error!("[init] {e:?}");
        JsValue::from_str(&e.to_string())
    })
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::mount_canvas(&document)?;

    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let config = BackdropConfig::default().with_seed(seed);
    let viewport = dom::sync_canvas_backing_size(&canvas, config.max_pixel_ratio);

    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
    let backend = GpuBackend::new(
        &instance,
        surface,
        viewport.width,
        viewport.height,
        config.clear_color,
    )
    .await?;
    let ctx: frame::SharedContext = Rc::new(RefCell::new(Some(RenderContext::init(
        backend, &config, viewport,
    )?)));

    {
        let ctx = ctx.clone();
        let canvas = canvas.clone();
        let max_ratio = config.max_pixel_ratio;
        dom::add_window_listener("resize", move |_: web::Event| {
            let vp = dom::sync_canvas_backing_size(&canvas, max_ratio);
            if let Some(ctx) = ctx.borrow_mut().as_mut() {
                ctx.resize(vp);
            }
        });
    }
    {
        let ctx = ctx.clone();
        dom::add_window_listener("pagehide", move |ev: web::PageTransitionEvent| {
            match PageHide::for_event(ev.persisted()) {
                PageHide::Keep => log::info!("[frame] page cached; keeping renderer"),
                PageHide::Dispose => {
                    if let Some(ctx) = ctx.borrow_mut().take() {
                        drop(ctx.dispose());
                    }
                }
            }
        });
    }

    frame::start_loop(ctx, Clock::start());
    Ok(())
}
