use glassbg_core::Viewport;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Element the canvas is appended to.
pub const MOUNT_ID: &str = "canvas-container";
pub const CANVAS_ID: &str = "glassbg-canvas";

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Create a canvas filling `#canvas-container` and append it.
pub fn mount_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let container = document
        .get_element_by_id(MOUNT_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{MOUNT_ID}"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    canvas.set_id(CANVAS_ID);
    let style = canvas.style();
    for (k, v) in [("display", "block"), ("width", "100%"), ("height", "100%")] {
        style
            .set_property(k, v)
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    }
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    Ok(canvas)
}

/// Match the canvas backing store to its CSS size times the (capped) device
/// pixel ratio and return the resulting drawable size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, max_ratio: f64) -> Viewport {
    let dpr = web::window().map_or(1.0, |w| w.device_pixel_ratio());
    let rect = canvas.get_bounding_client_rect();
    let vp = Viewport::from_css(rect.width(), rect.height(), dpr, max_ratio);
    canvas.set_width(vp.width.max(1));
    canvas.set_height(vp.height.max(1));
    vp
}

pub fn add_window_listener<E>(event: &str, mut handler: impl FnMut(E) + 'static)
where
    E: FromWasmAbi + 'static,
{
    if let Some(w) = web::window() {
        let closure = Closure::wrap(Box::new(move |ev: E| handler(ev)) as Box<dyn FnMut(E)>);
        if w
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("[init] could not listen for {event}");
        }
        closure.forget();
    }
}
