use anyhow::anyhow;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn window() -> anyhow::Result<web::Window> {
    web::window().ok_or_else(|| anyhow!("no window"))
}

pub fn canvas_by_id(id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let document = window()?
        .document()
        .ok_or_else(|| anyhow!("no document"))?;
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow!("missing #{id}"))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow!("#{id} is not a canvas"))
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> anyhow::Result<web::CanvasRenderingContext2d> {
    let ctx = canvas
        .get_context("2d")
        .map_err(|e| anyhow!("get_context failed: {e:?}"))?
        .ok_or_else(|| anyhow!("no 2d context"))?;
    ctx.dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|_| anyhow!("unexpected rendering context type"))
}

/// Viewport size in CSS pixels. The canvas backing store is kept at exactly
/// this size, with no device-pixel-ratio scaling, so the proximity radii
/// keep their CSS-pixel meaning.
pub fn viewport_size() -> anyhow::Result<(u32, u32)> {
    let w = window()?;
    let width = w
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .ok_or_else(|| anyhow!("inner_width unavailable"))?;
    let height = w
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .ok_or_else(|| anyhow!("inner_height unavailable"))?;
    Ok((width.max(0.0) as u32, height.max(0.0) as u32))
}

pub fn resize_canvas(canvas: &web::HtmlCanvasElement, width: u32, height: u32) {
    canvas.set_width(width);
    canvas.set_height(height);
}
