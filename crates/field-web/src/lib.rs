#![cfg(target_arch = "wasm32")]

mod dom;
mod events;
mod frame;
mod paint;

use field_core::{FieldConfig, ParticleField};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("field-web loaded");
    Ok(())
}

/// Mount the interactive connecting-dots field on the canvas with the given
/// element id. Returns a handle that keeps the instance alive.
#[wasm_bindgen]
pub fn mount(canvas_id: &str) -> Result<FieldHandle, JsValue> {
    mount_with_config(canvas_id, FieldConfig::default()).map_err(to_js)
}

/// Mount the non-interactive ambient drift variant.
#[wasm_bindgen]
pub fn mount_drift(canvas_id: &str) -> Result<FieldHandle, JsValue> {
    mount_with_config(canvas_id, FieldConfig::ambient_drift()).map_err(to_js)
}

/// Owner of one mounted field: the liveness flag read by the frame loop and
/// the event listeners to detach on unmount.
#[wasm_bindgen]
pub struct FieldHandle {
    alive: Rc<Cell<bool>>,
    bindings: Option<events::EventBindings>,
}

#[wasm_bindgen]
impl FieldHandle {
    /// Stop the render loop and detach the pointer and resize listeners.
    /// Safe to call more than once.
    pub fn unmount(&mut self) {
        if self.alive.replace(false) {
            log::info!("field unmounted");
        }
        if let Some(bindings) = self.bindings.take() {
            bindings.remove();
        }
    }
}

impl Drop for FieldHandle {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn mount_with_config(canvas_id: &str, config: FieldConfig) -> anyhow::Result<FieldHandle> {
    let canvas = dom::canvas_by_id(canvas_id)?;
    let ctx = dom::context_2d(&canvas)?;
    let (width, height) = dom::viewport_size()?;
    dom::resize_canvas(&canvas, width, height);

    let seed = js_sys::Date::now() as u64;
    let field = ParticleField::new(config, width as f32, height as f32, seed)?;
    log::info!(
        "mounted #{canvas_id}: {width}x{height} px, {} dots",
        field.dots.len()
    );

    let field = Rc::new(RefCell::new(field));
    let alive = Rc::new(Cell::new(true));
    let bindings = events::bind(&canvas, field.clone(), alive.clone())?;
    frame::start_loop(frame::FrameContext::new(canvas, ctx, field, alive.clone()));

    Ok(FieldHandle {
        alive,
        bindings: Some(bindings),
    })
}

fn to_js(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{e:#}"))
}
