use crate::dom;
use field_core::ParticleField;
use glam::Vec2;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Listener registrations held for the lifetime of a mounted field. Keeping
/// the closures here instead of `forget`ting them is what lets unmount
/// actually detach them again.
pub struct EventBindings {
    window: web::Window,
    pointer_move: Closure<dyn FnMut(web::PointerEvent)>,
    resize: Closure<dyn FnMut()>,
}

pub fn bind(
    canvas: &web::HtmlCanvasElement,
    field: Rc<RefCell<ParticleField>>,
    alive: Rc<Cell<bool>>,
) -> anyhow::Result<EventBindings> {
    let window = dom::window()?;

    let pointer_move = {
        let canvas = canvas.clone();
        let field = field.clone();
        let alive = alive.clone();
        Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if !alive.get() {
                return;
            }
            field
                .borrow_mut()
                .set_pointer(pointer_canvas_px(&ev, &canvas));
        }) as Box<dyn FnMut(_)>)
    };
    window
        .add_event_listener_with_callback("pointermove", pointer_move.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("pointermove listener: {e:?}"))?;

    let resize = {
        let canvas = canvas.clone();
        Closure::wrap(Box::new(move || {
            if !alive.get() {
                return;
            }
            if let Ok((w, h)) = dom::viewport_size() {
                dom::resize_canvas(&canvas, w, h);
                field.borrow_mut().resize(w as f32, h as f32);
            }
        }) as Box<dyn FnMut()>)
    };
    window
        .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("resize listener: {e:?}"))?;

    Ok(EventBindings {
        window,
        pointer_move,
        resize,
    })
}

impl EventBindings {
    pub fn remove(self) {
        let _ = self.window.remove_event_listener_with_callback(
            "pointermove",
            self.pointer_move.as_ref().unchecked_ref(),
        );
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.resize.as_ref().unchecked_ref());
    }
}

/// Map a pointer event's client coordinates into canvas pixel space.
#[inline]
fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let sx = (x_css / (rect.width() as f32).max(1.0)) * canvas.width() as f32;
    let sy = (y_css / (rect.height() as f32).max(1.0)) * canvas.height() as f32;
    Vec2::new(sx, sy)
}
