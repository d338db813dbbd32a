use crate::paint;
use field_core::{
    Link, ParticleField, DOT_LINK_RGB, DOT_LINK_WIDTH, POINTER_LINK_RGB, POINTER_LINK_WIDTH,
};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Frames between frame-time log lines (~10 s at 60 Hz)
const FRAME_LOG_INTERVAL: u32 = 600;

pub struct FrameContext {
    pub canvas: web::HtmlCanvasElement,
    pub ctx: web::CanvasRenderingContext2d,
    pub field: Rc<RefCell<ParticleField>>,
    pub alive: Rc<Cell<bool>>,

    pointer_links: Vec<Link>,
    dot_links: Vec<Link>,
    last_instant: Instant,
    frame_accum_ms: f64,
    frame_count: u32,
}

impl FrameContext {
    pub fn new(
        canvas: web::HtmlCanvasElement,
        ctx: web::CanvasRenderingContext2d,
        field: Rc<RefCell<ParticleField>>,
        alive: Rc<Cell<bool>>,
    ) -> Self {
        Self {
            canvas,
            ctx,
            field,
            alive,
            pointer_links: Vec::new(),
            dot_links: Vec::new(),
            last_instant: Instant::now(),
            frame_accum_ms: 0.0,
            frame_count: 0,
        }
    }

    /// One update+draw pass: clear, draw dots at their proximity alpha, draw
    /// both link categories, then advance the population. Drawing always uses
    /// pre-move positions.
    pub fn frame(&mut self) {
        let now = Instant::now();
        self.frame_accum_ms += (now - self.last_instant).as_secs_f64() * 1000.0;
        self.last_instant = now;
        self.frame_count += 1;
        if self.frame_count % FRAME_LOG_INTERVAL == 0 {
            log::debug!(
                "avg frame time {:.2} ms over the last {} frames",
                self.frame_accum_ms / FRAME_LOG_INTERVAL as f64,
                FRAME_LOG_INTERVAL
            );
            self.frame_accum_ms = 0.0;
        }

        let mut field = self.field.borrow_mut();
        paint::clear(
            &self.ctx,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        for dot in &field.dots {
            if let Some(alpha) = field.dot_alpha(dot) {
                paint::fill_dot(&self.ctx, dot, alpha);
            }
        }
        field.collect_pointer_links(&mut self.pointer_links);
        paint::stroke_links(
            &self.ctx,
            &self.pointer_links,
            POINTER_LINK_RGB,
            POINTER_LINK_WIDTH,
        );
        field.collect_dot_links(&mut self.dot_links);
        paint::stroke_links(&self.ctx, &self.dot_links, DOT_LINK_RGB, DOT_LINK_WIDTH);
        field.step();
    }
}

/// Drive `frame` from requestAnimationFrame until the liveness flag drops.
/// The closure holds itself through an `Rc` cycle; once the flag is false the
/// callback takes itself out of the cell so the cycle breaks and the context
/// drops.
pub fn start_loop(mut frame_ctx: FrameContext) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !frame_ctx.alive.get() {
            tick_clone.borrow_mut().take();
            return;
        }
        frame_ctx.frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
