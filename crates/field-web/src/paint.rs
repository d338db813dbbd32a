use field_core::{Dot, Link};
use web_sys as web;

mod helpers;
pub use helpers::css_rgba;

pub fn clear(ctx: &web::CanvasRenderingContext2d, width: f64, height: f64) {
    ctx.clear_rect(0.0, 0.0, width, height);
}

pub fn fill_dot(ctx: &web::CanvasRenderingContext2d, dot: &Dot, alpha: f32) {
    ctx.begin_path();
    let _ = ctx.arc(
        dot.position.x as f64,
        dot.position.y as f64,
        dot.radius as f64,
        0.0,
        std::f64::consts::TAU,
    );
    ctx.set_fill_style_str(&css_rgba(dot.color.to_array(), alpha));
    ctx.fill();
}

pub fn stroke_links(
    ctx: &web::CanvasRenderingContext2d,
    links: &[Link],
    rgb: [u8; 3],
    line_width: f32,
) {
    if links.is_empty() {
        return;
    }
    ctx.set_line_width(line_width as f64);
    for link in links {
        ctx.begin_path();
        ctx.move_to(link.from.x as f64, link.from.y as f64);
        ctx.line_to(link.to.x as f64, link.to.y as f64);
        ctx.set_stroke_style_str(&css_rgba(rgb, link.opacity));
        ctx.stroke();
    }
}
