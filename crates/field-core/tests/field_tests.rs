use field_core::{Dot, DotColor, FieldConfig, Link, ParticleField};
use glam::Vec2;

fn make_field(width: f32, height: f32) -> ParticleField {
    ParticleField::new(FieldConfig::default(), width, height, 42).expect("valid config")
}

fn make_dot(x: f32, y: f32, vx: f32, vy: f32) -> Dot {
    Dot {
        position: Vec2::new(x, y),
        velocity: Vec2::new(vx, vy),
        radius: 1.0,
        color: DotColor { r: 255, g: 40, b: 40 },
    }
}

// ---------------- population sizing ----------------

#[test]
fn population_count_matches_formula_exactly() {
    let config = FieldConfig::default();
    // (w, h, expected clamp(floor(w*h/8000), 200, 3000))
    let cases = [
        (0.0, 0.0, 200),
        (100.0, 100.0, 200),      // 10_000 / 8000 = 1 -> min
        (1600.0, 1000.0, 200),    // exactly 200
        (1920.0, 1080.0, 259),    // floor(2_073_600 / 8000)
        (4000.0, 4000.0, 2000),
        (8000.0, 8000.0, 3000),   // 8000 -> max
        (100_000.0, 100_000.0, 3000),
    ];
    for (w, h, expected) in cases {
        assert_eq!(
            ParticleField::dot_count_for(&config, w, h),
            expected,
            "count mismatch for {w}x{h}"
        );
        let field = make_field(w, h);
        assert_eq!(field.dots.len(), expected, "seeded size mismatch for {w}x{h}");
    }
}

#[test]
fn population_count_is_always_within_bounds() {
    let config = FieldConfig::default();
    for w in [0u32, 1, 37, 640, 1920, 5000, 20_000, 1_000_000] {
        for h in [0u32, 1, 480, 1080, 9999] {
            let n = ParticleField::dot_count_for(&config, w as f32, h as f32);
            assert!((200..=3000).contains(&n), "{w}x{h} gave {n}");
        }
    }
}

#[test]
fn seeded_dots_respect_creation_bands() {
    let field = make_field(1920.0, 1080.0);
    for dot in &field.dots {
        assert!(dot.position.x >= 0.0 && dot.position.x < 1920.0);
        assert!(dot.position.y >= 0.0 && dot.position.y < 1080.0);
        assert!(dot.radius >= 0.5 && dot.radius < 1.3, "radius {}", dot.radius);
        assert!(dot.velocity.x >= -0.15 && dot.velocity.x < 0.15);
        assert!(dot.velocity.y >= -0.15 && dot.velocity.y < 0.15);
        // Exactly one family: fixed-high red or fixed-high blue
        if dot.color.is_warm() {
            assert_eq!(dot.color.r, 255);
            assert!(dot.color.g < 100 && dot.color.b < 100);
        } else {
            assert_eq!(dot.color.b, 255);
            assert!(dot.color.r < 100 && dot.color.g < 100);
        }
    }
}

#[test]
fn seeding_uses_both_color_families() {
    let field = make_field(4000.0, 4000.0);
    let warm = field.dots.iter().filter(|d| d.color.is_warm()).count();
    let total = field.dots.len();
    assert!(warm > total / 4, "warm family underrepresented: {warm}/{total}");
    assert!(warm < total * 3 / 4, "cool family underrepresented: {warm}/{total}");
}

#[test]
fn same_seed_reproduces_population() {
    let a = make_field(1280.0, 720.0);
    let b = make_field(1280.0, 720.0);
    assert_eq!(a.dots.len(), b.dots.len());
    for (da, db) in a.dots.iter().zip(&b.dots) {
        assert_eq!(da.position, db.position);
        assert_eq!(da.velocity, db.velocity);
        assert_eq!(da.radius, db.radius);
        assert_eq!(da.color, db.color);
    }
}

#[test]
fn reseed_restarts_the_stream() {
    let mut field = make_field(1280.0, 720.0);
    let first: Vec<Vec2> = field.dots.iter().map(|d| d.position).collect();
    field.step();
    field.reseed(42);
    let again: Vec<Vec2> = field.dots.iter().map(|d| d.position).collect();
    assert_eq!(first, again, "reseed(42) should reproduce the initial layout");
    field.reseed(7);
    let other: Vec<Vec2> = field.dots.iter().map(|d| d.position).collect();
    assert_ne!(first, other, "a different seed should move the dots");
}

// ---------------- boundary reflection ----------------

#[test]
fn outward_dot_at_left_edge_flips_x_velocity() {
    let mut dot = make_dot(0.0, 50.0, -0.1, 0.05);
    dot.advance(100.0, 100.0);
    assert!(dot.velocity.x > 0.0, "x velocity should have flipped");
    assert!((dot.velocity.y - 0.05).abs() < 1e-6, "y velocity untouched");
    // Overshoot is allowed: the post-move position may sit outside
    assert!(dot.position.x < 0.0);
}

#[test]
fn outward_dot_at_right_edge_flips_x_velocity() {
    let mut dot = make_dot(100.0, 50.0, 0.1, 0.0);
    dot.advance(100.0, 100.0);
    assert!(dot.velocity.x < 0.0);
    assert!(dot.position.x > 100.0);
}

#[test]
fn inward_dot_at_edge_does_not_flip() {
    let mut dot = make_dot(0.0, 50.0, 0.1, 0.0);
    dot.advance(100.0, 100.0);
    assert!(dot.velocity.x > 0.0, "inward motion must not bounce");
}

#[test]
fn bottom_edge_flips_y_independently() {
    let mut dot = make_dot(50.0, 100.0, 0.1, 0.1);
    dot.advance(100.0, 100.0);
    assert!(dot.velocity.y < 0.0);
    assert!(dot.velocity.x > 0.0, "x axis must be unaffected");
}

#[test]
fn population_stays_near_surface_over_many_steps() {
    let mut field = make_field(800.0, 600.0);
    for _ in 0..2000 {
        field.step();
    }
    // One frame of overshoot at most: never further out than one max step
    for dot in &field.dots {
        assert!(dot.position.x >= -0.15 && dot.position.x <= 800.15);
        assert!(dot.position.y >= -0.15 && dot.position.y <= 600.15);
    }
}

// ---------------- visibility falloff ----------------

#[test]
fn alpha_is_one_without_a_pointer() {
    let field = make_field(800.0, 600.0);
    assert_eq!(field.pointer(), None);
    for dot in &field.dots {
        assert_eq!(field.dot_alpha(dot), Some(1.0));
    }
}

#[test]
fn alpha_falls_off_linearly_and_cuts_out() {
    let mut field = make_field(800.0, 600.0);
    field.set_pointer(Vec2::new(400.0, 300.0));

    let at = |d: f32| make_dot(400.0 + d, 300.0, 0.0, 0.0);
    assert_eq!(field.dot_alpha(&at(0.0)), Some(1.0));

    let mut prev = f32::INFINITY;
    for d in [0.0, 1.0, 100.0, 400.0, 799.0, 800.0] {
        let alpha = field.dot_alpha(&at(d)).expect("within visibility radius");
        assert!(alpha < prev, "alpha must strictly decrease with distance");
        assert!(alpha >= 0.0, "never negative");
        let expected = 1.0 - d / 800.0;
        assert!((alpha - expected).abs() < 1e-5);
        prev = alpha;
    }
    assert_eq!(field.dot_alpha(&at(800.1)), None, "beyond the radius: skipped");
}

// ---------------- pointer links ----------------

#[test]
fn pointer_links_cover_the_connect_radius() {
    let mut field = make_field(800.0, 600.0);
    let p = Vec2::new(400.0, 300.0);
    field.set_pointer(p);
    field.dots = vec![
        make_dot(400.0, 300.0, 0.0, 0.0), // distance 0
        make_dot(450.0, 300.0, 0.0, 0.0), // distance 50
        make_dot(400.0, 410.0, 0.0, 0.0), // distance 110: outside
    ];

    let mut links = Vec::new();
    field.collect_pointer_links(&mut links);
    assert_eq!(links.len(), 2);
    for link in &links {
        assert_eq!(link.to, p, "pointer links always end at the pointer");
    }
    // Raw opacity can exceed 1 near the pointer; the formula is reported as-is
    assert!((links[0].opacity - 1.4).abs() < 1e-5);
    assert!((links[1].opacity - (1.4 - 50.0 / 100.0)).abs() < 1e-5);
}

#[test]
fn pointer_links_require_a_pointer() {
    let mut field = make_field(800.0, 600.0);
    let mut links = vec![Link {
        from: Vec2::ZERO,
        to: Vec2::ZERO,
        opacity: 1.0,
    }];
    field.collect_pointer_links(&mut links);
    assert!(links.is_empty(), "collection must clear stale output");
}

// ---------------- dot links ----------------

#[test]
fn dot_links_pair_each_qualifying_pair_once() {
    let mut field = make_field(800.0, 600.0);
    field.set_pointer(Vec2::new(400.0, 300.0));
    field.dots = vec![
        make_dot(400.0, 300.0, 0.0, 0.0),
        make_dot(500.0, 300.0, 0.0, 0.0), // 100 from dot 0
        make_dot(400.0, 440.0, 0.0, 0.0), // 140 from dot 0, 172 from dot 1
    ];

    let mut links = Vec::new();
    field.collect_dot_links(&mut links);
    // Pairs (0,1) and (0,2) qualify; (1,2) is 172 > 150; no self-pairs
    assert_eq!(links.len(), 2);
    for link in &links {
        assert_ne!(link.from, link.to, "no self-pair");
        let d = link.from.distance(link.to);
        assert!((link.opacity - (1.0 - d / 150.0)).abs() < 1e-5);
    }
}

#[test]
fn dot_link_pairing_is_order_independent() {
    let base = [
        make_dot(400.0, 300.0, 0.0, 0.0),
        make_dot(460.0, 300.0, 0.0, 0.0),
        make_dot(400.0, 380.0, 0.0, 0.0),
        make_dot(650.0, 300.0, 0.0, 0.0), // outside reveal radius
    ];
    let mut forward = make_field(800.0, 600.0);
    forward.set_pointer(Vec2::new(400.0, 300.0));
    forward.dots = base.to_vec();
    let mut reversed = make_field(800.0, 600.0);
    reversed.set_pointer(Vec2::new(400.0, 300.0));
    reversed.dots = base.iter().rev().cloned().collect();

    let mut a = Vec::new();
    let mut b = Vec::new();
    forward.collect_dot_links(&mut a);
    reversed.collect_dot_links(&mut b);
    assert_eq!(a.len(), b.len(), "pair set must not depend on dot order");

    let key = |l: &Link| {
        let mut ends = [(l.from.x, l.from.y), (l.to.x, l.to.y)];
        ends.sort_by(|p, q| p.partial_cmp(q).expect("finite"));
        ends
    };
    let mut ka: Vec<_> = a.iter().map(key).collect();
    let mut kb: Vec<_> = b.iter().map(key).collect();
    ka.sort_by(|p, q| p.partial_cmp(q).expect("finite"));
    kb.sort_by(|p, q| p.partial_cmp(q).expect("finite"));
    assert_eq!(ka, kb);
}

#[test]
fn dot_links_need_both_ends_near_the_pointer() {
    let mut field = make_field(800.0, 600.0);
    field.set_pointer(Vec2::new(100.0, 100.0));
    field.dots = vec![
        make_dot(120.0, 100.0, 0.0, 0.0), // 20 from pointer
        make_dot(420.0, 100.0, 0.0, 0.0), // 320 from pointer: not revealed
        make_dot(430.0, 100.0, 0.0, 0.0), // close to dot 1, also not revealed
    ];
    let mut links = Vec::new();
    field.collect_dot_links(&mut links);
    assert!(
        links.is_empty(),
        "pairs with either end outside the reveal radius must not connect"
    );
}

// ---------------- resize regeneration ----------------

#[test]
fn resize_replaces_the_whole_population() {
    let mut field = make_field(1920.0, 1080.0);
    let before: Vec<Vec2> = field.dots.iter().map(|d| d.position).collect();
    field.resize(1024.0, 768.0);
    assert_eq!(
        field.dots.len(),
        ParticleField::dot_count_for(&FieldConfig::default(), 1024.0, 768.0)
    );
    assert!((field.width(), field.height()) == (1024.0, 768.0));
    for dot in &field.dots {
        assert!(dot.position.x >= 0.0 && dot.position.x < 1024.0);
        assert!(dot.position.y >= 0.0 && dot.position.y < 768.0);
    }
    let after: Vec<Vec2> = field.dots.iter().map(|d| d.position).collect();
    assert_ne!(before[..after.len().min(before.len())], after[..], "no dot survives by identity");
}

#[test]
fn resize_keeps_pointer_state() {
    let mut field = make_field(800.0, 600.0);
    field.set_pointer(Vec2::new(10.0, 10.0));
    field.resize(400.0, 300.0);
    assert_eq!(field.pointer(), Some(Vec2::new(10.0, 10.0)));
}

// ---------------- pointer tracking ----------------

#[test]
fn pointer_stores_latest_value_verbatim() {
    let mut field = make_field(800.0, 600.0);
    field.set_pointer(Vec2::new(1.0, 2.0));
    field.set_pointer(Vec2::new(3.5, 4.5));
    assert_eq!(field.pointer(), Some(Vec2::new(3.5, 4.5)));
    field.clear_pointer();
    assert_eq!(field.pointer(), None);
}

// ---------------- ambient drift preset ----------------

#[test]
fn drift_preset_ignores_the_pointer() {
    let mut field =
        ParticleField::new(FieldConfig::ambient_drift(), 800.0, 600.0, 42).expect("valid");
    field.set_pointer(Vec2::new(400.0, 300.0));
    for dot in &field.dots {
        assert_eq!(field.dot_alpha(dot), Some(1.0));
    }
    let mut links = Vec::new();
    field.collect_pointer_links(&mut links);
    assert!(links.is_empty());
    field.collect_dot_links(&mut links);
    assert!(links.is_empty());
}

#[test]
fn drift_preset_allows_an_empty_population() {
    let field = ParticleField::new(FieldConfig::ambient_drift(), 50.0, 50.0, 42).expect("valid");
    // floor(2500 / 6000) = 0 and min_dots is 0
    assert!(field.dots.is_empty());
}

#[test]
fn drift_preset_widens_the_creation_bands() {
    let field =
        ParticleField::new(FieldConfig::ambient_drift(), 1920.0, 1080.0, 42).expect("valid");
    assert_eq!(
        field.dots.len(),
        (1920.0f64 * 1080.0 / 6000.0).floor() as usize
    );
    for dot in &field.dots {
        assert!(dot.radius >= 0.5 && dot.radius < 1.7);
        assert!(dot.velocity.x >= -0.2 && dot.velocity.x < 0.2);
        assert!(dot.velocity.y >= -0.2 && dot.velocity.y < 0.2);
    }
}
