use backdrop_wasm::canvas::{DrawCommand, GradientShape, Paint, RecordingCanvas};
use backdrop_wasm::clock::PhaseClock;
use backdrop_wasm::fabric::{grain_rgba, ripple, shimmer_x, FabricRenderer, TexturePattern, TILE_SIZE};
use backdrop_wasm::silk::{draw_silk, layer_gradient, layer_opacity, sweep_x};
use backdrop_wasm::viewport::ViewportState;
use fastrand::Rng;

fn view() -> ViewportState {
    ViewportState { width: 640.0, height: 480.0, scroll_y: 0.0, document_height: 480.0 }
}

/// Checks a tile pixel against the channel formulas for some noise draw.
fn matches_formula(tile: &TexturePattern, x: usize, y: usize) -> bool {
    let [r, g, b, a] = tile.pixel(x, y);
    let base = ripple(x, y);
    // Noise is in [0, 0.15): the pixel must match a value in that span.
    (0..=150).any(|n| {
        let value = base + n as f64 / 1000.0;
        let [er, eg, eb, ea] = grain_rgba(value);
        (er as i16 - r as i16).abs() <= 1
            && (eg as i16 - g as i16).abs() <= 1
            && (eb as i16 - b as i16).abs() <= 1
            && ea == a
    })
}

#[test]
fn tile_generation_follows_channel_formulas() {
    for seed in [1, 2] {
        let tile = TexturePattern::generate(&mut Rng::with_seed(seed));
        assert_eq!((tile.width(), tile.height()), (TILE_SIZE, TILE_SIZE));
        assert_eq!(tile.pixels().len(), TILE_SIZE * TILE_SIZE * 4);
        for y in 0..TILE_SIZE {
            for x in 0..TILE_SIZE {
                let [r, g, b, a] = tile.pixel(x, y);
                assert!((8..=18).contains(&a), "alpha {a}");
                assert!(r >= 85 && r <= 113, "red {r}");
                assert!(g <= 16 && b <= 45);
                assert!(matches_formula(&tile, x, y), "pixel ({x}, {y})");
            }
        }
    }
}

#[test]
fn grain_channels_scale_from_base() {
    assert_eq!(grain_rgba(0.0), [107, 15, 42, 8]);
    assert_eq!(grain_rgba(0.1), [96, 13, 37, 9]);
    assert_eq!(grain_rgba(-0.05)[3], 8);
}

#[test]
fn layers_draw_back_to_front() {
    let mut rng = Rng::with_seed(3);
    let mut fabric = FabricRenderer::new(&mut rng);
    let mut c = RecordingCanvas::new();
    fabric.prepare(&mut c);
    fabric.prepare(&mut c);
    assert_eq!(
        c.commands.iter().filter(|c| matches!(c, DrawCommand::RegisterPattern(..))).count(),
        1
    );

    fabric.draw(&mut c, &view(), &PhaseClock::new());
    let mut order = Vec::new();
    for cmd in &c.commands {
        match cmd {
            DrawCommand::FillRect(_, _, _, _, Paint::Gradient(g)) => match g.shape {
                GradientShape::Radial { .. } => order.push("depth"),
                GradientShape::Linear { .. } => order.push("shimmer"),
            },
            DrawCommand::Stroke(_) if order.last() != Some(&"nap") => order.push("nap"),
            DrawCommand::FillRect(_, _, _, _, Paint::Pattern(_)) => order.push("texture"),
            _ => {}
        }
    }
    assert_eq!(order, ["depth", "nap", "texture", "shimmer"]);
}

#[test]
fn texture_offset_wraps_at_tile_size() {
    let mut rng = Rng::with_seed(4);
    let mut fabric = FabricRenderer::new(&mut rng);
    let mut c = RecordingCanvas::new();
    fabric.prepare(&mut c);
    let mut clock = PhaseClock::new();
    clock.texture = 70.5;
    fabric.draw(&mut c, &view(), &clock);
    assert!(c.commands.contains(&DrawCommand::Translate(6.5, 6.5)));
}

#[test]
fn shimmer_band_loops_across_width() {
    // band = 0.6 * 1000 = 600, period = 1600
    assert_eq!(shimmer_x(1000.0, 0.0), -600.0);
    assert_eq!(shimmer_x(1000.0, 800.0), 200.0);
    assert_eq!(shimmer_x(1000.0, 1600.0), -600.0);
    assert_eq!(shimmer_x(0.0, 10.0), 0.0);
}

#[test]
fn silk_layers_fade_with_depth() {
    assert!((layer_opacity(0) - 0.15).abs() < 1e-12);
    assert!((layer_opacity(3) - 0.06).abs() < 1e-12);
    let g = layer_gradient(0, 0.0, 1000.0, 500.0);
    // At t = 0: off_x = 0, off_y = 0.1 * 500.
    assert_eq!(g.shape, GradientShape::Linear { x0: 200.0, y0: 200.0, x1: 800.0, y1: 425.0 });
    assert_eq!(g.stops.len(), 4);
    assert_eq!(layer_gradient(2, 0.0, 1000.0, 500.0).stops.len(), 3);
    assert_eq!(sweep_x(0.0, 1000.0), -100.0);
    assert_eq!(sweep_x(5.0, 1000.0), 0.0);
    assert_eq!(sweep_x(60.0, 1000.0), -100.0);
}

#[test]
fn silk_draws_gradients_strokes_and_sweep() {
    let mut c = RecordingCanvas::new();
    draw_silk(&mut c, &view(), 1.25);
    let rects = c.commands.iter().filter(|c| matches!(c, DrawCommand::FillRect(..))).count();
    let strokes = c.commands.iter().filter(|c| matches!(c, DrawCommand::Stroke(_))).count();
    assert_eq!(rects, 5);
    assert_eq!(strokes, 6);
}
