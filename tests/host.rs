mod support;

use backdrop_wasm::canvas::DrawCommand;
use backdrop_wasm::theme::PaletteTrigger;
use backdrop_wasm::{HostState, Kind};
use support::{host, region, tick, FakeViewport, FrameSpy, StaticRegions, TestHost};

#[test]
fn keeps_exactly_one_frame_in_flight() {
    let viewport = FakeViewport::new(1280.0, 720.0);
    let spy = FrameSpy::default();
    let mut h = host(Kind::FixedWaves, &viewport, &spy);
    assert_eq!(spy.outstanding.get(), 0);

    h.mount();
    h.mount();
    assert_eq!(h.state(), HostState::Running);
    assert_eq!(spy.outstanding.get(), 1);

    for _ in 0..10 {
        tick(&mut h, &spy);
        assert_eq!(spy.outstanding.get(), 1);
    }
    assert_eq!(h.clock().frames(), 10);
    assert_eq!(h.clock().wave, 10.0);
}

#[test]
fn resize_rederives_particle_population() {
    let viewport = FakeViewport::new(1920.0, 1080.0);
    let spy = FrameSpy::default();
    let mut h = host(Kind::Waves, &viewport, &spy);
    h.mount();
    assert_eq!(h.scene().population(), 103);
    assert!(h.canvas().commands.contains(&DrawCommand::SetSize(1920.0, 1080.0)));

    viewport.set_size(800.0, 600.0);
    h.on_resize();
    assert_eq!(h.scene().population(), 24);
    assert!(h.canvas().commands.contains(&DrawCommand::SetSize(800.0, 600.0)));
}

#[test]
fn resize_event_without_a_size_change_keeps_the_field() {
    let viewport = FakeViewport::new(1280.0, 720.0);
    let spy = FrameSpy::default();
    let mut h = host(Kind::Waves, &viewport, &spy);
    h.mount();
    let sizes = |h: &TestHost| {
        h.canvas()
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::SetSize(..)))
            .count()
    };
    assert_eq!(sizes(&h), 1);

    h.on_resize();
    h.on_resize();
    assert_eq!(sizes(&h), 1);

    viewport.set_size(1280.5, 720.0);
    h.on_resize();
    assert_eq!(sizes(&h), 1);

    viewport.set_size(1300.0, 720.0);
    h.on_resize();
    assert_eq!(sizes(&h), 2);
}

#[test]
fn hidden_page_skips_all_work_and_resumes_without_catch_up() {
    let viewport = FakeViewport::new(1280.0, 720.0);
    let spy = FrameSpy::default();
    let mut h = host(Kind::Waves, &viewport, &spy);
    h.mount();
    tick(&mut h, &spy);
    assert_eq!(h.clock().frames(), 1);

    h.on_visibility_change(true);
    let draws = h.canvas().draw_count();
    viewport.set_scroll(400.0);
    h.on_scroll();
    viewport.set_size(1024.0, 768.0);
    h.on_resize();
    for _ in 0..30 {
        tick(&mut h, &spy);
        // The callback chain stays alive while hidden.
        assert_eq!(spy.outstanding.get(), 1);
    }
    assert_eq!(h.canvas().draw_count(), draws);
    assert_eq!(h.clock().frames(), 1);

    h.on_visibility_change(false);
    for n in 1..=3 {
        tick(&mut h, &spy);
        assert_eq!(h.clock().frames(), 1 + n);
    }
    assert!(h.canvas().draw_count() > draws);
}

#[test]
fn blur_and_focus_gate_drawing() {
    let viewport = FakeViewport::new(640.0, 480.0);
    let spy = FrameSpy::default();
    let mut h = host(Kind::FixedWaves, &viewport, &spy);
    h.mount();
    h.on_blur();
    assert!(!h.visibility().is_active());
    tick(&mut h, &spy);
    assert_eq!(h.clock().frames(), 0);
    h.on_focus();
    tick(&mut h, &spy);
    assert_eq!(h.clock().frames(), 1);
}

#[test]
fn teardown_releases_the_frame_and_ignores_later_events() {
    let viewport = FakeViewport::new(1920.0, 1080.0);
    let spy = FrameSpy::default();
    let mut h = host(Kind::Waves, &viewport, &spy);
    h.mount();
    tick(&mut h, &spy);
    tick(&mut h, &spy);

    h.teardown();
    assert_eq!(h.state(), HostState::TornDown);
    assert_eq!(spy.outstanding.get(), 0);
    assert!(!h.is_scheduled());

    let requested = spy.requested.get();
    let commands = h.canvas().commands.len();
    let clock = *h.clock();

    viewport.set_size(800.0, 600.0);
    h.on_resize();
    h.on_scroll();
    h.on_section_timer();
    h.on_visibility_change(true);
    h.on_frame();
    assert!(h.on_palette("velvet", PaletteTrigger::Storage).is_none());
    h.teardown();

    assert_eq!(spy.outstanding.get(), 0);
    assert_eq!(spy.requested.get(), requested);
    assert_eq!(h.canvas().commands.len(), commands);
    assert_eq!(*h.clock(), clock);
    assert_eq!(h.scene().population(), 103);
    assert!(h.visibility().is_active());
}

#[test]
fn zero_area_canvas_has_no_particles_and_draws_nothing() {
    let viewport = FakeViewport::new(0.0, 0.0);
    let spy = FrameSpy::default();
    let mut h = host(Kind::Waves, &viewport, &spy);
    h.mount();
    tick(&mut h, &spy);
    assert_eq!(h.scene().population(), 0);
    assert_eq!(h.canvas().draw_count(), 0);
    assert_eq!(spy.outstanding.get(), 1);
}

#[test]
fn palette_gate_starts_and_stops_the_loop() {
    let viewport = FakeViewport::new(640.0, 480.0);
    let spy = FrameSpy::default();
    let mut h = host(Kind::Fabric, &viewport, &spy);
    h.mount();
    assert_eq!(spy.outstanding.get(), 0);

    assert!(h.on_palette("default", PaletteTrigger::Initial).is_some());
    assert_eq!(spy.outstanding.get(), 0);

    let change = h.on_palette("velvet", PaletteTrigger::Mutation).expect("activated");
    assert!(change.active);
    assert_eq!(spy.outstanding.get(), 1);
    // The same value delivered again by the other triggers is ignored.
    assert!(h.on_palette("velvet", PaletteTrigger::Storage).is_none());
    assert!(h.on_palette("velvet", PaletteTrigger::Poll).is_none());
    assert_eq!(spy.outstanding.get(), 1);

    tick(&mut h, &spy);
    assert!(h.canvas().draw_count() > 0);
    assert_eq!(h.clock().frames(), 1);

    h.on_palette("default", PaletteTrigger::Poll).expect("deactivated");
    assert_eq!(spy.outstanding.get(), 0);
    assert!(matches!(h.canvas().commands.last(), Some(DrawCommand::ClearRect(..))));
    h.on_frame();
    assert_eq!(spy.outstanding.get(), 0);
    assert_eq!(h.clock().frames(), 1);
}

#[test]
fn ungated_hosts_ignore_palette_readings() {
    let viewport = FakeViewport::new(640.0, 480.0);
    let spy = FrameSpy::default();
    let mut h = host(Kind::Waves, &viewport, &spy);
    h.mount();
    assert!(h.on_palette("velvet", PaletteTrigger::Initial).is_none());
    assert_eq!(spy.outstanding.get(), 1);
}

#[test]
fn dividers_are_located_lazily_from_page_regions() {
    let viewport = FakeViewport::new(1280.0, 720.0);
    let spy = FrameSpy::default();
    let regions = StaticRegions(vec![
        region(0.0, 600.0, "white"),
        region(600.0, 100.0, "navy"),
        region(700.0, 100.0, "white"),
    ]);
    let mut h = host(Kind::Waves, &viewport, &spy).with_regions(Box::new(regions));
    h.mount();
    assert!(h.dividers().is_empty());

    tick(&mut h, &spy);
    let ys: Vec<f64> = h.dividers().iter().map(|d| d.y).collect();
    assert_eq!(ys, vec![600.0, 700.0]);
    assert!(!h.dividers()[0].inverted);
    assert!(h.dividers()[1].inverted);
}

#[test]
fn silk_renders_under_its_palette() {
    let viewport = FakeViewport::new(400.0, 300.0);
    let spy = FrameSpy::default();
    let mut h = host(Kind::Silk, &viewport, &spy);
    h.mount();
    h.on_palette("velvet", PaletteTrigger::Initial);
    tick(&mut h, &spy);
    tick(&mut h, &spy);
    assert!((h.clock().silk - 0.02).abs() < 1e-12);
    let strokes = h.canvas().commands.iter().filter(|c| matches!(c, DrawCommand::Stroke(_))).count();
    assert_eq!(strokes, 12);
}
