//! End-to-end negotiation through a scripted host.

mod common;

use common::*;
use zenviewport::*;

// ── scale modes ─────────────────────────────────────────────────────────

#[test]
fn show_all_on_desktop_commits_first_tick() {
    let mut m = manager(FakeWindow::new(1024, 768), ScaleMode::ShowAll, Platform::DESKTOP);
    assert!(m.refresh());
    assert_eq!(m.state(), StabilizerState::Polling);

    let commits = advance(&mut m, ms(10));
    assert_eq!(commits, vec![Size::new(1024, 768)]);
    assert_eq!(m.stage().display, Some(Size::new(1024, 768)));
    assert_eq!(m.committed_size(), Size::new(1024, 768));
    assert_eq!(m.state(), StabilizerState::Idle);

    // 800 / 1024 and 600 / 768
    assert_eq!(*m.input(), ScaleFactor { x: 0.78125, y: 0.78125 });
    assert_eq!(m.scale_factor(), *m.input());
}

#[test]
fn exact_fit_clamps_to_max_width() {
    let config = StageConfig::new().max_width(900);
    let mut m = manager_with(
        FakeWindow::new(1024, 768),
        ScaleMode::ExactFit,
        Platform::DESKTOP,
        config,
    );
    m.refresh();
    assert_eq!(advance(&mut m, ms(10)), vec![Size::new(900, 768)]);
    assert_eq!(m.scale_factor().x, 800.0 / 900.0);
}

#[test]
fn bounds_changes_apply_on_next_commit() {
    let mut m = manager(FakeWindow::new(1024, 768), ScaleMode::ExactFit, Platform::DESKTOP);
    m.refresh();
    advance(&mut m, ms(10));
    assert_eq!(m.committed_size(), Size::new(1024, 768));

    m.bounds_mut().max_height = Some(700);
    m.refresh();
    advance(&mut m, ms(10));
    assert_eq!(m.committed_size(), Size::new(1024, 700));
}

#[test]
fn no_scale_ignores_window_changes() {
    let mut m = manager(FakeWindow::new(1024, 768), ScaleMode::NoScale, Platform::DESKTOP);
    m.viewport_mut().resize(1920, 1080);
    m.handle_resize();
    assert_eq!(m.update(), None);
    assert_eq!(m.state(), StabilizerState::Idle);
    assert_eq!(m.viewport().started, 0);
    assert_eq!(m.committed_size(), Size::new(800, 600));
}

// ── mobile chrome collapse ──────────────────────────────────────────────

#[test]
fn mobile_waits_for_chrome_to_collapse() {
    let window = FakeWindow::new(360, 560).grow_at(ms(30), Size::new(360, 620));
    let mut m = manager(window, ScaleMode::ShowAll, Platform::MOBILE);

    m.refresh();
    assert_eq!(m.state(), StabilizerState::Settling);
    assert_eq!(m.viewport().min_content_height, Some(5000));
    assert_eq!(m.stabilizer().run().unwrap().baseline_height(), 560);

    assert!(advance(&mut m, ms(20)).is_empty());
    assert_eq!(m.state(), StabilizerState::Polling);

    // min(620/600, 360/800) = 0.45
    assert_eq!(advance(&mut m, ms(80)), vec![Size::new(360, 270)]);
    assert_eq!(m.viewport().min_content_height, Some(620));
    // One nudge from refresh, one per tick.
    assert_eq!(m.viewport().scrolls, vec![(0, 0); 4]);
    assert_eq!(m.viewport().cancelled, 1);
}

#[test]
fn legacy_mobile_browser_scrolls_one_pixel() {
    let platform = Platform {
        legacy_mobile_browser: true,
        ..Platform::MOBILE
    };
    let mut m = manager(FakeWindow::new(360, 560), ScaleMode::ShowAll, platform);
    m.refresh();
    advance(&mut m, ms(20));
    assert!(m.viewport().scrolls.iter().all(|&s| s == (0, 1)));
    assert_eq!(m.viewport().scrolls.len(), 3);
}

#[test]
fn timeout_commits_whatever_is_available() {
    let mut m = manager(FakeWindow::new(360, 560), ScaleMode::ExactFit, Platform::MOBILE);
    m.refresh();

    assert!(advance(&mut m, ms(400)).is_empty());
    assert_eq!(m.stabilizer().run().unwrap().remaining_iterations(), 0);

    assert_eq!(advance(&mut m, ms(10)), vec![Size::new(360, 560)]);
    assert_eq!(m.state(), StabilizerState::Idle);
    assert!(m.viewport().interval.is_none());
    assert_eq!(m.viewport().min_content_height, Some(560));
}

#[test]
fn refresh_during_run_keeps_run_state() {
    let mut m = manager(FakeWindow::new(360, 560), ScaleMode::ShowAll, Platform::MOBILE);
    m.refresh();
    advance(&mut m, ms(50));
    let before = *m.stabilizer().run().unwrap();
    assert_eq!(before.remaining_iterations(), 35);

    m.viewport_mut().inner = Size::new(360, 500);
    m.viewport_mut().native = Some(90);
    let event = m.handle_orientation_change();
    assert_eq!(event, OrientationEvent::EnterLandscape { angle: 90 });

    let after = *m.stabilizer().run().unwrap();
    assert_eq!(after, before);
    assert_eq!(m.viewport().started, 1);
    // The refresh still re-nudged the page.
    assert_eq!(m.viewport().min_content_height, Some(5000));
}

#[test]
fn new_run_after_commit() {
    let mut m = manager(FakeWindow::new(1024, 768), ScaleMode::ShowAll, Platform::DESKTOP);
    m.refresh();
    advance(&mut m, ms(10));
    assert!(m.refresh());
    assert_eq!(m.viewport().started, 2);
}

#[test]
fn stray_sample_is_ignored() {
    let mut m = manager(FakeWindow::new(1024, 768), ScaleMode::ShowAll, Platform::DESKTOP);
    assert_eq!(m.sample(), None);
    assert_eq!(m.stage().display, None);
}

// ── orientation ─────────────────────────────────────────────────────────

#[test]
fn initial_orientation_from_native_reading() {
    let m = manager(
        FakeWindow::new(360, 640).native(-90),
        ScaleMode::ShowAll,
        Platform::MOBILE,
    );
    assert!(m.is_landscape());
    assert_eq!(m.orientation().angle, -90);
}

#[test]
fn initial_orientation_from_outer_size() {
    let m = manager(FakeWindow::new(640, 360), ScaleMode::ShowAll, Platform::MOBILE);
    assert!(m.is_landscape());
    let m = manager(FakeWindow::new(360, 640), ScaleMode::ShowAll, Platform::MOBILE);
    assert!(m.is_portrait());
}

#[test]
fn orientation_change_refreshes() {
    let mut m = manager(
        FakeWindow::new(360, 640).native(0),
        ScaleMode::ShowAll,
        Platform::MOBILE,
    );
    m.viewport_mut().native = Some(90);
    assert_eq!(
        m.handle_orientation_change(),
        OrientationEvent::EnterLandscape { angle: 90 }
    );
    assert_eq!(m.state(), StabilizerState::Settling);
}

#[test]
fn resize_infers_from_outer_size() {
    let mut m = manager(
        FakeWindow::new(360, 640).native(0),
        ScaleMode::ExactFit,
        Platform::DESKTOP,
    );
    m.viewport_mut().resize(640, 360);
    assert_eq!(m.handle_resize(), OrientationEvent::EnterLandscape { angle: 90 });
    assert_eq!(advance(&mut m, ms(10)), vec![Size::new(640, 360)]);
}

#[test]
fn orientation_events_without_refresh_in_no_scale() {
    let mut m = manager(
        FakeWindow::new(360, 640).native(0),
        ScaleMode::NoScale,
        Platform::MOBILE,
    );
    m.viewport_mut().native = Some(-90);
    assert!(m.handle_orientation_change().is_landscape());
    assert_eq!(m.state(), StabilizerState::Idle);
}

// ── update ──────────────────────────────────────────────────────────────

#[test]
fn update_detects_drift() {
    let mut m = manager(FakeWindow::new(1024, 768), ScaleMode::ExactFit, Platform::DESKTOP);
    m.refresh();
    advance(&mut m, ms(10));

    // In sync: nothing to do.
    m.update();
    assert_eq!(m.state(), StabilizerState::Idle);

    // Drag-resize with no resize event.
    m.viewport_mut().resize(1280, 720);
    m.update();
    assert_eq!(m.state(), StabilizerState::Polling);
    assert_eq!(advance(&mut m, ms(10)), vec![Size::new(1280, 720)]);
}

// ── forced orientation ──────────────────────────────────────────────────

#[test]
fn forced_landscape_round_trip() {
    let config = StageConfig::new()
        .force(ForcedOrientation::Landscape)
        .max_width(300);
    let mut m = manager_with(
        FakeWindow::new(400, 800),
        ScaleMode::ShowAll,
        Platform::DESKTOP,
        config,
    );

    assert_eq!(m.update(), Some(OrientationCheck::EnterIncorrect));
    assert!(m.is_incorrect_orientation());
    // Maximum size, bounds skipped.
    assert_eq!(advance(&mut m, ms(10)), vec![Size::new(400, 800)]);

    // Still wrong: no repeat event.
    assert_eq!(m.update(), None);

    m.viewport_mut().resize(800, 400);
    assert_eq!(m.update(), Some(OrientationCheck::LeaveIncorrect));
    assert!(!m.is_incorrect_orientation());
    // min(400/600, 800/800) → 533×400, then max_width 300.
    assert_eq!(advance(&mut m, ms(10)), vec![Size::new(300, 400)]);
}

#[test]
fn forced_orientation_in_no_scale_keeps_logical_size() {
    let config = StageConfig::new().force(ForcedOrientation::Landscape);
    let mut m = manager_with(
        FakeWindow::new(800, 400),
        ScaleMode::NoScale,
        Platform::DESKTOP,
        config,
    );

    m.viewport_mut().resize(400, 800);
    assert_eq!(m.update(), Some(OrientationCheck::EnterIncorrect));
    assert!(m.is_incorrect_orientation());
    assert_eq!(m.state(), StabilizerState::Idle);
    assert!(advance(&mut m, ms(10)).is_empty());
    assert_eq!(m.committed_size(), Size::new(800, 600));

    // An explicit refresh while wrong still leaves the size alone.
    assert!(m.refresh());
    assert_eq!(advance(&mut m, ms(10)), vec![Size::new(800, 600)]);

    m.viewport_mut().resize(1000, 500);
    assert_eq!(m.update(), Some(OrientationCheck::LeaveIncorrect));
    assert!(advance(&mut m, ms(10)).is_empty());
    assert_eq!(m.committed_size(), Size::new(800, 600));
}

#[test]
fn square_window_keeps_forced_state() {
    let config = StageConfig::new().force(ForcedOrientation::Portrait);
    let mut m = manager_with(
        FakeWindow::new(500, 500),
        ScaleMode::ShowAll,
        Platform::DESKTOP,
        config,
    );
    assert_eq!(m.update(), None);
    assert!(!m.is_incorrect_orientation());
}

// ── alignment ───────────────────────────────────────────────────────────

#[test]
fn alignment_centers_letterboxed_surface() {
    let config = StageConfig::new().align(true, true);
    let mut m = manager_with(
        FakeWindow::new(1000, 1000),
        ScaleMode::ShowAll,
        Platform::DESKTOP,
        config,
    );
    m.refresh();
    // min(1000/600, 1000/800) = 1.25 → 1000×750
    assert_eq!(advance(&mut m, ms(10)), vec![Size::new(1000, 750)]);
    assert_eq!(m.margin(), Margin { x: 0, y: 125 });
    assert_eq!(m.stage().margin, Some(Margin { x: 0, y: 125 }));
}

#[test]
fn alignment_off_leaves_margin_untouched() {
    let mut m = manager(FakeWindow::new(1000, 1000), ScaleMode::ShowAll, Platform::DESKTOP);
    m.refresh();
    advance(&mut m, ms(10));
    assert_eq!(m.stage().margin, None);
    assert_eq!(m.margin(), Margin::default());
}

// ── readouts ────────────────────────────────────────────────────────────

#[test]
fn aspect_ratio_tracks_commit() {
    let mut m = manager(FakeWindow::new(1000, 500), ScaleMode::ExactFit, Platform::DESKTOP);
    assert_eq!(m.aspect_ratio(), 800.0 / 600.0);
    m.refresh();
    advance(&mut m, ms(10));
    assert_eq!(m.aspect_ratio(), 2.0);
}

// ── fullscreen ──────────────────────────────────────────────────────────

#[test]
fn fullscreen_uses_first_available_variant() {
    let window =
        FakeWindow::new(1024, 768).with_fullscreen(&[FullscreenApi::Moz, FullscreenApi::Webkit]);
    let mut m = manager(window, ScaleMode::ShowAll, Platform::DESKTOP);

    assert!(m.start_full_screen());
    assert_eq!(m.viewport().requests, vec![FullscreenApi::Moz]);

    m.viewport_mut().fullscreen = true;
    assert!(m.is_full_screen());
    assert!(!m.start_full_screen());
    assert_eq!(m.viewport().requests.len(), 1);

    assert!(m.stop_full_screen());
    assert_eq!(m.viewport().cancels, vec![FullscreenApi::Moz]);
}

#[test]
fn fullscreen_resolved_once() {
    let window = FakeWindow::new(1024, 768).with_fullscreen(&[FullscreenApi::Webkit]);
    let mut m = manager(window, ScaleMode::ShowAll, Platform::DESKTOP);
    m.viewport_mut().fullscreen_apis = vec![FullscreenApi::Standard];
    m.start_full_screen();
    assert_eq!(m.viewport().requests, vec![FullscreenApi::Webkit]);
}

#[test]
fn fullscreen_unavailable_is_noop() {
    let mut m = manager(FakeWindow::new(1024, 768), ScaleMode::ShowAll, Platform::DESKTOP);
    assert!(!m.start_full_screen());
    assert!(!m.stop_full_screen());
    assert!(m.viewport().requests.is_empty());
    assert!(m.viewport().cancels.is_empty());
}
