use super::*;
use crate::core::log::{take_captured, LogLevel};
use crate::domain::actions::ActivityKind;
use crate::domain::record::{LEGACY_KEY, STATE_KEY};
use crate::domain::scene::SceneId;
use crate::domain::settings::PositionPreset;
use crate::domain::topping::Topping;
use crate::host::memory::{MemoryStore, RecordingView, ViewCall};
use crate::host::view::VisualFlag;

type TestCore = PetCore<RecordingView, MemoryStore>;

const VIEWPORT: Size = Size::new(1920.0, 1080.0);
const PET: Size = Size::new(120.0, 120.0);
const FRAME: f64 = 16.0;

fn mounted(store: MemoryStore) -> TestCore {
    let mut core = PetCore::with_config(RecordingView::new(), store, EngineConfig::default(), Rng::new(7));
    core.set_hour_source(|| 10);
    core.mount();
    core.resize(VIEWPORT, PET);
    core
}

/// Logged in, greeting played out, back to idle at t=3000
fn settled() -> TestCore {
    let mut core = mounted(MemoryStore::new());
    core.set_logged_in(true, 0.0);
    core.tick(1000.0);
    core.tick(3000.0);
    assert_eq!(core.state().current, PetStateKind::Idle);
    core
}

/// Tick frame by frame until `done` holds; returns the time reached
fn run_until(core: &mut TestCore, mut now: f64, limit: f64, done: impl Fn(&TestCore) -> bool) -> f64 {
    while now < limit {
        now += FRAME;
        core.tick(now);
        if done(core) {
            return now;
        }
    }
    panic!("condition not reached by {}ms (state {:?})", limit, core.state().current);
}

/// Press, move through `points` one frame apart, hold still for `hold_ms`, release
fn drag(core: &mut TestCore, points: &[(f64, f64)], start_ms: f64, hold_ms: f64) -> f64 {
    let pos = core.position();
    let grab = Vec2::new(pos.x + 60.0, pos.y + 60.0);
    core.pointer_down(PointerKind::Mouse, PointerButton::Primary, grab, start_ms);
    let mut now = start_ms;
    for (dx, dy) in points {
        now += FRAME;
        core.pointer_move(Vec2::new(grab.x + dx, grab.y + dy), now);
    }
    now += hold_ms;
    core.pointer_up(Vec2::zero(), now);
    now
}

// === Placement and geometry ===

#[test]
fn first_resize_anchors_to_preset_on_the_floor() {
    let core = mounted(MemoryStore::new());
    assert_eq!(core.position(), Vec2::new(1770.0, 930.0));
    assert_eq!(core.bounds().floor, 930.0);
    assert_eq!(core.view().pos, core.position());
}

#[test]
fn gauges_stay_clamped() {
    let mut core = settled();
    transitions::adjust_mood(&mut core, 10_000);
    assert_eq!(core.state().mood.value(), 100);
    transitions::adjust_mood(&mut core, -10_000);
    assert_eq!(core.state().mood.value(), 0);
    for _ in 0..20 {
        core.perform(Action::Encourage, 3000.0);
    }
    assert_eq!(core.state().mood.value(), 100);
    assert_eq!(core.view().stats.0, 100);
}

#[test]
fn menu_stays_inside_viewport() {
    let mut core = settled();
    core.context_menu(3100.0);
    let at = core.view().menu.expect("menu shown");
    assert!(at.x >= 10.0 && at.x + 200.0 <= VIEWPORT.w - 10.0);
    assert!(at.y >= 10.0 && at.y + 260.0 <= VIEWPORT.h - 10.0);
    assert!(core.state().menu_open);

    core.document_click(false, false);
    assert!(core.view().menu.is_none());
}

// === Drag and physics ===

#[test]
fn fast_downward_drag_worries_then_lands_on_floor() {
    let mut core = settled();
    core.pos = Vec2::new(800.0, 600.0);

    let released = drag(&mut core, &[(0.0, 40.0), (0.0, 80.0)], 4000.0, 8.0);
    assert!(matches!(core.motion(), Motion::Falling(_)));
    assert!(core.view().states().contains(&PetStateKind::Worried));
    assert!(!core.state().is_dragging);

    run_until(&mut core, released, released + 20_000.0, |c| c.motion().is_resting());

    assert_eq!(core.position().y, 930.0);
    assert_eq!(core.state().current, PetStateKind::Idle);
    assert_eq!(core.free_position(), Some(core.position()));
    assert!(core.store().entries.contains_key(STATE_KEY));
}

#[test]
fn slow_drag_on_the_floor_just_rests() {
    let mut core = settled();
    let start = core.position();
    let released = drag(&mut core, &[(-10.0, 0.0), (-20.0, 0.0)], 4000.0, 200.0);

    // The pointer paused before release, so nothing is thrown
    assert!(core.motion().is_resting());
    assert_eq!(core.position(), Vec2::new(start.x - 20.0, start.y));
    assert_ne!(core.state().current, PetStateKind::Worried);

    // The browser's trailing click is swallowed
    core.click(released + 50.0);
    assert_ne!(core.state().current, PetStateKind::Happy);
}

#[test]
fn drag_aborts_running_activity() {
    let mut core = settled();
    assert_eq!(core.perform(Action::Activity(ActivityKind::Toast), 3100.0), ActionOutcome::Done);
    assert!(core.state().is_busy);

    drag(&mut core, &[(-30.0, -30.0)], 3200.0, 8.0);
    assert!(!core.state().is_busy);
    assert_eq!(core.current_activity(), None);
    assert!(core.view().visible_scenes.is_empty());
}

#[test]
fn lost_release_does_not_strand_the_drag() {
    let mut core = settled();
    let grab = core.pet_rect().center();
    core.pointer_down(PointerKind::Touch, PointerButton::Primary, grab, 4000.0);
    core.pointer_move(Vec2::new(grab.x - 40.0, grab.y), 4016.0);
    assert_eq!(*core.motion(), Motion::Dragging);

    // The release never arrives; the next tap ends the old drag
    core.pointer_down(PointerKind::Mouse, PointerButton::Primary, core.pet_rect().center(), 5000.0);
    core.pointer_up(Vec2::zero(), 5010.0);
    assert!(core.motion().is_resting());
    assert!(!core.state().is_dragging);
    assert!(!core.view().has_flag(VisualFlag::Dragging));
    assert_eq!(core.position().y, 930.0);

    // Autonomous life carries on
    core.tick(50_000.0);
    assert!(core.state().is_busy);
}

#[test]
fn lost_release_in_mid_air_falls_to_the_floor() {
    let mut core = settled();
    let grab = core.pet_rect().center();
    core.pointer_down(PointerKind::Mouse, PointerButton::Primary, grab, 4000.0);
    core.pointer_move(Vec2::new(grab.x, grab.y - 400.0), 4016.0);
    core.pointer_down(PointerKind::Mouse, PointerButton::Primary, Vec2::zero(), 5000.0);
    assert!(matches!(core.motion(), Motion::Falling(_)));
    core.pointer_up(Vec2::zero(), 5010.0);

    run_until(&mut core, 5010.0, 20_000.0, |c| c.motion().is_resting());
    assert_eq!(core.position().y, 930.0);
    assert!(!core.state().is_dragging);
}

#[test]
fn resize_keeps_a_grounded_pet_on_the_floor() {
    let mut core = settled();
    drag(&mut core, &[(-200.0, 0.0), (-400.0, 0.0)], 4000.0, 200.0);
    assert!(core.motion().is_resting());
    assert_eq!(core.position(), Vec2::new(1370.0, 930.0));

    core.resize(Size::new(1280.0, 720.0), PET);
    assert_eq!(core.bounds().floor, 570.0);
    assert_eq!(core.position(), Vec2::new(1160.0, 570.0));
    assert_eq!(core.free_position(), Some(core.position()));

    core.resize(VIEWPORT, PET);
    assert_eq!(core.position(), Vec2::new(1160.0, 930.0));
}

#[test]
fn resize_mid_fall_lands_on_the_new_floor() {
    let mut core = settled();
    core.pos = Vec2::new(1700.0, 100.0);
    let released = drag(&mut core, &[(0.0, 10.0), (0.0, 20.0)], 4000.0, 8.0);
    assert!(matches!(core.motion(), Motion::Falling(_)));

    core.resize(Size::new(1280.0, 720.0), PET);
    assert_eq!(core.position().x, 1160.0);
    run_until(&mut core, released, released + 20_000.0, |c| {
        assert!(c.position().x <= 1160.0, "{:?}", c.position());
        c.motion().is_resting()
    });
    assert_eq!(core.position().y, 570.0);
}

#[test]
fn resize_mid_walk_keeps_the_pet_on_screen() {
    let mut core = settled();
    core.perform(Action::Activity(ActivityKind::Toast), 3100.0);
    core.tick(3116.0);
    assert!(matches!(core.motion(), Motion::Walking(_)));

    core.resize(Size::new(1280.0, 720.0), PET);
    run_until(&mut core, 3116.0, 40_000.0, |c| {
        let p = c.position();
        assert!(p.x >= 0.0 && p.x <= 1160.0 && p.y >= 0.0 && p.y <= 570.0, "{:?}", p);
        !c.state().is_busy
    });
}

#[test]
fn disabling_physics_mid_fall_snaps_to_rest() {
    let mut core = settled();
    core.pos = Vec2::new(500.0, 200.0);
    let released = drag(&mut core, &[(0.0, 30.0), (0.0, 60.0)], 4000.0, 8.0);
    assert!(matches!(core.motion(), Motion::Falling(_)));

    let mut settings = core.settings().clone();
    settings.physics_enabled = false;
    core.apply_settings(SettingsUpdate { name: "Toasty".into(), settings }, released + 16.0);
    assert!(core.motion().is_resting());
}

// === Clicks and sleep ===

#[test]
fn click_makes_happy_and_double_click_cycles_topping() {
    let mut core = settled();
    core.click(3100.0);
    assert_eq!(core.state().current, PetStateKind::Happy);
    assert!(core.speech_text().is_some());

    core.double_click(3200.0);
    assert_eq!(core.state().topping, Topping::Butter);
    assert_eq!(core.view().topping, Topping::Butter);
}

#[test]
fn click_while_sleeping_only_wakes() {
    let mut core = settled();
    assert_eq!(core.perform(Action::Sleep, 3100.0), ActionOutcome::Done);
    assert!(core.state().is_sleeping());
    assert_eq!(core.view().eyes, Vec2::zero());

    let before = core.view().states().len();
    core.click(5000.0);
    assert_eq!(core.state().current, PetStateKind::Idle);
    assert!(!core.view().states()[before..].contains(&PetStateKind::Happy));
}

#[test]
fn sleeping_recovers_energy() {
    let mut core = settled();
    core.state.energy = crate::domain::state::Gauge::new(50);
    core.perform(Action::Sleep, 3100.0);
    core.tick(13_100.0);
    core.tick(23_100.0);
    assert_eq!(core.state().energy.value(), 60);

    core.perform(Action::Sleep, 24_000.0);
    assert!(!core.state().is_sleeping());
    assert!(!core.timers().is_pending(&PetTimer::SleepRecover));
}

#[test]
fn long_press_opens_menu_and_eats_click() {
    let mut core = settled();
    let center = core.pet_rect().center();
    core.pointer_down(PointerKind::Touch, PointerButton::Primary, center, 4000.0);
    core.tick(4700.0);
    assert!(core.state().menu_open);

    core.pointer_up(center, 4750.0);
    core.click(4760.0);
    assert_ne!(core.state().current, PetStateKind::Happy);
}

// === Timers and states ===

#[test]
fn transient_states_return_to_idle() {
    let mut core = settled();
    let mut now = 4000.0;
    for state in [
        PetStateKind::Happy,
        PetStateKind::Surprised,
        PetStateKind::Thinking,
        PetStateKind::Waving,
        PetStateKind::Worried,
    ] {
        assert!(core.express(state, now), "{:?}", state);
        assert_eq!(core.state().current, state);
        now += state.dwell_ms().unwrap_or(0.0);
        core.tick(now);
        assert_eq!(core.state().current, PetStateKind::Idle, "{:?} stuck", state);
        now += 10.0;
    }
}

#[test]
fn activity_states_cannot_be_forced() {
    let mut core = settled();
    assert!(!core.express(PetStateKind::Bathing, 4000.0));
    assert_eq!(core.state().current, PetStateKind::Idle);
}

#[test]
fn newer_speech_supersedes_pending_hide() {
    let mut core = settled();
    core.say("first", Some(1000.0), 5000.0);
    core.say("second", Some(3000.0), 5500.0);
    core.tick(6100.0);
    assert_eq!(core.view().bubble.as_deref(), Some("second"));
    core.tick(8600.0);
    assert_eq!(core.view().bubble, None);
    assert!(!core.say("   ", None, 9000.0));
}

#[test]
fn idle_timeout_starts_exactly_one_activity() {
    let mut core = settled();
    // medium frequency: 45 s after the last arm at login
    core.tick(44_000.0);
    assert!(!core.state().is_busy);
    core.tick(45_000.0);
    assert!(core.state().is_busy);
    let kind = core.current_activity();
    assert!(kind.is_some());

    assert!(!core.try_autonomous_activity(45_001.0));
    assert_eq!(core.current_activity(), kind);
    assert!(!core.timers().is_pending(&PetTimer::IdleActivity));
}

#[test]
fn interaction_defers_idle_activity() {
    let mut core = settled();
    core.click(40_000.0);
    core.tick(45_000.0);
    assert!(!core.state().is_busy);
}

#[test]
fn auto_activity_off_never_starts_on_its_own() {
    let mut core = settled();
    core.settings.auto_activity = false;
    core.tick(50_000.0);
    assert!(!core.state().is_busy);
    assert!(core.timers().is_pending(&PetTimer::IdleActivity));
}

#[test]
fn low_energy_makes_the_pet_doze_off() {
    let mut core = settled();
    core.state.energy = crate::domain::state::Gauge::new(21);
    core.settings.auto_activity = false;
    // status decay at 60 s drops below the threshold, sleep follows 3 s later
    core.tick(60_000.0);
    assert_eq!(core.state().energy.value(), 19);
    core.tick(63_000.0);
    assert!(core.state().is_sleeping());
}

// === Activities ===

#[test]
fn fruit_chain_runs_to_completion_and_releases_busy() {
    let mut core = settled();
    let home = core.position();
    core.state.topping = Topping::Jam;
    assert_eq!(core.perform(Action::Activity(ActivityKind::PickFruit), 3100.0), ActionOutcome::Done);

    run_until(&mut core, 3100.0, 80_000.0, |c| !c.state().is_busy);

    let calls = &core.view().calls;
    assert!(calls.contains(&ViewCall::SceneVisible(SceneId::Bush, true)));
    assert!(calls.contains(&ViewCall::SceneVisible(SceneId::Bathtub, true)));
    assert!(calls.contains(&ViewCall::Flag(VisualFlag::HidingAtEdge, true)));
    assert!(calls.iter().any(|c| matches!(c, ViewCall::Held(Some(_)))));

    assert_eq!(core.current_activity(), None);
    assert_eq!(core.state().current, PetStateKind::Idle);
    assert_eq!(core.state().holding, None);
    assert_eq!(core.state().topping, Topping::None);
    assert!(!core.state().is_hiding_at_edge);
    assert!(core.view().visible_scenes.is_empty());
    assert!(core.motion().is_resting());
    assert!((core.position() - home).length() < 1e-6);
    assert!(core.timers().is_pending(&PetTimer::IdleActivity));
}

#[test]
fn toasting_a_full_pet_burns_it_briefly() {
    let mut core = settled();
    core.perform(Action::Activity(ActivityKind::Toast), 3100.0);
    let done = run_until(&mut core, 3100.0, 60_000.0, |c| !c.state().is_busy);

    assert!(core.view().calls.contains(&ViewCall::Flag(VisualFlag::Burnt, true)));
    assert_eq!(core.state().energy.value(), 100);

    core.tick(done + 9000.0);
    assert!(!core.state().is_burnt);
    assert!(!core.view().has_flag(VisualFlag::Burnt));
}

#[test]
fn toasting_a_tired_pet_adds_a_spread() {
    let mut core = settled();
    core.state.energy = crate::domain::state::Gauge::new(30);
    core.perform(Action::Activity(ActivityKind::Toast), 3100.0);
    run_until(&mut core, 3100.0, 60_000.0, |c| !c.state().is_busy);

    assert_eq!(core.state().energy.value(), 65);
    assert!(!core.state().is_burnt);
    assert!(Topping::SPREADS.contains(&core.state().topping));
}

#[test]
fn menu_activity_wakes_a_sleeper_and_ignores_while_busy() {
    let mut core = settled();
    core.perform(Action::Sleep, 3100.0);
    assert_eq!(core.perform(Action::Activity(ActivityKind::Bathe), 3200.0), ActionOutcome::Done);
    assert!(!core.state().is_sleeping());
    assert_eq!(core.current_activity(), Some(ActivityKind::Bathe));

    assert_eq!(core.perform(Action::Activity(ActivityKind::Toast), 3300.0), ActionOutcome::Ignored);
    assert_eq!(core.current_activity(), Some(ActivityKind::Bathe));
}

// === Actions ===

#[test]
fn unknown_action_warns_and_changes_nothing() {
    let mut core = settled();
    let _ = take_captured();
    let writes = core.store().writes;

    assert_eq!(core.perform_action("dance", 4000.0), ActionOutcome::Ignored);

    let logs = take_captured();
    assert!(logs.iter().any(|(lvl, msg)| *lvl == LogLevel::Warn && msg.contains("dance")));
    assert_eq!(core.state().current, PetStateKind::Idle);
    assert_eq!(core.store().writes, writes);
}

#[test]
fn failed_summary_apologises() {
    let mut core = settled();
    assert_eq!(core.perform_action("summary", 4000.0), ActionOutcome::FetchSummary);
    assert_eq!(core.state().current, PetStateKind::Thinking);

    core.deliver_summary(Err("network down".into()), 4300.0);
    core.tick(6300.0);
    assert!(core.view().bubble.as_deref().unwrap_or("").starts_with("Sorry"));
    assert_eq!(core.state().current, PetStateKind::Idle);
}

#[test]
fn summary_reveals_counts() {
    let mut core = settled();
    core.perform_action("summary", 4000.0);
    let counts = SummaryCounts { classrooms: 12, courses: 30, schedules: 40, available_classrooms: 5 };
    core.deliver_summary(Ok(counts), 4100.0);
    core.tick(6100.0);
    let bubble = core.view().bubble.clone().unwrap_or_default();
    assert!(bubble.contains("Classrooms 12"));
    assert!(bubble.contains("Available now 5"));
}

#[test]
fn remind_uses_the_local_hour() {
    let mut core = settled();
    core.perform(Action::Remind, 4000.0);
    assert_eq!(
        core.view().bubble.as_deref(),
        Some("⏰ Morning work time, you got this!")
    );
}

#[test]
fn settings_action_fills_the_form() {
    let mut core = settled();
    assert_eq!(core.perform_action("settings", 4000.0), ActionOutcome::OpenSettings);
    assert_eq!(core.view().settings_opened, 1);
}

#[test]
fn notifications_map_to_reactions() {
    let mut core = settled();

    assert!(core.notify("Deleted", "danger", 4000.0));
    assert_eq!(core.state().current, PetStateKind::Surprised);
    assert_eq!(core.state().mood.value(), 97);
    core.tick(7000.0);
    assert_eq!(core.state().current, PetStateKind::Idle);

    assert!(core.notify("Saved", "success", 8000.0));
    assert_eq!(core.state().current, PetStateKind::Happy);
    assert_eq!(core.state().mood.value(), 100);

    assert!(core.notify("New notice", "info", 12_000.0));
    assert!(core.view().has_flag(VisualFlag::StatusIndicator));
    core.tick(15_000.0);
    assert!(!core.view().has_flag(VisualFlag::StatusIndicator));

    core.settings.notify_enabled = false;
    assert!(!core.notify("ignored", "warning", 16_000.0));
    assert_ne!(core.state().current, PetStateKind::Thinking);
}

#[test]
fn notification_wakes_a_sleeping_pet() {
    let mut core = settled();
    core.perform(Action::Sleep, 3100.0);
    core.notify("Heads up", "warning", 5000.0);
    assert_eq!(core.state().current, PetStateKind::Thinking);
}

#[test]
fn busy_pet_only_speaks_on_notification() {
    let mut core = settled();
    core.perform(Action::Activity(ActivityKind::Bathe), 3100.0);
    let state = core.state().current;
    assert!(core.notify("Saved", "success", 3200.0));
    assert_eq!(core.state().current, state);
    assert!(core.view().bubble.is_some());
}

#[test]
fn saving_settings_renames_and_reanchors() {
    let mut core = settled();
    let mut settings = core.settings().clone();
    settings.position = PositionPreset::TopLeft;
    core.apply_settings(SettingsUpdate { name: "  Crumb ".into(), settings }, 4000.0);

    assert_eq!(core.state().name, "Crumb");
    assert_eq!(core.position(), Vec2::new(30.0, 100.0));
    assert_eq!(core.state().current, PetStateKind::Happy);
    assert!(core.view().bubble.as_deref().unwrap_or("").contains("Crumb"));

    let saved = core.store().entries.get(STATE_KEY).cloned().unwrap_or_default();
    assert!(saved.contains("\"name\":\"Crumb\""));
    assert!(saved.contains("\"position\":\"top-left\""));

    core.apply_settings(SettingsUpdate { name: "   ".into(), settings: core.settings().clone() }, 5000.0);
    assert_eq!(core.state().name, "Toasty");
}

// === Persistence and lifecycle ===

#[test]
fn saved_record_survives_a_reload() {
    let mut core = settled();
    core.double_click(3100.0);
    core.double_click(3200.0);
    assert_eq!(core.state().topping, Topping::Jam);

    let reloaded = mounted(core.store().clone());
    assert_eq!(reloaded.state().topping, Topping::Jam);
    assert_eq!(reloaded.view().topping, Topping::Jam);
}

#[test]
fn legacy_settings_migrate_once() {
    let legacy = r#"{"name":"Bread","happiness":42,"energy":70,
        "position":{"x":100,"y":200},
        "settings":{"position":"top-left","interactionFreq":"low","soundEnabled":true,"notifyEnabled":false,"autoSleep":false}}"#;
    let core = mounted(MemoryStore::with_entry(LEGACY_KEY, legacy));

    assert_eq!(core.state().name, "Bread");
    assert_eq!(core.state().mood.value(), 42);
    assert_eq!(core.state().energy.value(), 70);
    assert_eq!(core.settings().position, PositionPreset::TopLeft);
    assert!(!core.settings().notify_enabled);
    assert_eq!(core.position(), Vec2::new(100.0, 200.0));
    assert!(core.store().entries.contains_key(STATE_KEY));
    assert!(!core.store().entries.contains_key(LEGACY_KEY));
}

#[test]
fn unreadable_or_future_records_fall_back_to_defaults() {
    let core = mounted(MemoryStore::with_entry(STATE_KEY, "{not json"));
    assert_eq!(core.state().name, "Toasty");

    let _ = take_captured();
    let core = mounted(MemoryStore::with_entry(STATE_KEY, r#"{"version":9,"name":"Future"}"#));
    assert_eq!(core.state().name, "Toasty");
    assert!(take_captured().iter().any(|(lvl, _)| *lvl == LogLevel::Warn));
}

#[test]
fn newer_record_is_never_overwritten() {
    let future = r#"{"version":9,"name":"Future","topping":"jam"}"#;
    let mut core = mounted(MemoryStore::with_entry(STATE_KEY, future));
    core.set_logged_in(true, 0.0);
    core.tick(3000.0);
    core.double_click(3100.0);
    core.perform(Action::Encourage, 3200.0);
    core.set_logged_in(false, 4000.0);

    assert_eq!(core.state().topping, Topping::Butter);
    assert_eq!(core.store().writes, 0);
    assert_eq!(core.store().entries.get(STATE_KEY).map(String::as_str), Some(future));
}

#[test]
fn storage_failures_are_reported_once() {
    let mut store = MemoryStore::new();
    store.fail_writes = true;
    let mut core = mounted(store);
    core.set_logged_in(true, 0.0);
    let _ = take_captured();

    core.double_click(100.0);
    core.double_click(200.0);
    let warnings = take_captured().into_iter().filter(|(lvl, _)| *lvl == LogLevel::Warn).count();
    assert_eq!(warnings, 1);
    assert_eq!(core.state().topping, Topping::Jam);
}

#[test]
fn missing_bubble_degrades_to_silence() {
    let mut core = settled();
    core.tick(5000.0);
    assert!(core.view().bubble.is_none());
    core.view_mut().missing.insert("bubble");
    core.click(5100.0);
    assert_eq!(core.state().current, PetStateKind::Happy);
    assert!(core.view().bubble.is_none());
}

#[test]
fn logout_hides_and_clears_everything() {
    let mut core = settled();
    core.perform(Action::Activity(ActivityKind::PickFruit), 3100.0);
    run_until(&mut core, 3100.0, 30_000.0, |c| c.state().holding.is_some());

    core.set_logged_in(false, 30_000.0);
    assert!(!core.state().visible);
    assert!(!core.view().visible);
    assert!(!core.state().is_busy);
    assert_eq!(core.state().holding, None);
    assert!(core.timers().is_empty());
    assert!(core.view().visible_scenes.is_empty());
    assert!(core.view().bubble.is_none());

    // Input is ignored while hidden
    core.click(31_000.0);
    assert_eq!(core.state().current, PetStateKind::Idle);
}

#[test]
fn ignores_input_before_login() {
    let mut core = mounted(MemoryStore::new());
    core.click(10.0);
    assert_eq!(core.perform_action("greet", 20.0), ActionOutcome::Ignored);
    assert_eq!(core.state().current, PetStateKind::Idle);
    assert!(core.timers().is_empty());
}

#[test]
fn tick_reports_frames_and_deadlines() {
    let mut core = settled();
    let report = core.tick(3100.0);
    assert!(!report.needs_frame);
    assert!(report.next_deadline.is_some());

    core.perform(Action::Activity(ActivityKind::Toast), 3200.0);
    assert!(core.tick(3216.0).needs_frame);
}
