use toast_pet_engine::core::random::Rng;
use toast_pet_engine::domain::geometry::{Size, Vec2};
use toast_pet_engine::domain::topping::Topping;
use toast_pet_engine::host::{MemoryStore, RecordingView};
use toast_pet_engine::{ActionOutcome, EngineConfig, PetCore, PetStateKind};

type Core = PetCore<RecordingView, MemoryStore>;

fn boot(store: MemoryStore) -> Core {
    let mut core = PetCore::with_config(RecordingView::new(), store, EngineConfig::default(), Rng::new(11));
    core.mount();
    core.resize(Size::new(1280.0, 720.0), Size::new(120.0, 120.0));
    core
}

fn frames_until(core: &mut Core, mut now: f64, limit: f64, done: impl Fn(&Core) -> bool) -> f64 {
    while now < limit {
        now += 16.0;
        core.tick(now);
        if done(core) {
            return now;
        }
    }
    panic!("gave up at {}ms", limit);
}

#[test]
fn login_greets_then_settles() {
    let mut core = boot(MemoryStore::new());
    assert!(!core.state().visible);

    core.set_logged_in(true, 0.0);
    assert!(core.state().visible);
    core.tick(1000.0);
    assert_eq!(core.state().current, PetStateKind::Waving);
    assert!(core.speech_text().is_some());

    core.tick(3000.0);
    assert_eq!(core.state().current, PetStateKind::Idle);
}

#[test]
fn bath_walks_out_and_back_home() {
    let mut core = boot(MemoryStore::new());
    core.set_logged_in(true, 0.0);
    core.tick(3000.0);
    core.double_click(3050.0);
    assert_eq!(core.state().topping, Topping::Butter);
    let home = core.position();

    assert_eq!(core.perform_action("bathe", 3100.0), ActionOutcome::Done);
    assert!(core.state().is_busy);
    assert_eq!(core.perform_action("toast", 3200.0), ActionOutcome::Ignored);

    frames_until(&mut core, 3200.0, 60_000.0, |c| !c.state().is_busy);
    assert_eq!(core.state().topping, Topping::None);
    assert!((core.position() - home).length() < 1e-6);
    assert!(core.motion().is_resting());
}

#[test]
fn state_carries_over_to_the_next_page_load() {
    let mut core = boot(MemoryStore::new());
    core.set_logged_in(true, 0.0);
    core.tick(3000.0);
    core.double_click(3100.0);
    core.perform_action("encourage", 3200.0);
    let mood = core.state().mood.value();
    core.set_logged_in(false, 4000.0);

    let reloaded = boot(core.store().clone());
    assert_eq!(reloaded.state().topping, Topping::Butter);
    assert_eq!(reloaded.state().mood.value(), mood);
    assert_eq!(reloaded.position(), core.position());
}

#[test]
fn summary_round_trip_through_the_host() {
    let mut core = boot(MemoryStore::new());
    core.set_logged_in(true, 0.0);
    core.tick(3000.0);

    assert_eq!(core.perform_action("summary", 3100.0), ActionOutcome::FetchSummary);
    assert_eq!(core.state().current, PetStateKind::Thinking);

    let counts = toast_pet_engine::domain::actions::SummaryCounts::from_json(
        r#"{"classrooms":8,"availableClassrooms":2,"courses":14,"schedules":30}"#,
    )
    .unwrap();
    core.deliver_summary(Ok(counts), 3400.0);
    let report = core.tick(5400.0);
    assert!(report.next_deadline.is_some());
    assert!(core.speech_text().unwrap().contains("Classrooms 8"));
    assert_eq!(core.state().current, PetStateKind::Idle);
}

#[test]
fn dropping_from_mid_air_lands_on_the_floor() {
    let mut core = boot(MemoryStore::new());
    core.set_logged_in(true, 0.0);
    core.tick(3000.0);

    let grab = core.pet_rect().center();
    core.pointer_down(
        toast_pet_engine::systems::input::PointerKind::Mouse,
        toast_pet_engine::systems::input::PointerButton::Primary,
        grab,
        4000.0,
    );
    core.pointer_move(Vec2::new(grab.x - 300.0, grab.y - 300.0), 4016.0);
    core.pointer_move(Vec2::new(grab.x - 300.0, grab.y - 300.0), 4300.0);
    core.pointer_up(Vec2::new(grab.x - 300.0, grab.y - 300.0), 4300.0);
    assert!(!core.motion().is_resting());

    frames_until(&mut core, 4300.0, 20_000.0, |c| c.motion().is_resting());
    assert_eq!(core.position().y, core.bounds().floor);
    assert_eq!(core.free_position(), Some(core.position()));
}
