// End-to-end walks through the engine, store and corpus public API.

use std::cell::RefCell;
use std::rc::Rc;

use typi::clock::ManualClock;
use typi::corpus::{FormatterSettings, PracticeText, TextProvider};
use typi::session::{Phase, SessionEngine, SessionMode, SessionSummary};
use typi::storage::MemoryStorage;
use typi::store::ResultStore;

fn engine(text: &str, mode: SessionMode) -> (SessionEngine, ManualClock) {
    let clock = ManualClock::default();
    let engine = SessionEngine::with_clock(PracticeText::new("quotes", text), mode, clock.clone());
    (engine, clock)
}

#[test]
fn exact_untimed_run_is_stored() {
    let (mut engine, clock) = engine("the cat sat", SessionMode::Normal);
    let mut store = ResultStore::load(MemoryStorage::new());

    engine.submit_input("t");
    clock.advance_secs(6.0);
    let summary = engine.submit_input("the cat sat").unwrap();

    assert_eq!(summary.accuracy, 100);
    assert_eq!(summary.error_count, 0);
    assert_eq!(summary.wpm, 22);

    store.append(engine.finish_result().unwrap()).unwrap();
    let stored = &store.results()[0];
    assert_eq!(stored.category, "quotes");
    assert_eq!(stored.elapsed_seconds, 6);
    assert_eq!(store.average_wpm(), 22);
}

#[test]
fn timed_run_with_one_mistake() {
    let (mut engine, clock) = engine("hello", SessionMode::Timed(1));

    assert_eq!(engine.submit_input("hxllo"), None);
    assert!(engine.timer_armed());

    clock.advance_secs(1.0);
    let summary = engine.poll_timer().unwrap();
    assert_eq!(summary.error_count, 1);
    assert_eq!(summary.accuracy, 80);
    assert_eq!(summary.wpm, 60);
    assert!(!engine.timer_armed());
}

#[test]
fn empty_log_aggregates() {
    let store = ResultStore::load(MemoryStorage::new());
    assert_eq!(store.average_wpm(), 0);
    assert_eq!(store.best_accuracy(), 0);
}

#[test]
fn idle_timed_session_runs_out() {
    let (mut engine, clock) = engine("never typed", SessionMode::Timed(15));
    let finished: Rc<RefCell<Vec<SessionSummary>>> = Rc::default();
    let sink = finished.clone();
    engine.on_complete(move |summary| sink.borrow_mut().push(*summary));

    for _ in 0..15 {
        clock.advance_secs(1.0);
        engine.tick();
    }
    engine.tick();

    assert_eq!(engine.phase(), Phase::Completed);
    let finished = finished.borrow();
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].wpm, 0);
    assert_eq!(finished[0].accuracy, 100);
    assert_eq!(finished[0].error_count, 0);
    assert_eq!(finished[0].elapsed_secs, 15.0);
}

#[test]
fn number_texts_are_digit_groups() {
    let provider = TextProvider::new(FormatterSettings::default()).unwrap();
    for _ in 0..2 {
        let text = provider.get_text("numbers");
        assert_eq!(text.category, "numbers");
        assert!(!text.text.is_empty());
        assert!(text
            .text
            .split(' ')
            .all(|group| !group.is_empty() && group.chars().all(|c| c.is_ascii_digit())));
    }
}
