use std::time::Duration;

use services::FetchFailure;
use storage::repository::{InMemoryStreakStore, StreakStore};
use trivia_core::model::{BEST_STREAK_KEY, Difficulty, Question, Screen};

use super::test_harness::{setup_click_harness, setup_view_harness};

fn paris() -> Question {
    Question::new(
        "What is the capital of France?",
        "Geography",
        Difficulty::Medium,
        "Paris",
        vec!["London".into(), "Berlin".into(), "Madrid".into()],
    )
    .unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn start_screen_shows_persisted_best() {
    let store = InMemoryStreakStore::new();
    store.set(BEST_STREAK_KEY, "7").await.unwrap();
    let mut harness = setup_view_harness(store);
    harness.controller.initialize().await;

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Start Game"), "missing start button in {html}");
    assert!(html.contains(">7<"), "missing best streak in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn question_screen_renders_choices_and_badge() {
    let mut harness = setup_view_harness(InMemoryStreakStore::new());
    harness.source.push(Ok(paris()));
    harness.controller.initialize().await;
    harness.controller.start_session().await;

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("What is the capital of France?"), "missing text in {html}");
    assert!(html.contains("MEDIUM"), "missing badge in {html}");
    assert!(html.contains("Geography"), "missing category in {html}");
    assert_eq!(html.matches("answer-btn").count(), 4, "expected 4 choices in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn wrong_answer_highlights_both_controls() {
    let mut harness = setup_view_harness(InMemoryStreakStore::new());
    harness.source.push(Ok(paris()));
    harness.controller.initialize().await;
    harness.controller.start_session().await;
    harness.controller.submit_answer("Berlin").await.unwrap();

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Wrong answer!"), "missing feedback in {html}");
    assert!(html.contains("answer-btn incorrect"), "missing incorrect mark in {html}");
    assert!(html.contains("answer-btn correct"), "missing correct mark in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn game_over_screen_shows_final_scores() {
    let mut harness = setup_view_harness(InMemoryStreakStore::new());
    harness.source.push(Ok(paris()));
    harness.source.push(Ok(paris()));
    harness.controller.initialize().await;
    harness.controller.start_session().await;
    let result = harness.controller.submit_answer("Paris").await.unwrap().unwrap();
    harness.controller.run_transition(result.transition).await;
    let result = harness.controller.submit_answer("Madrid").await.unwrap().unwrap();
    harness.controller.run_transition(result.transition).await;

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Game Over"), "missing title in {html}");
    assert!(html.contains("Play Again"), "missing restart in {html}");
    assert!(
        html.contains("id=\"final-streak\">1<"),
        "missing final streak in {html}"
    );
    assert_eq!(
        harness.store.get(BEST_STREAK_KEY).await.unwrap().as_deref(),
        Some("1")
    );
}

#[tokio::test(flavor = "current_thread")]
async fn fetch_failure_returns_to_start_with_notice() {
    let mut harness = setup_view_harness(InMemoryStreakStore::new());
    harness.source.push(Err(FetchFailure::ResponseCode(1)));
    harness.controller.initialize().await;
    harness.controller.start_session().await;

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Failed to load question"), "missing notice in {html}");
    assert!(html.contains("Start Game"), "missing start screen in {html}");
    assert!(harness.presenter.snapshot().notice.is_some());
}

#[tokio::test(flavor = "current_thread")]
async fn click_tasks_survive_their_screen_unmounting() {
    let mut harness = setup_click_harness(InMemoryStreakStore::new());
    harness
        .source
        .push_delayed(Ok(paris()), Duration::from_millis(30));
    harness
        .source
        .push_delayed(Ok(paris()), Duration::from_millis(30));
    harness.controller.initialize().await;
    harness.rebuild();

    // Start, load, answer correctly, load the next question.
    let reached = harness
        .drive_until(|state| {
            state.screen() == Screen::Question
                && state.current_streak() == 1
                && !state.is_answering()
        })
        .await;
    assert!(
        reached,
        "stuck on {:?} with streak {}",
        harness.controller.state().screen(),
        harness.controller.state().current_streak()
    );
    assert_eq!(harness.source.remaining(), 0);
    assert_eq!(harness.presenter.snapshot().scores.best(), 1);
    assert_eq!(
        harness.store.get(BEST_STREAK_KEY).await.unwrap().as_deref(),
        Some("1")
    );
}
