use std::sync::Arc;
use std::time::Duration;

use dioxus::core::{NoOpMutations, schedule_update};
use dioxus::prelude::*;
use services::{
    FeedbackDelays, ScriptedQuestionSource, SessionController, StreakService,
};
use storage::repository::InMemoryStreakStore;
use trivia_core::model::{Screen, SessionState};

use super::trivia::{answer, start_session};
use crate::context::{AppContext, UiApp, build_app_context};
use crate::views::TriviaView;
use crate::vm::ViewModelPresenter;

#[derive(Clone)]
struct TestApp {
    controller: Arc<SessionController>,
    presenter: Arc<ViewModelPresenter>,
}

impl UiApp for TestApp {
    fn session_controller(&self) -> Arc<SessionController> {
        Arc::clone(&self.controller)
    }

    fn presenter(&self) -> Arc<ViewModelPresenter> {
        Arc::clone(&self.presenter)
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { TriviaView {} }
}

/// Plays through the click helpers. Each helper runs from a child that only
/// exists while its screen is showing, like the real buttons.
#[component]
fn ClickDriverRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    let presenter = props.app.presenter();
    use_hook(|| presenter.attach_refresh(schedule_update()));

    let vm = presenter.snapshot();
    let show_start = vm.screen == Screen::Start && vm.notice.is_none();
    let answer_at = vm
        .question
        .as_ref()
        .filter(|_| {
            vm.screen == Screen::Question && !vm.choices_disabled && vm.scores.current() == 0
        })
        .and_then(|question| question.choices.iter().position(|choice| choice == "Paris"));

    rsx! {
        if show_start {
            StartClicker {}
        }
        if let Some(index) = answer_at {
            AnswerClicker { index }
        }
    }
}

#[component]
fn StartClicker() -> Element {
    let ctx = use_context::<AppContext>();
    use_hook(|| start_session(ctx.session_controller()));
    rsx! { button { "Start Game" } }
}

#[component]
fn AnswerClicker(index: usize) -> Element {
    let ctx = use_context::<AppContext>();
    use_hook(|| answer(ctx.session_controller(), index));
    rsx! { button { "Paris" } }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub controller: Arc<SessionController>,
    pub presenter: Arc<ViewModelPresenter>,
    pub source: Arc<ScriptedQuestionSource>,
    pub store: InMemoryStreakStore,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    /// Poll spawned tasks and re-render until `done` holds for the session state.
    pub async fn drive_until(&mut self, done: impl Fn(&SessionState) -> bool) -> bool {
        for _ in 0..100 {
            if done(&self.controller.state()) {
                return true;
            }
            let _ = tokio::time::timeout(Duration::from_millis(20), self.dom.wait_for_work()).await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
        done(&self.controller.state())
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(store: InMemoryStreakStore) -> ViewHarness {
    build_harness(store, ViewHarnessRoot)
}

pub fn setup_click_harness(store: InMemoryStreakStore) -> ViewHarness {
    build_harness(store, ClickDriverRoot)
}

fn build_harness(
    store: InMemoryStreakStore,
    root: fn(ViewHarnessProps) -> Element,
) -> ViewHarness {
    let presenter = Arc::new(ViewModelPresenter::new());
    let source = Arc::new(ScriptedQuestionSource::new());
    let controller = Arc::new(
        SessionController::new(
            source.clone(),
            StreakService::new(Arc::new(store.clone())),
            presenter.clone(),
        )
        .with_delays(FeedbackDelays::immediate())
        .with_seed(3),
    );

    let app = Arc::new(TestApp {
        controller: Arc::clone(&controller),
        presenter: Arc::clone(&presenter),
    });
    let dom = VirtualDom::new_with_props(root, ViewHarnessProps { app });

    ViewHarness {
        dom,
        controller,
        presenter,
        source,
        store,
    }
}
