use std::sync::Arc;

use dioxus::core::{schedule_update, spawn_forever};
use dioxus::prelude::*;
use tracing::debug;

use services::SessionController;
use trivia_core::model::Screen;

use crate::context::AppContext;
use crate::vm::TriviaVm;

// Session tasks outlive the screen that started them: the first thing they do
// is switch screens, which unmounts the button's component.
pub(super) fn start_session(controller: Arc<SessionController>) {
    spawn_forever(async move {
        controller.start_session().await;
    });
}

pub(super) fn answer(controller: Arc<SessionController>, index: usize) {
    spawn_forever(async move {
        match controller.submit_choice(index).await {
            Ok(Some(result)) => {
                controller.run_transition(result.transition).await;
            }
            Ok(None) => {}
            Err(err) => debug!(error = %err, "ignoring answer"),
        }
    });
}

#[component]
pub fn TriviaView() -> Element {
    let ctx = use_context::<AppContext>();
    let presenter = ctx.presenter();
    use_hook(|| presenter.attach_refresh(schedule_update()));

    let vm = presenter.snapshot();
    let controller = ctx.session_controller();

    rsx! {
        div { class: "container",
            header { class: "header",
                h1 { "Trivia Streak" }
                ScoreBoard { vm: vm.clone() }
            }
            if let Some(notice) = vm.notice.clone() {
                div { class: "notice", role: "alert",
                    p { "{notice}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: {
                            let presenter = ctx.presenter();
                            move |_| presenter.dismiss_notice()
                        },
                        "Dismiss"
                    }
                }
            }
            match vm.screen {
                Screen::Start => rsx! {
                    StartScreen { controller: controller.clone() }
                },
                Screen::Loading => rsx! {
                    div { class: "screen loading-screen",
                        div { class: "spinner" }
                        p { "Loading question..." }
                    }
                },
                Screen::Question => rsx! {
                    QuestionScreen { vm: vm.clone(), controller: controller.clone() }
                },
                Screen::GameOver => rsx! {
                    GameOverScreen { vm: vm.clone(), controller: controller.clone() }
                },
            }
        }
    }
}

#[component]
fn ScoreBoard(vm: TriviaVm) -> Element {
    let current = vm.scores.current();
    let best = vm.scores.best();
    rsx! {
        div { class: "score-board",
            div { class: "score",
                span { class: "score-label", "Current Streak" }
                span { class: "score-value", id: "current-streak", "{current}" }
            }
            div { class: "score",
                span { class: "score-label", "Best Streak" }
                span { class: "score-value", id: "best-streak", "{best}" }
            }
        }
    }
}

#[derive(Props, Clone)]
struct ControllerProps {
    controller: Arc<SessionController>,
}

impl PartialEq for ControllerProps {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.controller, &other.controller)
    }
}

#[component]
fn StartScreen(props: ControllerProps) -> Element {
    let controller = props.controller;
    rsx! {
        div { class: "screen start-screen",
            h2 { "How long can you keep it going?" }
            p { "Answer questions in a row. One wrong answer ends your streak." }
            button {
                class: "btn btn-primary",
                id: "start-btn",
                r#type: "button",
                onclick: move |_| start_session(controller.clone()),
                "Start Game"
            }
        }
    }
}

#[derive(Props, Clone)]
struct ScreenProps {
    vm: TriviaVm,
    controller: Arc<SessionController>,
}

impl PartialEq for ScreenProps {
    fn eq(&self, other: &Self) -> bool {
        self.vm == other.vm && Arc::ptr_eq(&self.controller, &other.controller)
    }
}

#[component]
fn QuestionScreen(props: ScreenProps) -> Element {
    let vm = props.vm;
    let Some(question) = vm.question.clone() else {
        return rsx! {
            div { class: "screen question-screen" }
        };
    };
    let difficulty_class = format!("difficulty {}", question.difficulty.as_str());
    let badge = question.difficulty.badge_label();
    let disabled = vm.choices_disabled;
    let buttons: Vec<(usize, String, String)> = question
        .choices
        .iter()
        .enumerate()
        .map(|(index, choice)| (index, vm.choice_class(index), choice.clone()))
        .collect();
    let feedback = vm
        .feedback
        .map(|feedback| (format!("feedback {}", feedback.css_class()), feedback.message()));

    rsx! {
        div { class: "screen question-screen",
            div { class: "question-meta",
                span { class: "category", "{question.category}" }
                span { class: "{difficulty_class}", "{badge}" }
            }
            h2 { class: "question", "{question.text}" }
            div { class: "answers",
                for (index, class, choice) in buttons {
                    button {
                        key: "{index}",
                        class: "{class}",
                        r#type: "button",
                        disabled,
                        onclick: {
                            let controller = props.controller.clone();
                            move |_| answer(controller.clone(), index)
                        },
                        "{choice}"
                    }
                }
            }
            if let Some((class, message)) = feedback {
                div { class: "{class}", "{message}" }
            }
        }
    }
}

#[component]
fn GameOverScreen(props: ScreenProps) -> Element {
    let final_streak = props.vm.final_scores.current();
    let best = props.vm.final_scores.best();
    let controller = props.controller;
    rsx! {
        div { class: "screen game-over-screen",
            h2 { "Game Over" }
            p { "Your streak: "
                span { id: "final-streak", "{final_streak}" }
            }
            p { "Best streak: "
                span { id: "best-streak-display", "{best}" }
            }
            button {
                class: "btn btn-primary",
                id: "restart-btn",
                r#type: "button",
                onclick: move |_| start_session(controller.clone()),
                "Play Again"
            }
        }
    }
}
