mod args;

use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, Presenter, QuestionSourceConfig, SessionController};
use tracing::info;
use ui::vm::ViewModelPresenter;
use ui::{App, UiApp, build_app_context};

use crate::args::{Args, Parsed, prepare_sqlite_file, print_usage};

struct DesktopApp {
    controller: Arc<SessionController>,
    presenter: Arc<ViewModelPresenter>,
}

impl UiApp for DesktopApp {
    fn session_controller(&self) -> Arc<SessionController> {
        Arc::clone(&self.controller)
    }

    fn presenter(&self) -> Arc<ViewModelPresenter> {
        Arc::clone(&self.presenter)
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let source = QuestionSourceConfig::from_env()?;
    let parsed = Args::parse(
        std::env::args().skip(1),
        std::env::var("TRIVIA_DB_URL").ok(),
        source,
    )
    .map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let args = match parsed {
        Parsed::Run(args) => args,
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
    };

    // Open + migrate SQLite before the window exists so the best streak is ready.
    prepare_sqlite_file(&args.db_url)?;
    let presenter = Arc::new(ViewModelPresenter::new());
    let port: Arc<dyn Presenter> = presenter.clone();
    let services = AppServices::new_sqlite(&args.db_url, &args.source, port).await?;
    let controller = services.session_controller();
    let streaks = controller.initialize().await;
    info!(
        db = %args.db_url,
        endpoint = %args.source.endpoint,
        best = streaks.best(),
        "trivia ready"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        controller,
        presenter,
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Trivia Streak")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
