//! src/main.rs
//! Employee management console: wires config, logging, backend client,
//! controller and renderer together and drives the event loop.

use std::{
    io::{self, Stdout},
    panic::PanicHookInfo,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossterm::{
    event::{Event as TerminalEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use tokio::{
    signal,
    sync::{Notify, mpsc},
};
use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use staffdesk_core::{
    Logger,
    api::{EmployeeApi, HttpEmployeeApi},
    config::Config,
    controller::{
        Action, Controller, KeyMap,
        event_loop::{EventLoop, LoopEvent, TaskResult},
    },
    model::{app_state::AppState, pager::Pager, ui_state::RedrawFlag},
    view::ui::UIRenderer,
};

type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

const TICK_RATE: Duration = Duration::from_millis(250);
const METRICS_INTERVAL: Duration = Duration::from_secs(30);

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> Result<()> {
    setup_panic_handler();

    let app = App::new()
        .await
        .context("Failed to initialize application")?;
    app.run().await.context("Application runtime error")?;

    info!("Application exited cleanly");
    Ok(())
}

struct App {
    terminal: AppTerminal,
    event_loop: EventLoop,
    controller: Controller,
    key_map: KeyMap,
    ui_renderer: UIRenderer,
    shutdown: Arc<Notify>,
    last_metrics_log: Instant,
    _log_guard: Option<WorkerGuard>,
}

impl App {
    async fn new() -> Result<Self> {
        let config = Config::load().await.unwrap_or_else(|e| {
            eprintln!("Failed to load config, using defaults: {e}");
            Config::default()
        });

        // A broken log setup should not keep the console from starting.
        let log_guard = match Logger::init_tracing(&config.logging) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("Logging disabled: {e}");
                None
            }
        };
        info!("Starting employee management console");
        debug!(?config, "Effective configuration");

        let api: Arc<dyn EmployeeApi> = Arc::new(
            HttpEmployeeApi::new(config.api.base_url.clone(), config.api.request_timeout)
                .context("Failed to build HTTP client")?,
        );
        info!(base_url = %config.api.base_url, "Backend client ready");

        let (task_tx, task_rx) = mpsc::unbounded_channel::<TaskResult>();
        let state = AppState::new(Pager::new(config.list.page_size));
        let mut controller = Controller::new(state, api, task_tx);

        let terminal = setup_terminal().context("Failed to initialize terminal")?;
        let event_loop = EventLoop::new(task_rx, TICK_RATE);

        controller.fetch_all();
        info!("Application initialized successfully");

        Ok(Self {
            terminal,
            event_loop,
            controller,
            key_map: KeyMap::new(),
            ui_renderer: UIRenderer::new(),
            shutdown: Arc::new(Notify::new()),
            last_metrics_log: Instant::now(),
            _log_guard: log_guard,
        })
    }

    async fn run(mut self) -> Result<()> {
        self.setup_shutdown_handler();
        info!("Starting event loop");

        loop {
            self.render()?;
            self.log_metrics_if_due();

            let event = tokio::select! {
                _ = self.shutdown.notified() => {
                    info!("Shutdown signal received");
                    break;
                }
                event = self.event_loop.next_event() => event,
            };

            if !self.handle_event(event) {
                break;
            }
        }

        info!(
            events = self.event_loop.event_count(),
            frames = self.ui_renderer.stats().frames,
            "Event loop terminated cleanly"
        );
        Ok(())
    }

    /// Returns `false` when the loop should stop.
    fn handle_event(&mut self, event: LoopEvent) -> bool {
        match event {
            LoopEvent::Terminal(TerminalEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                let Some(action) = self.key_map.map(self.controller.state(), key) else {
                    return true;
                };
                let keep_running = self.controller.handle(action);
                self.controller.state().ui.request_redraw(RedrawFlag::All);
                keep_running
            }
            LoopEvent::Terminal(TerminalEvent::Resize(w, h)) => {
                self.controller.handle(Action::Resize(w, h))
            }
            LoopEvent::Terminal(_) => true,
            LoopEvent::Task(result) => {
                self.controller.on_task_result(result);
                self.controller.state().ui.request_redraw(RedrawFlag::All);
                true
            }
            LoopEvent::Tick => self.controller.handle(Action::Tick),
            LoopEvent::Closed => {
                warn!("Event sources closed");
                false
            }
        }
    }

    fn render(&mut self) -> Result<()> {
        let state = self.controller.state();
        if !state.ui.needs_redraw() {
            return Ok(());
        }

        let start = Instant::now();
        let renderer = &mut self.ui_renderer;
        self.terminal
            .draw(|frame: &mut Frame<'_>| renderer.render(frame, state))
            .context("Failed to draw terminal")?;
        state.ui.clear_redraw();

        let duration = start.elapsed();
        if duration.as_millis() > 16 {
            warn!("Slow render: {}ms (target: <16ms)", duration.as_millis());
        }
        Ok(())
    }

    fn log_metrics_if_due(&mut self) {
        if self.last_metrics_log.elapsed() < METRICS_INTERVAL {
            return;
        }
        self.last_metrics_log = Instant::now();

        let stats = self.ui_renderer.stats();
        info!(
            "Performance: Events: {}, FPS: {:.1}, Slow frames: {}, In flight: {}",
            self.event_loop.event_count(),
            stats.fps(),
            stats.slow,
            self.controller.state().in_flight
        );
    }

    fn setup_shutdown_handler(&self) {
        let shutdown: Arc<Notify> = self.shutdown.clone();

        tokio::spawn(async move {
            #[cfg(unix)]
            {
                use tokio::signal::unix::{SignalKind, signal};

                let (Ok(mut sigterm), Ok(mut sigint)) = (
                    signal(SignalKind::terminate()),
                    signal(SignalKind::interrupt()),
                ) else {
                    warn!("Failed to install signal handlers");
                    return;
                };

                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM"),
                    _ = sigint.recv() => info!("Received SIGINT"),
                    _ = signal::ctrl_c() => info!("Received Ctrl+C"),
                }
            }

            #[cfg(not(unix))]
            {
                if let Err(e) = signal::ctrl_c().await {
                    warn!("Failed to listen for Ctrl+C: {}", e);
                    return;
                }
                info!("Received Ctrl+C");
            }

            shutdown.notify_one();
        });
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Err(e) = cleanup_terminal(&mut self.terminal) {
            warn!("Failed to cleanup terminal: {}", e);
        }
    }
}

fn setup_terminal() -> Result<AppTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    info!("Terminal setup complete");
    Ok(terminal)
}

fn cleanup_terminal(terminal: &mut AppTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!("Terminal cleanup complete");
    Ok(())
}

fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);

        error!("Application panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}
