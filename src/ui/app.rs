//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::ui::dashboard::{DashboardState, UserAction, handle_key, render_dashboard};
use crate::ui::splash::render_splash;
use crate::workers::{ActionRunner, Refresher};
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub poll_interval: Duration,
}

impl UIConfig {
    pub fn new(with_background_color: bool, poll_interval: Duration) -> Self {
        Self {
            with_background_color,
            poll_interval,
        }
    }
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Dashboard screen with the customer table.
    Dashboard(Box<DashboardState>),
}

/// Application state
pub struct App {
    /// The start time of the application, used for computing uptime.
    start_time: Instant,

    /// The backend the dashboard talks to.
    environment: Environment,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Receives events from worker tasks.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// Events received before the dashboard existed.
    early_events: Vec<WorkerEvent>,

    /// Broadcasts shutdown signal to worker tasks.
    shutdown_sender: broadcast::Sender<()>,

    /// Starts on-demand refreshes.
    refresher: Refresher,

    /// Places calls and sends customer mutations.
    actions: ActionRunner,

    ui_config: UIConfig,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        environment: Environment,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        shutdown_sender: broadcast::Sender<()>,
        refresher: Refresher,
        actions: ActionRunner,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            start_time: Instant::now(),
            environment,
            current_screen: Screen::Splash,
            event_receiver,
            early_events: Vec::new(),
            shutdown_sender,
            refresher,
            actions,
            ui_config,
        }
    }

    fn enter_dashboard(&mut self) {
        let mut state = DashboardState::new(
            self.environment.clone(),
            self.start_time,
            self.ui_config.clone(),
        );
        for event in self.early_events.drain(..) {
            state.add_event(event);
        }
        self.current_screen = Screen::Dashboard(Box::new(state));
    }

    /// Dispatch a dashboard action. Returns `false` when the app should exit.
    fn dispatch(&self, action: UserAction) -> bool {
        match action {
            UserAction::Quit => {
                let _ = self.shutdown_sender.send(());
                return false;
            }
            UserAction::Refresh => {
                self.refresher.spawn_refresh();
            }
            UserAction::Call {
                customer_id,
                request,
            } => {
                self.actions.spawn_call(customer_id, request);
            }
            UserAction::Mutate {
                submission,
                mutation,
            } => {
                self.actions.spawn_mutation(submission, mutation);
            }
        }
        true
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_secs(2);
    let mut shutdown_receiver = app.shutdown_sender.subscribe();

    // UI event loop
    loop {
        // Shutdown requested elsewhere (e.g. Ctrl+C handler)
        if shutdown_receiver.try_recv().is_ok() {
            return Ok(());
        }

        // Queue all incoming events for processing
        while let Ok(event) = app.event_receiver.try_recv() {
            match &mut app.current_screen {
                Screen::Dashboard(state) => state.add_event(event),
                Screen::Splash => app.early_events.push(event),
            }
        }

        if let Screen::Dashboard(state) = &mut app.current_screen {
            state.update();
        }
        let api_url = app.environment.api_url();
        terminal.draw(|f| render(f, &app.current_screen, &api_url))?;

        // Handle splash-to-dashboard transition
        if let Screen::Splash = app.current_screen {
            if splash_start.elapsed() >= splash_duration {
                app.enter_dashboard();
                continue;
            }
        }

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                match &mut app.current_screen {
                    Screen::Splash => {
                        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                            let _ = app.shutdown_sender.send(());
                            return Ok(());
                        }
                        // Any other key skips the splash screen
                        app.enter_dashboard();
                    }
                    Screen::Dashboard(state) => {
                        if let Some(action) = handle_key(state, key) {
                            if !app.dispatch(action) {
                                return Ok(());
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen, api_url: &str) {
    match screen {
        Screen::Splash => render_splash(f, api_url),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}
