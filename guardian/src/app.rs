//! Application state for the TUI.

mod assistant;
mod log_form;
mod meal;

pub use assistant::AssistantState;
pub use log_form::{FormField, LogForm};
pub use meal::MealState;

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use guardian_core::{DashboardSnapshot, HealthGateway, HealthRecordStore, Measurement};

use crate::worker::{GatewayReply, GatewayRequest, GatewayWorker};

/// Top-level views, in tab order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppView {
    #[default]
    Dashboard,
    LogData,
    MealAnalyzer,
    HealthAssistant,
}

impl AppView {
    pub const ALL: [AppView; 4] = [
        AppView::Dashboard,
        AppView::LogData,
        AppView::MealAnalyzer,
        AppView::HealthAssistant,
    ];

    /// Label shown in the tab bar.
    pub fn tab_label(&self) -> &'static str {
        match self {
            AppView::Dashboard => "Dashboard",
            AppView::LogData => "Log Data",
            AppView::MealAnalyzer => "Meal AI",
            AppView::HealthAssistant => "Assistant",
        }
    }

    fn index(&self) -> usize {
        match self {
            AppView::Dashboard => 0,
            AppView::LogData => 1,
            AppView::MealAnalyzer => 2,
            AppView::HealthAssistant => 3,
        }
    }

    pub fn next(&self) -> AppView {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> AppView {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Main application state.
pub struct App {
    /// Active view
    pub view: AppView,
    /// All readings, newest first
    store: HealthRecordStore,
    /// Dashboard projection, rebuilt on every append
    pub dashboard: DashboardSnapshot,
    /// Log Data form input
    pub log_form: LogForm,
    /// Meal analyzer state (result and busy flag survive navigation)
    pub meal: MealState,
    /// Health assistant state
    pub assistant: AssistantState,
    /// Runs gateway calls off the UI thread
    worker: GatewayWorker,
    /// Animation frame counter (increments each render)
    pub animation_frame: u64,
    /// Whether the app should exit
    pub should_quit: bool,
}

impl App {
    /// Create a new App over a store and a gateway.
    pub fn new(store: HealthRecordStore, gateway: Arc<dyn HealthGateway>) -> Self {
        Self::with_worker(store, GatewayWorker::new(gateway))
    }

    fn with_worker(store: HealthRecordStore, worker: GatewayWorker) -> Self {
        let dashboard = DashboardSnapshot::from_store(&store);
        Self {
            view: AppView::default(),
            store,
            dashboard,
            log_form: LogForm::default(),
            meal: MealState::default(),
            assistant: AssistantState::default(),
            worker,
            animation_frame: 0,
            should_quit: false,
        }
    }

    /// Read-only access to the store.
    pub fn store(&self) -> &HealthRecordStore {
        &self.store
    }

    /// Tick the animation state (call each frame).
    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    /// Switch views, running the enter/leave hooks of each.
    pub fn navigate(&mut self, to: AppView) {
        if to == self.view {
            return;
        }
        tracing::debug!(from = ?self.view, to = ?to, "Navigating");

        if self.view == AppView::HealthAssistant {
            self.assistant.end_view_session();
        }

        match to {
            AppView::LogData => self.log_form = LogForm::default(),
            AppView::MealAnalyzer => self.meal.draft.clear(),
            AppView::HealthAssistant => self.assistant.begin_view_session(),
            AppView::Dashboard => {}
        }

        self.view = to;
    }

    /// Store a new reading stamped now, then show the dashboard.
    pub fn add_reading(&mut self, measurement: Measurement) {
        self.store.append(measurement);
        self.dashboard = DashboardSnapshot::from_store(&self.store);
        tracing::info!(
            kind = measurement.kind().as_str(),
            total = self.store.len(),
            "Reading logged"
        );
        self.navigate(AppView::Dashboard);
    }

    /// Apply every gateway reply that has arrived.
    pub fn poll_gateway(&mut self) {
        for reply in self.worker.drain() {
            match reply {
                GatewayReply::MealAnalysis(result) => self.meal.finish(result),
                GatewayReply::HealthAdvice {
                    view_session,
                    result,
                } => self.assistant.finish(view_session, result),
            }
        }
    }

    fn submit(&self, request: GatewayRequest) {
        self.worker.submit(request);
    }

    /// Handle keyboard input.
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Global keys first
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::Tab => return self.navigate(self.view.next()),
            KeyCode::BackTab => return self.navigate(self.view.previous()),
            KeyCode::F(n @ 1..=4) => return self.navigate(AppView::ALL[usize::from(n) - 1]),
            _ => {}
        }

        match self.view {
            AppView::Dashboard => self.handle_dashboard_key(key),
            AppView::LogData => self.handle_log_data_key(key),
            AppView::MealAnalyzer => self.handle_meal_key(key),
            AppView::HealthAssistant => self.handle_assistant_key(key),
        }
    }

    /// Handle keyboard input in the dashboard.
    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('n') => {
                self.navigate(AppView::LogData);
            }
            KeyCode::Enter if self.dashboard.is_empty() => {
                // "Get Started" on the onboarding panel
                self.navigate(AppView::LogData);
            }
            _ => {}
        }
    }
}

/// Plain or shifted character keys; Ctrl and Alt chords are not text.
fn is_text_input(key: &KeyEvent) -> bool {
    !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use guardian_core::{Error, MealAnalysis, Result};
    use std::sync::Mutex;

    /// Gateway with canned answers that records every call.
    #[derive(Default)]
    pub struct MockGateway {
        pub fail_meal: bool,
        pub fail_advice: bool,
        pub calls: Mutex<Vec<String>>,
    }

    impl HealthGateway for MockGateway {
        fn analyze_meal(&self, description: &str) -> Result<MealAnalysis> {
            self.calls.lock().unwrap().push(format!("meal:{description}"));
            if self.fail_meal {
                return Err(Error::Analysis("backend down".to_string()));
            }
            Ok(MealAnalysis {
                summary: "Mostly balanced.".to_string(),
                good_for_sugar: vec!["oats".to_string(), "berries".to_string()],
                bad_for_sugar: vec![],
                suggestions: vec!["Swap juice for water".to_string()],
            })
        }

        fn health_advice(&self, prompt: &str) -> Result<String> {
            self.calls.lock().unwrap().push(format!("advice:{prompt}"));
            if self.fail_advice {
                return Err(Error::Advice("backend down".to_string()));
            }
            Ok(format!("I'm not a medical professional. About \"{prompt}\": stay hydrated."))
        }
    }

    pub fn app_with(store: HealthRecordStore, gateway: MockGateway) -> (App, Arc<MockGateway>) {
        let gateway = Arc::new(gateway);
        let worker = GatewayWorker::inline(gateway.clone());
        (App::with_worker(store, worker), gateway)
    }

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Ctrl and Alt chords on letters that must never reach a text field.
    pub fn chords() -> [KeyEvent; 3] {
        [
            KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL),
            KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT),
            KeyEvent::new(KeyCode::Char('1'), KeyModifiers::CONTROL | KeyModifiers::SHIFT),
        ]
    }

    pub fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }
}
