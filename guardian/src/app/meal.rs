use super::*;

use guardian_core::gateway::MEAL_ERROR_MESSAGE;
use guardian_core::{MealAnalysis, Result};

/// Meal analyzer state.
///
/// The draft belongs to the view and is cleared on entry; the busy flag,
/// result and error belong to the app and survive navigation.
#[derive(Debug, Clone, Default)]
pub struct MealState {
    pub draft: String,
    pub analyzing: bool,
    pub result: Option<MealAnalysis>,
    pub error: Option<String>,
}

impl MealState {
    /// Submission is possible when idle and the draft has content.
    pub fn can_submit(&self) -> bool {
        !self.analyzing && !self.draft.trim().is_empty()
    }

    /// Mark a new analysis as started.
    fn start(&mut self) {
        self.analyzing = true;
        self.error = None;
        self.result = None;
    }

    /// Apply a finished analysis.
    pub fn finish(&mut self, result: Result<MealAnalysis>) {
        self.analyzing = false;
        match result {
            Ok(analysis) => {
                tracing::info!(
                    good = analysis.good_for_sugar.len(),
                    bad = analysis.bad_for_sugar.len(),
                    suggestions = analysis.suggestions.len(),
                    "Meal analysis received"
                );
                self.result = Some(analysis);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Meal analysis failed");
                self.error = Some(MEAL_ERROR_MESSAGE.to_string());
            }
        }
    }
}

impl App {
    // ========== Meal Analyzer Methods ==========

    /// Handle keyboard input in the meal analyzer.
    pub(super) fn handle_meal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_meal(),
            // Input is locked while a request is pending
            KeyCode::Char(c) if !self.meal.analyzing && is_text_input(&key) => {
                self.meal.draft.push(c)
            }
            KeyCode::Backspace if !self.meal.analyzing => {
                self.meal.draft.pop();
            }
            KeyCode::Esc if !self.meal.analyzing => self.meal.draft.clear(),
            _ => {}
        }
    }

    fn submit_meal(&mut self) {
        if !self.meal.can_submit() {
            return;
        }
        self.meal.start();
        self.submit(GatewayRequest::AnalyzeMeal {
            description: self.meal.draft.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    fn meal_app(gateway: MockGateway) -> (App, Arc<MockGateway>) {
        let (mut app, gateway) = app_with(HealthRecordStore::new(), gateway);
        app.navigate(AppView::MealAnalyzer);
        (app, gateway)
    }

    #[test]
    fn test_failed_analysis_shows_fixed_message() {
        let (mut app, _) = meal_app(MockGateway {
            fail_meal: true,
            ..Default::default()
        });
        type_text(&mut app, "pancakes with syrup");
        app.handle_key(key(KeyCode::Enter));
        app.poll_gateway();

        assert_eq!(
            app.meal.error.as_deref(),
            Some("Sorry, I couldn't analyze the meal. Please try again.")
        );
        assert!(app.meal.result.is_none());
        assert!(!app.meal.analyzing);
    }

    #[test]
    fn test_chords_do_not_edit_draft() {
        let (mut app, _) = meal_app(MockGateway::default());
        type_text(&mut app, "oatmeal");
        for chord in chords() {
            app.handle_key(chord);
        }
        assert_eq!(app.meal.draft, "oatmeal");

        // Shift still types
        app.handle_key(KeyEvent::new(KeyCode::Char('S'), KeyModifiers::SHIFT));
        assert_eq!(app.meal.draft, "oatmealS");
    }

    #[test]
    fn test_blank_draft_not_submitted() {
        let (mut app, gateway) = meal_app(MockGateway::default());
        type_text(&mut app, "   ");
        app.handle_key(key(KeyCode::Enter));
        assert!(!app.meal.analyzing);
        assert!(gateway.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_submit_ignored_while_analyzing() {
        let (mut app, gateway) = meal_app(MockGateway::default());
        type_text(&mut app, "salad");
        app.handle_key(key(KeyCode::Enter));
        assert!(app.meal.analyzing);

        // Still pending until the reply is polled
        type_text(&mut app, "xyz");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.meal.draft, "salad");
        assert_eq!(*gateway.calls.lock().unwrap(), vec!["meal:salad".to_string()]);
    }

    #[test]
    fn test_result_survives_navigation() {
        let (mut app, _) = meal_app(MockGateway::default());
        type_text(&mut app, "oatmeal");
        app.handle_key(key(KeyCode::Enter));

        // Reply lands while the user is on another view
        app.navigate(AppView::Dashboard);
        app.poll_gateway();
        app.navigate(AppView::MealAnalyzer);

        assert!(app.meal.draft.is_empty());
        let result = app.meal.result.as_ref().unwrap();
        assert_eq!(result.good_for_sugar, vec!["oats", "berries"]);
    }

    #[test]
    fn test_new_submit_clears_previous_outcome() {
        let mut state = MealState {
            draft: "eggs".to_string(),
            error: Some(MEAL_ERROR_MESSAGE.to_string()),
            ..Default::default()
        };
        state.start();
        assert!(state.error.is_none());
        assert!(state.result.is_none());
        assert!(!state.can_submit());
    }
}
