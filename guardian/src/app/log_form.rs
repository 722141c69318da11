use super::*;

use guardian_core::types::{BloodPressure, ReadingKind};

/// One input field of the Log Data form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    BloodSugar,
    Systolic,
    Diastolic,
    Weight,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::BloodSugar => "Blood Sugar (mg/dL)",
            FormField::Systolic => "Systolic (mmHg)",
            FormField::Diastolic => "Diastolic (mmHg)",
            FormField::Weight => "Weight (kg)",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::BloodSugar | FormField::Systolic => "e.g., 120",
            FormField::Diastolic => "e.g., 80",
            FormField::Weight => "e.g., 75.5",
        }
    }
}

/// Transient input state for the Log Data view.
///
/// Each reading kind has its own fields; only the selected kind's fields are
/// read on submit.
#[derive(Debug, Clone)]
pub struct LogForm {
    pub kind: ReadingKind,
    /// Index into [`LogForm::fields`]
    pub focus: usize,
    pub blood_sugar: String,
    pub systolic: String,
    pub diastolic: String,
    pub weight: String,
}

impl Default for LogForm {
    fn default() -> Self {
        Self {
            kind: ReadingKind::BloodSugar,
            focus: 0,
            blood_sugar: String::new(),
            systolic: String::new(),
            diastolic: String::new(),
            weight: String::new(),
        }
    }
}

impl LogForm {
    /// Fields for the selected kind, in focus order.
    pub fn fields(&self) -> &'static [FormField] {
        match self.kind {
            ReadingKind::BloodSugar => &[FormField::BloodSugar],
            ReadingKind::BloodPressure => &[FormField::Systolic, FormField::Diastolic],
            ReadingKind::Weight => &[FormField::Weight],
        }
    }

    pub fn focused_field(&self) -> FormField {
        let fields = self.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::BloodSugar => &self.blood_sugar,
            FormField::Systolic => &self.systolic,
            FormField::Diastolic => &self.diastolic,
            FormField::Weight => &self.weight,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::BloodSugar => &mut self.blood_sugar,
            FormField::Systolic => &mut self.systolic,
            FormField::Diastolic => &mut self.diastolic,
            FormField::Weight => &mut self.weight,
        }
    }

    /// Select a different reading kind. Field contents are kept.
    pub fn select_kind(&mut self, kind: ReadingKind) {
        self.kind = kind;
        self.focus = 0;
    }

    fn cycle_kind(&mut self, forward: bool) {
        let all = ReadingKind::ALL;
        let idx = all.iter().position(|k| *k == self.kind).unwrap_or(0);
        let next = if forward {
            (idx + 1) % all.len()
        } else {
            (idx + all.len() - 1) % all.len()
        };
        self.select_kind(all[next]);
    }

    fn move_focus(&mut self, forward: bool) {
        let len = self.fields().len();
        self.focus = if forward {
            (self.focus + 1).min(len - 1)
        } else {
            self.focus.saturating_sub(1)
        };
    }

    /// Numeric input only: digits, '.', '-'.
    pub fn push_char(&mut self, c: char) {
        if c.is_ascii_digit() || c == '.' || c == '-' {
            let field = self.focused_field();
            self.value_mut(field).push(c);
        }
    }

    pub fn backspace(&mut self) {
        let field = self.focused_field();
        self.value_mut(field).pop();
    }

    /// Build the measurement for the selected kind.
    ///
    /// Returns `None` when a required field is empty or not a number.
    pub fn measurement(&self) -> Option<Measurement> {
        match self.kind {
            ReadingKind::BloodSugar => parse_decimal(&self.blood_sugar).map(Measurement::BloodSugar),
            ReadingKind::BloodPressure => {
                let systolic = parse_integer(&self.systolic)?;
                let diastolic = parse_integer(&self.diastolic)?;
                Some(Measurement::BloodPressure(BloodPressure {
                    systolic,
                    diastolic,
                }))
            }
            ReadingKind::Weight => parse_decimal(&self.weight).map(Measurement::Weight),
        }
    }
}

fn parse_decimal(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Decimal input truncated toward zero ("120.7" -> 120).
fn parse_integer(input: &str) -> Option<i32> {
    parse_decimal(input).map(|v| v.trunc() as i32)
}

impl App {
    // ========== Log Data Methods ==========

    /// Handle keyboard input in the Log Data form.
    pub(super) fn handle_log_data_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.navigate(AppView::Dashboard);
            }
            KeyCode::Left => self.log_form.cycle_kind(false),
            KeyCode::Right => self.log_form.cycle_kind(true),
            KeyCode::Up => self.log_form.move_focus(false),
            KeyCode::Down => self.log_form.move_focus(true),
            KeyCode::Backspace => self.log_form.backspace(),
            KeyCode::Char(c) if is_text_input(&key) => self.log_form.push_char(c),
            KeyCode::Enter => self.submit_log_form(),
            _ => {}
        }
    }

    /// Save the form as a reading. No-op if required fields are missing.
    fn submit_log_form(&mut self) {
        match self.log_form.measurement() {
            Some(measurement) => self.add_reading(measurement),
            None => {
                tracing::debug!(kind = self.log_form.kind.as_str(), "Log form incomplete");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    fn open_form() -> App {
        let (mut app, _) = app_with(HealthRecordStore::new(), Default::default());
        app.navigate(AppView::LogData);
        app
    }

    #[test]
    fn test_empty_submit_changes_nothing() {
        for kind in ReadingKind::ALL {
            let mut app = open_form();
            app.log_form.select_kind(kind);
            app.handle_key(key(KeyCode::Enter));
            assert_eq!(app.view, AppView::LogData);
            assert!(app.store().is_empty());
        }
    }

    #[test]
    fn test_chords_do_not_edit_field() {
        let mut app = open_form();
        type_text(&mut app, "95");
        for chord in chords() {
            app.handle_key(chord);
        }
        assert_eq!(app.log_form.value(app.log_form.focused_field()), "95");
    }

    #[test]
    fn test_blood_pressure_needs_both_fields() {
        let mut app = open_form();
        app.log_form.select_kind(ReadingKind::BloodPressure);
        type_text(&mut app, "120");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.view, AppView::LogData);
        assert!(app.store().is_empty());
    }

    #[test]
    fn test_only_selected_kind_is_saved() {
        let mut app = open_form();
        type_text(&mut app, "95");
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.log_form.kind, ReadingKind::Weight);
        type_text(&mut app, "74.5");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.store().len(), 1);
        assert_eq!(
            app.store().readings()[0].measurement,
            Measurement::Weight(74.5)
        );
    }

    #[test]
    fn test_non_numeric_input_rejected() {
        let mut form = LogForm::default();
        for c in "1a2b.5x".chars() {
            form.push_char(c);
        }
        assert_eq!(form.blood_sugar, "12.5");

        form.blood_sugar = "-".to_string();
        assert_eq!(form.measurement(), None);

        form.blood_sugar = "-5".to_string();
        assert_eq!(form.measurement(), Some(Measurement::BloodSugar(-5.0)));
    }

    #[test]
    fn test_pressure_values_truncate() {
        let form = LogForm {
            kind: ReadingKind::BloodPressure,
            systolic: "120.9".to_string(),
            diastolic: "79.2".to_string(),
            ..Default::default()
        };
        assert_eq!(
            form.measurement(),
            Some(Measurement::BloodPressure(BloodPressure {
                systolic: 120,
                diastolic: 79
            }))
        );
    }

    #[test]
    fn test_form_resets_on_reentry() {
        let mut app = open_form();
        type_text(&mut app, "101");
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.view, AppView::Dashboard);
        assert!(app.store().is_empty());

        app.navigate(AppView::LogData);
        assert!(app.log_form.blood_sugar.is_empty());
    }

    #[test]
    fn test_focus_stays_in_bounds() {
        let mut form = LogForm::default();
        form.select_kind(ReadingKind::BloodPressure);
        form.move_focus(true);
        form.move_focus(true);
        assert_eq!(form.focused_field(), FormField::Diastolic);
        form.move_focus(false);
        form.move_focus(false);
        assert_eq!(form.focused_field(), FormField::Systolic);
    }
}
