//! Passenger form state.
//!
//! Everything here is terminal-free: key presses go in, a [`FormAction`] comes
//! out, and drawing code reads the state back. Each widget clamps to its own
//! domain; there is no cross-field validation.

use crossterm::event::KeyCode;

use crate::domain::{
    clamp_age, clamp_fare, PassengerClass, PassengerInput, Port, PredictionResult, Sex,
    DEFAULT_AGE, DEFAULT_FARE,
};

/// Longest text accepted while typing into a numeric field.
const MAX_EDIT_LEN: usize = 10;

const FARE_STEP: f64 = 1.0;

/// Focusable widgets, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Class,
    Sex,
    Age,
    Fare,
    Embarked,
    Submit,
}

impl Field {
    pub const ORDER: [Field; 6] = [
        Field::Class,
        Field::Sex,
        Field::Age,
        Field::Fare,
        Field::Embarked,
        Field::Submit,
    ];

    /// Left column widgets.
    pub const LEFT: [Field; 3] = [Field::Class, Field::Sex, Field::Age];
    /// Right column widgets.
    pub const RIGHT: [Field; 2] = [Field::Fare, Field::Embarked];

    pub fn label(self) -> &'static str {
        match self {
            Field::Class => "Passenger Class",
            Field::Sex => "Gender",
            Field::Age => "Age",
            Field::Fare => "Fare ($)",
            Field::Embarked => "Port of Embarkation",
            Field::Submit => "Predict Survival Status",
        }
    }

    fn is_numeric(self) -> bool {
        matches!(self, Field::Age | Field::Fare)
    }

    fn position(self) -> usize {
        Field::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Field {
        Field::ORDER[(self.position() + 1) % Field::ORDER.len()]
    }

    fn prev(self) -> Field {
        let n = Field::ORDER.len();
        Field::ORDER[(self.position() + n - 1) % n]
    }
}

/// What the output region currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Prediction(PredictionResult),
    Failure(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    AwaitingInput,
    ResultShown(Shown),
}

/// Result of handling one key.
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    None,
    Quit,
    Submit(PassengerInput),
}

#[derive(Debug, Clone)]
pub struct Form {
    pub class: Option<PassengerClass>,
    pub sex: Option<Sex>,
    pub age: u8,
    pub fare: f64,
    pub embarked: Option<Port>,
    focus: Field,
    edit: Option<String>,
    notice: Option<String>,
    phase: Phase,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    pub fn new() -> Self {
        Self {
            class: None,
            sex: None,
            age: DEFAULT_AGE,
            fare: DEFAULT_FARE,
            embarked: None,
            focus: Field::Class,
            edit: None,
            notice: None,
            phase: Phase::AwaitingInput,
        }
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Text shown for a widget's current value.
    pub fn display_value(&self, field: Field) -> String {
        if field == self.focus {
            if let Some(buf) = &self.edit {
                return format!("{buf}_");
            }
        }
        match field {
            Field::Class => self
                .class
                .map(|c| format!("{} ({})", c.number(), c.display_name()))
                .unwrap_or_else(unselected),
            Field::Sex => self.sex.map(|s| s.code().to_string()).unwrap_or_else(unselected),
            Field::Age => self.age.to_string(),
            Field::Fare => format!("{:.2}", self.fare),
            Field::Embarked => self
                .embarked
                .map(|p| p.display_name().to_string())
                .unwrap_or_else(unselected),
            Field::Submit => String::new(),
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> FormAction {
        match code {
            KeyCode::Esc if self.edit.is_some() => {
                self.edit = None;
            }
            KeyCode::Esc | KeyCode::Char('q') => return FormAction::Quit,
            KeyCode::Tab | KeyCode::Down => {
                self.commit_edit();
                self.focus = self.focus.next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.commit_edit();
                self.focus = self.focus.prev();
            }
            KeyCode::Left => self.adjust(-1),
            KeyCode::Right => self.adjust(1),
            KeyCode::Enter => {
                if self.focus == Field::Submit {
                    return self.submit();
                }
                self.commit_edit();
                self.focus = self.focus.next();
            }
            KeyCode::Backspace if self.focus.is_numeric() => {
                self.edit_buffer().pop();
            }
            KeyCode::Char(c) if self.focus.is_numeric() => self.type_char(c),
            _ => {}
        }
        FormAction::None
    }

    /// Record the handler's outcome for the current inputs.
    pub fn show(&mut self, shown: Shown) {
        self.notice = None;
        self.phase = Phase::ResultShown(shown);
    }

    /// Validate the widgets and produce the input to predict on.
    fn submit(&mut self) -> FormAction {
        self.commit_edit();

        let missing = [
            (Field::Class, self.class.is_none()),
            (Field::Sex, self.sex.is_none()),
            (Field::Embarked, self.embarked.is_none()),
        ]
        .into_iter()
        .find(|(_, missing)| *missing)
        .map(|(field, _)| field);

        if let Some(field) = missing {
            self.notice = Some(format!("Select a value for {}.", field.label()));
            self.focus = field;
            return FormAction::None;
        }

        match (self.class, self.sex, self.embarked) {
            (Some(class), Some(sex), Some(embarked)) => FormAction::Submit(PassengerInput::new(
                class, sex, self.age, self.fare, embarked,
            )),
            _ => FormAction::None,
        }
    }

    fn adjust(&mut self, delta: i32) {
        self.commit_edit();
        match self.focus {
            Field::Class => self.class = Some(cycle(&PassengerClass::ALL, self.class, delta)),
            Field::Sex => self.sex = Some(cycle(&Sex::ALL, self.sex, delta)),
            Field::Embarked => self.embarked = Some(cycle(&Port::ALL, self.embarked, delta)),
            Field::Age => self.age = clamp_age(i64::from(self.age) + i64::from(delta)),
            Field::Fare => self.fare = clamp_fare(self.fare + f64::from(delta) * FARE_STEP),
            Field::Submit => return,
        }
        self.changed();
    }

    fn type_char(&mut self, c: char) {
        let allow_dot = self.focus == Field::Fare;
        let buf = self.edit_buffer();
        if buf.len() >= MAX_EDIT_LEN {
            return;
        }
        if c.is_ascii_digit() || (allow_dot && c == '.' && !buf.contains('.')) {
            buf.push(c);
        }
    }

    /// Start or continue typing. Starting an edit invalidates the shown result.
    fn edit_buffer(&mut self) -> &mut String {
        if self.edit.is_none() {
            self.changed();
        }
        self.edit.get_or_insert_with(String::new)
    }

    /// Apply typed text to the focused numeric field, clamping to its domain.
    ///
    /// Text that does not parse (e.g. empty) leaves the value unchanged.
    fn commit_edit(&mut self) {
        let Some(buf) = self.edit.take() else {
            return;
        };
        let applied = match self.focus {
            Field::Age => buf
                .parse::<i64>()
                .ok()
                .map(|v| self.age = clamp_age(v))
                .is_some(),
            Field::Fare => buf
                .parse::<f64>()
                .ok()
                .map(|v| self.fare = clamp_fare(v))
                .is_some(),
            _ => false,
        };
        if applied {
            self.changed();
        }
    }

    /// Any widget change invalidates the shown result.
    fn changed(&mut self) {
        self.notice = None;
        self.phase = Phase::AwaitingInput;
    }
}

fn unselected() -> String {
    "(select)".to_string()
}

/// Step through `options`; an unset value starts at the first (forward) or last (back) option.
fn cycle<T: Copy + PartialEq>(options: &[T], current: Option<T>, delta: i32) -> T {
    let n = options.len();
    let next = match current.and_then(|cur| options.iter().position(|o| *o == cur)) {
        None if delta >= 0 => 0,
        None => n - 1,
        Some(idx) if delta >= 0 => (idx + 1) % n,
        Some(idx) => (idx + n - 1) % n,
    };
    options[next]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(form: &mut Form, keys: &[KeyCode]) -> FormAction {
        let mut last = FormAction::None;
        for key in keys {
            last = form.handle_key(*key);
        }
        last
    }

    fn type_str(form: &mut Form, text: &str) {
        for c in text.chars() {
            form.handle_key(KeyCode::Char(c));
        }
    }

    fn focus_on(form: &mut Form, field: Field) {
        while form.focus() != field {
            form.handle_key(KeyCode::Tab);
        }
    }

    /// Select class 3, male, Southampton with the arrow keys.
    fn fill_defaults(form: &mut Form) {
        focus_on(form, Field::Class);
        press(form, &[KeyCode::Left]);
        focus_on(form, Field::Sex);
        press(form, &[KeyCode::Right]);
        focus_on(form, Field::Embarked);
        press(form, &[KeyCode::Left]);
    }

    #[test]
    fn starts_awaiting_input_with_numeric_defaults() {
        let form = Form::new();
        assert_eq!(form.phase(), &Phase::AwaitingInput);
        assert_eq!(form.focus(), Field::Class);
        assert_eq!(form.age, 25);
        assert_eq!(form.fare, 15.0);
        assert!(form.class.is_none() && form.sex.is_none() && form.embarked.is_none());
    }

    #[test]
    fn submit_requires_every_choice() {
        let mut form = Form::new();
        focus_on(&mut form, Field::Submit);
        let action = press(&mut form, &[KeyCode::Enter]);
        assert_eq!(action, FormAction::None);
        assert_eq!(form.focus(), Field::Class);
        assert!(form.notice().unwrap().contains("Passenger Class"));
        assert_eq!(form.phase(), &Phase::AwaitingInput);
    }

    #[test]
    fn submits_baseline_passenger() {
        let mut form = Form::new();
        fill_defaults(&mut form);
        focus_on(&mut form, Field::Submit);
        let action = press(&mut form, &[KeyCode::Enter]);
        assert_eq!(action, FormAction::Submit(PassengerInput::default()));
    }

    #[test]
    fn enum_widgets_cycle_and_wrap() {
        let mut form = Form::new();
        press(&mut form, &[KeyCode::Right]);
        assert_eq!(form.class, Some(PassengerClass::First));
        press(&mut form, &[KeyCode::Left]);
        assert_eq!(form.class, Some(PassengerClass::Third));
        press(&mut form, &[KeyCode::Right]);
        assert_eq!(form.class, Some(PassengerClass::First));
    }

    #[test]
    fn age_clamps_at_both_bounds() {
        let mut form = Form::new();
        focus_on(&mut form, Field::Age);
        type_str(&mut form, "250");
        press(&mut form, &[KeyCode::Tab]);
        assert_eq!(form.age, 100);

        focus_on(&mut form, Field::Age);
        press(&mut form, &[KeyCode::Right]);
        assert_eq!(form.age, 100);

        type_str(&mut form, "0");
        press(&mut form, &[KeyCode::Left]);
        assert_eq!(form.age, 0);
    }

    #[test]
    fn fare_never_goes_negative() {
        let mut form = Form::new();
        focus_on(&mut form, Field::Fare);
        type_str(&mut form, "0.5");
        press(&mut form, &[KeyCode::Left, KeyCode::Left]);
        assert_eq!(form.fare, 0.0);
    }

    #[test]
    fn fare_accepts_a_single_decimal_point() {
        let mut form = Form::new();
        focus_on(&mut form, Field::Fare);
        type_str(&mut form, "7.2.5x");
        assert_eq!(form.display_value(Field::Fare), "7.25_");
        press(&mut form, &[KeyCode::Enter]);
        assert_eq!(form.fare, 7.25);
        assert_eq!(form.focus(), Field::Embarked);
    }

    #[test]
    fn escape_cancels_typing_then_quits() {
        let mut form = Form::new();
        focus_on(&mut form, Field::Age);
        type_str(&mut form, "61");
        assert_eq!(press(&mut form, &[KeyCode::Esc]), FormAction::None);
        assert_eq!(form.age, 25);
        assert_eq!(press(&mut form, &[KeyCode::Esc]), FormAction::Quit);
    }

    #[test]
    fn empty_edit_keeps_previous_value() {
        let mut form = Form::new();
        focus_on(&mut form, Field::Age);
        type_str(&mut form, "4");
        press(&mut form, &[KeyCode::Backspace, KeyCode::Tab]);
        assert_eq!(form.age, 25);
    }

    #[test]
    fn changing_a_field_clears_the_result() {
        let mut form = Form::new();
        fill_defaults(&mut form);
        form.show(Shown::Prediction(PredictionResult {
            survived: false,
            survival_probability: 0.14,
        }));
        assert!(matches!(form.phase(), Phase::ResultShown(_)));

        // Moving focus alone keeps the result.
        focus_on(&mut form, Field::Age);
        assert!(matches!(form.phase(), Phase::ResultShown(_)));

        press(&mut form, &[KeyCode::Right]);
        assert_eq!(form.phase(), &Phase::AwaitingInput);
    }

    #[test]
    fn typing_clears_the_result_immediately() {
        let mut form = Form::new();
        fill_defaults(&mut form);
        focus_on(&mut form, Field::Fare);
        form.show(Shown::Prediction(PredictionResult {
            survived: false,
            survival_probability: 0.14,
        }));

        type_str(&mut form, "9");
        assert_eq!(form.display_value(Field::Fare), "9_");
        assert_eq!(form.phase(), &Phase::AwaitingInput);
    }

    #[test]
    fn q_quits_but_is_ignored_by_numeric_typing() {
        let mut form = Form::new();
        focus_on(&mut form, Field::Fare);
        type_str(&mut form, "12");
        assert_eq!(form.display_value(Field::Fare), "12_");
        assert_eq!(press(&mut form, &[KeyCode::Char('q')]), FormAction::Quit);
    }

    #[test]
    fn focus_wraps_in_both_directions() {
        let mut form = Form::new();
        press(&mut form, &[KeyCode::BackTab]);
        assert_eq!(form.focus(), Field::Submit);
        press(&mut form, &[KeyCode::Down]);
        assert_eq!(form.focus(), Field::Class);
    }
}
