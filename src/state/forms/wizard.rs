//! Onboarding wizard: form store, step validation and step navigation

use super::field::{Tier, WizardField};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Field name → human-readable message. Empty means the step is valid.
pub type ValidationErrors = BTreeMap<WizardField, String>;

/// Ordered wizard steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Profile,
    Stakeholders,
    Services,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Profile,
        WizardStep::Stakeholders,
        WizardStep::Services,
        WizardStep::Review,
    ];

    pub fn index(&self) -> usize {
        match self {
            Self::Profile => 0,
            Self::Stakeholders => 1,
            Self::Services => 2,
            Self::Review => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Profile => "Company Profile",
            Self::Stakeholders => "Stakeholders",
            Self::Services => "Service Selection",
            Self::Review => "Review & Deploy",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Profile => "General business information",
            Self::Stakeholders => "Primary contact & signers",
            Self::Services => "Onboarding tier & extras",
            Self::Review => "Final validation",
        }
    }

    /// Fields edited on this step, in focus order
    pub fn fields(&self) -> &'static [WizardField] {
        match self {
            Self::Profile => &[WizardField::CompanyName, WizardField::TaxId],
            Self::Stakeholders => &[WizardField::ContactName, WizardField::Email],
            Self::Services => &[WizardField::Tier],
            Self::Review => &[],
        }
    }

    pub fn is_first(&self) -> bool {
        self.index() == 0
    }

    /// The review step submits instead of advancing
    pub fn is_last(&self) -> bool {
        self.index() == Self::ALL.len() - 1
    }
}

/// Values entered into the wizard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardFormData {
    pub company_name: String,
    pub tax_id: String,
    pub contact_name: String,
    pub email: String,
    pub tier: Tier,
}

impl WizardFormData {
    /// Text value of a field; the tier is rendered by its label
    pub fn text(&self, field: WizardField) -> &str {
        match field {
            WizardField::CompanyName => &self.company_name,
            WizardField::TaxId => &self.tax_id,
            WizardField::ContactName => &self.contact_name,
            WizardField::Email => &self.email,
            WizardField::Tier => self.tier.label(),
        }
    }

    fn text_mut(&mut self, field: WizardField) -> Option<&mut String> {
        match field {
            WizardField::CompanyName => Some(&mut self.company_name),
            WizardField::TaxId => Some(&mut self.tax_id),
            WizardField::ContactName => Some(&mut self.contact_name),
            WizardField::Email => Some(&mut self.email),
            WizardField::Tier => None,
        }
    }
}

fn email_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\S+@\S+\.\S+").ok())
        .as_ref()
}

/// Loose `something@something.something` check, not RFC validation
pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_some_and(|re| re.is_match(value))
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validate the fields belonging to `step`
pub fn validate_step(step: WizardStep, form: &WizardFormData) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    match step {
        WizardStep::Profile => {
            if is_blank(&form.company_name) {
                errors.insert(
                    WizardField::CompanyName,
                    "Company name is required".to_string(),
                );
            }
            if is_blank(&form.tax_id) {
                errors.insert(WizardField::TaxId, "Tax ID is required".to_string());
            }
        }
        WizardStep::Stakeholders => {
            if is_blank(&form.contact_name) {
                errors.insert(
                    WizardField::ContactName,
                    "Contact name is required".to_string(),
                );
            }
            if is_blank(&form.email) {
                errors.insert(WizardField::Email, "Email is required".to_string());
            } else if !is_valid_email(&form.email) {
                errors.insert(WizardField::Email, "Invalid email format".to_string());
            }
        }
        WizardStep::Services | WizardStep::Review => {}
    }

    errors
}

/// Wizard controller: owns the form values, the error map and the step index.
///
/// Forward moves are gated on [`validate_step`]; backward moves are not.
/// While a submission is in flight every transition is refused.
#[derive(Debug, Clone, Default)]
pub struct WizardForm {
    data: WizardFormData,
    errors: ValidationErrors,
    step: WizardStep,
    active_field_index: usize,
    submitting: bool,
}

impl WizardForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &WizardFormData {
        &self.data
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error_for(&self, field: WizardField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn can_go_back(&self) -> bool {
        !self.step.is_first() && !self.submitting
    }

    pub fn can_advance(&self) -> bool {
        !self.step.is_last() && !self.submitting
    }

    pub fn can_submit(&self) -> bool {
        self.step.is_last() && !self.submitting
    }

    /// Replace a text field's value. Clears that field's error.
    pub fn set_field(&mut self, field: WizardField, value: impl Into<String>) {
        if self.submitting {
            return;
        }
        if let Some(slot) = self.data.text_mut(field) {
            *slot = value.into();
            self.errors.remove(&field);
        }
    }

    pub fn set_tier(&mut self, tier: Tier) {
        if self.submitting {
            return;
        }
        self.data.tier = tier;
        self.errors.remove(&WizardField::Tier);
    }

    /// Field with keyboard focus on the current step
    pub fn active_field(&self) -> Option<WizardField> {
        self.step.fields().get(self.active_field_index).copied()
    }

    pub fn next_field(&mut self) {
        let count = self.step.fields().len();
        if count > 0 {
            self.active_field_index = (self.active_field_index + 1) % count;
        }
    }

    pub fn prev_field(&mut self) {
        let count = self.step.fields().len();
        if count == 0 {
            return;
        }
        if self.active_field_index == 0 {
            self.active_field_index = count - 1;
        } else {
            self.active_field_index -= 1;
        }
    }

    /// Type a character into the focused field; space toggles a choice field
    pub fn input_char(&mut self, c: char) {
        let Some(field) = self.active_field() else {
            return;
        };
        if field.is_choice() {
            if c == ' ' {
                self.set_tier(self.data.tier.toggle());
            }
            return;
        }
        let mut value = self.data.text(field).to_string();
        value.push(c);
        self.set_field(field, value);
    }

    pub fn backspace(&mut self) {
        let Some(field) = self.active_field() else {
            return;
        };
        if field.is_choice() {
            return;
        }
        let mut value = self.data.text(field).to_string();
        value.pop();
        self.set_field(field, value);
    }

    /// Try to move forward. Returns true when the step index changed.
    pub fn next(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.errors = validate_step(self.step, &self.data);
        if !self.errors.is_empty() {
            self.focus_first_error();
            return false;
        }
        if self.step.is_last() {
            return false;
        }
        self.go_to(self.step.index() + 1);
        true
    }

    /// Move back one step. Values and errors are kept.
    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.go_to(self.step.index() - 1);
        true
    }

    /// Start a submission from the review step.
    ///
    /// Every step is re-checked; on failure the wizard jumps to the first
    /// invalid step and nothing is submitted.
    pub fn begin_submit(&mut self) -> Option<WizardFormData> {
        if !self.can_submit() {
            return None;
        }

        for step in WizardStep::ALL {
            let errors = validate_step(step, &self.data);
            if !errors.is_empty() {
                self.errors = errors;
                self.go_to(step.index());
                self.focus_first_error();
                return None;
            }
        }

        self.errors.clear();
        self.submitting = true;
        Some(self.data.clone())
    }

    /// The submission failed; stay on review with submit enabled again
    pub fn submission_failed(&mut self) {
        self.submitting = false;
    }

    fn go_to(&mut self, index: usize) {
        if let Some(step) = WizardStep::from_index(index) {
            self.step = step;
            self.active_field_index = 0;
        }
    }

    fn focus_first_error(&mut self) {
        if let Some(pos) = self
            .step
            .fields()
            .iter()
            .position(|f| self.errors.contains_key(f))
        {
            self.active_field_index = pos;
        }
    }
}
