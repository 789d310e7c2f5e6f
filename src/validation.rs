//! Field rules shared by the appointment and contact forms.

use std::sync::LazyLock;

use fancy_regex::Regex;
use serde::{Deserialize, Serialize};

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const NAME_MESSAGE: &str = "Name must be at least 2 characters long";
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const DEPARTMENT_MESSAGE: &str = "Please select a department";
pub const DOCTOR_MESSAGE: &str = "Please select a doctor";
pub const DATE_MESSAGE: &str = "Please select a date";

pub const SUCCESS_MESSAGE: &str = "Thank you! Your appointment request has been submitted successfully. We will contact you soon.";

pub(crate) const SUCCESS_BANNER_STYLE: &str = "background-color: #28a745; color: white; padding: 1rem 1.5rem; border-radius: 8px; margin-bottom: 1.5rem; text-align: center; font-weight: 500; animation: fadeInUp 0.5s ease;";

const MIN_NAME_LENGTH: usize = 2;
const MIN_PHONE_DIGITS: usize = 10;

// Digits are spelled out: `\d` would also admit non-ASCII digits.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\s\-\+\(\)]+$").expect("valid hardcoded regex"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid hardcoded regex"));

/// Digits, spaces, dashes, plus signs and parentheses only, with at least ten digits.
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value).unwrap_or(false)
        && value.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value).unwrap_or(false)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldCheck {
    /// At least this many UTF-16 code units once surrounding whitespace is trimmed.
    MinTrimmedLength(usize),
    Phone,
    Email,
    /// A select with a chosen (non-empty) value.
    Selected,
    NonEmpty,
}

impl FieldCheck {
    pub fn passes(&self, value: &str) -> bool {
        match self {
            Self::MinTrimmedLength(min) => utf16_len(value.trim()) >= *min,
            Self::Phone => is_valid_phone(value.trim()),
            Self::Email => is_valid_email(value.trim()),
            Self::Selected | Self::NonEmpty => !value.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub field_id: String,
    pub check: FieldCheck,
    pub message: String,
}

impl FieldRule {
    pub fn new(field_id: &str, check: FieldCheck, message: &str) -> Self {
        Self {
            field_id: field_id.to_string(),
            check,
            message: message.to_string(),
        }
    }
}

/// What happens to a group's `.error-message` once the field is valid again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClearing {
    RemoveNode,
    BlankText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormProfile {
    pub form_id: String,
    /// Submit-time checks, run in order against elements looked up by id.
    pub rules: Vec<FieldRule>,
    /// Selector, relative to the form, of the controls validated on blur and input.
    pub live_controls: String,
    /// The control whose live check includes the minimum name length.
    pub name_field_id: Option<String>,
    /// Whether `type=email` controls get the address shape check on blur.
    #[serde(default)]
    pub live_email: bool,
    pub error_clearing: ErrorClearing,
    /// Blank every existing message in the form's groups before a submit pass.
    pub blank_messages_on_submit: bool,
}

impl FormProfile {
    pub fn appointment() -> Self {
        Self {
            form_id: "appointmentForm".to_string(),
            rules: vec![
                FieldRule::new(
                    "appointment-name",
                    FieldCheck::MinTrimmedLength(MIN_NAME_LENGTH),
                    NAME_MESSAGE,
                ),
                FieldRule::new("appointment-phone", FieldCheck::Phone, PHONE_MESSAGE),
                FieldRule::new("department", FieldCheck::Selected, DEPARTMENT_MESSAGE),
                FieldRule::new("doctor", FieldCheck::Selected, DOCTOR_MESSAGE),
                FieldRule::new("appointment-date", FieldCheck::NonEmpty, DATE_MESSAGE),
            ],
            live_controls: "input, select".to_string(),
            name_field_id: Some("appointment-name".to_string()),
            live_email: false,
            error_clearing: ErrorClearing::RemoveNode,
            blank_messages_on_submit: false,
        }
    }

    pub fn contact() -> Self {
        Self {
            form_id: "contactForm".to_string(),
            rules: vec![
                FieldRule::new(
                    "name",
                    FieldCheck::MinTrimmedLength(MIN_NAME_LENGTH),
                    NAME_MESSAGE,
                ),
                FieldRule::new("phone", FieldCheck::Phone, PHONE_MESSAGE),
                FieldRule::new("email", FieldCheck::Email, EMAIL_MESSAGE),
            ],
            live_controls: "input, textarea".to_string(),
            name_field_id: Some("name".to_string()),
            live_email: true,
            error_clearing: ErrorClearing::BlankText,
            blank_messages_on_submit: true,
        }
    }

    /// Runs every submit rule whose field exists; `lookup` maps a field id to its current value.
    pub fn check_submission<F>(&self, lookup: F) -> Vec<FieldFailure>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.rules
            .iter()
            .filter_map(|rule| {
                let value = lookup(&rule.field_id)?;
                (!rule.check.passes(&value)).then(|| FieldFailure {
                    field_id: rule.field_id.clone(),
                    message: rule.message.clone(),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    pub field_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Pristine,
    Validating,
    Invalid,
    Valid,
    Submitted,
}

/// What live validation needs to know about one control.
#[derive(Debug, Clone, Default)]
pub(crate) struct ControlSnapshot {
    pub(crate) id: Option<String>,
    pub(crate) input_type: String,
    pub(crate) is_select: bool,
    pub(crate) required: bool,
    pub(crate) value: String,
}

/// Blur-time check: the first failing rule's message, `None` when the control is valid.
///
/// Order: required, phone for `type=tel`, email for `type=email` where the
/// profile enables it, then the name length.
pub(crate) fn live_check(control: &ControlSnapshot, profile: &FormProfile) -> Option<&'static str> {
    let trimmed = control.value.trim();

    if control.required && (trimmed.is_empty() || (control.is_select && control.value.is_empty()))
    {
        return Some(REQUIRED_MESSAGE);
    }

    if trimmed.is_empty() {
        return None;
    }

    if control.input_type == "tel" && !is_valid_phone(trimmed) {
        return Some(PHONE_MESSAGE);
    }

    if profile.live_email && control.input_type == "email" && !is_valid_email(trimmed) {
        return Some(EMAIL_MESSAGE);
    }

    let is_name_field = control.id.is_some() && control.id == profile.name_field_id;
    if is_name_field && utf16_len(trimmed) < MIN_NAME_LENGTH {
        return Some(NAME_MESSAGE);
    }

    None
}

// Browser string length, so one astral character counts as two.
fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Input-time fast path: clears a shown error without re-validating.
pub(crate) fn input_clears_error(control: &ControlSnapshot) -> bool {
    !control.value.trim().is_empty() || (control.is_select && !control.value.is_empty())
}
