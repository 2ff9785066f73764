//! Declarative form schemas.
//!
//! A schema is a static list of fields, each with the rules it must satisfy.
//! Rules other than `Required` only apply to non-blank values, so optional
//! fields are validated only when filled in.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    Required,
    Email,
    MinLength(usize),
    /// Inclusive integer range.
    Range(i64, i64),
}

#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub field: &'static str,
    pub label: &'static str,
    pub rules: &'static [Rule],
}

pub type Schema = &'static [FieldRule];

/// Per-field validation messages, at most one per field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first message recorded for `field`.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

pub(crate) fn is_email(value: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });
    regex.is_match(value)
}

fn check(rule: &Rule, label: &str, value: &str) -> Option<String> {
    let blank = value.trim().is_empty();
    match rule {
        Rule::Required if blank => Some(format!("{label} is required")),
        Rule::Required => None,
        _ if blank => None,
        Rule::Email if !is_email(value.trim()) => Some("Invalid email address".to_string()),
        Rule::Email => None,
        Rule::MinLength(min) if value.chars().count() < *min => {
            Some(format!("{label} must be at least {min} characters"))
        }
        Rule::MinLength(_) => None,
        Rule::Range(min, max) => match value.trim().parse::<i64>() {
            Ok(n) if (*min..=*max).contains(&n) => None,
            Ok(_) => Some(format!("{label} must be between {min} and {max}")),
            Err(_) => Some(format!("{label} must be a whole number")),
        },
    }
}

/// Runs `schema` against the form, looking field values up with `value_of`.
pub fn validate<'a>(schema: Schema, value_of: impl Fn(&str) -> Option<&'a str>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for field in schema {
        let value = value_of(field.field).unwrap_or("");
        if let Some(message) = field
            .rules
            .iter()
            .find_map(|rule| check(rule, field.label, value))
        {
            errors.insert(field.field, message);
        }
    }
    errors
}

/// Bounds of a device push interval, in seconds.
pub const MIN_PUSH_INTERVAL: u32 = 1;
pub const MAX_PUSH_INTERVAL: u32 = 86_400;

pub const LOGIN_SCHEMA: Schema = &[
    FieldRule { field: "email", label: "Email", rules: &[Rule::Required, Rule::Email] },
    FieldRule {
        field: "password",
        label: "Password",
        rules: &[Rule::Required, Rule::MinLength(6)],
    },
];

pub const USER_CREATE_SCHEMA: Schema = &[
    FieldRule { field: "email", label: "Email", rules: &[Rule::Required, Rule::Email] },
    FieldRule { field: "name", label: "Name", rules: &[Rule::Required] },
    FieldRule { field: "role", label: "Role", rules: &[Rule::Required] },
    FieldRule {
        field: "password",
        label: "Password",
        rules: &[Rule::Required, Rule::MinLength(6)],
    },
];

/// Same as create, except a blank password means "keep the current one".
pub const USER_UPDATE_SCHEMA: Schema = &[
    FieldRule { field: "email", label: "Email", rules: &[Rule::Required, Rule::Email] },
    FieldRule { field: "name", label: "Name", rules: &[Rule::Required] },
    FieldRule { field: "role", label: "Role", rules: &[Rule::Required] },
    FieldRule { field: "password", label: "Password", rules: &[Rule::MinLength(6)] },
];

pub const ROLE_SCHEMA: Schema = &[
    FieldRule { field: "name", label: "Name", rules: &[Rule::Required] },
];

pub const COMPANY_SCHEMA: Schema = &[
    FieldRule { field: "name", label: "Name", rules: &[Rule::Required] },
    FieldRule { field: "contact_email", label: "Contact email", rules: &[Rule::Email] },
];

pub const DEVICE_SCHEMA: Schema = &[
    FieldRule { field: "name", label: "Name", rules: &[Rule::Required] },
    FieldRule { field: "device_type", label: "Type", rules: &[Rule::Required] },
    FieldRule {
        field: "push_interval",
        label: "Push interval",
        rules: &[
            Rule::Required,
            Rule::Range(MIN_PUSH_INTERVAL as i64, MAX_PUSH_INTERVAL as i64),
        ],
    },
];
