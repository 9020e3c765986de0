// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rules for the registration form. The same rules run in the browser (to give feedback while typing) and on the
//! server (to reject requests that skipped the browser checks).

use crate::messages::register::{RegistrationInput, PASSWORD_MIN_LENGTH};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

const EMAIL_MAX_LENGTH: usize = 254;
const EMAIL_LOCAL_PART_MAX_LENGTH: usize = 64;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Field {
	Email,
	Password,
	ConfirmPassword,
}

impl Field {
	pub const ALL: [Field; 3] = [Field::Email, Field::Password, Field::ConfirmPassword];

	pub fn label(&self) -> &'static str {
		match self {
			Self::Email => "Email",
			Self::Password => "Password",
			Self::ConfirmPassword => "Confirm password",
		}
	}
}

impl fmt::Display for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.label())
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ValidationError {
	Required,
	Format,
	TooShort { min: usize },
	Mismatch,
}

impl fmt::Display for ValidationError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Required => write!(f, "This field is required."),
			Self::Format => write!(f, "Please enter a valid email address."),
			Self::TooShort { min } => write!(f, "Must be at least {} characters.", min),
			Self::Mismatch => write!(f, "Passwords do not match."),
		}
	}
}

/// Active errors for each field. Fields without errors have no entry.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValidationReport {
	errors: BTreeMap<Field, Vec<ValidationError>>,
}

impl ValidationReport {
	pub fn is_valid(&self) -> bool {
		self.errors.is_empty()
	}

	pub fn errors_for(&self, field: Field) -> &[ValidationError] {
		self.errors.get(&field).map(|errors| errors.as_slice()).unwrap_or(&[])
	}

	pub fn has_error(&self, field: Field, error: &ValidationError) -> bool {
		self.errors_for(field).contains(error)
	}

	fn add(&mut self, field: Field, errors: Vec<ValidationError>) {
		if !errors.is_empty() {
			self.errors.entry(field).or_default().extend(errors);
		}
	}
}

type Rule = fn(&str) -> Option<ValidationError>;

const EMAIL_RULES: &[Rule] = &[required, email_format];
const PASSWORD_RULES: &[Rule] = &[required, password_length];
const CONFIRMATION_RULES: &[Rule] = &[required];

fn run_rules(rules: &[Rule], value: &str) -> Vec<ValidationError> {
	rules.iter().filter_map(|rule| rule(value)).collect()
}

fn first_failure(rules: &[Rule], value: &str) -> Result<(), ValidationError> {
	match rules.iter().find_map(|rule| rule(value)) {
		Some(error) => Err(error),
		None => Ok(()),
	}
}

fn required(value: &str) -> Option<ValidationError> {
	if value.is_empty() {
		Some(ValidationError::Required)
	} else {
		None
	}
}

fn email_regex() -> &'static Regex {
	static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
	EMAIL_REGEX.get_or_init(|| {
		Regex::new(
			r#"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"#,
		)
		.expect("Email pattern is a valid regular expression")
	})
}

fn email_format(value: &str) -> Option<ValidationError> {
	// Empty values are reported by the required rule only
	if value.is_empty() {
		return None;
	}
	if value.len() > EMAIL_MAX_LENGTH {
		return Some(ValidationError::Format);
	}
	let local_part_too_long = value
		.split_once('@')
		.map(|(local_part, _)| local_part.len() > EMAIL_LOCAL_PART_MAX_LENGTH)
		.unwrap_or(false);
	if local_part_too_long || !email_regex().is_match(value) {
		Some(ValidationError::Format)
	} else {
		None
	}
}

fn password_length(value: &str) -> Option<ValidationError> {
	if value.is_empty() {
		return None;
	}
	if value.chars().count() < PASSWORD_MIN_LENGTH {
		Some(ValidationError::TooShort {
			min: PASSWORD_MIN_LENGTH,
		})
	} else {
		None
	}
}

/// A mismatch is only reported once both fields have something in them.
fn passwords_match(password: &str, confirm: &str) -> Option<ValidationError> {
	if !password.is_empty() && !confirm.is_empty() && password != confirm {
		Some(ValidationError::Mismatch)
	} else {
		None
	}
}

pub fn validate_email(value: &str) -> Result<(), ValidationError> {
	first_failure(EMAIL_RULES, value)
}

pub fn validate_password(value: &str) -> Result<(), ValidationError> {
	first_failure(PASSWORD_RULES, value)
}

pub fn validate_confirmation(password: &str, confirm: &str) -> Result<(), ValidationError> {
	first_failure(CONFIRMATION_RULES, confirm)?;
	match passwords_match(password, confirm) {
		Some(error) => Err(error),
		None => Ok(()),
	}
}

/// Runs every field rule and the password confirmation rule over the whole form.
pub fn validate_registration(input: &RegistrationInput) -> ValidationReport {
	let mut report = ValidationReport::default();
	report.add(Field::Email, run_rules(EMAIL_RULES, &input.email));
	report.add(Field::Password, run_rules(PASSWORD_RULES, &input.password));

	let mut confirmation_errors = run_rules(CONFIRMATION_RULES, &input.confirm_password);
	confirmation_errors.extend(passwords_match(&input.password, &input.confirm_password));
	report.add(Field::ConfirmPassword, confirmation_errors);

	report
}
