// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use account_register_shared::messages::register::{RegisterResponse, RegistrationInput};
use account_register_shared::validation::{validate_registration, Field, ValidationError, ValidationReport};
use std::collections::BTreeSet;

/// Where the form is in sending a registration
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SubmissionState {
	#[default]
	Idle,
	Loading,
	Success,
	Error,
}

/// Everything the registration view needs to draw the form
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FormSnapshot {
	pub input: RegistrationInput,
	pub report: ValidationReport,
	pub touched: BTreeSet<Field>,
	pub submit_attempted: bool,
	pub submission: SubmissionState,
	pub error_message: Option<String>,
	pub registration: Option<RegisterResponse>,
}

impl FormSnapshot {
	pub fn new() -> Self {
		let input = RegistrationInput::default();
		let report = validate_registration(&input);
		Self {
			input,
			report,
			touched: BTreeSet::new(),
			submit_attempted: false,
			submission: SubmissionState::Idle,
			error_message: None,
			registration: None,
		}
	}

	pub fn value(&self, field: Field) -> &str {
		match field {
			Field::Email => &self.input.email,
			Field::Password => &self.input.password,
			Field::ConfirmPassword => &self.input.confirm_password,
		}
	}

	pub(super) fn value_mut(&mut self, field: Field) -> &mut String {
		match field {
			Field::Email => &mut self.input.email,
			Field::Password => &mut self.input.password,
			Field::ConfirmPassword => &mut self.input.confirm_password,
		}
	}

	/// Errors for a field are only shown once the user has left the field or tried to submit.
	pub fn visible_errors(&self, field: Field) -> &[ValidationError] {
		if self.submit_attempted || self.touched.contains(&field) {
			self.report.errors_for(field)
		} else {
			&[]
		}
	}

	pub fn is_valid(&self) -> bool {
		self.report.is_valid()
	}

	pub fn is_loading(&self) -> bool {
		self.submission == SubmissionState::Loading
	}

	pub fn is_success(&self) -> bool {
		self.submission == SubmissionState::Success
	}

	pub fn is_error(&self) -> bool {
		self.submission == SubmissionState::Error
	}

	pub fn can_submit(&self) -> bool {
		self.is_valid() && !self.is_loading()
	}
}

impl Default for FormSnapshot {
	fn default() -> Self {
		Self::new()
	}
}
