// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

/// Path of the registration endpoint, relative to the site root
pub const REGISTER_ENDPOINT: &str = "/api/auth/register";

/// Counted in characters (Unicode scalar values), not bytes or UTF-16 code units, so the browser and server agree.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Everything the user types into the registration form
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RegistrationInput {
	pub email: String,
	pub password: String,
	pub confirm_password: String,
}

impl RegistrationInput {
	/// Builds the data sent to the server. The password confirmation only exists for the form and is never sent.
	pub fn to_request(&self) -> RegistrationRequest {
		RegistrationRequest {
			email: self.email.clone(),
			password: self.password.clone(),
		}
	}
}

/// Request data from the client when registering an account
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RegistrationRequest {
	pub email: String,
	pub password: String,
}

/// Response data from the server for a successful registration
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
	pub user_id: String,
	pub email: String,
	pub requires_email_verification: bool,
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn request_leaves_out_confirmation() {
		let input = RegistrationInput {
			email: String::from("a@b.com"),
			password: String::from("password1"),
			confirm_password: String::from("password1"),
		};
		let body = serde_json::to_value(input.to_request()).unwrap();
		assert_eq!(body, json!({ "email": "a@b.com", "password": "password1" }));
	}

	#[test]
	fn response_reads_camel_case_fields() {
		let response: RegisterResponse = serde_json::from_value(json!({
			"userId": "00000000-0000-0000-0000-000000000000",
			"email": "a@b.com",
			"requiresEmailVerification": true
		}))
		.unwrap();
		assert_eq!(response.user_id, "00000000-0000-0000-0000-000000000000");
		assert!(response.requires_email_verification);
	}
}
