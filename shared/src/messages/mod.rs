// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod register;

/// Error body returned by the registration API when a request is rejected
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ErrorResponse {
	pub error: ErrorDetail,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ErrorDetail {
	pub message: String,
}

impl ErrorResponse {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			error: ErrorDetail {
				message: message.into(),
			},
		}
	}
}

impl fmt::Display for ErrorResponse {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.error.message)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn error_body_uses_nested_message() {
		let body: ErrorResponse = serde_json::from_str(r#"{"error":{"message":"Email exists"}}"#).unwrap();
		assert_eq!(body, ErrorResponse::new("Email exists"));
		assert_eq!(body.to_string(), "Email exists");
	}
}
