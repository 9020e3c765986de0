// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use account_register_shared::messages::register::{RegisterResponse, RegistrationRequest, REGISTER_ENDPOINT};
use account_register_shared::messages::ErrorResponse;
use gloo_net::http::Request;
use std::fmt;

const GENERIC_FAILURE_MESSAGE: &str = "Registration failed. Please try again.";

/// Errors that can occur when sending a registration to the server
#[derive(Debug)]
pub enum RegistrationError {
	/// The request couldn't be sent or the connection failed
	Transport(gloo_net::Error),
	/// The server answered with an error status
	Rejected { status: u16, message: Option<String> },
	/// The server reported success but the response body couldn't be read
	InvalidResponse(gloo_net::Error),
}

impl RegistrationError {
	/// A message suitable for showing to the user. Uses the message the server sent if there was one.
	pub fn user_message(&self) -> String {
		match self {
			Self::Rejected {
				message: Some(message), ..
			} if !message.is_empty() => message.clone(),
			_ => String::from(GENERIC_FAILURE_MESSAGE),
		}
	}
}

impl fmt::Display for RegistrationError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Transport(error) => write!(f, "Failed to send registration: {}", error),
			Self::Rejected {
				status,
				message: Some(message),
			} => write!(f, "Registration rejected ({}): {}", status, message),
			Self::Rejected { status, message: None } => write!(f, "Registration rejected ({})", status),
			Self::InvalidResponse(error) => write!(f, "An invalid registration response was received: {}", error),
		}
	}
}

impl From<gloo_net::Error> for RegistrationError {
	fn from(error: gloo_net::Error) -> Self {
		Self::Transport(error)
	}
}

/// Something that can submit a registration. The form only talks to the server through this.
#[allow(async_fn_in_trait)]
pub trait RegistrationClient {
	async fn register(&self, request: &RegistrationRequest) -> Result<RegisterResponse, RegistrationError>;
}

/// Sends registrations to the server over HTTP. Each call is a single request with no retries.
pub struct HttpRegistrationClient {
	endpoint: String,
}

impl HttpRegistrationClient {
	pub fn new(endpoint: impl Into<String>) -> Self {
		Self {
			endpoint: endpoint.into(),
		}
	}
}

impl Default for HttpRegistrationClient {
	fn default() -> Self {
		Self::new(REGISTER_ENDPOINT)
	}
}

/// Turns an error response into a registration error, keeping the server's message if the body carries one.
fn rejection(status: u16, body: &str) -> RegistrationError {
	let message = match serde_json::from_str::<ErrorResponse>(body) {
		Ok(body) => Some(body.error.message),
		Err(_) => None,
	};
	RegistrationError::Rejected { status, message }
}

impl RegistrationClient for HttpRegistrationClient {
	async fn register(&self, request: &RegistrationRequest) -> Result<RegisterResponse, RegistrationError> {
		let response = Request::post(&self.endpoint).json(request)?.send().await?;

		if !response.ok() {
			let status = response.status();
			// A body that can't be read is treated like one without a message
			let body = response.text().await.unwrap_or_default();
			return Err(rejection(status, &body));
		}

		response.json().await.map_err(RegistrationError::InvalidResponse)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn server_message_is_shown_when_present() {
		let error = RegistrationError::Rejected {
			status: 409,
			message: Some(String::from("Email exists")),
		};
		assert_eq!(error.user_message(), "Email exists");
		assert_eq!(error.to_string(), "Registration rejected (409): Email exists");
	}

	#[test]
	fn rejection_reads_error_message_from_body() {
		let error = rejection(409, r#"{"error":{"message":"Email exists"}}"#);
		assert!(matches!(
			&error,
			RegistrationError::Rejected { status: 409, message: Some(message) } if message == "Email exists"
		));
		assert_eq!(error.user_message(), "Email exists");
	}

	#[test]
	fn rejection_without_readable_message() {
		let error = rejection(502, "<html>Bad Gateway</html>");
		assert!(matches!(error, RegistrationError::Rejected { status: 502, message: None }));
		assert_eq!(error.user_message(), GENERIC_FAILURE_MESSAGE);

		let error = rejection(400, r#"{"error":{}}"#);
		assert!(matches!(error, RegistrationError::Rejected { status: 400, message: None }));
		assert_eq!(error.user_message(), GENERIC_FAILURE_MESSAGE);

		let error = rejection(500, "");
		assert!(matches!(error, RegistrationError::Rejected { status: 500, message: None }));
	}

	#[test]
	fn generic_message_without_server_message() {
		let error = RegistrationError::Rejected {
			status: 500,
			message: None,
		};
		assert_eq!(error.user_message(), GENERIC_FAILURE_MESSAGE);

		let error = RegistrationError::Rejected {
			status: 400,
			message: Some(String::new()),
		};
		assert_eq!(error.user_message(), GENERIC_FAILURE_MESSAGE);

		let error = RegistrationError::Transport(gloo_net::Error::GlooError(String::from("offline")));
		assert_eq!(error.user_message(), GENERIC_FAILURE_MESSAGE);
	}
}
