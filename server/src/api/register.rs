// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::error_response;
use crate::config::{BackendConfig, ConfigDocument};
use account_register_shared::messages::register::{RegistrationRequest, REGISTER_ENDPOINT};
use account_register_shared::validation::{validate_email, validate_password, Field};
use async_std::net::TcpStream;
use async_std::sync::Arc;
use http_types::{Body, Method, Url};
use tide::{Request, StatusCode};

/// POST /api/auth/register
/// Checks the registration data and passes it on to the account backend, relaying whatever the backend answers.
pub async fn register(mut request: Request<()>, config: Arc<ConfigDocument>) -> tide::Result {
	let registration: RegistrationRequest = match request.body_json().await {
		Ok(data) => data,
		Err(error) => {
			tide::log::info!("Received unreadable registration data: {}", error);
			return error_response(StatusCode::BadRequest, "The registration data couldn't be read.");
		}
	};

	// The browser checks these too, but requests don't have to come from the browser.
	let check = validate_email(&registration.email)
		.map_err(|error| (Field::Email, error))
		.and_then(|_| validate_password(&registration.password).map_err(|error| (Field::Password, error)));
	if let Err((field, error)) = check {
		return error_response(StatusCode::UnprocessableEntity, &format!("{}: {}", field, error));
	}

	match forward_registration(&config.backend, &registration).await {
		Ok(response) => {
			tide::log::info!("Registration forwarded; backend responded with {}", response.status());
			Ok(relay_response(response))
		}
		Err(error) => {
			tide::log::error!("Failed to forward registration to the backend: {}", error);
			error_response(
				StatusCode::BadGateway,
				"The registration service is unavailable. Please try again later.",
			)
		}
	}
}

/// Headers that describe the connection to the backend rather than the response. Framing for the browser is worked
/// out again from the body when the response is written.
const HOP_BY_HOP_HEADERS: &[&str] = &[
	"connection",
	"keep-alive",
	"proxy-authenticate",
	"proxy-authorization",
	"te",
	"trailer",
	"transfer-encoding",
	"upgrade",
	"content-length",
];

fn relay_response(mut response: http_types::Response) -> tide::Response {
	for header in HOP_BY_HOP_HEADERS {
		response.remove_header(*header);
	}
	response.into()
}

async fn forward_registration(
	backend: &BackendConfig,
	registration: &RegistrationRequest,
) -> http_types::Result<http_types::Response> {
	let stream = TcpStream::connect((backend.host.as_str(), backend.port)).await?;
	let url = Url::parse(&format!("http://{}:{}{}", backend.host, backend.port, REGISTER_ENDPOINT))?;
	let mut backend_request = http_types::Request::new(Method::Post, url);
	backend_request.set_body(Body::from_json(registration)?);
	async_h1::connect(stream, backend_request).await
}
