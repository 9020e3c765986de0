// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ConfigDocument;
use account_register_shared::messages::register::REGISTER_ENDPOINT;
use account_register_shared::messages::ErrorResponse;
use async_std::sync::Arc;
use http_types::mime;
use tide::{Response, Server, StatusCode};

mod register;
use register::register;

pub fn add_routes(app: &mut Server<()>, config: Arc<ConfigDocument>) -> miette::Result<()> {
	app.at(REGISTER_ENDPOINT).post({
		let config = Arc::clone(&config);
		move |request| register(request, Arc::clone(&config))
	});

	Ok(())
}

/// Builds a response with the JSON error body the client knows how to show
fn error_response(status: StatusCode, message: &str) -> tide::Result {
	let body = serde_json::to_string(&ErrorResponse::new(message))?;
	Ok(Response::builder(status).body(body).content_type(mime::JSON).build())
}
