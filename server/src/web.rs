// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ConfigDocument;
use miette::IntoDiagnostic;
use std::path::Path;
use tide::{Redirect, Server};

/// Serves the built client. The site root sends people to the registration page, which is the client's
/// `index.html`; the client's router takes it from there.
pub fn add_routes(app: &mut Server<()>, config: &ConfigDocument) -> miette::Result<()> {
	let static_dir = Path::new(&config.static_dir);

	app.at("/").get(Redirect::new("/register"));
	app.at("/register").serve_file(static_dir.join("index.html")).into_diagnostic()?;
	app.at("/").serve_dir(static_dir).into_diagnostic()?;

	Ok(())
}
