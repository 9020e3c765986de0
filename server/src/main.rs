// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use async_std::sync::Arc;
use clap::Parser;
use miette::IntoDiagnostic;

mod api;
mod args;
mod config;
mod web;
use args::CliArgs;
use config::parse_config;

#[async_std::main]
async fn main() -> miette::Result<()> {
	let args = CliArgs::parse();
	let config = Arc::new(parse_config(&args.config)?);

	tide::log::start();

	let mut app = tide::new();
	api::add_routes(&mut app, Arc::clone(&config))?;
	web::add_routes(&mut app, &config)?;

	tide::log::info!(
		"Serving {} on {}, forwarding registrations to {}:{}",
		config.static_dir,
		config.listen_address,
		config.backend.host,
		config.backend.port
	);
	app.listen(config.listen_address.clone()).await.into_diagnostic()?;

	Ok(())
}
