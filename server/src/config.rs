// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use knuffel::Decode;
use miette::{IntoDiagnostic, Result};
use std::fs;

/// Node names are the field names in kebab case (`listen-address`, `static-dir`).
#[derive(Debug, Decode)]
pub struct ConfigDocument {
	#[knuffel(child, unwrap(argument))]
	pub listen_address: String,
	/// Directory holding the built client (index.html and the WASM bundle)
	#[knuffel(child, unwrap(argument))]
	pub static_dir: String,
	#[knuffel(child)]
	pub backend: BackendConfig,
}

/// Where registrations are forwarded. Plain HTTP only.
#[derive(Debug, Decode)]
pub struct BackendConfig {
	#[knuffel(child, unwrap(argument))]
	pub host: String,
	#[knuffel(child, unwrap(argument))]
	pub port: u16,
}

pub fn parse_config(config_path: &str) -> Result<ConfigDocument> {
	let config_file_contents = fs::read_to_string(config_path).into_diagnostic()?;
	let config = knuffel::parse(config_path, &config_file_contents).into_diagnostic()?;
	Ok(config)
}
