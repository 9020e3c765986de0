// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use sycamore::prelude::*;
use sycamore_router::{HistoryIntegration, Route, Router};

mod api;
mod components;
mod form;
mod pages;
use pages::not_found::NotFoundView;
use pages::register::RegistrationView;
use pages::start_redirect::StartRedirectView;

#[derive(Route)]
enum AppRoutes {
	#[to("/")]
	Start,
	#[to("/register")]
	Register,
	#[not_found]
	NotFound,
}

fn main() {
	console_error_panic_hook::set_once();
	wasm_logger::init(wasm_logger::Config::default());

	sycamore::render(|ctx| {
		view! {
			ctx,
			Router(
				integration=HistoryIntegration::new(),
				view=|ctx, route: &ReadSignal<AppRoutes>| {
					view! {
						ctx,
						(match route.get().as_ref() {
							AppRoutes::Start => view! { ctx, StartRedirectView {} },
							AppRoutes::Register => view! { ctx, RegistrationView {} },
							AppRoutes::NotFound => view! { ctx, NotFoundView {} },
						})
					}
				}
			)
		}
	});
}
