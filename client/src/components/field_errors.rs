// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use account_register_shared::validation::ValidationError;
use sycamore::prelude::*;

#[derive(Prop)]
pub struct FieldErrorsProps<'a> {
	pub errors: &'a ReadSignal<Vec<ValidationError>>,
}

/// Lists the validation messages for a single form field
#[component]
pub fn FieldErrors<'a, G: Html>(ctx: Scope<'a>, props: FieldErrorsProps<'a>) -> View<G> {
	view! {
		ctx,
		Indexed(
			iterable=props.errors,
			view=|ctx, error| view! {
				ctx,
				span(class="input_error") { (error.to_string()) }
			}
		)
	}
}
