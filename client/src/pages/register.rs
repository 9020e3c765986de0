// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::api::HttpRegistrationClient;
use crate::components::field_errors::FieldErrors;
use crate::form::{FormSnapshot, RegistrationForm, SubmissionState};
use account_register_shared::validation::{Field, ValidationError};
use std::rc::Rc;
use sycamore::futures::spawn_local_scoped;
use sycamore::prelude::*;
use web_sys::Event as WebEvent;

fn banner_message(state: &FormSnapshot) -> Option<(&'static str, String)> {
	match state.submission {
		SubmissionState::Success => {
			let message = match &state.registration {
				Some(registration) if registration.requires_email_verification => format!(
					"Your account has been created. Check {} for a link to verify your email address.",
					registration.email
				),
				_ => String::from("Your account has been created."),
			};
			Some(("status success", message))
		}
		SubmissionState::Error => {
			let message = state.error_message.clone().unwrap_or_default();
			Some(("status error", message))
		}
		SubmissionState::Idle | SubmissionState::Loading => None,
	}
}

fn error_class(errors: &ReadSignal<Vec<ValidationError>>) -> &'static str {
	if errors.get().is_empty() {
		""
	} else {
		"error"
	}
}

#[component]
pub fn RegistrationView<G: Html>(ctx: Scope<'_>) -> View<G> {
	log::debug!("Activating registration view");

	let form = Rc::new(RegistrationForm::new(HttpRegistrationClient::default()));
	let snapshot = create_rc_signal(form.snapshot());
	{
		let snapshot = snapshot.clone();
		form.subscribe(move |state| snapshot.set(state.clone()));
	}
	let state = create_memo(ctx, move || (*snapshot.get()).clone());

	let email = create_signal(ctx, String::new());
	let password = create_signal(ctx, String::new());
	let confirm_password = create_signal(ctx, String::new());
	let fields = [
		(Field::Email, email),
		(Field::Password, password),
		(Field::ConfirmPassword, confirm_password),
	];

	// Typing goes into the form; setting a field to the value it already has does nothing, so the two directions
	// don't feed each other.
	for (field, signal) in fields {
		let form = Rc::clone(&form);
		create_effect(ctx, move || form.set_field(field, (*signal.get()).clone()));
	}
	// The form can change values on its own (clearing everything after a registration).
	create_effect(ctx, move || {
		let state = state.get();
		for (field, signal) in fields {
			if *signal.get_untracked() != state.value(field) {
				signal.set(state.value(field).to_owned());
			}
		}
	});

	let email_errors = create_memo(ctx, move || state.get().visible_errors(Field::Email).to_vec());
	let password_errors = create_memo(ctx, move || state.get().visible_errors(Field::Password).to_vec());
	let confirm_password_errors =
		create_memo(ctx, move || state.get().visible_errors(Field::ConfirmPassword).to_vec());
	let submit_disabled = create_memo(ctx, move || !state.get().can_submit());
	let loading = create_memo(ctx, move || state.get().is_loading());
	let banner = create_memo(ctx, move || banner_message(&state.get()));

	let touch_handler = |field: Field| {
		let form = Rc::clone(&form);
		move |_event: WebEvent| form.touch(field)
	};

	let form_submission_handler = {
		let form = Rc::clone(&form);
		move |event: WebEvent| {
			event.prevent_default();

			let form = Rc::clone(&form);
			spawn_local_scoped(ctx, async move {
				let outcome = form.submit().await;
				log::debug!("Registration submission finished: {:?}", outcome);
			});
		}
	};

	view! {
		ctx,
		h1 { "Register an Account" }
		form(id="register_user", novalidate=true, on:submit=form_submission_handler) {
			div(class="input_with_message") {
				label(for="register_email") { "Email: " }
				input(
					id="register_email",
					type="email",
					autocomplete="email",
					class=error_class(email_errors),
					bind:value=email,
					on:blur=touch_handler(Field::Email)
				)
				FieldErrors(errors=email_errors)
			}
			div(class="input_with_message") {
				label(for="register_password") { "Password: " }
				input(
					id="register_password",
					type="password",
					autocomplete="new-password",
					class=error_class(password_errors),
					bind:value=password,
					on:blur=touch_handler(Field::Password)
				)
				FieldErrors(errors=password_errors)
			}
			div(class="input_with_message") {
				label(for="register_confirm_password") { "Confirm password: " }
				input(
					id="register_confirm_password",
					type="password",
					autocomplete="new-password",
					class=error_class(confirm_password_errors),
					bind:value=confirm_password,
					on:blur=touch_handler(Field::ConfirmPassword)
				)
				FieldErrors(errors=confirm_password_errors)
			}
			button(type="submit", disabled=*submit_disabled.get()) {
				(if *loading.get() { "Registering..." } else { "Register" })
			}
		}
		(
			match (*banner.get()).clone() {
				Some((class, message)) => view! {
					ctx,
					div(class=class) { (message) }
				},
				None => view! { ctx, }
			}
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use account_register_shared::messages::register::RegisterResponse;

	#[test]
	fn banner_follows_submission_state() {
		let mut state = FormSnapshot::new();
		assert_eq!(banner_message(&state), None);

		state.submission = SubmissionState::Loading;
		assert_eq!(banner_message(&state), None);

		state.submission = SubmissionState::Error;
		state.error_message = Some(String::from("Email exists"));
		assert_eq!(
			banner_message(&state),
			Some(("status error", String::from("Email exists")))
		);

		state.submission = SubmissionState::Success;
		state.registration = Some(RegisterResponse {
			user_id: String::from("1"),
			email: String::from("a@b.com"),
			requires_email_verification: false,
		});
		assert_eq!(
			banner_message(&state),
			Some(("status success", String::from("Your account has been created.")))
		);
	}

	#[test]
	fn banner_mentions_verification_when_required() {
		let mut state = FormSnapshot::new();
		state.submission = SubmissionState::Success;
		state.registration = Some(RegisterResponse {
			user_id: String::from("1"),
			email: String::from("a@b.com"),
			requires_email_verification: true,
		});
		let (class, message) = banner_message(&state).unwrap();
		assert_eq!(class, "status success");
		assert!(message.contains("a@b.com"));
	}
}
