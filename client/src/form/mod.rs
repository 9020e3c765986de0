// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State of the registration form and the submission lifecycle.
//!
//! The form moves `Idle -> Loading -> Success | Error`. A new submission may start from `Success` or `Error`, and
//! editing a field while in either of those returns the form to `Idle`. Only one submission can be in flight: any
//! submit while `Loading` is dropped.

use crate::api::RegistrationClient;
use account_register_shared::validation::{validate_registration, Field};
use std::cell::RefCell;

mod state;
pub use state::{FormSnapshot, SubmissionState};

type Observer = Box<dyn Fn(&FormSnapshot)>;

/// What happened to a call to [`RegistrationForm::submit`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmitOutcome {
	/// A submission was already in flight
	Ignored,
	/// The form had validation errors and nothing was sent
	Invalid,
	Registered,
	Failed,
}

pub struct RegistrationForm<C> {
	client: C,
	state: RefCell<FormSnapshot>,
	observers: RefCell<Vec<Observer>>,
}

impl<C: RegistrationClient> RegistrationForm<C> {
	pub fn new(client: C) -> Self {
		Self {
			client,
			state: RefCell::new(FormSnapshot::new()),
			observers: RefCell::new(Vec::new()),
		}
	}

	pub fn snapshot(&self) -> FormSnapshot {
		self.state.borrow().clone()
	}

	/// Registers a function to be called with the new state after every change.
	///
	/// Observers must not subscribe further observers while being notified.
	pub fn subscribe(&self, observer: impl Fn(&FormSnapshot) + 'static) {
		self.observers.borrow_mut().push(Box::new(observer));
	}

	pub fn set_field(&self, field: Field, value: String) {
		{
			let mut state = self.state.borrow_mut();
			if state.value(field) == value {
				return;
			}
			*state.value_mut(field) = value;
			state.report = validate_registration(&state.input);
			if matches!(state.submission, SubmissionState::Success | SubmissionState::Error) {
				state.submission = SubmissionState::Idle;
				state.error_message = None;
				state.registration = None;
			}
		}
		self.notify();
	}

	/// Marks a field as visited so its errors are shown.
	pub fn touch(&self, field: Field) {
		let newly_touched = self.state.borrow_mut().touched.insert(field);
		if newly_touched {
			self.notify();
		}
	}

	pub async fn submit(&self) -> SubmitOutcome {
		let request = {
			let mut state = self.state.borrow_mut();
			if state.submission == SubmissionState::Loading {
				log::debug!("Dropping registration submit while another is in flight");
				return SubmitOutcome::Ignored;
			}

			state.submission = SubmissionState::Idle;
			state.error_message = None;
			state.registration = None;
			state.submit_attempted = true;
			state.report = validate_registration(&state.input);

			if state.report.is_valid() {
				state.submission = SubmissionState::Loading;
				Some(state.input.to_request())
			} else {
				state.touched.extend(Field::ALL);
				None
			}
		};
		self.notify();

		let Some(request) = request else {
			return SubmitOutcome::Invalid;
		};

		log::debug!("Sending registration for {}", request.email);
		let result = self.client.register(&request).await;

		let outcome = {
			let mut state = self.state.borrow_mut();
			match result {
				Ok(registration) => {
					log::info!("Registered account {}", registration.user_id);
					*state = FormSnapshot {
						submission: SubmissionState::Success,
						registration: Some(registration),
						..FormSnapshot::new()
					};
					SubmitOutcome::Registered
				}
				Err(error) => {
					log::error!("{}", error);
					state.submission = SubmissionState::Error;
					state.error_message = Some(error.user_message());
					SubmitOutcome::Failed
				}
			}
		};
		self.notify();

		outcome
	}

	fn notify(&self) {
		let snapshot = self.snapshot();
		for observer in self.observers.borrow().iter() {
			observer(&snapshot);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::RegistrationError;
	use account_register_shared::messages::register::{RegisterResponse, RegistrationRequest};
	use account_register_shared::validation::ValidationError;
	use futures::channel::oneshot;
	use futures::executor::block_on;
	use std::rc::Rc;

	enum Reply {
		Success,
		Reject(&'static str),
	}

	struct FakeClient {
		calls: RefCell<Vec<RegistrationRequest>>,
		reply: Reply,
		hold: RefCell<Option<oneshot::Receiver<()>>>,
	}

	impl FakeClient {
		fn new(reply: Reply) -> Self {
			Self {
				calls: RefCell::new(Vec::new()),
				reply,
				hold: RefCell::new(None),
			}
		}

		/// Keeps the registration pending until the paired sender fires.
		fn held(reply: Reply, hold: oneshot::Receiver<()>) -> Self {
			let client = Self::new(reply);
			*client.hold.borrow_mut() = Some(hold);
			client
		}
	}

	impl RegistrationClient for FakeClient {
		async fn register(&self, request: &RegistrationRequest) -> Result<RegisterResponse, RegistrationError> {
			self.calls.borrow_mut().push(request.clone());
			let hold = self.hold.borrow_mut().take();
			if let Some(hold) = hold {
				let _ = hold.await;
			}
			match self.reply {
				Reply::Success => Ok(RegisterResponse {
					user_id: String::from("00000000-0000-0000-0000-000000000000"),
					email: request.email.clone(),
					requires_email_verification: false,
				}),
				Reply::Reject(message) => Err(RegistrationError::Rejected {
					status: 409,
					message: Some(String::from(message)),
				}),
			}
		}
	}

	fn fill(form: &RegistrationForm<FakeClient>, email: &str, password: &str, confirm_password: &str) {
		form.set_field(Field::Email, email.to_owned());
		form.set_field(Field::Password, password.to_owned());
		form.set_field(Field::ConfirmPassword, confirm_password.to_owned());
	}

	#[test]
	fn mismatched_passwords_are_not_sent() {
		let form = RegistrationForm::new(FakeClient::new(Reply::Success));
		fill(&form, "a@b.com", "password1", "password2");

		let outcome = block_on(form.submit());

		assert_eq!(outcome, SubmitOutcome::Invalid);
		assert!(form.client.calls.borrow().is_empty());
		let snapshot = form.snapshot();
		assert!(!snapshot.is_valid());
		assert_eq!(snapshot.visible_errors(Field::ConfirmPassword), &[ValidationError::Mismatch]);
		assert_eq!(snapshot.submission, SubmissionState::Idle);
		assert!(snapshot.submit_attempted);
		assert_eq!(snapshot.touched.len(), Field::ALL.len());
	}

	#[test]
	fn successful_registration_clears_fields() {
		let form = RegistrationForm::new(FakeClient::new(Reply::Success));
		fill(&form, "a@b.com", "password1", "password1");

		let outcome = block_on(form.submit());

		assert_eq!(outcome, SubmitOutcome::Registered);
		assert_eq!(
			*form.client.calls.borrow(),
			vec![RegistrationRequest {
				email: String::from("a@b.com"),
				password: String::from("password1"),
			}]
		);
		let snapshot = form.snapshot();
		assert!(snapshot.is_success());
		assert!(!snapshot.is_error());
		for field in Field::ALL {
			assert_eq!(snapshot.value(field), "");
			assert!(snapshot.visible_errors(field).is_empty());
		}
		assert_eq!(snapshot.registration.map(|registration| registration.email), Some(String::from("a@b.com")));
	}

	#[test]
	fn failed_registration_keeps_fields() {
		let form = RegistrationForm::new(FakeClient::new(Reply::Reject("Email exists")));
		fill(&form, "a@b.com", "password1", "password1");

		let outcome = block_on(form.submit());

		assert_eq!(outcome, SubmitOutcome::Failed);
		assert_eq!(form.client.calls.borrow().len(), 1);
		let snapshot = form.snapshot();
		assert!(snapshot.is_error());
		assert!(!snapshot.is_success());
		assert_eq!(snapshot.error_message.as_deref(), Some("Email exists"));
		assert_eq!(snapshot.value(Field::Email), "a@b.com");
		assert_eq!(snapshot.value(Field::Password), "password1");
		assert_eq!(snapshot.value(Field::ConfirmPassword), "password1");
	}

	#[test]
	fn failed_registration_can_be_resubmitted() {
		let form = RegistrationForm::new(FakeClient::new(Reply::Reject("Email exists")));
		fill(&form, "a@b.com", "password1", "password1");

		block_on(form.submit());
		let outcome = block_on(form.submit());

		assert_eq!(outcome, SubmitOutcome::Failed);
		assert_eq!(form.client.calls.borrow().len(), 2);
	}

	#[test]
	fn submit_while_loading_is_dropped() {
		let (release, hold) = oneshot::channel();
		let form = RegistrationForm::new(FakeClient::held(Reply::Success, hold));
		fill(&form, "a@b.com", "password1", "password1");

		let (first, second) = block_on(async {
			futures::join!(form.submit(), async {
				assert!(form.snapshot().is_loading());
				assert!(!form.snapshot().can_submit());
				let outcome = form.submit().await;
				release.send(()).unwrap();
				outcome
			})
		});

		assert_eq!(first, SubmitOutcome::Registered);
		assert_eq!(second, SubmitOutcome::Ignored);
		assert_eq!(form.client.calls.borrow().len(), 1);
		assert!(form.snapshot().is_success());
	}

	#[test]
	fn editing_after_failure_returns_to_idle() {
		let form = RegistrationForm::new(FakeClient::new(Reply::Reject("Email exists")));
		fill(&form, "a@b.com", "password1", "password1");
		block_on(form.submit());

		form.set_field(Field::Email, String::from("c@d.com"));

		let snapshot = form.snapshot();
		assert_eq!(snapshot.submission, SubmissionState::Idle);
		assert_eq!(snapshot.error_message, None);
		assert_eq!(snapshot.value(Field::Email), "c@d.com");
		assert_eq!(snapshot.value(Field::Password), "password1");
	}

	#[test]
	fn editing_after_success_returns_to_idle() {
		let form = RegistrationForm::new(FakeClient::new(Reply::Success));
		fill(&form, "a@b.com", "password1", "password1");
		block_on(form.submit());

		form.set_field(Field::Email, String::from("x"));

		let snapshot = form.snapshot();
		assert_eq!(snapshot.submission, SubmissionState::Idle);
		assert_eq!(snapshot.registration, None);
	}

	#[test]
	fn observers_see_each_change() {
		let form = RegistrationForm::new(FakeClient::new(Reply::Success));
		let seen: Rc<RefCell<Vec<SubmissionState>>> = Rc::new(RefCell::new(Vec::new()));
		{
			let seen = Rc::clone(&seen);
			form.subscribe(move |snapshot| seen.borrow_mut().push(snapshot.submission));
		}

		fill(&form, "a@b.com", "password1", "password1");
		// Same value again: nothing changes, nobody is told
		form.set_field(Field::Email, String::from("a@b.com"));
		block_on(form.submit());

		assert_eq!(
			*seen.borrow(),
			vec![
				SubmissionState::Idle,
				SubmissionState::Idle,
				SubmissionState::Idle,
				SubmissionState::Loading,
				SubmissionState::Success,
			]
		);
	}

	#[test]
	fn touch_reveals_field_errors() {
		let form = RegistrationForm::new(FakeClient::new(Reply::Success));
		form.set_field(Field::Password, String::from("short"));
		assert!(form.snapshot().visible_errors(Field::Password).is_empty());

		form.touch(Field::Password);

		assert_eq!(
			form.snapshot().visible_errors(Field::Password),
			&[ValidationError::TooShort { min: 8 }]
		);
		assert!(form.snapshot().visible_errors(Field::Email).is_empty());
	}
}
