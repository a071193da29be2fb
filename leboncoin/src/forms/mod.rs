pub mod messages;
mod sign_in;
mod sign_up;
pub mod validators;

pub use sign_in::SignInForm;
pub use sign_up::SignUpForm;

use leboncoin_api::{FailureKind, Login, Register, Request};
use messages::Field;
use secrecy::{ExposeSecret, SecretString};
use validators::FieldError;

/// One text input and whether the user has interacted with it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldState {
    value: String,
    touched: bool,
}

impl FieldState {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.touched = true;
    }

    pub fn touch(&mut self) {
        self.touched = true;
    }
}

/// Where a form is in its submission cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting,
}

/// Result of one submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent
    Invalid,
    /// A submission is already in flight
    Busy,
    SignedIn,
    /// Account created. `signed_in` is false when the follow-up login failed.
    Registered { signed_in: bool },
    Failed(FailureKind),
}

/// Validated credentials captured at submit time
pub struct Submission {
    email: String,
    password: SecretString,
}

impl Submission {
    fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: SecretString::from(password.to_string()),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn login(&self) -> Login {
        Request::auth().login(self.email.clone(), self.password.expose_secret())
    }

    pub fn register(&self) -> Register {
        Request::auth().register(self.email.clone(), self.password.expose_secret())
    }
}

/// State shared by the sign-in and sign-up forms
#[derive(Debug, Clone)]
pub(crate) struct CredentialForm {
    pub(crate) email: FieldState,
    pub(crate) password: FieldState,
    pub(crate) phase: FormPhase,
    pub(crate) error_message: Option<&'static str>,
    pub(crate) hide_password: bool,
}

impl CredentialForm {
    pub(crate) fn new() -> Self {
        Self {
            email: FieldState::default(),
            password: FieldState::default(),
            phase: FormPhase::Idle,
            error_message: None,
            hide_password: true,
        }
    }

    pub(crate) fn fields_valid(&self) -> bool {
        validators::validate_email(self.email.value()).is_ok()
            && validators::validate_password(self.password.value()).is_ok()
    }

    pub(crate) fn email_error(&self) -> Option<&'static str> {
        visible_error(
            &self.email,
            Field::Email,
            validators::validate_email(self.email.value()),
        )
    }

    pub(crate) fn password_error(&self) -> Option<&'static str> {
        visible_error(
            &self.password,
            Field::Password,
            validators::validate_password(self.password.value()),
        )
    }

    /// Validation gate in front of every remote call
    pub(crate) fn begin(&mut self, valid: bool) -> Result<Submission, SubmitOutcome> {
        if self.phase == FormPhase::Submitting {
            return Err(SubmitOutcome::Busy);
        }
        if !valid {
            self.email.touch();
            self.password.touch();
            return Err(SubmitOutcome::Invalid);
        }

        self.phase = FormPhase::Submitting;
        self.error_message = None;
        Ok(Submission::new(self.email.value(), self.password.value()))
    }

    pub(crate) fn settle(&mut self) {
        self.phase = FormPhase::Idle;
    }

    pub(crate) fn fail(&mut self, kind: FailureKind, message: &'static str) -> SubmitOutcome {
        self.phase = FormPhase::Idle;
        self.error_message = Some(message);
        SubmitOutcome::Failed(kind)
    }
}

/// Error text for `field`, shown only once the field has been touched
fn visible_error(
    state: &FieldState,
    field: Field,
    result: Result<(), FieldError>,
) -> Option<&'static str> {
    if !state.is_touched() {
        return None;
    }
    result.err().map(|error| messages::field_error(field, error))
}

/// Accessors both forms expose over their inner [`CredentialForm`]
macro_rules! credential_accessors {
    () => {
        pub fn set_email(&mut self, value: impl Into<String>) {
            self.base.email.set(value);
        }

        pub fn set_password(&mut self, value: impl Into<String>) {
            self.base.password.set(value);
        }

        pub fn email(&self) -> &$crate::forms::FieldState {
            &self.base.email
        }

        pub fn password(&self) -> &$crate::forms::FieldState {
            &self.base.password
        }

        pub fn email_error(&self) -> Option<&'static str> {
            self.base.email_error()
        }

        pub fn password_error(&self) -> Option<&'static str> {
            self.base.password_error()
        }

        /// Message from the last failed submission
        pub fn error_message(&self) -> Option<&'static str> {
            self.base.error_message
        }

        pub fn phase(&self) -> $crate::forms::FormPhase {
            self.base.phase
        }

        pub fn is_loading(&self) -> bool {
            self.base.phase == $crate::forms::FormPhase::Submitting
        }

        pub fn hide_password(&self) -> bool {
            self.base.hide_password
        }

        pub fn toggle_password_visibility(&mut self) {
            self.base.hide_password = !self.base.hide_password;
        }
    };
}

pub(crate) use credential_accessors;
