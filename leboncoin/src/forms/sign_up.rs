use super::messages::{self, Field};
use super::validators::{self, FieldError};
use super::{
    credential_accessors, CredentialForm, FieldState, FormPhase, Submission, SubmitOutcome,
};
use leboncoin_api::{Session, UserIdentity};
use leboncoin_auth::{AuthError, IdentityClient, IdentityService, HOME_PATH, SIGN_IN_PATH};

/// Sign-up form: email, password and confirmation.
///
/// Submitting registers the account, then logs in with the same
/// credentials.
#[derive(Debug, Clone)]
pub struct SignUpForm {
    base: CredentialForm,
    confirm_password: FieldState,
    hide_confirm_password: bool,
}

impl SignUpForm {
    pub fn new() -> Self {
        Self {
            base: CredentialForm::new(),
            confirm_password: FieldState::default(),
            hide_confirm_password: true,
        }
    }

    credential_accessors!();

    pub fn set_confirm_password(&mut self, value: impl Into<String>) {
        self.confirm_password.set(value);
    }

    pub fn touch_confirm_password(&mut self) {
        self.confirm_password.touch();
    }

    pub fn confirm_password(&self) -> &FieldState {
        &self.confirm_password
    }

    pub fn hide_confirm_password(&self) -> bool {
        self.hide_confirm_password
    }

    pub fn toggle_confirm_password_visibility(&mut self) {
        self.hide_confirm_password = !self.hide_confirm_password;
    }

    /// Form-level check: password and confirmation differ
    pub fn has_password_mismatch(&self) -> bool {
        validators::validate_confirmation(
            self.base.password.value(),
            self.confirm_password.value(),
        ) == Err(FieldError::PasswordMismatch)
    }

    pub fn is_valid(&self) -> bool {
        self.base.fields_valid()
            && validators::validate_confirmation(
                self.base.password.value(),
                self.confirm_password.value(),
            )
            .is_ok()
    }

    /// A missing confirmation is reported first; a mismatch only shows once
    /// the confirmation field has been touched
    pub fn confirm_password_error(&self) -> Option<&'static str> {
        if !self.confirm_password.is_touched() {
            return None;
        }
        validators::validate_confirmation(
            self.base.password.value(),
            self.confirm_password.value(),
        )
        .err()
        .map(|error| messages::field_error(Field::ConfirmPassword, error))
    }

    pub fn begin_submit(&mut self) -> Result<Submission, SubmitOutcome> {
        let valid = self.is_valid();
        if !valid && self.base.phase == FormPhase::Idle {
            self.confirm_password.touch();
        }
        self.base.begin(valid)
    }

    /// Fold the registration result into the form.
    ///
    /// `Ok(())` means the account exists and the follow-up login should run;
    /// the form stays in the submitting phase until
    /// [`finish_login`](Self::finish_login).
    pub fn finish_registration(
        &mut self,
        result: Result<UserIdentity, AuthError>,
    ) -> Result<(), SubmitOutcome> {
        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::error!("Signup error: {}", e);
                let kind = e.failure_kind();
                Err(self.base.fail(kind, messages::sign_up_failure(kind)))
            }
        }
    }

    /// Fold the follow-up login result into the form. A failed login does
    /// not undo the registration and is not reported as an error.
    pub fn finish_login(&mut self, result: Result<Session, AuthError>) -> SubmitOutcome {
        self.base.settle();
        match result {
            Ok(_) => SubmitOutcome::Registered { signed_in: true },
            Err(e) => {
                tracing::warn!("Auto-login after signup failed: {}", e);
                SubmitOutcome::Registered { signed_in: false }
            }
        }
    }

    /// Full submission: validate, register, log in, then go home, or to
    /// sign-in if the login step failed
    pub async fn submit<S: IdentityService>(&mut self, client: &IdentityClient<S>) -> SubmitOutcome {
        let submission = match self.begin_submit() {
            Ok(submission) => submission,
            Err(outcome) => return outcome,
        };

        let registered = client.register(submission.register()).await;
        if let Err(outcome) = self.finish_registration(registered) {
            return outcome;
        }

        let logged_in = client.login(submission.login()).await;
        let outcome = self.finish_login(logged_in);

        let destination = match outcome {
            SubmitOutcome::Registered { signed_in: true } => HOME_PATH,
            _ => SIGN_IN_PATH,
        };
        client.router().navigate(destination);

        outcome
    }
}

impl Default for SignUpForm {
    fn default() -> Self {
        Self::new()
    }
}
