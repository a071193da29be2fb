use super::{credential_accessors, messages, CredentialForm, Submission, SubmitOutcome};
use leboncoin_api::Session;
use leboncoin_auth::{AuthError, IdentityClient, IdentityService, HOME_PATH};

/// Sign-in form: email and password, logs in on submit
#[derive(Debug, Clone)]
pub struct SignInForm {
    base: CredentialForm,
}

impl SignInForm {
    pub fn new() -> Self {
        Self {
            base: CredentialForm::new(),
        }
    }

    credential_accessors!();

    pub fn is_valid(&self) -> bool {
        self.base.fields_valid()
    }

    /// Validate and enter the submitting phase.
    ///
    /// On invalid input every field is marked touched so its error shows,
    /// and no submission is produced.
    pub fn begin_submit(&mut self) -> Result<Submission, SubmitOutcome> {
        let valid = self.is_valid();
        self.base.begin(valid)
    }

    /// Fold the login result back into the form
    pub fn finish(&mut self, result: Result<Session, AuthError>) -> SubmitOutcome {
        match result {
            Ok(_) => {
                self.base.settle();
                SubmitOutcome::SignedIn
            }
            Err(e) => {
                tracing::error!("Login error: {}", e);
                let kind = e.failure_kind();
                self.base.fail(kind, messages::sign_in_failure(kind))
            }
        }
    }

    /// Full submission: validate, log in, and go home on success
    pub async fn submit<S: IdentityService>(&mut self, client: &IdentityClient<S>) -> SubmitOutcome {
        let submission = match self.begin_submit() {
            Ok(submission) => submission,
            Err(outcome) => return outcome,
        };

        let result = client.login(submission.login()).await;
        let outcome = self.finish(result);

        if outcome == SubmitOutcome::SignedIn {
            client.router().navigate(HOME_PATH);
        }
        outcome
    }
}

impl Default for SignInForm {
    fn default() -> Self {
        Self::new()
    }
}
