use fleetdesk_types::validation::{self, LOGIN_SCHEMA};
use fleetdesk_types::{FieldErrors, LoginRequest, TokenPair};

use crate::{error_message, AuthClient, ClientResult};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, FieldErrors> {
        validation::validate(LOGIN_SCHEMA, |field| match field {
            "email" => Some(self.email.as_str()),
            "password" => Some(self.password.as_str()),
            _ => None,
        })
        .into_result()?;

        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginState {
    pub form: LoginForm,
    pub errors: FieldErrors,
    pub error: Option<String>,
    pub submitting: bool,
}

impl LoginState {
    pub fn prepare(&mut self) -> Option<LoginRequest> {
        if self.submitting {
            return None;
        }
        match self.form.validate() {
            Ok(request) => {
                self.errors = FieldErrors::new();
                self.error = None;
                self.submitting = true;
                Some(request)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub fn apply(&mut self, result: &ClientResult<TokenPair>) -> bool {
        self.submitting = false;
        match result {
            Ok(_) => true,
            Err(e) => {
                self.error = Some(error_message(e));
                false
            }
        }
    }

    /// Validates and signs in; the client persists the issued tokens.
    pub async fn submit(&mut self, client: &AuthClient) -> bool {
        let Some(request) = self.prepare() else {
            return false;
        };
        let result = client.login(&request).await;
        self.apply(&result)
    }
}
