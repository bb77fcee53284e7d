use super::user::{
    FIELD_PASSWORD, FIELD_USER_NAME, PASSWORD_MAX, PASSWORD_MIN, USER_NAME_MAX, USER_NAME_MIN,
};
use super::validation::{Validate, Violations};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Raw login form as posted by the browser.
#[derive(ToSchema, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginInput {
    pub user_name: String,
    pub password: String,
}

impl fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginInput")
            .field("user_name", &self.user_name)
            .field("password", &"***")
            .finish()
    }
}

impl Validate for LoginInput {
    type Valid = LoginAttempt;

    fn validate(&self, _today: NaiveDate) -> Result<LoginAttempt, Violations> {
        let mut violations = Violations::new();

        violations.not_empty(FIELD_USER_NAME, &self.user_name);
        violations.size(FIELD_USER_NAME, &self.user_name, USER_NAME_MIN, USER_NAME_MAX);
        violations.not_empty(FIELD_PASSWORD, &self.password);
        violations.size(FIELD_PASSWORD, &self.password, PASSWORD_MIN, PASSWORD_MAX);

        if violations.is_empty() {
            Ok(LoginAttempt {
                user_name: self.user_name.clone(),
                password: self.password.clone(),
            })
        } else {
            Err(violations)
        }
    }
}

/// A validated login request. The password is kept exactly as typed.
#[derive(Clone)]
pub struct LoginAttempt {
    user_name: String,
    password: String,
}

impl LoginAttempt {
    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for LoginAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginAttempt")
            .field("user_name", &self.user_name)
            .field("password", &"***")
            .finish()
    }
}
