use super::rot13::rot13;
use super::validation::{Validate, Violations, MSG_DATE_FORMAT, MSG_NOT_NULL, MSG_PAST};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

pub const FIELD_USER_NAME: &str = "userName";
pub const FIELD_FIRST_NAME: &str = "firstName";
pub const FIELD_LAST_NAME: &str = "lastName";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_EMAIL_ADDRESS: &str = "emailAddress";
pub const FIELD_DATE_OF_BIRTH: &str = "dateOfBirth";

/// `chrono` pattern for the `MM/dd/yyyy` date of birth field.
pub const DATE_OF_BIRTH_FORMAT: &str = "%m/%d/%Y";

pub const USER_NAME_MIN: usize = 4;
pub const USER_NAME_MAX: usize = 20;
pub const PASSWORD_MIN: usize = 4;
pub const PASSWORD_MAX: usize = 8;

/// Raw signup form as posted by the browser.
///
/// Every field defaults to empty so a partial form still binds and is rejected
/// by validation instead of by the extractor.
#[derive(ToSchema, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupInput {
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub email_address: String,
    /// `MM/dd/yyyy`
    pub date_of_birth: String,
}

impl fmt::Debug for SignupInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupInput")
            .field("user_name", &self.user_name)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"***")
            .field("email_address", &self.email_address)
            .field("date_of_birth", &self.date_of_birth)
            .finish()
    }
}

impl Validate for SignupInput {
    type Valid = UserRecord;

    fn validate(&self, today: NaiveDate) -> Result<UserRecord, Violations> {
        let mut violations = Violations::new();

        violations.not_empty(FIELD_USER_NAME, &self.user_name);
        violations.size(FIELD_USER_NAME, &self.user_name, USER_NAME_MIN, USER_NAME_MAX);
        violations.not_empty(FIELD_FIRST_NAME, &self.first_name);
        violations.not_empty(FIELD_LAST_NAME, &self.last_name);
        violations.not_empty(FIELD_PASSWORD, &self.password);
        violations.size(FIELD_PASSWORD, &self.password, PASSWORD_MIN, PASSWORD_MAX);
        violations.not_empty(FIELD_EMAIL_ADDRESS, &self.email_address);
        violations.email(FIELD_EMAIL_ADDRESS, &self.email_address);

        let date_of_birth = if self.date_of_birth.trim().is_empty() {
            violations.push(FIELD_DATE_OF_BIRTH, MSG_NOT_NULL);
            None
        } else if let Ok(date) = NaiveDate::parse_from_str(&self.date_of_birth, DATE_OF_BIRTH_FORMAT)
        {
            if date >= today {
                violations.push(FIELD_DATE_OF_BIRTH, MSG_PAST);
            }
            Some(date)
        } else {
            violations.push(FIELD_DATE_OF_BIRTH, MSG_DATE_FORMAT);
            None
        };

        match date_of_birth {
            Some(date_of_birth) if violations.is_empty() => Ok(UserRecord::new(
                &self.user_name,
                &self.first_name,
                &self.last_name,
                &self.password,
                &self.email_address,
                date_of_birth,
            )),
            _ => Err(violations),
        }
    }
}

/// A signed-up user.
///
/// The password is stored ROT13-encoded: [`UserRecord::set_password`] applies
/// the transform on every write, so [`UserRecord::password`] never returns the
/// value the user typed.
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    id: Option<i64>,
    user_name: String,
    first_name: String,
    last_name: String,
    password: String,
    email_address: String,
    date_of_birth: NaiveDate,
}

impl UserRecord {
    #[must_use]
    pub fn new(
        user_name: &str,
        first_name: &str,
        last_name: &str,
        password: &str,
        email_address: &str,
        date_of_birth: NaiveDate,
    ) -> Self {
        let mut record = Self {
            id: None,
            user_name: user_name.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            password: String::new(),
            email_address: email_address.to_string(),
            date_of_birth,
        };
        record.set_password(password);
        record
    }

    /// Rebuild a record read back from storage; `stored_password` is already encoded.
    pub(crate) fn from_storage(
        id: i64,
        user_name: String,
        first_name: String,
        last_name: String,
        stored_password: String,
        email_address: String,
        date_of_birth: NaiveDate,
    ) -> Self {
        Self {
            id: Some(id),
            user_name,
            first_name,
            last_name,
            password: stored_password,
            email_address,
            date_of_birth,
        }
    }

    /// Attach the id handed out by the store. Only called on unsaved records.
    pub(crate) fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn set_password(&mut self, password: &str) {
        self.password = rot13(password);
    }

    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// The stored (ROT13) password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    #[must_use]
    pub fn email_address(&self) -> &str {
        &self.email_address
    }

    #[must_use]
    pub const fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("user_name", &self.user_name)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"***")
            .field("email_address", &self.email_address)
            .field("date_of_birth", &self.date_of_birth)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::validation::{MSG_EMAIL, MSG_NOT_EMPTY};
    use anyhow::{Context, Result};

    fn today() -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 6, 15).context("invalid test date")
    }

    fn input(user_name: &str) -> SignupInput {
        SignupInput {
            user_name: user_name.to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            password: "pass".to_string(),
            email_address: "a@b.com".to_string(),
            date_of_birth: "01/31/1990".to_string(),
        }
    }

    #[test]
    fn valid_signup_builds_record_with_encoded_password() -> Result<()> {
        let record = input("alice")
            .validate(today()?)
            .map_err(anyhow::Error::msg)?;
        assert_eq!(record.id(), None);
        assert_eq!(record.user_name(), "alice");
        assert_eq!(record.password(), "cnff");
        assert_eq!(
            record.date_of_birth(),
            NaiveDate::from_ymd_opt(1990, 1, 31).context("invalid date")?
        );
        Ok(())
    }

    #[test]
    fn user_name_length_boundaries() -> Result<()> {
        let today = today()?;
        for (len, accepted) in [(3, false), (4, true), (20, true), (21, false)] {
            let result = input(&"u".repeat(len)).validate(today);
            assert_eq!(result.is_ok(), accepted, "length {len}");
            if let Err(violations) = result {
                assert!(violations.has(FIELD_USER_NAME));
            }
        }
        Ok(())
    }

    #[test]
    fn password_length_boundaries() -> Result<()> {
        let today = today()?;
        for (len, accepted) in [(3, false), (4, true), (8, true), (9, false)] {
            let mut signup = input("alice");
            signup.password = "p".repeat(len);
            assert_eq!(signup.validate(today).is_ok(), accepted, "length {len}");
        }
        Ok(())
    }

    #[test]
    fn future_and_today_birth_dates_are_rejected() -> Result<()> {
        let today = today()?;
        for date in ["06/16/2024", "06/15/2024"] {
            let mut signup = input("alice");
            signup.date_of_birth = date.to_string();
            let violations = signup
                .validate(today)
                .err()
                .context("expected violations")?;
            assert_eq!(
                violations.for_field(FIELD_DATE_OF_BIRTH).collect::<Vec<_>>(),
                vec![MSG_PAST]
            );
        }

        let mut signup = input("alice");
        signup.date_of_birth = "06/14/2024".to_string();
        assert!(signup.validate(today).is_ok());
        Ok(())
    }

    #[test]
    fn malformed_birth_date_is_a_field_error() -> Result<()> {
        let mut signup = input("alice");
        signup.date_of_birth = "1990-01-31".to_string();
        let violations = signup
            .validate(today()?)
            .err()
            .context("expected violations")?;
        assert_eq!(
            violations.for_field(FIELD_DATE_OF_BIRTH).collect::<Vec<_>>(),
            vec![MSG_DATE_FORMAT]
        );
        Ok(())
    }

    #[test]
    fn blank_form_reports_every_field() -> Result<()> {
        let violations = SignupInput::default()
            .validate(today()?)
            .err()
            .context("expected violations")?;
        for field in [
            FIELD_USER_NAME,
            FIELD_FIRST_NAME,
            FIELD_LAST_NAME,
            FIELD_PASSWORD,
            FIELD_EMAIL_ADDRESS,
            FIELD_DATE_OF_BIRTH,
        ] {
            assert!(violations.has(field), "missing violation for {field}");
        }
        assert_eq!(
            violations.for_field(FIELD_DATE_OF_BIRTH).collect::<Vec<_>>(),
            vec![MSG_NOT_NULL]
        );
        assert_eq!(
            violations.for_field(FIELD_EMAIL_ADDRESS).collect::<Vec<_>>(),
            vec![MSG_NOT_EMPTY]
        );
        Ok(())
    }

    #[test]
    fn invalid_email_is_rejected() -> Result<()> {
        let mut signup = input("alice");
        signup.email_address = "alice".to_string();
        let violations = signup
            .validate(today()?)
            .err()
            .context("expected violations")?;
        assert_eq!(
            violations.for_field(FIELD_EMAIL_ADDRESS).collect::<Vec<_>>(),
            vec![MSG_EMAIL]
        );
        Ok(())
    }

    #[test]
    fn set_password_always_encodes() -> Result<()> {
        let mut record = UserRecord::new("alice", "A", "B", "secret", "a@b.com", today()?);
        assert_eq!(record.password(), "frperg");
        record.set_password("frperg");
        assert_eq!(record.password(), "secret");
        Ok(())
    }

    #[test]
    fn signup_input_binds_camel_case_fields() -> Result<()> {
        let value = serde_json::json!({
            "userName": "alice",
            "emailAddress": "a@b.com",
            "dateOfBirth": "01/31/1990"
        });
        let decoded: SignupInput = serde_json::from_value(value)?;
        assert_eq!(decoded.user_name, "alice");
        assert_eq!(decoded.email_address, "a@b.com");
        assert_eq!(decoded.first_name, "");
        Ok(())
    }

    #[test]
    fn debug_output_hides_password() -> Result<()> {
        let record = UserRecord::new("alice", "A", "B", "secret", "a@b.com", today()?);
        assert!(!format!("{record:?}").contains("frperg"));
        assert!(!format!("{:?}", input("alice")).contains("pass\""));
        Ok(())
    }
}
