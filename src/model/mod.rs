//! Form inputs, the user entity and their validation rules.

pub mod login;
pub mod rot13;
pub mod user;
pub mod validation;

pub use login::{LoginAttempt, LoginInput};
pub use rot13::rot13;
pub use user::{SignupInput, UserRecord};
pub use validation::{Clock, Validate, Validator, Violation, Violations};
