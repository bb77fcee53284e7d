//! Server-rendered HTML pages for the signup and login flows.

use crate::model::{
    user::{
        FIELD_DATE_OF_BIRTH, FIELD_EMAIL_ADDRESS, FIELD_FIRST_NAME, FIELD_LAST_NAME,
        FIELD_PASSWORD, FIELD_USER_NAME,
    },
    LoginInput, SignupInput, Violations,
};

/// Banner shown when the requested user name is already taken.
pub const USER_NAME_EXISTS: &str = "User Name exists. Try another user name";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{body}</body>\n</html>\n",
        escape(title)
    )
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

struct Field<'a> {
    label: &'a str,
    name: &'a str,
    kind: &'a str,
    value: &'a str,
    placeholder: Option<&'a str>,
}

fn render_field(out: &mut String, field: &Field<'_>, violations: &Violations) {
    out.push_str(&format!(
        "<p>\n<label for=\"{name}\">{label}</label>\n<input id=\"{name}\" name=\"{name}\" type=\"{kind}\" value=\"{value}\"",
        name = field.name,
        label = escape(field.label),
        kind = field.kind,
        value = escape(field.value),
    ));
    if let Some(placeholder) = field.placeholder {
        out.push_str(&format!(" placeholder=\"{}\"", escape(placeholder)));
    }
    out.push_str(">\n");
    for message in violations.for_field(field.name) {
        out.push_str(&format!(
            "<span class=\"error\" data-field=\"{}\">{}</span>\n",
            field.name,
            escape(message)
        ));
    }
    out.push_str("</p>\n");
}

fn render_message(out: &mut String, message: Option<&str>) {
    if let Some(message) = message {
        out.push_str(&format!("<p class=\"message\">{}</p>\n", escape(message)));
    }
}

#[must_use]
pub fn index() -> String {
    layout(
        "Welcome",
        "<h1>Welcome</h1>\n<p><a href=\"/signup\">Sign up</a></p>\n<p><a href=\"/login\">Log in</a></p>\n",
    )
}

/// Signup form, pre-filled with `input` except for the password.
#[must_use]
pub fn signup_form(input: &SignupInput, violations: &Violations, message: Option<&str>) -> String {
    let mut body = String::from("<h1>Sign up</h1>\n");
    render_message(&mut body, message);
    body.push_str("<form method=\"post\" action=\"/signup\">\n");

    let fields = [
        Field {
            label: "User name",
            name: FIELD_USER_NAME,
            kind: "text",
            value: &input.user_name,
            placeholder: None,
        },
        Field {
            label: "First name",
            name: FIELD_FIRST_NAME,
            kind: "text",
            value: &input.first_name,
            placeholder: None,
        },
        Field {
            label: "Last name",
            name: FIELD_LAST_NAME,
            kind: "text",
            value: &input.last_name,
            placeholder: None,
        },
        Field {
            label: "Password",
            name: FIELD_PASSWORD,
            kind: "password",
            value: "",
            placeholder: None,
        },
        Field {
            label: "Email address",
            name: FIELD_EMAIL_ADDRESS,
            kind: "email",
            value: &input.email_address,
            placeholder: None,
        },
        Field {
            label: "Date of birth",
            name: FIELD_DATE_OF_BIRTH,
            kind: "text",
            value: &input.date_of_birth,
            placeholder: Some("MM/dd/yyyy"),
        },
    ];
    for field in &fields {
        render_field(&mut body, field, violations);
    }

    body.push_str("<button type=\"submit\">Sign up</button>\n</form>\n");
    body.push_str("<p>Already registered? <a href=\"/login\">Log in</a></p>\n");

    layout("Sign up", &body)
}

/// Login form, pre-filled with the user name only.
#[must_use]
pub fn login_form(input: &LoginInput, violations: &Violations) -> String {
    let mut body = String::from("<h1>Log in</h1>\n<form method=\"post\" action=\"/login\">\n");

    render_field(
        &mut body,
        &Field {
            label: "User name",
            name: FIELD_USER_NAME,
            kind: "text",
            value: &input.user_name,
            placeholder: None,
        },
        violations,
    );
    render_field(
        &mut body,
        &Field {
            label: "Password",
            name: FIELD_PASSWORD,
            kind: "password",
            value: "",
            placeholder: None,
        },
        violations,
    );

    body.push_str("<button type=\"submit\">Log in</button>\n</form>\n");
    body.push_str("<p>New here? <a href=\"/signup\">Sign up</a></p>\n");

    layout("Log in", &body)
}

#[must_use]
pub fn success(user_name: &str) -> String {
    layout(
        "Login successful",
        &format!(
            "<h1>Login successful</h1>\n<p>Welcome, {}.</p>\n",
            escape(user_name)
        ),
    )
}

/// Same page for an unknown user and a wrong password.
#[must_use]
pub fn failure() -> String {
    layout(
        "Login failed",
        "<h1>Login failed</h1>\n<p>Invalid user name or password.</p>\n<p><a href=\"/login\">Try again</a></p>\n",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_special_characters() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn signup_form_never_echoes_password() {
        let input = SignupInput {
            user_name: "alice".to_string(),
            password: "hunter2".to_string(),
            ..SignupInput::default()
        };
        let html = signup_form(&input, &Violations::new(), None);
        assert!(html.contains("value=\"alice\""));
        assert!(!html.contains("hunter2"));
    }

    #[test]
    fn signup_form_renders_field_errors_and_banner() {
        let mut violations = Violations::new();
        violations.push(FIELD_USER_NAME, "size must be between 4 and 20");
        let html = signup_form(&SignupInput::default(), &violations, Some(USER_NAME_EXISTS));
        assert!(html.contains(
            "<span class=\"error\" data-field=\"userName\">size must be between 4 and 20</span>"
        ));
        assert!(html.contains(USER_NAME_EXISTS));
    }

    #[test]
    fn user_values_are_escaped() {
        let input = LoginInput {
            user_name: "<script>".to_string(),
            password: String::new(),
        };
        let html = login_form(&input, &Violations::new());
        assert!(html.contains("value=\"&lt;script&gt;\""));
        assert!(success("<b>").contains("&lt;b&gt;"));
    }

    #[test]
    fn field_markup_includes_placeholder_and_every_error() {
        let mut violations = Violations::new();
        violations.push(FIELD_PASSWORD, "must not be empty");
        violations.push(FIELD_PASSWORD, "size must be between 4 and 8");
        let html = signup_form(&SignupInput::default(), &violations, Some("<notice>"));

        assert!(html.contains("placeholder=\"MM/dd/yyyy\""));
        assert!(html.contains("<p class=\"message\">&lt;notice&gt;</p>\n"));
        assert!(html.contains(
            "<span class=\"error\" data-field=\"password\">must not be empty</span>\n\
             <span class=\"error\" data-field=\"password\">size must be between 4 and 8</span>\n</p>"
        ));
    }
}
