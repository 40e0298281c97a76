use crate::domain::{format_message, RequiredField};

/// A contact-form submission, alive for the duration of one request.
#[derive(Debug)]
pub struct Submission {
    pub name: RequiredField,
    pub mail: RequiredField,
    pub issue: RequiredField,
    pub message: RequiredField,
}

impl Submission {
    /// The plain-text body delivered to the receiving inbox.
    pub fn email_body(&self) -> String {
        format!(
            "User: @{name}\nEmail: {mail}\nMessage: {message}",
            name = self.name,
            mail = self.mail,
            message = format_message(self.message.as_ref())
        )
    }
}
