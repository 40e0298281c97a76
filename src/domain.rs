mod message;
mod required_field;
mod submission;

pub use message::format_message;
pub use required_field::RequiredField;
pub use submission::Submission;
