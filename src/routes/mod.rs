pub use send_email::error_chain_fmt;

pub mod home;
pub mod send_email;
