//! Session state: credential, profile and the authenticated request path.

mod forms;
mod store;

pub use forms::{LoginRequest, RegistrationForm};
pub use store::{SessionStore, TOKEN_KEY, USER_KEY};
