use std::ops::Deref;

mod account;
mod delete;
mod sign_in;
mod sign_up;

pub use account::*;
pub use delete::DeleteAccountInput;
pub use sign_in::*;
pub use sign_up::SignUpInput;

pub const DEFAULT_SESSION_DAYS: u64 = 7;

#[derive(Clone)]
pub struct Command {
    state: recipebook_cloud::State,
    jwt_secret: String,
    session_days: u64,
}

impl Deref for Command {
    type Target = recipebook_cloud::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: recipebook_cloud::State, jwt_secret: impl Into<String>) -> Self {
        Self {
            state,
            jwt_secret: jwt_secret.into(),
            session_days: DEFAULT_SESSION_DAYS,
        }
    }

    pub fn session_days(mut self, days: u64) -> Self {
        self.session_days = days;
        self
    }
}
