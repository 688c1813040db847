/*
[INPUT]:  Step results of one login attempt
[OUTPUT]: Current state and the path taken so far
[POS]:    Auth layer - login attempt lifecycle
[UPDATE]: When flow states or allowed transitions change
*/

use crate::types::LoginState;

/// Tracks one pass through the login flow
///
/// Only forward moves along
/// `Idle → Connecting → NonceRequested → Signing → Submitting → Success`
/// are accepted, plus a jump to `Failed` from any non-terminal state.
#[derive(Debug, Clone)]
pub struct LoginAttempt {
    state: LoginState,
    history: Vec<LoginState>,
}

impl LoginAttempt {
    pub fn new() -> Self {
        Self {
            state: LoginState::Idle,
            history: vec![LoginState::Idle],
        }
    }

    pub fn state(&self) -> LoginState {
        self.state
    }

    /// Every state entered, in order, starting with `Idle`
    pub fn history(&self) -> &[LoginState] {
        &self.history
    }

    /// Move to `next` if the transition is allowed.
    ///
    /// Returns `false` and leaves the attempt untouched otherwise.
    pub fn transition(&mut self, next: LoginState) -> bool {
        let allowed = match next {
            LoginState::Failed => !self.state.is_terminal(),
            _ => self.state.next() == Some(next),
        };

        if allowed {
            tracing::debug!(from = ?self.state, to = ?next, "login state transition");
            self.state = next;
            self.history.push(next);
        } else {
            tracing::debug!(from = ?self.state, to = ?next, "login state transition refused");
        }
        allowed
    }

    /// Step forward along the happy path
    pub fn advance(&mut self) -> bool {
        match self.state.next() {
            Some(next) => self.transition(next),
            None => false,
        }
    }

    pub fn fail(&mut self) -> bool {
        self.transition(LoginState::Failed)
    }
}

impl Default for LoginAttempt {
    fn default() -> Self {
        Self::new()
    }
}
