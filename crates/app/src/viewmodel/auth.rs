//! Admin login view model

use dawa_core::Result;

use crate::state::AppState;

/// Login prompt state
#[derive(Debug, Default)]
pub struct AuthPanel {
    pub error: Option<String>,
}

impl AuthPanel {
    pub fn login(&mut self, state: &AppState, passphrase: &str) -> Result<()> {
        match state.login(passphrase) {
            Ok(()) => {
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    pub fn logout(&mut self, state: &AppState) {
        state.logout();
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::memory_state;
    use dawa_core::MemorySlot;

    #[test]
    fn test_failed_login_sets_alert() {
        let (state, _) = memory_state(MemorySlot::new());
        let mut panel = AuthPanel::default();

        assert!(panel.login(&state, "guess").is_err());
        assert_eq!(panel.error.as_deref(), Some("Invalid password!"));

        panel.login(&state, "admin").unwrap();
        assert!(panel.error.is_none());
        assert!(state.is_admin());

        panel.logout(&state);
        assert!(!state.is_admin());
    }
}
