use std::sync::{Mutex, PoisonError};

use rand::RngCore;
use rand::rngs::OsRng;

use orc_model::TokenPair;

/// Mints and validates trigger tokens for one action form.
///
/// Owns the two-slot [`TokenPair`] window behind a mutex. Rotation happens
/// when a trigger form is rendered, not when it is submitted, so a page
/// held open across one further render still validates through the
/// previous slot.
pub struct TokenRotor {
    window: Mutex<TokenPair>,
}

impl TokenRotor {
    /// Create a rotor with an empty window; nothing validates until the
    /// first [`mint`](Self::mint).
    pub fn new() -> Self {
        Self {
            window: Mutex::new(TokenPair::new()),
        }
    }

    /// Rotate the window and return the freshly minted token.
    pub fn mint(&self) -> String {
        let mut bytes = [0u8; 8];
        OsRng.fill_bytes(&mut bytes);
        let token = hex(&bytes);

        let mut window = self.window.lock().unwrap_or_else(PoisonError::into_inner);
        window.rotate(&token);
        token
    }

    /// Returns `true` if `submitted` matches the current or previous token.
    ///
    /// A missing submission never validates.
    pub fn accepts(&self, submitted: Option<&str>) -> bool {
        let Some(submitted) = submitted else {
            return false;
        };
        self.window
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .accepts(submitted)
    }
}

impl Default for TokenRotor {
    fn default() -> Self {
        Self::new()
    }
}

fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push_str(&format!("{b:02x}"));
    }
    out
}
