use subtle::ConstantTimeEq;

/// Two-slot trigger-token window.
///
/// Holds the currently valid token and the one it replaced. A submission is
/// accepted if it matches either slot, which tolerates exactly one page
/// load rendered before the last rotation. Minting and storage live with
/// the caller; this type only rotates and compares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenPair {
    current: Option<String>,
    previous: Option<String>,
}

impl TokenPair {
    /// Create an empty window that accepts nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `next` as the current token, demoting the old current to
    /// the previous slot. The old previous token stops validating.
    pub fn rotate(&mut self, next: impl Into<String>) {
        self.previous = self.current.take();
        self.current = Some(next.into());
    }

    /// Get the currently valid token, if one was ever minted.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Get the previously valid token, if any.
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Returns `true` if `submitted` matches the current or previous token.
    ///
    /// Comparison is case-sensitive and constant-time per slot; both slots
    /// are always checked. Empty slots never match.
    pub fn accepts(&self, submitted: &str) -> bool {
        let cur = slot_matches(self.current.as_deref(), submitted);
        let prev = slot_matches(self.previous.as_deref(), submitted);
        cur | prev
    }
}

fn slot_matches(slot: Option<&str>, submitted: &str) -> bool {
    match slot {
        Some(token) => token.as_bytes().ct_eq(submitted.as_bytes()).into(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::TokenPair;

    #[test]
    fn empty_window_accepts_nothing() {
        let window = TokenPair::new();

        assert!(!window.accepts(""));
        assert!(!window.accepts("tok1"));
        assert!(window.current().is_none());
        assert!(window.previous().is_none());
    }

    #[test]
    fn rotate_installs_current_and_demotes_previous() {
        let mut window = TokenPair::new();

        window.rotate("tok1");
        assert_eq!(window.current(), Some("tok1"));
        assert!(window.previous().is_none());

        window.rotate("tok2");
        assert_eq!(window.current(), Some("tok2"));
        assert_eq!(window.previous(), Some("tok1"));
    }

    #[test]
    fn accepts_current_and_previous_only() {
        let mut window = TokenPair::new();
        window.rotate("tok0");
        window.rotate("tok1");

        assert!(window.accepts("tok1"));
        assert!(window.accepts("tok0"));
        assert!(!window.accepts("tok2"));
    }

    #[test]
    fn third_rotation_expires_the_oldest_token() {
        let mut window = TokenPair::new();
        window.rotate("tok1");
        window.rotate("tok2");
        window.rotate("tok3");

        assert!(!window.accepts("tok1"));
        assert!(window.accepts("tok2"));
        assert!(window.accepts("tok3"));
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let mut window = TokenPair::new();
        window.rotate("Tok1");

        assert!(window.accepts("Tok1"));
        assert!(!window.accepts("tok1"));
        assert!(!window.accepts("TOK1"));
    }

    #[test]
    fn near_miss_lengths_are_rejected() {
        let mut window = TokenPair::new();
        window.rotate("tok1");

        assert!(!window.accepts("tok"));
        assert!(!window.accepts("tok12"));
    }
}
