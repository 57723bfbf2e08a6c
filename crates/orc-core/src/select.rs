//! Instance selection for multi-instance processes.
//!
//! Requests may carry a short, possibly stale identity prefix. Selection
//! never fabricates a handle and never blocks an admin request on a bad
//! prefix; the first instance is the deterministic default.
use std::sync::Arc;

use tracing::debug;

use crate::{error::CoreError, instance::InstanceHandle};

/// Pick the instance a request targets out of the live registry.
///
/// Rules, in order:
/// - empty registry fails with [`CoreError::NoInstances`]; callers should
///   treat this as transient and retry later;
/// - a missing or whitespace-only prefix selects the first instance in
///   startup order;
/// - otherwise the first instance whose encoded identity starts with the
///   raw prefix wins, scanning in startup order;
/// - if nothing matches, the first instance is returned anyway. A stale or
///   mistyped short identifier must not block an admin request.
///
/// Pure selection over the snapshot: no caching, no side effects.
pub fn resolve(
    registry: &[InstanceHandle],
    prefix: Option<&str>,
) -> Result<InstanceHandle, CoreError> {
    let Some(first) = registry.first() else {
        return Err(CoreError::NoInstances);
    };

    let Some(prefix) = prefix.filter(|p| !p.trim().is_empty()) else {
        return Ok(Arc::clone(first));
    };

    match registry.iter().find(|h| h.ident().has_prefix(prefix)) {
        Some(found) => Ok(Arc::clone(found)),
        None => {
            debug!(prefix, "no instance matches prefix, falling back to first");
            Ok(Arc::clone(first))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Arc;

    use orc_model::Ident;

    use super::resolve;
    use crate::error::CoreError;
    use crate::instance::{InstanceHandle, RouterInstance};

    struct StubInstance {
        ident: Ident,
    }

    impl RouterInstance for StubInstance {
        fn ident(&self) -> &Ident {
            &self.ident
        }

        fn property(&self, _key: &str) -> Option<String> {
            None
        }

        fn render_peer_summary(&self, _out: &mut dyn io::Write) -> io::Result<()> {
            Ok(())
        }

        fn render_tunnel_summary(&self, _out: &mut dyn io::Write) -> io::Result<()> {
            Ok(())
        }

        fn render_keyring_summary(&self, _out: &mut dyn io::Write) -> io::Result<()> {
            Ok(())
        }

        fn render_banlist_summary(&self, _out: &mut dyn io::Write) -> io::Result<()> {
            Ok(())
        }
    }

    fn handle(ident: &str) -> InstanceHandle {
        Arc::new(StubInstance {
            ident: Ident::new(ident).unwrap(),
        })
    }

    fn registry() -> Vec<InstanceHandle> {
        vec![handle("abc123xyz"), handle("def456uvw"), handle("abc999qqq")]
    }

    #[test]
    fn empty_registry_fails_with_no_instances() {
        let res = resolve(&[], Some("xyz"));
        assert!(matches!(res, Err(CoreError::NoInstances)));

        let res = resolve(&[], None);
        assert!(matches!(res, Err(CoreError::NoInstances)));
    }

    #[test]
    fn missing_prefix_selects_first() {
        let reg = registry();

        let picked = resolve(&reg, None).unwrap();
        assert!(Arc::ptr_eq(&picked, &reg[0]));

        let picked = resolve(&reg, Some("")).unwrap();
        assert!(Arc::ptr_eq(&picked, &reg[0]));
    }

    #[test]
    fn whitespace_only_prefix_behaves_as_missing() {
        let reg = registry();

        let picked = resolve(&reg, Some("   ")).unwrap();
        assert!(Arc::ptr_eq(&picked, &reg[0]));
    }

    #[test]
    fn unique_prefix_selects_the_matching_instance() {
        let reg = registry();

        let picked = resolve(&reg, Some("def")).unwrap();
        assert!(Arc::ptr_eq(&picked, &reg[1]));
    }

    #[test]
    fn ambiguous_prefix_selects_first_match_in_order() {
        let reg = registry();

        // both reg[0] and reg[2] start with "abc"
        let picked = resolve(&reg, Some("abc")).unwrap();
        assert!(Arc::ptr_eq(&picked, &reg[0]));
    }

    #[test]
    fn unmatched_prefix_falls_back_to_first() {
        let reg = registry();

        let picked = resolve(&reg, Some("zzz")).unwrap();
        assert!(Arc::ptr_eq(&picked, &reg[0]));
    }

    #[test]
    fn always_returns_a_member_of_the_registry() {
        let reg = registry();

        for prefix in [None, Some(""), Some("abc"), Some("def456uvw"), Some("nope")] {
            let picked = resolve(&reg, prefix).unwrap();
            assert!(reg.iter().any(|h| Arc::ptr_eq(h, &picked)));
        }
    }

    #[test]
    fn full_ident_is_its_own_prefix() {
        let reg = registry();

        let picked = resolve(&reg, Some("def456uvw")).unwrap();
        assert!(Arc::ptr_eq(&picked, &reg[1]));
    }
}
