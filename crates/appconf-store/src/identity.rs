//! Content-derived document identifiers.
//!
//! Ids are computed from the logical key of a record so that repeated upserts of
//! the same entity always land on the same stored document. The digest is a
//! 128-bit BLAKE3 output rendered as 32 uppercase hex characters.
//!
//! The keys hashed here are internal configuration paths and server names. If ids
//! are ever derived from untrusted input, switch to the full 256-bit output.

use crate::constants::ID_PART_SEPARATOR;

/// Number of digest bytes kept in an id.
pub const ID_DIGEST_LEN: usize = 16;

/// Derives a fixed-length identifier from an ordered list of key parts.
///
/// Parts are joined with `:` and the UTF-8 bytes of the result are hashed.
/// Callers are responsible for rejecting empty parts.
///
/// # Example
///
/// ```rust
/// use appconf_store::identity::derive_id;
///
/// let id = derive_id(&["/var/apps/billing"]);
/// assert_eq!(id.len(), 32);
/// assert_eq!(id, derive_id(&["/var/apps/billing"]));
/// ```
pub fn derive_id(parts: &[&str]) -> String {
    let mut hasher = blake3::Hasher::new();
    let mut separator = [0_u8; 4];
    let separator = ID_PART_SEPARATOR.encode_utf8(&mut separator).as_bytes();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            hasher.update(separator);
        }
        hasher.update(part.as_bytes());
    }
    let mut digest = [0_u8; ID_DIGEST_LEN];
    hasher.finalize_xof().fill(&mut digest);
    hex::encode_upper(digest)
}

/// Id of the application document stored for `path`.
pub fn app_id(path: &str) -> String { derive_id(&[path]) }

/// Id of the server configuration document stored for `(app_path, server)`.
pub fn app_server_config_id(app_path: &str, server: &str) -> String { derive_id(&[app_path, server]) }

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_derive_id_is_uppercase_hex() {
        let id = derive_id(&["c:\\inetpub\\wwwroot\\shop"]);
        assert_eq!(id.len(), ID_DIGEST_LEN * 2);
        assert!(id.chars().all(|c| c.is_ascii_digit() || ('A' ..= 'F').contains(&c)));
    }

    #[test]
    fn test_derive_id_is_deterministic() {
        for _ in 0 .. 10 {
            assert_eq!(derive_id(&["/var/apps/a"]), derive_id(&["/var/apps/a"]));
        }
    }

    #[test]
    fn test_derive_id_distinct_for_large_sample() {
        let mut seen = HashSet::new();
        for i in 0 .. 20_000 {
            let path = format!("/var/apps/service-{}", i);
            assert!(seen.insert(derive_id(&[&path])), "collision for {}", path);
        }
    }

    #[test]
    fn test_parts_are_joined_with_separator() {
        assert_eq!(derive_id(&["/app", "srv1"]), derive_id(&["/app:srv1"]));
        assert_ne!(derive_id(&["/app", "srv1"]), derive_id(&["/appsrv1"]));
    }

    #[test]
    fn test_app_and_config_ids_differ() {
        assert_ne!(app_id("/app"), app_server_config_id("/app", "srv1"));
        assert_ne!(
            app_server_config_id("/app", "srv1"),
            app_server_config_id("/app", "srv2")
        );
    }

    #[test]
    fn test_utf8_paths() {
        assert_ne!(app_id("/usługi/płatności"), app_id("/uslugi/platnosci"));
    }
}
