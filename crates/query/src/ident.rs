use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Produce a fresh, collision-free parameter name.
///
/// The name is alphanumeric with a non-numeric leading character: `p`, a
/// process-wide monotonic sequence number in hex, and 128 random bits in
/// hex. The sequence makes repeats impossible for the process lifetime; the
/// random tail keeps collisions across processes sharing a transaction
/// negligible. Never rewound, even when a builder is cleared.
#[must_use]
pub fn fresh_param_id() -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("p{:x}{}", seq, Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_distinct() {
        let ids: HashSet<String> = (0..1000).map(|_| fresh_param_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_ids_are_valid_placeholder_names() {
        for _ in 0..100 {
            let id = fresh_param_id();
            let first = id.chars().next().unwrap();
            assert!(first.is_ascii_alphabetic(), "leading char in {id}");
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric()), "{id}");
        }
    }
}
