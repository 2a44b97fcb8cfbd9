//! Constant-time secret comparison.
//!
//! Exposed for any caller that compares secret values (session tokens,
//! stored digests), not only for use inside this crate.

use ring::constant_time::verify_slices_are_equal;

/// Fixed-size buffer burned through when input lengths differ, so the
/// length check itself does not produce a measurably faster return path.
const DUMMY: [u8; 32] = [0u8; 32];

/// Compare two secret strings without leaking where they differ.
///
/// For equal-length inputs, comparison time does not depend on the
/// position of the first differing byte. For unequal lengths a fixed-cost
/// comparison of constant size runs before returning `false`, so timing
/// does not reveal whether the lengths matched.
pub fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        let _ = verify_slices_are_equal(&DUMMY, &DUMMY);
        return false;
    }
    verify_slices_are_equal(a.as_bytes(), b.as_bytes()).is_ok()
}
