//! Enrollment code generation.
//!
//! Codes look like `ENR-2026-7KQ4MX`. Generation is a pure function over a
//! caller-supplied random source and a uniqueness-check closure, so callers
//! control both the randomness and how "already taken" is answered (a
//! pre-fetched set of existing codes, a test stub, etc.).

use rand::Rng;

/// Characters used for the random suffix. Ambiguous glyphs (0/O, 1/I/L)
/// are excluded since codes are read aloud at the registrar's window.
const CODE_ALPHABET: &[u8] = b"23456789ABCDEFGHJKMNPQRSTUVWXYZ";

/// Length of the random suffix.
const SUFFIX_LEN: usize = 6;

/// Generate a unique enrollment code for the given school year.
///
/// `is_taken` is consulted for each candidate; generation retries until it
/// returns `false`. With a 31-character alphabet and 6 positions the
/// collision space is ~887M codes, so retries are rare in practice.
pub fn generate_enrollment_code<R, F>(rng: &mut R, year: i32, mut is_taken: F) -> String
where
    R: Rng + ?Sized,
    F: FnMut(&str) -> bool,
{
    loop {
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
            .collect();
        let code = format!("ENR-{year}-{suffix}");
        if !is_taken(&code) {
            return code;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_code_format() {
        let mut rng = rand::rng();
        let code = generate_enrollment_code(&mut rng, 2026, |_| false);
        assert!(code.starts_with("ENR-2026-"));
        assert_eq!(code.len(), "ENR-2026-".len() + SUFFIX_LEN);
    }

    #[test]
    fn test_suffix_uses_only_alphabet_chars() {
        let mut rng = rand::rng();
        let code = generate_enrollment_code(&mut rng, 2026, |_| false);
        let suffix = code.rsplit('-').next().unwrap();
        for c in suffix.bytes() {
            assert!(CODE_ALPHABET.contains(&c), "unexpected character {}", c as char);
        }
    }

    #[test]
    fn test_retries_until_unique() {
        let mut rng = rand::rng();
        let mut seen = HashSet::new();
        // Pre-claim the first three candidates, forcing retries.
        let mut rejections = 0;
        let code = generate_enrollment_code(&mut rng, 2026, |candidate| {
            if rejections < 3 {
                rejections += 1;
                seen.insert(candidate.to_string());
                true
            } else {
                false
            }
        });
        assert_eq!(rejections, 3);
        assert!(!seen.contains(&code));
    }
}
