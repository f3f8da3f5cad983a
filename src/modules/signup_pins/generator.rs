use rand::Rng;

/// 36-symbol PIN alphabet: uppercase ASCII letters and digits.
pub const PIN_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const DEFAULT_PIN_LENGTH: usize = 10;

/// Draw a candidate PIN of `length` characters, each sampled independently and
/// uniformly from [`PIN_ALPHABET`].
///
/// The RNG is injected so tests can seed it. Uniqueness against the store is
/// the caller's concern; this function only produces candidates.
pub fn generate_pin<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| PIN_ALPHABET[rng.gen_range(0..PIN_ALPHABET.len())] as char)
        .collect()
}
