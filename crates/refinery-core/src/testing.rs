//! Test-only helpers shared by the unit tests of this crate.

use rand::RngCore;

/// An rng whose every f64 draw lands on the given value.
///
/// Lets tests force a specific outcome band instead of hoping a seeded
/// generator happens to produce one.
pub(crate) struct FixedRoll(pub(crate) f64);

impl RngCore for FixedRoll {
    #[allow(clippy::cast_possible_truncation)]
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn next_u64(&mut self) -> u64 {
        // The standard f64 distribution keeps the top 53 bits of the draw,
        // so place the scaled roll there.
        let fraction = (self.0 * (1u64 << 53) as f64) as u64;
        fraction << 11
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let bytes = self.next_u64().to_le_bytes();
        for (slot, byte) in dest.iter_mut().zip(bytes.iter().cycle()) {
            *slot = *byte;
        }
    }
}
