//! Deterministic per-practitioner coordinate offsets.
//!
//! Practitioners in the same city would otherwise share one map point. The
//! offset is derived from an FNV-1a hash of the practitioner's identity, so
//! repeated runs place the same practitioner at the same coordinate.

/// Largest offset applied to either axis, in degrees.
pub const MAX_JITTER_DEGREES: f64 = 0.05;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a 64-bit hash of `id` and `name`, separated by a unit separator.
///
/// # Examples
///
/// ```
/// use territory_routing::geocode::identity_hash;
///
/// assert_eq!(identity_hash("hcp-1", "Martin"), identity_hash("hcp-1", "Martin"));
/// assert_ne!(identity_hash("hcp-1", "Martin"), identity_hash("hcp-2", "Martin"));
/// ```
pub fn identity_hash(id: &str, name: &str) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in id.bytes().chain(std::iter::once(0x1f)).chain(name.bytes()) {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Splits a hash into (latitude, longitude) offsets in
/// `[-MAX_JITTER_DEGREES, MAX_JITTER_DEGREES]`.
pub fn jitter_offsets(hash: u64) -> (f64, f64) {
    let lat_bits = (hash & 0xffff_ffff) as u32;
    let lng_bits = (hash >> 32) as u32;
    (scale(lat_bits), scale(lng_bits))
}

fn scale(bits: u32) -> f64 {
    let unit = f64::from(bits) / f64::from(u32::MAX);
    (unit * 2.0 - 1.0) * MAX_JITTER_DEGREES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a_empty_input_vector() {
        // FNV-1a of the single separator byte 0x1f
        let expected = (FNV_OFFSET_BASIS ^ 0x1f).wrapping_mul(FNV_PRIME);
        assert_eq!(identity_hash("", ""), expected);
    }

    #[test]
    fn test_separator_disambiguates() {
        assert_ne!(identity_hash("ab", "c"), identity_hash("a", "bc"));
    }

    #[test]
    fn test_offsets_bounded() {
        for bits in [0u64, u64::MAX, 0x8000_0000_8000_0000, 0x1234_5678_9abc_def0] {
            let (lat, lng) = jitter_offsets(bits);
            assert!(lat.abs() <= MAX_JITTER_DEGREES + 1e-12);
            assert!(lng.abs() <= MAX_JITTER_DEGREES + 1e-12);
        }
    }

    #[test]
    fn test_offsets_extremes() {
        let (lat, lng) = jitter_offsets(0);
        assert!((lat + MAX_JITTER_DEGREES).abs() < 1e-12);
        assert!((lng + MAX_JITTER_DEGREES).abs() < 1e-12);
        let (lat, lng) = jitter_offsets(u64::MAX);
        assert!((lat - MAX_JITTER_DEGREES).abs() < 1e-12);
        assert!((lng - MAX_JITTER_DEGREES).abs() < 1e-12);
    }

    #[test]
    fn test_offsets_spread() {
        let hashes: Vec<u64> = (0..50)
            .map(|i| identity_hash(&format!("hcp-{i}"), "Dupont"))
            .collect();
        let lats: Vec<f64> = hashes.iter().map(|&h| jitter_offsets(h).0).collect();
        assert!(lats.iter().any(|&l| l > 0.0));
        assert!(lats.iter().any(|&l| l < 0.0));
    }
}
