//! TTL normalization
//!
//! ClouDNS only accepts a fixed set of TTL values
//! (<https://www.cloudns.net/wiki/article/58/>). Requested TTLs are rounded
//! up, so the record lives at least as long as asked for.

/// Allowed TTL values in seconds, ascending
pub const VALID_TTLS: [u32; 12] = [
    60, 300, 900, 1800, 3600, 21600, 43200, 86400, 172800, 259200, 604800, 1209600,
];

/// TTL used when the request exceeds every value in [`VALID_TTLS`] (30 days)
pub const FALLBACK_TTL: u32 = 2592000;

/// Smallest allowed TTL that is `>= requested`, or [`FALLBACK_TTL`]
pub fn normalize_ttl(requested: u32) -> u32 {
    VALID_TTLS
        .iter()
        .copied()
        .find(|&valid| requested <= valid)
        .unwrap_or(FALLBACK_TTL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_up_to_the_next_allowed_value() {
        assert_eq!(normalize_ttl(0), 60);
        assert_eq!(normalize_ttl(1), 60);
        assert_eq!(normalize_ttl(60), 60);
        assert_eq!(normalize_ttl(61), 300);
        assert_eq!(normalize_ttl(3601), 21600);
        assert_eq!(normalize_ttl(1209600), 1209600);
    }

    #[test]
    fn falls_back_above_the_table() {
        assert_eq!(normalize_ttl(1209601), FALLBACK_TTL);
        assert_eq!(normalize_ttl(u32::MAX), FALLBACK_TTL);
    }

    #[test]
    fn every_allowed_value_is_a_fixed_point() {
        for ttl in VALID_TTLS {
            assert_eq!(normalize_ttl(ttl), ttl);
        }
    }
}
