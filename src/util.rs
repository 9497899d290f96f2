/// Polynomial rolling hash over a key's characters, reduced modulo the
/// current table size.
///
/// The multiplier starts at 31415 and is advanced by the hash base modulo
/// `table_size - 1` after every character. Both open-addressed tables rely on
/// this exact recurrence so that entries land in compatible slots across
/// table sizes.
pub fn rolling_hash(key: &str, table_size: usize) -> usize {
    const HASH_BASE: u64 = 31;

    let mut value: u64 = 0;
    let mut a: u64 = 31415;

    for ch in key.chars() {
        value = (ch as u64 + a * value) % table_size as u64;
        a = a * HASH_BASE % (table_size as u64 - 1);
    }

    value as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_hash_is_deterministic() {
        assert_eq!(rolling_hash("hello", 97), rolling_hash("hello", 97));
        assert_eq!(rolling_hash("", 5), 0);
    }

    #[test]
    fn test_rolling_hash_in_range() {
        for key in ["a", "bogong", "feathertop", "a longer key with spaces"] {
            for size in [5, 13, 29, 97] {
                assert!(rolling_hash(key, size) < size);
            }
        }
    }

    #[test]
    fn test_single_char_keys_reduce_to_code_point() {
        // With no prior characters the multiplier never contributes.
        assert_eq!(rolling_hash("a", 5), 97 % 5);
        assert_eq!(rolling_hash("f", 5), 102 % 5);
        assert_eq!(rolling_hash("k", 5), 107 % 5);
    }
}
