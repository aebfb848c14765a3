/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate an opaque catalog record ID.
///
/// Layout: millisecond timestamp rendered as a decimal string, followed by a
/// 5-char random alphanumeric suffix. Uniqueness is probabilistic, not
/// enforced by the store — collisions would need two records in the same
/// millisecond drawing the same suffix.
pub fn record_id() -> String {
    use rand::Rng;
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..5)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{}{}", now_millis(), suffix)
}
