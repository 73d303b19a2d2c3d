use chrono::Utc;

/// Current wall-clock time in epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Modification time for an update of a record last modified at `previous`.
///
/// Never returns a value `<= previous`, so every update observably moves mtime
/// forward even when two writes land in the same millisecond.
pub fn next_mtime(previous: i64) -> i64 {
    now_millis().max(previous + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_mtime_moves_forward_from_future_value() {
        let future = now_millis() + 60_000;
        assert_eq!(next_mtime(future), future + 1);
    }

    #[test]
    fn test_next_mtime_uses_clock_for_old_value() {
        let before = now_millis();
        let mtime = next_mtime(0);
        assert!(mtime >= before);
        assert!(mtime <= now_millis());
    }
}
