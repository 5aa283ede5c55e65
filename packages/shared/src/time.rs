//! Time helpers.
//!
//! Timestamps are carried as Unix-epoch milliseconds (`i64`) everywhere and
//! only formatted as RFC 3339 strings at presentation edges.

use chrono::{DateTime, Utc};

/// Current Unix timestamp in milliseconds (UTC).
pub fn now_unix_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a Unix-millisecond timestamp as an RFC 3339 string (UTC).
///
/// Falls back to the raw number for values outside chrono's representable
/// range.
pub fn unix_millis_to_rfc3339(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|datetime| datetime.to_rfc3339())
        .unwrap_or_else(|| millis.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_unix_millis_is_positive() {
        // テスト項目: 現在時刻が正の Unix ミリ秒で返される
        // when (操作):
        let now = now_unix_millis();

        // then (期待する結果): 2020-01-01 より後
        assert!(now > 1_577_836_800_000);
    }

    #[test]
    fn test_unix_millis_to_rfc3339_epoch() {
        // テスト項目: エポックが RFC 3339 形式に変換される
        // when (操作):
        let formatted = unix_millis_to_rfc3339(0);

        // then (期待する結果):
        assert_eq!(formatted, "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_unix_millis_to_rfc3339_with_millis() {
        // テスト項目: ミリ秒成分が保持される
        // when (操作):
        let formatted = unix_millis_to_rfc3339(1_500);

        // then (期待する結果):
        assert_eq!(formatted, "1970-01-01T00:00:01.500+00:00");
    }
}
