//! One-week sample upload, offered as a download for demos and tests.

/// Served as `sample_week.csv`.
pub const SAMPLE_FILENAME: &str = "sample_week.csv";

/// 21 rows: 08:00, 13:00 and 20:00 readings from 2025-05-12 to 2025-05-18.
pub const SAMPLE_WEEK_CSV: &str = "timestamp,glucose
2025-05-12 08:00,110
2025-05-12 13:00,140
2025-05-12 20:00,180
2025-05-13 08:00,95
2025-05-13 13:00,130
2025-05-13 20:00,160
2025-05-14 08:00,105
2025-05-14 13:00,145
2025-05-14 20:00,170
2025-05-15 08:00,115
2025-05-15 13:00,135
2025-05-15 20:00,175
2025-05-16 08:00,100
2025-05-16 13:00,150
2025-05-16 20:00,165
2025-05-17 08:00,108
2025-05-17 13:00,138
2025-05-17 20:00,172
2025-05-18 08:00,112
2025-05-18 13:00,142
2025-05-18 20:00,178";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_has_header_and_21_rows() {
        let mut lines = SAMPLE_WEEK_CSV.lines();
        assert_eq!(lines.next(), Some("timestamp,glucose"));
        assert_eq!(lines.count(), 21);
        assert!(!SAMPLE_WEEK_CSV.ends_with('\n'));
    }
}
