use chrono::{DateTime, Utc};

/// "March 2024".
#[must_use]
pub fn format_month_year(value: DateTime<Utc>) -> String {
    value.format("%B %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_full_month_name() {
        let value = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        assert_eq!(format_month_year(value), "March 2024");
    }
}
