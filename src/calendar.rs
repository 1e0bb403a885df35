use time::{macros::format_description, Date, Duration, OffsetDateTime, UtcOffset};

use crate::error::AppError;

/// Resolves "today" in the fixed reference offset every date key is based on.
#[derive(Debug, Clone, Copy)]
pub struct Calendar {
    offset: UtcOffset,
}

impl Calendar {
    pub fn new(offset_hours: i8) -> anyhow::Result<Self> {
        let offset = UtcOffset::from_hms(offset_hours, 0, 0)?;
        Ok(Self { offset })
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    pub fn date_of(&self, at: OffsetDateTime) -> Date {
        at.to_offset(self.offset).date()
    }

    pub fn today(&self) -> Date {
        self.date_of(OffsetDateTime::now_utc())
    }
}

impl Default for Calendar {
    // America/Sao_Paulo, no DST since 2019
    fn default() -> Self {
        Self {
            offset: UtcOffset::from_whole_seconds(-3 * 3600).unwrap_or(UtcOffset::UTC),
        }
    }
}

/// `YYYY-MM-DD`
pub fn date_key(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

pub fn parse_date_key(key: &str) -> Result<Date, AppError> {
    Date::parse(key, format_description!("[year]-[month]-[day]"))
        .map_err(|_| AppError::invalid(format!("`{key}` is not a YYYY-MM-DD date")))
}

/// The `count` calendar days ending at `end`, oldest first.
pub fn days_ending(end: Date, count: u32) -> Vec<Date> {
    (0..i64::from(count))
        .rev()
        .map(|back| end - Duration::days(back))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn formats_and_parses_keys() {
        let d = date!(2024 - 03 - 07);
        assert_eq!(date_key(d), "2024-03-07");
        assert_eq!(parse_date_key("2024-03-07").unwrap(), d);
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!(matches!(
            parse_date_key("07/03/2024"),
            Err(AppError::InvalidInput(_))
        ));
        assert!(parse_date_key("2024-02-30").is_err());
    }

    #[test]
    fn today_uses_reference_offset() {
        let cal = Calendar::new(-3).unwrap();
        // 01:30 UTC is still the previous evening at -03:00
        let at = datetime!(2024-05-10 01:30 UTC);
        assert_eq!(date_key(cal.date_of(at)), "2024-05-09");

        let utc = Calendar::new(0).unwrap();
        assert_eq!(date_key(utc.date_of(at)), "2024-05-10");
    }

    #[test]
    fn days_ending_is_oldest_first_and_crosses_months() {
        let days = days_ending(date!(2024 - 03 - 02), 4);
        let keys: Vec<_> = days.into_iter().map(date_key).collect();
        assert_eq!(
            keys,
            vec!["2024-02-28", "2024-02-29", "2024-03-01", "2024-03-02"]
        );
        assert!(days_ending(date!(2024 - 03 - 02), 0).is_empty());
    }
}
