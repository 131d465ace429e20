use std::fmt::Display;
use time::{format_description::FormatItem, macros::format_description, Date};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// A calendar date as seen by an account: something that can name its day of
/// the week and render itself for display.  The display format belongs to the
/// implementor.
pub trait CalendarDate: Display + Ord {
    fn weekday_label(&self) -> String;
}

impl CalendarDate for Date {
    fn weekday_label(&self) -> String {
        self.weekday().to_string()
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_ymd(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, &YMD_FMT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_weekday_label() {
        assert_eq!(date!(2023 - 11 - 12).weekday_label(), "Sunday");
        assert_eq!(date!(2023 - 11 - 16).weekday_label(), "Thursday");
        assert_eq!(date!(2024 - 02 - 29).weekday_label(), "Thursday");
    }

    #[test]
    fn test_display() {
        assert_eq!(date!(2023 - 11 - 16).to_string(), "2023-11-16");
        assert_eq!(date!(2024 - 01 - 05).to_string(), "2024-01-05");
    }

    #[test]
    fn test_parse_ymd() {
        assert_eq!(parse_ymd("2023-11-16").ok(), Some(date!(2023 - 11 - 16)));
        assert!(parse_ymd("2023-02-30").is_err());
        assert!(parse_ymd("16/11/2023").is_err());
    }
}
