use crate::error::{MailerError, Result};
use chrono::{NaiveDateTime, Timelike};

/// Registration timestamps arrive as e.g. "11/12/2008 10:47" (24-hour).
const REGISTRATION_FORMAT: &str = "%m/%d/%Y %H:%M";

fn parse_registration(timestamp: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(timestamp, REGISTRATION_FORMAT).map_err(|e| {
        MailerError::InvalidTimestamp {
            value: timestamp.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Hour of day (0-23) an attendee registered at.
pub fn registration_hour(timestamp: &str) -> Result<u32> {
    Ok(parse_registration(timestamp)?.hour())
}

/// Full English weekday name ("Monday" through "Sunday") of the registration.
pub fn registration_weekday(timestamp: &str) -> Result<String> {
    Ok(parse_registration(timestamp)?.format("%A").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_hour_from_valid_timestamp() {
        assert_eq!(registration_hour("03/14/2018 17:05").unwrap(), 17);
        assert_eq!(registration_hour("11/12/2008 00:01").unwrap(), 0);
    }

    #[test]
    fn extracts_weekday_name_from_valid_timestamp() {
        assert_eq!(registration_weekday("03/14/2018 17:05").unwrap(), "Wednesday");
        assert_eq!(registration_weekday("11/25/2008 10:52").unwrap(), "Tuesday");
    }

    #[test]
    fn out_of_range_month_is_rejected() {
        let err = registration_hour("13/14/2018 17:05").unwrap_err();
        assert!(matches!(err, MailerError::InvalidTimestamp { .. }));
    }

    #[test]
    fn out_of_range_hour_is_rejected() {
        let err = registration_hour("03/14/2018 24:00").unwrap_err();
        assert!(matches!(err, MailerError::InvalidTimestamp { .. }));
    }

    #[test]
    fn wrong_shape_is_rejected() {
        for bad in ["2018-03-14 17:05", "03/14/2018", "not a date", ""] {
            assert!(
                matches!(
                    registration_weekday(bad),
                    Err(MailerError::InvalidTimestamp { .. })
                ),
                "expected {bad:?} to be rejected"
            );
        }
    }
}
