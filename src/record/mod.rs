//! Text record formats for SMS and call events.
//!
//! One record per logical line, fields separated by semicolons:
//!
//! - SMS:  `remote;DIR;startISO;endISO;body` — the body is everything after
//!   the fourth separator and may itself contain semicolons. Embedded
//!   newlines soft-wrap onto continuation lines prefixed with one space
//!   (see [`reassemble`]).
//! - Call: `remote;DIR;OUTCOME;startISO;endISO` with `OUTCOME` one of `OK`
//!   or `MISSED`.
//!
//! `DIR` is `IN` or `OUT`. Timestamps are ISO-8601 with seconds precision,
//! `Z` for UTC on output; any RFC 3339 offset is accepted on input and
//! normalized to UTC.

pub mod reassemble;

use chrono::{DateTime, SecondsFormat, Utc};
use commhist_lib::{Direction, Event, EventKind, EventStatus, GroupId};

use crate::error::{Result, TransferError};

const FIELD_SEP: char = ';';
const MIN_FIELDS: usize = 5;

const DIR_IN: &str = "IN";
const DIR_OUT: &str = "OUT";
const OUTCOME_OK: &str = "OK";
const OUTCOME_MISSED: &str = "MISSED";

fn direction_token(direction: Direction) -> &'static str {
    match direction {
        Direction::Inbound => DIR_IN,
        Direction::Outbound => DIR_OUT,
    }
}

fn parse_direction(token: &str) -> Result<Direction> {
    match token {
        DIR_IN => Ok(Direction::Inbound),
        DIR_OUT => Ok(Direction::Outbound),
        other => Err(TransferError::Direction(other.to_string())),
    }
}

/// Format a timestamp the way records carry it.
#[must_use]
pub fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a record timestamp, normalizing to UTC.
///
/// # Errors
///
/// Returns `Timestamp` if the value is not valid RFC 3339.
pub fn parse_time(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| TransferError::Timestamp {
            value: value.to_string(),
            source,
        })
}

/// One SMS message as carried by the text format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsRecord {
    pub remote_uid: String,
    pub direction: Direction,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Message text with embedded newlines already restored.
    pub body: String,
}

impl SmsRecord {
    /// Parse a reassembled logical line.
    ///
    /// # Errors
    ///
    /// Returns `FieldCount` for fewer than five fields, `Direction` or
    /// `Timestamp` for malformed field values.
    pub fn parse(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.splitn(MIN_FIELDS, FIELD_SEP).collect();
        if fields.len() < MIN_FIELDS {
            return Err(TransferError::FieldCount {
                expected: MIN_FIELDS,
                found: fields.len(),
            });
        }

        Ok(Self {
            remote_uid: fields[0].to_string(),
            direction: parse_direction(fields[1])?,
            start_time: parse_time(fields[2])?,
            end_time: parse_time(fields[3])?,
            body: fields[4].to_string(),
        })
    }

    /// Format as one logical line. Embedded newlines in the body become a
    /// newline plus one leading space, so the line soft-wraps on write.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!(
            "{};{};{};{};{}",
            self.remote_uid,
            direction_token(self.direction),
            format_time(self.start_time),
            format_time(self.end_time),
            self.body.replace('\n', "\n "),
        )
    }

    /// Map a fetched store event onto a record.
    ///
    /// # Errors
    ///
    /// Returns `KindMismatch` for non-SMS events.
    pub fn from_event(event: &Event) -> Result<Self> {
        if event.kind != EventKind::Sms {
            return Err(TransferError::KindMismatch {
                expected: EventKind::Sms,
                found: event.kind,
            });
        }

        Ok(Self {
            remote_uid: event.remote_uid.clone(),
            direction: event.direction,
            start_time: event.start_time,
            end_time: event.end_time,
            body: event.body.clone().unwrap_or_default(),
        })
    }

    /// Build the store event an import submits for this record.
    ///
    /// Fixed on import: `is_read = true`, delivered status.
    #[must_use]
    pub fn into_event(self, local_uid: &str, group_id: GroupId) -> Event {
        Event {
            id: None,
            kind: EventKind::Sms,
            group_id,
            local_uid: local_uid.to_string(),
            remote_uid: self.remote_uid,
            direction: self.direction,
            status: EventStatus::Delivered,
            is_read: true,
            is_missed: false,
            start_time: self.start_time,
            end_time: self.end_time,
            body: Some(self.body),
        }
    }
}

/// One call log entry as carried by the text format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    pub remote_uid: String,
    pub direction: Direction,
    pub missed: bool,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl CallRecord {
    /// Parse one physical line. Fields beyond the fifth are ignored.
    ///
    /// # Errors
    ///
    /// Returns `FieldCount` for fewer than five fields, `Direction`,
    /// `Outcome` or `Timestamp` for malformed field values.
    pub fn parse(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split(FIELD_SEP).collect();
        if fields.len() < MIN_FIELDS {
            return Err(TransferError::FieldCount {
                expected: MIN_FIELDS,
                found: fields.len(),
            });
        }

        let missed = match fields[2] {
            OUTCOME_OK => false,
            OUTCOME_MISSED => true,
            other => return Err(TransferError::Outcome(other.to_string())),
        };

        Ok(Self {
            remote_uid: fields[0].to_string(),
            direction: parse_direction(fields[1])?,
            missed,
            start_time: parse_time(fields[3])?,
            end_time: parse_time(fields[4])?,
        })
    }

    /// Format as one line.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!(
            "{};{};{};{};{}",
            self.remote_uid,
            direction_token(self.direction),
            if self.missed { OUTCOME_MISSED } else { OUTCOME_OK },
            format_time(self.start_time),
            format_time(self.end_time),
        )
    }

    /// Map a fetched store event onto a record.
    ///
    /// # Errors
    ///
    /// Returns `KindMismatch` for non-call events.
    pub fn from_event(event: &Event) -> Result<Self> {
        if event.kind != EventKind::Call {
            return Err(TransferError::KindMismatch {
                expected: EventKind::Call,
                found: event.kind,
            });
        }

        Ok(Self {
            remote_uid: event.remote_uid.clone(),
            direction: event.direction,
            missed: event.is_missed,
            start_time: event.start_time,
            end_time: event.end_time,
        })
    }

    /// Build the store event an import submits for this record.
    ///
    /// Calls carry no group; status stays unknown.
    #[must_use]
    pub fn into_event(self, local_uid: &str) -> Event {
        Event {
            id: None,
            kind: EventKind::Call,
            group_id: GroupId::NONE,
            local_uid: local_uid.to_string(),
            remote_uid: self.remote_uid,
            direction: self.direction,
            status: EventStatus::Unknown,
            is_read: false,
            is_missed: self.missed,
            start_time: self.start_time,
            end_time: self.end_time,
            body: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sms_parse_basic() {
        let rec = SmsRecord::parse("12345;OUT;2021-03-01T10:00:00Z;2021-03-01T10:00:05Z;hi there")
            .unwrap();
        assert_eq!(rec.remote_uid, "12345");
        assert_eq!(rec.direction, Direction::Outbound);
        assert_eq!(rec.start_time, Utc.with_ymd_and_hms(2021, 3, 1, 10, 0, 0).unwrap());
        assert_eq!(rec.end_time, Utc.with_ymd_and_hms(2021, 3, 1, 10, 0, 5).unwrap());
        assert_eq!(rec.body, "hi there");
    }

    #[test]
    fn test_sms_body_keeps_semicolons() {
        let rec =
            SmsRecord::parse("555;IN;2020-01-01T00:00:00Z;2020-01-01T00:01:00Z;a;b;c").unwrap();
        assert_eq!(rec.body, "a;b;c");
    }

    #[test]
    fn test_sms_too_few_fields() {
        let err = SmsRecord::parse("555;IN;2020-01-01T00:00:00Z").unwrap_err();
        assert!(matches!(
            err,
            TransferError::FieldCount {
                expected: 5,
                found: 3
            }
        ));
    }

    #[test]
    fn test_sms_line_roundtrip() {
        let line = "12345;OUT;2021-03-01T10:00:00Z;2021-03-01T10:00:05Z;hi there";
        let rec = SmsRecord::parse(line).unwrap();
        assert_eq!(rec.to_line(), line);
    }

    #[test]
    fn test_sms_body_newline_soft_wraps() {
        let rec = SmsRecord {
            remote_uid: "555".into(),
            direction: Direction::Inbound,
            start_time: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2020, 1, 1, 0, 1, 0).unwrap(),
            body: "hello\nworld".into(),
        };
        assert_eq!(
            rec.to_line(),
            "555;IN;2020-01-01T00:00:00Z;2020-01-01T00:01:00Z;hello\n world"
        );
    }

    #[test]
    fn test_sms_bad_direction() {
        let err =
            SmsRecord::parse("555;UP;2020-01-01T00:00:00Z;2020-01-01T00:01:00Z;x").unwrap_err();
        assert!(matches!(err, TransferError::Direction(t) if t == "UP"));
    }

    #[test]
    fn test_sms_bad_timestamp() {
        let err = SmsRecord::parse("555;IN;not-a-date;2020-01-01T00:01:00Z;x").unwrap_err();
        assert!(matches!(err, TransferError::Timestamp { .. }));
    }

    #[test]
    fn test_sms_event_mapping_fixes_import_fields() {
        let rec =
            SmsRecord::parse("555;IN;2020-01-01T00:00:00Z;2020-01-01T00:01:00Z;hey").unwrap();
        let event = rec.into_event("/acct/local", GroupId(9));
        assert_eq!(event.kind, EventKind::Sms);
        assert_eq!(event.group_id, GroupId(9));
        assert_eq!(event.local_uid, "/acct/local");
        assert_eq!(event.status, EventStatus::Delivered);
        assert!(event.is_read);
        assert_eq!(event.body.as_deref(), Some("hey"));
    }

    #[test]
    fn test_sms_from_event_rejects_calls() {
        let rec =
            CallRecord::parse("555;IN;OK;2020-01-01T00:00:00Z;2020-01-01T00:01:00Z").unwrap();
        let event = rec.into_event("/acct/local");
        assert!(matches!(
            SmsRecord::from_event(&event),
            Err(TransferError::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_call_parse_and_roundtrip() {
        let line = "555;OUT;MISSED;2020-05-05T12:00:00Z;2020-05-05T12:00:00Z";
        let rec = CallRecord::parse(line).unwrap();
        assert!(rec.missed);
        assert_eq!(rec.direction, Direction::Outbound);
        assert_eq!(rec.to_line(), line);
    }

    #[test]
    fn test_call_ok_is_not_missed() {
        let rec =
            CallRecord::parse("555;IN;OK;2020-05-05T12:00:00Z;2020-05-05T12:01:00Z").unwrap();
        assert!(!rec.missed);
    }

    #[test]
    fn test_call_extra_fields_ignored() {
        let rec = CallRecord::parse("555;IN;OK;2020-05-05T12:00:00Z;2020-05-05T12:01:00Z;extra")
            .unwrap();
        assert_eq!(rec.end_time, Utc.with_ymd_and_hms(2020, 5, 5, 12, 1, 0).unwrap());
    }

    #[test]
    fn test_call_bad_outcome() {
        let err = CallRecord::parse("555;IN;BUSY;2020-05-05T12:00:00Z;2020-05-05T12:01:00Z")
            .unwrap_err();
        assert!(matches!(err, TransferError::Outcome(t) if t == "BUSY"));
    }

    #[test]
    fn test_call_event_mapping() {
        let rec =
            CallRecord::parse("555;IN;MISSED;2020-05-05T12:00:00Z;2020-05-05T12:00:00Z").unwrap();
        let event = rec.into_event("/acct/local");
        assert_eq!(event.kind, EventKind::Call);
        assert_eq!(event.group_id, GroupId::NONE);
        assert_eq!(event.status, EventStatus::Unknown);
        assert!(event.is_missed);
        assert!(event.body.is_none());
    }

    #[test]
    fn test_offset_timestamp_normalized_to_utc() {
        let parsed = parse_time("2020-01-01T02:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(format_time(parsed), "2020-01-01T00:00:00Z");
    }

    #[test]
    fn test_event_record_roundtrip_preserves_fields() {
        let rec = SmsRecord {
            remote_uid: "777".into(),
            direction: Direction::Outbound,
            start_time: Utc.with_ymd_and_hms(2021, 6, 1, 9, 30, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2021, 6, 1, 9, 30, 2).unwrap(),
            body: "multi\nline;body".into(),
        };
        let event = rec.clone().into_event("/acct/local", GroupId(1));
        assert_eq!(SmsRecord::from_event(&event).unwrap(), rec);
    }
}
