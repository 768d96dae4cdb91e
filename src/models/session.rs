use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// One dated sitting of an event. Stored inside `events.sessions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub number: u32,
    pub date: NaiveDate,
    #[serde(default, with = "hhmm", skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveTime>,
    #[serde(default, with = "hhmm", skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Session {
    /// Parse a CLI session spec:
    /// - `YYYY-MM-DD`
    /// - `YYYY-MM-DD@HH:MM-HH:MM`
    /// - either of the above followed by `=Title`
    pub fn parse_spec(spec: &str) -> AppResult<Self> {
        let (when, title) = match spec.split_once('=') {
            Some((w, t)) if !t.trim().is_empty() => (w.trim(), Some(t.trim().to_string())),
            Some((w, _)) => (w.trim(), None),
            None => (spec.trim(), None),
        };

        let (date_raw, hours) = match when.split_once('@') {
            Some((d, h)) => (d, Some(h)),
            None => (when, None),
        };

        let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d")
            .map_err(|_| AppError::InvalidDate(date_raw.to_string()))?;

        let (start, end) = match hours {
            None => (None, None),
            Some(h) => {
                let (s, e) = h
                    .split_once('-')
                    .ok_or_else(|| AppError::InvalidSession(spec.to_string()))?;
                let s = parse_hhmm(s)?;
                let e = parse_hhmm(e)?;
                if e <= s {
                    return Err(AppError::InvalidSession(format!(
                        "{spec}: end must be after start"
                    )));
                }
                (Some(s), Some(e))
            }
        };

        Ok(Self {
            number: 0,
            date,
            start,
            end,
            title,
        })
    }

    /// First instant covered by the session (midnight when no start time).
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start.unwrap_or(NaiveTime::MIN))
    }

    /// Last instant covered by the session (end of day when no end time).
    pub fn ends_at(&self) -> NaiveDateTime {
        let end = self
            .end
            .or_else(|| NaiveTime::from_hms_opt(23, 59, 59))
            .unwrap_or(NaiveTime::MIN);
        self.date.and_time(end)
    }

    /// Human-readable form, e.g. `2025-10-04 10:00-12:00 (Kick-off)`.
    pub fn describe(&self) -> String {
        let mut out = self.date.format("%Y-%m-%d").to_string();
        if let (Some(s), Some(e)) = (self.start, self.end) {
            out.push_str(&format!(" {}-{}", s.format("%H:%M"), e.format("%H:%M")));
        }
        if let Some(t) = &self.title {
            out.push_str(&format!(" ({t})"));
        }
        out
    }
}

fn parse_hhmm(s: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|_| AppError::InvalidTime(s.to_string()))
}

/// Sort sessions chronologically and number them 1..n.
pub fn normalize_sessions(sessions: &mut [Session]) {
    sessions.sort_by_key(|s| (s.date, s.start));
    for (i, s) in sessions.iter_mut().enumerate() {
        s.number = (i + 1) as u32;
    }
}

/// `Option<NaiveTime>` as `"HH:MM"`.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match t {
            Some(t) => s.serialize_str(&t.format("%H:%M").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(v) => NaiveTime::parse_from_str(v, "%H:%M")
                .or_else(|_| NaiveTime::parse_from_str(v, "%H:%M:%S"))
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
