// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use chrono::DateTime;
use chrono::Days;
use chrono::Local;
use chrono::TimeDelta;
use chrono::Utc;
use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;
use serde::Serialize;

use crate::types::date::Date;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn new(ts: DateTime<Utc>) -> Self {
        Self(ts)
    }

    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Build a timestamp from a local wall-clock time. Only used by tests, to
    /// keep fixtures independent of the machine's time zone.
    #[cfg(test)]
    pub fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> Self {
        use chrono::NaiveDate;
        use chrono::TimeZone;
        let naive = NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .expect("valid date");
        let local = Local
            .from_local_datetime(&naive)
            .earliest()
            .expect("unambiguous local time");
        Self(local.with_timezone(&Utc))
    }

    pub fn local_date(self) -> Date {
        let ts = self.0.with_timezone(&Local);
        Date::new(ts.date_naive())
    }

    /// Advance by a number of calendar days in local time, keeping the
    /// wall-clock time. Falls back to whole 24-hour days when the target
    /// wall-clock time does not exist in the local time zone.
    pub fn add_days(self, days: u32) -> Self {
        let local = self.0.with_timezone(&Local);
        match local.checked_add_days(Days::new(u64::from(days))) {
            Some(ts) => Self(ts.with_timezone(&Utc)),
            None => Self(self.0 + TimeDelta::days(i64::from(days))),
        }
    }

    /// Local midnight at the start of the following calendar day.
    pub fn start_of_tomorrow(self) -> Self {
        self.local_date().succ().start()
    }

    pub fn to_rfc3339(self) -> String {
        self.0.to_rfc3339()
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl ToSql for Timestamp {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_rfc3339()))
    }
}

impl FromSql for Timestamp {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        let ts =
            DateTime::parse_from_rfc3339(&string).map_err(|e| FromSqlError::Other(Box::new(e)))?;
        let ts = ts.with_timezone(&Utc);
        Ok(Timestamp(ts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_days_keeps_wall_clock() {
        let now = Timestamp::local(2026, 3, 10, 9, 0);
        assert_eq!(now.add_days(0), now);
        assert_eq!(now.add_days(1), Timestamp::local(2026, 3, 11, 9, 0));
        assert_eq!(now.add_days(6), Timestamp::local(2026, 3, 16, 9, 0));
    }

    #[test]
    fn test_start_of_tomorrow() {
        let now = Timestamp::local(2026, 3, 10, 23, 59);
        let tomorrow = now.start_of_tomorrow();
        assert_eq!(tomorrow, Timestamp::local(2026, 3, 11, 0, 0));
        assert!(now < tomorrow);
    }

    #[test]
    fn test_rfc3339_preserves_precision() {
        let now = Timestamp::now();
        let parsed = DateTime::parse_from_rfc3339(&now.to_rfc3339())
            .map(|ts| Timestamp(ts.with_timezone(&Utc)));
        assert_eq!(parsed, Ok(now));
    }
}
