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

use std::fmt::Display;
use std::fmt::Formatter;

use chrono::Days;
use chrono::Local;
use chrono::NaiveDate;
use chrono::NaiveTime;
use chrono::TimeZone;
use chrono::Utc;
use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;
use serde::Serialize;

use crate::error::Fallible;
use crate::types::timestamp::Timestamp;

const FORMAT: &str = "%Y-%m-%d";

/// A calendar day in the user's local time zone.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Date(NaiveDate);

impl Date {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn parse(s: &str) -> Fallible<Self> {
        let date = NaiveDate::parse_from_str(s, FORMAT)?;
        Ok(Self(date))
    }

    /// The instant of local midnight at the start of this day.
    pub fn start(self) -> Timestamp {
        let midnight = self.0.and_time(NaiveTime::MIN);
        match Local.from_local_datetime(&midnight).earliest() {
            Some(ts) => Timestamp::new(ts.with_timezone(&Utc)),
            // Midnight was skipped by a DST transition.
            None => Timestamp::new(Utc.from_utc_datetime(&midnight)),
        }
    }

    pub fn succ(self) -> Self {
        Self(self.0 + Days::new(1))
    }

    pub fn pred(self) -> Self {
        Self(self.0 - Days::new(1))
    }

    pub fn add_days(self, days: u64) -> Self {
        Self(self.0 + Days::new(days))
    }

    pub fn sub_days(self, days: u64) -> Self {
        Self(self.0 - Days::new(days))
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl ToSql for Date {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for Date {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        Date::parse(&string).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
