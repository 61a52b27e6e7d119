// Copyright 2024 FastLabs Developers
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

use jiff::TimestampDisplayWithOffset;
use jiff::tz::TimeZone;
use serde::Serialize;

use crate::Error;
use crate::Event;
use crate::layout::Layout;

/// A JSON layout for formatting events.
///
/// Output format:
///
/// ```json
/// {"timestamp":"2024-08-11T22:44:57.172051+08:00","level":"ERROR","message":"request failed","causes":["connection reset"]}
/// {"timestamp":"2024-08-11T22:44:57.172187+08:00","level":"INFO","message":"server started"}
/// ```
///
/// `causes` holds the source chain of an error event and is omitted when empty.
///
/// # Examples
///
/// ```
/// use jiff::tz::TimeZone;
/// use multilog::layout::JsonLayout;
///
/// let layout = JsonLayout::default().timezone(TimeZone::UTC);
/// ```
#[derive(Default, Debug, Clone)]
pub struct JsonLayout {
    tz: Option<TimeZone>,
}

impl JsonLayout {
    /// Set the timezone for timestamps.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = Some(tz);
        self
    }
}

#[derive(Debug, Serialize)]
struct EventLine<'a> {
    #[serde(serialize_with = "serialize_timestamp")]
    timestamp: TimestampDisplayWithOffset,
    level: &'a str,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    causes: Vec<String>,
}

fn serialize_timestamp<S>(
    timestamp: &TimestampDisplayWithOffset,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&format_args!("{timestamp:.6}"))
}

impl Layout for JsonLayout {
    fn format(&self, event: &Event) -> Result<Vec<u8>, Error> {
        let ts = event.time();
        let tz = self.tz.clone().unwrap_or_else(TimeZone::system);
        let timestamp = ts.display_with_offset(tz.to_offset(ts));

        let line = EventLine {
            timestamp,
            level: event.level().as_str(),
            message: event.message().to_string(),
            causes: event.causes().map(|cause| cause.to_string()).collect(),
        };

        serde_json::to_vec(&line)
            .map_err(|err| Error::new("failed to serialize event").with_source(err))
    }
}
