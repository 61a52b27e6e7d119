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

//! The unit of data a sink renders.

use std::error::Error as StdError;
use std::fmt;

use jiff::Timestamp;

use crate::Level;
use crate::error::renders_sources;

/// A leveled event handed to a [`Layout`](crate::Layout) for rendering.
///
/// Events are created by sinks from the arguments of [`Sink::debug`](crate::Sink::debug),
/// [`Sink::info`](crate::Sink::info) and [`Sink::error`](crate::Sink::error).
#[derive(Clone, Copy)]
pub struct Event<'a> {
    time: Timestamp,
    level: Level,
    message: Message<'a>,
}

/// The payload of an [`Event`].
#[derive(Clone, Copy)]
pub enum Message<'a> {
    /// A plain text message.
    Text(&'a str),
    /// An error value, rendered along with its source chain.
    Error(&'a (dyn StdError + 'static)),
}

impl<'a> Event<'a> {
    /// Create a text event at the given level, stamped with the current time.
    pub fn text(level: Level, message: &'a str) -> Self {
        Self {
            time: Timestamp::now(),
            level,
            message: Message::Text(message),
        }
    }

    /// Create an error-level event carrying `err`, stamped with the current time.
    pub fn error(err: &'a (dyn StdError + 'static)) -> Self {
        Self {
            time: Timestamp::now(),
            level: Level::Error,
            message: Message::Error(err),
        }
    }

    /// Replace the timestamp of this event.
    pub fn with_time(mut self, time: Timestamp) -> Self {
        self.time = time;
        self
    }

    /// The time this event was created.
    pub fn time(&self) -> Timestamp {
        self.time
    }

    /// The level of this event.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The payload of this event.
    pub fn message(&self) -> Message<'a> {
        self.message
    }

    /// Iterate over the sources of an error event, outermost first.
    ///
    /// Text events have no causes. The walk stops at any [`Error`](crate::Error), since its
    /// `Display` output already lists its own sources.
    pub fn causes(&self) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
        let mut next = match self.message {
            Message::Text(_) => None,
            Message::Error(err) if renders_sources(err) => None,
            Message::Error(err) => err.source(),
        };
        std::iter::from_fn(move || {
            let cause = next?;
            next = if renders_sources(cause) {
                None
            } else {
                cause.source()
            };
            Some(cause)
        })
    }
}

impl fmt::Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Text(text) => f.write_str(text),
            Message::Error(err) => write!(f, "{err}"),
        }
    }
}

impl fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("time", &self.time)
            .field("level", &self.level)
            .field("message", &self.message.to_string())
            .finish()
    }
}
