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

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use ::sentry::Client;
use ::sentry::ClientOptions;
use ::sentry::Hub;
use ::sentry::protocol::Event;
use ::sentry::types::Dsn;

use crate::Error;
use crate::Level;
use crate::sink::Sink;

const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

/// A sink that reports events to a Sentry-compatible error-tracking service.
///
/// Debug and info messages become message events at the matching Sentry level. Error values
/// become exception events carrying the whole source chain. Events are captured with the scope
/// of the calling thread's current hub, so tags and breadcrumbs set there are attached. Transmission happens on the
/// client's own transport thread; [`flush`](Sink::flush) waits for pending events up to the
/// flush timeout.
///
/// # Examples
///
/// ```
/// use multilog::Level;
/// use multilog::sink::Sentry;
///
/// assert!(Sentry::from_dsn(Level::Error, "not a dsn").is_err());
///
/// // an empty DSN disables reporting
/// let _sink = Sentry::from_dsn(Level::Error, "").unwrap();
/// ```
pub struct Sentry {
    client: Client,
    level: Level,
    flush_timeout: Duration,
}

impl fmt::Debug for Sentry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sentry")
            .field("level", &self.level)
            .field("flush_timeout", &self.flush_timeout)
            .finish_non_exhaustive()
    }
}

impl Sentry {
    /// Create a sink from fully specified client options.
    ///
    /// Options without a DSN yield a disabled client that discards every event.
    pub fn new(level: Level, options: ClientOptions) -> Self {
        Self {
            client: Client::with_options(options),
            level,
            flush_timeout: DEFAULT_FLUSH_TIMEOUT,
        }
    }

    /// Create a sink reporting to `dsn`, attaching the stack trace of the calling thread to
    /// message events.
    ///
    /// An empty or blank `dsn` yields a disabled client.
    ///
    /// # Errors
    ///
    /// Return an error if a non-empty `dsn` cannot be parsed.
    pub fn from_dsn(level: Level, dsn: &str) -> Result<Self, Error> {
        let dsn = dsn.trim();
        let dsn = if dsn.is_empty() {
            None
        } else {
            let dsn = dsn.parse::<Dsn>().map_err(|err| {
                Error::new("failed to initialize sentry client").with_source(err)
            })?;
            Some(dsn)
        };
        let options = ClientOptions {
            dsn,
            attach_stacktrace: true,
            ..Default::default()
        };
        Ok(Self::new(level, options))
    }

    /// Set the maximum time [`flush`](Sink::flush) waits for pending events. Default to 5 seconds.
    pub fn with_flush_timeout(mut self, flush_timeout: Duration) -> Self {
        self.flush_timeout = flush_timeout;
        self
    }

    fn capture_message(&self, msg: &str, level: ::sentry::Level) {
        let event = Event {
            message: Some(msg.to_owned()),
            level,
            ..Default::default()
        };
        self.capture(event);
    }

    fn capture(&self, event: Event<'static>) {
        Hub::current().configure_scope(|scope| self.client.capture_event(event, Some(&*scope)));
    }
}

impl Sink for Sentry {
    fn level(&self) -> Level {
        self.level
    }

    fn debug(&self, msg: &str) -> Result<(), Error> {
        self.capture_message(msg, ::sentry::Level::Debug);
        Ok(())
    }

    fn info(&self, msg: &str) -> Result<(), Error> {
        self.capture_message(msg, ::sentry::Level::Info);
        Ok(())
    }

    fn error(&self, err: &(dyn StdError + 'static)) -> Result<(), Error> {
        self.capture(::sentry::event_from_error(err));
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        if self.client.flush(Some(self.flush_timeout)) {
            Ok(())
        } else {
            Err(Error::new("timed out waiting for pending events to drain")
                .with_context("timeout", format!("{:?}", self.flush_timeout)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_dsn_fails_construction() {
        let err = Sentry::from_dsn(Level::Error, "not a dsn").unwrap_err();
        assert_eq!(err.message(), "failed to initialize sentry client");
    }

    #[test]
    fn test_empty_dsn_disables_client() {
        for dsn in ["", "  "] {
            let sink = Sentry::from_dsn(Level::Debug, dsn).unwrap();
            assert!(sink.client.options().dsn.is_none());
            assert!(!sink.client.is_enabled());
            sink.debug("dropped").unwrap();
            sink.flush().unwrap();
        }
    }

    #[test]
    fn test_dsn_client_attaches_stacktrace() {
        let sink = Sentry::from_dsn(Level::Info, "https://public@sentry.example.com/1").unwrap();
        let options = sink.client.options();
        assert!(options.attach_stacktrace);
        assert_eq!(
            options.dsn.as_ref().map(|dsn| dsn.project_id().to_string()),
            Some("1".to_owned())
        );
    }

    #[test]
    fn test_disabled_client_accepts_events() {
        let sink = Sentry::new(Level::Info, ClientOptions::default());
        assert_eq!(sink.level(), Level::Info);
        sink.info("hello").unwrap();
        sink.error(&std::io::Error::other("boom")).unwrap();
    }
}
