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

use crate::Error;
use crate::Level;
use crate::Sink;
use crate::Trap;
use crate::logger::LoggerOption;
use crate::logger::builder;
use crate::logger::dispatch;

/// A logging facade that dispatches events to one or more sinks.
///
/// The set of sinks is fixed once the logger is built. Every call runs synchronously on the
/// caller's thread and visits the sinks in registration order, so a slow sink delays the call.
/// Wrap such a sink in [`Asynchronous`](crate::sink::Asynchronous) to move it off the caller's
/// thread.
///
/// A logger without sinks hands every event to its fallback sink, [`Stderr`](crate::sink::Stderr)
/// unless configured otherwise.
#[derive(Debug)]
pub struct Logger {
    sinks: Vec<Box<dyn Sink>>,
    fallback: Box<dyn Sink>,
    trap: Box<dyn Trap>,
}

impl Logger {
    pub(super) fn from_parts(
        sinks: Vec<Box<dyn Sink>>,
        fallback: Box<dyn Sink>,
        trap: Box<dyn Trap>,
    ) -> Self {
        Self {
            sinks,
            fallback,
            trap,
        }
    }

    /// Create a logger by applying `options` in order.
    ///
    /// # Errors
    ///
    /// Return the error of the first failing option. Options after it are not applied, and every
    /// sink registered by an earlier option is dropped with the half-built logger.
    ///
    /// # Examples
    ///
    /// ```
    /// use multilog::Level;
    /// use multilog::Logger;
    /// use multilog::sink::Stdout;
    ///
    /// let logger = Logger::new([multilog::with_sink(Stdout::default().with_level(Level::Info))])
    ///     .unwrap();
    /// logger.info("ready");
    ///
    /// let err = Logger::new([multilog::try_with_sink(None)]).unwrap_err();
    /// assert_eq!(err.to_string(), "sink must be specified");
    /// ```
    pub fn new<I>(options: I) -> Result<Logger, Error>
    where
        I: IntoIterator<Item = LoggerOption>,
    {
        builder().options(options).build()
    }

    /// Emit a debug message.
    pub fn debug(&self, msg: &str) {
        self.dispatch(Level::Debug, |sink| sink.debug(msg));
    }

    /// Emit an info message.
    pub fn info(&self, msg: &str) {
        self.dispatch(Level::Info, |sink| sink.info(msg));
    }

    /// Emit an error value.
    pub fn error(&self, err: &(dyn StdError + 'static)) {
        self.dispatch(Level::Error, |sink| sink.error(err));
    }

    /// Flush every sink, or the fallback if there is no sink.
    ///
    /// Each sink is flushed exactly once even if an earlier one fails.
    ///
    /// # Errors
    ///
    /// Return an error if at least one flush failed. Every failure is kept as a source of the
    /// returned error.
    pub fn flush(&self) -> Result<(), Error> {
        if self.sinks.is_empty() {
            return dispatch::flush_all(std::slice::from_ref(&self.fallback));
        }

        dispatch::flush_all(&self.sinks)
    }

    /// Check whether an event of `level` reaches at least one destination.
    ///
    /// Always true for a logger without sinks, since the fallback receives everything.
    pub fn enabled(&self, level: Level) -> bool {
        self.sinks.is_empty() || self.sinks.iter().any(|sink| sink.level() <= level)
    }

    /// The number of registered sinks, not counting the fallback.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// The most verbose threshold among the registered sinks, if any.
    pub fn min_level(&self) -> Option<Level> {
        self.sinks.iter().map(|sink| sink.level()).min()
    }

    #[cfg(feature = "bridge-log")]
    pub(crate) fn trap(&self) -> &dyn Trap {
        self.trap.as_ref()
    }

    fn dispatch<F>(&self, level: Level, f: F)
    where
        F: Fn(&dyn Sink) -> Result<(), Error>,
    {
        if self.sinks.is_empty() {
            if let Err(err) = f(self.fallback.as_ref()) {
                dispatch::trap_emit_error(self.trap.as_ref(), level, err);
            }
            return;
        }

        dispatch::emit(&self.sinks, level, self.trap.as_ref(), f);
    }
}
