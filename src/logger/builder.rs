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

use std::fmt;

use crate::Error;
use crate::Logger;
use crate::Sink;
use crate::Trap;
use crate::sink::Stderr;
use crate::trap::DefaultTrap;

/// Create a new empty [`LoggerBuilder`] instance.
///
/// # Examples
///
/// ```
/// use multilog::Level;
/// use multilog::sink;
///
/// let logger = multilog::builder()
///     .sink(sink::Stdout::default().with_level(Level::Info))
///     .build()
///     .unwrap();
/// ```
pub fn builder() -> LoggerBuilder {
    LoggerBuilder { options: vec![] }
}

/// A construction step applied to a [`Draft`] before the [`Logger`] exists.
///
/// Options are applied in the order they are given. The first option returning an error aborts
/// the construction.
///
/// # Examples
///
/// A custom option that reads the threshold of a sink from the environment:
///
/// ```
/// use multilog::Level;
/// use multilog::LoggerOption;
/// use multilog::sink::Stderr;
///
/// let from_env = LoggerOption::new(|draft| {
///     let level = Level::from_env("MY_SERVICE_STDERR_LEVEL", Level::Error)?;
///     draft.push_sink(Stderr::default().with_level(level));
///     Ok(())
/// });
///
/// let logger = multilog::Logger::new([from_env]).unwrap();
/// assert_eq!(logger.sink_count(), 1);
/// ```
pub struct LoggerOption(Box<dyn FnOnce(&mut Draft) -> Result<(), Error>>);

impl LoggerOption {
    /// Create an option from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(&mut Draft) -> Result<(), Error> + 'static,
    {
        Self(Box::new(f))
    }

    fn apply(self, draft: &mut Draft) -> Result<(), Error> {
        (self.0)(draft)
    }
}

impl fmt::Debug for LoggerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LoggerOption")
    }
}

/// A logger under construction.
///
/// A draft cannot log. It only collects what the options register and becomes a [`Logger`]
/// once every option succeeded.
#[derive(Debug)]
pub struct Draft {
    sinks: Vec<Box<dyn Sink>>,
    fallback: Option<Box<dyn Sink>>,
    trap: Option<Box<dyn Trap>>,
}

impl Draft {
    fn new() -> Self {
        Self {
            sinks: vec![],
            fallback: None,
            trap: None,
        }
    }

    /// Register a sink. Sinks receive events in registration order.
    pub fn push_sink(&mut self, sink: impl Into<Box<dyn Sink>>) {
        self.sinks.push(sink.into());
    }

    /// Replace the sink receiving events when no sink is registered.
    pub fn set_fallback(&mut self, fallback: impl Into<Box<dyn Sink>>) {
        self.fallback = Some(fallback.into());
    }

    /// Replace the trap receiving emission errors.
    pub fn set_trap(&mut self, trap: impl Into<Box<dyn Trap>>) {
        self.trap = Some(trap.into());
    }

    fn finish(self) -> Logger {
        let fallback = self
            .fallback
            .unwrap_or_else(|| Box::new(Stderr::default()));
        let trap = self
            .trap
            .unwrap_or_else(|| Box::new(DefaultTrap::default()));
        Logger::from_parts(self.sinks, fallback, trap)
    }
}

/// Register a sink.
pub fn with_sink(sink: impl Into<Box<dyn Sink>>) -> LoggerOption {
    let sink = sink.into();
    LoggerOption::new(move |draft| {
        draft.push_sink(sink);
        Ok(())
    })
}

/// Register a sink that may be missing.
///
/// Applying the option fails with "sink must be specified" if `sink` is `None`.
pub fn try_with_sink(sink: Option<Box<dyn Sink>>) -> LoggerOption {
    LoggerOption::new(move |draft| {
        let sink = sink.ok_or_else(|| Error::new("sink must be specified"))?;
        draft.push_sink(sink);
        Ok(())
    })
}

/// Replace the fallback sink, which receives every event when no sink is registered.
///
/// Default to [`Stderr`].
pub fn with_fallback(fallback: impl Into<Box<dyn Sink>>) -> LoggerOption {
    let fallback = fallback.into();
    LoggerOption::new(move |draft| {
        draft.set_fallback(fallback);
        Ok(())
    })
}

/// Replace the trap receiving emission errors.
///
/// Default to [`DefaultTrap`].
pub fn with_trap(trap: impl Into<Box<dyn Trap>>) -> LoggerOption {
    let trap = trap.into();
    LoggerOption::new(move |draft| {
        draft.set_trap(trap);
        Ok(())
    })
}

/// Register a [`Sentry`](crate::sink::Sentry) sink reporting to `dsn`.
///
/// An empty `dsn` registers a disabled sink. Applying the option fails if a non-empty DSN cannot
/// be parsed.
#[cfg(feature = "sink-sentry")]
pub fn with_sentry(level: crate::Level, dsn: impl Into<String>) -> LoggerOption {
    let dsn = dsn.into();
    LoggerOption::new(move |draft| {
        draft.push_sink(crate::sink::Sentry::from_dsn(level, &dsn)?);
        Ok(())
    })
}

/// Register a [`Sentry`](crate::sink::Sentry) sink built from fully specified client options.
#[cfg(feature = "sink-sentry")]
pub fn with_sentry_options(level: crate::Level, options: ::sentry::ClientOptions) -> LoggerOption {
    LoggerOption::new(move |draft| {
        draft.push_sink(crate::sink::Sentry::new(level, options));
        Ok(())
    })
}

/// A builder for configuring a [`Logger`].
///
/// Every call is recorded as a [`LoggerOption`]; [`build`](LoggerBuilder::build) applies them
/// in call order.
#[must_use = "call `build` to construct the logger"]
#[derive(Debug)]
pub struct LoggerBuilder {
    options: Vec<LoggerOption>,
}

impl LoggerBuilder {
    /// Register a sink.
    pub fn sink(self, sink: impl Into<Box<dyn Sink>>) -> Self {
        self.option(with_sink(sink))
    }

    /// Replace the fallback sink. See [`with_fallback`].
    pub fn fallback(self, fallback: impl Into<Box<dyn Sink>>) -> Self {
        self.option(with_fallback(fallback))
    }

    /// Replace the trap. See [`with_trap`].
    pub fn trap(self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.option(with_trap(trap))
    }

    /// Add one option.
    pub fn option(mut self, option: LoggerOption) -> Self {
        self.options.push(option);
        self
    }

    /// Add several options.
    pub fn options<I>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = LoggerOption>,
    {
        self.options.extend(options);
        self
    }

    /// Build the [`Logger`].
    ///
    /// # Errors
    ///
    /// Return the error of the first failing option; no logger is created in that case.
    pub fn build(self) -> Result<Logger, Error> {
        let mut draft = Draft::new();
        for option in self.options {
            option.apply(&mut draft)?;
        }
        Ok(draft.finish())
    }
}
