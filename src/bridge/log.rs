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
use crate::Level;
use crate::Logger;

impl Logger {
    /// Set up this logger as the global [`log`] logger.
    ///
    /// Records are mapped onto the three emission methods: `error` records become
    /// [`Logger::error`] calls, `warn` and `info` records become [`Logger::info`] calls, and
    /// `debug` and `trace` records become [`Logger::debug`] calls. The global max level is set to
    /// the most verbose sink threshold.
    ///
    /// # Errors
    ///
    /// Return an error if a global logger has already been set.
    ///
    /// # Examples
    ///
    /// ```
    /// use multilog::Level;
    /// use multilog::sink::Stdout;
    ///
    /// let logger = multilog::builder()
    ///     .sink(Stdout::default().with_level(Level::Info))
    ///     .build()
    ///     .unwrap();
    /// if logger.apply().is_err() {
    ///     eprintln!("failed to set logger");
    /// }
    /// log::info!("routed through multilog");
    /// ```
    pub fn apply(self) -> Result<(), Error> {
        let max_level = max_level_filter(&self);
        log::set_boxed_logger(Box::new(self))
            .map_err(|err| Error::new("failed to set global logger").with_source(err))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

fn level_of(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn | log::Level::Info => Level::Info,
        log::Level::Debug | log::Level::Trace => Level::Debug,
    }
}

fn max_level_filter(logger: &Logger) -> log::LevelFilter {
    if logger.sink_count() == 0 {
        return log::LevelFilter::Trace;
    }

    match logger.min_level() {
        Some(Level::Debug) => log::LevelFilter::Trace,
        Some(Level::Info) => log::LevelFilter::Info,
        Some(Level::Error) => log::LevelFilter::Error,
        Some(Level::Fatal | Level::Panic) | None => log::LevelFilter::Off,
    }
}

/// The payload of an `error` record, forwarded as an error value.
#[derive(Debug)]
struct RecordError(String);

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for RecordError {}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Logger::enabled(self, level_of(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        let level = level_of(record.level());
        if !Logger::enabled(self, level) {
            return;
        }

        let message = record.args().to_string();
        match level {
            Level::Debug => self.debug(&message),
            Level::Info => self.info(&message),
            Level::Error | Level::Fatal | Level::Panic => self.error(&RecordError(message)),
        }
    }

    fn flush(&self) {
        if let Err(err) = Logger::flush(self) {
            self.trap().trap(&err);
        }
    }
}
