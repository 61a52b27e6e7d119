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

//! Severity levels used to gate events per sink.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// An enum representing the available severity levels.
///
/// Levels are totally ordered from the most verbose to the most severe:
/// `Debug < Info < Error < Fatal < Panic`. A sink with threshold `T` receives an event of level
/// `L` iff `T <= L`, so a lower threshold receives more events.
///
/// Only `Debug`, `Info` and `Error` events can be emitted. `Fatal` and `Panic` are thresholds
/// that keep a sink registered but silent.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Designates lower priority information.
    Debug = 1,
    /// Designates useful information.
    Info = 2,
    /// Designates errors.
    Error = 3,
    /// Designates errors the process cannot recover from.
    Fatal = 4,
    /// Designates errors that abort the process.
    Panic = 5,
}

impl Level {
    /// Return the string representation of the `Level`.
    ///
    /// This returns the same string as the `fmt::Display` implementation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
            Level::Panic => "PANIC",
        }
    }

    /// Read a level from the environment variable `key`.
    ///
    /// Returns `default` if the variable is not set.
    ///
    /// # Errors
    ///
    /// Return an error if the variable is set but is not a valid level or not valid unicode.
    ///
    /// # Examples
    ///
    /// ```
    /// use multilog::Level;
    ///
    /// let level = Level::from_env("MY_SERVICE_CONSOLE_LEVEL", Level::Info).unwrap();
    /// assert_eq!(level, Level::Info);
    /// ```
    pub fn from_env(key: &str, default: Level) -> Result<Level, Error> {
        match std::env::var(key) {
            Ok(value) => value
                .parse::<Level>()
                .map_err(|err| err.with_context("env", key)),
            Err(std::env::VarError::NotPresent) => Ok(default),
            Err(err) => Err(Error::new("failed to read level from environment")
                .with_context("env", key)
                .with_source(err)),
        }
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Level, Self::Err> {
        for (name, level) in [
            ("debug", Level::Debug),
            ("info", Level::Info),
            ("error", Level::Error),
            ("fatal", Level::Fatal),
            ("panic", Level::Panic),
        ] {
            if s.eq_ignore_ascii_case(name) {
                return Ok(level);
            }
        }

        Err(Error::new("malformed level").with_context("input", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered_by_severity() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Error);
        assert!(Level::Error < Level::Fatal);
        assert!(Level::Fatal < Level::Panic);

        let mut levels = vec![Level::Panic, Level::Info, Level::Fatal, Level::Debug, Level::Error];
        levels.sort();
        assert_eq!(
            levels,
            [Level::Debug, Level::Info, Level::Error, Level::Fatal, Level::Panic]
        );
    }

    #[test]
    fn test_parse_level() {
        assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!("INFO".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("Error".parse::<Level>().unwrap(), Level::Error);
        assert_eq!("fatal".parse::<Level>().unwrap(), Level::Fatal);
        assert_eq!("panic".parse::<Level>().unwrap(), Level::Panic);

        let err = "warn".parse::<Level>().unwrap_err();
        assert_eq!(err.to_string(), "malformed level, context: { input: warn }");
    }

    #[test]
    fn test_display_pads() {
        assert_eq!(format!("{:>5}", Level::Info), " INFO");
        assert_eq!(Level::Error.to_string(), "ERROR");
    }

    #[test]
    fn test_from_env() {
        let key = "MULTILOG_TEST_LEVEL_FROM_ENV";
        assert_eq!(Level::from_env(key, Level::Error).unwrap(), Level::Error);

        // SAFETY: no other test touches this variable.
        unsafe { std::env::set_var(key, "debug") };
        assert_eq!(Level::from_env(key, Level::Error).unwrap(), Level::Debug);

        // SAFETY: no other test touches this variable.
        unsafe { std::env::set_var(key, "loud") };
        let err = Level::from_env(key, Level::Error).unwrap_err();
        assert!(err.to_string().contains("env: MULTILOG_TEST_LEVEL_FROM_ENV"));

        // SAFETY: no other test touches this variable.
        unsafe { std::env::remove_var(key) };
    }
}
