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

use std::fmt::Write;

use colored::Color;
use colored::Colorize;
use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::Error;
use crate::Event;
use crate::Level;
use crate::layout::Layout;

/// A layout that formats events as optionally colored text.
///
/// Output format:
///
/// ```text
/// 2024-08-11T22:44:57.172105+08:00 ERROR request failed: connection reset
/// 2024-08-11T22:44:57.172276+08:00  INFO server started
/// 2024-08-11T22:44:57.172329+08:00 DEBUG accepted connection
/// ```
///
/// Error events append every error of their source chain, separated by `: `.
///
/// By default, levels are colored. Call [`no_color`](TextLayout::no_color) to disable coloring.
///
/// # Examples
///
/// ```
/// use jiff::tz::TimeZone;
/// use multilog::layout::TextLayout;
///
/// let layout = TextLayout::default().no_color().timezone(TimeZone::UTC);
/// ```
#[derive(Debug, Clone)]
pub struct TextLayout {
    colors: LevelColor,
    no_color: bool,
    timezone: TimeZone,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            colors: LevelColor::default(),
            no_color: false,
            timezone: TimeZone::system(),
        }
    }
}

impl TextLayout {
    /// Customize the color of the error level. Default to red.
    ///
    /// No effect if `no_color` is set.
    pub fn error_color(mut self, color: Color) -> Self {
        self.colors.error = color;
        self
    }

    /// Customize the color of the info level. Default to green.
    ///
    /// No effect if `no_color` is set.
    pub fn info_color(mut self, color: Color) -> Self {
        self.colors.info = color;
        self
    }

    /// Customize the color of the debug level. Default to blue.
    ///
    /// No effect if `no_color` is set.
    pub fn debug_color(mut self, color: Color) -> Self {
        self.colors.debug = color;
        self
    }

    /// Disable colored output.
    pub fn no_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    /// Set the timezone for timestamps.
    ///
    /// Defaults to the system timezone if not set.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }

    fn format_level(&self, level: Level) -> String {
        let padded = format!("{level:>5}");
        if self.no_color {
            padded
        } else {
            padded.color(self.colors.of(level)).to_string()
        }
    }
}

pub(crate) fn format_timestamp(ts: Timestamp, tz: &TimeZone) -> String {
    let offset = tz.to_offset(ts);
    format!("{:.6}", ts.display_with_offset(offset))
}

impl Layout for TextLayout {
    fn format(&self, event: &Event) -> Result<Vec<u8>, Error> {
        let mut text = format_timestamp(event.time(), &self.timezone);
        let level = self.format_level(event.level());
        let message = event.message();

        write!(&mut text, " {level} {message}").map_err(Error::from_fmt_error)?;
        for cause in event.causes() {
            write!(&mut text, ": {cause}").map_err(Error::from_fmt_error)?;
        }

        Ok(text.into_bytes())
    }
}

#[derive(Debug, Clone)]
struct LevelColor {
    error: Color,
    info: Color,
    debug: Color,
}

impl Default for LevelColor {
    fn default() -> Self {
        Self {
            error: Color::Red,
            info: Color::Green,
            debug: Color::Blue,
        }
    }
}

impl LevelColor {
    fn of(&self, level: Level) -> Color {
        match level {
            Level::Debug => self.debug,
            Level::Info => self.info,
            Level::Error => self.error,
            Level::Fatal | Level::Panic => Color::BrightRed,
        }
    }
}
