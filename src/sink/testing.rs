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
use crate::Event;
use crate::Layout;
use crate::Level;
use crate::layout::TextLayout;
use crate::sink::Sink;

/// A sink that writes events that can be captured by a test harness (like `cargo test`), and
/// thus the outputs are suppressed unless `--nocapture` or `--show-output` is specified.
///
/// # Examples
///
/// ```
/// use multilog::sink::Testing;
///
/// let logger = multilog::builder().sink(Testing::default()).build().unwrap();
/// logger.info("only visible with --nocapture");
/// ```
#[derive(Debug)]
pub struct Testing {
    layout: Box<dyn Layout>,
    level: Level,
}

impl Default for Testing {
    fn default() -> Self {
        Self {
            layout: Box::new(TextLayout::default().no_color()),
            level: Level::Debug,
        }
    }
}

impl Testing {
    /// Set the layout for the [`Testing`] sink.
    ///
    /// Default to [`TextLayout`] without colors.
    pub fn with_layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Set the minimum level for the [`Testing`] sink.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    fn write(&self, event: &Event) -> Result<(), Error> {
        let bytes = self.layout.format(event)?;
        eprintln!("{}", String::from_utf8_lossy(&bytes));
        Ok(())
    }
}

impl Sink for Testing {
    fn level(&self) -> Level {
        self.level
    }

    fn debug(&self, msg: &str) -> Result<(), Error> {
        self.write(&Event::text(Level::Debug, msg))
    }

    fn info(&self, msg: &str) -> Result<(), Error> {
        self.write(&Event::text(Level::Info, msg))
    }

    fn error(&self, err: &(dyn StdError + 'static)) -> Result<(), Error> {
        self.write(&Event::error(err))
    }
}
