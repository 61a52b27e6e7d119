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
use std::io::Write;

use crate::Error;
use crate::Event;
use crate::Layout;
use crate::Level;
use crate::layout::TextLayout;
use crate::sink::Sink;

macro_rules! define_stdio_sink {
    ($(#[$attr:meta])* $name:ident, $stream:path, $doc_name:literal) => {
        $(#[$attr])*
        #[derive(Debug)]
        pub struct $name {
            layout: Box<dyn Layout>,
            level: Level,
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    layout: Box::new(TextLayout::default()),
                    level: Level::Debug,
                }
            }
        }

        impl $name {
            #[doc = concat!("Set the layout for the [`", $doc_name, "`] sink.")]
            ///
            /// Default to [`TextLayout`].
            pub fn with_layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
                self.layout = layout.into();
                self
            }

            #[doc = concat!("Set the minimum level for the [`", $doc_name, "`] sink.")]
            ///
            /// Default to [`Level::Debug`].
            pub fn with_level(mut self, level: Level) -> Self {
                self.level = level;
                self
            }

            fn write(&self, event: &Event) -> Result<(), Error> {
                let mut bytes = self.layout.format(event)?;
                bytes.push(b'\n');
                $stream()
                    .write_all(&bytes)
                    .map_err(Error::from_io_error)
            }
        }

        impl Sink for $name {
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

            fn flush(&self) -> Result<(), Error> {
                $stream().flush().map_err(Error::from_io_error)
            }
        }
    };
}

define_stdio_sink!(
    /// A sink that prints events to stdout.
    ///
    /// # Examples
    ///
    /// ```
    /// use multilog::Level;
    /// use multilog::sink::Stdout;
    ///
    /// let sink = Stdout::default().with_level(Level::Info);
    /// ```
    Stdout,
    std::io::stdout,
    "Stdout"
);

define_stdio_sink!(
    /// A sink that prints events to stderr.
    ///
    /// This is the default fallback of a [`Logger`](crate::Logger) without sinks.
    ///
    /// # Examples
    ///
    /// ```
    /// use multilog::Level;
    /// use multilog::sink::Stderr;
    ///
    /// let sink = Stderr::default().with_level(Level::Error);
    /// ```
    Stderr,
    std::io::stderr,
    "Stderr"
);
