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

//! Sinks receive the events a [`Logger`](crate::Logger) dispatches.

use std::error::Error as StdError;
use std::fmt;

use crate::Error;
use crate::Level;

mod asynchronous;
mod single_file;
mod stdio;
mod testing;

#[cfg(feature = "sink-sentry")]
mod sentry;

pub use self::asynchronous::AsyncBuilder;
pub use self::asynchronous::Asynchronous;
pub use self::asynchronous::Overflow;
#[cfg(feature = "sink-sentry")]
pub use self::sentry::Sentry;
pub use self::single_file::SingleFile;
pub use self::single_file::SingleFileBuilder;
pub use self::stdio::Stderr;
pub use self::stdio::Stdout;
pub use self::testing::Testing;

/// A backend that receives leveled events and can be flushed.
///
/// The [`Logger`](crate::Logger) calls an emission method only if [`level`](Sink::level) is less
/// than or equal to the level of the event. The threshold must not change over the lifetime of
/// the sink.
///
/// Emission errors never reach the caller of the logger; they are handed to its
/// [`Trap`](crate::Trap).
pub trait Sink: fmt::Debug + Send + Sync + 'static {
    /// The minimum level of events this sink receives.
    fn level(&self) -> Level;

    /// Emit a debug message.
    fn debug(&self, msg: &str) -> Result<(), Error>;

    /// Emit an info message.
    fn info(&self, msg: &str) -> Result<(), Error>;

    /// Emit an error value.
    fn error(&self, err: &(dyn StdError + 'static)) -> Result<(), Error>;

    /// Flush any buffered or in-flight events.
    ///
    /// Implementations must not block forever. A sink that waits for pending work honors a
    /// bounded timeout and reports an error if the work did not drain in time.
    ///
    /// Default to a no-op.
    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

impl<T: Sink> From<T> for Box<dyn Sink> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}
