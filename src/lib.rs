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

//! Multilog is a small logging facade that fans leveled events out to any number of sinks.
//!
//! # Overview
//!
//! Application code logs once through a [`Logger`]. Operators decide at construction time which
//! [`Sink`]s are active and the minimum [`Level`] each of them receives. A sink receives an event
//! of level `L` iff its own threshold is `<= L`. A logger without sinks writes every event to its
//! fallback output, so nothing is silently dropped.
//!
//! # Examples
//!
//! Functional options:
//!
//! ```
//! use multilog::Level;
//! use multilog::Logger;
//! use multilog::sink;
//!
//! let logger = Logger::new([
//!     multilog::with_sink(sink::Stdout::default().with_level(Level::Info)),
//!     multilog::with_sink(sink::Stderr::default().with_level(Level::Error)),
//! ])
//! .unwrap();
//!
//! logger.debug("dropped by both sinks");
//! logger.info("written to stdout");
//! logger.error(&std::io::Error::other("written to stdout and stderr"));
//! logger.flush().unwrap();
//! ```
//!
//! The same logger with the chained builder:
//!
//! ```
//! use multilog::Level;
//! use multilog::sink;
//!
//! let logger = multilog::builder()
//!     .sink(sink::Stdout::default().with_level(Level::Info))
//!     .sink(sink::Stderr::default().with_level(Level::Error))
//!     .build()
//!     .unwrap();
//!
//! logger.info("hello");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod event;
pub mod layout;
pub mod level;
pub mod sink;
pub mod trap;

#[cfg(feature = "bridge-log")]
mod bridge;

mod error;
pub use self::error::Error;

mod logger;
pub use self::logger::*;

pub use self::event::Event;
pub use self::layout::Layout;
pub use self::level::Level;
pub use self::sink::Sink;
pub use self::trap::Trap;
