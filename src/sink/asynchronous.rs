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
use std::thread::JoinHandle;
use std::time::Duration;
use std::time::Instant;

use crossbeam_channel::Receiver;
use crossbeam_channel::RecvTimeoutError;
use crossbeam_channel::SendTimeoutError;
use crossbeam_channel::Sender;
use crossbeam_channel::TrySendError;

use crate::Error;
use crate::Level;
use crate::Trap;
use crate::error::renders_sources;
use crate::logger::dispatch;
use crate::sink::Sink;
use crate::trap::DefaultTrap;

const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

/// A composable sink, emitting and flushing on a background thread.
///
/// Events are queued and the inner sinks are driven by a dedicated worker thread, so a slow
/// backend (for example, one that talks to a remote service) does not delay the caller. Inner
/// sinks are gated by their own level on the worker.
///
/// [`flush`](Sink::flush) waits until every event queued before it has been handed to the inner
/// sinks and they have been flushed, but never longer than the flush timeout.
///
/// Dropping the sink drains the queue and joins the worker thread.
#[derive(Debug)]
pub struct Asynchronous {
    level: Level,
    overflow: Overflow,
    flush_timeout: Duration,
    state: AsyncState,
}

impl Asynchronous {
    fn send(&self, task: Task) -> Result<(), Error> {
        self.state.send_task(task, self.overflow)
    }
}

impl Sink for Asynchronous {
    fn level(&self) -> Level {
        self.level
    }

    fn debug(&self, msg: &str) -> Result<(), Error> {
        self.send(Task::Debug(msg.to_owned()))
    }

    fn info(&self, msg: &str) -> Result<(), Error> {
        self.send(Task::Info(msg.to_owned()))
    }

    fn error(&self, err: &(dyn StdError + 'static)) -> Result<(), Error> {
        self.send(Task::Error(DetachedError::new(err)))
    }

    fn flush(&self) -> Result<(), Error> {
        let deadline = Instant::now() + self.flush_timeout;
        let (done, wait) = crossbeam_channel::bounded(1);
        self.state.send_flush(Task::Flush(done), deadline)?;

        match wait.recv_deadline(deadline) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(timed_out(self.flush_timeout)),
            Err(RecvTimeoutError::Disconnected) => {
                Err(Error::new("asynchronous worker exited before flushing"))
            }
        }
    }
}

fn timed_out(timeout: Duration) -> Error {
    Error::new("timed out waiting for pending events to drain")
        .with_context("timeout", format!("{timeout:?}"))
}

/// A builder for configuring an [`Asynchronous`] sink.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use multilog::Level;
/// use multilog::sink::AsyncBuilder;
/// use multilog::sink::Stderr;
///
/// let sink = AsyncBuilder::new("multilog-async")
///     .level(Level::Info)
///     .flush_timeout(Duration::from_secs(2))
///     .sink(Stderr::default())
///     .build()
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct AsyncBuilder {
    thread_name: String,
    sinks: Vec<Box<dyn Sink>>,
    level: Level,
    buffered_events_limit: Option<usize>,
    flush_timeout: Duration,
    trap: Box<dyn Trap>,
    overflow: Overflow,
}

impl AsyncBuilder {
    /// Create a new asynchronous sink builder.
    pub fn new(thread_name: impl Into<String>) -> AsyncBuilder {
        AsyncBuilder {
            thread_name: thread_name.into(),
            sinks: vec![],
            level: Level::Debug,
            buffered_events_limit: None,
            flush_timeout: DEFAULT_FLUSH_TIMEOUT,
            trap: Box::new(DefaultTrap::default()),
            overflow: Overflow::Block,
        }
    }

    /// Set the minimum level of events queued to the worker. Default to [`Level::Debug`].
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the buffer size of pending events. Default to unbounded.
    pub fn buffered_events_limit(mut self, buffered_events_limit: Option<usize>) -> Self {
        self.buffered_events_limit = buffered_events_limit;
        self
    }

    /// Set the maximum time [`flush`](Sink::flush) waits for pending events. Default to 5 seconds.
    pub fn flush_timeout(mut self, flush_timeout: Duration) -> Self {
        self.flush_timeout = flush_timeout;
        self
    }

    /// Set the overflow policy to block when the buffer is full.
    pub fn overflow_block(mut self) -> Self {
        self.overflow = Overflow::Block;
        self
    }

    /// Set the overflow policy to drop incoming events when the buffer is full.
    pub fn overflow_drop_incoming(mut self) -> Self {
        self.overflow = Overflow::DropIncoming;
        self
    }

    /// Set the trap receiving errors of the inner sinks.
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Add an inner sink.
    pub fn sink(mut self, sink: impl Into<Box<dyn Sink>>) -> Self {
        self.sinks.push(sink.into());
        self
    }

    /// Build the asynchronous sink.
    ///
    /// # Errors
    ///
    /// Return an error if the worker thread cannot be spawned.
    pub fn build(self) -> Result<Asynchronous, Error> {
        let Self {
            thread_name,
            sinks,
            level,
            buffered_events_limit,
            flush_timeout,
            trap,
            overflow,
        } = self;

        let (sender, receiver) = match buffered_events_limit {
            Some(limit) => crossbeam_channel::bounded(limit),
            None => crossbeam_channel::unbounded(),
        };

        let worker = Worker {
            receiver,
            sinks,
            trap,
        };
        let handle = std::thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || worker.run())
            .map_err(|err| {
                Error::new("failed to spawn asynchronous sink thread")
                    .with_context("thread", thread_name)
                    .with_source(err)
            })?;

        Ok(Asynchronous {
            level,
            overflow,
            flush_timeout,
            state: AsyncState(Some(State { sender, handle })),
        })
    }
}

/// Overflow policy for [`Asynchronous`].
///
/// When the channel is full, an incoming event is handled according to the specified policy.
/// Flushes always wait for room, up to the flush timeout.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[non_exhaustive]
pub enum Overflow {
    /// Blocks until the channel is not full.
    Block,
    /// Drops the incoming event.
    DropIncoming,
}

enum Task {
    Debug(String),
    Info(String),
    Error(DetachedError),
    Flush(Sender<Result<(), Error>>),
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::Debug(msg) => f.debug_tuple("Debug").field(msg).finish(),
            Task::Info(msg) => f.debug_tuple("Info").field(msg).finish(),
            Task::Error(err) => f.debug_tuple("Error").field(err).finish(),
            Task::Flush(_) => f.write_str("Flush"),
        }
    }
}

#[derive(Debug)]
struct AsyncState(Option<State>);

#[derive(Debug)]
struct State {
    sender: Sender<Task>,
    handle: JoinHandle<()>,
}

impl AsyncState {
    fn sender(&self) -> Result<&Sender<Task>, Error> {
        match &self.0 {
            Some(state) => Ok(&state.sender),
            None => Err(Error::new("asynchronous sink is shut down")),
        }
    }

    fn send_task(&self, task: Task, overflow: Overflow) -> Result<(), Error> {
        let sender = self.sender()?;
        match overflow {
            Overflow::Block => sender
                .send(task)
                .map_err(|_| Error::new("failed to send event to asynchronous sink")),
            Overflow::DropIncoming => match sender.try_send(task) {
                Ok(()) => Ok(()),
                Err(TrySendError::Full(_)) => Ok(()),
                Err(TrySendError::Disconnected(_)) => {
                    Err(Error::new("failed to send event to asynchronous sink"))
                }
            },
        }
    }

    fn send_flush(&self, task: Task, deadline: Instant) -> Result<(), Error> {
        let sender = self.sender()?;
        match sender.send_deadline(task, deadline) {
            Ok(()) => Ok(()),
            Err(SendTimeoutError::Timeout(_)) => Err(Error::new(
                "timed out waiting for room in the asynchronous sink queue",
            )),
            Err(SendTimeoutError::Disconnected(_)) => {
                Err(Error::new("failed to send flush to asynchronous sink"))
            }
        }
    }
}

impl Drop for AsyncState {
    fn drop(&mut self) {
        if let Some(State { sender, handle }) = self.0.take() {
            // drop our sender, the worker breaks the loop after processing what is queued
            drop(sender);

            let _ = handle.join();
        }
    }
}

struct Worker {
    receiver: Receiver<Task>,
    sinks: Vec<Box<dyn Sink>>,
    trap: Box<dyn Trap>,
}

impl Worker {
    fn run(self) {
        let Self {
            receiver,
            sinks,
            trap,
        } = self;

        while let Ok(task) = receiver.recv() {
            match task {
                Task::Debug(msg) => {
                    dispatch::emit(&sinks, Level::Debug, &*trap, |sink| sink.debug(&msg))
                }
                Task::Info(msg) => {
                    dispatch::emit(&sinks, Level::Info, &*trap, |sink| sink.info(&msg))
                }
                Task::Error(err) => {
                    dispatch::emit(&sinks, Level::Error, &*trap, |sink| sink.error(&err))
                }
                Task::Flush(done) => {
                    // the flusher may have given up waiting
                    let _ = done.send(dispatch::flush_all(&sinks));
                }
            }
        }
    }
}

/// An owned copy of an error and its source chain that can cross threads.
///
/// The chain is cut below an error whose `Display` already lists its sources.
#[derive(Debug)]
struct DetachedError {
    message: String,
    source: Option<Box<DetachedError>>,
}

impl DetachedError {
    fn new(err: &(dyn StdError + 'static)) -> Self {
        let source = if renders_sources(err) {
            None
        } else {
            err.source()
        };
        Self {
            message: err.to_string(),
            source: source.map(|source| Box::new(DetachedError::new(source))),
        }
    }
}

impl fmt::Display for DetachedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for DetachedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn StdError + 'static))
    }
}
