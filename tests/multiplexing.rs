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
use std::io;
use std::sync::Arc;
use std::sync::Mutex;

use multilog::Error;
use multilog::Level;
use multilog::Logger;
use multilog::Sink;
use multilog::Trap;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Debug(String),
    Info(String),
    Error(String),
    Flush,
}

#[derive(Debug, Clone)]
struct Recorder {
    level: Level,
    calls: Arc<Mutex<Vec<Call>>>,
    fail_emit: bool,
    fail_flush: bool,
}

impl Recorder {
    fn new(level: Level) -> Self {
        Self {
            level,
            calls: Arc::new(Mutex::new(vec![])),
            fail_emit: false,
            fail_flush: false,
        }
    }

    fn failing_emit(mut self) -> Self {
        self.fail_emit = true;
        self
    }

    fn failing_flush(mut self) -> Self {
        self.fail_flush = true;
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), Error> {
        self.calls.lock().unwrap().push(call);
        if self.fail_emit {
            return Err(Error::new("emit failed"));
        }
        Ok(())
    }
}

impl Sink for Recorder {
    fn level(&self) -> Level {
        self.level
    }

    fn debug(&self, msg: &str) -> Result<(), Error> {
        self.record(Call::Debug(msg.to_owned()))
    }

    fn info(&self, msg: &str) -> Result<(), Error> {
        self.record(Call::Info(msg.to_owned()))
    }

    fn error(&self, err: &(dyn StdError + 'static)) -> Result<(), Error> {
        self.record(Call::Error(err.to_string()))
    }

    fn flush(&self) -> Result<(), Error> {
        self.calls.lock().unwrap().push(Call::Flush);
        if self.fail_flush {
            return Err(Error::new("flush failed").with_context("level", self.level));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
struct CollectingTrap(Arc<Mutex<Vec<String>>>);

impl Trap for CollectingTrap {
    fn trap(&self, err: &Error) {
        self.0.lock().unwrap().push(err.to_string());
    }
}

fn emit_all(logger: &Logger) {
    logger.debug("x");
    logger.info("y");
    logger.error(&io::Error::other("errA"));
}

#[test]
fn test_sink_receives_events_at_or_above_threshold() {
    for (threshold, expected) in [
        (
            Level::Debug,
            vec![
                Call::Debug("x".to_owned()),
                Call::Info("y".to_owned()),
                Call::Error("errA".to_owned()),
            ],
        ),
        (
            Level::Info,
            vec![Call::Info("y".to_owned()), Call::Error("errA".to_owned())],
        ),
        (Level::Error, vec![Call::Error("errA".to_owned())]),
        (Level::Fatal, vec![]),
        (Level::Panic, vec![]),
    ] {
        let sink = Recorder::new(threshold);
        let logger = Logger::new([multilog::with_sink(sink.clone())]).unwrap();

        emit_all(&logger);
        assert_eq!(sink.calls(), expected, "threshold {threshold}");
    }
}

#[test]
fn test_two_sinks_are_gated_independently() {
    let verbose = Recorder::new(Level::Debug);
    let errors = Recorder::new(Level::Error);
    let logger = Logger::new([
        multilog::with_sink(verbose.clone()),
        multilog::with_sink(errors.clone()),
    ])
    .unwrap();

    logger.error(&io::Error::other("errA"));
    assert_eq!(verbose.calls(), [Call::Error("errA".to_owned())]);
    assert_eq!(errors.calls(), [Call::Error("errA".to_owned())]);

    logger.debug("x");
    assert_eq!(
        verbose.calls(),
        [Call::Error("errA".to_owned()), Call::Debug("x".to_owned())]
    );
    assert_eq!(errors.calls(), [Call::Error("errA".to_owned())]);
}

#[test]
fn test_same_sink_type_registered_twice() {
    let first = Recorder::new(Level::Info);
    let second = Recorder::new(Level::Info);
    let logger = multilog::builder()
        .sink(first.clone())
        .sink(second.clone())
        .build()
        .unwrap();

    logger.info("y");
    assert_eq!(first.calls(), [Call::Info("y".to_owned())]);
    assert_eq!(second.calls(), [Call::Info("y".to_owned())]);
}

#[test]
fn test_sinks_observe_events_in_registration_order() {
    let order = Arc::new(Mutex::new(vec![]));
    let first = Recorder {
        calls: order.clone(),
        ..Recorder::new(Level::Debug)
    };
    let second = Recorder {
        calls: order.clone(),
        ..Recorder::new(Level::Debug)
    };
    let logger = multilog::builder().sink(first).sink(second).build().unwrap();

    logger.info("first");
    logger.info("second");
    assert_eq!(
        *order.lock().unwrap(),
        [
            Call::Info("first".to_owned()),
            Call::Info("first".to_owned()),
            Call::Info("second".to_owned()),
            Call::Info("second".to_owned()),
        ]
    );
}

#[test]
fn test_logger_without_sinks_uses_fallback() {
    let fallback = Recorder::new(Level::Panic);
    let logger = Logger::new([multilog::with_fallback(fallback.clone())]).unwrap();
    assert_eq!(logger.sink_count(), 0);
    assert!(logger.enabled(Level::Debug));

    emit_all(&logger);
    // the fallback is not gated by its own level
    assert_eq!(
        fallback.calls(),
        [
            Call::Debug("x".to_owned()),
            Call::Info("y".to_owned()),
            Call::Error("errA".to_owned()),
        ]
    );

    logger.flush().unwrap();
    assert_eq!(fallback.calls().last(), Some(&Call::Flush));
}

#[test]
fn test_fallback_unused_when_sinks_registered() {
    let fallback = Recorder::new(Level::Debug);
    let sink = Recorder::new(Level::Error);
    let logger = multilog::builder()
        .fallback(fallback.clone())
        .sink(sink.clone())
        .build()
        .unwrap();

    emit_all(&logger);
    logger.flush().unwrap();
    assert!(fallback.calls().is_empty());
    assert_eq!(
        sink.calls(),
        [Call::Error("errA".to_owned()), Call::Flush]
    );
}

#[test]
fn test_default_logger_without_sinks_does_not_panic() {
    let logger = multilog::builder().build().unwrap();
    emit_all(&logger);
    logger.flush().unwrap();
}

#[test]
fn test_failing_option_aborts_construction() {
    let registered = Recorder::new(Level::Debug);
    let err = Logger::new([
        multilog::with_sink(registered.clone()),
        multilog::try_with_sink(None),
        multilog::with_sink(Recorder::new(Level::Debug)),
    ])
    .unwrap_err();
    assert_eq!(err.to_string(), "sink must be specified");

    // the sink registered before the failure was dropped with the draft
    assert_eq!(Arc::strong_count(&registered.calls), 1);
    assert!(registered.calls().is_empty());
}

#[test]
fn test_try_with_sink_accepts_some() {
    let sink = Recorder::new(Level::Info);
    let logger = Logger::new([multilog::try_with_sink(Some(Box::new(sink.clone())))]).unwrap();
    assert_eq!(logger.sink_count(), 1);
    logger.info("y");
    assert_eq!(sink.calls(), [Call::Info("y".to_owned())]);
}

#[test]
fn test_flush_attempts_every_sink_and_reports_failures() {
    let first = Recorder::new(Level::Debug).failing_flush();
    let second = Recorder::new(Level::Info);
    let third = Recorder::new(Level::Error).failing_flush();
    let logger = multilog::builder()
        .sink(first.clone())
        .sink(second.clone())
        .sink(third.clone())
        .build()
        .unwrap();

    let err = logger.flush().unwrap_err();
    assert_eq!(first.calls(), [Call::Flush]);
    assert_eq!(second.calls(), [Call::Flush]);
    assert_eq!(third.calls(), [Call::Flush]);

    assert_eq!(err.message(), "failed to flush sinks");
    assert_eq!(err.sources().len(), 2);
    assert_eq!(
        err.to_string(),
        "failed to flush sinks, context: { failed: 2 }, sources: [\
         flush failed, context: { level: DEBUG }, \
         flush failed, context: { level: ERROR }]"
    );
}

#[test]
fn test_emission_errors_go_to_trap() {
    let trap = CollectingTrap::default();
    let failing = Recorder::new(Level::Debug).failing_emit();
    let healthy = Recorder::new(Level::Debug);
    let logger = multilog::builder()
        .trap(trap.clone())
        .sink(failing.clone())
        .sink(healthy.clone())
        .build()
        .unwrap();

    logger.info("y");
    assert_eq!(failing.calls(), [Call::Info("y".to_owned())]);
    assert_eq!(healthy.calls(), [Call::Info("y".to_owned())]);
    assert_eq!(
        *trap.0.lock().unwrap(),
        ["failed to emit event, context: { level: INFO }, sources: [emit failed]"]
    );
}

#[test]
fn test_enabled_and_min_level() {
    let logger = multilog::builder()
        .sink(Recorder::new(Level::Error))
        .sink(Recorder::new(Level::Info))
        .build()
        .unwrap();

    assert_eq!(logger.min_level(), Some(Level::Info));
    assert!(!logger.enabled(Level::Debug));
    assert!(logger.enabled(Level::Info));
    assert!(logger.enabled(Level::Error));
}
