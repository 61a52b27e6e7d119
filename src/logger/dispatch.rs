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

use crate::Error;
use crate::Level;
use crate::Sink;
use crate::Trap;

/// Hand an event of `level` to every sink whose threshold is `<= level`, in registration order.
///
/// Emission errors go to `trap`; a failing sink never stops the others.
pub(crate) fn emit<F>(sinks: &[Box<dyn Sink>], level: Level, trap: &dyn Trap, f: F)
where
    F: Fn(&dyn Sink) -> Result<(), Error>,
{
    for sink in sinks {
        if sink.level() > level {
            continue;
        }

        if let Err(err) = f(sink.as_ref()) {
            trap_emit_error(trap, level, err);
        }
    }
}

pub(crate) fn trap_emit_error(trap: &dyn Trap, level: Level, err: Error) {
    let err = Error::new("failed to emit event")
        .with_context("level", level)
        .with_source(err);
    trap.trap(&err);
}

/// Flush every sink exactly once, in registration order.
///
/// A failing flush does not stop the remaining sinks. All failures are reported as the sources
/// of a single error.
pub(crate) fn flush_all(sinks: &[Box<dyn Sink>]) -> Result<(), Error> {
    let mut failures = vec![];
    for sink in sinks {
        if let Err(err) = sink.flush() {
            failures.push(err);
        }
    }

    if failures.is_empty() {
        return Ok(());
    }

    let mut err = Error::new("failed to flush sinks").with_context("failed", failures.len());
    for failure in failures {
        err = err.with_source(failure);
    }
    Err(err)
}
