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
use std::sync::Arc;
use std::sync::Mutex;

use multilog::Error;
use multilog::Level;
use multilog::Sink;

#[derive(Debug, Clone)]
struct Collect(Arc<Mutex<Vec<String>>>);

impl Sink for Collect {
    fn level(&self) -> Level {
        Level::Info
    }

    fn debug(&self, msg: &str) -> Result<(), Error> {
        self.0.lock().unwrap().push(format!("debug {msg}"));
        Ok(())
    }

    fn info(&self, msg: &str) -> Result<(), Error> {
        self.0.lock().unwrap().push(format!("info {msg}"));
        Ok(())
    }

    fn error(&self, err: &(dyn StdError + 'static)) -> Result<(), Error> {
        self.0.lock().unwrap().push(format!("error {err}"));
        Ok(())
    }
}

// the global logger can be set only once per process, so everything lives in one test
#[test]
fn test_log_records_are_routed_through_logger() {
    let sink = Collect(Arc::new(Mutex::new(vec![])));
    let logger = multilog::builder().sink(sink.clone()).build().unwrap();
    logger.apply().unwrap();

    assert_eq!(log::max_level(), log::LevelFilter::Info);

    log::trace!("too verbose");
    log::debug!("too verbose");
    log::info!("started on port {}", 8080);
    log::warn!("disk almost full");
    log::error!("request failed");
    log::logger().flush();

    assert_eq!(
        *sink.0.lock().unwrap(),
        [
            "info started on port 8080",
            "info disk almost full",
            "error request failed",
        ]
    );

    let again = multilog::builder().build().unwrap();
    let err = again.apply().unwrap_err();
    assert_eq!(err.message(), "failed to set global logger");
}
