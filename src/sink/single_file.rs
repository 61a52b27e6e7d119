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
use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::Error;
use crate::Event;
use crate::Layout;
use crate::Level;
use crate::layout::TextLayout;
use crate::sink::Sink;

/// A builder to configure and create a [`SingleFile`] sink.
#[derive(Debug)]
pub struct SingleFileBuilder {
    filepath: PathBuf,
    layout: Box<dyn Layout>,
    level: Level,
    buffer_capacity: Option<usize>,
}

impl SingleFileBuilder {
    /// Create a new builder.
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            filepath: filepath.into(),
            layout: Box::new(TextLayout::default().no_color()),
            level: Level::Debug,
            buffer_capacity: None,
        }
    }

    /// Set the layout for the logs.
    ///
    /// Default to [`TextLayout`] without colors.
    pub fn layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Set the minimum level of the sink.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the capacity of the write buffer. Default to the [`BufWriter`] default.
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = Some(capacity);
        self
    }

    /// Build the [`SingleFile`] sink.
    ///
    /// # Errors
    ///
    /// Return an error if the log directory or the log file cannot be created.
    pub fn build(self) -> Result<SingleFile, Error> {
        let SingleFileBuilder {
            filepath,
            layout,
            level,
            buffer_capacity,
        } = self;

        if let Some(dir) = filepath.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|err| {
                Error::new("failed to create log directory")
                    .with_context("path", dir.display())
                    .with_source(err)
            })?;
        }

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&filepath)
            .map_err(|err| {
                Error::new("failed to create log file")
                    .with_context("path", filepath.display())
                    .with_source(err)
            })?;

        let writer = match buffer_capacity {
            Some(capacity) => BufWriter::with_capacity(capacity, file),
            None => BufWriter::new(file),
        };

        Ok(SingleFile {
            layout,
            level,
            writer: Mutex::new(writer),
        })
    }
}

/// A sink that appends events to a single file through a buffered writer.
///
/// Flushing writes the buffer out and syncs the file to disk.
///
/// # Examples
///
/// ```
/// use multilog::Level;
/// use multilog::sink::SingleFileBuilder;
///
/// let dir = tempfile::tempdir().unwrap();
/// let sink = SingleFileBuilder::new(dir.path().join("service.log"))
///     .level(Level::Info)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct SingleFile {
    layout: Box<dyn Layout>,
    level: Level,
    writer: Mutex<BufWriter<File>>,
}

impl SingleFile {
    fn lock(&self) -> MutexGuard<'_, BufWriter<File>> {
        // a poisoned writer is still usable, the worst case is a torn line
        self.writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self, event: &Event) -> Result<(), Error> {
        let mut bytes = self.layout.format(event)?;
        bytes.push(b'\n');
        self.lock().write_all(&bytes).map_err(Error::from_io_error)
    }
}

impl Sink for SingleFile {
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
        let mut writer = self.lock();
        writer.flush().map_err(Error::from_io_error)?;
        writer.get_ref().sync_all().map_err(Error::from_io_error)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use rand::Rng;
    use rand::distr::Alphanumeric;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_single_file_writes_on_flush() {
        let dir = TempDir::new().expect("failed to create a temporary directory");
        let path = dir.path().join("nested").join("service.log");

        let sink = SingleFileBuilder::new(&path)
            .level(Level::Info)
            .build()
            .unwrap();
        assert_eq!(sink.level(), Level::Info);

        let message = generate_random_string();
        sink.info(&message).unwrap();
        sink.error(&io::Error::other("disk full")).unwrap();
        sink.flush().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(&format!(" INFO {message}")));
        assert!(lines[1].ends_with("ERROR disk full"));
    }

    #[test]
    fn test_single_file_appends() {
        let dir = TempDir::new().expect("failed to create a temporary directory");
        let path = dir.path().join("service.log");

        for round in 0..2 {
            let sink = SingleFileBuilder::new(&path).build().unwrap();
            sink.debug(&format!("round {round}")).unwrap();
            sink.flush().unwrap();
        }

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_single_file_fails_on_directory() {
        let dir = TempDir::new().expect("failed to create a temporary directory");
        let err = SingleFileBuilder::new(dir.path()).build().unwrap_err();
        assert_eq!(err.message(), "failed to create log file");
    }

    fn generate_random_string() -> String {
        let mut rng = rand::rng();
        let len = rng.random_range(50..=100);
        std::iter::repeat(())
            .map(|()| rng.sample(Alphanumeric))
            .map(char::from)
            .take(len)
            .collect()
    }
}
