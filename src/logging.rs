//! # Startup Log Sink
//!
//! Where the log file lives is only known once the config has been loaded,
//! but loading the config already logs. [`LogSink`] is handed to the file
//! logger before anything else runs and holds lines in memory until
//! [`LogSink::attach`] names the file (or [`LogSink::discard`] turns logging
//! off).
//!
//! ```text
//! logger init ─▶ load config (buffered) ─▶ resolve ─▶ attach(file) ─▶ direct writes
//! ```

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

enum Target {
    Buffer(Vec<u8>),
    File(File),
    Discard,
}

/// A cloneable writer that buffers until it is pointed at a file.
#[derive(Clone)]
pub struct LogSink {
    target: Arc<Mutex<Target>>,
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink {
    pub fn new() -> Self {
        Self {
            target: Arc::new(Mutex::new(Target::Buffer(Vec::new()))),
        }
    }

    /// Creates `path`, writes everything buffered so far into it, and sends
    /// later lines straight to it. On error the buffer is kept.
    pub fn attach(&self, path: &Path) -> io::Result<()> {
        let mut file = File::create(path)?;
        let mut target = self.lock()?;
        if let Target::Buffer(buffered) = &*target {
            file.write_all(buffered)?;
        }
        *target = Target::File(file);
        Ok(())
    }

    /// Drops the buffer and everything written afterwards.
    pub fn discard(&self) {
        if let Ok(mut target) = self.lock() {
            *target = Target::Discard;
        }
    }

    /// Bytes held back while no file is attached.
    pub fn buffered_len(&self) -> usize {
        match self.lock().as_deref() {
            Ok(Target::Buffer(buffered)) => buffered.len(),
            _ => 0,
        }
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, Target>> {
        self.target
            .lock()
            .map_err(|_| io::Error::other("log sink lock poisoned"))
    }
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut *self.lock()? {
            Target::Buffer(buffered) => {
                buffered.extend_from_slice(buf);
                Ok(buf.len())
            }
            Target::File(file) => file.write(buf),
            Target::Discard => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.lock()? {
            Target::File(file) => file.flush(),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("navstack-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_lines_before_attach_reach_the_file() {
        let path = temp_path("sink-attach.log");
        let sink = LogSink::new();
        let mut writer = sink.clone();
        writeln!(writer, "loaded config").unwrap();
        assert!(sink.buffered_len() > 0);

        sink.attach(&path).unwrap();
        writeln!(writer, "program started").unwrap();
        writer.flush().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(contents, "loaded config\nprogram started\n");
        assert_eq!(sink.buffered_len(), 0);
    }

    #[test]
    fn test_failed_attach_keeps_buffer() {
        let sink = LogSink::new();
        let mut writer = sink.clone();
        writeln!(writer, "early").unwrap();

        let missing_dir = temp_path("no-such-dir").join("x.log");
        assert!(sink.attach(&missing_dir).is_err());
        assert_eq!(sink.buffered_len(), "early\n".len());
    }

    #[test]
    fn test_discard_drops_everything() {
        let sink = LogSink::new();
        let mut writer = sink.clone();
        writeln!(writer, "early").unwrap();
        sink.discard();
        writeln!(writer, "late").unwrap();
        assert_eq!(sink.buffered_len(), 0);
    }
}
