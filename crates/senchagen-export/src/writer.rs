//! Output targets consumed by the assemblers.
//!
//! A writer is a scoped acquisition: `open` starts a target, lines are
//! written at the current indent depth, and `close` releases it. Skip
//! outcomes never open a target at all.

use std::fs::File;
use std::io::{self, BufWriter, Write as _};
use std::path::PathBuf;

const INDENT: &str = "    ";

/// Line-oriented writer with indentation state.
pub trait Writer {
    /// Begin a new target; resets the indent depth.
    fn open(&mut self, target: &str) -> io::Result<()>;

    /// Write one line at the current indent depth.
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    fn indent(&mut self);

    fn outdent(&mut self);

    /// Flush and release the current target.
    fn close(&mut self) -> io::Result<()>;

    /// Write a multi-line block, re-indenting every line.
    fn write_block(&mut self, block: &str) -> io::Result<()> {
        for line in block.lines() {
            self.write_line(line)?;
        }
        Ok(())
    }

    /// Write a `/* ... */` comment block.
    fn write_comment(&mut self, comment: &str) -> io::Result<()> {
        self.write_line("/*")?;
        for line in comment.lines() {
            if line.is_empty() {
                self.write_line(" *")?;
            } else {
                self.write_line(&format!(" * {line}"))?;
            }
        }
        self.write_line(" */")
    }
}

fn no_open_target() -> io::Error {
    io::Error::other("writer has no open target")
}

/// Writer that creates files under a root directory and counts the
/// bytes it emits.
pub struct FileWriter {
    root: PathBuf,
    current: Option<BufWriter<File>>,
    depth: usize,
    bytes: u64,
}

impl FileWriter {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            current: None,
            depth: 0,
            bytes: 0,
        }
    }

    /// Total bytes written across all targets so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl Writer for FileWriter {
    fn open(&mut self, target: &str) -> io::Result<()> {
        let path = self.root.join(target);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.current = Some(BufWriter::new(File::create(path)?));
        self.depth = 0;
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let file = self.current.as_mut().ok_or_else(no_open_target)?;
        let rendered = if line.is_empty() {
            "\n".to_string()
        } else {
            format!("{}{}\n", INDENT.repeat(self.depth), line)
        };
        file.write_all(rendered.as_bytes())?;
        self.bytes += rendered.len() as u64;
        Ok(())
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn outdent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn close(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.current.take() {
            file.flush()?;
        }
        Ok(())
    }
}

/// In-memory writer keeping every closed target, used by tests.
#[derive(Default)]
pub struct BufferWriter {
    targets: Vec<(String, String)>,
    current: Option<(String, String)>,
    depth: usize,
}

impl BufferWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of a closed target, when present.
    pub fn content(&self, target: &str) -> Option<&str> {
        self.targets
            .iter()
            .find(|(name, _)| name == target)
            .map(|(_, body)| body.as_str())
    }

    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(|(name, _)| name.as_str())
    }
}

impl Writer for BufferWriter {
    fn open(&mut self, target: &str) -> io::Result<()> {
        self.current = Some((target.to_string(), String::new()));
        self.depth = 0;
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let (_, body) = self.current.as_mut().ok_or_else(no_open_target)?;
        if !line.is_empty() {
            body.push_str(&INDENT.repeat(self.depth));
            body.push_str(line);
        }
        body.push('\n');
        Ok(())
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn outdent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn close(&mut self) -> io::Result<()> {
        if let Some(target) = self.current.take() {
            self.targets.push(target);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_writer_tracks_indent_per_target() {
        let mut writer = BufferWriter::new();
        writer.open("a.js").expect("open");
        writer.write_line("x").expect("write");
        writer.indent();
        writer.write_line("y").expect("write");
        writer.close().expect("close");

        writer.open("b.js").expect("open");
        writer.write_line("z").expect("write");
        writer.close().expect("close");

        assert_eq!(writer.content("a.js"), Some("x\n    y\n"));
        assert_eq!(writer.content("b.js"), Some("z\n"));
    }

    #[test]
    fn write_before_open_is_an_error() {
        let mut writer = BufferWriter::new();
        assert!(writer.write_line("x").is_err());
    }

    #[test]
    fn comment_block_wraps_lines() {
        let mut writer = BufferWriter::new();
        writer.open("a.js").expect("open");
        writer.write_comment("generated file\ndo not edit").expect("comment");
        writer.close().expect("close");
        assert_eq!(
            writer.content("a.js"),
            Some("/*\n * generated file\n * do not edit\n */\n")
        );
    }
}
