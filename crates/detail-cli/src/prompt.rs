// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Line-based prompting on a terminal

use std::io::{self, BufRead, Write};

use detail_core::{Field, Prompter};

/// Asks for each field on `output` and reads answers from `input`.
///
/// An empty line accepts the default. Multiline fields read until the first
/// empty line.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    /// Prompt over the given streams
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while prompting",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn is_interactive(&self) -> bool {
        true
    }

    fn ask(&mut self, field: &Field, default: Option<&str>) -> io::Result<Option<String>> {
        if let Some(help) = field.help() {
            writeln!(self.output, "{help}")?;
        }
        write!(self.output, "{}", field.display_name())?;
        if !field.choices().is_empty() {
            write!(self.output, " ({})", field.choices().join("/"))?;
        }
        if let Some(default) = default {
            write!(self.output, " [{default}]")?;
        }
        if field.is_multiline() {
            write!(self.output, " (end with an empty line)")?;
        }
        write!(self.output, ": ")?;
        self.output.flush()?;

        let first = self.read_line()?;
        if first.is_empty() {
            return Ok(None);
        }
        if !field.is_multiline() {
            return Ok(Some(first));
        }

        let mut lines = vec![first];
        loop {
            match self.read_line() {
                Ok(line) if line.is_empty() => break,
                Ok(line) => lines.push(line),
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e),
            }
        }
        Ok(Some(lines.join("\n")))
    }

    fn reject(&mut self, _field: &Field, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }
}
