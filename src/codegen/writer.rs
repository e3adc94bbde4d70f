use std::fmt::{self, Write as _};

/// Escape text for use between tags.
pub fn escape_text(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text for use inside a double-quoted attribute.
pub fn escape_attr(raw: &str) -> String {
    escape_text(raw).replace('"', "&quot;")
}

/// Attribute list rendered as ` key="value" key2`; values are escaped.
#[derive(Debug, Default)]
pub(crate) struct Attrs(String);

impl Attrs {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set(mut self, key: &str, value: impl AsRef<str>) -> Self {
        let _ = write!(self.0, " {key}=\"{}\"", escape_attr(value.as_ref()));
        self
    }

    /// Like [`Attrs::set`] but skipped for empty values.
    pub(crate) fn set_nonempty(self, key: &str, value: &str) -> Self {
        if value.is_empty() {
            self
        } else {
            self.set(key, value)
        }
    }

    pub(crate) fn flag(mut self, key: &str, on: bool) -> Self {
        if on {
            self.0.push(' ');
            self.0.push_str(key);
        }
        self
    }
}

impl fmt::Display for Attrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Line-oriented writer that keeps nesting depth for indentation.
#[derive(Debug)]
pub(crate) struct MarkupWriter {
    out: String,
    depth: usize,
    indent: usize,
}

impl MarkupWriter {
    pub(crate) fn new(indent: usize) -> Self {
        Self {
            out: String::new(),
            depth: 0,
            indent,
        }
    }

    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        let width = self.depth * self.indent;
        let _ = writeln!(self.out, "{:width$}{}", "", text.as_ref());
    }

    pub(crate) fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.depth += 1;
    }

    pub(crate) fn close(&mut self, text: impl AsRef<str>) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    /// Write a multi-line block at the current depth, skipping blank lines.
    pub(crate) fn block(&mut self, text: &str) {
        for line in text.lines().map(str::trim_end).filter(|line| !line.is_empty()) {
            self.line(line);
        }
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}
