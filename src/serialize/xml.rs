use std::fmt::Write as _;

/// Escape text for use in attribute values and character data.
pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Ordered attribute list; `None` values are skipped on output.
#[derive(Debug, Default)]
pub(crate) struct Attrs(Vec<(&'static str, String)>);

impl Attrs {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set(mut self, name: &'static str, value: impl ToString) -> Self {
        self.0.push((name, value.to_string()));
        self
    }

    pub(crate) fn opt<T: ToString>(self, name: &'static str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.set(name, v),
            None => self,
        }
    }
}

/// Indented, append-only XML writer. Tags are closed in LIFO order.
#[derive(Debug)]
pub(crate) struct XmlWriter {
    out: String,
    open: Vec<&'static str>,
}

impl XmlWriter {
    pub(crate) fn new() -> Self {
        Self {
            out: String::new(),
            open: Vec::new(),
        }
    }

    /// Raw line at column zero, used for the declaration and doctype.
    pub(crate) fn raw_line(&mut self, line: &str) {
        self.out.push_str(line);
        self.out.push('\n');
    }

    fn indent(&mut self) {
        for _ in 0..self.open.len() {
            self.out.push_str("    ");
        }
    }

    fn start_tag(&mut self, tag: &str, attrs: &Attrs) {
        self.indent();
        self.out.push('<');
        self.out.push_str(tag);
        for (name, value) in &attrs.0 {
            // Writing into a String cannot fail.
            let _ = write!(self.out, " {name}=\"{}\"", escape_xml(value));
        }
    }

    pub(crate) fn open(&mut self, tag: &'static str, attrs: Attrs) {
        self.start_tag(tag, &attrs);
        self.out.push_str(">\n");
        self.open.push(tag);
    }

    pub(crate) fn empty(&mut self, tag: &'static str, attrs: Attrs) {
        self.start_tag(tag, &attrs);
        self.out.push_str("/>\n");
    }

    pub(crate) fn text(&mut self, tag: &'static str, attrs: Attrs, text: &str) {
        self.start_tag(tag, &attrs);
        self.out.push('>');
        self.out.push_str(&escape_xml(text));
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    pub(crate) fn close(&mut self) {
        if let Some(tag) = self.open.pop() {
            self.indent();
            self.out.push_str("</");
            self.out.push_str(tag);
            self.out.push_str(">\n");
        }
    }

    /// Close anything still open and return the text.
    pub(crate) fn finish(mut self) -> String {
        while !self.open.is_empty() {
            self.close();
        }
        self.out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/serialize/xml.rs"]
mod tests;
