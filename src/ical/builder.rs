//! A module to build iCal files, line by line

/// RFC5545 says lines should not be longer than 75 octets, excluding the line break
pub const MAX_LINE_OCTETS: usize = 75;

const CRLF: &str = "\r\n";

/// Escapes a TEXT value: backslashes, semicolons, commas and newlines.
///
/// Backslashes are escaped first, so that the backslashes added by the other replacements are not escaped twice
pub fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

/// Folds a (possibly already escaped) logical line into physical lines of at most [`MAX_LINE_OCTETS`] octets.
///
/// Continuation lines start with a single space, which counts in their length.
/// A multi-byte UTF-8 character is never split across two lines.
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut folded = String::with_capacity(line.len() + 3 * (line.len() / (MAX_LINE_OCTETS - 1)));
    let mut rest = line;
    let mut limit = MAX_LINE_OCTETS;
    loop {
        if rest.len() <= limit {
            folded.push_str(rest);
            return folded;
        }

        let mut cut = limit;
        while rest.is_char_boundary(cut) == false {
            cut -= 1;
        }
        folded.push_str(&rest[..cut]);
        folded.push_str(CRLF);
        folded.push(' ');
        rest = &rest[cut..];
        limit = MAX_LINE_OCTETS - 1;
    }
}

/// Collects the logical lines of an iCal file, and renders them as folded, CRLF-terminated lines
#[derive(Clone, Debug, Default)]
pub struct IcsBuilder {
    lines: Vec<String>,
}

impl IcsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a logical line, as is
    pub fn line<S: Into<String>>(&mut self, line: S) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    /// Append several logical lines, as they are
    pub fn lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Append a `NAME:value` line, where `value` is not escaped (e.g. dates, identifiers)
    pub fn property(&mut self, name: &str, value: &str) -> &mut Self {
        self.line(format!("{}:{}", name, value))
    }

    /// Append a `NAME:text` line, where `text` is escaped
    pub fn text_property(&mut self, name: &str, text: &str) -> &mut Self {
        self.property(name, &escape_text(text))
    }

    /// The logical (i.e. unfolded) lines that have been added so far
    pub fn logical_lines(&self) -> &[String] {
        &self.lines
    }

    pub fn build(&self) -> String {
        let mut output = String::new();
        for line in &self.lines {
            output.push_str(&fold_line(line));
            output.push_str(CRLF);
        }
        output
    }
}
