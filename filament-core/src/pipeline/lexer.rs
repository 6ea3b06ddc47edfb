//! A forgiving HTML lexer.
//!
//! Splits markup into text runs, start tags (with parsed attributes), end
//! tags and everything else (comments, doctypes). It never fails: input
//! it cannot make sense of comes back as text. The minifier and the
//! sanitizer share it so both agree on where tags begin and end.

/// Elements whose content is raw text up to the matching end tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Text(&'a str),
    StartTag(StartTag<'a>),
    EndTag { name: String, raw: &'a str },
    /// Comments, doctypes, processing instructions.
    Other(&'a str),
}

impl<'a> Token<'a> {
    /// The source text this token was read from.
    pub(crate) fn raw(&self) -> &'a str {
        match self {
            Token::Text(raw) | Token::Other(raw) => *raw,
            Token::StartTag(tag) => tag.raw,
            Token::EndTag { raw, .. } => *raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StartTag<'a> {
    pub raw: &'a str,
    /// Lowercase tag name.
    pub name: String,
    pub attrs: Vec<Attr<'a>>,
    pub self_closing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Attr<'a> {
    pub name: &'a str,
    pub value: Option<&'a str>,
    pub quote: Option<char>,
}

impl Attr<'_> {
    /// Write the attribute back out, with a leading space.
    pub(crate) fn write(&self, out: &mut String) {
        out.push(' ');
        out.push_str(self.name);
        if let Some(value) = self.value {
            out.push('=');
            match self.quote {
                Some(q) => {
                    out.push(q);
                    out.push_str(value);
                    out.push(q);
                }
                None => {
                    out.push('"');
                    out.push_str(&value.replace('"', "&quot;"));
                    out.push('"');
                }
            }
        }
    }
}

pub(crate) struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    /// Set after a raw-text start tag; the next token runs to its end tag.
    raw_until: Option<String>,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            raw_until: None,
        }
    }

    fn text_until_next_tag(&mut self, skip: usize) -> Token<'a> {
        let rest = &self.src[self.pos..];
        let end = rest[skip..]
            .find('<')
            .map(|i| i + skip)
            .unwrap_or(rest.len());
        self.pos += end;
        Token::Text(&rest[..end])
    }

    fn take(&mut self, len: usize) -> &'a str {
        let raw = &self.src[self.pos..self.pos + len];
        self.pos += len;
        raw
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.pos >= self.src.len() {
            return None;
        }

        if let Some(name) = self.raw_until.take() {
            let rest = &self.src[self.pos..];
            let end = find_ascii_ci(rest, &format!("</{name}")).unwrap_or(rest.len());
            if end > 0 {
                return Some(Token::Text(self.take(end)));
            }
        }

        let rest = &self.src[self.pos..];
        let bytes = rest.as_bytes();
        if bytes[0] != b'<' {
            return Some(self.text_until_next_tag(0));
        }
        if bytes.len() < 2 {
            return Some(self.text_until_next_tag(1));
        }

        if rest.starts_with("<!--") {
            let len = rest[4..].find("-->").map(|i| i + 7).unwrap_or(rest.len());
            return Some(Token::Other(self.take(len)));
        }

        match bytes[1] {
            b'!' | b'?' => {
                let len = rest.find('>').map(|i| i + 1).unwrap_or(rest.len());
                Some(Token::Other(self.take(len)))
            }
            b'/' if bytes.get(2).is_some_and(u8::is_ascii_alphabetic) => {
                let len = rest.find('>').map(|i| i + 1).unwrap_or(rest.len());
                let name = rest[2..]
                    .chars()
                    .take_while(|c| is_name_char(*c))
                    .collect::<String>()
                    .to_ascii_lowercase();
                let raw = self.take(len);
                Some(Token::EndTag { name, raw })
            }
            b if b.is_ascii_alphabetic() => {
                let (tag, len) = parse_start_tag(rest);
                self.pos += len;
                if !tag.self_closing && RAW_TEXT_ELEMENTS.contains(&tag.name.as_str()) {
                    self.raw_until = Some(tag.name.clone());
                }
                Some(Token::StartTag(tag))
            }
            _ => Some(self.text_until_next_tag(1)),
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == ':' || c == '_'
}

/// Case-insensitive search for an ASCII needle.
fn find_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    let hay = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.len() > hay.len() {
        return None;
    }
    (0..=hay.len() - needle.len()).find(|&i| hay[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// Parse a start tag at the beginning of `src`. Returns the tag and the
/// number of bytes consumed.
fn parse_start_tag(src: &str) -> (StartTag<'_>, usize) {
    let bytes = src.as_bytes();
    let len = bytes.len();
    let mut i = 1;
    while i < len && is_name_char(bytes[i] as char) {
        i += 1;
    }
    let name = src[1..i].to_ascii_lowercase();

    let mut attrs = Vec::new();
    let mut self_closing = false;
    loop {
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= len {
            break;
        }
        match bytes[i] {
            b'>' => {
                i += 1;
                break;
            }
            b'/' => {
                self_closing = bytes.get(i + 1) == Some(&b'>');
                i += 1;
                continue;
            }
            _ => {}
        }

        let start = i;
        while i < len && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'/' | b'>' | b'=') {
            i += 1;
        }
        if i == start {
            // Stray '='.
            i += 1;
            continue;
        }
        let attr_name = &src[start..i];
        self_closing = false;

        let mut j = i;
        while j < len && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if j >= len || bytes[j] != b'=' {
            attrs.push(Attr {
                name: attr_name,
                value: None,
                quote: None,
            });
            continue;
        }

        i = j + 1;
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i < len && (bytes[i] == b'"' || bytes[i] == b'\'') {
            let quote = bytes[i];
            let value_start = i + 1;
            let value_end = src[value_start..]
                .find(quote as char)
                .map(|k| k + value_start)
                .unwrap_or(len);
            attrs.push(Attr {
                name: attr_name,
                value: Some(&src[value_start..value_end]),
                quote: Some(quote as char),
            });
            i = (value_end + 1).min(len);
        } else {
            let value_start = i;
            while i < len && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                i += 1;
            }
            attrs.push(Attr {
                name: attr_name,
                value: Some(&src[value_start..i]),
                quote: None,
            });
        }
    }

    let tag = StartTag {
        raw: &src[..i],
        name,
        attrs,
        self_closing,
    };
    (tag, i)
}
