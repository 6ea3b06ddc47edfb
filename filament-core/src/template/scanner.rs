//! Attribute-context scanner.
//!
//! The assembler feeds every piece of text it emits through a
//! [`ContextScanner`]. At each interpolation point the scanner answers one
//! question in constant time: does the text so far end right after an
//! attribute assignment like `<div color=`? If so, the value being
//! interpolated is an attribute value and [`ContextScanner::assignment`]
//! returns the attribute name.

/// Elements whose content is raw text; markup inside them is not tags.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Text,
    /// Just read `<`.
    TagOpen,
    TagName,
    /// Inside `</...`, up to `>`.
    EndTag,
    /// Inside a start tag, between attributes.
    InTag,
    AttrName,
    AfterAttrName,
    /// Immediately after `name=`.
    AfterEquals,
    /// After `name=` and some whitespace.
    BeforeValue,
    ValueQuoted(char),
    ValueUnquoted,
    /// After `<!`, counting leading dashes.
    MarkupDecl(u8),
    /// Inside `<!-- ... -->`, counting trailing dashes.
    Comment(u8),
    /// Doctype or other `<!...>` / `<?...>` construct.
    Bogus,
    /// Content of a raw-text element. Holds how much of `</name` has matched.
    RawText(usize),
}

/// Incremental HTML context tracker.
#[derive(Debug, Clone)]
pub struct ContextScanner {
    state: State,
    tag: String,
    attr: String,
    /// `</name` of the raw-text element we are inside.
    raw_close: String,
}

impl Default for ContextScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextScanner {
    pub fn new() -> Self {
        Self {
            state: State::Text,
            tag: String::new(),
            attr: String::new(),
            raw_close: String::new(),
        }
    }

    /// Advance over `text`.
    pub fn feed(&mut self, text: &str) {
        for c in text.chars() {
            self.step(c);
        }
    }

    /// The lowercase attribute name if the text fed so far ends exactly
    /// at `name=`.
    pub fn assignment(&self) -> Option<&str> {
        match self.state {
            State::AfterEquals => Some(&self.attr),
            _ => None,
        }
    }

    /// Whether the scanner is inside a start tag.
    pub fn in_tag(&self) -> bool {
        matches!(
            self.state,
            State::TagName
                | State::InTag
                | State::AttrName
                | State::AfterAttrName
                | State::AfterEquals
                | State::BeforeValue
                | State::ValueQuoted(_)
                | State::ValueUnquoted
        )
    }

    fn step(&mut self, c: char) {
        self.state = match std::mem::replace(&mut self.state, State::Text) {
            State::Text => {
                if c == '<' {
                    State::TagOpen
                } else {
                    State::Text
                }
            }
            State::TagOpen => match c {
                c if c.is_ascii_alphabetic() => {
                    self.tag.clear();
                    self.tag.push(c.to_ascii_lowercase());
                    State::TagName
                }
                '/' => State::EndTag,
                '!' => State::MarkupDecl(0),
                '?' => State::Bogus,
                '<' => State::TagOpen,
                _ => State::Text,
            },
            State::TagName => match c {
                '>' => self.close_start_tag(),
                '/' => State::InTag,
                c if c.is_whitespace() => State::InTag,
                c => {
                    self.tag.push(c.to_ascii_lowercase());
                    State::TagName
                }
            },
            State::EndTag | State::Bogus if c == '>' => State::Text,
            s @ (State::EndTag | State::Bogus) => s,
            State::InTag => match c {
                '>' => self.close_start_tag(),
                '/' => State::InTag,
                c if c.is_whitespace() => State::InTag,
                c => self.start_attr(c),
            },
            State::AttrName => match c {
                '=' => State::AfterEquals,
                '>' => self.close_start_tag(),
                '/' => State::InTag,
                c if c.is_whitespace() => State::AfterAttrName,
                c => {
                    self.attr.push(c.to_ascii_lowercase());
                    State::AttrName
                }
            },
            State::AfterAttrName => match c {
                '=' => State::AfterEquals,
                '>' => self.close_start_tag(),
                '/' => State::InTag,
                c if c.is_whitespace() => State::AfterAttrName,
                c => self.start_attr(c),
            },
            State::AfterEquals | State::BeforeValue => match c {
                '"' | '\'' => State::ValueQuoted(c),
                '>' => self.close_start_tag(),
                c if c.is_whitespace() => State::BeforeValue,
                _ => State::ValueUnquoted,
            },
            State::ValueQuoted(q) => {
                if c == q {
                    State::InTag
                } else {
                    State::ValueQuoted(q)
                }
            }
            State::ValueUnquoted => match c {
                '>' => self.close_start_tag(),
                c if c.is_whitespace() => State::InTag,
                _ => State::ValueUnquoted,
            },
            State::MarkupDecl(dashes) => match c {
                '-' if dashes == 1 => State::Comment(0),
                '-' => State::MarkupDecl(1),
                '>' => State::Text,
                _ => State::Bogus,
            },
            State::Comment(dashes) => match c {
                '>' if dashes >= 2 => State::Text,
                '-' => State::Comment(dashes.saturating_add(1)),
                _ => State::Comment(0),
            },
            State::RawText(matched) => self.raw_text(matched, c),
        };
    }

    fn start_attr(&mut self, c: char) -> State {
        self.attr.clear();
        self.attr.push(c.to_ascii_lowercase());
        State::AttrName
    }

    fn close_start_tag(&mut self) -> State {
        if RAW_TEXT_ELEMENTS.contains(&self.tag.as_str()) {
            self.raw_close.clear();
            self.raw_close.push_str("</");
            self.raw_close.push_str(&self.tag);
            State::RawText(0)
        } else {
            State::Text
        }
    }

    fn raw_text(&mut self, matched: usize, c: char) -> State {
        let expected = self.raw_close.as_bytes().get(matched).copied().map(char::from);
        if expected == Some(c.to_ascii_lowercase()) {
            if matched + 1 == self.raw_close.len() {
                return State::EndTag;
            }
            return State::RawText(matched + 1);
        }
        State::RawText(usize::from(c == '<'))
    }
}
