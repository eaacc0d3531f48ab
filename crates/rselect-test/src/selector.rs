//! CSS-like selector parsing for rendered node queries.
//!
//! Supports:
//! - `"input"` - by tag
//! - `".option"` - by class
//! - `"#country"` - by test ID
//! - `"[data-part]"`, `"[data-value='2']"` - by attribute presence or value
//! - compounds such as `"div.option[data-value='2']"`
//! - descendant combinator, e.g. `"#country .option"`

use rselect_core::{Node, TEST_ID_ATTR};
use thiserror::Error;

/// One simple selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Simple {
    /// Match by tag name
    Tag(String),
    /// Match by test ID (e.g., `#my-id`)
    TestId(String),
    /// Match by class (e.g., `.my-class`)
    Class(String),
    /// Match by attribute, with an optional exact value
    Attribute {
        /// Attribute name
        name: String,
        /// Required value; `None` means presence only
        value: Option<String>,
    },
}

impl Simple {
    fn matches(&self, node: &Node) -> bool {
        match self {
            Self::Tag(tag) => node.tag() == tag,
            Self::TestId(id) => node.get_attr(TEST_ID_ATTR) == Some(id.as_str()),
            Self::Class(class) => node.has_class(class),
            Self::Attribute { name, value } => match (node.get_attr(name), value) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            },
        }
    }
}

/// Simple selectors that must all match one node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Compound(pub Vec<Simple>);

impl Compound {
    /// Check if every part matches `node`.
    #[must_use]
    pub fn matches(&self, node: &Node) -> bool {
        self.0.iter().all(|s| s.matches(node))
    }
}

/// Parsed selector: compounds joined by descendant combinators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    steps: Vec<Compound>,
}

impl Selector {
    /// Parse a selector string.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector is invalid.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        SelectorParser::new(input).parse()
    }

    /// Compounds from outermost to innermost.
    #[must_use]
    pub fn steps(&self) -> &[Compound] {
        &self.steps
    }

    /// Check if this selector matches `node`, given its ancestors from the
    /// root down to its parent.
    #[must_use]
    pub fn matches(&self, ancestors: &[&Node], node: &Node) -> bool {
        let Some((last, outer)) = self.steps.split_last() else {
            return false;
        };
        if !last.matches(node) {
            return false;
        }
        let mut remaining = ancestors.iter().rev();
        outer
            .iter()
            .rev()
            .all(|step| remaining.any(|a| step.matches(a)))
    }
}

/// Selector parser.
pub struct SelectorParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    /// Create a new parser.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Parse the selector.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector is invalid.
    pub fn parse(&mut self) -> Result<Selector, SelectorError> {
        let mut steps = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek_char().is_none() {
                break;
            }
            steps.push(self.parse_compound()?);
        }
        if steps.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Selector { steps })
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let mut parts = Vec::new();
        while let Some(c) = self.peek_char() {
            let part = match c {
                '#' => {
                    self.advance();
                    Simple::TestId(self.read_identifier()?)
                }
                '.' => {
                    self.advance();
                    Simple::Class(self.read_identifier()?)
                }
                '[' => self.parse_attribute()?,
                _ if c.is_whitespace() => break,
                _ if c.is_alphabetic() => Simple::Tag(self.read_identifier()?),
                _ => return Err(SelectorError::UnexpectedChar(c)),
            };
            parts.push(part);
        }
        Ok(Compound(parts))
    }

    fn parse_attribute(&mut self) -> Result<Simple, SelectorError> {
        self.advance(); // Skip '['

        let name = self.read_until_any(&['=', ']']).trim().to_string();
        if name.is_empty() {
            return Err(SelectorError::InvalidAttribute);
        }

        let value = if self.peek_char() == Some('=') {
            self.advance();
            let quote = self.peek_char().filter(|q| *q == '\'' || *q == '"');
            if quote.is_some() {
                self.advance();
            }
            let value = match quote {
                Some(q) => self.read_until_any(&[q]),
                None => self.read_until_any(&[']']),
            };
            if quote.is_some() {
                if self.peek_char() != quote {
                    return Err(SelectorError::UnclosedAttribute);
                }
                self.advance();
            }
            Some(value)
        } else {
            None
        };

        if self.peek_char() != Some(']') {
            return Err(SelectorError::UnclosedAttribute);
        }
        self.advance();

        Ok(Simple::Attribute { name, value })
    }

    fn read_identifier(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        if self.pos == start {
            return Err(SelectorError::ExpectedIdentifier);
        }

        Ok(self.input[start..self.pos].to_string())
    }

    fn read_until_any(&mut self, stops: &[char]) -> String {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if stops.contains(&c) {
                break;
            }
            self.advance();
        }
        self.input[start..self.pos].to_string()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }
}

/// Selector parsing error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// Empty selector
    #[error("empty selector")]
    Empty,
    /// Unexpected character
    #[error("unexpected character: '{0}'")]
    UnexpectedChar(char),
    /// Expected identifier
    #[error("expected identifier")]
    ExpectedIdentifier,
    /// Invalid attribute syntax
    #[error("invalid attribute syntax")]
    InvalidAttribute,
    /// Unclosed attribute bracket or quote
    #[error("unclosed attribute bracket")]
    UnclosedAttribute,
}
