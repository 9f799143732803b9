use serde::Serialize;
use std::{borrow::Cow, fmt};
use tracing::debug;

/// Primitive token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Token {
    /// Unquoted word such as `car`, `category:some-slug` or `user:a/b`.
    Word(String),
    /// Word containing at least one quoted section, quotes stripped.
    ///
    /// ```
    /// use query_syntax::{Token, tokenize};
    /// let tokens: Vec<Token> = tokenize(r#"category:"Funny Videos""#).collect();
    /// assert_eq!(tokens, [Token::Phrase("category:Funny Videos".into())]);
    /// ```
    Phrase(String),
    /// An unquoted `-` at the start of a word.
    Negate,
    /// `{`
    OpenGroup,
    /// `}`
    CloseGroup,
}

/// Raised by [`try_tokenize`] when a quoted section never closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub quote: char,
    pub position: usize,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "missing closing {} quote (opened at byte {})",
            self.quote, self.position
        )
    }
}

impl std::error::Error for LexError {}

/// Lazily drained token sequence returned by [`tokenize`].
#[derive(Debug, Clone, Default)]
pub struct Tokens {
    inner: std::vec::IntoIter<Token>,
}

impl Iterator for Tokens {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Tokens {}

/// Splits `input` into tokens, dropping stray quote characters until the
/// remaining text lexes cleanly. Never fails; a string that loses every
/// character to recovery yields no tokens.
pub fn tokenize(input: &str) -> Tokens {
    Tokens {
        inner: settle(input).1.into_iter(),
    }
}

/// The text [`tokenize`] actually lexes: `input` with stray quote characters
/// removed. Borrowed when nothing had to be removed.
///
/// ```
/// use query_syntax::repair_quotes;
/// assert_eq!(repair_quotes(r#"say "hi"#), "say hi");
/// assert_eq!(repair_quotes("'ok'"), "'ok'");
/// ```
pub fn repair_quotes(input: &str) -> Cow<'_, str> {
    settle(input).0
}

fn settle(input: &str) -> (Cow<'_, str>, Vec<Token>) {
    let mut query = Cow::Borrowed(input);
    while !query.is_empty() {
        match try_tokenize(&query) {
            Ok(tokens) => return (query, tokens),
            Err(err) => {
                debug!("{err}, stripping stray quote from {query:?}");
                strip_stray_quote(query.to_mut());
            }
        }
    }
    (query, Vec::new())
}

/// Strict variant of [`tokenize`] that reports unterminated quotes instead of
/// recovering from them.
pub fn try_tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).run()
}

// The unbalanced quote kind is decided by the parity of `"` in the whole
// string, then its last occurrence goes. Every call removes at least one
// character, which bounds the retry loop by the input length.
fn strip_stray_quote(query: &mut String) {
    let doubles = query.chars().filter(|&c| c == '"').count();
    let (stray, other) = if doubles % 2 == 1 {
        ('"', '\'')
    } else {
        ('\'', '"')
    };
    match query.rfind(stray).or_else(|| query.rfind(other)) {
        Some(index) => {
            query.remove(index);
        }
        None => query.clear(),
    }
}

/// POSIX-style word splitter. Quotes may start or continue a word, a
/// backslash escapes the next character outside single quotes, and `{`/`}`
/// always stand alone.
struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    tokens: Vec<Token>,
    word: String,
    in_word: bool,
    quoted: bool,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            tokens: Vec::new(),
            word: String::new(),
            in_word: false,
            quoted: false,
        }
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(ch) = self.peek_char() {
            let start = self.pos;
            self.advance_char();
            match ch {
                ch if ch.is_whitespace() => self.finish_word(),
                '{' => {
                    self.finish_word();
                    self.tokens.push(Token::OpenGroup);
                }
                '}' => {
                    self.finish_word();
                    self.tokens.push(Token::CloseGroup);
                }
                '-' if !self.in_word => self.tokens.push(Token::Negate),
                '"' | '\'' => {
                    self.in_word = true;
                    self.quoted = true;
                    self.read_quoted(ch, start)?;
                }
                '\\' => {
                    self.in_word = true;
                    match self.peek_char() {
                        Some(next) => {
                            self.advance_char();
                            self.word.push(next);
                        }
                        // nothing left to escape
                        None => self.word.push('\\'),
                    }
                }
                _ => {
                    self.in_word = true;
                    self.word.push(ch);
                }
            }
        }
        self.finish_word();
        Ok(self.tokens)
    }

    // Inside double quotes a backslash only escapes `"` and `\`; single quotes
    // keep everything verbatim.
    fn read_quoted(&mut self, quote: char, opened_at: usize) -> Result<(), LexError> {
        while let Some(ch) = self.peek_char() {
            self.advance_char();
            if ch == quote {
                return Ok(());
            }
            if ch == '\\' && quote == '"' {
                if let Some(next @ ('"' | '\\')) = self.peek_char() {
                    self.advance_char();
                    self.word.push(next);
                    continue;
                }
            }
            self.word.push(ch);
        }
        Err(LexError {
            quote,
            position: opened_at,
        })
    }

    fn finish_word(&mut self) {
        if self.in_word && !self.word.is_empty() {
            let text = std::mem::take(&mut self.word);
            self.tokens.push(if self.quoted {
                Token::Phrase(text)
            } else {
                Token::Word(text)
            });
        }
        self.word.clear();
        self.in_word = false;
        self.quoted = false;
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance_char(&mut self) {
        if let Some(ch) = self.peek_char() {
            self.pos += ch.len_utf8();
        }
    }
}
