//! Tokenizer for the pattern language.
//!
//! Lexing is modal: `[` switches to a character-set token enum and `]`
//! switches back (`Lexer::morph`). The `TokenStream` wrapper owns the mode
//! switch, splits literal runs so that quantifiers and anchors attach to a
//! single preceding element, and turns malformed escapes into typed scan
//! errors instead of panics.

use logos::Logos;

use crate::error::ParseErrorKind;

/// Characters that terminate a literal run and force the run's last
/// character into its own token, so `abc*` quantifies `c`, not `abc`.
const SPLIT_AFTER: &str = "+*?{^$";

/// Raw tokens outside a character set.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(".")]
    Dot,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("?")]
    Question,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("-")]
    Dash,
    #[token("^")]
    Caret,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("|")]
    Pipe,
    #[token(",")]
    Comma,
    #[token("$")]
    Dollar,

    #[regex(r"\\[tnrfvsSwWdDbAZpP]", priority = 10)]
    Escaped,
    #[regex(r"\\[().*+?\[\]\-\\^{}|,$]", priority = 10)]
    EscapedMeta,
    #[regex(r"\\[1-9][0-9]?", priority = 10)]
    BackRef,
    #[regex(r"\\x[0-9a-fA-F][0-9a-fA-F]", priority = 10)]
    Hex,
    #[regex(r"\\u[0-9a-fA-F][0-9a-fA-F][0-9a-fA-F][0-9a-fA-F]", priority = 10)]
    UnicodeEscape,
    #[regex(r"\\0[0-7][0-7]", priority = 10)]
    Oct,
    #[regex(r"\\.", priority = 2)]
    BadEscape,

    #[regex(r"[^().*+?\[\]\-\\^{}|,$]+")]
    Run,
}

/// Raw tokens inside `[...]`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawSetToken {
    #[token("]")]
    RBracket,
    #[token("^")]
    Caret,

    #[regex(r"\\[tnrfvsSwWdDbAZpP]", priority = 10)]
    Escaped,
    #[regex(r"\\[().*+?\[\]\-\\^{}|,$]", priority = 10)]
    EscapedMeta,
    #[regex(r"\\[1-9][0-9]?", priority = 10)]
    BackRef,
    #[regex(r"\\x[0-9a-fA-F][0-9a-fA-F]", priority = 10)]
    Hex,
    #[regex(r"\\u[0-9a-fA-F][0-9a-fA-F][0-9a-fA-F][0-9a-fA-F]", priority = 10)]
    UnicodeEscape,
    #[regex(r"\\0[0-7][0-7]", priority = 10)]
    Oct,
    #[regex(r"\\.", priority = 2)]
    BadEscape,

    #[regex(r"[^\^\\\]]-[^\\\]]")]
    Range,
    #[regex(r"[^\^\\\]]")]
    Element,
}

/// One pattern token. Slices borrow from the pattern string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'src> {
    /// A literal run of non-meta characters.
    Text(&'src str),
    /// A meta character: `( ) . * + ? [ ] - ^ { } | , $`.
    Meta(char),
    /// `\c` for a recognized letter or self-escaped meta character.
    Escaped(char),
    /// Plain character inside `[...]`.
    SetElement(char),
    /// `a-z` inside `[...]`.
    RangeSetElement(char, char),
    /// `\c` inside `[...]`.
    EscapedSetElement(char),
    /// `\xHH`; lexeme is the two hex digits.
    Hex(&'src str),
    /// `\0OO`; lexeme is the two octal digits.
    Oct(&'src str),
    /// `\uHHHH`; lexeme is the four hex digits.
    UnicodeEscape(&'src str),
    /// `\1`..`\99`.
    BackRef(u32),
    /// Returned forever once the pattern is exhausted.
    End,
    /// Malformed input; the parser surfaces this with the token's offset.
    Error(ParseErrorKind),
}

enum Mode<'src> {
    Pattern(logos::Lexer<'src, RawToken>),
    Set(logos::Lexer<'src, RawSetToken>),
}

/// Stateful cursor over the pattern string.
pub struct TokenStream<'src> {
    src: &'src str,
    mode: Option<Mode<'src>>,
    pending: Option<(Token<'src>, usize)>,
    offset: usize,
}

impl<'src> TokenStream<'src> {
    pub fn new(src: &'src str) -> Self {
        Self {
            src,
            mode: Some(Mode::Pattern(RawToken::lexer(src))),
            pending: None,
            offset: 0,
        }
    }

    /// Byte offset of the start of the most recently returned token.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn next_token(&mut self) -> Token<'src> {
        if let Some((token, at)) = self.pending.take() {
            self.offset = at;
            return token;
        }
        match self.mode.take() {
            Some(Mode::Pattern(lexer)) => self.next_pattern(lexer),
            Some(Mode::Set(lexer)) => self.next_set(lexer),
            None => Token::End,
        }
    }

    fn next_pattern(&mut self, mut lexer: logos::Lexer<'src, RawToken>) -> Token<'src> {
        let Some(item) = lexer.next() else {
            self.offset = self.src.len();
            self.mode = Some(Mode::Pattern(lexer));
            return Token::End;
        };
        self.offset = lexer.span().start;

        let raw = match item {
            Ok(raw) => raw,
            Err(()) => {
                let token = scan_error(lexer.slice());
                self.mode = Some(Mode::Pattern(lexer));
                return token;
            }
        };

        let slice = lexer.slice();
        let token = match raw {
            RawToken::LBracket => {
                self.mode = Some(Mode::Set(lexer.morph()));
                return Token::Meta('[');
            }
            RawToken::LParen
            | RawToken::RParen
            | RawToken::Dot
            | RawToken::Star
            | RawToken::Plus
            | RawToken::Question
            | RawToken::RBracket
            | RawToken::Dash
            | RawToken::Caret
            | RawToken::LBrace
            | RawToken::RBrace
            | RawToken::Pipe
            | RawToken::Comma
            | RawToken::Dollar => Token::Meta(first_char(slice)),
            RawToken::Escaped | RawToken::EscapedMeta => Token::Escaped(second_char(slice)),
            RawToken::BackRef => Token::BackRef(parse_backref(slice)),
            RawToken::Hex => Token::Hex(&slice[2..]),
            RawToken::UnicodeEscape => Token::UnicodeEscape(&slice[2..]),
            RawToken::Oct => Token::Oct(&slice[2..]),
            RawToken::BadEscape => Token::Error(bad_escape(slice, lexer.remainder())),
            RawToken::Run => {
                let follows = lexer.remainder().chars().next();
                let split = matches!(follows, Some(c) if SPLIT_AFTER.contains(c));
                match slice.char_indices().next_back() {
                    Some((last_at, _)) if split && last_at > 0 => {
                        let span_start = lexer.span().start;
                        self.pending =
                            Some((Token::Text(&slice[last_at..]), span_start + last_at));
                        Token::Text(&slice[..last_at])
                    }
                    _ => Token::Text(slice),
                }
            }
        };
        self.mode = Some(Mode::Pattern(lexer));
        token
    }

    fn next_set(&mut self, mut lexer: logos::Lexer<'src, RawSetToken>) -> Token<'src> {
        let Some(item) = lexer.next() else {
            self.offset = self.src.len();
            self.mode = Some(Mode::Set(lexer));
            return Token::End;
        };
        self.offset = lexer.span().start;

        let raw = match item {
            Ok(raw) => raw,
            Err(()) => {
                let token = scan_error(lexer.slice());
                self.mode = Some(Mode::Set(lexer));
                return token;
            }
        };

        let slice = lexer.slice();
        let token = match raw {
            RawSetToken::RBracket => {
                self.mode = Some(Mode::Pattern(lexer.morph()));
                return Token::Meta(']');
            }
            RawSetToken::Caret => Token::Meta('^'),
            RawSetToken::Escaped | RawSetToken::EscapedMeta => {
                Token::EscapedSetElement(second_char(slice))
            }
            RawSetToken::BackRef => Token::BackRef(parse_backref(slice)),
            RawSetToken::Hex => Token::Hex(&slice[2..]),
            RawSetToken::UnicodeEscape => Token::UnicodeEscape(&slice[2..]),
            RawSetToken::Oct => Token::Oct(&slice[2..]),
            RawSetToken::BadEscape => Token::Error(bad_escape(slice, lexer.remainder())),
            RawSetToken::Range => {
                let mut chars = slice.chars();
                let lo = chars.next().expect("range has three characters");
                chars.next();
                let hi = chars.next().expect("range has three characters");
                Token::RangeSetElement(lo, hi)
            }
            RawSetToken::Element => Token::SetElement(first_char(slice)),
        };
        self.mode = Some(Mode::Set(lexer));
        token
    }
}

fn first_char(slice: &str) -> char {
    slice.chars().next().expect("token is non-empty")
}

fn second_char(slice: &str) -> char {
    slice.chars().nth(1).expect("escape has two characters")
}

fn parse_backref(slice: &str) -> u32 {
    slice[1..].parse().expect("back reference digits")
}

/// `\x`/`\u`/`\0` with malformed digits, or an unrecognized escape letter.
fn bad_escape(slice: &str, rest: &str) -> ParseErrorKind {
    let escaped = second_char(slice);
    let grab = |n: usize| -> Option<String> {
        let digits: String = rest.chars().take(n).collect();
        (digits.chars().count() == n).then_some(digits)
    };
    match escaped {
        'x' => match grab(2) {
            Some(digits) => ParseErrorKind::IncorrectHex(digits),
            None => ParseErrorKind::UnexpectedEnd,
        },
        'u' => match grab(4) {
            Some(digits) => ParseErrorKind::IncorrectUnicode(digits),
            None => ParseErrorKind::UnexpectedEnd,
        },
        '0' => match grab(2) {
            Some(digits) => ParseErrorKind::IncorrectOct(digits),
            None => ParseErrorKind::UnexpectedEnd,
        },
        other => ParseErrorKind::UnsupportedEscape(other),
    }
}

/// Raw lexer errors: the only unmatched input is a trailing backslash.
fn scan_error(slice: &str) -> Token<'static> {
    if slice.starts_with('\\') {
        Token::Error(ParseErrorKind::UnexpectedEnd)
    } else {
        Token::Error(ParseErrorKind::Unexpected(slice.to_string()))
    }
}
