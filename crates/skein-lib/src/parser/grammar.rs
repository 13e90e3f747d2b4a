//! Recursive-descent parser: token stream in, wired NFA graph out.
//!
//! Productions mirror the grammar `expression → term → factor → atom`.
//! Each returns a [`Fragment`] — the state upstream edges splice into,
//! plus the states whose `out` lists receive whatever follows. The graph
//! is built in place; on error it is discarded whole.

use crate::error::{ParseError, ParseErrorKind};
use crate::graph::{BoundaryKind, Fragment, Nfa, State, StateKind, UNBOUNDED};
use crate::unicode;

use super::lexer::{Token, TokenStream};

/// Nesting bound for `(...)`; pathological inputs fail instead of
/// exhausting the stack.
const MAX_DEPTH: u32 = 200;

const META: &str = "().*+?[]-\\^{}|,$";

pub(crate) fn parse(pattern: &str) -> Result<Nfa, ParseError> {
    Parser::new(pattern).parse()
}

struct Parser<'src> {
    stream: TokenStream<'src>,
    current: Token<'src>,
    nfa: Nfa,
    depth: u32,
}

impl<'src> Parser<'src> {
    fn new(pattern: &'src str) -> Self {
        let mut stream = TokenStream::new(pattern);
        let current = stream.next_token();
        Self {
            stream,
            current,
            nfa: Nfa::new(),
            depth: 0,
        }
    }

    fn parse(mut self) -> Result<Nfa, ParseError> {
        // An empty pattern is just the terminal state; it matches the
        // empty string wherever a match is attempted.
        if matches!(self.current, Token::End) {
            let end = self.nfa.add(State::new(StateKind::End, "end"));
            self.nfa.set_entry(end);
            self.nfa.set_end(end);
            return Ok(self.nfa);
        }

        let frag = self.expression()?;
        match &self.current {
            Token::End => {}
            other => {
                let unexpected = describe(other);
                return Err(self.err(ParseErrorKind::Unexpected(unexpected)));
            }
        }

        let end = self.nfa.add(State::new(StateKind::End, "end"));
        for &exit in &frag.exits {
            self.nfa.connect(exit, end);
        }
        self.nfa.set_entry(frag.entry);
        self.nfa.set_end(end);
        Ok(self.nfa)
    }

    // expression ::= term ('|' term)*
    fn expression(&mut self) -> Result<Fragment, ParseError> {
        let first = self.term()?;
        if !self.at_meta('|') {
            return Ok(first);
        }

        let alt = self.nfa.add(State::new(StateKind::Expression, "EXP"));
        self.nfa.connect(alt, first.entry);
        let mut exits = first.exits;
        while self.at_meta('|') {
            self.advance();
            let branch = self.term()?;
            self.nfa.connect(alt, branch.entry);
            exits.extend(branch.exits);
        }
        Ok(Fragment { entry: alt, exits })
    }

    // term ::= factor+
    fn term(&mut self) -> Result<Fragment, ParseError> {
        let mut frag = self.factor()?;
        while !matches!(self.current, Token::End | Token::Meta('|') | Token::Meta(')')) {
            let next = self.factor()?;
            for &exit in &frag.exits {
                self.nfa.connect(exit, next.entry);
            }
            frag.exits = next.exits;
        }
        Ok(frag)
    }

    // factor ::= atom quantifier?
    //
    // A quantified atom becomes a repetition state: `loop` edges enter the
    // body fresh, every body exit loops back with a counter bump, and the
    // factor's fragment is the repetition itself so concatenation attaches
    // after the loop.
    fn factor(&mut self) -> Result<Fragment, ParseError> {
        let atom = self.atom()?;
        let (min, max, label) = match self.current_meta() {
            Some('+') => {
                self.advance();
                (1, UNBOUNDED, "+".to_string())
            }
            Some('*') => {
                self.advance();
                (0, UNBOUNDED, "*".to_string())
            }
            Some('?') => {
                self.advance();
                (0, 1, "?".to_string())
            }
            Some('{') => self.bounds()?,
            _ => return Ok(atom),
        };
        // A lazy marker parses but every quantifier stays greedy.
        if self.at_meta('?') {
            self.advance();
        }

        let rep = self
            .nfa
            .add(State::new(StateKind::Repetition { min, max }, label));
        self.nfa.state_mut(rep).loop_edges.push(atom.entry);
        for &exit in &atom.exits {
            self.nfa.state_mut(exit).loop_back.push(rep);
        }
        Ok(Fragment::single(rep))
    }

    // `{m}`, `{m,}`, `{,n}`, `{m,n}`; bare `{,}` is rejected.
    fn bounds(&mut self) -> Result<(u32, u32, String), ParseError> {
        self.advance();
        let mut label = String::from("{");

        let lower = match self.current_text() {
            Some(digits) => {
                let n = self.parse_bound(digits)?;
                label.push_str(digits);
                self.advance();
                Some(n)
            }
            None => None,
        };

        let (min, max) = if self.at_meta(',') {
            label.push(',');
            self.advance();
            match self.current_text() {
                Some(digits) => {
                    let n = self.parse_bound(digits)?;
                    label.push_str(digits);
                    self.advance();
                    (lower.unwrap_or(0), n)
                }
                None => match lower {
                    Some(m) => (m, UNBOUNDED),
                    None => return Err(self.err(ParseErrorKind::NonNumericBound)),
                },
            }
        } else {
            match lower {
                Some(m) => (m, m),
                None => return Err(self.err(ParseErrorKind::NonNumericBound)),
            }
        };

        if min > max {
            return Err(self.err(ParseErrorKind::BoundsOutOfOrder));
        }
        if !self.at_meta('}') {
            return Err(self.err(ParseErrorKind::Expected('}')));
        }
        label.push('}');
        self.advance();
        Ok((min, max, label))
    }

    fn parse_bound(&self, digits: &str) -> Result<u32, ParseError> {
        digits
            .parse()
            .map_err(|_| self.err(ParseErrorKind::NonNumericBound))
    }

    // atom ::= literal | '.' | escape | '(' expression ')' | '[' class ']'
    //        | back-reference | anchor
    fn atom(&mut self) -> Result<Fragment, ParseError> {
        match &self.current {
            Token::Text(_) => {
                let text = self.current_text().expect("matched Text");
                self.advance();
                Ok(self.literal(text.to_string(), text))
            }
            Token::Escaped(c) => {
                let c = *c;
                self.escaped_atom(c)
            }
            Token::Hex(_) | Token::Oct(_) | Token::UnicodeEscape(_) => self.numeric_atom(),
            Token::BackRef(group) => {
                let group = *group;
                self.advance();
                let label = format!("\\{group}");
                Ok(self.single(StateKind::BackReference(group), label))
            }
            Token::Meta('.') => {
                self.advance();
                Ok(self.single(StateKind::MatchAll, "."))
            }
            Token::Meta('^') => {
                self.advance();
                Ok(self.single(StateKind::Boundary(BoundaryKind::LineStart), "^"))
            }
            Token::Meta('$') => {
                self.advance();
                Ok(self.single(StateKind::Boundary(BoundaryKind::LineEnd), "$"))
            }
            Token::Meta('(') => self.group(),
            Token::Meta('[') => self.char_class(),
            Token::Meta('}') => Err(self.err(ParseErrorKind::CloseBraceBeforeOpen)),
            Token::End => Err(self.err(ParseErrorKind::UnexpectedEnd)),
            Token::Error(kind) => {
                let kind = kind.clone();
                Err(self.err(kind))
            }
            other => {
                let unexpected = describe(other);
                Err(self.err(ParseErrorKind::Unexpected(unexpected)))
            }
        }
    }

    fn escaped_atom(&mut self, c: char) -> Result<Fragment, ParseError> {
        if c == 'p' || c == 'P' {
            self.advance();
            return self.unicode_class(c == 'P');
        }
        self.advance();
        let frag = match c {
            't' => self.literal("\t".to_string(), "\\t"),
            'n' => self.literal("\n".to_string(), "\\n"),
            'r' => self.literal("\r".to_string(), "\\r"),
            'f' => self.literal("\u{0C}".to_string(), "\\f"),
            'v' => self.literal("\u{0B}".to_string(), "\\v"),
            'd' => self.single(StateKind::MultiMatch(digit_chars()), "\\d"),
            'D' => self.single(StateKind::NegativeMultiMatch(digit_chars()), "\\D"),
            'w' => self.single(StateKind::MultiMatch(word_chars()), "\\w"),
            'W' => self.single(StateKind::NegativeMultiMatch(word_chars()), "\\W"),
            's' => self.single(StateKind::MultiMatch(space_chars()), "\\s"),
            'S' => self.single(StateKind::NegativeMultiMatch(space_chars()), "\\S"),
            'b' => self.single(StateKind::Boundary(BoundaryKind::WordBoundary), "\\b"),
            'A' => self.single(StateKind::Boundary(BoundaryKind::TextStart), "\\A"),
            'Z' => self.single(StateKind::Boundary(BoundaryKind::TextEnd), "\\Z"),
            // self-escaped meta character
            other => self.literal(other.to_string(), format!("\\{other}")),
        };
        Ok(frag)
    }

    fn numeric_atom(&mut self) -> Result<Fragment, ParseError> {
        let (c, label) = self.decode_numeric()?;
        self.advance();
        Ok(self.literal(c.to_string(), label))
    }

    // `\p{Name}` / `\P{Name}`; the name may span several tokens when it
    // contains `-` (a meta character outside classes).
    fn unicode_class(&mut self, negated: bool) -> Result<Fragment, ParseError> {
        if !self.at_meta('{') {
            return Err(self.err(ParseErrorKind::Expected('{')));
        }
        self.advance();
        let mut name = String::new();
        loop {
            match &self.current {
                Token::Text(_) => {
                    let part = self.current_text().expect("matched Text");
                    name.push_str(part);
                    self.advance();
                }
                Token::Meta('-') => {
                    name.push('-');
                    self.advance();
                }
                Token::Meta('}') => break,
                Token::End => return Err(self.err(ParseErrorKind::UnexpectedEnd)),
                Token::Error(kind) => {
                    let kind = kind.clone();
                    return Err(self.err(kind));
                }
                _ => return Err(self.err(ParseErrorKind::UnknownUnicodeClass(name))),
            }
        }
        self.advance();

        let Some(class) = unicode::resolve_class(&name) else {
            return Err(self.err(ParseErrorKind::UnknownUnicodeClass(name)));
        };
        let tag = if negated { 'P' } else { 'p' };
        let label = format!("\\{tag}{{{name}}}");
        Ok(self.single(StateKind::UnicodeClass { class, negated }, label))
    }

    // Capture groups are numbered in open order. Repetition states never
    // carry group marks: a zero-width carrier is prepended when the body
    // entry is a repetition, and exits are funneled through one when any
    // exit is.
    fn group(&mut self) -> Result<Fragment, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.err(ParseErrorKind::NestedTooDeeply));
        }
        self.depth += 1;
        self.advance();
        let group = self.nfa.alloc_group();

        let body = self.expression()?;
        if !self.at_meta(')') {
            return Err(self.err(ParseErrorKind::Expected(')')));
        }
        self.advance();
        self.depth -= 1;

        let mut entry = body.entry;
        let mut exits = body.exits;
        if self.nfa.state(entry).is_repetition() {
            let carrier = self.nfa.add(State::new(StateKind::Expression, "GRP"));
            self.nfa.connect(carrier, entry);
            entry = carrier;
        }
        self.nfa.state_mut(entry).group_starts.push(group);

        if exits.iter().any(|&e| self.nfa.state(e).is_repetition()) {
            let carrier = self.nfa.add(State::new(StateKind::Expression, "GRP"));
            for &exit in &exits {
                self.nfa.connect(exit, carrier);
            }
            exits = vec![carrier];
        }
        for &exit in &exits {
            self.nfa.state_mut(exit).group_ends.push(group);
        }

        Ok(Fragment { entry, exits })
    }

    // `[...]` with optional leading `^`. Elements accumulate into one
    // character list; ranges expand inclusively.
    fn char_class(&mut self) -> Result<Fragment, ParseError> {
        self.advance();
        let negated = if self.at_meta('^') {
            self.advance();
            true
        } else {
            false
        };

        let mut chars: Vec<char> = Vec::new();
        let mut label = String::from(if negated { "^" } else { "" });
        let mut first = true;
        loop {
            match &self.current {
                Token::Meta(']') => {
                    if first {
                        return Err(self.err(ParseErrorKind::SetElementExpected));
                    }
                    self.advance();
                    break;
                }
                Token::SetElement(c) => {
                    let c = *c;
                    chars.push(c);
                    label.push(c);
                    self.advance();
                }
                Token::RangeSetElement(lo, hi) => {
                    let (lo, hi) = (*lo, *hi);
                    for cp in (lo as u32)..=(hi as u32) {
                        if let Some(c) = char::from_u32(cp) {
                            chars.push(c);
                        }
                    }
                    label.push(lo);
                    label.push('-');
                    label.push(hi);
                    self.advance();
                }
                Token::EscapedSetElement(c) => {
                    let c = *c;
                    self.class_escape(c, &mut chars)?;
                    label.push('\\');
                    label.push(c);
                    self.advance();
                }
                Token::Hex(_) | Token::Oct(_) | Token::UnicodeEscape(_) => {
                    let (c, piece) = self.decode_numeric()?;
                    chars.push(c);
                    label.push_str(&piece);
                    self.advance();
                }
                // tokenized as a back reference even here, but a capture
                // cannot join a positive element list
                Token::BackRef(group) => {
                    let group = *group;
                    return Err(self.err(ParseErrorKind::BackRefInClass(group)));
                }
                Token::End => return Err(self.err(ParseErrorKind::UnexpectedEnd)),
                Token::Error(kind) => {
                    let kind = kind.clone();
                    return Err(self.err(kind));
                }
                _ => return Err(self.err(ParseErrorKind::SetElementExpected)),
            }
            first = false;
        }

        let kind = if negated {
            StateKind::NegativeMultiMatch(chars)
        } else {
            StateKind::MultiMatch(chars)
        };
        Ok(self.single(kind, label))
    }

    fn class_escape(&self, c: char, chars: &mut Vec<char>) -> Result<(), ParseError> {
        match c {
            't' => chars.push('\t'),
            'n' => chars.push('\n'),
            'r' => chars.push('\r'),
            'f' => chars.push('\u{0C}'),
            'v' => chars.push('\u{0B}'),
            'd' => chars.extend(digit_chars()),
            'w' => chars.extend(word_chars()),
            's' => chars.extend(space_chars()),
            c if META.contains(c) => chars.push(c),
            // complements and anchors cannot join a positive element list
            other => return Err(self.err(ParseErrorKind::UnsupportedClassEscape(other))),
        }
        Ok(())
    }

    /// Decodes the current `\xHH`/`\0OO`/`\uHHHH` token into its character
    /// and display lexeme.
    fn decode_numeric(&self) -> Result<(char, String), ParseError> {
        let (digits, radix, prefix, incorrect): (&str, u32, &str, fn(String) -> ParseErrorKind) =
            match &self.current {
                Token::Hex(d) => (d, 16, "\\x", ParseErrorKind::IncorrectHex),
                Token::Oct(d) => (d, 8, "\\0", ParseErrorKind::IncorrectOct),
                Token::UnicodeEscape(d) => (d, 16, "\\u", ParseErrorKind::IncorrectUnicode),
                other => {
                    let unexpected = describe(other);
                    return Err(self.err(ParseErrorKind::Unexpected(unexpected)));
                }
            };
        let c = u32::from_str_radix(digits, radix)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.err(incorrect(digits.to_string())))?;
        Ok((c, format!("{prefix}{digits}")))
    }

    fn literal(&mut self, value: String, label: impl Into<String>) -> Fragment {
        self.single(StateKind::Literal(value), label)
    }

    fn single(&mut self, kind: StateKind, label: impl Into<String>) -> Fragment {
        Fragment::single(self.nfa.add(State::new(kind, label)))
    }

    fn advance(&mut self) {
        self.current = self.stream.next_token();
    }

    fn current_meta(&self) -> Option<char> {
        match &self.current {
            Token::Meta(c) => Some(*c),
            _ => None,
        }
    }

    fn at_meta(&self, c: char) -> bool {
        self.current_meta() == Some(c)
    }

    fn current_text(&self) -> Option<&'src str> {
        match &self.current {
            Token::Text(text) => Some(*text),
            _ => None,
        }
    }

    fn err(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.stream.offset(), kind)
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Text(text) => (*text).to_string(),
        Token::Meta(c) => c.to_string(),
        other => format!("{other:?}"),
    }
}

fn digit_chars() -> Vec<char> {
    ('0'..='9').collect()
}

fn word_chars() -> Vec<char> {
    ('0'..='9')
        .chain('a'..='z')
        .chain('A'..='Z')
        .chain(std::iter::once('_'))
        .collect()
}

fn space_chars() -> Vec<char> {
    vec![' ', '\n', '\t', '\r']
}
