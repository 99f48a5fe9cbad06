//! Header line tokenizer.
//!
//! Recognizes `<date>[,] <time> - <sender>: <body>` with an explicit cursor
//! instead of a composite pattern, so each token's rules can be read and
//! tested on their own:
//!
//! - date: three groups of 1-4 ASCII digits separated by `/`
//! - time: `H:MM` or `HH:MM`, optional `:SS`, optional meridiem (`AM`/`PM`,
//!   any case, optionally preceded by one whitespace character)
//! - separator: `-` or `–` with optional surrounding whitespace
//! - sender: everything up to the first `:` (must not be empty)
//! - body: the rest of the line

/// Maximum digits in a single date component.
const MAX_DATE_DIGITS: usize = 4;

/// Number of `/`-separated date components.
const DATE_COMPONENTS: usize = 3;

/// Separators accepted between time and sender.
const SEPARATORS: &[char] = &['-', '–'];

/// Fields of a recognized header line, already trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLine<'a> {
    pub date: &'a str,
    pub time: &'a str,
    pub sender: &'a str,
    pub body: &'a str,
}

impl<'a> HeaderLine<'a> {
    /// Tokenize `line`, returning `None` when it is not a header.
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut cursor = Cursor::new(line);

        let date = cursor.date()?;

        cursor.eat(|c| c == ',');
        if cursor.skip_whitespace() == 0 {
            return None;
        }

        let time = cursor.time()?;

        cursor.skip_whitespace();
        if !cursor.eat(|c| SEPARATORS.contains(&c)) {
            return None;
        }

        let rest = cursor.rest();
        let colon = rest.find(':')?;
        if colon == 0 {
            return None;
        }

        Some(Self {
            date,
            time,
            sender: rest[..colon].trim(),
            body: rest[colon + 1..].trim(),
        })
    }
}

struct Cursor<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(line: &'a str) -> Self {
        Self { line, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.line[self.pos..].chars().next()
    }

    fn rest(&self) -> &'a str {
        &self.line[self.pos..]
    }

    /// Consume one character if it satisfies `pred`.
    fn eat(&mut self, pred: impl Fn(char) -> bool) -> bool {
        match self.peek() {
            Some(c) if pred(c) => {
                self.pos += c.len_utf8();
                true
            }
            _ => false,
        }
    }

    /// Consume up to `max` ASCII digits, returning how many were taken.
    fn digits(&mut self, max: usize) -> usize {
        let mut taken = 0;
        while taken < max && self.eat(|c| c.is_ascii_digit()) {
            taken += 1;
        }
        taken
    }

    fn skip_whitespace(&mut self) -> usize {
        let mut skipped = 0;
        while self.eat(char::is_whitespace) {
            skipped += 1;
        }
        skipped
    }

    fn date(&mut self) -> Option<&'a str> {
        let start = self.pos;
        for component in 0..DATE_COMPONENTS {
            if component > 0 && !self.eat(|c| c == '/') {
                return None;
            }
            if self.digits(MAX_DATE_DIGITS) == 0 {
                return None;
            }
        }
        // A fifth digit would have been left unconsumed
        if self.peek().is_some_and(|c| c.is_ascii_digit()) {
            return None;
        }
        Some(&self.line[start..self.pos])
    }

    fn time(&mut self) -> Option<&'a str> {
        let start = self.pos;

        if self.digits(2) == 0 || !self.eat(|c| c == ':') || self.digits(2) != 2 {
            return None;
        }

        if self.eat(|c| c == ':') && self.digits(2) != 2 {
            return None;
        }

        self.meridiem();

        Some(&self.line[start..self.pos])
    }

    /// Consume an optional ` AM`/`pm` suffix, restoring position if absent.
    fn meridiem(&mut self) {
        let checkpoint = self.pos;
        self.eat(char::is_whitespace);
        let matched = self.eat(|c| matches!(c, 'a' | 'A' | 'p' | 'P'))
            && self.eat(|c| matches!(c, 'm' | 'M'));
        if !matched {
            self.pos = checkpoint;
        }
    }
}
