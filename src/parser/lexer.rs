//! Lexer (tokenizer) for C source code
//!
//! Converts raw source text into a lazy stream of [`Token`]s. The scanner never
//! fails: malformed lexemes come out as error-kind tokens (`BAD_NUM_ID`,
//! `BAD_CHAR`, `INVALID_CHAR`) in the normal stream and scanning resumes right
//! after them, so every input character is consumed exactly once.
//!
//! # Matching
//!
//! At each position the longest lexeme wins, with ties broken by rule
//! priority: preprocessor directive, block comment, line comment, string,
//! character literal, malformed numeric-identifier, hex, octal, float, decimal
//! integer, identifier/keyword, operator, whitespace, and finally a single
//! invalid character. Dispatch is on the first character.
//!
//! Block comments, strings and character literals may look far ahead for
//! their closing delimiter. When such a search runs off the end of the input
//! (or of the line, for character literals) the scanner remembers where, and
//! every later opener inside that region fails at once, so unterminated
//! openers repeated through a file keep the scan linear.

use super::token::{word_kind, Token, TokenKind};
use std::collections::VecDeque;
use std::iter::FusedIterator;
use tracing::debug;

const THREE_CHAR_OPS: &[&str] = &["<<=", ">>=", "..."];

const TWO_CHAR_OPS: &[&str] = &[
    "==", "!=", "<=", ">=", "->", "++", "--", "&&", "||", "<<", ">>",
];

const SINGLE_CHAR_OPS: &str = "-+*/%<>=&|^~!:;,.(){}[]?";

/// Tokenize a whole source string.
pub fn tokenize(source: &str) -> Vec<Token> {
    Scanner::new(source).tokenize()
}

/// Lazy, recovering scanner over C source text.
pub struct Scanner {
    input: Vec<char>,
    position: usize,
    line: u32,
    column: u32,
    /// Synthetic tokens queued behind a `BAD_NUM_ID`.
    pending: VecDeque<Token>,
    /// No `*/` follows any `/*` at or after this position.
    unclosed_comment_from: Option<usize>,
    /// No `"` opened at or after this position ever closes.
    unclosed_string_from: Option<usize>,
    /// A `'` before this position cannot close on its line.
    unclosed_char_before: usize,
}

impl Scanner {
    /// Create a new scanner for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            pending: VecDeque::new(),
            unclosed_comment_from: None,
            unclosed_string_from: None,
            unclosed_char_before: 0,
        }
    }

    /// Drain the remaining input into a vector.
    pub fn tokenize(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }

    fn next_token(&mut self, ch: char) -> Token {
        let matched = match ch {
            '#' => Some((TokenKind::PpDirective, self.directive_len())),
            '/' => self.comment(),
            '"' => self.string_len().map(|len| (TokenKind::String, len)),
            '\'' => self.char_literal(),
            '0'..='9' => return self.number(),
            '.' if self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.float_len(self.position).map(|len| (TokenKind::Float, len))
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                let len = self.word_len(self.position);
                let text: String = self.slice(self.position, len).iter().collect();
                Some((word_kind(&text), len))
            }
            _ => None,
        };

        if let Some((kind, len)) = matched {
            if kind == TokenKind::BadChar {
                debug!(line = self.line, col = self.column, "invalid character literal");
            }
            return self.take(kind, len);
        }

        if let Some(len) = self.operator_len() {
            return self.take(TokenKind::Op, len);
        }

        debug!(
            line = self.line,
            col = self.column,
            ch = %ch.escape_debug(),
            "unrecognized character"
        );
        self.take(TokenKind::InvalidChar, 1)
    }

    /// `#` to end of line; a backslash right before the newline continues the directive.
    fn directive_len(&self) -> usize {
        let mut i = self.position;
        while let Some(ch) = self.char_at(i) {
            if ch == '\n' && !self.is_continued(i) {
                break;
            }
            i += 1;
        }
        i - self.position
    }

    fn is_continued(&self, newline: usize) -> bool {
        let mut j = newline;
        if j > self.position && self.input[j - 1] == '\r' {
            j -= 1;
        }
        j > self.position && self.input[j - 1] == '\\'
    }

    fn comment(&mut self) -> Option<(TokenKind, usize)> {
        match self.peek_ahead(1) {
            Some('*') => {
                if self
                    .unclosed_comment_from
                    .is_some_and(|from| self.position >= from)
                {
                    return None;
                }
                let mut i = self.position + 2;
                while i + 1 < self.input.len() {
                    if self.input[i] == '*' && self.input[i + 1] == '/' {
                        return Some((TokenKind::CommentBlock, i + 2 - self.position));
                    }
                    i += 1;
                }
                // Unterminated: let '/' fall through to the operator rule
                self.unclosed_comment_from = Some(self.position);
                None
            }
            Some('/') => {
                let mut i = self.position;
                while self.char_at(i).is_some_and(|c| c != '\n') {
                    i += 1;
                }
                Some((TokenKind::CommentLine, i - self.position))
            }
            _ => None,
        }
    }

    /// Length of a closed string literal, or `None` when it never closes.
    fn string_len(&mut self) -> Option<usize> {
        if self
            .unclosed_string_from
            .is_some_and(|from| self.position >= from)
        {
            return None;
        }
        let mut i = self.position + 1;
        while let Some(ch) = self.char_at(i) {
            match ch {
                '"' => return Some(i + 1 - self.position),
                '\\' => i += 2,
                _ => i += 1,
            }
        }
        self.unclosed_string_from = Some(self.position);
        None
    }

    /// A quoted run on one line; `CHAR` when it decodes to exactly one character.
    fn char_literal(&mut self) -> Option<(TokenKind, usize)> {
        if self.position < self.unclosed_char_before {
            return None;
        }
        let mut i = self.position + 1;
        let mut logical = 0usize;
        loop {
            match self.char_at(i) {
                Some('\'') => break,
                None | Some('\n') => {
                    self.unclosed_char_before = i;
                    return None;
                }
                Some('\\') => match self.char_at(i + 1) {
                    Some(escaped) if escaped != '\n' => {
                        i += 2 + self.numeric_escape_len(escaped, i + 2);
                    }
                    _ => {
                        self.unclosed_char_before = i + 1;
                        return None;
                    }
                },
                Some(_) => i += 1,
            }
            logical += 1;
        }

        let kind = if logical == 1 {
            TokenKind::Char
        } else {
            TokenKind::BadChar
        };
        Some((kind, i + 1 - self.position))
    }

    /// Extra characters consumed by `\xHH..` and `\ooo` escapes beyond the
    /// two-character prefix.
    fn numeric_escape_len(&self, escaped: char, from: usize) -> usize {
        let mut n = 0;
        match escaped {
            'x' => {
                while self.char_at(from + n).is_some_and(|c| c.is_ascii_hexdigit()) {
                    n += 1;
                }
            }
            '0'..='7' => {
                while n < 2 && self.char_at(from + n).is_some_and(|c| ('0'..='7').contains(&c)) {
                    n += 1;
                }
            }
            _ => {}
        }
        n
    }

    /// Numeric literal starting with a digit, or a malformed numeric-identifier.
    fn number(&mut self) -> Token {
        let start = self.position;
        let digits = self.digits_len(start);
        let word = self.word_len(start);

        let (kind, len) = self.numeric_literal(start);
        if word > digits && len < word {
            return self.malformed_number(digits, word);
        }
        self.take(kind, len)
    }

    /// Longest of hex, octal, float and decimal; ties go to the earlier rule.
    fn numeric_literal(&self, start: usize) -> (TokenKind, usize) {
        let mut best = (TokenKind::Int, self.digits_len(start));
        let candidates = [
            (TokenKind::HexInt, self.hex_len(start)),
            (TokenKind::OctInt, self.octal_len(start)),
            (TokenKind::Float, self.float_len(start)),
        ];
        for (kind, len) in candidates.into_iter().rev() {
            if let Some(len) = len {
                if len >= best.1 {
                    best = (kind, len);
                }
            }
        }
        best
    }

    /// Emit `BAD_NUM_ID` for the fused lexeme, then queue an `INT` for the
    /// digit prefix and an identifier for the suffix.
    fn malformed_number(&mut self, digits: usize, word: usize) -> Token {
        let (line, col) = (self.line, self.column);
        let bad = self.take(TokenKind::BadNumId, word);
        debug!(line, col, text = %bad.text, "malformed numeric identifier");

        let (prefix, suffix) = bad.text.split_at(digits);
        self.pending
            .push_back(Token::new(TokenKind::Int, prefix, line, col));
        self.pending.push_back(Token::new(
            word_kind(suffix),
            suffix,
            line,
            col + digits as u32,
        ));
        bad
    }

    fn hex_len(&self, start: usize) -> Option<usize> {
        if self.char_at(start) != Some('0') || !matches!(self.char_at(start + 1), Some('x' | 'X')) {
            return None;
        }
        let mut n = 0;
        while self.char_at(start + 2 + n).is_some_and(|c| c.is_ascii_hexdigit()) {
            n += 1;
        }
        (n > 0).then_some(n + 2)
    }

    fn octal_len(&self, start: usize) -> Option<usize> {
        if self.char_at(start) != Some('0') {
            return None;
        }
        let mut n = 0;
        while self.char_at(start + 1 + n).is_some_and(|c| ('0'..='7').contains(&c)) {
            n += 1;
        }
        (n > 0).then_some(n + 1)
    }

    /// `d+.d*[exp]`, `.d+[exp]` or `d+exp`.
    fn float_len(&self, start: usize) -> Option<usize> {
        let int_digits = self.digits_len(start);
        let mut i = start + int_digits;

        if self.char_at(i) == Some('.') {
            let frac = self.digits_len(i + 1);
            if int_digits == 0 && frac == 0 {
                return None;
            }
            i += 1 + frac;
            i += self.exponent_len(i).unwrap_or(0);
            return Some(i - start);
        }

        if int_digits == 0 {
            return None;
        }
        self.exponent_len(i).map(|e| i + e - start)
    }

    fn exponent_len(&self, i: usize) -> Option<usize> {
        if !matches!(self.char_at(i), Some('e' | 'E')) {
            return None;
        }
        let sign = usize::from(matches!(self.char_at(i + 1), Some('+' | '-')));
        let digits = self.digits_len(i + 1 + sign);
        (digits > 0).then_some(1 + sign + digits)
    }

    fn operator_len(&self) -> Option<usize> {
        for (width, ops) in [(3, THREE_CHAR_OPS), (2, TWO_CHAR_OPS)] {
            if self.position + width <= self.input.len() {
                let candidate: String = self.slice(self.position, width).iter().collect();
                if ops.contains(&candidate.as_str()) {
                    return Some(width);
                }
            }
        }
        self.peek()
            .filter(|&c| SINGLE_CHAR_OPS.contains(c))
            .map(|_| 1)
    }

    fn digits_len(&self, start: usize) -> usize {
        let mut n = 0;
        while self.char_at(start + n).is_some_and(|c| c.is_ascii_digit()) {
            n += 1;
        }
        n
    }

    /// Length of a `[A-Za-z0-9_]*` run.
    fn word_len(&self, start: usize) -> usize {
        let mut n = 0;
        while self
            .char_at(start + n)
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            n += 1;
        }
        n
    }

    /// Consume `len` characters as one token positioned at the current location.
    fn take(&mut self, kind: TokenKind, len: usize) -> Token {
        let (line, col) = (self.line, self.column);
        let text: String = self.slice(self.position, len).iter().collect();
        for _ in 0..len {
            self.advance();
        }
        Token::new(kind, text, line, col)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn slice(&self, start: usize, len: usize) -> &[char] {
        &self.input[start..(start + len).min(self.input.len())]
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.input.get(pos).copied()
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.char_at(self.position)
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.char_at(self.position + n)
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }
}

impl Iterator for Scanner {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if let Some(token) = self.pending.pop_front() {
            return Some(token);
        }
        self.skip_whitespace();
        let ch = self.peek()?;
        Some(self.next_token(ch))
    }
}

impl FusedIterator for Scanner {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source)
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    fn pair(kind: TokenKind, text: &str) -> (TokenKind, String) {
        (kind, text.to_string())
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = tokenize("int main() { return 0; }");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["int", "main", "(", ")", "{", "return", "0", ";", "}"]);
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[1].kind, TokenKind::Id);
        assert_eq!(tokens[2].kind, TokenKind::Op);
        assert_eq!(tokens[6].kind, TokenKind::Int);
    }

    #[test]
    fn test_operators() {
        let tokens = tokenize("<<= >>= ... == != <= >= -> ++ -- && || << >> += ?");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            texts,
            [
                "<<=", ">>=", "...", "==", "!=", "<=", ">=", "->", "++", "--", "&&", "||", "<<",
                ">>", "+", "=", "?"
            ]
        );
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Op));
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            kinds("int x; // comment\n/* block\ncomment */ int"),
            vec![
                pair(TokenKind::Keyword, "int"),
                pair(TokenKind::Id, "x"),
                pair(TokenKind::Op, ";"),
                pair(TokenKind::CommentLine, "// comment"),
                pair(TokenKind::CommentBlock, "/* block\ncomment */"),
                pair(TokenKind::Keyword, "int"),
            ]
        );
    }

    #[test]
    fn test_position_after_block_comment() {
        let tokens = tokenize("/* a\nbc */ x");
        assert_eq!(tokens[1].text, "x");
        assert_eq!((tokens[1].line, tokens[1].col), (2, 7));
    }

    #[test]
    fn test_unterminated_block_comment_falls_back() {
        assert_eq!(
            kinds("/* open"),
            vec![
                pair(TokenKind::Op, "/"),
                pair(TokenKind::Op, "*"),
                pair(TokenKind::Id, "open"),
            ]
        );
    }

    #[test]
    fn test_preprocessor_directive() {
        let tokens = tokenize("#include <stdio.h>\nint x;");
        assert_eq!(tokens[0].kind, TokenKind::PpDirective);
        assert_eq!(tokens[0].text, "#include <stdio.h>");
        assert_eq!((tokens[1].line, tokens[1].col), (2, 1));
    }

    #[test]
    fn test_directive_continuation() {
        let tokens = tokenize("#define MAX(a, b) \\\n  ((a) > (b))\nint");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "#define MAX(a, b) \\\n  ((a) > (b))");
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn test_string_literal() {
        let tokens = tokenize(r#"s = "hello \"world\"\n";"#);
        assert_eq!(tokens[2].kind, TokenKind::String);
        assert_eq!(tokens[2].text, r#""hello \"world\"\n""#);
        assert_eq!(tokens[3].text, ";");
    }

    #[test]
    fn test_unterminated_string_recovers() {
        assert_eq!(
            kinds("\"abc"),
            vec![pair(TokenKind::InvalidChar, "\""), pair(TokenKind::Id, "abc")]
        );
    }

    #[test]
    fn test_char_literals() {
        assert_eq!(kinds("'a'"), vec![pair(TokenKind::Char, "'a'")]);
        assert_eq!(kinds(r"'\n'"), vec![pair(TokenKind::Char, r"'\n'")]);
        assert_eq!(kinds(r"'\''"), vec![pair(TokenKind::Char, r"'\''")]);
        assert_eq!(kinds(r"'\x41'"), vec![pair(TokenKind::Char, r"'\x41'")]);
        assert_eq!(kinds("'ab'"), vec![pair(TokenKind::BadChar, "'ab'")]);
        assert_eq!(kinds("''"), vec![pair(TokenKind::BadChar, "''")]);
    }

    #[test]
    fn test_unterminated_char_literal() {
        assert_eq!(
            kinds("'a\n"),
            vec![pair(TokenKind::InvalidChar, "'"), pair(TokenKind::Id, "a")]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("0x1F 0777 08 3.14 .5 1e10 2.5e-3 42 0"),
            vec![
                pair(TokenKind::HexInt, "0x1F"),
                pair(TokenKind::OctInt, "0777"),
                pair(TokenKind::Int, "08"),
                pair(TokenKind::Float, "3.14"),
                pair(TokenKind::Float, ".5"),
                pair(TokenKind::Float, "1e10"),
                pair(TokenKind::Float, "2.5e-3"),
                pair(TokenKind::Int, "42"),
                pair(TokenKind::Int, "0"),
            ]
        );
    }

    #[test]
    fn test_longest_numeric_match_wins() {
        assert_eq!(kinds("012.5"), vec![pair(TokenKind::Float, "012.5")]);
        assert_eq!(kinds("1e+5"), vec![pair(TokenKind::Float, "1e+5")]);
    }

    #[test]
    fn test_malformed_numeric_identifier() {
        let tokens = tokenize("x = 123abc;");
        assert_eq!(tokens[2].kind, TokenKind::BadNumId);
        assert_eq!(tokens[2].text, "123abc");
        assert_eq!(tokens[3].kind, TokenKind::Int);
        assert_eq!(tokens[3].text, "123");
        assert_eq!(tokens[3].col, tokens[2].col);
        assert_eq!(tokens[4].kind, TokenKind::Id);
        assert_eq!(tokens[4].text, "abc");
        assert_eq!(tokens[4].col, tokens[2].col + 3);
        assert_eq!(tokens[5].text, ";");
    }

    #[test]
    fn test_malformed_hex_is_caught() {
        assert_eq!(
            kinds("0x1g"),
            vec![
                pair(TokenKind::BadNumId, "0x1g"),
                pair(TokenKind::Int, "0"),
                pair(TokenKind::Id, "x1g"),
            ]
        );
    }

    #[test]
    fn test_malformed_suffix_keyword() {
        assert_eq!(
            kinds("9int"),
            vec![
                pair(TokenKind::BadNumId, "9int"),
                pair(TokenKind::Int, "9"),
                pair(TokenKind::Keyword, "int"),
            ]
        );
    }

    #[test]
    fn test_invalid_characters() {
        let tokens = tokenize("@@@");
        assert_eq!(tokens.len(), 3);
        for (i, tok) in tokens.iter().enumerate() {
            assert_eq!(tok.kind, TokenKind::InvalidChar);
            assert_eq!(tok.text, "@");
            assert_eq!(tok.col, i as u32 + 1);
        }
    }

    #[test]
    fn test_non_ascii_is_invalid() {
        assert_eq!(
            kinds("é$"),
            vec![pair(TokenKind::InvalidChar, "é"), pair(TokenKind::InvalidChar, "$")]
        );
    }

    #[test]
    fn test_iterator_is_lazy() {
        let mut scanner = Scanner::new("a b");
        assert_eq!(scanner.next().map(|t| t.text), Some("a".to_string()));
        assert_eq!(scanner.next().map(|t| t.text), Some("b".to_string()));
        assert_eq!(scanner.next(), None);
        assert_eq!(scanner.next(), None);
    }

    #[test]
    fn test_failed_comment_search_does_not_block_other_rules() {
        assert_eq!(
            kinds("/* \"s\" /* 'c'"),
            vec![
                pair(TokenKind::Op, "/"),
                pair(TokenKind::Op, "*"),
                pair(TokenKind::String, "\"s\""),
                pair(TokenKind::Op, "/"),
                pair(TokenKind::Op, "*"),
                pair(TokenKind::Char, "'c'"),
            ]
        );
    }

    #[test]
    fn test_repeated_unterminated_string() {
        assert_eq!(
            kinds("\"\\\" a \\\" b"),
            vec![
                pair(TokenKind::InvalidChar, "\""),
                pair(TokenKind::InvalidChar, "\\"),
                pair(TokenKind::InvalidChar, "\""),
                pair(TokenKind::Id, "a"),
                pair(TokenKind::InvalidChar, "\\"),
                pair(TokenKind::InvalidChar, "\""),
                pair(TokenKind::Id, "b"),
            ]
        );
    }

    #[test]
    fn test_unterminated_char_only_affects_its_line() {
        assert_eq!(
            kinds("'\\' x\n'c'"),
            vec![
                pair(TokenKind::InvalidChar, "'"),
                pair(TokenKind::InvalidChar, "\\"),
                pair(TokenKind::InvalidChar, "'"),
                pair(TokenKind::Id, "x"),
                pair(TokenKind::Char, "'c'"),
            ]
        );
    }
}
