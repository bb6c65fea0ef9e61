use std::iter::Peekable;

use owned_chars::OwnedChars;

use super::{Token, TokenKind};

/// Turns source text into tokens, one `next_token` call at a time.
///
/// The lexer knows nothing about the grammar. It never fails: a character it
/// does not recognize becomes an `Illegal` token so the parser can report it
/// in context.
pub struct Lexer {
    chars: Peekable<OwnedChars>,
    // Byte offset of `ch`
    position: usize,
    // Byte offset of the character after `ch`
    read_position: usize,
    // `None` once the input is exhausted
    ch: Option<char>,
    // Scratch pad for multi-character literals
    scratch: String,
}

impl Lexer {
    /// Creates a new `Lexer` positioned on the first character of `source`.
    #[must_use]
    pub fn new(source: String) -> Self {
        let mut lexer = Lexer {
            chars: OwnedChars::from_string(source).peekable(),
            position: 0,
            read_position: 0,
            ch: None,
            scratch: String::new(),
        };

        lexer.read_char();
        lexer
    }

    /// Returns the next token in the input. Once the input is exhausted every
    /// call returns an `Eof` token with an empty literal.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let c = match self.ch {
            Some(c) => c,
            None => return Token::new(TokenKind::Eof, ""),
        };

        let kind = match c {
            '=' => return self.compound_equal_operator(TokenKind::Eq, TokenKind::Assign),
            '!' => return self.compound_equal_operator(TokenKind::NotEq, TokenKind::Bang),
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            '"' => return self.string(),
            c if is_letter(c) => return self.identifier(),
            c if c.is_ascii_digit() => return self.integer(),
            _ => TokenKind::Illegal,
        };

        let mut buf = [0; 4];
        let token = Token::new(kind, c.encode_utf8(&mut buf));
        self.read_char();
        token
    }

    // `=` and `!` are the only characters that combine with a following `=`.
    fn compound_equal_operator(&mut self, yes: TokenKind, no: TokenKind) -> Token {
        self.scratch.clear();
        let kind = if let Some('=') = self.chars.peek() {
            self.advance();
            yes
        } else {
            no
        };

        self.advance();
        Token::new(kind, &self.scratch)
    }

    fn identifier(&mut self) -> Token {
        self.scratch.clear();
        while self.ch.map_or(false, is_letter) {
            self.advance();
        }

        Token::new(TokenKind::lookup_ident(&self.scratch), &self.scratch)
    }

    fn integer(&mut self) -> Token {
        self.scratch.clear();
        while self.ch.map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }

        Token::new(TokenKind::Int, &self.scratch)
    }

    fn string(&mut self) -> Token {
        self.scratch.clear();
        // opening quote
        self.read_char();

        loop {
            match self.ch {
                Some('"') => {
                    self.read_char();
                    return Token::new(TokenKind::String, &self.scratch);
                }
                Some(_) => self.advance(),
                None => return Token::new(TokenKind::Illegal, &self.scratch),
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ') | Some('\t') | Some('\n') | Some('\r') = self.ch {
            self.read_char();
        }
    }

    /// Pushes the current character onto the scratch pad and moves on.
    fn advance(&mut self) {
        if let Some(c) = self.ch {
            self.scratch.push(c);
        }

        self.read_char();
    }

    fn read_char(&mut self) {
        self.position = self.read_position;
        self.ch = self.chars.next();
        if let Some(c) = self.ch {
            self.read_position += c.len_utf8();
        }
    }

    /// Byte offset of the character the lexer is currently looking at.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }
}

/// Yields every token up to, but not including, `Eof`.
impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}
