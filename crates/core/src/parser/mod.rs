//! Recursive-descent parser producing the raw formula tree.
//! Brace clauses are kept where they were written; resolving what they
//! restrict is the resolver's job.

use crate::ast::{Pos, RawRoot};
use crate::error::TlError;
use crate::lexer::{Spanned, Token};

mod clauses;
mod formula;

/// Letters that start a prefix operator (`A`, `E`, `X`, `F`, `G`).
const PREFIX_LETTERS: &str = "AEXFG";
/// Every operator letter; a word made only of these must be quoted to be an atom.
const RESERVED_LETTERS: &str = "AEXFGURWM";

pub(crate) fn is_reserved_word(w: &str) -> bool {
    !w.is_empty() && w.chars().all(|c| RESERVED_LETTERS.contains(c))
}

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Spanned>) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn cur(&self) -> &Spanned {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &Token {
        &self.cur().token
    }

    fn peek_at(&self, offset: usize) -> &Token {
        let i = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[i].token
    }

    fn cur_pos(&self) -> Pos {
        self.cur().pos
    }

    fn advance(&mut self) -> &Spanned {
        let i = self.pos.min(self.tokens.len() - 1);
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        &self.tokens[i]
    }

    fn expect(&mut self, expected: Token) -> Result<Pos, TlError> {
        if self.peek() == &expected {
            let pos = self.cur_pos();
            self.advance();
            Ok(pos)
        } else {
            Err(self.err(format!(
                "expected {}, got {}",
                expected.describe(),
                self.peek().describe()
            )))
        }
    }

    fn err(&self, msg: impl Into<String>) -> TlError {
        TlError::syntax(self.cur_pos(), msg)
    }

    fn is_word(&self, w: &str) -> bool {
        matches!(self.peek(), Token::Word(x) if x == w)
    }

    /// True if the token can begin a formula operand.
    fn starts_operand(tok: &Token) -> bool {
        matches!(
            tok,
            Token::Word(_) | Token::Quoted(_) | Token::LParen | Token::Tilde
        )
    }

    /// Replace the current word by one token per leading operator letter,
    /// followed by the remainder of the word, so that `AXFp` reads as
    /// `A X F p`. Columns are adjusted per piece.
    fn split_current_word(&mut self, split_at: usize) {
        let Spanned { token, pos } = self.cur().clone();
        let Token::Word(word) = token else {
            return;
        };
        let mut pieces = Vec::new();
        for (i, c) in word[..split_at].chars().enumerate() {
            pieces.push(Spanned {
                token: Token::Word(c.to_string()),
                pos: Pos::new(pos.line, pos.column + i as u32),
            });
        }
        if split_at < word.len() {
            pieces.push(Spanned {
                token: Token::Word(word[split_at..].to_owned()),
                pos: Pos::new(pos.line, pos.column + split_at as u32),
            });
        }
        let at = self.pos;
        self.tokens.splice(at..at + 1, pieces);
    }

    // -- Top level ----------------------------------------------

    fn parse_root(&mut self) -> Result<RawRoot, TlError> {
        let formula = self.parse_formula()?;
        let global_pos = self.cur_pos();
        let global = if self.peek() == &Token::LBracket {
            self.parse_clause_block(Token::LBracket, Token::RBracket)?
        } else {
            Vec::new()
        };
        if self.peek() != &Token::Eof {
            return Err(self.err(format!(
                "unexpected {} after formula",
                self.peek().describe()
            )));
        }
        Ok(RawRoot {
            formula,
            global,
            global_pos,
        })
    }
}

/// Parse a whole token stream into a raw formula and its global restriction.
pub fn parse(tokens: Vec<Spanned>) -> Result<RawRoot, TlError> {
    let mut parser = Parser::new(tokens);
    parser.parse_root()
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
