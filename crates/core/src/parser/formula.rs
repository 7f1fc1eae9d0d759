use super::{is_reserved_word, Parser, PREFIX_LETTERS};
use crate::ast::{BinaryOp, Connective, Quantifier, RawFormula, UnaryOp};
use crate::error::TlError;
use crate::lexer::Token;

pub(super) fn connective_of(tok: &Token) -> Option<Connective> {
    match tok {
        Token::Amp => Some(Connective::And),
        Token::Pipe => Some(Connective::Or),
        Token::Implies => Some(Connective::Imply),
        Token::Iff => Some(Connective::Iff),
        _ => None,
    }
}

fn binary_op_of(tok: &Token) -> Option<BinaryOp> {
    match tok {
        Token::Word(w) => match w.as_str() {
            "U" => Some(BinaryOp::U),
            "R" => Some(BinaryOp::R),
            "W" => Some(BinaryOp::W),
            "M" => Some(BinaryOp::M),
            _ => None,
        },
        _ => None,
    }
}

fn build_connective(op: Connective, operands: Vec<RawFormula>) -> RawFormula {
    match op {
        Connective::And | Connective::Or => {
            let mut flat = Vec::with_capacity(operands.len());
            for f in operands {
                match f {
                    RawFormula::Connective {
                        op: inner,
                        operands: nested,
                    } if inner == op => flat.extend(nested),
                    other => flat.push(other),
                }
            }
            RawFormula::Connective { op, operands: flat }
        }
        Connective::Imply | Connective::Iff => {
            let mut it = operands.into_iter();
            let mut acc = match it.next() {
                Some(f) => f,
                None => return RawFormula::Bool(true),
            };
            for right in it {
                acc = RawFormula::Connective {
                    op,
                    operands: vec![acc, right],
                };
            }
            acc
        }
    }
}

impl Parser {
    // -- Boolean connectives --------------------------------------

    pub(super) fn parse_formula(&mut self) -> Result<RawFormula, TlError> {
        let first = self.parse_temporal()?;
        let mut op: Option<Connective> = None;
        let mut operands = vec![first];
        while let Some(next) = connective_of(self.peek()) {
            if let Some(cur) = op {
                if cur != next {
                    return Err(self.err(format!(
                        "cannot mix '{}' and '{}' without parentheses",
                        cur.symbol(),
                        next.symbol()
                    )));
                }
            }
            op = Some(next);
            self.advance();
            operands.push(self.parse_temporal()?);
        }
        match op {
            None => Ok(operands.remove(0)),
            Some(op) => Ok(build_connective(op, operands)),
        }
    }

    // -- Binary temporal operators ------------------------------

    fn parse_temporal(&mut self) -> Result<RawFormula, TlError> {
        let mut left = self.parse_prefix()?;
        loop {
            let left_clauses = if self.peek() == &Token::LBrace {
                self.parse_clause_block(Token::LBrace, Token::RBrace)?
            } else {
                Vec::new()
            };
            let Some(op) = binary_op_of(self.peek()) else {
                if !left_clauses.is_empty() {
                    return Err(self.err(format!(
                        "expected U, R, W or M after action label, got {}",
                        self.peek().describe()
                    )));
                }
                break;
            };
            let pos = self.cur_pos();
            self.advance();
            let right_clauses = if self.peek() == &Token::LBrace {
                self.parse_clause_block(Token::LBrace, Token::RBrace)?
            } else {
                Vec::new()
            };
            let right = self.parse_prefix()?;
            left = RawFormula::Binary {
                op,
                left_clauses,
                right_clauses,
                left: Box::new(left),
                right: Box::new(right),
                pos,
            };
        }
        Ok(left)
    }

    // -- Prefix operators and atoms -----------------------------

    fn parse_prefix(&mut self) -> Result<RawFormula, TlError> {
        match self.peek().clone() {
            Token::Tilde => {
                self.advance();
                let inner = self.parse_prefix()?;
                Ok(RawFormula::Not(Box::new(inner)))
            }
            Token::LParen => {
                self.advance();
                let inner = self.parse_formula()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Token::Quoted(s) => {
                self.advance();
                Ok(RawFormula::Name {
                    value: s,
                    escaped: true,
                })
            }
            Token::Word(w) => self.parse_word(&w),
            other => Err(self.err(format!("expected formula, got {}", other.describe()))),
        }
    }

    fn parse_word(&mut self, word: &str) -> Result<RawFormula, TlError> {
        let pos = self.cur_pos();
        match word {
            "True" => {
                self.advance();
                return Ok(RawFormula::Bool(true));
            }
            "False" => {
                self.advance();
                return Ok(RawFormula::Bool(false));
            }
            _ => {}
        }

        let split = word
            .chars()
            .take_while(|c| PREFIX_LETTERS.contains(*c))
            .count();

        if is_reserved_word(word) {
            // Only a run of prefix letters followed by an operand is an operator stack.
            let next = self.peek_at(1);
            let operand_follows = Self::starts_operand(next) || next == &Token::LBrace;
            if split < word.len() || !operand_follows {
                return Err(TlError::naming(pos, word));
            }
        }

        if split == 0 {
            self.advance();
            return Ok(RawFormula::Name {
                value: word.to_owned(),
                escaped: false,
            });
        }
        if word.len() > 1 {
            self.split_current_word(split);
        }
        self.parse_operator_letter()
    }

    /// The current token is a single prefix letter.
    fn parse_operator_letter(&mut self) -> Result<RawFormula, TlError> {
        let pos = self.cur_pos();
        let letter = match self.peek() {
            Token::Word(w) => w.clone(),
            other => return Err(self.err(format!("expected operator, got {}", other.describe()))),
        };
        self.advance();
        let clauses = if self.peek() == &Token::LBrace {
            self.parse_clause_block(Token::LBrace, Token::RBrace)?
        } else {
            Vec::new()
        };
        match letter.as_str() {
            "A" | "E" => {
                let quantifier = if letter == "A" {
                    Quantifier::A
                } else {
                    Quantifier::E
                };
                let body = self.parse_temporal()?;
                Ok(RawFormula::Quantified {
                    quantifier,
                    clauses,
                    body: Box::new(body),
                    pos,
                })
            }
            "X" | "F" | "G" => {
                let op = match letter.as_str() {
                    "X" => UnaryOp::X,
                    "F" => UnaryOp::F,
                    _ => UnaryOp::G,
                };
                let body = self.parse_prefix()?;
                Ok(RawFormula::Unary {
                    op,
                    clauses,
                    body: Box::new(body),
                    pos,
                })
            }
            other => Err(TlError::syntax(
                pos,
                format!("'{}' is not a prefix operator", other),
            )),
        }
    }
}
