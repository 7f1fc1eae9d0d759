use super::formula::connective_of;
use super::Parser;
use crate::ast::{Action, Connective, FairKind, RawClause, RawFairEntry, RawFairTarget};
use crate::error::TlError;
use crate::lexer::Token;

impl Parser {
    // -- Clause blocks: `{ ... }` after a modality, `[ ... ]` after the formula

    pub(super) fn parse_clause_block(
        &mut self,
        open: Token,
        close: Token,
    ) -> Result<Vec<RawClause>, TlError> {
        self.expect(open)?;
        let mut clauses = vec![self.parse_clause()?];
        while self.peek() == &Token::Comma {
            self.advance();
            clauses.push(self.parse_clause()?);
        }
        self.expect(close)?;
        Ok(clauses)
    }

    fn parse_clause(&mut self) -> Result<RawClause, TlError> {
        let pos = self.cur_pos();
        let fair_kind = match self.peek() {
            Token::Word(w) if self.peek_at(1) == &Token::Colon => FairKind::from_keyword(w),
            _ => None,
        };
        if let Some(kind) = fair_kind {
            self.advance(); // keyword
            self.advance(); // ':'
            return Ok(RawClause::Fair(self.parse_fair_entry(kind, pos)?));
        }
        let action = self.parse_action()?;
        Ok(RawClause::Actions { action, pos })
    }

    // -- Fairness entries ---------------------------------------

    fn parse_fair_entry(
        &mut self,
        kind: FairKind,
        pos: crate::ast::Pos,
    ) -> Result<RawFairEntry, TlError> {
        match self.peek() {
            Token::LBrace => {
                let action = self.parse_braced_action()?;
                Ok(RawFairEntry {
                    kind,
                    condition: None,
                    then: RawFairTarget::Actions(action),
                    pos,
                })
            }
            Token::LParen => {
                self.advance();
                let first = self.parse_formula()?;
                self.expect(Token::RParen)?;
                if self.peek() != &Token::Implies {
                    return Ok(RawFairEntry {
                        kind,
                        condition: None,
                        then: RawFairTarget::Formula(Box::new(first)),
                        pos,
                    });
                }
                self.advance();
                let then = match self.peek() {
                    Token::LBrace => RawFairTarget::Actions(self.parse_braced_action()?),
                    Token::LParen => {
                        self.advance();
                        let f = self.parse_formula()?;
                        self.expect(Token::RParen)?;
                        RawFairTarget::Formula(Box::new(f))
                    }
                    other => {
                        return Err(self.err(format!(
                            "expected '{{' or '(' after '=>' in {} entry, got {}",
                            kind.keyword(),
                            other.describe()
                        )))
                    }
                };
                Ok(RawFairEntry {
                    kind,
                    condition: Some(Box::new(first)),
                    then,
                    pos,
                })
            }
            other => Err(self.err(format!(
                "expected '{{' or '(' after '{}:', got {}",
                kind.keyword(),
                other.describe()
            ))),
        }
    }

    fn parse_braced_action(&mut self) -> Result<Action, TlError> {
        self.expect(Token::LBrace)?;
        let action = self.parse_action()?;
        self.expect(Token::RBrace)?;
        Ok(action)
    }

    // -- Action formulas ----------------------------------------

    fn parse_action(&mut self) -> Result<Action, TlError> {
        let first = self.parse_action_unary()?;
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
            operands.push(self.parse_action_unary()?);
        }
        let Some(op) = op else {
            return Ok(operands.remove(0));
        };
        Ok(match op {
            Connective::And | Connective::Or => {
                let mut flat = Vec::with_capacity(operands.len());
                for a in operands {
                    match (op, a) {
                        (Connective::And, Action::And(nested))
                        | (Connective::Or, Action::Or(nested)) => flat.extend(nested),
                        (_, other) => flat.push(other),
                    }
                }
                if op == Connective::And {
                    Action::And(flat)
                } else {
                    Action::Or(flat)
                }
            }
            Connective::Imply | Connective::Iff => {
                let folded = operands.into_iter().reduce(|acc, right| {
                    if op == Connective::Imply {
                        Action::Imply(Box::new(acc), Box::new(right))
                    } else {
                        Action::Iff(Box::new(acc), Box::new(right))
                    }
                });
                match folded {
                    Some(a) => a,
                    None => return Err(self.err("expected action name")),
                }
            }
        })
    }

    fn parse_action_unary(&mut self) -> Result<Action, TlError> {
        if self.is_word("True") || self.is_word("False") {
            return Err(self.err(format!(
                "boolean constant {} cannot be used as an action name",
                self.peek().describe()
            )));
        }
        match self.peek().clone() {
            Token::Tilde => {
                self.advance();
                Ok(Action::Not(Box::new(self.parse_action_unary()?)))
            }
            Token::LParen => {
                self.advance();
                let inner = self.parse_action()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Token::Word(w) | Token::Quoted(w) => {
                self.advance();
                Ok(Action::Name(w))
            }
            other => Err(self.err(format!(
                "expected action name, got {}",
                other.describe()
            ))),
        }
    }
}
