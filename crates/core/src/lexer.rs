use crate::ast::Pos;
use crate::error::TlError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Bare word: atoms, operator letters and keywords, distinguished in the parser
    Word(String),
    /// Quoted atom (content without quotes)
    Quoted(String),
    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Colon,
    // Boolean connectives
    Tilde,   // ~
    Amp,     // &
    Pipe,    // |
    Implies, // =>
    Iff,     // <=>
    // End of input
    Eof,
}

impl Token {
    /// How the token is written, for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Token::Word(w) => format!("'{}'", w),
            Token::Quoted(s) => format!("\"{}\"", s),
            Token::LParen => "'('".to_owned(),
            Token::RParen => "')'".to_owned(),
            Token::LBrace => "'{'".to_owned(),
            Token::RBrace => "'}'".to_owned(),
            Token::LBracket => "'['".to_owned(),
            Token::RBracket => "']'".to_owned(),
            Token::Comma => "','".to_owned(),
            Token::Colon => "':'".to_owned(),
            Token::Tilde => "'~'".to_owned(),
            Token::Amp => "'&'".to_owned(),
            Token::Pipe => "'|'".to_owned(),
            Token::Implies => "'=>'".to_owned(),
            Token::Iff => "'<=>'".to_owned(),
            Token::Eof => "end of input".to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Spanned {
    pub token: Token,
    pub pos: Pos,
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub fn lex(src: &str) -> Result<Vec<Spanned>, TlError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = src.chars().collect();
    let mut pos = 0usize;
    let mut line: u32 = 1;
    let mut line_start = 0usize;

    while pos < chars.len() {
        let c = chars[pos];

        // Whitespace
        if c.is_whitespace() {
            if c == '\n' {
                line += 1;
                line_start = pos + 1;
            }
            pos += 1;
            continue;
        }

        let tok_pos = Pos::new(line, (pos - line_start) as u32 + 1);

        // Quoted atom
        if c == '"' || c == '\'' {
            let quote = c;
            pos += 1;
            let start = pos;
            while pos < chars.len() && chars[pos] != quote {
                if chars[pos] == '\n' {
                    return Err(TlError::syntax(tok_pos, "unterminated quoted name"));
                }
                pos += 1;
            }
            if pos >= chars.len() {
                return Err(TlError::syntax(tok_pos, "unterminated quoted name"));
            }
            if pos == start {
                return Err(TlError::syntax(tok_pos, "empty quoted name"));
            }
            let s: String = chars[start..pos].iter().collect();
            pos += 1; // closing quote
            tokens.push(Spanned {
                token: Token::Quoted(s),
                pos: tok_pos,
            });
            continue;
        }

        // Word
        if is_word_char(c) {
            let start = pos;
            while pos < chars.len() && is_word_char(chars[pos]) {
                pos += 1;
            }
            let word: String = chars[start..pos].iter().collect();
            tokens.push(Spanned {
                token: Token::Word(word),
                pos: tok_pos,
            });
            continue;
        }

        // Multi-character connectives
        if c == '=' {
            if pos + 1 < chars.len() && chars[pos + 1] == '>' {
                tokens.push(Spanned {
                    token: Token::Implies,
                    pos: tok_pos,
                });
                pos += 2;
                continue;
            }
            return Err(TlError::syntax(tok_pos, "expected '=>'"));
        }
        if c == '<' {
            if pos + 2 < chars.len() && chars[pos + 1] == '=' && chars[pos + 2] == '>' {
                tokens.push(Spanned {
                    token: Token::Iff,
                    pos: tok_pos,
                });
                pos += 3;
                continue;
            }
            return Err(TlError::syntax(tok_pos, "expected '<=>'"));
        }

        let token = match c {
            '(' => Token::LParen,
            ')' => Token::RParen,
            '{' => Token::LBrace,
            '}' => Token::RBrace,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            ',' => Token::Comma,
            ':' => Token::Colon,
            '~' => Token::Tilde,
            '&' => Token::Amp,
            '|' => Token::Pipe,
            _ => {
                return Err(TlError::syntax(
                    tok_pos,
                    format!("unexpected character '{}'", c),
                ))
            }
        };
        tokens.push(Spanned {
            token,
            pos: tok_pos,
        });
        pos += 1;
    }

    tokens.push(Spanned {
        token: Token::Eof,
        pos: Pos::new(line, (pos - line_start) as u32 + 1),
    });
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<Token> {
        lex(src).unwrap().into_iter().map(|s| s.token).collect()
    }

    #[test]
    fn lexes_connectives_and_words() {
        assert_eq!(
            kinds("~p <=> q => r & s | t"),
            vec![
                Token::Tilde,
                Token::Word("p".into()),
                Token::Iff,
                Token::Word("q".into()),
                Token::Implies,
                Token::Word("r".into()),
                Token::Amp,
                Token::Word("s".into()),
                Token::Pipe,
                Token::Word("t".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn quoted_names_keep_their_content() {
        assert_eq!(
            kinds("\"a b\" 'c'"),
            vec![
                Token::Quoted("a b".into()),
                Token::Quoted("c".into()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn positions_are_one_based_line_and_column() {
        let toks = lex("p\n  & q").unwrap();
        assert_eq!(toks[0].pos, Pos::new(1, 1));
        assert_eq!(toks[1].pos, Pos::new(2, 3));
        assert_eq!(toks[2].pos, Pos::new(2, 5));
    }

    #[test]
    fn rejects_stray_characters() {
        let err = lex("p # q").unwrap_err();
        assert_eq!(
            err,
            TlError::syntax(Pos::new(1, 3), "unexpected character '#'")
        );
    }

    #[test]
    fn rejects_unterminated_and_empty_quotes() {
        assert!(lex("\"abc").is_err());
        assert!(lex("''").is_err());
        assert!(lex("<= p").is_err());
    }
}
