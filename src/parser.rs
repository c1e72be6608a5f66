use std::sync::OnceLock;

use regex::Regex;

use crate::error::ProverError;
use crate::node::{ConstantValue, Node};
use crate::sequent::{Sequent, SequentSide};

/// A lexical token of the ASCII surface syntax (spec.md §6's informative
/// token table). Deliberately thin: surface-syntax diagnostics beyond a
/// `ProverError::Malformed` are out of scope.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Quoted(String),
    LParen,
    RParen,
    Comma,
    Bang,
    Equals,
    FatArrow,
    Turnstile,
    Arrow,
    DoubleArrow,
}

fn ident_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*").unwrap())
}

fn tokenize(input: &str) -> Result<Vec<Token>, ProverError> {
    let chars: Vec<char> = input.chars().collect();
    let len = chars.len();
    let mut tokens = vec![];
    let mut i = 0;
    while i < len {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        match c {
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            ',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            '!' => {
                tokens.push(Token::Bang);
                i += 1;
            }
            '\'' => {
                let mut j = i + 1;
                let mut s = String::new();
                while j < len && chars[j] != '\'' {
                    s.push(chars[j]);
                    j += 1;
                }
                if j >= len {
                    return Err(ProverError::Malformed("unterminated string literal".to_string()));
                }
                tokens.push(Token::Quoted(s));
                i = j + 1;
            }
            '=' => {
                if i + 1 < len && chars[i + 1] == '>' {
                    tokens.push(Token::FatArrow);
                    i += 2;
                } else {
                    tokens.push(Token::Equals);
                    i += 1;
                }
            }
            '|' => {
                if i + 1 < len && chars[i + 1] == '-' {
                    tokens.push(Token::Turnstile);
                    i += 2;
                } else {
                    return Err(ProverError::Malformed(format!("unexpected '|' at offset {}", i)));
                }
            }
            '-' => {
                if i + 1 < len && chars[i + 1] == '>' {
                    tokens.push(Token::Arrow);
                    i += 2;
                } else {
                    return Err(ProverError::Malformed(format!("unexpected '-' at offset {}", i)));
                }
            }
            '<' => {
                if i + 2 < len && chars[i + 1] == '-' && chars[i + 2] == '>' {
                    tokens.push(Token::DoubleArrow);
                    i += 3;
                } else {
                    return Err(ProverError::Malformed(format!("unexpected '<' at offset {}", i)));
                }
            }
            c if c.is_alphabetic() || c == '_' => {
                let rest: String = chars[i..].iter().collect();
                let m = ident_regex()
                    .find(&rest)
                    .expect("leading alphabetic char guarantees a match");
                let word = m.as_str().to_string();
                i += word.chars().count();
                tokens.push(Token::Ident(word));
            }
            other => {
                return Err(ProverError::Malformed(format!(
                    "unexpected character '{}' at offset {}",
                    other, i
                )))
            }
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ProverError> {
        match self.next() {
            Some(ref t) if t == expected => Ok(()),
            other => Err(ProverError::Malformed(format!(
                "expected {:?}, found {:?}",
                expected, other
            ))),
        }
    }

    fn expect_ident(&mut self) -> Result<String, ProverError> {
        match self.next() {
            Some(Token::Ident(name)) => Ok(name),
            other => Err(ProverError::Malformed(format!(
                "expected identifier, found {:?}",
                other
            ))),
        }
    }

    fn parse_sequent(&mut self) -> Result<Sequent, ProverError> {
        let lhs = self.parse_side()?;
        match self.next() {
            Some(Token::FatArrow) | Some(Token::Turnstile) => {}
            other => {
                return Err(ProverError::Malformed(format!(
                    "expected '=>' or '|-', found {:?}",
                    other
                )))
            }
        }
        let rhs = self.parse_side()?;
        if self.pos != self.tokens.len() {
            return Err(ProverError::Malformed("trailing input after rhs".to_string()));
        }
        Ok(Sequent::new(lhs, rhs))
    }

    fn parse_side(&mut self) -> Result<SequentSide, ProverError> {
        match self.peek() {
            None | Some(Token::FatArrow) | Some(Token::Turnstile) => Ok(SequentSide::Empty),
            _ => {
                let mut exprs = vec![self.parse_expr()?];
                while matches!(self.peek(), Some(Token::Comma)) {
                    self.next();
                    exprs.push(self.parse_expr()?);
                }
                if exprs.len() == 1 {
                    Ok(SequentSide::Single(exprs.into_iter().next().unwrap()))
                } else {
                    Ok(SequentSide::List(exprs))
                }
            }
        }
    }

    fn parse_expr(&mut self) -> Result<Node, ProverError> {
        let left = self.parse_primary()?;
        match self.peek() {
            Some(Token::Ident(word)) if word == "and" => {
                self.next();
                let right = self.parse_primary()?;
                Ok(Node::And(vec![left, right]))
            }
            Some(Token::Ident(word)) if word == "or" => {
                self.next();
                let right = self.parse_primary()?;
                Ok(Node::Or(vec![left, right]))
            }
            Some(Token::Arrow) => {
                self.next();
                let right = self.parse_primary()?;
                Ok(Node::Implication(Box::new(left), Box::new(right)))
            }
            Some(Token::DoubleArrow) => {
                self.next();
                let right = self.parse_primary()?;
                Ok(Node::Equivalence(Box::new(left), Box::new(right)))
            }
            _ => Ok(left),
        }
    }

    fn parse_comma_args(&mut self) -> Result<Vec<Node>, ProverError> {
        self.expect(&Token::LParen)?;
        let mut args = vec![];
        if !matches!(self.peek(), Some(Token::RParen)) {
            args.push(self.parse_expr()?);
            while matches!(self.peek(), Some(Token::Comma)) {
                self.next();
                args.push(self.parse_expr()?);
            }
        }
        self.expect(&Token::RParen)?;
        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<Node, ProverError> {
        match self.peek() {
            Some(Token::Bang) => {
                self.next();
                let operand = self.parse_primary()?;
                Ok(Node::Not(Box::new(operand)))
            }
            Some(Token::LParen) => {
                self.next();
                let inner = self.parse_expr()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            Some(Token::Quoted(_)) => {
                if let Some(Token::Quoted(s)) = self.next() {
                    Ok(Node::Constant(ConstantValue::Str(s)))
                } else {
                    unreachable!()
                }
            }
            Some(Token::Equals) => {
                self.next();
                let mut args = self.parse_comma_args()?;
                if args.len() != 2 {
                    return Err(ProverError::Malformed("'=' expects exactly two arguments".to_string()));
                }
                let b = args.pop().unwrap();
                let a = args.pop().unwrap();
                Ok(Node::Equals(Box::new(a), Box::new(b)))
            }
            Some(Token::Ident(_)) => self.parse_ident_primary(),
            other => Err(ProverError::Malformed(format!("unexpected token {:?}", other))),
        }
    }

    fn parse_ident_primary(&mut self) -> Result<Node, ProverError> {
        let name = self.expect_ident()?;
        match name.as_str() {
            "forall" => {
                let var = self.expect_ident()?;
                self.expect(&Token::LParen)?;
                let body = self.parse_expr()?;
                self.expect(&Token::RParen)?;
                Ok(Node::Forall(var, Box::new(body)))
            }
            "exists" => {
                let var = self.expect_ident()?;
                self.expect(&Token::LParen)?;
                let body = self.parse_expr()?;
                self.expect(&Token::RParen)?;
                Ok(Node::Exists(var, Box::new(body)))
            }
            "not" => {
                self.expect(&Token::LParen)?;
                let body = self.parse_expr()?;
                self.expect(&Token::RParen)?;
                Ok(Node::Not(Box::new(body)))
            }
            "xor" => {
                let args = self.parse_comma_args()?;
                binary_args(args, "xor").map(|(a, b)| Node::Xor(Box::new(a), Box::new(b)))
            }
            "nor" => {
                let args = self.parse_comma_args()?;
                Ok(Node::Nor(args))
            }
            "nand" => {
                let args = self.parse_comma_args()?;
                Ok(Node::Nand(args))
            }
            "divby" => {
                let args = self.parse_comma_args()?;
                Ok(Node::custom("divby", args))
            }
            "true" => Ok(Node::constant_true()),
            "false" => Ok(Node::constant_false()),
            _ if matches!(self.peek(), Some(Token::LParen)) => {
                let args = self.parse_comma_args()?;
                Ok(Node::Custom(name, args))
            }
            _ => Ok(Node::Variable(name)),
        }
    }
}

fn binary_args(mut args: Vec<Node>, op: &str) -> Result<(Node, Node), ProverError> {
    if args.len() != 2 {
        return Err(ProverError::Malformed(format!("'{}' expects exactly two arguments", op)));
    }
    let b = args.pop().unwrap();
    let a = args.pop().unwrap();
    Ok((a, b))
}

/// Parses a full sequent from its ASCII surface syntax.
pub fn parse_sequent(input: &str) -> Result<Sequent, ProverError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, pos: 0 };
    parser.parse_sequent()
}

/// Parses a single formula (no turnstile), useful for tests and for
/// `Clause`/`Node` fixtures.
pub fn parse_formula(input: &str) -> Result<Node, ProverError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, pos: 0 };
    let node = parser.parse_expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(ProverError::Malformed("trailing input after formula".to_string()));
    }
    Ok(node)
}
