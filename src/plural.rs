//! Plural rules for catalogs.
//!
//! A catalog carries a gettext `plural-forms` header such as
//! `nplurals=3; plural=(n==1 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2);`.
//! The header is parsed once, when the catalog is built, into a [`PluralRule`]
//! that maps a count to a form index. Lookups never re-parse it.

use std::fmt;
use std::sync::Arc;

use crate::error::{I18nError, I18nResult};

/// The rule used when a catalog does not declare one.
pub const DEFAULT_PLURAL_FORMS: &str = "nplurals=2; plural=(n != 1);";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Mul,
    Div,
    Rem,
    Add,
    Sub,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    N,
    Literal(i64),
    Not(Box<Expr>),
    Neg(Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Ternary(Box<Expr>, Box<Expr>, Box<Expr>),
}

impl Expr {
    fn eval(&self, n: i64) -> i64 {
        match self {
            Expr::N => n,
            Expr::Literal(value) => *value,
            Expr::Not(inner) => (inner.eval(n) == 0) as i64,
            Expr::Neg(inner) => inner.eval(n).wrapping_neg(),
            Expr::Binary(op, lhs, rhs) => {
                let left = lhs.eval(n);
                // Short-circuit like C
                match op {
                    BinaryOp::And if left == 0 => return 0,
                    BinaryOp::Or if left != 0 => return 1,
                    _ => {}
                }
                let right = rhs.eval(n);
                match op {
                    BinaryOp::Mul => left.wrapping_mul(right),
                    BinaryOp::Div => left.checked_div(right).unwrap_or(0),
                    BinaryOp::Rem => left.checked_rem(right).unwrap_or(0),
                    BinaryOp::Add => left.wrapping_add(right),
                    BinaryOp::Sub => left.wrapping_sub(right),
                    BinaryOp::Lt => (left < right) as i64,
                    BinaryOp::Le => (left <= right) as i64,
                    BinaryOp::Gt => (left > right) as i64,
                    BinaryOp::Ge => (left >= right) as i64,
                    BinaryOp::Eq => (left == right) as i64,
                    BinaryOp::Ne => (left != right) as i64,
                    BinaryOp::And | BinaryOp::Or => (right != 0) as i64,
                }
            }
            Expr::Ternary(cond, then, otherwise) => {
                if cond.eval(n) != 0 {
                    then.eval(n)
                } else {
                    otherwise.eval(n)
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    N,
    Number(i64),
    Op(&'static str),
    LParen,
    RParen,
    Question,
    Colon,
}

fn tokenize(source: &str) -> I18nResult<Vec<Token>> {
    const OPERATORS: [&str; 16] = [
        "&&", "||", "==", "!=", "<=", ">=", "<", ">", "!", "*", "/", "%", "+", "-", "?", ":",
    ];

    let mut tokens = Vec::new();
    let mut rest = source.trim_start();

    while let Some(ch) = rest.chars().next() {
        if ch.is_ascii_digit() {
            let end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            let value = rest[..end].parse::<i64>().map_err(|e| {
                I18nError::InvalidPluralForms(format!("bad number '{}': {}", &rest[..end], e))
            })?;
            tokens.push(Token::Number(value));
            rest = &rest[end..];
        } else if ch == 'n' {
            tokens.push(Token::N);
            rest = &rest[1..];
        } else if ch == '(' {
            tokens.push(Token::LParen);
            rest = &rest[1..];
        } else if ch == ')' {
            tokens.push(Token::RParen);
            rest = &rest[1..];
        } else if let Some(op) = OPERATORS.iter().find(|op| rest.starts_with(**op)) {
            tokens.push(match *op {
                "?" => Token::Question,
                ":" => Token::Colon,
                other => Token::Op(other),
            });
            rest = &rest[op.len()..];
        } else {
            return Err(I18nError::InvalidPluralForms(format!(
                "unexpected character '{}' in '{}'",
                ch, source
            )));
        }
        rest = rest.trim_start();
    }

    Ok(tokens)
}

/// Precedence climbing over the C operator table used by gettext.
struct ExprParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl ExprParser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: Token) -> I18nResult<()> {
        match self.next() {
            Some(token) if token == expected => Ok(()),
            other => Err(I18nError::InvalidPluralForms(format!(
                "expected {:?}, found {:?}",
                expected, other
            ))),
        }
    }

    fn parse_ternary(&mut self) -> I18nResult<Expr> {
        let cond = self.parse_binary(0)?;
        if self.peek() == Some(&Token::Question) {
            self.next();
            let then = self.parse_ternary()?;
            self.expect(Token::Colon)?;
            let otherwise = self.parse_ternary()?;
            return Ok(Expr::Ternary(
                Box::new(cond),
                Box::new(then),
                Box::new(otherwise),
            ));
        }
        Ok(cond)
    }

    fn binary_op(&self) -> Option<(BinaryOp, u8)> {
        let op = match self.peek()? {
            Token::Op(op) => *op,
            _ => return None,
        };
        Some(match op {
            "||" => (BinaryOp::Or, 1),
            "&&" => (BinaryOp::And, 2),
            "==" => (BinaryOp::Eq, 3),
            "!=" => (BinaryOp::Ne, 3),
            "<" => (BinaryOp::Lt, 4),
            "<=" => (BinaryOp::Le, 4),
            ">" => (BinaryOp::Gt, 4),
            ">=" => (BinaryOp::Ge, 4),
            "+" => (BinaryOp::Add, 5),
            "-" => (BinaryOp::Sub, 5),
            "*" => (BinaryOp::Mul, 6),
            "/" => (BinaryOp::Div, 6),
            "%" => (BinaryOp::Rem, 6),
            _ => return None,
        })
    }

    fn parse_binary(&mut self, min_precedence: u8) -> I18nResult<Expr> {
        let mut lhs = self.parse_unary()?;
        while let Some((op, precedence)) = self.binary_op() {
            if precedence < min_precedence {
                break;
            }
            self.next();
            let rhs = self.parse_binary(precedence + 1)?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> I18nResult<Expr> {
        match self.next() {
            Some(Token::Op("!")) => Ok(Expr::Not(Box::new(self.parse_unary()?))),
            Some(Token::Op("-")) => Ok(Expr::Neg(Box::new(self.parse_unary()?))),
            Some(Token::N) => Ok(Expr::N),
            Some(Token::Number(value)) => Ok(Expr::Literal(value)),
            Some(Token::LParen) => {
                let inner = self.parse_ternary()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            other => Err(I18nError::InvalidPluralForms(format!(
                "unexpected token {:?}",
                other
            ))),
        }
    }
}

fn parse_expression(source: &str) -> I18nResult<Expr> {
    let mut parser = ExprParser {
        tokens: tokenize(source)?,
        pos: 0,
    };
    let expr = parser.parse_ternary()?;
    if parser.pos < parser.tokens.len() {
        return Err(I18nError::InvalidPluralForms(format!(
            "trailing input in '{}'",
            source
        )));
    }
    Ok(expr)
}

#[derive(Clone)]
enum Evaluator {
    Expression(Expr),
    Function(Arc<dyn Fn(u64) -> usize + Send + Sync>),
}

/// Maps a count to the index of a translated plural form.
#[derive(Clone)]
pub struct PluralRule {
    nplurals: usize,
    source: String,
    evaluator: Evaluator,
}

impl PluralRule {
    /// Parse a gettext `plural-forms` header.
    ///
    /// Both `nplurals` and `plural` must be present. The trailing semicolon is
    /// optional.
    pub fn parse(header: &str) -> I18nResult<Self> {
        let mut nplurals = None;
        let mut plural = None;

        for part in header.split(';') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let (name, value) = part.split_once('=').ok_or_else(|| {
                I18nError::InvalidPluralForms(format!("missing '=' in '{}'", part))
            })?;
            match name.trim() {
                "nplurals" => {
                    let count = value.trim().parse::<usize>().map_err(|e| {
                        I18nError::InvalidPluralForms(format!(
                            "bad nplurals '{}': {}",
                            value.trim(),
                            e
                        ))
                    })?;
                    nplurals = Some(count);
                }
                "plural" => plural = Some(parse_expression(value)?),
                other => {
                    return Err(I18nError::InvalidPluralForms(format!(
                        "unknown field '{}'",
                        other
                    )));
                }
            }
        }

        let nplurals = nplurals
            .filter(|count| *count > 0)
            .ok_or_else(|| I18nError::InvalidPluralForms(format!("no nplurals in '{}'", header)))?;
        let expr = plural
            .ok_or_else(|| I18nError::InvalidPluralForms(format!("no plural in '{}'", header)))?;

        Ok(PluralRule {
            nplurals,
            source: header.trim().to_string(),
            evaluator: Evaluator::Expression(expr),
        })
    }

    /// Wrap a caller-supplied rule.
    pub fn from_fn<F>(nplurals: usize, rule: F) -> Self
    where
        F: Fn(u64) -> usize + Send + Sync + 'static,
    {
        PluralRule {
            nplurals: nplurals.max(1),
            source: format!("nplurals={}; plural=<fn>;", nplurals),
            evaluator: Evaluator::Function(Arc::new(rule)),
        }
    }

    pub fn nplurals(&self) -> usize {
        self.nplurals
    }

    /// The header this rule was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Form index for `n`, clamped to `nplurals - 1`.
    pub fn index(&self, n: u64) -> usize {
        let raw = match &self.evaluator {
            Evaluator::Expression(expr) => {
                let value = expr.eval(i64::try_from(n).unwrap_or(i64::MAX));
                usize::try_from(value).unwrap_or(0)
            }
            Evaluator::Function(rule) => rule(n),
        };
        raw.min(self.nplurals - 1)
    }
}

impl Default for PluralRule {
    fn default() -> Self {
        PluralRule {
            nplurals: 2,
            source: DEFAULT_PLURAL_FORMS.to_string(),
            evaluator: Evaluator::Expression(Expr::Binary(
                BinaryOp::Ne,
                Box::new(Expr::N),
                Box::new(Expr::Literal(1)),
            )),
        }
    }
}

impl fmt::Debug for PluralRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluralRule")
            .field("nplurals", &self.nplurals)
            .field("source", &self.source)
            .finish()
    }
}

impl std::str::FromStr for PluralRule {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PluralRule::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rule() {
        let rule = PluralRule::default();
        assert_eq!(rule.nplurals(), 2);
        assert_eq!(rule.index(0), 1);
        assert_eq!(rule.index(1), 0);
        assert_eq!(rule.index(2), 1);
        assert_eq!(rule.source(), DEFAULT_PLURAL_FORMS);
    }

    #[test]
    fn test_french_rule() {
        let rule = PluralRule::parse("nplurals=2; plural=(n > 1);").unwrap();
        assert_eq!(rule.index(0), 0);
        assert_eq!(rule.index(1), 0);
        assert_eq!(rule.index(2), 1);
        assert_eq!(rule.index(100), 1);
    }

    #[test]
    fn test_single_form_rule() {
        let rule = PluralRule::parse("nplurals=1; plural=0;").unwrap();
        assert_eq!(rule.index(0), 0);
        assert_eq!(rule.index(7), 0);
    }

    #[test]
    fn test_russian_rule() {
        let rule = PluralRule::parse(
            "nplurals=3; plural=(n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2);",
        )
        .unwrap();
        assert_eq!(rule.index(1), 0);
        assert_eq!(rule.index(21), 0);
        assert_eq!(rule.index(11), 2);
        assert_eq!(rule.index(3), 1);
        assert_eq!(rule.index(14), 2);
        assert_eq!(rule.index(22), 1);
        assert_eq!(rule.index(5), 2);
    }

    #[test]
    fn test_arabic_rule() {
        let rule = PluralRule::parse(
            "nplurals=6; plural=n==0 ? 0 : n==1 ? 1 : n==2 ? 2 : n%100>=3 && n%100<=10 ? 3 : n%100>=11 ? 4 : 5;",
        )
        .unwrap();
        assert_eq!(rule.index(0), 0);
        assert_eq!(rule.index(1), 1);
        assert_eq!(rule.index(2), 2);
        assert_eq!(rule.index(5), 3);
        assert_eq!(rule.index(50), 4);
        assert_eq!(rule.index(101), 5);
    }

    #[test]
    fn test_precedence() {
        let rule = PluralRule::parse("nplurals=10; plural=1 + 2 * 3;").unwrap();
        assert_eq!(rule.index(0), 7);

        let rule = PluralRule::parse("nplurals=10; plural=(1 + 2) * 3;").unwrap();
        assert_eq!(rule.index(0), 9);

        let rule = PluralRule::parse("nplurals=2; plural=!(n == 1)").unwrap();
        assert_eq!(rule.index(1), 0);
        assert_eq!(rule.index(4), 1);
    }

    #[test]
    fn test_index_is_clamped() {
        let rule = PluralRule::parse("nplurals=2; plural=n;").unwrap();
        assert_eq!(rule.index(5), 1);

        let rule = PluralRule::parse("nplurals=3; plural=n - 5;").unwrap();
        assert_eq!(rule.index(1), 0);
    }

    #[test]
    fn test_division_by_zero_yields_zero() {
        let rule = PluralRule::parse("nplurals=2; plural=n % 0;").unwrap();
        assert_eq!(rule.index(3), 0);
        let rule = PluralRule::parse("nplurals=2; plural=n / 0;").unwrap();
        assert_eq!(rule.index(3), 0);
    }

    #[test]
    fn test_from_fn() {
        let rule = PluralRule::from_fn(3, |n| if n == 0 { 0 } else if n == 1 { 1 } else { 2 });
        assert_eq!(rule.index(0), 0);
        assert_eq!(rule.index(1), 1);
        assert_eq!(rule.index(9), 2);
    }

    #[test]
    fn test_invalid_headers() {
        assert!(PluralRule::parse("").is_err());
        assert!(PluralRule::parse("plural=(n != 1);").is_err());
        assert!(PluralRule::parse("nplurals=2;").is_err());
        assert!(PluralRule::parse("nplurals=0; plural=0;").is_err());
        assert!(PluralRule::parse("nplurals=two; plural=0;").is_err());
        assert!(PluralRule::parse("nplurals=2; plural=(n != 1;").is_err());
        assert!(PluralRule::parse("nplurals=2; plural=n $ 1;").is_err());
        assert!(PluralRule::parse("nplurals=2; plural=n 1;").is_err());
        assert!(PluralRule::parse("nplurals=2; plural=n ? 1;").is_err());
        assert!(matches!(
            "nplurals=2; foo=1;".parse::<PluralRule>(),
            Err(I18nError::InvalidPluralForms(_))
        ));
    }
}
