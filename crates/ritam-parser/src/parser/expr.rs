// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression parsing.

use ritam_ast::expr::{BinOp, Expr, ExprKind, Literal, UnaryOp};
use ritam_ast::token::{Keyword, TokenKind};

use super::{ParseError, Parser};

impl<'a> Parser<'a> {
    pub(super) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.enter()?;
        let expr = self.parse_binary(1)?;
        self.leave();
        Ok(expr)
    }

    /// Precedence climbing. All binary operators are left-associative.
    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        while let Some(op) = self.peek_binop() {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.advance();
            let right = self.parse_binary(prec + 1)?;
            let span = left.span.to(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    fn peek_binop(&self) -> Option<BinOp> {
        let op = match self.current().kind {
            TokenKind::PipePipe => BinOp::Or,
            TokenKind::AmpAmp => BinOp::And,
            TokenKind::EqEq => BinOp::Eq,
            TokenKind::BangEq => BinOp::Ne,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::Lt => BinOp::Lt,
            TokenKind::GtEq => BinOp::Ge,
            TokenKind::LtEq => BinOp::Le,
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Star => BinOp::Mul,
            TokenKind::Slash => BinOp::Div,
            _ => return None,
        };
        Some(op)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.current().kind {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.parse_postfix(),
        };
        let start = self.advance().span;
        self.enter()?;
        let operand = self.parse_unary()?;
        self.leave();
        let span = start.to(operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    /// Member access and calls, applied left to right.
    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.match_token(&TokenKind::Dot) {
                // Keywords are valid property names: `x.text`, `list.match`.
                let property = if matches!(self.current().kind, TokenKind::Ident { .. } | TokenKind::Keyword(_)) {
                    self.advance().text.clone()
                } else {
                    return Err(self.error_expected("a property name"));
                };
                let span = self.span_from(expr.span);
                expr = Expr::new(
                    ExprKind::Member {
                        object: Box::new(expr),
                        property,
                    },
                    span,
                );
            } else if self.match_token(&TokenKind::LParen) {
                let args = self.parse_list(&TokenKind::RParen)?;
                let span = self.span_from(expr.span);
                expr = Expr::new(
                    ExprKind::Call {
                        callee: Box::new(expr),
                        args,
                    },
                    span,
                );
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Comma-separated expressions up to `close`, which is consumed.
    /// A trailing comma is allowed.
    fn parse_list(&mut self, close: &TokenKind) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        while !self.check(close) {
            items.push(self.parse_expr()?);
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(close)?;
        Ok(items)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let start = self.current().span;

        let kind = match &self.current().kind {
            TokenKind::Int(n) => {
                let n = *n;
                self.advance();
                ExprKind::Literal(Literal::Number(n))
            }
            TokenKind::Str(s) => {
                let s = s.clone();
                self.advance();
                ExprKind::Literal(Literal::String(s))
            }
            TokenKind::Ident { universal } => {
                let universal_name = universal.clone();
                let name = self.advance().text.clone();
                ExprKind::Ident { name, universal_name }
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                // Grouping leaves no node behind; only the span grows.
                return Ok(Expr::new(inner.kind, self.span_from(start)));
            }
            TokenKind::LBracket => {
                self.advance();
                ExprKind::Array(self.parse_list(&TokenKind::RBracket)?)
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                ExprKind::Literal(Literal::Bool(true))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                ExprKind::Literal(Literal::Bool(false))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                ExprKind::Literal(Literal::Null)
            }
            TokenKind::Keyword(Keyword::Await) => {
                self.advance();
                ExprKind::Await(Box::new(self.parse_expr()?))
            }
            _ => return Err(self.error_unexpected()),
        };

        Ok(Expr::new(kind, self.span_from(start)))
    }

    /// Whether the current token can begin an expression.
    pub(super) fn can_start_expr(&self) -> bool {
        match self.current().kind {
            TokenKind::Int(_)
            | TokenKind::Str(_)
            | TokenKind::Ident { .. }
            | TokenKind::LParen
            | TokenKind::LBracket
            | TokenKind::Minus
            | TokenKind::Bang => true,
            TokenKind::Keyword(kw) => {
                matches!(kw, Keyword::True | Keyword::False | Keyword::Null | Keyword::Await)
            }
            _ => false,
        }
    }
}
