// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! UI statements: `render`/`tag` views and the `text`, `click` and `attr`
//! statements written inside them.

use std::collections::BTreeMap;

use ritam_ast::expr::{Expr, ExprKind};
use ritam_ast::stmt::{Stmt, StmtKind, UiKind, UiView};
use ritam_ast::token::TokenKind;

use super::{ParseError, Parser};

const TEXT_PROP: &str = "text";
const CLICK_EVENT: &str = "onclick";

impl<'a> Parser<'a> {
    /// `render ["tag"] [content] [{ ... }]`
    pub(super) fn parse_render(&mut self) -> Result<StmtKind, ParseError> {
        self.advance();

        let tag_name = match &self.current().kind {
            TokenKind::Str(tag) => {
                let tag = tag.clone();
                self.advance();
                tag
            }
            _ => UiKind::DEFAULT_TAG.to_string(),
        };

        let mut props = BTreeMap::new();
        if !self.check(&TokenKind::LBrace) && self.can_start_expr() {
            props.insert(TEXT_PROP.to_string(), self.parse_expr()?);
        }

        let mut children = Vec::new();
        if self.check(&TokenKind::LBrace) {
            for stmt in self.parse_block()? {
                hoist(stmt, &mut props, &mut children);
            }
        }

        Ok(StmtKind::View(UiView {
            kind: UiKind::from_tag(&tag_name),
            tag_name,
            props,
            children,
        }))
    }

    /// `text expr`
    pub(super) fn parse_text_stmt(&mut self) -> Result<StmtKind, ParseError> {
        self.advance();
        Ok(StmtKind::Attribute {
            name: TEXT_PROP.to_string(),
            value: self.parse_expr()?,
        })
    }

    /// `click handler`
    pub(super) fn parse_click_stmt(&mut self) -> Result<StmtKind, ParseError> {
        self.advance();
        Ok(StmtKind::Event {
            event_name: CLICK_EVENT.to_string(),
            action: self.expect_ident_expr()?,
        })
    }

    /// `attr "name" expr`
    pub(super) fn parse_attr_stmt(&mut self) -> Result<StmtKind, ParseError> {
        self.advance();
        let name = self.expect_string()?;
        let value = self.parse_expr()?;
        Ok(StmtKind::Attribute { name, value })
    }

    /// A bare identifier as an expression, keeping its builtin key.
    fn expect_ident_expr(&mut self) -> Result<Expr, ParseError> {
        match &self.current().kind {
            TokenKind::Ident { universal } => {
                let universal_name = universal.clone();
                let token = self.advance();
                Ok(Expr::new(
                    ExprKind::Ident {
                        name: token.text.clone(),
                        universal_name,
                    },
                    token.span,
                ))
            }
            _ => Err(self.error_expected("a name")),
        }
    }
}

/// Sort one block statement into the view's props or children.
/// A later prop with the same name replaces an earlier one.
fn hoist(stmt: Stmt, props: &mut BTreeMap<String, Expr>, children: &mut Vec<Stmt>) {
    match stmt.kind {
        StmtKind::Attribute { name, value } => {
            props.insert(name, value);
        }
        StmtKind::Event { event_name, action } => {
            let key = event_name.strip_prefix("on").unwrap_or(&event_name).to_string();
            props.insert(key, action);
        }
        kind => children.push(Stmt::new(kind, stmt.span)),
    }
}
