// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statement and declaration parsing.

use ritam_ast::decl::{ComponentDecl, EnumDecl, Field, FnDecl, ImportDecl, Param, StructDecl, TypeParam, VarDecl};
use ritam_ast::stmt::{MatchCase, Stmt, StmtKind};
use ritam_ast::token::{Keyword, TokenKind};

use super::{ParseError, Parser};

impl<'a> Parser<'a> {
    pub(super) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.enter()?;
        let start = self.current().span;

        let kind = match self.current().keyword() {
            Some(Keyword::Var | Keyword::Const) => self.parse_var_decl()?,
            Some(Keyword::Print) => {
                self.advance();
                StmtKind::Print(self.parse_expr()?)
            }
            Some(Keyword::Component) => self.parse_component_decl()?,
            Some(Keyword::Render | Keyword::Tag) => self.parse_render()?,
            Some(Keyword::Text) => self.parse_text_stmt()?,
            Some(Keyword::Function | Keyword::Async) => self.parse_fn_decl()?,
            Some(Keyword::Struct) => self.parse_struct_decl()?,
            Some(Keyword::Enum) => self.parse_enum_decl()?,
            Some(Keyword::If) => self.parse_if_stmt()?,
            Some(Keyword::While) => {
                self.advance();
                let condition = self.parse_expr()?;
                let body = self.parse_block()?;
                StmtKind::While { condition, body }
            }
            Some(Keyword::For) => self.parse_for_stmt()?,
            Some(Keyword::Return) => self.parse_return_stmt()?,
            Some(Keyword::Import) => self.parse_import_decl()?,
            Some(Keyword::Export) => self.parse_export_decl()?,
            Some(Keyword::Try) => self.parse_try_catch()?,
            Some(Keyword::Throw) => {
                self.advance();
                StmtKind::Throw(self.parse_expr()?)
            }
            Some(Keyword::Match) => self.parse_match_stmt()?,
            Some(Keyword::Click) => self.parse_click_stmt()?,
            Some(Keyword::Attr) => self.parse_attr_stmt()?,
            _ if self.check(&TokenKind::Ident { universal: None }) && self.peek(1).kind == TokenKind::Eq => {
                let name = self.expect_ident()?;
                self.expect(&TokenKind::Eq)?;
                let value = self.parse_expr()?;
                StmtKind::Assign { name, value }
            }
            _ => StmtKind::Expr(self.parse_expr()?),
        };

        self.leave();
        Ok(Stmt::new(kind, self.span_from(start)))
    }

    /// `{ stmt* }`. Reaching end of input reports a missing `}`.
    pub(super) fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(&TokenKind::LBrace)?;

        let mut stmts = Vec::new();
        loop {
            self.skip_separators();
            if self.check(&TokenKind::RBrace) || self.at_end() {
                break;
            }
            stmts.push(self.parse_stmt()?);
        }

        self.expect(&TokenKind::RBrace)?;
        Ok(stmts)
    }

    /// Optional `: TypeName`.
    fn parse_type_annotation(&mut self) -> Result<Option<String>, ParseError> {
        if self.match_token(&TokenKind::Colon) {
            Ok(Some(self.expect_ident()?))
        } else {
            Ok(None)
        }
    }

    fn parse_var_decl(&mut self) -> Result<StmtKind, ParseError> {
        let mutable = self.current().is_keyword(Keyword::Var);
        self.advance();
        let name = self.expect_ident()?;
        let type_annotation = self.parse_type_annotation()?;
        self.expect(&TokenKind::Eq)?;
        let value = self.parse_expr()?;
        Ok(StmtKind::Var(VarDecl {
            name,
            value,
            mutable,
            type_annotation,
        }))
    }

    fn parse_fn_decl(&mut self) -> Result<StmtKind, ParseError> {
        let is_async = self.match_keyword(Keyword::Async);
        self.expect_keyword(Keyword::Function)?;
        let name = self.expect_ident()?;
        let type_params = self.parse_type_params()?;

        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                let name = self.expect_ident()?;
                let type_annotation = self.parse_type_annotation()?;
                params.push(Param { name, type_annotation });
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen)?;

        let return_type = self.parse_type_annotation()?;
        let body = self.parse_block()?;

        Ok(StmtKind::Function(FnDecl {
            name,
            type_params,
            params,
            body,
            is_async,
            return_type,
        }))
    }

    /// Optional `<T, U: Constraint>`. Constraints are recorded, not checked.
    fn parse_type_params(&mut self) -> Result<Option<Vec<TypeParam>>, ParseError> {
        if !self.match_token(&TokenKind::Lt) {
            return Ok(None);
        }
        let mut params = Vec::new();
        loop {
            let name = self.expect_ident()?;
            let constraint = self.parse_type_annotation()?;
            params.push(TypeParam { name, constraint });
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::Gt)?;
        Ok(Some(params))
    }

    fn parse_struct_decl(&mut self) -> Result<StmtKind, ParseError> {
        self.advance();
        let name = self.expect_ident()?;
        let type_params = self.parse_type_params()?;

        self.expect(&TokenKind::LBrace)?;
        let mut fields = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            let name = self.expect_ident()?;
            let type_annotation = self
                .parse_type_annotation()?
                .unwrap_or_else(|| Field::UNTYPED.to_string());
            fields.push(Field { name, type_annotation });
            self.match_token(&TokenKind::Comma);
        }
        self.expect(&TokenKind::RBrace)?;

        Ok(StmtKind::Struct(StructDecl {
            name,
            type_params,
            fields,
        }))
    }

    fn parse_enum_decl(&mut self) -> Result<StmtKind, ParseError> {
        self.advance();
        let name = self.expect_ident()?;

        self.expect(&TokenKind::LBrace)?;
        let mut cases = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            cases.push(self.expect_ident()?);
            self.match_token(&TokenKind::Comma);
        }
        self.expect(&TokenKind::RBrace)?;

        Ok(StmtKind::Enum(EnumDecl { name, cases }))
    }

    fn parse_component_decl(&mut self) -> Result<StmtKind, ParseError> {
        self.advance();
        let name = self.expect_ident()?;
        let body = self.parse_block()?;
        Ok(StmtKind::Component(ComponentDecl { name, body }))
    }

    /// `if cond { } [else_if cond { } ...] [else { }]`
    ///
    /// Also entered on `else_if`, which parses exactly like `if`.
    fn parse_if_stmt(&mut self) -> Result<StmtKind, ParseError> {
        self.enter()?;
        self.advance();
        let condition = self.parse_expr()?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.check_keyword(Keyword::ElseIf) {
            let start = self.current().span;
            let nested = self.parse_if_stmt()?;
            Some(vec![Stmt::new(nested, self.span_from(start))])
        } else if self.match_keyword(Keyword::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };

        self.leave();
        Ok(StmtKind::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    /// `for item [in] iterable { }`
    fn parse_for_stmt(&mut self) -> Result<StmtKind, ParseError> {
        self.advance();
        let iterator = self.expect_ident()?;
        // Locales without an `in` keyword may still write a bare `in`.
        if !self.match_keyword(Keyword::In) && self.current().text == "in" {
            self.advance();
        }
        let iterable = self.parse_expr()?;
        let body = self.parse_block()?;
        Ok(StmtKind::For {
            iterator,
            iterable,
            body,
        })
    }

    fn parse_return_stmt(&mut self) -> Result<StmtKind, ParseError> {
        self.advance();
        let value = if self.check(&TokenKind::RBrace) || self.check(&TokenKind::Semi) || self.at_end() {
            None
        } else {
            Some(self.parse_expr()?)
        };
        Ok(StmtKind::Return(value))
    }

    /// `import { a, b } [from] "source"`
    fn parse_import_decl(&mut self) -> Result<StmtKind, ParseError> {
        self.advance();
        self.expect(&TokenKind::LBrace)?;
        let mut specifiers = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            specifiers.push(self.expect_ident()?);
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace)?;
        self.match_keyword(Keyword::From);
        let source = self.expect_string()?;
        Ok(StmtKind::Import(ImportDecl { specifiers, source }))
    }

    fn parse_export_decl(&mut self) -> Result<StmtKind, ParseError> {
        self.advance();
        let decl = self.parse_stmt()?;
        if !decl.kind.is_exportable() {
            return Err(ParseError::NotExportable {
                kind: decl.kind.describe(),
                span: decl.span,
            });
        }
        Ok(StmtKind::Export(Box::new(decl)))
    }

    /// `try { } catch (err) { }`
    fn parse_try_catch(&mut self) -> Result<StmtKind, ParseError> {
        self.advance();
        let try_block = self.parse_block()?;
        self.expect_keyword(Keyword::Catch)?;
        self.expect(&TokenKind::LParen)?;
        let error_var = self.expect_ident()?;
        self.expect(&TokenKind::RParen)?;
        let catch_block = self.parse_block()?;
        Ok(StmtKind::TryCatch {
            try_block,
            catch_block,
            error_var,
        })
    }

    /// `match target { pattern { } ... }`
    fn parse_match_stmt(&mut self) -> Result<StmtKind, ParseError> {
        self.advance();
        let target = self.parse_expr()?;

        self.expect(&TokenKind::LBrace)?;
        let mut cases = Vec::new();
        loop {
            self.skip_separators();
            if self.check(&TokenKind::RBrace) || self.at_end() {
                break;
            }
            let pattern = self.parse_expr()?;
            let body = self.parse_block()?;
            cases.push(MatchCase { pattern, body });
        }
        self.expect(&TokenKind::RBrace)?;

        Ok(StmtKind::Match {
            target,
            cases,
            is_exhaustive: true,
        })
    }
}
