// SPDX-License-Identifier: (MIT OR Apache-2.0)

use ritam_ast::decl::*;
use ritam_ast::expr::*;
use ritam_ast::stmt::*;
use ritam_ast::Keyword;
use ritam_locale::LocaleDef;

use crate::comment::{self, CommentList};
use crate::config::FormatConfig;

/// Binding strength of a unary operand.
const UNARY_PREC: u8 = 7;
/// Binding strength of a call or member object.
const POSTFIX_PREC: u8 = 8;

pub struct Printer<'a> {
    output: String,
    indent: usize,
    /// Text the program was parsed from, when comments and blank lines
    /// should carry over.
    source: Option<&'a str>,
    comments: CommentList,
    locale: &'a LocaleDef,
    config: &'a FormatConfig,
}

impl<'a> Printer<'a> {
    pub fn new(locale: &'a LocaleDef, config: &'a FormatConfig) -> Self {
        Self {
            output: String::new(),
            indent: 0,
            source: None,
            comments: CommentList::empty(),
            locale,
            config,
        }
    }

    pub fn with_source(mut self, source: &'a str) -> Self {
        self.source = Some(source);
        self.comments = CommentList::new(comment::extract_comments(source));
        self
    }

    pub fn finish(mut self) -> String {
        // Emit any remaining comments
        for c in self.comments.take_rest() {
            if !self.output.is_empty() && !self.output.ends_with('\n') {
                self.output.push('\n');
            }
            self.output.push_str(&c.text);
            self.output.push('\n');
        }
        if !self.output.is_empty() && !self.output.ends_with('\n') {
            self.output.push('\n');
        }
        self.output
    }

    // --- Helpers ---

    fn emit(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn emit_newline(&mut self) {
        self.output.push('\n');
    }

    fn emit_indent(&mut self) {
        let spaces = self.indent * self.config.indent_width;
        for _ in 0..spaces {
            self.output.push(' ');
        }
    }

    fn emit_blank_line(&mut self) {
        if self.output.is_empty() || self.output.ends_with("\n\n") {
            return;
        }
        if !self.output.ends_with('\n') {
            self.output.push('\n');
        }
        self.output.push('\n');
    }

    /// The target locale's spelling, or the universal key when it has none.
    fn keyword(&self, kw: Keyword) -> &'a str {
        let locale: &'a LocaleDef = self.locale;
        locale.keyword_spelling(kw).unwrap_or(kw.as_str())
    }

    fn emit_keyword(&mut self, kw: Keyword) {
        let spelling = self.keyword(kw);
        self.emit(spelling);
    }

    /// Check if there's a blank line in the source immediately before `pos`,
    /// scanning backward through whitespace only.
    fn has_blank_line_before(&self, pos: usize) -> bool {
        let Some(source) = self.source else {
            return false;
        };
        let bytes = source.as_bytes();
        let mut newlines = 0;
        let mut p = pos.min(bytes.len());
        while p > 0 {
            p -= 1;
            match bytes[p] {
                b'\n' => newlines += 1,
                b' ' | b'\t' | b'\r' => {}
                _ => break,
            }
        }
        newlines >= 2
    }

    /// Take comments before `pos`, emit them with proper blank lines.
    fn emit_comments_before(&mut self, pos: usize, emit_blank_before_first: bool) -> Vec<comment::Comment> {
        let comments = self.comments.take_before(pos);
        for (i, c) in comments.iter().enumerate() {
            if (i > 0 || emit_blank_before_first) && self.has_blank_line_before(c.start) {
                self.emit_blank_line();
            }
            self.emit_indent();
            self.output.push_str(&c.text);
            self.emit_newline();
        }
        comments
    }

    /// Emit a comment that sits on the same source line as the code ending
    /// at `span_end`. Returns true if one was emitted.
    fn try_emit_trailing_comment(&mut self, span_end: usize) -> bool {
        let Some(source) = self.source else {
            return false;
        };
        let Some(c) = self.comments.peek_next() else {
            return false;
        };
        if c.start < span_end || c.start > source.len() {
            return false;
        }
        if source[span_end..c.start].contains('\n') {
            return false;
        }
        let Some(c) = self.comments.advance() else {
            return false;
        };
        self.emit("  ");
        self.emit(&c.text);
        true
    }

    /// Indentation (in spaces) of the source line containing `pos`.
    fn source_indent_at(&self, pos: usize) -> usize {
        let Some(source) = self.source else {
            return 0;
        };
        let bytes = source.as_bytes();
        let mut p = pos;
        while p > 0 && bytes[p - 1] != b'\n' {
            p -= 1;
        }
        bytes[p..pos].iter().take_while(|&&b| b == b' ').count()
    }

    /// Consume trailing comments that belong to the current block (at current indent or deeper).
    fn consume_trailing_block_comments(&mut self) {
        if self.indent == 0 {
            return;
        }
        let min_indent = self.indent * self.config.indent_width;
        while let Some(c) = self.comments.peek_next() {
            if self.source_indent_at(c.start) < min_indent {
                break;
            }
            let Some(c) = self.comments.advance() else { break };
            if self.has_blank_line_before(c.start) {
                self.emit_blank_line();
            }
            self.emit_indent();
            self.output.push_str(&c.text);
            self.emit_newline();
        }
    }

    fn fits_on_line(&self, words: impl Iterator<Item = usize>, prefix: usize) -> bool {
        let (count, width): (usize, usize) = words.fold((0, 0), |(n, w), len| (n + 1, w + len));
        let separators = count.saturating_sub(1) * 2;
        self.indent * self.config.indent_width + prefix + width + separators + 4 <= self.config.max_line_width
    }

    // --- Statements ---

    pub fn format_program(&mut self, program: &Program) {
        self.format_stmts(&program.body, true);
    }

    fn format_stmts(&mut self, stmts: &[Stmt], top_level: bool) {
        // The previous statement and the output offset just past its text.
        let mut prev: Option<(&Stmt, usize)> = None;

        for stmt in stmts {
            let comments = self.emit_comments_before(stmt.span.start, prev.is_some());

            if let Some((prev_stmt, _)) = prev {
                let item_gap = top_level
                    && self.config.blank_line_between_items
                    && (is_item(prev_stmt) || is_item(stmt));
                if comments.is_empty() && (item_gap || self.has_blank_line_before(stmt.span.start)) {
                    self.emit_blank_line();
                }
            }
            if !comments.is_empty() && self.has_blank_line_before(stmt.span.start) {
                self.emit_blank_line();
            }

            self.emit_indent();
            let line_start = self.output.len();
            self.format_stmt(stmt);

            // Newlines carry no meaning, so a statement that could be read
            // as a continuation of the previous one needs a `;` before it.
            if let Some((prev_stmt, prev_end)) = prev {
                let continues = self.output[line_start..].starts_with(['(', '-'])
                    && !self.output[..prev_end].ends_with('}');
                if matches!(prev_stmt.kind, StmtKind::Return(None)) || continues {
                    self.output.insert(prev_end, ';');
                }
            }

            let end = self.output.len();
            self.try_emit_trailing_comment(stmt.span.end);
            if !self.output.ends_with('\n') {
                self.emit_newline();
            }
            prev = Some((stmt, end));
        }

        self.consume_trailing_block_comments();
    }

    fn format_block(&mut self, stmts: &[Stmt]) {
        if stmts.is_empty() {
            self.emit(" {}");
            return;
        }
        self.emit(" {");
        self.emit_newline();
        self.indent += 1;
        self.format_stmts(stmts, false);
        self.indent -= 1;
        self.emit_indent();
        self.emit("}");
    }

    fn format_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Var(decl) => self.format_var_decl(decl),
            StmtKind::Function(decl) => self.format_fn_decl(decl),
            StmtKind::Struct(decl) => self.format_struct_decl(decl),
            StmtKind::Enum(decl) => self.format_enum_decl(decl),
            StmtKind::Component(decl) => {
                self.emit_keyword(Keyword::Component);
                self.emit(" ");
                self.emit(&decl.name);
                self.format_block(&decl.body);
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.emit_keyword(Keyword::If);
                self.format_if_tail(condition, then_branch, else_branch.as_deref());
            }
            StmtKind::While { condition, body } => {
                self.emit_keyword(Keyword::While);
                self.emit(" ");
                self.format_expr(condition);
                self.format_block(body);
            }
            StmtKind::For {
                iterator,
                iterable,
                body,
            } => {
                self.emit_keyword(Keyword::For);
                self.emit(" ");
                self.emit(iterator);
                self.emit(" ");
                self.emit_keyword(Keyword::In);
                self.emit(" ");
                self.format_expr(iterable);
                self.format_block(body);
            }
            StmtKind::Return(None) => {
                self.emit_keyword(Keyword::Return);
            }
            StmtKind::Return(Some(expr)) => {
                self.emit_keyword(Keyword::Return);
                self.emit(" ");
                self.format_expr(expr);
            }
            StmtKind::Assign { name, value } => {
                self.emit(name);
                self.emit(" = ");
                self.format_expr(value);
            }
            StmtKind::Print(expr) => {
                self.emit_keyword(Keyword::Print);
                self.emit(" ");
                self.format_expr(expr);
            }
            StmtKind::Import(decl) => self.format_import_decl(decl),
            StmtKind::Export(inner) => {
                self.emit_keyword(Keyword::Export);
                self.emit(" ");
                self.format_stmt(inner);
            }
            StmtKind::TryCatch {
                try_block,
                catch_block,
                error_var,
            } => {
                self.emit_keyword(Keyword::Try);
                self.format_block(try_block);
                self.emit(" ");
                self.emit_keyword(Keyword::Catch);
                self.emit(" (");
                self.emit(error_var);
                self.emit(")");
                self.format_block(catch_block);
            }
            StmtKind::Throw(expr) => {
                self.emit_keyword(Keyword::Throw);
                self.emit(" ");
                self.format_expr(expr);
            }
            StmtKind::Match { target, cases, .. } => self.format_match(target, cases),
            StmtKind::View(view) => self.format_view(view),
            StmtKind::Event { action, .. } => {
                self.emit_keyword(Keyword::Click);
                self.emit(" ");
                self.format_expr(action);
            }
            StmtKind::Attribute { name, value } => self.format_attribute(name, value),
            StmtKind::Expr(expr) => self.format_expr(expr),
        }
    }

    fn format_var_decl(&mut self, decl: &VarDecl) {
        self.emit_keyword(if decl.mutable { Keyword::Var } else { Keyword::Const });
        self.emit(" ");
        self.emit(&decl.name);
        self.format_annotation(decl.type_annotation.as_deref());
        self.emit(" = ");
        self.format_expr(&decl.value);
    }

    fn format_annotation(&mut self, ty: Option<&str>) {
        if let Some(ty) = ty {
            self.emit(": ");
            self.emit(ty);
        }
    }

    fn format_type_params(&mut self, params: Option<&[TypeParam]>) {
        let Some(params) = params else {
            return;
        };
        self.emit("<");
        for (i, tp) in params.iter().enumerate() {
            if i > 0 {
                self.emit(", ");
            }
            self.emit(&tp.name);
            self.format_annotation(tp.constraint.as_deref());
        }
        self.emit(">");
    }

    fn format_fn_decl(&mut self, f: &FnDecl) {
        if f.is_async {
            self.emit_keyword(Keyword::Async);
            self.emit(" ");
        }
        self.emit_keyword(Keyword::Function);
        self.emit(" ");
        self.emit(&f.name);
        self.format_type_params(f.type_params.as_deref());
        self.emit("(");
        for (i, param) in f.params.iter().enumerate() {
            if i > 0 {
                self.emit(", ");
            }
            self.emit(&param.name);
            self.format_annotation(param.type_annotation.as_deref());
        }
        self.emit(")");
        self.format_annotation(f.return_type.as_deref());
        self.format_block(&f.body);
    }

    fn format_struct_decl(&mut self, s: &StructDecl) {
        self.emit_keyword(Keyword::Struct);
        self.emit(" ");
        self.emit(&s.name);
        self.format_type_params(s.type_params.as_deref());

        if s.fields.is_empty() {
            self.emit(" {}");
            return;
        }

        let widths = s.fields.iter().map(|f| f.name.len() + 2 + f.type_annotation.len());
        if self.fits_on_line(widths, self.output.len() - self.line_start()) {
            // Inline style: struct Point { x: Number, y: Number }
            self.emit(" { ");
            for (i, field) in s.fields.iter().enumerate() {
                if i > 0 {
                    self.emit(", ");
                }
                self.format_field(field);
            }
            self.emit(" }");
        } else {
            // Multi-line style: no commas
            self.emit(" {");
            self.emit_newline();
            self.indent += 1;
            for field in &s.fields {
                self.emit_indent();
                self.format_field(field);
                self.emit_newline();
            }
            self.indent -= 1;
            self.emit_indent();
            self.emit("}");
        }
    }

    fn format_field(&mut self, field: &Field) {
        self.emit(&field.name);
        if field.type_annotation != Field::UNTYPED {
            self.emit(": ");
            self.emit(&field.type_annotation);
        }
    }

    fn format_enum_decl(&mut self, e: &EnumDecl) {
        self.emit_keyword(Keyword::Enum);
        self.emit(" ");
        self.emit(&e.name);

        if e.cases.is_empty() {
            self.emit(" {}");
            return;
        }

        let widths = e.cases.iter().map(String::len);
        if self.fits_on_line(widths, self.output.len() - self.line_start()) {
            self.emit(" { ");
            self.emit(&e.cases.join(", "));
            self.emit(" }");
        } else {
            self.emit(" {");
            self.emit_newline();
            self.indent += 1;
            for case in &e.cases {
                self.emit_indent();
                self.emit(case);
                self.emit_newline();
            }
            self.indent -= 1;
            self.emit_indent();
            self.emit("}");
        }
    }

    fn line_start(&self) -> usize {
        self.output.rfind('\n').map_or(0, |i| i + 1)
    }

    fn format_import_decl(&mut self, imp: &ImportDecl) {
        self.emit_keyword(Keyword::Import);
        if imp.specifiers.is_empty() {
            self.emit(" {} ");
        } else {
            self.emit(" { ");
            self.emit(&imp.specifiers.join(", "));
            self.emit(" } ");
        }
        self.emit_keyword(Keyword::From);
        self.emit(" ");
        self.emit(&quote(&imp.source));
    }

    /// Everything after the `if`/`else_if` keyword.
    fn format_if_tail(&mut self, condition: &Expr, then_branch: &[Stmt], else_branch: Option<&[Stmt]>) {
        self.emit(" ");
        self.format_expr(condition);
        self.format_block(then_branch);

        match else_branch {
            Some(
                [Stmt {
                    kind:
                        StmtKind::If {
                            condition,
                            then_branch,
                            else_branch,
                        },
                    ..
                }],
            ) => {
                self.emit(" ");
                self.emit_keyword(Keyword::ElseIf);
                self.format_if_tail(condition, then_branch, else_branch.as_deref());
            }
            Some(stmts) => {
                self.emit(" ");
                self.emit_keyword(Keyword::Else);
                self.format_block(stmts);
            }
            None => {}
        }
    }

    fn format_match(&mut self, target: &Expr, cases: &[MatchCase]) {
        self.emit_keyword(Keyword::Match);
        self.emit(" ");
        self.format_expr(target);
        if cases.is_empty() {
            self.emit(" {}");
            return;
        }
        self.emit(" {");
        self.emit_newline();
        self.indent += 1;
        for case in cases {
            self.emit_comments_before(case.pattern.span.start, false);
            self.emit_indent();
            self.format_expr(&case.pattern);
            self.format_block(&case.body);
            self.emit_newline();
        }
        self.indent -= 1;
        self.emit_indent();
        self.emit("}");
    }

    /// Views always print their tag and a block, so the next statement can
    /// never be taken for shorthand content.
    fn format_view(&mut self, view: &UiView) {
        self.emit_keyword(Keyword::Render);
        self.emit(" ");
        self.emit(&quote(&view.tag_name));

        if view.props.is_empty() && view.children.is_empty() {
            self.emit(" {}");
            return;
        }

        self.emit(" {");
        self.emit_newline();
        self.indent += 1;
        for (name, value) in &view.props {
            self.emit_indent();
            match &value.kind {
                ExprKind::Ident { .. } if name == "click" => {
                    self.emit_keyword(Keyword::Click);
                    self.emit(" ");
                    self.format_expr(value);
                }
                _ => self.format_attribute(name, value),
            }
            self.emit_newline();
        }
        self.format_stmts(&view.children, false);
        self.indent -= 1;
        self.emit_indent();
        self.emit("}");
    }

    fn format_attribute(&mut self, name: &str, value: &Expr) {
        if name == "text" {
            self.emit_keyword(Keyword::Text);
        } else {
            self.emit_keyword(Keyword::Attr);
            self.emit(" ");
            self.emit(&quote(name));
        }
        self.emit(" ");
        self.format_expr(value);
    }

    // --- Expressions ---

    fn format_expr(&mut self, expr: &Expr) {
        self.format_expr_inner(expr, 0);
    }

    /// `min_prec` is the weakest binding the surrounding context accepts
    /// without parentheses; zero means a complete expression position.
    fn format_expr_inner(&mut self, expr: &Expr, min_prec: u8) {
        match &expr.kind {
            ExprKind::Literal(Literal::Number(n)) => {
                self.emit(&n.to_string());
            }
            ExprKind::Literal(Literal::String(s)) => {
                self.emit(&quote(s));
            }
            ExprKind::Literal(Literal::Bool(b)) => {
                self.emit_keyword(if *b { Keyword::True } else { Keyword::False });
            }
            ExprKind::Literal(Literal::Null) => {
                self.emit_keyword(Keyword::Null);
            }
            ExprKind::Ident { name, universal_name } => {
                let text = self.ident_text(name, universal_name.as_deref());
                self.emit(&text);
            }
            ExprKind::Binary { left, op, right } => {
                let prec = op.precedence();
                let need_parens = prec < min_prec;

                if need_parens {
                    self.emit("(");
                }

                self.format_expr_inner(left, prec);
                self.emit(" ");
                self.emit(op.as_str());
                self.emit(" ");
                self.format_expr_inner(right, prec + 1);

                if need_parens {
                    self.emit(")");
                }
            }
            ExprKind::Unary { op, operand } => {
                let need_parens = UNARY_PREC < min_prec;
                if need_parens {
                    self.emit("(");
                }
                self.emit(op.as_str());
                self.format_expr_inner(operand, UNARY_PREC);
                if need_parens {
                    self.emit(")");
                }
            }
            ExprKind::Call { callee, args } => {
                self.format_expr_inner(callee, POSTFIX_PREC);
                self.emit("(");
                self.format_expr_list(args);
                self.emit(")");
            }
            ExprKind::Member { object, property } => {
                self.format_expr_inner(object, POSTFIX_PREC);
                self.emit(".");
                self.emit(property);
            }
            ExprKind::Array(items) => {
                self.emit("[");
                self.format_expr_list(items);
                self.emit("]");
            }
            // `await` takes everything to its right, so it only goes bare
            // where a complete expression is expected.
            ExprKind::Await(inner) => {
                let need_parens = min_prec > 0;
                if need_parens {
                    self.emit("(");
                }
                self.emit_keyword(Keyword::Await);
                self.emit(" ");
                self.format_expr(inner);
                if need_parens {
                    self.emit(")");
                }
            }
        }
    }

    fn format_expr_list(&mut self, items: &[Expr]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.emit(", ");
            }
            self.format_expr(item);
        }
    }

    /// Builtins print in the target locale's spelling. Sovereign paths map
    /// segment by segment; segments without a spelling keep their universal
    /// name.
    fn ident_text(&self, name: &str, universal: Option<&str>) -> String {
        match universal {
            Some(path) if path.starts_with('#') => {
                let segments: Vec<&str> = path[1..]
                    .split('.')
                    .map(|segment| self.locale.builtin_spelling(segment).unwrap_or(segment))
                    .collect();
                format!("#{}", segments.join("."))
            }
            Some(universal) => self
                .locale
                .builtin_spelling(universal)
                .unwrap_or(universal)
                .to_string(),
            None => name.to_string(),
        }
    }
}

/// Declarations that get a blank line around them at the top level.
fn is_item(stmt: &Stmt) -> bool {
    match &stmt.kind {
        StmtKind::Export(inner) => is_item(inner),
        StmtKind::Function(_) | StmtKind::Struct(_) | StmtKind::Enum(_) | StmtKind::Component(_) => true,
        _ => false,
    }
}

/// Strings have no escapes: single quotes are used when the text contains
/// a double quote.
fn quote(s: &str) -> String {
    if s.contains('"') && !s.contains('\'') {
        format!("'{s}'")
    } else {
        format!("\"{s}\"")
    }
}
