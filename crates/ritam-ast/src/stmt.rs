// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statement AST nodes.

use std::collections::BTreeMap;

use crate::decl::{ComponentDecl, EnumDecl, FnDecl, ImportDecl, StructDecl, VarDecl};
use crate::expr::Expr;
use crate::Span;

/// The root of a parsed source file.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// A statement in the AST.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StmtKind {
    Var(VarDecl),
    Function(FnDecl),
    Struct(StructDecl),
    Enum(EnumDecl),
    Component(ComponentDecl),
    /// If statement. An `else_if` chain is stored as an `else_branch`
    /// holding exactly one nested `If`.
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
    },
    For {
        iterator: String,
        iterable: Expr,
        body: Vec<Stmt>,
    },
    Return(Option<Expr>),
    /// `name = value`
    Assign {
        name: String,
        value: Expr,
    },
    Print(Expr),
    Import(ImportDecl),
    /// Exported declaration; see [`StmtKind::is_exportable`].
    Export(Box<Stmt>),
    TryCatch {
        try_block: Vec<Stmt>,
        catch_block: Vec<Stmt>,
        error_var: String,
    },
    Throw(Expr),
    /// Match over a target. Cases are tried in order; there is no
    /// exhaustiveness analysis, so `is_exhaustive` is always true.
    Match {
        target: Expr,
        cases: Vec<MatchCase>,
        is_exhaustive: bool,
    },
    View(UiView),
    /// `click handler` inside a view block. `action` is always an
    /// `ExprKind::Ident` naming the handler.
    Event {
        event_name: String,
        action: Expr,
    },
    /// `attr "name" value` or `text value` inside a view block.
    Attribute {
        name: String,
        value: Expr,
    },
    /// Expression statement
    Expr(Expr),
}

impl StmtKind {
    /// Whether `export` may wrap this statement.
    pub fn is_exportable(&self) -> bool {
        matches!(
            self,
            StmtKind::Var(_)
                | StmtKind::Function(_)
                | StmtKind::Struct(_)
                | StmtKind::Enum(_)
                | StmtKind::Component(_)
        )
    }

    /// Name of the node kind, for messages.
    pub fn describe(&self) -> &'static str {
        match self {
            StmtKind::Var(_) => "VarDeclaration",
            StmtKind::Function(_) => "FunctionDeclaration",
            StmtKind::Struct(_) => "StructDeclaration",
            StmtKind::Enum(_) => "EnumDeclaration",
            StmtKind::Component(_) => "ComponentDeclaration",
            StmtKind::If { .. } => "IfStatement",
            StmtKind::While { .. } => "WhileStatement",
            StmtKind::For { .. } => "ForStatement",
            StmtKind::Return(_) => "ReturnStatement",
            StmtKind::Assign { .. } => "AssignmentStatement",
            StmtKind::Print(_) => "PrintStatement",
            StmtKind::Import(_) => "ImportDeclaration",
            StmtKind::Export(_) => "ExportDeclaration",
            StmtKind::TryCatch { .. } => "TryCatchStatement",
            StmtKind::Throw(_) => "ThrowStatement",
            StmtKind::Match { .. } => "MatchExpression",
            StmtKind::View(_) => "UIView",
            StmtKind::Event { .. } => "EventStatement",
            StmtKind::Attribute { .. } => "AttributeStatement",
            StmtKind::Expr(_) => "Expression",
        }
    }
}

/// A case in a match statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchCase {
    pub pattern: Expr,
    pub body: Vec<Stmt>,
}

/// A rendered UI element.
///
/// Attribute and event statements written inside the element's block are
/// hoisted into `props`; all other statements stay in `children`, in source
/// order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UiView {
    pub kind: UiKind,
    pub tag_name: String,
    pub props: BTreeMap<String, Expr>,
    pub children: Vec<Stmt>,
}

/// The UI element families backends know how to map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UiKind {
    Text,
    Button,
    Input,
    Container,
}

impl UiKind {
    /// Tag used when `render` is written without a tag name.
    pub const DEFAULT_TAG: &'static str = "div";

    /// Classify a tag name. Unknown tags are containers.
    pub fn from_tag(tag: &str) -> UiKind {
        match tag {
            "h1" | "p" | "span" | "text" | "Text" => UiKind::Text,
            "button" | "Button" => UiKind::Button,
            "input" | "Input" | "TextField" => UiKind::Input,
            _ => UiKind::Container,
        }
    }
}
