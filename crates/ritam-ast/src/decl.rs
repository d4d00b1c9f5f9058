// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Declaration AST nodes.
//!
//! Declarations are statements (they may appear in any block), but they are
//! the only statements an `export` may wrap.

use crate::expr::Expr;
use crate::stmt::Stmt;

/// A `var` or `const` binding.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarDecl {
    pub name: String,
    pub value: Expr,
    /// True for `var`, false for `const`.
    pub mutable: bool,
    pub type_annotation: Option<String>,
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FnDecl {
    pub name: String,
    /// `None` when no `<...>` list was written.
    pub type_params: Option<Vec<TypeParam>>,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
    pub is_async: bool,
    pub return_type: Option<String>,
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Param {
    pub name: String,
    pub type_annotation: Option<String>,
}

/// A type parameter (for generics). Constraints are recorded, not checked.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeParam {
    pub name: String,
    pub constraint: Option<String>,
}

/// A struct declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructDecl {
    pub name: String,
    pub type_params: Option<Vec<TypeParam>>,
    pub fields: Vec<Field>,
}

/// A struct field. Fields written without a type are `any`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    pub name: String,
    pub type_annotation: String,
}

impl Field {
    pub const UNTYPED: &'static str = "any";
}

/// An enum declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumDecl {
    pub name: String,
    pub cases: Vec<String>,
}

/// A UI-bearing component scope.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentDecl {
    pub name: String,
    pub body: Vec<Stmt>,
}

/// `import { a, b } from "source"`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImportDecl {
    pub specifiers: Vec<String>,
    pub source: String,
}
