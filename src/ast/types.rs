//! Type references and `type` declarations.
//!
//! `AstData` is the parsed form of a type annotation such as `i32`,
//! `pubName.publicTypeName` or `&Node<T>`. Nothing here is resolved; the
//! type checker decides what the names mean.

use std::any::Any;

use crate::Span;

use super::ast::Node;

/// One segment of a dotted type name.
#[derive(Debug, Clone, PartialEq)]
pub struct AstDataItem {
    pub name: String,
    pub span: Span,
}

impl Node for AstDataItem {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn children(&self) -> Vec<&dyn Node> {
        vec![]
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A type reference: `['&'] name{.name} ['<' T {, T} '>']`.
#[derive(Debug, Clone, PartialEq)]
pub struct AstData {
    pub names: Vec<AstDataItem>,
    /// Span of the leading `&`, if any.
    pub address: Option<Span>,
    pub generics: Vec<String>,
    pub pos_generic: Option<Span>,
    pub span: Span,
}

impl AstData {
    pub fn has_address(&self) -> bool {
        self.address.is_some()
    }

    pub fn has_generic(&self) -> bool {
        !self.generics.is_empty()
    }

    /// The dotted name, e.g. `pubName.publicTypeName`.
    pub fn name(&self) -> String {
        self.names
            .iter()
            .map(|item| item.name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl Node for AstData {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn children(&self) -> Vec<&dyn Node> {
        self.names.iter().map(|item| item as &dyn Node).collect()
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// One alternative of a sum type.
#[derive(Debug, Clone, PartialEq)]
pub struct AstTypeSumItem {
    pub data: AstData,
    pub span: Span,
}

impl Node for AstTypeSumItem {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn children(&self) -> Vec<&dyn Node> {
        vec![&self.data as &dyn Node]
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A callable signature: `fn (string) string`, or `fn Callback` naming a
/// signature declared elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct AstTypeFunction {
    pub params: Vec<AstData>,
    pub return_type: Option<AstData>,
    /// Set for the `fn Callback` form; `params` is then empty.
    pub signature: Option<AstData>,
    pub span: Span,
}

impl AstTypeFunction {
    pub fn has_return(&self) -> bool {
        self.return_type.is_some()
    }

    pub fn is_named(&self) -> bool {
        self.signature.is_some()
    }
}

impl Node for AstTypeFunction {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn children(&self) -> Vec<&dyn Node> {
        let mut children: Vec<&dyn Node> =
            self.params.iter().map(|param| param as &dyn Node).collect();
        if let Some(signature) = &self.signature {
            children.push(signature);
        }
        if let Some(return_type) = &self.return_type {
            children.push(return_type);
        }
        children
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AstTypeKind {
    /// `type World = Mars | Moon | Venus`
    Sum(Vec<AstTypeSumItem>),
    /// `type Celsius = f64`
    Alias(AstData),
    /// `type Filter = fn (string) string` / `type Handler = fn Callback`
    Function(AstTypeFunction),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstTypeDeclaration {
    pub name: String,
    pub is_public: bool,
    pub kind: AstTypeKind,
    pub pos_name: Span,
    pub span: Span,
}

impl Node for AstTypeDeclaration {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn children(&self) -> Vec<&dyn Node> {
        match &self.kind {
            AstTypeKind::Sum(items) => items.iter().map(|item| item as &dyn Node).collect(),
            AstTypeKind::Alias(data) => vec![data as &dyn Node],
            AstTypeKind::Function(function) => vec![function as &dyn Node],
        }
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}
