use std::any::Any;

use crate::Span;

use super::{ast::{AstBody, Node}, expressions::AstExprDeclaration, types::AstData};

// IMPORTS

/// One segment of a dotted import path.
#[derive(Debug, Clone, PartialEq)]
pub struct AstImportName {
    pub name: String,
    pub span: Span,
}

impl Node for AstImportName {
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

/// `childLib.functionName as a_fn` inside an import's braces.
#[derive(Debug, Clone, PartialEq)]
pub struct AstImportSymbol {
    pub names: Vec<AstImportName>,
    pub alias: Option<String>,
    pub pos_alias: Option<Span>,
    pub span: Span,
}

impl AstImportSymbol {
    pub fn has_alias(&self) -> bool {
        self.alias.is_some()
    }
}

impl Node for AstImportSymbol {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn children(&self) -> Vec<&dyn Node> {
        self.names.iter().map(|name| name as &dyn Node).collect()
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Import Declaration
///
/// ```text
/// import math                     # math.sin()
/// import math { sin, cos }        # sin(), cos()
/// import parentLib.childLib as pc # pc.functionName()
/// ```
///
/// A symbol list and a whole-import alias never appear together.
#[derive(Debug, Clone, PartialEq)]
pub struct AstImportDeclaration {
    pub names: Vec<AstImportName>,
    pub symbols: Vec<AstImportSymbol>,
    pub alias: Option<String>,
    pub pos_names: Span,
    pub pos_symbols: Option<Span>,
    pub pos_alias: Option<Span>,
    pub span: Span,
}

impl AstImportDeclaration {
    /// The dotted module path, e.g. `parentLib.childLib`.
    pub fn path(&self) -> String {
        self.names
            .iter()
            .map(|name| name.name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn has_alias(&self) -> bool {
        self.alias.is_some()
    }
}

impl Node for AstImportDeclaration {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn children(&self) -> Vec<&dyn Node> {
        let mut children: Vec<&dyn Node> =
            self.names.iter().map(|name| name as &dyn Node).collect();
        children.extend(self.symbols.iter().map(|symbol| symbol as &dyn Node));
        children
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ATTRIBUTES

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AstAttributeType {
    /// `[main]`
    Identifier,
    /// `[deprecated: "use other"]`
    Key,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstAttributeDeclaration {
    pub kind: AstAttributeType,
    pub name: String,
    pub value: Option<String>,
    pub span: Span,
}

impl AstAttributeDeclaration {
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }
}

impl Node for AstAttributeDeclaration {
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

// FUNCTIONS

/// `mut t MyTime`
#[derive(Debug, Clone, PartialEq)]
pub struct AstParam {
    pub name: String,
    pub is_mut: bool,
    pub data: AstData,
    pub span: Span,
}

impl Node for AstParam {
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

/// Function Declaration
///
/// `[attr] pub fn (mut t MyTime) century() int { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct AstFunctionDeclaration {
    pub name: String,
    pub receiver: Option<AstParam>,
    pub params: Vec<AstParam>,
    pub return_type: Option<AstData>,
    pub body: AstBody,
    pub attributes: Vec<AstAttributeDeclaration>,

    pub is_main: bool,
    pub is_public: bool,
    pub is_noreturn: bool,
    pub is_deprecated: bool,

    pub pos_name: Span,
    pub span: Span,
}

impl AstFunctionDeclaration {
    pub fn has_return(&self) -> bool {
        self.return_type.is_some()
    }

    pub fn is_method(&self) -> bool {
        self.receiver.is_some()
    }
}

impl Node for AstFunctionDeclaration {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn children(&self) -> Vec<&dyn Node> {
        let mut children: Vec<&dyn Node> = self
            .attributes
            .iter()
            .map(|attribute| attribute as &dyn Node)
            .collect();
        if let Some(receiver) = &self.receiver {
            children.push(receiver);
        }
        children.extend(self.params.iter().map(|param| param as &dyn Node));
        if let Some(return_type) = &self.return_type {
            children.push(return_type);
        }
        children.push(&self.body);
        children
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

// STRUCTS

#[derive(Debug, Clone, PartialEq)]
pub struct AstStructField {
    pub name: String,
    pub data: AstData,
    pub is_mut: bool,
    pub is_public: bool,
    pub is_global: bool,
    pub value: Option<AstExprDeclaration>,
    pub attributes: Vec<AstAttributeDeclaration>,
    pub span: Span,
}

impl AstStructField {
    pub fn has_default(&self) -> bool {
        self.value.is_some()
    }
}

impl Node for AstStructField {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn children(&self) -> Vec<&dyn Node> {
        let mut children: Vec<&dyn Node> = self
            .attributes
            .iter()
            .map(|attribute| attribute as &dyn Node)
            .collect();
        children.push(&self.data);
        if let Some(value) = &self.value {
            children.push(value);
        }
        children
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Struct Declaration
///
/// ```text
/// struct Point {
///     x int
/// pub mut:
///     y int = 0
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AstStructDeclaration {
    pub name: String,
    pub is_public: bool,
    pub fields: Vec<AstStructField>,
    pub attributes: Vec<AstAttributeDeclaration>,
    pub pos_name: Span,
    pub span: Span,
}

impl Node for AstStructDeclaration {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn children(&self) -> Vec<&dyn Node> {
        let mut children: Vec<&dyn Node> = self
            .attributes
            .iter()
            .map(|attribute| attribute as &dyn Node)
            .collect();
        children.extend(self.fields.iter().map(|field| field as &dyn Node));
        children
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ENUMS

#[derive(Debug, Clone, PartialEq)]
pub struct AstEnumField {
    pub name: String,
    pub value: Option<AstExprDeclaration>,
    pub attributes: Vec<AstAttributeDeclaration>,
    pub span: Span,
}

impl AstEnumField {
    pub fn has_default(&self) -> bool {
        self.value.is_some()
    }
}

impl Node for AstEnumField {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn children(&self) -> Vec<&dyn Node> {
        let mut children: Vec<&dyn Node> = self
            .attributes
            .iter()
            .map(|attribute| attribute as &dyn Node)
            .collect();
        if let Some(value) = &self.value {
            children.push(value);
        }
        children
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstEnumDeclaration {
    pub name: String,
    pub is_public: bool,
    pub fields: Vec<AstEnumField>,
    pub attributes: Vec<AstAttributeDeclaration>,
    pub pos_name: Span,
    pub span: Span,
}

impl Node for AstEnumDeclaration {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn children(&self) -> Vec<&dyn Node> {
        let mut children: Vec<&dyn Node> = self
            .attributes
            .iter()
            .map(|attribute| attribute as &dyn Node)
            .collect();
        children.extend(self.fields.iter().map(|field| field as &dyn Node));
        children
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}
