use std::{any::Any, fmt::Debug};

use crate::Span;

use super::{
    declarations::{
        AstEnumDeclaration, AstFunctionDeclaration, AstImportDeclaration, AstStructDeclaration,
    },
    statements::AstStatementDeclaration,
    types::AstTypeDeclaration,
};

/// Node Trait
///
/// Implemented by every AST node so consumers can walk the tree without
/// matching on each concrete type.
pub trait Node: Debug {
    /// Returns the source span of the node.
    fn get_span(&self) -> &Span;
    /// Direct children, in source order.
    fn children(&self) -> Vec<&dyn Node>;
    /// Type conversion purposes - used with `.downcast_ref<T>()`
    fn as_any(&self) -> &dyn Any;
}

/// Visits `node` and all of its descendants, parents before children.
pub fn walk<'a>(node: &'a dyn Node, visit: &mut dyn FnMut(&'a dyn Node)) {
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        visit(current);
        let children = current.children();
        stack.extend(children.into_iter().rev());
    }
}

/// `package main` / `package firstName.subName`
#[derive(Debug, Clone, PartialEq)]
pub struct AstModule {
    /// Dotted form, e.g. `firstName.subName`.
    pub name: String,
    pub names: Vec<String>,
    pub span: Span,
}

impl Node for AstModule {
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

/// Root of the tree for one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct AstFile {
    pub module: Option<AstModule>,
    pub imports: Vec<AstImportDeclaration>,
    pub blocks: Vec<AstBlockDeclaration>,
    pub path: String,
    /// Final component of `path`.
    pub path_base: String,
    pub span: Span,
}

impl AstFile {
    pub fn functions(&self) -> impl Iterator<Item = &AstFunctionDeclaration> {
        self.blocks.iter().filter_map(|block| match block {
            AstBlockDeclaration::Function(function) => Some(function),
            _ => None,
        })
    }
}

impl Node for AstFile {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn children(&self) -> Vec<&dyn Node> {
        let mut children: Vec<&dyn Node> = vec![];
        if let Some(module) = &self.module {
            children.push(module);
        }
        children.extend(self.imports.iter().map(|import| import as &dyn Node));
        children.extend(self.blocks.iter().map(|block| block as &dyn Node));
        children
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A top-level item.
#[derive(Debug, Clone, PartialEq)]
pub enum AstBlockDeclaration {
    Function(AstFunctionDeclaration),
    Struct(AstStructDeclaration),
    Enum(AstEnumDeclaration),
    Type(AstTypeDeclaration),
    Statement(AstStatementDeclaration),
}

impl AstBlockDeclaration {
    fn inner(&self) -> &dyn Node {
        match self {
            AstBlockDeclaration::Function(function) => function,
            AstBlockDeclaration::Struct(structure) => structure,
            AstBlockDeclaration::Enum(enumerate) => enumerate,
            AstBlockDeclaration::Type(type_) => type_,
            AstBlockDeclaration::Statement(statement) => statement,
        }
    }
}

impl Node for AstBlockDeclaration {
    fn get_span(&self) -> &Span {
        self.inner().get_span()
    }
    fn children(&self) -> Vec<&dyn Node> {
        vec![self.inner()]
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A brace-delimited statement list.
#[derive(Debug, Clone, PartialEq)]
pub struct AstBody {
    pub statements: Vec<AstStatementDeclaration>,
    pub span: Span,
}

impl AstBody {
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AstStatementDeclaration> {
        self.statements.iter()
    }
}

impl Node for AstBody {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn children(&self) -> Vec<&dyn Node> {
        self.statements
            .iter()
            .map(|statement| statement as &dyn Node)
            .collect()
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}
