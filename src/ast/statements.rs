use std::any::Any;

use crate::Span;

use super::{
    ast::{AstBody, Node},
    expressions::{AstExprDeclaration, AstOperatorType},
    types::AstData,
};

/// One `if <expr> { }` or `else if <expr> { }` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct AstIfClause {
    pub expr: AstExprDeclaration,
    pub body: AstBody,
    pub span: Span,
}

impl Node for AstIfClause {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn children(&self) -> Vec<&dyn Node> {
        vec![&self.expr as &dyn Node, &self.body as &dyn Node]
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// `if <expr> { } else if <expr> { } else { }`
///
/// The chain is stored flat: `clauses[0]` is the `if`, the rest are the
/// `else if` clauses in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct AstStatementIf {
    pub clauses: Vec<AstIfClause>,
    pub otherwise: Option<AstBody>,
    pub span: Span,
}

impl AstStatementIf {
    pub fn has_else(&self) -> bool {
        self.otherwise.is_some()
    }

    pub fn has_else_if(&self) -> bool {
        self.clauses.len() > 1
    }
}

impl Node for AstStatementIf {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn children(&self) -> Vec<&dyn Node> {
        let mut children: Vec<&dyn Node> = self
            .clauses
            .iter()
            .map(|clause| clause as &dyn Node)
            .collect();
        if let Some(body) = &self.otherwise {
            children.push(body);
        }
        children
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AstForKind {
    /// `for { }`
    Infinite,
    /// `for i < 10 { }`
    Condition(AstExprDeclaration),
    /// `for item in items { }` / `for i, item in items { }`
    Each {
        key: Option<String>,
        value: String,
        iterable: AstExprDeclaration,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstStatementFor {
    pub kind: AstForKind,
    pub body: AstBody,
}

/// `1, 2 { }` inside a `match`.
#[derive(Debug, Clone, PartialEq)]
pub struct AstMatchArm {
    pub patterns: Vec<AstExprDeclaration>,
    pub body: AstBody,
    pub span: Span,
}

impl Node for AstMatchArm {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn children(&self) -> Vec<&dyn Node> {
        let mut children: Vec<&dyn Node> = self
            .patterns
            .iter()
            .map(|pattern| pattern as &dyn Node)
            .collect();
        children.push(&self.body);
        children
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstStatementMatch {
    pub expr: AstExprDeclaration,
    pub arms: Vec<AstMatchArm>,
    pub otherwise: Option<AstBody>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstStatementRet {
    pub value: Option<AstExprDeclaration>,
}

/// `target op value` where `op` is `=` or a compound assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct AstStatementAssign {
    pub target: AstExprDeclaration,
    pub op: AstOperatorType,
    pub value: AstExprDeclaration,
}

/// `const name [type] = value`
#[derive(Debug, Clone, PartialEq)]
pub struct AstStatementAssignConst {
    pub name: String,
    pub data: Option<AstData>,
    pub value: AstExprDeclaration,
}

/// `[mut] name := value`
#[derive(Debug, Clone, PartialEq)]
pub struct AstStatementVariable {
    pub name: String,
    pub is_mut: bool,
    pub value: AstExprDeclaration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AstStatementKind {
    If(AstStatementIf),
    For(AstStatementFor),
    Match(AstStatementMatch),
    Return(AstStatementRet),
    Assign(AstStatementAssign),
    AssignConst(AstStatementAssignConst),
    Variable(AstStatementVariable),
    Expression(AstExprDeclaration),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstStatementDeclaration {
    pub kind: AstStatementKind,
    pub span: Span,
}

impl Node for AstStatementDeclaration {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn children(&self) -> Vec<&dyn Node> {
        match &self.kind {
            AstStatementKind::If(clauses) => vec![clauses as &dyn Node],
            AstStatementKind::For(foreach) => {
                let mut children: Vec<&dyn Node> = match &foreach.kind {
                    AstForKind::Infinite => vec![],
                    AstForKind::Condition(condition) => vec![condition as &dyn Node],
                    AstForKind::Each { iterable, .. } => vec![iterable as &dyn Node],
                };
                children.push(&foreach.body);
                children
            }
            AstStatementKind::Match(matching) => {
                let mut children: Vec<&dyn Node> = vec![&matching.expr as &dyn Node];
                children.extend(matching.arms.iter().map(|arm| arm as &dyn Node));
                if let Some(otherwise) = &matching.otherwise {
                    children.push(otherwise);
                }
                children
            }
            AstStatementKind::Return(ret) => match &ret.value {
                Some(value) => vec![value as &dyn Node],
                None => vec![],
            },
            AstStatementKind::Assign(assign) => {
                vec![&assign.target as &dyn Node, &assign.value as &dyn Node]
            }
            AstStatementKind::AssignConst(assign_const) => {
                let mut children: Vec<&dyn Node> = vec![];
                if let Some(data) = &assign_const.data {
                    children.push(data);
                }
                children.push(&assign_const.value);
                children
            }
            AstStatementKind::Variable(variable) => vec![&variable.value as &dyn Node],
            AstStatementKind::Expression(expr) => vec![expr as &dyn Node],
        }
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}
