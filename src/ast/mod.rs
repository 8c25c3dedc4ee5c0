/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: the `Node` trait, the file root and top-level items
/// - declarations: imports, attributes, functions, structs and enums
/// - expressions: operators, literals and expression nodes
/// - statements: statement kinds and their payloads
/// - types: type references and `type` declarations
pub mod ast;
pub mod declarations;
pub mod expressions;
pub mod statements;
pub mod types;
