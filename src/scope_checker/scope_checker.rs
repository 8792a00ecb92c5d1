use std::collections::HashSet;

use tracing::debug;

use crate::{
    ast::{
        ast::{Expr, Stmt},
        declarations::FnDecl,
        expressions::PostfixOperation,
        statements::WhenBody,
    },
    errors::errors::{Error, ErrorImpl},
    symbols::tree::{NodeId, SymbolKind, SymbolTree, SymbolValue},
    Position,
};

/// Names visible in one lexical block.
#[derive(Debug, Default)]
pub struct Scope {
    names: HashSet<String>,
    in_loop: bool,
}

impl Scope {
    pub fn new(in_loop: bool) -> Self {
        Scope {
            names: HashSet::new(),
            in_loop,
        }
    }

    pub fn declare(&mut self, name: &str) {
        self.names.insert(name.to_string());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

#[derive(Debug, Default)]
pub struct ScopeStack {
    frames: Vec<Scope>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, scope: Scope) {
        self.frames.push(scope);
    }

    /// Opens a frame that inherits the loop flag of the current one.
    pub fn push_block(&mut self) {
        let in_loop = self.in_loop();
        self.push(Scope::new(in_loop));
    }

    pub fn pop(&mut self) -> Option<Scope> {
        self.frames.pop()
    }

    pub fn declare(&mut self, name: &str) {
        if let Some(frame) = self.frames.last_mut() {
            frame.declare(name);
        }
    }

    /// Searches from the innermost frame outwards.
    pub fn contains(&self, name: &str) -> bool {
        self.frames.iter().rev().any(|frame| frame.contains(name))
    }

    pub fn in_loop(&self) -> bool {
        self.frames.last().is_some_and(|frame| frame.in_loop)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

/// Checks that every name used in a function body was declared in an
/// enclosing block at or before its use, and that `break`/`continue` only
/// appear inside loops.
pub struct ScopeChecker<'a> {
    tree: &'a SymbolTree,
    func: &'a FnDecl,
    module: NodeId,
    scopes: ScopeStack,
}

impl<'a> ScopeChecker<'a> {
    pub fn new(tree: &'a SymbolTree, func: &'a FnDecl) -> Self {
        ScopeChecker {
            tree,
            func,
            module: tree.root(),
            scopes: ScopeStack::new(),
        }
    }

    /// Module the function was registered under, used for qualified names.
    pub fn with_module(mut self, module: NodeId) -> Self {
        self.module = module;
        self
    }

    pub fn check(mut self) -> Result<(), Error> {
        let func = self.func;

        let base = self.base_scope();
        self.scopes.push(base);
        self.scopes.push(Scope::new(false));

        self.check_block(&func.body)?;

        self.scopes.pop();
        self.scopes.pop();

        debug!(function = %func.name, "scope checked");
        Ok(())
    }

    /// Free functions and enums of every module, built-in functions, the
    /// parameters, and `this` for methods. Methods are reached through their
    /// receiver.
    fn base_scope(&self) -> Scope {
        let mut scope = Scope::new(false);

        for (_, node) in self.tree.iter() {
            let visible = match node.kind {
                SymbolKind::Function | SymbolKind::Enum => {
                    node.parent.is_some_and(|parent| self.is_module(parent))
                }
                SymbolKind::Virtual => {
                    node.value == SymbolValue::Virtual(SymbolKind::Function)
                }
                _ => false,
            };
            if visible {
                scope.declare(&node.segment);
            }
        }

        for param in &self.func.parameters {
            scope.declare(&param.name);
        }

        if self.func.name.parts.len() > 1 {
            scope.declare("this");
        }

        scope
    }

    fn check_block(&mut self, body: &[Stmt]) -> Result<(), Error> {
        for stmt in body {
            self.check_stmt(stmt)?;
        }
        Ok(())
    }

    fn check_nested(&mut self, body: &[Stmt]) -> Result<(), Error> {
        self.scopes.push_block();
        let result = self.check_block(body);
        self.scopes.pop();
        result
    }

    fn check_stmt(&mut self, stmt: &Stmt) -> Result<(), Error> {
        match stmt {
            Stmt::VarDecl(var) => {
                self.check_expr(&var.initializer)?;
                self.scopes.declare(&var.name);
            }
            Stmt::Assignment(assignment) => {
                self.check_expr(&assignment.target)?;
                self.check_expr(&assignment.value)?;
            }
            Stmt::Expression(stmt) => self.check_expr(&stmt.expression)?,
            Stmt::Break(stmt) => self.check_loop_control("break", &stmt.span.start)?,
            Stmt::Continue(stmt) => self.check_loop_control("continue", &stmt.span.start)?,
            Stmt::Loop(loop_stmt) => {
                self.check_expr(&loop_stmt.condition)?;

                self.scopes.push(Scope::new(true));
                let result = self.check_block(&loop_stmt.body);
                self.scopes.pop();
                result?;
            }
            Stmt::If(if_stmt) => {
                self.check_expr(&if_stmt.if_arm.condition)?;
                self.check_nested(&if_stmt.if_arm.body)?;

                for arm in &if_stmt.else_ifs {
                    self.check_expr(&arm.condition)?;
                    self.check_nested(&arm.body)?;
                }

                self.check_nested(&if_stmt.else_body)?;
            }
            Stmt::Return(ret) => {
                if let Some(value) = &ret.value {
                    self.check_expr(value)?;
                }
            }
            Stmt::When(when) => {
                self.check_expr(&when.subject)?;

                for arm in &when.arms {
                    self.check_expr(&arm.condition)?;
                    self.check_when_body(&arm.body)?;
                }

                if let Some(body) = &when.else_arm {
                    self.check_when_body(body)?;
                }
            }
        }
        Ok(())
    }

    fn check_when_body(&mut self, body: &WhenBody) -> Result<(), Error> {
        match body {
            WhenBody::Block(block) => self.check_nested(block),
            WhenBody::Expr(expr) => {
                self.scopes.push_block();
                let result = self.check_expr(expr);
                self.scopes.pop();
                result
            }
        }
    }

    fn check_loop_control(&self, keyword: &str, position: &Position) -> Result<(), Error> {
        if self.scopes.in_loop() {
            return Ok(());
        }

        Err(Error::new(
            ErrorImpl::ControlOutsideLoop {
                keyword: keyword.to_string(),
            },
            position.clone(),
        ))
    }

    fn check_expr(&self, expr: &Expr) -> Result<(), Error> {
        match expr {
            Expr::Symbol(symbol) => {
                if self.scopes.contains(&symbol.value) {
                    Ok(())
                } else {
                    Err(self.not_declared(&symbol.value, &symbol.span.start))
                }
            }
            Expr::GenericName(name) => {
                let first = &name.parts[0];
                if self.scopes.contains(&first.name) || self.is_declared_symbol(&first.name) {
                    Ok(())
                } else {
                    Err(self.not_declared(&first.name, &first.span.start))
                }
            }
            Expr::Binary(binary) => {
                self.check_expr(&binary.left)?;
                self.check_expr(&binary.right)
            }
            Expr::Negate(negate) => self.check_expr(&negate.value),
            Expr::Postfix(postfix) => {
                self.check_expr(&postfix.left)?;
                match &postfix.operation {
                    PostfixOperation::Call(args) => {
                        args.iter().try_for_each(|arg| self.check_expr(arg))
                    }
                    PostfixOperation::Index(index) => self.check_expr(index),
                    PostfixOperation::Member(_) => Ok(()),
                }
            }
            Expr::StructLiteral(literal) => literal
                .fields
                .iter()
                .try_for_each(|field| self.check_expr(&field.value)),
            Expr::ArrayLiteral(array) => array
                .values
                .iter()
                .try_for_each(|value| self.check_expr(value)),
            Expr::Bool(_) | Expr::String(_) | Expr::Char(_) | Expr::Int(_) | Expr::Double(_) => {
                Ok(())
            }
        }
    }

    fn is_module(&self, node: NodeId) -> bool {
        node == self.tree.root() || self.tree.query_kind(node) == SymbolKind::File
    }

    /// A declared symbol in the function's module or at the root.
    fn is_declared_symbol(&self, segment: &str) -> bool {
        [self.module, self.tree.root()].iter().any(|scope| {
            self.tree
                .child(*scope, segment)
                .is_some_and(|node| self.tree.query_kind(node) != SymbolKind::Unknown)
        })
    }

    fn not_declared(&self, name: &str, position: &Position) -> Error {
        Error::new(
            ErrorImpl::NameNotDeclared {
                name: name.to_string(),
            },
            position.clone(),
        )
    }
}

/// Scope-checks one function against `tree`.
pub fn check_scopes(tree: &SymbolTree, func: &FnDecl) -> Result<(), Error> {
    ScopeChecker::new(tree, func).check()
}
