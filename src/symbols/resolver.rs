//! Two-pass symbol resolution.
//!
//! Pass one ([`SymbolResolver::register`]) claims a tree node for every
//! declaration of a file. Pass two ([`SymbolResolver::resolve`]) looks up
//! every generic name in type position and records which node each of its
//! parts refers to. All files of a compilation are registered before any is
//! resolved, so declaration order does not matter.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::{
    ast::{
        ast::{Decl, Stmt, TexelFile},
        declarations::{FnDecl, InterfaceDecl, StructDecl},
        statements::WhenBody,
        types::{GenericDeclaration, GenericName, NameId},
    },
    config::FrontendConfig,
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::tree::{NodeId, SymbolKind, SymbolTree, SymbolValue};

/// Which tree node each resolved generic-name part refers to, keyed by the
/// part's [`NameId`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolutions {
    map: BTreeMap<NameId, NodeId>,
}

impl Resolutions {
    pub fn get(&self, id: NameId) -> Option<NodeId> {
        self.map.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NameId, NodeId)> + '_ {
        self.map.iter().map(|(name, node)| (*name, *node))
    }

    fn insert(&mut self, id: NameId, node: NodeId) {
        self.map.insert(id, node);
    }
}

pub struct SymbolResolver<'a> {
    tree: &'a mut SymbolTree,
    builtin_types: Vec<String>,
    builtin_functions: Vec<String>,
    resolutions: Resolutions,
}

impl<'a> SymbolResolver<'a> {
    pub fn new(tree: &'a mut SymbolTree) -> Self {
        Self::with_config(tree, &FrontendConfig::default())
    }

    pub fn with_config(tree: &'a mut SymbolTree, config: &FrontendConfig) -> Self {
        SymbolResolver {
            tree,
            builtin_types: config.builtin_types.clone(),
            builtin_functions: config.builtin_functions.clone(),
            resolutions: Resolutions::default(),
        }
    }

    /// Pass one for `file`, placing its declarations under `module_path`.
    /// Returns the module node (the root for an empty path).
    pub fn register(&mut self, module_path: &[String], file: &TexelFile) -> Result<NodeId, Error> {
        let root = self.tree.root();

        let module = if module_path.is_empty() {
            root
        } else {
            for depth in 1..module_path.len() {
                self.tree.declare(
                    root,
                    &module_path[..depth],
                    SymbolKind::File,
                    SymbolValue::Empty,
                )?;
            }
            self.tree.declare(
                root,
                module_path,
                SymbolKind::File,
                SymbolValue::File(file.file.clone()),
            )?
        };

        for decl in &file.declarations {
            self.register_decl(module, decl)?;
        }

        debug!(
            file = %file.file,
            module = %module_path.join("."),
            declarations = file.declarations.len(),
            "registered declarations"
        );

        Ok(module)
    }

    /// Adds the configured built-in types and functions at the root.
    pub fn register_builtins(&mut self) -> Result<(), Error> {
        let root = self.tree.root();

        for name in &self.builtin_types {
            self.tree.declare(
                root,
                &[name],
                SymbolKind::Virtual,
                SymbolValue::Virtual(SymbolKind::Struct),
            )?;
        }
        for name in &self.builtin_functions {
            self.tree.declare(
                root,
                &[name],
                SymbolKind::Virtual,
                SymbolValue::Virtual(SymbolKind::Function),
            )?;
        }

        Ok(())
    }

    /// Pass two for a file registered at `module`.
    pub fn resolve(&mut self, module: NodeId, file: &TexelFile) -> Result<(), Error> {
        for decl in &file.declarations {
            self.resolve_decl(module, decl)?;
        }

        debug!(file = %file.file, resolved = self.resolutions.len(), "resolved symbols");
        Ok(())
    }

    pub fn finish(self) -> Resolutions {
        self.resolutions
    }

    fn claim(
        &mut self,
        parent: NodeId,
        path: &[String],
        kind: SymbolKind,
        position: &Position,
        generic_parameters: usize,
    ) -> Result<NodeId, Error> {
        let node = self.tree.declare(
            parent,
            path,
            kind,
            SymbolValue::declared(position, generic_parameters),
        )?;
        trace!(path = %self.tree.path_of(node).join("."), kind = ?kind, "declared");

        Ok(node)
    }

    fn register_generics(
        &mut self,
        parent: NodeId,
        generics: &[GenericDeclaration],
    ) -> Result<(), Error> {
        for generic in generics {
            self.claim(
                parent,
                &[generic.name.clone()],
                SymbolKind::GenericParameter,
                &generic.span.start,
                0,
            )?;
        }
        Ok(())
    }

    fn register_decl(&mut self, module: NodeId, decl: &Decl) -> Result<(), Error> {
        match decl {
            Decl::Struct(decl) => self.register_struct(module, decl),
            Decl::Function(func) => {
                let node = self.claim(
                    module,
                    &func.name.to_path(),
                    SymbolKind::Function,
                    &func.span.start,
                    func.generics.len(),
                )?;
                self.register_generics(node, &func.generics)
            }
            Decl::Interface(decl) => self.register_interface(module, decl),
            Decl::Alias(alias) => self
                .claim(
                    module,
                    &[alias.name.clone()],
                    SymbolKind::Alias,
                    &alias.span.start,
                    0,
                )
                .map(|_| ()),
            Decl::Enum(enumeration) => self
                .claim(
                    module,
                    &[enumeration.name.clone()],
                    SymbolKind::Enum,
                    &enumeration.span.start,
                    0,
                )
                .map(|_| ()),
        }
    }

    fn register_struct(&mut self, parent: NodeId, decl: &StructDecl) -> Result<(), Error> {
        let node = self.claim(
            parent,
            &[decl.name.clone()],
            SymbolKind::Struct,
            &decl.span.start,
            decl.generics.len(),
        )?;

        self.register_generics(node, &decl.generics)?;

        for field in &decl.fields {
            self.claim(
                node,
                &[field.name.clone()],
                SymbolKind::StructField,
                &field.span.start,
                0,
            )?;
        }

        for inner in &decl.inner_structs {
            self.register_struct(node, inner)?;
        }

        Ok(())
    }

    fn register_interface(&mut self, module: NodeId, decl: &InterfaceDecl) -> Result<(), Error> {
        let node = self.claim(
            module,
            &[decl.name.clone()],
            SymbolKind::Interface,
            &decl.span.start,
            decl.generics.len(),
        )?;

        self.register_generics(node, &decl.generics)?;

        for method in &decl.methods {
            self.claim(
                node,
                &[method.name.clone()],
                SymbolKind::InterfaceFunc,
                &method.span.start,
                0,
            )?;
        }

        Ok(())
    }

    /// Node claimed in pass one for a declaration at `path` below `parent`.
    fn declared_node(
        &self,
        parent: NodeId,
        path: &[String],
        position: &Position,
    ) -> Result<NodeId, Error> {
        self.tree
            .lookup(parent, path)
            .filter(|node| self.tree.query_kind(*node) != SymbolKind::Unknown)
            .ok_or_else(|| {
                Error::new(
                    ErrorImpl::UndefinedSymbol {
                        name: path.join("."),
                    },
                    position.clone(),
                )
            })
    }

    fn resolve_decl(&mut self, module: NodeId, decl: &Decl) -> Result<(), Error> {
        match decl {
            Decl::Struct(decl) => self.resolve_struct(module, decl),
            Decl::Function(func) => self.resolve_function(module, func),
            Decl::Interface(decl) => {
                let node = self.declared_node(module, &[decl.name.clone()], &decl.span.start)?;
                self.resolve_generic_bounds(node, &decl.generics)?;

                for method in &decl.methods {
                    for param in &method.parameters {
                        self.resolve_name(node, None, &param.param_type)?;
                    }
                    self.resolve_name(node, None, &method.return_type.name)?;
                }
                Ok(())
            }
            Decl::Alias(alias) => {
                let node = self.declared_node(module, &[alias.name.clone()], &alias.span.start)?;
                self.resolve_name(node, None, &alias.aliased)
            }
            Decl::Enum(_) => Ok(()),
        }
    }

    fn resolve_generic_bounds(
        &mut self,
        scope: NodeId,
        generics: &[GenericDeclaration],
    ) -> Result<(), Error> {
        for bound in generics.iter().filter_map(|generic| generic.extends.as_ref()) {
            self.resolve_name(scope, None, bound)?;
        }
        Ok(())
    }

    fn resolve_struct(&mut self, parent: NodeId, decl: &StructDecl) -> Result<(), Error> {
        let node = self.declared_node(parent, &[decl.name.clone()], &decl.span.start)?;

        self.resolve_generic_bounds(node, &decl.generics)?;

        for extended in &decl.extends {
            self.resolve_name(node, None, extended)?;
        }

        for field in &decl.fields {
            self.resolve_name(node, None, &field.field_type)?;
        }

        for inner in &decl.inner_structs {
            self.resolve_struct(node, inner)?;
        }

        Ok(())
    }

    fn resolve_function(&mut self, module: NodeId, func: &FnDecl) -> Result<(), Error> {
        let node = self.declared_node(module, &func.name.to_path(), &func.span.start)?;

        self.resolve_generic_bounds(node, &func.generics)?;

        for param in &func.parameters {
            self.resolve_name(node, None, &param.param_type)?;
        }
        self.resolve_name(node, None, &func.return_type.name)?;

        self.resolve_body(node, &func.body)
    }

    /// Variable types inside a function body, nested blocks included.
    fn resolve_body(&mut self, scope: NodeId, body: &[Stmt]) -> Result<(), Error> {
        for stmt in body {
            match stmt {
                Stmt::VarDecl(var) => self.resolve_name(scope, None, &var.var_type)?,
                Stmt::Loop(loop_stmt) => self.resolve_body(scope, &loop_stmt.body)?,
                Stmt::If(if_stmt) => {
                    self.resolve_body(scope, &if_stmt.if_arm.body)?;
                    for arm in &if_stmt.else_ifs {
                        self.resolve_body(scope, &arm.body)?;
                    }
                    self.resolve_body(scope, &if_stmt.else_body)?;
                }
                Stmt::When(when) => {
                    let blocks = when
                        .arms
                        .iter()
                        .map(|arm| &arm.body)
                        .chain(when.else_arm.iter());
                    for body in blocks {
                        if let WhenBody::Block(block) = body {
                            self.resolve_body(scope, block)?;
                        }
                    }
                }
                Stmt::Assignment(_)
                | Stmt::Expression(_)
                | Stmt::Break(_)
                | Stmt::Continue(_)
                | Stmt::Return(_) => {}
            }
        }
        Ok(())
    }

    /// First type-position match for `segment` walking from `scope` up to
    /// the root. Fields, methods and functions are skipped.
    fn lookup_in_chain(&self, scope: NodeId, segment: &str) -> Option<NodeId> {
        let mut current = Some(scope);

        while let Some(id) = current {
            if let Some(found) = self.type_child(id, segment) {
                return Some(found);
            }
            current = self.tree.node(id).parent;
        }

        None
    }

    fn type_child(&self, parent: NodeId, segment: &str) -> Option<NodeId> {
        self.tree
            .child(parent, segment)
            .filter(|node| self.is_type_like(*node))
    }

    /// A type declared inside `parent`. Its generic parameters are not
    /// visible to the names that use it.
    fn nested_type(&self, parent: NodeId, segment: &str) -> Option<NodeId> {
        self.tree.child(parent, segment).filter(|node| {
            matches!(
                self.tree.query_kind(*node),
                SymbolKind::Struct | SymbolKind::Interface | SymbolKind::Alias | SymbolKind::Enum
            )
        })
    }

    fn is_type_like(&self, node: NodeId) -> bool {
        match self.tree.query_kind(node) {
            SymbolKind::Struct
            | SymbolKind::Interface
            | SymbolKind::Alias
            | SymbolKind::Enum
            | SymbolKind::GenericParameter
            | SymbolKind::File => true,
            SymbolKind::Virtual => {
                self.tree.node(node).value == SymbolValue::Virtual(SymbolKind::Struct)
            }
            SymbolKind::Unknown
            | SymbolKind::StructField
            | SymbolKind::InterfaceFunc
            | SymbolKind::Function => false,
        }
    }

    /// Resolves every part of `name`. The first part is looked up among the
    /// nested types of `member_of` when given, then through the chain
    /// starting at `scope`; later parts are type children of the previous
    /// part.
    fn resolve_name(
        &mut self,
        scope: NodeId,
        member_of: Option<NodeId>,
        name: &GenericName,
    ) -> Result<(), Error> {
        let mut previous: Option<NodeId> = None;

        for part in &name.parts {
            let found = match previous {
                None => member_of
                    .and_then(|parent| self.nested_type(parent, &part.name))
                    .or_else(|| self.lookup_in_chain(scope, &part.name)),
                Some(parent) => self.type_child(parent, &part.name),
            };

            let Some(node) = found else {
                return Err(Error::new(
                    ErrorImpl::UndefinedSymbol {
                        name: part.name.clone(),
                    },
                    part.span.start.clone(),
                ));
            };

            let expected = self.tree.generic_arity(node);
            if expected != part.generics.len() {
                return Err(Error::new(
                    ErrorImpl::GenericArgumentMismatch {
                        name: part.name.clone(),
                        expected,
                        received: part.generics.len(),
                    },
                    part.span.start.clone(),
                ));
            }

            trace!(
                name = %part.name,
                target = %self.tree.path_of(node).join("."),
                "resolved"
            );
            self.resolutions.insert(part.id, node);

            for generic in &part.generics {
                self.resolve_name(scope, Some(node), generic)?;
            }

            previous = Some(node);
        }

        Ok(())
    }
}

/// Registers and resolves a single file at the root of `tree`.
pub fn resolve_symbols(tree: &mut SymbolTree, file: &TexelFile) -> Result<Resolutions, Error> {
    let mut resolver = SymbolResolver::new(tree);

    let module = resolver.register(&[], file)?;
    resolver.register_builtins()?;
    resolver.resolve(module, file)?;

    Ok(resolver.finish())
}
