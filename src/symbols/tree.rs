use std::{collections::HashMap, rc::Rc};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Created as an intermediate segment, not claimed by any declaration yet.
    Unknown,
    /// Built-in type or function with no source declaration.
    Virtual,
    File,
    Struct,
    StructField,
    Interface,
    InterfaceFunc,
    Alias,
    Enum,
    Function,
    GenericParameter,
}

/// Index of a node in the [`SymbolTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub enum SymbolValue {
    Empty,
    /// What the built-in stands for: `Struct` for types, `Function` for functions.
    Virtual(SymbolKind),
    File(Rc<String>),
    Declared {
        position: Position,
        generic_parameters: usize,
    },
}

impl SymbolValue {
    pub fn declared(position: &Position, generic_parameters: usize) -> Self {
        SymbolValue::Declared {
            position: position.clone(),
            generic_parameters,
        }
    }

    fn position(&self) -> Position {
        match self {
            SymbolValue::Declared { position, .. } => position.clone(),
            SymbolValue::File(file) => Position::new(0, 1, Rc::clone(file)),
            SymbolValue::Empty | SymbolValue::Virtual(_) => Position::null(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SymbolNode {
    pub kind: SymbolKind,
    pub segment: String,
    pub children: HashMap<String, NodeId>,
    pub value: SymbolValue,
    pub parent: Option<NodeId>,
}

/// Path-addressed namespace of every declared name.
///
/// Nodes are stored in an arena and never removed; the root is always
/// [`SymbolTree::root`].
#[derive(Debug, Clone)]
pub struct SymbolTree {
    nodes: Vec<SymbolNode>,
}

impl Default for SymbolTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTree {
    pub fn new() -> Self {
        SymbolTree {
            nodes: vec![SymbolNode {
                kind: SymbolKind::Virtual,
                segment: String::new(),
                children: HashMap::new(),
                value: SymbolValue::Empty,
                parent: None,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &SymbolNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SymbolNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeId(idx), node))
    }

    pub fn child(&self, id: NodeId, segment: &str) -> Option<NodeId> {
        self.node(id).children.get(segment).copied()
    }

    pub fn query_kind(&self, id: NodeId) -> SymbolKind {
        self.node(id).kind
    }

    /// Number of generic parameters the declaration at `id` takes.
    pub fn generic_arity(&self, id: NodeId) -> usize {
        match self.node(id).value {
            SymbolValue::Declared {
                generic_parameters, ..
            } => generic_parameters,
            _ => 0,
        }
    }

    /// Segments from the root down to `id`.
    pub fn path_of(&self, id: NodeId) -> Vec<String> {
        let mut path = vec![];
        let mut current = Some(id);

        while let Some(node_id) = current {
            let node = self.node(node_id);
            if node.parent.is_some() {
                path.push(node.segment.clone());
            }
            current = node.parent;
        }

        path.reverse();
        path
    }

    /// Follows `path` from `from`. Returns the node when every segment exists,
    /// including `Unknown` intermediates; never creates nodes.
    pub fn lookup<S: AsRef<str>>(&self, from: NodeId, path: &[S]) -> Option<NodeId> {
        path.iter()
            .try_fold(from, |current, segment| self.child(current, segment.as_ref()))
    }

    /// Claims the node at `path` below `from` for a declaration, creating
    /// `Unknown` intermediates on the way.
    ///
    /// Claiming again with the same kind and value is a no-op. Claiming a node
    /// held by a different declaration fails with `DuplicateDeclaration`.
    /// A bare namespace (`File` with an empty value) merges with a `File`
    /// claim at the same path.
    pub fn declare<S: AsRef<str>>(
        &mut self,
        from: NodeId,
        path: &[S],
        kind: SymbolKind,
        value: SymbolValue,
    ) -> Result<NodeId, Error> {
        let mut current = from;
        for segment in path {
            current = self.child_or_insert(current, segment.as_ref());
        }

        let node = self.node(current);
        let claim = match (node.kind, &node.value) {
            (SymbolKind::Unknown, _) => true,
            (existing, existing_value) if existing == kind && *existing_value == value => false,
            (SymbolKind::File, SymbolValue::Empty) if kind == SymbolKind::File => true,
            (SymbolKind::File, SymbolValue::File(_))
                if kind == SymbolKind::File && value == SymbolValue::Empty =>
            {
                false
            }
            _ => return Err(self.duplicate(current, &value)),
        };

        if claim {
            let node = &mut self.nodes[current.0];
            node.kind = kind;
            node.value = value;
        }

        Ok(current)
    }

    fn duplicate(&self, id: NodeId, value: &SymbolValue) -> Error {
        Error::new(
            ErrorImpl::DuplicateDeclaration {
                path: self.path_of(id).join("."),
            },
            value.position(),
        )
    }

    fn child_or_insert(&mut self, parent: NodeId, segment: &str) -> NodeId {
        if let Some(child) = self.child(parent, segment) {
            return child;
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(SymbolNode {
            kind: SymbolKind::Unknown,
            segment: segment.to_string(),
            children: HashMap::new(),
            value: SymbolValue::Empty,
            parent: Some(parent),
        });
        self.nodes[parent.0].children.insert(segment.to_string(), id);

        id
    }
}
