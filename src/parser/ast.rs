//! AST for the query-builder DSL.
//!
//! Nodes form a closed enum so the state machine and suggestion generators
//! get exhaustiveness checking when they walk the tree. Every node carries
//! its source span; a chain's span covers its first through last child.

/// Literal value carried by a [`AstNode::Literal`] node.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
}

/// A node in the builder-expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// A bare identifier: `db`, `users`, `select`.
    Identifier {
        name: String,
        start: usize,
        end: usize,
    },

    /// Property access: `object.property`.
    Member {
        object: Box<AstNode>,
        property: Box<AstNode>,
        start: usize,
        end: usize,
    },

    /// A call: `callee(arguments...)`.
    Call {
        callee: Box<AstNode>,
        arguments: Vec<AstNode>,
        start: usize,
        end: usize,
    },

    /// A sequence of top-level expressions.
    Chain {
        nodes: Vec<AstNode>,
        start: usize,
        end: usize,
    },

    /// A call argument, wrapping the actual expression with its position.
    Argument {
        index: usize,
        inner: Box<AstNode>,
        start: usize,
        end: usize,
    },

    /// A literal: string, number, or boolean.
    Literal {
        value: LiteralValue,
        raw: String,
        start: usize,
        end: usize,
    },

    /// A template literal, e.g. the body of `` sql`...` ``.
    Template {
        raw: String,
        closed: bool,
        start: usize,
        end: usize,
    },

    /// Syntactically unfinished input, e.g. a dot with no identifier after it.
    Incomplete {
        name: Option<String>,
        start: usize,
        end: usize,
    },
}

impl AstNode {
    /// Start offset of this node.
    pub fn start(&self) -> usize {
        match self {
            AstNode::Identifier { start, .. }
            | AstNode::Member { start, .. }
            | AstNode::Call { start, .. }
            | AstNode::Chain { start, .. }
            | AstNode::Argument { start, .. }
            | AstNode::Literal { start, .. }
            | AstNode::Template { start, .. }
            | AstNode::Incomplete { start, .. } => *start,
        }
    }

    /// End offset of this node. Always >= `start()`.
    pub fn end(&self) -> usize {
        match self {
            AstNode::Identifier { end, .. }
            | AstNode::Member { end, .. }
            | AstNode::Call { end, .. }
            | AstNode::Chain { end, .. }
            | AstNode::Argument { end, .. }
            | AstNode::Literal { end, .. }
            | AstNode::Template { end, .. }
            | AstNode::Incomplete { end, .. } => *end,
        }
    }

    /// Identifier name, if this node is one.
    pub fn identifier_name(&self) -> Option<&str> {
        match self {
            AstNode::Identifier { name, .. } => Some(name),
            _ => None,
        }
    }

    /// The method name of a call: the callee identifier, or the property
    /// name when the callee is a member expression.
    pub fn call_name(&self) -> Option<&str> {
        let AstNode::Call { callee, .. } = self else {
            return None;
        };
        match callee.as_ref() {
            AstNode::Identifier { name, .. } => Some(name),
            AstNode::Member { property, .. } => property.identifier_name(),
            _ => None,
        }
    }

    /// Property name of a member access.
    pub fn member_name(&self) -> Option<&str> {
        match self {
            AstNode::Member { property, .. } => property.identifier_name(),
            _ => None,
        }
    }

    /// The last top-level node of a chain, or the node itself.
    pub fn last_node(&self) -> &AstNode {
        match self {
            AstNode::Chain { nodes, .. } if !nodes.is_empty() => &nodes[nodes.len() - 1],
            _ => self,
        }
    }

    /// Depth-first pre-order walk over this node and all descendants.
    pub fn walk<'a>(&'a self, visitor: &mut impl FnMut(&'a AstNode)) {
        visitor(self);
        match self {
            AstNode::Member { object, property, .. } => {
                object.walk(visitor);
                property.walk(visitor);
            }
            AstNode::Call { callee, arguments, .. } => {
                callee.walk(visitor);
                for arg in arguments {
                    arg.walk(visitor);
                }
            }
            AstNode::Chain { nodes, .. } => {
                for node in nodes {
                    node.walk(visitor);
                }
            }
            AstNode::Argument { inner, .. } => inner.walk(visitor),
            AstNode::Identifier { .. }
            | AstNode::Literal { .. }
            | AstNode::Template { .. }
            | AstNode::Incomplete { .. } => {}
        }
    }

    /// The innermost node whose span covers `position`, if any.
    pub fn find_at_position(&self, position: usize) -> Option<&AstNode> {
        let mut result = None;
        self.walk(&mut |node| {
            if position >= node.start() && position <= node.end() {
                result = Some(node);
            }
        });
        result
    }

    /// Whether this node or any descendant is [`AstNode::Incomplete`].
    pub fn has_incomplete(&self) -> bool {
        let mut found = false;
        self.walk(&mut |node| {
            if matches!(node, AstNode::Incomplete { .. }) {
                found = true;
            }
        });
        found
    }
}
