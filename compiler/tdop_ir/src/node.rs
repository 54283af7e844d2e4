//! AST node contract and the bundled node shapes.
//!
//! Grammars define their own node types by implementing [`Node`]; the
//! toolkit ships only the shapes its operator helpers build:
//! [`TokenNode`], [`UnaryOperator`], [`BinaryOperator`], plus the
//! visualization-only [`AnnotatedNode`] decorator.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::{Location, Result, Token};

/// Shared handle to a node.
pub type NodeRef = Arc<dyn Node>;

/// An AST node.
pub trait Node: fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Source span covered by the node, if known.
    fn location(&self) -> Option<Location>;

    /// Children in source order.
    fn children(&self) -> Vec<NodeRef> {
        Vec::new()
    }

    /// The token that names this node: the token itself for leaves, the
    /// operator for operator nodes.
    fn token(&self) -> Option<&Token> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

/// Leaf wrapping a single token.
#[derive(Clone, Debug)]
pub struct TokenNode {
    pub token: Token,
}

impl TokenNode {
    pub fn new(token: Token) -> Self {
        TokenNode { token }
    }

    pub fn into_ref(self) -> NodeRef {
        Arc::new(self)
    }
}

impl fmt::Display for TokenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.token.fmt(f)
    }
}

impl Node for TokenNode {
    fn location(&self) -> Option<Location> {
        self.token.location.clone()
    }

    fn token(&self) -> Option<&Token> {
        Some(&self.token)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Labels another node for display; location, children and token are
/// delegated untouched.
#[derive(Clone, Debug)]
pub struct AnnotatedNode {
    pub annotation: Arc<str>,
    pub inner: NodeRef,
}

impl AnnotatedNode {
    pub fn new(annotation: impl Into<Arc<str>>, inner: NodeRef) -> Self {
        AnnotatedNode {
            annotation: annotation.into(),
            inner,
        }
    }

    /// The wrapped node.
    pub fn unwrap(&self) -> &NodeRef {
        &self.inner
    }

    pub fn into_ref(self) -> NodeRef {
        Arc::new(self)
    }
}

impl fmt::Display for AnnotatedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.annotation, self.inner)
    }
}

impl Node for AnnotatedNode {
    fn location(&self) -> Option<Location> {
        self.inner.location()
    }

    fn children(&self) -> Vec<NodeRef> {
        self.inner.children()
    }

    fn token(&self) -> Option<&Token> {
        self.inner.token()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Peel every [`AnnotatedNode`] layer off `node`.
pub fn strip_annotations(mut node: &NodeRef) -> &NodeRef {
    while let Some(annotated) = node.as_any().downcast_ref::<AnnotatedNode>() {
        node = annotated.unwrap();
    }
    node
}

/// Prefix operator applied to one operand.
#[derive(Clone, Debug)]
pub struct UnaryOperator {
    pub op: Token,
    pub exp: NodeRef,
    pub location: Option<Location>,
}

impl UnaryOperator {
    /// Spans from the operator through the end of the operand.
    pub fn new(op: Token, exp: NodeRef) -> Result<Self> {
        let location = Location::span_opt(op.location.as_ref(), exp.location().as_ref())?;
        Ok(UnaryOperator { op, exp, location })
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.op.fmt(f)
    }
}

impl Node for UnaryOperator {
    fn location(&self) -> Option<Location> {
        self.location.clone()
    }

    fn children(&self) -> Vec<NodeRef> {
        vec![AnnotatedNode::new("Exp", self.exp.clone()).into_ref()]
    }

    fn token(&self) -> Option<&Token> {
        Some(&self.op)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Infix operator with left and right operands.
#[derive(Clone, Debug)]
pub struct BinaryOperator {
    pub op: Token,
    pub left: NodeRef,
    pub right: NodeRef,
    pub location: Option<Location>,
}

impl BinaryOperator {
    /// Spans from the left operand through the end of the right operand;
    /// unlocated if any of the three is.
    pub fn new(op: Token, left: NodeRef, right: NodeRef) -> Result<Self> {
        let location = Location::span_opt(left.location().as_ref(), right.location().as_ref())?
            .filter(|_| op.location.is_some());
        Ok(BinaryOperator {
            op,
            left,
            right,
            location,
        })
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.op.fmt(f)
    }
}

impl Node for BinaryOperator {
    fn location(&self) -> Option<Location> {
        self.location.clone()
    }

    fn children(&self) -> Vec<NodeRef> {
        vec![
            AnnotatedNode::new("L", self.left.clone()).into_ref(),
            AnnotatedNode::new("R", self.right.clone()).into_ref(),
        ]
    }

    fn token(&self) -> Option<&Token> {
        Some(&self.op)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
