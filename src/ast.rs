use crate::lexer::IdentifiedToken;
use std::borrow::Cow;
use std::fmt::{Display, Formatter};

/// The abstract syntax tree produced by a successful parse: either a single
/// lexed token (`Leaf`) or a named group of children (`Structure`) built by the
/// grammar's `named` combinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
    Leaf(IdentifiedToken),
    Structure {
        name: String,
        children: Vec<AstNode>,
    },
}

impl AstNode {
    pub fn structure(name: impl Into<String>, children: Vec<AstNode>) -> Self {
        AstNode::Structure {
            name: name.into(),
            children,
        }
    }

    pub fn children(&self) -> &[AstNode] {
        match self {
            AstNode::Leaf(_) => &[],
            AstNode::Structure { children, .. } => children,
        }
    }

    /// Human-readable, indented print. Not part of the machine-readable
    /// contract; exists purely so a parse can be inspected while debugging a
    /// grammar.
    pub fn print_indented(&self, f: &mut Formatter<'_>, depth: usize) -> std::fmt::Result {
        let pad = "  ".repeat(depth);
        match self {
            AstNode::Leaf(tok) => writeln!(f, "{}{} {:?}", pad, tok.id, tok.content),
            AstNode::Structure { name, children } => {
                writeln!(f, "{}{}", pad, name)?;
                for child in children {
                    child.print_indented(f, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl Display for AstNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.print_indented(f, 0)
    }
}

/// Adapter so an `AstNode` can be rendered with `ptree`'s box-drawing tree
/// printer, matching the tree-rendering dependency the rest of the crate
/// already carries for diagnostics (see DESIGN.md).
impl ptree::TreeItem for AstNode {
    type Child = Self;

    fn write_self<W: std::io::Write>(&self, f: &mut W, _: &ptree::Style) -> std::io::Result<()> {
        match self {
            AstNode::Leaf(tok) => write!(f, "{} {:?}", tok.id, tok.content),
            AstNode::Structure { name, .. } => write!(f, "{}", name),
        }
    }

    fn children(&self) -> Cow<[Self::Child]> {
        Cow::from(self.children())
    }
}
