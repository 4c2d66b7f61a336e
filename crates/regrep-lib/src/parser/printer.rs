use std::fmt::Write;

use super::ast::Node;

/// Indented one-node-per-line dump of a pattern AST.
pub struct NodePrinter<'n> {
    root: &'n Node,
}

impl<'n> NodePrinter<'n> {
    pub fn new(root: &'n Node) -> Self {
        Self { root }
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        self.format_node(self.root, 0, w)
    }

    fn format_node(&self, node: &Node, depth: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(depth);
        match node {
            Node::Literal(c) => writeln!(w, "{prefix}Literal {c:?}"),
            Node::Digit => writeln!(w, "{prefix}Digit"),
            Node::Word => writeln!(w, "{prefix}Word"),
            Node::Any => writeln!(w, "{prefix}Any"),
            Node::CharClass(class) => {
                let members: String = class.set.iter().collect();
                let caret = if class.negated { "^" } else { "" };
                writeln!(w, "{prefix}CharClass [{caret}{members}]")
            }
            Node::Sequence(children) => {
                writeln!(w, "{prefix}Sequence")?;
                for child in children {
                    self.format_node(child, depth + 1, w)?;
                }
                Ok(())
            }
            Node::Alternation(branches) => {
                writeln!(w, "{prefix}Alternation")?;
                for branch in branches {
                    self.format_node(branch, depth + 1, w)?;
                }
                Ok(())
            }
            Node::Repetition(rep) => {
                match rep.max {
                    Some(max) => writeln!(w, "{prefix}Repetition {}..={}", rep.min, max)?,
                    None => writeln!(w, "{prefix}Repetition {}..", rep.min)?,
                }
                self.format_node(&rep.child, depth + 1, w)
            }
            Node::Capture(capture) => {
                writeln!(w, "{prefix}Capture {}", capture.index)?;
                self.format_node(&capture.child, depth + 1, w)
            }
            Node::Backreference(index) => writeln!(w, "{prefix}Backreference {index}"),
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        NodePrinter::new(self).format(f)
    }
}
