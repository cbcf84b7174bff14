pub mod parser;

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::ircore::DEFAULT_FIELD;

// Operator that wraps a query written without an explicit top-level operator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultOperator {
    Or,
    And,
    Sum,
}

impl Default for DefaultOperator {
    fn default() -> Self {
        DefaultOperator::Or
    }
}

// A structured query. Term, #SYN and #NEAR evaluate to inverted lists;
// the others evaluate to score lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum QryNode {
    Term { term: String, field: String },
    Syn(Vec<QryNode>),
    Near { window: u32, args: Vec<QryNode> },
    And(Vec<QryNode>),
    Or(Vec<QryNode>),
    Score(Box<QryNode>),
    Sum(Vec<QryNode>),
}

impl QryNode {
    pub fn term(term: &str, field: &str) -> Self {
        QryNode::Term {
            term: term.to_string(),
            field: field.to_string(),
        }
    }

    pub fn operator_name(&self) -> &'static str {
        match self {
            QryNode::Term { .. } => "TERM",
            QryNode::Syn(_) => "#SYN",
            QryNode::Near { .. } => "#NEAR",
            QryNode::And(_) => "#AND",
            QryNode::Or(_) => "#OR",
            QryNode::Score(_) => "#SCORE",
            QryNode::Sum(_) => "#SUM",
        }
    }

    pub fn args(&self) -> &[QryNode] {
        match self {
            QryNode::Term { .. } => &[],
            QryNode::Syn(args)
            | QryNode::Near { args, .. }
            | QryNode::And(args)
            | QryNode::Or(args)
            | QryNode::Sum(args) => args,
            QryNode::Score(arg) => std::slice::from_ref(arg.as_ref()),
        }
    }

    // whether the node evaluates to an inverted list
    pub fn produces_postings(&self) -> bool {
        matches!(self, QryNode::Term { .. } | QryNode::Syn(_) | QryNode::Near { .. })
    }

    pub fn term_count(&self) -> usize {
        match self {
            QryNode::Term { .. } => 1,
            _ => self.args().iter().map(QryNode::term_count).sum(),
        }
    }

    // Query language text of the tree. Reparsing it with the analyzer that
    // produced the tree yields the same tree.
    pub fn to_query_string(&self) -> String {
        match self {
            QryNode::Term { term, field } if field == DEFAULT_FIELD => term.clone(),
            QryNode::Term { term, field } => format!("{}.{}", term, field),
            QryNode::Near { window, args } => format!("#NEAR/{}({})", window, join_args(args)),
            _ => format!("{}({})", self.operator_name(), join_args(self.args())),
        }
    }

    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            QryNode::Term { term, field } => writeln!(f, "{}{} [{}]", indent, term, field),
            QryNode::Near { window, args } => {
                writeln!(f, "{}#NEAR/{}", indent, window)?;
                args.iter().try_for_each(|arg| arg.fmt_tree(f, depth + 1))
            }
            _ => {
                writeln!(f, "{}{}", indent, self.operator_name())?;
                self.args().iter().try_for_each(|arg| arg.fmt_tree(f, depth + 1))
            }
        }
    }
}

fn join_args(args: &[QryNode]) -> String {
    args.iter().map(QryNode::to_query_string).collect::<Vec<_>>().join(" ")
}

impl fmt::Display for QryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QryNode {
        QryNode::And(vec![
            QryNode::term("obama", "body"),
            QryNode::Near { window: 3, args: vec![QryNode::term("family", "title"), QryNode::term("tree", "body")] },
            QryNode::Score(Box::new(QryNode::Syn(vec![QryNode::term("usa", "url")]))),
        ])
    }

    #[test]
    fn test_query_string() {
        assert_eq!(sample().to_query_string(),
            "#AND(obama #NEAR/3(family.title tree) #SCORE(#SYN(usa.url)))");
    }

    #[test]
    fn test_tree_display() {
        let tree = format!("{}", QryNode::Or(vec![QryNode::term("pea", "body")]));
        assert_eq!(tree, "#OR\n  pea [body]\n");
    }

    #[test]
    fn test_node_shape() {
        let node = sample();
        assert_eq!(node.term_count(), 4);
        assert_eq!(node.args().len(), 3);
        assert!(!node.produces_postings());
        assert!(node.args()[1].produces_postings());
        assert_eq!(node.args()[2].args().len(), 1);
        assert_eq!(DefaultOperator::default(), DefaultOperator::Or);
    }
}
