use crate::ircore::{DEFAULT_FIELD, KNOWN_FIELDS};
use crate::ircore::analyzer::Analyzer;
use crate::ircore::error::QueryError;
use super::{DefaultOperator, QryNode};

#[derive(Debug, Clone, Copy, PartialEq)]
enum OpKind {
    And,
    Or,
    Syn,
    Sum,
    Score,
    Near(u32),
}

impl From<DefaultOperator> for OpKind {
    fn from(operator: DefaultOperator) -> Self {
        match operator {
            DefaultOperator::Or => OpKind::Or,
            DefaultOperator::And => OpKind::And,
            DefaultOperator::Sum => OpKind::Sum,
        }
    }
}

// An operator whose closing ')' has not been seen yet.
struct PendingOp {
    kind: OpKind,
    args: Vec<QryNode>,
    // token index of the operator, for error messages
    position: usize,
}

impl PendingOp {
    fn attach(&mut self, node: QryNode, position: usize) -> Result<(), QueryError> {
        match self.kind {
            OpKind::Syn | OpKind::Near(_) | OpKind::Score if !node.produces_postings() => {
                Err(QueryError::Syntax {
                    message: format!("{} is not allowed inside {}", node.operator_name(), self.name()),
                    position,
                })
            }
            _ => {
                self.args.push(node);
                Ok(())
            }
        }
    }

    fn name(&self) -> &'static str {
        match self.kind {
            OpKind::And => "#AND",
            OpKind::Or => "#OR",
            OpKind::Syn => "#SYN",
            OpKind::Sum => "#SUM",
            OpKind::Score => "#SCORE",
            OpKind::Near(_) => "#NEAR",
        }
    }

    // None when every argument vanished during analysis
    fn into_node(self) -> Result<Option<QryNode>, QueryError> {
        if self.args.is_empty() {
            return Ok(None);
        }
        let mut args = self.args;
        let node = match self.kind {
            OpKind::And => QryNode::And(args),
            OpKind::Or => QryNode::Or(args),
            OpKind::Syn => QryNode::Syn(args),
            OpKind::Sum => QryNode::Sum(args),
            OpKind::Near(window) => QryNode::Near { window, args },
            OpKind::Score if args.len() == 1 => QryNode::Score(Box::new(args.remove(0))),
            OpKind::Score => {
                return Err(QueryError::Syntax {
                    message: "#SCORE takes exactly one argument".to_string(),
                    position: self.position,
                })
            }
        };
        Ok(Some(node))
    }
}

// Shift-reduce parser for the structured query language:
// #AND, #OR, #SYN, #SUM, #NEAR/n and #SCORE over field-qualified terms.
pub struct QueryParser {
    analyzer: Analyzer,
    default_operator: DefaultOperator,
}

impl QueryParser {
    pub fn new(analyzer: Analyzer, default_operator: DefaultOperator) -> Self {
        QueryParser {
            analyzer,
            default_operator,
        }
    }

    // Every query is parsed inside the default operator, so bare terms and
    // several top-level clauses (`#AND(a b) c`) are combined by it. A query
    // made of a single operator keeps that operator as its root.
    pub fn parse(&self, query: &str) -> Result<QryNode, QueryError> {
        let query = query.trim();
        let mut stack = vec![PendingOp {
            kind: self.default_operator.into(),
            args: vec![],
            position: 0,
        }];
        for (position, token) in split_tokens(query).into_iter().enumerate() {
            if token == ")" {
                // the default operator is never closed by the query itself
                if stack.len() == 1 {
                    return Err(QueryError::Syntax {
                        message: "unmatched ')'".to_string(),
                        position,
                    });
                }
                if let Some(node) = stack.pop().map(PendingOp::into_node).transpose()?.flatten() {
                    if let Some(parent) = stack.last_mut() {
                        parent.attach(node, position)?;
                    }
                }
            } else if token.starts_with('#') {
                stack.push(PendingOp {
                    kind: parse_operator(token, position)?,
                    args: vec![],
                    position,
                });
            } else if let Some(parent) = stack.last_mut() {
                for node in self.term_nodes(token) {
                    parent.attach(node, position)?;
                }
            }
        }
        if stack.len() > 1 {
            return Err(QueryError::Unbalanced(stack.len() - 1));
        }
        let mut top = stack.pop().ok_or(QueryError::NoTerms)?;
        let single_operator = query.starts_with('#')
            && top.args.len() == 1
            && !matches!(top.args[0], QryNode::Term { .. });
        if single_operator {
            return Ok(top.args.remove(0));
        }
        top.into_node()?.ok_or(QueryError::NoTerms)
    }

    // One Term node per analyzed token of a possibly field-qualified term.
    fn term_nodes(&self, token: &str) -> Vec<QryNode> {
        let (text, field) = split_field(token);
        self.analyzer.analyze(text)
            .iter()
            .map(|term| QryNode::term(term, &field))
            .collect()
    }
}

// Splits `apple.title` into ("apple", "title"). Only a suffix naming a
// known field is a qualifier; anything else stays part of the term.
pub fn split_field(token: &str) -> (&str, String) {
    if let Some((text, suffix)) = token.rsplit_once('.') {
        let suffix = suffix.to_lowercase();
        if !text.is_empty() && KNOWN_FIELDS.contains(&suffix.as_str()) {
            return (text, suffix);
        }
    }
    (token, DEFAULT_FIELD.to_string())
}

fn parse_operator(token: &str, position: usize) -> Result<OpKind, QueryError> {
    let name = token.to_lowercase();
    match name.as_str() {
        "#and" => Ok(OpKind::And),
        "#or" => Ok(OpKind::Or),
        "#syn" => Ok(OpKind::Syn),
        "#sum" => Ok(OpKind::Sum),
        "#score" => Ok(OpKind::Score),
        _ => match name.strip_prefix("#near/") {
            Some(window) => match window.parse::<u32>() {
                Ok(n) if n > 0 => Ok(OpKind::Near(n)),
                _ => Err(QueryError::InvalidWindow(window.to_string())),
            },
            None => Err(QueryError::Syntax {
                message: format!("unknown operator '{}'", token),
                position,
            }),
        },
    }
}

// Whitespace, commas and parentheses delimit tokens. ')' is returned as
// a token of its own; '(' carries no information and is dropped.
fn split_tokens(text: &str) -> Vec<&str> {
    let mut tokens = vec![];
    let mut start = None;
    for (i, c) in text.char_indices() {
        let is_delimiter = c.is_whitespace() || c == ',' || c == '(' || c == ')';
        if is_delimiter {
            if let Some(s) = start.take() {
                tokens.push(&text[s..i]);
            }
            if c == ')' {
                tokens.push(&text[i..i + 1]);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(&text[s..]);
    }
    tokens
}
