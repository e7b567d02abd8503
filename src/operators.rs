//! Operator and node-kind classification
//!
//! Every binary expression in a `syn` tree carries a `syn::BinOp`. This module
//! sorts those operators into the node kinds the engine scans and into the closed
//! set of operators it knows how to replace.

use std::fmt;

use proc_macro2::Span;
use quote::ToTokens;
use serde::Serialize;
use syn::{BinOp, Token};

/// The kind of an operator-bearing node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    /// Arithmetic, bitwise and shift operations (`a + b`, `a << b`)
    BinaryOperation,
    /// Short-circuit boolean operations (`a && b`)
    LogicalOperation,
    /// Relational operations (`a < b`, `a == b`)
    Comparison,
    /// Operator assignments (`a += b`)
    CompoundAssignment,
}

impl NodeKind {
    /// Kind of the node carrying `op`
    pub fn of(op: &BinOp) -> Option<Self> {
        let kind = match op {
            BinOp::Add(_)
            | BinOp::Sub(_)
            | BinOp::Mul(_)
            | BinOp::Div(_)
            | BinOp::Rem(_)
            | BinOp::BitXor(_)
            | BinOp::BitAnd(_)
            | BinOp::BitOr(_)
            | BinOp::Shl(_)
            | BinOp::Shr(_) => NodeKind::BinaryOperation,
            BinOp::And(_) | BinOp::Or(_) => NodeKind::LogicalOperation,
            BinOp::Eq(_)
            | BinOp::Lt(_)
            | BinOp::Le(_)
            | BinOp::Ne(_)
            | BinOp::Ge(_)
            | BinOp::Gt(_) => NodeKind::Comparison,
            BinOp::AddAssign(_)
            | BinOp::SubAssign(_)
            | BinOp::MulAssign(_)
            | BinOp::DivAssign(_)
            | BinOp::RemAssign(_)
            | BinOp::BitXorAssign(_)
            | BinOp::BitAndAssign(_)
            | BinOp::BitOrAssign(_)
            | BinOp::ShlAssign(_)
            | BinOp::ShrAssign(_) => NodeKind::CompoundAssignment,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::BinaryOperation => "binary-operation",
            NodeKind::LogicalOperation => "logical-operation",
            NodeKind::Comparison => "comparison",
            NodeKind::CompoundAssignment => "compound-assignment",
        };
        f.write_str(name)
    }
}

/// The operators a mutation family can read or write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperatorKind {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    RemAssign,
}

impl OperatorKind {
    /// Map a `syn` operator onto a mutable operator, if it is one
    pub fn from_bin_op(op: &BinOp) -> Option<Self> {
        let kind = match op {
            BinOp::Add(_) => OperatorKind::Add,
            BinOp::Sub(_) => OperatorKind::Sub,
            BinOp::Mul(_) => OperatorKind::Mul,
            BinOp::Div(_) => OperatorKind::Div,
            BinOp::Rem(_) => OperatorKind::Rem,
            BinOp::Lt(_) => OperatorKind::Lt,
            BinOp::Le(_) => OperatorKind::Le,
            BinOp::Gt(_) => OperatorKind::Gt,
            BinOp::Ge(_) => OperatorKind::Ge,
            BinOp::Eq(_) => OperatorKind::Eq,
            BinOp::Ne(_) => OperatorKind::Ne,
            BinOp::And(_) => OperatorKind::And,
            BinOp::Or(_) => OperatorKind::Or,
            BinOp::AddAssign(_) => OperatorKind::AddAssign,
            BinOp::SubAssign(_) => OperatorKind::SubAssign,
            BinOp::MulAssign(_) => OperatorKind::MulAssign,
            BinOp::DivAssign(_) => OperatorKind::DivAssign,
            BinOp::RemAssign(_) => OperatorKind::RemAssign,
            _ => return None,
        };
        Some(kind)
    }

    /// Build the `syn` operator, reusing the original token spans
    pub fn to_bin_op(self, spans: OpSpans) -> BinOp {
        let one = spans.first;
        let two = [spans.first, spans.second];
        match self {
            OperatorKind::Add => BinOp::Add(Token![+](one)),
            OperatorKind::Sub => BinOp::Sub(Token![-](one)),
            OperatorKind::Mul => BinOp::Mul(Token![*](one)),
            OperatorKind::Div => BinOp::Div(Token![/](one)),
            OperatorKind::Rem => BinOp::Rem(Token![%](one)),
            OperatorKind::Lt => BinOp::Lt(Token![<](one)),
            OperatorKind::Le => BinOp::Le(Token![<=](two)),
            OperatorKind::Gt => BinOp::Gt(Token![>](one)),
            OperatorKind::Ge => BinOp::Ge(Token![>=](two)),
            OperatorKind::Eq => BinOp::Eq(Token![==](two)),
            OperatorKind::Ne => BinOp::Ne(Token![!=](two)),
            OperatorKind::And => BinOp::And(Token![&&](two)),
            OperatorKind::Or => BinOp::Or(Token![||](two)),
            OperatorKind::AddAssign => BinOp::AddAssign(Token![+=](two)),
            OperatorKind::SubAssign => BinOp::SubAssign(Token![-=](two)),
            OperatorKind::MulAssign => BinOp::MulAssign(Token![*=](two)),
            OperatorKind::DivAssign => BinOp::DivAssign(Token![/=](two)),
            OperatorKind::RemAssign => BinOp::RemAssign(Token![%=](two)),
        }
    }

    /// The node kind this operator appears on
    pub fn node_kind(self) -> NodeKind {
        match self {
            OperatorKind::Add
            | OperatorKind::Sub
            | OperatorKind::Mul
            | OperatorKind::Div
            | OperatorKind::Rem => NodeKind::BinaryOperation,
            OperatorKind::Lt
            | OperatorKind::Le
            | OperatorKind::Gt
            | OperatorKind::Ge
            | OperatorKind::Eq
            | OperatorKind::Ne => NodeKind::Comparison,
            OperatorKind::And | OperatorKind::Or => NodeKind::LogicalOperation,
            OperatorKind::AddAssign
            | OperatorKind::SubAssign
            | OperatorKind::MulAssign
            | OperatorKind::DivAssign
            | OperatorKind::RemAssign => NodeKind::CompoundAssignment,
        }
    }

    /// Source-level spelling
    pub fn symbol(self) -> &'static str {
        match self {
            OperatorKind::Add => "+",
            OperatorKind::Sub => "-",
            OperatorKind::Mul => "*",
            OperatorKind::Div => "/",
            OperatorKind::Rem => "%",
            OperatorKind::Lt => "<",
            OperatorKind::Le => "<=",
            OperatorKind::Gt => ">",
            OperatorKind::Ge => ">=",
            OperatorKind::Eq => "==",
            OperatorKind::Ne => "!=",
            OperatorKind::And => "&&",
            OperatorKind::Or => "||",
            OperatorKind::AddAssign => "+=",
            OperatorKind::SubAssign => "-=",
            OperatorKind::MulAssign => "*=",
            OperatorKind::DivAssign => "/=",
            OperatorKind::RemAssign => "%=",
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Spans of the (at most two) punctuation characters of an operator token
#[derive(Debug, Clone, Copy)]
pub struct OpSpans {
    pub first: Span,
    pub second: Span,
}

impl OpSpans {
    /// Read the spans of an existing operator
    pub fn of(op: &BinOp) -> Self {
        let mut spans = op.to_token_stream().into_iter().map(|t| t.span());
        let first = spans.next().unwrap_or_else(Span::call_site);
        let second = spans.next().unwrap_or(first);
        Self { first, second }
    }

    /// 1-indexed line and column of the operator
    pub fn line_column(&self) -> (usize, usize) {
        let start = self.first.start();
        (start.line, start.column + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn op_of(src: &str) -> BinOp {
        match syn::parse_str::<syn::Expr>(src).unwrap() {
            syn::Expr::Binary(bin) => bin.op,
            other => panic!("not a binary expression: {:?}", other),
        }
    }

    #[test]
    fn test_classify_node_kinds() {
        assert_eq!(NodeKind::of(&op_of("a + b")), Some(NodeKind::BinaryOperation));
        assert_eq!(NodeKind::of(&op_of("a << b")), Some(NodeKind::BinaryOperation));
        assert_eq!(NodeKind::of(&op_of("a && b")), Some(NodeKind::LogicalOperation));
        assert_eq!(NodeKind::of(&op_of("a >= b")), Some(NodeKind::Comparison));
        assert_eq!(NodeKind::of(&op_of("a |= b")), Some(NodeKind::CompoundAssignment));
    }

    #[test]
    fn test_bitwise_operators_are_not_mutable() {
        assert_eq!(OperatorKind::from_bin_op(&op_of("a ^ b")), None);
        assert_eq!(OperatorKind::from_bin_op(&op_of("a <<= b")), None);
        assert_eq!(OperatorKind::from_bin_op(&op_of("a % b")), Some(OperatorKind::Rem));
    }

    #[test]
    fn test_rebuilt_operator_matches_kind() {
        let original = op_of("a - b");
        let spans = OpSpans::of(&original);
        let rebuilt = OperatorKind::Le.to_bin_op(spans);
        assert_eq!(OperatorKind::from_bin_op(&rebuilt), Some(OperatorKind::Le));
        assert_eq!(NodeKind::of(&rebuilt), Some(OperatorKind::Le.node_kind()));
    }

    #[test]
    fn test_operator_line_column() {
        let expr: syn::Expr = syn::parse_str("first\n    * second").unwrap();
        let syn::Expr::Binary(bin) = expr else {
            panic!("expected binary expression");
        };
        assert_eq!(OpSpans::of(&bin.op).line_column(), (2, 5));
    }
}
