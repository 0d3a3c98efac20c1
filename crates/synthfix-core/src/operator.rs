//! Overloadable binary operators.
//!
//! Used both as the operator tag of a declared operator member and as the
//! operator of a binary expression in the code model.

use std::fmt;

/// Binary operators relevant to synthesized code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
}

impl Operator {
    /// The relational operators, in the order they are synthesized.
    pub const RELATIONAL: [Operator; 4] = [
        Operator::Less,
        Operator::LessEqual,
        Operator::Greater,
        Operator::GreaterEqual,
    ];

    /// Source token.
    pub const fn token(self) -> &'static str {
        match self {
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::Less => "<",
            Operator::LessEqual => "<=",
            Operator::Greater => ">",
            Operator::GreaterEqual => ">=",
        }
    }

    /// Evaluate this operator against the sign of a comparison result.
    ///
    /// `cmp` is any signed integer; only its sign is inspected.
    pub fn holds_for(self, cmp: i64) -> bool {
        match self {
            Operator::Equal => cmp == 0,
            Operator::NotEqual => cmp != 0,
            Operator::Less => cmp < 0,
            Operator::LessEqual => cmp <= 0,
            Operator::Greater => cmp > 0,
            Operator::GreaterEqual => cmp >= 0,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
