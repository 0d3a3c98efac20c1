//! Relational operators over a comparison method.
//!
//! For a contract `IComparable<U>` on `Self`, emits
//! `public static bool operator OP(Self left, U right) => left.CompareTo(right) OP 0;`
//! for `<`, `<=`, `>`, `>=`. When the comparison method is not public the
//! receiver is cast to the contract first.

use std::sync::Arc;

use synthfix_core::syntax::{Expr, MemberDecl, OperatorDecl, ParamDecl, TypeExpr};
use synthfix_core::{
    DataType, MemberCategory, MemberEntry, MemberSource, Operator, Param, PrimitiveKind,
    TypeEntry,
};

use super::{
    Candidate, StrategyTag, SynthesisContext, SynthesisPlan, SynthesizedMember, forwarding_body,
};
use crate::FixError;

/// Build the four relational operators for a comparison contract.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn synthesize_comparison_operators(
    context: &SynthesisContext<'_>,
    candidate: &Candidate,
) -> Result<SynthesisPlan, FixError> {
    let Candidate::Comparison(contract) = candidate else {
        return Err(FixError::CandidateMismatch {
            strategy: StrategyTag::ComparisonOperators,
            candidate: candidate.kind_name(),
        });
    };
    let Some(class) = context
        .model
        .type_entry(context.target)
        .and_then(TypeEntry::as_class)
    else {
        return Err(FixError::MissingTarget(context.target.to_string()));
    };

    let model = context.model;
    let self_type = class.self_type();
    let bool_type = DataType::primitive(PrimitiveKind::Bool);
    let type_expr = |ty: &DataType| TypeExpr::new(model.display_name(ty));

    let receiver = if contract.needs_cast() {
        let interface = DataType::Named(contract.interface.clone());
        Expr::ident("left").cast_to(type_expr(&interface))
    } else {
        Expr::ident("left")
    };
    let comparison = receiver
        .member(&contract.method.name)
        .call(vec![Expr::ident("right")]);
    let preference = context.style.expression_body(MemberCategory::Operator);

    let members = Operator::RELATIONAL
        .iter()
        .map(|&op| {
            let syntax = Arc::new(MemberDecl::Operator(OperatorDecl {
                return_type: type_expr(&bool_type),
                op,
                params: vec![
                    ParamDecl::new(type_expr(&self_type), "left"),
                    ParamDecl::new(type_expr(&contract.compared), "right"),
                ],
                body: forwarding_body(
                    preference,
                    comparison.clone().binary(op, Expr::int(0)),
                    true,
                ),
            }));
            let entry = MemberEntry::operator(
                context.target,
                op,
                vec![
                    Param::new("left", self_type.clone()),
                    Param::new("right", contract.compared.clone()),
                ],
                bool_type.clone(),
            )
            .with_source(MemberSource::Synthesized(Arc::clone(&syntax)));
            SynthesizedMember { entry, syntax }
        })
        .collect();

    Ok(SynthesisPlan::new(context.target, members))
}
