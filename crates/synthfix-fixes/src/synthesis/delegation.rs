//! Forwarding members through a delegation candidate.
//!
//! Every unimplemented member of the candidate's gap becomes one member on
//! the fixed type whose body forwards to the same member of the candidate:
//! an `override` for abstract class gaps, a public implementation for
//! interface gaps.

use std::sync::Arc;

use synthfix_core::syntax::{
    Expr, MemberDecl, MethodDecl, ParamDecl, PropertyBody, PropertyDecl, TypeExpr,
};
use synthfix_core::{
    DataType, MemberCategory, MemberEntry, MemberKind, MemberModifiers, MemberSource, Visibility,
};
use synthfix_model::SemanticModel;

use super::{
    Candidate, StrategyTag, SynthesisContext, SynthesisPlan, SynthesizedMember, forwarding_body,
};
use crate::FixError;
use crate::discovery::{DelegationCandidate, GapKind};

/// Build forwarding members for every member of the candidate's gap.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn synthesize_delegation(
    context: &SynthesisContext<'_>,
    candidate: &Candidate,
) -> Result<SynthesisPlan, FixError> {
    let Candidate::Delegation(candidate) = candidate else {
        return Err(FixError::CandidateMismatch {
            strategy: StrategyTag::DelegateThroughMember,
            candidate: candidate.kind_name(),
        });
    };

    let access = delegation_access(context.model, candidate);
    let members = candidate
        .gap
        .members
        .iter()
        .filter_map(|member| forward(context, candidate.gap.kind, &access, member))
        .collect();

    Ok(SynthesisPlan::new(context.target, members))
}

/// Expression reaching the candidate: its name, or `((IInterface)this).Name`
/// for an explicit interface implementation.
pub fn delegation_access(model: &dyn SemanticModel, candidate: &DelegationCandidate) -> Expr {
    let member = &candidate.member;
    match &member.explicit_interface {
        Some(interface) => {
            let interface = model.display_name(&DataType::Named(interface.clone()));
            Expr::This
                .cast_to(TypeExpr::new(interface))
                .member(&member.name)
        }
        None => Expr::ident(&member.name),
    }
}

fn forward(
    context: &SynthesisContext<'_>,
    kind: GapKind,
    access: &Expr,
    member: &MemberEntry,
) -> Option<SynthesizedMember> {
    let (visibility, modifiers) = match kind {
        GapKind::AbstractClass => (member.visibility, MemberModifiers::OVERRIDE),
        GapKind::Interface => (Visibility::Public, MemberModifiers::empty()),
    };
    let type_expr = |ty: &DataType| TypeExpr::new(context.model.display_name(ty));
    let forwarded = access.clone().member(&member.name);

    let syntax = match &member.kind {
        MemberKind::Method(method) => {
            let args = method.params.iter().map(|p| Expr::ident(&p.name)).collect();
            let preference = context.style.expression_body(MemberCategory::Method);
            MemberDecl::Method(MethodDecl {
                visibility: Some(visibility),
                modifiers,
                return_type: type_expr(&method.return_type),
                explicit_interface: None,
                name: member.name.clone(),
                params: method
                    .params
                    .iter()
                    .map(|p| ParamDecl::new(type_expr(&p.data_type), &p.name))
                    .collect(),
                body: forwarding_body(
                    preference,
                    forwarded.call(args),
                    !method.return_type.is_void(),
                ),
            })
        }
        MemberKind::Property(property) => {
            let preference = context.style.expression_body(MemberCategory::Property);
            let getter_only = property.has_getter && !property.has_setter;
            let body = if getter_only && preference.use_expression_body(true) {
                PropertyBody::Expression(forwarded)
            } else {
                PropertyBody::Accessors {
                    getter: property
                        .has_getter
                        .then(|| forwarding_body(preference, forwarded.clone(), true)),
                    setter: property.has_setter.then(|| {
                        let assign = forwarded.clone().assign(Expr::ident("value"));
                        forwarding_body(preference, assign, false)
                    }),
                }
            };
            MemberDecl::Property(PropertyDecl {
                visibility: Some(visibility),
                modifiers,
                ty: type_expr(&property.data_type),
                explicit_interface: None,
                name: member.name.clone(),
                body,
            })
        }
        // Fields are never abstract and never interface members.
        MemberKind::Field(_) => return None,
    };

    let syntax = Arc::new(syntax);
    let mut entry = member.clone();
    entry.owner = context.target;
    entry.visibility = visibility;
    entry.modifiers = modifiers;
    entry.explicit_interface = None;
    entry.source = MemberSource::Synthesized(Arc::clone(&syntax));

    Some(SynthesizedMember { entry, syntax })
}
