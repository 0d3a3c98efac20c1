//! Text rendering of code-model nodes.
//!
//! Produces canonical C#-style text with four-space indentation. Final
//! formatting inside a real document is the host formatter's concern; this
//! rendering is what tests and simple hosts consume.

use std::fmt::{self, Write};

use crate::{MemberModifiers, Visibility};

use super::{
    Body, Expr, Literal, MemberDecl, MethodDecl, OperatorDecl, ParamDecl, PropertyBody,
    PropertyDecl, Stmt, TypeExpr,
};

const INDENT: &str = "    ";

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{}", v),
            Literal::Bool(v) => write!(f, "{}", v),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(lit) => write!(f, "{}", lit),
            Expr::Ident(name) => f.write_str(name),
            Expr::This => f.write_str("this"),
            Expr::Member(m) => write!(f, "{}.{}", m.target, m.name),
            Expr::Call(c) => {
                write!(f, "{}(", c.callee)?;
                for (i, arg) in c.args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Expr::Binary(b) => write!(f, "{} {} {}", b.left, b.op, b.right),
            Expr::Cast(c) => write!(f, "({}){}", c.ty, c.expr),
            Expr::Paren(inner) => write!(f, "({})", inner),
            Expr::Assign(a) => write!(f, "{} = {}", a.target, a.value),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Expr(e) => write!(f, "{};", e),
            Stmt::Return(Some(e)) => write!(f, "return {};", e),
            Stmt::Return(None) => f.write_str("return;"),
        }
    }
}

impl fmt::Display for MemberDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_member(self, 0))
    }
}

/// Render a member declaration at the given indentation depth.
pub fn render_member(decl: &MemberDecl, depth: usize) -> String {
    let mut out = String::new();
    let pad = INDENT.repeat(depth);
    match decl {
        MemberDecl::Method(m) => render_method(&mut out, &pad, m),
        MemberDecl::Operator(o) => render_operator(&mut out, &pad, o),
        MemberDecl::Property(p) => render_property(&mut out, &pad, p),
    }
    out
}

fn modifier_prefix(visibility: Option<Visibility>, modifiers: MemberModifiers) -> String {
    let mut prefix = String::new();
    if let Some(v) = visibility {
        let _ = write!(prefix, "{} ", v);
    }
    for (flag, word) in [
        (MemberModifiers::STATIC, "static"),
        (MemberModifiers::ABSTRACT, "abstract"),
        (MemberModifiers::VIRTUAL, "virtual"),
        (MemberModifiers::SEALED, "sealed"),
        (MemberModifiers::OVERRIDE, "override"),
    ] {
        if modifiers.contains(flag) {
            prefix.push_str(word);
            prefix.push(' ');
        }
    }
    prefix
}

fn render_params(params: &[ParamDecl]) -> String {
    params
        .iter()
        .map(|p| format!("{} {}", p.ty, p.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn member_name(explicit_interface: &Option<TypeExpr>, name: &str) -> String {
    match explicit_interface {
        Some(iface) => format!("{}.{}", iface, name),
        None => name.to_string(),
    }
}

fn render_body(out: &mut String, pad: &str, header: &str, body: &Body) {
    match body {
        Body::Expression(e) => {
            let _ = writeln!(out, "{}{} => {};", pad, header, e);
        }
        Body::Block(stmts) => {
            let _ = writeln!(out, "{}{}", pad, header);
            let _ = writeln!(out, "{}{{", pad);
            for stmt in stmts {
                let _ = writeln!(out, "{}{}{}", pad, INDENT, stmt);
            }
            let _ = writeln!(out, "{}}}", pad);
        }
    }
}

fn render_method(out: &mut String, pad: &str, m: &MethodDecl) {
    let header = format!(
        "{}{} {}({})",
        modifier_prefix(m.visibility, m.modifiers),
        m.return_type,
        member_name(&m.explicit_interface, &m.name),
        render_params(&m.params)
    );
    render_body(out, pad, &header, &m.body);
}

fn render_operator(out: &mut String, pad: &str, o: &OperatorDecl) {
    let header = format!(
        "public static {} operator {}({})",
        o.return_type,
        o.op,
        render_params(&o.params)
    );
    render_body(out, pad, &header, &o.body);
}

fn render_property(out: &mut String, pad: &str, p: &PropertyDecl) {
    let header = format!(
        "{}{} {}",
        modifier_prefix(p.visibility, p.modifiers),
        p.ty,
        member_name(&p.explicit_interface, &p.name)
    );
    match &p.body {
        PropertyBody::Expression(e) => {
            let _ = writeln!(out, "{}{} => {};", pad, header, e);
        }
        PropertyBody::Accessors { getter, setter } => {
            let accessors = [("get", getter), ("set", setter)];
            let inline = accessors
                .iter()
                .all(|(_, body)| body.as_ref().is_none_or(Body::is_expression));
            if inline {
                let _ = write!(out, "{}{} {{", pad, header);
                for (keyword, body) in accessors {
                    if let Some(Body::Expression(e)) = body {
                        let _ = write!(out, " {} => {};", keyword, e);
                    }
                }
                let _ = writeln!(out, " }}");
            } else {
                let _ = writeln!(out, "{}{}", pad, header);
                let _ = writeln!(out, "{}{{", pad);
                let inner = format!("{}{}", pad, INDENT);
                for (keyword, body) in accessors {
                    if let Some(body) = body {
                        render_body(out, &inner, keyword, body);
                    }
                }
                let _ = writeln!(out, "{}}}", pad);
            }
        }
    }
}
