use super::type_expr::FunctionParam;
use super::type_expr::TypeEntityName;
use super::type_expr::TypeExpr;
use super::type_expr::TypeLiteral;
use super::type_expr::TypeMember;
use super::type_expr::TypePropertyKey;

impl TypeEntityName {
  pub fn to_source(&self) -> String {
    match self {
      TypeEntityName::Identifier(name) => name.clone(),
      TypeEntityName::Qualified(segments) => segments.join("."),
    }
  }
}

impl TypePropertyKey {
  pub fn to_source(&self) -> String {
    match self {
      TypePropertyKey::Identifier(name) => name.clone(),
      TypePropertyKey::String(text) => format!("\"{}\"", text),
      TypePropertyKey::Number(text) => text.clone(),
      TypePropertyKey::Computed(path) => format!("[{}]", path.join(".")),
    }
  }
}

fn params_to_source(parameters: &[crate::ast::node::Node<FunctionParam>]) -> String {
  parameters
    .iter()
    .map(|p| {
      let mut out = String::new();
      if p.stx.rest {
        out.push_str("...");
      };
      out.push_str(&p.stx.name);
      if p.stx.optional {
        out.push('?');
      };
      if let Some(annotation) = &p.stx.type_annotation {
        out.push_str(": ");
        out.push_str(&annotation.stx.to_source());
      };
      out
    })
    .collect::<Vec<_>>()
    .join(", ")
}

fn member_to_source(member: &TypeMember) -> String {
  match member {
    TypeMember::Property(p) => {
      let mut out = String::new();
      if p.readonly {
        out.push_str("readonly ");
      };
      out.push_str(&p.key.to_source());
      if p.optional {
        out.push('?');
      };
      if let Some(annotation) = &p.type_annotation {
        out.push_str(": ");
        out.push_str(&annotation.stx.to_source());
      };
      out
    }
    TypeMember::Method(m) => {
      let mut out = m.key.to_source();
      if m.optional {
        out.push('?');
      };
      out.push('(');
      out.push_str(&params_to_source(&m.parameters));
      out.push(')');
      if let Some(ret) = &m.return_type {
        out.push_str(": ");
        out.push_str(&ret.stx.to_source());
      };
      out
    }
    TypeMember::Construct(c) => {
      let mut out = format!("new ({})", params_to_source(&c.parameters));
      if let Some(ret) = &c.return_type {
        out.push_str(": ");
        out.push_str(&ret.stx.to_source());
      };
      out
    }
    TypeMember::CallSignature(c) => {
      let mut out = format!("({})", params_to_source(&c.parameters));
      if let Some(ret) = &c.return_type {
        out.push_str(": ");
        out.push_str(&ret.stx.to_source());
      };
      out
    }
    TypeMember::IndexSignature(i) => {
      let mut out = String::new();
      if i.readonly {
        out.push_str("readonly ");
      };
      out.push_str(&format!(
        "[{}: {}]: {}",
        i.parameter_name,
        i.parameter_type.stx.to_source(),
        i.type_annotation.stx.to_source()
      ));
      out
    }
  }
}

impl TypeExpr {
  /// Renders this type expression back to source text with normalised whitespace.
  pub fn to_source(&self) -> String {
    match self {
      TypeExpr::Any => "any".to_string(),
      TypeExpr::Unknown => "unknown".to_string(),
      TypeExpr::Never => "never".to_string(),
      TypeExpr::Void => "void".to_string(),
      TypeExpr::String => "string".to_string(),
      TypeExpr::Number => "number".to_string(),
      TypeExpr::Boolean => "boolean".to_string(),
      TypeExpr::Object => "object".to_string(),
      TypeExpr::Null => "null".to_string(),
      TypeExpr::Undefined => "undefined".to_string(),
      TypeExpr::Reference(r) => {
        let mut out = r.name.to_source();
        if let Some(args) = &r.type_arguments {
          out.push('<');
          out.push_str(
            &args
              .iter()
              .map(|a| a.stx.to_source())
              .collect::<Vec<_>>()
              .join(", "),
          );
          out.push('>');
        };
        out
      }
      TypeExpr::Literal(TypeLiteral::String(text)) => format!("\"{}\"", text),
      TypeExpr::Literal(TypeLiteral::Number(text)) => text.clone(),
      TypeExpr::Literal(TypeLiteral::Boolean(value)) => value.to_string(),
      TypeExpr::Array(a) => {
        let element = a.element_type.stx.to_source();
        // Compound element types must be parenthesised to keep the same binding.
        match &*a.element_type.stx {
          TypeExpr::Union(_) | TypeExpr::Intersection(_) | TypeExpr::Function(_) => {
            format!("({})[]", element)
          }
          _ => format!("{}[]", element),
        }
      }
      TypeExpr::Tuple(t) => {
        format!(
          "[{}]",
          t.elements
            .iter()
            .map(|e| e.stx.to_source())
            .collect::<Vec<_>>()
            .join(", ")
        )
      }
      TypeExpr::Union(u) => u
        .types
        .iter()
        .map(|t| t.stx.to_source())
        .collect::<Vec<_>>()
        .join(" | "),
      TypeExpr::Intersection(i) => i
        .types
        .iter()
        .map(|t| t.stx.to_source())
        .collect::<Vec<_>>()
        .join(" & "),
      TypeExpr::Function(f) => {
        format!(
          "({}) => {}",
          params_to_source(&f.parameters),
          f.return_type.stx.to_source()
        )
      }
      TypeExpr::ObjectLiteral(o) => {
        if o.members.is_empty() {
          return "{}".to_string();
        };
        format!(
          "{{ {} }}",
          o.members
            .iter()
            .map(|m| member_to_source(&m.stx))
            .collect::<Vec<_>>()
            .join("; ")
        )
      }
      TypeExpr::Parenthesized(p) => format!("({})", p.type_expr.stx.to_source()),
    }
  }
}
