use super::*;
use std::fmt::{self, Display, Formatter};

fn write_list<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

fn write_inner(f: &mut Formatter<'_>, filter: &Option<Box<ObjectFilter>>) -> fmt::Result {
    match filter {
        Some(filter) => write!(f, ", {}", filter),
        None => Ok(()),
    }
}

impl Display for ObjectFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ObjectFilter::All => write!(f, "ALL"),
            ObjectFilter::None => write!(f, "NONE"),
            ObjectFilter::And(members) => {
                write!(f, "AND(")?;
                write_list(f, members)?;
                write!(f, ")")
            }
            ObjectFilter::Or(members) => {
                write!(f, "OR(")?;
                write_list(f, members)?;
                write!(f, ")")
            }
            ObjectFilter::Not(inner) => write!(f, "NOT({})", inner),
            ObjectFilter::Equal(value) => write!(f, "EQUAL({})", value),
            ObjectFilter::AnyIn(value) => write!(f, "ANY_IN({})", value),
            ObjectFilter::Greater(cmp) => write!(f, "{}({})", if cmp.or_equal { "GREATER_OR_EQUAL" } else { "GREATER" }, cmp.value),
            ObjectFilter::Less(cmp) => write!(f, "{}({})", if cmp.or_equal { "LESS_OR_EQUAL" } else { "LESS" }, cmp.value),
            ObjectFilter::Substring(sub) => {
                let name = match (sub.anchor_start, sub.anchor_end) {
                    (true, false) => "STARTS_WITH",
                    (false, true) => "ENDS_WITH",
                    _ => "SUBSTRING",
                };
                write!(f, "{}({})", name, sub.value)
            }
            ObjectFilter::FuzzyMatch(fuzzy) => {
                match fuzzy.method {
                    FuzzyMatchingMethod::Levenshtein { threshold, inclusive } => write!(f, "LEVENSHTEIN({}, {}, {}, ", fuzzy.path, threshold, inclusive)?,
                    FuzzyMatchingMethod::Similarity { threshold, inclusive } => write!(f, "SIMILARITY({}, {}, {}, ", fuzzy.path, threshold, inclusive)?,
                }
                write!(f, "[")?;
                write_list(f, &fuzzy.values)?;
                write!(f, "])")
            }
            ObjectFilter::Exists(exists) => {
                write!(f, "EXISTS({}", exists.path)?;
                write_inner(f, &exists.filter)?;
                write!(f, ")")
            }
            ObjectFilter::FullText(full_text) => {
                write!(f, "FULL_TEXT(")?;
                write_list(f, &full_text.values)?;
                write!(f, ")")
            }
            ObjectFilter::InOid(in_oid) => {
                write!(f, "{}(", if in_oid.consider_owner { "OWNED_BY_OID" } else { "IN_OID" })?;
                write_list(f, &in_oid.oids)?;
                write!(f, ")")
            }
            ObjectFilter::InOrg(org) => write!(f, "ORG({}, {:?})", org.base_oid, org.scope),
            ObjectFilter::IsRoot => write!(f, "ORG(ROOT)"),
            ObjectFilter::Type(type_filter) => write!(f, "TYPE({}, {})", type_filter.type_name.local, type_filter.filter),
            ObjectFilter::ReferencedBy(by) => {
                write!(f, "REFERENCED_BY({}", by.type_name.local)?;
                if let Some(path) = &by.path {
                    write!(f, ", {}", path)?;
                }
                if let Some(relation) = &by.relation {
                    write!(f, ", {}", relation.local)?;
                }
                write_inner(f, &by.filter)?;
                write!(f, ")")
            }
            ObjectFilter::OwnedBy(by) => {
                write!(f, "OWNED_BY({}", by.type_name.local)?;
                if let Some(path) = &by.path {
                    write!(f, ", {}", path)?;
                }
                write_inner(f, &by.filter)?;
                write!(f, ")")
            }
            ObjectFilter::Ref(reference) => {
                write!(f, "REF({}, ", reference.path)?;
                match &reference.right {
                    RefRight::Values(values) => {
                        write!(f, "[")?;
                        let rendered: Vec<String> = values.iter().map(|v| Value::Reference(v.clone()).to_string()).collect();
                        write_list(f, &rendered)?;
                        write!(f, "]")?;
                    }
                    RefRight::Expression(_) => write!(f, "<expression>")?,
                }
                write_inner(f, &reference.target_filter)?;
                write!(f, ")")
            }
        }
    }
}

impl Display for ValueFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        if let Some(rule) = &self.matching_rule {
            write!(f, "[{}]", rule.local)?;
        }
        match &self.right {
            RightHandSide::Values(values) if values.is_empty() => write!(f, ", <no value>"),
            RightHandSide::Values(values) => {
                write!(f, ", ")?;
                write_list(f, values)
            }
            RightHandSide::Path { path, .. } => write!(f, ", {}", path),
            RightHandSide::Expression(_) => write!(f, ", <expression>"),
        }
    }
}
