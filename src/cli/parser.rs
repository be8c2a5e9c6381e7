use std::collections::BTreeMap;

use super::schema::{OptionKind, OptionSchema, OptionSpec};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Bool(bool),
    Str(String),
}

/// Result of the tolerant option pass: known options by name plus every
/// other token in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOptions {
    values: BTreeMap<String, OptionValue>,
    positionals: Vec<String>,
}

impl ParsedOptions {
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(OptionValue::Bool(true)))
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(OptionValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn value(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positionals.get(index).map(String::as_str)
    }
}

/// Values that switch a boolean option off when given inline (`--flag=false`).
const FALSY_INLINE: [&str; 3] = ["false", "0", "no"];

/// Parse `args` (program name already stripped) against `schema`.
///
/// Never fails: tokens that do not name a known option, including unknown
/// `--flag` forms, are kept as positionals. Everything after a literal `--`
/// is positional.
pub fn parse_options<S: AsRef<str>>(args: &[S], schema: &OptionSchema) -> ParsedOptions {
    let mut values = BTreeMap::new();
    for spec in schema.iter() {
        if let (OptionKind::Boolean, Some(default)) = (spec.kind, spec.default) {
            values.insert(spec.name.to_string(), OptionValue::Bool(default));
        }
    }

    let mut positionals = Vec::new();
    let mut i = 0;
    while i < args.len() {
        let token = args[i].as_ref();
        i += 1;

        if token == "--" {
            positionals.extend(args[i..].iter().map(|a| a.as_ref().to_string()));
            break;
        }

        let Some((spec, inline)) = lookup(token, schema) else {
            positionals.push(token.to_string());
            continue;
        };

        match spec.kind {
            OptionKind::Boolean => {
                let on = inline.is_none_or(|v| !FALSY_INLINE.contains(&v));
                values.insert(spec.name.to_string(), OptionValue::Bool(on));
            }
            OptionKind::String => {
                if let Some(v) = inline {
                    values.insert(spec.name.to_string(), OptionValue::Str(v.to_string()));
                } else if let Some(next) = args.get(i).map(AsRef::as_ref)
                    && !next.starts_with('-')
                {
                    values.insert(spec.name.to_string(), OptionValue::Str(next.to_string()));
                    i += 1;
                } else {
                    tracing::debug!(option = spec.name, "option given without a value");
                }
            }
        }
    }

    ParsedOptions {
        values,
        positionals,
    }
}

/// Match `--name[=value]` or `-s[=value]` against the schema.
fn lookup<'a, 's>(token: &'a str, schema: &'s OptionSchema) -> Option<(&'s OptionSpec, Option<&'a str>)> {
    let (body, long) = if let Some(rest) = token.strip_prefix("--") {
        (rest, true)
    } else if let Some(rest) = token.strip_prefix('-') {
        (rest, false)
    } else {
        return None;
    };

    let (name, inline) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };

    let spec = if long {
        schema.by_name(name)
    } else {
        schema.by_short(name)
    }?;
    Some((spec, inline))
}
