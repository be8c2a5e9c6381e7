//! Declarative description of the options `ocf` understands itself.
//!
//! Anything not listed here is left alone by the option parser and, for the
//! wrangler-backed commands, forwarded untouched to wrangler.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Boolean,
    String,
}

#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    pub name: &'static str,
    pub kind: OptionKind,
    pub short: Option<char>,
    /// Only meaningful for boolean options.
    pub default: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct OptionSchema {
    options: Vec<OptionSpec>,
}

impl OptionSchema {
    pub fn new(options: Vec<OptionSpec>) -> Self {
        Self { options }
    }

    pub fn empty() -> Self {
        Self {
            options: Vec::new(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionSpec> {
        self.options.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name(name).is_some()
    }

    /// Long name or short alias.
    pub fn recognizes(&self, name: &str) -> bool {
        self.contains(name) || self.by_short(name).is_some()
    }

    pub fn by_name(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.name == name)
    }

    pub fn by_short(&self, short: &str) -> Option<&OptionSpec> {
        let mut chars = short.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return None;
        };
        self.options.iter().find(|o| o.short == Some(c))
    }
}

/// Options recognized by the `ocf` command line.
pub fn cli_schema() -> OptionSchema {
    OptionSchema::new(vec![
        OptionSpec {
            name: "skipBuild",
            kind: OptionKind::Boolean,
            short: Some('s'),
            default: Some(false),
        },
        OptionSpec {
            name: "output",
            kind: OptionKind::String,
            short: Some('o'),
            default: None,
        },
        OptionSpec {
            name: "noMinify",
            kind: OptionKind::Boolean,
            short: None,
            default: Some(false),
        },
        OptionSpec {
            name: "skipWranglerConfigCheck",
            kind: OptionKind::Boolean,
            short: None,
            default: Some(false),
        },
        OptionSpec {
            name: "cacheChunkSize",
            kind: OptionKind::String,
            short: None,
            default: None,
        },
    ])
}
