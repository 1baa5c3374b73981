//! Package Requirement Value Object
//!
//! One parsed line of a dependency manifest: a package name plus an optional
//! version constraint (`==`, `>=`, `<=`, `>`, `<`). A bare name accepts any
//! version.

use std::fmt;

use super::Version;

/// Version constraint attached to a requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// No constraint: any available version
    Any,
    /// Exactly this version
    Exact(Version),
    /// This version or newer
    AtLeast(Version),
    /// This version or older
    AtMost(Version),
    /// Strictly newer than this version
    Greater(Version),
    /// Strictly older than this version
    Less(Version),
}

impl Constraint {
    /// Check whether `version` satisfies this constraint
    pub fn matches(&self, version: &Version) -> bool {
        match self {
            Constraint::Any => true,
            Constraint::Exact(v) => version == v,
            Constraint::AtLeast(v) => version >= v,
            Constraint::AtMost(v) => version <= v,
            Constraint::Greater(v) => version > v,
            Constraint::Less(v) => version < v,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Any => write!(f, "*"),
            Constraint::Exact(v) => write!(f, "=={}", v),
            Constraint::AtLeast(v) => write!(f, ">={}", v),
            Constraint::AtMost(v) => write!(f, "<={}", v),
            Constraint::Greater(v) => write!(f, ">{}", v),
            Constraint::Less(v) => write!(f, "<{}", v),
        }
    }
}

/// A declared package requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    pub constraint: Constraint,
}

impl Requirement {
    /// Operators in match order: two-character operators must win over
    /// their one-character prefixes.
    const OPERATORS: [&'static str; 5] = ["==", ">=", "<=", ">", "<"];

    /// Parse a single requirement like `uvicorn>=0.30` or `httpx`
    pub fn parse(input: &str) -> Result<Self, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err("empty requirement".to_string());
        }

        let (name, rest) = match Self::OPERATORS
            .iter()
            .filter_map(|op| input.find(op).map(|at| (at, *op)))
            .min_by_key(|(at, _)| *at)
        {
            Some((at, op)) => (&input[..at], Some((op, &input[at + op.len()..]))),
            None => (input, None),
        };

        let name = name.trim();
        Self::validate_name(name)?;

        let constraint = match rest {
            None => Constraint::Any,
            Some((op, version_str)) => {
                let version = Version::parse(version_str.trim())
                    .map_err(|e| format!("bad version after '{}': {}", op, e))?;
                match op {
                    "==" => Constraint::Exact(version),
                    ">=" => Constraint::AtLeast(version),
                    "<=" => Constraint::AtMost(version),
                    ">" => Constraint::Greater(version),
                    "<" => Constraint::Less(version),
                    _ => unreachable!("operator table covers all arms"),
                }
            }
        };

        Ok(Self {
            name: name.to_string(),
            constraint,
        })
    }

    /// Check whether `version` satisfies this requirement
    pub fn matches(&self, version: &Version) -> bool {
        self.constraint.matches(version)
    }

    fn validate_name(name: &str) -> Result<(), String> {
        let mut bytes = name.bytes();
        match bytes.next() {
            None => return Err("missing package name".to_string()),
            Some(first) if !first.is_ascii_alphanumeric() => {
                return Err(format!("package name '{}' must start alphanumeric", name));
            }
            Some(_) => {}
        }
        if !name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'_' || b == b'-')
        {
            return Err(format!("package name '{}' has invalid characters", name));
        }
        Ok(())
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.constraint {
            Constraint::Any => write!(f, "{}", self.name),
            constraint => write!(f, "{}{}", self.name, constraint),
        }
    }
}
