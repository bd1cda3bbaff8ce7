//! Structured schema violations.

use std::fmt;

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl Violation {
    /// A violation reported against the whole instance.
    pub fn at_root(schema_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            instance_path: String::new(),
            schema_path: schema_path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// Every violation found in one payload, in the order the validator
/// reported them. Empty means the payload conforms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// No violations.
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Iterate over the violations.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {v}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_display_format() {
        let v = Violation {
            instance_path: "/items/0/price".to_string(),
            schema_path: "/properties/items/items/properties/price/type".to_string(),
            message: r#""12" is not of type "integer""#.to_string(),
        };
        let display = v.to_string();
        assert!(display.starts_with("/items/0/price"));
        assert!(display.contains("is not of type"));
    }

    #[test]
    fn test_violation_display_root() {
        let v = Violation::at_root("/required", r#""id" is a required property"#);
        assert!(v.to_string().contains("(root)"));
    }

    #[test]
    fn test_violations_display_one_per_line() {
        let violations: Violations = vec![
            Violation::at_root("/required", "first"),
            Violation::at_root("/type", "second"),
        ]
        .into_iter()
        .collect();
        let display = violations.to_string();
        assert_eq!(display.lines().count(), 2);
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_none_is_empty() {
        assert!(Violations::none().is_empty());
        assert_eq!(Violations::none().to_string(), "");
    }
}
