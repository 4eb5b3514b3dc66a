//! Train operators and brands.

use std::fmt;

/// An operating company, or a brand run by one (e.g. a sleeper service).
///
/// Brands share the same shape as operators; which one a value is depends on
/// where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    pub id: i64,
    pub name: String,
    /// Two-letter code, e.g. "GR".
    pub code: Option<String>,
    /// Text colour as a CSS colour string.
    pub fg: Option<String>,
    /// Background colour as a CSS colour string.
    pub bg: Option<String>,
}

impl Operator {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            code: None,
            fg: None,
            bg: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_colours(mut self, fg: impl Into<String>, bg: impl Into<String>) -> Self {
        self.fg = Some(fg.into());
        self.bg = Some(bg.into());
        self
    }

    /// Code if known, else the name.
    pub fn short_name(&self) -> &str {
        self.code.as_deref().unwrap_or(&self.name)
    }
}

/// Picks the brand when there is one, else the operator.
pub fn branded<'a>(operator: &'a Operator, brand: Option<&'a Operator>) -> &'a Operator {
    brand.unwrap_or(operator)
}

/// Identity of an operator statistic. Operator and brand ids come from
/// separate sequences, so the kind is part of the key.
///
/// # Examples
///
/// ```
/// use train_stats::domain::OperatorKey;
///
/// assert_eq!(OperatorKey::new(7, true).to_string(), "7-B");
/// assert_eq!(OperatorKey::new(7, false).to_string(), "7-O");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperatorKey {
    pub id: i64,
    pub is_brand: bool,
}

impl OperatorKey {
    pub fn new(id: i64, is_brand: bool) -> Self {
        Self { id, is_brand }
    }
}

impl fmt::Display for OperatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_brand { 'B' } else { 'O' };
        write!(f, "{}-{}", self.id, kind)
    }
}
