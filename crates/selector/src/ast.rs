//! Defines the data model for parsed selectors.
//!
//! A [`SelectorList`] holds one or more comma-separated [`Chain`]s. A chain is a
//! non-empty vector of [`Step`]s; every step after the first records how it relates
//! to the step before it through its [`Combinator`].

use std::fmt;

/// A full selector: independent chains whose results are unioned in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    pub chains: Vec<Chain>,
}

impl SelectorList {
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }
}

/// A sequence of steps linked by combinators, e.g. `a > b + c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub steps: Vec<Step>,
}

impl Chain {
    /// Builds a chain, forcing the head step back to the descendant combinator
    /// since there is nothing before it to combine against.
    pub fn new(mut steps: Vec<Step>) -> Self {
        if let Some(head) = steps.first_mut() {
            head.combinator = Combinator::Descendant;
        }
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// True when `index` addresses the last step, whose matches become results.
    pub fn is_tail(&self, index: usize) -> bool {
        index + 1 == self.steps.len()
    }
}

/// One compound selector: a name test plus attribute and pseudo-class filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub name: NameTest,
    pub attributes: Vec<AttributePredicate>,
    pub pseudo_classes: Vec<PseudoClass>,
    /// Relation to the previous step. Ignored on the head of a chain.
    pub combinator: Combinator,
}

impl Step {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: NameTest::Name(name.into()),
            attributes: Vec::new(),
            pseudo_classes: Vec::new(),
            combinator: Combinator::Descendant,
        }
    }

    pub fn wildcard() -> Self {
        Self {
            name: NameTest::Wildcard,
            attributes: Vec::new(),
            pseudo_classes: Vec::new(),
            combinator: Combinator::Descendant,
        }
    }

    pub fn with_combinator(mut self, combinator: Combinator) -> Self {
        self.combinator = combinator;
        self
    }

    pub fn with_attribute(mut self, predicate: AttributePredicate) -> Self {
        if !self.attributes.contains(&predicate) {
            self.attributes.push(predicate);
        }
        self
    }

    pub fn with_pseudo_class(mut self, pseudo_class: PseudoClass) -> Self {
        if !self.pseudo_classes.contains(&pseudo_class) {
            self.pseudo_classes.push(pseudo_class);
        }
        self
    }

    pub fn is_wildcard(&self) -> bool {
        self.name == NameTest::Wildcard
    }

    /// The expected value of the first predicate on `name`, if it carries one.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .and_then(|a| a.operator.expected())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameTest {
    /// `*` or an empty name.
    Wildcard,
    Name(String),
}

impl NameTest {
    pub fn matches(&self, name: Option<&str>) -> bool {
        match self {
            NameTest::Wildcard => true,
            NameTest::Name(expected) => name == Some(expected.as_str()),
        }
    }
}

/// How a step relates to the step before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Whitespace: anywhere below the previous match.
    Descendant,
    /// `>`: a direct child of the previous match.
    Child,
    /// `+`: the element immediately after the previous match.
    AdjacentSibling,
    /// `~`: any element after the previous match under the same parent.
    GeneralSibling,
}

impl Combinator {
    /// Maps a standalone token to a combinator. Whitespace is implicit and has no glyph.
    pub fn from_glyph(token: &str) -> Option<Self> {
        match token {
            ">" => Some(Combinator::Child),
            "+" => Some(Combinator::AdjacentSibling),
            "~" => Some(Combinator::GeneralSibling),
            _ => None,
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Combinator::Descendant => ' ',
            Combinator::Child => '>',
            Combinator::AdjacentSibling => '+',
            Combinator::GeneralSibling => '~',
        }
    }

    pub fn is_sibling(&self) -> bool {
        matches!(
            self,
            Combinator::AdjacentSibling | Combinator::GeneralSibling
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributePredicate {
    pub name: String,
    pub operator: AttributeOperator,
}

impl AttributePredicate {
    pub fn new(name: impl Into<String>, operator: AttributeOperator) -> Self {
        Self {
            name: name.into(),
            operator,
        }
    }

    /// Tests an attribute value; `None` means the attribute is missing.
    pub fn matches(&self, value: Option<&str>) -> bool {
        match value {
            Some(value) => self.operator.matches(value),
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeOperator {
    /// `[attr]`
    Exists,
    /// `[attr=value]`
    Equals(String),
    /// `[attr^=value]`
    Prefix(String),
    /// `[attr$=value]`
    Suffix(String),
    /// `[attr*=value]`
    Substring(String),
    /// `[attr~=value]`
    Includes(String),
    /// `[attr|=value]`
    DashMatch(String),
}

impl AttributeOperator {
    /// Builds an operator from its textual form. `None` for unknown operators.
    pub fn from_parts(operator: &str, value: String) -> Option<Self> {
        let op = match operator {
            "=" => AttributeOperator::Equals(value),
            "^=" => AttributeOperator::Prefix(value),
            "$=" => AttributeOperator::Suffix(value),
            "*=" => AttributeOperator::Substring(value),
            "~=" => AttributeOperator::Includes(value),
            "|=" => AttributeOperator::DashMatch(value),
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            AttributeOperator::Exists => "",
            AttributeOperator::Equals(_) => "=",
            AttributeOperator::Prefix(_) => "^=",
            AttributeOperator::Suffix(_) => "$=",
            AttributeOperator::Substring(_) => "*=",
            AttributeOperator::Includes(_) => "~=",
            AttributeOperator::DashMatch(_) => "|=",
        }
    }

    pub fn expected(&self) -> Option<&str> {
        match self {
            AttributeOperator::Exists => None,
            AttributeOperator::Equals(v)
            | AttributeOperator::Prefix(v)
            | AttributeOperator::Suffix(v)
            | AttributeOperator::Substring(v)
            | AttributeOperator::Includes(v)
            | AttributeOperator::DashMatch(v) => Some(v),
        }
    }

    pub fn matches(&self, actual: &str) -> bool {
        match self {
            AttributeOperator::Exists => true,
            AttributeOperator::Equals(expected) => actual == expected,
            AttributeOperator::Prefix(expected) => {
                !expected.is_empty() && actual.starts_with(expected.as_str())
            }
            AttributeOperator::Suffix(expected) => {
                !expected.is_empty() && actual.ends_with(expected.as_str())
            }
            AttributeOperator::Substring(expected) => {
                !expected.is_empty() && actual.contains(expected.as_str())
            }
            AttributeOperator::Includes(expected) => {
                // Hyphenated expected values never match a word.
                if expected.is_empty() || expected.contains(|c: char| c.is_whitespace() || c == '-') {
                    return false;
                }
                actual.split_whitespace().any(|word| word == expected)
            }
            AttributeOperator::DashMatch(expected) => {
                actual == expected
                    || actual
                        .strip_prefix(expected.as_str())
                        .is_some_and(|rest| rest.starts_with('-'))
            }
        }
    }
}

/// The supported pseudo-classes. Anything else is dropped at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoClass {
    /// `:root` - the level-0 node.
    Root,
    /// `:empty` - no element children.
    Empty,
}

impl PseudoClass {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "root" => Some(PseudoClass::Root),
            "empty" => Some(PseudoClass::Empty),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PseudoClass::Root => "root",
            PseudoClass::Empty => "empty",
        }
    }
}

// --- Canonical rendering ---

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chain) in self.chains.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", chain)?;
        }
        Ok(())
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                match step.combinator {
                    Combinator::Descendant => f.write_str(" ")?,
                    other => write!(f, " {} ", other.glyph())?,
                }
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            NameTest::Wildcard => f.write_str("*")?,
            NameTest::Name(name) => f.write_str(name)?,
        }
        for attribute in &self.attributes {
            write!(f, "{}", attribute)?;
        }
        for pseudo_class in &self.pseudo_classes {
            write!(f, ":{}", pseudo_class.name())?;
        }
        Ok(())
    }
}

impl fmt::Display for AttributePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operator.expected() {
            None => write!(f, "[{}]", self.name),
            Some(value) => {
                // There are no escapes, so pick the quote the value doesn't use.
                let quote = if value.contains('"') && !value.contains('\'') {
                    '\''
                } else {
                    '"'
                };
                write!(
                    f,
                    "[{}{}{quote}{}{quote}]",
                    self.name,
                    self.operator.symbol(),
                    value
                )
            }
        }
    }
}
