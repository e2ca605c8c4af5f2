use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,

    #[error("Empty selector chain in '{0}' (leading, trailing or doubled comma)")]
    EmptyChain(String),

    #[error("Selector '{selector}' starts with combinator '{combinator}'")]
    LeadingCombinator { selector: String, combinator: char },

    #[error("Selector '{selector}' ends with combinator '{combinator}'")]
    TrailingCombinator { selector: String, combinator: char },

    #[error("Selector '{selector}' has consecutive combinators '{first}' and '{second}'")]
    ConsecutiveCombinators {
        selector: String,
        first: char,
        second: char,
    },

    #[error("Unknown attribute operator '{operator}' in '{token}'")]
    UnknownOperator { token: String, operator: String },

    #[error("Attribute '{attribute}' in '{token}' has an operator but no value")]
    MissingValue { token: String, attribute: String },

    #[error("Malformed selector '{token}': {reason}")]
    Malformed { token: String, reason: String },
}
