//! The selector language: a CSS3-style subset for querying XML- and JSON-derived trees.
//!
//! Supported syntax: element/key names, `*`, attribute predicates (`[a]`, `[a=v]`,
//! `[a^=v]`, `[a$=v]`, `[a*=v]`, `[a~=v]`, `[a|=v]`), the `:root` and `:empty`
//! pseudo-classes, the descendant, `>`, `+` and `~` combinators, and `,` lists.

pub mod ast;
pub mod error;
mod parser;

// --- Public API ---
pub use ast::{
    AttributeOperator, AttributePredicate, Chain, Combinator, NameTest, PseudoClass,
    SelectorList, Step,
};
pub use error::SelectorError;
pub use parser::{parse_chain, parse_selector, parse_step};

impl std::str::FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_selector(s)
    }
}
