//! Element locators
//!
//! A locator names a page element by strategy + value. Attribute-based
//! strategies compile to CSS selectors; matching on visible text needs an
//! XPath query.

use std::fmt;

/// How to find an element on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    /// Raw CSS selector.
    Css(&'static str),
    /// Element `id` attribute.
    Id(&'static str),
    /// Form control `name` attribute.
    Name(&'static str),
    /// Visible text contained in the element.
    Text(&'static str),
}

/// The concrete query a locator compiles to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Css(String),
    XPath(String),
}

impl Locator {
    pub fn to_query(self) -> Query {
        match self {
            Locator::Css(selector) => Query::Css(selector.to_string()),
            Locator::Id(id) => Query::Css(format!("#{}", id)),
            Locator::Name(name) => Query::Css(format!("[name='{}']", name)),
            Locator::Text(text) => Query::XPath(format!("//*[contains(text(), '{}')]", text)),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(selector) => write!(f, "css:{}", selector),
            Locator::Id(id) => write!(f, "id:{}", id),
            Locator::Name(name) => write!(f, "name:{}", name),
            Locator::Text(text) => write!(f, "text:{}", text),
        }
    }
}
