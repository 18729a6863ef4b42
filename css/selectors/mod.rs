/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

mod matching;
mod parser;
mod specificity;

use core::{fmt, str};

pub use self::{matching::SelectorElement, specificity::Specificity};
use crate::CSSParserError;

// --------- //
// Structure //
// --------- //

/// `a > b, c` : une liste de sélecteurs complexes séparés par des
/// virgules. Un élément correspond à la liste s'il correspond à l'un
/// d'entre eux.
#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<ComplexSelector>,
}

/// Une suite de sélecteurs composés reliés par des combinateurs, lue de
/// gauche à droite. `combinators[i]` relie `compounds[i]` à
/// `compounds[i + 1]`.
#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub struct ComplexSelector {
    compounds: Vec<CompoundSelector>,
    combinators: Vec<Combinator>,
}

/// Sélecteurs simples accolés, ex. `div#panel.box[hidden]`.
#[derive(Debug)]
#[derive(Default)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub struct CompoundSelector {
    simples: Vec<SimpleSelector>,
}

/// `An+B` : les positions `a * n + b` pour tout `n >= 0`, à partir de 1.
#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(PartialEq, Eq)]
pub struct Nth {
    pub a: i32,
    pub b: i32,
}

// ----------- //
// Énumération //
// ----------- //

#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    NextSibling,
    /// `a ~ b`
    SubsequentSibling,
}

#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub enum SimpleSelector {
    /// `*`
    Universal,
    /// `div` (nom local en minuscules)
    Type(String),
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// `[name]`, `[name=value]`, ...
    Attribute {
        name: String,
        operator: Option<(AttributeOperator, String)>,
        case_insensitive: bool,
    },
    /// `:first-child`, `:not(.x)`, ...
    PseudoClass(PseudoClass),
    /// `::before`, ... : ne correspond jamais à un élément du DOM.
    PseudoElement(String),
}

#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub enum PseudoClass {
    FirstChild,
    LastChild,
    OnlyChild,
    /// `:nth-child(An+B)`
    NthChild(Nth),
    /// `:nth-last-child(An+B)`
    NthLastChild(Nth),
    FirstOfType,
    LastOfType,
    OnlyOfType,
    /// `:nth-of-type(An+B)`
    NthOfType(Nth),
    /// `:nth-last-of-type(An+B)`
    NthLastOfType(Nth),
    /// `:not(<selector-list>)`
    Not(SelectorList),
    /// `:hover`, `:focus`, ... : ce moteur n'a pas d'état d'interaction,
    /// ces pseudo-classes ne correspondent à aucun élément.
    UserAction(String),
}

#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(PartialEq, Eq)]
pub enum AttributeOperator {
    /// `=`
    Equal,
    /// `~=`
    Includes,
    /// `|=`
    DashMatch,
    /// `^=`
    Prefix,
    /// `$=`
    Suffix,
    /// `*=`
    Substring,
}

// -------------- //
// Implémentation //
// -------------- //

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, CSSParserError> {
        parser::SelectorParser::new(input).parse_selector_list()
    }

    pub fn selectors(&self) -> &[ComplexSelector] {
        &self.selectors
    }

    /// L'élément correspond-il à l'un des sélecteurs de la liste ?
    pub fn matches<E: SelectorElement>(&self, element: &E) -> bool {
        self.selectors.iter().any(|selector| selector.matches(element))
    }

    /// La plus forte spécificité parmi les sélecteurs qui correspondent à
    /// l'élément, ou `None` si aucun ne correspond.
    pub fn matching_specificity<E: SelectorElement>(
        &self,
        element: &E,
    ) -> Option<Specificity> {
        self.selectors
            .iter()
            .filter(|selector| selector.matches(element))
            .map(ComplexSelector::specificity)
            .max()
    }
}

impl ComplexSelector {
    pub fn compounds(&self) -> &[CompoundSelector] {
        &self.compounds
    }

    pub fn combinators(&self) -> &[Combinator] {
        &self.combinators
    }
}

impl CompoundSelector {
    pub fn simples(&self) -> &[SimpleSelector] {
        &self.simples
    }
}

impl Nth {
    pub const fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// La position (à partir de 1) est-elle de la forme `a * n + b` ?
    pub fn matches(&self, position: i32) -> bool {
        let offset = position - self.b;
        if self.a == 0 {
            offset == 0
        } else {
            offset % self.a == 0 && offset / self.a >= 0
        }
    }
}

impl AttributeOperator {
    fn as_str(&self) -> &'static str {
        match self {
            | Self::Equal => "=",
            | Self::Includes => "~=",
            | Self::DashMatch => "|=",
            | Self::Prefix => "^=",
            | Self::Suffix => "$=",
            | Self::Substring => "*=",
        }
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl str::FromStr for SelectorList {
    type Err = CSSParserError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}

impl From<SimpleSelector> for SelectorList {
    fn from(simple: SimpleSelector) -> Self {
        Self {
            selectors: vec![ComplexSelector {
                compounds: vec![CompoundSelector {
                    simples: vec![simple],
                }],
                combinators: Vec::new(),
            }],
        }
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, selector) in self.selectors.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ComplexSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, compound) in self.compounds.iter().enumerate() {
            if index > 0 {
                write!(
                    f,
                    "{}",
                    match self.combinators[index - 1] {
                        | Combinator::Descendant => " ",
                        | Combinator::Child => " > ",
                        | Combinator::NextSibling => " + ",
                        | Combinator::SubsequentSibling => " ~ ",
                    }
                )?;
            }
            write!(f, "{compound}")?;
        }
        Ok(())
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.simples
            .iter()
            .try_for_each(|simple| write!(f, "{simple}"))
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            | Self::Universal => write!(f, "*"),
            | Self::Type(name) => write!(f, "{name}"),
            | Self::Id(id) => write!(f, "#{id}"),
            | Self::Class(class) => write!(f, ".{class}"),
            | Self::Attribute {
                name,
                operator,
                case_insensitive,
            } => {
                write!(f, "[{name}")?;
                if let Some((operator, value)) = operator {
                    write!(f, "{}{value:?}", operator.as_str())?;
                }
                if *case_insensitive {
                    write!(f, " i")?;
                }
                write!(f, "]")
            }
            | Self::PseudoClass(pseudo_class) => write!(f, ":{pseudo_class}"),
            | Self::PseudoElement(name) => write!(f, "::{name}"),
        }
    }
}

impl fmt::Display for PseudoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            | Self::FirstChild => write!(f, "first-child"),
            | Self::LastChild => write!(f, "last-child"),
            | Self::OnlyChild => write!(f, "only-child"),
            | Self::NthChild(nth) => write!(f, "nth-child({nth})"),
            | Self::NthLastChild(nth) => write!(f, "nth-last-child({nth})"),
            | Self::FirstOfType => write!(f, "first-of-type"),
            | Self::LastOfType => write!(f, "last-of-type"),
            | Self::OnlyOfType => write!(f, "only-of-type"),
            | Self::NthOfType(nth) => write!(f, "nth-of-type({nth})"),
            | Self::NthLastOfType(nth) => write!(f, "nth-last-of-type({nth})"),
            | Self::Not(selectors) => write!(f, "not({selectors})"),
            | Self::UserAction(name) => write!(f, "{name}"),
        }
    }
}

impl fmt::Display for Nth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.a {
            | 0 => return write!(f, "{}", self.b),
            | 1 => write!(f, "n")?,
            | -1 => write!(f, "-n")?,
            | a => write!(f, "{a}n")?,
        }
        match self.b {
            | 0 => Ok(()),
            | b if b > 0 => write!(f, "+{b}"),
            | b => write!(f, "{b}"),
        }
    }
}
