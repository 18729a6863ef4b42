/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use super::{
    AttributeOperator, Combinator, ComplexSelector, CompoundSelector, Nth,
    PseudoClass, SelectorList, SimpleSelector,
};
use crate::{stream::CSSInputStream, CSSParserError};

// -------- //
// Constant //
// -------- //

const USER_ACTION_PSEUDO_CLASSES: [&str; 7] = [
    "active",
    "focus",
    "focus-visible",
    "focus-within",
    "hover",
    "target",
    "visited",
];

const PSEUDO_ELEMENTS: [&str; 8] = [
    "after",
    "backdrop",
    "before",
    "first-letter",
    "first-line",
    "marker",
    "placeholder",
    "selection",
];

/// Pseudo-éléments de CSS 2, qui s'écrivent aussi avec un seul `:`.
const LEGACY_PSEUDO_ELEMENTS: [&str; 4] =
    ["after", "before", "first-letter", "first-line"];

// --------- //
// Structure //
// --------- //

pub(super) struct SelectorParser {
    stream: CSSInputStream,
}

// -------------- //
// Implémentation //
// -------------- //

impl SelectorParser {
    pub(super) fn new(input: &str) -> Self {
        Self {
            stream: CSSInputStream::new(input),
        }
    }

    /// <selector-list> = <complex-selector>#
    pub(super) fn parse_selector_list(
        mut self,
    ) -> Result<SelectorList, CSSParserError> {
        let mut selectors = vec![self.parse_complex_selector()?];

        while self.stream.peek() == Some(',') {
            self.stream.consume();
            selectors.push(self.parse_complex_selector()?);
        }

        match self.stream.peek() {
            | Some(ch) => Err(self.stream.unexpected(ch)),
            | None => Ok(SelectorList { selectors }),
        }
    }

    /// <complex-selector> =
    ///     <compound-selector> [ <combinator>? <compound-selector> ]*
    fn parse_complex_selector(
        &mut self,
    ) -> Result<ComplexSelector, CSSParserError> {
        self.stream.skip_whitespace_and_comments();

        let mut compounds = vec![self.parse_compound_selector()?];
        let mut combinators = Vec::new();

        while let Some(combinator) = self.parse_combinator() {
            combinators.push(combinator);
            compounds.push(self.parse_compound_selector()?);
        }

        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    /// Consomme un combinateur et les espaces qui l'entourent. Renvoie
    /// `None` en fin de sélecteur complexe (fin du flux ou virgule).
    fn parse_combinator(&mut self) -> Option<Combinator> {
        let had_whitespace = self.stream.skip_whitespace();
        self.stream.skip_whitespace_and_comments();

        let combinator = match self.stream.peek()? {
            | ',' => return None,
            | '>' => Combinator::Child,
            | '+' => Combinator::NextSibling,
            | '~' => Combinator::SubsequentSibling,
            | _ if had_whitespace => return Some(Combinator::Descendant),
            // Un caractère accolé qui n'est pas un combinateur : l'erreur
            // est signalée par l'appelant.
            | _ => return None,
        };

        self.stream.consume();
        self.stream.skip_whitespace_and_comments();
        Some(combinator)
    }

    /// <compound-selector> = <type-selector>? <subclass-selector>*
    fn parse_compound_selector(
        &mut self,
    ) -> Result<CompoundSelector, CSSParserError> {
        let mut simples = Vec::new();

        if self.stream.peek() == Some('*') {
            self.stream.consume();
            simples.push(SimpleSelector::Universal);
        } else if self.stream.starts_ident() {
            let name = self.stream.consume_ident()?;
            simples.push(SimpleSelector::Type(name.to_ascii_lowercase()));
        }

        loop {
            match self.stream.peek() {
                | Some('#') => {
                    self.stream.consume();
                    simples.push(SimpleSelector::Id(self.consume_name()?));
                }
                | Some('.') => {
                    self.stream.consume();
                    simples.push(SimpleSelector::Class(self.consume_name()?));
                }
                | Some('[') => {
                    self.stream.consume();
                    simples.push(self.parse_attribute_selector()?);
                }
                | Some(':') => {
                    self.stream.consume();
                    simples.push(self.parse_pseudo()?);
                }
                | _ => break,
            }
        }

        if simples.is_empty() {
            return Err(match self.stream.peek() {
                | Some(',') | None => CSSParserError::EmptySelector,
                | Some(ch) if matches!(ch, '>' | '+' | '~') => {
                    CSSParserError::EmptySelector
                }
                | Some(ch) => self.stream.unexpected(ch),
            });
        }

        Ok(CompoundSelector { simples })
    }

    /// Après `#` ou `.`, un identifiant ; un nom commençant par un
    /// chiffre (`#1a`) n'en est pas un.
    fn consume_name(&mut self) -> Result<String, CSSParserError> {
        self.stream.consume_ident()
    }

    /// Après `:`. `::name` désigne un pseudo-élément, `:name` une
    /// pseudo-classe.
    fn parse_pseudo(&mut self) -> Result<SimpleSelector, CSSParserError> {
        let start = self.stream.position();
        let is_element = self.stream.peek() == Some(':');
        if is_element {
            self.stream.consume();
        }
        let name = self.stream.consume_ident()?.to_ascii_lowercase();

        if self.stream.peek() == Some('(') {
            self.stream.consume();
            let argument = self.stream.consume_until(&[')']);
            self.stream.expect(')')?;
            if is_element {
                return Err(CSSParserError::UnknownPseudo(name));
            }
            return parse_functional_pseudo_class(&name, argument.trim())
                .map(SimpleSelector::PseudoClass);
        }

        if is_element || LEGACY_PSEUDO_ELEMENTS.contains(&name.as_str()) {
            if !PSEUDO_ELEMENTS.contains(&name.as_str()) {
                return Err(CSSParserError::UnknownPseudo(name));
            }
            return Ok(SimpleSelector::PseudoElement(name));
        }

        let pseudo_class = match name.as_str() {
            | "first-child" => PseudoClass::FirstChild,
            | "last-child" => PseudoClass::LastChild,
            | "only-child" => PseudoClass::OnlyChild,
            | "first-of-type" => PseudoClass::FirstOfType,
            | "last-of-type" => PseudoClass::LastOfType,
            | "only-of-type" => PseudoClass::OnlyOfType,
            | state if USER_ACTION_PSEUDO_CLASSES.contains(&state) => {
                PseudoClass::UserAction(state.to_owned())
            }
            | unknown => {
                log::debug!(
                    "Pseudo-classe « {unknown} » inconnue à la position \
                     {start}"
                );
                return Err(CSSParserError::UnknownPseudo(unknown.to_owned()));
            }
        };

        Ok(SimpleSelector::PseudoClass(pseudo_class))
    }

    /// <attribute-selector> =
    ///     '[' <ident> ']' |
    ///     '[' <ident> <attr-matcher> [ <string> | <ident> ] <modifier>? ']'
    fn parse_attribute_selector(
        &mut self,
    ) -> Result<SimpleSelector, CSSParserError> {
        self.stream.skip_whitespace();
        let name = self.stream.consume_ident()?.to_ascii_lowercase();
        self.stream.skip_whitespace();

        if self.stream.peek() == Some(']') {
            self.stream.consume();
            return Ok(SimpleSelector::Attribute {
                name,
                operator: None,
                case_insensitive: false,
            });
        }

        let operator = match self.stream.peek() {
            | Some('=') => AttributeOperator::Equal,
            | Some(prefix @ ('~' | '|' | '^' | '$' | '*')) => {
                self.stream.consume();
                match prefix {
                    | '~' => AttributeOperator::Includes,
                    | '|' => AttributeOperator::DashMatch,
                    | '^' => AttributeOperator::Prefix,
                    | '$' => AttributeOperator::Suffix,
                    | _ => AttributeOperator::Substring,
                }
            }
            | Some(ch) => return Err(self.stream.unexpected(ch)),
            | None => return Err(CSSParserError::UnexpectedEOF),
        };
        self.stream.expect('=')?;
        self.stream.skip_whitespace();

        let value = match self.stream.peek() {
            | Some('"' | '\'') => self.stream.consume_string()?,
            | _ => self.stream.consume_ident()?,
        };
        self.stream.skip_whitespace();

        let mut case_insensitive = false;
        if let Some(modifier @ ('i' | 'I' | 's' | 'S')) = self.stream.peek() {
            self.stream.consume();
            case_insensitive = modifier.eq_ignore_ascii_case(&'i');
            self.stream.skip_whitespace();
        }

        self.stream.expect(']')?;

        Ok(SimpleSelector::Attribute {
            name,
            operator: Some((operator, value)),
            case_insensitive,
        })
    }
}

// -------- //
// Fonction //
// -------- //

fn parse_functional_pseudo_class(
    name: &str,
    argument: &str,
) -> Result<PseudoClass, CSSParserError> {
    Ok(match name {
        | "nth-child" => PseudoClass::NthChild(parse_nth(argument)?),
        | "nth-last-child" => PseudoClass::NthLastChild(parse_nth(argument)?),
        | "nth-of-type" => PseudoClass::NthOfType(parse_nth(argument)?),
        | "nth-last-of-type" => {
            PseudoClass::NthLastOfType(parse_nth(argument)?)
        }
        | "not" => PseudoClass::Not(SelectorList::parse(argument)?),
        | _ => return Err(CSSParserError::UnknownPseudo(name.to_owned())),
    })
}

/// <an+b> : `odd`, `even`, `B`, `An`, `An+B`, `-n+B`, ... Les espaces ne
/// sont permis qu'autour du signe de `B`.
fn parse_nth(argument: &str) -> Result<Nth, CSSParserError> {
    let invalid = || CSSParserError::InvalidNth(argument.to_owned());

    let mut compact = String::new();
    for (index, part) in argument.split_whitespace().enumerate() {
        if index > 0
            && !compact.ends_with(['+', '-'])
            && !part.starts_with(['+', '-'])
        {
            return Err(invalid());
        }
        compact.push_str(part);
    }
    let compact = compact.to_ascii_lowercase();

    let nth = match compact.as_str() {
        | "odd" => Nth::new(2, 1),
        | "even" => Nth::new(2, 0),
        | _ => match compact.split_once('n') {
            | Some((a, b)) => {
                let a = match a {
                    | "" | "+" => 1,
                    | "-" => -1,
                    | a => a.parse().map_err(|_| invalid())?,
                };
                let b = match b {
                    | "" => 0,
                    | b if b.starts_with(['+', '-']) => {
                        b.parse().map_err(|_| invalid())?
                    }
                    | _ => return Err(invalid()),
                };
                Nth::new(a, b)
            }
            | None => Nth::new(0, compact.parse().map_err(|_| invalid())?),
        },
    };

    Ok(nth)
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<SelectorList, CSSParserError> {
        SelectorList::parse(input)
    }

    #[test]
    fn test_parse_compound() {
        let list = parse("div#panel.box.resizable").unwrap();
        assert_eq!(
            list.selectors()[0].compounds()[0].simples(),
            &[
                SimpleSelector::Type("div".into()),
                SimpleSelector::Id("panel".into()),
                SimpleSelector::Class("box".into()),
                SimpleSelector::Class("resizable".into()),
            ]
        );
    }

    #[test]
    fn test_parse_combinators() {
        let list = parse(".fake-body  >div + p ~ span em").unwrap();
        assert_eq!(
            list.selectors()[0].combinators(),
            &[
                Combinator::Child,
                Combinator::NextSibling,
                Combinator::SubsequentSibling,
                Combinator::Descendant,
            ]
        );
        assert_eq!(list.to_string(), ".fake-body > div + p ~ span em");
    }

    #[test]
    fn test_parse_list_and_attributes() {
        let list =
            parse(" DIV[data-size], [type = 'text' i] , *[lang|=fr] ").unwrap();
        assert_eq!(list.selectors().len(), 3);
        assert_eq!(
            list.to_string(),
            r#"div[data-size], [type="text" i], *[lang|="fr"]"#
        );
    }

    #[test]
    fn test_parse_syntax_errors() {
        assert_eq!(parse(""), Err(CSSParserError::EmptySelector));
        assert_eq!(parse("div,"), Err(CSSParserError::EmptySelector));
        assert_eq!(parse("> p"), Err(CSSParserError::EmptySelector));
        assert!(parse("#1panel").is_err());
        assert!(parse("div[").is_err());
        assert!(parse("div)").is_err());
        assert!(parse("..box").is_err());
        assert_eq!(
            parse("p:resizable"),
            Err(CSSParserError::UnknownPseudo("resizable".into()))
        );
        assert_eq!(
            parse("p::shadow"),
            Err(CSSParserError::UnknownPseudo("shadow".into()))
        );
        assert_eq!(
            parse("li:nth-child(2 n)"),
            Err(CSSParserError::InvalidNth("2 n".into()))
        );
        assert!(parse("li:nth-child(n+)").is_err());
        assert!(parse("li:nth-child(odd").is_err());
        assert!(parse("div:not()").is_err());
    }

    #[test]
    fn test_parse_pseudo_classes() {
        let list = parse(
            "div.panel:not(.x, [hidden]), body > div:LAST-CHILD, \
             li:nth-child( -n + 3 ):hover, p:before, p::marker",
        )
        .unwrap();
        assert_eq!(
            list.to_string(),
            "div.panel:not(.x, [hidden]), body > div:last-child, \
             li:nth-child(-n+3):hover, p::before, p::marker"
        );

        let nth = |input: &str| match &list_of(input)[0] {
            | SimpleSelector::PseudoClass(PseudoClass::NthChild(nth)) => *nth,
            | other => panic!("{other:?}"),
        };
        assert_eq!(nth(":nth-child(odd)"), Nth::new(2, 1));
        assert_eq!(nth(":nth-child(EVEN)"), Nth::new(2, 0));
        assert_eq!(nth(":nth-child(5)"), Nth::new(0, 5));
        assert_eq!(nth(":nth-child(+n)"), Nth::new(1, 0));
        assert_eq!(nth(":nth-child(3n - 2)"), Nth::new(3, -2));
        assert_eq!(nth(":nth-child(-2n+ 7)"), Nth::new(-2, 7));
    }

    fn list_of(input: &str) -> Vec<SimpleSelector> {
        parse(input).unwrap().selectors()[0].compounds()[0]
            .simples()
            .to_vec()
    }
}
