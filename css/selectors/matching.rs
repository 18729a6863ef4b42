/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use super::{
    AttributeOperator, Combinator, ComplexSelector, CompoundSelector,
    PseudoClass, SimpleSelector,
};

// --------- //
// Interface //
// --------- //

/// Ce que le moteur de sélecteurs doit savoir d'un élément. Le DOM
/// l'implémente pour ses éléments ; les tests peuvent l'implémenter pour
/// des éléments factices.
pub trait SelectorElement: Sized {
    /// Nom local, en minuscules pour les éléments HTML.
    fn local_name(&self) -> String;

    fn id(&self) -> Option<String>;

    fn has_class(&self, class_name: &str) -> bool;

    fn attribute(&self, name: &str) -> Option<String>;

    /// Le parent, s'il s'agit d'un élément. Une racine de document ou de
    /// fragment n'en est pas un.
    fn parent_element(&self) -> Option<Self>;

    fn previous_sibling_element(&self) -> Option<Self>;

    fn next_sibling_element(&self) -> Option<Self>;
}

// -------------- //
// Implémentation //
// -------------- //

impl ComplexSelector {
    /// La correspondance se fait de droite à gauche : l'élément doit
    /// correspondre au dernier sélecteur composé, puis les combinateurs
    /// guident la remontée dans l'arbre.
    pub fn matches<E: SelectorElement>(&self, element: &E) -> bool {
        self.matches_from(self.compounds.len() - 1, element)
    }

    fn matches_from<E: SelectorElement>(&self, index: usize, element: &E) -> bool {
        if !self.compounds[index].matches(element) {
            return false;
        }

        if index == 0 {
            return true;
        }

        let next = index - 1;
        match self.combinators[next] {
            | Combinator::Child => element
                .parent_element()
                .map_or(false, |parent| self.matches_from(next, &parent)),
            | Combinator::Descendant => {
                let mut ancestor = element.parent_element();
                while let Some(current) = ancestor {
                    if self.matches_from(next, &current) {
                        return true;
                    }
                    ancestor = current.parent_element();
                }
                false
            }
            | Combinator::NextSibling => element
                .previous_sibling_element()
                .map_or(false, |sibling| self.matches_from(next, &sibling)),
            | Combinator::SubsequentSibling => {
                let mut sibling = element.previous_sibling_element();
                while let Some(current) = sibling {
                    if self.matches_from(next, &current) {
                        return true;
                    }
                    sibling = current.previous_sibling_element();
                }
                false
            }
        }
    }
}

impl CompoundSelector {
    pub fn matches<E: SelectorElement>(&self, element: &E) -> bool {
        self.simples.iter().all(|simple| simple.matches(element))
    }
}

impl SimpleSelector {
    pub fn matches<E: SelectorElement>(&self, element: &E) -> bool {
        match self {
            | Self::Universal => true,
            | Self::Type(name) => element.local_name().eq_ignore_ascii_case(name),
            | Self::Id(id) => element.id().as_deref() == Some(id.as_str()),
            | Self::Class(class_name) => element.has_class(class_name),
            | Self::Attribute {
                name,
                operator,
                case_insensitive,
            } => {
                let actual = match element.attribute(name) {
                    | Some(actual) => actual,
                    | None => return false,
                };

                let (operator, expected) = match operator {
                    | Some(operator) => operator,
                    | None => return true,
                };

                let (actual, expected) = if *case_insensitive {
                    (actual.to_ascii_lowercase(), expected.to_ascii_lowercase())
                } else {
                    (actual, expected.to_owned())
                };

                operator.matches(&actual, &expected)
            }
            | Self::PseudoClass(pseudo_class) => pseudo_class.matches(element),
            | Self::PseudoElement(_) => false,
        }
    }
}

impl PseudoClass {
    pub fn matches<E: SelectorElement>(&self, element: &E) -> bool {
        let before = |counted: &dyn Fn(&E) -> bool| {
            position(element, E::previous_sibling_element, counted)
        };
        let after = |counted: &dyn Fn(&E) -> bool| {
            position(element, E::next_sibling_element, counted)
        };
        let any = |_: &E| true;
        let local_name = element.local_name();
        let same_type = |sibling: &E| sibling.local_name() == local_name;

        match self {
            | Self::FirstChild => before(&any) == 1,
            | Self::LastChild => after(&any) == 1,
            | Self::OnlyChild => before(&any) == 1 && after(&any) == 1,
            | Self::NthChild(nth) => nth.matches(before(&any)),
            | Self::NthLastChild(nth) => nth.matches(after(&any)),
            | Self::FirstOfType => before(&same_type) == 1,
            | Self::LastOfType => after(&same_type) == 1,
            | Self::OnlyOfType => {
                before(&same_type) == 1 && after(&same_type) == 1
            }
            | Self::NthOfType(nth) => nth.matches(before(&same_type)),
            | Self::NthLastOfType(nth) => nth.matches(after(&same_type)),
            | Self::Not(selectors) => !selectors.matches(element),
            | Self::UserAction(_) => false,
        }
    }
}

/// La position de l'élément (à partir de 1) parmi ses frères qui
/// vérifient `counted`, en remontant les frères avec `step`.
fn position<E: SelectorElement>(
    element: &E,
    step: impl Fn(&E) -> Option<E>,
    counted: &dyn Fn(&E) -> bool,
) -> i32 {
    let mut position = 1;
    let mut sibling = step(element);
    while let Some(current) = sibling {
        if counted(&current) {
            position += 1;
        }
        sibling = step(&current);
    }
    position
}

impl AttributeOperator {
    fn matches(&self, actual: &str, expected: &str) -> bool {
        match self {
            | Self::Equal => actual == expected,
            | Self::Includes => {
                !expected.is_empty()
                    && actual.split_ascii_whitespace().any(|word| word == expected)
            }
            | Self::DashMatch => {
                actual == expected
                    || actual
                        .strip_prefix(expected)
                        .map_or(false, |rest| rest.starts_with('-'))
            }
            | Self::Prefix => !expected.is_empty() && actual.starts_with(expected),
            | Self::Suffix => !expected.is_empty() && actual.ends_with(expected),
            | Self::Substring => !expected.is_empty() && actual.contains(expected),
        }
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::selectors::SelectorList;

    /// Élément factice : une chaîne d'ancêtres et de frères précédents.
    #[derive(Clone)]
    struct FakeElement {
        name: &'static str,
        id: Option<&'static str>,
        classes: &'static [&'static str],
        attributes: &'static [(&'static str, &'static str)],
        parent: Option<Rc<FakeElement>>,
        previous: Option<Rc<FakeElement>>,
        next: Option<Rc<FakeElement>>,
    }

    impl FakeElement {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                id: None,
                classes: &[],
                attributes: &[],
                parent: None,
                previous: None,
                next: None,
            }
        }
    }

    impl SelectorElement for FakeElement {
        fn local_name(&self) -> String {
            self.name.to_owned()
        }

        fn id(&self) -> Option<String> {
            self.id.map(String::from)
        }

        fn has_class(&self, class_name: &str) -> bool {
            self.classes.contains(&class_name)
        }

        fn attribute(&self, name: &str) -> Option<String> {
            self.attributes
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }

        fn parent_element(&self) -> Option<Self> {
            self.parent.as_deref().cloned()
        }

        fn previous_sibling_element(&self) -> Option<Self> {
            self.previous.as_deref().cloned()
        }

        fn next_sibling_element(&self) -> Option<Self> {
            self.next.as_deref().cloned()
        }
    }

    fn matches(selector: &str, element: &FakeElement) -> bool {
        SelectorList::parse(selector).unwrap().matches(element)
    }

    #[test]
    fn test_simple_selectors() {
        let mut div = FakeElement::new("div");
        div.id = Some("panel");
        div.classes = &["box", "resizable"];
        div.attributes = &[("lang", "fr-CA"), ("data-tags", "a b c")];

        assert!(matches("div", &div));
        assert!(matches("DIV", &div));
        assert!(matches("*", &div));
        assert!(matches("#panel", &div));
        assert!(matches("div.box.resizable", &div));
        assert!(!matches("div.other", &div));
        assert!(!matches("#Panel", &div));
        assert!(matches("[lang|=fr]", &div));
        assert!(matches("[lang^='FR' i]", &div));
        assert!(!matches("[lang^='FR']", &div));
        assert!(matches("[data-tags~=b]", &div));
        assert!(!matches("[hidden]", &div));
        assert!(matches("span, div", &div));
    }

    #[test]
    fn test_combinators() {
        let mut body = FakeElement::new("div");
        body.classes = &["fake-body"];
        let body = Rc::new(body);

        let mut section = FakeElement::new("section");
        section.parent = Some(body.clone());
        let section = Rc::new(section);

        let mut heading = FakeElement::new("h2");
        heading.parent = Some(section.clone());
        let heading = Rc::new(heading);

        let mut div = FakeElement::new("div");
        div.parent = Some(section);
        div.previous = Some(heading);

        assert!(matches(".fake-body div", &div));
        assert!(matches(".fake-body section > div", &div));
        assert!(!matches(".fake-body > div", &div));
        assert!(matches("h2 + div", &div));
        assert!(matches("h2 ~ div", &div));
        assert!(!matches("p ~ div", &div));
    }

    /// `h2, div.panel, p, div` : les frères précédents sont chaînés, le
    /// frère suivant de l'élément observé aussi.
    fn siblings() -> (FakeElement, FakeElement) {
        let heading = Rc::new(FakeElement::new("h2"));

        let mut panel = FakeElement::new("div");
        panel.classes = &["panel"];
        panel.previous = Some(heading);
        let panel = Rc::new(panel);

        let mut last = FakeElement::new("div");
        last.previous = Some(Rc::new(FakeElement {
            previous: Some(panel.clone()),
            ..FakeElement::new("p")
        }));

        let mut observed = (*panel).clone();
        observed.next = Some(Rc::new(FakeElement::new("p")));
        (observed, last)
    }

    #[test]
    fn test_structural_pseudo_classes() {
        let (panel, last) = siblings();

        assert!(matches("div:nth-child(2)", &panel));
        assert!(matches(":nth-child(even)", &panel));
        assert!(!matches(":nth-child(odd)", &panel));
        assert!(matches(":nth-child(-n+2)", &panel));
        assert!(!matches(":first-child", &panel));
        assert!(!matches(":last-child", &panel));
        assert!(matches("div:first-of-type", &panel));
        assert!(!matches("div:only-child", &panel));
        assert!(matches(":nth-last-child(2)", &panel));

        assert!(matches("div:last-child", &last));
        assert!(matches(":nth-child(4)", &last));
        assert!(matches(":nth-of-type(2)", &last));
        assert!(matches(":last-of-type", &last));
        assert!(!matches(":first-of-type", &last));

        let alone = FakeElement::new("span");
        assert!(matches(":only-child", &alone));
        assert!(matches(":first-child:last-child", &alone));
    }

    #[test]
    fn test_negation_and_user_actions() {
        let (panel, last) = siblings();

        assert!(matches("div.panel:not(.x)", &panel));
        assert!(!matches("div:not(.panel)", &panel));
        assert!(matches("div:not(.panel, h2)", &last));
        assert!(matches("div:not(:first-of-type)", &last));
        assert!(!matches("div:hover", &panel));
        assert!(!matches("div::before", &panel));
    }
}
