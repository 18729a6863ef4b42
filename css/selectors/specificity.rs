/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::ops;

use super::{ComplexSelector, CompoundSelector, PseudoClass, SimpleSelector};

// --------- //
// Structure //
// --------- //

/// La spécificité `(a, b, c)` d'un sélecteur : le nombre de sélecteurs
/// d'identifiant, de classe ou d'attribut, et de type. Les triplets se
/// comparent dans l'ordre lexicographique.
#[derive(Debug)]
#[derive(Default)]
#[derive(Copy, Clone)]
#[derive(PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity(pub u32, pub u32, pub u32);

// -------------- //
// Implémentation //
// -------------- //

impl ComplexSelector {
    pub fn specificity(&self) -> Specificity {
        self.compounds
            .iter()
            .map(CompoundSelector::specificity)
            .fold(Specificity::default(), |acc, s| acc + s)
    }
}

impl CompoundSelector {
    pub fn specificity(&self) -> Specificity {
        self.simples
            .iter()
            .map(|simple| match simple {
                | SimpleSelector::Universal => Specificity(0, 0, 0),
                | SimpleSelector::Id(_) => Specificity(1, 0, 0),
                | SimpleSelector::Class(_)
                | SimpleSelector::Attribute { .. } => Specificity(0, 1, 0),
                | SimpleSelector::Type(_) | SimpleSelector::PseudoElement(_) => {
                    Specificity(0, 0, 1)
                }
                // La spécificité de `:not()` est celle de son argument le
                // plus spécifique.
                | SimpleSelector::PseudoClass(PseudoClass::Not(selectors)) => {
                    selectors
                        .selectors()
                        .iter()
                        .map(ComplexSelector::specificity)
                        .max()
                        .unwrap_or_default()
                }
                | SimpleSelector::PseudoClass(_) => Specificity(0, 1, 0),
            })
            .fold(Specificity::default(), |acc, s| acc + s)
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl ops::Add for Specificity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0, self.1 + rhs.1, self.2 + rhs.2)
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::SelectorList;

    fn specificity(input: &str) -> Specificity {
        SelectorList::parse(input).unwrap().selectors()[0].specificity()
    }

    #[test]
    fn test_specificity() {
        assert_eq!(specificity("*"), Specificity(0, 0, 0));
        assert_eq!(specificity("div"), Specificity(0, 0, 1));
        assert_eq!(specificity(".fake-body div"), Specificity(0, 1, 1));
        assert_eq!(specificity("#panel[hidden].a"), Specificity(1, 2, 0));
        assert!(specificity("#a") > specificity(".a.b.c.d"));
        assert_eq!(specificity("li:nth-child(2n)::marker"), Specificity(0, 1, 2));
        assert_eq!(specificity("div:not(.x, #y)"), Specificity(1, 0, 1));
    }
}
