/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::{
    selectors::SelectorList, stream::CSSInputStream, CSSStyleDeclaration,
};

// -------- //
// Constant //
// -------- //

/// At-rules dont le bloc est une liste de règles. Leur condition n'est
/// pas évaluée : ce moteur n'a ni média ni fonctionnalités à comparer,
/// les règles imbriquées s'appliquent toujours.
const CONDITIONAL_GROUP_RULES: [&str; 4] =
    ["container", "layer", "media", "supports"];

// --------- //
// Structure //
// --------- //

/// Une règle de style : une liste de sélecteurs et le bloc de
/// déclarations qui s'applique aux éléments qu'elle désigne.
#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub struct CSSStyleRule {
    selectors: SelectorList,
    style: CSSStyleDeclaration,
}

#[derive(Debug)]
#[derive(Default)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub struct CSSStyleSheet {
    rules: Vec<CSSStyleRule>,
}

// -------------- //
// Implémentation //
// -------------- //

impl CSSStyleRule {
    pub fn new(selectors: SelectorList, style: CSSStyleDeclaration) -> Self {
        Self { selectors, style }
    }

    pub fn selectors(&self) -> &SelectorList {
        &self.selectors
    }

    pub fn style(&self) -> &CSSStyleDeclaration {
        &self.style
    }
}

impl CSSStyleSheet {
    /// Analyse une feuille de style. Les règles dont le sélecteur est
    /// invalide sont ignorées. Les règles des blocs `@media`, `@supports`,
    /// `@layer` et `@container` sont ajoutées à leur place ; les autres
    /// at-rules (`@import`, `@keyframes`, ...) sont ignorées avec leur
    /// bloc.
    pub fn parse(input: &str) -> Self {
        let mut stream = CSSInputStream::new(input);
        let mut rules = Vec::new();

        loop {
            stream.skip_whitespace_and_comments();
            skip_cdo_cdc(&mut stream);
            stream.skip_whitespace_and_comments();

            if stream.is_eof() {
                break;
            }

            if stream.peek() == Some('@') {
                stream.consume();
                let name = stream.consume_ident().unwrap_or_default();
                let prelude = stream.consume_until(&[';', '{']);

                let block = match stream.consume() {
                    | Some('{') => {
                        let block = stream.consume_until(&['}']);
                        stream.consume();
                        Some(block)
                    }
                    | _ => None,
                };

                let is_group_rule = CONDITIONAL_GROUP_RULES
                    .iter()
                    .any(|group| group.eq_ignore_ascii_case(&name));
                match block {
                    | Some(block) if is_group_rule => {
                        log::trace!(
                            "@{name} {} : condition non évaluée",
                            prelude.trim()
                        );
                        rules.extend(Self::parse(&block).rules);
                    }
                    | _ => log::debug!("At-rule ignorée : @{name}"),
                }
                continue;
            }

            let prelude = stream.consume_until(&['{']);
            if stream.consume().is_none() {
                log::debug!("Règle sans bloc ignorée : {}", prelude.trim());
                break;
            }
            let block = stream.consume_until(&['}']);
            stream.consume();

            match prelude.parse::<SelectorList>() {
                | Ok(selectors) => rules.push(CSSStyleRule::new(
                    selectors,
                    CSSStyleDeclaration::parse(&block),
                )),
                | Err(err) => {
                    log::debug!(
                        "Règle ignorée, sélecteur « {} » invalide : {err}",
                        prelude.trim()
                    );
                }
            }
        }

        Self { rules }
    }

    pub fn rules(&self) -> &[CSSStyleRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn skip_cdo_cdc(stream: &mut CSSInputStream) {
    loop {
        let is_cdo = stream.peek() == Some('<')
            && stream.peek_nth(1) == Some('!')
            && stream.peek_nth(2) == Some('-')
            && stream.peek_nth(3) == Some('-');
        let is_cdc = stream.peek() == Some('-')
            && stream.peek_nth(1) == Some('-')
            && stream.peek_nth(2) == Some('>');

        if is_cdo {
            (0..4).for_each(|_| {
                stream.consume();
            });
        } else if is_cdc {
            (0..3).for_each(|_| {
                stream.consume();
            });
        } else {
            break;
        }
        stream.skip_whitespace();
    }
}

// ---- //
// Test //
// ---- //
