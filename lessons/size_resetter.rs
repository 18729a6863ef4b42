/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Rétablit la taille des éléments que l'utilisateur a redimensionnés à
//! la souris : leur `height` et leur `width` en ligne sont retirées.
//!
//! La recherche part toujours de la racine du nœud déclencheur : le
//! document, ou la racine fantôme qui le contient. Elle ne franchit
//! jamais cette frontière.

use css::{
    selectors::{SelectorList, SimpleSelector},
    CSSStyleDeclaration,
};
use dom::{
    exception::DOMException,
    node::{
        ElementNode, GetRootNodeOptions, Node, NodeInterface, ParentNode,
    },
    window,
};
use infra::structure::tree::TreeNode;

// -------- //
// Constant //
// -------- //

const FAKE_BODY_CLASS: &str = "fake-body";

// -------- //
// Fonction //
// -------- //

/// La valeur calculée de `resize` permet-elle de redimensionner
/// l'élément ? L'absence de valeur et `none` valent non, tout comme
/// `initial` et `unset` dans un style qui n'a pas été résolu.
pub fn is_resizable(style: &CSSStyleDeclaration) -> bool {
    let resize = style.get_property_value("resize").trim();
    !resize.is_empty()
        && !["none", "initial", "unset"]
            .iter()
            .any(|keyword| resize.eq_ignore_ascii_case(keyword))
}

/// Retire la hauteur et la largeur en ligne de l'élément.
pub fn clear_inline_size(element: &ElementNode) {
    element.set_style_property("height", "");
    element.set_style_property("width", "");
}

fn scope_of(trigger: &ElementNode) -> TreeNode<Node> {
    trigger.get_root_node(GetRootNodeOptions::default())
}

/// Dans l'arbre du déclencheur, rétablit la taille du premier élément
/// `.fake-body` puis celle de chacun de ses `div` descendants
/// redimensionnables. Renvoie le nombre d'éléments rétablis.
pub fn reset_all_sizes(trigger: &ElementNode) -> usize {
    reset_all_sizes_in(&scope_of(trigger), window::get_computed_style)
}

/// Comme [reset_all_sizes], dans une portée donnée, avec `style_of` pour
/// obtenir le style calculé d'un élément.
pub fn reset_all_sizes_in(
    scope: &impl ParentNode,
    style_of: impl Fn(&ElementNode) -> CSSStyleDeclaration,
) -> usize {
    let fake_body_selector =
        SelectorList::from(SimpleSelector::Class(FAKE_BODY_CLASS.into()));

    let Some(fake_body) = scope.select_first(&fake_body_selector) else {
        log::trace!("Aucun élément .{FAKE_BODY_CLASS} dans la portée");
        return 0;
    };

    clear_inline_size(&fake_body);

    // La liste est figée avant toute modification.
    let div_selector = SelectorList::from(SimpleSelector::Type("div".into()));
    let mut resized = 0;
    for div in fake_body.select_all(&div_selector) {
        if is_resizable(&style_of(&div)) {
            clear_inline_size(&div);
            resized += 1;
        }
    }

    log::debug!(
        "Taille rétablie : .{FAKE_BODY_CLASS} et {resized} élément(s) \
         redimensionnable(s)"
    );

    resized + 1
}

/// Dans l'arbre du déclencheur, rétablit la taille du premier élément qui
/// correspond à `selector`. Renvoie `false` si aucun ne correspond.
pub fn reset_size_for(
    trigger: &ElementNode,
    selector: &str,
) -> Result<bool, DOMException> {
    reset_size_in(&scope_of(trigger), selector)
}

pub fn reset_size_in(
    scope: &impl ParentNode,
    selector: &str,
) -> Result<bool, DOMException> {
    match scope.query_selector(selector)? {
        | Some(element) => {
            clear_inline_size(&element);
            log::debug!("Taille rétablie pour « {selector} »");
            Ok(true)
        }
        | None => Ok(false),
    }
}

// ---- //
// Test //
// ---- //
