/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use css::selectors::SelectorList;
use infra::structure::tree::TreeNode;

use super::{DocumentFragmentNode, DocumentNode, ElementNode, Node};
use crate::exception::DOMException;

// --------- //
// Interface //
// --------- //

/// Les nœuds qui peuvent avoir des enfants : documents, fragments (dont
/// les racines fantômes) et éléments.
///
/// Les recherches portent sur les descendants du nœud, dans l'ordre de
/// l'arbre, et ne traversent jamais une racine fantôme.
pub trait ParentNode {
    fn select_all(&self, selectors: &SelectorList) -> Vec<ElementNode>;

    fn select_first(&self, selectors: &SelectorList) -> Option<ElementNode> {
        self.select_all(selectors).into_iter().next()
    }

    /// Une liste de sélecteurs invalide lève une "SyntaxError".
    fn query_selector(
        &self,
        selectors: &str,
    ) -> Result<Option<ElementNode>, DOMException> {
        let selectors = SelectorList::parse(selectors)?;
        Ok(self.select_first(&selectors))
    }

    fn query_selector_all(
        &self,
        selectors: &str,
    ) -> Result<Vec<ElementNode>, DOMException> {
        let selectors = SelectorList::parse(selectors)?;
        Ok(self.select_all(&selectors))
    }
}

// -------------- //
// Implémentation //
// -------------- //

impl ParentNode for TreeNode<Node> {
    fn select_all(&self, selectors: &SelectorList) -> Vec<ElementNode> {
        self.descendants()
            .filter_map(ElementNode::from_tree)
            .filter(|element| selectors.matches(element))
            .collect()
    }

    fn select_first(&self, selectors: &SelectorList) -> Option<ElementNode> {
        self.descendants()
            .filter_map(ElementNode::from_tree)
            .find(|element| selectors.matches(element))
    }
}

macro_rules! delegate_parent_node {
    ($($node:ty),*) => {
        $(
            impl ParentNode for $node {
                fn select_all(
                    &self,
                    selectors: &SelectorList,
                ) -> Vec<ElementNode> {
                    self.tree().select_all(selectors)
                }

                fn select_first(
                    &self,
                    selectors: &SelectorList,
                ) -> Option<ElementNode> {
                    self.tree().select_first(selectors)
                }
            }
        )*
    };
}

delegate_parent_node!(DocumentNode, DocumentFragmentNode, ElementNode);

// ---- //
// Test //
// ---- //
