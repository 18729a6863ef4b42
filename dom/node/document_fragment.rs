/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::ops;

use infra::structure::tree::{TreeNode, TreeNodeWeak};

use super::{ElementNode, Node, NodeData};

// --------- //
// Structure //
// --------- //

#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub struct DocumentFragmentNode {
    tree: TreeNode<Node>,
}

/// 4.8. Interface ShadowRoot : les données propres à un fragment qui sert
/// de racine fantôme à un élément hôte.
#[derive(Debug)]
pub struct ShadowRoot {
    mode: ShadowRootMode,
    host: TreeNodeWeak<Node>,
}

#[derive(Debug)]
#[derive(Copy, Clone)]
pub struct ShadowRootInit {
    pub mode: ShadowRootMode,
}

// ----------- //
// Énumération //
// ----------- //

#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(PartialEq, Eq)]
pub enum ShadowRootMode {
    Open,
    Closed,
}

// -------------- //
// Implémentation //
// -------------- //

impl DocumentFragmentNode {
    pub(crate) fn new(document: Option<&TreeNode<Node>>) -> Self {
        Self {
            tree: Node::create(
                NodeData::DocumentFragment { shadow_root: None },
                document,
            ),
        }
    }

    pub(crate) fn new_shadow_root(
        host: &ElementNode,
        init: ShadowRootInit,
    ) -> Self {
        let shadow_root = ShadowRoot {
            mode: init.mode,
            host: TreeNodeWeak::from(&**host),
        };
        let document = host.owner_document_tree();
        Self {
            tree: Node::create(
                NodeData::DocumentFragment {
                    shadow_root: Some(shadow_root),
                },
                document.as_ref(),
            ),
        }
    }

    pub fn from_tree(tree: TreeNode<Node>) -> Option<Self> {
        tree.is_document_fragment().then_some(Self { tree })
    }

    /// L'hôte, si ce fragment est une racine fantôme.
    pub fn host(&self) -> Option<ElementNode> {
        self.shadow_root_ref().and_then(ShadowRoot::host)
    }

    pub fn mode(&self) -> Option<ShadowRootMode> {
        self.shadow_root_ref().map(ShadowRoot::mode)
    }

    /// Comme [super::DocumentNode::get_element_by_id], limité aux
    /// descendants du fragment.
    pub fn get_element_by_id(&self, id: &str) -> Option<ElementNode> {
        if id.is_empty() {
            return None;
        }

        self.descendants()
            .filter_map(ElementNode::from_tree)
            .find(|element| element.id().as_deref() == Some(id))
    }

    pub fn tree(&self) -> &TreeNode<Node> {
        &self.tree
    }
}

impl ShadowRoot {
    pub fn mode(&self) -> ShadowRootMode {
        self.mode
    }

    pub fn host(&self) -> Option<ElementNode> {
        self.host.upgrade_node().and_then(ElementNode::from_tree)
    }
}

impl ShadowRootInit {
    pub fn open() -> Self {
        Self {
            mode: ShadowRootMode::Open,
        }
    }

    pub fn closed() -> Self {
        Self {
            mode: ShadowRootMode::Closed,
        }
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl ops::Deref for DocumentFragmentNode {
    type Target = TreeNode<Node>;

    fn deref(&self) -> &Self::Target {
        &self.tree
    }
}
