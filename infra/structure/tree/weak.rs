/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::fmt;
use std::sync::{Arc, Weak};

use super::{node::Node, TreeNode};

// --------- //
// Structure //
// --------- //

/// Référence faible vers un nœud de l'arbre. Elle ne maintient pas le
/// nœud en vie.
pub struct TreeNodeWeak<T> {
    node_weak: Weak<Node<T>>,
}

// -------------- //
// Implémentation //
// -------------- //

impl<T> TreeNodeWeak<T> {
    /// Renvoie le nœud s'il est encore vivant.
    pub fn upgrade_node(&self) -> Option<TreeNode<T>> {
        self.node_weak.upgrade().map(TreeNode::from)
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl<T> Clone for TreeNodeWeak<T> {
    fn clone(&self) -> Self {
        Self {
            node_weak: self.node_weak.clone(),
        }
    }
}

impl<T> fmt::Debug for TreeNodeWeak<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(TreeNodeWeak)")
    }
}

impl<T> From<&TreeNode<T>> for TreeNodeWeak<T> {
    fn from(tree: &TreeNode<T>) -> Self {
        Self {
            node_weak: Arc::downgrade(tree),
        }
    }
}
