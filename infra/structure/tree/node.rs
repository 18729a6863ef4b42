/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::{fmt, ops};
use std::sync::RwLock;

use super::{TreeNode, TreeNodeWeak};

// --------- //
// Structure //
// --------- //

/// Maillon de l'arbre : la donnée et les liens vers la parenté.
///
/// Les liens descendants (premier/dernier enfant, frère suivant) sont
/// forts ; les liens ascendants (parent, frère précédent) sont faibles,
/// l'arbre ne forme donc jamais de cycle.
pub struct Node<T> {
    data: T,

    pub(crate) parent: RwLock<Option<TreeNodeWeak<T>>>,

    pub(crate) first_child: RwLock<Option<TreeNode<T>>>,
    pub(crate) last_child: RwLock<Option<TreeNode<T>>>,

    pub(crate) prev_sibling: RwLock<Option<TreeNodeWeak<T>>>,
    pub(crate) next_sibling: RwLock<Option<TreeNode<T>>>,
}

// -------------- //
// Implémentation //
// -------------- //

impl<T> Node<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            parent: Default::default(),
            first_child: Default::default(),
            last_child: Default::default(),
            prev_sibling: Default::default(),
            next_sibling: Default::default(),
        }
    }

    pub fn data(&self) -> &T {
        &self.data
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl<T> ops::Deref for Node<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}
