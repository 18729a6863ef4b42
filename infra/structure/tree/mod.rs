/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

mod node;
mod weak;

use core::{fmt, ops};
use std::sync::Arc;

pub use self::weak::TreeNodeWeak;
use self::node::Node;

// --------- //
// Structure //
// --------- //

/// Un arbre est une structure arborescente hiérarchique finie. L'ordre
/// d'un arbre est un pré-ordre, une traversée en profondeur d'un arbre.
///
/// Deux [TreeNode] sont égaux lorsqu'ils désignent le même nœud : la
/// comparaison porte sur l'identité, jamais sur le contenu.
pub struct TreeNode<T> {
    node_ref: Arc<Node<T>>,
}

/// Itérateur sur les enfants directs d'un nœud.
pub struct Children<T> {
    next: Option<TreeNode<T>>,
}

/// Itérateur sur les descendants d'un nœud, dans l'ordre de l'arbre.
/// Le nœud de départ n'en fait pas partie.
pub struct Descendants<T> {
    root: TreeNode<T>,
    next: Option<TreeNode<T>>,
}

// -------------- //
// Implémentation //
// -------------- //

impl<T> TreeNode<T> {
    pub fn new(data: T) -> Self {
        Self {
            node_ref: Arc::new(Node::new(data)),
        }
    }

    fn new_node(arc: Arc<Node<T>>) -> Self {
        Self { node_ref: arc }
    }

    /// Est-ce que les deux références désignent le même nœud ?
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node_ref, &other.node_ref)
    }

    /// Ajoute le nœud à la fin de la liste des enfants. Un nœud déjà
    /// rattaché à un parent en est d'abord détaché.
    pub fn append_child(&self, node: impl Into<Self>) -> Self {
        let child: Self = node.into();
        child.detach_node();

        match self.last_child() {
            | Some(last_node) => {
                last_node
                    .next_sibling
                    .write()
                    .unwrap()
                    .replace(child.to_owned());
                child
                    .prev_sibling
                    .write()
                    .unwrap()
                    .replace(TreeNodeWeak::from(&last_node));
            }
            | None => {
                self.first_child.write().unwrap().replace(child.to_owned());
            }
        }

        child
            .parent
            .write()
            .unwrap()
            .replace(TreeNodeWeak::from(self));
        self.last_child.write().unwrap().replace(child.to_owned());

        child
    }

    /// Insère le nœud avant l'enfant de référence. Sans enfant de
    /// référence, le nœud est ajouté à la fin.
    ///
    /// L'enfant de référence doit être un enfant de ce nœud.
    pub fn insert_before(
        &self,
        node: impl Into<Self>,
        maybe_child: Option<&Self>,
    ) -> Self {
        let child = match maybe_child {
            | Some(child) => child,
            | None => return self.append_child(node),
        };

        assert!(
            child.parent_node().map_or(false, |p| p.ptr_eq(self)),
            "L'enfant de référence doit appartenir à ce nœud."
        );

        let node: Self = node.into();
        node.detach_node();

        match child.previous_sibling() {
            | Some(prev_sibling) => {
                prev_sibling
                    .next_sibling
                    .write()
                    .unwrap()
                    .replace(node.to_owned());
                node.prev_sibling
                    .write()
                    .unwrap()
                    .replace(TreeNodeWeak::from(&prev_sibling));
            }
            | None => {
                self.first_child.write().unwrap().replace(node.to_owned());
            }
        }

        node.next_sibling.write().unwrap().replace(child.to_owned());
        child
            .prev_sibling
            .write()
            .unwrap()
            .replace(TreeNodeWeak::from(&node));
        node.parent.write().unwrap().replace(TreeNodeWeak::from(self));

        node
    }

    /// Détache le nœud de son parent et de ses frères. Ne fait rien pour
    /// un nœud qui n'a pas de parent.
    pub fn detach_node(&self) {
        let parent = match self.parent_node() {
            | Some(parent) => parent,
            | None => return,
        };

        let prev_node = self.previous_sibling();
        let next_node = self.next_sibling();

        match prev_node.as_ref() {
            | Some(prev) => {
                *prev.next_sibling.write().unwrap() = next_node.to_owned();
            }
            | None => {
                *parent.first_child.write().unwrap() = next_node.to_owned();
            }
        }

        match next_node.as_ref() {
            | Some(next) => {
                *next.prev_sibling.write().unwrap() =
                    prev_node.as_ref().map(TreeNodeWeak::from);
            }
            | None => {
                *parent.last_child.write().unwrap() = prev_node;
            }
        }

        *self.parent.write().unwrap() = None;
        *self.prev_sibling.write().unwrap() = None;
        *self.next_sibling.write().unwrap() = None;
    }

    /// Retire l'enfant de ce nœud. Renvoie `false` si le nœud n'est pas
    /// un enfant de celui-ci.
    pub fn remove_child(&self, child: &Self) -> bool {
        if !child.parent_node().map_or(false, |p| p.ptr_eq(self)) {
            return false;
        }
        child.detach_node();
        true
    }

    pub fn foreach_child<F>(&self, mut f: F)
    where
        F: FnMut(&Self),
    {
        self.children().for_each(|child| f(&child));
    }

    pub fn children(&self) -> Children<T> {
        Children {
            next: self.first_child(),
        }
    }

    pub fn descendants(&self) -> Descendants<T> {
        Descendants {
            root: self.to_owned(),
            next: self.first_child(),
        }
    }

    /// Récupère le premier enfant de l'arbre.
    pub fn first_child(&self) -> Option<Self> {
        self.first_child.read().unwrap().to_owned()
    }

    /// Récupère le dernier enfant de l'arbre.
    pub fn last_child(&self) -> Option<Self> {
        self.last_child.read().unwrap().to_owned()
    }

    pub fn has_child_nodes(&self) -> bool {
        self.first_child.read().unwrap().is_some()
    }

    pub fn next_sibling(&self) -> Option<Self> {
        self.next_sibling.read().unwrap().to_owned()
    }

    /// Un objet qui participe à un arbre a un parent, qui est soit null
    /// soit un objet.
    pub fn parent_node(&self) -> Option<Self> {
        self.parent
            .read()
            .unwrap()
            .as_ref()
            .and_then(TreeNodeWeak::upgrade_node)
    }

    /// Le frère précédent d'un objet est son premier frère précédent ou
    /// null s'il n'a pas de frère précédent.
    pub fn previous_sibling(&self) -> Option<Self> {
        self.prev_sibling
            .read()
            .unwrap()
            .as_ref()
            .and_then(TreeNodeWeak::upgrade_node)
    }

    /// La racine d'un objet est lui-même, si son parent est null, ou
    /// sinon la racine de son parent.
    pub fn root(&self) -> Self {
        let mut current = self.to_owned();
        while let Some(parent) = current.parent_node() {
            current = parent;
        }
        current
    }

    /// Un objet A est un inclusive ancestor de B si A est B ou un
    /// ancêtre de B.
    pub fn is_inclusive_ancestor_of(&self, other: &Self) -> bool {
        let mut current = Some(other.to_owned());
        while let Some(node) = current {
            if node.ptr_eq(self) {
                return true;
            }
            current = node.parent_node();
        }
        false
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl<T> From<Arc<Node<T>>> for TreeNode<T> {
    fn from(arc: Arc<Node<T>>) -> Self {
        Self::new_node(arc)
    }
}

impl<T> Clone for TreeNode<T> {
    fn clone(&self) -> Self {
        Self::new_node(self.node_ref.clone())
    }
}

impl<T> PartialEq for TreeNode<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T> Eq for TreeNode<T> {}

impl<T: fmt::Debug> fmt::Debug for TreeNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node_ref.fmt(f)
    }
}

impl<T> ops::Deref for TreeNode<T> {
    type Target = Arc<Node<T>>;

    fn deref(&self) -> &Self::Target {
        &self.node_ref
    }
}

impl<T> Iterator for Children<T> {
    type Item = TreeNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.next_sibling();
        Some(current)
    }
}

impl<T> Iterator for Descendants<T> {
    type Item = TreeNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;

        self.next = current.first_child().or_else(|| {
            let mut node = current.to_owned();
            loop {
                if node.ptr_eq(&self.root) {
                    return None;
                }
                if let Some(sibling) = node.next_sibling() {
                    return Some(sibling);
                }
                node = node.parent_node()?;
            }
        });

        Some(current)
    }
}

// ---- //
// Test //
// ---- //
