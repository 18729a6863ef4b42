/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::ops;

use html_elements::tag_names;
use infra::structure::tree::TreeNode;

use super::{
    CharacterData, DocumentFragmentNode, ElementNode, Node, NodeData,
    NodeInterface,
};
use crate::exception::DOMException;

// --------- //
// Structure //
// --------- //

#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub struct DocumentNode {
    tree: TreeNode<Node>,
}

/// Chaque document HTML est représenté par un objet Document. Tout ce
/// qu'il contient passe par l'arbre.
#[derive(Debug)]
#[derive(Default)]
pub struct Document {}

// -------------- //
// Implémentation //
// -------------- //

impl DocumentNode {
    /// Un document vide, sans élément racine.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            tree: TreeNode::new(Node::new(NodeData::Document(
                Document::default(),
            ))),
        }
    }

    /// Un document HTML minimal : `<html><head></head><body></body></html>`.
    pub fn create_html_document() -> Self {
        let document = Self::new();

        let [html, head, body] = ["html", "head", "body"]
            .map(|name| ElementNode::new(name, Some(&document.tree)));
        html.append_child(head.tree().to_owned());
        html.append_child(body.tree().to_owned());
        document.append_child(html.tree().to_owned());

        document
    }

    pub fn from_tree(tree: TreeNode<Node>) -> Option<Self> {
        tree.is_document().then_some(Self { tree })
    }

    pub fn tree(&self) -> &TreeNode<Node> {
        &self.tree
    }

    pub fn create_element(
        &self,
        local_name: impl AsRef<str>,
    ) -> Result<ElementNode, DOMException> {
        // 1) Si localName ne correspond pas à la production de Name, une
        // DOMException "InvalidCharacterError" est levée.
        if !tag_names::is_valid_name(&local_name) {
            return Err(DOMException::InvalidCharacterError);
        }

        // 2) S'il s'agit d'un document HTML, définir localName en
        // minuscules ASCII.
        let local_name = local_name.as_ref().to_ascii_lowercase();

        Ok(ElementNode::new(&local_name, Some(&self.tree)))
    }

    pub fn create_text_node(
        &self,
        data: impl Into<String>,
    ) -> TreeNode<Node> {
        Node::create(
            NodeData::Text(CharacterData::new(data)),
            Some(&self.tree),
        )
    }

    pub fn create_comment(&self, data: impl Into<String>) -> TreeNode<Node> {
        Node::create(
            NodeData::Comment(CharacterData::new(data)),
            Some(&self.tree),
        )
    }

    pub fn create_document_fragment(&self) -> DocumentFragmentNode {
        DocumentFragmentNode::new(Some(&self.tree))
    }

    /// Le premier élément enfant du document.
    pub fn document_element(&self) -> Option<ElementNode> {
        self.children().find_map(ElementNode::from_tree)
    }

    pub fn head(&self) -> Option<ElementNode> {
        self.document_element_child(tag_names::head)
    }

    pub fn body(&self) -> Option<ElementNode> {
        self.document_element_child(tag_names::body)
    }

    fn document_element_child(
        &self,
        tag_name: tag_names,
    ) -> Option<ElementNode> {
        self.document_element()?
            .element_children()
            .into_iter()
            .find(|element| tag_name == element.local_name())
    }

    /// Le premier élément de l'arbre du document, dans l'ordre de l'arbre,
    /// dont l'identifiant est `id`. Les arbres fantômes ne sont pas
    /// parcourus.
    pub fn get_element_by_id(&self, id: &str) -> Option<ElementNode> {
        if id.is_empty() {
            return None;
        }

        self.descendants()
            .filter_map(ElementNode::from_tree)
            .find(|element| element.id().as_deref() == Some(id))
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl ops::Deref for DocumentNode {
    type Target = TreeNode<Node>;

    fn deref(&self) -> &Self::Target {
        &self.tree
    }
}

// ---- //
// Test //
// ---- //
