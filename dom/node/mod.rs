/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

mod attr;
mod character_data;

/// 4.5. Interface Document
mod document;

/// 4.7. Interface DocumentFragment, 4.8. Interface ShadowRoot
mod document_fragment;

/// 4.9. Interface Element
mod element;

/// 4.2.6. Mixin ParentNode
mod parent_node;

use core::cell::RefCell;

pub use self::{
    attr::{Attr, NamedNodeMap},
    character_data::CharacterData,
    document::{Document, DocumentNode},
    document_fragment::{
        DocumentFragmentNode, ShadowRoot, ShadowRootInit, ShadowRootMode,
    },
    element::{CustomElementState, Element, ElementNode, HTMLElement},
    parent_node::ParentNode,
};
use infra::structure::tree::{TreeNode, TreeNodeWeak};

use crate::exception::DOMException;

// --------- //
// Structure //
// --------- //

/// 4.4. Interface Node
#[derive(Debug)]
pub struct Node {
    owner_document: RefCell<Option<TreeNodeWeak<Self>>>,
    data: NodeData,
    node_type: NodeType,
}

/// Options de [NodeInterface::get_root_node].
#[derive(Debug)]
#[derive(Default)]
#[derive(Copy, Clone)]
pub struct GetRootNodeOptions {
    /// Traverser les racines fantômes jusqu'à l'hôte.
    pub composed: bool,
}

// ----------- //
// Énumération //
// ----------- //

#[derive(Debug)]
pub enum NodeData {
    Document(Document),
    DocumentFragment {
        /// Présent lorsque le fragment est la racine fantôme d'un hôte.
        shadow_root: Option<ShadowRoot>,
    },
    Element(Element),
    Text(CharacterData),
    Comment(CharacterData),
}

#[allow(non_camel_case_types)]
#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(PartialEq, Eq)]
#[repr(u8)]
pub enum NodeType {
    ELEMENT_NODE = 1,
    TEXT_NODE = 3,
    COMMENT_NODE = 8,
    DOCUMENT_NODE = 9,
    DOCUMENT_FRAGMENT_NODE = 11,
}

// --------- //
// Interface //
// --------- //

/// Les opérations de l'interface Node qui ont besoin de l'arbre : elles
/// sont implémentées sur [TreeNode<Node>], et donc accessibles depuis
/// chaque nœud typé ([DocumentNode], [ElementNode], ...).
pub trait NodeInterface {
    /// Le document du nœud ; pour un document, lui-même.
    fn node_document(&self) -> Option<DocumentNode>;

    /// La racine du nœud. Avec `composed`, une racine fantôme cède la
    /// place à la racine de son hôte.
    fn get_root_node(&self, options: GetRootNodeOptions) -> TreeNode<Node>;

    fn as_element(&self) -> Option<ElementNode>;

    fn as_document(&self) -> Option<DocumentNode>;

    fn as_document_fragment(&self) -> Option<DocumentFragmentNode>;

    fn parent_element(&self) -> Option<ElementNode>;

    fn element_children(&self) -> Vec<ElementNode>;

    /// Concaténation des nœuds texte descendants ; la donnée elle-même
    /// pour un texte ou un commentaire ; `None` pour un document.
    fn text_content(&self) -> Option<String>;

    fn set_text_content(&self, text: &str);

    /// Copie le nœud, et ses descendants lorsque `deep` est vrai. Le
    /// contenu d'un gabarit est copié avec lui ; une racine fantôme ne
    /// l'est jamais.
    fn clone_node(&self, deep: bool) -> TreeNode<Node>;

    /// Pré-insère `node` avant `child` (à la fin si `child` est `None`).
    /// Un fragment est remplacé par ses enfants.
    fn pre_insert(
        &self,
        node: &TreeNode<Node>,
        child: Option<&TreeNode<Node>>,
    ) -> Result<TreeNode<Node>, DOMException>;

    fn append_node(
        &self,
        node: &TreeNode<Node>,
    ) -> Result<TreeNode<Node>, DOMException> {
        self.pre_insert(node, None)
    }

    fn remove_node(
        &self,
        child: &TreeNode<Node>,
    ) -> Result<TreeNode<Node>, DOMException>;
}

// -------------- //
// Implémentation //
// -------------- //

impl Node {
    pub fn new(data: NodeData) -> Self {
        let node_type = match data {
            | NodeData::Document(_) => NodeType::DOCUMENT_NODE,
            | NodeData::DocumentFragment { .. } => {
                NodeType::DOCUMENT_FRAGMENT_NODE
            }
            | NodeData::Element(_) => NodeType::ELEMENT_NODE,
            | NodeData::Text(_) => NodeType::TEXT_NODE,
            | NodeData::Comment(_) => NodeType::COMMENT_NODE,
        };

        Self {
            owner_document: Default::default(),
            data,
            node_type,
        }
    }

    /// Crée le nœud dans l'arbre, rattaché au document donné.
    pub(crate) fn create(
        data: NodeData,
        document: Option<&TreeNode<Node>>,
    ) -> TreeNode<Node> {
        let tree = TreeNode::new(Self::new(data));
        if let Some(document) = document {
            tree.set_document(document);
        }
        tree
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn node_data(&self) -> &NodeData {
        &self.data
    }

    pub fn node_name(&self) -> String {
        match &self.data {
            | NodeData::Document(_) => "#document".to_owned(),
            | NodeData::DocumentFragment { .. } => {
                "#document-fragment".to_owned()
            }
            | NodeData::Element(element) => {
                element.local_name().to_ascii_uppercase()
            }
            | NodeData::Text(_) => "#text".to_owned(),
            | NodeData::Comment(_) => "#comment".to_owned(),
        }
    }

    pub fn element_ref(&self) -> Option<&Element> {
        match &self.data {
            | NodeData::Element(element) => Some(element),
            | _ => None,
        }
    }

    pub fn character_data_ref(&self) -> Option<&CharacterData> {
        match &self.data {
            | NodeData::Text(data) | NodeData::Comment(data) => Some(data),
            | _ => None,
        }
    }

    pub fn shadow_root_ref(&self) -> Option<&ShadowRoot> {
        match &self.data {
            | NodeData::DocumentFragment { shadow_root } => {
                shadow_root.as_ref()
            }
            | _ => None,
        }
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::ELEMENT_NODE
    }

    pub fn is_document(&self) -> bool {
        self.node_type == NodeType::DOCUMENT_NODE
    }

    pub fn is_document_fragment(&self) -> bool {
        self.node_type == NodeType::DOCUMENT_FRAGMENT_NODE
    }

    pub fn is_shadow_root(&self) -> bool {
        self.shadow_root_ref().is_some()
    }

    pub fn is_character_data(&self) -> bool {
        self.character_data_ref().is_some()
    }

    pub fn set_document(&self, document: &TreeNode<Node>) {
        self.owner_document
            .replace(Some(TreeNodeWeak::from(document)));
    }

    pub(crate) fn owner_document_tree(&self) -> Option<TreeNode<Node>> {
        self.owner_document
            .borrow()
            .as_ref()
            .and_then(TreeNodeWeak::upgrade_node)
    }
}

impl NodeData {
    /// Les données d'une copie du nœud. Les enfants ne sont pas concernés.
    fn clone_for(&self, document: Option<&TreeNode<Node>>) -> Self {
        match self {
            | Self::Document(_) => Self::Document(Document::default()),
            | Self::DocumentFragment { .. } => {
                Self::DocumentFragment { shadow_root: None }
            }
            | Self::Element(element) => Self::Element(element.clone_for(document)),
            | Self::Text(data) => Self::Text(data.to_owned()),
            | Self::Comment(data) => Self::Comment(data.to_owned()),
        }
    }
}

/// Un nœud est-il un ancêtre inclusif de `target`, en traversant les
/// racines fantômes jusqu'à leur hôte ?
fn is_host_including_inclusive_ancestor(
    node: &TreeNode<Node>,
    target: &TreeNode<Node>,
) -> bool {
    let mut current = Some(target.to_owned());
    while let Some(candidate) = current {
        if candidate.ptr_eq(node) {
            return true;
        }
        current = candidate.parent_node().or_else(|| {
            candidate
                .shadow_root_ref()
                .and_then(ShadowRoot::host)
                .map(|host| TreeNode::clone(&host))
        });
    }
    false
}

/// Rattache le nœud et ses descendants au document.
fn adopt(node: &TreeNode<Node>, document: &TreeNode<Node>) {
    node.set_document(document);
    node.descendants().for_each(|descendant| {
        descendant.set_document(document);
    });
}

impl NodeInterface for TreeNode<Node> {
    fn node_document(&self) -> Option<DocumentNode> {
        if self.is_document() {
            return DocumentNode::from_tree(self.to_owned());
        }
        self.owner_document_tree().and_then(DocumentNode::from_tree)
    }

    fn get_root_node(&self, options: GetRootNodeOptions) -> TreeNode<Node> {
        let root = self.root();

        if options.composed {
            if let Some(host) = root.shadow_root_ref().and_then(ShadowRoot::host)
            {
                return host.get_root_node(options);
            }
        }

        root
    }

    fn as_element(&self) -> Option<ElementNode> {
        ElementNode::from_tree(self.to_owned())
    }

    fn as_document(&self) -> Option<DocumentNode> {
        DocumentNode::from_tree(self.to_owned())
    }

    fn as_document_fragment(&self) -> Option<DocumentFragmentNode> {
        DocumentFragmentNode::from_tree(self.to_owned())
    }

    fn parent_element(&self) -> Option<ElementNode> {
        self.parent_node().and_then(ElementNode::from_tree)
    }

    fn element_children(&self) -> Vec<ElementNode> {
        self.children().filter_map(ElementNode::from_tree).collect()
    }

    fn text_content(&self) -> Option<String> {
        match self.node_data() {
            | NodeData::Document(_) => None,
            | NodeData::Text(data) | NodeData::Comment(data) => {
                Some(data.data())
            }
            | NodeData::Element(_) | NodeData::DocumentFragment { .. } => {
                Some(
                    self.descendants()
                        .filter_map(|node| match node.node_data() {
                            | NodeData::Text(data) => Some(data.data()),
                            | _ => None,
                        })
                        .collect(),
                )
            }
        }
    }

    fn set_text_content(&self, text: &str) {
        match self.node_data() {
            | NodeData::Document(_) => {}
            | NodeData::Text(data) | NodeData::Comment(data) => {
                data.set_data(text)
            }
            | NodeData::Element(_) | NodeData::DocumentFragment { .. } => {
                self.children().for_each(|child| child.detach_node());
                if !text.is_empty() {
                    let document = self.owner_document_tree();
                    self.append_child(Node::create(
                        NodeData::Text(CharacterData::new(text)),
                        document.as_ref(),
                    ));
                }
            }
        }
    }

    fn clone_node(&self, deep: bool) -> TreeNode<Node> {
        let document = self.owner_document_tree();
        let copy =
            Node::create(self.node_data().clone_for(document.as_ref()), None);

        match document.as_ref() {
            | Some(document) if !copy.is_document() => {
                copy.set_document(document)
            }
            | _ => {}
        }

        if deep {
            self.children().for_each(|child| {
                let child_copy = child.clone_node(true);
                if copy.is_document() {
                    adopt(&child_copy, &copy);
                }
                copy.append_child(child_copy);
            });

            let contents = self
                .as_element()
                .and_then(|element| element.template_content())
                .zip(
                    copy.as_element()
                        .and_then(|element| element.template_content()),
                );
            if let Some((source, target)) = contents {
                source.children().for_each(|child| {
                    target.append_child(child.clone_node(true));
                });
            }
        }

        copy
    }

    fn pre_insert(
        &self,
        node: &TreeNode<Node>,
        child: Option<&TreeNode<Node>>,
    ) -> Result<TreeNode<Node>, DOMException> {
        // 1) Si le parent n'est pas un Document, un DocumentFragment ou un
        // Element, lever une "HierarchyRequestError".
        if self.is_character_data() {
            return Err(DOMException::HierarchyRequestError);
        }

        // 2) Si le nœud est un ancêtre inclusif du parent (hôtes compris),
        // lever une "HierarchyRequestError".
        if is_host_including_inclusive_ancestor(node, self) {
            return Err(DOMException::HierarchyRequestError);
        }

        // 3) Si l'enfant n'est pas null et que son parent n'est pas le
        // parent, lever une "NotFoundError".
        if let Some(child) = child {
            if !child.parent_node().map_or(false, |p| p.ptr_eq(self)) {
                return Err(DOMException::NotFoundError);
            }
        }

        // 4) Un document ou une racine fantôme ne s'insère nulle part.
        if node.is_document() || node.is_shadow_root() {
            return Err(DOMException::HierarchyRequestError);
        }

        // 5) Un document n'a ni texte ni plus d'un élément enfant.
        if self.is_document() {
            let incoming_elements = if node.is_document_fragment() {
                node.children().filter(|n| n.is_element()).count()
            } else {
                usize::from(node.is_element())
            };
            let has_element_child = self.children().any(|n| n.is_element());
            let has_text = node.node_type() == NodeType::TEXT_NODE
                || (node.is_document_fragment()
                    && node
                        .children()
                        .any(|n| n.node_type() == NodeType::TEXT_NODE));

            if has_text
                || incoming_elements > 1
                || (incoming_elements == 1 && has_element_child)
            {
                return Err(DOMException::HierarchyRequestError);
            }
        }

        // 6) Si l'enfant de référence est le nœud lui-même, la référence
        // devient son frère suivant.
        let reference = match child {
            | Some(child) if child.ptr_eq(node) => node.next_sibling(),
            | child => child.cloned(),
        };

        let document = self.node_document();
        let nodes: Vec<TreeNode<Node>> = if node.is_document_fragment() {
            node.children().collect()
        } else {
            vec![node.to_owned()]
        };

        for inserted in nodes.iter() {
            if let Some(document) = document.as_ref() {
                adopt(inserted, document);
            }
            self.insert_before(inserted.to_owned(), reference.as_ref());
        }

        Ok(node.to_owned())
    }

    fn remove_node(
        &self,
        child: &TreeNode<Node>,
    ) -> Result<TreeNode<Node>, DOMException> {
        if !self.remove_child(child) {
            return Err(DOMException::NotFoundError);
        }
        Ok(child.to_owned())
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pre_insert_flattens_fragments() {
        let document = DocumentNode::create_html_document();
        let body = document.body().unwrap();

        let fragment = document.create_document_fragment();
        fragment.append_node(&document.create_text_node("a")).unwrap();
        fragment.append_node(&document.create_comment("b")).unwrap();

        body.append_node(&fragment).unwrap();

        assert_eq!(body.children().count(), 2);
        assert!(!fragment.has_child_nodes());
        assert_eq!(body.text_content().as_deref(), Some("a"));
    }

    #[test]
    fn test_pre_insert_rejects_invalid_hierarchies() {
        let document = DocumentNode::create_html_document();
        let body = document.body().unwrap();
        let div = document.create_element("div").unwrap();
        body.append_node(&div).unwrap();

        assert_eq!(
            div.append_node(&body),
            Err(DOMException::HierarchyRequestError)
        );
        assert_eq!(
            div.append_node(&div),
            Err(DOMException::HierarchyRequestError)
        );

        let text = document.create_text_node("x");
        assert_eq!(
            text.append_node(&document.create_text_node("y")),
            Err(DOMException::HierarchyRequestError)
        );
        assert_eq!(
            document.append_node(&document.create_element("p").unwrap()),
            Err(DOMException::HierarchyRequestError)
        );

        let span = document.create_element("span").unwrap();
        assert_eq!(
            body.pre_insert(&span, Some(&text)),
            Err(DOMException::NotFoundError)
        );
    }

    #[test]
    fn test_pre_insert_rejects_shadow_host_ancestor() {
        let document = DocumentNode::create_html_document();
        let host = document.create_element("div").unwrap();
        let shadow = host.attach_shadow(ShadowRootInit::open()).unwrap();
        let inner = document.create_element("span").unwrap();
        shadow.append_node(&inner).unwrap();

        assert_eq!(
            inner.append_node(&host),
            Err(DOMException::HierarchyRequestError)
        );
    }

    #[test]
    fn test_clone_node_deep_is_structural_copy() {
        let document = DocumentNode::create_html_document();
        let div = document.create_element("div").unwrap();
        div.set_attribute("class", "card").unwrap();
        div.set_text_content("Bonjour");

        let shallow = div.clone_node(false);
        let deep = div.clone_node(true);

        assert!(!deep.ptr_eq(&div));
        assert!(!shallow.has_child_nodes());
        assert_eq!(deep.text_content().as_deref(), Some("Bonjour"));
        assert!(!deep.first_child().unwrap().ptr_eq(&div.first_child().unwrap()));
        assert_eq!(
            deep.as_element().unwrap().get_attribute("class").as_deref(),
            Some("card")
        );
        assert!(deep.node_document().unwrap().ptr_eq(&document));
    }

    #[test]
    fn test_get_root_node() {
        let document = DocumentNode::create_html_document();
        let host = document.create_element("div").unwrap();
        document.body().unwrap().append_node(&host).unwrap();
        let shadow = host.attach_shadow(ShadowRootInit::open()).unwrap();
        let button = document.create_element("button").unwrap();
        shadow.append_node(&button).unwrap();

        let root = button.get_root_node(GetRootNodeOptions::default());
        assert!(root.ptr_eq(&shadow));
        assert!(root.is_shadow_root());

        let composed =
            button.get_root_node(GetRootNodeOptions { composed: true });
        assert!(composed.ptr_eq(&document));
    }

    #[test]
    fn test_set_text_content_replaces_children() {
        let document = DocumentNode::create_html_document();
        let div = document.create_element("div").unwrap();
        div.append_node(&document.create_element("span").unwrap()).unwrap();
        div.set_text_content("texte");

        assert_eq!(div.children().count(), 1);
        assert_eq!(div.text_content().as_deref(), Some("texte"));
        assert_eq!(document.text_content(), None);
    }
}
