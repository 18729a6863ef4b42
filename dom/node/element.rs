/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::{fmt, ops};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use css::{selectors::SelectorElement, CSSStyleDeclaration};
use html_elements::{interface::HTMLElementInterface, tag_names};
use infra::structure::tree::TreeNode;

use super::{
    Attr, DocumentFragmentNode, NamedNodeMap, Node, NodeData,
    NodeInterface, ShadowRootInit, ShadowRootMode,
};
use crate::exception::DOMException;

// --------- //
// Structure //
// --------- //

#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub struct ElementNode {
    tree: TreeNode<Node>,
}

/// Les données d'un élément HTML. Le bloc de style en ligne est tenu
/// synchronisé avec l'attribut `style`.
#[derive(Debug)]
pub struct Element {
    inner: HTMLElement,
    attributes: RwLock<NamedNodeMap>,
    style: RwLock<CSSStyleDeclaration>,
    shadow_root: RwLock<Option<DocumentFragmentNode>>,
    custom_element_state: RwLock<CustomElementState>,
}

// ----------- //
// Énumération //
// ----------- //

/// 4 The elements of HTML
#[derive(Debug)]
pub enum HTMLElement {
    // 4.1 The document element
    DocumentHtml(
        /// 4.1.1 The html element
        html_elements::HTMLHtmlElement,
    ),

    // 4.2 Document metadata
    MetadataHead(
        /// 4.2.1 The head element
        html_elements::HTMLHeadElement,
    ),
    MetadataTitle(
        /// 4.2.2 The title element
        html_elements::HTMLTitleElement,
    ),
    MetadataStyle(
        /// 4.2.6 The style element
        html_elements::HTMLStyleElement,
    ),

    // 4.3 Sections
    SectionBody(
        /// 4.3.1 The body element
        html_elements::HTMLBodyElement,
    ),
    SectionHeading(
        /// 4.3.6 The h1, h2, h3, h4, h5, and h6 elements
        html_elements::HTMLHeadingElement,
    ),

    // 4.4 Grouping content
    GroupingContentP(
        /// 4.4.1 The p element
        html_elements::HTMLParagraphElement,
    ),
    GroupingContentDiv(
        /// 4.4.15 The div element
        html_elements::HTMLDivElement,
    ),

    // 4.5 Text-level semantics
    TextLevelSpan(
        /// 4.5.26 The span element
        html_elements::HTMLSpanElement,
    ),

    // 4.10 Forms
    FormButton(
        /// 4.10.6 The button element
        html_elements::HTMLButtonElement,
    ),
    FormTextarea(
        /// 4.10.11 The textarea element
        html_elements::HTMLTextAreaElement,
    ),

    // 4.12 Scripting
    ScriptingTemplate(
        /// 4.12.3 The template element
        html_elements::HTMLTemplateElement<DocumentFragmentNode>,
    ),

    // 4.13 Custom elements
    Custom(html_elements::HTMLCustomElement),

    /// Les balises connues sans interface dédiée, et les inconnues.
    Unknown(html_elements::HTMLUnknownElement),
}

/// 4.13.6 : l'état d'un élément vis-à-vis des éléments personnalisés.
#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(PartialEq, Eq)]
pub enum CustomElementState {
    /// Nom personnalisé, pas encore de définition.
    Undefined,
    /// Le constructeur de la définition a échoué.
    Failed,
    /// Élément ordinaire.
    Uncustomized,
    /// Mis à niveau par sa définition.
    Custom,
}

// -------------- //
// Implémentation //
// -------------- //

impl HTMLElement {
    /// `local_name` doit déjà être en minuscules. Le contenu d'un
    /// `<template>` est un fragment rattaché au document donné.
    fn create(local_name: &str, document: Option<&TreeNode<Node>>) -> Self {
        let Ok(tag_name) = local_name.parse::<tag_names>() else {
            if tag_names::is_valid_custom_element_name(local_name) {
                return Self::Custom(html_elements::HTMLCustomElement::new(
                    local_name,
                ));
            }
            return Self::Unknown(html_elements::HTMLUnknownElement::new(
                local_name,
            ));
        };

        match tag_name {
            | tag_names::html => Self::DocumentHtml(Default::default()),
            | tag_names::head => Self::MetadataHead(Default::default()),
            | tag_names::title => Self::MetadataTitle(Default::default()),
            | tag_names::style => Self::MetadataStyle(Default::default()),
            | tag_names::body => Self::SectionBody(Default::default()),
            | tag_names::p => Self::GroupingContentP(Default::default()),
            | tag_names::div => Self::GroupingContentDiv(Default::default()),
            | tag_names::span => Self::TextLevelSpan(Default::default()),
            | tag_names::button => Self::FormButton(Default::default()),
            | tag_names::textarea => Self::FormTextarea(Default::default()),
            | tag_names::template => Self::ScriptingTemplate(
                html_elements::HTMLTemplateElement::new(
                    DocumentFragmentNode::new(document),
                ),
            ),
            | tag_name => {
                match html_elements::HTMLHeadingElement::new(tag_name) {
                    | Some(heading) => Self::SectionHeading(heading),
                    | None => Self::Unknown(
                        html_elements::HTMLUnknownElement::new(local_name),
                    ),
                }
            }
        }
    }

    fn interface(&self) -> &dyn HTMLElementInterface {
        match self {
            | Self::DocumentHtml(element) => element,
            | Self::MetadataHead(element) => element,
            | Self::MetadataTitle(element) => element,
            | Self::MetadataStyle(element) => element,
            | Self::SectionBody(element) => element,
            | Self::SectionHeading(element) => element,
            | Self::GroupingContentP(element) => element,
            | Self::GroupingContentDiv(element) => element,
            | Self::TextLevelSpan(element) => element,
            | Self::FormButton(element) => element,
            | Self::FormTextarea(element) => element,
            | Self::ScriptingTemplate(element) => element,
            | Self::Custom(element) => element,
            | Self::Unknown(element) => element,
        }
    }

    pub fn local_name(&self) -> &str {
        self.interface().tag_name()
    }
}

impl Element {
    pub(crate) fn new(
        local_name: &str,
        document: Option<&TreeNode<Node>>,
    ) -> Self {
        let inner = HTMLElement::create(local_name, document);
        let state = match inner {
            | HTMLElement::Custom(_) => CustomElementState::Undefined,
            | _ => CustomElementState::Uncustomized,
        };

        Self {
            inner,
            attributes: Default::default(),
            style: Default::default(),
            shadow_root: Default::default(),
            custom_element_state: RwLock::new(state),
        }
    }

    /// Copie d'un élément : même nom, mêmes attributs. Le contenu du
    /// gabarit, la racine fantôme et la mise à niveau ne suivent pas.
    pub(crate) fn clone_for(&self, document: Option<&TreeNode<Node>>) -> Self {
        let copy = Self::new(self.local_name(), document);
        *write(&copy.attributes) = read(&self.attributes).to_owned();
        *write(&copy.style) = read(&self.style).to_owned();
        copy
    }

    pub fn local_name(&self) -> &str {
        self.inner.local_name()
    }

    pub fn html_element(&self) -> &HTMLElement {
        &self.inner
    }
}

impl ElementNode {
    pub(crate) fn new(
        local_name: &str,
        document: Option<&TreeNode<Node>>,
    ) -> Self {
        Self {
            tree: Node::create(
                NodeData::Element(Element::new(local_name, document)),
                document,
            ),
        }
    }

    pub fn from_tree(tree: TreeNode<Node>) -> Option<Self> {
        tree.is_element().then_some(Self { tree })
    }

    pub fn tree(&self) -> &TreeNode<Node> {
        &self.tree
    }

    fn element(&self) -> &Element {
        match self.tree.node_data() {
            | NodeData::Element(element) => element,
            | _ => unreachable!("ElementNode construit sur un non-élément"),
        }
    }

    pub fn local_name(&self) -> &str {
        self.element().local_name()
    }

    pub fn tag_name(&self) -> String {
        self.local_name().to_ascii_uppercase()
    }

    pub fn is_template(&self) -> bool {
        matches!(self.element().inner, HTMLElement::ScriptingTemplate(_))
    }

    /// Le contenu d'un `<template>`, `None` pour tout autre élément.
    pub fn template_content(&self) -> Option<DocumentFragmentNode> {
        match &self.element().inner {
            | HTMLElement::ScriptingTemplate(template) => {
                Some(template.content().to_owned())
            }
            | _ => None,
        }
    }

    // Attributs

    pub fn attributes(&self) -> Vec<Attr> {
        read(&self.element().attributes).iter().cloned().collect()
    }

    pub fn get_attribute(&self, name: &str) -> Option<String> {
        let name = name.to_ascii_lowercase();
        read(&self.element().attributes)
            .get_named_item(&name)
            .map(|attr| attr.value().to_owned())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    pub fn set_attribute(
        &self,
        name: &str,
        value: &str,
    ) -> Result<(), DOMException> {
        // 1) Si le nom ne correspond pas à la production Name, lever une
        // "InvalidCharacterError".
        if !tag_names::is_valid_name(name) {
            return Err(DOMException::InvalidCharacterError);
        }

        // 2) Le nom est mis en minuscules ASCII (document HTML).
        let name = name.to_ascii_lowercase();

        if name == "style" {
            *write(&self.element().style) = CSSStyleDeclaration::parse(value);
        }

        write(&self.element().attributes)
            .set_named_item(Attr::new(name, value));
        Ok(())
    }

    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        let name = name.to_ascii_lowercase();
        if name == "style" {
            *write(&self.element().style) = CSSStyleDeclaration::new();
        }
        write(&self.element().attributes)
            .remove_named_item(&name)
            .map(|attr| attr.value().to_owned())
    }

    pub fn id(&self) -> Option<String> {
        self.get_attribute("id").filter(|id| !id.is_empty())
    }

    pub fn class_list(&self) -> Vec<String> {
        self.get_attribute("class")
            .map(|classes| {
                classes
                    .split_ascii_whitespace()
                    .map(ToOwned::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_list().iter().any(|name| name == class)
    }

    // Style en ligne

    /// Une copie du bloc de style en ligne.
    pub fn style(&self) -> CSSStyleDeclaration {
        read(&self.element().style).to_owned()
    }

    /// `element.style[name] = value` ; une valeur vide retire la
    /// propriété. L'attribut `style` est réécrit en conséquence.
    pub fn set_style_property(&self, name: &str, value: &str) {
        let mut style = write(&self.element().style);
        style.set_property(name, value);
        self.sync_style_attribute(&style);
    }

    pub fn remove_style_property(&self, name: &str) -> String {
        let mut style = write(&self.element().style);
        let old = style.remove_property(name);
        self.sync_style_attribute(&style);
        old
    }

    fn sync_style_attribute(&self, style: &CSSStyleDeclaration) {
        let mut attributes = write(&self.element().attributes);
        if style.is_empty() && attributes.get_named_item("style").is_none() {
            return;
        }
        attributes.set_named_item(Attr::new("style", style.css_text()));
    }

    // Arbre fantôme

    /// 4.2.14 : attache une racine fantôme à l'élément et la renvoie.
    pub fn attach_shadow(
        &self,
        init: ShadowRootInit,
    ) -> Result<DocumentFragmentNode, DOMException> {
        // 1) Si le nom local de l'élément n'est ni un nom d'élément
        // personnalisé valide ni l'une des balises autorisées, lever une
        // "NotSupportedError".
        if !tag_names::is_valid_shadow_host_name(self.local_name()) {
            return Err(DOMException::NotSupportedError);
        }

        let mut shadow_root = write(&self.element().shadow_root);

        // 2) Si l'élément est déjà un hôte fantôme, lever une
        // "NotSupportedError".
        if shadow_root.is_some() {
            return Err(DOMException::NotSupportedError);
        }

        let root = DocumentFragmentNode::new_shadow_root(self, init);
        *shadow_root = Some(root.to_owned());
        Ok(root)
    }

    /// La racine fantôme, uniquement si elle est ouverte.
    pub fn shadow_root(&self) -> Option<DocumentFragmentNode> {
        self.attached_shadow_root()
            .filter(|root| root.mode() == Some(ShadowRootMode::Open))
    }

    /// La racine fantôme, quel que soit son mode.
    pub(crate) fn attached_shadow_root(&self) -> Option<DocumentFragmentNode> {
        read(&self.element().shadow_root).to_owned()
    }

    // Éléments personnalisés

    pub fn custom_element_state(&self) -> CustomElementState {
        *read(&self.element().custom_element_state)
    }

    pub(crate) fn set_custom_element_state(&self, state: CustomElementState) {
        *write(&self.element().custom_element_state) = state;
    }

    // Navigation

    pub fn previous_element_sibling(&self) -> Option<ElementNode> {
        let mut sibling = self.previous_sibling();
        while let Some(node) = sibling {
            if let Some(element) = Self::from_tree(node.to_owned()) {
                return Some(element);
            }
            sibling = node.previous_sibling();
        }
        None
    }

    pub fn next_element_sibling(&self) -> Option<ElementNode> {
        let mut sibling = self.next_sibling();
        while let Some(node) = sibling {
            if let Some(element) = Self::from_tree(node.to_owned()) {
                return Some(element);
            }
            sibling = node.next_sibling();
        }
        None
    }
}

// -------- //
// Fonction //
// -------- //

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl ops::Deref for ElementNode {
    type Target = TreeNode<Node>;

    fn deref(&self) -> &Self::Target {
        &self.tree
    }
}

impl fmt::Display for HTMLElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.local_name())
    }
}

impl SelectorElement for ElementNode {
    fn local_name(&self) -> String {
        ElementNode::local_name(self).to_owned()
    }

    fn id(&self) -> Option<String> {
        ElementNode::id(self)
    }

    fn has_class(&self, class: &str) -> bool {
        ElementNode::has_class(self, class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn parent_element(&self) -> Option<Self> {
        self.tree.parent_element()
    }

    fn previous_sibling_element(&self) -> Option<Self> {
        self.previous_element_sibling()
    }

    fn next_sibling_element(&self) -> Option<Self> {
        self.next_element_sibling()
    }
}

// ---- //
// Test //
// ---- //
