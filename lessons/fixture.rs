/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::fmt;
use std::collections::BTreeMap;

use dom::{
    exception::DOMException,
    node::{DocumentNode, ElementNode, Node, NodeInterface, ShadowRootInit},
};
use infra::structure::tree::TreeNode;
use serde::Deserialize;

// --------- //
// Structure //
// --------- //

/// Une page de démonstration :
///
/// ```json
/// {
///   "title": "Redimensionnement",
///   "styles": [".resizable { resize: both; }"],
///   "body": [
///     { "tag": "template", "id": "lesson-card", "content": ["Bonjour"] },
///     { "tag": "div", "class": "fake-body", "children": [] }
///   ]
/// }
/// ```
#[derive(Debug)]
#[derive(Default)]
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageFixture {
    #[serde(default)]
    pub title: Option<String>,
    /// Feuilles de style, ajoutées au `<head>` dans des `<style>`.
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub body: Vec<NodeFixture>,
}

#[derive(Debug)]
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementFixture {
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    /// Style en ligne.
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub children: Vec<NodeFixture>,
    /// Le contenu d'un `<template>`.
    #[serde(default)]
    pub content: Vec<NodeFixture>,
    /// Les enfants d'une racine fantôme ouverte attachée à l'élément.
    #[serde(default)]
    pub shadow: Option<Vec<NodeFixture>>,
}

// ----------- //
// Énumération //
// ----------- //

#[derive(Debug)]
#[derive(Deserialize)]
#[serde(untagged)]
pub enum NodeFixture {
    Text(String),
    Element(ElementFixture),
}

#[derive(Debug)]
pub enum FixtureError {
    Json(serde_json::Error),
    Dom(DOMException),
    /// `content` n'est permis que sur un `<template>`.
    ContentOutsideTemplate(String),
}

// -------------- //
// Implémentation //
// -------------- //

impl PageFixture {
    pub fn from_json(input: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Construit le document décrit.
    pub fn build(&self) -> Result<DocumentNode, FixtureError> {
        let document = DocumentNode::create_html_document();

        if let Some(head) = document.head() {
            if let Some(title) = self.title.as_deref() {
                let element = document.create_element("title")?;
                element.set_text_content(title);
                head.append_node(&element)?;
            }

            for css in self.styles.iter() {
                let element = document.create_element("style")?;
                element.set_text_content(css);
                head.append_node(&element)?;
            }
        }

        if let Some(body) = document.body() {
            append_nodes(&document, &body, &self.body)?;
        }

        Ok(document)
    }
}

impl ElementFixture {
    fn build(
        &self,
        document: &DocumentNode,
    ) -> Result<ElementNode, FixtureError> {
        let element = document.create_element(&self.tag)?;

        let known = [
            ("id", self.id.as_deref()),
            ("class", self.class.as_deref()),
            ("style", self.style.as_deref()),
        ];
        for (name, value) in known {
            if let Some(value) = value {
                element.set_attribute(name, value)?;
            }
        }
        for (name, value) in self.attributes.iter() {
            element.set_attribute(name, value)?;
        }

        if !self.content.is_empty() {
            let content = element.template_content().ok_or_else(|| {
                FixtureError::ContentOutsideTemplate(self.tag.to_owned())
            })?;
            append_nodes(document, &content, &self.content)?;
        }

        if let Some(shadow) = self.shadow.as_ref() {
            let shadow_root = element.attach_shadow(ShadowRootInit::open())?;
            append_nodes(document, &shadow_root, shadow)?;
        }

        append_nodes(document, &element, &self.children)?;

        Ok(element)
    }
}

// -------- //
// Fonction //
// -------- //

fn append_nodes(
    document: &DocumentNode,
    parent: &TreeNode<Node>,
    nodes: &[NodeFixture],
) -> Result<(), FixtureError> {
    for node in nodes {
        let child = match node {
            | NodeFixture::Text(text) => document.create_text_node(text),
            | NodeFixture::Element(element) => {
                element.build(document)?.tree().to_owned()
            }
        };
        parent.append_node(&child)?;
    }
    Ok(())
}

/// Recherche un élément par identifiant dans l'arbre du nœud, puis dans
/// les racines fantômes ouvertes qu'il contient, dans l'ordre de l'arbre.
pub fn find_element_by_id_composed(
    root: &TreeNode<Node>,
    id: &str,
) -> Option<ElementNode> {
    root.descendants()
        .filter_map(ElementNode::from_tree)
        .find_map(|element| {
            if element.id().as_deref() == Some(id) {
                return Some(element);
            }
            element
                .shadow_root()
                .and_then(|shadow| find_element_by_id_composed(&shadow, id))
        })
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            | Self::Json(err) => write!(f, "Page JSON invalide : {err}"),
            | Self::Dom(err) => write!(f, "{err}"),
            | Self::ContentOutsideTemplate(tag) => write!(
                f,
                "L'élément <{tag}> n'est pas un gabarit : il ne peut pas \
                 avoir de contenu."
            ),
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            | Self::Json(err) => Some(err),
            | Self::Dom(err) => Some(err),
            | Self::ContentOutsideTemplate(_) => None,
        }
    }
}

impl From<serde_json::Error> for FixtureError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<DOMException> for FixtureError {
    fn from(err: DOMException) -> Self {
        Self::Dom(err)
    }
}

// ---- //
// Test //
// ---- //
