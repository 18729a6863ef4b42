/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::interface::HTMLElementInterface;

// --------- //
// Structure //
// --------- //

/// L'élément `<template>` ne rend rien : ses enfants vivent dans un
/// fragment de document séparé, son contenu, qui n'est jamais rattaché
/// à l'arbre du document.
///
/// Le type du fragment est laissé au DOM, qui dépend de cette crate.
#[derive(Debug)]
#[derive(Default)]
#[derive(PartialEq, Eq)]
pub struct HTMLTemplateElement<DocumentFragmentNode> {
    content: DocumentFragmentNode,
}

// -------------- //
// Implémentation //
// -------------- //

impl<DocumentFragmentNode> HTMLTemplateElement<DocumentFragmentNode> {
    pub const NAME: &'static str = "template";

    pub fn new(content: DocumentFragmentNode) -> Self {
        Self { content }
    }

    /// Le contenu du gabarit.
    pub fn content(&self) -> &DocumentFragmentNode {
        &self.content
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl<DocumentFragmentNode> HTMLElementInterface
    for HTMLTemplateElement<DocumentFragmentNode>
{
    fn tag_name(&self) -> &str {
        Self::NAME
    }
}
