/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::interface::HTMLElementInterface;

// --------- //
// Structure //
// --------- //

/// Élément autonome personnalisé : son nom local est un nom d'élément
/// personnalisé valide (ex. `lesson-card`). Son comportement est fourni
/// par la définition enregistrée sous ce nom, s'il y en a une.
#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub struct HTMLCustomElement {
    local_name: String,
}

/// Élément dont le nom n'est ni connu ni un nom d'élément personnalisé.
#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub struct HTMLUnknownElement {
    local_name: String,
}

// -------------- //
// Implémentation //
// -------------- //

impl HTMLCustomElement {
    pub fn new(local_name: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
        }
    }
}

impl HTMLUnknownElement {
    pub fn new(local_name: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
        }
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl HTMLElementInterface for HTMLCustomElement {
    fn tag_name(&self) -> &str {
        &self.local_name
    }
}

impl HTMLElementInterface for HTMLUnknownElement {
    fn tag_name(&self) -> &str {
        &self.local_name
    }
}
