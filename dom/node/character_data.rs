/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::sync::RwLock;

// --------- //
// Structure //
// --------- //

/// 4.10. Interface CharacterData : la donnée textuelle d'un nœud Text ou
/// Comment.
#[derive(Debug)]
pub struct CharacterData {
    data: RwLock<String>,
}

// -------------- //
// Implémentation //
// -------------- //

impl CharacterData {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: RwLock::new(data.into()),
        }
    }

    pub fn data(&self) -> String {
        self.data.read().map(|d| d.to_owned()).unwrap_or_default()
    }

    pub fn set_data(&self, data: &str) {
        if let Ok(mut guard) = self.data.write() {
            *guard = data.to_owned();
        }
    }

    pub fn length(&self) -> usize {
        self.data.read().map(|d| d.encode_utf16().count()).unwrap_or(0)
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl Clone for CharacterData {
    fn clone(&self) -> Self {
        Self::new(self.data())
    }
}
