/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

// --------- //
// Structure //
// --------- //

#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub struct Attr {
    name: String,
    value: String,
}

/// Les attributs d'un élément, dans leur ordre d'ajout.
#[derive(Debug)]
#[derive(Default)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub struct NamedNodeMap {
    attributes: Vec<Attr>,
}

// -------------- //
// Implémentation //
// -------------- //

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl NamedNodeMap {
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attributes.iter()
    }

    pub fn get_named_item(&self, name: &str) -> Option<&Attr> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Remplace la valeur de l'attribut à sa place, ou l'ajoute à la fin.
    pub fn set_named_item(&mut self, attr: Attr) -> Option<Attr> {
        match self.attributes.iter_mut().find(|a| a.name == attr.name) {
            | Some(current) => Some(core::mem::replace(current, attr)),
            | None => {
                self.attributes.push(attr);
                None
            }
        }
    }

    pub fn remove_named_item(&mut self, name: &str) -> Option<Attr> {
        let index = self.attributes.iter().position(|a| a.name == name)?;
        Some(self.attributes.remove(index))
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_node_map_keeps_order() {
        let mut map = NamedNodeMap::default();
        map.set_named_item(Attr::new("id", "a"));
        map.set_named_item(Attr::new("class", "b"));
        let old = map.set_named_item(Attr::new("id", "c"));

        assert_eq!(old, Some(Attr::new("id", "a")));
        assert_eq!(
            map.iter().map(Attr::name).collect::<Vec<_>>(),
            ["id", "class"]
        );
        assert_eq!(map.get_named_item("id").map(Attr::value), Some("c"));

        assert!(map.remove_named_item("id").is_some());
        assert!(map.remove_named_item("id").is_none());
        assert_eq!(map.len(), 1);
    }
}
