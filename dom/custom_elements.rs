/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::fmt;
use std::{cell::RefCell, collections::HashMap, rc::Rc};

use html_elements::tag_names;
use infra::structure::tree::TreeNode;

use crate::{
    exception::DOMException,
    node::{CustomElementState, DocumentNode, ElementNode, Node},
};

// ---- //
// Type //
// ---- //

/// Le constructeur d'un élément personnalisé : il reçoit l'élément en
/// cours de mise à niveau.
pub type CustomElementConstructor =
    Rc<dyn Fn(&ElementNode) -> Result<(), DOMException>>;

// --------- //
// Structure //
// --------- //

/// 4.13.4 : le registre des éléments personnalisés d'une fenêtre.
///
/// Une définition ne peut être ni remplacée ni retirée.
#[derive(Default)]
pub struct CustomElementRegistry {
    definitions: RefCell<HashMap<String, CustomElementConstructor>>,
}

// -------------- //
// Implémentation //
// -------------- //

impl CustomElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `customElements.define(name, constructor)`
    pub fn define(
        &self,
        name: &str,
        constructor: impl Fn(&ElementNode) -> Result<(), DOMException> + 'static,
    ) -> Result<(), DOMException> {
        // 1) Si le nom n'est pas un nom d'élément personnalisé valide,
        // lever une "SyntaxError".
        if !tag_names::is_valid_custom_element_name(name) {
            return Err(DOMException::SyntaxError);
        }

        // 2) Si le registre contient déjà une entrée avec ce nom, lever
        // une "NotSupportedError".
        let mut definitions = self.definitions.borrow_mut();
        if definitions.contains_key(name) {
            return Err(DOMException::NotSupportedError);
        }

        definitions.insert(name.to_owned(), Rc::new(constructor));
        log::debug!("Élément personnalisé « {name} » défini");

        Ok(())
    }

    /// `customElements.get(name)`
    pub fn get(&self, name: &str) -> Option<CustomElementConstructor> {
        self.definitions.borrow().get(name).cloned()
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.borrow().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.borrow().is_empty()
    }

    /// Crée un élément ; s'il existe une définition pour son nom, son
    /// constructeur est exécuté de manière synchrone.
    pub fn create_element(
        &self,
        document: &DocumentNode,
        name: &str,
    ) -> Result<ElementNode, DOMException> {
        let element = document.create_element(name)?;
        self.try_upgrade(&element)?;
        Ok(element)
    }

    /// `customElements.upgrade(root)` : met à niveau les éléments
    /// inclusivement descendants de `root` qui ont une définition et ne
    /// l'ont pas encore été. Renvoie le nombre d'éléments mis à niveau.
    pub fn upgrade(&self, root: &TreeNode<Node>) -> usize {
        let candidates = ElementNode::from_tree(root.to_owned())
            .into_iter()
            .chain(root.descendants().filter_map(ElementNode::from_tree));

        let mut upgraded = 0;
        for element in candidates {
            match self.try_upgrade(&element) {
                | Ok(true) => upgraded += 1,
                | Ok(false) => {}
                | Err(err) => {
                    log::error!(
                        "Mise à niveau de « {} » échouée : {err}",
                        element.local_name()
                    );
                }
            }
        }
        upgraded
    }

    /// Exécute le constructeur de l'élément si une définition existe et
    /// que l'élément n'a pas encore été traité.
    fn try_upgrade(&self, element: &ElementNode) -> Result<bool, DOMException> {
        if element.custom_element_state() != CustomElementState::Undefined {
            return Ok(false);
        }

        // Le constructeur peut consulter le registre : l'emprunt est
        // relâché avant l'appel.
        let Some(constructor) = self.get(element.local_name()) else {
            return Ok(false);
        };

        match constructor(element) {
            | Ok(()) => {
                element.set_custom_element_state(CustomElementState::Custom);
                Ok(true)
            }
            | Err(err) => {
                element.set_custom_element_state(CustomElementState::Failed);
                Err(err)
            }
        }
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl fmt::Debug for CustomElementRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let definitions = self.definitions.borrow();
        let mut names: Vec<_> = definitions.keys().collect();
        names.sort();
        f.debug_struct("CustomElementRegistry")
            .field("definitions", &names)
            .finish()
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::node::{NodeInterface, ShadowRootInit};

    #[test]
    fn test_define_validates_names() {
        let registry = CustomElementRegistry::new();

        assert_eq!(
            registry.define("card", |_| Ok(())),
            Err(DOMException::SyntaxError)
        );
        assert_eq!(
            registry.define("font-face", |_| Ok(())),
            Err(DOMException::SyntaxError)
        );
        assert_eq!(registry.define("lesson-card", |_| Ok(())), Ok(()));
        assert_eq!(
            registry.define("lesson-card", |_| Ok(())),
            Err(DOMException::NotSupportedError)
        );
        assert!(registry.is_defined("lesson-card"));
        assert!(registry.get("lesson-other").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_create_element_runs_constructor_per_instance() {
        let document = DocumentNode::create_html_document();
        let registry = CustomElementRegistry::new();
        let calls = Rc::new(Cell::new(0));

        let counter = Rc::clone(&calls);
        registry
            .define("lesson-card", move |element| {
                counter.set(counter.get() + 1);
                element.attach_shadow(ShadowRootInit::open())?;
                Ok(())
            })
            .unwrap();

        let first = registry.create_element(&document, "lesson-card").unwrap();
        let second = registry.create_element(&document, "lesson-card").unwrap();

        assert_eq!(calls.get(), 2);
        assert!(first.shadow_root().is_some());
        assert!(second.shadow_root().is_some());
        assert_eq!(first.custom_element_state(), CustomElementState::Custom);

        let plain = registry.create_element(&document, "div").unwrap();
        assert_eq!(calls.get(), 2);
        assert_eq!(
            plain.custom_element_state(),
            CustomElementState::Uncustomized
        );
    }

    #[test]
    fn test_failing_constructor() {
        let document = DocumentNode::create_html_document();
        let registry = CustomElementRegistry::new();
        registry
            .define("broken-card", |_| Err(DOMException::NotFoundError))
            .unwrap();

        assert_eq!(
            registry.create_element(&document, "broken-card"),
            Err(DOMException::NotFoundError)
        );
    }

    #[test]
    fn test_upgrade_existing_elements() {
        let document = DocumentNode::create_html_document();
        let registry = CustomElementRegistry::new();
        let body = document.body().unwrap();

        let early = document.create_element("lesson-card").unwrap();
        body.append_node(&early).unwrap();
        registry.define("lesson-card", |_| Ok(())).unwrap();

        assert_eq!(early.custom_element_state(), CustomElementState::Undefined);
        assert_eq!(registry.upgrade(&document), 1);
        assert_eq!(early.custom_element_state(), CustomElementState::Custom);
        assert_eq!(registry.upgrade(&document), 0);
    }
}
