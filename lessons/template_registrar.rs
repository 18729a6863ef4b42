/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use dom::{
    custom_elements::CustomElementRegistry,
    exception::DOMException,
    node::{DocumentNode, ElementNode, NodeInterface, ShadowRootInit},
};

use crate::TemplateError;

// --------- //
// Structure //
// --------- //

/// Transforme les gabarits d'un document en éléments personnalisés : le
/// nom de l'élément est l'identifiant du gabarit.
#[derive(Debug)]
pub struct TemplateRegistrar<'r> {
    document: DocumentNode,
    registry: &'r CustomElementRegistry,
}

// -------------- //
// Implémentation //
// -------------- //

impl<'r> TemplateRegistrar<'r> {
    pub fn new(
        document: DocumentNode,
        registry: &'r CustomElementRegistry,
    ) -> Self {
        Self { document, registry }
    }

    pub fn document(&self) -> &DocumentNode {
        &self.document
    }

    /// Définit un élément personnalisé nommé `template_id` dont chaque
    /// instance reçoit, à sa construction, une racine fantôme ouverte
    /// peuplée d'une copie profonde du contenu du gabarit. Une instance
    /// est ensuite créée, stylée en bloc, puis ajoutée à la fin du
    /// `<body>`.
    pub fn register_and_mount(
        &self,
        template_id: &str,
    ) -> Result<ElementNode, TemplateError> {
        let template = self
            .document
            .get_element_by_id(template_id)
            .ok_or_else(|| TemplateError::NotFound(template_id.to_owned()))?;

        if self.registry.get(template_id).is_some() {
            return Err(TemplateError::AlreadyRegistered(
                template_id.to_owned(),
            ));
        }

        if !template.is_template() {
            return Err(DOMException::InvalidNodeTypeError.into());
        }

        let body = self.document.body().ok_or(TemplateError::MissingBody)?;

        let document = self.document.to_owned();
        let id = template_id.to_owned();
        self.registry.define(template_id, move |element| {
            attach_template_clone(&document, &id, element)
        })?;

        let instance = self
            .registry
            .create_element(&self.document, template_id)
            .map_err(|err| match err {
                | DOMException::NotFoundError => {
                    TemplateError::NotFound(template_id.to_owned())
                }
                | err => TemplateError::Dom(err),
            })?;

        instance.set_style_property("margin", "20px 0");
        instance.set_style_property("display", "block");
        body.append_node(&instance)?;

        log::debug!("Gabarit « {template_id} » monté dans le <body>");

        Ok(instance)
    }
}

/// Le constructeur des éléments définis par [TemplateRegistrar] : le
/// gabarit est recherché à nouveau à chaque construction.
fn attach_template_clone(
    document: &DocumentNode,
    template_id: &str,
    element: &ElementNode,
) -> Result<(), DOMException> {
    let content = document
        .get_element_by_id(template_id)
        .ok_or(DOMException::NotFoundError)?
        .template_content()
        .ok_or(DOMException::InvalidNodeTypeError)?;

    let shadow_root = element.attach_shadow(ShadowRootInit::open())?;
    shadow_root.append_node(&content.clone_node(true))?;

    Ok(())
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use dom::node::ParentNode;

    use super::*;

    /// Un document avec `<template id="lesson-card"><div class="card">
    /// <p>Bonjour</p></div></template>` dans le `<body>`.
    fn page() -> DocumentNode {
        let document = DocumentNode::create_html_document();
        let template = document.create_element("template").unwrap();
        template.set_attribute("id", "lesson-card").unwrap();

        let card = document.create_element("div").unwrap();
        card.set_attribute("class", "card").unwrap();
        let p = document.create_element("p").unwrap();
        p.set_text_content("Bonjour");
        card.append_node(&p).unwrap();
        template.template_content().unwrap().append_node(&card).unwrap();

        document.body().unwrap().append_node(&template).unwrap();
        document
    }

    #[test]
    fn test_register_and_mount_appends_one_instance() {
        let document = page();
        let registry = CustomElementRegistry::new();
        let registrar = TemplateRegistrar::new(document.to_owned(), &registry);
        let body = document.body().unwrap();
        let before = body.children().count();

        let instance = registrar.register_and_mount("lesson-card").unwrap();

        assert_eq!(body.children().count(), before + 1);
        assert!(body.last_child().unwrap().ptr_eq(&instance));
        assert_eq!(instance.local_name(), "lesson-card");
        assert_eq!(
            instance.get_attribute("style").as_deref(),
            Some("margin: 20px 0; display: block;")
        );
        assert!(registry.is_defined("lesson-card"));

        let shadow_root = instance.shadow_root().unwrap();
        let cloned_card = shadow_root.query_selector(".card").unwrap().unwrap();
        let original_card = document
            .get_element_by_id("lesson-card")
            .and_then(|template| template.template_content())
            .and_then(|content| content.query_selector(".card").unwrap())
            .unwrap();

        assert!(!cloned_card.ptr_eq(&original_card));
        assert_eq!(cloned_card.text_content().as_deref(), Some("Bonjour"));
    }

    #[test]
    fn test_register_twice_fails() {
        let document = page();
        let registry = CustomElementRegistry::new();
        let registrar = TemplateRegistrar::new(document.to_owned(), &registry);
        let body = document.body().unwrap();
        let before = body.children().count();

        assert!(registrar.register_and_mount("lesson-card").is_ok());
        assert_eq!(
            registrar.register_and_mount("lesson-card"),
            Err(TemplateError::AlreadyRegistered("lesson-card".into()))
        );
        assert_eq!(body.children().count(), before + 1);
    }

    #[test]
    fn test_missing_template() {
        let document = page();
        let registry = CustomElementRegistry::new();
        let registrar = TemplateRegistrar::new(document.to_owned(), &registry);
        let before = document.body().unwrap().children().count();

        let err = registrar.register_and_mount("missing-id").unwrap_err();
        assert_eq!(err, TemplateError::NotFound("missing-id".into()));
        assert!(err.to_string().contains("missing-id"));
        assert_eq!(document.body().unwrap().children().count(), before);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_template_mutation_does_not_reach_instances() {
        let document = page();
        let registry = CustomElementRegistry::new();
        let registrar = TemplateRegistrar::new(document.to_owned(), &registry);
        let instance = registrar.register_and_mount("lesson-card").unwrap();

        let content = document
            .get_element_by_id("lesson-card")
            .and_then(|template| template.template_content())
            .unwrap();
        content.first_child().unwrap().set_text_content("Modifié");

        let shadow_root = instance.shadow_root().unwrap();
        assert_eq!(shadow_root.text_content().as_deref(), Some("Bonjour"));

        // Une nouvelle instance suit le gabarit tel qu'il est alors.
        let second = registry.create_element(&document, "lesson-card").unwrap();
        assert_eq!(
            second.shadow_root().unwrap().text_content().as_deref(),
            Some("Modifié")
        );
    }

    #[test]
    fn test_rejected_before_touching_registry() {
        let registry = CustomElementRegistry::new();

        let document = page();
        let div = document.create_element("div").unwrap();
        div.set_attribute("id", "not-a-template").unwrap();
        document.body().unwrap().append_node(&div).unwrap();
        let registrar = TemplateRegistrar::new(document.to_owned(), &registry);
        assert_eq!(
            registrar.register_and_mount("not-a-template"),
            Err(TemplateError::Dom(DOMException::InvalidNodeTypeError))
        );

        let headless = DocumentNode::new();
        let template = headless.create_element("template").unwrap();
        template.set_attribute("id", "lesson-card").unwrap();
        headless.append_node(&template).unwrap();
        let registrar = TemplateRegistrar::new(headless, &registry);
        assert_eq!(
            registrar.register_and_mount("lesson-card"),
            Err(TemplateError::MissingBody)
        );

        assert!(registry.is_empty());
    }

    #[test]
    fn test_invalid_custom_element_name() {
        let document = page();
        let template = document.create_element("template").unwrap();
        template.set_attribute("id", "card").unwrap();
        document.body().unwrap().append_node(&template).unwrap();

        let registry = CustomElementRegistry::new();
        let registrar = TemplateRegistrar::new(document, &registry);
        assert_eq!(
            registrar.register_and_mount("card"),
            Err(TemplateError::Dom(DOMException::SyntaxError))
        );
    }

    #[test]
    fn test_existing_elements_are_upgraded_after_mount() {
        let document = page();
        let existing = document.create_element("lesson-card").unwrap();
        document.body().unwrap().append_node(&existing).unwrap();

        let registry = CustomElementRegistry::new();
        let registrar = TemplateRegistrar::new(document, &registry);
        let instance = registrar.register_and_mount("lesson-card").unwrap();

        assert!(existing.shadow_root().is_none());
        assert_eq!(registry.upgrade(registrar.document()), 1);
        assert_eq!(
            existing.shadow_root().unwrap().text_content().as_deref(),
            Some("Bonjour")
        );
        assert_eq!(
            instance.custom_element_state(),
            existing.custom_element_state()
        );
    }
}
