/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use dom::{
    custom_elements::CustomElementRegistry,
    node::{DocumentNode, ElementNode, NodeInterface, ParentNode},
};
use atelier_lessons::{
    fixture::{find_element_by_id_composed, PageFixture},
    reset_all_sizes, reset_size_for, TemplateError, TemplateRegistrar,
};

fn page() -> DocumentNode {
    PageFixture::from_json(include_str!("fixtures/resize_lesson.json"))
        .and_then(|page| page.build())
        .unwrap()
}

fn by_id(document: &DocumentNode, id: &str) -> ElementNode {
    find_element_by_id_composed(document, id).unwrap()
}

fn style_of(element: &ElementNode) -> Option<String> {
    element.get_attribute("style")
}

#[test]
fn test_page_level_reset() {
    let document = page();
    let trigger = by_id(&document, "page-reset");

    assert_eq!(reset_all_sizes(&trigger), 2);
    assert_eq!(style_of(&by_id(&document, "panel")).as_deref(), Some(""));
    assert_eq!(
        style_of(&by_id(&document, "fixed")).as_deref(),
        Some("height: 50px")
    );

    // Le gabarit n'est pas dans l'arbre du document.
    let content = document
        .get_element_by_id("resize-demo")
        .and_then(|template| template.template_content())
        .unwrap();
    assert!(content.text_content().unwrap().contains("Rétablir"));
}

#[test]
fn test_mounted_demo_resets_inside_its_shadow_root() {
    let document = page();
    let registry = CustomElementRegistry::new();
    let registrar = TemplateRegistrar::new(document.to_owned(), &registry);

    let demo = registrar.register_and_mount("resize-demo").unwrap();
    assert!(document.body().unwrap().last_child().unwrap().ptr_eq(&demo));

    let trigger = by_id(&document, "demo-reset");
    assert!(trigger
        .get_root_node(Default::default())
        .ptr_eq(&demo.shadow_root().unwrap()));

    // `.box` est redimensionnable par la feuille de la racine fantôme,
    // `.resizable` ne l'est pas : la feuille du document ne s'y applique
    // pas.
    assert_eq!(reset_all_sizes(&trigger), 2);
    let shadow_root = demo.shadow_root().unwrap();
    let select = |selector: &str| {
        shadow_root.query_selector(selector).unwrap().unwrap()
    };
    assert_eq!(style_of(&select(".fake-body")).as_deref(), Some(""));
    assert_eq!(style_of(&select(".box")).as_deref(), Some(""));
    assert_eq!(
        style_of(&select(".resizable")).as_deref(),
        Some("width: 30px")
    );

    // Le document n'a pas été touché.
    assert_eq!(
        style_of(&by_id(&document, "panel")).as_deref(),
        Some("height: 120px; width: 40px")
    );

    assert_eq!(reset_size_for(&trigger, "#panel"), Ok(false));
    assert_eq!(
        registrar.register_and_mount("resize-demo"),
        Err(TemplateError::AlreadyRegistered("resize-demo".into()))
    );
}
