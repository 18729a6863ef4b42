/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::sync::OnceLock;

use css::{
    selectors::{SelectorList, SimpleSelector, Specificity},
    CSSDeclaration, CSSStyleDeclaration, CSSStyleSheet,
};

use crate::node::{
    ElementNode, GetRootNodeOptions, NodeInterface, ParentNode, ShadowRoot,
};

// -------- //
// Constant //
// -------- //

/// Valeurs initiales des propriétés connues de ce moteur.
const INITIAL_VALUES: [(&str, &str); 6] = [
    ("display", "inline"),
    ("resize", "none"),
    ("overflow", "visible"),
    ("width", "auto"),
    ("height", "auto"),
    ("margin", "0"),
];

/// La feuille de style de l'agent utilisateur, réduite aux éléments que
/// connaît ce moteur.
const USER_AGENT_CSS: &str = r#"
html, body, div, p, article, aside, blockquote, footer, header, main, nav,
section, h1, h2, h3, h4, h5, h6 {
    display: block;
}

head, style, title, template {
    display: none;
}

body {
    margin: 8px;
}

button {
    display: inline-block;
}

textarea {
    display: inline-block;
    overflow: auto;
    resize: both;
}
"#;

// ----------- //
// Énumération //
// ----------- //

/// L'origine d'une déclaration, de la plus faible à la plus forte.
#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum CascadeOrigin {
    UserAgent,
    Author,
}

// -------- //
// Fonction //
// -------- //

fn user_agent_stylesheet() -> &'static CSSStyleSheet {
    static STYLESHEET: OnceLock<CSSStyleSheet> = OnceLock::new();
    STYLESHEET.get_or_init(|| CSSStyleSheet::parse(USER_AGENT_CSS))
}

/// Les feuilles de style des éléments `<style>` de l'arbre qui contient
/// l'élément (le document ou une racine fantôme), dans l'ordre de l'arbre.
fn author_stylesheets(element: &ElementNode) -> Vec<CSSStyleSheet> {
    let root = element.get_root_node(GetRootNodeOptions::default());
    let style_selector = SelectorList::from(SimpleSelector::Type(
        "style".to_owned(),
    ));

    root.select_all(&style_selector)
        .into_iter()
        .filter_map(|style| style.text_content())
        .map(|text| CSSStyleSheet::parse(&text))
        .collect()
}

/// `window.getComputedStyle(element)` : la cascade des valeurs initiales,
/// de la feuille de l'agent utilisateur, des feuilles d'auteur de l'arbre
/// de l'élément puis de son style en ligne.
///
/// Les valeurs ne sont héritées que sur demande (`inherit`) : seules les
/// propriétés qui s'appliquent directement à l'élément sont résolues. Les
/// mots-clés `initial`, `inherit`, `unset` et `revert` n'apparaissent
/// jamais dans le résultat.
pub fn get_computed_style(element: &ElementNode) -> CSSStyleDeclaration {
    let initial: CSSStyleDeclaration = INITIAL_VALUES
        .iter()
        .map(|(name, value)| CSSDeclaration::new(name, *value, false))
        .collect();

    let author = author_stylesheets(element);
    let sheets = [(CascadeOrigin::UserAgent, user_agent_stylesheet())]
        .into_iter()
        .chain(author.iter().map(|sheet| (CascadeOrigin::Author, sheet)));

    let mut matched: Vec<(
        CascadeOrigin,
        Specificity,
        usize,
        &CSSStyleDeclaration,
    )> = Vec::new();
    for (origin, sheet) in sheets {
        for rule in sheet.rules() {
            if let Some(specificity) =
                rule.selectors().matching_specificity(element)
            {
                let order = matched.len();
                matched.push((origin, specificity, order, rule.style()));
            }
        }
    }

    matched.sort_by_key(|(origin, specificity, order, _)| {
        (*origin, *specificity, *order)
    });

    // Pour `revert` : la cascade arrêtée à l'origine agent utilisateur.
    let mut user_agent = initial.clone();
    let mut computed = initial;
    for (origin, .., style) in matched {
        if origin == CascadeOrigin::UserAgent {
            user_agent.apply(style);
        }
        computed.apply(style);
    }

    computed.apply(&element.style());
    resolve_css_wide_keywords(element, &mut computed, &user_agent);
    computed
}

fn is_css_wide_keyword(value: &str) -> bool {
    ["initial", "inherit", "unset", "revert", "revert-layer"]
        .iter()
        .any(|keyword| value.eq_ignore_ascii_case(keyword))
}

fn initial_value(name: &str) -> Option<&'static str> {
    INITIAL_VALUES
        .iter()
        .find(|(property, _)| *property == name)
        .map(|(_, value)| *value)
}

/// L'élément dont hérite `element` : son parent, ou l'hôte de la racine
/// fantôme qui le contient.
fn inheritance_parent(element: &ElementNode) -> Option<ElementNode> {
    element.parent_element().or_else(|| {
        element.parent_node().and_then(|parent| {
            parent.shadow_root_ref().and_then(ShadowRoot::host)
        })
    })
}

/// Remplace les mots-clés globaux par une valeur. Aucune des propriétés
/// connues n'est héritée : `unset` vaut donc `initial`. Une propriété
/// inconnue de ce moteur, sans valeur initiale, est retirée.
fn resolve_css_wide_keywords(
    element: &ElementNode,
    computed: &mut CSSStyleDeclaration,
    user_agent: &CSSStyleDeclaration,
) {
    let keywords: Vec<(String, String, bool)> = computed
        .iter()
        .filter(|declaration| is_css_wide_keyword(declaration.value()))
        .map(|declaration| {
            (
                declaration.name().to_owned(),
                declaration.value().to_ascii_lowercase(),
                declaration.is_important(),
            )
        })
        .collect();

    let mut parent_style: Option<Option<CSSStyleDeclaration>> = None;
    for (name, keyword, important) in keywords {
        let value = match keyword.as_str() {
            | "inherit" => parent_style
                .get_or_insert_with(|| {
                    inheritance_parent(element)
                        .map(|parent| get_computed_style(&parent))
                })
                .as_ref()
                .map(|style| style.get_property_value(&name).to_owned())
                .filter(|value| !value.is_empty())
                .or_else(|| initial_value(&name).map(String::from)),
            | "revert" | "revert-layer" => {
                Some(user_agent.get_property_value(&name).to_owned())
            }
            | _ => initial_value(&name).map(String::from),
        };

        computed.set_property_with_priority(
            &name,
            &value.unwrap_or_default(),
            important,
        );
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use infra::structure::tree::TreeNode;

    use super::*;
    use crate::node::{DocumentNode, Node, ShadowRootInit};

    fn append_style(
        parent: &TreeNode<Node>,
        document: &DocumentNode,
        css: &str,
    ) {
        let style = document.create_element("style").unwrap();
        style.set_text_content(css);
        parent.append_node(&style).unwrap();
    }

    #[test]
    fn test_initial_and_user_agent_values() {
        let document = DocumentNode::create_html_document();
        let div = document.create_element("div").unwrap();
        let span = document.create_element("span").unwrap();
        let textarea = document.create_element("textarea").unwrap();

        let div_style = get_computed_style(&div);
        assert_eq!(div_style.get_property_value("display"), "block");
        assert_eq!(div_style.get_property_value("resize"), "none");
        assert_eq!(
            get_computed_style(&span).get_property_value("display"),
            "inline"
        );
        assert_eq!(
            get_computed_style(&textarea).get_property_value("resize"),
            "both"
        );
    }

    #[test]
    fn test_author_cascade_by_specificity_then_order() {
        let document = DocumentNode::create_html_document();
        let head = document.head().unwrap();
        append_style(
            &head,
            &document,
            ".box.resizable { resize: both; }
             div.box { resize: vertical; }
             .box { resize: none; }",
        );
        append_style(&head, &document, "div.box { resize: horizontal; }");

        let body = document.body().unwrap();
        let plain = document.create_element("div").unwrap();
        plain.set_attribute("class", "box").unwrap();
        let resizable = document.create_element("div").unwrap();
        resizable.set_attribute("class", "box resizable").unwrap();
        body.append_node(&plain).unwrap();
        body.append_node(&resizable).unwrap();

        assert_eq!(
            get_computed_style(&plain).get_property_value("resize"),
            "horizontal"
        );
        assert_eq!(
            get_computed_style(&resizable).get_property_value("resize"),
            "both"
        );

        resizable.set_style_property("resize", "none");
        assert_eq!(
            get_computed_style(&resizable).get_property_value("resize"),
            "none"
        );
    }

    #[test]
    fn test_important_wins_over_inline() {
        let document = DocumentNode::create_html_document();
        append_style(
            &document.head().unwrap(),
            &document,
            "div { resize: block !important; }",
        );

        let div = document.create_element("div").unwrap();
        div.set_attribute("style", "resize: none; height: 40px").unwrap();
        document.body().unwrap().append_node(&div).unwrap();

        let computed = get_computed_style(&div);
        assert_eq!(computed.get_property_value("resize"), "block");
        assert_eq!(computed.get_property_value("height"), "40px");
    }

    #[test]
    fn test_shadow_styles_are_scoped() {
        let document = DocumentNode::create_html_document();
        append_style(
            &document.head().unwrap(),
            &document,
            "div { resize: both; }",
        );

        let host = document.create_element("lesson-card").unwrap();
        document.body().unwrap().append_node(&host).unwrap();
        let shadow = host.attach_shadow(ShadowRootInit::open()).unwrap();
        append_style(&shadow, &document, ".inner { resize: vertical; }");

        let inner = document.create_element("div").unwrap();
        inner.set_attribute("class", "inner").unwrap();
        let other = document.create_element("div").unwrap();
        shadow.append_node(&inner).unwrap();
        shadow.append_node(&other).unwrap();

        assert_eq!(
            get_computed_style(&inner).get_property_value("resize"),
            "vertical"
        );
        assert_eq!(
            get_computed_style(&other).get_property_value("resize"),
            "none"
        );
    }

    #[test]
    fn test_css_wide_keywords_are_resolved() {
        let document = DocumentNode::create_html_document();
        append_style(
            &document.head().unwrap(),
            &document,
            ".fake-body { resize: vertical; } textarea { resize: none; }",
        );

        let fake_body = document.create_element("div").unwrap();
        fake_body.set_attribute("class", "fake-body").unwrap();
        fake_body.set_attribute("style", "height: 300px").unwrap();
        document.body().unwrap().append_node(&fake_body).unwrap();

        let child = |style: &str, tag: &str| {
            let element = document.create_element(tag).unwrap();
            element.set_attribute("style", style).unwrap();
            fake_body.append_node(&element).unwrap();
            get_computed_style(&element)
        };

        let initial = child("resize: initial; color: initial", "div");
        assert_eq!(initial.get_property_value("resize"), "none");
        assert_eq!(initial.get_property_value("color"), "");

        let inherit = child("resize: INHERIT; height: inherit", "div");
        assert_eq!(inherit.get_property_value("resize"), "vertical");
        assert_eq!(inherit.get_property_value("height"), "300px");

        let unset = child("resize: unset", "div");
        assert_eq!(unset.get_property_value("resize"), "none");

        let revert = child("resize: revert", "textarea");
        assert_eq!(revert.get_property_value("resize"), "both");
    }

    #[test]
    fn test_inherit_from_shadow_host() {
        let document = DocumentNode::create_html_document();
        let host = document.create_element("lesson-card").unwrap();
        host.set_attribute("style", "resize: horizontal").unwrap();
        document.body().unwrap().append_node(&host).unwrap();
        let shadow = host.attach_shadow(ShadowRootInit::open()).unwrap();

        let inner = document.create_element("div").unwrap();
        inner.set_attribute("style", "resize: inherit").unwrap();
        shadow.append_node(&inner).unwrap();

        assert_eq!(
            get_computed_style(&inner).get_property_value("resize"),
            "horizontal"
        );

        let orphan = document.create_element("div").unwrap();
        orphan.set_attribute("style", "resize: inherit").unwrap();
        assert_eq!(
            get_computed_style(&orphan).get_property_value("resize"),
            "none"
        );
    }
}
