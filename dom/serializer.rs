/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use html_elements::tag_names;
use infra::structure::tree::TreeNode;

use crate::node::{ElementNode, Node, NodeData};

// -------- //
// Fonction //
// -------- //

/// Sérialise le nœud lui-même et ses descendants (`outerHTML` pour un
/// élément). Pour un document ou un fragment, seuls les enfants sont
/// émis.
pub fn serialize_node(node: &TreeNode<Node>) -> String {
    let mut output = String::new();
    write_node(&mut output, node);
    output
}

/// Sérialise les enfants du nœud (`innerHTML`). Le contenu d'un gabarit
/// remplace ses enfants.
pub fn serialize_children(node: &TreeNode<Node>) -> String {
    let mut output = String::new();
    write_children(&mut output, node);
    output
}

fn write_node(output: &mut String, node: &TreeNode<Node>) {
    match node.node_data() {
        | NodeData::Document(_) | NodeData::DocumentFragment { .. } => {
            write_children(output, node)
        }
        | NodeData::Element(_) => {
            if let Some(element) = ElementNode::from_tree(node.to_owned()) {
                write_element(output, &element);
            }
        }
        | NodeData::Text(data) => {
            let is_raw_text = node.parent_node().map_or(false, |parent| {
                parent.element_ref().map_or(false, |element| {
                    tag_names::style == element.local_name()
                })
            });
            if is_raw_text {
                output.push_str(&data.data());
            } else {
                output.push_str(&escape(&data.data(), false));
            }
        }
        | NodeData::Comment(data) => {
            output.push_str("<!--");
            output.push_str(&data.data());
            output.push_str("-->");
        }
    }
}

fn write_element(output: &mut String, element: &ElementNode) {
    output.push('<');
    output.push_str(element.local_name());
    for attr in element.attributes() {
        output.push(' ');
        output.push_str(attr.name());
        output.push_str("=\"");
        output.push_str(&escape(attr.value(), true));
        output.push('"');
    }
    output.push('>');

    // Une racine fantôme ouverte est émise sous forme déclarative, avant
    // les enfants de l'hôte.
    if let Some(shadow_root) = element.shadow_root() {
        output.push_str("<template shadowrootmode=\"open\">");
        write_children(output, &shadow_root);
        output.push_str("</template>");
    }

    write_children(output, element);

    output.push_str("</");
    output.push_str(element.local_name());
    output.push('>');
}

fn write_children(output: &mut String, node: &TreeNode<Node>) {
    let template_content = ElementNode::from_tree(node.to_owned())
        .and_then(|element| element.template_content());

    let parent = match template_content.as_ref() {
        | Some(content) => content.tree(),
        | None => node,
    };

    parent.children().for_each(|child| write_node(output, &child));
}

/// 13.3 : échappement d'une chaîne, en mode attribut ou non.
fn escape(input: &str, attribute_mode: bool) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            | '&' => escaped.push_str("&amp;"),
            | '\u{00A0}' => escaped.push_str("&nbsp;"),
            | '"' if attribute_mode => escaped.push_str("&quot;"),
            | '<' if !attribute_mode => escaped.push_str("&lt;"),
            | '>' if !attribute_mode => escaped.push_str("&gt;"),
            | ch => escaped.push(ch),
        }
    }
    escaped
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{DocumentNode, NodeInterface, ShadowRootInit};

    #[test]
    fn test_serialize_escapes_text_and_attributes() {
        let document = DocumentNode::create_html_document();
        let p = document.create_element("p").unwrap();
        p.set_attribute("title", "a \"b\" & c").unwrap();
        p.set_text_content("1 < 2 & 3 > 2");

        assert_eq!(
            serialize_node(&p),
            r#"<p title="a &quot;b&quot; &amp; c">1 &lt; 2 &amp; 3 &gt; 2</p>"#
        );

        let style = document.create_element("style").unwrap();
        style.set_text_content(".a > .b { resize: both; }");
        assert_eq!(
            serialize_node(&style),
            "<style>.a > .b { resize: both; }</style>"
        );
    }

    #[test]
    fn test_serialize_document_and_template() {
        let document = DocumentNode::create_html_document();
        let template = document.create_element("template").unwrap();
        template.set_attribute("id", "card").unwrap();
        let content = template.template_content().unwrap();
        content
            .append_node(&document.create_comment("gabarit"))
            .unwrap();
        document.body().unwrap().append_node(&template).unwrap();

        assert_eq!(
            serialize_node(&document),
            "<html><head></head><body><template id=\"card\">\
             <!--gabarit--></template></body></html>"
        );
    }

    #[test]
    fn test_serialize_open_shadow_root() {
        let document = DocumentNode::create_html_document();
        let host = document.create_element("lesson-card").unwrap();
        let shadow = host.attach_shadow(ShadowRootInit::open()).unwrap();
        let span = document.create_element("span").unwrap();
        span.set_text_content("ombre");
        shadow.append_node(&span).unwrap();
        host.set_text_content("lumière");

        assert_eq!(
            serialize_node(&host),
            "<lesson-card><template shadowrootmode=\"open\">\
             <span>ombre</span></template>lumière</lesson-card>"
        );

        let closed = document.create_element("div").unwrap();
        closed.attach_shadow(ShadowRootInit::closed()).unwrap();
        assert_eq!(serialize_node(&closed), "<div></div>");
    }
}
