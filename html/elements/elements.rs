/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::{interface::HTMLElementInterface, tag_names};

// ------ //
// Macros //
// ------ //

/// Les éléments sans état propre : une structure vide dont le nom de
/// balise est constant.
macro_rules! define_html_elements {
    ($(
        $(#[$attr:meta])*
        $element:ident => $name:ident
    ),* $(,)?) => {
        $(
            $(#[$attr])*
            #[derive(Debug)]
            #[derive(Default)]
            #[derive(Clone)]
            #[derive(PartialEq, Eq)]
            pub struct $element {}

            impl $element {
                pub const NAME: &'static str = stringify!($name);
            }

            impl HTMLElementInterface for $element {
                fn tag_name(&self) -> &str {
                    Self::NAME
                }
            }
        )*
    };
}

// --------- //
// Structure //
// --------- //

/// 4.3.6 The h1, h2, h3, h4, h5, and h6 elements
#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub struct HTMLHeadingElement {
    tag_name: tag_names,
}

// -------------- //
// Implémentation //
// -------------- //

impl HTMLHeadingElement {
    /// Renvoie `None` si la balise n'est pas un titre.
    pub fn new(tag_name: tag_names) -> Option<Self> {
        matches!(
            tag_name,
            | tag_names::h1
                | tag_names::h2
                | tag_names::h3
                | tag_names::h4
                | tag_names::h5
                | tag_names::h6
        )
        .then_some(Self { tag_name })
    }

    pub fn level(&self) -> u8 {
        match self.tag_name {
            | tag_names::h2 => 2,
            | tag_names::h3 => 3,
            | tag_names::h4 => 4,
            | tag_names::h5 => 5,
            | tag_names::h6 => 6,
            | _ => 1,
        }
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl HTMLElementInterface for HTMLHeadingElement {
    fn tag_name(&self) -> &str {
        match self.level() {
            | 2 => "h2",
            | 3 => "h3",
            | 4 => "h4",
            | 5 => "h5",
            | 6 => "h6",
            | _ => "h1",
        }
    }
}

// ----------------------- //
// Application de la macro //
// ----------------------- //

define_html_elements! {
    /// 4.1.1 The html element
    HTMLHtmlElement => html,
    /// 4.2.1 The head element
    HTMLHeadElement => head,
    /// 4.2.2 The title element
    HTMLTitleElement => title,
    /// 4.2.6 The style element
    HTMLStyleElement => style,
    /// 4.3.1 The body element
    HTMLBodyElement => body,
    /// 4.4.1 The p element
    HTMLParagraphElement => p,
    /// 4.4.15 The div element
    HTMLDivElement => div,
    /// 4.5.26 The span element
    HTMLSpanElement => span,
    /// 4.10.6 The button element
    HTMLButtonElement => button,
    /// 4.10.11 The textarea element
    HTMLTextAreaElement => textarea,
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_element() {
        let heading = HTMLHeadingElement::new(tag_names::h3).unwrap();
        assert_eq!(heading.level(), 3);
        assert_eq!(heading.tag_name(), "h3");
        assert!(HTMLHeadingElement::new(tag_names::div).is_none());
    }

    #[test]
    fn test_simple_element_names() {
        assert_eq!(HTMLDivElement::default().tag_name(), "div");
        assert_eq!(HTMLTextAreaElement::NAME, "textarea");
    }
}
