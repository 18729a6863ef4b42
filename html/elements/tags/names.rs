/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::{fmt, str};

use crate::interface::IsOneOfTagsInterface;

// ------ //
// Macros //
// ------ //

macro_rules! enumerate_html_tag_names {
    ($(
        $(#[$attr:meta])*
        $name:ident
    )*) => {
        #[allow(non_camel_case_types)]
        #[derive(Debug)]
        #[derive(Copy, Clone)]
        #[derive(PartialEq, Eq)]
        pub enum tag_names {
        $(
            #[allow(non_upper_case_globals)]
            #[doc = "Nom de la balise :"]
            #[doc = stringify!($name)]
            $(#[$attr])*
            $name
        ),*
        }

        impl str::FromStr for tag_names {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(match s {
                    $(| stringify!($name) => Self::$name),*,
                    | _ => return Err("Élément inconnu")
                })
            }
        }

        impl fmt::Display for tag_names {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", match self {
                    $(Self::$name => stringify!($name)),*
                })
            }
        }
    };
}

// -------------- //
// Implémentation //
// -------------- //

impl tag_names {
    /// Noms réservés par des spécifications (SVG, MathML) : ils ont la
    /// forme d'un nom d'élément personnalisé sans pouvoir en être un.
    const RESERVED_CUSTOM_ELEMENT_NAMES: [&'static str; 8] = [
        "annotation-xml",
        "color-profile",
        "font-face",
        "font-face-src",
        "font-face-uri",
        "font-face-format",
        "font-face-name",
        "missing-glyph",
    ];

    /*
    NameStartChar ::= ":" | [A-Z]     | "_" | [a-z]     | [#xC0-#xD6]
                    | [#xD8-#xF6]     | [#xF8-#x2FF]    | [#x370-#x37D]
                    | [#x37F-#x1FFF]  | [#x200C-#x200D] | [#x2070-#x218F]
                    | [#x2C00-#x2FEF] | [#x3001-#xD7FF] | [#xF900-#xFDCF]
                    | [#xFDF0-#xFFFD] | [#x10000-#xEFFFF]
    */
    fn name_start_char(ch: char) -> bool {
        ch.is_ascii_alphabetic()
            || matches!(ch, | ':' | '_'
             | '\u{00C0}'..='\u{00D6}' | '\u{00D8}'..='\u{00F6}'
             | '\u{00F8}'..='\u{02FF}' | '\u{0370}'..='\u{037D}'
             | '\u{037F}'..='\u{1FFF}' | '\u{200C}'..='\u{200D}'
             | '\u{2070}'..='\u{218F}' | '\u{2C00}'..='\u{2FEF}'
             | '\u{3001}'..='\u{D7FF}' | '\u{F900}'..='\u{FDCF}'
             | '\u{FDF0}'..='\u{FFFD}' | '\u{10000}'..='\u{EFFFF}'
            )
    }

    /*
    NameChar :: = NameStartChar   | "-" | "." | [0-9] | #xB7
                | [#x0300-#x036F] | [#x203F-#x2040]
    */
    fn name_char(ch: char) -> bool {
        Self::name_start_char(ch)
            || ch.is_ascii_digit()
            || matches!(ch, '-' | '.'
             | '\u{00B7}'
             | '\u{0300}'..='\u{036F}'
             | '\u{203F}'..='\u{2040}'
            )
    }

    /*
    PCENChar ::= "-" | "." | [0-9] | "_" | [a-z] | #xB7 | [#xC0-#xD6]
               | [#xD8-#xF6] | [#xF8-#x37D] | [#x37F-#x1FFF]
               | [#x200C-#x200D] | [#x203F-#x2040] | [#x2070-#x218F]
               | [#x2C00-#x2FEF] | [#x3001-#xD7FF] | [#xF900-#xFDCF]
               | [#xFDF0-#xFFFD] | [#x10000-#xEFFFF]
    */
    fn pcen_char(ch: char) -> bool {
        ch.is_ascii_lowercase()
            || ch.is_ascii_digit()
            || matches!(ch, '-' | '.' | '_' | '\u{00B7}'
             | '\u{00C0}'..='\u{00D6}' | '\u{00D8}'..='\u{00F6}'
             | '\u{00F8}'..='\u{037D}' | '\u{037F}'..='\u{1FFF}'
             | '\u{200C}'..='\u{200D}' | '\u{203F}'..='\u{2040}'
             | '\u{2070}'..='\u{218F}' | '\u{2C00}'..='\u{2FEF}'
             | '\u{3001}'..='\u{D7FF}' | '\u{F900}'..='\u{FDCF}'
             | '\u{FDF0}'..='\u{FFFD}' | '\u{10000}'..='\u{EFFFF}'
            )
    }

    /// Le nom correspond-il à la production `Name` de XML ?
    pub fn is_valid_name(name: impl AsRef<str>) -> bool {
        let mut chars = name.as_ref().chars();

        match chars.next() {
            | Some(ch) if Self::name_start_char(ch) => {
                chars.all(Self::name_char)
            }
            | _ => false,
        }
    }

    /// Un nom d'élément personnalisé valide commence par une lettre ASCII
    /// minuscule, contient au moins un tiret, ne contient aucune lettre
    /// ASCII majuscule et n'est pas un nom réservé.
    ///
    /// PotentialCustomElementName ::= [a-z] (PCENChar)* '-' (PCENChar)*
    pub fn is_valid_custom_element_name(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        let mut chars = name.chars();

        let starts_with_lowercase =
            matches!(chars.next(), Some(ch) if ch.is_ascii_lowercase());

        starts_with_lowercase
            && name.contains('-')
            && chars.all(Self::pcen_char)
            && !Self::RESERVED_CUSTOM_ELEMENT_NAMES.contains(&name)
    }

    /// Les éléments sur lesquels une racine fantôme (shadow root) peut
    /// être attachée : un nom d'élément personnalisé valide, ou l'une des
    /// balises suivantes.
    pub fn is_valid_shadow_host_name(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();

        if Self::is_valid_custom_element_name(name) {
            return true;
        }

        name.parse::<Self>().map_or(false, |tag_name| {
            tag_name.is_one_of([
                Self::article,
                Self::aside,
                Self::blockquote,
                Self::body,
                Self::div,
                Self::footer,
                Self::h1,
                Self::h2,
                Self::h3,
                Self::h4,
                Self::h5,
                Self::h6,
                Self::header,
                Self::main,
                Self::nav,
                Self::p,
                Self::section,
                Self::span,
            ])
        })
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl IsOneOfTagsInterface for tag_names {
    fn is_one_of(self, arr: impl IntoIterator<Item = Self>) -> bool {
        arr.into_iter().any(|tag_name| tag_name == self)
    }
}

impl<S> PartialEq<S> for tag_names
where
    S: AsRef<str>,
{
    fn eq(&self, other: &S) -> bool {
        self.to_string().eq(other.as_ref())
    }
}

// ----------------------- //
// Application de la macro //
// ----------------------- //

enumerate_html_tag_names! {
    /// Racine d'un document HTML.
    html

    /// Métadonnées du document.
    head

    /// Titre du document.
    title

    /// Feuille de style embarquée. Son contenu textuel est du CSS.
    style

    /// Contenu principal du document.
    body

    article
    aside
    blockquote
    footer
    header

    /// Titres de section, du plus important au moins important.
    h1 h2 h3 h4 h5 h6

    main
    nav
    section

    /// Conteneur générique du contenu de flux.
    div

    /// Paragraphe.
    p

    /// Conteneur générique du contenu phrasé.
    span

    /// Bouton cliquable.
    button

    /// Zone de saisie multiligne. Redimensionnable par défaut.
    textarea

    /// Gabarit inerte : son contenu n'est pas rendu, il sert de source
    /// à cloner.
    template
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_name() {
        assert!(tag_names::is_valid_name("div"));
        assert!(tag_names::is_valid_name("my-card"));
        assert!(tag_names::is_valid_name("x:y"));
        assert!(!tag_names::is_valid_name(""));
        assert!(!tag_names::is_valid_name("1div"));
        assert!(!tag_names::is_valid_name("di v"));
    }

    #[test]
    fn test_is_valid_custom_element_name() {
        assert!(tag_names::is_valid_custom_element_name("lesson-card"));
        assert!(tag_names::is_valid_custom_element_name("x-1"));
        assert!(!tag_names::is_valid_custom_element_name("lesson"));
        assert!(!tag_names::is_valid_custom_element_name("Lesson-card"));
        assert!(!tag_names::is_valid_custom_element_name("lesson-Card"));
        assert!(!tag_names::is_valid_custom_element_name("-lesson"));
        assert!(!tag_names::is_valid_custom_element_name("font-face"));
    }

    #[test]
    fn test_is_valid_shadow_host_name() {
        assert!(tag_names::is_valid_shadow_host_name("div"));
        assert!(tag_names::is_valid_shadow_host_name("lesson-card"));
        assert!(!tag_names::is_valid_shadow_host_name("button"));
        assert!(!tag_names::is_valid_shadow_host_name("template"));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("div".parse::<tag_names>(), Ok(tag_names::div));
        assert!("lesson-card".parse::<tag_names>().is_err());
        assert_eq!(tag_names::textarea.to_string(), "textarea");
        assert!(tag_names::h2 == "h2");
    }
}
