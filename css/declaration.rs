/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::fmt;

use crate::stream::CSSInputStream;

// --------- //
// Structure //
// --------- //

/// D'un point de vue conceptuel, les déclarations associent un nom de
/// propriété à une valeur, avec un drapeau `!important`.
#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub struct CSSDeclaration {
    name: String,
    value: String,
    important: bool,
}

/// Un bloc de déclarations ordonné : le contenu d'un attribut `style`,
/// le corps d'une règle de style ou le résultat d'une cascade.
///
/// Un nom de propriété n'y apparaît qu'une fois ; le redéfinir remplace
/// la valeur à sa place d'origine.
#[derive(Debug)]
#[derive(Default)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub struct CSSStyleDeclaration {
    declarations: Vec<CSSDeclaration>,
}

// -------------- //
// Implémentation //
// -------------- //

impl CSSDeclaration {
    pub fn new(
        name: impl AsRef<str>,
        value: impl Into<String>,
        important: bool,
    ) -> Self {
        Self {
            name: normalize_property_name(name.as_ref()),
            value: value.into(),
            important,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_important(&self) -> bool {
        self.important
    }
}

impl CSSStyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyse un bloc de déclarations, tel que le contenu d'un attribut
    /// `style`. Comme dans un navigateur, les déclarations invalides sont
    /// ignorées : l'analyse n'échoue jamais.
    pub fn parse(input: &str) -> Self {
        let mut style = Self::new();
        let mut stream = CSSInputStream::new(input);

        loop {
            stream.skip_whitespace_and_comments();
            if stream.is_eof() {
                break;
            }

            let raw = stream.consume_until(&[';']);
            stream.consume();

            match parse_declaration(&raw) {
                | Some(declaration) => style.push(declaration),
                | None => {
                    log::debug!("Déclaration CSS ignorée : {raw:?}");
                }
            }
        }

        style
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CSSDeclaration> {
        self.declarations.iter()
    }

    pub fn declaration(&self, name: &str) -> Option<&CSSDeclaration> {
        let name = normalize_property_name(name);
        self.declarations.iter().find(|decl| decl.name == name)
    }

    /// La valeur de la propriété, ou la chaîne vide si elle n'est pas
    /// définie dans ce bloc.
    pub fn get_property_value(&self, name: &str) -> &str {
        self.declaration(name).map_or("", CSSDeclaration::value)
    }

    /// Définit la propriété. Une valeur vide retire la propriété, comme
    /// `element.style.width = ''`.
    pub fn set_property(&mut self, name: &str, value: &str) {
        self.set_property_with_priority(name, value, false);
    }

    pub fn set_property_with_priority(
        &mut self,
        name: &str,
        value: &str,
        important: bool,
    ) {
        let value = value.trim();
        if value.is_empty() {
            self.remove_property(name);
            return;
        }
        self.push(CSSDeclaration::new(name, value, important));
    }

    /// Retire la propriété et renvoie son ancienne valeur (vide si elle
    /// n'était pas définie).
    pub fn remove_property(&mut self, name: &str) -> String {
        let name = normalize_property_name(name);
        match self.declarations.iter().position(|decl| decl.name == name) {
            | Some(index) => self.declarations.remove(index).value,
            | None => String::new(),
        }
    }

    /// Sérialisation du bloc, ex. `height: 10px; width: 20px;`.
    pub fn css_text(&self) -> String {
        self.to_string()
    }

    /// Applique les déclarations de `other` sur ce bloc, dans l'ordre de
    /// la cascade : `other` l'emporte, sauf face à une déclaration
    /// `!important` qui n'est pas elle-même importante.
    pub fn apply(&mut self, other: &Self) {
        for decl in other.iter() {
            let overridden = self
                .declaration(&decl.name)
                .map_or(false, |current| current.important && !decl.important);
            if !overridden {
                self.push(decl.to_owned());
            }
        }
    }

    fn push(&mut self, declaration: CSSDeclaration) {
        match self
            .declarations
            .iter_mut()
            .find(|decl| decl.name == declaration.name)
        {
            | Some(current) => *current = declaration,
            | None => self.declarations.push(declaration),
        }
    }
}

// -------- //
// Fonction //
// -------- //

/// Les noms de propriétés sont insensibles à la casse ASCII, sauf les
/// propriétés personnalisées (`--nom`).
fn normalize_property_name(name: &str) -> String {
    let name = name.trim();
    if name.starts_with("--") {
        name.to_owned()
    } else {
        name.to_ascii_lowercase()
    }
}

fn parse_declaration(raw: &str) -> Option<CSSDeclaration> {
    let (name, value) = raw.split_once(':')?;
    let name = name.trim();

    let valid_name = !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    if !valid_name {
        return None;
    }

    let mut value = value.trim();
    let mut important = false;

    if let Some(index) = value.rfind('!') {
        if value[index + 1..].trim().eq_ignore_ascii_case("important") {
            important = true;
            value = value[..index].trim_end();
        }
    }

    if value.is_empty() {
        return None;
    }

    Some(CSSDeclaration::new(name, value, important))
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl fmt::Display for CSSDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)?;
        if self.important {
            write!(f, " !important")?;
        }
        write!(f, ";")
    }
}

impl fmt::Display for CSSStyleDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, decl) in self.declarations.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            write!(f, "{decl}")?;
        }
        Ok(())
    }
}

impl FromIterator<CSSDeclaration> for CSSStyleDeclaration {
    fn from_iter<I: IntoIterator<Item = CSSDeclaration>>(iter: I) -> Self {
        let mut style = Self::new();
        iter.into_iter().for_each(|decl| style.push(decl));
        style
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inline_style() {
        let style = CSSStyleDeclaration::parse(
            "height: 120px; WIDTH:50% ;resize: both !important",
        );
        assert_eq!(style.len(), 3);
        assert_eq!(style.get_property_value("height"), "120px");
        assert_eq!(style.get_property_value("width"), "50%");
        assert_eq!(style.get_property_value("Resize"), "both");
        assert!(style
            .declaration("resize")
            .map_or(false, CSSDeclaration::is_important));
    }

    #[test]
    fn test_parse_skips_invalid_declarations() {
        let style = CSSStyleDeclaration::parse(
            "color red; : blue; margin:; /* note */ padding: 0; a b: c",
        );
        assert_eq!(style.css_text(), "padding: 0;");
    }

    #[test]
    fn test_set_and_remove_property() {
        let mut style = CSSStyleDeclaration::parse("height: 10px; width: 20px");
        style.set_property("height", "30px");
        assert_eq!(style.css_text(), "height: 30px; width: 20px;");

        style.set_property("height", "");
        assert_eq!(style.css_text(), "width: 20px;");

        assert_eq!(style.remove_property("width"), "20px");
        assert_eq!(style.remove_property("width"), "");
        assert!(style.is_empty());
    }

    #[test]
    fn test_apply_cascade() {
        let mut style = CSSStyleDeclaration::parse("resize: none; color: red !important");
        style.apply(&CSSStyleDeclaration::parse("resize: both; color: blue"));
        assert_eq!(style.get_property_value("resize"), "both");
        assert_eq!(style.get_property_value("color"), "red");
    }
}
