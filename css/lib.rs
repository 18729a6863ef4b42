/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

/// Blocs de déclarations (attribut `style`, corps des règles).
mod declaration;
mod error;
/// Sélecteurs : analyse, correspondance, spécificité.
pub mod selectors;
mod stream;
/// Feuilles de style : suites de règles de style.
mod stylesheet;

pub use self::{
    declaration::{CSSDeclaration, CSSStyleDeclaration},
    error::CSSParserError,
    stylesheet::{CSSStyleRule, CSSStyleSheet},
};
