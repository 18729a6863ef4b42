/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::fmt;

// ----------- //
// Énumération //
// ----------- //

#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub enum CSSParserError {
    /// Le flux se termine au milieu d'une construction.
    UnexpectedEOF,
    /// Un caractère inattendu à la position donnée.
    UnexpectedCharacter { ch: char, position: usize },
    /// Un sélecteur vide, ex. `div,` ou `> p`.
    EmptySelector,
    /// Une pseudo-classe ou un pseudo-élément inconnu.
    UnknownPseudo(String),
    /// L'argument de `:nth-child()` n'est pas de la forme `An+B`.
    InvalidNth(String),
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl fmt::Display for CSSParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            | Self::UnexpectedEOF => write!(f, "Fin de flux inattendue"),
            | Self::UnexpectedCharacter { ch, position } => write!(
                f,
                "Caractère inattendu « {ch} » à la position {position}"
            ),
            | Self::EmptySelector => write!(f, "Sélecteur vide"),
            | Self::UnknownPseudo(name) => {
                write!(f, "Pseudo-classe ou pseudo-élément inconnu : {name}")
            }
            | Self::InvalidNth(argument) => {
                write!(f, "Argument « {argument} » invalide, An+B attendu")
            }
        }
    }
}

impl std::error::Error for CSSParserError {}
