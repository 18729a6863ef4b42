/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::fmt;

use dom::exception::DOMException;

// ----------- //
// Énumération //
// ----------- //

#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub enum TemplateError {
    /// Aucun élément du document ne porte cet identifiant.
    NotFound(String),
    /// Un élément personnalisé est déjà défini sous ce nom.
    AlreadyRegistered(String),
    /// Le document n'a pas de `<body>` où monter l'instance.
    MissingBody,
    Dom(DOMException),
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            | Self::NotFound(id) => {
                write!(f, "Le gabarit « {id} » est introuvable.")
            }
            | Self::AlreadyRegistered(id) => write!(
                f,
                "Le gabarit « {id} » est déjà utilisé ailleurs ou n'est pas \
                 disponible."
            ),
            | Self::MissingBody => {
                write!(f, "Le document n'a pas d'élément <body>.")
            }
            | Self::Dom(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            | Self::Dom(err) => Some(err),
            | _ => None,
        }
    }
}

impl From<DOMException> for TemplateError {
    fn from(err: DOMException) -> Self {
        Self::Dom(err)
    }
}
