/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::fmt;

use css::CSSParserError;

// ----------- //
// Énumération //
// ----------- //

/// Les exceptions levées par les opérations du DOM. Les codes sont ceux
/// de WebIDL.
#[allow(clippy::enum_variant_names)]
#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(PartialEq, Eq)]
#[repr(u8)]
pub enum DOMException {
    HierarchyRequestError = 3,
    InvalidCharacterError = 5,
    NotFoundError = 8,
    NotSupportedError = 9,
    InvalidStateError = 11,
    SyntaxError = 12,
    InvalidNodeTypeError = 24,
}

// -------------- //
// Implémentation //
// -------------- //

impl DOMException {
    /// Le nom de l'exception, tel qu'exposé par `DOMException.name`.
    pub fn name(&self) -> &'static str {
        match self {
            | Self::HierarchyRequestError => "HierarchyRequestError",
            | Self::InvalidCharacterError => "InvalidCharacterError",
            | Self::NotFoundError => "NotFoundError",
            | Self::NotSupportedError => "NotSupportedError",
            | Self::InvalidStateError => "InvalidStateError",
            | Self::SyntaxError => "SyntaxError",
            | Self::InvalidNodeTypeError => "InvalidNodeTypeError",
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl fmt::Display for DOMException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            self.name(),
            match self {
                | Self::HierarchyRequestError =>
                    "The operation would yield an incorrect node tree.",
                | Self::InvalidCharacterError =>
                    "The string contains invalid characters.",
                | Self::NotFoundError => "The object can not be found here.",
                | Self::NotSupportedError => "The operation is not supported.",
                | Self::InvalidStateError =>
                    "The object is in an invalid state.",
                | Self::SyntaxError =>
                    "The string did not match the expected pattern.",
                | Self::InvalidNodeTypeError =>
                    "The supplied node is incorrect or has an incorrect \
                     ancestor for this operation.",
            }
        )
    }
}

impl std::error::Error for DOMException {}

impl From<CSSParserError> for DOMException {
    fn from(err: CSSParserError) -> Self {
        log::debug!("Sélecteur invalide : {err}");
        Self::SyntaxError
    }
}
