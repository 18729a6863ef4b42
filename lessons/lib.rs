/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Les aides des pages de leçons : monter un gabarit comme élément
//! personnalisé, et rétablir la taille des blocs redimensionnés par
//! l'utilisateur.

mod error;
/// Description JSON d'une page de démonstration.
pub mod fixture;
pub mod size_resetter;
mod template_registrar;

pub use self::{
    error::TemplateError,
    size_resetter::{
        clear_inline_size, is_resizable, reset_all_sizes, reset_all_sizes_in,
        reset_size_for, reset_size_in,
    },
    template_registrar::TemplateRegistrar,
};
