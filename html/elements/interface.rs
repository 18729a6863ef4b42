/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::tag_names;

// --------- //
// Interface //
// --------- //

pub trait HTMLElementInterface {
    /// Nom local de l'élément, en minuscules.
    fn tag_name(&self) -> &str;
}

pub trait IsOneOfTagsInterface: Copy {
    fn is_one_of(self, arr: impl IntoIterator<Item = tag_names>) -> bool;
}
