/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

mod custom;
mod elements;
mod scripting;

pub mod interface;
mod tags;

pub use self::{
    custom::{HTMLCustomElement, HTMLUnknownElement},
    elements::*,
    scripting::HTMLTemplateElement,
    tags::tag_names,
};
