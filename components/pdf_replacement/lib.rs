/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Replacement content for PDF embeds.
//!
//! When the engine meets an `<embed>` or `<object>` holding a PDF it cannot
//! render, it asks this crate for stand-in content: a `<pdf>` element that
//! implements the `-webkit-plugin-replacement` pseudo-element and contains an
//! `<iframe>` loading a document viewer with the resource as its `file`
//! parameter.

#![deny(unsafe_code)]

pub mod config;
pub mod dom;
mod plugin;
mod replacement;
pub mod viewer;

pub use crate::config::ReplacementConfig;
pub use crate::plugin::{InstallError, PdfPluginReplacement};
pub use crate::replacement::{Replacement, create_plugin_replacement};
