/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::fmt;

use log::debug;
use replacement_config::{Preferences, prefs};

use crate::dom::{Document, NodeId};
use crate::replacement::Replacement;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InstallError {
    /// Plugin replacement is turned off in the preferences.
    Disabled,
    /// The plugin element's document is not displayed in a browsing context.
    NoBrowsingContext,
    AlreadyInstalled,
    /// The replacement could not be inserted under the given root.
    HierarchyRequest,
    /// The plugin element cannot host a UA shadow root.
    InvalidPluginElement,
}

impl fmt::Display for InstallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallError::Disabled => f.write_str("plugin replacement is disabled"),
            InstallError::NoBrowsingContext => f.write_str("document has no browsing context"),
            InstallError::AlreadyInstalled => f.write_str("replacement is already installed"),
            InstallError::HierarchyRequest => {
                f.write_str("replacement root cannot have children")
            },
            InstallError::InvalidPluginElement => f.write_str("plugin element is not an element"),
        }
    }
}

impl std::error::Error for InstallError {}

/// Replaces a PDF `<embed>` or `<object>` the engine cannot render itself.
///
/// The plugin element and its parameters are captured up front; the
/// replacement content is built when the host installs it into the element's
/// shadow root.
#[derive(Debug)]
pub struct PdfPluginReplacement {
    plugin_element: NodeId,
    param_names: Vec<String>,
    param_values: Vec<String>,
    prefs: Preferences,
    replacement: Option<Replacement>,
}

impl PdfPluginReplacement {
    pub fn new(
        plugin_element: NodeId,
        param_names: Vec<String>,
        param_values: Vec<String>,
    ) -> PdfPluginReplacement {
        let prefs = prefs::get().clone();
        Self::new_with_prefs(plugin_element, param_names, param_values, prefs)
    }

    pub fn new_with_prefs(
        plugin_element: NodeId,
        param_names: Vec<String>,
        param_values: Vec<String>,
        prefs: Preferences,
    ) -> PdfPluginReplacement {
        PdfPluginReplacement {
            plugin_element,
            param_names,
            param_values,
            prefs,
            replacement: None,
        }
    }

    pub fn plugin_element(&self) -> NodeId {
        self.plugin_element
    }

    fn ensure_installable(&self, document: &Document) -> Result<(), InstallError> {
        if self.replacement.is_some() {
            return Err(InstallError::AlreadyInstalled);
        }
        if !self.prefs.plugin_replacement_enabled {
            return Err(InstallError::Disabled);
        }
        if !document.has_browsing_context() {
            return Err(InstallError::NoBrowsingContext);
        }
        Ok(())
    }

    /// Builds the replacement content under `root`, normally the plugin
    /// element's shadow root.
    pub fn install_replacement(
        &mut self,
        document: &mut Document,
        root: NodeId,
    ) -> Result<&Replacement, InstallError> {
        self.ensure_installable(document)?;

        let replacement = Replacement::new_with_prefs(
            document,
            root,
            self.plugin_element,
            &self.param_names,
            &self.param_values,
            &self.prefs,
        );
        if !replacement.is_attached() {
            debug!("{:?} - Failed to install plugin replacement", self.plugin_element);
            return Err(InstallError::HierarchyRequest);
        }
        Ok(self.replacement.insert(replacement))
    }

    /// Installs the replacement into the UA shadow root of the plugin
    /// element, attaching one if needed.
    pub fn install_into_ua_shadow_root(
        &mut self,
        document: &mut Document,
    ) -> Result<&Replacement, InstallError> {
        self.ensure_installable(document)?;
        let root = document
            .attach_ua_shadow_root(self.plugin_element)
            .map_err(|_| InstallError::InvalidPluginElement)?;
        self.install_replacement(document, root)
    }

    pub fn replacement(&self) -> Option<&Replacement> {
        self.replacement.as_ref()
    }

    /// The element to create a renderer for in place of the plugin element,
    /// once the replacement is installed.
    pub fn replacement_element(&self) -> Option<NodeId> {
        self.replacement.as_ref().and_then(Replacement::pdf_element)
    }

    pub fn will_create_renderer(&self, plugin_element: NodeId) -> Option<NodeId> {
        debug_assert_eq!(plugin_element, self.plugin_element);
        debug!(
            "{:?} - creating renderer for {:?}",
            plugin_element,
            self.replacement_element()
        );
        self.replacement_element()
    }
}
