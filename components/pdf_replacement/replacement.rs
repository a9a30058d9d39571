/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use html5ever::{LocalName, local_name};
use log::{debug, warn};
use replacement_config::{Preferences, prefs};

use crate::config::ReplacementConfig;
use crate::dom::{Document, DomError, NodeId, PseudoElement};
use crate::viewer::{normalize_locator, viewer_url};

/// Builds the replacement for a PDF embed under `root`, using the current
/// preferences. See [`Replacement::new_with_prefs`].
pub fn create_plugin_replacement<N, V>(
    document: &mut Document,
    root: NodeId,
    parent: NodeId,
    attribute_names: &[N],
    attribute_values: &[V],
) -> Replacement
where
    N: AsRef<str>,
    V: AsRef<str>,
{
    Replacement::new(document, root, parent, attribute_names, attribute_values)
}

/// Handle to the content that stands in for an unsupported PDF embed.
///
/// The content is a `<pdf>` element implementing the plugin replacement
/// pseudo-element, holding a single `<iframe>` that loads the viewer.
#[derive(Clone, Debug)]
pub struct Replacement {
    root: NodeId,
    /// The replaced element. Kept for the host, the subtree does not use it.
    parent: NodeId,
    config: ReplacementConfig,
    viewer_url: String,
    subtree: Option<Subtree>,
}

#[derive(Clone, Copy, Debug)]
struct Subtree {
    pdf: NodeId,
    frame: NodeId,
}

impl Replacement {
    pub fn new<N, V>(
        document: &mut Document,
        root: NodeId,
        parent: NodeId,
        attribute_names: &[N],
        attribute_values: &[V],
    ) -> Replacement
    where
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let prefs = prefs::get();
        Self::new_with_prefs(
            document,
            root,
            parent,
            attribute_names,
            attribute_values,
            &prefs,
        )
    }

    /// Builds the replacement subtree and appends it to `root`.
    ///
    /// This never fails. Unknown attributes are ignored and invalid
    /// dimensions keep their defaults. If `root` cannot take children no
    /// nodes are created at all; see [`Replacement::is_attached`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "Replacement::new_with_prefs",
            skip_all,
            fields(servo_profiling = true)
        )
    )]
    pub fn new_with_prefs<N, V>(
        document: &mut Document,
        root: NodeId,
        parent: NodeId,
        attribute_names: &[N],
        attribute_values: &[V],
        prefs: &Preferences,
    ) -> Replacement
    where
        N: AsRef<str>,
        V: AsRef<str>,
    {
        debug!(
            "Creating plugin replacement with attributes {:?}",
            attribute_names
                .iter()
                .map(|name| name.as_ref())
                .collect::<Vec<&str>>()
        );

        let mut config = ReplacementConfig::from_attributes(attribute_names, attribute_values);
        config.normalize_dimensions();
        let src = normalize_locator(&config.src, &prefs.plugin_replacement_locator_prefix);
        config.src = src.to_owned();

        let viewer_url = viewer_url(&prefs.plugin_replacement_viewer_url, &config.src);
        debug!("Plugin replacement loads {viewer_url}");

        let subtree = if document.can_have_children(root) {
            Self::build_subtree(document, root, &config, &viewer_url)
                .inspect_err(|error| {
                    warn!("Could not build plugin replacement under {root:?}: {error}")
                })
                .ok()
        } else {
            warn!(
                "Could not insert plugin replacement into {root:?}: {}",
                DomError::HierarchyRequest
            );
            None
        };

        Replacement {
            root,
            parent,
            config,
            viewer_url,
            subtree,
        }
    }

    fn build_subtree(
        document: &mut Document,
        root: NodeId,
        config: &ReplacementConfig,
        viewer_url: &str,
    ) -> Result<Subtree, DomError> {
        let pdf = document.create_html_element(LocalName::from("pdf"));
        document.set_implemented_pseudo_element(pdf, PseudoElement::PluginReplacement)?;

        let frame = document.create_html_element(local_name!("iframe"));
        document.set_attribute(frame, local_name!("scrolling"), "no")?;
        document.set_attribute(frame, local_name!("frameborder"), "0")?;
        document.set_attribute(frame, local_name!("src"), viewer_url)?;
        document.set_style_property(frame, "height", &config.height)?;
        document.set_style_property(frame, "width", &config.width)?;

        document.append_child(pdf, frame)?;
        document.append_child(root, pdf)?;
        Ok(Subtree { pdf, frame })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn parent(&self) -> NodeId {
        self.parent
    }

    /// The configuration the subtree was built from, after locator and
    /// dimension normalization.
    pub fn config(&self) -> &ReplacementConfig {
        &self.config
    }

    pub fn viewer_url(&self) -> &str {
        &self.viewer_url
    }

    /// The `<pdf>` element that renders in place of the replaced element.
    pub fn pdf_element(&self) -> Option<NodeId> {
        self.subtree.map(|subtree| subtree.pdf)
    }

    pub fn frame_element(&self) -> Option<NodeId> {
        self.subtree.map(|subtree| subtree.frame)
    }

    /// Whether the subtree was built under `root`. When it was not, the
    /// document is left without any replacement nodes.
    pub fn is_attached(&self) -> bool {
        self.subtree.is_some()
    }
}
