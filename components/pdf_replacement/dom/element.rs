/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use html5ever::{Attribute, LocalName, QualName, local_name, ns};

use super::{DomError, NodeId};
use super::style::InlineStyle;

/// Pseudo-elements that generated content can implement, so that style
/// sheets are able to target it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PseudoElement {
    PluginReplacement,
}

impl PseudoElement {
    pub fn as_str(&self) -> &'static str {
        match self {
            PseudoElement::PluginReplacement => "-webkit-plugin-replacement",
        }
    }
}

#[derive(Debug)]
pub struct ElementData {
    name: QualName,
    attrs: Vec<Attribute>,
    /// Parsed form of the `style` attribute, kept in sync with it.
    style: InlineStyle,
    implemented_pseudo_element: Option<PseudoElement>,
    pub(super) shadow_root: Option<NodeId>,
}

impl ElementData {
    pub(super) fn new(name: QualName) -> ElementData {
        ElementData {
            name,
            attrs: vec![],
            style: InlineStyle::default(),
            implemented_pseudo_element: None,
            shadow_root: None,
        }
    }

    pub fn name(&self) -> &QualName {
        &self.name
    }

    pub fn local_name(&self) -> &LocalName {
        &self.name.local
    }

    pub fn attrs(&self) -> &[Attribute] {
        &self.attrs
    }

    pub(super) fn style(&self) -> &InlineStyle {
        &self.style
    }

    pub fn implemented_pseudo_element(&self) -> Option<PseudoElement> {
        self.implemented_pseudo_element
    }

    pub fn shadow_root(&self) -> Option<NodeId> {
        self.shadow_root
    }

    pub fn get_attribute(&self, local_name: &LocalName) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.name.ns == ns!() && attr.name.local == *local_name)
            .map(|attr| &*attr.value)
    }

    pub(super) fn set_attribute(&mut self, local_name: LocalName, value: &str) {
        if local_name == local_name!("style") {
            self.style = InlineStyle::parse(value);
        }
        self.write_attribute(local_name, value);
    }

    fn write_attribute(&mut self, local_name: LocalName, value: &str) {
        match self
            .attrs
            .iter_mut()
            .find(|attr| attr.name.ns == ns!() && attr.name.local == local_name)
        {
            Some(attr) => attr.value = value.into(),
            None => self.attrs.push(Attribute {
                name: QualName::new(None, ns!(), local_name),
                value: value.into(),
            }),
        }
    }

    pub(super) fn set_style_property(
        &mut self,
        property: &str,
        value: &str,
    ) -> Result<(), DomError> {
        self.style.set_property(property, value)?;
        let serialized = self.style.to_css_string();
        self.write_attribute(local_name!("style"), &serialized);
        Ok(())
    }

    /// The pseudo-element is reflected as the `pseudo` attribute, which is
    /// what user agent style sheets match on.
    pub(super) fn set_implemented_pseudo_element(&mut self, pseudo_element: PseudoElement) {
        self.implemented_pseudo_element = Some(pseudo_element);
        self.write_attribute(LocalName::from("pseudo"), pseudo_element.as_str());
    }
}
