/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use log::{trace, warn};

use crate::dom::parse_property_value;

/// Attributes of the replaced element that carry over to the replacement,
/// and the [`ReplacementConfig`] field each one sets.
pub static ATTRIBUTE_MAP: &[(&str, &str)] = &[
    ("height", "height"),
    ("width", "width"),
    ("src", "src"),
];

/// Looks up the configuration field for an attribute of the replaced element.
pub fn property_for_attribute(name: &str) -> Option<&'static str> {
    ATTRIBUTE_MAP
        .iter()
        .find(|(attribute, _)| *attribute == name)
        .map(|(_, property)| *property)
}

/// What the replacement takes over from the element it replaces.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReplacementConfig {
    pub height: String,
    pub width: String,
    /// The resource locator, exactly as given on the element.
    pub src: String,
}

impl Default for ReplacementConfig {
    fn default() -> Self {
        ReplacementConfig {
            height: "100%".to_owned(),
            width: "100%".to_owned(),
            src: String::new(),
        }
    }
}

impl ReplacementConfig {
    pub fn exists(name: &str) -> bool {
        Self::all_fields().contains(&name)
    }

    pub fn all_fields() -> &'static [&'static str] {
        &["height", "width", "src"]
    }

    pub fn get_value(&self, name: &str) -> Option<&str> {
        match name {
            "height" => Some(&self.height),
            "width" => Some(&self.width),
            "src" => Some(&self.src),
            _ => None,
        }
    }

    /// Returns whether `name` is a field of the configuration.
    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        let field = match name {
            "height" => &mut self.height,
            "width" => &mut self.width,
            "src" => &mut self.src,
            _ => return false,
        };
        value.clone_into(field);
        true
    }

    /// Builds the configuration from the parallel attribute lists of the
    /// replaced element. Later duplicates override earlier ones and unknown
    /// attributes are ignored.
    ///
    /// Only the common prefix of mismatched lists is used.
    pub fn from_attributes<N, V>(names: &[N], values: &[V]) -> ReplacementConfig
    where
        N: AsRef<str>,
        V: AsRef<str>,
    {
        if names.len() != values.len() {
            warn!(
                "Plugin replacement got {} attribute names but {} values",
                names.len(),
                values.len()
            );
        }

        let mut config = ReplacementConfig::default();
        for (name, value) in names.iter().zip(values) {
            let name = name.as_ref();
            match property_for_attribute(name) {
                Some(property) if Self::exists(property) => {
                    config.set_value(property, value.as_ref());
                },
                _ => trace!("Ignoring attribute {name:?} of replaced plugin"),
            }
        }
        config
    }

    /// Replaces `height` and `width` by their serialized CSS value, or by
    /// their default when they are not a single valid value.
    pub fn normalize_dimensions(&mut self) {
        let defaults = ReplacementConfig::default();
        for (name, value, default) in [
            ("height", &mut self.height, defaults.height),
            ("width", &mut self.width, defaults.width),
        ] {
            *value = parse_property_value(value).unwrap_or_else(|| {
                warn!("Ignoring invalid {name} {value:?} of replaced plugin");
                default
            });
        }
    }
}
