/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Preferences controlling how unsupported plugin content is replaced.
//!
//! A single [`Preferences`] value lives behind a process-wide lock. Embedders
//! replace it wholesale with [`set`], usually after reading a `prefs.json`
//! with [`read_prefs_from_json`]; readers take a short-lived guard with [`get`].

use std::fmt;
use std::sync::{LazyLock, RwLock, RwLockReadGuard};

use log::{debug, warn};
use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;

static PREFERENCES: LazyLock<RwLock<Preferences>> =
    LazyLock::new(|| RwLock::new(Preferences::default()));

#[inline]
pub fn get() -> RwLockReadGuard<'static, Preferences> {
    PREFERENCES.read().expect("RwLock is poisoned")
}

pub fn set(preferences: Preferences) {
    *PREFERENCES.write().expect("RwLock is poisoned") = preferences;
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Preferences {
    /// Whether unsupported PDF embeds are replaced by the viewer at all.
    pub plugin_replacement_enabled: bool,
    /// The document that renders the replaced resource. The resource locator
    /// is handed to it in the `file` query parameter.
    pub plugin_replacement_viewer_url: String,
    /// Marker that upstream code puts in front of locators meant for the
    /// replacement. It is stripped before the locator reaches the viewer.
    pub plugin_replacement_locator_prefix: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            plugin_replacement_enabled: true,
            plugin_replacement_viewer_url: "qrc:///pdf.js/web/viewer.html".to_owned(),
            plugin_replacement_locator_prefix: "be-".to_owned(),
        }
    }
}

const ALL_FIELDS: &[&str] = &[
    "plugin_replacement_enabled",
    "plugin_replacement_viewer_url",
    "plugin_replacement_locator_prefix",
];

impl Preferences {
    pub fn exists(name: &str) -> bool {
        ALL_FIELDS.contains(&name)
    }

    pub fn all_fields() -> &'static [&'static str] {
        ALL_FIELDS
    }

    pub fn get_value(&self, name: &str) -> Option<PrefValue> {
        match name {
            "plugin_replacement_enabled" => Some(self.plugin_replacement_enabled.into()),
            "plugin_replacement_viewer_url" => {
                Some(self.plugin_replacement_viewer_url.clone().into())
            },
            "plugin_replacement_locator_prefix" => {
                Some(self.plugin_replacement_locator_prefix.clone().into())
            },
            _ => None,
        }
    }

    pub fn set_value(&mut self, name: &str, value: PrefValue) -> Result<(), PrefError> {
        match (name, value) {
            ("plugin_replacement_enabled", PrefValue::Bool(value)) => {
                self.plugin_replacement_enabled = value
            },
            ("plugin_replacement_viewer_url", PrefValue::Str(value)) => {
                self.plugin_replacement_viewer_url = value
            },
            ("plugin_replacement_locator_prefix", PrefValue::Str(value)) => {
                self.plugin_replacement_locator_prefix = value
            },
            (name, _) if Self::exists(name) => return Err(PrefError::WrongType(name.to_owned())),
            (name, _) => return Err(PrefError::UnknownPref(name.to_owned())),
        }
        Ok(())
    }

    /// The configured viewer document, parsed.
    pub fn viewer_url(&self) -> Result<Url, PrefError> {
        Url::parse(&self.plugin_replacement_viewer_url).map_err(PrefError::InvalidViewerUrl)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PrefValue {
    Bool(bool),
    Str(String),
}

impl From<bool> for PrefValue {
    fn from(value: bool) -> Self {
        PrefValue::Bool(value)
    }
}

impl From<String> for PrefValue {
    fn from(value: String) -> Self {
        PrefValue::Str(value)
    }
}

impl From<&str> for PrefValue {
    fn from(value: &str) -> Self {
        PrefValue::Str(value.to_owned())
    }
}

#[derive(Debug)]
pub enum PrefError {
    JsonParse(serde_json::Error),
    /// A preference file naming an unknown preference, or giving one a value
    /// of the wrong type.
    InvalidPref(serde_json::Error),
    UnknownPref(String),
    WrongType(String),
    InvalidViewerUrl(url::ParseError),
}

impl fmt::Display for PrefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefError::JsonParse(error) => {
                write!(f, "Ignoring invalid JSON in preferences: {error}")
            },
            PrefError::InvalidPref(error) => write!(f, "Invalid preference: {error}"),
            PrefError::UnknownPref(name) => write!(f, "Unknown preference: {name:?}"),
            PrefError::WrongType(name) => write!(f, "Wrong value type for preference {name:?}"),
            PrefError::InvalidViewerUrl(error) => write!(f, "Invalid viewer URL: {error}"),
        }
    }
}

impl std::error::Error for PrefError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PrefError::JsonParse(error) | PrefError::InvalidPref(error) => Some(error),
            PrefError::InvalidViewerUrl(error) => Some(error),
            PrefError::UnknownPref(_) | PrefError::WrongType(_) => None,
        }
    }
}

/// Read preferences from the contents of a `prefs.json` file.
///
/// Keys may use either the field name (`plugin_replacement_enabled`) or the
/// dotted form (`plugin_replacement.enabled`). Missing keys keep their
/// default value.
pub fn read_prefs_from_json(txt: &str) -> Result<Preferences, PrefError> {
    let map: Map<String, Value> = serde_json::from_str(txt).map_err(PrefError::JsonParse)?;
    let map = map
        .into_iter()
        .map(|(name, value)| (name.replace('.', "_"), value))
        .collect();

    let preferences: Preferences =
        serde_json::from_value(Value::Object(map)).map_err(|error| {
            warn!("Ignoring preferences: {error}");
            PrefError::InvalidPref(error)
        })?;
    preferences.viewer_url()?;
    debug!("Read plugin replacement preferences: {preferences:?}");
    Ok(preferences)
}
