/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Construction of the locator the replacement frame navigates to.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything but the URI component unreserved characters
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Strips the marker upstream code puts in front of locators meant for the
/// replacement, e.g. `be-http://example.com/doc.pdf`. Only one occurrence is
/// removed.
pub fn normalize_locator<'a>(src: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return src;
    }
    src.strip_prefix(prefix).unwrap_or(src)
}

/// `<viewer>?file=<src>`, with `src` escaped so that it stays a single query
/// value whatever characters it contains.
pub fn viewer_url(viewer: &str, src: &str) -> String {
    format!("{viewer}?file={}", utf8_percent_encode(src, URI_COMPONENT))
}
