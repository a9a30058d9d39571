/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use html5ever::{LocalName, local_name};
use pdf_replacement::dom::{Document, NodeId, PseudoElement};
use pdf_replacement::{Replacement, ReplacementConfig, create_plugin_replacement};
use replacement_config::Preferences;
use url::Url;

/// A document with an `<embed>` whose UA shadow root will receive the
/// replacement.
fn setup() -> (Document, NodeId, NodeId) {
    let mut document = Document::default();
    let embed = document.create_html_element(local_name!("embed"));
    let body = document.create_html_element(local_name!("body"));
    let doc = document.document_node();
    document.append_child(doc, body).unwrap();
    document.append_child(body, embed).unwrap();
    let root = document.attach_ua_shadow_root(embed).unwrap();
    (document, root, embed)
}

fn build(names: &[&str], values: &[&str]) -> (Document, Replacement) {
    let (mut document, root, embed) = setup();
    let replacement = Replacement::new_with_prefs(
        &mut document,
        root,
        embed,
        names,
        values,
        &Preferences::default(),
    );
    (document, replacement)
}

fn file_parameter(viewer_url: &str) -> String {
    let url = Url::parse(viewer_url).unwrap();
    let mut files = url
        .query_pairs()
        .filter(|(name, _)| name == "file")
        .map(|(_, value)| value.into_owned());
    let file = files.next().expect("viewer URL has no file parameter");
    assert_eq!(files.next(), None);
    file
}

#[test]
fn test_end_to_end() {
    let (document, replacement) = build(
        &["src", "height", "width"],
        &["be-a.pdf", "300px", "400px"],
    );
    let frame = replacement.frame_element().unwrap();

    let src = document.get_attribute(frame, &local_name!("src")).unwrap();
    assert!(src.ends_with("file=a.pdf"), "{src}");
    assert_eq!(document.style_property_value(frame, "height"), Some("300px"));
    assert_eq!(document.style_property_value(frame, "width"), Some("400px"));
    assert!(replacement.is_attached());
}

#[test]
fn test_produced_markup() {
    let (document, replacement) = build(
        &["src", "height", "width"],
        &["be-a.pdf", "300px", "400px"],
    );

    assert_eq!(
        document
            .serializable(replacement.pdf_element().unwrap())
            .to_html()
            .unwrap(),
        "<pdf pseudo=\"-webkit-plugin-replacement\">\
         <iframe scrolling=\"no\" frameborder=\"0\" \
         src=\"qrc:///pdf.js/web/viewer.html?file=a.pdf\" \
         style=\"height: 300px; width: 400px;\"></iframe>\
         </pdf>"
    );
}

#[test]
fn test_subtree_shape() {
    let (document, replacement) = build(&[], &[]);
    let pdf = replacement.pdf_element().unwrap();
    let frame = replacement.frame_element().unwrap();

    assert_eq!(document.children(replacement.root()), &[pdf]);
    assert_eq!(document.children(pdf), &[frame]);
    assert!(document.children(frame).is_empty());

    let pdf_element = document.element(pdf).unwrap();
    assert_eq!(*pdf_element.local_name(), LocalName::from("pdf"));
    assert_eq!(
        pdf_element.implemented_pseudo_element(),
        Some(PseudoElement::PluginReplacement)
    );
    let frame_element = document.element(frame).unwrap();
    assert_eq!(*frame_element.local_name(), local_name!("iframe"));
    assert_eq!(
        document.get_attribute(frame, &local_name!("scrolling")),
        Some("no")
    );
    assert_eq!(
        document.get_attribute(frame, &local_name!("frameborder")),
        Some("0")
    );
    // Dimensions are style properties, never attributes.
    assert_eq!(document.get_attribute(frame, &local_name!("height")), None);
}

#[test]
fn test_last_value_wins() {
    let (document, replacement) = build(
        &["height", "src", "height", "width", "src", "width"],
        &["1px", "first.pdf", "2px", "3px", "be-second.pdf", "4px"],
    );
    let frame = replacement.frame_element().unwrap();

    assert_eq!(document.style_property_value(frame, "height"), Some("2px"));
    assert_eq!(document.style_property_value(frame, "width"), Some("4px"));
    assert_eq!(file_parameter(replacement.viewer_url()), "second.pdf");
}

#[test]
fn test_unknown_attributes_keep_defaults() {
    let (document, replacement) = build(&["foo"], &["bar"]);
    let frame = replacement.frame_element().unwrap();

    assert_eq!(replacement.config(), &ReplacementConfig::default());
    assert_eq!(document.style_property_value(frame, "height"), Some("100%"));
    assert_eq!(document.style_property_value(frame, "width"), Some("100%"));
    assert_eq!(file_parameter(replacement.viewer_url()), "");
}

#[test]
fn test_prefixed_locator_is_stripped() {
    let (_, replacement) = build(&["src"], &["be-http://example.com/doc.pdf"]);

    assert_eq!(replacement.config().src, "http://example.com/doc.pdf");
    assert_eq!(
        file_parameter(replacement.viewer_url()),
        "http://example.com/doc.pdf"
    );
}

#[test]
fn test_unprefixed_locator_is_unchanged() {
    let (_, replacement) = build(&["src"], &["http://example.com/doc.pdf"]);

    assert_eq!(
        file_parameter(replacement.viewer_url()),
        "http://example.com/doc.pdf"
    );
    assert!(
        replacement
            .viewer_url()
            .starts_with("qrc:///pdf.js/web/viewer.html?file=")
    );
}

#[test]
fn test_locator_with_query_stays_one_parameter() {
    let (_, replacement) = build(
        &["src"],
        &["be-https://example.com/get?id=1&file=x.pdf#page=2"],
    );

    assert_eq!(
        file_parameter(replacement.viewer_url()),
        "https://example.com/get?id=1&file=x.pdf#page=2"
    );
    assert_eq!(Url::parse(replacement.viewer_url()).unwrap().fragment(), None);
}

#[test]
fn test_identical_inputs_give_identical_subtrees() {
    let names = ["width", "src", "unknown"];
    let values = ["50%", "be-doc.pdf", "value"];
    let (first_document, first) = build(&names, &values);
    let (second_document, second) = build(&names, &values);

    assert_eq!(
        first_document
            .serializable(first.pdf_element().unwrap())
            .to_html()
            .unwrap(),
        second_document
            .serializable(second.pdf_element().unwrap())
            .to_html()
            .unwrap()
    );
    assert_eq!(first.config(), second.config());
    assert_eq!(first.viewer_url(), second.viewer_url());
}

#[test]
fn test_two_roots_in_one_document() {
    let mut document = Document::default();
    let first_embed = document.create_html_element(local_name!("embed"));
    let second_embed = document.create_html_element(local_name!("embed"));
    let first_root = document.attach_ua_shadow_root(first_embed).unwrap();
    let second_root = document.attach_ua_shadow_root(second_embed).unwrap();

    let first =
        create_plugin_replacement(&mut document, first_root, first_embed, &["src"], &["a.pdf"]);
    let second =
        create_plugin_replacement(&mut document, second_root, second_embed, &["src"], &["a.pdf"]);

    assert_ne!(first.pdf_element(), second.pdf_element());
    assert_eq!(
        document.serializable(first_root).to_html().unwrap(),
        document.serializable(second_root).to_html().unwrap()
    );
    assert_eq!(first.parent(), first_embed);
    assert_eq!(second.parent(), second_embed);
}

#[test]
fn test_mismatched_attribute_lists() {
    let (document, replacement) =
        build(&["src", "height", "width"], &["be-a.pdf", "10px"]);
    let frame = replacement.frame_element().unwrap();

    assert_eq!(document.style_property_value(frame, "height"), Some("10px"));
    assert_eq!(document.style_property_value(frame, "width"), Some("100%"));
    assert!(replacement.is_attached());
}

#[test]
fn test_custom_prefs() {
    let (mut document, root, embed) = setup();
    let prefs = Preferences {
        plugin_replacement_viewer_url: "resource:///viewer.html".to_owned(),
        plugin_replacement_locator_prefix: "pdf:".to_owned(),
        ..Preferences::default()
    };
    let replacement = Replacement::new_with_prefs(
        &mut document,
        root,
        embed,
        &["src"],
        &["pdf:be-doc.pdf"],
        &prefs,
    );

    assert_eq!(
        replacement.viewer_url(),
        "resource:///viewer.html?file=be-doc.pdf"
    );
}

#[test]
fn test_root_that_cannot_have_children() {
    let (mut document, _, embed) = setup();
    let text = document.create_text("fallback");
    let node_count = document.node_count();
    let replacement = Replacement::new_with_prefs(
        &mut document,
        text,
        embed,
        &["src"],
        &["a.pdf"],
        &Preferences::default(),
    );

    assert!(!replacement.is_attached());
    assert_eq!(replacement.pdf_element(), None);
    assert_eq!(replacement.frame_element(), None);
    assert!(document.children(text).is_empty());
    // No detached nodes are left behind in the document.
    assert_eq!(document.node_count(), node_count);
    assert_eq!(replacement.viewer_url(), "qrc:///pdf.js/web/viewer.html?file=a.pdf");
}

#[test]
fn test_dimensions_cannot_carry_extra_declarations() {
    let (document, replacement) = build(
        &["height", "width"],
        &["1px; display: none", "2px !important"],
    );
    let frame = replacement.frame_element().unwrap();

    assert_eq!(
        document.get_attribute(frame, &local_name!("style")),
        Some("height: 100%; width: 100%;")
    );
    assert_eq!(document.style_property_value(frame, "display"), None);
    assert_eq!(replacement.config(), &ReplacementConfig::default());
}

#[test]
fn test_dimensions_are_serialized() {
    let (document, replacement) = build(
        &["height", "width"],
        &["  calc(100% - 10px", "640"],
    );
    let frame = replacement.frame_element().unwrap();

    assert_eq!(
        document.get_attribute(frame, &local_name!("style")),
        Some("height: calc(100% - 10px); width: 640;")
    );
}
