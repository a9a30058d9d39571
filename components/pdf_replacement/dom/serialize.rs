/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::io;

use html5ever::serialize::{Serialize, SerializeOpts, Serializer, TraversalScope, serialize};

use super::{Document, NodeData, NodeId};

/// A node of a [`Document`] that html5ever can serialize.
#[derive(Clone, Copy)]
pub struct SerializableNode<'a> {
    document: &'a Document,
    node: NodeId,
}

impl<'a> SerializableNode<'a> {
    pub(super) fn new(document: &'a Document, node: NodeId) -> SerializableNode<'a> {
        SerializableNode { document, node }
    }

    fn with_node(&self, node: NodeId) -> SerializableNode<'a> {
        SerializableNode {
            document: self.document,
            node,
        }
    }

    fn serialize_children<S: Serializer>(&self, serializer: &mut S) -> io::Result<()> {
        for child in self.document.children(self.node) {
            self.with_node(*child)
                .serialize(serializer, TraversalScope::IncludeNode)?;
        }
        Ok(())
    }

    /// The outer HTML of the node.
    pub fn to_html(&self) -> io::Result<String> {
        let mut bytes = vec![];
        let opts = SerializeOpts {
            traversal_scope: TraversalScope::IncludeNode,
            ..Default::default()
        };
        serialize(&mut bytes, self, opts)?;
        String::from_utf8(bytes).map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))
    }
}

impl Serialize for SerializableNode<'_> {
    fn serialize<S: Serializer>(
        &self,
        serializer: &mut S,
        traversal_scope: TraversalScope,
    ) -> io::Result<()> {
        let Some(node) = self.document.node(self.node) else {
            return Ok(());
        };

        match (traversal_scope, node.data()) {
            (TraversalScope::IncludeNode, NodeData::Element(element)) => {
                serializer.start_elem(
                    element.name().clone(),
                    element
                        .attrs()
                        .iter()
                        .map(|attr| (&attr.name, &*attr.value)),
                )?;
                self.serialize_children(serializer)?;
                serializer.end_elem(element.name().clone())
            },
            (TraversalScope::IncludeNode, NodeData::Text(text)) => serializer.write_text(text),
            // Documents and shadow roots have no markup of their own.
            (_, _) => self.serialize_children(serializer),
        }
    }
}
