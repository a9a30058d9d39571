/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The slice of the DOM that generated user-agent content is built from.
//!
//! Nodes live in an arena owned by a [`Document`] and are addressed by
//! [`NodeId`]. Only the operations replacement content needs are provided:
//! creating elements and text, attaching a UA shadow root, appending
//! children, editing attributes and inline style, and serializing a subtree.

mod element;
mod serialize;
mod style;

use std::fmt;

use html5ever::{LocalName, QualName, ns};

pub use self::element::{ElementData, PseudoElement};
pub use self::serialize::SerializableNode;
pub(crate) use self::style::parse_property_value;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(usize);

#[derive(Debug)]
pub enum NodeData {
    Document,
    /// A shadow root attached to `host` by the user agent.
    ShadowRoot { host: NodeId },
    Element(ElementData),
    Text(String),
}

#[derive(Debug)]
pub struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

impl Node {
    fn new(data: NodeData) -> Node {
        Node {
            parent: None,
            children: vec![],
            data,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match self.data {
            NodeData::Element(ref element) => Some(element),
            _ => None,
        }
    }

    fn as_mut_element(&mut self) -> Option<&mut ElementData> {
        match self.data {
            NodeData::Element(ref mut element) => Some(element),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HasBrowsingContext {
    No,
    Yes,
}

/// Failures of DOM mutations, named after the DOM exceptions they stand for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DomError {
    HierarchyRequest,
    /// The node does not belong to this document, or is of the wrong kind
    /// for the operation.
    InvalidNode,
    /// A style property or value that does not parse.
    Syntax,
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::HierarchyRequest => f.write_str("HierarchyRequestError"),
            DomError::InvalidNode => f.write_str("InvalidNodeTypeError"),
            DomError::Syntax => f.write_str("SyntaxError"),
        }
    }
}

impl std::error::Error for DomError {}

#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    has_browsing_context: HasBrowsingContext,
}

impl Default for Document {
    fn default() -> Self {
        Document::new(HasBrowsingContext::Yes)
    }
}

impl Document {
    pub fn new(has_browsing_context: HasBrowsingContext) -> Document {
        Document {
            nodes: vec![Node::new(NodeData::Document)],
            has_browsing_context,
        }
    }

    pub fn document_node(&self) -> NodeId {
        NodeId(0)
    }

    pub fn has_browsing_context(&self) -> bool {
        self.has_browsing_context == HasBrowsingContext::Yes
    }

    /// Number of nodes ever created in this document, the document node
    /// included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.node(id).and_then(Node::as_element)
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        self.nodes
            .get_mut(id.0)
            .and_then(Node::as_mut_element)
            .ok_or(DomError::InvalidNode)
    }

    /// Whether nodes can be appended to `parent` at all.
    pub fn can_have_children(&self, parent: NodeId) -> bool {
        matches!(
            self.node(parent).map(Node::data),
            Some(NodeData::Document | NodeData::ShadowRoot { .. } | NodeData::Element(_))
        )
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::children).unwrap_or_default()
    }

    fn push_node(&mut self, data: NodeData) -> NodeId {
        self.nodes.push(Node::new(data));
        NodeId(self.nodes.len() - 1)
    }

    pub fn create_element(&mut self, name: QualName) -> NodeId {
        self.push_node(NodeData::Element(ElementData::new(name)))
    }

    pub fn create_html_element(&mut self, local_name: LocalName) -> NodeId {
        self.create_element(QualName::new(None, ns!(html), local_name))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push_node(NodeData::Text(text.into()))
    }

    /// Returns the UA shadow root of `host`, attaching a new one first if the
    /// element does not have a shadow root yet.
    pub fn attach_ua_shadow_root(&mut self, host: NodeId) -> Result<NodeId, DomError> {
        if let Some(shadow_root) = self.element_mut(host)?.shadow_root {
            return Ok(shadow_root);
        }
        let shadow_root = self.push_node(NodeData::ShadowRoot { host });
        self.element_mut(host)?.shadow_root = Some(shadow_root);
        Ok(shadow_root)
    }

    /// Whether `ancestor` is `node` or one of its ancestors, crossing shadow
    /// boundaries towards the host.
    pub fn is_inclusive_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = match self.node(id) {
                Some(Node {
                    data: NodeData::ShadowRoot { host },
                    ..
                }) => Some(*host),
                Some(node) => node.parent,
                None => None,
            };
        }
        false
    }

    // https://dom.spec.whatwg.org/#concept-node-ensure-pre-insertion-validity
    fn ensure_pre_insertion_validity(&self, node: NodeId, parent: NodeId) -> Result<(), DomError> {
        let (Some(parent_node), Some(child_node)) = (self.node(parent), self.node(node)) else {
            return Err(DomError::InvalidNode);
        };

        // Step 1.
        if !self.can_have_children(parent) {
            return Err(DomError::HierarchyRequest);
        }

        // Step 2.
        if self.is_inclusive_ancestor_of(node, parent) {
            return Err(DomError::HierarchyRequest);
        }

        // Step 4-5.
        match child_node.data {
            NodeData::Text(_) if matches!(parent_node.data, NodeData::Document) => {
                Err(DomError::HierarchyRequest)
            },
            NodeData::Text(_) | NodeData::Element(_) => Ok(()),
            NodeData::Document | NodeData::ShadowRoot { .. } => Err(DomError::HierarchyRequest),
        }
    }

    pub fn append_child(&mut self, parent: NodeId, node: NodeId) -> Result<(), DomError> {
        self.ensure_pre_insertion_validity(node, parent)?;

        if let Some(old_parent) = self.nodes[node.0].parent.take() {
            self.nodes[old_parent.0].children.retain(|child| *child != node);
        }
        self.nodes[node.0].parent = Some(parent);
        self.nodes[parent.0].children.push(node);
        Ok(())
    }

    pub fn get_attribute(&self, element: NodeId, local_name: &LocalName) -> Option<&str> {
        self.element(element)?.get_attribute(local_name)
    }

    pub fn set_attribute(
        &mut self,
        element: NodeId,
        local_name: LocalName,
        value: &str,
    ) -> Result<(), DomError> {
        self.element_mut(element)?.set_attribute(local_name, value);
        Ok(())
    }

    pub fn style_property_value(&self, element: NodeId, property: &str) -> Option<&str> {
        self.element(element)?.style().get_property_value(property)
    }

    /// Equivalent of `element.style.setProperty(property, value)`, except
    /// that an invalid property or value is reported as
    /// [`DomError::Syntax`] instead of being ignored.
    pub fn set_style_property(
        &mut self,
        element: NodeId,
        property: &str,
        value: &str,
    ) -> Result<(), DomError> {
        self.element_mut(element)?
            .set_style_property(property, value)
    }

    pub fn set_implemented_pseudo_element(
        &mut self,
        element: NodeId,
        pseudo_element: PseudoElement,
    ) -> Result<(), DomError> {
        self.element_mut(element)?
            .set_implemented_pseudo_element(pseudo_element);
        Ok(())
    }

    pub fn serializable(&self, node: NodeId) -> SerializableNode<'_> {
        SerializableNode::new(self, node)
    }
}
