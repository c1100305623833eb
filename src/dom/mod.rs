//! HTML document tree.
//!
//! Rendered Markdown is parsed with html5ever into an arena [`Dom`]; the
//! transformation passes mutate it in place and [`Document::to_html`] writes
//! the body back out.

mod arena;
mod serialize;
mod tree_sink;

use std::ops::{Deref, DerefMut};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

pub use arena::{Attribute, ChildrenIter, Dom, Node, NodeData, NodeId};
pub use serialize::{escape_attr, escape_text, inner_html};

use crate::error::{Error, Result};
use tree_sink::ArenaSink;

/// A parsed HTML fragment rooted at its `<body>`.
#[derive(Debug)]
pub struct Document {
    dom: Dom,
    body: NodeId,
}

impl Document {
    /// Parse rendered HTML.
    ///
    /// The input is treated as body content; anything the HTML tree builder
    /// hoists into `<head>` is not part of [`to_html`](Self::to_html).
    pub fn parse(html: &str) -> Result<Self> {
        let dom = parse_document(ArenaSink::new(), ParseOpts::default())
            .from_utf8()
            .one(html.as_bytes())
            .into_dom();

        let body = dom
            .find_by_tag("body")
            .ok_or_else(|| Error::Parse("document has no <body> element".to_string()))?;

        Ok(Self { dom, body })
    }

    /// The `<body>` element.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Serialize the body's children.
    pub fn to_html(&self) -> String {
        inner_html(&self.dom, self.body)
    }
}

impl Deref for Document {
    type Target = Dom;

    fn deref(&self) -> &Dom {
        &self.dom
    }
}

impl DerefMut for Document {
    fn deref_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }
}
