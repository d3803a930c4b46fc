use serde::Deserialize;

/// Raw attribute value as the pug parser stores it: either the source text
/// (quotes included, e.g. `'{{show}}'`) or `true` for a bare attribute.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Flag(bool),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub val: AttrValue,
}

impl Attribute {
    pub fn text(name: impl Into<String>, val: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            val: AttrValue::Text(val.into()),
        }
    }

    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            val: AttrValue::Flag(true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Element {
    pub name: String,
    #[serde(default)]
    pub attrs: Vec<Attribute>,
    #[serde(default)]
    pub block: Block,
}

impl Element {
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    #[serde(rename = "Tag")]
    Element(Element),
    Text {
        val: String,
    },
    /// Comments, code blocks and other pug node kinds the pass ignores.
    #[serde(other)]
    Other,
}

impl Node {
    pub fn element(name: impl Into<String>, attrs: Vec<Attribute>, nodes: Vec<Node>) -> Self {
        Node::Element(Element {
            name: name.into(),
            attrs,
            block: Block { nodes },
        })
    }

    pub fn text(val: impl Into<String>) -> Self {
        Node::Text { val: val.into() }
    }
}
