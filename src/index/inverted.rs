//! Per-field inverted index stored as a character trie.
//!
//! Every token is a path from the root, one node per character. The node at
//! the end of the path holds the postings for that token: a map from document
//! reference to term frequency, plus the document frequency `df`.
//!
//! Serialized, a node is a JSON object with the keys `docs` and `df` and one
//! extra key per child character:
//!
//! ```text
//! {"docs": {}, "df": 0, "r": {"docs": {}, "df": 0, "u": {"docs": {}, "df": 0,
//!     "n": {"docs": {"a.html": {"tf": 1.0}}, "df": 1}}}}
//! ```
//!
//! Nodes are never pruned when postings are removed, so an emptied path stays
//! in the trie with `df` 0.
//!
//! Trie depth equals token length and tokens have no length limit. Walks over
//! the trie use an explicit stack. The walks that go through serde (and
//! cloning and comparison) grow the thread stack on demand instead.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Frequency information for one token in one document.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TermInfo {
    /// Square root of the number of occurrences of the token in the field.
    pub tf: f64,
}

/// Postings of one token: document reference to term frequency.
pub type Postings = BTreeMap<String, TermInfo>;

/// Stack left free before a recursive trie walk allocates a new segment.
const RED_ZONE: usize = 64 * 1024;

/// Size of each stack segment allocated for deep tries.
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

fn grow<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, f)
}

/// A node of the token trie.
#[derive(Default)]
pub struct TrieNode {
    docs: Postings,
    df: usize,
    children: BTreeMap<char, TrieNode>,
}

impl TrieNode {
    /// Postings of the token ending at this node.
    pub fn docs(&self) -> &Postings {
        &self.docs
    }

    /// Number of documents containing the token ending at this node.
    pub fn df(&self) -> usize {
        self.df
    }

    fn child(&self, c: char) -> Option<&TrieNode> {
        self.children.get(&c)
    }

    fn purge(&mut self, doc_ref: &str) -> usize {
        let mut removed = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.docs.remove(doc_ref).is_some() {
                node.df = node.df.saturating_sub(1);
                removed += 1;
            }
            stack.extend(node.children.values_mut());
        }
        removed
    }

    fn count_tokens(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += usize::from(node.df > 0);
            stack.extend(node.children.values());
        }
        count
    }
}

impl Drop for TrieNode {
    fn drop(&mut self) {
        let mut pending: Vec<TrieNode> =
            std::mem::take(&mut self.children).into_values().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(std::mem::take(&mut node.children).into_values());
        }
    }
}

impl Clone for TrieNode {
    fn clone(&self) -> Self {
        grow(|| TrieNode {
            docs: self.docs.clone(),
            df: self.df,
            children: self.children.clone(),
        })
    }
}

impl PartialEq for TrieNode {
    fn eq(&self, other: &Self) -> bool {
        grow(|| {
            self.docs == other.docs && self.df == other.df && self.children == other.children
        })
    }
}

impl fmt::Debug for TrieNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        grow(|| {
            f.debug_struct("TrieNode")
                .field("docs", &self.docs)
                .field("df", &self.df)
                .field("children", &self.children)
                .finish()
        })
    }
}

impl Serialize for TrieNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        grow(|| -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(2 + self.children.len()))?;
            map.serialize_entry("docs", &self.docs)?;
            map.serialize_entry("df", &self.df)?;
            let mut key = [0u8; 4];
            for (c, child) in &self.children {
                map.serialize_entry(&*c.encode_utf8(&mut key), child)?;
            }
            map.end()
        })
    }
}

impl<'de> Deserialize<'de> for TrieNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        grow(|| deserializer.deserialize_map(TrieNodeVisitor))
    }
}

struct TrieNodeVisitor;

impl<'de> Visitor<'de> for TrieNodeVisitor {
    type Value = TrieNode;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an inverted index node with `docs`, `df` and one key per character")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<TrieNode, A::Error> {
        let mut docs = None;
        let mut df = None;
        let mut children = BTreeMap::new();

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "docs" => {
                    if docs.is_some() {
                        return Err(de::Error::duplicate_field("docs"));
                    }
                    docs = Some(map.next_value::<Postings>()?);
                }
                "df" => {
                    if df.is_some() {
                        return Err(de::Error::duplicate_field("df"));
                    }
                    df = Some(map.next_value::<usize>()?);
                }
                other => {
                    let mut chars = other.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => {
                            let child = map.next_value::<TrieNode>()?;
                            if children.insert(c, child).is_some() {
                                return Err(de::Error::custom(format!(
                                    "duplicate trie key `{c}`"
                                )));
                            }
                        }
                        _ => {
                            return Err(de::Error::custom(format!(
                                "unexpected key `{other}` in inverted index node"
                            )));
                        }
                    }
                }
            }
        }

        Ok(TrieNode {
            docs: docs.ok_or_else(|| de::Error::missing_field("docs"))?,
            df: df.ok_or_else(|| de::Error::missing_field("df"))?,
            children,
        })
    }
}

/// Inverted index of one field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InvertedIndex {
    root: TrieNode,
}

impl InvertedIndex {
    /// Create an empty inverted index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `doc_ref` contains `token` with the given term frequency.
    ///
    /// Adding a token twice for the same document overwrites the frequency
    /// without counting the document again.
    pub fn add_token(&mut self, token: &str, doc_ref: &str, tf: f64) {
        if token.is_empty() {
            return;
        }

        let mut node = &mut self.root;
        for c in token.chars() {
            node = node.children.entry(c).or_default();
        }

        if node
            .docs
            .insert(doc_ref.to_string(), TermInfo { tf })
            .is_none()
        {
            node.df += 1;
        }
    }

    /// Remove the posting of `doc_ref` for `token`, if any.
    pub fn remove_token(&mut self, token: &str, doc_ref: &str) {
        if token.is_empty() {
            return;
        }

        let mut node = &mut self.root;
        for c in token.chars() {
            match node.children.get_mut(&c) {
                Some(child) => node = child,
                None => return,
            }
        }

        if node.docs.remove(doc_ref).is_some() {
            node.df = node.df.saturating_sub(1);
        }
    }

    /// Remove every posting of `doc_ref`, returning how many were removed.
    pub fn purge_ref(&mut self, doc_ref: &str) -> usize {
        self.root.purge(doc_ref)
    }

    /// Get the trie node of a token.
    pub fn get_node(&self, token: &str) -> Option<&TrieNode> {
        if token.is_empty() {
            return None;
        }
        token
            .chars()
            .try_fold(&self.root, |node, c| node.child(c))
    }

    /// Whether the token's path exists in the trie.
    ///
    /// A path can exist without postings once its documents were replaced.
    pub fn has_token(&self, token: &str) -> bool {
        self.get_node(token).is_some()
    }

    /// Postings of a token, if its path exists.
    pub fn get_docs(&self, token: &str) -> Option<&Postings> {
        self.get_node(token).map(TrieNode::docs)
    }

    /// Number of documents containing the token.
    pub fn get_doc_freq(&self, token: &str) -> usize {
        self.get_node(token).map_or(0, TrieNode::df)
    }

    /// Term frequency of a token in a document, zero when absent.
    pub fn get_term_frequency(&self, token: &str, doc_ref: &str) -> f64 {
        self.get_docs(token)
            .and_then(|docs| docs.get(doc_ref))
            .map_or(0.0, |info| info.tf)
    }

    /// Number of distinct tokens that still have at least one posting.
    pub fn token_count(&self) -> usize {
        self.root.count_tokens()
    }
}
