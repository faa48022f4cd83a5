//! # Dictionary
//!
//! Herein is support for dictionary construction and manipulation. All runtime
//! operations are performed against a [`Dictionary`], which is a prefix tree
//! of words. The tree is stored as an arena of [`TrieNode`]s addressed by
//! [`NodeId`]; each node records the index of its parent, so the prefix that a
//! node represents can be reconstructed without live back-references.

use std::{
	collections::BTreeMap,
	fs::File,
	io::{self, BufRead, BufReader, ErrorKind, Read, Write},
	path::Path
};

use log::{trace, warn};
use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////
//                                Definitions.                                //
////////////////////////////////////////////////////////////////////////////////

/// Normalize a character to the canonical (upper) case used by the dictionary
/// and the grid. Characters whose upper case expands to several characters
/// (e.g., `ß`) are kept as they are, so that normalization never changes the
/// length of a word.
///
/// # Arguments
///
/// * `c` - The character to normalize.
///
/// # Returns
///
/// The normalized character.
#[must_use]
pub fn normalize(c: char) -> char
{
	let mut upper = c.to_uppercase();
	match (upper.next(), upper.next())
	{
		(Some(u), None) => u,
		_ => c
	}
}

/// The index of a [`TrieNode`] within its [`Dictionary`].
#[derive(
	Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
	Serialize, Deserialize
)]
pub struct NodeId(usize);

impl NodeId
{
	/// The root of every dictionary.
	pub const ROOT: NodeId = NodeId(0);
}

/// A single node of the prefix tree. The sequence of values along the path
/// from the root to a node spells the prefix that the node represents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct TrieNode
{
	/// The normalized character of this node. The root has none.
	value: Option<char>,

	/// Whether the prefix represented by this node is a whole word.
	is_whole_word: bool,

	/// The distance from the root, which is also the length of the prefix.
	depth: usize,

	/// The children of this node, keyed by their characters.
	children: BTreeMap<char, NodeId>,

	/// The parent of this node. The root has none.
	parent: Option<NodeId>
}

impl TrieNode
{
	/// Construct a new leaf node.
	fn new(parent: Option<NodeId>, depth: usize, value: Option<char>) -> Self
	{
		Self
		{
			value,
			is_whole_word: false,
			depth,
			children: BTreeMap::new(),
			parent
		}
	}

	/// The normalized character of the node, or `None` for the root.
	#[inline]
	#[must_use]
	pub fn value(&self) -> Option<char> { self.value }

	/// Check whether the prefix represented by this node is a whole word.
	#[inline]
	#[must_use]
	pub fn is_whole_word(&self) -> bool { self.is_whole_word }

	/// The distance from the root, i.e., the length of the represented prefix.
	#[inline]
	#[must_use]
	pub fn depth(&self) -> usize { self.depth }

	/// The parent of the node, or `None` for the root.
	#[inline]
	#[must_use]
	pub fn parent(&self) -> Option<NodeId> { self.parent }

	/// Look up the child for the given character, which must already be
	/// normalized.
	#[inline]
	#[must_use]
	pub fn child(&self, c: char) -> Option<NodeId>
	{
		self.children.get(&c).copied()
	}

	/// Iterate over the children of the node, in character order.
	#[cfg(test)]
	fn children(&self) -> impl Iterator<Item = (char, NodeId)> + '_
	{
		self.children.iter().map(|(&c, &id)| (c, id))
	}
}

/// A dictionary is a prefix tree of words, stored as an arena of
/// [`TrieNode`]s. The first node is always the root.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct Dictionary
{
	/// The arena of nodes. Index 0 is the root.
	nodes: Vec<TrieNode>,

	/// The number of distinct whole words.
	words: usize
}

impl Default for Dictionary
{
	fn default() -> Self { Self::new() }
}

impl Dictionary
{
	/// Construct an empty dictionary, comprising only the root. Same as
	/// [`Default::default`].
	///
	/// # Returns
	///
	/// An empty dictionary.
	#[inline]
	pub fn new() -> Self
	{
		Self { nodes: vec![TrieNode::new(None, 0, None)], words: 0 }
	}

	/// Build a dictionary from the given words. Words are case-insensitive.
	///
	/// # Arguments
	///
	/// * `words` - The intended content of the dictionary.
	///
	/// # Returns
	///
	/// A dictionary containing exactly the given words.
	pub fn build<I, S>(words: I) -> Self
		where I: IntoIterator<Item = S>, S: AsRef<str>
	{
		let mut dictionary = Self::new();
		for word in words
		{
			dictionary.insert(word.as_ref());
		}
		dictionary
	}

	/// Check if the dictionary is empty.
	///
	/// # Returns
	///
	/// `true` if the dictionary is empty, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool { self.words == 0 }

	/// The number of distinct words in the dictionary.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize { self.words }

	/// The root of the prefix tree.
	#[inline]
	pub fn root(&self) -> &TrieNode { &self.nodes[NodeId::ROOT.0] }

	/// Get the node with the given identifier.
	///
	/// # Panics
	///
	/// If the identifier was not issued by this dictionary.
	#[inline]
	pub fn node(&self, id: NodeId) -> &TrieNode { &self.nodes[id.0] }

	/// Descend a single character from the given node. The character is
	/// normalized first.
	///
	/// # Arguments
	///
	/// * `id` - The node to descend from.
	/// * `c` - The character to consume.
	///
	/// # Returns
	///
	/// The child node, or `None` if no word continues with `c`.
	#[inline]
	#[must_use]
	pub fn step(&self, id: NodeId, c: char) -> Option<NodeId>
	{
		self.node(id).child(normalize(c))
	}

	/// Find the deepest node reachable by consuming `s` from the root. The walk
	/// stops at the first character without a matching child, so the answer
	/// represents the longest prefix of `s` that is present in the dictionary,
	/// which need not be all of `s`. The empty string answers the root.
	///
	/// # Arguments
	///
	/// * `s` - The string to walk.
	///
	/// # Returns
	///
	/// The deepest node reached.
	pub fn prefix(&self, s: &str) -> &TrieNode
	{
		self.node(self.prefix_id(s))
	}

	/// Same as [`prefix`](Self::prefix), but answer the node identifier.
	#[must_use]
	pub fn prefix_id(&self, s: &str) -> NodeId
	{
		let mut current = NodeId::ROOT;
		for c in s.chars()
		{
			match self.step(current, c)
			{
				Some(next) => current = next,
				None => break
			}
		}
		current
	}

	/// Walk the whole of `s` from the root.
	///
	/// # Returns
	///
	/// The node representing `s`, or `None` if the walk falls off the tree.
	#[must_use]
	pub fn walk(&self, s: &str) -> Option<NodeId>
	{
		s.chars().try_fold(NodeId::ROOT, |id, c| self.step(id, c))
	}

	/// Check if the dictionary contains the given word.
	///
	/// # Arguments
	///
	/// * `word` - The word to check.
	///
	/// # Returns
	///
	/// `true` if the dictionary contains the word, `false` otherwise.
	#[must_use]
	pub fn contains(&self, word: &str) -> bool
	{
		if !self.contains_prefix(word)
		{
			return false
		}
		// The whole of `word` is a path, so the deepest node is its terminal.
		self.prefix(word).is_whole_word()
	}

	/// Check if the dictionary contains a word with the given prefix. Every
	/// word is a prefix of itself.
	///
	/// # Arguments
	///
	/// * `prefix` - The prefix to check.
	///
	/// # Returns
	///
	/// `true` if the dictionary contains a word with the given prefix, `false`
	/// otherwise.
	#[inline]
	#[must_use]
	pub fn contains_prefix(&self, prefix: &str) -> bool
	{
		self.walk(prefix).is_some()
	}

	/// Reconstruct the prefix represented by the given node by walking the
	/// parent indices back to the root.
	///
	/// # Arguments
	///
	/// * `id` - The target node.
	///
	/// # Returns
	///
	/// The normalized prefix.
	#[must_use]
	pub fn word(&self, id: NodeId) -> String
	{
		let mut letters = Vec::with_capacity(self.node(id).depth);
		let mut current = Some(id);
		while let Some(id) = current
		{
			let node = self.node(id);
			letters.extend(node.value);
			current = node.parent;
		}
		letters.iter().rev().collect()
	}

	/// Insert a single word. Surrounding whitespace is ignored, and an empty
	/// word is never inserted. Insertion resumes from the deepest existing
	/// [prefix](Self::prefix) of the word, creating nodes only for the
	/// remaining suffix.
	///
	/// # Arguments
	///
	/// * `word` - The word to insert.
	///
	/// # Returns
	///
	/// `true` if the word was not already present, `false` otherwise.
	pub fn insert(&mut self, word: &str) -> bool
	{
		let word = word.trim();
		if word.is_empty()
		{
			return false
		}
		let letters = word.chars().map(normalize).collect::<Vec<_>>();
		let mut current = self.prefix_id(word);
		for &c in &letters[self.node(current).depth..]
		{
			let next = NodeId(self.nodes.len());
			let depth = self.node(current).depth + 1;
			self.nodes.push(TrieNode::new(Some(current), depth, Some(c)));
			self.nodes[current.0].children.insert(c, next);
			current = next;
		}
		let node = &mut self.nodes[current.0];
		if node.is_whole_word
		{
			return false
		}
		node.is_whole_word = true;
		self.words += 1;
		true
	}

	/// Populate the dictionary with the given words.
	///
	/// # Arguments
	///
	/// * `words` - The intended content of the dictionary.
	pub fn populate<T: AsRef<str>>(&mut self, words: &[T])
	{
		for word in words
		{
			self.insert(word.as_ref());
		}
	}

	/// Open a dictionary with the given name. Only the specified directory will
	/// be searched. `name` denotes the dictionary file, sans the extension. If
	/// a binary dictionary (`<name>.dict`) exists _and_ is newer than the text
	/// file (`<name>.txt`), it will be read; otherwise, a text file will be
	/// read and a binary dictionary will be created (to optimize future reads).
	///
	/// # Arguments
	///
	/// * `dir` - The directory to search.
	/// * `name` - The name of the dictionary file.
	///
	/// # Returns
	///
	/// A dictionary containing the words from the file.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or read, an error is returned.
	/// * If the file contains invalid data, an [`ErrorKind::InvalidData`] is
	///   returned.
	pub fn open<T: AsRef<Path>>(dir: T, name: &str) -> Result<Self, io::Error>
	{
		let dict_path = dir.as_ref().join(format!("{}.dict", name));
		let txt_path = dir.as_ref().join(format!("{}.txt", name));
		// Use the binary dictionary only if it's newer than the text
		// dictionary. Any failure to obtain either modification time, including
		// the absence of the binary dictionary, falls back to the text file.
		let binary_is_fresh = dict_path
			.metadata()
			.and_then(|m| m.modified())
			.and_then(|dict_time| {
				txt_path
					.metadata()
					.and_then(|n| n.modified())
					.map(|txt_time| dict_time > txt_time)
			})
			.unwrap_or(false);
		if binary_is_fresh
		{
			let dictionary = Self::deserialize_from_file(&dict_path)?;
			trace!("Read binary dictionary: {}", dict_path.display());
			Ok(dictionary)
		}
		else
		{
			let dictionary = Self::read_from_file(&txt_path)?;
			trace!("Read text dictionary: {}", txt_path.display());
			match dictionary.serialize_to_file(&dict_path)
			{
				Ok(_) =>
				{
					trace!("Wrote binary dictionary: {}", dict_path.display())
				},
				Err(e) => warn!(
					"Failed to write binary dictionary: {}: {}",
					dict_path.display(),
					e
				)
			}
			Ok(dictionary)
		}
	}

	/// Construct a dictionary from the contents of the given file. Each line
	/// in the file is considered a single word; blank lines are skipped.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Returns
	///
	/// A dictionary containing the words from the file.
	///
	/// # Errors
	///
	/// If the file cannot be opened or read, an error is returned.
	pub fn read_from_file<T: AsRef<Path>>(path: T) -> Result<Self, io::Error>
	{
		let file = File::open(path)?;
		let reader = BufReader::new(file);
		let words = reader.lines().collect::<Result<Vec<_>, _>>()?;
		let mut dictionary = Self::new();
		dictionary.populate(&words);
		Ok(dictionary)
	}

	/// Deserialize a dictionary from the given file. The file must contain a
	/// serialized dictionary in [`bincode`](bincode) format.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Returns
	///
	/// A dictionary deserialized from the file.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or read, an error is returned.
	/// * If the file contains invalid data, an [`ErrorKind::InvalidData`] is
	///   returned.
	pub fn deserialize_from_file<T: AsRef<Path>>(
		path: T
	) -> Result<Self, io::Error>
	{
		let file = File::open(path)?;
		let mut reader = BufReader::new(file);
		let mut content = Vec::new();
		reader.read_to_end(&mut content)?;
		let dictionary: Self = bincode::deserialize(&content)
			.map_err(|e| io::Error::new(ErrorKind::InvalidData, e))?;
		if !dictionary.is_well_formed()
		{
			return Err(io::Error::new(
				ErrorKind::InvalidData,
				"malformed binary dictionary"
			))
		}
		Ok(dictionary)
	}

	/// Check the structural invariants of the arena, so that no query can index
	/// outside of it:
	///
	/// * The first node is a root: no value, no parent, and depth 0.
	/// * Every child identifier is in range, and the child has the key as its
	///   value, the node as its parent, and a depth one greater.
	/// * Every other node is some node's child, via its parent link.
	/// * The word count matches the number of whole words.
	///
	/// # Returns
	///
	/// `true` if the arena is well formed, `false` otherwise.
	#[must_use]
	fn is_well_formed(&self) -> bool
	{
		let Some(root) = self.nodes.first() else { return false };
		if root.value.is_some() || root.parent.is_some() || root.depth != 0
		{
			return false
		}
		let children_link_back = self.nodes.iter().enumerate()
			.all(|(index, node)| {
				node.children.iter().all(|(&c, &child)| {
					self.nodes.get(child.0).is_some_and(|child| {
						child.value == Some(c)
							&& child.parent == Some(NodeId(index))
							&& child.depth == node.depth + 1
					})
				})
			});
		let parents_link_forward = self.nodes.iter().enumerate()
			.skip(1)
			.all(|(index, node)| {
				match (node.parent, node.value)
				{
					(Some(parent), Some(c)) => self.nodes.get(parent.0)
						.and_then(|parent| parent.child(c))
						== Some(NodeId(index)),
					_ => false
				}
			});
		let words = self.nodes.iter().filter(|node| node.is_whole_word).count();
		children_link_back && parents_link_forward && words == self.words
	}

	/// Serialize the dictionary to the given file. The dictionary is serialized
	/// in [`bincode`](bincode) format.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Errors
	///
	/// If the file cannot be created or written, an error is returned.
	pub fn serialize_to_file<T: AsRef<Path>>(
		&self,
		path: T
	) -> Result<(), io::Error>
	{
		let mut file = File::create(path)?;
		let content = bincode::serialize(self)
			.map_err(|e| io::Error::new(ErrorKind::InvalidData, e))?;
		file.write_all(&content)?;
		Ok(())
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
