//! Ordered trie for command name lookup and completion.
//!
//! Children are kept sorted by byte, so prefix iteration yields keys in
//! lexicographic order. Completion lists must be deterministic; a hash-based
//! index would shuffle them between runs.

/// A byte-keyed prefix tree with ordered iteration.
///
/// # Complexity
///
/// - `get` / `insert`: O(k log b) where k = key length, b = branching factor
/// - `prefix_iter`: O(k + m) where m = number of matches, in sorted order
///
/// # Examples
///
/// ```
/// use bevy_world_console::core::Trie;
///
/// let mut trie = Trie::new();
/// trie.insert("listmodules", ());
/// trie.insert("listtriggers", ());
/// trie.insert("loadmodule", ());
///
/// let keys: Vec<_> = trie.prefix_iter("list").map(|(k, _)| k).collect();
/// assert_eq!(keys, vec!["listmodules", "listtriggers"]);
/// ```
#[derive(Debug, Clone)]
pub struct Trie<V> {
    root: TrieNode<V>,
    len: usize,
}

#[derive(Debug, Clone)]
struct TrieNode<V> {
    // Sorted by byte; binary search on lookup, ordered walk on iteration.
    children: Vec<(u8, TrieNode<V>)>,
    value: Option<V>,
    key: Option<Box<str>>,
}

impl<V> Default for TrieNode<V> {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            value: None,
            key: None,
        }
    }
}

impl<V> TrieNode<V> {
    fn child(&self, byte: u8) -> Option<&TrieNode<V>> {
        self.children
            .binary_search_by_key(&byte, |(b, _)| *b)
            .ok()
            .map(|i| &self.children[i].1)
    }

    fn child_mut_or_insert(&mut self, byte: u8) -> &mut TrieNode<V> {
        let index = match self.children.binary_search_by_key(&byte, |(b, _)| *b) {
            Ok(i) => i,
            Err(i) => {
                self.children.insert(i, (byte, TrieNode::default()));
                i
            }
        };
        &mut self.children[index].1
    }
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Trie<V> {
    /// Create a new empty trie.
    pub fn new() -> Self {
        Self {
            root: TrieNode::default(),
            len: 0,
        }
    }

    /// Get the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the trie is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a key-value pair.
    ///
    /// Returns the previous value if the key already existed.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        let mut node = &mut self.root;

        for &byte in key.as_bytes() {
            node = node.child_mut_or_insert(byte);
        }

        let old = node.value.replace(value);
        node.key = Some(key.into());

        if old.is_none() {
            self.len += 1;
        }

        old
    }

    /// Get a reference to the value for the given key.
    pub fn get(&self, key: &str) -> Option<&V> {
        let mut node = &self.root;

        for &byte in key.as_bytes() {
            node = node.child(byte)?;
        }

        node.value.as_ref()
    }

    /// Check if the trie contains the given key.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove a key from the trie.
    ///
    /// Returns the removed value if it existed. Interior nodes are not
    /// pruned; the registry never removes commands during a session.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let mut node = &mut self.root;

        for &byte in key.as_bytes() {
            let index = node
                .children
                .binary_search_by_key(&byte, |(b, _)| *b)
                .ok()?;
            node = &mut node.children[index].1;
        }

        if node.value.is_some() {
            self.len -= 1;
            node.key = None;
        }

        node.value.take()
    }

    /// Iterate over all key-value pairs with the given prefix, in
    /// lexicographic key order.
    ///
    /// The prefix itself is not required to be a key in the trie.
    pub fn prefix_iter(&self, prefix: &str) -> PrefixIter<'_, V> {
        let mut node = &self.root;

        for &byte in prefix.as_bytes() {
            match node.child(byte) {
                Some(child) => node = child,
                None => return PrefixIter { stack: Vec::new() },
            }
        }

        PrefixIter { stack: vec![node] }
    }

    /// Iterate over all key-value pairs in lexicographic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.prefix_iter("")
    }

    /// Iterate over all keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(k, _)| k)
    }

    /// Clear all entries.
    pub fn clear(&mut self) {
        self.root = TrieNode::default();
        self.len = 0;
    }
}

/// Ordered iterator over entries with a common prefix.
pub struct PrefixIter<'a, V> {
    stack: Vec<&'a TrieNode<V>>,
}

impl<'a, V> Iterator for PrefixIter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            // Children are sorted ascending; push in reverse so the smallest
            // byte is visited first.
            for (_, child) in node.children.iter().rev() {
                self.stack.push(child);
            }

            if let (Some(key), Some(value)) = (&node.key, &node.value) {
                return Some((key, value));
            }
        }

        None
    }
}
