//! Strict trees over the view's nodes, for the tree layouts.

use std::collections::HashMap;

use crate::content::slug::{last_segment, parent_path};
use crate::graph::GraphView;

#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode {
	/// Hierarchy path, or the page id when two pages claim one path.
	pub path: String,
	/// Index into `GraphView::nodes`, `None` for synthesized folders and roots.
	pub page: Option<usize>,
	pub parent: Option<usize>,
	pub children: Vec<usize>,
	pub depth: usize,
}

/// A rooted tree; node 0 is the root and children are sorted by path.
#[derive(Clone, Debug, PartialEq)]
pub struct Hierarchy {
	pub nodes: Vec<TreeNode>,
}

impl Hierarchy {
	pub const ROOT: usize = 0;

	fn with_root() -> Self {
		Self {
			nodes: vec![TreeNode {
				path: String::new(),
				page: None,
				parent: None,
				children: Vec::new(),
				depth: 0,
			}],
		}
	}

	fn push(&mut self, path: String, page: Option<usize>, parent: usize) -> usize {
		let idx = self.nodes.len();
		self.nodes.push(TreeNode {
			path,
			page,
			parent: Some(parent),
			children: Vec::new(),
			depth: self.nodes[parent].depth + 1,
		});
		self.nodes[parent].children.push(idx);
		idx
	}

	/// Site hierarchy from page paths.
	///
	/// A page's parent is its path minus the last segment; `a/index` sits where
	/// `a` would. Folders with no page of their own are synthesized, and the
	/// root is the `index` page when it is in view.
	pub fn from_paths(view: &GraphView) -> Self {
		let mut tree = Self::with_root();
		let mut by_path: HashMap<String, usize> = HashMap::from([(String::new(), Self::ROOT)]);

		for (page, node) in view.nodes.iter().enumerate() {
			let path = node.id.hierarchy_path();
			match by_path.get(path).copied() {
				Some(existing) if tree.nodes[existing].page.is_none() => {
					tree.nodes[existing].page = Some(page);
				}
				Some(existing) => {
					tree.push(node.id.to_string(), Some(page), existing);
				}
				None => {
					let parent = tree.ensure_folder(parent_path(path).unwrap_or(""), &mut by_path);
					let idx = tree.push(path.to_string(), Some(page), parent);
					by_path.insert(path.to_string(), idx);
				}
			}
		}

		tree.sort_children();
		tree
	}

	/// Synthetic root with every view node as a direct child.
	pub fn flat(view: &GraphView) -> Self {
		let mut tree = Self::with_root();
		for (page, node) in view.nodes.iter().enumerate() {
			tree.push(node.id.to_string(), Some(page), Self::ROOT);
		}
		tree
	}

	fn ensure_folder(&mut self, path: &str, by_path: &mut HashMap<String, usize>) -> usize {
		if let Some(&idx) = by_path.get(path) {
			return idx;
		}
		let parent = self.ensure_folder(parent_path(path).unwrap_or(""), by_path);
		let idx = self.push(path.to_string(), None, parent);
		by_path.insert(path.to_string(), idx);
		idx
	}

	fn sort_children(&mut self) {
		for i in 0..self.nodes.len() {
			let mut children = std::mem::take(&mut self.nodes[i].children);
			children.sort_by(|&a, &b| self.nodes[a].path.cmp(&self.nodes[b].path));
			self.nodes[i].children = children;
		}
	}

	pub fn is_leaf(&self, idx: usize) -> bool {
		self.nodes[idx].children.is_empty()
	}

	/// Length of the longest root-to-leaf path.
	pub fn height(&self) -> usize {
		self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
	}

	/// Node indices with every child after its parent.
	pub fn pre_order(&self) -> Vec<usize> {
		let mut order = Vec::with_capacity(self.nodes.len());
		let mut stack = vec![Self::ROOT];
		while let Some(idx) = stack.pop() {
			order.push(idx);
			stack.extend(self.nodes[idx].children.iter().rev());
		}
		order
	}

	/// Node indices with every child before its parent.
	pub fn post_order(&self) -> Vec<usize> {
		let mut order = self.pre_order();
		order.reverse();
		order
	}

	/// Leaves from left to right.
	pub fn leaves(&self) -> Vec<usize> {
		self.pre_order()
			.into_iter()
			.filter(|&i| self.is_leaf(i))
			.collect()
	}

	/// Label for a synthesized node.
	pub fn folder_label(&self, idx: usize) -> &str {
		let path = &self.nodes[idx].path;
		if path.is_empty() { "/" } else { last_segment(path) }
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeSet;

	use super::*;
	use crate::content::{ContentIndex, PageId, PageMeta};
	use crate::graph::{Depth, TagOptions, ViewRequest};

	fn view(ids: &[&str]) -> GraphView {
		let index: ContentIndex = ids
			.iter()
			.map(|id| (PageId::new(id), PageMeta::default()))
			.collect();
		let focus = PageId::new(ids[0]);
		GraphView::build(
			&index,
			&ViewRequest {
				focus: &focus,
				depth: Depth::Unbounded,
				tags: &TagOptions::hidden(),
				visited: &BTreeSet::new(),
			},
		)
	}

	fn path_of(tree: &Hierarchy, idx: usize) -> &str {
		&tree.nodes[idx].path
	}

	#[test]
	fn index_page_becomes_root() {
		let v = view(&["index", "a", "b"]);
		let tree = Hierarchy::from_paths(&v);
		assert_eq!(tree.nodes.len(), 3);
		let root = &tree.nodes[Hierarchy::ROOT];
		assert_eq!(root.page.map(|p| v.nodes[p].id.as_str()), Some("index"));
		let children: Vec<_> = root.children.iter().map(|&c| path_of(&tree, c)).collect();
		assert_eq!(children, vec!["a", "b"]);
	}

	#[test]
	fn synthesizes_missing_folders() {
		let v = view(&["notes/rust/ownership", "notes/index"]);
		let tree = Hierarchy::from_paths(&v);
		// root, notes (page), notes/rust (folder), ownership
		assert_eq!(tree.nodes.len(), 4);
		assert!(tree.nodes[Hierarchy::ROOT].page.is_none());

		let notes = tree.nodes.iter().position(|n| n.path == "notes").unwrap();
		assert!(tree.nodes[notes].page.is_some());
		let rust = tree.nodes.iter().position(|n| n.path == "notes/rust").unwrap();
		assert!(tree.nodes[rust].page.is_none());
		assert_eq!(tree.nodes[rust].parent, Some(notes));
		assert_eq!(tree.folder_label(rust), "rust");
		assert_eq!(tree.height(), 3);
	}

	#[test]
	fn colliding_pages_nest() {
		let v = view(&["notes", "notes/index"]);
		let tree = Hierarchy::from_paths(&v);
		let notes = tree.nodes.iter().position(|n| n.path == "notes").unwrap();
		assert_eq!(tree.nodes[notes].children.len(), 1);
		let child = tree.nodes[notes].children[0];
		assert_eq!(tree.nodes[child].path, "notes/index");
		assert!(tree.nodes[child].page.is_some());
	}

	#[test]
	fn every_page_placed_once() {
		let v = view(&["a/b/c", "a/b", "x", "tags/t", "a/index"]);
		let tree = Hierarchy::from_paths(&v);
		let mut pages: Vec<_> = tree.nodes.iter().filter_map(|n| n.page).collect();
		pages.sort();
		assert_eq!(pages, (0..v.nodes.len()).collect::<Vec<_>>());
		for (i, node) in tree.nodes.iter().enumerate().skip(1) {
			let parent = node.parent.unwrap();
			assert!(tree.nodes[parent].children.contains(&i));
			assert_eq!(node.depth, tree.nodes[parent].depth + 1);
		}
	}

	#[test]
	fn flat_tree_has_one_level() {
		let v = view(&["a/b/c", "x", "y"]);
		let tree = Hierarchy::flat(&v);
		assert_eq!(tree.nodes.len(), 4);
		assert_eq!(tree.nodes[Hierarchy::ROOT].children, vec![1, 2, 3]);
		assert_eq!(tree.height(), 1);
		assert_eq!(tree.leaves(), vec![1, 2, 3]);
	}

	#[test]
	fn traversal_orders() {
		let v = view(&["a/b", "a/c", "d"]);
		let tree = Hierarchy::from_paths(&v);
		let pre = tree.pre_order();
		assert_eq!(pre[0], Hierarchy::ROOT);
		let post = tree.post_order();
		assert_eq!(*post.last().unwrap(), Hierarchy::ROOT);
		let leaves: Vec<_> = tree.leaves().iter().map(|&i| path_of(&tree, i).to_string()).collect();
		assert_eq!(leaves, vec!["a/b", "a/c", "d"]);
	}
}
