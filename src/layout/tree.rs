//! Unit-space tree layouts.
//!
//! Both return one `(x, y)` per hierarchy node with `x` in `[0, 1]` across the
//! breadth of the tree and `y` in `[0, 1]` from the root outwards. The
//! strategies map these onto a circle or a column.

use super::hierarchy::Hierarchy;

/// Gap between neighbours: 1 for siblings, 2 for cousins.
fn separation(tree: &Hierarchy, a: usize, b: usize) -> f64 {
	if tree.nodes[a].parent == tree.nodes[b].parent {
		1.0
	} else {
		2.0
	}
}

/// Maps raw breadth positions onto `[0, 1]`, keeping half a separation of
/// margin at each end so a radial layout does not overlap its first and last
/// leaves.
fn normalize(tree: &Hierarchy, xs: &mut [f64], left: usize, right: usize) {
	let x0 = xs[left] - separation(tree, left, right) / 2.0;
	let x1 = xs[right] + separation(tree, right, left) / 2.0;
	let span = x1 - x0;
	for x in xs.iter_mut() {
		*x = if span > 0.0 { (*x - x0) / span } else { 0.5 };
	}
}

/// Dendrogram: leaves evenly spaced and all on the outermost level, parents
/// centred over their children at a level set by their height.
pub fn cluster(tree: &Hierarchy) -> Vec<(f64, f64)> {
	let n = tree.nodes.len();
	let mut xs = vec![0.0; n];
	let mut heights = vec![0usize; n];

	let leaves = tree.leaves();
	let mut previous: Option<usize> = None;
	for &leaf in &leaves {
		xs[leaf] = match previous {
			Some(prev) => xs[prev] + separation(tree, prev, leaf),
			None => 0.0,
		};
		previous = Some(leaf);
	}

	for idx in tree.post_order() {
		let children = &tree.nodes[idx].children;
		if children.is_empty() {
			continue;
		}
		xs[idx] = children.iter().map(|&c| xs[c]).sum::<f64>() / children.len() as f64;
		heights[idx] = 1 + children.iter().map(|&c| heights[c]).max().unwrap_or(0);
	}

	let (left, right) = match (leaves.first(), leaves.last()) {
		(Some(&l), Some(&r)) => (l, r),
		_ => (Hierarchy::ROOT, Hierarchy::ROOT),
	};
	normalize(tree, &mut xs, left, right);

	let root_height = heights[Hierarchy::ROOT];
	xs.into_iter()
		.zip(heights)
		.map(|(x, h)| {
			let y = if root_height == 0 {
				0.0
			} else {
				1.0 - h as f64 / root_height as f64
			};
			(x, y)
		})
		.collect()
}

/// Left and right extents of a subtree per level, relative to its root.
#[derive(Clone, Debug, Default)]
struct Contour {
	left: Vec<f64>,
	right: Vec<f64>,
}

impl Contour {
	fn leaf() -> Self {
		Self {
			left: vec![0.0],
			right: vec![0.0],
		}
	}
}

/// Tidy tree: subtrees packed as close as their contours allow, parents
/// centred over their outermost children, `y` proportional to depth.
pub fn tidy(tree: &Hierarchy) -> Vec<(f64, f64)> {
	let n = tree.nodes.len();
	// Offset of each node from its parent.
	let mut offsets = vec![0.0; n];
	let mut contours: Vec<Contour> = vec![Contour::default(); n];

	for idx in tree.post_order() {
		let children = &tree.nodes[idx].children;
		if children.is_empty() {
			contours[idx] = Contour::leaf();
			continue;
		}

		let mut merged = std::mem::take(&mut contours[children[0]]);
		let mut placed = vec![0.0];
		for pair in children.windows(2) {
			let child = pair[1];
			let next = std::mem::take(&mut contours[child]);
			let shift = merged
				.right
				.iter()
				.zip(&next.left)
				.enumerate()
				.map(|(level, (r, l))| r - l + if level == 0 { separation(tree, pair[0], child) } else { 2.0 })
				.fold(f64::NEG_INFINITY, f64::max);
			placed.push(shift);

			for (level, (&l, &r)) in next.left.iter().zip(&next.right).enumerate() {
				if level < merged.right.len() {
					merged.right[level] = r + shift;
				} else {
					merged.left.push(l + shift);
					merged.right.push(r + shift);
				}
			}
		}

		let mid = (placed[0] + placed[placed.len() - 1]) / 2.0;
		for (&child, &x) in children.iter().zip(&placed) {
			offsets[child] = x - mid;
		}

		let mut contour = Contour::leaf();
		contour.left.extend(merged.left.iter().map(|l| l - mid));
		contour.right.extend(merged.right.iter().map(|r| r - mid));
		contours[idx] = contour;
	}

	let mut xs = vec![0.0; n];
	for idx in tree.pre_order() {
		if let Some(parent) = tree.nodes[idx].parent {
			xs[idx] = xs[parent] + offsets[idx];
		}
	}

	let pick = |better: fn(f64, f64) -> bool| {
		(0..n).fold(Hierarchy::ROOT, |best, i| if better(xs[i], xs[best]) { i } else { best })
	};
	let left = pick(|a, b| a < b);
	let right = pick(|a, b| a > b);
	normalize(tree, &mut xs, left, right);

	let height = tree.height();
	xs.into_iter()
		.enumerate()
		.map(|(i, x)| {
			let depth = tree.nodes[i].depth;
			let y = if height == 0 {
				0.0
			} else {
				depth as f64 / height as f64
			};
			(x, y)
		})
		.collect()
}
