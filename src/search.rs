//! # Path search
//!
//! Herein is the breadth-first exploration of letter paths through a [`Grid`].
//! From a single starting cell, a [`PathSearch`] grows a tree of paths, each
//! extending its parent by one king move onto an unused, occupied cell. A branch survives only while its letters remain a prefix in
//! the [`Dictionary`], and a path is reported as a [`Candidate`] when it
//! reaches the required length and spells a whole word.
//!
//! The search space is exponential in the required length, so all searches
//! for a single hint draw on a shared [`SearchBudget`]. The default budget is
//! unbounded; a bounded budget that runs dry is reported as [`LimitExceeded`].

use std::{
	cell::Cell,
	collections::VecDeque,
	error::Error,
	fmt::{self, Display, Formatter},
	time::{Duration, Instant}
};

use log::trace;

use crate::{
	dictionary::{Dictionary, NodeId},
	grid::{Grid, Location}
};

////////////////////////////////////////////////////////////////////////////////
//                                  Budgets.                                  //
////////////////////////////////////////////////////////////////////////////////

/// Optional ceilings on the work performed to solve a single hint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchLimits
{
	/// The maximum number of path expansions. `None` means unbounded.
	pub max_expansions: Option<u64>,

	/// The maximum wall-clock time. `None` means unbounded.
	pub time_limit: Option<Duration>
}

impl SearchLimits
{
	/// No limits at all. Same as [`Default::default`].
	#[inline]
	#[must_use]
	pub const fn unbounded() -> Self
	{
		Self { max_expansions: None, time_limit: None }
	}
}

/// The running account of the work performed against some [`SearchLimits`].
/// The account uses interior mutability, so that it can be shared by the
/// searches of every starting cell.
#[derive(Debug)]
pub struct SearchBudget
{
	/// The limits to enforce.
	limits: SearchLimits,

	/// When the budget was opened.
	started: Instant,

	/// The number of expansions charged so far.
	expansions: Cell<u64>
}

impl SearchBudget
{
	/// Open a new budget. The clock starts now.
	#[must_use]
	pub fn new(limits: SearchLimits) -> Self
	{
		Self { limits, started: Instant::now(), expansions: Cell::new(0) }
	}

	/// Open a budget without limits.
	#[inline]
	#[must_use]
	pub fn unbounded() -> Self { Self::new(SearchLimits::unbounded()) }

	/// The number of expansions charged so far.
	#[inline]
	#[must_use]
	pub fn expansions(&self) -> u64 { self.expansions.get() }

	/// Charge a single expansion against the budget.
	///
	/// # Errors
	///
	/// [`LimitExceeded`] if the expansion would exceed either limit. Nothing is
	/// charged in that case.
	pub fn charge(&self) -> Result<(), LimitExceeded>
	{
		let next = self.expansions.get() + 1;
		if let Some(max) = self.limits.max_expansions
		{
			if next > max
			{
				return Err(LimitExceeded::Expansions(max))
			}
		}
		if let Some(limit) = self.limits.time_limit
		{
			if self.started.elapsed() >= limit
			{
				return Err(LimitExceeded::Time(limit))
			}
		}
		self.expansions.set(next);
		Ok(())
	}
}

/// A [`SearchBudget`] ran dry before the search space was exhausted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LimitExceeded
{
	/// The maximum number of expansions was reached.
	Expansions(u64),

	/// The time limit elapsed.
	Time(Duration)
}

impl Display for LimitExceeded
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Expansions(max) =>
				write!(f, "search exceeded {} expansions", max),
			Self::Time(limit) =>
				write!(f, "search exceeded time limit of {:?}", limit)
		}
	}
}

impl Error for LimitExceeded {}

////////////////////////////////////////////////////////////////////////////////
//                                Candidates.                                 //
////////////////////////////////////////////////////////////////////////////////

/// A dictionary word of the required length, together with the simple path of
/// grid cells that spells it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct Candidate
{
	/// The normalized word.
	pub word: String,

	/// The path, from the first letter to the last.
	pub path: Vec<Location>
}

impl Display for Candidate
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		write!(f, "{}", self.word)?;
		for (index, location) in self.path.iter().enumerate()
		{
			let arrow = if index == 0 { " " } else { " → " };
			write!(f, "{}{}", arrow, location)?;
		}
		Ok(())
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                Path search.                                //
////////////////////////////////////////////////////////////////////////////////

/// The index of a [`SearchPath`] within its [`PathSearch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct PathId(usize);

/// A node in the exploration tree of a [`PathSearch`]. The chain of parents
/// back to the root visits strictly distinct locations.
#[derive(Clone, Debug)]
struct SearchPath
{
	/// The letters along the path so far.
	value_so_far: String,

	/// The number of cells on the path.
	depth: usize,

	/// The last cell on the path.
	location: Location,

	/// The path that this one extends, if any.
	parent: Option<PathId>,

	/// The surviving extensions of this path, in discovery order.
	children: Vec<PathId>,

	/// The dictionary node for `value_so_far`.
	node: NodeId
}

#[cfg(test)]
impl SearchPath
{
	fn value_so_far(&self) -> &str { &self.value_so_far }

	fn depth(&self) -> usize { self.depth }

	fn parent(&self) -> Option<PathId> { self.parent }

	fn children(&self) -> &[PathId] { &self.children }
}

/// The breadth-first search for words along paths that begin at a single
/// starting cell. A `PathSearch` is an [`Iterator`] over the [`Candidate`]s it
/// discovers, in discovery order. If the shared [`SearchBudget`] runs dry, the
/// iterator answers a single [`LimitExceeded`] and then stops.
#[derive(Debug)]
pub struct PathSearch<'a>
{
	/// The grid to search.
	grid: &'a Grid,

	/// The dictionary to prune and accept against.
	dictionary: &'a Dictionary,

	/// The budget to charge expansions against.
	budget: &'a SearchBudget,

	/// The number of letters of an acceptable word.
	required_length: usize,

	/// The arena of paths. The first, if any, is the root.
	paths: Vec<SearchPath>,

	/// The paths awaiting consideration.
	queue: VecDeque<PathId>,

	/// Whether the budget has run dry.
	is_exhausted: bool
}

impl<'a> PathSearch<'a>
{
	/// Prepare a search from the given starting cell. The root path is only
	/// seeded if the starting cell holds a letter that begins some word, and
	/// only if a word of the required length could fit on the grid at all.
	///
	/// # Arguments
	///
	/// * `grid` - The grid to search.
	/// * `dictionary` - The dictionary to prune and accept against.
	/// * `budget` - The budget to charge expansions against.
	/// * `start` - The starting cell.
	/// * `required_length` - The number of letters of an acceptable word.
	///
	/// # Returns
	///
	/// The prepared search.
	pub fn new(
		grid: &'a Grid,
		dictionary: &'a Dictionary,
		budget: &'a SearchBudget,
		start: Location,
		required_length: usize
	) -> Self
	{
		let mut search = Self
		{
			grid,
			dictionary,
			budget,
			required_length,
			paths: Vec::new(),
			queue: VecDeque::new(),
			is_exhausted: false
		};
		if required_length == 0 || required_length > grid.occupied()
		{
			return search
		}
		if let Some(letter) = grid.letter(start)
		{
			if let Some(node) = dictionary.step(NodeId::ROOT, letter)
			{
				search.push(SearchPath
				{
					value_so_far: letter.to_string(),
					depth: 1,
					location: start,
					parent: None,
					children: Vec::new(),
					node
				});
			}
		}
		search
	}

	/// Get the path with the given identifier, which must have been issued by
	/// this search.
	#[inline]
	fn path(&self, id: PathId) -> &SearchPath { &self.paths[id.0] }

	/// The root of the exploration tree, if the search was seeded.
	#[cfg(test)]
	fn root(&self) -> Option<PathId>
	{
		(!self.paths.is_empty()).then_some(PathId(0))
	}

	/// The number of paths created so far, including the root.
	#[cfg(test)]
	fn explored(&self) -> usize { self.paths.len() }

	/// The locations of the given path, from the root to the path itself.
	#[must_use]
	fn locations(&self, id: PathId) -> Vec<Location>
	{
		let mut locations = Vec::with_capacity(self.path(id).depth);
		let mut current = Some(id);
		while let Some(id) = current
		{
			let path = self.path(id);
			locations.push(path.location);
			current = path.parent;
		}
		locations.reverse();
		locations
	}

	/// Check whether the given path, or any of its ancestors, ends at the given
	/// location.
	#[must_use]
	fn has_visited(&self, id: PathId, location: Location) -> bool
	{
		let mut current = Some(id);
		while let Some(id) = current
		{
			let path = self.path(id);
			if path.location == location
			{
				return true
			}
			current = path.parent;
		}
		false
	}

	/// Add a path to the arena, link it to its parent, and enqueue it.
	fn push(&mut self, path: SearchPath) -> PathId
	{
		let id = PathId(self.paths.len());
		if let Some(parent) = path.parent
		{
			self.paths[parent.0].children.push(id);
		}
		self.paths.push(path);
		self.queue.push_back(id);
		id
	}

	/// Extend the given path onto every eligible neighbor whose letter keeps
	/// the path a dictionary prefix.
	fn expand(&mut self, id: PathId)
	{
		let grid = self.grid;
		let dictionary = self.dictionary;
		let (location, node, depth) = {
			let path = self.path(id);
			(path.location, path.node, path.depth)
		};
		for neighbor in grid.neighbors(location)
		{
			let Some(letter) = grid.letter(neighbor) else { continue };
			if self.has_visited(id, neighbor)
			{
				continue
			}
			let Some(next) = dictionary.step(node, letter) else { continue };
			let mut value_so_far = self.path(id).value_so_far.clone();
			value_so_far.push(letter);
			self.push(SearchPath
			{
				value_so_far,
				depth: depth + 1,
				location: neighbor,
				parent: Some(id),
				children: Vec::new(),
				node: next
			});
		}
	}
}

impl Iterator for PathSearch<'_>
{
	type Item = Result<Candidate, LimitExceeded>;

	fn next(&mut self) -> Option<Self::Item>
	{
		if self.is_exhausted
		{
			return None
		}
		while let Some(id) = self.queue.pop_front()
		{
			let path = self.path(id);
			if path.depth == self.required_length
			{
				if self.dictionary.node(path.node).is_whole_word()
				{
					trace!("candidate: {}", path.value_so_far);
					return Some(Ok(Candidate
					{
						word: self.dictionary.word(path.node),
						path: self.locations(id)
					}))
				}
				// Long enough, but not a word. Extending it would only
				// overshoot.
				continue
			}
			if let Err(e) = self.budget.charge()
			{
				trace!("budget exhausted at: {}", path.value_so_far);
				self.is_exhausted = true;
				self.queue.clear();
				return Some(Err(e))
			}
			self.expand(id);
		}
		None
	}
}

/// Search the whole grid for words of the required length. Starting cells are
/// taken in row-major order, and each is searched breadth-first, so the first
/// candidate answered is the one a solver should accept.
///
/// # Arguments
///
/// * `grid` - The grid to search.
/// * `dictionary` - The dictionary to prune and accept against.
/// * `budget` - The budget shared by every starting cell.
/// * `required_length` - The number of letters of an acceptable word.
///
/// # Returns
///
/// A lazy iterator over the candidates. Once the budget runs dry, every
/// subsequent starting cell answers [`LimitExceeded`], so callers should stop
/// at the first error.
pub fn candidates<'a>(
	grid: &'a Grid,
	dictionary: &'a Dictionary,
	budget: &'a SearchBudget,
	required_length: usize
) -> impl Iterator<Item = Result<Candidate, LimitExceeded>> + 'a
{
	grid.locations().flat_map(move |start| {
		PathSearch::new(grid, dictionary, budget, start, required_length)
	})
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
