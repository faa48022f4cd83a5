//! # Solver
//!
//! Herein is the solver for WordBrain puzzles. The hints are solved strictly in
//! order. For each hint, the whole grid is searched for a word of the required
//! length, the first word found is accepted, and the grid is squeezed to
//! remove its letters before the next hint is considered. An accepted word is
//! never reconsidered, even if it prevents a later hint from being solved.

use std::{collections::HashSet, rc::Rc};

use log::{debug, trace};

use crate::{
	dictionary::Dictionary,
	grid::Grid,
	hint::Hint,
	search::{candidates, Candidate, LimitExceeded, SearchBudget, SearchLimits}
};

////////////////////////////////////////////////////////////////////////////////
//                                  Solver.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The complete context of the WordBrain solver. This permits the puzzle to be
/// solved one hint at a time, so that a caller can interleave other work (such
/// as drawing the user interface) between hints.
#[derive(Clone, Debug)]
#[must_use]
pub struct Solver
{
	/// The dictionary to use for solving the puzzle.
	dictionary: Rc<Dictionary>,

	/// The current state of the grid.
	grid: Grid,

	/// The hints, in the order that they must be solved.
	hints: Vec<Hint>,

	/// The limits on the search for each hint.
	limits: SearchLimits,

	/// Where the solver is in its run.
	phase: Phase,

	/// The outcome of each hint considered so far.
	outcomes: Vec<HintOutcome>,

	/// The grid that each hint considered so far was searched against.
	boards: Vec<Grid>
}

impl Solver
{
	/// Construct a new solver for the given puzzle. The search for each hint is
	/// unbounded.
	///
	/// # Arguments
	///
	/// * `dictionary` - The dictionary to use for solving the puzzle.
	/// * `grid` - The initial grid.
	/// * `hints` - The hints, in the order that they must be solved.
	///
	/// # Returns
	///
	/// A new solver, [idle](Phase::Idle).
	pub fn new(dictionary: Rc<Dictionary>, grid: Grid, hints: Vec<Hint>) -> Self
	{
		Self
		{
			dictionary,
			grid,
			hints,
			limits: SearchLimits::unbounded(),
			phase: Phase::Idle,
			outcomes: Vec::new(),
			boards: Vec::new()
		}
	}

	/// Limit the search for each hint.
	///
	/// # Arguments
	///
	/// * `limits` - The limits to apply to each hint individually.
	///
	/// # Returns
	///
	/// The limited solver.
	#[inline]
	pub fn with_limits(mut self, limits: SearchLimits) -> Self
	{
		self.limits = limits;
		self
	}

	/// Where the solver is in its run.
	#[inline]
	#[must_use]
	pub fn phase(&self) -> Phase { self.phase }

	/// Check if the solver is finished, i.e., every hint has been considered.
	///
	/// # Returns
	///
	/// `true` if the solver is finished, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn is_finished(&self) -> bool { self.phase == Phase::Done }

	/// Check if the solver has produced a complete solution, i.e., it is
	/// [finished](Self::is_finished) and found a word for every hint.
	#[must_use]
	pub fn is_solved(&self) -> bool
	{
		self.is_finished()
			&& self.outcomes.iter().all(|outcome| outcome.word().is_some())
	}

	/// The current state of the grid.
	#[inline]
	pub fn grid(&self) -> &Grid { &self.grid }

	/// The hints, in the order that they must be solved.
	#[inline]
	#[must_use]
	pub fn hints(&self) -> &[Hint] { &self.hints }

	/// The grid that the given hint was searched against, if the hint has been
	/// considered.
	#[inline]
	#[must_use]
	pub fn board_before(&self, hint: usize) -> Option<&Grid>
	{
		self.boards.get(hint)
	}

	/// The outcome of each hint considered so far, in hint order.
	#[inline]
	#[must_use]
	pub fn outcomes(&self) -> &[HintOutcome] { &self.outcomes }

	/// The solution so far, as one optional word per considered hint.
	#[must_use]
	pub fn solution(&self) -> Vec<Option<String>>
	{
		self.outcomes.iter()
			.map(|outcome| outcome.word().map(str::to_string))
			.collect()
	}

	/// Consider the next hint. Search the current grid for the first word of
	/// the required length and, if one is found, squeeze its letters out of the
	/// grid. If no word is found, or the search exceeds its limits, the grid is
	/// left alone. Either way, the solver moves on to the next hint.
	///
	/// # Returns
	///
	/// A 2-tuple comprising the continuation context and the outcome of the
	/// hint, respectively. The outcome is `None` only if the solver was already
	/// [finished](Self::is_finished).
	pub fn step(mut self) -> (Self, Option<HintOutcome>)
	{
		let index = match self.phase
		{
			Phase::Idle => 0,
			Phase::AppliedSqueeze(i) | Phase::NoSolution(i) => i + 1,
			Phase::SolvingHint(i) => i,
			Phase::Done =>
			{
				trace!("solver is already finished");
				return (self, None)
			}
		};
		if index >= self.hints.len()
		{
			debug!("no hints remain");
			self.phase = Phase::Done;
			return (self, None)
		}
		self.phase = Phase::SolvingHint(index);
		let length = self.hints[index].length();
		trace!("solving hint {}: {} letters", index, length);

		let outcome = {
			let budget = SearchBudget::new(self.limits);
			let first = candidates(&self.grid, &self.dictionary, &budget, length)
				.next();
			trace!(
				"hint {}: {} expansions",
				index,
				budget.expansions()
			);
			match first
			{
				Some(Ok(candidate)) => HintOutcome::Solved(candidate),
				Some(Err(e)) => HintOutcome::LimitExceeded(e),
				None => HintOutcome::NoSolution
			}
		};

		self.boards.push(self.grid.clone());
		match outcome
		{
			HintOutcome::Solved(ref candidate) =>
			{
				debug!("hint {}: found word: {}", index, candidate);
				let removed = candidate.path.iter()
					.copied()
					.collect::<HashSet<_>>();
				self.grid = self.grid.squeeze(&removed);
				self.phase = Phase::AppliedSqueeze(index);
			},
			HintOutcome::NoSolution =>
			{
				debug!("hint {}: no solution", index);
				self.phase = Phase::NoSolution(index);
			},
			HintOutcome::LimitExceeded(e) =>
			{
				debug!("hint {}: {}", index, e);
				self.phase = Phase::NoSolution(index);
			}
		}
		self.outcomes.push(outcome.clone());

		if index + 1 == self.hints.len()
		{
			debug!("considered every hint");
			self.phase = Phase::Done;
		}
		(self, Some(outcome))
	}

	/// Run the solver until every hint has been considered.
	///
	/// # Returns
	///
	/// The final context.
	pub fn solve_fully(mut self) -> Self
	{
		while !self.is_finished()
		{
			self = self.step().0;
		}
		self
	}
}

/// Solve a puzzle with unbounded searches.
///
/// # Arguments
///
/// * `grid` - The initial grid.
/// * `dictionary` - The dictionary to use for solving the puzzle.
/// * `hints` - The hints, in the order that they must be solved.
///
/// # Returns
///
/// One entry per hint, in hint order: the word accepted for the hint, or
/// `None` if the hint could not be solved.
#[must_use]
pub fn solve(
	grid: Grid,
	dictionary: Rc<Dictionary>,
	hints: Vec<Hint>
) -> Vec<Option<String>>
{
	Solver::new(dictionary, grid, hints).solve_fully().solution()
}

////////////////////////////////////////////////////////////////////////////////
//                                  Phases.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The phases of a [`Solver`] run. Each argument is the index of a hint.
///
/// ```text
/// Idle → SolvingHint(i) → { AppliedSqueeze(i) | NoSolution(i) }
///      → SolvingHint(i + 1) → … → Done
/// ```
///
/// [`Solver::step`] always comes to rest after a hint's outcome is known, so
/// `SolvingHint` is only ever observed from within a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase
{
	/// No hint has been considered yet.
	Idle,

	/// The hint is being searched for.
	SolvingHint(usize),

	/// A word was found for the hint, and its letters were removed.
	AppliedSqueeze(usize),

	/// No word was found for the hint, and the grid was left alone.
	NoSolution(usize),

	/// Every hint has been considered.
	Done
}

/// What became of a single hint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HintOutcome
{
	/// A word was found and accepted.
	Solved(Candidate),

	/// The search space was exhausted without finding a word.
	NoSolution,

	/// The search was abandoned because it exceeded its limits.
	LimitExceeded(LimitExceeded)
}

impl HintOutcome
{
	/// The accepted word, if any.
	#[inline]
	#[must_use]
	pub fn word(&self) -> Option<&str>
	{
		match self
		{
			Self::Solved(candidate) => Some(&candidate.word),
			_ => None
		}
	}

	/// The accepted candidate, if any.
	#[inline]
	#[must_use]
	pub fn candidate(&self) -> Option<&Candidate>
	{
		match self
		{
			Self::Solved(candidate) => Some(candidate),
			_ => None
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
