//! # WordBrain Solver
//!
//! WordBrain is a word puzzle game played on a square grid of letters. The
//! player is given a sequence of hints, each revealing only the length of a
//! hidden word. A word is entered by tracing a path through adjacent cells,
//! horizontally, vertically, or diagonally, without reusing a cell. Once a word
//! is found, its letters vanish and the letters above them fall down to fill
//! the gaps, so the order in which the words are found matters.
//!
//! This library solves such puzzles hint by hint: a [`Dictionary`] prunes a
//! breadth-first [search](search) through the [`Grid`], and the [`Solver`]
//! accepts the first word of each hint's length before squeezing the grid.
//!
//! [`Dictionary`]: dictionary::Dictionary
//! [`Grid`]: grid::Grid
//! [`Solver`]: solver::Solver

pub mod dictionary;
pub mod grid;
pub mod hint;
pub mod search;
pub mod solver;
