//! # Grid
//!
//! Herein is the game board: a square grid of optional letters, where an empty
//! cell is one whose letter was consumed by an already solved word. Solving a
//! word [squeezes](Grid::squeeze) the grid, letting the letters above the
//! consumed cells fall down their columns.

use std::{
	collections::HashSet,
	error::Error,
	fmt::{self, Display, Formatter},
	str::FromStr
};

use crate::dictionary::normalize;

////////////////////////////////////////////////////////////////////////////////
//                                 Locations.                                 //
////////////////////////////////////////////////////////////////////////////////

/// The location of a cell within a [`Grid`]. The origin is the top-left
/// corner. Locations order row-major.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location
{
	/// The row, counting down from the top.
	pub row: usize,

	/// The column, counting right from the left.
	pub col: usize
}

impl Location
{
	/// Construct a new location.
	#[inline]
	pub const fn new(row: usize, col: usize) -> Self { Self { row, col } }

	/// Check whether the receiver and `other` are distinct king-move
	/// neighbors.
	#[must_use]
	pub fn is_adjacent(&self, other: &Location) -> bool
	{
		self != other
			&& self.row.abs_diff(other.row) <= 1
			&& self.col.abs_diff(other.col) <= 1
	}

	/// Offset the location by the given deltas.
	///
	/// # Returns
	///
	/// The offset location, or `None` if it would leave the first quadrant.
	fn offset(&self, dr: isize, dc: isize) -> Option<Location>
	{
		Some(Location::new(
			self.row.checked_add_signed(dr)?,
			self.col.checked_add_signed(dc)?
		))
	}
}

impl Display for Location
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		write!(f, "({}, {})", self.row, self.col)
	}
}

impl From<(usize, usize)> for Location
{
	fn from((row, col): (usize, usize)) -> Self { Self::new(row, col) }
}

/// The eight king-move directions, as `(row, column)` deltas. The order fixes
/// the order in which paths are explored.
const DIRECTIONS: [(isize, isize); 8] = [
	(-1, -1), (-1, 0), (-1, 1),
	(0, -1), (0, 1),
	(1, -1), (1, 0), (1, 1)
];

////////////////////////////////////////////////////////////////////////////////
//                                   Grid.                                    //
////////////////////////////////////////////////////////////////////////////////

/// A square grid of optional letters, stored row-major. Letters are
/// [normalized](normalize). The dimensions never change once constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct Grid
{
	/// The number of rows.
	rows: usize,

	/// The number of columns.
	cols: usize,

	/// The cells, linearized in row-major order.
	cells: Vec<Option<char>>
}

impl Grid
{
	/// Construct a grid from the given rows, top to bottom.
	///
	/// # Arguments
	///
	/// * `rows` - The rows of the grid. `None` denotes an empty cell.
	///
	/// # Returns
	///
	/// The grid.
	///
	/// # Errors
	///
	/// * [`GridError::Empty`] if there are no rows, or the rows are empty.
	/// * [`GridError::Ragged`] if the rows are not all the same length.
	/// * [`GridError::NotSquare`] if there are not as many rows as columns.
	pub fn new(rows: Vec<Vec<Option<char>>>) -> Result<Self, GridError>
	{
		let cols = rows.first().map(Vec::len).unwrap_or(0);
		if cols == 0
		{
			return Err(GridError::Empty)
		}
		if let Some((row, actual)) = rows.iter()
			.map(Vec::len)
			.enumerate()
			.find(|&(_, len)| len != cols)
		{
			return Err(GridError::Ragged { row, expected: cols, actual })
		}
		if rows.len() != cols
		{
			return Err(GridError::NotSquare { rows: rows.len(), cols })
		}
		Ok(Self
		{
			rows: rows.len(),
			cols,
			cells: rows.into_iter()
				.flatten()
				.map(|cell| cell.map(normalize))
				.collect()
		})
	}

	/// The number of rows.
	#[inline]
	#[must_use]
	pub fn rows(&self) -> usize { self.rows }

	/// The number of columns.
	#[inline]
	#[must_use]
	pub fn cols(&self) -> usize { self.cols }

	/// The total number of cells, occupied or not.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize { self.cells.len() }

	/// Always `false`, because empty grids are rejected at construction.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool { self.cells.is_empty() }

	/// The cells, linearized in row-major order.
	#[inline]
	#[must_use]
	pub fn cells(&self) -> &[Option<char>] { &self.cells }

	/// The number of cells that still hold a letter.
	#[must_use]
	pub fn occupied(&self) -> usize
	{
		self.cells.iter().filter(|cell| cell.is_some()).count()
	}

	/// Check whether every letter has been consumed.
	#[inline]
	#[must_use]
	pub fn is_cleared(&self) -> bool { self.occupied() == 0 }

	/// Check whether the location lies within the grid.
	#[inline]
	#[must_use]
	pub fn contains(&self, location: Location) -> bool
	{
		location.row < self.rows && location.col < self.cols
	}

	/// Get the content of the cell at the given location.
	///
	/// # Arguments
	///
	/// * `location` - The location of the cell.
	///
	/// # Returns
	///
	/// The letter, or `None` if the cell is empty.
	///
	/// # Errors
	///
	/// [`GridError::OutOfRange`] if the location lies outside the grid.
	pub fn get(&self, location: Location) -> Result<Option<char>, GridError>
	{
		if self.contains(location)
		{
			Ok(self.cells[self.index(location)])
		}
		else
		{
			Err(GridError::OutOfRange {
				location,
				rows: self.rows,
				cols: self.cols
			})
		}
	}

	/// Get the letter at the given location, treating locations outside the
	/// grid as empty. Only for callers that have already established bounds.
	#[inline]
	#[must_use]
	pub(crate) fn letter(&self, location: Location) -> Option<char>
	{
		self.get(location).ok().flatten()
	}

	/// Iterate over every location, in row-major order.
	pub fn locations(&self) -> impl Iterator<Item = Location>
	{
		let cols = self.cols;
		(0 .. self.rows)
			.flat_map(move |row| (0 .. cols).map(move |col| Location::new(row, col)))
	}

	/// Iterate over the in-bounds king-move neighbors of the given location,
	/// in a fixed order: up-left, up, up-right, left, right, down-left, down,
	/// down-right. Occupancy is not considered.
	pub fn neighbors(
		&self,
		location: Location
	) -> impl Iterator<Item = Location> + '_
	{
		DIRECTIONS.iter()
			.filter_map(move |&(dr, dc)| location.offset(dr, dc))
			.filter(|&neighbor| self.contains(neighbor))
	}

	/// Remove the letters at the given locations and let gravity act on the
	/// affected columns: within each column that lost a letter, the surviving
	/// letters keep their top-to-bottom order but settle at the bottom, with
	/// the empty cells on top. Columns that lost nothing are left exactly as
	/// they were, so squeezing with no removals answers an equal grid.
	///
	/// Locations outside the grid are ignored.
	///
	/// # Arguments
	///
	/// * `removed` - The locations of the consumed cells.
	///
	/// # Returns
	///
	/// The squeezed grid.
	pub fn squeeze(&self, removed: &HashSet<Location>) -> Grid
	{
		let mut squeezed = self.clone();
		for col in 0 .. self.cols
		{
			if !(0 .. self.rows).any(|row| removed.contains(&Location::new(row, col)))
			{
				continue
			}
			let survivors = (0 .. self.rows)
				.map(|row| Location::new(row, col))
				.filter(|location| !removed.contains(location))
				.filter_map(|location| self.cells[self.index(location)])
				.collect::<Vec<_>>();
			let gap = self.rows - survivors.len();
			for row in 0 .. self.rows
			{
				let index = self.index(Location::new(row, col));
				squeezed.cells[index] =
					if row < gap { None }
					else { Some(survivors[row - gap]) };
			}
		}
		squeezed
	}

	/// Compute the linear index of an in-bounds location.
	#[inline]
	#[must_use]
	fn index(&self, location: Location) -> usize
	{
		location.row * self.cols + location.col
	}
}

impl Display for Grid
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		for (row, cells) in self.cells.chunks(self.cols).enumerate()
		{
			if row > 0
			{
				writeln!(f)?;
			}
			for (col, cell) in cells.iter().enumerate()
			{
				if col > 0
				{
					write!(f, " ")?;
				}
				write!(f, "{}", cell.unwrap_or('.'))?;
			}
		}
		Ok(())
	}
}

impl FromStr for Grid
{
	type Err = GridError;

	/// Parse a board. Each non-blank line is a row; whitespace within a line is
	/// ignored. Alphabetic characters are letters, and any of `.`, `_`, `-`,
	/// and `?` is an empty cell.
	fn from_str(s: &str) -> Result<Self, Self::Err>
	{
		let rows = s.lines()
			.filter(|line| !line.trim().is_empty())
			.enumerate()
			.map(|(row, line)| {
				line.chars()
					.filter(|c| !c.is_whitespace())
					.enumerate()
					.map(|(col, c)| match c
					{
						c if c.is_alphabetic() => Ok(Some(c)),
						'.' | '_' | '-' | '?' => Ok(None),
						found => Err(GridError::InvalidCell { row, col, found })
					})
					.collect::<Result<Vec<_>, _>>()
			})
			.collect::<Result<Vec<_>, _>>()?;
		Grid::new(rows)
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                  Errors.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The complete enumeration of [`Grid`] errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridError
{
	/// The grid has no cells.
	Empty,

	/// A row differs in length from the first row.
	Ragged
	{
		/// The offending row.
		row: usize,

		/// The length of the first row.
		expected: usize,

		/// The length of the offending row.
		actual: usize
	},

	/// The grid is rectangular but not square.
	NotSquare
	{
		/// The number of rows.
		rows: usize,

		/// The number of columns.
		cols: usize
	},

	/// A board description contains a character that is neither a letter nor
	/// an empty-cell marker.
	InvalidCell
	{
		/// The row of the character.
		row: usize,

		/// The column of the character, ignoring whitespace.
		col: usize,

		/// The offending character.
		found: char
	},

	/// A location lies outside the grid.
	OutOfRange
	{
		/// The offending location.
		location: Location,

		/// The number of rows.
		rows: usize,

		/// The number of columns.
		cols: usize
	}
}

impl Display for GridError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Empty => write!(f, "grid has no cells"),
			Self::Ragged { row, expected, actual } => write!(
				f,
				"row {} has {} cells, but row 0 has {}",
				row, actual, expected
			),
			Self::NotSquare { rows, cols } =>
				write!(f, "grid is {}×{}, but must be square", rows, cols),
			Self::InvalidCell { row, col, found } => write!(
				f,
				"invalid cell {:?} at row {}, column {}",
				found, row, col
			),
			Self::OutOfRange { location, rows, cols } => write!(
				f,
				"location {} is outside the {}×{} grid",
				location, rows, cols
			)
		}
	}
}

impl Error for GridError {}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use std::collections::HashSet;

	use crate::grid::{Grid, GridError, Location};

	/// Build a set of locations from coordinate pairs.
	fn locations(pairs: &[(usize, usize)]) -> HashSet<Location>
	{
		pairs.iter().copied().map(Location::from).collect()
	}

	/// Ensure that construction rejects malformed input.
	#[test]
	fn test_new_rejects_malformed()
	{
		assert_eq!(Grid::new(vec![]), Err(GridError::Empty));
		assert_eq!(Grid::new(vec![vec![]]), Err(GridError::Empty));
		assert_eq!(
			Grid::new(vec![vec![Some('a'), None], vec![Some('b')]]),
			Err(GridError::Ragged { row: 1, expected: 2, actual: 1 })
		);
		assert_eq!(
			Grid::new(vec![vec![Some('a'), Some('b')]]),
			Err(GridError::NotSquare { rows: 1, cols: 2 })
		);
	}

	/// Ensure that letters are normalized and reads are bounds-checked.
	#[test]
	fn test_get()
	{
		let grid = Grid::new(vec![
			vec![Some('a'), None],
			vec![Some('C'), Some('t')]
		]).unwrap();
		assert_eq!(grid.rows(), 2);
		assert_eq!(grid.cols(), 2);
		assert_eq!(grid.get(Location::new(0, 0)), Ok(Some('A')));
		assert_eq!(grid.get(Location::new(0, 1)), Ok(None));
		assert_eq!(grid.get(Location::new(1, 1)), Ok(Some('T')));
		assert_eq!(
			grid.get(Location::new(2, 0)),
			Err(GridError::OutOfRange {
				location: Location::new(2, 0),
				rows: 2,
				cols: 2
			})
		);
		assert!(grid.get(Location::new(0, 2)).is_err());
		assert_eq!(grid.occupied(), 3);
		assert!(!grid.is_cleared());
	}

	/// Ensure that boards parse from, and render to, text.
	#[test]
	fn test_parse_and_display()
	{
		let grid = "\n c a t\n D.g\n\n_ - ?\n".parse::<Grid>().unwrap();
		assert_eq!(grid.to_string(), "C A T\nD . G\n. . .");
		assert_eq!(grid.to_string().parse::<Grid>().unwrap(), grid);
		assert_eq!(
			"ab\nc1".parse::<Grid>(),
			Err(GridError::InvalidCell { row: 1, col: 1, found: '1' })
		);
		assert_eq!(
			"abc\nab".parse::<Grid>(),
			Err(GridError::Ragged { row: 1, expected: 3, actual: 2 })
		);
		assert_eq!("".parse::<Grid>(), Err(GridError::Empty));
	}

	/// Ensure that locations are visited in row-major order, and that
	/// neighbors are the in-bounds king moves in a fixed order.
	#[test]
	fn test_locations_and_neighbors()
	{
		let grid = "abc\ndef\nghi".parse::<Grid>().unwrap();
		let all = grid.locations().collect::<Vec<_>>();
		assert_eq!(all.len(), 9);
		assert_eq!(all[0], Location::new(0, 0));
		assert_eq!(all[1], Location::new(0, 1));
		assert_eq!(all[3], Location::new(1, 0));
		assert!(all.windows(2).all(|w| w[0] < w[1]));
		let corner = grid.neighbors(Location::new(0, 0)).collect::<Vec<_>>();
		assert_eq!(
			corner,
			vec![Location::new(0, 1), Location::new(1, 0), Location::new(1, 1)]
		);
		let center = grid.neighbors(Location::new(1, 1)).collect::<Vec<_>>();
		assert_eq!(center.len(), 8);
		assert_eq!(center[0], Location::new(0, 0));
		assert_eq!(center[7], Location::new(2, 2));
		assert!(center.iter().all(|n| n.is_adjacent(&Location::new(1, 1))));
	}

	/// Ensure that adjacency is exactly the king move.
	#[test]
	fn test_is_adjacent()
	{
		let origin = Location::new(1, 1);
		assert!(!origin.is_adjacent(&origin));
		assert!(origin.is_adjacent(&Location::new(0, 0)));
		assert!(origin.is_adjacent(&Location::new(2, 1)));
		assert!(!origin.is_adjacent(&Location::new(3, 1)));
		assert!(!origin.is_adjacent(&Location::new(1, 3)));
	}

	/// Squeezing with nothing removed answers an equal grid, even if the grid
	/// has holes.
	#[test]
	fn test_squeeze_nothing()
	{
		let grid = "a.c\n.e.\ngh.".parse::<Grid>().unwrap();
		assert_eq!(grid.squeeze(&HashSet::new()), grid);
	}

	/// The canonical gravity example: removing the middle of `[A, B, C]`
	/// answers `[empty, A, C]`.
	#[test]
	fn test_squeeze_column()
	{
		let grid = "a..\nb..\nc..".parse::<Grid>().unwrap();
		let squeezed = grid.squeeze(&locations(&[(1, 0)]));
		assert_eq!(squeezed.get(Location::new(0, 0)), Ok(None));
		assert_eq!(squeezed.get(Location::new(1, 0)), Ok(Some('A')));
		assert_eq!(squeezed.get(Location::new(2, 0)), Ok(Some('C')));
		assert_eq!(squeezed.rows(), 3);
		assert_eq!(squeezed.cols(), 3);
	}

	/// Columns are squeezed independently, and untouched columns stay put.
	#[test]
	fn test_squeeze_columns_independently()
	{
		let grid = "abcd\nefgh\nijkl\nmnop".parse::<Grid>().unwrap();
		let squeezed = grid.squeeze(&locations(&[
			(3, 0), (2, 1), (1, 1), (0, 2)
		]));
		assert_eq!(
			squeezed.to_string(),
			". . . D\n\
			 A . G H\n\
			 E B K L\n\
			 I N O P"
		);
	}

	/// Letters below an existing hole do not move when the column is not
	/// squeezed, but settle when it is.
	#[test]
	fn test_squeeze_settles_existing_holes()
	{
		let grid = "ab\n.c".parse::<Grid>().unwrap();
		let squeezed = grid.squeeze(&locations(&[(1, 1)]));
		assert_eq!(squeezed.to_string(), "A .\n. B");
	}

	/// Out-of-range removals are ignored.
	#[test]
	fn test_squeeze_ignores_out_of_range()
	{
		let grid = "ab\ncd".parse::<Grid>().unwrap();
		assert_eq!(grid.squeeze(&locations(&[(5, 0), (0, 9)])), grid);
		let squeezed = grid.squeeze(&locations(&[(5, 0), (1, 0)]));
		assert_eq!(squeezed.to_string(), ". B\nA D");
	}

	/// Removing everything clears the grid.
	#[test]
	fn test_squeeze_everything()
	{
		let grid = "ab\ncd".parse::<Grid>().unwrap();
		let all = grid.locations().collect::<HashSet<_>>();
		let squeezed = grid.squeeze(&all);
		assert!(squeezed.is_cleared());
		assert_eq!(squeezed.len(), 4);
	}
}
