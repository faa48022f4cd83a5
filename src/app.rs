//! # Application
//!
//! The application state and logic, including the text-based user interface
//! (TUI).

use std::{io, mem::swap, rc::Rc, time::{Duration, Instant}};

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, warn};
use ratatui::{
	buffer::Buffer, layout::{Alignment, Constraint, Direction, Layout, Rect},
	style::{Color, Style, Stylize},
	widgets::{
		block::{Position, Title},
		Block, BorderType, Borders, List, ListState, Paragraph,
		StatefulWidget, Widget
	},
	Frame
};
use wordbrain_solver::{
	dictionary::{normalize, Dictionary},
	grid::{Grid, Location},
	hint::Hint,
	search::SearchLimits,
	solver::{HintOutcome, Solver}
};

use crate::tui::Tui;

////////////////////////////////////////////////////////////////////////////////
//                                Application.                                //
////////////////////////////////////////////////////////////////////////////////

/// The application state.
#[must_use]
pub struct App
{
	/// Whether the application is running.
	state: ExecutionState,

	/// How long (in ms) to highlight an individual word in the TUI.
	highlight_duration_ms: u64,

	/// The dictionary to use for solving the puzzle.
	dictionary: Rc<Dictionary>,

	/// The limits on the search for each hint.
	limits: SearchLimits,

	/// The number of rows, and also of columns, of the board.
	size: u8,

	/// The coordinates of the cursor. The first element is X, which
	/// corresponds to the column, and the second element is Y, which
	/// corresponds to the row. The origin is the top-left corner.
	cursor: (u8, u8),

	/// The content of the board, linearized in row-major order.
	cells: Vec<Option<char>>,

	/// The hints, in the order that they must be solved.
	hints: Vec<Hint>
}

// Public interface.
impl App
{
	/// Create a new application state.
	///
	/// # Arguments
	///
	/// * `size` - The number of rows, and also of columns, of the board.
	/// * `highlight_duration_ms` - How long (in ms) to highlight an individual
	///   word in the TUI.
	/// * `limits` - The limits on the search for each hint.
	/// * `dictionary` - The dictionary to use for solving the puzzle.
	///
	/// # Returns
	///
	/// The new application state.
	#[inline]
	pub fn new(
		size: u8,
		highlight_duration_ms: u64,
		limits: SearchLimits,
		dictionary: Dictionary
	) -> Self
	{
		Self {
			state: ExecutionState::Populating,
			highlight_duration_ms,
			dictionary: Rc::new(dictionary),
			limits,
			size,
			cursor: (0, 0),
			cells: vec![None; size as usize * size as usize],
			hints: Vec::new()
		}
	}

	/// Run the application. This amounts to:
	///
	/// * Running any background tasks, such as the solver or the highlighter.
	/// * Rendering the application frame.
	/// * Processing events.
	///
	/// # Arguments
	///
	/// * `tui` - The text-based user interface (TUI).
	///
	/// # Returns
	///
	/// The outcome of every hint that the solver considered before the user
	/// exited.
	///
	/// # Errors
	///
	/// Any error that occurs while running the application.
	pub fn run(mut self, tui: &mut Tui) -> io::Result<Vec<HintOutcome>>
	{
		while self.is_running()
		{
			self.process_systems();
			tui.draw(|frame| self.render_frame(frame))?;
			self.process_event()?;
		}
		match self.state
		{
			ExecutionState::Exiting { outcomes } => Ok(outcomes),
			_ => Ok(vec![])
		}
	}

	/// Check if the application is running.
	///
	/// # Returns
	///
	/// `true` if the application is running, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn is_running(&self) -> bool
	{
		!matches!(self.state, ExecutionState::Exiting { .. })
	}
}

// Private implementation details.
impl App
{
	/// Move the cursor by the given deltas, saturating at the edges of the
	/// board.
	///
	/// # Arguments
	///
	/// * `dx` - The change in the X-coordinate.
	/// * `dy` - The change in the Y-coordinate.
	fn move_cursor(&mut self, dx: i8, dy: i8)
	{
		let size = self.size as i16;
		let x = self.cursor.0 as i16 + dx as i16;
		let y = self.cursor.1 as i16 + dy as i16;
		if (0..size).contains(&x) && (0..size).contains(&y)
		{
			self.cursor = (x as u8, y as u8);
		}
	}

	/// Move the cursor by the given index delta, saturating at the ends of the
	/// board. This supports tabbing through the cells.
	///
	/// # Arguments
	///
	/// * `di` - The change in the cell index.
	fn move_index(&mut self, di: i8)
	{
		let size = self.size as i16;
		let new_index = self.current_index() as i16 + di as i16;
		if (0..size * size).contains(&new_index)
		{
			self.cursor = ((new_index % size) as u8, (new_index / size) as u8);
		}
	}

	/// Get the index of the current cell.
	///
	/// # Returns
	///
	/// The index of the current cell.
	#[inline]
	#[must_use]
	fn current_index(&self) -> usize
	{
		self.cursor.1 as usize * self.size as usize + self.cursor.0 as usize
	}

	/// Get the content of the current cell.
	#[inline]
	#[must_use]
	#[cfg(test)]
	fn current_cell(&self) -> Option<char>
	{
		self.cells[self.current_index()]
	}

	/// Fill the current cell with the given letter, then advance the cursor.
	///
	/// # Arguments
	///
	/// * `c` - The letter.
	fn fill(&mut self, c: char)
	{
		let index = self.current_index();
		self.cells[index] = Some(normalize(c));
		self.move_index(1);
	}

	/// Empty the current cell.
	fn clear(&mut self)
	{
		let index = self.current_index();
		self.cells[index] = None;
	}

	/// Empty every cell.
	fn clear_all(&mut self)
	{
		self.cells.iter_mut().for_each(|cell| *cell = None);
	}

	/// Append a hint for a word of the given length.
	///
	/// # Arguments
	///
	/// * `length` - The number of letters of the hidden word.
	fn push_hint(&mut self, length: usize)
	{
		self.hints.push(Hint::new(length));
	}

	/// Remove the last hint, if any.
	fn pop_hint(&mut self)
	{
		self.hints.pop();
	}

	/// Move the hint index. If nothing is highlighted, use the sign of the
	/// change to determine which end of the outcome list to start from, i.e.,
	/// positive for the beginning and negative for the end.
	///
	/// If the change would move the index out of bounds, remove the highlight.
	///
	/// # Arguments
	///
	/// * `di` - The change in the hint index.
	fn move_hint_index(&mut self, di: isize)
	{
		if let ExecutionState::Finished { ref solver, ref mut highlight } = self.state
		{
			let count = solver.outcomes().len();
			*highlight = match *highlight
			{
				Some(index) => index.checked_add_signed(di)
					.filter(|i| *i < count),
				None if di > 0 => (di as usize).checked_sub(1)
					.filter(|i| *i < count),
				None if di < 0 => count.checked_sub(di.unsigned_abs()),
				None => None
			};
		}
	}

	/// Render the application frame.
	///
	/// # Arguments
	///
	/// * `frame` - The target frame.
	fn render_frame(&self, frame: &mut Frame)
	{
		frame.render_widget(self, frame.area());
	}

	/// Split the screen into the puzzle area, the rows of the board, and the
	/// hint area.
	///
	/// # Arguments
	///
	/// * `area` - The whole screen.
	///
	/// # Returns
	///
	/// A 3-tuple comprising the puzzle area, the row areas (top to bottom), and
	/// the hint area, respectively.
	fn layout(&self, area: Rect) -> (Rect, Vec<Rect>, Rect)
	{
		let outer = Layout::default()
			.direction(Direction::Horizontal)
			.margin(1)
			.constraints([
				Constraint::Percentage(100),
				Constraint::Min(24)
			])
			.split(area);
		// Center the rows vertically.
		let constraints = [Constraint::Ratio(1, 3)].into_iter()
			.chain((0..self.size).map(|_| Constraint::Length(3)))
			.chain([Constraint::Ratio(1, 3)])
			.collect::<Vec<_>>();
		let board = Layout::default()
			.direction(Direction::Vertical)
			.margin(3)
			.constraints(constraints)
			.split(outer[0]);
		let rows = board[1 ..= self.size as usize].to_vec();
		(outer[0], rows, outer[1])
	}

	/// Render the board.
	///
	/// # Arguments
	///
	/// * `area` - The puzzle area.
	/// * `rows` - The row areas.
	/// * `buf` - The target buffer.
	/// * `cells` - The content of the board, in row-major order.
	/// * `path` - The path to highlight, possibly empty.
	/// * `cursor` - The index of the cell under the cursor, if any.
	fn render_board(
		&self,
		area: Rect,
		rows: &[Rect],
		buf: &mut Buffer,
		cells: &[Option<char>],
		path: &[Location],
		cursor: Option<usize>
	) {
		let mut block = Block::default()
			.borders(Borders::ALL)
			.border_style(Style::default().fg(Color::White))
			.title(
				Title::default()
					.content("Puzzle")
					.position(Position::Top)
					.alignment(Alignment::Center)
			)
			.title(
				Title::default()
					.content("⎋ – exit".yellow().bold())
					.position(Position::Top)
					.alignment(Alignment::Left)
			);
		if cursor.is_some()
		{
			block = block
				.title(
					Title::default()
						.content("↵ – solve".green().bold())
						.position(Position::Top)
						.alignment(Alignment::Right)
				)
				.title(
					Title::default()
						.content(
							"\
								←↑↓→ - move \
								⇥ - next \
								⇧⇥ - previous \
								A-Z - edit \
								⌦ - clear \
								1-9 - add hint \
								- - drop hint\
							".cyan()
						)
						.position(Position::Bottom)
						.alignment(Alignment::Center)
				);
		}
		block.render(area, buf);
		let size = self.size as usize;
		let cells = cells.iter().enumerate()
			.map(|(index, cell)| {
				let letter = cell.map(String::from).unwrap_or_default();
				let step = path.iter()
					.position(|l| l.row * size + l.col == index);
				let border_color =
					if step.is_some() { Color::Black }
					else if cursor.is_some() && cell.is_none() { Color::Red }
					else { Color::White };
				let block = Block::new()
					.border_type(BorderType::Rounded)
					.borders(Borders::ALL)
					.border_style(Style::default().fg(border_color));
				let (label, style) = match step
				{
					Some(step) => (
						format!("{} {}", step + 1, letter),
						Style::default().fg(Color::Black).bg(Color::Green)
					),
					None if cursor == Some(index) => (
						letter,
						Style::default().fg(Color::Black).bg(Color::Cyan)
					),
					None => (letter, Style::default())
				};
				Paragraph::new(label)
					.block(block)
					.alignment(Alignment::Center)
					.style(style)
			})
			.collect::<Vec<_>>();
		cells.chunks_exact(size).zip(rows)
			.for_each(|(chunk, row)| {
				let columns = Layout::default()
					.direction(Direction::Horizontal)
					.constraints(vec![Constraint::Min(7); size])
					.split(*row);
				for (column, cell) in chunk.iter().enumerate()
				{
					cell.render(columns[column], buf);
				}
			});
	}

	/// Render the hint list, with the outcome of each hint considered so far.
	///
	/// # Arguments
	///
	/// * `area` - The hint area.
	/// * `buf` - The target buffer.
	/// * `outcomes` - The outcomes so far.
	/// * `highlight` - The index of the hint to highlight, if any.
	/// * `browsing` - Whether the user can move the highlight.
	fn render_hints(
		&self,
		area: Rect,
		buf: &mut Buffer,
		outcomes: &[HintOutcome],
		highlight: Option<usize>,
		browsing: bool
	) {
		let lines = self.hints.iter().enumerate()
			.map(|(index, hint)| match outcomes.get(index)
			{
				None => format!("{:>2}. {}", index + 1, hint),
				Some(outcome) => format!(
					"{:>2}. {} → {}",
					index + 1,
					hint,
					outcome.word().unwrap_or("-")
				)
			})
			.collect::<Vec<_>>();
		let mut block = Block::default()
			.borders(Borders::ALL)
			.title(
				Title::default()
					.content("Hints")
					.alignment(Alignment::Center)
			);
		if browsing
		{
			block = block.title(
				Title::default()
					.content("↑↓ - move".cyan())
					.position(Position::Bottom)
					.alignment(Alignment::Center)
			);
		}
		let mut list_state = ListState::default();
		list_state.select(highlight);
		let list = List::new(lines)
			.block(block)
			.style(Style::default().fg(Color::White))
			.highlight_style(
				Style::default()
					.fg(Color::Black)
					.bg(if browsing { Color::Cyan } else { Color::Green })
			);
		StatefulWidget::render(&list, area, buf, &mut list_state);
	}

	/// Render the [population](ExecutionState::Populating) UI.
	///
	/// # Arguments
	///
	/// * `area` - The target area.
	/// * `buf` - The target buffer.
	fn render_populating(&self, area: Rect, buf: &mut Buffer)
	{
		let (puzzle, rows, hints) = self.layout(area);
		self.render_board(
			puzzle,
			&rows,
			buf,
			&self.cells,
			&[],
			Some(self.current_index())
		);
		self.render_hints(hints, buf, &[], None, false);
	}

	/// Render the [solving](ExecutionState::Solving) UI.
	///
	/// # Arguments
	///
	/// * `area` - The target area.
	/// * `buf` - The target buffer.
	/// * `solver` - The solver.
	fn render_solving(&self, area: Rect, buf: &mut Buffer, solver: &Solver)
	{
		let (puzzle, rows, hints) = self.layout(area);
		self.render_board(puzzle, &rows, buf, solver.grid().cells(), &[], None);
		self.render_hints(hints, buf, solver.outcomes(), None, false);
	}

	/// Render the board that the given hint was solved against, with the path
	/// of its word highlighted. Fall back to the current board if the hint has
	/// not been considered.
	///
	/// # Arguments
	///
	/// * `area` - The target area.
	/// * `buf` - The target buffer.
	/// * `solver` - The solver.
	/// * `hint` - The index of the hint to highlight, if any.
	/// * `browsing` - Whether the user can move the highlight.
	fn render_highlighting(
		&self,
		area: Rect,
		buf: &mut Buffer,
		solver: &Solver,
		hint: Option<usize>,
		browsing: bool
	) {
		let (puzzle, rows, hints) = self.layout(area);
		let board = hint.and_then(|i| solver.board_before(i))
			.unwrap_or_else(|| solver.grid());
		let path = hint.and_then(|i| solver.outcomes().get(i))
			.and_then(HintOutcome::candidate)
			.map(|candidate| candidate.path.as_slice())
			.unwrap_or_default();
		self.render_board(puzzle, &rows, buf, board.cells(), path, None);
		self.render_hints(hints, buf, solver.outcomes(), hint, browsing);
	}

	/// Run any background tasks, such as the solver or the highlighter.
	fn process_systems(&mut self)
	{
		match self.state
		{
			ExecutionState::Swapping => unreachable!(),
			ExecutionState::Populating => {}
			ExecutionState::Solving { .. } => self.run_solver(),
			ExecutionState::Highlighting { .. } => self.run_highlighter(),
			ExecutionState::Finished { .. } => {}
			ExecutionState::Exiting { .. } => {}
		}
	}

	/// Solve the next hint.
	fn run_solver(&mut self)
	{
		// Take care to evacuate the application state in order to keep the
		// borrow happy while juggling state ownership and mutable references.
		let mut state = ExecutionState::Swapping;
		swap(&mut self.state, &mut state);
		if let ExecutionState::Solving { solver } = state
		{
			// A single hint per frame keeps the application responsive.
			let (solver, outcome) = solver.step();
			self.state = match outcome
			{
				Some(HintOutcome::Solved(_)) =>
				{
					let until = Instant::now()
						+ Duration::from_millis(self.highlight_duration_ms);
					let hint = solver.outcomes().len().saturating_sub(1);
					ExecutionState::Highlighting { solver, until, hint }
				},
				_ if solver.is_finished() =>
					ExecutionState::Finished { solver, highlight: None },
				_ => ExecutionState::Solving { solver }
			};
		}
		else
		{
			unreachable!()
		}
	}

	/// Maintain the highlight until it expires.
	fn run_highlighter(&mut self)
	{
		// Take care to evacuate the application state in order to keep the
		// borrow happy while juggling state ownership and mutable references.
		let mut state = ExecutionState::Swapping;
		swap(&mut self.state, &mut state);
		if let ExecutionState::Highlighting { solver, until, hint } = state
		{
			self.state =
				if Instant::now() < until
				{
					ExecutionState::Highlighting { solver, until, hint }
				}
				else if solver.is_finished()
				{
					ExecutionState::Finished { solver, highlight: None }
				}
				else
				{
					ExecutionState::Solving { solver }
				};
		}
		else
		{
			unreachable!()
		}
	}

	/// Process events. Block for only half a millisecond, so as not to stall
	/// any background tasks.
	///
	/// # Errors
	///
	/// Any error that occurs while processing events.
	fn process_event(&mut self) -> io::Result<()>
	{
		if poll(Duration::from_micros(500))?
		{
			match read()?
			{
				Event::Key(event) if event.kind == KeyEventKind::Press =>
					self.process_key_event(event),
				_ => {}
			}
		}
		Ok(())
	}

	/// Process a key event, according to the current state.
	///
	/// # Arguments
	///
	/// * `event` - The key event to process.
	fn process_key_event(&mut self, event: KeyEvent)
	{
		match self.state
		{
			ExecutionState::Swapping => unreachable!(),
			ExecutionState::Populating =>
				self.process_key_event_populating(event),
			ExecutionState::Solving { .. }
				| ExecutionState::Highlighting { .. } =>
				self.process_key_event_solving(event),
			ExecutionState::Finished { .. } =>
				self.process_key_event_finished(event),
			ExecutionState::Exiting { .. } => {}
		}
	}

	/// Process a key event while [populating](ExecutionState::Populating) the
	/// puzzle:
	///
	/// * Escape - Exit the application.
	/// * Up - Move the cursor up.
	/// * Down - Move the cursor down.
	/// * Left - Move the cursor left.
	/// * Right - Move the cursor right.
	/// * BackTab - (Shift+Tab) Move the cursor to the previous cell.
	/// * Tab - Move the cursor to the next cell.
	/// * Backspace, Delete, `.` - Empty the current cell.
	/// * Shift+Delete - Empty every cell.
	/// * Enter - Solve the puzzle.
	/// * A-Z - Fill the current cell and move to the next cell.
	/// * 1-9 - Append a hint of the corresponding length.
	/// * `-` - Remove the last hint.
	///
	/// # Arguments
	///
	/// * `event` - The key event to process.
	fn process_key_event_populating(&mut self, event: KeyEvent)
	{
		match event.code
		{
			KeyCode::Esc => self.exit(),
			KeyCode::Up => self.move_cursor(0, -1),
			KeyCode::Down => self.move_cursor(0, 1),
			KeyCode::Left => self.move_cursor(-1, 0),
			KeyCode::Right => self.move_cursor(1, 0),
			KeyCode::BackTab => self.move_index(-1),
			KeyCode::Tab => self.move_index(1),
			KeyCode::Delete if event.modifiers.contains(KeyModifiers::SHIFT) =>
				self.clear_all(),
			KeyCode::Backspace | KeyCode::Delete | KeyCode::Char('.') =>
				self.clear(),
			KeyCode::Enter => self.start_solver(),
			KeyCode::Char(c) if c.is_alphabetic() => self.fill(c),
			KeyCode::Char(c @ '1' ..= '9') =>
				self.push_hint(c as usize - '0' as usize),
			KeyCode::Char('-') => self.pop_hint(),
			_ => {}
		}
	}

	/// Attempt to start the solver. If the board is not fully populated, or
	/// there are no hints, do nothing; the UI already provides feedback to the
	/// user.
	fn start_solver(&mut self)
	{
		if self.hints.is_empty() || self.cells.iter().any(Option::is_none)
		{
			return
		}
		let rows = self.cells.chunks_exact(self.size as usize)
			.map(<[_]>::to_vec)
			.collect::<Vec<_>>();
		match Grid::new(rows)
		{
			Ok(grid) =>
			{
				debug!("solving board:\n{}", grid);
				let solver = Solver::new(
					Rc::clone(&self.dictionary),
					grid,
					self.hints.clone()
				).with_limits(self.limits);
				self.state = ExecutionState::Solving { solver };
			},
			Err(e) => warn!("cannot solve board: {}", e)
		}
	}

	/// Process a key event while [solving](ExecutionState::Solving) or
	/// [highlighting](ExecutionState::Highlighting):
	///
	/// * Escape - Exit the application.
	///
	/// # Arguments
	///
	/// * `event` - The key event to process.
	fn process_key_event_solving(&mut self, event: KeyEvent)
	{
		if let KeyCode::Esc = event.code {
			self.exit()
		}
	}

	/// Process a key event while [reviewing](ExecutionState::Finished) the
	/// outcomes:
	///
	/// * Escape - Exit the application.
	/// * Up - Highlight the previous hint.
	/// * Down - Highlight the next hint.
	///
	/// # Arguments
	///
	/// * `event` - The key event to process.
	fn process_key_event_finished(&mut self, event: KeyEvent)
	{
		match event.code
		{
			KeyCode::Esc => self.exit(),
			KeyCode::Up => self.move_hint_index(-1),
			KeyCode::Down => self.move_hint_index(1),
			_ => {}
		}
	}

	/// Mark the application for exit. The application will exit after the next
	/// iteration of the main loop, yielding the outcomes considered so far.
	fn exit(&mut self)
	{
		let outcomes = match self.state
		{
			ExecutionState::Swapping => unreachable!(),
			ExecutionState::Populating => vec![],
			ExecutionState::Solving { ref solver }
				| ExecutionState::Highlighting { ref solver, .. }
				| ExecutionState::Finished { ref solver, .. } =>
				solver.outcomes().to_vec(),
			ExecutionState::Exiting { ref outcomes } => outcomes.clone()
		};
		self.state = ExecutionState::Exiting { outcomes };
	}
}

impl Widget for &App
{
	fn render(self, area: Rect, buf: &mut Buffer)
	{
		match self.state
		{
			ExecutionState::Swapping => unreachable!(),
			ExecutionState::Populating => self.render_populating(area, buf),
			ExecutionState::Solving { ref solver } =>
				self.render_solving(area, buf, solver),
			ExecutionState::Highlighting { ref solver, hint, .. } =>
				self.render_highlighting(area, buf, solver, Some(hint), false),
			ExecutionState::Finished { ref solver, highlight } =>
				self.render_highlighting(area, buf, solver, highlight, true),
			ExecutionState::Exiting { .. } => {}
		}
	}
}

/// The execution state of the application.
#[derive(Clone, Debug)]
enum ExecutionState
{
	/// The application state is transitioning to the next state. This is a
	/// transient state that should not be rendered.
	Swapping,

	/// The user is populating the board and the hints.
	Populating,

	/// The solver is running, one hint per frame.
	Solving {
		/// The solver for the puzzle.
		solver: Solver
	},

	/// The solver is highlighting the most recently solved hint, and will
	/// momentarily return to the [Solving](ExecutionState::Solving) state.
	Highlighting {
		/// The solver for the puzzle.
		solver: Solver,

		/// When to stop highlighting.
		until: Instant,

		/// The index of the hint to highlight.
		hint: usize
	},

	/// The solver has finished, but the user is reviewing the outcomes.
	Finished {
		/// The solver for the puzzle.
		solver: Solver,

		/// The index of the hint to highlight.
		highlight: Option<usize>
	},

	/// The application is exiting.
	Exiting {
		/// The outcome of every hint considered.
		outcomes: Vec<HintOutcome>
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use super::*;

	/// Create an application for a board of the given size.
	fn app(size: u8, dictionary: Dictionary) -> App
	{
		App::new(size, 0, SearchLimits::unbounded(), dictionary)
	}

	/// Type each character of the given text.
	fn type_text(app: &mut App, text: &str)
	{
		for c in text.chars()
		{
			app.process_key_event(KeyCode::Char(c).into());
		}
	}

	/// Ensure that the application exits when the escape key is pressed.
	#[test]
	fn test_handle_exit()
	{
		let mut app = app(4, Dictionary::default());
		assert!(app.is_running());
		app.process_key_event(KeyCode::Esc.into());
		assert!(!app.is_running());
	}

	/// Ensure that the cursor moves up, down, left, and right when the
	/// corresponding arrow keys are pressed. Test all possible cursor
	/// movements on a 3×3 board.
	#[test]
	fn test_handle_arrows()
	{
		let mut app = app(3, Dictionary::default());
		assert_eq!(app.cursor, (0, 0));
		// Each case is a tuple of the initial cursor position and the expected
		// cursor position after moving up, right, down, and left,
		// respectively.
		let cases = vec![
			((0, 0), [(0, 0), (1, 0), (0, 1), (0, 0)]),
			((0, 1), [(0, 0), (1, 1), (0, 2), (0, 1)]),
			((0, 2), [(0, 1), (1, 2), (0, 2), (0, 2)]),
			((1, 0), [(1, 0), (2, 0), (1, 1), (0, 0)]),
			((1, 1), [(1, 0), (2, 1), (1, 2), (0, 1)]),
			((1, 2), [(1, 1), (2, 2), (1, 2), (0, 2)]),
			((2, 0), [(2, 0), (2, 0), (2, 1), (1, 0)]),
			((2, 1), [(2, 0), (2, 1), (2, 2), (1, 1)]),
			((2, 2), [(2, 1), (2, 2), (2, 2), (1, 2)])
		];
		for (initial, expected) in cases
		{
			app.cursor = initial;
			app.process_key_event(KeyCode::Up.into());
			assert_eq!(app.cursor, expected[0], "up");
			app.cursor = initial;
			app.process_key_event(KeyCode::Right.into());
			assert_eq!(app.cursor, expected[1], "right");
			app.cursor = initial;
			app.process_key_event(KeyCode::Down.into());
			assert_eq!(app.cursor, expected[2], "down");
			app.cursor = initial;
			app.process_key_event(KeyCode::Left.into());
			assert_eq!(app.cursor, expected[3], "left");
		}
	}

	/// Ensure that the cursor moves to the next cell when the tab key is
	/// pressed, and to the previous cell when shift-tab is pressed.
	#[test]
	fn test_handle_tab()
	{
		let mut app = app(3, Dictionary::default());
		// Each case is a tuple of the initial cursor position and the expected
		// cursor position after tab and shift-tab, respectively.
		let cases = vec![
			((0, 0), [(1, 0), (0, 0)]),
			((1, 0), [(2, 0), (0, 0)]),
			((2, 0), [(0, 1), (1, 0)]),
			((0, 1), [(1, 1), (2, 0)]),
			((1, 1), [(2, 1), (0, 1)]),
			((2, 1), [(0, 2), (1, 1)]),
			((0, 2), [(1, 2), (2, 1)]),
			((1, 2), [(2, 2), (0, 2)]),
			((2, 2), [(2, 2), (1, 2)])
		];
		for (initial, expected) in cases
		{
			app.cursor = initial;
			app.process_key_event(KeyCode::Tab.into());
			assert_eq!(app.cursor, expected[0], "tab");
			app.cursor = initial;
			app.process_key_event(KeyCode::BackTab.into());
			assert_eq!(app.cursor, expected[1], "shift-tab");
		}
	}

	/// Ensure that cells are filled, advanced past, and emptied correctly.
	#[test]
	fn test_handle_edit()
	{
		let mut app = app(2, Dictionary::default());
		assert_eq!(app.current_cell(), None);
		// Emptying an empty cell is harmless.
		app.process_key_event(KeyCode::Backspace.into());
		assert_eq!(app.current_cell(), None);
		// Letters are normalized and advance the cursor.
		type_text(&mut app, "ab");
		assert_eq!(app.cells, vec![Some('A'), Some('B'), None, None]);
		assert_eq!(app.cursor, (0, 1));
		// Filling the last cell leaves the cursor there.
		type_text(&mut app, "cde");
		assert_eq!(app.cells, vec![Some('A'), Some('B'), Some('C'), Some('E')]);
		assert_eq!(app.cursor, (1, 1));
		// Each way of emptying a cell.
		app.process_key_event(KeyCode::Backspace.into());
		assert_eq!(app.current_cell(), None);
		app.process_key_event(KeyCode::Up.into());
		app.process_key_event(KeyCode::Delete.into());
		assert_eq!(app.current_cell(), None);
		app.process_key_event(KeyCode::Left.into());
		type_text(&mut app, ".");
		assert_eq!(app.cells, vec![None, None, Some('C'), None]);
		// Shift-delete empties the whole board.
		app.process_key_event(KeyEvent::new(KeyCode::Delete, KeyModifiers::SHIFT));
		assert!(app.cells.iter().all(Option::is_none));
	}

	/// Ensure that hints are appended and removed, and that zero is ignored.
	#[test]
	fn test_handle_hints()
	{
		let mut app = app(4, Dictionary::default());
		type_text(&mut app, "4305");
		assert_eq!(
			app.hints.iter().map(Hint::length).collect::<Vec<_>>(),
			vec![4, 3, 5]
		);
		type_text(&mut app, "-");
		assert_eq!(
			app.hints.iter().map(Hint::length).collect::<Vec<_>>(),
			vec![4, 3]
		);
		type_text(&mut app, "---");
		assert!(app.hints.is_empty());
	}

	/// Ensure that the solver does not start until the board is full and there
	/// is at least one hint.
	#[test]
	fn test_start_requires_board_and_hints()
	{
		let mut app = app(2, Dictionary::build(["cat"]));
		type_text(&mut app, "atc");
		type_text(&mut app, "3");
		app.process_key_event(KeyCode::Enter.into());
		assert!(matches!(app.state, ExecutionState::Populating));
		type_text(&mut app, "t-");
		app.process_key_event(KeyCode::Enter.into());
		assert!(matches!(app.state, ExecutionState::Populating));
	}

	/// Ensure that the puzzle is solved, highlighted, and reviewed, and that
	/// the outcomes are yielded on exit.
	#[test]
	fn test_solve()
	{
		let mut app = app(2, Dictionary::build(["cat"]));
		type_text(&mut app, "atct3");
		app.process_key_event(KeyCode::Enter.into());
		assert!(matches!(app.state, ExecutionState::Solving { .. }));
		app.process_systems();
		assert!(matches!(
			app.state,
			ExecutionState::Highlighting { hint: 0, .. }
		));
		// The highlight lasts for zero milliseconds.
		app.process_systems();
		assert!(matches!(
			app.state,
			ExecutionState::Finished { highlight: None, .. }
		));
		app.process_key_event(KeyCode::Down.into());
		assert!(matches!(
			app.state,
			ExecutionState::Finished { highlight: Some(0), .. }
		));
		app.process_key_event(KeyCode::Down.into());
		assert!(matches!(
			app.state,
			ExecutionState::Finished { highlight: None, .. }
		));
		app.process_key_event(KeyCode::Up.into());
		assert!(matches!(
			app.state,
			ExecutionState::Finished { highlight: Some(0), .. }
		));
		app.process_key_event(KeyCode::Esc.into());
		match app.state
		{
			ExecutionState::Exiting { ref outcomes } =>
			{
				assert_eq!(outcomes.len(), 1);
				assert_eq!(outcomes[0].word(), Some("CAT"));
			},
			_ => panic!("expected to be exiting")
		}
	}

	/// Ensure that every state renders without panicking.
	#[test]
	fn test_render()
	{
		let area = Rect::new(0, 0, 80, 30);
		let mut app = app(2, Dictionary::build(["cat"]));
		type_text(&mut app, "atct3");
		let mut buf = Buffer::empty(area);
		(&app).render(area, &mut buf);
		app.process_key_event(KeyCode::Enter.into());
		while app.is_running()
		{
			let mut buf = Buffer::empty(area);
			(&app).render(area, &mut buf);
			if matches!(app.state, ExecutionState::Finished { .. })
			{
				app.process_key_event(KeyCode::Down.into());
				let mut buf = Buffer::empty(area);
				(&app).render(area, &mut buf);
				app.process_key_event(KeyCode::Esc.into());
			}
			app.process_systems();
		}
	}
}
