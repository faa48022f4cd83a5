//! # WordBrain Solver
//!
//! WordBrain is a word puzzle game played on a square grid of letters. For each
//! hint, the player traces a hidden word of the hinted length through adjacent
//! cells; the word's letters then vanish, and the letters above them fall into
//! the gaps.
//!
//! This program is a solver for WordBrain puzzles. Via command line options,
//! the user can specify the dictionary to use for solving the puzzle. Then the
//! user can either solve a board stored in a file, or interact with the program
//! via a text-based user interface (TUI) to input the board and the hints.

mod app;
mod tui;

use std::{fs, path::PathBuf, rc::Rc, time::Duration};

use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::{debug, trace, warn};

use app::App;
use tui::tui;
use wordbrain_solver::{
	dictionary::Dictionary,
	grid::Grid,
	hint::Hint,
	search::SearchLimits,
	solver::{HintOutcome, Solver}
};

////////////////////////////////////////////////////////////////////////////////
//                           Command line options.                            //
////////////////////////////////////////////////////////////////////////////////

/// CLI for solving WordBrain puzzles.
#[derive(Clone, Debug, Parser)]
#[command(version, about)]
struct Opts
{
	/// The path to the directory containing the dictionary files.
	#[arg(short = 'd', long, default_value = "dict")]
	directory: String,

	/// The name of the dictionary. This is the name shared by the text and
	/// binary files, sans the extension.
	#[arg(short = 'n', long, default_value = "english")]
	dictionary: String,

	#[command(subcommand)]
	command: Command
}

/// The subcommands of the CLI.
#[derive(Clone, Debug, Subcommand)]
enum Command
{
	/// Just generate the binary dictionary and exit.
	Generate,

	/// Solve the board stored in a file. The outcome of each hint is written
	/// to standard output, one line per hint: the word, or `-` if the hint
	/// could not be solved.
	Solve {
		/// The path to the board file: one row per line, one letter per cell,
		/// with any of `.`, `_`, `-`, and `?` for an empty cell.
		#[arg(short = 'b', long)]
		board: PathBuf,

		/// The hints, in the order that they must be solved: each either a
		/// length or a pattern, e.g., `C___`.
		#[arg(short = 'H', long = "hint", required = true)]
		hints: Vec<Hint>,

		#[command(flatten)]
		limits: LimitOpts,

		/// Also write the path of each word.
		#[arg(long)]
		paths: bool
	},

	/// Open the text-based user interface (TUI) for inputting and solving a
	/// WordBrain puzzle. The outcomes will be written to standard output.
	Tui {
		/// The number of rows, and also of columns, of the board.
		#[arg(
			short = 's',
			long,
			default_value = "4",
			value_parser = clap::value_parser!(u8).range(2..=8)
		)]
		size: u8,

		/// How long (in ms) to highlight an individual word in the TUI.
		#[arg(long, default_value = "400")]
		highlight_duration: u64,

		/// Suppress emission of the outcomes to standard output.
		#[arg(short = 'q', long)]
		quiet: bool,

		#[command(flatten)]
		limits: LimitOpts
	}
}

/// The limits on the search for each hint. Unbounded by default.
#[derive(Clone, Copy, Debug, Args)]
struct LimitOpts
{
	/// The maximum number of paths to expand per hint.
	#[arg(long)]
	max_expansions: Option<u64>,

	/// The maximum time (in ms) to spend searching per hint.
	#[arg(long)]
	time_limit_ms: Option<u64>
}

impl From<LimitOpts> for SearchLimits
{
	fn from(opts: LimitOpts) -> Self
	{
		SearchLimits {
			max_expansions: opts.max_expansions,
			time_limit: opts.time_limit_ms.map(Duration::from_millis)
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                               Main program.                                //
////////////////////////////////////////////////////////////////////////////////

/// Parse the command line options and execute the appropriate subcommand.
fn main()
{
	env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
		.init();

	// Parse the command line options.
	let opts = Opts::parse();
	debug!("Command line options: {:?}", opts);

	// Open the dictionary, creating the binary dictionary if necessary.
	let dictionary = Dictionary::open(&opts.directory, &opts.dictionary)
		.unwrap_or_else(|e|
			panic!("Failed to open dictionary: {}/{}.dict or {0}/{1}.txt: {}",
				opts.directory,
				opts.dictionary,
				e
			)
		);

	// Execute the appropriate subcommand.
	match opts.command
	{
		Command::Generate =>
		{
			trace!("Exiting after generating binary dictionary");
		},
		Command::Solve { board, hints, limits, paths } =>
		{
			let grid = fs::read_to_string(&board)
				.unwrap_or_else(|e|
					panic!("Failed to read board: {}: {}", board.display(), e)
				)
				.parse::<Grid>()
				.unwrap_or_else(|e|
					panic!("Failed to parse board: {}: {}", board.display(), e)
				);
			trace!("Solving board:\n{}", grid);
			let solver = Solver::new(Rc::new(dictionary), grid, hints)
				.with_limits(limits.into())
				.solve_fully();
			print_outcomes(solver.outcomes(), paths);
		},
		Command::Tui { size, highlight_duration, quiet, limits } =>
		{
			trace!("Opening TUI");
			let app = App::new(size, highlight_duration, limits.into(), dictionary);
			let outcomes = tui(|terminal| app.run(terminal))
				.unwrap_or_else(|e| panic!("Failed to drive TUI: {}", e));
			if !quiet
			{
				print_outcomes(&outcomes, false);
			}
		}
	}
}

/// Print the outcomes to standard output, one line per hint.
///
/// # Arguments
///
/// * `outcomes` - The outcomes to print, in hint order.
/// * `paths` - Whether to print the path of each word.
fn print_outcomes(outcomes: &[HintOutcome], paths: bool)
{
	for (index, outcome) in outcomes.iter().enumerate()
	{
		match outcome
		{
			HintOutcome::Solved(candidate) if paths => println!("{}", candidate),
			HintOutcome::Solved(candidate) => println!("{}", candidate.word),
			HintOutcome::NoSolution => println!("-"),
			HintOutcome::LimitExceeded(e) =>
			{
				warn!("Hint {}: {}", index + 1, e);
				println!("-");
			}
		}
	}
}
