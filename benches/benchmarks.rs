use std::{rc::Rc, time::Duration};

use const_format::concatcp;
use criterion::{measurement::Measurement, BenchmarkGroup, Criterion};
use wordbrain_solver::{
	dictionary::Dictionary,
	grid::Grid,
	hint::Hint,
	solver::Solver
};

/// The path of the directory containing the dictionaries.
const DIR: &str = "dict";

/// The name of the dictionary file.
const NAME: &str = "english";

/// The path to the text file.
const PATH_TXT: &str = concatcp!(DIR, "/", NAME, ".txt");

/// The path to the binary file.
const PATH_DICT: &str = concatcp!(DIR, "/", NAME, ".dict");

/// Benchmark reading a dictionary from a file.
///
/// # Arguments
///
/// * `g` - The benchmark group.
fn bench_read_from_file<M: Measurement>(g: &mut BenchmarkGroup<M>)
{
	g.bench_function("read_from_file", |b| {
		b.iter(|| Dictionary::read_from_file(PATH_TXT).unwrap());
	});
}

/// Benchmark deserializing a dictionary from a file.
///
/// # Arguments
///
/// * `g` - The benchmark group.
fn bench_deserialize_from_file<M: Measurement>(g: &mut BenchmarkGroup<M>)
{
	g.bench_function("deserialize_from_file", |b| {
		b.iter(|| Dictionary::deserialize_from_file(PATH_DICT).unwrap());
	});
}

/// Benchmark solving a puzzle, excluding the time to load the dictionary.
///
/// # Arguments
///
/// * `g` - The benchmark group.
/// * `dictionary` - The dictionary to use for solving the puzzle.
fn bench_solver<M: Measurement>(
	g: &mut BenchmarkGroup<M>,
	dictionary: &Rc<Dictionary>
) {
	let grid = "\
		lamp\n\
		rice\n\
		ston\n\
		ewad"
		.parse::<Grid>()
		.unwrap();
	g.bench_function("solve", |b| {
		b.iter(|| {
			let hints = vec![Hint::new(4), Hint::new(4), Hint::new(4)];
			let solver = Solver::new(Rc::clone(dictionary), grid.clone(), hints)
				.solve_fully();
			assert!(solver.is_finished());
			assert_eq!(solver.outcomes()[0].word(), Some("LAMP"));
		});
	});
}

/// Run all benchmarks.
///
/// The main purpose of the benchmarking is to ensure that
/// [`deserialize_from_file`](Dictionary::deserialize_from_file) is faster than
/// [`read_from_file`](Dictionary::read_from_file).
fn main()
{
	// Ensure that both the text and binary files exist.
	let dictionary = Rc::new(Dictionary::open(DIR, NAME).unwrap());

	// Run the benchmarks.
	let mut criterion = Criterion::default().configure_from_args();
	let mut group = criterion.benchmark_group("benchmarks");
	group.measurement_time(Duration::from_secs(30));
	bench_read_from_file(&mut group);
	bench_deserialize_from_file(&mut group);
	bench_solver(&mut group, &dictionary);
	group.finish();

	// Generate the final summary.
	criterion.final_summary();
}
