//! # Hints
//!
//! A hint announces how many letters the next hidden word has. Whatever else a
//! recognizer managed to extract about the hint, such as its partially
//! revealed text or where it was found on the screen, rides along as metadata
//! that the solver never interprets.

use std::{
	error::Error,
	fmt::{self, Display, Formatter},
	str::FromStr
};

use fixedstr::str32;

////////////////////////////////////////////////////////////////////////////////
//                                   Hints.                                   //
////////////////////////////////////////////////////////////////////////////////

/// A screen region, in pixels, where a recognizer found (part of) a hint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Region
{
	/// The left edge.
	pub x: u32,

	/// The top edge.
	pub y: u32,

	/// The width.
	pub width: u32,

	/// The height.
	pub height: u32
}

/// A single hint: the required length of a hidden word, plus opaque metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct Hint
{
	/// The number of letters of the hidden word.
	length: usize,

	/// The recognized text of the hint, if any, e.g., `C___`.
	text: Option<str32>,

	/// Where the hint was found, if known.
	regions: Vec<Region>
}

impl Hint
{
	/// Construct a hint for a word of the given length, without metadata.
	///
	/// # Arguments
	///
	/// * `length` - The number of letters of the hidden word.
	///
	/// # Returns
	///
	/// The hint.
	#[inline]
	pub fn new(length: usize) -> Self
	{
		Self { length, text: None, regions: Vec::new() }
	}

	/// Attach a region to the hint.
	#[inline]
	pub fn with_region(mut self, region: Region) -> Self
	{
		self.regions.push(region);
		self
	}

	/// The number of letters of the hidden word.
	#[inline]
	#[must_use]
	pub fn length(&self) -> usize { self.length }

	/// The recognized text of the hint, if any.
	#[inline]
	#[must_use]
	pub fn text(&self) -> Option<&str> { self.text.as_ref().map(|t| t.as_str()) }

	/// The regions where the hint was found.
	#[inline]
	#[must_use]
	pub fn regions(&self) -> &[Region] { &self.regions }
}

impl Display for Hint
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self.text()
		{
			Some(text) => write!(f, "{}", text),
			None => write!(f, "{}", self.length)
		}
	}
}

impl FromStr for Hint
{
	type Err = HintError;

	/// Parse a hint. A decimal number is a bare length. Anything else must be a
	/// pattern of letters and blanks (any of `_`, `.`, `?`, and `-`), whose
	/// character count is the length.
	fn from_str(s: &str) -> Result<Self, Self::Err>
	{
		let s = s.trim();
		if s.is_empty()
		{
			return Err(HintError::Empty)
		}
		let length =
			if s.chars().all(|c| c.is_ascii_digit())
			{
				s.parse::<usize>().map_err(|_| HintError::Invalid(s.into()))?
			}
			else
			{
				let is_pattern = s.chars()
					.all(|c| c.is_alphabetic() || matches!(c, '_' | '.' | '?' | '-'));
				if !is_pattern
				{
					return Err(HintError::Invalid(s.into()))
				}
				// Leave room for the terminator.
				if s.len() >= 32
				{
					return Err(HintError::TooLong(s.len()))
				}
				return Ok(Self
				{
					length: s.chars().count(),
					text: Some(str32::from(s)),
					regions: Vec::new()
				})
			};
		if length == 0
		{
			return Err(HintError::Zero)
		}
		Ok(Self::new(length))
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                  Errors.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The complete enumeration of [`Hint`] parsing errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HintError
{
	/// The hint is blank.
	Empty,

	/// The hint asks for a word of no letters.
	Zero,

	/// The hint is neither a number nor a pattern.
	Invalid(String),

	/// The pattern exceeds the capacity of the hint text, in bytes.
	TooLong(usize)
}

impl Display for HintError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Empty => write!(f, "hint is empty"),
			Self::Zero => write!(f, "hint length must be positive"),
			Self::Invalid(s) =>
				write!(f, "hint is neither a length nor a pattern: {:?}", s),
			Self::TooLong(len) =>
				write!(f, "hint pattern is too long: {} bytes", len)
		}
	}
}

impl Error for HintError {}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use crate::hint::{Hint, HintError, Region};

	/// Ensure that bare lengths and patterns parse.
	#[test]
	fn test_parse()
	{
		let cases = [
			("5", 5, None),
			(" 12 ", 12, None),
			("C___", 4, Some("C___")),
			("..a?-", 5, Some("..a?-")),
			("crème", 5, Some("crème"))
		];
		for (input, length, text) in cases
		{
			let hint = input.parse::<Hint>().unwrap();
			assert_eq!(hint.length(), length, "{}", input);
			assert_eq!(hint.text(), text, "{}", input);
			assert!(hint.regions().is_empty());
		}
	}

	/// Ensure that malformed hints are rejected.
	#[test]
	fn test_parse_errors()
	{
		assert_eq!("".parse::<Hint>(), Err(HintError::Empty));
		assert_eq!("  ".parse::<Hint>(), Err(HintError::Empty));
		assert_eq!("0".parse::<Hint>(), Err(HintError::Zero));
		assert_eq!(
			"4x!".parse::<Hint>(),
			Err(HintError::Invalid("4x!".to_string()))
		);
		assert_eq!(
			"-3".parse::<Hint>(),
			Err(HintError::Invalid("-3".to_string()))
		);
		let long = "_".repeat(40);
		assert_eq!(long.parse::<Hint>(), Err(HintError::TooLong(40)));
		assert!("9".repeat(40).parse::<Hint>().is_err());
	}

	/// Ensure that hints render as their text, or else their length.
	#[test]
	fn test_display()
	{
		assert_eq!(Hint::new(7).to_string(), "7");
		assert_eq!("C__".parse::<Hint>().unwrap().to_string(), "C__");
	}

	/// Regions are carried but not interpreted.
	#[test]
	fn test_regions()
	{
		let region = Region { x: 10, y: 20, width: 30, height: 40 };
		let hint = Hint::new(3).with_region(region).with_region(region);
		assert_eq!(hint.regions(), &[region, region]);
		assert_eq!(hint.length(), 3);
	}
}
