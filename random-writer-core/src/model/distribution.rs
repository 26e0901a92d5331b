use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use rand::Rng;

use crate::error::{Result, WriterError};

/// Maximum accepted distance between 1.0 and the sum of frequencies given
/// to [`Distribution::from_frequencies`].
const FREQUENCY_TOLERANCE: f64 = 1e-9;

/// Separator placed between the two halves of a joint outcome.
pub const JOINT_SEPARATOR: char = ' ';

/// An immutable frequency distribution over discrete outcomes.
///
/// A `Distribution` counts how many times each outcome was observed and
/// derives probabilities from those counts. Every update returns a new
/// distribution; values handed out earlier are never changed.
///
/// ## Storage
/// Counts live in a `BTreeMap` shared behind an `Arc`. Cloning is cheap and
/// updates go through [`Arc::make_mut`], so the map is only copied when
/// another clone still references it.
///
/// ## Invariants
/// - Every stored count is strictly positive (absent means zero)
/// - `total` is the sum of all counts, except for the value returned by
///   [`Distribution::joint`] or [`Distribution::from_frequencies`], where it
///   is the declared total; any further update recounts it
/// - Outcomes are always visited in ascending `Ord` order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Distribution<T> {
	/// Observed outcomes and their occurrence counts.
	/// Example: { "cat" => 2, "dog" => 1 }
	counts: Arc<BTreeMap<T, u64>>,
	total: u64,
}

impl<T: Ord + Clone> Distribution<T> {
	/// Creates an empty distribution.
	pub fn new() -> Self {
		Self {
			counts: Arc::new(BTreeMap::new()),
			total: 0,
		}
	}

	/// Creates a distribution from `(outcome, count)` pairs.
	///
	/// - Pairs with a count of 0 are dropped.
	/// - Repeated outcomes have their counts summed.
	pub fn from_counts<I>(counts: I) -> Self
	where
		I: IntoIterator<Item = (T, u64)>,
	{
		let mut map = BTreeMap::new();
		for (outcome, count) in counts {
			if count > 0 {
				*map.entry(outcome).or_insert(0) += count;
			}
		}
		let total = map.values().sum();
		Self { counts: Arc::new(map), total }
	}

	/// Creates a distribution with one observation per item.
	pub fn from_outcomes<I>(outcomes: I) -> Self
	where
		I: IntoIterator<Item = T>,
	{
		Self::from_counts(outcomes.into_iter().map(|outcome| (outcome, 1)))
	}

	/// Creates a distribution from relative frequencies and a number of
	/// observations.
	///
	/// Each count is `round(frequency * total)`; outcomes rounding to zero are
	/// left out. The declared `total` is kept as given.
	///
	/// # Errors
	/// Returns [`WriterError::MalformedCount`] if a frequency is negative or not
	/// finite, or if the frequencies do not sum to 1.
	pub fn from_frequencies<I>(frequencies: I, total: u64) -> Result<Self>
	where
		I: IntoIterator<Item = (T, f64)>,
	{
		let mut checked = Vec::new();
		let mut sum = 0.0;
		for (outcome, frequency) in frequencies {
			if !frequency.is_finite() || frequency < 0.0 {
				return Err(WriterError::MalformedCount(format!(
					"frequency {frequency} is not a probability"
				)));
			}
			sum += frequency;
			checked.push((outcome, frequency));
		}

		if (sum - 1.0).abs() > FREQUENCY_TOLERANCE {
			return Err(WriterError::MalformedCount(format!(
				"total probability of sample space is {sum}, expected 1"
			)));
		}

		Ok(Self::from_weighted(checked, total))
	}

	/// Scales frequencies by `total` without validating them.
	fn from_weighted<I>(frequencies: I, total: u64) -> Self
	where
		I: IntoIterator<Item = (T, f64)>,
	{
		let mut map = BTreeMap::new();
		for (outcome, frequency) in frequencies {
			let count = (frequency * total as f64).round() as u64;
			if count > 0 {
				*map.entry(outcome).or_insert(0) += count;
			}
		}
		Self { counts: Arc::new(map), total }
	}

	/// Returns the number of times `outcome` was observed (0 if absent).
	pub fn count<Q>(&self, outcome: &Q) -> u64
	where
		T: Borrow<Q>,
		Q: Ord + ?Sized,
	{
		self.counts.get(outcome).copied().unwrap_or(0)
	}

	/// Returns `count(outcome) / total`, or 0 for an empty distribution.
	pub fn probability<Q>(&self, outcome: &Q) -> f64
	where
		T: Borrow<Q>,
		Q: Ord + ?Sized,
	{
		if self.total == 0 {
			return 0.0;
		}
		self.count(outcome) as f64 / self.total as f64
	}

	pub fn total(&self) -> u64 {
		self.total
	}

	/// Returns `true` if no outcome has been observed.
	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Number of distinct outcomes.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	/// Returns the set of outcomes with a nonzero count.
	pub fn sample_space(&self) -> BTreeSet<T> {
		self.counts.keys().cloned().collect()
	}

	/// Iterates over `(outcome, count)` pairs in ascending outcome order.
	pub fn iter(&self) -> impl Iterator<Item = (&T, u64)> {
		self.counts.iter().map(|(outcome, count)| (outcome, *count))
	}

	/// Returns a distribution with one more observation of `outcome`.
	///
	/// An absent outcome is inserted with a count of 1.
	pub fn add_single(self, outcome: T) -> Self {
		let mut counts = self.counts;
		*Arc::make_mut(&mut counts).entry(outcome).or_insert(0) += 1;
		Self::recounted(counts)
	}

	/// Returns a distribution where `outcome` is absent.
	///
	/// All the mass of `outcome` is removed. Removing an absent outcome
	/// returns an equivalent distribution.
	pub fn remove<Q>(self, outcome: &Q) -> Self
	where
		T: Borrow<Q>,
		Q: Ord + ?Sized,
	{
		let mut counts = self.counts;
		if counts.contains_key(outcome) {
			Arc::make_mut(&mut counts).remove(outcome);
		}
		Self::recounted(counts)
	}

	/// Pools the observations of two distributions.
	///
	/// The count of each outcome is the sum of its counts in `self` and
	/// `other`, over the union of both sample spaces.
	pub fn combine(self, other: &Self) -> Self {
		let counts = if self.is_empty() {
			Arc::clone(&other.counts)
		} else {
			let mut counts = self.counts;
			if !other.is_empty() {
				let map = Arc::make_mut(&mut counts);
				for (outcome, count) in other.iter() {
					*map.entry(outcome.clone()).or_insert(0) += count;
				}
			}
			counts
		};
		Self::recounted(counts)
	}

	/// Wraps `counts` with a total equal to the sum of its counts.
	///
	/// Any declared total carried by a joint or frequency-built input is
	/// dropped here.
	fn recounted(counts: Arc<BTreeMap<T, u64>>) -> Self {
		let total = counts.values().sum();
		Self { counts, total }
	}

	/// Draws an outcome with probability proportional to its count.
	///
	/// A uniform value in `[0, total)` is drawn, then outcomes are visited in
	/// ascending order while subtracting their counts. The first outcome that
	/// brings the remainder to zero or below is returned. The visiting order
	/// only matters for reproducing a draw from a seeded `rng`.
	///
	/// # Errors
	/// Returns [`WriterError::EmptySampleSpace`] if there is nothing to draw.
	pub fn random_select<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&T> {
		if self.counts.is_empty() || self.total == 0 {
			return Err(WriterError::EmptySampleSpace);
		}

		let mut remainder = rng.random_range(0.0..self.total as f64);

		let mut fallback = None;
		for (outcome, count) in self.counts.iter() {
			remainder -= *count as f64;
			if remainder <= 0.0 {
				return Ok(outcome);
			}
			fallback = Some(outcome);
		}

		// Only reachable when the declared total exceeds the stored counts
		fallback.ok_or(WriterError::EmptySampleSpace)
	}
}

impl<T: Ord + Clone + fmt::Display> Distribution<T> {
	/// Builds the joint distribution of two independent distributions.
	///
	/// Each joint outcome is `"{a} {b}"` with probability `p(a) * p(b)`. The
	/// declared total of the result is `self.total() + other.total()`, which
	/// is a bookkeeping value and not a count of joint observations.
	///
	/// Joining with an empty distribution yields an empty distribution.
	pub fn joint(&self, other: &Self) -> Distribution<String> {
		if self.is_empty() || other.is_empty() {
			return Distribution::new();
		}

		let mut frequencies = Vec::with_capacity(self.len() * other.len());
		for (a, _) in self.iter() {
			for (b, _) in other.iter() {
				frequencies.push((
					format!("{a}{JOINT_SEPARATOR}{b}"),
					self.probability(a) * other.probability(b),
				));
			}
		}

		Distribution::from_weighted(frequencies, self.total + other.total)
	}
}

impl<T: Ord + Clone> Default for Distribution<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Ord + Clone> FromIterator<T> for Distribution<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Self::from_outcomes(iter)
	}
}

impl<T: fmt::Display> fmt::Display for Distribution<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{{")?;
		for (i, (outcome, count)) in self.counts.iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			write!(f, "{outcome}: {count}")?;
		}
		write!(f, "}}")
	}
}
