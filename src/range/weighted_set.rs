//! Weighted range set parsing and sampling

use crate::error::{GuestEffectError, Result};
use crate::rng::RandomSource;
use smallvec::SmallVec;
use std::fmt;

/// One comma separated element of a range spec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSegment {
    /// A single value like "5"
    Single(i32),
    /// An inclusive range like "1-3"
    Span { low: i32, high: i32 },
}

impl RangeSegment {
    /// Number of concrete integers covered by this segment
    #[inline]
    pub fn count(&self) -> u64 {
        match *self {
            RangeSegment::Single(_) => 1,
            RangeSegment::Span { low, high } => (high as i64 - low as i64 + 1) as u64,
        }
    }

    /// The value the segment reads as when taken as a plain integer
    #[inline]
    pub fn first(&self) -> i32 {
        match *self {
            RangeSegment::Single(v) => v,
            RangeSegment::Span { low, .. } => low,
        }
    }
}

impl fmt::Display for RangeSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeSegment::Single(v) => write!(f, "{}", v),
            RangeSegment::Span { low, high } => write!(f, "{}-{}", low, high),
        }
    }
}

/// An ordered multiset of integers encoded as singles and inclusive ranges.
///
/// Each integer carries one unit of weight per time it is covered, so
/// "1-3,3" draws 3 twice as often as 1 or 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedRangeSet {
    segments: SmallVec<[RangeSegment; 4]>,
    total_count: u64,
}

impl WeightedRangeSet {
    /// Parse a range spec such as "1-3,5"
    pub fn parse(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(GuestEffectError::malformed_range(spec, "empty range spec"));
        }

        let mut segments = SmallVec::new();
        let mut total_count: u64 = 0;

        for raw in spec.split(',') {
            let segment = parse_segment(raw.trim())?;
            total_count += segment.count();
            segments.push(segment);
        }

        Ok(Self {
            segments,
            total_count,
        })
    }

    /// Build a set holding one value
    pub fn single(value: i32) -> Self {
        let mut segments = SmallVec::new();
        segments.push(RangeSegment::Single(value));
        Self {
            segments,
            total_count: 1,
        }
    }

    /// Sum of the cardinalities of all segments
    #[inline]
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn segments(&self) -> &[RangeSegment] {
        &self.segments
    }

    /// Get the index-th concrete value in declared order.
    ///
    /// An index outside `[0, total_count)` yields the first segment read as
    /// a plain integer (the low bound when it is a range).
    pub fn nth_value(&self, index: u64) -> i32 {
        let fallback = self.segments.first().map(RangeSegment::first).unwrap_or(0);
        if index >= self.total_count {
            return fallback;
        }

        let mut offset = index;
        for segment in &self.segments {
            let count = segment.count();
            if offset < count {
                return match *segment {
                    RangeSegment::Single(v) => v,
                    RangeSegment::Span { low, .. } => (low as i64 + offset as i64) as i32,
                };
            }
            offset -= count;
        }

        fallback
    }

    /// Draw a value, weighting every covered integer equally
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> i32 {
        if self.total_count == 0 {
            return self.nth_value(0);
        }
        let index = rng.int_between(0, self.total_count as i64 - 1);
        self.nth_value(index as u64)
    }

    /// Iterate every concrete value in declared order
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.segments.iter().flat_map(|segment| match *segment {
            RangeSegment::Single(v) => v..=v,
            RangeSegment::Span { low, high } => low..=high,
        })
    }

    /// Whether `value` is covered by any segment
    pub fn contains(&self, value: i32) -> bool {
        self.segments.iter().any(|segment| match *segment {
            RangeSegment::Single(v) => v == value,
            RangeSegment::Span { low, high } => (low..=high).contains(&value),
        })
    }
}

impl fmt::Display for WeightedRangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

fn parse_segment(segment: &str) -> Result<RangeSegment> {
    if segment.is_empty() {
        return Err(GuestEffectError::malformed_range(segment, "empty segment"));
    }

    // Skip the first char so a leading '-' reads as a sign, not a separator
    let separator = segment
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c == '-')
        .map(|(i, _)| i);

    match separator {
        Some(pos) => {
            let low = parse_bound(segment, &segment[..pos])?;
            let high = parse_bound(segment, &segment[pos + 1..])?;
            if low > high {
                return Err(GuestEffectError::malformed_range(
                    segment,
                    format!("low bound {} exceeds high bound {}", low, high),
                ));
            }
            if low == high {
                Ok(RangeSegment::Single(low))
            } else {
                Ok(RangeSegment::Span { low, high })
            }
        }
        None => Ok(RangeSegment::Single(parse_bound(segment, segment)?)),
    }
}

fn parse_bound(segment: &str, value: &str) -> Result<i32> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| {
            GuestEffectError::malformed_range(
                segment,
                format!("'{}' is not an integer", value.trim()),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;

    #[test]
    fn test_parse_single_value() {
        let set = WeightedRangeSet::parse("5").unwrap();
        assert_eq!(set.total_count(), 1);
        assert_eq!(set.segments(), &[RangeSegment::Single(5)]);
        assert_eq!(set.nth_value(0), 5);
    }

    #[test]
    fn test_parse_mixed_segments() {
        let set = WeightedRangeSet::parse("1-3,7,10-11").unwrap();
        assert_eq!(set.total_count(), 6);
        let values: Vec<i32> = (0..6).map(|i| set.nth_value(i)).collect();
        assert_eq!(values, vec![1, 2, 3, 7, 10, 11]);
    }

    #[test]
    fn test_nth_value_walks_past_ranges() {
        // A value after a range must not be shadowed by the range's width
        let set = WeightedRangeSet::parse("20-22,5").unwrap();
        assert_eq!(set.nth_value(3), 5);
    }

    #[test]
    fn test_nth_value_out_of_range_falls_back_to_first_segment() {
        let set = WeightedRangeSet::parse("4-6,9").unwrap();
        assert_eq!(set.nth_value(4), 4);
        assert_eq!(set.nth_value(100), 4);

        let set = WeightedRangeSet::parse("9,4-6").unwrap();
        assert_eq!(set.nth_value(u64::MAX), 9);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let set = WeightedRangeSet::parse(" 1 - 2 , 4 ").unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 2, 4]);
    }

    #[test]
    fn test_parse_negative_values() {
        let set = WeightedRangeSet::parse("-3--1,-7").unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![-3, -2, -1, -7]);
    }

    #[test]
    fn test_parse_rejects_malformed_segment() {
        let err = WeightedRangeSet::parse("1-3,x").unwrap_err();
        match err {
            GuestEffectError::MalformedRange { segment, .. } => assert_eq!(segment, "x"),
            other => panic!("Expected MalformedRange, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_inverted_and_empty() {
        assert!(WeightedRangeSet::parse("5-1").is_err());
        assert!(WeightedRangeSet::parse("").is_err());
        assert!(WeightedRangeSet::parse("1,,2").is_err());
        assert!(WeightedRangeSet::parse("1-").is_err());
    }

    #[test]
    fn test_sample_uses_scripted_index() {
        let set = WeightedRangeSet::parse("10-12,20").unwrap();
        let mut rng = ScriptedSource::new([0, 2, 3]);
        assert_eq!(set.sample(&mut rng), 10);
        assert_eq!(set.sample(&mut rng), 12);
        assert_eq!(set.sample(&mut rng), 20);
    }

    #[test]
    fn test_display_round_trips_canonical_text() {
        let set = WeightedRangeSet::parse("1-3, 5 ,8-8").unwrap();
        assert_eq!(set.to_string(), "1-3,5,8");
        assert_eq!(WeightedRangeSet::parse(&set.to_string()).unwrap(), set);
    }

    #[test]
    fn test_contains() {
        let set = WeightedRangeSet::parse("1-3,10").unwrap();
        assert!(set.contains(2));
        assert!(set.contains(10));
        assert!(!set.contains(4));
    }
}
