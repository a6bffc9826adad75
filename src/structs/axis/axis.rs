use super::AxisBuilder;
use crate::traits::IdxType;
use std::borrow::Cow;
use std::hash::{Hash, Hasher};
use std::ops::Range;

/// One mode of a tensor: an optional human-readable label plus the half-open
/// range of valid indices along that mode.
///
/// Two axes are equal when their label and range match, regardless of where
/// they were built. This is simpler than tracking axis identity across
/// tensors; callers that need to line up modes between tensors do so
/// explicitly (see [`crate::structs::axis::map_axes`]).
#[derive(Clone, Debug)]
pub struct Axis<IT = isize>
where
    IT: IdxType,
{
    pub(super) label: Option<String>,
    pub(super) range: Range<IT>,
}

impl<IT> Axis<IT>
where
    IT: IdxType,
{
    /// Returns the label of the axis.
    /// If no label was set, `None` is returned.
    ///
    /// ```
    /// use stensor::structs::axis::AxisBuilder;
    ///
    /// let axis = AxisBuilder::new().label("x").range(0..10).build();
    /// assert_eq!(axis.label(), Some("x"));
    /// ```
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the range of the axis.
    ///
    /// ```
    /// use stensor::structs::axis::AxisBuilder;
    ///
    /// let axis = AxisBuilder::new().range(0..10).build();
    /// assert_eq!(axis.range(), 0..10);
    /// ```
    pub fn range(&self) -> Range<IT> {
        self.range.clone()
    }

    /// Returns whether the upper bound is not greater than the lower bound.
    ///
    /// ```
    /// use stensor::structs::axis::AxisBuilder;
    ///
    /// let axis = AxisBuilder::new().range(10..0).build();
    /// assert!(axis.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Returns the lower bound (inclusive) of the axis.
    ///
    /// ```
    /// use stensor::structs::axis::AxisBuilder;
    ///
    /// let axis = AxisBuilder::new().range(0..10).build();
    /// assert_eq!(axis.lower(), 0);
    /// ```
    pub fn lower(&self) -> IT {
        self.range.start.clone()
    }

    /// Returns the upper bound (exclusive) of the axis.
    ///
    /// ```
    /// use stensor::structs::axis::AxisBuilder;
    ///
    /// let axis = AxisBuilder::new().range(0..10).build();
    /// assert_eq!(axis.upper(), 10);
    /// ```
    pub fn upper(&self) -> IT {
        self.range.end.clone()
    }

    /// Returns the length of the axis.
    /// If the upper bound is not greater than the lower bound, `0` is returned.
    ///
    /// ```
    /// use stensor::structs::axis::AxisBuilder;
    ///
    /// let axis = AxisBuilder::new().range(0..10).build();
    /// assert_eq!(axis.len(), 10);
    /// ```
    pub fn len(&self) -> IT {
        if self.range.start < self.range.end {
            self.range.end.clone() - self.range.start.clone()
        } else {
            IT::zero()
        }
    }

    /// Creates a new axis, modifies it with a new label.
    ///
    /// ```
    /// use stensor::structs::axis::AxisBuilder;
    ///
    /// let axis = AxisBuilder::new().range(0..10).build();
    /// let new_axis = axis.clone_with_label("y");
    /// assert_eq!(new_axis.label(), Some("y"));
    /// ```
    pub fn clone_with_label<'a>(&'a self, label: impl Into<Cow<'a, str>>) -> Self {
        AxisBuilder::from(self).label(label).build()
    }

    /// Creates a new axis, modifies it with a new range.
    ///
    /// ```
    /// use stensor::structs::axis::AxisBuilder;
    ///
    /// let axis = AxisBuilder::new().range(0..10).build();
    /// let new_axis = axis.clone_with_range(0..20);
    /// assert_eq!(new_axis.range(), 0..20);
    /// ```
    pub fn clone_with_range(&self, range: Range<IT>) -> Self {
        AxisBuilder::from(self).range(range).build()
    }

    /// Creates a new axis that covers both two old axes.
    ///
    /// ```
    /// use stensor::structs::axis::AxisBuilder;
    ///
    /// let axis1 = AxisBuilder::new().range(0..10).build();
    /// let axis2 = AxisBuilder::new().range(20..30).build();
    /// let new_axis = axis1.extend(&axis2);
    /// assert_eq!(new_axis.range(), 0..30);
    /// ```
    pub fn extend(&self, other: &Self) -> Self {
        let self_start = self.range.start.clone();
        let self_end = self.range.end.clone();
        let other_start = other.range.start.clone();
        let other_end = other.range.end.clone();
        AxisBuilder::new()
            .range(self_start.min(other_start)..self_end.max(other_end))
            .build()
    }

    /// Creates a new named axis that covers both two old axes.
    ///
    /// ```
    /// use stensor::structs::axis::AxisBuilder;
    ///
    /// let axis1 = AxisBuilder::new().label("x").range(0..10).build();
    /// let axis2 = AxisBuilder::new().label("y").range(20..30).build();
    /// let new_axis = axis1.extend_with_label(&axis2, "z");
    /// assert_eq!(new_axis.range(), 0..30);
    /// ```
    pub fn extend_with_label<'a>(&'a self, other: &Self, label: impl Into<Cow<'a, str>>) -> Self {
        let self_start = self.range.start.clone();
        let self_end = self.range.end.clone();
        let other_start = other.range.start.clone();
        let other_end = other.range.end.clone();
        AxisBuilder::new()
            .label(label)
            .range(self_start.min(other_start)..self_end.max(other_end))
            .build()
    }

    /// Creates a new axis that contains only the common parts of two old axes.
    ///
    /// ```
    /// use stensor::structs::axis::AxisBuilder;
    ///
    /// let axis1 = AxisBuilder::new().range(0..20).build();
    /// let axis2 = AxisBuilder::new().range(10..30).build();
    /// let new_axis = axis1.intersect(&axis2);
    /// assert_eq!(new_axis.range(), 10..20);
    ///
    /// let axis2 = AxisBuilder::new().range(30..40).build();
    /// let new_axis = axis1.intersect(&axis2);
    /// assert!(new_axis.is_empty());
    /// ```
    pub fn intersect(&self, other: &Self) -> Self {
        let self_start = self.range.start.clone();
        let self_end = self.range.end.clone();
        let other_start = other.range.start.clone();
        let other_end = other.range.end.clone();
        AxisBuilder::new()
            .range(self_start.max(other_start)..self_end.min(other_end))
            .build()
    }

    /// Creates a named new axis that contains only the common parts of two old axes.
    ///
    /// ```
    /// use stensor::structs::axis::AxisBuilder;
    ///
    /// let axis1 = AxisBuilder::new().label("x").range(0..20).build();
    /// let axis2 = AxisBuilder::new().label("y").range(10..30).build();
    /// let new_axis = axis1.intersect_with_label(&axis2, "z");
    /// assert_eq!(new_axis.range(), 10..20);
    ///
    /// let axis2 = AxisBuilder::new().label("y").range(30..40).build();
    /// let new_axis = axis1.intersect_with_label(&axis2, "z");
    /// assert!(new_axis.is_empty());
    /// ```
    pub fn intersect_with_label<'a>(
        &'a self,
        other: &Self,
        label: impl Into<Cow<'a, str>>,
    ) -> Self {
        let self_start = self.range.start.clone();
        let self_end = self.range.end.clone();
        let other_start = other.range.start.clone();
        let other_end = other.range.end.clone();
        AxisBuilder::new()
            .label(label)
            .range(self_start.max(other_start)..self_end.min(other_end))
            .build()
    }
}

impl<IT> PartialEq for Axis<IT>
where
    IT: IdxType,
{
    /// Two axes are equal when their label and range are equal.
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.range == other.range
    }
}

impl<IT> Eq for Axis<IT> where IT: IdxType {}

impl<IT> Hash for Axis<IT>
where
    IT: IdxType,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state);
        self.range.start.to_i64().hash(state);
        self.range.end.to_i64().hash(state);
    }
}

impl<IT> std::fmt::Display for Axis<IT>
where
    IT: IdxType,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{}[{}..{}]", label, self.range.start, self.range.end),
            None => write!(f, "[{}..{}]", self.range.start, self.range.end),
        }
    }
}

impl<IT> From<IT> for Axis<IT>
where
    IT: IdxType,
{
    /// Creates a new axis with a range `0..upper`.
    /// The range is half-inclusive, for example, `0..10` contains 0 but not 10.
    ///
    /// ```
    /// use stensor::structs::axis::Axis;
    ///
    /// let axis = Axis::from(10);
    /// assert_eq!(axis.range(), 0..10);
    /// ```
    fn from(upper: IT) -> Self {
        AxisBuilder::new().range(IT::zero()..upper).build()
    }
}

impl<IT> From<Range<IT>> for Axis<IT>
where
    IT: IdxType,
{
    /// Creates a new axis with the given range.
    /// The range is half-inclusive, for example, `0..10` contains 0 but not 10.
    ///
    /// ```
    /// use stensor::structs::axis::Axis;
    ///
    /// let axis = Axis::from(0..10);
    /// ```
    fn from(range: Range<IT>) -> Self {
        AxisBuilder::new().range(range).build()
    }
}
