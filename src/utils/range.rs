/// A pair of calibration bounds, serialized as `[start, end]`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Range<T> {
    pub start: T,
    pub end: T,
}

impl<T: Ord + Copy> Range<T> {
    /// Returns the same range reordered so that `start <= end`.
    pub fn normalized(self) -> Self {
        Self {
            start: self.start.min(self.end),
            end: self.end.max(self.start),
        }
    }

    /// Clamps `value` into the range. The range must be normalized.
    pub fn clamp(&self, value: T) -> T {
        value.clamp(self.start, self.end)
    }
}

impl<T: Copy> From<[T; 2]> for Range<T> {
    fn from(value: [T; 2]) -> Self {
        Self {
            start: value[0],
            end: value[1],
        }
    }
}

impl<T> serde::Serialize for Range<T>
where
    T: serde::Serialize + Copy,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Serialize the Range as an array [start, end]
        [self.start, self.end].serialize(serializer)
    }
}

impl<'de, T> serde::Deserialize<'de> for Range<T>
where
    T: serde::Deserialize<'de> + Copy,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Deserialize from an array [start, end]
        let array: [T; 2] = serde::Deserialize::deserialize(deserializer)?;
        Ok(Self::from(array))
    }
}
