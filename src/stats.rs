use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::error::AllocationError;

/// Upper bound for every free numeric input (points, base values).
pub const MAX_INPUT: u32 = 999_999;
/// Cross-attribute cap on the raw weights, in percent.
pub const WEIGHT_CAP: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    #[serde(rename = "atk")]
    Attack,
    #[serde(rename = "def")]
    Defense,
    #[serde(rename = "spatk")]
    SpecialAttack,
    #[serde(rename = "spdef")]
    SpecialDefense,
    #[serde(rename = "speed")]
    Speed,
}

impl Attribute {
    pub const COUNT: usize = 5;

    pub const ALL: [Attribute; Attribute::COUNT] = [
        Attribute::Attack,
        Attribute::Defense,
        Attribute::SpecialAttack,
        Attribute::SpecialDefense,
        Attribute::Speed,
    ];

    pub const fn index(self) -> usize {
        match self {
            Attribute::Attack => 0,
            Attribute::Defense => 1,
            Attribute::SpecialAttack => 2,
            Attribute::SpecialDefense => 3,
            Attribute::Speed => 4,
        }
    }

    /// Short label used next to the weight controls.
    pub fn label(self) -> &'static str {
        match self {
            Attribute::Attack => "Atk",
            Attribute::Defense => "Def",
            Attribute::SpecialAttack => "SpAtk",
            Attribute::SpecialDefense => "SpDef",
            Attribute::Speed => "Speed",
        }
    }

    /// Long label used in the preview and the exported text.
    pub fn display_name(self) -> &'static str {
        match self {
            Attribute::Attack => "Attack",
            Attribute::Defense => "Defense",
            Attribute::SpecialAttack => "Special Atk",
            Attribute::SpecialDefense => "Special Defense",
            Attribute::Speed => "Speed",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One value per attribute, always walked in declared order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct PerStat<T> {
    #[serde(default)]
    pub atk: T,
    #[serde(default)]
    pub def: T,
    #[serde(default)]
    pub spatk: T,
    #[serde(default)]
    pub spdef: T,
    #[serde(default)]
    pub speed: T,
}

impl<T: Eq> Eq for PerStat<T> {}

impl<T> PerStat<T> {
    pub fn from_fn(mut f: impl FnMut(Attribute) -> T) -> Self {
        Self {
            atk: f(Attribute::Attack),
            def: f(Attribute::Defense),
            spatk: f(Attribute::SpecialAttack),
            spdef: f(Attribute::SpecialDefense),
            speed: f(Attribute::Speed),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &T)> + '_ {
        Attribute::ALL.into_iter().map(move |attr| (attr, &self[attr]))
    }

    pub fn map<U>(&self, mut f: impl FnMut(Attribute, &T) -> U) -> PerStat<U> {
        PerStat::from_fn(|attr| f(attr, &self[attr]))
    }
}

impl<T: Copy> PerStat<T> {
    pub fn from_array(values: [T; Attribute::COUNT]) -> Self {
        Self::from_fn(|attr| values[attr.index()])
    }

    pub fn to_array(&self) -> [T; Attribute::COUNT] {
        Attribute::ALL.map(|attr| self[attr])
    }
}

impl PerStat<u32> {
    pub fn total(&self) -> u64 {
        self.iter().map(|(_, value)| u64::from(*value)).sum()
    }
}

impl<T> Index<Attribute> for PerStat<T> {
    type Output = T;

    fn index(&self, attr: Attribute) -> &T {
        match attr {
            Attribute::Attack => &self.atk,
            Attribute::Defense => &self.def,
            Attribute::SpecialAttack => &self.spatk,
            Attribute::SpecialDefense => &self.spdef,
            Attribute::Speed => &self.speed,
        }
    }
}

impl<T> IndexMut<Attribute> for PerStat<T> {
    fn index_mut(&mut self, attr: Attribute) -> &mut T {
        match attr {
            Attribute::Attack => &mut self.atk,
            Attribute::Defense => &mut self.def,
            Attribute::SpecialAttack => &mut self.spatk,
            Attribute::SpecialDefense => &mut self.spdef,
            Attribute::Speed => &mut self.speed,
        }
    }
}

/// Raw per-attribute intensities. Every value is within 0..=100 and the five
/// never sum above [`WEIGHT_CAP`]; mutation goes through [`RawWeights::try_set`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RawWeights(PerStat<u32>);

impl RawWeights {
    pub fn new(values: PerStat<u32>) -> Result<Self, AllocationError> {
        let mut weights = Self::default();
        for (attr, value) in values.iter() {
            weights.try_set(attr, *value)?;
        }
        Ok(weights)
    }

    pub fn from_array(values: [u32; Attribute::COUNT]) -> Result<Self, AllocationError> {
        Self::new(PerStat::from_array(values))
    }

    pub fn get(&self, attr: Attribute) -> u32 {
        self.0[attr]
    }

    pub fn total(&self) -> u32 {
        self.0.iter().map(|(_, value)| *value).sum()
    }

    pub fn as_stats(&self) -> &PerStat<u32> {
        &self.0
    }

    /// Replaces one weight, rejecting the edit when it would leave the range
    /// or push the total past the cap. A rejected edit changes nothing.
    pub fn try_set(&mut self, attr: Attribute, value: u32) -> Result<(), AllocationError> {
        if value > WEIGHT_CAP {
            return Err(AllocationError::WeightOutOfRange {
                attribute: attr,
                value,
            });
        }
        let others = self.total() - self.0[attr];
        if others + value > WEIGHT_CAP {
            return Err(AllocationError::CapacityExceeded {
                attribute: attr,
                requested: value,
                total: others + value,
            });
        }
        self.0[attr] = value;
        Ok(())
    }
}

/// Reads an integer the forgiving way numeric text fields do: leading
/// whitespace is skipped, parsing stops at the first non-digit, anything
/// unparseable becomes 0 and the result is clamped to `0..=max`.
pub fn clamp_input(text: &str, max: u32) -> u32 {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let mut value: u64 = 0;
    let mut seen_digit = false;
    for byte in digits.bytes() {
        if !byte.is_ascii_digit() {
            break;
        }
        seen_digit = true;
        value = value
            .saturating_mul(10)
            .saturating_add(u64::from(byte - b'0'));
    }
    if !seen_digit || negative {
        return 0;
    }
    value.min(u64::from(max)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_keep_declared_order() {
        let keys = serde_json::to_string(&Attribute::ALL).unwrap();
        assert_eq!(keys, r#"["atk","def","spatk","spdef","speed"]"#);
        for (idx, attr) in Attribute::ALL.iter().enumerate() {
            assert_eq!(attr.index(), idx);
        }
    }

    #[test]
    fn per_stat_indexes_by_attribute() {
        let mut stats = PerStat::from_array([1u32, 2, 3, 4, 5]);
        assert_eq!(stats[Attribute::SpecialAttack], 3);
        stats[Attribute::Speed] = 9;
        assert_eq!(stats.to_array(), [1, 2, 3, 4, 9]);
        assert_eq!(stats.total(), 19);
    }

    #[test]
    fn per_stat_deserializes_partial_maps() {
        let stats: PerStat<u32> = serde_json::from_str(r#"{ "def": 40, "speed": 10 }"#).unwrap();
        assert_eq!(stats.to_array(), [0, 40, 0, 0, 10]);
    }

    #[test]
    fn weights_accept_edits_up_to_the_cap() {
        let mut weights = RawWeights::default();
        weights.try_set(Attribute::Attack, 60).unwrap();
        weights.try_set(Attribute::Speed, 40).unwrap();
        assert_eq!(weights.total(), 100);
        // Lowering an attribute at the cap is always allowed.
        weights.try_set(Attribute::Attack, 55).unwrap();
        assert_eq!(weights.total(), 95);
    }

    #[test]
    fn weights_reject_edits_past_the_cap_without_changes() {
        let mut weights = RawWeights::from_array([50, 50, 0, 0, 0]).unwrap();
        let err = weights.try_set(Attribute::Speed, 5).unwrap_err();
        assert_eq!(
            err,
            AllocationError::CapacityExceeded {
                attribute: Attribute::Speed,
                requested: 5,
                total: 105,
            }
        );
        assert_eq!(weights.as_stats().to_array(), [50, 50, 0, 0, 0]);
    }

    #[test]
    fn weights_reject_values_above_one_hundred() {
        let mut weights = RawWeights::default();
        assert!(matches!(
            weights.try_set(Attribute::Defense, 101),
            Err(AllocationError::WeightOutOfRange { value: 101, .. })
        ));
        assert!(RawWeights::from_array([60, 30, 20, 0, 0]).is_err());
    }

    #[test]
    fn clamp_input_follows_text_field_rules() {
        assert_eq!(clamp_input("42", MAX_INPUT), 42);
        assert_eq!(clamp_input("  17abc", MAX_INPUT), 17);
        assert_eq!(clamp_input("3.9", MAX_INPUT), 3);
        assert_eq!(clamp_input("-8", MAX_INPUT), 0);
        assert_eq!(clamp_input("", MAX_INPUT), 0);
        assert_eq!(clamp_input("abc", MAX_INPUT), 0);
        assert_eq!(clamp_input("123456789012345678901234", MAX_INPUT), MAX_INPUT);
        assert_eq!(clamp_input("1000000", MAX_INPUT), MAX_INPUT);
    }
}
