use std::fmt;

use log::warn;
use serde::{Serialize, Serializer};

use crate::stats::Attribute;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Nature {
    #[default]
    Neutral,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Boosted,
    Lowered,
    None,
}

impl Marker {
    pub fn suffix(self) -> &'static str {
        match self {
            Marker::Boosted => "(+)",
            Marker::Lowered => "(-)",
            Marker::None => "",
        }
    }
}

impl Nature {
    pub const ALL: [Nature; 21] = [
        Nature::Neutral,
        Nature::Lonely,
        Nature::Brave,
        Nature::Adamant,
        Nature::Naughty,
        Nature::Bold,
        Nature::Relaxed,
        Nature::Impish,
        Nature::Lax,
        Nature::Timid,
        Nature::Hasty,
        Nature::Jolly,
        Nature::Naive,
        Nature::Modest,
        Nature::Mild,
        Nature::Quiet,
        Nature::Rash,
        Nature::Calm,
        Nature::Gentle,
        Nature::Sassy,
        Nature::Careful,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Nature::Neutral => "Neutral",
            Nature::Lonely => "Lonely",
            Nature::Brave => "Brave",
            Nature::Adamant => "Adamant",
            Nature::Naughty => "Naughty",
            Nature::Bold => "Bold",
            Nature::Relaxed => "Relaxed",
            Nature::Impish => "Impish",
            Nature::Lax => "Lax",
            Nature::Timid => "Timid",
            Nature::Hasty => "Hasty",
            Nature::Jolly => "Jolly",
            Nature::Naive => "Naive",
            Nature::Modest => "Modest",
            Nature::Mild => "Mild",
            Nature::Quiet => "Quiet",
            Nature::Rash => "Rash",
            Nature::Calm => "Calm",
            Nature::Gentle => "Gentle",
            Nature::Sassy => "Sassy",
            Nature::Careful => "Careful",
        }
    }

    /// The (boosted, lowered) pair, or `None` for the neutral nature.
    pub fn modifiers(self) -> Option<(Attribute, Attribute)> {
        use Attribute::*;
        match self {
            Nature::Neutral => None,
            Nature::Lonely => Some((Attack, Defense)),
            Nature::Brave => Some((Attack, Speed)),
            Nature::Adamant => Some((Attack, SpecialAttack)),
            Nature::Naughty => Some((Attack, SpecialDefense)),
            Nature::Bold => Some((Defense, Attack)),
            Nature::Relaxed => Some((Defense, Speed)),
            Nature::Impish => Some((Defense, SpecialAttack)),
            Nature::Lax => Some((Defense, SpecialDefense)),
            Nature::Timid => Some((Speed, Attack)),
            Nature::Hasty => Some((Speed, Defense)),
            Nature::Jolly => Some((Speed, SpecialAttack)),
            Nature::Naive => Some((Speed, SpecialDefense)),
            Nature::Modest => Some((SpecialAttack, Attack)),
            Nature::Mild => Some((SpecialAttack, Defense)),
            Nature::Quiet => Some((SpecialAttack, Speed)),
            Nature::Rash => Some((SpecialAttack, SpecialDefense)),
            Nature::Calm => Some((SpecialDefense, Attack)),
            Nature::Gentle => Some((SpecialDefense, Defense)),
            Nature::Sassy => Some((SpecialDefense, Speed)),
            Nature::Careful => Some((SpecialDefense, SpecialAttack)),
        }
    }

    pub fn boosted(self) -> Option<Attribute> {
        self.modifiers().map(|(up, _)| up)
    }

    pub fn lowered(self) -> Option<Attribute> {
        self.modifiers().map(|(_, down)| down)
    }

    /// Total lookup: names match case-insensitively after trimming, and
    /// anything unknown resolves to [`Nature::Neutral`].
    pub fn from_name(name: &str) -> Nature {
        let wanted = name.trim();
        match Nature::ALL
            .iter()
            .find(|nature| nature.name().eq_ignore_ascii_case(wanted))
        {
            Some(nature) => *nature,
            None => {
                if !wanted.is_empty() {
                    warn!("unknown nature `{wanted}`, using {}", Nature::Neutral);
                }
                Nature::Neutral
            }
        }
    }

    pub fn marker_for(self, attr: Attribute) -> Marker {
        match self.modifiers() {
            Some((up, _)) if up == attr => Marker::Boosted,
            Some((_, down)) if down == attr => Marker::Lowered,
            _ => Marker::None,
        }
    }

    /// Dropdown caption, e.g. `Adamant (+Atk -SpAtk)`.
    pub fn caption(self) -> String {
        match self.modifiers() {
            Some((up, down)) => format!("{} (+{} -{})", self.name(), up.label(), down.label()),
            None => self.name().to_string(),
        }
    }
}

impl fmt::Display for Nature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Nature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
