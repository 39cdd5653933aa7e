use std::fmt;

/// The three agent kinds, in cyclic order.
///
/// Each kind beats exactly one other and loses to exactly one other:
/// rock beats scissors, scissors beats paper, paper beats rock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Rock,
    Paper,
    Scissors,
}

/// Which member of an ordered pair lost a contest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl Kind {
    pub const ALL: [Kind; 3] = [Kind::Rock, Kind::Paper, Kind::Scissors];

    pub fn index(self) -> usize {
        match self {
            Kind::Rock => 0,
            Kind::Paper => 1,
            Kind::Scissors => 2,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 3]
    }

    /// The kind this one converts on contact.
    pub fn prey(self) -> Kind {
        Kind::from_index(self.index() + 2)
    }

    /// The kind that converts this one on contact.
    pub fn predator(self) -> Kind {
        Kind::from_index(self.index() + 1)
    }

    /// Kind `i` beats kind `(i + 2) mod 3`. Irreflexive and never symmetric.
    pub fn beats(self, other: Kind) -> bool {
        self.prey() == other
    }
}

/// Decide an ordered pair. Returns the losing side, or `None` for equal kinds.
pub fn contest(first: Kind, second: Kind) -> Option<Side> {
    if first.beats(second) {
        Some(Side::Second)
    } else if second.beats(first) {
        Some(Side::First)
    } else {
        None
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Rock => "Rock",
            Kind::Paper => "Paper",
            Kind::Scissors => "Scissors",
        };
        write!(f, "{}", name)
    }
}

/// Per-kind head count of a population.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Census {
    pub rock: usize,
    pub paper: usize,
    pub scissors: usize,
}

impl Census {
    pub fn from_kinds(kinds: impl IntoIterator<Item = Kind>) -> Self {
        let mut census = Census::default();
        for kind in kinds {
            census.add(kind);
        }
        census
    }

    pub fn add(&mut self, kind: Kind) {
        match kind {
            Kind::Rock => self.rock += 1,
            Kind::Paper => self.paper += 1,
            Kind::Scissors => self.scissors += 1,
        }
    }

    pub fn get(&self, kind: Kind) -> usize {
        match kind {
            Kind::Rock => self.rock,
            Kind::Paper => self.paper,
            Kind::Scissors => self.scissors,
        }
    }

    pub fn total(&self) -> usize {
        self.rock + self.paper + self.scissors
    }

    /// The only kind left, once every other kind has been converted away.
    pub fn sole_survivor(&self) -> Option<Kind> {
        let mut present = Kind::ALL.into_iter().filter(|kind| self.get(*kind) > 0);
        match (present.next(), present.next()) {
            (Some(kind), None) => Some(kind),
            _ => None,
        }
    }
}
