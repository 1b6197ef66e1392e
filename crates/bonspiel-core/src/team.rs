use serde::{Deserialize, Serialize};

/// The two sides of a curling match, named after their stone handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Red,
    Yellow,
}

impl Team {
    /// Both teams, in pool iteration order.
    pub const BOTH: [Team; 2] = [Team::Red, Team::Yellow];

    pub fn opponent(self) -> Team {
        match self {
            Team::Red => Team::Yellow,
            Team::Yellow => Team::Red,
        }
    }
}

/// A fixed two-slot container holding one value per team.
///
/// This is the arena pattern used for stone pools, score tallies, and
/// input collaborators: indexed access by `Team`, no map allocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerTeam<T> {
    pub red: T,
    pub yellow: T,
}

impl<T> PerTeam<T> {
    pub fn new(red: T, yellow: T) -> Self {
        Self { red, yellow }
    }

    pub fn get(&self, team: Team) -> &T {
        match team {
            Team::Red => &self.red,
            Team::Yellow => &self.yellow,
        }
    }

    pub fn get_mut(&mut self, team: Team) -> &mut T {
        match team {
            Team::Red => &mut self.red,
            Team::Yellow => &mut self.yellow,
        }
    }

    /// Build a `PerTeam` by calling `f` once per team.
    pub fn from_fn(mut f: impl FnMut(Team) -> T) -> Self {
        Self {
            red: f(Team::Red),
            yellow: f(Team::Yellow),
        }
    }
}

impl<T> std::ops::Index<Team> for PerTeam<T> {
    type Output = T;

    fn index(&self, team: Team) -> &T {
        self.get(team)
    }
}

impl<T> std::ops::IndexMut<Team> for PerTeam<T> {
    fn index_mut(&mut self, team: Team) -> &mut T {
        self.get_mut(team)
    }
}
