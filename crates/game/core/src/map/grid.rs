//! Branching column map with guaranteed shop and boss placement.

use strum::{AsRefStr, Display, EnumString};

use crate::config::GameConfig;
use crate::env::{GeneratorState, Tier};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum NodeKind {
    Monster,
    Elite,
    Shop,
    Bonfire,
    Event,
    Boss,
}

impl NodeKind {
    /// Weighted roll over a `1..=100` draw: monster 50, elite 25, shop 10, bonfire 5, event 10.
    pub const fn from_roll(roll: u32) -> Self {
        match roll {
            0..=50 => Self::Monster,
            51..=75 => Self::Elite,
            76..=85 => Self::Shop,
            86..=90 => Self::Bonfire,
            _ => Self::Event,
        }
    }

    pub const fn combat_tier(self) -> Option<Tier> {
        match self {
            Self::Monster => Some(Tier::Normal),
            Self::Elite => Some(Tier::Elite),
            Self::Boss => Some(Tier::Boss),
            Self::Shop | Self::Bonfire | Self::Event => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapNode {
    pub id: String,
    pub column: u32,
    pub row: u32,
    pub kind: NodeKind,
    pub completed: bool,
}

impl MapNode {
    fn new(column: u32, row: u32, kind: NodeKind) -> Self {
        Self {
            id: format!("N{column}_{row}"),
            column,
            row,
            kind,
            completed: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridMap {
    pub columns: Vec<Vec<MapNode>>,
    /// Index of the column the player may enter next.
    pub depth: u32,
    /// Node entered but not yet completed.
    pub current: Option<String>,
}

/// Pure form of [`GridMap::generate`].
pub fn generate_map(rng: GeneratorState, columns: u32) -> (GeneratorState, GridMap) {
    let mut rng = rng;
    let map = GridMap::generate(&mut rng, columns);
    (rng, map)
}

impl GridMap {
    /// Builds `columns - 1` interior columns of 2–3 nodes and a boss column.
    ///
    /// Column counts below two are raised to two so a shop column always exists;
    /// counts above [`GameConfig::MAX_MAP_COLUMNS`] are lowered to it.
    pub fn generate(rng: &mut GeneratorState, columns: u32) -> Self {
        let total = columns.clamp(GameConfig::MIN_MAP_COLUMNS, GameConfig::MAX_MAP_COLUMNS);
        let mut grid: Vec<Vec<MapNode>> = Vec::with_capacity(total as usize);

        for column in 0..total - 1 {
            let count = rng.draw_int(2, 3);
            let nodes = (0..count)
                .map(|row| MapNode::new(column, row, NodeKind::from_roll(rng.draw_int(1, 100))))
                .collect();
            grid.push(nodes);
        }

        let has_shop = grid.iter().flatten().any(|node| node.kind == NodeKind::Shop);
        if !has_shop {
            let column = rng.draw_int(0, total - 2) as usize;
            let row = rng.draw_index(grid[column].len());
            grid[column][row].kind = NodeKind::Shop;
        }

        grid.push(vec![MapNode::new(total - 1, 0, NodeKind::Boss)]);

        Self {
            columns: grid,
            depth: 0,
            current: None,
        }
    }

    pub fn total_columns(&self) -> u32 {
        self.columns.len() as u32
    }

    pub fn node(&self, id: &str) -> Option<&MapNode> {
        self.columns.iter().flatten().find(|node| node.id == id)
    }

    fn node_mut(&mut self, id: &str) -> Option<&mut MapNode> {
        self.columns.iter_mut().flatten().find(|node| node.id == id)
    }

    /// Uncompleted nodes of the current depth.
    pub fn available_nodes(&self) -> impl Iterator<Item = &MapNode> {
        self.columns
            .get(self.depth as usize)
            .into_iter()
            .flatten()
            .filter(|node| !node.completed)
    }

    pub fn is_available(&self, id: &str) -> bool {
        self.available_nodes().any(|node| node.id == id)
    }

    /// Records `id` as the node being visited; returns its kind when reachable.
    pub fn enter(&mut self, id: &str) -> Option<NodeKind> {
        let kind = self.available_nodes().find(|node| node.id == id)?.kind;
        self.current = Some(id.to_owned());
        Some(kind)
    }

    pub fn current_node(&self) -> Option<&MapNode> {
        self.current.as_deref().and_then(|id| self.node(id))
    }

    /// Marks the current node completed and moves one column deeper.
    ///
    /// Depth saturates at the column count. Without a current node nothing changes.
    pub fn complete_and_advance(&mut self) -> bool {
        let Some(id) = self.current.take() else {
            return false;
        };
        if let Some(node) = self.node_mut(&id) {
            node.completed = true;
        }
        self.depth = (self.depth + 1).min(self.total_columns());
        true
    }

    pub fn boss(&self) -> Option<&MapNode> {
        self.columns.last().and_then(|column| column.first())
    }
}
