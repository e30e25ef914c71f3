//! Shared harness for the integration tests: the embedded registry, an
//! engine over it and a few canned run openings.

#![allow(dead_code)]

use game_content::ContentRegistry;
use game_core::{
    Command, GameConfig, GameEngine, GeneratorState, MapMode, NodeKind, Progression, RunState,
};

pub struct Harness {
    pub registry: ContentRegistry,
    pub config: GameConfig,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_mode(MapMode::Grid)
    }

    pub fn with_mode(mode: MapMode) -> Self {
        Self {
            registry: ContentRegistry::with_builtin().unwrap(),
            config: GameConfig::default().with_map_mode(mode),
        }
    }

    pub fn engine(&self) -> GameEngine<'_> {
        GameEngine::new(self.registry.env(&self.config))
    }

    /// Applies one command, panicking on engine errors.
    pub fn step(
        &self,
        state: &RunState,
        command: Command,
        rng: GeneratorState,
    ) -> (RunState, GeneratorState) {
        self.engine()
            .apply(state, &command, rng)
            .unwrap_or_else(|e| panic!("{command:?} failed: {e}"))
    }

    /// `NewRun` followed by the first starter blessing.
    pub fn start(&self, seed: &str) -> (RunState, GeneratorState) {
        let menu = RunState::menu();
        let (state, rng) = self.step(
            &menu,
            Command::NewRun { seed: seed.into() },
            GeneratorState::seed("ignored"),
        );
        self.step(&state, Command::ChooseStarterBlessing { index: 0 }, rng)
    }

    /// Starts a run and enters a normal fight.
    ///
    /// Only valid in pages mode, whose first page always leads with a normal monster.
    pub fn start_combat(&self, seed: &str) -> (RunState, GeneratorState) {
        let (state, rng) = self.start(seed);
        let (state, rng) = self.step(&state, Command::OpenPage, rng);
        self.step(&state, Command::ChooseOffer { index: 0 }, rng)
    }
}

/// Id of the first node at the current depth that is a plain monster fight.
pub fn first_monster_node(state: &RunState) -> Option<String> {
    let grid = state.progression.as_ref().and_then(Progression::grid)?;
    grid.available_nodes()
        .find(|node| node.kind == NodeKind::Monster)
        .map(|node| node.id.clone())
}
