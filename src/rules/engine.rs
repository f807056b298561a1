//! The game engine: both networks, energy, turn order and move rules.
//!
//! ## Moves
//!
//! - **Build path** along an unowned edge with exactly one endpoint in the
//!   mover's network. The other endpoint becomes a new leaf. If afterwards
//!   the two networks share exactly two vertices, the opponent's network is
//!   severed where the paths to those vertices diverge. Reaching the
//!   opponent's starting vertex wins.
//! - **Build factory** on a vertex of the mover's network that is not an
//!   opponent factory.
//! - **End turn**: the other side moves and collects energy.
//!
//! Invalid moves leave the state untouched and come back as
//! [`MoveOutcome::Rejected`]. `Err` is reserved for broken invariants.

use im::Vector;
use log::{debug, info, trace};

use super::energy::collect_energy;
use super::event::{GameEvent, GameObserver};
use super::snapshot::RenderSnapshot;
use crate::board::{Board, EdgeId, VertexId};
use crate::core::{Command, CommandRecord, Error, GameConfig, Result, Side, SideMap};
use crate::network::{NetworkTree, NodeId};

/// Energy and network of one side.
#[derive(Clone, Debug)]
pub struct PlayerState {
    pub energy: u32,
    pub network: NetworkTree,
}

impl PlayerState {
    fn new(root: VertexId, config: &GameConfig) -> Self {
        Self {
            energy: config.starting_energy,
            network: NetworkTree::new(root, config.root_is_factory, config.max_lineage_depth),
        }
    }

    fn afford(&self, cost: u32) -> std::result::Result<(), Rejection> {
        if self.energy < cost {
            Err(Rejection::InsufficientEnergy {
                required: cost,
                available: self.energy,
            })
        } else {
            Ok(())
        }
    }
}

/// Why a move was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// A side has already won and play is frozen.
    GameOver,
    /// No such edge on the board.
    UnknownEdge(EdgeId),
    /// No such vertex on the board.
    UnknownVertex(VertexId),
    /// The edge already belongs to a side.
    EdgeOwned { owner: Side },
    /// Not enough energy for the move.
    InsufficientEnergy { required: u32, available: u32 },
    /// Both endpoints are already in the mover's network.
    WouldFormCycle,
    /// Neither endpoint is in the mover's network.
    Disconnected,
    /// The build distance gate refused the move.
    TooFarFromFactory,
    /// The vertex is not part of the mover's network.
    NotInNetwork(VertexId),
    /// The opponent already has a factory on the vertex.
    OpponentFactory(VertexId),
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::GameOver => write!(f, "the game is over"),
            Rejection::UnknownEdge(edge) => write!(f, "{edge} does not exist"),
            Rejection::UnknownVertex(vertex) => write!(f, "{vertex} does not exist"),
            Rejection::EdgeOwned { owner } => write!(f, "edge already owned by {owner}"),
            Rejection::InsufficientEnergy { required, available } => {
                write!(f, "not enough energy ({available} < {required})")
            }
            Rejection::WouldFormCycle => write!(f, "both vertices already in network (cycle)"),
            Rejection::Disconnected => write!(f, "neither vertex in network"),
            Rejection::TooFarFromFactory => write!(f, "too far from factory"),
            Rejection::NotInNetwork(vertex) => write!(f, "{vertex} is not in the network"),
            Rejection::OpponentFactory(vertex) => write!(f, "{vertex} holds an opponent factory"),
        }
    }
}

/// Result of a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The network grew to `vertex`.
    PathBuilt {
        edge: EdgeId,
        vertex: VertexId,
        /// Opponent vertices lost to sabotage, in id order.
        severed: Vec<VertexId>,
        /// Set when this path reached the opponent's starting vertex.
        winner: Option<Side>,
    },
    /// A factory now stands on `vertex`.
    FactoryBuilt { vertex: VertexId },
    /// `next` is to move and collected `collected` energy.
    TurnEnded { next: Side, collected: u32 },
    /// A fresh game was set up.
    Reset,
    /// Nothing changed.
    Rejected(Rejection),
}

impl MoveOutcome {
    /// Check if the command changed the game.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        !matches!(self, MoveOutcome::Rejected(_))
    }

    /// The rejection reason, if any.
    #[must_use]
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            MoveOutcome::Rejected(r) => Some(*r),
            _ => None,
        }
    }
}

/// A validated path extension.
#[derive(Clone, Copy, Debug)]
struct PathPlan {
    parent: VertexId,
    child: VertexId,
}

/// A sabotage cut worked out before the move is applied.
#[derive(Clone, Debug)]
struct SeverPlan {
    between: (VertexId, VertexId),
    lineages: (Vec<NodeId>, Vec<NodeId>),
}

/// Owns the whole game state and applies commands to it.
pub struct GameEngine {
    config: GameConfig,
    board: Board,
    players: SideMap<PlayerState>,
    current: Side,
    turn: u32,
    winner: Option<Side>,
    history: Vector<CommandRecord>,
    observers: Vec<Box<dyn GameObserver>>,
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("config", &self.config)
            .field("current", &self.current)
            .field("turn", &self.turn)
            .field("winner", &self.winner)
            .field("energy", &SideMap::new(|side| self.players[side].energy))
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl GameEngine {
    /// Set up a new game.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let board = Board::generate(config.radius);
        let players = Self::fresh_players(&board, &config)?;
        Ok(Self {
            config,
            board,
            players,
            current: Side::Blue,
            turn: 1,
            winner: None,
            history: Vector::new(),
            observers: Vec::new(),
        })
    }

    fn fresh_players(board: &Board, config: &GameConfig) -> Result<SideMap<PlayerState>> {
        let start = |side: Side| {
            board.start_vertex(side).ok_or_else(|| Error::InvalidConfiguration {
                message: format!("radius {} has no starting vertex for {side}", board.radius()),
            })
        };
        let blue = start(Side::Blue)?;
        let red = start(Side::Red)?;
        Ok(SideMap::new(|side| {
            let root = if side == Side::Blue { blue } else { red };
            PlayerState::new(root, config)
        }))
    }

    // === Accessors ===

    /// The configuration this game runs with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The board, including current edge owners.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move.
    #[must_use]
    pub fn current_player(&self) -> Side {
        self.current
    }

    /// Turn number, starting at 1.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// First side to have won, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// State of one side.
    #[must_use]
    pub fn player(&self, side: Side) -> &PlayerState {
        &self.players[side]
    }

    /// Energy of one side.
    #[must_use]
    pub fn energy(&self, side: Side) -> u32 {
        self.players[side].energy
    }

    /// Network of one side.
    #[must_use]
    pub fn network(&self, side: Side) -> &NetworkTree {
        &self.players[side].network
    }

    /// Every command processed since the last reset.
    #[must_use]
    pub fn history(&self) -> &Vector<CommandRecord> {
        &self.history
    }

    /// Current read view.
    #[must_use]
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(self)
    }

    /// Register an observer. Observers survive resets.
    pub fn add_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    fn frozen(&self) -> bool {
        self.winner.is_some() && !self.config.play_after_win
    }

    // === Commands ===

    /// Apply a UI command.
    pub fn apply(&mut self, command: Command) -> Result<MoveOutcome> {
        match command {
            Command::BuildFactory(vertex) => self.attempt_build_factory(vertex),
            Command::BuildPath(edge) => self.attempt_build_path(edge),
            Command::EndTurn => self.end_turn(),
            Command::Reset => self.reset(),
        }
    }

    /// Extend the mover's network along `edge`.
    pub fn attempt_build_path(&mut self, edge: EdgeId) -> Result<MoveOutcome> {
        let command = Command::BuildPath(edge);
        let plan = match self.plan_path(edge) {
            Ok(plan) => plan,
            Err(rejection) => return Ok(self.reject(command, rejection)),
        };

        let side = self.current;
        let opponent = side.opponent();
        let sever = self.plan_sever(side, plan.child)?;

        // Planning validated everything below; the state changes from here.
        {
            let player = &mut self.players[side];
            player.network.attach(plan.parent, plan.child)?;
            player.energy -= self.config.path_cost;
        }
        self.board.set_owner(edge, Some(side))?;
        self.record(command, true);
        debug!("{side} extends {} -> {} along {edge}", plan.parent, plan.child);
        self.emit(&GameEvent::PathBuilt {
            side,
            edge,
            from: plan.parent,
            to: plan.child,
        });

        let severed = match sever {
            Some(sever) => self.sabotage(side, &sever)?,
            None => Vec::new(),
        };

        let mut winner = None;
        if plan.child == self.players[opponent].network.root_vertex() {
            info!("{side} reached the {opponent} start and wins");
            winner = Some(side);
            self.winner.get_or_insert(side);
            self.emit(&GameEvent::Won { side });
        }

        self.publish();
        Ok(MoveOutcome::PathBuilt {
            edge,
            vertex: plan.child,
            severed,
            winner,
        })
    }

    /// Build a factory on `vertex` for the mover.
    pub fn attempt_build_factory(&mut self, vertex: VertexId) -> Result<MoveOutcome> {
        let command = Command::BuildFactory(vertex);
        if let Err(rejection) = self.check_factory(vertex) {
            return Ok(self.reject(command, rejection));
        }

        let side = self.current;
        let player = &mut self.players[side];
        player.network.mark_factory(vertex)?;
        player.energy -= self.config.factory_cost;
        self.record(command, true);
        debug!("{side} builds a factory on {vertex}");
        self.emit(&GameEvent::FactoryBuilt { side, vertex });
        self.publish();
        Ok(MoveOutcome::FactoryBuilt { vertex })
    }

    /// Hand the turn to the opponent, who then collects energy.
    pub fn end_turn(&mut self) -> Result<MoveOutcome> {
        if self.frozen() {
            return Ok(self.reject(Command::EndTurn, Rejection::GameOver));
        }
        self.record(Command::EndTurn, true);

        let next = self.current.opponent();
        self.current = next;
        self.turn += 1;

        let collected = collect_energy(&self.players[next].network);
        for (vertex, amount) in &collected.factories {
            trace!("{next} factory at {vertex} yields {amount}");
        }
        self.players[next].energy += collected.total;
        debug!(
            "turn {} for {next}: collected {}, energy now {}",
            self.turn, collected.total, self.players[next].energy
        );

        self.emit(&GameEvent::TurnEnded { next, turn: self.turn });
        self.emit(&GameEvent::EnergyCollected {
            side: next,
            amount: collected.total,
        });
        self.publish();
        Ok(MoveOutcome::TurnEnded {
            next,
            collected: collected.total,
        })
    }

    /// Throw the game away and set up a new one with the same configuration.
    pub fn reset(&mut self) -> Result<MoveOutcome> {
        let board = Board::generate(self.config.radius);
        let players = Self::fresh_players(&board, &self.config)?;
        self.board = board;
        self.players = players;
        self.current = Side::Blue;
        self.turn = 1;
        self.winner = None;
        self.history = Vector::new();
        info!("starting a new game");

        self.emit(&GameEvent::Reset);
        self.publish();
        Ok(MoveOutcome::Reset)
    }

    // === Queries ===

    /// Every build and end-turn command the mover could issue right now.
    ///
    /// Reset is always available and not listed.
    #[must_use]
    pub fn legal_commands(&self) -> Vec<Command> {
        if self.frozen() {
            return Vec::new();
        }

        let mut commands: Vec<Command> = self
            .board
            .edges()
            .iter()
            .filter(|e| self.plan_path(e.id).is_ok())
            .map(|e| Command::BuildPath(e.id))
            .collect();

        let mut factories: Vec<VertexId> = self
            .network(self.current)
            .vertices()
            .filter(|&v| self.check_factory(v).is_ok())
            .collect();
        factories.sort_unstable();
        commands.extend(factories.into_iter().map(Command::BuildFactory));

        commands.push(Command::EndTurn);
        commands
    }

    /// Verify the structural invariants of both networks and the board.
    ///
    /// - each lookup holds exactly the nodes reachable from its root
    /// - an edge is owned by a side iff its endpoints are parent and child in
    ///   that side's network
    pub fn check_invariants(&self) -> Result<()> {
        for side in Side::ALL {
            if !self.players[side].network.lookup_is_consistent() {
                return Err(Error::LookupMismatch { side });
            }
        }
        for edge in self.board.edges() {
            let linked: Vec<Side> = Side::ALL
                .into_iter()
                .filter(|&side| self.players[side].network.is_parent_child(edge.a, edge.b))
                .collect();
            let expected = match linked.as_slice() {
                [] => None,
                [side] => Some(*side),
                _ => return Err(Error::OwnershipMismatch { edge: edge.id }),
            };
            if edge.owner != expected {
                return Err(Error::OwnershipMismatch { edge: edge.id });
            }
        }
        Ok(())
    }

    // === Internals ===

    fn plan_path(&self, edge: EdgeId) -> std::result::Result<PathPlan, Rejection> {
        if self.frozen() {
            return Err(Rejection::GameOver);
        }
        let edge = self.board.edge(edge).ok_or(Rejection::UnknownEdge(edge))?;
        if let Some(owner) = edge.owner {
            return Err(Rejection::EdgeOwned { owner });
        }

        let player = &self.players[self.current];
        player.afford(self.config.path_cost)?;

        let network = &player.network;
        let (parent, child) = match (network.contains(edge.a), network.contains(edge.b)) {
            (true, false) => (edge.a, edge.b),
            (false, true) => (edge.b, edge.a),
            (true, true) => return Err(Rejection::WouldFormCycle),
            (false, false) => return Err(Rejection::Disconnected),
        };

        let from = network.node_of(parent).ok_or(Rejection::NotInNetwork(parent))?;
        if !network.within_build_range(from) {
            return Err(Rejection::TooFarFromFactory);
        }
        Ok(PathPlan { parent, child })
    }

    fn check_factory(&self, vertex: VertexId) -> std::result::Result<(), Rejection> {
        if self.frozen() {
            return Err(Rejection::GameOver);
        }
        if self.board.vertex(vertex).is_none() {
            return Err(Rejection::UnknownVertex(vertex));
        }

        let player = &self.players[self.current];
        if !player.network.contains(vertex) {
            return Err(Rejection::NotInNetwork(vertex));
        }
        player.afford(self.config.factory_cost)?;
        if self.players[self.current.opponent()].network.is_factory(vertex) {
            return Err(Rejection::OpponentFactory(vertex));
        }
        Ok(())
    }

    /// Lineages to cut if `child` joining the mover's network leaves the
    /// two networks sharing exactly two vertices.
    ///
    /// The opponent's tree is untouched by the move, so lineages taken now
    /// stay valid for the cut.
    fn plan_sever(&self, side: Side, child: VertexId) -> Result<Option<SeverPlan>> {
        let theirs = &self.players[side.opponent()].network;
        let mut shared: Vec<VertexId> = self.players[side]
            .network
            .vertices()
            .chain(std::iter::once(child))
            .filter(|&v| theirs.contains(v))
            .collect();
        if shared.len() != 2 {
            return Ok(None);
        }
        shared.sort_unstable();

        Ok(Some(SeverPlan {
            between: (shared[0], shared[1]),
            lineages: (theirs.lineage(shared[0])?, theirs.lineage(shared[1])?),
        }))
    }

    /// Cut the opponent's network along a planned sever and release the
    /// edges that left it. Returns the opponent vertices removed.
    fn sabotage(&mut self, side: Side, sever: &SeverPlan) -> Result<Vec<VertexId>> {
        let opponent = side.opponent();
        let (a, b) = sever.between;
        let removed = self.players[opponent]
            .network
            .cut_at(&sever.lineages.0, &sever.lineages.1)?;
        let network = &self.players[opponent].network;
        let released_edges = self
            .board
            .release_owned(opponent, |e| network.contains(e.a) && network.contains(e.b));
        info!(
            "{side} severs {opponent} between {a} and {b}: {} vertices, {released_edges} edges lost",
            removed.len()
        );

        self.emit(&GameEvent::NetworkSevered {
            side: opponent,
            removed: removed.clone(),
            released_edges,
        });
        Ok(removed)
    }

    fn reject(&mut self, command: Command, rejection: Rejection) -> MoveOutcome {
        debug!("{} {command:?} rejected: {rejection}", self.current);
        self.record(command, false);
        MoveOutcome::Rejected(rejection)
    }

    fn record(&mut self, command: Command, applied: bool) {
        self.history
            .push_back(CommandRecord::new(self.current, command, self.turn, applied));
    }

    fn emit(&mut self, event: &GameEvent) {
        for observer in &mut self.observers {
            observer.on_event(event);
        }
    }

    fn publish(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = RenderSnapshot::capture(self);
        for observer in &mut self.observers {
            observer.on_snapshot(&snapshot);
        }
    }
}
