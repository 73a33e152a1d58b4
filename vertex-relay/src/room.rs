//! Rooms: one game, two seats, and a broadcast channel.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info};

use vertex_bot::StrategyKind;
use vertex_core::{Cell, GameState, Player, RuleError};

use crate::error::RelayError;
use crate::models::{LastMove, ServerEvent};

const ROOM_ID_LEN: usize = 6;
const TOKEN_LEN: usize = 24;

/// Events buffered per room before slow subscribers start lagging.
const EVENT_CAPACITY: usize = 64;

fn random_string(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

// =============================================================================
// Room Id
// =============================================================================

/// Six ASCII letters or digits.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn generate() -> RoomId {
        RoomId(random_string(ROOM_ID_LEN))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RoomId {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == ROOM_ID_LEN && s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Ok(RoomId(s.to_string()))
        } else {
            Err(RelayError::InvalidRoomId(s.to_string()))
        }
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Room
// =============================================================================

#[derive(Debug, Clone)]
struct Seat {
    token: String,
}

/// One applied move, numbered from 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub ply: usize,
    pub player: Player,
    pub to: Cell,
}

pub struct Room {
    pub id: RoomId,
    pub game: GameState,
    seats: [Option<Seat>; 2],
    pub history: Vec<MoveRecord>,
    events: broadcast::Sender<ServerEvent>,
    /// Strategy playing the P2 seat, if any
    pub bot: Option<StrategyKind>,
    touched: Instant,
}

impl Room {
    pub fn new(id: RoomId, game: GameState, bot: Option<StrategyKind>) -> Room {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let mut room = Room {
            id,
            game,
            seats: [None, None],
            history: Vec::new(),
            events,
            bot,
            touched: Instant::now(),
        };
        if bot.is_some() {
            // nobody ever sees this token; the relay plays the seat itself
            room.seats[1] = Some(Seat {
                token: random_string(TOKEN_LEN),
            });
        }
        room
    }

    /// Claim the first free seat, returning its player and token.
    pub fn join(&mut self) -> Result<(Player, String), RelayError> {
        let index = self
            .seats
            .iter()
            .position(Option::is_none)
            .ok_or_else(|| RelayError::RoomFull(self.id.clone()))?;
        let player = if index == 0 { Player::One } else { Player::Two };
        let token = random_string(TOKEN_LEN);
        self.seats[index] = Some(Seat {
            token: token.clone(),
        });
        self.touched = Instant::now();
        info!(room = %self.id, %player, "seat taken");

        self.broadcast(ServerEvent::PlayerJoined { player });
        if self.is_ready() {
            self.broadcast(ServerEvent::GameStart {
                state: self.game.clone(),
            });
        }
        Ok((player, token))
    }

    /// Both seats are taken.
    pub fn is_ready(&self) -> bool {
        self.seats.iter().all(Option::is_some)
    }

    /// The player holding `token`.
    pub fn player_for(&self, token: &str) -> Result<Player, RelayError> {
        self.seats
            .iter()
            .position(|s| s.as_ref().is_some_and(|s| s.token == token))
            .map(|i| if i == 0 { Player::One } else { Player::Two })
            .ok_or(RelayError::BadToken)
    }

    /// Legal destinations for `player`; empty unless it is their turn in a
    /// running game.
    pub fn legal_moves_for(&self, player: Player) -> Vec<Cell> {
        if self.is_ready() && !self.game.is_over() && self.game.current_player == player {
            self.game.legal_moves()
        } else {
            Vec::new()
        }
    }

    /// Apply a move for `player` and tell every subscriber.
    pub fn play(&mut self, player: Player, to: Cell) -> Result<&GameState, RelayError> {
        if !self.is_ready() {
            return Err(RelayError::WaitingForOpponent);
        }
        if let Some(winner) = self.game.winner {
            return Err(RuleError::GameOver { winner }.into());
        }
        if self.game.current_player != player {
            return Err(RelayError::NotYourTurn);
        }

        self.game = self.game.try_apply_move(to)?;
        self.history.push(MoveRecord {
            ply: self.history.len() + 1,
            player,
            to,
        });
        self.touched = Instant::now();
        debug!(room = %self.id, %player, %to, "move applied");
        if let Some(winner) = self.game.winner {
            info!(room = %self.id, %winner, plies = self.history.len(), "game over");
        }

        self.broadcast(ServerEvent::GameUpdate {
            state: self.game.clone(),
            last_move: LastMove { player, to },
        });
        Ok(&self.game)
    }

    /// Whether the bot is due to move.
    pub fn bot_to_move(&self) -> bool {
        self.bot.is_some() && !self.game.is_over() && self.game.current_player == Player::Two
    }

    /// Let the bot pick and play a move. `None` if it is not the bot's turn
    /// or the bot has nothing to play.
    pub fn play_bot(&mut self, depth: u8) -> Option<Cell> {
        let kind = self.bot.filter(|_| self.bot_to_move())?;
        let legal = self.game.legal_moves();
        let mut strategy = kind.build(rand::random(), depth);
        let to = strategy.choose_move(&self.game, &legal)?;
        self.play(Player::Two, to).ok()?;
        Some(to)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.events.subscribe()
    }

    /// Open WebSocket subscriptions.
    pub fn subscribers(&self) -> usize {
        self.events.receiver_count()
    }

    /// A room can go once its game is over and nobody watches it any more, or
    /// once nobody has joined or moved for `idle_ttl`.
    pub fn is_reclaimable(&self, idle_ttl: Duration) -> bool {
        (self.game.is_over() && self.subscribers() == 0) || self.touched.elapsed() >= idle_ttl
    }

    fn broadcast(&self, event: ServerEvent) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }
}

// =============================================================================
// Registry
// =============================================================================

pub type RoomHandle = Arc<Mutex<Room>>;

/// All open rooms.
pub struct Rooms {
    inner: Mutex<HashMap<RoomId, RoomHandle>>,
    max_rooms: usize,
    idle_ttl: Duration,
}

/// Drop every reclaimable room. Rooms locked by a request are in use and stay.
fn reclaim(rooms: &mut HashMap<RoomId, RoomHandle>, idle_ttl: Duration) -> usize {
    let before = rooms.len();
    rooms.retain(|id, room| {
        let keep = room.try_lock().map_or(true, |room| !room.is_reclaimable(idle_ttl));
        if !keep {
            debug!(room = %id, "room reclaimed");
        }
        keep
    });
    before - rooms.len()
}

impl Rooms {
    pub fn new(max_rooms: usize, idle_ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            max_rooms,
            idle_ttl,
        }
    }

    /// Open a room under `id`, or under a fresh id if none is given.
    pub fn create(
        &self,
        id: Option<RoomId>,
        game: GameState,
        bot: Option<StrategyKind>,
    ) -> Result<RoomHandle, RelayError> {
        let mut rooms = self.inner.lock();
        if rooms.len() >= self.max_rooms && reclaim(&mut rooms, self.idle_ttl) == 0 {
            return Err(RelayError::TooManyRooms(self.max_rooms));
        }
        let id = match id {
            Some(id) if rooms.contains_key(&id) => return Err(RelayError::RoomExists(id)),
            Some(id) => id,
            None => loop {
                let id = RoomId::generate();
                if !rooms.contains_key(&id) {
                    break id;
                }
            },
        };
        let room = Arc::new(Mutex::new(Room::new(id.clone(), game, bot)));
        rooms.insert(id.clone(), room.clone());
        info!(room = %id, open = rooms.len(), "room created");
        Ok(room)
    }

    pub fn get(&self, id: &RoomId) -> Result<RoomHandle, RelayError> {
        self.inner
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| RelayError::RoomNotFound(id.clone()))
    }

    /// Close a room. Handles already held elsewhere keep working.
    pub fn remove(&self, id: &RoomId) -> Option<RoomHandle> {
        let room = self.inner.lock().remove(id);
        if room.is_some() {
            info!(room = %id, "room closed");
        }
        room
    }

    /// Drop finished rooms nobody watches and rooms idle past the TTL.
    pub fn sweep(&self) -> usize {
        let reclaimed = reclaim(&mut self.inner.lock(), self.idle_ttl);
        if reclaimed > 0 {
            info!(reclaimed, open = self.len(), "swept rooms");
        }
        reclaimed
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
