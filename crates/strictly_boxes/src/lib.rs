//! Strictly Boxes - type-safe dots and boxes
//!
//! Players take turns drawing edges between adjacent dots. Drawing the
//! fourth edge around a box claims it for the player, who then moves
//! again. When every box is claimed the players with the most boxes win.
//!
//! # Architecture
//!
//! - **Grid**: one flat buffer of typed cells with horizontal and vertical
//!   edge views
//! - **Typestate**: `GameSetup` → `GameInProgress` → `GameFinished`
//! - **Contracts**: placement preconditions and debug-build postconditions
//! - **Parser**: one line of input becomes one `Move`
//! - **Persistence**: plain-text save files
//! - **Session**: the prompt/read/apply loop over any `BufRead` and `Write`
//!
//! # Example
//!
//! ```
//! use strictly_boxes::{Dimensions, GameSetup, Orientation, Placement, PlayerCount, PlayerId};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let setup = GameSetup::new(Dimensions::new(2, 2)?, PlayerCount::new(2)?)?;
//! let mut game = setup.start();
//! let claimed = game.place(Placement::new(PlayerId::FIRST, 0, 0, Orientation::Horizontal))?;
//! assert_eq!(claimed, 0);
//! assert_eq!(game.to_move().letter(), 'B');
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod contracts;
mod grid;
pub mod invariants;
mod parser;
mod persistence;
mod phases;
mod rules;
mod scanner;
mod session;
mod types;
mod typestate;

// Crate-level exports - Domain types
pub use types::{
    Dimensions, MAX_DIMENSION, MAX_PLAYERS, MIN_DIMENSION, MIN_PLAYERS, PlayerCount, PlayerId,
    SetupError,
};

// Crate-level exports - Grid
pub use grid::{EdgeRef, Grid, Orientation, View};

// Crate-level exports - Moves
pub use action::{Move, MoveError, Placement};

// Crate-level exports - Typestate phases
pub use phases::Outcome;
pub use typestate::{GameFinished, GameInProgress, GameResult, GameSetup};

// Crate-level exports - Contracts
pub use contracts::{
    Contract, EdgeInBounds, EdgeIsUndrawn, LegalPlacement, PlacementContract, PlacementSnapshot,
    PlayersTurn,
};

// Crate-level exports - Rules
pub use rules::{next_to_move, winners};

// Crate-level exports - Input
pub use parser::{InputError, MAX_COORDINATE, MAX_SAVE_PATH_LEN, read_move};
pub use scanner::{Number, Scanner, is_line_end};

// Crate-level exports - Persistence
pub use persistence::{LoadError, SaveError, load, read_game, save, write_game};

// Crate-level exports - Session
pub use session::{PlayError, Session};
