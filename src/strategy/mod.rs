//! Computer players.
//!
//! Every strategy implements `Strategy`: given a read-only engine and a
//! player, return the move to make. Candidates are ranked with the shared
//! `compare_moves` order, and `default_move` is the common fallback.
//!
//! | Strategy    | Looks at                                   |
//! |-------------|--------------------------------------------|
//! | `Corner`    | first open corner, strongest card          |
//! | `MaxFlips`  | immediate flip count                       |
//! | `Defensive` | card strength, edges, threats from hand    |
//! | `Minimax`   | one ply ahead against an opponent strategy |
//! | `Composite` | weighted agreement of other strategies     |

pub mod composite;
pub mod config;
pub mod corner;
pub mod defensive;
pub mod max_flips;
pub mod minimax;
pub mod play;
pub mod policy;

pub use composite::Composite;
pub use config::StrategyConfig;
pub use corner::Corner;
pub use defensive::Defensive;
pub use max_flips::MaxFlips;
pub use minimax::Minimax;
pub use play::{final_scores, play_out};
pub use policy::{best_or_default, compare_moves, default_move, select_best, Move, Strategy};
