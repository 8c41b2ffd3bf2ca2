//! Service layer: catalog and battle coordination.

pub mod battle_arena;
pub mod kitchen_service;

pub use battle_arena::BattleArena;
pub use kitchen_service::KitchenService;
