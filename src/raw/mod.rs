mod arena;
mod handle;
mod node;
mod raw_tavl_map;
mod size;

pub(crate) use handle::{Generation, Handle};
pub(crate) use node::SearchOutcome;
pub(crate) use raw_tavl_map::RawTavlMap;
