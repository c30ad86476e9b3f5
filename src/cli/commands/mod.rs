//! One module per subcommand, each exposing an `execute` function.

pub mod hash;
pub mod inspect;
pub mod open;
pub mod seal;
