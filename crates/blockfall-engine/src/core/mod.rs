pub use self::{board::*, piece::*, validator::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod validator;
