mod lit;
mod litvec;
mod varvec;

pub use lit::{Lit, Var};
pub use litvec::LitVec;
pub use varvec::VarVec;
