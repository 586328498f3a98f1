//! Group-level interaction layers

pub mod contact;
pub mod non_contact;
pub mod reduce;

pub use contact::{contact_layer, fold_undirected};
pub use non_contact::non_contact_layer;
pub use reduce::me_vs_others;
