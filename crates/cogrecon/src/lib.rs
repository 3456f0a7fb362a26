#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use cogrecon_align as align;
