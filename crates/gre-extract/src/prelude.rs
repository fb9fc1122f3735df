pub use anstream::{eprintln, println};
pub use color_eyre::eyre::{eyre, Context, OptionExt, Result};
