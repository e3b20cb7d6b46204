//! Unit tests mirroring the `src/` module tree

mod field;
mod io;
