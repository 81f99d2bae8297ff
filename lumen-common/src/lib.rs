/*!
Cursor-based byte and bit readers shared by the lumen crates.

Both readers are bounds-checked and return `None` instead of panicking when
the underlying data runs out, so parsers built on top of them can propagate
failure with `?`.
*/

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod bit;
pub mod byte;
