//! Wire model for the positional Dispatch protocol.
//!
//! Everything position-sensitive lives here: the value model and ordered
//! field maps, the envelope that flattens a request behind its selector
//! prefix, and the decoder that pairs flat responses back into mappings.

mod decode;
mod envelope;
mod value;

pub use decode::{DecodedResult, RawResult, decode};
pub use envelope::RequestEnvelope;
pub use value::{FieldMap, WireValue};
