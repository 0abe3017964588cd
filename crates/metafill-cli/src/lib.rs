//! Library side of the `metafill` command: logging setup and the end-to-end
//! extension pipeline.

pub mod logging;
pub mod pipeline;
