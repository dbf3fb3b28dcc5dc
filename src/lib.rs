// Library surface for headless/integration tests and reuse.
// The binary only adds CLI parsing and terminal bootstrapping on top.
pub mod app;
pub mod duration;
pub mod error;
pub mod host;
pub mod logging;
pub mod runtime;
pub mod session;
pub mod sites;
pub mod text_input;
pub mod theme;
pub mod ui;
