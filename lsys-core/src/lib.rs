//! Lindenmayer-system grammar engine and turtle interpreter.
//!
//! A [`Grammar`] is expanded into a symbol string, optionally condensed by a
//! [`ReductionSet`], then replayed by an [`Interpreter`] against any
//! [`Renderer`]. [`LSystem`] bundles the pieces.

pub mod action;
pub mod backend;
pub mod canvas;
pub mod condense;
pub mod config;
pub mod error;
pub mod expand;
pub mod grammar;
pub mod hooks;
pub mod interpreter;
pub mod lsystem;
pub mod params;
pub mod state;

pub use action::{Action, ActionSpec, DispatchTable};
pub use backend::Renderer;
pub use canvas::Canvas;
pub use condense::ReductionSet;
pub use error::{ErrorKind, LsysError, LsysResult, Severity};
pub use expand::{Iterations, expand};
pub use grammar::{Alternative, Grammar, Production};
pub use interpreter::{InitialState, Interpreter};
pub use lsystem::{DrawOptions, LSystem};
pub use params::Params;
