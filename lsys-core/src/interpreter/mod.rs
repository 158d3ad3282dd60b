//! The symbol interpreter.
//!
//! Replays an expanded string against a [`Renderer`]. Each symbol first
//! runs the render hooks, then its action from the [`DispatchTable`]. The
//! cursor state and the snapshot stack belong to a single [`Interpreter::run`]
//! call; the renderer is left wherever the pass stopped, including after an
//! error.

mod dispatch;

use lsys_graphics::types::{Point, Scalar};

use crate::action::DispatchTable;
use crate::backend::Renderer;
use crate::error::LsysResult;
use crate::hooks::{HookContext, RenderHook};
use crate::params::Params;
use crate::state::{CursorState, StateStack};

/// Where the turtle starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialState {
    pub position: Point,
    /// Degrees from the +x axis, counter-clockwise.
    pub heading: Scalar,
    pub step_length: Scalar,
    /// Pen width; `None` keeps the renderer's current width.
    pub pen_width: Option<Scalar>,
}

impl Default for InitialState {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            heading: 0.0,
            step_length: 5.0,
            pen_width: None,
        }
    }
}

/// Runs symbol strings through a dispatch table.
#[derive(Debug, Clone, Copy)]
pub struct Interpreter<'a> {
    table: &'a DispatchTable,
    params: &'a Params,
}

/// Mutable state of one pass.
pub(crate) struct Pass<'a, 'r> {
    pub(crate) cursor: CursorState,
    pub(crate) stack: StateStack,
    pub(crate) params: &'a Params,
    pub(crate) renderer: &'r mut dyn Renderer,
}

impl<'a> Interpreter<'a> {
    pub const fn new(table: &'a DispatchTable, params: &'a Params) -> Self {
        Self { table, params }
    }

    /// Interpret `symbols` from `initial`, returning the final cursor state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ErrorKind::StackUnderflow`] (fatal) when a
    /// restore symbol has no matching save. Drawing already sent to the
    /// renderer is not undone.
    pub fn run(
        &self,
        symbols: &str,
        initial: &InitialState,
        renderer: &mut dyn Renderer,
        hooks: &mut [Box<dyn RenderHook + '_>],
    ) -> LsysResult<CursorState> {
        let pen_width = initial.pen_width.unwrap_or_else(|| renderer.pen_width());
        renderer.pen_up();
        renderer.move_to(initial.position);
        renderer.set_heading(initial.heading);
        renderer.set_pen_width(pen_width);

        let mut pass = Pass {
            cursor: CursorState {
                position: initial.position,
                heading: initial.heading,
                pen_down: false,
                pen_width,
                step_length: initial.step_length,
                turning_angle: self.params.angle,
            },
            stack: StateStack::new(),
            params: self.params,
            renderer,
        };

        for (index, symbol) in symbols.chars().enumerate() {
            if !hooks.is_empty() {
                let ctx = HookContext {
                    symbol,
                    index,
                    cursor: &pass.cursor,
                    depth: pass.stack.depth(),
                };
                for hook in hooks.iter_mut() {
                    hook.before_symbol(&ctx, pass.renderer);
                }
                pass.cursor.pen_width = pass.renderer.pen_width();
            }
            pass.dispatch(self.table.get(symbol), index)?;
        }

        Ok(pass.cursor)
    }
}
