//! The assembled L-system: grammar, parameters, dispatch table and
//! reduction set, built once and reused for any number of drawings.

use rand::Rng;

use crate::action::{ActionSpec, DispatchTable};
use crate::backend::Renderer;
use crate::condense::ReductionSet;
use crate::config::LSystemConfig;
use crate::error::{LsysError, LsysResult};
use crate::expand::{Iterations, expand};
use crate::grammar::Grammar;
use crate::hooks::RenderHook;
use crate::interpreter::{InitialState, Interpreter};
use crate::params::Params;
use crate::state::CursorState;

/// What to produce and where to start drawing it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawOptions {
    pub iterations: Iterations,
    pub initial: InitialState,
    /// Run the reduction set over the expanded string.
    pub condense: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            iterations: Iterations::Exactly(0),
            initial: InitialState::default(),
            condense: true,
        }
    }
}

/// A validated, immutable L-system.
#[derive(Debug, Clone)]
pub struct LSystem {
    grammar: Grammar,
    params: Params,
    table: DispatchTable,
    reductions: ReductionSet,
    /// Warnings collected while building.
    diagnostics: Vec<LsysError>,
}

impl LSystem {
    /// Assemble an L-system from its parts.
    ///
    /// Extension bindings that cannot be resolved degrade to no-ops and are
    /// reported in [`LSystem::diagnostics`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ErrorKind::InvalidParameter`] if `params` is
    /// out of range.
    pub fn new<'a>(
        grammar: Grammar,
        params: Params,
        bindings: impl IntoIterator<Item = (char, &'a ActionSpec)>,
    ) -> LsysResult<Self> {
        params.validate()?;
        let mut table = DispatchTable::builtin();
        let diagnostics = table.extend(bindings);
        let reductions = ReductionSet::new(&grammar, &table);
        Ok(Self {
            grammar,
            params,
            table,
            reductions,
            diagnostics,
        })
    }

    /// Build from a decoded configuration.
    ///
    /// # Errors
    ///
    /// Any grammar, parameter or binding-key error of `config`.
    pub fn from_config(config: &LSystemConfig) -> LsysResult<Self> {
        Self::new(config.grammar()?, config.params(), config.bindings()?)
    }

    pub const fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub const fn params(&self) -> &Params {
        &self.params
    }

    pub const fn table(&self) -> &DispatchTable {
        &self.table
    }

    pub const fn reductions(&self) -> &ReductionSet {
        &self.reductions
    }

    pub fn diagnostics(&self) -> &[LsysError] {
        &self.diagnostics
    }

    pub fn interpreter(&self) -> Interpreter<'_> {
        Interpreter::new(&self.table, &self.params)
    }

    /// Expand the start string; no condensation.
    ///
    /// # Errors
    ///
    /// See [`expand`].
    pub fn expand<R: Rng + ?Sized>(&self, iterations: Iterations, rng: &mut R) -> LsysResult<String> {
        expand(&self.grammar, iterations, rng)
    }

    /// The symbol string a drawing with `options` would interpret.
    ///
    /// # Errors
    ///
    /// See [`expand`].
    pub fn produce<R: Rng + ?Sized>(&self, options: &DrawOptions, rng: &mut R) -> LsysResult<String> {
        let expanded = self.expand(options.iterations, rng)?;
        if options.condense {
            Ok(self.reductions.condense(&expanded))
        } else {
            Ok(expanded)
        }
    }

    /// Produce and interpret in one go.
    ///
    /// # Errors
    ///
    /// See [`expand`] and [`Interpreter::run`].
    pub fn draw<R: Rng + ?Sized>(
        &self,
        options: &DrawOptions,
        renderer: &mut dyn Renderer,
        hooks: &mut [Box<dyn RenderHook + '_>],
        rng: &mut R,
    ) -> LsysResult<CursorState> {
        let symbols = self.produce(options, rng)?;
        self.interpreter()
            .run(&symbols, &options.initial, renderer, hooks)
    }
}
