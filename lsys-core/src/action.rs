//! Symbol → action dispatch.
//!
//! Every symbol the interpreter sees is looked up in a [`DispatchTable`].
//! The table is filled once, from the built-in alphabet plus any extension
//! bindings; symbols without an entry behave as [`Action::Noop`].
//!
//! | Symbol | Action |
//! |--------|--------|
//! | `X`    | nothing |
//! | `F`    | draw forward by the step length |
//! | `f`    | move forward by the step length without drawing |
//! | `+`    | turn left by the turning angle |
//! | `-`    | turn right by the turning angle |
//! | `\|`   | negate the heading |
//! | `[`    | push the drawing state |
//! | `]`    | pop the drawing state |
//! | `#`    | pen width += width increment |
//! | `!`    | pen width -= width increment |
//! | `>`    | step length *= scale factor |
//! | `<`    | step length /= scale factor |
//! | `*`    | pen width *= scale factor |
//! | `/`    | pen width /= scale factor |
//! | `&`    | step length += length increment |
//! | `%`    | step length -= length increment |
//! | `(`    | turning angle -= angle increment |
//! | `)`    | turning angle += angle increment |

use std::collections::HashMap;

use lsys_graphics::types::Scalar;
use serde::Deserialize;

use crate::error::{ErrorKind, LsysError, Severity};

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// An arithmetic change to one cursor quantity.
///
/// `None` means "use the configured parameter": the matching increment for
/// `Add`/`Sub`, the scale factor for `Mul`/`Div`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjust {
    Add(Option<Scalar>),
    Sub(Option<Scalar>),
    Mul(Option<Scalar>),
    Div(Option<Scalar>),
}

impl Adjust {
    /// Apply to `value` given the default increment and scale factor.
    pub fn apply(self, value: Scalar, increment: Scalar, scale: Scalar) -> Scalar {
        match self {
            Self::Add(amount) => value + amount.unwrap_or(increment),
            Self::Sub(amount) => value - amount.unwrap_or(increment),
            Self::Mul(amount) => value * amount.unwrap_or(scale),
            Self::Div(amount) => value / amount.unwrap_or(scale),
        }
    }
}

/// What a symbol does to the cursor.
///
/// Optional amounts override the configured step length or turning angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Noop,
    /// Pen down and move forward, drawing.
    Draw(Option<Scalar>),
    /// Move forward without drawing.
    Jump(Option<Scalar>),
    TurnLeft(Option<Scalar>),
    TurnRight(Option<Scalar>),
    /// heading := -heading.
    Reverse,
    Push,
    Pop,
    Width(Adjust),
    Length(Adjust),
    Angle(Adjust),
}

// ---------------------------------------------------------------------------
// Extension bindings
// ---------------------------------------------------------------------------

/// A named action with bound arguments, as written in a configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionSpec {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Scalar>,
}

impl ActionSpec {
    pub fn new(name: impl Into<String>, args: Vec<Scalar>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Look up the named action and bind its arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnknownAction`] if the name is not known or the
    /// argument count does not fit.
    pub fn resolve(&self) -> Result<Action, LsysError> {
        let amount = match self.args.as_slice() {
            [] => None,
            [x] => Some(*x),
            _ => return Err(self.arity_error()),
        };
        if let Some(x) = amount {
            if !x.is_finite() {
                return Err(LsysError::new(
                    ErrorKind::UnknownAction,
                    format!("action `{}` given non-finite argument {x}", self.name),
                ));
            }
        }
        let action = match self.name.as_str() {
            "noop" | "push" | "pop" | "reverse" if amount.is_some() => {
                return Err(self.arity_error());
            }
            "noop" => Action::Noop,
            "push" => Action::Push,
            "pop" => Action::Pop,
            "reverse" => Action::Reverse,
            "forward" => Action::Draw(amount),
            "forward_nodraw" | "jump" => Action::Jump(amount),
            "turn_left" => Action::TurnLeft(amount),
            "turn_right" => Action::TurnRight(amount),
            "width_inc" => Action::Width(Adjust::Add(amount)),
            "width_dec" => Action::Width(Adjust::Sub(amount)),
            "width_mul" => Action::Width(Adjust::Mul(amount)),
            "width_div" => Action::Width(Adjust::Div(amount)),
            "length_inc" => Action::Length(Adjust::Add(amount)),
            "length_dec" => Action::Length(Adjust::Sub(amount)),
            "length_mul" => Action::Length(Adjust::Mul(amount)),
            "length_div" => Action::Length(Adjust::Div(amount)),
            "angle_inc" => Action::Angle(Adjust::Add(amount)),
            "angle_dec" => Action::Angle(Adjust::Sub(amount)),
            other => {
                return Err(LsysError::new(
                    ErrorKind::UnknownAction,
                    format!("no action named `{other}`"),
                ));
            }
        };
        Ok(action)
    }

    fn arity_error(&self) -> LsysError {
        LsysError::new(
            ErrorKind::UnknownAction,
            format!(
                "action `{}` does not take {} argument(s)",
                self.name,
                self.args.len()
            ),
        )
    }
}

// ---------------------------------------------------------------------------
// Dispatch table
// ---------------------------------------------------------------------------

/// Symbol → action mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchTable {
    actions: HashMap<char, Action>,
}

impl DispatchTable {
    /// The built-in alphabet.
    pub fn builtin() -> Self {
        let actions = HashMap::from([
            ('X', Action::Noop),
            ('F', Action::Draw(None)),
            ('f', Action::Jump(None)),
            ('+', Action::TurnLeft(None)),
            ('-', Action::TurnRight(None)),
            ('|', Action::Reverse),
            ('[', Action::Push),
            (']', Action::Pop),
            ('#', Action::Width(Adjust::Add(None))),
            ('!', Action::Width(Adjust::Sub(None))),
            ('>', Action::Length(Adjust::Mul(None))),
            ('<', Action::Length(Adjust::Div(None))),
            ('*', Action::Width(Adjust::Mul(None))),
            ('/', Action::Width(Adjust::Div(None))),
            ('&', Action::Length(Adjust::Add(None))),
            ('%', Action::Length(Adjust::Sub(None))),
            ('(', Action::Angle(Adjust::Sub(None))),
            (')', Action::Angle(Adjust::Add(None))),
        ]);
        Self { actions }
    }

    /// Bind (or rebind) a symbol.
    pub fn bind(&mut self, symbol: char, action: Action) {
        self.actions.insert(symbol, action);
    }

    /// Add extension bindings on top of the current table.
    ///
    /// A binding that cannot be resolved is bound to [`Action::Noop`] and
    /// reported as a warning in the returned list.
    pub fn extend<'a>(
        &mut self,
        bindings: impl IntoIterator<Item = (char, &'a ActionSpec)>,
    ) -> Vec<LsysError> {
        let mut warnings = Vec::new();
        for (symbol, spec) in bindings {
            let action = spec.resolve().unwrap_or_else(|err| {
                warnings.push(LsysError::new(
                    err.kind,
                    format!("symbol `{symbol}`: {}; treating it as a no-op", err.message),
                )
                .with_severity(Severity::Warning));
                Action::Noop
            });
            self.bind(symbol, action);
        }
        warnings
    }

    /// The action for `symbol`, [`Action::Noop`] if unbound.
    pub fn get(&self, symbol: char) -> Action {
        self.actions.get(&symbol).copied().unwrap_or(Action::Noop)
    }

    /// Whether `symbol` has no drawing effect.
    pub fn is_noop(&self, symbol: char) -> bool {
        self.get(symbol) == Action::Noop
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
