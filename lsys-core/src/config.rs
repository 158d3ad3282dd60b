//! Serde configuration surface.
//!
//! A preset file is a JSON object mapping a figure name to
//!
//! ```json
//! {
//!   "lsystem": { "start": "X", "rules": { "X": "F+[[X]-X]-F[-FX]+X" }, "angle": 25 },
//!   "draw":    { "iterations": 6, "base_length": 2, "initial_heading": 65 },
//!   "style":   { "pen_colour": [41, 52, 22], "background": [0, 0, 0] }
//! }
//! ```
//!
//! Decoding checks shapes and rejects a key repeated within one object;
//! value checks (weights, rule keys, parameter ranges) happen when the
//! configuration is turned into an [`LSystem`](crate::lsystem::LSystem).

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use lsys_graphics::types::{Color, Point, Scalar};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::action::ActionSpec;
use crate::error::{ErrorKind, LsysError, LsysResult};
use crate::expand::Iterations;
use crate::grammar::{Grammar, Production};
use crate::hooks::{ColourTable, ColourWheel, RenderHook, TreeWidth};
use crate::interpreter::InitialState;
use crate::lsystem::DrawOptions;
use crate::params::Params;

const fn one() -> Scalar {
    1.0
}

const fn yes() -> bool {
    true
}

/// Decode an object into a map, failing on a key seen twice instead of
/// keeping the last value.
fn unique_keys<'de, D, V>(deserializer: D) -> Result<BTreeMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct UniqueKeys<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for UniqueKeys<V> {
        type Value = BTreeMap<String, V>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object with distinct keys")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut map = BTreeMap::new();
            while let Some(key) = access.next_key::<String>()? {
                if map.contains_key(&key) {
                    return Err(de::Error::custom(format_args!("duplicate key `{key}`")));
                }
                let value = access.next_value()?;
                map.insert(key, value);
            }
            Ok(map)
        }
    }

    deserializer.deserialize_map(UniqueKeys(PhantomData))
}

// ---------------------------------------------------------------------------
// L-system definition
// ---------------------------------------------------------------------------

/// Grammar, parameters and extension bindings of one L-system.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LSystemConfig {
    pub start: String,
    #[serde(default, deserialize_with = "unique_keys")]
    pub rules: BTreeMap<String, Production>,
    pub angle: Scalar,
    #[serde(default = "one")]
    pub scale_factor: Scalar,
    #[serde(default)]
    pub width_increment: Scalar,
    #[serde(default)]
    pub length_increment: Scalar,
    #[serde(default)]
    pub angle_increment: Scalar,
    /// Extra symbol bindings, keyed by a one-character string.
    #[serde(default, deserialize_with = "unique_keys")]
    pub actions: BTreeMap<String, ActionSpec>,
}

impl LSystemConfig {
    pub const fn params(&self) -> Params {
        Params {
            angle: self.angle,
            scale_factor: self.scale_factor,
            width_increment: self.width_increment,
            length_increment: self.length_increment,
            angle_increment: self.angle_increment,
        }
    }

    /// # Errors
    ///
    /// See [`Grammar::new`].
    pub fn grammar(&self) -> LsysResult<Grammar> {
        Grammar::new(
            self.start.clone(),
            self.rules
                .iter()
                .map(|(key, production)| (key.clone(), production.clone())),
        )
    }

    /// The `actions` table with its keys turned into symbols.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidConfig`] for a key that is not exactly
    /// one character.
    pub fn bindings(&self) -> LsysResult<Vec<(char, &ActionSpec)>> {
        self.actions
            .iter()
            .map(|(key, spec)| {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(symbol), None) => Ok((symbol, spec)),
                    _ => Err(LsysError::new(
                        ErrorKind::InvalidConfig,
                        format!("action key `{key}` must be a single symbol"),
                    )),
                }
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Draw options
// ---------------------------------------------------------------------------

/// `"iterations"`: a pass count or the keyword `"fixed_point"`.
#[derive(Deserialize)]
#[serde(untagged, expecting = "a non-negative integer or \"fixed_point\"")]
enum IterationsRepr {
    Count(usize),
    Keyword(IterationsKeyword),
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum IterationsKeyword {
    FixedPoint,
}

impl<'de> Deserialize<'de> for Iterations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match IterationsRepr::deserialize(deserializer)? {
            IterationsRepr::Count(n) => Self::Exactly(n),
            IterationsRepr::Keyword(IterationsKeyword::FixedPoint) => Self::FixedPoint,
        })
    }
}

/// How to expand and where to start drawing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DrawConfig {
    pub iterations: Iterations,
    #[serde(default = "DrawConfig::default_base_length")]
    pub base_length: Scalar,
    #[serde(default)]
    pub initial_heading: Scalar,
    #[serde(default)]
    pub initial_position: [Scalar; 2],
    /// Starting pen width; absent keeps the renderer's width.
    #[serde(default)]
    pub pen_width: Option<Scalar>,
    #[serde(default = "yes")]
    pub condense: bool,
    #[serde(default)]
    pub hooks: Vec<HookConfig>,
}

impl DrawConfig {
    const fn default_base_length() -> Scalar {
        5.0
    }

    pub const fn initial_state(&self) -> InitialState {
        InitialState {
            position: Point::new(self.initial_position[0], self.initial_position[1]),
            heading: self.initial_heading,
            step_length: self.base_length,
            pen_width: self.pen_width,
        }
    }

    pub const fn options(&self) -> DrawOptions {
        DrawOptions {
            iterations: self.iterations,
            initial: self.initial_state(),
            condense: self.condense,
        }
    }

    /// Instantiate the configured hooks, in order.
    ///
    /// # Errors
    ///
    /// See [`HookConfig::build`].
    pub fn build_hooks(&self) -> LsysResult<Vec<Box<dyn RenderHook>>> {
        self.hooks.iter().map(HookConfig::build).collect()
    }
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            iterations: Iterations::Exactly(0),
            base_length: Self::default_base_length(),
            initial_heading: 0.0,
            initial_position: [0.0, 0.0],
            pen_width: None,
            condense: true,
            hooks: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Hooks
// ---------------------------------------------------------------------------

/// A render hook and its arguments, tagged by `"hook"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "hook", rename_all = "snake_case")]
pub enum HookConfig {
    ColourWheel {
        #[serde(default)]
        centre: [Scalar; 2],
        #[serde(default = "HookConfig::default_radius")]
        radius: Scalar,
        #[serde(default)]
        phase: Scalar,
    },
    /// Stack depth → RGB. Keys are decimal strings, as JSON object keys
    /// must be.
    ColourTable {
        #[serde(deserialize_with = "unique_keys")]
        table: BTreeMap<String, [u8; 3]>,
    },
    TreeWidth {
        #[serde(default = "HookConfig::default_max_level")]
        max_level: usize,
    },
}

impl HookConfig {
    const fn default_radius() -> Scalar {
        200.0
    }

    const fn default_max_level() -> usize {
        9
    }

    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidConfig`] for a colour table key that is
    /// not a stack depth.
    pub fn build(&self) -> LsysResult<Box<dyn RenderHook>> {
        Ok(match self {
            Self::ColourWheel {
                centre,
                radius,
                phase,
            } => Box::new(ColourWheel::new(
                Point::new(centre[0], centre[1]),
                *radius,
                *phase,
            )),
            Self::ColourTable { table } => {
                let mut colours = BTreeMap::new();
                for (key, &[r, g, b]) in table {
                    let depth = key.parse::<usize>().map_err(|_| {
                        LsysError::new(
                            ErrorKind::InvalidConfig,
                            format!("colour table key `{key}` is not a stack depth"),
                        )
                    })?;
                    colours.insert(depth, Color::from_rgb8(r, g, b));
                }
                Box::new(ColourTable::new(colours))
            }
            Self::TreeWidth { max_level } => Box::new(TreeWidth::new(*max_level)),
        })
    }
}

// ---------------------------------------------------------------------------
// Style and presets
// ---------------------------------------------------------------------------

/// Ink and paper.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct StyleConfig {
    pub pen_colour: [u8; 3],
    pub pen_width: Scalar,
    pub background: Option<[u8; 3]>,
}

impl StyleConfig {
    pub fn pen_color(&self) -> Color {
        let [r, g, b] = self.pen_colour;
        Color::from_rgb8(r, g, b)
    }

    pub fn background_color(&self) -> Option<Color> {
        self.background.map(|[r, g, b]| Color::from_rgb8(r, g, b))
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            pen_colour: [0, 0, 0],
            pen_width: 1.0,
            background: None,
        }
    }
}

/// One named figure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Preset {
    pub lsystem: LSystemConfig,
    #[serde(default)]
    pub draw: DrawConfig,
    #[serde(default)]
    pub style: StyleConfig,
}

/// Figures by name.
pub type PresetMap = BTreeMap<String, Preset>;

/// Decode a preset file.
///
/// # Errors
///
/// Returns [`ErrorKind::InvalidConfig`] with the decoder's message (which
/// includes line and column) if the document does not have the preset shape
/// or repeats a key within one object.
pub fn load_presets(json: &str) -> LsysResult<PresetMap> {
    let invalid = |err: serde_json::Error| LsysError::new(ErrorKind::InvalidConfig, err.to_string());
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let presets = unique_keys(&mut deserializer).map_err(invalid)?;
    deserializer.end().map_err(invalid)?;
    Ok(presets)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
