//! Theme document encoding
//!
//! Persisted themes are JSON objects with four groups (`details`, `blur`,
//! `other`, `colors`). Reading is tolerant per field: a missing or mistyped
//! field keeps its default and is recorded in the returned [`ParseReport`],
//! it never aborts the load. Only a document that is not a JSON object is
//! rejected outright.

use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::io::Write;

use super::defaults::{resolve_defaults, Platform};
use super::schema::{ComponentTheme, Configuration, LayoutMode, Palette, RendererKind};
use crate::constants::document::{BLUR, COLORS, DETAILS, INDENT, OTHER};

/// Document could not be read at all
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("theme is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("theme root must be a JSON object")]
    NotAnObject,
}

/// Why a single field fell back to its default
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProblem {
    Missing,
    Invalid(String),
}

/// Non-fatal problem with one field, keyed as `group.key`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWarning {
    pub field: String,
    pub problem: FieldProblem,
}

impl fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.problem {
            FieldProblem::Missing => write!(f, "{}: missing, using default", self.field),
            FieldProblem::Invalid(reason) => {
                write!(f, "{}: {reason}, using default", self.field)
            }
        }
    }
}

/// Field-level warnings collected while reading a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    warnings: Vec<FieldWarning>,
}

impl ParseReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn warnings(&self) -> &[FieldWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Warning for `field`, if one was recorded
    pub fn get(&self, field: &str) -> Option<&FieldWarning> {
        self.warnings.iter().find(|w| w.field == field)
    }

    fn push(&mut self, group: &str, key: &str, problem: FieldProblem) {
        self.warnings.push(FieldWarning {
            field: format!("{group}.{key}"),
            problem,
        });
    }
}

/// Result of a successful [`deserialize`]
#[derive(Debug, Clone)]
pub struct Parsed {
    pub config: Configuration,
    pub report: ParseReport,
}

/// One top-level group of the document; `fields` is `None` when the group is
/// absent or not an object
struct Group<'a> {
    name: &'static str,
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> Group<'a> {
    fn new(root: &'a Map<String, Value>, name: &'static str) -> Self {
        Self {
            name,
            fields: root.get(name).and_then(Value::as_object),
        }
    }

    /// Overwrite `target` with `key` when present and well-typed
    fn read<T: DeserializeOwned>(&self, key: &str, target: &mut T, report: &mut ParseReport) {
        let Some(value) = self.fields.and_then(|fields| fields.get(key)) else {
            report.push(self.name, key, FieldProblem::Missing);
            return;
        };
        match T::deserialize(value) {
            Ok(parsed) => *target = parsed,
            Err(e) => report.push(self.name, key, FieldProblem::Invalid(e.to_string())),
        }
    }
}

/// Parse a theme document on top of the platform defaults
pub fn deserialize(bytes: &[u8], platform: Platform) -> Result<Parsed, ParseError> {
    let Value::Object(root) = serde_json::from_slice::<Value>(bytes)? else {
        return Err(ParseError::NotAnObject);
    };

    let mut config = resolve_defaults(platform);
    let mut report = ParseReport::default();

    let details = Group::new(&root, DETAILS);
    details.read("name", &mut config.name, &mut report);
    details.read("description", &mut config.description, &mut report);
    details.read("author", &mut config.author, &mut report);
    details.read("renderer", &mut config.renderer, &mut report);
    details.read("layout", &mut config.layout, &mut report);
    details.read("style", &mut config.style, &mut report);

    let other = Group::new(&root, OTHER);
    other.read("uiScale", &mut config.ui_scale, &mut report);
    other.read("font", &mut config.font, &mut report);
    other.read("fontSize", &mut config.font_size, &mut report);
    other.read("framePadding", &mut config.frame_padding, &mut report);
    other.read("windowMargin", &mut config.window_margin, &mut report);
    other.read("windowRounding", &mut config.window_rounding, &mut report);
    other.read("frameRounding", &mut config.frame_rounding, &mut report);
    other.read("borderSize", &mut config.border_size, &mut report);

    let blur = Group::new(&root, BLUR);
    blur.read("blurEnabled", &mut config.blur_enabled, &mut report);
    blur.read("blurSpeed", &mut config.blur_speed, &mut report);
    blur.read("blurRadius", &mut config.blur_radius, &mut report);

    let colors = Group::new(&root, COLORS);
    for (key, slot) in config.colors.slots_mut() {
        colors.read(key, slot, &mut report);
    }

    Ok(Parsed { config, report })
}

/// Output layout for [`serialize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    /// Four groups, used for files on disk
    Nested,
    /// Single-level map, used for the session store handoff
    Flat,
}

#[derive(Serialize)]
struct Details<'a> {
    name: &'a str,
    description: &'a str,
    author: &'a str,
    renderer: RendererKind,
    layout: LayoutMode,
    style: ComponentTheme,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Blur {
    blur_enabled: bool,
    blur_speed: f32,
    blur_radius: f32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Other<'a> {
    ui_scale: f32,
    font: &'a str,
    font_size: f32,
    frame_padding: f32,
    window_margin: f32,
    window_rounding: f32,
    frame_rounding: f32,
    border_size: f32,
}

impl Serialize for Palette {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let slots = self.slots();
        let mut map = serializer.serialize_map(Some(slots.len()))?;
        for (key, color) in slots {
            map.serialize_entry(key, &color)?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct NestedDocument<'a> {
    details: Details<'a>,
    blur: Blur,
    other: Other<'a>,
    colors: &'a Palette,
}

#[derive(Serialize)]
struct FlatDocument<'a> {
    #[serde(flatten)]
    details: Details<'a>,
    #[serde(flatten)]
    blur: Blur,
    #[serde(flatten)]
    other: Other<'a>,
    #[serde(flatten)]
    colors: &'a Palette,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Shaped<'a> {
    Nested(NestedDocument<'a>),
    Flat(FlatDocument<'a>),
}

/// Serializable view of a configuration; always contains every field
#[derive(Serialize)]
#[serde(transparent)]
pub struct ThemeDocument<'a>(Shaped<'a>);

/// Build the document for `config` in the requested shape
pub fn serialize(config: &Configuration, shape: DocumentShape) -> ThemeDocument<'_> {
    let details = Details {
        name: &config.name,
        description: &config.description,
        author: &config.author,
        renderer: config.renderer,
        layout: config.layout,
        style: config.style,
    };
    let blur = Blur {
        blur_enabled: config.blur_enabled,
        blur_speed: config.blur_speed,
        blur_radius: config.blur_radius,
    };
    let other = Other {
        ui_scale: config.ui_scale,
        font: &config.font,
        font_size: config.font_size,
        frame_padding: config.frame_padding,
        window_margin: config.window_margin,
        window_rounding: config.window_rounding,
        frame_rounding: config.frame_rounding,
        border_size: config.border_size,
    };

    match shape {
        DocumentShape::Nested => ThemeDocument(Shaped::Nested(NestedDocument {
            details,
            blur,
            other,
            colors: &config.colors,
        })),
        DocumentShape::Flat => ThemeDocument(Shaped::Flat(FlatDocument {
            details,
            blur,
            other,
            colors: &config.colors,
        })),
    }
}

/// Write the nested document with four-space indentation
pub fn write_pretty<W: Write>(config: &Configuration, writer: W) -> serde_json::Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
    serialize(config, DocumentShape::Nested).serialize(&mut ser)
}

/// Flattened document as a JSON map, for the session store
pub fn to_flat_map(config: &Configuration) -> Map<String, Value> {
    match serde_json::to_value(serialize(config, DocumentShape::Flat)) {
        Ok(Value::Object(map)) => map,
        // Every field is a string, number or bool, so this cannot happen
        _ => Map::new(),
    }
}
