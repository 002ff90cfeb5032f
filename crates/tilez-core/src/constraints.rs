//! Declared tile constraints ("props") and their derivation down the tree.

use smallvec::SmallVec;

use crate::dimension::{parse_padding, Dimension, RawDimension};
use crate::errors::{LayoutError, PropsError};
use crate::types::{Extent, HAlign, Mode, Stack, SurfaceType, VAlign};

/// Constraints exactly as a caller writes them.
///
/// Enum-like fields are kept as strings here and validated by
/// [`TileConstraints::from_raw`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct RawConstraints {
    pub width: Option<RawDimension>,
    pub height: Option<RawDimension>,
    pub stack: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "type"))]
    pub surface_type: Option<String>,
    pub inner_padding: Option<RawDimension>,
    pub outer_padding: Option<RawDimension>,
    pub h_align: Option<String>,
    pub v_align: Option<String>,
    pub mode: Option<String>,
}

impl RawConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: impl Into<RawDimension>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn with_height(mut self, height: impl Into<RawDimension>) -> Self {
        self.height = Some(height.into());
        self
    }

    /// Set both width and height.
    pub fn with_size(self, width: impl Into<RawDimension>, height: impl Into<RawDimension>) -> Self {
        self.with_width(width).with_height(height)
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn with_surface_type(mut self, surface_type: impl Into<String>) -> Self {
        self.surface_type = Some(surface_type.into());
        self
    }

    pub fn with_inner_padding(mut self, padding: impl Into<RawDimension>) -> Self {
        self.inner_padding = Some(padding.into());
        self
    }

    pub fn with_outer_padding(mut self, padding: impl Into<RawDimension>) -> Self {
        self.outer_padding = Some(padding.into());
        self
    }

    pub fn with_h_align(mut self, h_align: impl Into<String>) -> Self {
        self.h_align = Some(h_align.into());
        self
    }

    pub fn with_v_align(mut self, v_align: impl Into<String>) -> Self {
        self.v_align = Some(v_align.into());
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }
}

/// The fields of [`TileConstraints`], for field-wise comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintField {
    Width,
    Height,
    Stack,
    SurfaceType,
    InnerPadding,
    OuterPadding,
    HAlign,
    VAlign,
    Mode,
}

impl ConstraintField {
    pub const ALL: [ConstraintField; 9] = [
        ConstraintField::Width,
        ConstraintField::Height,
        ConstraintField::Stack,
        ConstraintField::SurfaceType,
        ConstraintField::InnerPadding,
        ConstraintField::OuterPadding,
        ConstraintField::HAlign,
        ConstraintField::VAlign,
        ConstraintField::Mode,
    ];

    /// Prop name as written by callers.
    pub fn name(self) -> &'static str {
        match self {
            ConstraintField::Width => "width",
            ConstraintField::Height => "height",
            ConstraintField::Stack => Stack::FIELD,
            ConstraintField::SurfaceType => SurfaceType::FIELD,
            ConstraintField::InnerPadding => "innerPadding",
            ConstraintField::OuterPadding => "outerPadding",
            ConstraintField::HAlign => HAlign::FIELD,
            ConstraintField::VAlign => VAlign::FIELD,
            ConstraintField::Mode => Mode::FIELD,
        }
    }

    /// Whether a change of this field moves or resizes the tile within its parent.
    pub fn affects_placement(self) -> bool {
        matches!(
            self,
            ConstraintField::Width
                | ConstraintField::Height
                | ConstraintField::HAlign
                | ConstraintField::VAlign
        )
    }
}

/// Validated constraints of a single tile.
///
/// `None` means "not declared": inheritable fields then take the parent's
/// value, the others fall back to the tree defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TileConstraints {
    pub width: Dimension,
    pub height: Dimension,
    pub stack: Option<Stack>,
    pub surface_type: Option<SurfaceType>,
    pub inner_padding: Option<f64>,
    pub outer_padding: Option<f64>,
    pub h_align: Option<HAlign>,
    pub v_align: Option<VAlign>,
    pub mode: Option<Mode>,
}

impl TileConstraints {
    /// Parse and validate raw constraints.
    pub fn from_raw(raw: &RawConstraints) -> Result<Self, PropsError> {
        Ok(Self {
            width: parse_dimension(raw.width.as_ref())?,
            height: parse_dimension(raw.height.as_ref())?,
            stack: parse_enum(raw.stack.as_deref())?,
            surface_type: parse_enum(raw.surface_type.as_deref())?,
            inner_padding: raw.inner_padding.as_ref().map(parse_padding).transpose()?,
            outer_padding: raw.outer_padding.as_ref().map(parse_padding).transpose()?,
            h_align: parse_enum(raw.h_align.as_deref())?,
            v_align: parse_enum(raw.v_align.as_deref())?,
            mode: parse_enum(raw.mode.as_deref())?,
        })
    }

    /// Declared dimension for an extent.
    pub fn dim(&self, extent: Extent) -> Dimension {
        match extent {
            Extent::Width => self.width,
            Extent::Height => self.height,
        }
    }

    /// Absolute width, if declared.
    pub fn abs_width(&self) -> Option<f64> {
        self.width.size()
    }

    /// Absolute height, if declared.
    pub fn abs_height(&self) -> Option<f64> {
        self.height.size()
    }

    /// Effective constraints of a tile placed under `parent`.
    ///
    /// Surface type, inner padding and mode are inherited when not declared;
    /// outer padding, alignment and stack never are.
    pub fn derive_from(&self, parent: &TileConstraints) -> Result<Self, LayoutError> {
        let parent_type = parent.surface_type.unwrap_or(SurfaceType::Plain);

        if let Some(child_type) = self.surface_type {
            if !parent_type.can_embed(child_type) {
                return Err(LayoutError::IncompatibleEmbedding {
                    parent: parent_type,
                    child: child_type,
                });
            }
        }

        Ok(Self {
            surface_type: self.surface_type.or(parent.surface_type),
            inner_padding: self.inner_padding.or(parent.inner_padding),
            mode: self.mode.or(parent.mode),
            ..*self
        })
    }

    /// Compare a single field with another set of constraints.
    pub fn has_same_value(&self, other: &TileConstraints, field: ConstraintField) -> bool {
        match field {
            ConstraintField::Width => self.width == other.width,
            ConstraintField::Height => self.height == other.height,
            ConstraintField::Stack => self.stack == other.stack,
            ConstraintField::SurfaceType => self.surface_type == other.surface_type,
            ConstraintField::InnerPadding => self.inner_padding == other.inner_padding,
            ConstraintField::OuterPadding => self.outer_padding == other.outer_padding,
            ConstraintField::HAlign => self.h_align == other.h_align,
            ConstraintField::VAlign => self.v_align == other.v_align,
            ConstraintField::Mode => self.mode == other.mode,
        }
    }

    /// Fields whose values differ from `other`.
    pub fn changed_fields(&self, other: &TileConstraints) -> SmallVec<[ConstraintField; 4]> {
        ConstraintField::ALL
            .into_iter()
            .filter(|&field| !self.has_same_value(other, field))
            .collect()
    }
}

fn parse_dimension(raw: Option<&RawDimension>) -> Result<Dimension, PropsError> {
    raw.map(Dimension::parse)
        .transpose()
        .map(Option::unwrap_or_default)
}

fn parse_enum<T>(raw: Option<&str>) -> Result<Option<T>, PropsError>
where
    T: std::str::FromStr<Err = PropsError>,
{
    raw.map(str::parse).transpose()
}
