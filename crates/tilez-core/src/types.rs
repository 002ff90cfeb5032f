//! Core value types shared by constraints, geometry, and the tile tree.

use std::fmt;
use std::str::FromStr;

use crate::errors::PropsError;

/// Unique identifier for a tile in a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileId(pub usize);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the two extents of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extent {
    Width,
    Height,
}

impl Extent {
    /// The perpendicular extent.
    pub fn cross(self) -> Self {
        match self {
            Extent::Width => Extent::Height,
            Extent::Height => Extent::Width,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Extent::Width => "width",
            Extent::Height => "height",
        }
    }
}

/// Where a tile is anchored along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    Start,
    Center,
    End,
}

/// Declares a closed set of prop values parsed from strings.
macro_rules! prop_enum {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal, {
            $( $(#[$vmeta:meta])* $variant:ident => $key:literal, $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Prop name used in validation messages.
            pub const FIELD: &'static str = $field;

            /// All accepted string values.
            pub const ALLOWED: &'static [&'static str] = &[$($key),+];

            /// The string value accepted by the parser.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $key ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(match self {
                    $( $name::$variant => $label ),+
                })
            }
        }

        impl FromStr for $name {
            type Err = PropsError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $key => Ok($name::$variant), )+
                    other => Err(PropsError::Validation {
                        field: Self::FIELD,
                        value: other.to_string(),
                        allowed: Self::ALLOWED,
                    }),
                }
            }
        }
    };
}

prop_enum! {
    /// Direction in which children are stacked.
    Stack, field = "stack", {
        Horizontal => "horizontal", "horizontal",
        Vertical => "vertical", "vertical",
    }
}

prop_enum! {
    /// Rendering surface of a tile.
    SurfaceType, field = "surfaceType", {
        /// Layout-only container
        Plain => "plain", "Plain",
        Html => "html", "HTML",
        Svg => "svg", "SVG",
        /// Pixel buffer, not subdivided internally
        Canvas => "canvas", "Canvas",
        Webgl => "webgl", "WebGL",
    }
}

prop_enum! {
    /// Horizontal alignment.
    HAlign, field = "hAlign", {
        Left => "left", "left",
        Center => "center", "center",
        Right => "right", "right",
    }
}

prop_enum! {
    /// Vertical alignment.
    VAlign, field = "vAlign", {
        Top => "top", "top",
        Center => "center", "center",
        Bottom => "bottom", "bottom",
    }
}

prop_enum! {
    /// Padding semantics used when laying out children.
    Mode, field = "mode", {
        /// Inner padding is a gutter reserved around each child
        Spacing => "spacing", "spacing",
        /// Inner padding is a plain gap between children
        Sizing => "sizing", "sizing",
    }
}

impl Stack {
    /// Extent along which children are distributed.
    pub fn main_extent(self) -> Extent {
        match self {
            Stack::Horizontal => Extent::Width,
            Stack::Vertical => Extent::Height,
        }
    }

    /// Extent perpendicular to the stack direction.
    pub fn cross_extent(self) -> Extent {
        self.main_extent().cross()
    }
}

impl SurfaceType {
    /// Whether a tile of type `child` may be placed inside a tile of this type.
    pub fn can_embed(self, child: SurfaceType) -> bool {
        !matches!(
            (self, child),
            (SurfaceType::Svg, SurfaceType::Html | SurfaceType::Canvas)
                | (SurfaceType::Canvas, SurfaceType::Html | SurfaceType::Svg)
        )
    }
}

impl HAlign {
    pub fn anchor(self) -> Anchor {
        match self {
            HAlign::Left => Anchor::Start,
            HAlign::Center => Anchor::Center,
            HAlign::Right => Anchor::End,
        }
    }
}

impl VAlign {
    pub fn anchor(self) -> Anchor {
        match self {
            VAlign::Top => Anchor::Start,
            VAlign::Center => Anchor::Center,
            VAlign::Bottom => Anchor::End,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_closed_sets() {
        assert_eq!("horizontal".parse::<Stack>().unwrap(), Stack::Horizontal);
        assert_eq!("canvas".parse::<SurfaceType>().unwrap(), SurfaceType::Canvas);
        assert_eq!("right".parse::<HAlign>().unwrap(), HAlign::Right);
        assert_eq!("bottom".parse::<VAlign>().unwrap(), VAlign::Bottom);
        assert_eq!("sizing".parse::<Mode>().unwrap(), Mode::Sizing);
    }

    #[test]
    fn test_validation_error_lists_allowed_values() {
        let err = "diagonal".parse::<Stack>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Tile prop \"stack\" must be one of horizontal, vertical, got \"diagonal\""
        );

        let err = "middle".parse::<VAlign>().unwrap_err();
        assert!(matches!(
            err,
            PropsError::Validation { field: "vAlign", .. }
        ));
    }

    #[test]
    fn test_embedding_rules() {
        use SurfaceType::*;

        assert!(!Svg.can_embed(Html));
        assert!(!Svg.can_embed(Canvas));
        assert!(Svg.can_embed(Plain));
        assert!(Svg.can_embed(Svg));
        assert!(!Canvas.can_embed(Html));
        assert!(!Canvas.can_embed(Svg));
        assert!(Canvas.can_embed(Plain));
        assert!(Html.can_embed(Svg));
        assert!(Html.can_embed(Canvas));
        assert!(Plain.can_embed(Webgl));
    }

    #[test]
    fn test_stack_extents() {
        assert_eq!(Stack::Horizontal.main_extent(), Extent::Width);
        assert_eq!(Stack::Horizontal.cross_extent(), Extent::Height);
        assert_eq!(Stack::Vertical.main_extent(), Extent::Height);
        assert_eq!(Stack::Vertical.cross_extent(), Extent::Width);
    }
}
