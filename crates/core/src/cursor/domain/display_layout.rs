use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::gesture::domain::gesture_command::DisplaySide;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("display layout has no displays")]
    Empty,
    #[error("display {id} has zero width or height")]
    ZeroSize { id: u32 },
    #[error("display {id} extends past the 32-bit desktop coordinate range")]
    OutOfRange { id: u32 },
    #[error("failed to read display layout {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid display layout {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One monitor in global desktop coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Display {
    pub id: u32,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Display {
    /// Saturates at the coordinate limits; layouts built through
    /// `DisplayLayout::new` never reach them.
    pub fn center(&self) -> (i32, i32) {
        (
            self.x.saturating_add(half(self.width).unwrap_or(i32::MAX)),
            self.y.saturating_add(half(self.height).unwrap_or(i32::MAX)),
        )
    }

    /// True when the far edges and the center fit in `i32`.
    fn fits_coordinates(&self) -> bool {
        let far_edge = |origin: i32, extent: u32| {
            i32::try_from(extent)
                .ok()
                .and_then(|e| origin.checked_add(e))
                .is_some()
        };
        far_edge(self.x, self.width) && far_edge(self.y, self.height)
    }
}

fn half(extent: u32) -> Option<i32> {
    i32::try_from(extent / 2).ok()
}

#[derive(Deserialize)]
struct LayoutFile {
    displays: Vec<Display>,
}

/// Non-empty set of displays the cursor can be relocated between.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayLayout {
    displays: Vec<Display>,
}

impl DisplayLayout {
    pub fn new(displays: Vec<Display>) -> Result<Self, LayoutError> {
        if displays.is_empty() {
            return Err(LayoutError::Empty);
        }
        if let Some(d) = displays.iter().find(|d| d.width == 0 || d.height == 0) {
            return Err(LayoutError::ZeroSize { id: d.id });
        }
        if let Some(d) = displays.iter().find(|d| !d.fits_coordinates()) {
            return Err(LayoutError::OutOfRange { id: d.id });
        }
        Ok(Self { displays })
    }

    /// `count` equally sized displays in a row, ids starting at 1.
    pub fn side_by_side(count: u32, width: u32, height: u32) -> Result<Self, LayoutError> {
        let displays = (0..count)
            .map(|i| {
                let id = i + 1;
                let x = i32::try_from(u64::from(i) * u64::from(width))
                    .map_err(|_| LayoutError::OutOfRange { id })?;
                Ok(Display {
                    id,
                    x,
                    y: 0,
                    width,
                    height,
                })
            })
            .collect::<Result<Vec<_>, LayoutError>>()?;
        Self::new(displays)
    }

    /// Reads `{"displays": [{"id", "x", "y", "width", "height"}, ...]}`.
    pub fn from_json_file(path: &Path) -> Result<Self, LayoutError> {
        let json = fs::read_to_string(path).map_err(|e| LayoutError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let file: LayoutFile = serde_json::from_str(&json).map_err(|e| LayoutError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::new(file.displays)
    }

    pub fn displays(&self) -> &[Display] {
        &self.displays
    }

    /// Leftmost or rightmost display by origin; ties go to the lower id.
    pub fn display_for(&self, side: DisplaySide) -> &Display {
        let picked = match side {
            DisplaySide::Left => self
                .displays
                .iter()
                .min_by(|a, b| a.x.cmp(&b.x).then(a.id.cmp(&b.id))),
            DisplaySide::Right => self
                .displays
                .iter()
                .max_by(|a, b| a.x.cmp(&b.x).then(b.id.cmp(&a.id))),
        };
        // Non-empty by construction
        picked.unwrap_or(&self.displays[0])
    }

    pub fn target_for(&self, side: DisplaySide) -> (i32, i32) {
        self.display_for(side).center()
    }
}
