use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpriteSheetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No images to pack")]
    EmptyInputSet,
    #[error(
        "Sprite sheet {sheet_width}x{sheet_height} exceeds max dimension {max_dimension} \
         ({image_count} images on a {grid_size}x{grid_size} grid)"
    )]
    SizeExceeded {
        sheet_width: u64,
        sheet_height: u64,
        max_dimension: u32,
        grid_size: u32,
        image_count: usize,
    },
    #[error("Failed to composite '{filename}': {source}")]
    Composition {
        filename: String,
        #[source]
        source: image::ImageError,
    },
    #[error("Image '{filename}' has invalid dimensions {width}x{height}")]
    InvalidImage {
        filename: String,
        width: u32,
        height: u32,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Fieldless discriminant of [`SpriteSheetError`], for callers that only need to branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Io,
    EmptyInputSet,
    SizeExceeded,
    Composition,
    InvalidInput,
}

impl ErrorKind {
    /// Process exit code for this kind. Stable across releases.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Io => 1,
            ErrorKind::EmptyInputSet => 2,
            ErrorKind::SizeExceeded => 3,
            ErrorKind::Composition => 4,
            ErrorKind::InvalidInput => 5,
        }
    }
}

impl SpriteSheetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SpriteSheetError::Io(_) | SpriteSheetError::Image(_) | SpriteSheetError::Json(_) => {
                ErrorKind::Io
            }
            SpriteSheetError::EmptyInputSet => ErrorKind::EmptyInputSet,
            SpriteSheetError::SizeExceeded { .. } => ErrorKind::SizeExceeded,
            SpriteSheetError::Composition { .. } => ErrorKind::Composition,
            SpriteSheetError::InvalidImage { .. } | SpriteSheetError::InvalidConfig(_) => {
                ErrorKind::InvalidInput
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SpriteSheetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let kinds = [
            ErrorKind::Io,
            ErrorKind::EmptyInputSet,
            ErrorKind::SizeExceeded,
            ErrorKind::Composition,
            ErrorKind::InvalidInput,
        ];
        let mut codes: Vec<i32> = kinds.iter().map(|k| k.exit_code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
        assert!(codes.iter().all(|c| *c != 0));
    }

    #[test]
    fn size_exceeded_message_carries_dimensions() {
        let err = SpriteSheetError::SizeExceeded {
            sheet_width: 5000,
            sheet_height: 2500,
            max_dimension: 4096,
            grid_size: 2,
            image_count: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("5000x2500"));
        assert!(msg.contains("4096"));
        assert_eq!(err.kind(), ErrorKind::SizeExceeded);
    }
}
