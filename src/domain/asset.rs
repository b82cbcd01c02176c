//! Site design assets: logo, favicon and storefront banners.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Largest accepted upload, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// Category under which shop banners are stored.
pub const BANNER_CATEGORY: &str = "banner_shop";

/// Number of banner slots on the storefront.
pub const BANNER_SLOTS: u8 = 3;

/// Single-file asset categories.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Logo,
    Favicon,
}

impl AssetCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            AssetCategory::Logo => "logo",
            AssetCategory::Favicon => "favicon",
        }
    }
}

impl Display for AssetCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zero-based banner slot.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BannerSlot(u8);

impl BannerSlot {
    pub fn new(index: u8) -> Result<Self, TypeConstraintError> {
        if index < BANNER_SLOTS {
            Ok(Self(index))
        } else {
            Err(TypeConstraintError::InvalidValue(format!(
                "banner slot {index} is out of range"
            )))
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = BannerSlot> {
        (0..BANNER_SLOTS).map(BannerSlot)
    }
}

impl Display for BannerSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Response of `GET files/:category` and of uploads.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct FileLocation {
    #[serde(rename = "fileUrl", default)]
    pub file_url: Option<String>,
}

/// Response of `GET getBanners`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct BannerLocation {
    #[serde(default)]
    pub banner: Option<String>,
}

/// A file picked for upload.
#[derive(Clone, Debug, PartialEq)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Rejects empty files and files above [`MAX_UPLOAD_BYTES`].
    pub fn new(
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, TypeConstraintError> {
        if bytes.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(TypeConstraintError::InvalidValue(format!(
                "file exceeds {MAX_UPLOAD_BYTES} bytes"
            )));
        }
        Ok(Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        })
    }
}
