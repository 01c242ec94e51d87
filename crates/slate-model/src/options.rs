//! Configuration options for clip renaming.

use serde::{Deserialize, Serialize};

use crate::error::{ProcessError, Result};

/// Default output frame width.
pub const DEFAULT_WIDTH: u32 = 1920;

/// Default output frame height.
pub const DEFAULT_HEIGHT: u32 = 1080;

/// Largest accepted width or height.
pub const MAX_DIMENSION: u32 = 8192;

/// Which flavour of the editorial schema a project file follows.
///
/// The two flavours disagree on where the rating lives and on which timeline
/// elements receive the new name, so one must be chosen per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaProfile {
    /// Rating read from the clip's `labels/label`; labels are copied onto the
    /// linked sequence and its clip items; path URLs are normalized.
    #[default]
    Labels,
    /// Rating read from keywords in `comments/mastercomment2`; the linked
    /// sequence's third `name` element is renamed.
    CommentKeyword,
}

impl SchemaProfile {
    pub const ALL: [SchemaProfile; 2] = [SchemaProfile::Labels, SchemaProfile::CommentKeyword];

    pub fn name(self) -> &'static str {
        match self {
            Self::Labels => "labels",
            Self::CommentKeyword => "comment-keyword",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Labels => "Rating from labels/label; labels copied to sequences and clip items",
            Self::CommentKeyword => "Rating from comments/mastercomment2 keywords (Circle, KEEP, NG)",
        }
    }

    /// Name template used when none is configured.
    pub fn default_template(self) -> &'static str {
        match self {
            Self::Labels => "{scene}_{shot}_{take}{camera}_{Rating}",
            Self::CommentKeyword => "{scene}_{shot}_{take}{camera}{Rating}",
        }
    }
}

/// Options controlling a single transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ProcessConfig {
    /// Value written into every `width` element.
    pub width: u32,
    /// Value written into every `height` element.
    pub height: u32,
    /// Name template; falls back to the profile's default when unset.
    pub format: Option<String>,
    /// Prepended to every generated name.
    pub prefix: String,
    pub profile: SchemaProfile,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            format: None,
            prefix: String::new(),
            profile: SchemaProfile::default(),
        }
    }
}

impl ProcessConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_profile(mut self, profile: SchemaProfile) -> Self {
        self.profile = profile;
        self
    }

    /// The effective name template.
    pub fn template(&self) -> &str {
        self.format
            .as_deref()
            .unwrap_or_else(|| self.profile.default_template())
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::InvalidConfig`] when a dimension falls outside
    /// `1..=MAX_DIMENSION` or the template is blank.
    pub fn validate(&self) -> Result<()> {
        for (label, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_DIMENSION {
                return Err(ProcessError::InvalidConfig {
                    message: format!("{label} must be between 1 and {MAX_DIMENSION}, got {value}"),
                });
            }
        }
        if self.template().trim().is_empty() {
            return Err(ProcessError::InvalidConfig {
                message: "name template is empty".to_string(),
            });
        }
        Ok(())
    }
}
