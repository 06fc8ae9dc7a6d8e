//! Construction options for [`CompositeStream`](crate::CompositeStream).

use precompress::Quality;

use crate::format::ContainerFormat;

/// Settings applied when a composite stream is created.
///
/// # Examples
///
/// ```
/// use compose::{ComposeOptions, ContainerFormat};
/// use precompress::Quality;
///
/// let options = ComposeOptions::new(ContainerFormat::Deflate)
///     .with_quality(Quality::Fast)
///     .with_leave_open(true);
/// assert_eq!(options.quality(), Quality::Fast);
/// assert!(options.leave_open());
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ComposeOptions {
    format: ContainerFormat,
    quality: Quality,
    leave_open: bool,
}

impl ComposeOptions {
    /// Options for `format` with maximum quality that close the sink on disposal.
    #[must_use]
    pub const fn new(format: ContainerFormat) -> Self {
        Self {
            format,
            quality: Quality::Maximum,
            leave_open: false,
        }
    }

    /// Sets the quality used for raw writes until changed on the stream.
    #[must_use]
    pub const fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    /// Keeps the sink attached after the stream is closed.
    #[must_use]
    pub const fn with_leave_open(mut self, leave_open: bool) -> Self {
        self.leave_open = leave_open;
        self
    }

    /// Returns the container format.
    #[must_use]
    pub const fn format(&self) -> ContainerFormat {
        self.format
    }

    /// Returns the initial raw-write quality.
    #[must_use]
    pub const fn quality(&self) -> Quality {
        self.quality
    }

    /// Reports whether the sink survives disposal.
    #[must_use]
    pub const fn leave_open(&self) -> bool {
        self.leave_open
    }
}
