//! Container header types and constants.

/// First header byte.
pub const MARKER_START: u8 = b'A';

/// Last header byte.
pub const MARKER_END: u8 = b'Z';

/// Header size without frame geometry: marker + 2 × u32 + marker.
pub const COMPACT_HEADER_SIZE: usize = 1 + 4 + 4 + 1;

/// Header size with frame geometry: marker + width + height + 2 × u32 + marker.
pub const GEOMETRY_HEADER_SIZE: usize = 1 + 1 + 1 + 4 + 4 + 1;

/// Which header variant a container uses.
///
/// The layout is not self-describing; readers must know which one the
/// producer wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeaderLayout {
    /// `'A'`, audio length, video length, `'Z'`. Frame geometry travels out-of-band.
    Compact,
    /// `'A'`, width, height, audio length, video length, `'Z'`.
    #[default]
    WithGeometry,
}

impl HeaderLayout {
    /// Returns the encoded header size in bytes.
    #[must_use]
    pub const fn header_size(self) -> usize {
        match self {
            Self::Compact => COMPACT_HEADER_SIZE,
            Self::WithGeometry => GEOMETRY_HEADER_SIZE,
        }
    }
}

/// Video frame dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FrameGeometry {
    pub width: u8,
    pub height: u8,
}

impl FrameGeometry {
    /// Geometry used for containers that carry no video.
    pub const NONE: Self = Self::new(0, 0);

    /// Creates a new geometry.
    #[must_use]
    pub const fn new(width: u8, height: u8) -> Self {
        Self { width, height }
    }

    /// Returns the number of pixels in one frame.
    #[must_use]
    pub const fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if a frame holds no pixels.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.pixel_count() == 0
    }
}

/// Container header.
///
/// The markers are validated during decoding and are not stored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Frame geometry, present only in [`HeaderLayout::WithGeometry`] containers.
    pub geometry: Option<FrameGeometry>,
    /// Audio payload length in bytes.
    pub audio_len: u32,
    /// Video payload length in bytes.
    pub video_len: u32,
}

impl ContainerHeader {
    /// Creates a header without frame geometry.
    #[must_use]
    pub const fn compact(audio_len: u32, video_len: u32) -> Self {
        Self {
            geometry: None,
            audio_len,
            video_len,
        }
    }

    /// Creates a header that carries frame geometry.
    #[must_use]
    pub const fn with_geometry(geometry: FrameGeometry, audio_len: u32, video_len: u32) -> Self {
        Self {
            geometry: Some(geometry),
            audio_len,
            video_len,
        }
    }

    /// Returns the layout this header encodes to.
    #[must_use]
    pub const fn layout(&self) -> HeaderLayout {
        if self.geometry.is_some() {
            HeaderLayout::WithGeometry
        } else {
            HeaderLayout::Compact
        }
    }

    /// Returns the total file size this header declares.
    #[must_use]
    pub const fn declared_file_len(&self) -> usize {
        self.layout().header_size() + self.audio_len as usize + self.video_len as usize
    }
}
