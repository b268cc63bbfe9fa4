//! BMP file header and the eight DIB header layouts.
//!
//! The DIB header size selects exactly one fixed-shape record. Each record
//! is parsed from its own bytes, then folded into a single [`BmpHeader`] so
//! pixel decoding never looks at the header version again.

use core::fmt;

use crate::error::BitmapError;

use super::decode::BmpPermissiveness;

pub(crate) const FILE_HEADER_SIZE: usize = 14;

// ── Magic ───────────────────────────────────────────────────────────

/// File-type magic (first two bytes of the file).
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BmpMagic {
    /// `BM`
    Windows,
    /// `BA`
    Os2BitmapArray,
    /// `CI`
    Os2ColorIcon,
    /// `CP`
    Os2ColorPointer,
    /// `IC`
    Os2Icon,
    /// `PT`
    Os2Pointer,
}

impl BmpMagic {
    pub fn from_bytes(bytes: [u8; 2]) -> Option<Self> {
        Some(match &bytes {
            b"BM" => Self::Windows,
            b"BA" => Self::Os2BitmapArray,
            b"CI" => Self::Os2ColorIcon,
            b"CP" => Self::Os2ColorPointer,
            b"IC" => Self::Os2Icon,
            b"PT" => Self::Os2Pointer,
            _ => return None,
        })
    }

    pub fn as_bytes(self) -> [u8; 2] {
        match self {
            Self::Windows => *b"BM",
            Self::Os2BitmapArray => *b"BA",
            Self::Os2ColorIcon => *b"CI",
            Self::Os2ColorPointer => *b"CP",
            Self::Os2Icon => *b"IC",
            Self::Os2Pointer => *b"PT",
        }
    }
}

// ── File header ─────────────────────────────────────────────────────

/// The 14-byte file header, kept as the raw little-endian byte arrays found
/// on disk and interpreted on demand.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FileHeader {
    magic: [u8; 2],
    size: [u8; 4],
    reserved1: [u8; 2],
    reserved2: [u8; 2],
    data_offset: [u8; 4],
}

impl FileHeader {
    pub(crate) fn parse(data: &[u8]) -> Result<(Self, BmpMagic), BitmapError> {
        // Magic alone decides the format; a 2-byte non-BMP input is still
        // reported as unsupported rather than truncated.
        let magic: [u8; 2] = take(data, 0)?;
        let kind = BmpMagic::from_bytes(magic).ok_or(BitmapError::UnsupportedFormat)?;
        let header = Self {
            magic,
            size: take(data, 2)?,
            reserved1: take(data, 6)?,
            reserved2: take(data, 8)?,
            data_offset: take(data, 10)?,
        };
        Ok((header, kind))
    }

    pub(crate) fn file_size(&self) -> u32 {
        u32::from_le_bytes(self.size)
    }

    pub(crate) fn reserved(&self) -> (u16, u16) {
        (
            u16::from_le_bytes(self.reserved1),
            u16::from_le_bytes(self.reserved2),
        )
    }

    pub(crate) fn data_offset(&self) -> u32 {
        u32::from_le_bytes(self.data_offset)
    }

    pub(crate) fn magic(&self) -> [u8; 2] {
        self.magic
    }
}

fn take<const N: usize>(data: &[u8], at: usize) -> Result<[u8; N], BitmapError> {
    data.get(at..at + N)
        .and_then(|s| s.try_into().ok())
        .ok_or(BitmapError::TruncatedData)
}

// ── Compression ─────────────────────────────────────────────────────

/// Compression code from the DIB header.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Compression {
    Rgb,
    Rle8,
    Rle4,
    Bitfields,
    Jpeg,
    Png,
    AlphaBitfields,
    Cmyk,
    CmykRle8,
    CmykRle4,
    /// OS/2 2.x code 3.
    Huffman1D,
    /// OS/2 2.x code 4.
    Rle24,
    Unknown(u32),
}

impl Compression {
    /// OS/2 2.x headers reuse codes 3 and 4 for their own schemes.
    pub fn from_code(code: u32, os2: bool) -> Self {
        match (code, os2) {
            (0, _) => Self::Rgb,
            (1, _) => Self::Rle8,
            (2, _) => Self::Rle4,
            (3, true) => Self::Huffman1D,
            (4, true) => Self::Rle24,
            (3, false) => Self::Bitfields,
            (4, false) => Self::Jpeg,
            (5, _) => Self::Png,
            (6, _) => Self::AlphaBitfields,
            (11, _) => Self::Cmyk,
            (12, _) => Self::CmykRle8,
            (13, _) => Self::CmykRle4,
            (other, _) => Self::Unknown(other),
        }
    }

    pub fn code(self) -> u32 {
        match self {
            Self::Rgb => 0,
            Self::Rle8 => 1,
            Self::Rle4 => 2,
            Self::Bitfields | Self::Huffman1D => 3,
            Self::Jpeg | Self::Rle24 => 4,
            Self::Png => 5,
            Self::AlphaBitfields => 6,
            Self::Cmyk => 11,
            Self::CmykRle8 => 12,
            Self::CmykRle4 => 13,
            Self::Unknown(c) => c,
        }
    }

    /// Whether this crate can decode pixel data with this compression.
    pub fn is_supported(self) -> bool {
        matches!(
            self,
            Self::Rgb
                | Self::Rle8
                | Self::Rle4
                | Self::Rle24
                | Self::Bitfields
                | Self::AlphaBitfields
        )
    }

    pub(crate) fn is_rle(self) -> bool {
        matches!(self, Self::Rle8 | Self::Rle4 | Self::Rle24)
    }
}

// ── DIB header records ──────────────────────────────────────────────

/// DIB header version, identified by its declared size.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DibVersion {
    /// `BITMAPCOREHEADER` / OS/2 1.x, 12 bytes.
    Core,
    /// Truncated OS/2 2.x header, 16 bytes.
    Os2Short,
    /// `BITMAPINFOHEADER`, 40 bytes.
    Info,
    /// `BITMAPV2INFOHEADER`, 52 bytes.
    V2,
    /// `BITMAPV3INFOHEADER`, 56 bytes.
    V3,
    /// `OS22XBITMAPHEADER`, 64 bytes.
    Os2,
    /// `BITMAPV4HEADER`, 108 bytes.
    V4,
    /// `BITMAPV5HEADER`, 124 bytes.
    V5,
}

impl DibVersion {
    pub fn from_size(size: u32) -> Option<Self> {
        Some(match size {
            12 => Self::Core,
            16 => Self::Os2Short,
            40 => Self::Info,
            52 => Self::V2,
            56 => Self::V3,
            64 => Self::Os2,
            108 => Self::V4,
            124 => Self::V5,
            _ => return None,
        })
    }

    pub fn size(self) -> u32 {
        match self {
            Self::Core => 12,
            Self::Os2Short => 16,
            Self::Info => 40,
            Self::V2 => 52,
            Self::V3 => 56,
            Self::Os2 => 64,
            Self::V4 => 108,
            Self::V5 => 124,
        }
    }

    pub fn is_os2(self) -> bool {
        matches!(self, Self::Core | Self::Os2Short | Self::Os2)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Core => "BITMAPCOREHEADER",
            Self::Os2Short => "OS22XBITMAPHEADER (short)",
            Self::Info => "BITMAPINFOHEADER",
            Self::V2 => "BITMAPV2INFOHEADER",
            Self::V3 => "BITMAPV3INFOHEADER",
            Self::Os2 => "OS22XBITMAPHEADER",
            Self::V4 => "BITMAPV4HEADER",
            Self::V5 => "BITMAPV5HEADER",
        }
    }
}

/// Little-endian field reader over a slice whose length was checked up front.
struct Fields<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Fields<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        // Skip the 4-byte size field every record starts with.
        Self { bytes, pos: 4 }
    }

    fn array<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.bytes[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.array())
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.array())
    }

    fn i32(&mut self) -> i32 {
        i32::from_le_bytes(self.array())
    }
}

#[derive(Clone, Copy, Debug)]
struct CoreHeader {
    width: u16,
    height: u16,
    planes: u16,
    bit_count: u16,
}

#[derive(Clone, Copy, Debug)]
struct Os2ShortHeader {
    width: i32,
    height: i32,
    planes: u16,
    bit_count: u16,
}

#[derive(Clone, Copy, Debug)]
struct InfoHeader {
    width: i32,
    height: i32,
    planes: u16,
    bit_count: u16,
    compression: u32,
    image_size: u32,
    x_ppm: i32,
    y_ppm: i32,
    colors_used: u32,
    colors_important: u32,
}

impl InfoHeader {
    fn read(f: &mut Fields<'_>) -> Self {
        Self {
            width: f.i32(),
            height: f.i32(),
            planes: f.u16(),
            bit_count: f.u16(),
            compression: f.u32(),
            image_size: f.u32(),
            x_ppm: f.i32(),
            y_ppm: f.i32(),
            colors_used: f.u32(),
            colors_important: f.u32(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct V2Header {
    info: InfoHeader,
    masks: [u32; 3],
}

#[derive(Clone, Copy, Debug)]
struct V3Header {
    info: InfoHeader,
    masks: [u32; 4],
}

#[derive(Clone, Copy, Debug)]
struct Os2Header {
    info: InfoHeader,
    units: u16,
    recording: u16,
    rendering: u16,
    color_encoding: u32,
}

#[derive(Clone, Copy, Debug)]
struct V4Header {
    info: InfoHeader,
    masks: [u32; 4],
    cs_type: u32,
    endpoints: [i32; 9],
    gamma: [u32; 3],
}

impl V4Header {
    fn read(f: &mut Fields<'_>) -> Self {
        let info = InfoHeader::read(f);
        let masks = [f.u32(), f.u32(), f.u32(), f.u32()];
        let cs_type = f.u32();
        let mut endpoints = [0i32; 9];
        for e in &mut endpoints {
            *e = f.i32();
        }
        let gamma = [f.u32(), f.u32(), f.u32()];
        Self {
            info,
            masks,
            cs_type,
            endpoints,
            gamma,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct V5Header {
    v4: V4Header,
    intent: u32,
    profile_data: u32,
    profile_size: u32,
}

#[derive(Clone, Copy, Debug)]
enum DibHeader {
    Core(CoreHeader),
    Os2Short(Os2ShortHeader),
    Info(InfoHeader),
    V2(V2Header),
    V3(V3Header),
    Os2(Os2Header),
    V4(V4Header),
    V5(V5Header),
}

impl DibHeader {
    /// `bytes` is exactly `version.size()` long.
    fn parse(version: DibVersion, bytes: &[u8]) -> Self {
        let mut f = Fields::new(bytes);
        match version {
            DibVersion::Core => Self::Core(CoreHeader {
                width: f.u16(),
                height: f.u16(),
                planes: f.u16(),
                bit_count: f.u16(),
            }),
            DibVersion::Os2Short => Self::Os2Short(Os2ShortHeader {
                width: f.i32(),
                height: f.i32(),
                planes: f.u16(),
                bit_count: f.u16(),
            }),
            DibVersion::Info => Self::Info(InfoHeader::read(&mut f)),
            DibVersion::V2 => {
                let info = InfoHeader::read(&mut f);
                Self::V2(V2Header {
                    info,
                    masks: [f.u32(), f.u32(), f.u32()],
                })
            }
            DibVersion::V3 => {
                let info = InfoHeader::read(&mut f);
                Self::V3(V3Header {
                    info,
                    masks: [f.u32(), f.u32(), f.u32(), f.u32()],
                })
            }
            DibVersion::Os2 => {
                let info = InfoHeader::read(&mut f);
                let units = f.u16();
                let _reserved = f.u16();
                let recording = f.u16();
                let rendering = f.u16();
                let _size1 = f.u32();
                let _size2 = f.u32();
                let color_encoding = f.u32();
                let _identifier = f.u32();
                Self::Os2(Os2Header {
                    info,
                    units,
                    recording,
                    rendering,
                    color_encoding,
                })
            }
            DibVersion::V4 => Self::V4(V4Header::read(&mut f)),
            DibVersion::V5 => {
                let v4 = V4Header::read(&mut f);
                Self::V5(V5Header {
                    v4,
                    intent: f.u32(),
                    profile_data: f.u32(),
                    profile_size: f.u32(),
                })
            }
        }
    }
}

// ── Normalized header ───────────────────────────────────────────────

/// Color-space fields carried by V4/V5 headers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColorSpace {
    pub cs_type: u32,
    /// CIEXYZ endpoints (red, green, blue), 2.30 fixed point.
    pub endpoints: [i32; 9],
    /// Red, green, blue gamma, 16.16 fixed point.
    pub gamma: [u32; 3],
    /// V5 only.
    pub intent: u32,
    pub profile_data: u32,
    pub profile_size: u32,
}

/// Extra fields of the 64-byte OS/2 2.x header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Os2Extension {
    /// Resolution units; 0 means pixels per meter.
    pub units: u16,
    /// Row recording algorithm; 0 means bottom-up.
    pub recording: u16,
    /// Halftoning algorithm.
    pub rendering: u16,
    /// Color table encoding; 0 means RGB.
    pub color_encoding: u32,
}

/// Header fields after version dispatch; absent fields are zero.
#[derive(Clone, Debug)]
pub(crate) struct BmpHeader {
    pub magic: BmpMagic,
    pub version: DibVersion,
    pub file_size: u32,
    pub reserved: (u16, u16),
    pub data_offset: u32,
    pub width: u32,
    pub height: u32,
    pub top_down: bool,
    pub planes: u16,
    pub bit_depth: u16,
    pub compression: Compression,
    pub image_size: u32,
    pub x_ppm: i32,
    pub y_ppm: i32,
    pub colors_used: u32,
    pub colors_important: u32,
    /// R, G, B, A masks; zero when the file carries none.
    pub masks: [u32; 4],
    pub color_space: Option<ColorSpace>,
    pub os2: Option<Os2Extension>,
    /// Byte offset of the color table.
    pub palette_offset: usize,
    /// Entries in the color table (0 when absent).
    pub palette_len: usize,
}

impl BmpHeader {
    /// Bytes per color-table entry.
    pub(crate) fn palette_entry_size(&self) -> usize {
        if self.version == DibVersion::Core { 3 } else { 4 }
    }
}

/// Parse file header, DIB header, external masks, and color-table geometry,
/// then validate. Reads no pixel data.
pub(crate) fn parse_headers(
    data: &[u8],
    permissiveness: BmpPermissiveness,
) -> Result<BmpHeader, BitmapError> {
    let strict = permissiveness == BmpPermissiveness::Strict;
    let permissive = permissiveness == BmpPermissiveness::Permissive;

    let (file, magic) = FileHeader::parse(data)?;
    let dib_size = u32::from_le_bytes(take(data, FILE_HEADER_SIZE)?);
    let version =
        DibVersion::from_size(dib_size).ok_or(BitmapError::UnsupportedHeaderVersion(dib_size))?;
    let dib_end = FILE_HEADER_SIZE + dib_size as usize;
    let dib_bytes = data
        .get(FILE_HEADER_SIZE..dib_end)
        .ok_or(BitmapError::TruncatedData)?;

    log::debug!(
        "bmp: magic {:?} ({:?}), {} ({dib_size} bytes)",
        core::str::from_utf8(&file.magic()).unwrap_or("??"),
        magic,
        version.name()
    );

    let mut header = BmpHeader {
        magic,
        version,
        file_size: file.file_size(),
        reserved: file.reserved(),
        data_offset: file.data_offset(),
        width: 0,
        height: 0,
        top_down: false,
        planes: 0,
        bit_depth: 0,
        compression: Compression::Rgb,
        image_size: 0,
        x_ppm: 0,
        y_ppm: 0,
        colors_used: 0,
        colors_important: 0,
        masks: [0; 4],
        color_space: None,
        os2: None,
        palette_offset: dib_end,
        palette_len: 0,
    };

    let (mut width, mut height) = (0i64, 0i64);
    let info = match DibHeader::parse(version, dib_bytes) {
        DibHeader::Core(h) => {
            width = i64::from(h.width);
            height = i64::from(h.height);
            header.planes = h.planes;
            header.bit_depth = h.bit_count;
            None
        }
        DibHeader::Os2Short(h) => {
            width = i64::from(h.width);
            height = i64::from(h.height);
            header.planes = h.planes;
            header.bit_depth = h.bit_count;
            None
        }
        DibHeader::Info(info) => Some(info),
        DibHeader::V2(h) => {
            header.masks[..3].copy_from_slice(&h.masks);
            Some(h.info)
        }
        DibHeader::V3(h) => {
            header.masks = h.masks;
            Some(h.info)
        }
        DibHeader::Os2(h) => {
            header.os2 = Some(Os2Extension {
                units: h.units,
                recording: h.recording,
                rendering: h.rendering,
                color_encoding: h.color_encoding,
            });
            Some(h.info)
        }
        DibHeader::V4(h) => {
            header.masks = h.masks;
            header.color_space = Some(ColorSpace {
                cs_type: h.cs_type,
                endpoints: h.endpoints,
                gamma: h.gamma,
                ..Default::default()
            });
            Some(h.info)
        }
        DibHeader::V5(h) => {
            header.masks = h.v4.masks;
            header.color_space = Some(ColorSpace {
                cs_type: h.v4.cs_type,
                endpoints: h.v4.endpoints,
                gamma: h.v4.gamma,
                intent: h.intent,
                profile_data: h.profile_data,
                profile_size: h.profile_size,
            });
            Some(h.v4.info)
        }
    };
    if let Some(info) = info {
        header.planes = info.planes;
        header.bit_depth = info.bit_count;
        header.compression = Compression::from_code(info.compression, version.is_os2());
        header.image_size = info.image_size;
        header.x_ppm = info.x_ppm;
        header.y_ppm = info.y_ppm;
        header.colors_used = info.colors_used;
        header.colors_important = info.colors_important;
        width = i64::from(info.width);
        height = i64::from(info.height);
    }

    // ── Validation ──
    if width <= 0 || height == 0 {
        return Err(BitmapError::InvalidDimensions { width, height });
    }
    header.width = width as u32;
    header.height = height.unsigned_abs() as u32;
    header.top_down = height < 0;

    // JPEG/PNG payloads declare bit depth 0, so compression is checked first.
    if !header.compression.is_supported() {
        return Err(BitmapError::UnsupportedCompression(header.compression.code()));
    }
    if !matches!(header.bit_depth, 1 | 2 | 4 | 8 | 16 | 24 | 32) {
        return Err(BitmapError::UnsupportedBitDepth(header.bit_depth));
    }
    let depth_ok = match header.compression {
        Compression::Rgb => true,
        Compression::Rle8 => header.bit_depth == 8,
        Compression::Rle4 => header.bit_depth == 4,
        Compression::Rle24 => header.bit_depth == 24,
        _ => matches!(header.bit_depth, 16 | 32),
    };
    if !depth_ok {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "compression {:?} cannot be used with {}-bit pixels",
            header.compression,
            header.bit_depth
        )));
    }
    if !permissive && header.planes != 1 {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "BMP planes field is {}, expected 1",
            header.planes
        )));
    }
    if !permissive && header.top_down && header.compression.is_rle() {
        return Err(BitmapError::InvalidData(
            "RLE compression with top-down row order".into(),
        ));
    }

    if strict {
        if header.file_size != 0 && header.file_size as usize != data.len() {
            return Err(BitmapError::InvalidHeader(alloc::format!(
                "file size field ({}) doesn't match actual size ({})",
                header.file_size,
                data.len()
            )));
        }
        if header.x_ppm < 0 || header.y_ppm < 0 {
            return Err(BitmapError::InvalidHeader("negative resolution".into()));
        }
        if header.image_size != 0 && header.compression == Compression::Rgb {
            let expected = super::row_stride(header.width, header.bit_depth) as u64
                * u64::from(header.height);
            if u64::from(header.image_size) != expected {
                return Err(BitmapError::InvalidHeader(alloc::format!(
                    "image size field ({}) doesn't match expected ({expected})",
                    header.image_size
                )));
            }
        }
    }

    // External masks follow a 40-byte header.
    if version == DibVersion::Info {
        let count = match header.compression {
            Compression::Bitfields => 3,
            Compression::AlphaBitfields => 4,
            _ => 0,
        };
        for i in 0..count {
            header.masks[i] = u32::from_le_bytes(take(data, dib_end + 4 * i)?);
        }
        header.palette_offset = dib_end + 4 * count;
    }
    if matches!(
        header.compression,
        Compression::Bitfields | Compression::AlphaBitfields
    ) && header.masks[..3] == [0; 3]
    {
        return Err(BitmapError::InvalidHeader("bitfield masks are all zero".into()));
    }

    let data_offset = header.data_offset as usize;
    if data_offset < header.palette_offset {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "pixel data offset {data_offset} overlaps headers ending at {}",
            header.palette_offset
        )));
    }

    if header.bit_depth <= 8 {
        let max_colors = 1u32 << header.bit_depth;
        let available = (data_offset - header.palette_offset) / header.palette_entry_size();
        let declared = if header.colors_used == 0 {
            max_colors
        } else if header.colors_used > max_colors {
            if !permissive {
                return Err(BitmapError::InvalidHeader(alloc::format!(
                    "palette count ({}) exceeds max for {}-bit depth ({max_colors})",
                    header.colors_used,
                    header.bit_depth
                )));
            }
            max_colors
        } else {
            header.colors_used
        };
        header.palette_len = (declared as usize).min(available);
        log::trace!(
            "bmp: {} palette entries at offset {}",
            header.palette_len,
            header.palette_offset
        );
    }

    log::debug!(
        "bmp: {}x{} {}-bit {:?}{}",
        header.width,
        header.height,
        header.bit_depth,
        header.compression,
        if header.top_down { " top-down" } else { "" }
    );

    Ok(header)
}

// ── Public summary ──────────────────────────────────────────────────

/// Header summary returned by [`crate::inspect_bmp`]. No pixel data is read.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BmpInfo {
    pub magic: BmpMagic,
    pub version: DibVersion,
    pub file_size: u32,
    /// The two reserved file-header words (hotspot for icons and pointers).
    pub reserved: (u16, u16),
    pub data_offset: u32,
    pub width: u32,
    pub height: u32,
    /// Rows stored top-to-bottom (negative height on disk).
    pub top_down: bool,
    pub planes: u16,
    pub bit_depth: u16,
    pub compression: Compression,
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
    pub palette_len: usize,
    /// R, G, B, A channel masks (zero when not present).
    pub masks: [u32; 4],
    pub color_space: Option<ColorSpace>,
    pub os2: Option<Os2Extension>,
}

impl From<&BmpHeader> for BmpInfo {
    fn from(h: &BmpHeader) -> Self {
        Self {
            magic: h.magic,
            version: h.version,
            file_size: h.file_size,
            reserved: h.reserved,
            data_offset: h.data_offset,
            width: h.width,
            height: h.height,
            top_down: h.top_down,
            planes: h.planes,
            bit_depth: h.bit_depth,
            compression: h.compression,
            image_size: h.image_size,
            x_pixels_per_meter: h.x_ppm,
            y_pixels_per_meter: h.y_ppm,
            colors_used: h.colors_used,
            colors_important: h.colors_important,
            palette_len: h.palette_len,
            masks: h.masks,
            color_space: h.color_space,
            os2: h.os2,
        }
    }
}

impl fmt::Display for BmpInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magic = self.magic.as_bytes();
        writeln!(
            f,
            "type:        {}{} ({:?})",
            magic[0] as char, magic[1] as char, self.magic
        )?;
        writeln!(f, "file size:   {}", self.file_size)?;
        writeln!(f, "data offset: {}", self.data_offset)?;
        writeln!(
            f,
            "header:      {} ({} bytes)",
            self.version.name(),
            self.version.size()
        )?;
        writeln!(
            f,
            "size:        {}x{} ({})",
            self.width,
            self.height,
            if self.top_down { "top-down" } else { "bottom-up" }
        )?;
        writeln!(f, "planes:      {}", self.planes)?;
        writeln!(f, "bit depth:   {}", self.bit_depth)?;
        writeln!(
            f,
            "compression: {:?} ({})",
            self.compression,
            self.compression.code()
        )?;
        writeln!(f, "image size:  {}", self.image_size)?;
        writeln!(
            f,
            "resolution:  {}x{} px/m",
            self.x_pixels_per_meter, self.y_pixels_per_meter
        )?;
        write!(
            f,
            "colors:      {} used, {} important, {} in palette",
            self.colors_used, self.colors_important, self.palette_len
        )
    }
}
