// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Container decoder — parses the minimal single-strip 8-bit grayscale TIFF
// subset: magic, first directory offset, directory entries for width and
// height, then the raster samples.

use tonwerk_core::error::{Result, TonwerkError};
use tonwerk_core::types::{ByteOrder, ContainerLayout};
use tracing::{debug, info, instrument, trace};

/// Little-endian magic (`II*\0`).
pub const MAGIC_LE: [u8; 4] = *b"II*\0";
/// Big-endian magic (`MM\0*`).
pub const MAGIC_BE: [u8; 4] = *b"MM\0*";

/// `ImageWidth` tag.
pub const TAG_IMAGE_WIDTH: u16 = 256;
/// `ImageLength` tag.
pub const TAG_IMAGE_LENGTH: u16 = 257;

/// TIFF `SHORT` field type.
const FIELD_TYPE_SHORT: u16 = 3;

/// Size of one directory entry on disk.
pub const ENTRY_LEN: usize = 12;

/// One directory entry as read from the header. Transient: only width and
/// height survive the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub tag: u16,
    pub field_type: u16,
    pub count: u32,
    pub value: u32,
}

/// The fully decoded container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedContainer {
    pub width: u32,
    pub height: u32,
    /// Row-major samples, `width * height` long.
    pub samples: Vec<u8>,
    pub layout: ContainerLayout,
}

/// Bounds-checked reader over the container bytes.
struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    order: ByteOrder,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8], order: ByteOrder) -> Self {
        Self {
            bytes,
            pos: 0,
            order,
        }
    }

    fn seek(&mut self, offset: usize) {
        self.pos = offset;
    }

    fn take(&mut self, len: usize, field: &'static str) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(TonwerkError::TruncatedRead {
                field,
                offset: self.pos as u64,
                needed: len as u64,
                available: self.bytes.len().saturating_sub(self.pos) as u64,
            })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, field)?);
        Ok(out)
    }

    fn u16(&mut self, field: &'static str) -> Result<u16> {
        Ok(self.order.u16(self.array(field)?))
    }

    fn u32(&mut self, field: &'static str) -> Result<u32> {
        Ok(self.order.u32(self.array(field)?))
    }

    fn entry(&mut self) -> Result<DirectoryEntry> {
        let raw: [u8; ENTRY_LEN] = self.array("directory entry")?;
        let order = self.order;
        let tag = order.u16([raw[0], raw[1]]);
        let field_type = order.u16([raw[2], raw[3]]);
        let count = order.u32([raw[4], raw[5], raw[6], raw[7]]);
        // A SHORT is stored left-justified in the 4-byte slot. Readers that
        // take the whole slot as a u32 shift big-endian SHORT values by 16
        // bits; reading the natural size here is intentional and departs
        // from that behaviour.
        let value = if field_type == FIELD_TYPE_SHORT {
            u32::from(order.u16([raw[8], raw[9]]))
        } else {
            order.u32([raw[8], raw[9], raw[10], raw[11]])
        };
        Ok(DirectoryEntry {
            tag,
            field_type,
            count,
            value,
        })
    }
}

/// Identify the byte order from the first four bytes.
pub fn detect_byte_order(bytes: &[u8]) -> Result<ByteOrder> {
    let magic: [u8; 4] = ByteReader::new(bytes, ByteOrder::LittleEndian).array("magic number")?;
    match magic {
        MAGIC_LE => Ok(ByteOrder::LittleEndian),
        MAGIC_BE => Ok(ByteOrder::BigEndian),
        found => Err(TonwerkError::InvalidMagic { found }),
    }
}

/// Decode a container into its dimensions and samples.
///
/// The samples are read from absolute offset 0, not from a strip offset: the
/// first `width * height` bytes of the file (header included) become the
/// raster. Files produced for this tool place the directory after the pixel
/// block, so the two agree; for any other file the header bytes show up as
/// the first pixels.
#[instrument(skip(bytes), fields(data_len = bytes.len()))]
pub fn decode(bytes: &[u8]) -> Result<DecodedContainer> {
    let byte_order = detect_byte_order(bytes)?;
    let mut reader = ByteReader::new(bytes, byte_order);
    reader.seek(4);

    let directory_offset = reader.u32("directory offset")?;
    reader.seek(directory_offset as usize);
    let entry_count = reader.u16("directory entry count")?;
    debug!(?byte_order, directory_offset, entry_count, "Header parsed");

    let mut width = None;
    let mut height = None;
    for _ in 0..entry_count {
        let entry = reader.entry()?;
        trace!(?entry, "Directory entry");
        match entry.tag {
            TAG_IMAGE_WIDTH => width = Some(entry.value),
            TAG_IMAGE_LENGTH => height = Some(entry.value),
            _ => {}
        }
    }

    let (width, height) = match (width.filter(|w| *w > 0), height.filter(|h| *h > 0)) {
        (Some(w), Some(h)) => (w, h),
        (w, h) => return Err(TonwerkError::MissingDimensions { width: w, height: h }),
    };

    let pixel_count = (width as usize)
        .checked_mul(height as usize)
        .ok_or(TonwerkError::TruncatedRead {
            field: "pixel data",
            offset: 0,
            needed: u64::from(width) * u64::from(height),
            available: bytes.len() as u64,
        })?;

    reader.seek(0);
    let samples = reader.take(pixel_count, "pixel data")?.to_vec();

    info!(width, height, ?byte_order, "Container decoded");
    Ok(DecodedContainer {
        width,
        height,
        samples,
        layout: ContainerLayout {
            byte_order,
            directory_offset,
            entry_count,
        },
    })
}
