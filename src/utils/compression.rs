//! Container compression detection and decoding.
use crate::error::{DbError, Result};

use flate2::read::GzDecoder;
use std::{
    fmt,
    io::{self, Read, Seek, SeekFrom},
};
use xz2::read::XzDecoder;

const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];
const XZ_MAGIC: &[u8] = &[0xfd, b'7', b'z', b'X', b'Z', 0x00];
const ZSTD_MAGIC: &[u8] = &[0x28, 0xb5, 0x2f, 0xfd];
const BZIP2_MAGIC: &[u8] = b"BZh";
const LZ4_MAGIC: &[u8] = &[0x04, 0x22, 0x4d, 0x18];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Xz,
    Zstd,
    Bzip2,
    Lz4,
}

/// `BZh` followed by the block size digit
fn is_bzip2(magic: &[u8]) -> bool {
    magic.len() > BZIP2_MAGIC.len()
        && magic.starts_with(BZIP2_MAGIC)
        && (b'1'..=b'9').contains(&magic[BZIP2_MAGIC.len()])
}

impl Compression {
    /// Guess the compression from the first bytes of a stream
    pub fn detect(magic: &[u8]) -> Self {
        if magic.starts_with(GZIP_MAGIC) {
            Compression::Gzip
        } else if magic.starts_with(XZ_MAGIC) {
            Compression::Xz
        } else if magic.starts_with(ZSTD_MAGIC) {
            Compression::Zstd
        } else if is_bzip2(magic) {
            Compression::Bzip2
        } else if magic.starts_with(LZ4_MAGIC) {
            Compression::Lz4
        } else {
            Compression::None
        }
    }

    /// Peek at the start of a seekable stream, then rewind it
    pub fn sniff<R: Read + Seek>(r: &mut R) -> io::Result<Self> {
        let start = r.stream_position()?;
        let mut magic = Vec::with_capacity(XZ_MAGIC.len());
        r.by_ref()
            .take(XZ_MAGIC.len() as u64)
            .read_to_end(&mut magic)?;
        r.seek(SeekFrom::Start(start))?;
        Ok(Self::detect(&magic))
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Compression::Bzip2 | Compression::Lz4)
    }

    /// Wrap a reader so that it yields decompressed data
    pub fn decoder<'a, R: Read + 'a>(&self, r: R) -> Result<Box<dyn Read + 'a>> {
        Ok(match self {
            Compression::None => Box::new(r),
            Compression::Gzip => Box::new(GzDecoder::new(r)),
            Compression::Xz => Box::new(XzDecoder::new(r)),
            Compression::Zstd => Box::new(
                zstd::stream::read::Decoder::new(r)
                    .map_err(|e| DbError::container("failed to set up zstd decoder", e))?,
            ),
            Compression::Bzip2 | Compression::Lz4 => {
                return Err(DbError::UnsupportedCodec(*self));
            }
        })
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Compression::None => "none",
            Compression::Gzip => "gzip",
            Compression::Xz => "xz",
            Compression::Zstd => "zstd",
            Compression::Bzip2 => "bzip2",
            Compression::Lz4 => "lz4",
        })
    }
}
