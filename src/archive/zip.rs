// src/archive/zip.rs

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::{Compression, Crc};
use std::io::{Read, Write};

use super::error::ArchiveError;

const LOCAL_HEADER_SIG: u32 = 0x0403_4b50;
const CENTRAL_HEADER_SIG: u32 = 0x0201_4b50;
const END_OF_CENTRAL_DIR_SIG: u32 = 0x0605_4b50;

const LOCAL_HEADER_LEN: usize = 30;
const CENTRAL_HEADER_LEN: usize = 46;
const END_OF_CENTRAL_DIR_LEN: usize = 22;
const MAX_COMMENT_LEN: usize = 0xFFFF;

const METHOD_STORED: u16 = 0;
const METHOD_DEFLATE: u16 = 8;

const FLAG_ENCRYPTED: u16 = 0x0001;
const FLAG_UTF8: u16 = 0x0800;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZipEntry {
    /// Name as stored in the archive; directories end with `/`.
    pub path: String,
    pub content: Vec<u8>,
    pub is_directory: bool,
}

impl ZipEntry {
    pub fn file(path: &str, content: &[u8]) -> Self {
        Self { path: path.to_string(), content: content.to_vec(), is_directory: false }
    }

    pub fn directory(path: &str) -> Self {
        let mut path = path.to_string();
        if !path.ends_with('/') {
            path.push('/');
        }
        Self { path, content: Vec::new(), is_directory: true }
    }
}

fn read_u16(data: &[u8], offset: usize) -> Result<u16, ArchiveError> {
    data.get(offset..offset + 2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .ok_or_else(|| ArchiveError::malformed("unexpected end of archive"))
}

fn read_u32(data: &[u8], offset: usize) -> Result<u32, ArchiveError> {
    data.get(offset..offset + 4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or_else(|| ArchiveError::malformed("unexpected end of archive"))
}

fn slice(data: &[u8], offset: usize, len: usize) -> Result<&[u8], ArchiveError> {
    data.get(offset..offset + len)
        .ok_or_else(|| ArchiveError::malformed("unexpected end of archive"))
}

fn crc32(data: &[u8]) -> u32 {
    let mut crc = Crc::new();
    crc.update(data);
    crc.sum()
}

/// Locate the end-of-central-directory record, scanning back over a
/// trailing comment.
fn find_end_of_central_dir(data: &[u8]) -> Result<usize, ArchiveError> {
    if data.len() < END_OF_CENTRAL_DIR_LEN {
        return Err(ArchiveError::malformed("file too short"));
    }
    let last = data.len() - END_OF_CENTRAL_DIR_LEN;
    let first = last.saturating_sub(MAX_COMMENT_LEN);
    (first..=last)
        .rev()
        .find(|&pos| read_u32(data, pos).ok() == Some(END_OF_CENTRAL_DIR_SIG))
        .ok_or_else(|| ArchiveError::malformed("end of central directory not found"))
}

/// Parse a zip archive into entries, in central-directory order.
pub fn parse_archive(data: &[u8]) -> Result<Vec<ZipEntry>, ArchiveError> {
    let eocd = find_end_of_central_dir(data)?;
    let disk = read_u16(data, eocd + 4)?;
    let cd_disk = read_u16(data, eocd + 6)?;
    if disk != 0 || cd_disk != 0 {
        return Err(ArchiveError::malformed("multi-disk archives are not supported"));
    }
    let count = read_u16(data, eocd + 10)? as usize;
    let cd_offset = read_u32(data, eocd + 16)?;
    if cd_offset == u32::MAX || count == 0xFFFF {
        return Err(ArchiveError::malformed("zip64 archives are not supported"));
    }

    let mut entries = Vec::with_capacity(count);
    let mut offset = cd_offset as usize;

    for _ in 0..count {
        if read_u32(data, offset)? != CENTRAL_HEADER_SIG {
            return Err(ArchiveError::malformed("bad central directory signature"));
        }
        let flags = read_u16(data, offset + 8)?;
        let method = read_u16(data, offset + 10)?;
        let crc = read_u32(data, offset + 16)?;
        let compressed_size = read_u32(data, offset + 20)? as usize;
        let size = read_u32(data, offset + 24)? as usize;
        let name_len = read_u16(data, offset + 28)? as usize;
        let extra_len = read_u16(data, offset + 30)? as usize;
        let comment_len = read_u16(data, offset + 32)? as usize;
        let local_offset = read_u32(data, offset + 42)? as usize;

        let raw_name = slice(data, offset + CENTRAL_HEADER_LEN, name_len)?;
        let path = decode_name(raw_name, flags);
        offset += CENTRAL_HEADER_LEN + name_len + extra_len + comment_len;

        if flags & FLAG_ENCRYPTED != 0 {
            return Err(ArchiveError::Unsupported { entry: path, reason: "encrypted".into() });
        }

        if path.ends_with('/') || path.ends_with('\\') {
            entries.push(ZipEntry { path, content: Vec::new(), is_directory: true });
            continue;
        }

        if read_u32(data, local_offset)? != LOCAL_HEADER_SIG {
            return Err(ArchiveError::malformed(format!("bad local header for '{}'", path)));
        }
        let local_name_len = read_u16(data, local_offset + 26)? as usize;
        let local_extra_len = read_u16(data, local_offset + 28)? as usize;
        let data_start = local_offset + LOCAL_HEADER_LEN + local_name_len + local_extra_len;
        let raw = slice(data, data_start, compressed_size)?;

        let content = match method {
            METHOD_STORED => raw.to_vec(),
            METHOD_DEFLATE => inflate(raw, size).map_err(|e| {
                ArchiveError::malformed(format!("cannot inflate '{}': {}", path, e))
            })?,
            other => {
                return Err(ArchiveError::Unsupported {
                    entry: path,
                    reason: format!("compression method {}", other),
                });
            }
        };

        if content.len() != size {
            return Err(ArchiveError::malformed(format!("size mismatch in '{}'", path)));
        }
        if crc32(&content) != crc {
            return Err(ArchiveError::Checksum { entry: path });
        }

        entries.push(ZipEntry { path, content, is_directory: false });
    }

    Ok(entries)
}

/// Entry names are UTF-8 when flagged; otherwise treated as Latin-1-ish
/// bytes, which covers the ASCII names real archives carry.
fn decode_name(raw: &[u8], flags: u16) -> String {
    if flags & FLAG_UTF8 != 0 {
        String::from_utf8_lossy(raw).to_string()
    } else {
        match std::str::from_utf8(raw) {
            Ok(s) => s.to_string(),
            Err(_) => raw.iter().map(|&b| b as char).collect(),
        }
    }
}

fn inflate(raw: &[u8], size_hint: usize) -> std::io::Result<Vec<u8>> {
    let mut decoder = DeflateDecoder::new(raw);
    let mut out = Vec::with_capacity(size_hint);
    decoder.read_to_end(&mut out)?;
    Ok(out)
}

fn deflate(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Create a zip archive from entries. File contents are deflated when
/// `compress` is set and stored otherwise.
pub fn create_archive(entries: &[ZipEntry], compress: bool) -> std::io::Result<Vec<u8>> {
    let mut archive = Vec::new();
    let mut central = Vec::new();

    for entry in entries {
        let local_offset = archive.len() as u32;
        let (method, payload) = if entry.is_directory || !compress {
            (METHOD_STORED, entry.content.clone())
        } else {
            (METHOD_DEFLATE, deflate(&entry.content)?)
        };
        let crc = crc32(&entry.content);
        let name = entry.path.as_bytes();

        archive.extend_from_slice(&LOCAL_HEADER_SIG.to_le_bytes());
        archive.extend_from_slice(&20u16.to_le_bytes()); // version needed
        archive.extend_from_slice(&FLAG_UTF8.to_le_bytes());
        archive.extend_from_slice(&method.to_le_bytes());
        archive.extend_from_slice(&0u16.to_le_bytes()); // mtime
        archive.extend_from_slice(&0x21u16.to_le_bytes()); // mdate: 1980-01-01
        archive.extend_from_slice(&crc.to_le_bytes());
        archive.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        archive.extend_from_slice(&(entry.content.len() as u32).to_le_bytes());
        archive.extend_from_slice(&(name.len() as u16).to_le_bytes());
        archive.extend_from_slice(&0u16.to_le_bytes()); // extra
        archive.extend_from_slice(name);
        archive.extend_from_slice(&payload);

        central.extend_from_slice(&CENTRAL_HEADER_SIG.to_le_bytes());
        central.extend_from_slice(&20u16.to_le_bytes()); // version made by
        central.extend_from_slice(&20u16.to_le_bytes()); // version needed
        central.extend_from_slice(&FLAG_UTF8.to_le_bytes());
        central.extend_from_slice(&method.to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes());
        central.extend_from_slice(&0x21u16.to_le_bytes());
        central.extend_from_slice(&crc.to_le_bytes());
        central.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        central.extend_from_slice(&(entry.content.len() as u32).to_le_bytes());
        central.extend_from_slice(&(name.len() as u16).to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes()); // extra
        central.extend_from_slice(&0u16.to_le_bytes()); // comment
        central.extend_from_slice(&0u16.to_le_bytes()); // disk
        central.extend_from_slice(&0u16.to_le_bytes()); // internal attrs
        central.extend_from_slice(&0u32.to_le_bytes()); // external attrs
        central.extend_from_slice(&local_offset.to_le_bytes());
        central.extend_from_slice(name);
    }

    let cd_offset = archive.len() as u32;
    let cd_size = central.len() as u32;
    archive.extend_from_slice(&central);

    archive.extend_from_slice(&END_OF_CENTRAL_DIR_SIG.to_le_bytes());
    archive.extend_from_slice(&0u16.to_le_bytes());
    archive.extend_from_slice(&0u16.to_le_bytes());
    archive.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    archive.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    archive.extend_from_slice(&cd_size.to_le_bytes());
    archive.extend_from_slice(&cd_offset.to_le_bytes());
    archive.extend_from_slice(&0u16.to_le_bytes()); // comment

    Ok(archive)
}
