//! ICC profile serialization.
//!
//! Layout is produced out of order in one in-memory buffer:
//! 1. tag payloads, starting right after the space reserved for the table
//! 2. the tag table, once offsets and sizes are known
//! 3. the header, whose profile ID hashes everything written before it
//!
//! Entries with equal payloads share a single encoded copy; each still gets
//! its own table row.

use tracing::{debug, trace};

use super::data_writer::IccDataWriter;
use super::header::{HEADER_SIZE, PROFILE_ID_OFFSET};
use super::profile::IccProfile;
use super::tags::{TagDataEntry, TagTableEntry};
use crate::error::{Error, Result};

/// Serialize a profile.
///
/// `None` is rejected with [`Error::InvalidArgument`], as is a profile whose
/// encoding would not fit the 32-bit size field.
pub fn write_profile(profile: Option<&IccProfile>) -> Result<Vec<u8>> {
    let profile = profile.ok_or_else(|| Error::invalid_argument("profile must be present"))?;
    let entries = &profile.entries;

    let groups = group_by_payload(entries);
    let data_start = HEADER_SIZE + 4 + 12 * entries.len();

    let mut writer = IccDataWriter::with_capacity(data_start + 64 * groups.len());
    let mut rows: Vec<TagTableEntry> = entries
        .iter()
        .map(|e| TagTableEntry {
            signature: e.signature,
            offset: 0,
            size: 0,
        })
        .collect();

    writer.set_index(data_start);
    for group in &groups {
        let written = writer.write_tag_data_entry(&entries[group[0]]);
        trace!(
            tag = %written.signature.to_string(),
            offset = written.offset,
            size = written.size,
            shared_by = group.len(),
            "wrote tag payload"
        );
        for &i in group {
            rows[i].offset = written.offset;
            rows[i].size = written.size;
        }
    }

    let total = writer.len().max(data_start);
    let size = u32::try_from(total)
        .map_err(|_| Error::invalid_argument(format!("profile of {total} bytes exceeds 4 GiB")))?;

    writer.set_index(HEADER_SIZE);
    writer.write_u32(rows.len() as u32);
    for row in &rows {
        writer.write_tag_table_entry(row);
    }

    profile.header.write_into(&mut writer, size, &[0; 16]);
    let id = profile_id_of(writer.data());
    writer.data_mut()[PROFILE_ID_OFFSET..PROFILE_ID_OFFSET + 16].copy_from_slice(&id);

    debug!(
        tags = entries.len(),
        payloads = groups.len(),
        size,
        "serialized ICC profile"
    );
    Ok(writer.into_inner())
}

/// Stable partition of entry indices into payload-equality classes,
/// ordered by first appearance.
fn group_by_payload(entries: &[TagDataEntry]) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        match groups
            .iter_mut()
            .find(|g| entries[g[0]].same_payload(entry))
        {
            Some(group) => group.push(i),
            None => groups.push(vec![i]),
        }
    }
    groups
}

/// MD5 profile ID over serialized bytes (ICC.1 7.2.18): flags, rendering
/// intent and the ID field itself are zeroed before hashing.
#[cfg(feature = "profile-id")]
pub fn profile_id_of(data: &[u8]) -> [u8; 16] {
    use md5::{Digest, Md5};

    if data.len() < HEADER_SIZE {
        return [0; 16];
    }

    let mut header = [0u8; HEADER_SIZE];
    header.copy_from_slice(&data[..HEADER_SIZE]);
    header[44..48].fill(0);
    header[64..68].fill(0);
    header[PROFILE_ID_OFFSET..PROFILE_ID_OFFSET + 16].fill(0);

    let mut hasher = Md5::new();
    hasher.update(header);
    hasher.update(&data[HEADER_SIZE..]);
    hasher.finalize().into()
}

/// Without a hash implementation the ID is left all zero.
#[cfg(not(feature = "profile-id"))]
pub fn profile_id_of(_data: &[u8]) -> [u8; 16] {
    [0; 16]
}
