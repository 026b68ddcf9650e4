//! # DAF file record encoding and decoding
//!
//! The first 1024-byte record of a DAF/SPK kernel holds the structural
//! metadata of the container: the summary layout (`ND`/`NI`), the forward and
//! backward summary-record pointers, the first free address, the internal
//! kernel name, the platform tag, and the NAIF FTP sentinel.
//!
//! This module owns both directions: [`DafHeader::encode`] produces the
//! record written at file creation, and [`DafHeader::parse`] decodes it back
//! during the verification pass. Header integers are little-endian, matching
//! the `LTL-IEEE` tag this writer always emits.

use std::fmt;

use nom::{bytes::complete::take, number::complete::le_i32, IResult};

use crate::constants::{
    DAF_BINARY_FORMAT, DAF_FTP_SENTINEL, DAF_RECORD_SIZE, DAF_SPK_IDWORD,
};

/// In-memory representation of the DAF/SPK file record.
///
/// Text fields are stored trimmed of trailing padding; `encode` restores the
/// fixed-width padding on write.
#[derive(Debug, PartialEq, Clone)]
pub struct DafHeader {
    /// 8-byte identifier, always `"DAF/SPK"` for this writer.
    pub idword: String,
    /// Internal kernel name (60 bytes padded on disk).
    pub internal_filename: String,
    /// Number of double-precision components in each summary (ND).
    pub nd: i32,
    /// Number of integer components in each summary (NI).
    pub ni: i32,
    /// Record index of the first summary record.
    pub fward: i32,
    /// Record index of the last summary record.
    pub bward: i32,
    /// First free address, in double-precision words, 1-based.
    pub free: i32,
    /// Platform tag (`"LTL-IEEE"`).
    pub locfmt: String,
}

impl DafHeader {
    /// Header of a freshly created single-segment kernel.
    ///
    /// `free` is the 1-based word address immediately past the last data
    /// word; the summary and name records sit at records 2 and 3.
    pub fn single_segment(internal_filename: &str, free: i32) -> Self {
        DafHeader {
            idword: DAF_SPK_IDWORD.to_string(),
            internal_filename: internal_filename.to_string(),
            nd: crate::constants::DAF_ND,
            ni: crate::constants::DAF_NI,
            fward: 2,
            bward: 2,
            free,
            locfmt: DAF_BINARY_FORMAT.to_string(),
        }
    }

    /// Encode the header into one DAF physical record.
    pub fn encode(&self) -> [u8; DAF_RECORD_SIZE] {
        let mut record = [0u8; DAF_RECORD_SIZE];
        record[0..8].copy_from_slice(format!("{:<8}", self.idword).as_bytes());
        record[8..12].copy_from_slice(&self.nd.to_le_bytes());
        record[12..16].copy_from_slice(&self.ni.to_le_bytes());
        record[16..76].copy_from_slice(format!("{:<60}", self.internal_filename).as_bytes());
        record[76..80].copy_from_slice(&self.fward.to_le_bytes());
        record[80..84].copy_from_slice(&self.bward.to_le_bytes());
        record[84..88].copy_from_slice(&self.free.to_le_bytes());
        record[88..96].copy_from_slice(format!("{:<8}", self.locfmt).as_bytes());
        // 603 reserved bytes, then the 28-byte FTP sentinel
        record[699..727].copy_from_slice(DAF_FTP_SENTINEL);
        record
    }

    /// Parse the first 1024-byte DAF record.
    ///
    /// Arguments
    /// -----------------
    /// * `input`: Byte slice starting at the beginning of the file, at least
    ///   one record long.
    ///
    /// Return
    /// ----------
    /// * The remaining input and the decoded header, trailing padding
    ///   removed from text fields.
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, idword) = take(8usize)(input)?;
        let (input, nd) = le_i32(input)?;
        let (input, ni) = le_i32(input)?;
        let (input, ifname) = take(60usize)(input)?;
        let (input, fward) = le_i32(input)?;
        let (input, bward) = le_i32(input)?;
        let (input, free) = le_i32(input)?;
        let (input, locfmt) = take(8usize)(input)?;
        let (input, _) = take(603usize)(input)?; // reserved
        let (input, _ftpstr) = take(28usize)(input)?;
        Ok((
            input,
            DafHeader {
                idword: String::from_utf8_lossy(idword).trim().to_string(),
                internal_filename: String::from_utf8_lossy(ifname).trim().to_string(),
                nd,
                ni,
                fward,
                bward,
                free,
                locfmt: String::from_utf8_lossy(locfmt).trim().to_string(),
            },
        ))
    }
}

impl fmt::Display for DafHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("idword", self.idword.clone()),
            ("internal name", self.internal_filename.clone()),
            ("ND / NI", format!("{} / {}", self.nd, self.ni)),
            ("summary records", format!("{}..{}", self.fward, self.bward)),
            ("first free word", self.free.to_string()),
            ("binary format", self.locfmt.clone()),
        ];
        let label_width = fields.iter().map(|(k, _)| k.len()).max().unwrap_or(10);
        for (label, value) in fields {
            writeln!(f, "{label:<label_width$} : {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod daf_header_test {
    use super::*;

    #[test]
    fn test_encode_parse_round_trip() {
        let header = DafHeader::single_segment("sat0_traj.bsp", 421);
        let record = header.encode();
        let (_rest, parsed) = DafHeader::parse(&record).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_encoded_layout() {
        let header = DafHeader::single_segment("k.bsp", 385);
        let record = header.encode();
        assert_eq!(&record[0..8], b"DAF/SPK ");
        assert_eq!(&record[88..96], b"LTL-IEEE");
        assert_eq!(&record[699..727], DAF_FTP_SENTINEL);
    }

    #[test]
    fn test_display() {
        let header = DafHeader::single_segment("sat0_traj.bsp", 421);
        let rendered = format!("{header}");
        assert!(rendered.contains("DAF/SPK"));
        assert!(rendered.contains("2 / 6"));
        assert!(rendered.contains("LTL-IEEE"));
    }
}
