//! Reads the question name straight from the request bytes.

use hickory_proto::rr::Name;

const HEADER_LEN: usize = 12;
const POINTER_OR_RESERVED: u8 = 0xC0;

/// Name of the first question with its original letter case, or `None`
/// when there is no question or the name uses compression.
pub fn raw_question_name(datagram: &[u8]) -> Option<Name> {
    let question_count = u16::from_be_bytes([*datagram.get(4)?, *datagram.get(5)?]);
    if question_count == 0 {
        return None;
    }

    let mut offset = HEADER_LEN;
    let mut labels: Vec<&[u8]> = Vec::new();
    loop {
        let len = *datagram.get(offset)?;
        if len == 0 {
            break;
        }
        if len & POINTER_OR_RESERVED != 0 {
            return None;
        }
        let start = offset + 1;
        let end = start + len as usize;
        labels.push(datagram.get(start..end)?);
        offset = end;
    }

    Name::from_labels(labels).ok()
}
