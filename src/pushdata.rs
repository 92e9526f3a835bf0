use super::*;

/// Reads the opcode at `cursor`, returning the opcode byte and any pushed
/// data and advancing the cursor past both. Returns `None` at the end of the
/// script and when a push declares more bytes than remain; the cursor is left
/// untouched in either case, so callers can tell a clean end from a malformed
/// tail by comparing it against the script length.
pub(crate) fn read_op<'a>(bytes: &'a [u8], cursor: &mut usize) -> Option<(u8, &'a [u8])> {
  let mut i = *cursor;
  let opcode = *bytes.get(i)?;
  i += 1;

  let data: &[u8] = if opcode <= OP_PUSHDATA4 {
    let size = match opcode {
      OP_PUSHDATA1 => {
        let size = *bytes.get(i)? as usize;
        i += 1;
        size
      }
      OP_PUSHDATA2 => {
        let size = u16::from_le_bytes(bytes.get(i..i + 2)?.try_into().unwrap()) as usize;
        i += 2;
        size
      }
      OP_PUSHDATA4 => {
        let size = u32::from_le_bytes(bytes.get(i..i + 4)?.try_into().unwrap()) as usize;
        i += 4;
        size
      }
      _ => opcode as usize,
    };
    let data = bytes.get(i..i + size)?;
    i += size;
    data
  } else {
    &[]
  };

  *cursor = i;
  Some((opcode, data))
}

/// Whether `opcode` is the smallest possible push encoding for `data`.
///
/// OP_1NEGATE and OP_1 through OP_16 are by definition minimal and are not
/// push opcodes for the purpose of this test.
pub fn is_minimal_push(data: &[u8], opcode: u8) -> bool {
  if opcode > OP_PUSHDATA4 {
    false
  } else if data.is_empty() {
    // Should have used OP_0.
    opcode == OP_0
  } else if data.len() == 1 && (1..=16).contains(&data[0]) {
    // Should have used OP_1 .. OP_16.
    false
  } else if data.len() == 1 && data[0] == 0x81 {
    // Should have used OP_1NEGATE.
    false
  } else if data.len() <= 75 {
    // Must have used a direct push, whose opcode is the byte count.
    opcode as usize == data.len()
  } else if data.len() <= 255 {
    opcode == OP_PUSHDATA1
  } else if data.len() <= 65535 {
    opcode == OP_PUSHDATA2
  } else {
    true
  }
}

/// Whether `num` is a script number encoded in the minimum possible number of
/// bytes. The most significant byte, ignoring the sign bit, must be nonzero,
/// except when dropping it would collide with the sign bit of the byte below,
/// as in +-255 encoding to 0xff00 and 0xff80. The empty encoding is not
/// minimal, and neither is negative zero (0x80).
pub fn is_minimally_encoded(num: &[u8]) -> bool {
  match num.split_last() {
    Some((last, rest)) if last & 0x7f == 0 => rest.last().is_some_and(|below| below & 0x80 != 0),
    Some(_) => true,
    None => false,
  }
}

/// Whether every opcode in `bytes` only pushes to the stack. OP_16 is the
/// highest such opcode; OP_RESERVED counts as a push for this test.
pub fn is_push_only(bytes: &[u8]) -> bool {
  let mut cursor = 0;
  while let Some((opcode, _)) = read_op(bytes, &mut cursor) {
    if opcode > OP_16 {
      return false;
    }
  }
  cursor == bytes.len()
}

/// OP_1 through OP_16.
pub(crate) fn is_small_integer(opcode: u8) -> bool {
  (OP_1..=OP_16).contains(&opcode)
}

pub(crate) fn decode_op_n(opcode: u8) -> u8 {
  if opcode == OP_0 { 0 } else { opcode - (OP_1 - 1) }
}

pub(crate) fn encode_op_n(n: u8) -> Opcode {
  if n == 0 {
    opcodes::OP_0
  } else {
    Opcode::from(OP_1 - 1 + n)
  }
}
