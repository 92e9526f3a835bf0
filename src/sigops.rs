use super::*;

/// Counts the signature operations in `script` for block and transaction
/// limits. `CHECKSIG` and `CHECKSIGVERIFY` count one each. The multisig
/// opcodes count the key total when `accurate` and the preceding opcode is a
/// small integer, and [`MAX_PUBKEYS_PER_MULTISIG`] otherwise. Decoding stops
/// silently at a malformed push, keeping the operations counted so far.
pub fn sig_op_count(script: &Script, accurate: bool) -> u32 {
  let bytes = script.as_bytes();
  let mut cursor = 0;
  let mut count = 0;
  let mut last_opcode = None;

  while let Some((opcode, _)) = pushdata::read_op(bytes, &mut cursor) {
    if opcode == OP_CHECKSIG || opcode == OP_CHECKSIGVERIFY {
      count += 1;
    } else if opcode == OP_CHECKMULTISIG || opcode == OP_CHECKMULTISIGVERIFY {
      count += match last_opcode {
        Some(last) if accurate && pushdata::is_small_integer(last) => {
          u32::from(pushdata::decode_op_n(last))
        }
        _ => MAX_PUBKEYS_PER_MULTISIG as u32,
      };
    }
    last_opcode = Some(opcode);
  }

  count
}
