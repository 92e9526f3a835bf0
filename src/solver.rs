use {super::*, crate::pushdata::read_op};

/// Classifies an output script, returning its template type and the ordered
/// solution fields the template extracts.
///
/// The field layout per type:
///
/// * `pubkey` family: `[pubkey]`, plus `[height, locktime]` for the replay
///   variants (the dropped payload of `pubkey_data_replay` is not captured);
/// * `pubkeyhash` and `scripthash` families: `[hash]`, plus
///   `[height, locktime]` for the replay variants;
/// * `multisig` family: `[required] pubkeys… [total]`, the same framing for
///   every sub-variant;
/// * `witness_v0_*`: `[program]`; `witness_unknown`: `[version, program]`;
/// * `nulldata` and `nonstandard`: empty.
///
/// Matchers never fail on malformed input; anything that fits no template is
/// `nonstandard`.
pub fn solve(script: &Script) -> (OutputType, Vec<Vec<u8>>) {
  let bytes = script.as_bytes();

  // Shortcut for pay-to-script-hash: both the plain 23-byte form and the
  // replay-anchored form are fully determined by their fixed offsets. A
  // replay-anchored form whose height or locktime fields fail minimality
  // degrades to plain scripthash rather than nonstandard.
  if is_pay_to_script_hash(bytes) {
    let mut solutions = vec![bytes[2..22].to_vec()];
    if let Some((height, locktime)) = match_pay_to_script_hash_replay(bytes) {
      solutions.push(height);
      solutions.push(locktime);
      return (OutputType::ScripthashReplay, solutions);
    }
    return (OutputType::Scripthash, solutions);
  }

  if let Some((version, program)) = match_witness_program(bytes) {
    if version == 0 && program.len() == WITNESS_V0_KEYHASH_SIZE {
      return (OutputType::WitnessV0Keyhash, vec![program]);
    }
    if version == 0 && program.len() == WITNESS_V0_SCRIPTHASH_SIZE {
      return (OutputType::WitnessV0Scripthash, vec![program]);
    }
    if version != 0 {
      return (OutputType::WitnessUnknown, vec![vec![version], program]);
    }
    return (OutputType::Nonstandard, Vec::new());
  }

  // Provably prunable, data-carrying output. Anything after OP_RETURN is
  // acceptable as long as it is push-only.
  if !bytes.is_empty() && bytes[0] == OP_RETURN && is_push_only(&bytes[1..]) {
    return (OutputType::Nulldata, Vec::new());
  }

  if let Some(pubkey) = match_pay_to_pubkey(bytes) {
    return (OutputType::Pubkey, vec![pubkey]);
  }

  if let Some(solutions) = match_pay_to_pubkey_replay(bytes) {
    return (OutputType::PubkeyReplay, solutions);
  }

  if let Some(solutions) = match_pay_to_pubkey_data_replay(bytes) {
    return (OutputType::PubkeyDataReplay, solutions);
  }

  if let Some(hash) = match_pay_to_pubkey_hash(bytes) {
    return (OutputType::Pubkeyhash, vec![hash]);
  }

  if let Some(solutions) = match_pay_to_pubkey_hash_replay(bytes) {
    return (OutputType::PubkeyhashReplay, solutions);
  }

  if let Some((required, pubkeys)) = match_multisig(bytes) {
    return (OutputType::Multisig, multisig_solutions(required, pubkeys));
  }

  if let Some((required, pubkeys)) = match_multisig_replay(bytes) {
    return (OutputType::MultisigReplay, multisig_solutions(required, pubkeys));
  }

  if let Some((required, pubkeys)) = match_multisig_data(bytes) {
    return (OutputType::MultisigData, multisig_solutions(required, pubkeys));
  }

  if let Some((required, pubkeys)) = match_multisig_data_replay(bytes) {
    return (
      OutputType::MultisigDataReplay,
      multisig_solutions(required, pubkeys),
    );
  }

  (OutputType::Nonstandard, Vec::new())
}

/// Whether `data` has the length its first byte claims for a serialized
/// public key: 33 bytes for the compressed prefixes 0x02/0x03, 65 for the
/// uncompressed and hybrid prefixes 0x04/0x06/0x07. A shape check only;
/// point validity is the destination extractor's concern.
pub(crate) fn is_valid_pubkey_size(data: &[u8]) -> bool {
  match data.first() {
    Some(2 | 3) => data.len() == COMPRESSED_PUBKEY_SIZE,
    Some(4 | 6 | 7) => data.len() == PUBKEY_SIZE,
    _ => false,
  }
}

fn is_pay_to_script_hash(bytes: &[u8]) -> bool {
  if bytes.len() == 23 {
    return bytes[0] == OP_HASH160 && bytes[1] == 0x14 && bytes[22] == OP_EQUAL;
  }

  (27..=63).contains(&bytes.len())
    && bytes[0] == OP_HASH160
    && bytes[1] == 0x14
    && bytes[22] == OP_EQUAL
    && bytes[bytes.len() - 2] == OP_CHECKBLOCKATHEIGHTVERIFY
    && bytes[bytes.len() - 1] == OP_2DROP
}

/// Parses the replay suffix fields: a block height of at most 32 bytes and a
/// locktime of at most 4, each either a small-integer opcode or a minimal
/// push. The locktime must additionally be a minimally encoded number, which
/// the height is not held to.
fn read_replay_fields(bytes: &[u8], cursor: &mut usize) -> Option<(Vec<u8>, Vec<u8>)> {
  let (opcode, data) = read_op(bytes, cursor)?;
  if data.len() > 32 {
    return None;
  }
  if !pushdata::is_small_integer(opcode) && !is_minimal_push(data, opcode) {
    return None;
  }
  let height = data.to_vec();

  let (opcode, data) = read_op(bytes, cursor)?;
  if data.len() > 4 {
    return None;
  }
  if !pushdata::is_small_integer(opcode)
    && (!is_minimal_push(data, opcode) || !is_minimally_encoded(data))
  {
    return None;
  }

  Some((height, data.to_vec()))
}

fn match_pay_to_script_hash_replay(bytes: &[u8]) -> Option<(Vec<u8>, Vec<u8>)> {
  if !(27..=63).contains(&bytes.len())
    || bytes[0] != OP_HASH160
    || bytes[1] != 0x14
    || bytes[22] != OP_EQUAL
    || bytes[bytes.len() - 2] != OP_CHECKBLOCKATHEIGHTVERIFY
    || bytes[bytes.len() - 1] != OP_2DROP
  {
    return None;
  }

  let mut cursor = 23;
  read_replay_fields(bytes, &mut cursor)
}

fn match_pay_to_pubkey(bytes: &[u8]) -> Option<Vec<u8>> {
  for size in [PUBKEY_SIZE, COMPRESSED_PUBKEY_SIZE] {
    if bytes.len() == size + 2 && bytes[0] as usize == size && bytes[size + 1] == OP_CHECKSIG {
      let pubkey = bytes[1..=size].to_vec();
      return is_valid_pubkey_size(&pubkey).then_some(pubkey);
    }
  }
  None
}

fn match_pay_to_pubkey_replay(bytes: &[u8]) -> Option<Vec<Vec<u8>>> {
  let size = bytes.len();
  if !(COMPRESSED_PUBKEY_SIZE + 6..=COMPRESSED_PUBKEY_SIZE + 42).contains(&size)
    || bytes[0] as usize != COMPRESSED_PUBKEY_SIZE
    || bytes[COMPRESSED_PUBKEY_SIZE + 1] != OP_CHECKSIG
    || bytes[size - 2] != OP_CHECKBLOCKATHEIGHTVERIFY
    || bytes[size - 1] != OP_2DROP
  {
    return None;
  }

  let pubkey = bytes[1..=COMPRESSED_PUBKEY_SIZE].to_vec();
  let mut cursor = COMPRESSED_PUBKEY_SIZE + 2;
  let (height, locktime) = read_replay_fields(bytes, &mut cursor)?;

  is_valid_pubkey_size(&pubkey).then(|| vec![pubkey, height, locktime])
}

fn match_pay_to_pubkey_data_replay(bytes: &[u8]) -> Option<Vec<Vec<u8>>> {
  let size = bytes.len();
  if !(COMPRESSED_PUBKEY_SIZE + 8..=COMPRESSED_PUBKEY_SIZE + 125).contains(&size)
    || bytes[0] as usize != COMPRESSED_PUBKEY_SIZE
    || bytes[COMPRESSED_PUBKEY_SIZE + 1] != OP_CHECKSIG
    || bytes[size - 2] != OP_CHECKBLOCKATHEIGHTVERIFY
    || bytes[size - 1] != OP_2DROP
  {
    return None;
  }

  let pubkey = bytes[1..=COMPRESSED_PUBKEY_SIZE].to_vec();
  let mut cursor = COMPRESSED_PUBKEY_SIZE + 2;

  let (opcode, data) = read_op(bytes, &mut cursor)?;
  if data.is_empty() || data.len() > MAX_DATA_DROP_SIZE || !is_minimal_push(data, opcode) {
    return None;
  }
  let (opcode, _) = read_op(bytes, &mut cursor)?;
  if opcode != OP_DROP {
    return None;
  }

  let (height, locktime) = read_replay_fields(bytes, &mut cursor)?;

  is_valid_pubkey_size(&pubkey).then(|| vec![pubkey, height, locktime])
}

fn match_pay_to_pubkey_hash(bytes: &[u8]) -> Option<Vec<u8>> {
  (bytes.len() == 25
    && bytes[0] == OP_DUP
    && bytes[1] == OP_HASH160
    && bytes[2] == 0x14
    && bytes[23] == OP_EQUALVERIFY
    && bytes[24] == OP_CHECKSIG)
    .then(|| bytes[3..23].to_vec())
}

fn match_pay_to_pubkey_hash_replay(bytes: &[u8]) -> Option<Vec<Vec<u8>>> {
  let size = bytes.len();
  if !(29..=65).contains(&size)
    || bytes[0] != OP_DUP
    || bytes[1] != OP_HASH160
    || bytes[2] != 0x14
    || bytes[23] != OP_EQUALVERIFY
    || bytes[24] != OP_CHECKSIG
    || bytes[size - 2] != OP_CHECKBLOCKATHEIGHTVERIFY
    || bytes[size - 1] != OP_2DROP
  {
    return None;
  }

  let hash = bytes[3..23].to_vec();
  let mut cursor = 25;
  let (height, locktime) = read_replay_fields(bytes, &mut cursor)?;

  Some(vec![hash, height, locktime])
}

/// Reads the `<required> <pubkey>… <total>` head common to the multisig
/// family, leaving the cursor on the opcode after the total count. Fails
/// unless every intervening push is key-shaped, the captured count equals the
/// total, and required does not exceed it.
fn read_multisig_head(bytes: &[u8], cursor: &mut usize) -> Option<(u8, Vec<Vec<u8>>)> {
  let (opcode, _) = read_op(bytes, cursor)?;
  if !pushdata::is_small_integer(opcode) {
    return None;
  }
  let required = pushdata::decode_op_n(opcode);

  let mut pubkeys = Vec::new();
  let total = loop {
    let (opcode, data) = read_op(bytes, cursor)?;
    if is_valid_pubkey_size(data) {
      pubkeys.push(data.to_vec());
      continue;
    }
    if !pushdata::is_small_integer(opcode) {
      return None;
    }
    break pushdata::decode_op_n(opcode);
  };

  (pubkeys.len() == total as usize && required <= total).then_some((required, pubkeys))
}

fn match_multisig(bytes: &[u8]) -> Option<(u8, Vec<Vec<u8>>)> {
  if *bytes.last()? != OP_CHECKMULTISIG {
    return None;
  }

  let mut cursor = 0;
  let (required, pubkeys) = read_multisig_head(bytes, &mut cursor)?;

  (cursor + 1 == bytes.len()).then_some((required, pubkeys))
}

fn match_multisig_replay(bytes: &[u8]) -> Option<(u8, Vec<Vec<u8>>)> {
  if bytes.len() < 2
    || bytes[bytes.len() - 2] != OP_CHECKBLOCKATHEIGHTVERIFY
    || bytes[bytes.len() - 1] != OP_2DROP
  {
    return None;
  }

  let mut cursor = 0;
  let (required, pubkeys) = read_multisig_head(bytes, &mut cursor)?;

  let (opcode, _) = read_op(bytes, &mut cursor)?;
  if opcode != OP_CHECKMULTISIG {
    return None;
  }

  read_replay_fields(bytes, &mut cursor)?;

  (cursor + 2 == bytes.len()).then_some((required, pubkeys))
}

fn match_multisig_data(bytes: &[u8]) -> Option<(u8, Vec<Vec<u8>>)> {
  if *bytes.last()? != OP_DROP {
    return None;
  }

  let mut cursor = 0;
  let (required, pubkeys) = read_multisig_head(bytes, &mut cursor)?;

  let (opcode, _) = read_op(bytes, &mut cursor)?;
  if opcode != OP_CHECKMULTISIG {
    return None;
  }

  let (opcode, data) = read_op(bytes, &mut cursor)?;
  if data.is_empty() || data.len() > MAX_DATA_DROP_SIZE || !is_minimal_push(data, opcode) {
    return None;
  }

  (cursor + 1 == bytes.len()).then_some((required, pubkeys))
}

fn match_multisig_data_replay(bytes: &[u8]) -> Option<(u8, Vec<Vec<u8>>)> {
  if bytes.len() < 2
    || bytes[bytes.len() - 2] != OP_CHECKBLOCKATHEIGHTVERIFY
    || bytes[bytes.len() - 1] != OP_2DROP
  {
    return None;
  }

  let mut cursor = 0;
  let (required, pubkeys) = read_multisig_head(bytes, &mut cursor)?;

  let (opcode, _) = read_op(bytes, &mut cursor)?;
  if opcode != OP_CHECKMULTISIG {
    return None;
  }

  let (opcode, data) = read_op(bytes, &mut cursor)?;
  if data.is_empty() || data.len() > MAX_DATA_DROP_SIZE || !is_minimal_push(data, opcode) {
    return None;
  }
  let (opcode, _) = read_op(bytes, &mut cursor)?;
  if opcode != OP_DROP {
    return None;
  }

  read_replay_fields(bytes, &mut cursor)?;

  (cursor + 2 == bytes.len()).then_some((required, pubkeys))
}

fn match_witness_program(bytes: &[u8]) -> Option<(u8, Vec<u8>)> {
  if bytes.len() < 4 || bytes.len() > 42 {
    return None;
  }
  if bytes[0] != OP_0 && !pushdata::is_small_integer(bytes[0]) {
    return None;
  }
  if bytes[1] as usize + 2 != bytes.len() {
    return None;
  }

  Some((pushdata::decode_op_n(bytes[0]), bytes[2..].to_vec()))
}

/// Multisig solutions use the same `[required] pubkeys… [total]` framing for
/// every sub-variant, so the extractor can stay uniform. The count bytes are
/// in range 1..=16 by construction.
fn multisig_solutions(required: u8, pubkeys: Vec<Vec<u8>>) -> Vec<Vec<u8>> {
  let total = pubkeys.len() as u8;
  let mut solutions = vec![vec![required]];
  solutions.extend(pubkeys);
  solutions.push(vec![total]);
  solutions
}
