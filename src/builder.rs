use super::*;

#[derive(Debug, PartialEq, Error)]
pub enum MultisigError {
  #[error("multisig scripts hold between 1 and 16 keys but was given {0}")]
  KeyCount(usize),
  #[error("multisig threshold {required} must be between 1 and the key count {keys}")]
  RequiredCount { required: u8, keys: usize },
}

/// Builds the canonical output script paying to `destination`. Round-trips
/// with the solver: classifying the result yields the template the
/// destination came from.
pub fn script_for_destination(destination: &Destination) -> ScriptBuf {
  match destination {
    Destination::PubkeyHash(hash) => Builder::new()
      .push_opcode(opcodes::all::OP_DUP)
      .push_opcode(opcodes::all::OP_HASH160)
      .push_slice(hash.to_byte_array())
      .push_opcode(opcodes::all::OP_EQUALVERIFY)
      .push_opcode(opcodes::all::OP_CHECKSIG)
      .into_script(),
    Destination::ScriptHash(hash) => Builder::new()
      .push_opcode(opcodes::all::OP_HASH160)
      .push_slice(hash.to_byte_array())
      .push_opcode(opcodes::all::OP_EQUAL)
      .into_script(),
    Destination::WitnessV0KeyHash(hash) => Builder::new()
      .push_opcode(opcodes::OP_0)
      .push_slice(hash.to_byte_array())
      .into_script(),
    Destination::WitnessV0ScriptHash(hash) => Builder::new()
      .push_opcode(opcodes::OP_0)
      .push_slice(hash.to_byte_array())
      .into_script(),
    Destination::WitnessUnknown { version, program } => Builder::new()
      .push_opcode(pushdata::encode_op_n(*version))
      .push_slice(<&PushBytes>::try_from(program.as_slice()).expect("program fits in a push"))
      .into_script(),
  }
}

/// Builds a bare pay-to-pubkey script. Most callers want
/// [`script_for_destination`] with the key's hash instead.
pub fn script_for_raw_pubkey(pubkey: &PublicKey) -> ScriptBuf {
  Builder::new()
    .push_key(pubkey)
    .push_opcode(opcodes::all::OP_CHECKSIG)
    .into_script()
}

/// Builds a bare `required`-of-`keys.len()` multisig script.
pub fn script_for_multisig(required: u8, keys: &[PublicKey]) -> Result<ScriptBuf, MultisigError> {
  if keys.is_empty() || keys.len() > 16 {
    return Err(MultisigError::KeyCount(keys.len()));
  }

  if required < 1 || usize::from(required) > keys.len() {
    return Err(MultisigError::RequiredCount {
      required,
      keys: keys.len(),
    });
  }

  let mut builder = Builder::new().push_opcode(pushdata::encode_op_n(required));
  for key in keys {
    builder = builder.push_key(key);
  }

  Ok(
    builder
      .push_opcode(pushdata::encode_op_n(keys.len() as u8))
      .push_opcode(opcodes::all::OP_CHECKMULTISIG)
      .into_script(),
  )
}

/// Builds the version-zero witness script committing to `redeem`. Single-key
/// redeem scripts commit to the key's hash; everything else commits to the
/// redeem script's SHA-256.
pub fn script_for_witness(redeem: &Script) -> ScriptBuf {
  let (output_type, solutions) = solve(redeem);

  let destination = match output_type {
    OutputType::Pubkey => Destination::WitnessV0KeyHash(WPubkeyHash::from_byte_array(
      hash160::Hash::hash(&solutions[0]).to_byte_array(),
    )),
    OutputType::Pubkeyhash => Destination::WitnessV0KeyHash(WPubkeyHash::from_byte_array(
      solutions[0][..]
        .try_into()
        .expect("pubkeyhash solutions are 20 bytes"),
    )),
    _ => Destination::WitnessV0ScriptHash(redeem.wscript_hash()),
  };

  script_for_destination(&destination)
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    crate::solver::tests::{key, multisig_script, pubkeyhash_script, push, KEY1, KEY2, KEY3},
    pretty_assertions::assert_eq,
  };

  fn pubkey(hex: &str) -> PublicKey {
    PublicKey::from_slice(&key(hex)).unwrap()
  }

  #[test]
  fn destination_scripts_round_trip_through_the_solver() {
    for destination in [
      Destination::PubkeyHash(PubkeyHash::from_byte_array([0x11; 20])),
      Destination::ScriptHash(ScriptHash::from_byte_array([0x22; 20])),
      Destination::WitnessV0KeyHash(WPubkeyHash::from_byte_array([0x33; 20])),
      Destination::WitnessV0ScriptHash(WScriptHash::from_byte_array([0x44; 32])),
      Destination::WitnessUnknown {
        version: 1,
        program: vec![0x55; 32],
      },
    ] {
      let script = script_for_destination(&destination);
      assert_eq!(
        extract_destination(&script),
        Some(destination.clone()),
        "{destination:?}",
      );
    }
  }

  #[test]
  fn key_and_multisig_scripts_do_not_round_trip() {
    // extraction collapses these to the key's hash, so rebuilding yields a
    // pay-to-pubkey-hash script rather than the original
    for bytes in [
      script_for_raw_pubkey(&pubkey(KEY1)).into_bytes(),
      multisig_script(1, &[KEY1]),
    ] {
      let script = Script::from_bytes(&bytes);
      let rebuilt = script_for_destination(&extract_destination(script).unwrap());
      assert_ne!(rebuilt.as_bytes(), bytes);
      assert_eq!(solve(&rebuilt).0, OutputType::Pubkeyhash);
    }
  }

  #[test]
  fn pubkey_hash_script_matches_the_template_bytes() {
    assert_eq!(
      script_for_destination(&Destination::PubkeyHash(PubkeyHash::from_byte_array(
        [0x11; 20]
      )))
      .into_bytes(),
      pubkeyhash_script([0x11; 20]),
    );
  }

  #[test]
  fn raw_pubkey_script() {
    let script = script_for_raw_pubkey(&pubkey(KEY1));

    let mut expected = push(&key(KEY1));
    expected.push(OP_CHECKSIG);
    assert_eq!(script.clone().into_bytes(), expected);

    assert_eq!(solve(&script), (OutputType::Pubkey, vec![key(KEY1)]));
  }

  #[test]
  fn multisig_script_matches_the_template_bytes() {
    assert_eq!(
      script_for_multisig(2, &[pubkey(KEY1), pubkey(KEY2), pubkey(KEY3)])
        .unwrap()
        .into_bytes(),
      multisig_script(2, &[KEY1, KEY2, KEY3]),
    );
  }

  #[test]
  fn multisig_bounds_are_enforced() {
    assert_eq!(
      script_for_multisig(1, &[]),
      Err(MultisigError::KeyCount(0)),
    );
    assert_eq!(
      script_for_multisig(1, &vec![pubkey(KEY1); 17]),
      Err(MultisigError::KeyCount(17)),
    );
    assert_eq!(
      script_for_multisig(0, &[pubkey(KEY1)]),
      Err(MultisigError::RequiredCount {
        required: 0,
        keys: 1,
      }),
    );
    assert_eq!(
      script_for_multisig(3, &[pubkey(KEY1), pubkey(KEY2)]),
      Err(MultisigError::RequiredCount {
        required: 3,
        keys: 2,
      }),
    );
  }

  #[test]
  fn witness_script_for_single_key_redeems_commits_to_the_key_hash() {
    let expected = script_for_destination(&Destination::WitnessV0KeyHash(
      WPubkeyHash::from_byte_array(
        hash160::Hash::hash(&key(KEY1)).to_byte_array(),
      ),
    ));

    assert_eq!(
      script_for_witness(&script_for_raw_pubkey(&pubkey(KEY1))),
      expected,
    );

    let hash = hash160::Hash::hash(&key(KEY1)).to_byte_array();
    assert_eq!(
      script_for_witness(Script::from_bytes(&pubkeyhash_script(hash))),
      expected,
    );
  }

  #[test]
  fn witness_script_for_other_redeems_commits_to_the_script_hash() {
    let redeem = script_for_multisig(2, &[pubkey(KEY1), pubkey(KEY2)]).unwrap();

    assert_eq!(
      script_for_witness(&redeem),
      script_for_destination(&Destination::WitnessV0ScriptHash(redeem.wscript_hash())),
    );
  }
}
