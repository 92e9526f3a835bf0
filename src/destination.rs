use super::*;

/// A spendable destination recovered from an output script. One-to-one with
/// the address encodings the node hands out, which is why `nonstandard`,
/// `nulldata`, and multisig scripts above 1-of-1 have no `Destination`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
  PubkeyHash(PubkeyHash),
  ScriptHash(ScriptHash),
  WitnessV0KeyHash(WPubkeyHash),
  WitnessV0ScriptHash(WScriptHash),
  WitnessUnknown { version: u8, program: Vec<u8> },
}

impl Destination {
  /// The raw hash payload an address encoder would serialize. Unknown
  /// witness versions have no address form, so they carry no data here.
  pub fn data(&self) -> Vec<u8> {
    match self {
      Self::PubkeyHash(hash) => hash.to_byte_array().to_vec(),
      Self::ScriptHash(hash) => hash.to_byte_array().to_vec(),
      Self::WitnessV0KeyHash(hash) => hash.to_byte_array().to_vec(),
      Self::WitnessV0ScriptHash(hash) => hash.to_byte_array().to_vec(),
      Self::WitnessUnknown { .. } => Vec::new(),
    }
  }
}

/// The full classification of a script together with every destination it
/// pays to and the signature threshold required to spend it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
  pub output_type: OutputType,
  pub destinations: Vec<Destination>,
  pub required: u8,
}

/// Derives the single destination an output script pays to, if it has one.
///
/// Pay-to-pubkey scripts collapse to the hash of the key, and fail here if
/// the key is not a valid curve point even though the solver accepts any
/// key-shaped push. Multisig scripts collapse only in the degenerate 1-of-1
/// case, again to the key's hash.
pub fn extract_destination(script: &Script) -> Option<Destination> {
  let (output_type, solutions) = solve(script);

  match output_type {
    OutputType::Pubkey | OutputType::PubkeyReplay | OutputType::PubkeyDataReplay => {
      let pubkey = PublicKey::from_slice(&solutions[0]).ok()?;
      Some(Destination::PubkeyHash(pubkey.pubkey_hash()))
    }
    OutputType::Pubkeyhash | OutputType::PubkeyhashReplay => Some(Destination::PubkeyHash(
      PubkeyHash::from_byte_array(solutions[0][..].try_into().ok()?),
    )),
    OutputType::Scripthash | OutputType::ScripthashReplay => Some(Destination::ScriptHash(
      ScriptHash::from_byte_array(solutions[0][..].try_into().ok()?),
    )),
    OutputType::WitnessV0Keyhash => Some(Destination::WitnessV0KeyHash(
      WPubkeyHash::from_byte_array(solutions[0][..].try_into().ok()?),
    )),
    OutputType::WitnessV0Scripthash => Some(Destination::WitnessV0ScriptHash(
      WScriptHash::from_byte_array(solutions[0][..].try_into().ok()?),
    )),
    OutputType::WitnessUnknown => Some(Destination::WitnessUnknown {
      version: solutions[0][0],
      program: solutions[1].clone(),
    }),
    OutputType::Multisig
    | OutputType::MultisigReplay
    | OutputType::MultisigData
    | OutputType::MultisigDataReplay => {
      if solutions.len() != 3 || solutions[0] != [1] || solutions[2] != [1] {
        return None;
      }
      let pubkey = PublicKey::from_slice(&solutions[1]).ok()?;
      Some(Destination::PubkeyHash(pubkey.pubkey_hash()))
    }
    OutputType::Nonstandard
    | OutputType::Nulldata
    | OutputType::WitnessV1Taproot => None,
  }
}

/// Derives every destination an output script pays to. Multisig scripts of
/// any shape yield the hash of each valid key, skipping keys that are not
/// curve points, and report the script's signature threshold; every other
/// spendable script yields its single destination with a threshold of one.
pub fn extract_destinations(script: &Script) -> Option<Extracted> {
  let (output_type, solutions) = solve(script);

  match output_type {
    OutputType::Nonstandard | OutputType::Nulldata => None,
    OutputType::Multisig
    | OutputType::MultisigReplay
    | OutputType::MultisigData
    | OutputType::MultisigDataReplay => {
      let required = solutions[0][0];

      let mut destinations = Vec::new();
      for solution in &solutions[1..solutions.len() - 1] {
        if let Ok(pubkey) = PublicKey::from_slice(solution) {
          destinations.push(Destination::PubkeyHash(pubkey.pubkey_hash()));
        }
      }

      if destinations.is_empty() {
        return None;
      }

      Some(Extracted {
        output_type,
        destinations,
        required,
      })
    }
    _ => Some(Extracted {
      output_type,
      destinations: vec![extract_destination(script)?],
      required: 1,
    }),
  }
}
