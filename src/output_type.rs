use super::*;

/// The classified template of an output script.
///
/// `WitnessV1Taproot` is carried for completeness but never produced by
/// [`solve`]: the chain reports every nonzero witness version as
/// `WitnessUnknown`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputType {
  Nonstandard,
  Pubkey,
  PubkeyReplay,
  PubkeyDataReplay,
  Pubkeyhash,
  PubkeyhashReplay,
  Scripthash,
  ScripthashReplay,
  Multisig,
  MultisigReplay,
  MultisigData,
  MultisigDataReplay,
  Nulldata,
  WitnessV0Keyhash,
  WitnessV0Scripthash,
  WitnessV1Taproot,
  WitnessUnknown,
}

impl OutputType {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Nonstandard => "nonstandard",
      Self::Pubkey => "pubkey",
      Self::PubkeyReplay => "pubkey_replay",
      Self::PubkeyDataReplay => "pubkey_data_replay",
      Self::Pubkeyhash => "pubkeyhash",
      Self::PubkeyhashReplay => "pubkeyhash_replay",
      Self::Scripthash => "scripthash",
      Self::ScripthashReplay => "scripthash_replay",
      Self::Multisig => "multisig",
      Self::MultisigReplay => "multisig_replay",
      Self::MultisigData => "multisig_data",
      Self::MultisigDataReplay => "multisig_data_replay",
      Self::Nulldata => "nulldata",
      Self::WitnessV0Keyhash => "witness_v0_keyhash",
      Self::WitnessV0Scripthash => "witness_v0_scripthash",
      Self::WitnessV1Taproot => "witness_v1_taproot",
      Self::WitnessUnknown => "witness_unknown",
    }
  }
}

impl Display for OutputType {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
