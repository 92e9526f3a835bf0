//! Classification of XEP transaction output scripts and derivation of the
//! canonical destinations they pay to.
//!
//! The heart of the crate is [`solve`], which pattern-matches a raw output
//! script against the standard templates (pay-to-pubkey, pay-to-pubkey-hash,
//! pay-to-script-hash, bare multisig, witness programs, null data, and the
//! chain's replay-protected variants of each) and returns the classified
//! [`OutputType`] together with the fields the template extracts.
//! [`extract_destination`] and [`extract_destinations`] map a classified
//! script to [`Destination`] values, and the `script_for_*` builders perform
//! the inverse construction.

use {
  bitcoin::{
    PubkeyHash, PublicKey, ScriptHash, WPubkeyHash, WScriptHash,
    hashes::{Hash, hash160},
    opcodes::{self, Opcode},
    script::{Builder, PushBytes, Script, ScriptBuf},
  },
  serde::{Deserialize, Serialize},
  std::fmt::{self, Display, Formatter},
  thiserror::Error,
};

pub use {
  builder::{
    MultisigError, script_for_destination, script_for_multisig, script_for_raw_pubkey,
    script_for_witness,
  },
  destination::{Destination, Extracted, extract_destination, extract_destinations},
  output_type::OutputType,
  policy::Policy,
  pushdata::{is_minimal_push, is_minimally_encoded, is_push_only},
  sigops::sig_op_count,
  solver::solve,
};

mod builder;
mod destination;
mod output_type;
mod policy;
mod pushdata;
mod sigops;
mod solver;

pub const PUBKEY_SIZE: usize = 65;
pub const COMPRESSED_PUBKEY_SIZE: usize = 33;
pub const WITNESS_V0_KEYHASH_SIZE: usize = 20;
pub const WITNESS_V0_SCRIPTHASH_SIZE: usize = 32;

/// Largest payload accepted in the data-then-drop position of the
/// `multisig_data` and `pubkey_data_replay` templates.
pub const MAX_DATA_DROP_SIZE: usize = 80;

/// Default byte budget for a data-carrier output: OP_RETURN, two push
/// opcodes, and [`MAX_DATA_DROP_SIZE`] bytes of payload.
pub const MAX_OP_RETURN_RELAY: usize = 83;

pub const MAX_PUBKEYS_PER_MULTISIG: usize = 20;

/// The replay-protection opcode, a repurposed OP_NOP5. Replay-protected
/// templates end with a height and locktime push, this opcode, and OP_2DROP
/// to erase the two operands.
pub const OP_CHECKBLOCKATHEIGHTVERIFY: u8 = opcodes::all::OP_NOP5.to_u8();

pub(crate) const OP_0: u8 = opcodes::OP_0.to_u8();
pub(crate) const OP_PUSHDATA1: u8 = opcodes::all::OP_PUSHDATA1.to_u8();
pub(crate) const OP_PUSHDATA2: u8 = opcodes::all::OP_PUSHDATA2.to_u8();
pub(crate) const OP_PUSHDATA4: u8 = opcodes::all::OP_PUSHDATA4.to_u8();
pub(crate) const OP_1: u8 = opcodes::all::OP_PUSHNUM_1.to_u8();
pub(crate) const OP_16: u8 = opcodes::all::OP_PUSHNUM_16.to_u8();
pub(crate) const OP_RETURN: u8 = opcodes::all::OP_RETURN.to_u8();
pub(crate) const OP_DROP: u8 = opcodes::all::OP_DROP.to_u8();
pub(crate) const OP_2DROP: u8 = opcodes::all::OP_2DROP.to_u8();
pub(crate) const OP_DUP: u8 = opcodes::all::OP_DUP.to_u8();
pub(crate) const OP_EQUAL: u8 = opcodes::all::OP_EQUAL.to_u8();
pub(crate) const OP_EQUALVERIFY: u8 = opcodes::all::OP_EQUALVERIFY.to_u8();
pub(crate) const OP_HASH160: u8 = opcodes::all::OP_HASH160.to_u8();
pub(crate) const OP_CHECKSIG: u8 = opcodes::all::OP_CHECKSIG.to_u8();
pub(crate) const OP_CHECKSIGVERIFY: u8 = opcodes::all::OP_CHECKSIGVERIFY.to_u8();
pub(crate) const OP_CHECKMULTISIG: u8 = opcodes::all::OP_CHECKMULTISIG.to_u8();
pub(crate) const OP_CHECKMULTISIGVERIFY: u8 = opcodes::all::OP_CHECKMULTISIGVERIFY.to_u8();
